//! Domain Services
//!
//! Pure rendering logic for the notification message. Both renderings are
//! built from the same field enumeration so they can never disagree about
//! which supplied fields appear.

use crate::domain::entities::QuoteRequest;

/// Enumerate every non-empty field as a label/value row, in form order
pub fn field_rows(request: &QuoteRequest) -> Vec<(&'static str, String)> {
    let mut rows = vec![("Name", request.name.clone())];

    if let Some(email) = &request.email {
        rows.push(("Email", email.to_string()));
    }

    push_opt(&mut rows, "Company", &request.company);
    push_opt(&mut rows, "Service", &request.service_type);
    push_opt(&mut rows, "Phone", &request.phone);
    push_opt(&mut rows, "Website", &request.website);
    push_opt(&mut rows, "Preferred contact", &request.preferred_contact);
    push_opt(&mut rows, "Budget", &request.budget);
    push_opt(&mut rows, "Timeline", &request.timeline);
    push_opt(&mut rows, "Engagement", &request.engagement_type);

    if let Some(nda) = request.nda {
        rows.push(("NDA", if nda { "Yes" } else { "No" }.to_string()));
    }

    push_opt(&mut rows, "Timezone", &request.timezone);

    if !request.features.is_empty() {
        rows.push(("Features", request.features.join(", ")));
    }
    if !request.platforms.is_empty() {
        rows.push(("Platforms", request.platforms.join(", ")));
    }

    push_opt(&mut rows, "Notes", &request.notes);

    rows
}

/// Plain-text rendering of the notification body
pub fn render_text(request: &QuoteRequest) -> String {
    let mut out = String::from("New quote request\n\n");
    for (label, value) in field_rows(request) {
        out.push_str(label);
        out.push_str(": ");
        out.push_str(&value);
        out.push('\n');
    }
    out
}

/// HTML rendering of the notification body
///
/// Values come straight from the form, so everything is escaped.
pub fn render_html(request: &QuoteRequest) -> String {
    let mut out = String::from("<h2>New quote request</h2>\n<table>\n");
    for (label, value) in field_rows(request) {
        out.push_str(&format!(
            "<tr><td><strong>{}</strong></td><td>{}</td></tr>\n",
            escape_html(label),
            escape_html(&value)
        ));
    }
    out.push_str("</table>\n");
    out
}

/// Minimal HTML entity escaping for untrusted form values
pub fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn push_opt(rows: &mut Vec<(&'static str, String)>, label: &'static str, value: &Option<String>) {
    if let Some(value) = value {
        if !value.is_empty() {
            rows.push((label, value.clone()));
        }
    }
}
