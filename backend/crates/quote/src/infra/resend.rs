//! Resend Provider Binding
//!
//! <https://resend.com/docs/api-reference/emails/send-email>

use serde::Deserialize;

use crate::domain::mailer::{DispatchReceipt, EmailSender};
use crate::domain::value_objects::EmailMessage;
use crate::error::{QuoteError, QuoteResult};

const RESEND_ENDPOINT: &str = "https://api.resend.com/emails";

/// Resend-backed mailer
#[derive(Clone)]
pub struct ResendMailer {
    client: reqwest::Client,
    api_key: String,
}

/// Success body: `{"id": "..."}`
#[derive(Debug, Deserialize)]
struct ResendResponse {
    id: Option<String>,
}

impl ResendMailer {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
        }
    }
}

impl EmailSender for ResendMailer {
    async fn send(&self, message: &EmailMessage) -> QuoteResult<DispatchReceipt> {
        let payload = serde_json::json!({
            "from": message.from,
            "to": [message.to],
            "reply_to": message.reply_to,
            "subject": message.subject,
            "html": message.html,
            "text": message.text,
        });

        let response = self
            .client
            .post(RESEND_ENDPOINT)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    QuoteError::ProviderTimeout
                } else {
                    QuoteError::ProviderTransport(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(QuoteError::ProviderRejected {
                provider: "resend",
                status: status.as_u16(),
                detail,
            });
        }

        // The message left on a 2xx; an unexpected success body only costs
        // us the id, so it is logged rather than surfaced as a failure.
        let id = match response.json::<ResendResponse>().await {
            Ok(body) => body.id,
            Err(e) => {
                tracing::warn!(error = %e, "Unexpected Resend success payload");
                None
            }
        };

        Ok(DispatchReceipt {
            provider_message_id: id,
        })
    }

    fn provider_name(&self) -> &'static str {
        "resend"
    }
}
