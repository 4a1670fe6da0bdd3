//! SendGrid Provider Binding
//!
//! <https://www.twilio.com/docs/sendgrid/api-reference/mail-send/mail-send>

use crate::domain::mailer::{DispatchReceipt, EmailSender};
use crate::domain::value_objects::EmailMessage;
use crate::error::{QuoteError, QuoteResult};

const SENDGRID_ENDPOINT: &str = "https://api.sendgrid.com/v3/mail/send";

/// SendGrid-backed mailer
#[derive(Clone)]
pub struct SendGridMailer {
    client: reqwest::Client,
    api_key: String,
}

impl SendGridMailer {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
        }
    }
}

impl EmailSender for SendGridMailer {
    async fn send(&self, message: &EmailMessage) -> QuoteResult<DispatchReceipt> {
        let mut payload = serde_json::json!({
            "personalizations": [{ "to": [{ "email": message.to }] }],
            "from": { "email": message.from },
            "subject": message.subject,
            "content": [
                { "type": "text/plain", "value": message.text },
                { "type": "text/html", "value": message.html },
            ],
        });
        if let Some(reply_to) = &message.reply_to {
            payload["reply_to"] = serde_json::json!({ "email": reply_to });
        }

        let response = self
            .client
            .post(SENDGRID_ENDPOINT)
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
                provider: "sendgrid",
                status: status.as_u16(),
                detail,
            });
        }

        // 202 Accepted carries no body; the id lives in a response header.
        let id = response
            .headers()
            .get("x-message-id")
            .and_then(|v| v.to_str().ok())
            .map(|v| v.to_string());

        Ok(DispatchReceipt {
            provider_message_id: id,
        })
    }

    fn provider_name(&self) -> &'static str {
        "sendgrid"
    }
}
