//! Infrastructure Layer
//!
//! Concrete transactional email provider bindings.

pub mod resend;
pub mod sendgrid;

use crate::domain::mailer::{DispatchReceipt, EmailSender};
use crate::domain::value_objects::EmailMessage;
use crate::error::{QuoteError, QuoteResult};

pub use resend::ResendMailer;
pub use sendgrid::SendGridMailer;

/// Provider selected from the environment
///
/// Resend wins when both keys are present; `Unconfigured` keeps the
/// pipeline runnable before any email plumbing exists.
#[derive(Clone)]
pub enum Mailer {
    Resend(ResendMailer),
    SendGrid(SendGridMailer),
    Unconfigured,
}

impl Mailer {
    /// Pick a provider from `RESEND_API_KEY` / `SENDGRID_API_KEY`
    pub fn from_env() -> Self {
        if let Ok(key) = std::env::var("RESEND_API_KEY") {
            if !key.is_empty() {
                return Mailer::Resend(ResendMailer::new(key));
            }
        }
        if let Ok(key) = std::env::var("SENDGRID_API_KEY") {
            if !key.is_empty() {
                return Mailer::SendGrid(SendGridMailer::new(key));
            }
        }
        tracing::warn!("No email provider configured; quote notifications will not be sent");
        Mailer::Unconfigured
    }
}

impl EmailSender for Mailer {
    async fn send(&self, message: &EmailMessage) -> QuoteResult<DispatchReceipt> {
        match self {
            Mailer::Resend(mailer) => mailer.send(message).await,
            Mailer::SendGrid(mailer) => mailer.send(message).await,
            Mailer::Unconfigured => Err(QuoteError::ProviderUnconfigured),
        }
    }

    fn provider_name(&self) -> &'static str {
        match self {
            Mailer::Resend(mailer) => mailer.provider_name(),
            Mailer::SendGrid(mailer) => mailer.provider_name(),
            Mailer::Unconfigured => "none",
        }
    }
}
