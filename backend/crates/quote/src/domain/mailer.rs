//! Mailer Port
//!
//! Interface for transactional email dispatch. Implementations live in the
//! infrastructure layer; the application layer only sees this trait.

use crate::domain::value_objects::EmailMessage;
use crate::error::QuoteResult;

/// Result of a successful provider dispatch
#[derive(Debug, Clone)]
pub struct DispatchReceipt {
    /// Opaque message identifier, when the provider returns one
    pub provider_message_id: Option<String>,
}

/// Email sender trait
#[trait_variant::make(EmailSender: Send)]
pub trait LocalEmailSender {
    /// Dispatch one message through the provider.
    ///
    /// Called exactly once per accepted submission; retries, if any,
    /// belong to the caller.
    async fn send(&self, message: &EmailMessage) -> QuoteResult<DispatchReceipt>;

    /// Short provider identifier used in logs and error codes
    fn provider_name(&self) -> &'static str;
}
