//! Application Configuration
//!
//! Configuration for the quote application layer.

use std::time::Duration;

/// Intake mode for a quote endpoint
///
/// One submission pipeline serves both observed endpoint behaviors; this
/// flag is the only difference between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntakePolicy {
    /// Name and email required; a missing provider is a server error
    Strict,
    /// Email optional; a missing provider still accepts the request
    Lenient,
}

/// Quote application configuration
#[derive(Debug, Clone)]
pub struct QuoteConfig {
    /// Mailbox that receives quote notifications
    pub to_address: String,
    /// Sender address registered with the provider
    pub from_address: String,
    /// Subject line prefix; the submitter's name is appended
    pub subject_prefix: String,
    /// Upper bound on one provider dispatch call
    pub send_timeout: Duration,
}

impl Default for QuoteConfig {
    fn default() -> Self {
        Self {
            to_address: "hello@example.com".to_string(),
            from_address: "quotes@example.com".to_string(),
            subject_prefix: "New quote request".to_string(),
            send_timeout: Duration::from_secs(10),
        }
    }
}

impl QuoteConfig {
    /// Build from `QUOTE_TO_EMAIL` / `QUOTE_FROM_EMAIL` /
    /// `QUOTE_SEND_TIMEOUT` (seconds), falling back to the defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            to_address: std::env::var("QUOTE_TO_EMAIL").unwrap_or(defaults.to_address),
            from_address: std::env::var("QUOTE_FROM_EMAIL").unwrap_or(defaults.from_address),
            subject_prefix: defaults.subject_prefix,
            send_timeout: std::env::var("QUOTE_SEND_TIMEOUT")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.send_timeout),
        }
    }
}
