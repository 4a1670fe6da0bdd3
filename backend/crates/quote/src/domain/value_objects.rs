//! Domain Value Objects
//!
//! Immutable value types for the quote domain.

use crate::error::{QuoteError, QuoteResult};

/// Maximum email length (per RFC 5321)
const EMAIL_MAX_LENGTH: usize = 254;

/// Email address value object
///
/// Basic shape validation only (`local@domain.tld`) - nothing here verifies
/// the mailbox exists. Matches the form's client-side check so the two
/// sides never disagree about what is acceptable.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Email(String);

impl Email {
    /// Create a new email with validation
    pub fn new(email: impl Into<String>) -> QuoteResult<Self> {
        let email = email.into().trim().to_lowercase();

        if email.is_empty() || email.len() > EMAIL_MAX_LENGTH {
            return Err(QuoteError::InvalidEmail);
        }

        if !Self::is_valid_shape(&email) {
            return Err(QuoteError::InvalidEmail);
        }

        Ok(Self(email))
    }

    /// Shape check equivalent to `^[^\s@]+@[^\s@]+\.[^\s@]+$`
    fn is_valid_shape(email: &str) -> bool {
        if email.chars().any(char::is_whitespace) {
            return false;
        }

        // Exactly one @ with non-empty sides
        let mut parts = email.split('@');
        let (local, domain) = match (parts.next(), parts.next(), parts.next()) {
            (Some(local), Some(domain), None) => (local, domain),
            _ => return false,
        };
        if local.is_empty() || domain.is_empty() {
            return false;
        }

        // Domain needs a dot with something on both sides
        match domain.rsplit_once('.') {
            Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
            None => false,
        }
    }

    /// Get the email as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Outbound notification message handed to a mailer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub to: String,
    pub from: String,
    pub reply_to: Option<String>,
    pub subject: String,
    pub html: String,
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_valid() {
        assert!(Email::new("user@example.com").is_ok());
        assert!(Email::new("User@Example.COM").is_ok()); // Should lowercase
        assert!(Email::new("user.name@example.co.jp").is_ok());
        assert!(Email::new("user+tag@example.com").is_ok());
    }

    #[test]
    fn test_email_invalid() {
        assert!(Email::new("").is_err());
        assert!(Email::new("not-an-email").is_err());
        assert!(Email::new("user@").is_err());
        assert!(Email::new("@example.com").is_err());
        assert!(Email::new("user@@example.com").is_err());
        assert!(Email::new("user@example").is_err());
        assert!(Email::new("user@.com").is_err());
        assert!(Email::new("user@example.").is_err());
        assert!(Email::new("us er@example.com").is_err());
    }

    #[test]
    fn test_email_case_normalization() {
        let email = Email::new("User@Example.COM").unwrap();
        assert_eq!(email.as_str(), "user@example.com");
    }

    #[test]
    fn test_email_too_long() {
        let local = "a".repeat(250);
        assert!(Email::new(format!("{}@example.com", local)).is_err());
    }
}
