//! Quote Error Types
//!
//! This module provides quote-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.
//!
//! The strict intake endpoint answers with the wire shapes the form
//! expects: `{"error": ...}` for caller mistakes and
//! `{"error": ..., "details": ...}` for server-side failures. Rate-limit
//! rejections additionally carry `Retry-After` and `X-RateLimit-*` headers.

use axum::Json;
use axum::http::{HeaderName, StatusCode, header};
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Quote-specific result type alias
pub type QuoteResult<T> = Result<T, QuoteError>;

/// Quote-specific error variants
///
/// These are domain-specific errors that map to appropriate HTTP status
/// codes and can be converted to `AppError` for unified error handling.
#[derive(Debug, Error)]
pub enum QuoteError {
    /// Caller exceeded the per-client quota; recoverable after the reset
    #[error("Too many requests. Please try again later.")]
    RateLimited {
        retry_after_secs: i64,
        reset_at_ms: i64,
    },

    /// Request body is not parsable as a quote payload
    #[error("Invalid request body")]
    InvalidPayload(String),

    /// A required field is missing or empty
    #[error("Name and email are required")]
    MissingRequired,

    /// Email does not match the `local@domain.tld` shape
    #[error("Invalid email format")]
    InvalidEmail,

    /// No provider credentials available
    #[error("Email provider is not configured")]
    ProviderUnconfigured,

    /// Provider answered with a non-2xx status
    #[error("Email provider rejected the message")]
    ProviderRejected {
        provider: &'static str,
        status: u16,
        detail: String,
    },

    /// Network-level failure talking to the provider
    #[error("Email provider request failed")]
    ProviderTransport(String),

    /// Provider call exceeded the dispatch timeout
    #[error("Email provider request timed out")]
    ProviderTimeout,

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl QuoteError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            QuoteError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            QuoteError::InvalidPayload(_)
            | QuoteError::MissingRequired
            | QuoteError::InvalidEmail => StatusCode::BAD_REQUEST,
            QuoteError::ProviderUnconfigured
            | QuoteError::ProviderRejected { .. }
            | QuoteError::ProviderTransport(_)
            | QuoteError::ProviderTimeout
            | QuoteError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            QuoteError::RateLimited { .. } => ErrorKind::TooManyRequests,
            QuoteError::InvalidPayload(_)
            | QuoteError::MissingRequired
            | QuoteError::InvalidEmail => ErrorKind::BadRequest,
            QuoteError::ProviderUnconfigured
            | QuoteError::ProviderRejected { .. }
            | QuoteError::ProviderTransport(_)
            | QuoteError::ProviderTimeout
            | QuoteError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Server-error detail surfaced in the `details` field
    pub fn details(&self) -> Option<String> {
        match self {
            QuoteError::ProviderUnconfigured => {
                Some("Set RESEND_API_KEY or SENDGRID_API_KEY".to_string())
            }
            QuoteError::ProviderRejected { provider, status, .. } => {
                Some(format!("{} returned status {}", provider, status))
            }
            QuoteError::ProviderTransport(detail) => Some(detail.clone()),
            QuoteError::ProviderTimeout => Some("Provider call timed out".to_string()),
            QuoteError::Internal(detail) => Some(detail.clone()),
            _ => None,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string())
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            QuoteError::ProviderRejected {
                provider,
                status,
                detail,
            } => {
                tracing::error!(provider, status, detail = %detail, "Provider rejected message");
            }
            QuoteError::ProviderTransport(detail) => {
                tracing::error!(detail = %detail, "Provider transport failure");
            }
            QuoteError::ProviderTimeout => {
                tracing::error!("Provider call timed out");
            }
            QuoteError::ProviderUnconfigured => {
                tracing::error!("No email provider configured");
            }
            QuoteError::Internal(detail) => {
                tracing::error!(detail = %detail, "Internal error");
            }
            QuoteError::RateLimited { .. } => {
                tracing::warn!("Rate limited quote submission");
            }
            _ => {
                tracing::debug!(error = %self, "Quote intake rejected");
            }
        }
    }
}

impl IntoResponse for QuoteError {
    fn into_response(self) -> Response {
        self.log();
        let status = self.status_code();

        match &self {
            QuoteError::RateLimited {
                retry_after_secs,
                reset_at_ms,
            } => {
                let headers = [
                    (header::RETRY_AFTER, retry_after_secs.to_string()),
                    (
                        HeaderName::from_static("x-ratelimit-remaining"),
                        "0".to_string(),
                    ),
                    (
                        HeaderName::from_static("x-ratelimit-reset"),
                        (reset_at_ms / 1000).to_string(),
                    ),
                ];
                let body = serde_json::json!({ "error": self.to_string() });
                (status, headers, Json(body)).into_response()
            }
            _ if status.is_server_error() => {
                let body = serde_json::json!({
                    "error": self.to_string(),
                    "details": self.details(),
                });
                (status, Json(body)).into_response()
            }
            _ => {
                let body = serde_json::json!({ "error": self.to_string() });
                (status, Json(body)).into_response()
            }
        }
    }
}

impl From<AppError> for QuoteError {
    fn from(err: AppError) -> Self {
        QuoteError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let limited = QuoteError::RateLimited {
            retry_after_secs: 60,
            reset_at_ms: 0,
        };
        assert_eq!(limited.status_code(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(
            QuoteError::MissingRequired.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            QuoteError::InvalidEmail.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            QuoteError::InvalidPayload("bad".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            QuoteError::ProviderUnconfigured.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            QuoteError::ProviderTimeout.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_kinds_match_status() {
        let limited = QuoteError::RateLimited {
            retry_after_secs: 60,
            reset_at_ms: 0,
        };
        assert_eq!(limited.kind(), ErrorKind::TooManyRequests);
        assert_eq!(QuoteError::InvalidEmail.kind(), ErrorKind::BadRequest);
        assert_eq!(
            QuoteError::ProviderTransport("boom".into()).kind(),
            ErrorKind::InternalServerError
        );
    }

    #[test]
    fn test_field_specific_messages() {
        assert_eq!(
            QuoteError::MissingRequired.to_string(),
            "Name and email are required"
        );
        assert_eq!(QuoteError::InvalidEmail.to_string(), "Invalid email format");
    }

    #[test]
    fn test_provider_rejected_details() {
        let err = QuoteError::ProviderRejected {
            provider: "resend",
            status: 422,
            detail: "unprocessable".into(),
        };
        assert_eq!(err.details(), Some("resend returned status 422".into()));
    }
}
