//! Quote Intake Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Quote request entity, value objects, rendering, mailer port
//! - `application/` - Submit use case and application configuration
//! - `infra/` - Transactional email provider bindings (Resend, SendGrid)
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Features
//! - Validated quote-request intake from the marketing site's form
//! - Per-client fixed-window rate limiting ahead of any payload work
//! - Notification dispatch through interchangeable email providers
//! - Strict and lenient intake endpoints sharing one pipeline
//!
//! ## Dispatch Model
//! - Exactly one provider call per accepted request, bounded by a timeout
//! - Provider failures surface as server errors, never silent success
//! - A deployment with no provider configured still accepts lenient
//!   submissions and says so in the response

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use application::config::{IntakePolicy, QuoteConfig};
pub use error::{QuoteError, QuoteResult};
pub use infra::Mailer;
pub use presentation::router::quote_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entities::*;
    pub use crate::domain::value_objects::*;
    pub use crate::presentation::dto::*;
}

pub mod handlers {
    pub use crate::presentation::handlers::*;
}

pub mod router {
    pub use crate::presentation::router::*;
}
