//! Application Layer
//!
//! Use cases and application configuration.

pub mod config;
pub mod submit_quote;

pub use config::{IntakePolicy, QuoteConfig};
pub use submit_quote::{QuotePayload, SubmitQuoteInput, SubmitQuoteOutput, SubmitQuoteUseCase};
