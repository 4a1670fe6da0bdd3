//! Presentation Layer
//!
//! HTTP handlers, DTOs, and router.

pub mod dto;
pub mod handlers;
pub mod router;

pub use handlers::QuoteAppState;
pub use router::{quote_router, quote_router_generic};
