//! Quote Router

use axum::{Router, routing::post};
use std::sync::Arc;

use platform::rate_limit::{MemoryRateLimitStore, RateLimitStore};

use crate::application::config::QuoteConfig;
use crate::domain::mailer::EmailSender;
use crate::infra::Mailer;
use crate::presentation::handlers::{self, QuoteAppState};

/// Create the quote router with the in-memory limiter and the
/// environment-selected provider
pub fn quote_router(limiter: MemoryRateLimitStore, mailer: Mailer, config: QuoteConfig) -> Router {
    quote_router_generic(Arc::new(limiter), Arc::new(mailer), config)
}

/// Create a generic quote router for any store/mailer implementation
pub fn quote_router_generic<S, M>(limiter: Arc<S>, mailer: Arc<M>, config: QuoteConfig) -> Router
where
    S: RateLimitStore + Send + Sync + 'static,
    M: EmailSender + Send + Sync + 'static,
{
    let state = QuoteAppState {
        limiter,
        mailer,
        config: Arc::new(config),
    };

    Router::new()
        .route("/send-quote", post(handlers::send_quote::<S, M>))
        .route("/quote", post(handlers::quote::<S, M>))
        .with_state(state)
}
