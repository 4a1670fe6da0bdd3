//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use std::sync::Arc;

use platform::client::rate_limit_key;
use platform::rate_limit::RateLimitStore;

use crate::application::config::{IntakePolicy, QuoteConfig};
use crate::application::submit_quote::{SubmitQuoteInput, SubmitQuoteUseCase};
use crate::domain::mailer::EmailSender;
use crate::error::{QuoteError, QuoteResult};
use crate::presentation::dto::{
    LenientQuoteErrorResponse, LenientQuoteResponse, SendQuoteResponse,
};

/// Shared state for quote handlers
pub struct QuoteAppState<S, M>
where
    S: RateLimitStore + Send + Sync + 'static,
    M: EmailSender + Send + Sync + 'static,
{
    pub limiter: Arc<S>,
    pub mailer: Arc<M>,
    pub config: Arc<QuoteConfig>,
}

// Manual impl: the store itself need not be Clone behind the Arc.
impl<S, M> Clone for QuoteAppState<S, M>
where
    S: RateLimitStore + Send + Sync + 'static,
    M: EmailSender + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            limiter: self.limiter.clone(),
            mailer: self.mailer.clone(),
            config: self.config.clone(),
        }
    }
}

// ============================================================================
// Strict intake
// ============================================================================

/// POST /api/send-quote
pub async fn send_quote<S, M>(
    State(state): State<QuoteAppState<S, M>>,
    headers: HeaderMap,
    axum::extract::ConnectInfo(addr): axum::extract::ConnectInfo<std::net::SocketAddr>,
    body: String,
) -> QuoteResult<Json<SendQuoteResponse>>
where
    S: RateLimitStore + Send + Sync + 'static,
    M: EmailSender + Send + Sync + 'static,
{
    let client_key = rate_limit_key(&headers, Some(addr.ip()));

    let use_case = SubmitQuoteUseCase::new(
        state.limiter.clone(),
        state.mailer.clone(),
        state.config.clone(),
        IntakePolicy::Strict,
    );

    let output = use_case
        .execute(SubmitQuoteInput {
            raw_body: body,
            client_key,
        })
        .await?;

    Ok(Json(SendQuoteResponse {
        success: true,
        message: "Quote request sent successfully".to_string(),
        email_id: output.email_id,
    }))
}

// ============================================================================
// Lenient intake
// ============================================================================

/// POST /api/quote
pub async fn quote<S, M>(
    State(state): State<QuoteAppState<S, M>>,
    headers: HeaderMap,
    axum::extract::ConnectInfo(addr): axum::extract::ConnectInfo<std::net::SocketAddr>,
    body: String,
) -> Response
where
    S: RateLimitStore + Send + Sync + 'static,
    M: EmailSender + Send + Sync + 'static,
{
    let client_key = rate_limit_key(&headers, Some(addr.ip()));

    let use_case = SubmitQuoteUseCase::new(
        state.limiter.clone(),
        state.mailer.clone(),
        state.config.clone(),
        IntakePolicy::Lenient,
    );

    match use_case
        .execute(SubmitQuoteInput {
            raw_body: body,
            client_key,
        })
        .await
    {
        Ok(output) => {
            let note = (!output.delivered).then(|| "no-provider".to_string());
            Json(LenientQuoteResponse {
                ok: true,
                received: true,
                note,
                email_id: output.email_id,
            })
            .into_response()
        }
        Err(QuoteError::ProviderRejected {
            provider,
            status,
            detail,
        }) => {
            tracing::error!(provider, status, detail = %detail, "Provider rejected message");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(LenientQuoteErrorResponse {
                    ok: false,
                    error: format!("{}_error", provider),
                    status: Some(status),
                    detail,
                }),
            )
                .into_response()
        }
        Err(err @ (QuoteError::ProviderTransport(_) | QuoteError::ProviderTimeout)) => {
            let detail = err.details().unwrap_or_default();
            tracing::error!(detail = %detail, "Provider dispatch failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(LenientQuoteErrorResponse {
                    ok: false,
                    error: format!("{}_error", state.mailer.provider_name()),
                    status: None,
                    detail,
                }),
            )
                .into_response()
        }
        // Validation and rate-limit rejections share the strict wire shapes
        Err(err) => err.into_response(),
    }
}
