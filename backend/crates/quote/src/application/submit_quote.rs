//! Submit Quote Use Case
//!
//! Turns a raw inbound payload into either a dispatched notification or a
//! rejected request. Order matters: the rate limit is charged before the
//! payload is even parsed, and validation completes before any external
//! call, so invalid input has zero side effects beyond its window count.

use std::sync::Arc;

use serde::Deserialize;

use kernel::id::QuoteId;
use platform::rate_limit::RateLimitStore;

use crate::application::config::{IntakePolicy, QuoteConfig};
use crate::domain::entities::QuoteRequest;
use crate::domain::mailer::EmailSender;
use crate::domain::services::{render_html, render_text};
use crate::domain::value_objects::{Email, EmailMessage};
use crate::error::{QuoteError, QuoteResult};

/// Raw payload shape accepted from the form
///
/// Unknown fields are ignored; wrong-typed known fields fail the parse.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotePayload {
    pub name: Option<String>,
    pub email: Option<String>,
    pub company: Option<String>,
    pub service_type: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub preferred_contact: Option<String>,
    pub budget: Option<String>,
    pub timeline: Option<String>,
    pub engagement_type: Option<String>,
    pub notes: Option<String>,
    pub nda: Option<bool>,
    pub timezone: Option<String>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub platforms: Vec<String>,
}

/// Submit quote input
pub struct SubmitQuoteInput {
    /// Request body, still unparsed
    pub raw_body: String,
    /// Opaque client identifier from the transport layer
    pub client_key: Option<String>,
}

/// Submit quote output
#[derive(Debug, Clone)]
pub struct SubmitQuoteOutput {
    pub quote_id: QuoteId,
    pub email_id: Option<String>,
    /// False only on the lenient path with no provider configured
    pub delivered: bool,
}

/// Submit quote use case
pub struct SubmitQuoteUseCase<S, M>
where
    S: RateLimitStore,
    M: EmailSender,
{
    limiter: Arc<S>,
    mailer: Arc<M>,
    config: Arc<QuoteConfig>,
    policy: IntakePolicy,
}

impl<S, M> SubmitQuoteUseCase<S, M>
where
    S: RateLimitStore,
    M: EmailSender,
{
    pub fn new(
        limiter: Arc<S>,
        mailer: Arc<M>,
        config: Arc<QuoteConfig>,
        policy: IntakePolicy,
    ) -> Self {
        Self {
            limiter,
            mailer,
            config,
            policy,
        }
    }

    pub async fn execute(&self, input: SubmitQuoteInput) -> QuoteResult<SubmitQuoteOutput> {
        // Charge the rate limit before touching the payload
        let decision = self.limiter.check(input.client_key.as_deref()).await;
        if decision.limited {
            let now_ms = chrono::Utc::now().timestamp_millis();
            return Err(QuoteError::RateLimited {
                retry_after_secs: decision.retry_after_secs(now_ms),
                reset_at_ms: decision.reset_at_ms,
            });
        }

        let payload: QuotePayload = serde_json::from_str(&input.raw_body)
            .map_err(|e| QuoteError::InvalidPayload(e.to_string()))?;

        let request = validate(payload, self.policy)?;
        let quote_id = QuoteId::new();

        let message = EmailMessage {
            to: self.config.to_address.clone(),
            from: self.config.from_address.clone(),
            reply_to: request.reply_to(),
            subject: format!("{} from {}", self.config.subject_prefix, request.name),
            html: render_html(&request),
            text: render_text(&request),
        };

        let sent =
            tokio::time::timeout(self.config.send_timeout, self.mailer.send(&message)).await;

        match sent {
            // Timeout is indistinguishable from any other provider failure
            Err(_) => Err(QuoteError::ProviderTimeout),
            Ok(Err(QuoteError::ProviderUnconfigured)) => match self.policy {
                IntakePolicy::Strict => Err(QuoteError::ProviderUnconfigured),
                IntakePolicy::Lenient => {
                    tracing::info!(
                        quote_id = %quote_id,
                        name = %request.name,
                        "Quote received; no email provider configured"
                    );
                    Ok(SubmitQuoteOutput {
                        quote_id,
                        email_id: None,
                        delivered: false,
                    })
                }
            },
            Ok(Err(e)) => Err(e),
            Ok(Ok(receipt)) => {
                tracing::info!(
                    quote_id = %quote_id,
                    provider = self.mailer.provider_name(),
                    "Quote notification dispatched"
                );
                Ok(SubmitQuoteOutput {
                    quote_id,
                    email_id: receipt.provider_message_id,
                    delivered: true,
                })
            }
        }
    }
}

/// Validate the payload into a domain request
///
/// Strict requires name and email; lenient requires only name and checks
/// the email shape when one is supplied.
fn validate(payload: QuotePayload, policy: IntakePolicy) -> QuoteResult<QuoteRequest> {
    let name = match clean(payload.name) {
        Some(name) => name,
        None => return Err(QuoteError::MissingRequired),
    };

    let email = match (policy, clean(payload.email)) {
        (IntakePolicy::Strict, None) => return Err(QuoteError::MissingRequired),
        (_, Some(raw)) => Some(Email::new(raw)?),
        (IntakePolicy::Lenient, None) => None,
    };

    Ok(QuoteRequest {
        name,
        email,
        company: clean(payload.company),
        service_type: clean(payload.service_type),
        phone: clean(payload.phone),
        website: clean(payload.website),
        preferred_contact: clean(payload.preferred_contact),
        budget: clean(payload.budget),
        timeline: clean(payload.timeline),
        engagement_type: clean(payload.engagement_type),
        notes: clean(payload.notes),
        nda: payload.nda,
        timezone: clean(payload.timezone),
        features: clean_list(payload.features),
        platforms: clean_list(payload.platforms),
    })
}

fn clean(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn clean_list(values: Vec<String>) -> Vec<String> {
    values
        .into_iter()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .collect()
}
