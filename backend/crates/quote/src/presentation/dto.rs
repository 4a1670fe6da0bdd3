//! API DTOs (Data Transfer Objects)

use serde::Serialize;

// ============================================================================
// Strict intake (POST /api/send-quote)
// ============================================================================

/// Success response for POST /api/send-quote
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendQuoteResponse {
    pub success: bool,
    pub message: String,
    /// Provider message id; null when the provider returned none
    pub email_id: Option<String>,
}

// ============================================================================
// Lenient intake (POST /api/quote)
// ============================================================================

/// Success response for POST /api/quote
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LenientQuoteResponse {
    pub ok: bool,
    pub received: bool,
    /// `"no-provider"` when the request was accepted without a dispatch
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_id: Option<String>,
}

/// Provider-failure response for POST /api/quote
#[derive(Debug, Clone, Serialize)]
pub struct LenientQuoteErrorResponse {
    pub ok: bool,
    /// Provider-scoped error code, e.g. `sendgrid_error`
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    pub detail: String,
}
