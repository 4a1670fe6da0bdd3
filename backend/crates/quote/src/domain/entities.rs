//! Domain Entities
//!
//! Core business entities for the quote domain.

use crate::domain::value_objects::Email;

/// A validated quote request from the marketing site's form
///
/// `email` is optional only because the lenient intake path accepts
/// submissions without one; the strict path guarantees it is present
/// before this entity is constructed.
#[derive(Debug, Clone, Default)]
pub struct QuoteRequest {
    pub name: String,
    pub email: Option<Email>,
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
    pub features: Vec<String>,
    pub platforms: Vec<String>,
}

impl QuoteRequest {
    /// Reply-to address for the notification, when the submitter gave one
    pub fn reply_to(&self) -> Option<String> {
        self.email.as_ref().map(|e| e.to_string())
    }
}
