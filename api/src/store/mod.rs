//! Inquiry persistence
//!
//! The endpoint writes through [`InquiryStore`]; the production adapter is a
//! PostgREST-style REST table ([`RestInquiryStore`]).

mod rest;

pub use rest::RestInquiryStore;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use agency_forms::InquiryPayload;

/// Datastore failures
#[derive(Error, Debug)]
pub enum StoreError {
    /// Transport or decoding failure
    #[error("datastore request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Non-success status from the datastore
    #[error("datastore returned {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body, as text
        body: String,
    },

    /// Insert succeeded but no row came back
    #[error("datastore returned no row id")]
    MissingId,

    /// Record could not be encoded
    #[error("invalid record: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Insert-only inquiry sink
#[async_trait]
pub trait InquiryStore: Send + Sync {
    /// Persist one record and return its datastore id
    async fn insert(&self, record: &InquiryRecord) -> Result<String, StoreError>;
}

/// One row of the `inquiries` table.
///
/// Column names are snake_case; category-specific answers go into the
/// `form_data` JSON column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InquiryRecord {
    /// Contact name
    pub full_name: String,
    /// Organisation
    pub company_name: String,
    /// Contact email
    pub email: String,
    /// Contact phone
    pub phone: Option<String>,
    /// `email`, `call` or `whatsapp`
    pub preferred_contact: Option<String>,
    /// Industry
    pub industry: Option<String>,
    /// Free-text description
    pub description: Option<String>,
    /// Service category slug
    pub service_id: Option<String>,
    /// Budget bracket
    pub budget_range: Option<String>,
    /// Requested timeline
    pub timeline: Option<String>,
    /// Preferred contact time
    pub preferred_contact_time: Option<String>,
    /// Privacy consent
    pub agreed_to_privacy: bool,
    /// Extra comments
    pub additional_comments: Option<String>,
    /// `en` or `ar`
    pub locale: String,
    /// Category-specific answers keyed by field id
    pub form_data: serde_json::Value,
    /// Acceptance time
    pub created_at: DateTime<Utc>,
}

impl InquiryRecord {
    /// Map a wire payload onto table columns
    pub fn from_payload(payload: &InquiryPayload, at: DateTime<Utc>) -> Result<Self, StoreError> {
        Ok(Self {
            full_name: payload.full_name.trim().to_string(),
            company_name: payload.company_name.trim().to_string(),
            email: payload.email.trim().to_string(),
            phone: payload.phone.clone(),
            preferred_contact: payload.preferred_contact.map(|m| m.as_str().to_string()),
            industry: payload.industry.clone(),
            description: payload.description.clone(),
            service_id: payload.service_id.map(|s| s.as_str().to_string()),
            budget_range: payload.budget_range.clone(),
            timeline: payload.timeline.clone(),
            preferred_contact_time: payload.preferred_contact_time.clone(),
            agreed_to_privacy: payload.agreed_to_privacy,
            additional_comments: payload.additional_comments.clone(),
            locale: payload.locale.as_str().to_string(),
            form_data: serde_json::to_value(&payload.extra)?,
            created_at: at,
        })
    }
}
