//! API wire models

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Success message returned with every accepted inquiry
pub const ACCEPTED_MESSAGE: &str = "Inquiry submitted successfully";

/// Prefix for ids issued when the datastore is absent or failed
pub const PLACEHOLDER_ID_PREFIX: &str = "temp-";

/// Inquiry request body.
///
/// Documentation shape only; the handler decodes into
/// [`agency_forms::InquiryPayload`]. Category-specific answers are accepted
/// as additional top-level keys.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InquiryRequest {
    /// Required, non-blank
    #[schema(example = "Jane Doe")]
    pub full_name: String,
    /// Required, non-blank
    #[schema(example = "Acme Trading")]
    pub company_name: String,
    /// Required, non-blank; format is not checked here
    #[schema(example = "jane@acme.com")]
    pub email: String,
    /// Contact phone in any format
    pub phone: Option<String>,
    /// One of `email`, `call`, `whatsapp`
    pub preferred_contact: Option<String>,
    /// Industry option value
    pub industry: Option<String>,
    /// Free-text project description
    pub description: Option<String>,
    /// Service category slug, e.g. `web-development`
    pub service_id: Option<String>,
    /// Budget option value; numbers are accepted as text
    pub budget_range: Option<String>,
    /// Timeline option value
    pub timeline: Option<String>,
    /// Preferred time of day for a call back
    pub preferred_contact_time: Option<String>,
    /// Privacy policy consent
    pub agreed_to_privacy: bool,
    /// Anything else the visitor wants to add
    pub additional_comments: Option<String>,
    /// `en` or `ar`
    pub locale: Option<String>,
}

/// Accepted inquiry
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct InquiryAccepted {
    /// Always `true`
    pub success: bool,
    /// Human readable acknowledgement
    pub message: String,
    /// Stored record reference
    pub data: InquiryReceiptData,
}

impl InquiryAccepted {
    /// Acknowledge an inquiry stored under `id`
    pub fn new(id: String, timestamp: chrono::DateTime<chrono::Utc>) -> Self {
        Self {
            success: true,
            message: ACCEPTED_MESSAGE.to_string(),
            data: InquiryReceiptData {
                id,
                timestamp: timestamp.to_rfc3339(),
            },
        }
    }
}

/// Record reference
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct InquiryReceiptData {
    /// Datastore id, or `temp-<epoch millis>`
    pub id: String,
    /// RFC 3339 acceptance time
    pub timestamp: String,
}

/// Error response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

/// Id issued when an inquiry could not be persisted
pub fn placeholder_id(at: chrono::DateTime<chrono::Utc>) -> String {
    format!("{}{}", PLACEHOLDER_ID_PREFIX, at.timestamp_millis())
}
