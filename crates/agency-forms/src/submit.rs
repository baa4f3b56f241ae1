//! Submission port
//!
//! The wizard hands its payload to an [`InquirySubmitter`] exactly once per
//! final "next". No retry, no idempotency key.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::payload::InquiryPayload;

/// Path of the submission endpoint
pub const INQUIRY_PATH: &str = "/api/inquiry";

/// Acknowledgement of an accepted inquiry
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionReceipt {
    pub id: String,
    pub timestamp: DateTime<Utc>,
}

/// Success body returned by the endpoint
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct InquiryAck {
    pub success: bool,
    pub message: String,
    pub data: SubmissionReceipt,
}

/// Error body returned by the endpoint
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    #[error("network error: {0}")]
    Transport(String),

    #[error("inquiry rejected ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("unexpected response: {0}")]
    InvalidResponse(String),
}

/// Outbound port to the submission endpoint
#[async_trait]
pub trait InquirySubmitter: Send + Sync {
    async fn submit(&self, payload: &InquiryPayload) -> Result<SubmissionReceipt, SubmitError>;
}
