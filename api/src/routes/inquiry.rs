//! Inquiry submission endpoint

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde_json::Value;
use std::sync::Arc;

use agency_forms::InquiryPayload;

use crate::error::ApiError;
use crate::models::{placeholder_id, InquiryAccepted};
use crate::store::InquiryRecord;
use crate::ApiState;

/// Submit an inquiry
///
/// Only full name, email and company name are checked here, before the body is
/// decoded; everything else is the wizard's job. A datastore failure is logged
/// and still acknowledged.
#[utoipa::path(
    post,
    path = "/api/inquiry",
    request_body = crate::models::InquiryRequest,
    responses(
        (status = 200, description = "Inquiry accepted", body = InquiryAccepted),
        (
            status = 400,
            description = "Missing required fields or malformed body",
            body = crate::models::ErrorResponse
        ),
        (status = 500, description = "Unexpected failure", body = crate::models::ErrorResponse)
    ),
    tag = "inquiry"
)]
pub async fn submit_inquiry(
    State(state): State<Arc<ApiState>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<InquiryAccepted>, ApiError> {
    let Json(body) = body.map_err(|rejection| {
        tracing::debug!(error = %rejection, "rejected inquiry body");
        ApiError::InvalidBody
    })?;
    if !body.is_object() {
        return Err(ApiError::InvalidBody);
    }
    if InquiryPayload::body_missing_required_fields(&body) {
        return Err(ApiError::MissingRequiredFields);
    }
    let payload: InquiryPayload = serde_json::from_value(body).map_err(|e| {
        tracing::debug!(error = %e, "inquiry body does not decode");
        ApiError::InvalidBody
    })?;

    let now = chrono::Utc::now();
    let service = payload
        .service_id
        .map(|s| s.as_str())
        .unwrap_or("unspecified");
    tracing::info!(
        service,
        locale = %payload.locale,
        company = %payload.company_name,
        extra_fields = payload.extra.len(),
        "inquiry received"
    );

    let record = InquiryRecord::from_payload(&payload, now)
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    let id = match &state.store {
        Some(store) => match store.insert(&record).await {
            Ok(id) => {
                tracing::info!(%id, service, "inquiry stored");
                id
            }
            Err(e) => {
                let id = placeholder_id(now);
                tracing::warn!(
                    error = %e,
                    %id,
                    service,
                    "datastore insert failed; inquiry acknowledged unsaved"
                );
                id
            }
        },
        None => {
            let id = placeholder_id(now);
            tracing::info!(
                %id,
                record = %serde_json::to_string(&record).unwrap_or_default(),
                "no datastore configured; inquiry logged only"
            );
            id
        }
    };

    Ok(Json(InquiryAccepted::new(id, now)))
}
