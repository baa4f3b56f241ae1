//! CLI Commands

pub mod config;
pub mod inquire;
pub mod schema;
pub mod services;
pub mod submit;

use async_trait::async_trait;
use std::time::Duration;

use agency_forms::{
    ErrorBody, InquiryAck, InquiryPayload, InquirySubmitter, SubmissionReceipt, SubmitError,
    INQUIRY_PATH,
};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Inquiry API client
pub struct ApiClient {
    pub base_url: String,
    client: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl InquirySubmitter for ApiClient {
    async fn submit(&self, payload: &InquiryPayload) -> Result<SubmissionReceipt, SubmitError> {
        let url = self.url(INQUIRY_PATH);
        tracing::debug!(%url, "posting inquiry");

        let resp = self
            .client
            .post(&url)
            .json(payload)
            .send()
            .await
            .map_err(|e| SubmitError::Transport(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let message = match resp.json::<ErrorBody>().await {
                Ok(body) => body.error,
                Err(_) => status.canonical_reason().unwrap_or("request failed").to_string(),
            };
            return Err(SubmitError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let ack: InquiryAck = resp
            .json()
            .await
            .map_err(|e| SubmitError::InvalidResponse(e.to_string()))?;
        if !ack.success {
            return Err(SubmitError::InvalidResponse(ack.message));
        }
        Ok(ack.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, routing::post, Json, Router};
    use serde_json::{json, Value};

    async fn serve(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn payload() -> InquiryPayload {
        serde_json::from_value(json!({
            "fullName": "Jane Doe",
            "companyName": "Acme",
            "email": "jane@acme.com",
            "serviceId": "general-inquiry"
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_submit_returns_receipt() {
        let app = Router::new().route(
            INQUIRY_PATH,
            post(|Json(body): Json<Value>| async move {
                assert_eq!(body["serviceId"], "general-inquiry");
                Json(json!({
                    "success": true,
                    "message": "Inquiry submitted successfully",
                    "data": { "id": "abc", "timestamp": "2026-01-05T10:00:00+00:00" }
                }))
            }),
        );
        let client = ApiClient::new(&format!("{}/", serve(app).await)).unwrap();

        let receipt = client.submit(&payload()).await.unwrap();
        assert_eq!(receipt.id, "abc");
    }

    #[tokio::test]
    async fn test_submit_surfaces_error_body() {
        let app = Router::new().route(
            INQUIRY_PATH,
            post(|| async {
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": "Missing required fields" })),
                )
            }),
        );
        let client = ApiClient::new(&serve(app).await).unwrap();

        let err = client.submit(&payload()).await.unwrap_err();
        assert_eq!(
            err,
            SubmitError::Rejected {
                status: 400,
                message: "Missing required fields".into()
            }
        );
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_transport_error() {
        let client = ApiClient::new("http://127.0.0.1:9").unwrap();
        let err = client.submit(&payload()).await.unwrap_err();
        assert!(matches!(err, SubmitError::Transport(_)));
    }
}
