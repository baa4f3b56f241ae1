//! End-to-end tests for the inquiry endpoint

use agency_api::{build_router, ApiState, InquiryRecord, InquiryStore, StoreError};
use async_trait::async_trait;
use axum::http::StatusCode;
use axum_test::TestServer;
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::sync::Arc;

#[derive(Default)]
struct RecordingStore {
    records: Mutex<Vec<InquiryRecord>>,
    fail: bool,
}

impl RecordingStore {
    fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    fn count(&self) -> usize {
        self.records.lock().len()
    }
}

#[async_trait]
impl InquiryStore for RecordingStore {
    async fn insert(&self, record: &InquiryRecord) -> Result<String, StoreError> {
        self.records.lock().push(record.clone());
        if self.fail {
            return Err(StoreError::Status {
                status: 503,
                body: "unavailable".into(),
            });
        }
        Ok(format!("row-{}", self.count()))
    }
}

fn server(store: Option<Arc<RecordingStore>>) -> TestServer {
    let mut state = ApiState::new();
    if let Some(store) = store {
        state = state.with_store(store);
    }
    TestServer::new(build_router(state)).unwrap()
}

fn valid_inquiry() -> Value {
    json!({
        "fullName": "Jane Doe",
        "companyName": "Acme Trading",
        "email": "jane@acme.com",
        "preferredContact": "email",
        "serviceId": "web-development",
        "description": "We need a new storefront for our retail brand.",
        "features": ["ecommerce", "cms"],
        "hasDomainHosting": "no",
        "hostingStatus": "manage-for-me",
        "timeline": "1-3-months",
        "agreedToPrivacy": true,
        "locale": "en"
    })
}

fn is_placeholder_id(id: &str) -> bool {
    id.strip_prefix("temp-")
        .map(|millis| !millis.is_empty() && millis.chars().all(|c| c.is_ascii_digit()))
        .unwrap_or(false)
}

#[tokio::test]
async fn test_stored_inquiry_returns_datastore_id() {
    let store = Arc::new(RecordingStore::default());
    let server = server(Some(store.clone()));

    let response = server.post("/api/inquiry").json(&valid_inquiry()).await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Inquiry submitted successfully");
    assert_eq!(body["data"]["id"], "row-1");
    assert!(body["data"]["timestamp"].as_str().is_some());

    let records = store.records.lock();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].full_name, "Jane Doe");
    assert_eq!(records[0].service_id.as_deref(), Some("web-development"));
    assert_eq!(records[0].form_data["hostingStatus"], "manage-for-me");
}

#[tokio::test]
async fn test_missing_full_name_is_rejected_without_store_call() {
    let store = Arc::new(RecordingStore::default());
    let server = server(Some(store.clone()));

    let mut inquiry = valid_inquiry();
    inquiry.as_object_mut().unwrap().remove("fullName");
    let response = server.post("/api/inquiry").json(&inquiry).await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>(), json!({ "error": "Missing required fields" }));
    assert_eq!(store.count(), 0);
}

#[tokio::test]
async fn test_blank_company_name_is_rejected() {
    let store = Arc::new(RecordingStore::default());
    let server = server(Some(store.clone()));

    let mut inquiry = valid_inquiry();
    inquiry["companyName"] = json!("   ");
    let response = server.post("/api/inquiry").json(&inquiry).await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(store.count(), 0);
}

#[tokio::test]
async fn test_only_the_contact_trio_is_checked() {
    let server = server(None);

    let response = server
        .post("/api/inquiry")
        .json(&json!({
            "fullName": "Jane Doe",
            "companyName": "Acme",
            "email": "not-an-email"
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn test_datastore_failure_still_acknowledges() {
    let store = Arc::new(RecordingStore::failing());
    let server = server(Some(store.clone()));

    let response = server.post("/api/inquiry").json(&valid_inquiry()).await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["success"], true);
    let id = body["data"]["id"].as_str().unwrap();
    assert!(is_placeholder_id(id), "unexpected id {id}");
    assert_eq!(store.count(), 1);
}

#[tokio::test]
async fn test_without_datastore_issues_placeholder_id() {
    let server = server(None);

    let response = server.post("/api/inquiry").json(&valid_inquiry()).await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert!(is_placeholder_id(body["data"]["id"].as_str().unwrap()));
}

#[tokio::test]
async fn test_malformed_body_is_bad_request() {
    let server = server(None);

    let response = server.post("/api/inquiry").text("{ not json").await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>(), json!({ "error": "Invalid request body" }));
}

#[tokio::test]
async fn test_non_object_body_is_bad_request() {
    let server = server(None);

    let response = server.post("/api/inquiry").json(&json!(["Jane", "Acme"])).await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>(), json!({ "error": "Invalid request body" }));
}

#[tokio::test]
async fn test_null_full_name_is_missing_not_malformed() {
    let store = Arc::new(RecordingStore::default());
    let server = server(Some(store.clone()));

    let mut inquiry = valid_inquiry();
    inquiry["fullName"] = Value::Null;
    let response = server.post("/api/inquiry").json(&inquiry).await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>(), json!({ "error": "Missing required fields" }));
    assert_eq!(store.count(), 0);
}

#[tokio::test]
async fn test_missing_trio_is_reported_before_other_fields_decode() {
    let server = server(None);

    let mut inquiry = valid_inquiry();
    inquiry.as_object_mut().unwrap().remove("fullName");
    inquiry["locale"] = json!("fr");
    let response = server.post("/api/inquiry").json(&inquiry).await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>(), json!({ "error": "Missing required fields" }));
}

#[tokio::test]
async fn test_numeric_free_text_is_accepted() {
    let store = Arc::new(RecordingStore::default());
    let server = server(Some(store.clone()));

    let mut inquiry = valid_inquiry();
    inquiry["budgetRange"] = json!(5000);
    let response = server.post("/api/inquiry").json(&inquiry).await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let records = store.records.lock();
    assert_eq!(records[0].budget_range.as_deref(), Some("5000"));
}

#[tokio::test]
async fn test_unknown_service_is_bad_request() {
    let server = server(None);

    let mut inquiry = valid_inquiry();
    inquiry["serviceId"] = json!("quantum-consulting");
    let response = server.post("/api/inquiry").json(&inquiry).await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_health() {
    let server = server(Some(Arc::new(RecordingStore::default())));

    let response = server.get("/health").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["datastore"], true);
}

#[tokio::test]
async fn test_openapi_document_lists_inquiry_path() {
    let server = server(None);

    let response = server.get("/api-docs/openapi.json").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let doc: Value = response.json();
    assert!(doc["paths"]["/api/inquiry"]["post"].is_object());
}
