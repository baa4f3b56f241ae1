//! Agency Inquiry API
//!
//! Receives completed inquiries from the form wizard and hands them to the
//! configured datastore.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────┐  POST /api/inquiry  ┌──────────────┐   insert   ┌─────────────┐
//! │   Wizard   │ ──────────────────▶ │  agency-api  │ ─────────▶ │  Datastore  │
//! │ (web, cli) │ ◀────────────────── │              │ ◀───────── │  (REST)     │
//! └────────────┘   { success, id }   └──────────────┘    [{id}]  └─────────────┘
//! ```
//!
//! Datastore failures never reach the client: the inquiry is acknowledged
//! with a locally generated `temp-<millis>` id and the failure is logged.

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod store;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub use config::ApiConfig;
pub use error::ApiError;
pub use models::*;
pub use store::{InquiryRecord, InquiryStore, RestInquiryStore, StoreError};

/// API state
#[derive(Clone)]
pub struct ApiState {
    /// API version
    pub version: String,
    /// Inquiry datastore; `None` accepts and logs only
    pub store: Option<Arc<dyn InquiryStore>>,
}

impl ApiState {
    /// State with no datastore attached
    pub fn new() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            store: None,
        }
    }

    /// Attach a datastore
    pub fn with_store(mut self, store: Arc<dyn InquiryStore>) -> Self {
        self.store = Some(store);
        self
    }
}

impl Default for ApiState {
    fn default() -> Self {
        Self::new()
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Agency Inquiry API",
        version = "0.1.0",
        description = "Inquiry intake for the agency's service request forms",
        license(name = "Apache-2.0")
    ),
    paths(
        routes::health::health_check,
        routes::inquiry::submit_inquiry,
    ),
    components(
        schemas(
            routes::health::HealthResponse,
            InquiryRequest, InquiryAccepted, InquiryReceiptData, ErrorResponse
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "inquiry", description = "Inquiry submission")
    )
)]
pub struct ApiDoc;

/// Build the API router
pub fn build_router(state: ApiState) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/health", get(routes::health::health_check))
        .route(agency_forms::INQUIRY_PATH, post(routes::inquiry::submit_inquiry))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(Arc::new(state))
}
