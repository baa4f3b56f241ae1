//! REST table adapter (PostgREST dialect)

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use super::{InquiryRecord, InquiryStore, StoreError};

const TABLE: &str = "inquiries";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Deserialize)]
struct InsertedRow {
    id: serde_json::Value,
}

impl InsertedRow {
    fn id(self) -> Option<String> {
        match self.id {
            serde_json::Value::String(s) if !s.is_empty() => Some(s),
            serde_json::Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

/// Inserts into `{base_url}/rest/v1/inquiries` with a service key
#[derive(Clone)]
pub struct RestInquiryStore {
    client: Client,
    base_url: String,
    api_key: String,
}

impl RestInquiryStore {
    /// Create a store client
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Result<Self, StoreError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, TABLE)
    }
}

#[async_trait]
impl InquiryStore for RestInquiryStore {
    async fn insert(&self, record: &InquiryRecord) -> Result<String, StoreError> {
        let response = self
            .client
            .post(self.table_url())
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .header("Prefer", "return=representation")
            .json(&[record])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let rows: Vec<InsertedRow> = response.json().await?;
        rows.into_iter()
            .next()
            .and_then(InsertedRow::id)
            .ok_or(StoreError::MissingId)
    }
}
