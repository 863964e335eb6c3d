//! REST record service implementation.
//!
//! Talks to the ERP's REST record API (`/services/rest/record/v1`):
//! `GET` loads, `POST` creates (the new id comes back in `Location`),
//! `PATCH` updates only the fields sent, `DELETE` removes.

use crate::error::{StoreError, StoreResult};
use crate::store::{RecordStore, StoreRecord};
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use suitegate_model::Fields;
use tracing::{debug, info};

const RECORD_PATH: &str = "/services/rest/record/v1";

/// REST record service configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RestStoreConfig {
    /// Account id, e.g. `1234567` or `1234567_SB1` for a sandbox.
    pub account_id: String,
    /// OAuth 2.0 bearer token.
    pub access_token: String,
    /// Overrides the account-derived base URL (used for tests and proxies).
    pub api_base_url: String,
    /// Per-request timeout.
    pub timeout_secs: u64,
}

impl Default for RestStoreConfig {
    fn default() -> Self {
        Self {
            account_id: String::new(),
            access_token: String::new(),
            api_base_url: String::new(),
            timeout_secs: 60,
        }
    }
}

impl RestStoreConfig {
    /// The service root. Sandbox account ids use `-` in host names and are lowercase.
    pub fn base_url(&self) -> String {
        if !self.api_base_url.is_empty() {
            return self.api_base_url.trim_end_matches('/').to_string();
        }
        format!(
            "https://{}.suitetalk.api.netsuite.com",
            self.account_id.to_lowercase().replace('_', "-")
        )
    }
}

/// Collection listing response.
#[derive(Debug, Deserialize)]
struct RecordCollection {
    #[serde(default)]
    items: Vec<CollectionItem>,
}

#[derive(Debug, Deserialize)]
struct CollectionItem {
    id: String,
}

/// Error body returned by the record service.
#[derive(Debug, Deserialize)]
struct ServiceError {
    title: Option<String>,
    #[serde(rename = "o:errorDetails", default)]
    details: Vec<ServiceErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ServiceErrorDetail {
    detail: String,
}

/// [`RecordStore`] backed by the REST record service.
pub struct RestRecordStore {
    config: RestStoreConfig,
    client: Client,
}

impl RestRecordStore {
    pub fn new(config: RestStoreConfig) -> StoreResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| StoreError::Network(format!("failed to create HTTP client: {e}")))?;
        Ok(Self { config, client })
    }

    fn record_url(&self, record_type: &str) -> String {
        format!(
            "{}{}/{}",
            self.config.base_url(),
            RECORD_PATH,
            urlencoding::encode(record_type)
        )
    }

    fn item_url(&self, record_type: &str, id: &str) -> String {
        format!("{}/{}", self.record_url(record_type), urlencoding::encode(id))
    }

    fn access_token(&self) -> StoreResult<&str> {
        if self.config.access_token.is_empty() {
            return Err(StoreError::Auth("no access token configured".to_string()));
        }
        Ok(&self.config.access_token)
    }

    /// Map a non-success response to a store error.
    async fn error_for(response: Response, record_type: &str, id: &str) -> StoreError {
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return StoreError::not_found(record_type, id);
        }
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ServiceError>(&body)
            .ok()
            .and_then(|e| {
                e.details
                    .into_iter()
                    .next()
                    .map(|d| d.detail)
                    .or(e.title)
            })
            .unwrap_or(body);
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => StoreError::Auth(message),
            _ => StoreError::Rejected(format!("{status}: {message}")),
        }
    }

    async fn fetch(&self, record_type: &str, id: &str, columns: &[&str]) -> StoreResult<StoreRecord> {
        let token = self.access_token()?;
        let mut request = self
            .client
            .get(self.item_url(record_type, id))
            .bearer_auth(token);
        if !columns.is_empty() {
            request = request.query(&[("fields", columns.join(","))]);
        }

        let response = request
            .send()
            .await
            .map_err(|e| StoreError::Network(format!("record load failed: {e}")))?;
        if !response.status().is_success() {
            return Err(Self::error_for(response, record_type, id).await);
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| StoreError::Network(format!("failed to parse record: {e}")))?;
        Ok(StoreRecord {
            id: id.to_string(),
            fields: flatten_record(body),
        })
    }
}

/// Drop hypermedia links and collapse reference objects (`{"id": .., "refName": ..}`)
/// to their id so reference fields read back the way they are written.
fn flatten_record(body: Value) -> Fields {
    let Value::Object(map) = body else {
        return Fields::new();
    };
    map.into_iter()
        .filter(|(k, _)| k != "links" && k != "id")
        .map(|(k, v)| {
            let v = match v {
                Value::Object(mut reference) if reference.contains_key("id") => {
                    reference.remove("id").unwrap_or(Value::Null)
                }
                other => other,
            };
            (k, v)
        })
        .collect()
}

/// The new record's id is the last path segment of the `Location` header.
fn id_from_location(response: &Response) -> Option<String> {
    response
        .headers()
        .get(reqwest::header::LOCATION)?
        .to_str()
        .ok()?
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[async_trait]
impl RecordStore for RestRecordStore {
    fn provider_name(&self) -> &'static str {
        "rest"
    }

    async fn get(&self, record_type: &str, id: &str) -> StoreResult<StoreRecord> {
        self.fetch(record_type, id, &[]).await
    }

    async fn list(
        &self,
        record_type: &str,
        columns: &[&str],
        limit: usize,
    ) -> StoreResult<Vec<StoreRecord>> {
        let token = self.access_token()?;
        let response = self
            .client
            .get(self.record_url(record_type))
            .bearer_auth(token)
            .query(&[("limit", limit.to_string())])
            .send()
            .await
            .map_err(|e| StoreError::Network(format!("record list failed: {e}")))?;
        if !response.status().is_success() {
            return Err(Self::error_for(response, record_type, "").await);
        }

        let collection: RecordCollection = response
            .json()
            .await
            .map_err(|e| StoreError::Network(format!("failed to parse record list: {e}")))?;
        debug!(
            record_type,
            count = collection.items.len(),
            "listed record ids"
        );

        // The collection endpoint returns ids only; each row is loaded in turn.
        let mut records = Vec::with_capacity(collection.items.len().min(limit));
        for item in collection.items.into_iter().take(limit) {
            records.push(self.fetch(record_type, &item.id, columns).await?);
        }
        Ok(records)
    }

    async fn create(&self, record_type: &str, fields: Fields) -> StoreResult<String> {
        let token = self.access_token()?;
        let response = self
            .client
            .post(self.record_url(record_type))
            .bearer_auth(token)
            .json(&fields)
            .send()
            .await
            .map_err(|e| StoreError::Network(format!("record create failed: {e}")))?;
        if !response.status().is_success() {
            return Err(Self::error_for(response, record_type, "").await);
        }

        let id = id_from_location(&response).ok_or_else(|| {
            StoreError::Rejected("create response carried no Location header".to_string())
        })?;
        info!(record_type, id = %id, "record created");
        Ok(id)
    }

    async fn update(&self, record_type: &str, id: &str, fields: Fields) -> StoreResult<String> {
        let token = self.access_token()?;
        let response = self
            .client
            .patch(self.item_url(record_type, id))
            .bearer_auth(token)
            .json(&fields)
            .send()
            .await
            .map_err(|e| StoreError::Network(format!("record update failed: {e}")))?;
        if !response.status().is_success() {
            return Err(Self::error_for(response, record_type, id).await);
        }
        Ok(id.to_string())
    }

    async fn delete(&self, record_type: &str, id: &str) -> StoreResult<()> {
        let token = self.access_token()?;
        let response = self
            .client
            .delete(self.item_url(record_type, id))
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| StoreError::Network(format!("record delete failed: {e}")))?;
        if !response.status().is_success() {
            return Err(Self::error_for(response, record_type, id).await);
        }
        Ok(())
    }
}
