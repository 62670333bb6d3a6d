//! Firestore HTTP client.
//!
//! Blocking reqwest client (no Tokio runtime required).

use std::time::Duration;

use reqwest::Url;
use serde_json::Value;

use crate::document::{parse_record, parse_summary, StoreRecord, StoreSummary};

const PAGE_SIZE: &str = "300";

/// Where the store records live and how their fields are named.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub project_id: String,
    pub database: String,
    pub collection: String,
    /// Field holding the store's display name.
    pub name_field: String,
    /// Field holding the recorded code list.
    pub codes_field: String,
    pub api_key: Option<String>,
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            project_id: String::new(),
            database: "(default)".to_string(),
            collection: "conferencias".to_string(),
            name_field: "loja".to_string(),
            codes_field: "texto".to_string(),
            api_key: None,
            base_url: "https://firestore.googleapis.com/v1".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Error type for store lookups.
#[derive(Debug)]
pub enum StoreError {
    /// No project configured
    NotConfigured,
    /// Store id is empty or not a single path segment
    InvalidId(String),
    /// Transport failure (DNS, connect, timeout)
    Network(String),
    /// 401/403
    Auth(String),
    /// 400 with message
    Validation(String),
    /// 429
    RateLimited,
    /// Any other non-success status
    Http(u16, String),
    /// Response body was not what we expected
    Parse(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::NotConfigured => write!(f, "store project is not configured"),
            StoreError::InvalidId(id) => write!(f, "invalid store id {:?}", id),
            StoreError::Network(msg) => write!(f, "network error: {}", msg),
            StoreError::Auth(msg) => write!(f, "access denied: {}", msg),
            StoreError::Validation(msg) => write!(f, "request rejected: {}", msg),
            StoreError::RateLimited => write!(f, "rate limited by the store service"),
            StoreError::Http(code, msg) => write!(f, "HTTP {}: {}", code, msg),
            StoreError::Parse(msg) => write!(f, "unexpected response: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

/// Store service client (blocking).
#[derive(Clone)]
pub struct StoreClient {
    http: reqwest::blocking::Client,
    config: StoreConfig,
}

impl StoreClient {
    pub fn new(config: StoreConfig) -> Result<Self, StoreError> {
        if config.project_id.trim().is_empty() {
            return Err(StoreError::NotConfigured);
        }

        let http = reqwest::blocking::Client::builder()
            .user_agent(format!("stockcheck/{}", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_secs.max(1)))
            .build()
            .map_err(|e| StoreError::Network(e.to_string()))?;

        Ok(Self { http, config })
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// List every store in the collection, sorted by name then id.
    pub fn list_stores(&self) -> Result<Vec<StoreSummary>, StoreError> {
        let mut stores = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut url = self.collection_url(&[])?;
            {
                let mut query = url.query_pairs_mut();
                query.append_pair("pageSize", PAGE_SIZE);
                if let Some(ref token) = page_token {
                    query.append_pair("pageToken", token);
                }
            }
            self.append_key(&mut url);

            let json = self.get_json(url)?;
            let page = json
                .get("documents")
                .and_then(Value::as_array)
                .map(|docs| docs.as_slice())
                .unwrap_or(&[]);
            stores.extend(page.iter().filter_map(|d| parse_summary(d, &self.config.name_field)));

            page_token = json
                .get("nextPageToken")
                .and_then(Value::as_str)
                .filter(|t| !t.is_empty())
                .map(String::from);
            if page_token.is_none() {
                break;
            }
            tracing::debug!(fetched = stores.len(), "fetching next page of stores");
        }

        stores.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        tracing::info!(count = stores.len(), collection = %self.config.collection, "listed stores");
        Ok(stores)
    }

    /// Fetch one store's record. `Ok(None)` when the document does not exist.
    pub fn fetch_store(&self, id: &str) -> Result<Option<StoreRecord>, StoreError> {
        if id.trim().is_empty() || id.contains('/') {
            return Err(StoreError::InvalidId(id.to_string()));
        }

        let mut url = self.collection_url(&[id])?;
        self.append_key(&mut url);

        let response = self.send(url)?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            tracing::info!(store = id, "store not found");
            return Ok(None);
        }
        let response = check_status(response)?;
        let json: Value = response.json().map_err(|e| StoreError::Parse(e.to_string()))?;

        let record = parse_record(&json, &self.config.name_field, &self.config.codes_field)
            .ok_or_else(|| StoreError::Parse("document has no name".into()))?;
        tracing::info!(store = %record.id, codes = record.codes.len(), "fetched store record");
        Ok(Some(record))
    }

    fn collection_url(&self, extra: &[&str]) -> Result<Url, StoreError> {
        let mut url = Url::parse(&self.config.base_url)
            .map_err(|e| StoreError::Validation(format!("bad base url {:?}: {}", self.config.base_url, e)))?;
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| StoreError::Validation(format!("bad base url {:?}", self.config.base_url)))?;
            segments
                .pop_if_empty()
                .extend([
                    "projects",
                    self.config.project_id.as_str(),
                    "databases",
                    self.config.database.as_str(),
                    "documents",
                    self.config.collection.as_str(),
                ])
                .extend(extra);
        }
        Ok(url)
    }

    fn append_key(&self, url: &mut Url) {
        if let Some(ref key) = self.config.api_key {
            if !key.is_empty() {
                url.query_pairs_mut().append_pair("key", key);
            }
        }
    }

    fn send(&self, url: Url) -> Result<reqwest::blocking::Response, StoreError> {
        tracing::debug!(path = url.path(), "GET");
        self.http
            .get(url)
            .send()
            .map_err(|e| StoreError::Network(e.to_string()))
    }

    fn get_json(&self, url: Url) -> Result<Value, StoreError> {
        let response = check_status(self.send(url)?)?;
        response.json().map_err(|e| StoreError::Parse(e.to_string()))
    }
}

fn check_status(response: reqwest::blocking::Response) -> Result<reqwest::blocking::Response, StoreError> {
    let status = response.status().as_u16();
    if response.status().is_success() {
        return Ok(response);
    }

    let body = response.text().unwrap_or_default();
    let message = error_message(&body);
    Err(match status {
        401 | 403 => StoreError::Auth(message),
        400 => StoreError::Validation(message),
        429 => StoreError::RateLimited,
        _ => StoreError::Http(status, message),
    })
}

/// Pull `error.message` out of a Google API error body, else the raw body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("error")?.get("message")?.as_str().map(String::from))
        .unwrap_or_else(|| body.trim().to_string())
}
