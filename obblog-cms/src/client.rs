use crate::query::{Collection, ContentQuery, MAX_PAGE_SIZE};
use async_trait::async_trait;
use obblog_common::model::ModelValidationError;
use reqwest::{
    StatusCode, Url,
    header::{HeaderMap, HeaderValue, InvalidHeaderValue},
};
use serde::Deserialize;
use serde_json::Value;
use std::{
    fmt::{Debug, Formatter},
    time::Duration,
};
use thiserror::Error;
use tracing::{debug, warn};

pub const API_KEY_HEADER: &str = "x-microcms-api-key";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

pub type Result<T, E = CmsError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum CmsError {
    #[error("Required setting {0} is missing or empty")]
    MissingSetting(&'static str),
    #[error("The service domain {0:?} is not a valid host label")]
    InvalidServiceDomain(String),
    #[error("The API key cannot be sent as a header: {0}")]
    InvalidApiKey(#[from] InvalidHeaderValue),
    #[error("The content id {0:?} cannot be used in a request path")]
    InvalidId(String),
    #[error("Request to the content API failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("The content API replied with {status} for collection {collection}")]
    Status {
        collection: Collection,
        status: StatusCode,
    },
    #[error("The content API response could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("A content record was invalid: {0}")]
    Record(#[from] ModelValidationError),
}

#[derive(Clone, PartialEq, Debug, Deserialize)]
pub struct ContentList {
    pub contents: Vec<Value>,
    #[serde(rename = "totalCount")]
    pub total_count: u64,
}

#[derive(Deserialize)]
struct IdRecord {
    id: String,
}

#[async_trait]
pub trait ContentSource: Send + Sync {
    async fn list(&self, collection: Collection, query: &ContentQuery) -> Result<ContentList>;

    async fn get(&self, collection: Collection, id: &str, query: &ContentQuery) -> Result<Value>;

    async fn list_all_ids(&self, collection: Collection) -> Result<Vec<String>> {
        let mut ids = Vec::new();
        let mut scanned = 0;

        loop {
            let query = ContentQuery::new()
                .fields(&["id"])
                .limit(MAX_PAGE_SIZE)
                .offset(scanned);
            let page = self.list(collection, &query).await?;

            let fetched = page.contents.len();
            scanned += fetched as u64;
            for content in page.contents {
                match serde_json::from_value::<IdRecord>(content) {
                    Ok(record) => ids.push(record.id),
                    Err(err) => {
                        warn!(error = %err, %collection, "Skipping content record without an id");
                    }
                }
            }

            if fetched == 0 || scanned >= page.total_count {
                break;
            }
        }

        Ok(ids)
    }
}

#[derive(Clone, Eq, PartialEq, Hash, Deserialize)]
pub struct CmsConfig {
    pub service_domain: String,
    pub api_key: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Debug for CmsConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CmsConfig")
            .field("service_domain", &self.service_domain)
            .field("api_key", &"[redacted]")
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

#[derive(Clone, Debug)]
pub struct CmsClient {
    http: reqwest::Client,
    base_url: Url,
}

impl CmsClient {
    pub fn new(config: &CmsConfig) -> Result<Self> {
        let service_domain = config.service_domain.trim();
        if service_domain.is_empty() {
            return Err(CmsError::MissingSetting("MICROCMS_SERVICE_DOMAIN"));
        }
        if config.api_key.trim().is_empty() {
            return Err(CmsError::MissingSetting("MICROCMS_API_KEY"));
        }
        if !service_domain
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-')
        {
            return Err(CmsError::InvalidServiceDomain(service_domain.to_owned()));
        }

        let base_url = Url::parse(&format!("https://{service_domain}.microcms.io/api/v1"))
            .map_err(|_| CmsError::InvalidServiceDomain(service_domain.to_owned()))?;

        let mut api_key = HeaderValue::from_str(config.api_key.trim())?;
        api_key.set_sensitive(true);
        let mut headers = HeaderMap::new();
        headers.insert(API_KEY_HEADER, api_key);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { http, base_url })
    }

    fn url(&self, collection: Collection, id: Option<&str>) -> Result<Url> {
        if let Some(id) = id
            && (id.is_empty() || id.chars().all(|c| c == '.'))
        {
            return Err(CmsError::InvalidId(id.to_owned()));
        }

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| CmsError::InvalidServiceDomain(self.base_url.to_string()))?
            .push(collection.endpoint())
            .extend(id);

        Ok(url)
    }

    async fn fetch(
        &self,
        collection: Collection,
        id: Option<&str>,
        query: &ContentQuery,
    ) -> Result<Value> {
        let url = self.url(collection, id)?;
        debug!(%url, ?query, "Requesting content");

        let response = self
            .http
            .get(url)
            .query(&query.to_params())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CmsError::Status { collection, status });
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl ContentSource for CmsClient {
    async fn list(&self, collection: Collection, query: &ContentQuery) -> Result<ContentList> {
        let value = self.fetch(collection, None, query).await?;
        Ok(serde_json::from_value(value)?)
    }

    async fn get(&self, collection: Collection, id: &str, query: &ContentQuery) -> Result<Value> {
        self.fetch(collection, Some(id), query).await
    }
}
