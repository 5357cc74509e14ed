//! REST implementation of [`HistorySource`]

use crate::config::HistoryConfig;
use crate::entity::{EntityRef, MetadataField, ReferenceKind, ReferencedEntity};
use crate::error::{ConfigError, HistoryError, HistoryResult};
use crate::source::HistorySource;
use async_trait::async_trait;
use ewb_snapshot::ChangeSet;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

/// List endpoints answer either a bare array or one paginated page
#[derive(Deserialize)]
#[serde(untagged)]
enum Listing<T> {
    Plain(Vec<T>),
    Page { results: Vec<T> },
}

impl<T> Listing<T> {
    fn into_items(self) -> Vec<T> {
        match self {
            Self::Plain(items) | Self::Page { results: items } => items,
        }
    }
}

/// History source backed by the eWorkbench REST API
#[derive(Debug, Clone)]
pub struct RestHistorySource {
    config: HistoryConfig,
    client: reqwest::Client,
}

impl RestHistorySource {
    /// Build client from validated configuration
    ///
    /// # Errors
    /// Returns error if the configuration is invalid or the HTTP client
    /// cannot be created
    pub fn new(config: HistoryConfig) -> HistoryResult<Self> {
        config.validate()?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(token) = &config.auth_token {
            let mut value = HeaderValue::from_str(&format!("Token {token}")).map_err(|_| {
                ConfigError::Invalid("auth_token contains invalid header characters".to_string())
            })?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .default_headers(headers)
            .build()
            .map_err(|source| HistoryError::Request {
                url: config.base_url.clone(),
                source,
            })?;

        Ok(Self { config, client })
    }

    /// Configuration in use
    #[inline]
    #[must_use]
    pub fn config(&self) -> &HistoryConfig {
        &self.config
    }

    /// GET a URL; `Ok(None)` on 404 when `allow_missing` is set
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        allow_missing: bool,
    ) -> HistoryResult<Option<T>> {
        debug!(url, "GET");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| HistoryError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if allow_missing && status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            warn!(url, status = status.as_u16(), "Backend returned error status");
            return Err(HistoryError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| HistoryError::Request {
                url: url.to_string(),
                source,
            })?;

        serde_json::from_slice(&body)
            .map(Some)
            .map_err(|e| HistoryError::decode(url, e.to_string()))
    }

    async fn get_listing<T: DeserializeOwned>(&self, url: &str) -> HistoryResult<Vec<T>> {
        let listing: Option<Listing<T>> = self.get_json(url, false).await?;
        Ok(listing.map(Listing::into_items).unwrap_or_default())
    }
}

#[async_trait]
impl HistorySource for RestHistorySource {
    async fn fetch_history(&self, entity: &EntityRef) -> HistoryResult<Vec<ChangeSet>> {
        let url = self
            .config
            .endpoint(&[&entity.collection(), &entity.pk, "history"]);
        self.get_listing(&url).await
    }

    async fn fetch_metadata_fields(&self) -> HistoryResult<Vec<MetadataField>> {
        let url = self.config.endpoint(&["metadatafields"]);
        self.get_listing(&url).await
    }

    async fn resolve_reference(
        &self,
        kind: ReferenceKind,
        pk: &str,
    ) -> HistoryResult<Option<ReferencedEntity>> {
        let url = self.config.endpoint(&[kind.collection(), pk]);
        let body: Option<Value> = self.get_json(&url, true).await?;
        Ok(body.and_then(|body| ReferencedEntity::from_json(kind, pk, &body)))
    }
}
