use std::time::Duration;

use async_trait::async_trait;
use core_config::elasticsearch::ElasticsearchConfig;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use super::query::{self, GetResponse, SearchResponse};
use crate::error::{PaintingError, PaintingResult};
use crate::models::{StoreHit, StoreQuery, StoredPainting};
use crate::repository::PaintingStore;

/// Elasticsearch REST implementation of PaintingStore
///
/// Holds a single pooled HTTP client; build once at start-up and share.
#[derive(Clone)]
pub struct ElasticsearchStore {
    client: Client,
    base_url: String,
    index: String,
    credentials: Option<(String, String)>,
}

impl ElasticsearchStore {
    pub fn new(config: &ElasticsearchConfig) -> PaintingResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| PaintingError::Config(format!("Failed to build HTTP client: {}", e)))?;

        let credentials = match (&config.username, &config.password) {
            (Some(username), Some(password)) => Some((username.clone(), password.clone())),
            _ => None,
        };

        Ok(Self {
            client,
            base_url: config.base_url().to_string(),
            index: config.index.clone(),
            credentials,
        })
    }

    pub fn from_client(client: Client, base_url: impl Into<String>, index: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            index: index.into(),
            credentials: None,
        }
    }

    pub fn index(&self) -> &str {
        &self.index
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self
            .client
            .request(method, format!("{}/{}", self.base_url, path));

        match &self.credentials {
            Some((username, password)) => builder.basic_auth(username, Some(password)),
            None => builder,
        }
    }

    /// Check cluster reachability for readiness probes.
    pub async fn ping(&self) -> PaintingResult<()> {
        let response = self.request(Method::GET, "_cluster/health").send().await?;
        ensure_success(response).await?;
        Ok(())
    }

    async fn run_search(&self, body: Value) -> PaintingResult<Vec<StoreHit>> {
        debug!(body = %body, "Executing search");

        let response = self
            .request(Method::POST, &format!("{}/_search", self.index))
            .json(&body)
            .send()
            .await?;

        let response: SearchResponse = decode(ensure_success(response).await?).await?;
        let hits: Vec<StoreHit> = response.hits.hits.into_iter().map(StoreHit::from).collect();

        info!(took_ms = response.took, hits = hits.len(), "Query took {} ms", response.took);
        Ok(hits)
    }
}

/// Maps failed responses: a rejected request (4xx other than 404) means the
/// query or stored data is malformed, anything else means the backend is unhealthy.
async fn ensure_success(response: Response) -> PaintingResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    if status.is_client_error() && status != StatusCode::NOT_FOUND {
        warn!(%status, "Elasticsearch rejected the request");
        return Err(PaintingError::Decode(format!(
            "Elasticsearch rejected the request with {}: {}",
            status, body
        )));
    }

    Err(PaintingError::StoreUnavailable(format!(
        "Elasticsearch returned {}: {}",
        status, body
    )))
}

async fn decode<T: DeserializeOwned>(response: Response) -> PaintingResult<T> {
    let text = response.text().await?;
    serde_json::from_str(&text).map_err(|e| {
        PaintingError::Decode(format!("unexpected Elasticsearch response: {}", e))
    })
}

#[async_trait]
impl PaintingStore for ElasticsearchStore {
    #[instrument(skip(self), fields(index = %self.index))]
    async fn get(&self, id: &str) -> PaintingResult<Option<StoredPainting>> {
        let path = format!("{}/_doc/{}", self.index, urlencoding::encode(id));
        let response = self.request(Method::GET, &path).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let response: GetResponse = decode(ensure_success(response).await?).await?;
        if !response.found {
            return Ok(None);
        }

        Ok(Some(StoredPainting {
            id: response.id,
            source: response.source,
        }))
    }

    #[instrument(skip(self, query), fields(index = %self.index))]
    async fn search(&self, query: StoreQuery) -> PaintingResult<Vec<StoreHit>> {
        let body = match &query {
            StoreQuery::Sample { size } => query::sample_body(*size),
            StoreQuery::Similar(similar) => query::similar_body(similar),
        };

        self.run_search(body).await
    }
}
