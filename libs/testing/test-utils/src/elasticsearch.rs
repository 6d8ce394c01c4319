//! Elasticsearch test infrastructure
//!
//! Provides a `TestElasticsearch` helper that starts a single-node
//! Elasticsearch container and seeds painting indices.

use reqwest::Client;
use serde_json::{Map, Value, json};
use std::time::Duration;
use testcontainers::ContainerAsync;
use testcontainers::runners::AsyncRunner;
use testcontainers_modules::elastic_search::ElasticSearch;

/// Test Elasticsearch wrapper that ensures proper cleanup
///
/// The container is automatically stopped and removed when this struct is dropped.
///
/// # Example
///
/// ```no_run
/// use test_utils::TestElasticsearch;
///
/// # async fn example() {
/// let es = TestElasticsearch::new().await;
/// es.create_paintings_index("paintings", &[("genre1024", 2)]).await;
/// es.index_document("paintings", "starry-night-2", serde_json::json!({
///     "Painting": { "title": "The Starry Night", "vectorFeatures": { "genre1024": [1.0, 0.0] } }
/// })).await;
/// # }
/// ```
pub struct TestElasticsearch {
    #[allow(dead_code)]
    container: ContainerAsync<ElasticSearch>,
    client: Client,
    pub url: String,
}

impl TestElasticsearch {
    /// Create a new single-node Elasticsearch instance and wait until the
    /// cluster reports healthy.
    pub async fn new() -> Self {
        let container = ElasticSearch::default()
            .start()
            .await
            .expect("Failed to start Elasticsearch container");

        let host_port = container
            .get_host_port_ipv4(9200)
            .await
            .expect("Failed to get Elasticsearch port");

        let url = format!("http://127.0.0.1:{}", host_port);
        let client = Client::new();

        let es = Self {
            container,
            client,
            url,
        };
        es.wait_until_healthy().await;

        tracing::info!(port = host_port, "Test Elasticsearch ready");
        es
    }

    async fn wait_until_healthy(&self) {
        let health_url = format!("{}/_cluster/health?wait_for_status=yellow&timeout=5s", self.url);
        for _ in 0..30 {
            if let Ok(response) = self.client.get(&health_url).send().await
                && response.status().is_success()
            {
                return;
            }
            tokio::time::sleep(Duration::from_secs(1)).await;
        }
        panic!("Elasticsearch did not become healthy at {}", self.url);
    }

    /// Create an index mapping each `(axis, dims)` as a `dense_vector` under
    /// `Painting.vectorFeatures`.
    pub async fn create_paintings_index(&self, index: &str, axes: &[(&str, usize)]) {
        let mut vectors = Map::new();
        for (axis, dims) in axes {
            vectors.insert(axis.to_string(), json!({ "type": "dense_vector", "dims": dims }));
        }
        vectors.insert("usedModel".to_string(), json!({ "type": "keyword" }));

        let body = json!({
            "mappings": {
                "properties": {
                    "Painting": {
                        "properties": {
                            "title": { "type": "text" },
                            "date": { "type": "keyword" },
                            "artist": { "type": "keyword" },
                            "genre": { "type": "keyword" },
                            "style": { "type": "keyword" },
                            "filename": { "type": "keyword" },
                            "vectorFeatures": { "properties": Value::Object(vectors) }
                        }
                    }
                }
            }
        });

        let response = self
            .client
            .put(format!("{}/{}", self.url, index))
            .json(&body)
            .send()
            .await
            .expect("Failed to create index");

        let status = response.status();
        assert!(
            status.is_success(),
            "create index {} failed: {} {}",
            index,
            status,
            response.text().await.unwrap_or_default()
        );
    }

    /// Index a document and refresh so it is immediately searchable.
    pub async fn index_document(&self, index: &str, id: &str, source: Value) {
        let response = self
            .client
            .put(format!("{}/{}/_doc/{}?refresh=true", self.url, index, id))
            .json(&source)
            .send()
            .await
            .expect("Failed to index document");

        let status = response.status();
        assert!(
            status.is_success(),
            "index {}/{} failed: {} {}",
            index,
            id,
            status,
            response.text().await.unwrap_or_default()
        );
    }
}
