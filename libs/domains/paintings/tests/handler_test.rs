//! Handler tests for Paintings domain
//!
//! These tests drive the paintings router end to end against an in-memory
//! store that scores candidates with `ScoringStrategy::evaluate`:
//! - Path and query parameter handling
//! - Response serialization (camelCase, optional date)
//! - HTTP status codes and JSON error bodies

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use domain_paintings::conversions::feature_vector;
use domain_paintings::*;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tower::ServiceExt; // For oneshot()

/// Document store backed by a map, evaluating queries the way the search
/// engine does: existence filter, exclusion by id, script score, top-N.
#[derive(Default)]
struct InMemoryStore {
    documents: BTreeMap<String, Value>,
    searches: AtomicUsize,
}

impl InMemoryStore {
    fn with(mut self, id: &str, source: Value) -> Self {
        self.documents.insert(id.to_string(), source);
        self
    }
}

#[async_trait]
impl PaintingStore for InMemoryStore {
    async fn get(&self, id: &str) -> PaintingResult<Option<StoredPainting>> {
        Ok(self.documents.get(id).map(|source| StoredPainting {
            id: id.to_string(),
            source: source.clone(),
        }))
    }

    async fn search(&self, query: StoreQuery) -> PaintingResult<Vec<StoreHit>> {
        self.searches.fetch_add(1, Ordering::SeqCst);

        match query {
            StoreQuery::Sample { size } => Ok(self
                .documents
                .iter()
                .take(size)
                .map(|(id, source)| StoreHit {
                    id: id.clone(),
                    score: 1.0,
                    source: source.clone(),
                })
                .collect()),
            StoreQuery::Similar(similar) => {
                let mut hits = Vec::new();
                for (id, source) in &self.documents {
                    if *id == similar.exclude_id {
                        continue;
                    }
                    let Some(candidate) = feature_vector(source, &similar.axis)? else {
                        continue;
                    };
                    let score = similar
                        .strategy
                        .evaluate(&similar.query_vector, &candidate)
                        .ok_or_else(|| {
                            PaintingError::StoreUnavailable("vector dimensions differ".to_string())
                        })?;
                    hits.push(StoreHit {
                        id: id.clone(),
                        score: score as f32,
                        source: source.clone(),
                    });
                }
                hits.sort_by(|a, b| b.score.total_cmp(&a.score));
                hits.truncate(similar.limit);
                Ok(hits)
            }
        }
    }
}

fn painting(title: &str, artist: &str, features: Value) -> Value {
    json!({
        "Painting": {
            "title": title,
            "artist": artist,
            "genre": "landscape",
            "style": "Post-Impressionism",
            "vectorFeatures": features
        }
    })
}

/// The gallery used by most tests:
/// - `starry-night-2` has a valid genre1024 vector
/// - `sunflowers-3` has genre1024 close to it (cosine 0.9 after normalization)
/// - `guernica-4` lacks genre1024
/// - `mona-lisa-1` has an all-zero style1024 vector
fn gallery() -> InMemoryStore {
    InMemoryStore::default()
        .with(
            "starry-night-2",
            painting("The Starry Night", "Vincent van Gogh", json!({ "genre1024": [1.0, 0.0] })),
        )
        .with(
            "sunflowers-3",
            painting(
                "Sunflowers",
                "Vincent van Gogh",
                json!({ "genre1024": [0.9, 0.435_889_9], "usedModel": "v1" }),
            ),
        )
        .with(
            "guernica-4",
            painting("Guernica", "Pablo Picasso", json!({ "style1024": [0.5, 0.5] })),
        )
        .with(
            "mona-lisa-1",
            json!({
                "Painting": {
                    "title": "Mona Lisa",
                    "date": "1503",
                    "artist": "Leonardo da Vinci",
                    "vectorFeatures": { "style1024": [0.0, 0.0] }
                }
            }),
        )
}

fn app(store: InMemoryStore) -> axum::Router {
    handlers::router(PaintingService::new(store))
}

async fn get(app: axum::Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn ids(body: &Value) -> Vec<&str> {
    body.as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_str().unwrap())
        .collect()
}

#[tokio::test]
async fn test_similar_paintings_only_returns_candidates_with_the_axis() {
    let (status, body) = get(
        app(gallery()),
        "/starry-night-2/similar-paintings?feature=genre1024&scoring=cosine",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), ["sunflowers-3"]);

    let score = body[0]["score"].as_f64().unwrap();
    assert!((score - 1.9).abs() < 1e-3, "cosine 0.9 shifted by 1.0, got {score}");
}

#[tokio::test]
async fn test_similar_paintings_default_scoring_is_l2() {
    let (status, body) = get(
        app(gallery()),
        "/starry-night-2/similar-paintings?feature=genre1024",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let score = body[0]["score"].as_f64().unwrap();
    assert!(score > 0.0 && score <= 1.0, "l2 score in (0, 1], got {score}");
}

#[tokio::test]
async fn test_similar_paintings_are_ranked_and_exclude_reference() {
    let store = InMemoryStore::default()
        .with("ref", painting("Ref", "A", json!({ "common512": [1.0, 1.0] })))
        .with("far", painting("Far", "B", json!({ "common512": [5.0, -3.0] })))
        .with("near", painting("Near", "C", json!({ "common512": [1.0, 0.9] })))
        .with("mid", painting("Mid", "D", json!({ "common512": [2.0, 1.0] })));

    let (status, body) = get(app(store), "/ref/similar-paintings?feature=common512").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), ["near", "mid", "far"]);

    let scores: Vec<f64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["score"].as_f64().unwrap())
        .collect();
    assert!(scores.windows(2).all(|w| w[0] >= w[1]));
}

#[tokio::test]
async fn test_all_zero_vector_returns_400_without_search() {
    let store = Arc::new(gallery());
    let app = handlers::router(PaintingService::from_arc(Arc::clone(&store)));

    let (status, body) = get(app, "/mona-lisa-1/similar-paintings?feature=style1024").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "INVALID_ARGUMENT");
    assert!(body["message"].as_str().unwrap().contains("query vector is all zeros"));
    assert_eq!(store.searches.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_missing_axis_returns_400() {
    let (status, body) = get(app(gallery()), "/guernica-4/similar-paintings?feature=genre1024").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "feature 'genre1024' is not set on painting 'guernica-4'"
    );
}

#[tokio::test]
async fn test_feature_parameter_is_required() {
    let (status, body) = get(app(gallery()), "/starry-night-2/similar-paintings").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("feature"));
}

#[tokio::test]
async fn test_invalid_feature_and_scoring_are_rejected() {
    let (status, _) = get(
        app(gallery()),
        "/starry-night-2/similar-paintings?feature=genre1024%27",
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = get(
        app(gallery()),
        "/starry-night-2/similar-paintings?feature=genre1024&scoring=manhattan",
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("manhattan"));
}

#[tokio::test]
async fn test_malformed_query_string_returns_json_400() {
    let (status, body) = get(
        app(gallery()),
        "/starry-night-2/similar-paintings?feature=genre1024&feature=style1024",
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "INVALID_ARGUMENT");
    assert_eq!(body["code"], 1001);
    assert!(body["message"].as_str().unwrap().contains("feature"));
}

#[tokio::test]
async fn test_painting_id_is_not_trimmed() {
    let (status, body) = get(app(gallery()), "/%20mona-lisa-1%20").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Painting ' mona-lisa-1 ' not found");
}

#[tokio::test]
async fn test_similar_to_unknown_painting_returns_404() {
    let (status, body) = get(app(gallery()), "/nope/similar-paintings?feature=genre1024").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NOT_FOUND");
    assert_eq!(body["code"], 1004);
}

#[tokio::test]
async fn test_get_painting_returns_exact_match() {
    let (status, body) = get(app(gallery()), "/mona-lisa-1").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], "mona-lisa-1");
    assert_eq!(body["title"], "Mona Lisa");
    assert_eq!(body["date"], "1503");
    assert_eq!(body["genre"], "");
    assert_eq!(body["score"], 1.0);
    assert!(body.get("vectorFeatures").is_none());
}

#[tokio::test]
async fn test_get_painting_omits_unknown_date() {
    let (_, body) = get(app(gallery()), "/guernica-4").await;
    assert!(body.get("date").is_none());
}

#[tokio::test]
async fn test_get_unknown_painting_returns_404() {
    let (status, body) = get(app(gallery()), "/missing-0").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Painting 'missing-0' not found");
}

#[tokio::test]
async fn test_list_paintings_returns_unique_sample() {
    let (status, body) = get(app(gallery()), "/").await;

    assert_eq!(status, StatusCode::OK);
    let mut listed = ids(&body);
    assert_eq!(listed.len(), 4);
    listed.sort();
    listed.dedup();
    assert_eq!(listed.len(), 4);
}

#[tokio::test]
async fn test_list_paintings_empty_store() {
    let (status, body) = get(app(InMemoryStore::default()), "/").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}
