use serde::Deserialize;
use serde_json::{Value, json};

use crate::models::{DOCUMENT_ROOT, SimilarityQuery, StoreHit, VECTOR_FEATURES};

fn source_filter() -> Value {
    json!({
        "excludes": [
            format!("{}.{}", DOCUMENT_ROOT, VECTOR_FEATURES),
            VECTOR_FEATURES,
        ]
    })
}

/// Random browsing sample
pub(super) fn sample_body(size: usize) -> Value {
    json!({
        "size": size,
        "_source": source_filter(),
        "query": {
            "function_score": {
                "query": { "match_all": {} },
                "random_score": {}
            }
        }
    })
}

/// Script-scored query: candidates must carry the axis and the reference is excluded
pub(super) fn similar_body(query: &SimilarityQuery) -> Value {
    let field = query.axis.field_path();

    json!({
        "size": query.limit,
        "_source": source_filter(),
        "query": {
            "script_score": {
                "query": {
                    "bool": {
                        "must": [
                            { "exists": { "field": field } }
                        ],
                        "must_not": [
                            { "ids": { "values": [query.exclude_id] } }
                        ]
                    }
                },
                "script": {
                    "source": query.strategy.script_source(&field),
                    "params": { "queryVector": query.query_vector }
                }
            }
        }
    })
}

#[derive(Debug, Deserialize)]
pub(super) struct GetResponse {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub found: bool,
    #[serde(rename = "_source", default)]
    pub source: Value,
}

#[derive(Debug, Deserialize)]
pub(super) struct SearchResponse {
    #[serde(default)]
    pub took: u64,
    pub hits: HitsEnvelope,
}

#[derive(Debug, Deserialize)]
pub(super) struct HitsEnvelope {
    #[serde(default)]
    pub hits: Vec<RawHit>,
}

#[derive(Debug, Deserialize)]
pub(super) struct RawHit {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_score", default)]
    pub score: Option<f64>,
    #[serde(rename = "_source", default)]
    pub source: Value,
}

impl From<RawHit> for StoreHit {
    fn from(hit: RawHit) -> Self {
        StoreHit {
            id: hit.id,
            score: hit.score.unwrap_or(0.0) as f32,
            source: hit.source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FeatureAxis, ScoringStrategy};

    fn query(strategy: ScoringStrategy) -> SimilarityQuery {
        SimilarityQuery {
            exclude_id: "starry-night-2".to_string(),
            axis: FeatureAxis::new("genre1024").unwrap(),
            query_vector: vec![0.25, 0.5],
            strategy,
            limit: 16,
        }
    }

    #[test]
    fn test_similar_body_shape() {
        let body = similar_body(&query(ScoringStrategy::Cosine));
        let script_score = &body["query"]["script_score"];

        assert_eq!(body["size"], 16);
        assert_eq!(
            script_score["query"]["bool"]["must"][0]["exists"]["field"],
            "Painting.vectorFeatures.genre1024"
        );
        assert_eq!(
            script_score["query"]["bool"]["must_not"][0]["ids"]["values"][0],
            "starry-night-2"
        );
        assert_eq!(script_score["script"]["params"]["queryVector"], json!([0.25, 0.5]));
        assert!(
            script_score["script"]["source"]
                .as_str()
                .unwrap()
                .contains("cosineSimilarity(params.queryVector, 'Painting.vectorFeatures.genre1024')")
        );
        assert_eq!(body["_source"]["excludes"][0], "Painting.vectorFeatures");
    }

    #[test]
    fn test_similar_body_uses_l2_script() {
        let body = similar_body(&query(ScoringStrategy::L2));
        let source = body["query"]["script_score"]["script"]["source"].as_str().unwrap();
        assert!(source.contains("l2norm"));
    }

    #[test]
    fn test_sample_body_is_random_scored() {
        let body = sample_body(40);
        assert_eq!(body["size"], 40);
        assert!(body["query"]["function_score"]["random_score"].is_object());
    }

    #[test]
    fn test_search_response_decoding() {
        let raw = json!({
            "took": 7,
            "hits": {
                "total": { "value": 2 },
                "hits": [
                    { "_id": "sunflowers-3", "_score": 1.9, "_source": { "Painting": { "title": "Sunflowers" } } },
                    { "_id": "no-score", "_score": null }
                ]
            }
        });

        let response: SearchResponse = serde_json::from_value(raw).unwrap();
        assert_eq!(response.took, 7);

        let hits: Vec<StoreHit> = response.hits.hits.into_iter().map(StoreHit::from).collect();
        assert_eq!(hits[0].id, "sunflowers-3");
        assert!((hits[0].score - 1.9).abs() < 1e-6);
        assert_eq!(hits[1].score, 0.0);
        assert!(hits[1].source.is_null());
    }

    #[test]
    fn test_get_response_not_found() {
        let raw = json!({ "_index": "paintings", "_id": "missing", "found": false });
        let response: GetResponse = serde_json::from_value(raw).unwrap();
        assert!(!response.found);
    }
}
