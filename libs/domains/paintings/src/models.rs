use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

use crate::error::{PaintingError, PaintingResult};

/// Top-level key wrapping the painting fields in a stored document
pub const DOCUMENT_ROOT: &str = "Painting";

/// Key of the per-axis vector map inside a painting document
pub const VECTOR_FEATURES: &str = "vectorFeatures";

/// Painting as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Painting {
    /// Document id in the search store
    #[schema(example = "starry-night-2")]
    pub id: String,
    #[schema(example = "The Starry Night")]
    pub title: String,
    /// Free-form creation date; omitted when unknown
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "1889")]
    pub date: Option<String>,
    #[schema(example = "Vincent van Gogh")]
    pub artist: String,
    #[schema(example = "landscape")]
    pub genre: String,
    #[schema(example = "Post-Impressionism")]
    pub style: String,
    /// 1.0 for a direct lookup, the engine's relevance score for search hits
    pub score: f32,
}

/// Name of a feature vector stored under `Painting.vectorFeatures`.
///
/// Known axes produced by the vectorizer are `common512`, `common1024`,
/// `style512`, `style1024`, `genre512` and `genre1024`. Any name made of
/// ASCII letters, digits and underscores is accepted since it is
/// interpolated into a document field path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FeatureAxis(String);

impl FeatureAxis {
    pub fn new(name: impl Into<String>) -> PaintingResult<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(PaintingError::InvalidArgument(
                "feature must not be empty".to_string(),
            ));
        }
        if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(PaintingError::InvalidArgument(format!(
                "feature '{}' must contain only letters, digits and underscores",
                name
            )));
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Full document path of this axis, e.g. `Painting.vectorFeatures.genre1024`
    pub fn field_path(&self) -> String {
        format!("{}.{}.{}", DOCUMENT_ROOT, VECTOR_FEATURES, self.0)
    }
}

impl FromStr for FeatureAxis {
    type Err = PaintingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.trim())
    }
}

impl fmt::Display for FeatureAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for FeatureAxis {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Distance function used to score candidates against the reference vector
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum ScoringStrategy {
    /// `cosineSimilarity + 1.0`, in `[0, 2]`
    Cosine,
    /// `1 / (1 + l2norm)`, in `(0, 1]`
    #[default]
    L2,
}

impl ScoringStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScoringStrategy::Cosine => "cosine",
            ScoringStrategy::L2 => "l2",
        }
    }

    /// Computes the score of `candidate` against `query` in process.
    ///
    /// Mirrors [`script_source`](Self::script_source) including the floor at
    /// zero. Returns `None` when the vectors differ in length. A zero-norm
    /// vector has no direction, so its cosine score is the shifted midpoint `1.0`.
    pub fn evaluate(&self, query: &[f32], candidate: &[f32]) -> Option<f64> {
        if query.len() != candidate.len() {
            return None;
        }

        let score = match self {
            ScoringStrategy::Cosine => {
                let (mut dot, mut q_norm, mut c_norm) = (0.0f64, 0.0f64, 0.0f64);
                for (q, c) in query.iter().zip(candidate) {
                    let (q, c) = (f64::from(*q), f64::from(*c));
                    dot += q * c;
                    q_norm += q * q;
                    c_norm += c * c;
                }
                let denominator = q_norm.sqrt() * c_norm.sqrt();
                let cosine = if denominator == 0.0 { 0.0 } else { dot / denominator };
                cosine + 1.0
            }
            ScoringStrategy::L2 => {
                let distance = query
                    .iter()
                    .zip(candidate)
                    .map(|(q, c)| {
                        let d = f64::from(*q) - f64::from(*c);
                        d * d
                    })
                    .sum::<f64>()
                    .sqrt();
                1.0 / (1.0 + distance)
            }
        };

        Some(score.max(0.0))
    }

    /// Painless script scoring a candidate document on `field`.
    ///
    /// The reference vector is bound as `params.queryVector`.
    pub fn script_source(&self, field: &str) -> String {
        match self {
            ScoringStrategy::Cosine => format!(
                "double score = cosineSimilarity(params.queryVector, '{}') + 1.0; score >= 0 ? score : 0",
                field
            ),
            ScoringStrategy::L2 => format!(
                "double score = 1 / (1 + l2norm(params.queryVector, '{}')); score >= 0 ? score : 0",
                field
            ),
        }
    }
}

impl FromStr for ScoringStrategy {
    type Err = PaintingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cosine" => Ok(ScoringStrategy::Cosine),
            "l2" => Ok(ScoringStrategy::L2),
            other => Err(PaintingError::InvalidArgument(format!(
                "unknown scoring strategy '{}', expected 'cosine' or 'l2'",
                other
            ))),
        }
    }
}

impl fmt::Display for ScoringStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A document fetched by id
#[derive(Debug, Clone, PartialEq)]
pub struct StoredPainting {
    pub id: String,
    /// Raw `_source` of the document, vector map included
    pub source: Value,
}

/// One ranked search hit
#[derive(Debug, Clone, PartialEq)]
pub struct StoreHit {
    pub id: String,
    pub score: f32,
    pub source: Value,
}

/// Scored nearest-neighbour query against one feature axis
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityQuery {
    /// Reference painting, never returned as a hit
    pub exclude_id: String,
    /// Candidates lacking this axis are filtered out before scoring
    pub axis: FeatureAxis,
    pub query_vector: Vec<f32>,
    pub strategy: ScoringStrategy,
    pub limit: usize,
}

/// Store-agnostic description of a search
#[derive(Debug, Clone, PartialEq)]
pub enum StoreQuery {
    /// Random browsing sample of at most `size` documents
    Sample { size: usize },
    Similar(SimilarityQuery),
}
