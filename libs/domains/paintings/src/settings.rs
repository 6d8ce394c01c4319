use core_config::{ConfigError, FromEnv, env_parse_or};

use crate::models::ScoringStrategy;

/// Result-set sizes and default scoring for the query engine
#[derive(Debug, Clone, PartialEq)]
pub struct SimilaritySettings {
    /// Size of the browsing sample returned by `GET /paintings`
    pub sample_size: usize,
    /// Upper bound on similar-painting results
    pub max_results: usize,
    /// Strategy used when a request does not pick one
    pub scoring: ScoringStrategy,
}

impl SimilaritySettings {
    pub fn with_sample_size(mut self, sample_size: usize) -> Self {
        self.sample_size = sample_size;
        self
    }

    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    pub fn with_scoring(mut self, scoring: ScoringStrategy) -> Self {
        self.scoring = scoring;
        self
    }
}

impl Default for SimilaritySettings {
    fn default() -> Self {
        Self {
            sample_size: 40,
            max_results: 16,
            scoring: ScoringStrategy::default(),
        }
    }
}

fn positive(key: &str, value: usize) -> Result<usize, ConfigError> {
    if value == 0 {
        return Err(ConfigError::ParseError {
            key: key.to_string(),
            details: "must be greater than zero".to_string(),
        });
    }
    Ok(value)
}

impl FromEnv for SimilaritySettings {
    /// Reads from environment variables with defaults:
    /// - PAINTINGS_SAMPLE_SIZE: defaults to 40
    /// - PAINTINGS_MAX_RESULTS: defaults to 16
    /// - PAINTINGS_SCORING: `cosine` or `l2`, defaults to `l2`
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let sample_size = positive(
            "PAINTINGS_SAMPLE_SIZE",
            env_parse_or("PAINTINGS_SAMPLE_SIZE", defaults.sample_size)?,
        )?;
        let max_results = positive(
            "PAINTINGS_MAX_RESULTS",
            env_parse_or("PAINTINGS_MAX_RESULTS", defaults.max_results)?,
        )?;
        let scoring = env_parse_or("PAINTINGS_SCORING", defaults.scoring)?;

        Ok(Self {
            sample_size,
            max_results,
            scoring,
        })
    }
}
