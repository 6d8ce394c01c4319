//! Shared test utilities for domain testing
//!
//! This crate provides reusable test infrastructure for all domain crates:
//! - `TestElasticsearch`: Elasticsearch container with automatic cleanup (feature: "elasticsearch")
//! - `TestDataBuilder`: Deterministic test data generation (always available)
//! - `assertions`: Custom assertion helpers (always available)
//!
//! # Features
//!
//! - `elasticsearch`: Enables Elasticsearch test infrastructure
//! - `all`: Enables all container-backed test infrastructure
//!
//! # Usage
//!
//! Add `features = ["elasticsearch"]` to your dev-dependencies:
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { workspace = true, features = ["elasticsearch"] }
//! ```
//!
//! Then in your tests:
//!
//! ```rust,ignore
//! use test_utils::{TestElasticsearch, TestDataBuilder};
//!
//! #[tokio::test]
//! async fn my_search_test() {
//!     let es = TestElasticsearch::new().await;
//!     let builder = TestDataBuilder::from_test_name("my_search_test");
//!
//!     let index = builder.name("paintings", "main");
//!     es.create_paintings_index(&index, &[("common512", 4)]).await;
//! }
//! ```

#[cfg(feature = "elasticsearch")]
mod elasticsearch;

#[cfg(feature = "elasticsearch")]
pub use elasticsearch::TestElasticsearch;

/// Builder for test data with deterministic randomization
///
/// This ensures tests are reproducible by using seeded random data.
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    /// Create a new builder with a seed (for deterministic tests)
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Create from test name (generates seed from test name hash)
    ///
    /// This is the recommended way to create a builder for consistent test data.
    ///
    /// # Example
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::from_test_name("test_similar_paintings");
    /// ```
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// Generate a unique lowercase name for testing (valid as an index name)
    ///
    /// # Example
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::from_test_name("my_test");
    /// let name = builder.name("paintings", "main");
    /// // Returns: "test-paintings-12345-main"
    /// ```
    pub fn name(&self, prefix: &str, suffix: &str) -> String {
        format!("test-{}-{}-{}", prefix, self.seed, suffix).to_lowercase()
    }

    /// Generate a painting id unique to this test, e.g. `starry-night-12345`
    pub fn painting_id(&self, slug: &str) -> String {
        format!("{}-{}", slug, self.seed)
    }

    /// Generate a deterministic vector with strictly positive components
    ///
    /// `salt` distinguishes vectors within one test.
    pub fn vector(&self, dims: usize, salt: u64) -> Vec<f32> {
        let mut state = self.seed ^ salt.wrapping_mul(0x9E37_79B9_7F4A_7C15);
        (0..dims)
            .map(|_| {
                // xorshift64
                state ^= state << 13;
                state ^= state >> 7;
                state ^= state << 17;
                ((state % 10_000) as f32 + 1.0) / 10_000.0
            })
            .collect()
    }
}

/// Test assertion helpers
pub mod assertions {
    /// Assert that an optional value is Some
    pub fn assert_some<T>(value: Option<T>, context: &str) -> T {
        value.unwrap_or_else(|| panic!("{}: expected Some, got None", context))
    }

    /// Assert that scores never increase from one entry to the next
    pub fn assert_non_increasing(scores: &[f32], context: &str) {
        for (i, pair) in scores.windows(2).enumerate() {
            assert!(
                pair[0] >= pair[1],
                "{}: score at {} ({}) is lower than at {} ({})",
                context,
                i,
                pair[0],
                i + 1,
                pair[1]
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_builder_deterministic() {
        let builder1 = TestDataBuilder::new(42);
        let builder2 = TestDataBuilder::new(42);

        assert_eq!(builder1.painting_id("mona-lisa"), builder2.painting_id("mona-lisa"));
        assert_eq!(builder1.vector(8, 1), builder2.vector(8, 1));
        assert_eq!(
            builder1.name("paintings", "test"),
            builder2.name("paintings", "test")
        );
    }

    #[test]
    fn test_data_builder_different_names() {
        let builder1 = TestDataBuilder::from_test_name("test1");
        let builder2 = TestDataBuilder::from_test_name("test2");

        // Different test names should generate different data
        assert_ne!(builder1.painting_id("p"), builder2.painting_id("p"));
    }

    #[test]
    fn test_vector_components_are_positive() {
        let builder = TestDataBuilder::new(7);
        let vector = builder.vector(64, 3);

        assert_eq!(vector.len(), 64);
        assert!(vector.iter().all(|v| *v > 0.0 && *v <= 1.0));
        assert_ne!(vector, builder.vector(64, 4));
    }

    #[test]
    fn test_assert_non_increasing_accepts_ties() {
        assertions::assert_non_increasing(&[2.0, 1.5, 1.5, 0.1], "ranked");
    }

    #[test]
    #[should_panic(expected = "lower than")]
    fn test_assert_non_increasing_rejects_increase() {
        assertions::assert_non_increasing(&[1.0, 2.0], "ranked");
    }
}
