use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::conversions::{feature_vector, fetched_document_to_painting, hit_to_painting};
use crate::error::{PaintingError, PaintingResult};
use crate::models::{FeatureAxis, Painting, ScoringStrategy, SimilarityQuery, StoreQuery};
use crate::repository::PaintingStore;
use crate::settings::SimilaritySettings;

/// Similarity query engine over a [`PaintingStore`]
///
/// Stateless apart from the shared store handle, so clones are cheap and
/// every operation is safe to run concurrently.
pub struct PaintingService<R: PaintingStore> {
    store: Arc<R>,
    settings: SimilaritySettings,
}

impl<R: PaintingStore> PaintingService<R> {
    pub fn new(store: R) -> Self {
        Self::from_arc(Arc::new(store))
    }

    pub fn from_arc(store: Arc<R>) -> Self {
        Self {
            store,
            settings: SimilaritySettings::default(),
        }
    }

    pub fn with_settings(mut self, settings: SimilaritySettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn settings(&self) -> &SimilaritySettings {
        &self.settings
    }

    /// Random browsing sample, bounded by `sample_size`, without duplicate ids
    #[instrument(skip(self))]
    pub async fn sample_paintings(&self) -> PaintingResult<Vec<Painting>> {
        let size = self.settings.sample_size;
        let hits = self.store.search(StoreQuery::Sample { size }).await?;

        let mut seen = HashSet::with_capacity(hits.len());
        let mut paintings = Vec::with_capacity(hits.len().min(size));
        for hit in &hits {
            if paintings.len() == size {
                break;
            }
            if seen.insert(hit.id.as_str()) {
                paintings.push(hit_to_painting(hit)?);
            }
        }

        Ok(paintings)
    }

    /// Direct lookup; the returned score is always `1.0`
    #[instrument(skip(self))]
    pub async fn get_painting(&self, id: &str) -> PaintingResult<Painting> {
        let id = validate_id(id)?;

        let document = self
            .store
            .get(id)
            .await?
            .ok_or_else(|| not_found(id))?;

        fetched_document_to_painting(&document.source, &document.id, 1.0)
    }

    /// Paintings closest to `id` along `axis`, best first.
    ///
    /// Fails with `NotFound` when the reference painting does not exist and
    /// with `InvalidArgument` when it has no usable vector on `axis`; no
    /// search is issued in either case. `strategy` overrides the configured
    /// default scoring.
    #[instrument(skip(self, axis), fields(axis = %axis))]
    pub async fn find_similar_paintings(
        &self,
        id: &str,
        axis: &FeatureAxis,
        strategy: Option<ScoringStrategy>,
    ) -> PaintingResult<Vec<Painting>> {
        let id = validate_id(id)?;

        let reference = self
            .store
            .get(id)
            .await?
            .ok_or_else(|| not_found(id))?;

        let query_vector = feature_vector(&reference.source, axis)?.ok_or_else(|| {
            PaintingError::InvalidArgument(format!(
                "feature '{}' is not set on painting '{}'",
                axis, id
            ))
        })?;

        if !query_vector.iter().any(|component| *component > 0.0) {
            return Err(PaintingError::InvalidArgument(
                "query vector is all zeros".to_string(),
            ));
        }

        let strategy = strategy.unwrap_or(self.settings.scoring);
        let limit = self.settings.max_results;
        debug!(%strategy, limit, dimensions = query_vector.len(), "Searching similar paintings");

        let hits = self
            .store
            .search(StoreQuery::Similar(SimilarityQuery {
                exclude_id: id.to_string(),
                axis: axis.clone(),
                query_vector,
                strategy,
                limit,
            }))
            .await?;

        let mut paintings = hits
            .iter()
            .filter(|hit| hit.id != id)
            .map(hit_to_painting)
            .collect::<PaintingResult<Vec<_>>>()?;

        // Stable: equal scores keep the store's order.
        paintings.sort_by(|a, b| b.score.total_cmp(&a.score));
        paintings.truncate(limit);

        Ok(paintings)
    }
}

impl<R: PaintingStore> Clone for PaintingService<R> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            settings: self.settings.clone(),
        }
    }
}

/// Ids are store keys and are looked up verbatim; only blank ids are rejected.
fn validate_id(id: &str) -> PaintingResult<&str> {
    if id.trim().is_empty() {
        return Err(PaintingError::InvalidArgument(
            "painting id must not be empty".to_string(),
        ));
    }
    Ok(id)
}

fn not_found(id: &str) -> PaintingError {
    PaintingError::NotFound(format!("Painting '{}' not found", id))
}
