//! Paintings Domain Library
//!
//! Browsing and vector similarity search over painting documents stored in
//! Elasticsearch. Each painting carries precomputed feature vectors per axis
//! (`common512`, `style1024`, `genre1024`, ...); similar paintings are ranked
//! by a script score evaluated inside the search engine.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐
//! │ handlers (axum)  │  ← /paintings, /{id}, /{id}/similar-paintings
//! └────────┬─────────┘
//!          │
//! ┌────────▼─────────┐     ┌──────────────────┐
//! │ PaintingService  │────▶│   conversions    │  ← document → Painting
//! └────────┬─────────┘     └──────────────────┘
//!          │
//! ┌────────▼─────────┐
//! │  PaintingStore   │
//! │     (trait)      │
//! └────────┬─────────┘
//!          │
//! ┌────────▼─────────┐
//! │ElasticsearchStore│
//! └──────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use core_config::elasticsearch::ElasticsearchConfig;
//! use domain_paintings::{ElasticsearchStore, FeatureAxis, PaintingService};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = ElasticsearchStore::new(&ElasticsearchConfig::default())?;
//! let service = PaintingService::new(store);
//!
//! let axis = FeatureAxis::new("style1024")?;
//! let similar = service.find_similar_paintings("starry-night-2", &axis, None).await?;
//! # Ok(())
//! # }
//! ```

pub mod conversions;
pub mod elasticsearch;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod service;
pub mod settings;

// Re-export commonly used types
pub use elasticsearch::ElasticsearchStore;
pub use error::{PaintingError, PaintingResult};
pub use handlers::ApiDoc;
pub use models::{
    FeatureAxis, Painting, ScoringStrategy, SimilarityQuery, StoreHit, StoreQuery, StoredPainting,
};
pub use repository::PaintingStore;
pub use service::PaintingService;
pub use settings::SimilaritySettings;
