//! Elasticsearch-backed [`PaintingStore`](crate::repository::PaintingStore).

mod client;
mod query;

pub use client::ElasticsearchStore;
