//! Mapping from raw store documents to [`Painting`] records.
//!
//! All field defaulting lives here: missing or `null` strings become `""`,
//! `date` stays optional, and `title` falls back to the legacy `name` key.

use serde::Deserialize;
use serde_json::Value;

use crate::error::{PaintingError, PaintingResult};
use crate::models::{DOCUMENT_ROOT, FeatureAxis, Painting, StoreHit, VECTOR_FEATURES};

#[derive(Debug, Default, Deserialize)]
struct PaintingFields {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    date: Option<String>,
    #[serde(default)]
    artist: Option<String>,
    #[serde(default)]
    genre: Option<String>,
    #[serde(default)]
    style: Option<String>,
}

/// Painting fields live under `Painting`; older documents keep them at the root.
fn painting_root(source: &Value) -> &Value {
    match source.get(DOCUMENT_ROOT) {
        Some(inner @ Value::Object(_)) => inner,
        _ => source,
    }
}

fn decode_fields(source: &Value, id: &str) -> PaintingResult<PaintingFields> {
    match painting_root(source) {
        Value::Null => Ok(PaintingFields::default()),
        root => PaintingFields::deserialize(root)
            .map_err(|e| PaintingError::Decode(format!("painting '{}': {}", id, e))),
    }
}

pub fn fetched_document_to_painting(
    source: &Value,
    id: &str,
    score: f32,
) -> PaintingResult<Painting> {
    let fields = decode_fields(source, id)?;

    Ok(Painting {
        id: id.to_string(),
        title: fields.title.or(fields.name).unwrap_or_default(),
        date: fields.date,
        artist: fields.artist.unwrap_or_default(),
        genre: fields.genre.unwrap_or_default(),
        style: fields.style.unwrap_or_default(),
        score,
    })
}

pub fn hit_to_painting(hit: &StoreHit) -> PaintingResult<Painting> {
    fetched_document_to_painting(&hit.source, &hit.id, hit.score)
}

/// Reads the vector stored for `axis`, `None` when the axis is absent or null.
pub fn feature_vector(source: &Value, axis: &FeatureAxis) -> PaintingResult<Option<Vec<f32>>> {
    let value = painting_root(source)
        .get(VECTOR_FEATURES)
        .and_then(|features| features.get(axis.as_str()));

    match value {
        None | Some(Value::Null) => Ok(None),
        Some(raw) => Vec::<f32>::deserialize(raw).map(Some).map_err(|e| {
            PaintingError::Decode(format!("feature '{}' is not a numeric vector: {}", axis, e))
        }),
    }
}
