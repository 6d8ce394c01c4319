use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::QueryRejection},
    routing::get,
};
use axum_helpers::errors::responses::{
    BadGatewayResponse, BadRequestResponse, NotFoundResponse, ServiceUnavailableResponse,
};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::{IntoParams, OpenApi};

use crate::error::{PaintingError, PaintingResult};
use crate::models::{FeatureAxis, Painting, ScoringStrategy};
use crate::repository::PaintingStore;
use crate::service::PaintingService;

/// OpenAPI documentation for Paintings API
#[derive(OpenApi)]
#[openapi(
    paths(list_paintings, get_painting, similar_paintings),
    components(
        schemas(Painting, ScoringStrategy),
        responses(
            BadRequestResponse,
            NotFoundResponse,
            BadGatewayResponse,
            ServiceUnavailableResponse
        )
    ),
    tags(
        (name = "Paintings", description = "Painting browsing and similarity search")
    )
)]
pub struct ApiDoc;

/// Query parameters of the similar-paintings endpoint
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SimilarPaintingsParams {
    /// Feature axis to compare on, e.g. `common512`, `style1024`, `genre1024`
    pub feature: Option<String>,
    /// `cosine` or `l2`; the server default applies when omitted
    pub scoring: Option<String>,
}

impl SimilarPaintingsParams {
    fn axis(&self) -> PaintingResult<FeatureAxis> {
        match self.feature.as_deref() {
            Some(feature) => feature.parse(),
            None => Err(PaintingError::InvalidArgument(
                "query parameter 'feature' is required".to_string(),
            )),
        }
    }

    fn strategy(&self) -> PaintingResult<Option<ScoringStrategy>> {
        self.scoring.as_deref().map(str::parse).transpose()
    }
}

/// Create the paintings router with all HTTP endpoints
pub fn router<R: PaintingStore + 'static>(service: PaintingService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_paintings))
        .route("/{painting_id}", get(get_painting))
        .route("/{painting_id}/similar-paintings", get(similar_paintings))
        .with_state(shared_service)
}

/// Random sample of paintings for browsing
#[utoipa::path(
    get,
    path = "",
    tag = "Paintings",
    responses(
        (status = 200, description = "Sample of paintings", body = Vec<Painting>),
        (status = 502, response = BadGatewayResponse),
        (status = 503, response = ServiceUnavailableResponse)
    )
)]
async fn list_paintings<R: PaintingStore>(
    State(service): State<Arc<PaintingService<R>>>,
) -> PaintingResult<Json<Vec<Painting>>> {
    let paintings = service.sample_paintings().await?;
    Ok(Json(paintings))
}

/// Get a painting by ID
#[utoipa::path(
    get,
    path = "/{painting_id}",
    tag = "Paintings",
    params(
        ("painting_id" = String, Path, description = "Painting ID")
    ),
    responses(
        (status = 200, description = "Painting found", body = Painting),
        (status = 404, response = NotFoundResponse),
        (status = 502, response = BadGatewayResponse),
        (status = 503, response = ServiceUnavailableResponse)
    )
)]
async fn get_painting<R: PaintingStore>(
    State(service): State<Arc<PaintingService<R>>>,
    Path(painting_id): Path<String>,
) -> PaintingResult<Json<Painting>> {
    let painting = service.get_painting(&painting_id).await?;
    Ok(Json(painting))
}

/// Paintings similar to the given one along a feature axis, best match first
#[utoipa::path(
    get,
    path = "/{painting_id}/similar-paintings",
    tag = "Paintings",
    params(
        ("painting_id" = String, Path, description = "Reference painting ID"),
        SimilarPaintingsParams
    ),
    responses(
        (status = 200, description = "Ranked similar paintings", body = Vec<Painting>),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 502, response = BadGatewayResponse),
        (status = 503, response = ServiceUnavailableResponse)
    )
)]
async fn similar_paintings<R: PaintingStore>(
    State(service): State<Arc<PaintingService<R>>>,
    Path(painting_id): Path<String>,
    params: Result<Query<SimilarPaintingsParams>, QueryRejection>,
) -> PaintingResult<Json<Vec<Painting>>> {
    let Query(params) =
        params.map_err(|rejection| PaintingError::InvalidArgument(rejection.body_text()))?;
    let axis = params.axis()?;
    let strategy = params.strategy()?;

    let paintings = service
        .find_similar_paintings(&painting_id, &axis, strategy)
        .await?;
    Ok(Json(paintings))
}
