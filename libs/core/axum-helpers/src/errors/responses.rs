//! Reusable OpenAPI response types for consistent API documentation.

use super::ErrorResponse;
#[allow(unused_imports)]
use serde_json::json;
use utoipa::ToResponse;

#[derive(ToResponse)]
#[response(
    description = "Bad Request - invalid argument",
    content_type = "application/json",
    example = json!({
        "code": 1001,
        "error": "INVALID_ARGUMENT",
        "message": "query vector is all zeros"
    })
)]
pub struct BadRequestResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Resource not found",
    content_type = "application/json",
    example = json!({
        "code": 1004,
        "error": "NOT_FOUND",
        "message": "Painting 'mona-lisa-1' not found"
    })
)]
pub struct NotFoundResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Bad Gateway - unexpected search backend response",
    content_type = "application/json",
    example = json!({
        "code": 2010,
        "error": "UPSTREAM_DECODE",
        "message": "Failed to decode search backend response"
    })
)]
pub struct BadGatewayResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Service Unavailable - search backend unreachable",
    content_type = "application/json",
    example = json!({
        "code": 2001,
        "error": "UPSTREAM_UNAVAILABLE",
        "message": "Search backend is temporarily unavailable"
    })
)]
pub struct ServiceUnavailableResponse(pub ErrorResponse);
