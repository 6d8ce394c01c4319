use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    components(
        schemas(axum_helpers::ErrorResponse)
    ),
    info(
        title = "Gallery API",
        version = "0.1.0",
        description = "Browse paintings and find visually or semantically similar ones by feature axis"
    ),
    servers(
        (url = "/api", description = "API base path")
    ),
    nest(
        (path = "/paintings", api = domain_paintings::ApiDoc)
    )
)]
pub struct ApiDoc;
