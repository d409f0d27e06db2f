use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Quarry API",
        version = "0.1.0",
        description = "Fetch structured data from any URL using CSS field selectors, with result caching."
    ),
    paths(crate::routes::fetch_data, crate::routes::health),
    components(schemas(
        crate::dto::DataResponse,
        crate::dto::HealthResponse,
        crate::dto::ErrorResponse,
        crate::dto::ErrorBody,
    )),
    tags(
        (name = "data", description = "Structured data extraction"),
        (name = "system", description = "Health and system status"),
    )
)]
pub struct ApiDoc;
