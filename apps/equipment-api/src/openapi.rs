//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation for the Equipment API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Equipment API",
        version = "0.1.0",
        description = "Equipment stock management API",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    nest(
        (path = "/api/equipment", api = domain_equipment::ApiDoc)
    ),
    tags(
        (name = "Equipment", description = "Equipment stock management endpoints")
    )
)]
pub struct ApiDoc;
