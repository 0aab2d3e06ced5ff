use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Platform API",
        version = "0.1.0",
        description = "Inventory and cost accounting for projects, services and compute resources"
    ),
    servers(
        (url = "/api/v1", description = "API base path")
    ),
    nest(
        (path = crate::app::PROJECTS_PATH, api = domain_projects::ApiDoc),
        (path = crate::app::RESOURCES_PATH, api = domain_projects::CatalogApiDoc)
    )
)]
pub struct ApiDoc;

/// Pretty-printed OpenAPI document
pub fn render() -> eyre::Result<String> {
    Ok(ApiDoc::openapi().to_pretty_json()?)
}
