//! Application wiring: resource catalog, instance, repositories and routes.

use axum::{Router, middleware, routing::get};
use core_config::server::ServerConfig;
use domain_projects::{
    InMemoryProjectRepository, InMemoryServiceRepository, Instance, ProjectService,
    SharedInstance, handlers,
};
use domain_resources::ResourceCatalog;
use observability::{InventoryMetrics, metrics_handler, metrics_middleware};
use tower_http::timeout::{RequestBodyTimeoutLayer, TimeoutLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info};

use crate::config::Config;
use crate::server::health_router;

pub const API_PREFIX: &str = "/api/v1";
pub const PROJECTS_PATH: &str = "/projects";
pub const RESOURCES_PATH: &str = "/resources";

/// Build the platform instance with the built-in resource catalog
pub fn build_instance(config: &Config) -> eyre::Result<SharedInstance> {
    let catalog = ResourceCatalog::with_defaults(config.pod_price_per_hour)?;
    InventoryMetrics::set_catalog_size(catalog.len());

    info!(
        instance = %config.instance_name,
        resources = ?catalog.names(),
        "Resource catalog ready"
    );

    Ok(SharedInstance::new(Instance::new(
        config.instance_name.clone(),
        catalog,
    )))
}

/// API routes without the `/api/v1` prefix.
///
/// Domain routers apply their own state, so the result is stateless.
pub fn routes(instance: SharedInstance) -> Router {
    let service = ProjectService::new(
        instance.clone(),
        InMemoryProjectRepository::new(),
        InMemoryServiceRepository::new(),
    );

    Router::new()
        .nest(PROJECTS_PATH, handlers::router(service))
        .nest(RESOURCES_PATH, handlers::catalog_router(instance))
}

/// Bound body reads by the read timeout and handlers by the write timeout
pub fn with_timeouts(router: Router, server: &ServerConfig) -> Router {
    router
        .layer(RequestBodyTimeoutLayer::new(server.read_timeout))
        .layer(TimeoutLayer::new(server.write_timeout))
}

/// Full application router with health, metrics and cross-cutting layers
pub fn router(instance: SharedInstance, instance_name: String, server: &ServerConfig) -> Router {
    let router = Router::new()
        .nest(API_PREFIX, routes(instance))
        .merge(health_router(instance_name))
        .route("/metrics", get(metrics_handler))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        );

    with_timeouts(router, server)
}
