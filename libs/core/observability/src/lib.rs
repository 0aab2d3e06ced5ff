//! Observability utilities for the platform.
//!
//! This crate provides:
//! - Prometheus metrics recorder installation and rendering
//! - Cost accounting metrics (resource price computations)
//! - Inventory metrics (projects, services, repository operations)
//! - Axum middleware for HTTP request metrics
//!
//! # Example
//!
//! ```rust,ignore
//! use observability::{init_metrics, metrics_handler, CostMetrics};
//!
//! init_metrics();
//!
//! CostMetrics::record_price_computed("Kubernetes Pod", 1.5, 3.0);
//!
//! let app = Router::new().route("/metrics", get(metrics_handler));
//! ```

pub mod cost;
pub mod inventory;
pub mod middleware;

pub use cost::CostMetrics;
pub use inventory::{InventoryMetrics, RepositoryOperation};
pub use middleware::metrics_middleware;

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;
use tracing::{info, warn};

static METRICS_HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

/// Install the Prometheus metrics recorder.
///
/// Call once at startup. Returns `None` when another recorder is already
/// installed in the process.
pub fn init_metrics() -> Option<&'static PrometheusHandle> {
    METRICS_HANDLE
        .get_or_try_init(|| {
            let handle = PrometheusBuilder::new().install_recorder()?;
            info!("Prometheus metrics recorder initialized");
            register_metric_descriptions();
            Ok::<_, metrics_exporter_prometheus::BuildError>(handle)
        })
        .map_err(|e| warn!(error = %e, "Failed to install Prometheus recorder"))
        .ok()
}

/// Get the metrics handle (must call init_metrics first)
pub fn get_metrics_handle() -> Option<&'static PrometheusHandle> {
    METRICS_HANDLE.get()
}

/// Axum handler for /metrics endpoint
pub async fn metrics_handler() -> String {
    match get_metrics_handle() {
        Some(handle) => handle.render(),
        None => "# Metrics not initialized\n".to_string(),
    }
}

fn register_metric_descriptions() {
    use metrics::describe_counter;
    use metrics::describe_gauge;
    use metrics::describe_histogram;

    // HTTP metrics
    describe_counter!("http_requests_total", "Total number of HTTP requests");
    describe_histogram!(
        "http_request_duration_seconds",
        "HTTP request duration in seconds"
    );
    describe_counter!(
        "http_requests_errors_total",
        "Total number of HTTP request errors"
    );

    // Cost metrics
    describe_counter!(
        "platform_price_computations_total",
        "Resource price computations by resource type"
    );
    describe_histogram!(
        "platform_priced_hours",
        "Billed duration in hours per price computation"
    );
    describe_histogram!(
        "platform_project_cost",
        "Project totals per cost computation"
    );
    describe_gauge!(
        "platform_instance_cost",
        "Last computed cost of every project on the instance"
    );

    // Inventory metrics
    describe_gauge!("platform_projects_total", "Projects known to the instance");
    describe_gauge!(
        "platform_services_total",
        "Services by resource type"
    );
    describe_gauge!(
        "platform_catalog_resources_total",
        "Resource types available in the catalog"
    );
    describe_counter!(
        "platform_repository_operations_total",
        "Repository operations by entity, operation and outcome"
    );
}
