//! Inventory metrics: projects, services, catalog and repository operations.

use metrics::{counter, gauge};

/// Repository operation label values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepositoryOperation {
    Create,
    Get,
    Update,
    Delete,
    List,
}

impl RepositoryOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            RepositoryOperation::Create => "create",
            RepositoryOperation::Get => "get",
            RepositoryOperation::Update => "update",
            RepositoryOperation::Delete => "delete",
            RepositoryOperation::List => "list",
        }
    }
}

/// Inventory metrics recorder
pub struct InventoryMetrics;

impl InventoryMetrics {
    pub fn set_projects_count(count: usize) {
        gauge!("platform_projects_total").set(count as f64);
    }

    pub fn set_services_count(resource: &str, count: usize) {
        gauge!("platform_services_total", "resource" => resource.to_string()).set(count as f64);
    }

    pub fn set_catalog_size(count: usize) {
        gauge!("platform_catalog_resources_total").set(count as f64);
    }

    /// Record the outcome of a repository call
    pub fn record_repository_operation(entity: &str, operation: RepositoryOperation, ok: bool) {
        counter!(
            "platform_repository_operations_total",
            "entity" => entity.to_string(),
            "operation" => operation.as_str(),
            "outcome" => if ok { "ok" } else { "error" }
        )
        .increment(1);

        if !ok {
            tracing::warn!(
                entity = entity,
                operation = operation.as_str(),
                "Repository operation failed"
            );
        }
    }
}
