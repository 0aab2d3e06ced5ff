//! Cost accounting metrics.

use metrics::{counter, gauge, histogram};

/// Cost metrics recorder
pub struct CostMetrics;

impl CostMetrics {
    /// Record a single resource price computation
    pub fn record_price_computed(resource: &str, hours: f64, cost: f64) {
        counter!(
            "platform_price_computations_total",
            "resource" => resource.to_string()
        )
        .increment(1);
        histogram!("platform_priced_hours", "resource" => resource.to_string()).record(hours);

        tracing::debug!(resource = resource, hours = hours, cost = cost, "Computed price");
    }

    /// Record the total of a project cost computation.
    ///
    /// Projects come and go, so the series carries no project label.
    pub fn record_project_cost(cost: f64) {
        histogram!("platform_project_cost").record(cost);
    }

    /// Set the last computed cost of every project on an instance
    pub fn set_instance_cost(instance: &str, cost: f64) {
        gauge!("platform_instance_cost", "instance" => instance.to_string()).set(cost);
    }
}
