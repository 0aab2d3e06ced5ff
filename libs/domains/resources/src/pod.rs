use std::sync::Arc;
use std::time::Duration;

use crate::error::ResourceResult;
use crate::models::{Capability, Resource, SharedResource};
use crate::pricing::{hourly_price, validate_rate};

const POD_NAME: &str = "Kubernetes Pod";
const POD_DESCRIPTION: &str = "A Kubernetes Pod is a group of one or more containers, with shared storage/network resources, and a specification for how to run the containers.";
const POD_METRICS_CPU: &str = "container_cpu_usage_seconds_total";
const POD_METRICS_MEMORY: &str = "container_memory_working_set_bytes";

/// Kubernetes Pod provider, billed by the hour
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PodResource {
    price_per_hour: f64,
}

impl PodResource {
    /// Create a pod priced at `price_per_hour`.
    ///
    /// Fails with `InvalidConfiguration` for a negative or non-finite rate.
    pub fn new(price_per_hour: f64) -> ResourceResult<Self> {
        let price_per_hour = validate_rate(price_per_hour)?;
        tracing::debug!(price_per_hour = price_per_hour, "Configured Kubernetes Pod resource");
        Ok(Self { price_per_hour })
    }

    /// Zero-rate pod ready to go into a catalog
    pub fn setup() -> SharedResource {
        Arc::new(Self::default())
    }

    pub fn price_per_hour(&self) -> f64 {
        self.price_per_hour
    }
}

impl Resource for PodResource {
    fn name(&self) -> &str {
        POD_NAME
    }

    fn description(&self) -> &str {
        POD_DESCRIPTION
    }

    // No capability tags yet; endpoint/volume tags will come with service matching.
    fn provides(&self) -> Vec<Capability> {
        Vec::new()
    }

    fn price(&self, duration: Duration) -> f64 {
        hourly_price(self.price_per_hour, duration)
    }

    fn metrics_cpu(&self) -> &str {
        POD_METRICS_CPU
    }

    fn metrics_memory(&self) -> &str {
        POD_METRICS_MEMORY
    }
}
