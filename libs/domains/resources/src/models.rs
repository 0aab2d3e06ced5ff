use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use utoipa::ToSchema;

/// Tag describing something a resource offers (e.g. "endpoint", "database").
///
/// Opaque to this crate; matching resources to requirements happens elsewhere.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct Capability(String);

impl Capability {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Capability {
    fn from(tag: &str) -> Self {
        Self::new(tag)
    }
}

/// A compute backend that can be priced and monitored.
///
/// Implementations are immutable once constructed and are shared between
/// request handlers as [`SharedResource`], so every method must be callable
/// concurrently without external locking.
pub trait Resource: fmt::Debug + Send + Sync {
    /// Stable, human-readable identifier. Never empty.
    fn name(&self) -> &str;

    /// Explanatory text. Never empty.
    fn description(&self) -> &str;

    /// Capability tags in provider-defined order. May be empty.
    fn provides(&self) -> Vec<Capability>;

    /// Cost of running the resource for `duration`.
    ///
    /// Must be non-negative, non-decreasing in `duration` and exactly `0.0`
    /// for [`Duration::ZERO`].
    fn price(&self, duration: Duration) -> f64;

    /// Series name of the CPU usage metric in the external telemetry backend.
    fn metrics_cpu(&self) -> &str;

    /// Series name of the memory usage metric in the external telemetry backend.
    fn metrics_memory(&self) -> &str;

    /// Serializable snapshot of the resource identity.
    fn descriptor(&self) -> ResourceDescriptor {
        ResourceDescriptor {
            name: self.name().to_string(),
            description: self.description().to_string(),
            provides: self.provides(),
            metrics_cpu: self.metrics_cpu().to_string(),
            metrics_memory: self.metrics_memory().to_string(),
        }
    }
}

/// Resources are shared, never mutated.
pub type SharedResource = Arc<dyn Resource>;

/// Identity of a resource as exposed over the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ResourceDescriptor {
    pub name: String,
    pub description: String,
    pub provides: Vec<Capability>,
    pub metrics_cpu: String,
    pub metrics_memory: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Database;

    impl Resource for Database {
        fn name(&self) -> &str {
            "Managed Postgres"
        }

        fn description(&self) -> &str {
            "A managed PostgreSQL database"
        }

        fn provides(&self) -> Vec<Capability> {
            vec!["database".into(), "endpoint".into()]
        }

        fn price(&self, duration: Duration) -> f64 {
            crate::pricing::hourly_price(0.25, duration)
        }

        fn metrics_cpu(&self) -> &str {
            "pg_cpu_seconds_total"
        }

        fn metrics_memory(&self) -> &str {
            "pg_memory_bytes"
        }
    }

    #[test]
    fn test_descriptor_snapshots_resource() {
        let descriptor = Database.descriptor();

        assert_eq!(descriptor.name, "Managed Postgres");
        assert_eq!(
            descriptor.provides,
            vec![Capability::new("database"), Capability::new("endpoint")]
        );
        assert_eq!(descriptor.metrics_cpu, "pg_cpu_seconds_total");
    }

    #[test]
    fn test_third_party_resource_as_trait_object() {
        let resource: SharedResource = Arc::new(Database);
        assert_eq!(resource.price(Duration::from_secs(4 * 3600)), 1.0);
    }

    #[test]
    fn test_capability_serializes_as_plain_string() {
        let json = serde_json::to_string(&Capability::new("endpoint")).unwrap();
        assert_eq!(json, "\"endpoint\"");
    }
}
