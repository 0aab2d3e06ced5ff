use std::time::Duration;

use crate::error::{ResourceError, ResourceResult};
use crate::models::{ResourceDescriptor, SharedResource};
use crate::pod::PodResource;

/// Resource types the platform can provision.
///
/// A catalog of capabilities, not a lease table: entries describe what can be
/// allocated, never what is currently running. Names are unique and
/// registration order is preserved.
#[derive(Debug, Clone, Default)]
pub struct ResourceCatalog {
    resources: Vec<SharedResource>,
}

impl ResourceCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog with the built-in providers
    pub fn with_defaults(pod_price_per_hour: f64) -> ResourceResult<Self> {
        let mut catalog = Self::new();
        catalog.register(std::sync::Arc::new(PodResource::new(pod_price_per_hour)?))?;
        Ok(catalog)
    }

    /// Add a resource type to the catalog
    pub fn register(&mut self, resource: SharedResource) -> ResourceResult<()> {
        validate_identifiers(resource.as_ref())?;

        if self.get(resource.name()).is_some() {
            return Err(ResourceError::InvalidConfiguration(format!(
                "resource '{}' is already registered",
                resource.name()
            )));
        }

        tracing::info!(resource = resource.name(), "Registered resource type");
        self.resources.push(resource);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&SharedResource> {
        self.resources.iter().find(|r| r.name() == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SharedResource> {
        self.resources.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.resources.iter().map(|r| r.name()).collect()
    }

    pub fn descriptors(&self) -> Vec<ResourceDescriptor> {
        self.resources.iter().map(|r| r.descriptor()).collect()
    }

    /// Price of every resource type for the same duration, in catalog order
    pub fn quote(&self, duration: Duration) -> Vec<(&str, f64)> {
        self.resources
            .iter()
            .map(|r| (r.name(), r.price(duration)))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

fn validate_identifiers(resource: &dyn crate::models::Resource) -> ResourceResult<()> {
    let fields = [
        ("name", resource.name()),
        ("description", resource.description()),
        ("metrics_cpu", resource.metrics_cpu()),
        ("metrics_memory", resource.metrics_memory()),
    ];

    for (field, value) in fields {
        if value.trim().is_empty() {
            return Err(ResourceError::InvalidConfiguration(format!(
                "resource {} must not be empty",
                field
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Capability, Resource};
    use std::sync::Arc;

    #[derive(Debug)]
    struct Unnamed;

    impl Resource for Unnamed {
        fn name(&self) -> &str {
            ""
        }
        fn description(&self) -> &str {
            "no name"
        }
        fn provides(&self) -> Vec<Capability> {
            Vec::new()
        }
        fn price(&self, _duration: Duration) -> f64 {
            0.0
        }
        fn metrics_cpu(&self) -> &str {
            "cpu"
        }
        fn metrics_memory(&self) -> &str {
            "memory"
        }
    }

    #[test]
    fn test_with_defaults_registers_pod() {
        let catalog = ResourceCatalog::with_defaults(0.5).unwrap();

        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.names(), vec!["Kubernetes Pod"]);
        assert_eq!(
            catalog.quote(Duration::from_secs(24 * 3600)),
            vec![("Kubernetes Pod", 12.0)]
        );
    }

    #[test]
    fn test_with_defaults_rejects_negative_rate() {
        assert!(ResourceCatalog::with_defaults(-2.0).is_err());
    }

    #[test]
    fn test_register_rejects_duplicate_name() {
        let mut catalog = ResourceCatalog::new();
        catalog.register(PodResource::setup()).unwrap();

        let result = catalog.register(PodResource::setup());

        assert!(matches!(
            result,
            Err(ResourceError::InvalidConfiguration(_))
        ));
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_register_rejects_empty_identifiers() {
        let mut catalog = ResourceCatalog::new();
        let err = catalog.register(Arc::new(Unnamed)).unwrap_err();

        assert!(err.to_string().contains("name"));
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_get_unknown_resource() {
        let catalog = ResourceCatalog::new();
        assert!(catalog.get("Kubernetes Pod").is_none());
        assert!(catalog.descriptors().is_empty());
    }
}
