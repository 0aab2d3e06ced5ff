use domain_resources::{Capability, Resource, SharedResource};
use std::sync::Arc;
use std::time::Duration;

/// Resource double with settable identity and a flat price
///
/// `price` ignores the duration and always returns the configured value.
#[derive(Debug, Clone, PartialEq)]
pub struct MockResource {
    pub name: String,
    pub description: String,
    pub provides: Vec<Capability>,
    pub price: f64,
    pub metrics_cpu: String,
    pub metrics_memory: String,
}

impl Default for MockResource {
    fn default() -> Self {
        Self {
            name: "Mock Resource".to_string(),
            description: "A mock resource for testing".to_string(),
            provides: vec![Capability::new("test")],
            price: 10.0,
            metrics_cpu: "mock_cpu".to_string(),
            metrics_memory: "mock_memory".to_string(),
        }
    }
}

impl MockResource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_provides(mut self, provides: Vec<Capability>) -> Self {
        self.provides = provides;
        self
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = price;
        self
    }

    pub fn with_metrics(mut self, cpu: impl Into<String>, memory: impl Into<String>) -> Self {
        self.metrics_cpu = cpu.into();
        self.metrics_memory = memory.into();
        self
    }

    pub fn shared(self) -> SharedResource {
        Arc::new(self)
    }
}

impl Resource for MockResource {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn provides(&self) -> Vec<Capability> {
        self.provides.clone()
    }

    fn price(&self, _duration: Duration) -> f64 {
        self.price
    }

    fn metrics_cpu(&self) -> &str {
        &self.metrics_cpu
    }

    fn metrics_memory(&self) -> &str {
        &self.metrics_memory
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let mock = MockResource::new();

        assert_eq!(mock.name(), "Mock Resource");
        assert_eq!(mock.provides(), vec![Capability::new("test")]);
        assert_eq!(mock.metrics_cpu(), "mock_cpu");
        assert_eq!(mock.metrics_memory(), "mock_memory");
    }

    #[test]
    fn test_setters_and_flat_price() {
        let mock = MockResource::new()
            .with_name("GPU")
            .with_description("Accelerator")
            .with_provides(Vec::new())
            .with_price(3.5)
            .with_metrics("gpu_cpu", "gpu_mem");

        assert_eq!(mock.name(), "GPU");
        assert_eq!(mock.description(), "Accelerator");
        assert!(mock.provides().is_empty());
        assert_eq!(mock.price(Duration::ZERO), 3.5);
        assert_eq!(mock.price(Duration::from_secs(86_400)), 3.5);
        assert_eq!(mock.descriptor().metrics_memory, "gpu_mem");
    }
}
