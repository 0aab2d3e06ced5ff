//! Resources Domain
//!
//! Pluggable compute resources that can be priced and monitored.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │ ResourceCatalog │  ← What the platform can provision
//! └────────┬────────┘
//!          │
//! ┌────────▼────────┐
//! │ dyn Resource    │  ← Capability trait (price, metrics, provides)
//! └────────┬────────┘
//!          │
//! ┌────────▼────────┐
//! │   Providers     │  ← PodResource, third-party implementations
//! └─────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust
//! use domain_resources::{PodResource, Resource, ResourceCatalog};
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! let pod = PodResource::new(2.0).unwrap();
//! assert_eq!(pod.price(Duration::from_secs(30 * 60)), 1.0);
//!
//! let mut catalog = ResourceCatalog::new();
//! catalog.register(Arc::new(pod)).unwrap();
//! assert!(catalog.get("Kubernetes Pod").is_some());
//! ```

pub mod catalog;
pub mod error;
pub mod models;
pub mod pod;
pub mod pricing;

// Re-export commonly used types
pub use catalog::ResourceCatalog;
pub use error::{ResourceError, ResourceResult};
pub use models::{Capability, Resource, ResourceDescriptor, SharedResource};
pub use pod::PodResource;
