//! Projects Domain
//!
//! Inventory of projects and the services they run, with cost accounting
//! against the resource catalog of an [`Instance`].
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Validation, orchestration, metrics
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (traits + in-memory implementations)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Project, Service, Instance, DTOs
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_projects::{
//!     handlers,
//!     repository::{InMemoryProjectRepository, InMemoryServiceRepository},
//!     service::ProjectService,
//!     Instance, SharedInstance,
//! };
//! use domain_resources::ResourceCatalog;
//!
//! let catalog = ResourceCatalog::with_defaults(0.05).unwrap();
//! let instance = SharedInstance::new(Instance::new("local", catalog));
//!
//! let service = ProjectService::new(
//!     instance,
//!     InMemoryProjectRepository::new(),
//!     InMemoryServiceRepository::new(),
//! );
//!
//! let router = handlers::router(service);
//! ```

pub mod error;
pub mod handlers;
pub mod instance;
pub mod models;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{EntityKind, ProjectError, ProjectResult};
pub use handlers::{ApiDoc, CatalogApiDoc};
pub use instance::{Instance, SharedInstance};
pub use models::{
    CostQuery, CreateProject, CreateService, InstanceCost, Project, ProjectCost, ProjectResponse,
    ProjectTotal, Service, ServiceCost, ServiceResponse, UpdateProject,
};
pub use repository::{
    InMemoryProjectRepository, InMemoryServiceRepository, ProjectRepository, ServiceRepository,
};
pub use service::ProjectService;
