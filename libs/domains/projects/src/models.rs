use domain_resources::{ResourceDescriptor, SharedResource};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use std::time::Duration;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Letters, digits, spaces, hyphens and underscores
static NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9 _-]+$").unwrap());

fn validate_name(name: &str) -> Result<(), validator::ValidationError> {
    if !NAME_PATTERN.is_match(name) || name.trim().is_empty() {
        return Err(validator::ValidationError::new("invalid_name"));
    }
    Ok(())
}

/// A named unit of a project, backed by exactly one resource
#[derive(Debug, Clone)]
pub struct Service {
    /// Unique identifier, fixed at construction
    pub id: Uuid,
    pub name: String,
    /// Owning project, stamped by [`Project::add_service`]
    pub project_id: Option<Uuid>,
    pub resource: SharedResource,
}

impl Service {
    pub fn new(name: impl Into<String>, resource: SharedResource) -> Self {
        Self {
            id: Uuid::now_v7(),
            name: name.into(),
            project_id: None,
            resource,
        }
    }

    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_resource(&mut self, resource: SharedResource) {
        self.resource = resource;
    }

    /// Cost of running this service's resource for `duration`
    pub fn price(&self, duration: Duration) -> f64 {
        self.resource.price(duration)
    }

    pub fn descriptor(&self) -> ResourceDescriptor {
        self.resource.descriptor()
    }
}

// Trait objects carry no equality, so resources compare by descriptor.
impl PartialEq for Service {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.name == other.name
            && self.project_id == other.project_id
            && self.descriptor() == other.descriptor()
    }
}

/// An ordered collection of services under one identity
#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    /// Unique identifier, fixed at construction
    pub id: Uuid,
    pub name: String,
    /// Services in insertion order
    pub services: Vec<Service>,
}

impl Project {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            name: name.into(),
            services: Vec::new(),
        }
    }

    /// Append a service and mark this project as its owner.
    ///
    /// No duplicate detection and no check against the resource catalog.
    pub fn add_service(&mut self, mut service: Service) -> &Service {
        service.project_id = Some(self.id);
        self.services.push(service);
        &self.services[self.services.len() - 1]
    }

    pub fn service(&self, id: Uuid) -> Option<&Service> {
        self.services.iter().find(|s| s.id == id)
    }

    /// Sum of the service prices for `duration`
    pub fn cost(&self, duration: Duration) -> f64 {
        self.services.iter().map(|s| s.price(duration)).sum()
    }
}

/// DTO for creating a new project
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateProject {
    #[validate(length(min = 1, max = 100), custom(function = "validate_name"))]
    pub name: String,
}

/// DTO for renaming a project
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateProject {
    #[validate(length(min = 1, max = 100), custom(function = "validate_name"))]
    pub name: Option<String>,
}

/// DTO for adding a service to a project
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateService {
    #[validate(length(min = 1, max = 100), custom(function = "validate_name"))]
    pub name: String,
    /// Name of a resource type from the instance catalog
    #[validate(length(min = 1))]
    pub resource: String,
}

/// Service as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ServiceResponse {
    pub id: Uuid,
    pub name: String,
    pub project_id: Option<Uuid>,
    pub resource: ResourceDescriptor,
}

impl From<&Service> for ServiceResponse {
    fn from(service: &Service) -> Self {
        Self {
            id: service.id,
            name: service.name.clone(),
            project_id: service.project_id,
            resource: service.descriptor(),
        }
    }
}

/// Project as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProjectResponse {
    pub id: Uuid,
    pub name: String,
    pub services: Vec<ServiceResponse>,
}

impl From<&Project> for ProjectResponse {
    fn from(project: &Project) -> Self {
        Self {
            id: project.id,
            name: project.name.clone(),
            services: project.services.iter().map(ServiceResponse::from).collect(),
        }
    }
}

/// Query for pricing a project over a billing window
#[derive(Debug, Clone, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CostQuery {
    /// Billing window in hours (fractions allowed)
    pub hours: f64,
}

impl CostQuery {
    pub fn duration(&self) -> Option<Duration> {
        Duration::try_from_secs_f64(self.hours * 3600.0).ok()
    }
}

/// Price of one service over a billing window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ServiceCost {
    pub service_id: Uuid,
    pub name: String,
    pub resource: String,
    pub cost: f64,
}

/// Price of a whole project over a billing window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProjectCost {
    pub project_id: Uuid,
    pub hours: f64,
    pub total: f64,
    pub services: Vec<ServiceCost>,
}

/// Total of one project in an instance cost report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProjectTotal {
    pub project_id: Uuid,
    pub name: String,
    pub cost: f64,
}

/// Price of every project on an instance over a billing window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct InstanceCost {
    pub instance: String,
    pub hours: f64,
    pub total: f64,
    pub projects: Vec<ProjectTotal>,
}
