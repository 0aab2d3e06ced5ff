use domain_projects::{Project, Service};
use domain_resources::SharedResource;
use uuid::Uuid;

use crate::resource::MockResource;

/// Builder for test projects
///
/// Services passed in are kept exactly as given, so the builder can produce
/// states `Project::add_service` never would (foreign `project_id`, reused ids).
pub struct ProjectBuilder {
    id: Uuid,
    name: String,
    services: Vec<Service>,
}

impl Default for ProjectBuilder {
    fn default() -> Self {
        Self {
            id: Uuid::now_v7(),
            name: "test-project".to_string(),
            services: Vec::new(),
        }
    }
}

impl ProjectBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn services(mut self, services: Vec<Service>) -> Self {
        self.services = services;
        self
    }

    pub fn service(mut self, service: Service) -> Self {
        self.services.push(service);
        self
    }

    /// Append `count` mock-backed services named `service-a`, `service-b`, ...
    /// owned by this project
    pub fn with_mock_services(mut self, count: usize) -> Self {
        for i in 0..count {
            let suffix = (b'a' + (i % 26) as u8) as char;
            let service = ServiceBuilder::new()
                .name(format!("service-{}", suffix))
                .project_id(self.id)
                .build();
            self.services.push(service);
        }
        self
    }

    pub fn build(self) -> Project {
        Project {
            id: self.id,
            name: self.name,
            services: self.services,
        }
    }
}

/// Builder for test services, backed by [`MockResource`] unless told otherwise
pub struct ServiceBuilder {
    id: Uuid,
    name: String,
    project_id: Option<Uuid>,
    resource: SharedResource,
}

impl Default for ServiceBuilder {
    fn default() -> Self {
        Self {
            id: Uuid::now_v7(),
            name: "test-service".to_string(),
            project_id: None,
            resource: MockResource::new().shared(),
        }
    }
}

impl ServiceBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn project_id(mut self, project_id: Uuid) -> Self {
        self.project_id = Some(project_id);
        self
    }

    pub fn resource(mut self, resource: SharedResource) -> Self {
        self.resource = resource;
        self
    }

    pub fn build(self) -> Service {
        Service {
            id: self.id,
            name: self.name,
            project_id: self.project_id,
            resource: self.resource,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_resources::PodResource;
    use std::time::Duration;

    #[test]
    fn test_project_defaults() {
        let project = ProjectBuilder::new().build();

        assert_eq!(project.name, "test-project");
        assert!(project.services.is_empty());
    }

    #[test]
    fn test_project_with_mock_services() {
        let project = ProjectBuilder::new().with_mock_services(3).build();

        let names: Vec<&str> = project.services.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["service-a", "service-b", "service-c"]);
        assert!(project.services.iter().all(|s| s.project_id == Some(project.id)));
        assert_eq!(project.cost(Duration::from_secs(3600)), 30.0);
    }

    #[test]
    fn test_fixed_ids() {
        let id = Uuid::nil();
        let service = ServiceBuilder::new()
            .id(id)
            .name("db")
            .resource(PodResource::setup())
            .build();
        let project = ProjectBuilder::new().id(id).service(service.clone()).build();

        assert_eq!(service.id, id);
        assert_eq!(service.resource.name(), "Kubernetes Pod");
        assert_eq!(project.id, id);
        assert_eq!(project.services, vec![service]);
    }
}
