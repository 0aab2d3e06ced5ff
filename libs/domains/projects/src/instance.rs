use domain_resources::{ResourceCatalog, SharedResource};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{ProjectError, ProjectResult};
use crate::models::{InstanceCost, Project, ProjectTotal, Service};

/// Top-level platform aggregate: projects plus the catalog of resource types
#[derive(Debug, Clone)]
pub struct Instance {
    pub name: String,
    /// Projects in insertion order
    pub projects: Vec<Project>,
    pub available_resources: ResourceCatalog,
}

impl Instance {
    pub fn new(name: impl Into<String>, available_resources: ResourceCatalog) -> Self {
        Self {
            name: name.into(),
            projects: Vec::new(),
            available_resources,
        }
    }

    /// Append a project. No duplicate detection.
    pub fn add_project(&mut self, project: Project) {
        self.projects.push(project);
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn available_resources(&self) -> &ResourceCatalog {
        &self.available_resources
    }

    pub fn project(&self, id: Uuid) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    pub fn project_mut(&mut self, id: Uuid) -> Option<&mut Project> {
        self.projects.iter_mut().find(|p| p.id == id)
    }

    /// Replace the project with the same id in place, or append it
    pub fn put_project(&mut self, project: Project) {
        match self.project_mut(project.id) {
            Some(existing) => *existing = project,
            None => self.projects.push(project),
        }
    }

    pub fn remove_project(&mut self, id: Uuid) -> Option<Project> {
        let index = self.projects.iter().position(|p| p.id == id)?;
        Some(self.projects.remove(index))
    }

    pub fn resource(&self, name: &str) -> Option<&SharedResource> {
        self.available_resources.get(name)
    }

    /// Cost of every project for `duration`
    pub fn total_cost(&self, duration: Duration) -> f64 {
        self.projects.iter().map(|p| p.cost(duration)).sum()
    }
}

/// Handle to an [`Instance`] shared between request handlers.
///
/// Every mutation holds the instance lock for the whole operation, so
/// concurrent appends never interleave or get lost.
#[derive(Debug, Clone)]
pub struct SharedInstance {
    inner: Arc<RwLock<Instance>>,
}

impl SharedInstance {
    pub fn new(instance: Instance) -> Self {
        Self {
            inner: Arc::new(RwLock::new(instance)),
        }
    }

    pub async fn add_project(&self, project: Project) {
        let mut instance = self.inner.write().await;
        tracing::debug!(project_id = %project.id, instance = %instance.name, "Adding project to instance");
        instance.add_project(project);
    }

    /// Append a service to one of the instance's projects
    pub async fn add_service_to_project(
        &self,
        project_id: Uuid,
        service: Service,
    ) -> ProjectResult<Service> {
        let mut instance = self.inner.write().await;
        let project = instance
            .project_mut(project_id)
            .ok_or_else(|| ProjectError::project_not_found(project_id))?;

        Ok(project.add_service(service).clone())
    }

    /// Mirror a persisted project, keeping its position if already present
    pub async fn put_project(&self, project: Project) {
        self.inner.write().await.put_project(project);
    }

    pub async fn remove_project(&self, id: Uuid) -> Option<Project> {
        self.inner.write().await.remove_project(id)
    }

    /// Snapshot of the projects in insertion order
    pub async fn projects(&self) -> Vec<Project> {
        self.inner.read().await.projects.clone()
    }

    pub async fn project_count(&self) -> usize {
        self.inner.read().await.projects.len()
    }

    pub async fn resource(&self, name: &str) -> Option<SharedResource> {
        self.inner.read().await.resource(name).cloned()
    }

    pub async fn available_resources(&self) -> ResourceCatalog {
        self.inner.read().await.available_resources.clone()
    }

    /// Price every project over `duration` from one consistent snapshot
    pub async fn cost(&self, duration: Duration) -> InstanceCost {
        let instance = self.inner.read().await;
        InstanceCost {
            instance: instance.name.clone(),
            hours: domain_resources::pricing::hours(duration),
            total: instance.total_cost(duration),
            projects: instance
                .projects
                .iter()
                .map(|p| ProjectTotal {
                    project_id: p.id,
                    name: p.name.clone(),
                    cost: p.cost(duration),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_resources::PodResource;

    fn instance() -> Instance {
        Instance::new("test-instance", ResourceCatalog::with_defaults(1.0).unwrap())
    }

    #[test]
    fn test_new_instance_is_empty() {
        let instance = Instance::new("Test Instance", ResourceCatalog::new());

        assert_eq!(instance.name, "Test Instance");
        assert!(instance.projects().is_empty());
        assert!(instance.available_resources().is_empty());
    }

    #[test]
    fn test_add_project_appends_in_order() {
        let mut instance = instance();
        let p1 = Project::new("Project 1");
        let p2 = Project::new("Project 2");
        let p3 = Project::new("Project 3");

        instance.add_project(p1.clone());
        instance.add_project(p2.clone());
        instance.add_project(p3.clone());

        assert_eq!(instance.projects(), &[p1, p2, p3]);
    }

    #[test]
    fn test_catalog_lookup() {
        let instance = instance();
        assert!(instance.resource("Kubernetes Pod").is_some());
        assert!(instance.resource("Lambda").is_none());
    }

    #[test]
    fn test_total_cost() {
        let mut instance = instance();
        let pod = instance.resource("Kubernetes Pod").unwrap().clone();

        let mut project = Project::new("P1");
        project.add_service(Service::new("api", pod.clone()));
        project.add_service(Service::new("worker", pod));
        instance.add_project(project);

        assert_eq!(instance.total_cost(Duration::from_secs(1800)), 1.0);
    }

    #[test]
    fn test_put_project_replaces_in_place() {
        let mut instance = instance();
        let p1 = Project::new("P1");
        let mut p2 = Project::new("P2");
        instance.add_project(p1.clone());
        instance.add_project(p2.clone());

        p2.name = "renamed".to_string();
        instance.put_project(p2.clone());
        let p3 = Project::new("P3");
        instance.put_project(p3.clone());

        assert_eq!(instance.projects(), &[p1, p2, p3]);
    }

    #[test]
    fn test_remove_project() {
        let mut instance = instance();
        let project = Project::new("P1");
        let id = project.id;
        instance.add_project(project);

        assert_eq!(instance.remove_project(id).map(|p| p.id), Some(id));
        assert!(instance.remove_project(id).is_none());
        assert!(instance.projects().is_empty());
    }

    #[tokio::test]
    async fn test_shared_cost_report() {
        let shared = SharedInstance::new(instance());
        let pod = shared.resource("Kubernetes Pod").await.unwrap();
        let mut project = Project::new("P1");
        project.add_service(Service::new("api", pod));
        shared.add_project(project).await;
        shared.add_project(Project::new("empty")).await;

        let report = shared.cost(Duration::from_secs(7200)).await;

        assert_eq!(report.instance, "test-instance");
        assert_eq!(report.hours, 2.0);
        assert_eq!(report.total, 2.0);
        assert_eq!(report.projects.len(), 2);
        assert_eq!(report.projects[1].cost, 0.0);
    }

    #[tokio::test]
    async fn test_shared_add_service_to_unknown_project() {
        let shared = SharedInstance::new(instance());
        let service = Service::new("api", PodResource::setup());

        let result = shared.add_service_to_project(Uuid::now_v7(), service).await;

        assert!(matches!(result, Err(ProjectError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_shared_add_service_to_project() {
        let shared = SharedInstance::new(instance());
        let project = Project::new("P1");
        let project_id = project.id;
        shared.add_project(project).await;

        let added = shared
            .add_service_to_project(project_id, Service::new("S1", PodResource::setup()))
            .await
            .unwrap();

        assert_eq!(added.project_id, Some(project_id));
        let projects = shared.projects().await;
        assert_eq!(projects[0].services, vec![added]);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_add_project_loses_nothing() {
        let shared = SharedInstance::new(instance());

        let handles: Vec<_> = (0..64)
            .map(|i| {
                let shared = shared.clone();
                tokio::spawn(async move {
                    shared.add_project(Project::new(format!("project-{}", i))).await;
                })
            })
            .collect();

        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(shared.project_count().await, 64);
        let mut ids: Vec<Uuid> = shared.projects().await.iter().map(|p| p.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 64);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_add_service_keeps_all_entries() {
        let shared = SharedInstance::new(instance());
        let project = Project::new("P1");
        let project_id = project.id;
        shared.add_project(project).await;

        let handles: Vec<_> = (0..32)
            .map(|i| {
                let shared = shared.clone();
                tokio::spawn(async move {
                    let service = Service::new(format!("svc-{}", i), PodResource::setup());
                    shared.add_service_to_project(project_id, service).await
                })
            })
            .collect();

        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(shared.projects().await[0].services.len(), 32);
    }
}
