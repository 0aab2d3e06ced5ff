use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{EntityKind, ProjectError, ProjectResult};
use crate::models::{Project, Service};

/// Repository trait for Project persistence
///
/// This is the contract a durable store must satisfy. Implementations are
/// shared between request handlers and must be safe for concurrent use.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Store a new project; `AlreadyExists` if the ID is taken
    async fn create(&self, project: Project) -> ProjectResult<()>;

    /// Get a project by ID; `NotFound` if absent
    async fn get(&self, id: Uuid) -> ProjectResult<Project>;

    /// Replace a stored project wholesale; `NotFound` if absent
    async fn update(&self, project: Project) -> ProjectResult<()>;

    /// Delete a project by ID; `NotFound` if absent
    async fn delete(&self, id: Uuid) -> ProjectResult<()>;

    /// All projects, possibly empty
    async fn list(&self) -> ProjectResult<Vec<Project>>;
}

/// Repository trait for Service persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ServiceRepository: Send + Sync {
    /// Store a new service; `AlreadyExists` if the ID is taken
    async fn create(&self, service: Service) -> ProjectResult<()>;

    /// Get a service by ID; `NotFound` if absent
    async fn get(&self, id: Uuid) -> ProjectResult<Service>;

    /// Replace a stored service wholesale; `NotFound` if absent
    async fn update(&self, service: Service) -> ProjectResult<()>;

    /// Delete a service by ID; `NotFound` if absent
    async fn delete(&self, id: Uuid) -> ProjectResult<()>;

    /// Services owned by `project_id`, possibly empty
    async fn list_by_project(&self, project_id: Uuid) -> ProjectResult<Vec<Service>>;
}

/// In-memory implementation of ProjectRepository (default store and tests)
///
/// One read/write lock guards the whole map: reads run concurrently, writes
/// are exclusive. Clones share the same storage.
#[derive(Debug, Default, Clone)]
pub struct InMemoryProjectRepository {
    projects: Arc<RwLock<HashMap<Uuid, Project>>>,
}

impl InMemoryProjectRepository {
    pub fn new() -> Self {
        Self {
            projects: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl ProjectRepository for InMemoryProjectRepository {
    async fn create(&self, project: Project) -> ProjectResult<()> {
        let mut projects = self.projects.write().await;

        if projects.contains_key(&project.id) {
            return Err(ProjectError::AlreadyExists {
                entity: EntityKind::Project,
                id: project.id,
            });
        }

        tracing::info!(project_id = %project.id, "Created project");
        projects.insert(project.id, project);
        Ok(())
    }

    async fn get(&self, id: Uuid) -> ProjectResult<Project> {
        let projects = self.projects.read().await;
        projects
            .get(&id)
            .cloned()
            .ok_or_else(|| ProjectError::project_not_found(id))
    }

    async fn update(&self, project: Project) -> ProjectResult<()> {
        let mut projects = self.projects.write().await;

        let stored = projects
            .get_mut(&project.id)
            .ok_or_else(|| ProjectError::project_not_found(project.id))?;
        *stored = project;

        tracing::info!(project_id = %stored.id, "Updated project");
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> ProjectResult<()> {
        let mut projects = self.projects.write().await;

        if projects.remove(&id).is_none() {
            return Err(ProjectError::project_not_found(id));
        }

        tracing::info!(project_id = %id, "Deleted project");
        Ok(())
    }

    async fn list(&self) -> ProjectResult<Vec<Project>> {
        let projects = self.projects.read().await;

        // IDs are UUIDv7, so this is creation order
        let mut result: Vec<Project> = projects.values().cloned().collect();
        result.sort_by_key(|p| p.id);

        Ok(result)
    }
}

/// In-memory implementation of ServiceRepository (default store and tests)
#[derive(Debug, Default, Clone)]
pub struct InMemoryServiceRepository {
    services: Arc<RwLock<HashMap<Uuid, Service>>>,
}

impl InMemoryServiceRepository {
    pub fn new() -> Self {
        Self {
            services: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl ServiceRepository for InMemoryServiceRepository {
    async fn create(&self, service: Service) -> ProjectResult<()> {
        let mut services = self.services.write().await;

        if services.contains_key(&service.id) {
            return Err(ProjectError::AlreadyExists {
                entity: EntityKind::Service,
                id: service.id,
            });
        }

        tracing::info!(
            service_id = %service.id,
            resource = service.resource.name(),
            "Created service"
        );
        services.insert(service.id, service);
        Ok(())
    }

    async fn get(&self, id: Uuid) -> ProjectResult<Service> {
        let services = self.services.read().await;
        services
            .get(&id)
            .cloned()
            .ok_or_else(|| ProjectError::service_not_found(id))
    }

    async fn update(&self, service: Service) -> ProjectResult<()> {
        let mut services = self.services.write().await;

        let stored = services
            .get_mut(&service.id)
            .ok_or_else(|| ProjectError::service_not_found(service.id))?;
        *stored = service;

        tracing::info!(service_id = %stored.id, "Updated service");
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> ProjectResult<()> {
        let mut services = self.services.write().await;

        if services.remove(&id).is_none() {
            return Err(ProjectError::service_not_found(id));
        }

        tracing::info!(service_id = %id, "Deleted service");
        Ok(())
    }

    async fn list_by_project(&self, project_id: Uuid) -> ProjectResult<Vec<Service>> {
        let services = self.services.read().await;

        let mut result: Vec<Service> = services
            .values()
            .filter(|s| s.project_id == Some(project_id))
            .cloned()
            .collect();
        result.sort_by_key(|s| s.id);

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_resources::PodResource;

    fn service_in(project: &mut Project, name: &str) -> Service {
        project.add_service(Service::new(name, PodResource::setup())).clone()
    }

    #[tokio::test]
    async fn test_create_and_get_project() {
        let repo = InMemoryProjectRepository::new();
        let project = Project::new("test-project");

        repo.create(project.clone()).await.unwrap();

        let fetched = repo.get(project.id).await.unwrap();
        assert_eq!(fetched, project);
    }

    #[tokio::test]
    async fn test_duplicate_id_rejected() {
        let repo = InMemoryProjectRepository::new();
        let project = Project::new("test-project");

        repo.create(project.clone()).await.unwrap();
        let result = repo.create(project.clone()).await;

        assert_eq!(
            result,
            Err(ProjectError::AlreadyExists {
                entity: EntityKind::Project,
                id: project.id
            })
        );
    }

    #[tokio::test]
    async fn test_get_missing_project() {
        let repo = InMemoryProjectRepository::new();
        let id = Uuid::now_v7();

        assert_eq!(repo.get(id).await, Err(ProjectError::project_not_found(id)));
    }

    #[tokio::test]
    async fn test_update_replaces_wholesale() {
        let repo = InMemoryProjectRepository::new();
        let mut project = Project::new("original");
        repo.create(project.clone()).await.unwrap();

        project.name = "updated-name".to_string();
        service_in(&mut project, "api");
        repo.update(project.clone()).await.unwrap();

        let fetched = repo.get(project.id).await.unwrap();
        assert_eq!(fetched.name, "updated-name");
        assert_eq!(fetched.services.len(), 1);
    }

    #[tokio::test]
    async fn test_update_missing_project() {
        let repo = InMemoryProjectRepository::new();
        let project = Project::new("ghost");

        let result = repo.update(project.clone()).await;

        assert_eq!(result, Err(ProjectError::project_not_found(project.id)));
        assert!(repo.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_then_get() {
        let repo = InMemoryProjectRepository::new();
        let project = Project::new("doomed");
        repo.create(project.clone()).await.unwrap();

        repo.delete(project.id).await.unwrap();

        assert!(repo.get(project.id).await.unwrap_err().is_not_found());
        assert!(repo.delete(project.id).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_list_empty_and_ordered() {
        let repo = InMemoryProjectRepository::new();
        assert!(repo.list().await.unwrap().is_empty());

        let first = Project::new("first");
        let second = Project::new("second");
        // Insert out of order; listing follows creation order of the IDs
        repo.create(second.clone()).await.unwrap();
        repo.create(first.clone()).await.unwrap();

        let ids: Vec<Uuid> = repo.list().await.unwrap().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![first.id, second.id]);
    }

    #[tokio::test]
    async fn test_clones_share_storage() {
        let repo = InMemoryProjectRepository::new();
        let clone = repo.clone();
        let project = Project::new("shared");

        clone.create(project.clone()).await.unwrap();

        assert!(repo.get(project.id).await.is_ok());
    }

    #[tokio::test]
    async fn test_service_crud() {
        let repo = InMemoryServiceRepository::new();
        let mut project = Project::new("P1");
        let mut service = service_in(&mut project, "api");

        repo.create(service.clone()).await.unwrap();
        assert_eq!(repo.get(service.id).await.unwrap(), service);
        assert!(matches!(
            repo.create(service.clone()).await,
            Err(ProjectError::AlreadyExists {
                entity: EntityKind::Service,
                ..
            })
        ));

        service.rename("gateway");
        repo.update(service.clone()).await.unwrap();
        assert_eq!(repo.get(service.id).await.unwrap().name, "gateway");

        repo.delete(service.id).await.unwrap();
        assert_eq!(
            repo.get(service.id).await,
            Err(ProjectError::service_not_found(service.id))
        );
    }

    #[tokio::test]
    async fn test_list_by_project_filters_owner() {
        let repo = InMemoryServiceRepository::new();
        let mut p1 = Project::new("P1");
        let mut p2 = Project::new("P2");

        let a = service_in(&mut p1, "a");
        let b = service_in(&mut p1, "b");
        let c = service_in(&mut p2, "c");
        let orphan = Service::new("orphan", PodResource::setup());

        for service in [c, b.clone(), a.clone(), orphan] {
            repo.create(service).await.unwrap();
        }

        let listed = repo.list_by_project(p1.id).await.unwrap();
        assert_eq!(listed, vec![a, b]);
        assert!(repo.list_by_project(Uuid::now_v7()).await.unwrap().is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_creates() {
        let repo = InMemoryProjectRepository::new();

        let handles: Vec<_> = (0..100)
            .map(|i| {
                let repo = repo.clone();
                tokio::spawn(async move { repo.create(Project::new(format!("p{}", i))).await })
            })
            .collect();

        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(repo.list().await.unwrap().len(), 100);
    }
}
