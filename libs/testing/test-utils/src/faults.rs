use async_trait::async_trait;
use domain_projects::{
    InMemoryProjectRepository, InMemoryServiceRepository, Project, ProjectError, ProjectRepository,
    ProjectResult, Service, ServiceRepository,
};
use std::sync::{Arc, Mutex, MutexGuard};
use uuid::Uuid;

/// Repository operations that can be made to fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    Get,
    Update,
    Delete,
    List,
}

/// Armed errors, one slot per operation
#[derive(Debug, Default)]
struct Faults {
    create: Option<ProjectError>,
    get: Option<ProjectError>,
    update: Option<ProjectError>,
    delete: Option<ProjectError>,
    list: Option<ProjectError>,
}

impl Faults {
    fn slot(&mut self, operation: Operation) -> &mut Option<ProjectError> {
        match operation {
            Operation::Create => &mut self.create,
            Operation::Get => &mut self.get,
            Operation::Update => &mut self.update,
            Operation::Delete => &mut self.delete,
            Operation::List => &mut self.list,
        }
    }
}

/// Shared fault table. Clones of a wrapper arm the same slots.
#[derive(Debug, Clone, Default)]
struct FaultTable {
    faults: Arc<Mutex<Faults>>,
}

impl FaultTable {
    fn lock(&self) -> MutexGuard<'_, Faults> {
        // A panicking test must not poison the double for the others
        self.faults.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn set(&self, operation: Operation, error: ProjectError) {
        *self.lock().slot(operation) = Some(error);
    }

    fn clear(&self) {
        *self.lock() = Faults::default();
    }

    fn check(&self, operation: Operation) -> ProjectResult<()> {
        match self.lock().slot(operation).clone() {
            Some(error) => {
                tracing::debug!(?operation, %error, "Returning injected error");
                Err(error)
            }
            None => Ok(()),
        }
    }
}

macro_rules! fault_setters {
    () => {
        /// Make every `create` call fail with `error` until cleared
        pub fn fail_create(&self, error: ProjectError) {
            self.faults.set(Operation::Create, error);
        }

        /// Make every `get` call fail with `error` until cleared
        pub fn fail_get(&self, error: ProjectError) {
            self.faults.set(Operation::Get, error);
        }

        /// Make every `update` call fail with `error` until cleared
        pub fn fail_update(&self, error: ProjectError) {
            self.faults.set(Operation::Update, error);
        }

        /// Make every `delete` call fail with `error` until cleared
        pub fn fail_delete(&self, error: ProjectError) {
            self.faults.set(Operation::Delete, error);
        }

        /// Make every listing call fail with `error` until cleared
        pub fn fail_list(&self, error: ProjectError) {
            self.faults.set(Operation::List, error);
        }

        /// Disarm every injected error
        pub fn clear(&self) {
            self.faults.clear();
        }

        /// The wrapped repository, bypassing injection
        pub fn inner(&self) -> &R {
            &self.inner
        }
    };
}

/// Project repository wrapper returning armed errors instead of calling
/// the wrapped implementation
#[derive(Debug, Clone, Default)]
pub struct FaultInjectingProjectRepository<R = InMemoryProjectRepository> {
    inner: R,
    faults: FaultTable,
}

impl<R: ProjectRepository> FaultInjectingProjectRepository<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            faults: FaultTable::default(),
        }
    }

    fault_setters!();
}

#[async_trait]
impl<R: ProjectRepository> ProjectRepository for FaultInjectingProjectRepository<R> {
    async fn create(&self, project: Project) -> ProjectResult<()> {
        self.faults.check(Operation::Create)?;
        self.inner.create(project).await
    }

    async fn get(&self, id: Uuid) -> ProjectResult<Project> {
        self.faults.check(Operation::Get)?;
        self.inner.get(id).await
    }

    async fn update(&self, project: Project) -> ProjectResult<()> {
        self.faults.check(Operation::Update)?;
        self.inner.update(project).await
    }

    async fn delete(&self, id: Uuid) -> ProjectResult<()> {
        self.faults.check(Operation::Delete)?;
        self.inner.delete(id).await
    }

    async fn list(&self) -> ProjectResult<Vec<Project>> {
        self.faults.check(Operation::List)?;
        self.inner.list().await
    }
}

/// Service repository wrapper returning armed errors instead of calling
/// the wrapped implementation
#[derive(Debug, Clone, Default)]
pub struct FaultInjectingServiceRepository<R = InMemoryServiceRepository> {
    inner: R,
    faults: FaultTable,
}

impl<R: ServiceRepository> FaultInjectingServiceRepository<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            faults: FaultTable::default(),
        }
    }

    fault_setters!();
}

#[async_trait]
impl<R: ServiceRepository> ServiceRepository for FaultInjectingServiceRepository<R> {
    async fn create(&self, service: Service) -> ProjectResult<()> {
        self.faults.check(Operation::Create)?;
        self.inner.create(service).await
    }

    async fn get(&self, id: Uuid) -> ProjectResult<Service> {
        self.faults.check(Operation::Get)?;
        self.inner.get(id).await
    }

    async fn update(&self, service: Service) -> ProjectResult<()> {
        self.faults.check(Operation::Update)?;
        self.inner.update(service).await
    }

    async fn delete(&self, id: Uuid) -> ProjectResult<()> {
        self.faults.check(Operation::Delete)?;
        self.inner.delete(id).await
    }

    async fn list_by_project(&self, project_id: Uuid) -> ProjectResult<Vec<Service>> {
        self.faults.check(Operation::List)?;
        self.inner.list_by_project(project_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_injected_error_skips_inner() {
        let repo = FaultInjectingProjectRepository::new(InMemoryProjectRepository::new());
        let project = Project::new("P1");

        repo.fail_create(ProjectError::Internal("disk full".to_string()));
        let result = repo.create(project.clone()).await;

        assert_eq!(result, Err(ProjectError::Internal("disk full".to_string())));
        assert!(repo.inner().list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_injection_is_per_operation_and_sticky() {
        let repo = FaultInjectingProjectRepository::new(InMemoryProjectRepository::new());
        let project = Project::new("P1");
        repo.create(project.clone()).await.unwrap();

        repo.fail_list(ProjectError::Internal("timeout".to_string()));

        assert!(repo.get(project.id).await.is_ok());
        assert!(repo.list().await.is_err());
        assert!(repo.list().await.is_err());
    }

    #[tokio::test]
    async fn test_clear_restores_real_behavior() {
        let repo = FaultInjectingServiceRepository::new(InMemoryServiceRepository::new());
        let id = Uuid::now_v7();

        repo.fail_get(ProjectError::Internal("boom".to_string()));
        repo.fail_delete(ProjectError::Internal("boom".to_string()));
        repo.clear();

        assert_eq!(repo.get(id).await, Err(ProjectError::service_not_found(id)));
        assert_eq!(repo.delete(id).await, Err(ProjectError::service_not_found(id)));
    }

    #[tokio::test]
    async fn test_clones_share_faults() {
        let repo = FaultInjectingServiceRepository::<InMemoryServiceRepository>::default();
        let clone = repo.clone();

        clone.fail_list(ProjectError::Internal("down".to_string()));

        assert!(repo.list_by_project(Uuid::now_v7()).await.is_err());
    }
}
