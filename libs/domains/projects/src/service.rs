use observability::{CostMetrics, InventoryMetrics, RepositoryOperation};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use uuid::Uuid;
use validator::Validate;

use crate::error::{EntityKind, ProjectError, ProjectResult};
use crate::instance::SharedInstance;
use crate::models::{
    CreateProject, CreateService, InstanceCost, Project, ProjectCost, Service, ServiceCost,
    UpdateProject,
};
use crate::repository::{ProjectRepository, ServiceRepository};

/// Record the outcome of a repository call and pass the result through
fn observe<T>(
    entity: EntityKind,
    operation: RepositoryOperation,
    result: ProjectResult<T>,
) -> ProjectResult<T> {
    InventoryMetrics::record_repository_operation(entity.as_ref(), operation, result.is_ok());
    result
}

/// Service counts per resource type. Every catalog entry is present, so a
/// resource whose last service went away reports zero.
fn services_per_resource<'a>(
    catalog: impl IntoIterator<Item = &'a str>,
    projects: &'a [Project],
) -> BTreeMap<&'a str, usize> {
    let mut counts: BTreeMap<&str, usize> = catalog.into_iter().map(|name| (name, 0)).collect();
    for service in projects.iter().flat_map(|p| &p.services) {
        *counts.entry(service.resource.name()).or_default() += 1;
    }
    counts
}

/// Service layer for Project and Service business logic.
///
/// Writes go through one lock held from the read of a project to the write
/// of its new state, so concurrent changes to the same project are applied
/// one after the other. Every persisted change is mirrored into the
/// [`SharedInstance`].
pub struct ProjectService<P: ProjectRepository, S: ServiceRepository> {
    instance: SharedInstance,
    projects: Arc<P>,
    services: Arc<S>,
    writes: Arc<Mutex<()>>,
}

impl<P: ProjectRepository, S: ServiceRepository> Clone for ProjectService<P, S> {
    fn clone(&self) -> Self {
        Self {
            instance: self.instance.clone(),
            projects: Arc::clone(&self.projects),
            services: Arc::clone(&self.services),
            writes: Arc::clone(&self.writes),
        }
    }
}

impl<P: ProjectRepository, S: ServiceRepository> ProjectService<P, S> {
    pub fn new(instance: SharedInstance, projects: P, services: S) -> Self {
        Self {
            instance,
            projects: Arc::new(projects),
            services: Arc::new(services),
            writes: Arc::new(Mutex::new(())),
        }
    }

    /// Create a new project with validation
    pub async fn create_project(&self, input: CreateProject) -> ProjectResult<Project> {
        input
            .validate()
            .map_err(|e| ProjectError::Validation(e.to_string()))?;

        let project = Project::new(input.name);

        let _guard = self.writes.lock().await;
        observe(
            EntityKind::Project,
            RepositoryOperation::Create,
            self.projects.create(project.clone()).await,
        )?;
        self.instance.add_project(project.clone()).await;

        let instance_projects = self.instance.project_count().await;
        tracing::info!(
            project_id = %project.id,
            name = %project.name,
            instance_projects = instance_projects,
            "Project created"
        );
        Ok(project)
    }

    /// Get a project by ID
    pub async fn get_project(&self, id: Uuid) -> ProjectResult<Project> {
        tracing::debug!(project_id = %id, "Fetching project");
        observe(
            EntityKind::Project,
            RepositoryOperation::Get,
            self.projects.get(id).await,
        )
    }

    /// List all projects
    pub async fn list_projects(&self) -> ProjectResult<Vec<Project>> {
        let projects = observe(
            EntityKind::Project,
            RepositoryOperation::List,
            self.projects.list().await,
        )?;

        let catalog = self.instance.available_resources().await;
        InventoryMetrics::set_projects_count(projects.len());
        for (resource, count) in services_per_resource(catalog.names(), &projects) {
            InventoryMetrics::set_services_count(resource, count);
        }

        tracing::debug!(count = projects.len(), "Listed projects");
        Ok(projects)
    }

    /// Rename a project. An empty update leaves it unchanged.
    pub async fn rename_project(&self, id: Uuid, input: UpdateProject) -> ProjectResult<Project> {
        input
            .validate()
            .map_err(|e| ProjectError::Validation(e.to_string()))?;

        let _guard = self.writes.lock().await;
        let mut project = self.get_project(id).await?;

        let Some(name) = input.name else {
            return Ok(project);
        };

        project.name = name;
        observe(
            EntityKind::Project,
            RepositoryOperation::Update,
            self.projects.update(project.clone()).await,
        )?;
        self.instance.put_project(project.clone()).await;

        tracing::info!(project_id = %id, name = %project.name, "Project renamed");
        Ok(project)
    }

    /// Delete a project together with its services
    pub async fn delete_project(&self, id: Uuid) -> ProjectResult<()> {
        let _guard = self.writes.lock().await;

        // Fail on a missing project before touching its services
        self.get_project(id).await?;

        let services = self.list_services(id).await?;
        for service in &services {
            observe(
                EntityKind::Service,
                RepositoryOperation::Delete,
                self.services.delete(service.id).await,
            )?;
        }

        observe(
            EntityKind::Project,
            RepositoryOperation::Delete,
            self.projects.delete(id).await,
        )?;
        self.instance.remove_project(id).await;

        tracing::info!(project_id = %id, services = services.len(), "Project deleted");
        Ok(())
    }

    /// Add a service backed by a catalog resource to a project
    pub async fn add_service(
        &self,
        project_id: Uuid,
        input: CreateService,
    ) -> ProjectResult<Service> {
        input
            .validate()
            .map_err(|e| ProjectError::Validation(e.to_string()))?;

        let resource = self.instance.resource(&input.resource).await.ok_or_else(|| {
            ProjectError::Validation(format!("unknown resource type '{}'", input.resource))
        })?;

        let _guard = self.writes.lock().await;
        let mut project = self.get_project(project_id).await?;
        let service = project.add_service(Service::new(input.name, resource)).clone();

        observe(
            EntityKind::Service,
            RepositoryOperation::Create,
            self.services.create(service.clone()).await,
        )?;

        let updated = observe(
            EntityKind::Project,
            RepositoryOperation::Update,
            self.projects.update(project.clone()).await,
        );

        if let Err(e) = updated {
            // Roll back so the service is not left without its project
            if let Err(cleanup) = self.services.delete(service.id).await {
                tracing::warn!(
                    service_id = %service.id,
                    error = %cleanup,
                    "Failed to remove service after project update failed"
                );
            }
            return Err(e);
        }

        // Projects stored before this service existed are mirrored whole
        if self
            .instance
            .add_service_to_project(project_id, service.clone())
            .await
            .is_err()
        {
            self.instance.put_project(project).await;
        }

        tracing::info!(
            project_id = %project_id,
            service_id = %service.id,
            resource = service.resource.name(),
            "Service added"
        );
        Ok(service)
    }

    /// Services owned by a project, in creation order
    pub async fn list_services(&self, project_id: Uuid) -> ProjectResult<Vec<Service>> {
        observe(
            EntityKind::Service,
            RepositoryOperation::List,
            self.services.list_by_project(project_id).await,
        )
    }

    /// Price every service of a project over `duration`
    pub async fn project_cost(
        &self,
        project_id: Uuid,
        duration: Duration,
    ) -> ProjectResult<ProjectCost> {
        let project = self.get_project(project_id).await?;
        let hours = domain_resources::pricing::hours(duration);

        let services: Vec<ServiceCost> = project
            .services
            .iter()
            .map(|service| {
                let cost = service.price(duration);
                CostMetrics::record_price_computed(service.resource.name(), hours, cost);
                ServiceCost {
                    service_id: service.id,
                    name: service.name.clone(),
                    resource: service.resource.name().to_string(),
                    cost,
                }
            })
            .collect();
        let total = services.iter().map(|s| s.cost).sum();

        CostMetrics::record_project_cost(total);

        Ok(ProjectCost {
            project_id,
            hours,
            total,
            services,
        })
    }

    /// Price every project on the instance over `duration`
    pub async fn instance_cost(&self, duration: Duration) -> InstanceCost {
        let report = self.instance.cost(duration).await;
        CostMetrics::set_instance_cost(&report.instance, report.total);

        tracing::debug!(
            instance = %report.instance,
            projects = report.projects.len(),
            total = report.total,
            "Computed instance cost"
        );
        report
    }
}
