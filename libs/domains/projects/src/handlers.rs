use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use domain_resources::ResourceDescriptor;
use std::sync::Arc;
use utoipa::OpenApi;
use uuid::Uuid;

use crate::error::{ProjectError, ProjectResult};
use crate::instance::SharedInstance;
use crate::models::{
    CostQuery, CreateProject, CreateService, InstanceCost, ProjectCost, ProjectResponse,
    ProjectTotal, ServiceCost, ServiceResponse, UpdateProject,
};
use crate::repository::{ProjectRepository, ServiceRepository};
use crate::service::ProjectService;

pub const PROJECTS_TAG: &str = "projects";
pub const RESOURCES_TAG: &str = "resources";

/// OpenAPI documentation for the Projects API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_projects,
        create_project,
        get_project,
        update_project,
        delete_project,
        list_services,
        add_service,
        project_cost,
        instance_cost,
    ),
    components(schemas(
        ProjectResponse,
        ServiceResponse,
        ResourceDescriptor,
        CreateProject,
        UpdateProject,
        CreateService,
        ProjectCost,
        ServiceCost,
        InstanceCost,
        ProjectTotal,
    )),
    tags(
        (name = PROJECTS_TAG, description = "Project and service inventory endpoints")
    )
)]
pub struct ApiDoc;

/// OpenAPI documentation for the resource catalog
#[derive(OpenApi)]
#[openapi(
    paths(list_resources),
    components(schemas(ResourceDescriptor)),
    tags(
        (name = RESOURCES_TAG, description = "Provisionable resource types")
    )
)]
pub struct CatalogApiDoc;

type SharedService<P, S> = Arc<ProjectService<P, S>>;

/// Create the project router with all HTTP endpoints
pub fn router<P, S>(service: ProjectService<P, S>) -> Router
where
    P: ProjectRepository + 'static,
    S: ServiceRepository + 'static,
{
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_projects).post(create_project))
        .route("/cost", get(instance_cost))
        .route(
            "/{id}",
            get(get_project).put(update_project).delete(delete_project),
        )
        .route("/{id}/services", get(list_services).post(add_service))
        .route("/{id}/cost", get(project_cost))
        .with_state(shared_service)
}

/// Create the read-only resource catalog router
pub fn catalog_router(instance: SharedInstance) -> Router {
    Router::new()
        .route("/", get(list_resources))
        .with_state(instance)
}

/// List all projects
#[utoipa::path(
    get,
    path = "",
    tag = PROJECTS_TAG,
    responses(
        (status = 200, description = "List of projects", body = Vec<ProjectResponse>),
        (status = 500, description = "Repository failure")
    )
)]
async fn list_projects<P: ProjectRepository, S: ServiceRepository>(
    State(service): State<SharedService<P, S>>,
) -> ProjectResult<Json<Vec<ProjectResponse>>> {
    let projects = service.list_projects().await?;
    Ok(Json(projects.iter().map(ProjectResponse::from).collect()))
}

/// Create a new project
#[utoipa::path(
    post,
    path = "",
    tag = PROJECTS_TAG,
    request_body = CreateProject,
    responses(
        (status = 201, description = "Project created successfully", body = ProjectResponse),
        (status = 400, description = "Invalid project name"),
        (status = 409, description = "Project already exists"),
        (status = 500, description = "Repository failure")
    )
)]
async fn create_project<P: ProjectRepository, S: ServiceRepository>(
    State(service): State<SharedService<P, S>>,
    Json(input): Json<CreateProject>,
) -> ProjectResult<impl IntoResponse> {
    let project = service.create_project(input).await?;
    Ok((StatusCode::CREATED, Json(ProjectResponse::from(&project))))
}

/// Get a project by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = PROJECTS_TAG,
    params(
        ("id" = Uuid, Path, description = "Project ID")
    ),
    responses(
        (status = 200, description = "Project found", body = ProjectResponse),
        (status = 404, description = "Project not found"),
        (status = 500, description = "Repository failure")
    )
)]
async fn get_project<P: ProjectRepository, S: ServiceRepository>(
    State(service): State<SharedService<P, S>>,
    Path(id): Path<Uuid>,
) -> ProjectResult<Json<ProjectResponse>> {
    let project = service.get_project(id).await?;
    Ok(Json(ProjectResponse::from(&project)))
}

/// Rename a project
#[utoipa::path(
    put,
    path = "/{id}",
    tag = PROJECTS_TAG,
    params(
        ("id" = Uuid, Path, description = "Project ID")
    ),
    request_body = UpdateProject,
    responses(
        (status = 200, description = "Project updated successfully", body = ProjectResponse),
        (status = 400, description = "Invalid project name"),
        (status = 404, description = "Project not found"),
        (status = 500, description = "Repository failure")
    )
)]
async fn update_project<P: ProjectRepository, S: ServiceRepository>(
    State(service): State<SharedService<P, S>>,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateProject>,
) -> ProjectResult<Json<ProjectResponse>> {
    let project = service.rename_project(id, input).await?;
    Ok(Json(ProjectResponse::from(&project)))
}

/// Delete a project and its services
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = PROJECTS_TAG,
    params(
        ("id" = Uuid, Path, description = "Project ID")
    ),
    responses(
        (status = 204, description = "Project deleted successfully"),
        (status = 404, description = "Project not found"),
        (status = 500, description = "Repository failure")
    )
)]
async fn delete_project<P: ProjectRepository, S: ServiceRepository>(
    State(service): State<SharedService<P, S>>,
    Path(id): Path<Uuid>,
) -> ProjectResult<StatusCode> {
    service.delete_project(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// List the services of a project
#[utoipa::path(
    get,
    path = "/{id}/services",
    tag = PROJECTS_TAG,
    params(
        ("id" = Uuid, Path, description = "Project ID")
    ),
    responses(
        (status = 200, description = "Services of the project", body = Vec<ServiceResponse>),
        (status = 404, description = "Project not found"),
        (status = 500, description = "Repository failure")
    )
)]
async fn list_services<P: ProjectRepository, S: ServiceRepository>(
    State(service): State<SharedService<P, S>>,
    Path(id): Path<Uuid>,
) -> ProjectResult<Json<Vec<ServiceResponse>>> {
    // 404 for unknown projects instead of an empty list
    service.get_project(id).await?;

    let services = service.list_services(id).await?;
    Ok(Json(services.iter().map(ServiceResponse::from).collect()))
}

/// Add a service backed by a catalog resource
#[utoipa::path(
    post,
    path = "/{id}/services",
    tag = PROJECTS_TAG,
    params(
        ("id" = Uuid, Path, description = "Project ID")
    ),
    request_body = CreateService,
    responses(
        (status = 201, description = "Service added", body = ServiceResponse),
        (status = 400, description = "Invalid name or unknown resource type"),
        (status = 404, description = "Project not found"),
        (status = 500, description = "Repository failure")
    )
)]
async fn add_service<P: ProjectRepository, S: ServiceRepository>(
    State(service): State<SharedService<P, S>>,
    Path(id): Path<Uuid>,
    Json(input): Json<CreateService>,
) -> ProjectResult<impl IntoResponse> {
    let added = service.add_service(id, input).await?;
    Ok((StatusCode::CREATED, Json(ServiceResponse::from(&added))))
}

/// Price a project over a billing window
#[utoipa::path(
    get,
    path = "/{id}/cost",
    tag = PROJECTS_TAG,
    params(
        ("id" = Uuid, Path, description = "Project ID"),
        CostQuery
    ),
    responses(
        (status = 200, description = "Cost breakdown", body = ProjectCost),
        (status = 400, description = "Invalid billing window"),
        (status = 404, description = "Project not found"),
        (status = 500, description = "Repository failure")
    )
)]
async fn project_cost<P: ProjectRepository, S: ServiceRepository>(
    State(service): State<SharedService<P, S>>,
    Path(id): Path<Uuid>,
    Query(query): Query<CostQuery>,
) -> ProjectResult<Json<ProjectCost>> {
    let cost = service.project_cost(id, billing_window(&query)?).await?;
    Ok(Json(cost))
}

/// Price every project on the instance over a billing window
#[utoipa::path(
    get,
    path = "/cost",
    tag = PROJECTS_TAG,
    params(CostQuery),
    responses(
        (status = 200, description = "Cost of every project", body = InstanceCost),
        (status = 400, description = "Invalid billing window")
    )
)]
async fn instance_cost<P: ProjectRepository, S: ServiceRepository>(
    State(service): State<SharedService<P, S>>,
    Query(query): Query<CostQuery>,
) -> ProjectResult<Json<InstanceCost>> {
    let report = service.instance_cost(billing_window(&query)?).await;
    Ok(Json(report))
}

fn billing_window(query: &CostQuery) -> ProjectResult<std::time::Duration> {
    query.duration().ok_or_else(|| {
        ProjectError::Validation(format!("hours must be a non-negative number, got {}", query.hours))
    })
}

/// List the resource types the instance can provision
#[utoipa::path(
    get,
    path = "",
    tag = RESOURCES_TAG,
    responses(
        (status = 200, description = "Resource catalog", body = Vec<ResourceDescriptor>)
    )
)]
async fn list_resources(State(instance): State<SharedInstance>) -> Json<Vec<ResourceDescriptor>> {
    Json(instance.available_resources().await.descriptors())
}
