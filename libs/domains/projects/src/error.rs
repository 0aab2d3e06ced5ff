use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use domain_resources::ResourceError;
use serde_json::json;
use strum::{AsRefStr, Display};
use thiserror::Error;
use uuid::Uuid;

/// Aggregate a repository error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum EntityKind {
    Project,
    Service,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProjectError {
    #[error("{entity} with ID {id} already exists")]
    AlreadyExists { entity: EntityKind, id: Uuid },

    #[error("{entity} with ID {id} not found")]
    NotFound { entity: EntityKind, id: Uuid },

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error(transparent)]
    InvalidConfiguration(#[from] ResourceError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ProjectError {
    pub fn project_not_found(id: Uuid) -> Self {
        ProjectError::NotFound {
            entity: EntityKind::Project,
            id,
        }
    }

    pub fn service_not_found(id: Uuid) -> Self {
        ProjectError::NotFound {
            entity: EntityKind::Service,
            id,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ProjectError::NotFound { .. })
    }
}

pub type ProjectResult<T> = Result<T, ProjectError>;

impl IntoResponse for ProjectError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::AlreadyExists { .. } => StatusCode::CONFLICT,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Validation(_) | Self::InvalidConfiguration(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        let body = Json(json!({
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}
