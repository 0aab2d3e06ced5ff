use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ResourceError {
    #[error("Invalid resource configuration: {0}")]
    InvalidConfiguration(String),
}

pub type ResourceResult<T> = Result<T, ResourceError>;
