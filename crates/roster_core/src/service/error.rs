//! Errors surfaced by entity services to the boundary layer.

use crate::repo::team_repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Failure kinds returned by team and player services.
#[derive(Debug)]
pub enum ServiceError {
    /// Input violated one or more rules; nothing was persisted.
    Validation {
        entity: &'static str,
        errors: Vec<String>,
    },
    /// No entity with the identifier exists in storage.
    NotFound { entity: &'static str, id: i32 },
    /// Persistence-layer failure.
    Storage(RepoError),
}

impl ServiceError {
    pub(crate) fn validation(entity: &'static str, errors: Vec<String>) -> Self {
        Self::Validation { entity, errors }
    }

    pub(crate) fn not_found(entity: &'static str, id: i32) -> Self {
        Self::NotFound { entity, id }
    }

    /// Entity type name for validation and not-found errors.
    pub fn entity(&self) -> Option<&'static str> {
        match self {
            Self::Validation { entity, .. } | Self::NotFound { entity, .. } => Some(*entity),
            Self::Storage(_) => None,
        }
    }

    /// Validation messages; empty for other kinds.
    pub fn validation_errors(&self) -> &[String] {
        match self {
            Self::Validation { errors, .. } => errors,
            _ => &[],
        }
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation { entity, errors } => {
                write!(f, "{entity} validation failed: {}", errors.join("; "))
            }
            Self::NotFound { entity, id } => {
                write!(f, "{entity} not found with identifier: {id}")
            }
            Self::Storage(err) => write!(f, "storage error: {err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        Self::Storage(value)
    }
}
