//! Catalog use-case services.
//!
//! # Responsibility
//! - Orchestrate validation, entity construction and repository calls.
//! - Shape results into transport-neutral DTOs.
//!
//! # Invariants
//! - Services are the only callers of repositories.
//! - Input is validated before the first repository call; a rejected input
//!   never causes a write.
//! - Repository errors are passed through unchanged, never retried.

use crate::aggregate::game_details::AggregateError;
use crate::model::validation::ValidationError;
use crate::repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod dto;
pub mod game_service;
pub mod genre_service;
pub mod rating_service;
pub mod user_service;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Error returned by every catalog service.
#[derive(Debug)]
pub enum ServiceError {
    /// Input failed field validation before reaching storage.
    Validation(ValidationError),
    /// Canonical repository error, unchanged.
    Repo(RepoError),
    /// Rating business rule rejected the change.
    Rating(AggregateError),
    /// Credentials did not match a stored user.
    Unauthorized,
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::Rating(err) => write!(f, "{err}"),
            Self::Unauthorized => write!(f, "unauthorized"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
            Self::Rating(err) => Some(err),
            Self::Unauthorized => None,
        }
    }
}

impl From<ValidationError> for ServiceError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Validation(err) => Self::Validation(err),
            other => Self::Repo(other),
        }
    }
}

impl From<AggregateError> for ServiceError {
    fn from(value: AggregateError) -> Self {
        Self::Rating(value)
    }
}
