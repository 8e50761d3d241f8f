//! # Service Errors

use thiserror::Error;

use crate::store::StoreError;

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service errors
///
/// A missing student, a missing grade and an unrecognized grade type all
/// surface as `NotFound`.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Student or Grade was not found")]
    NotFound,

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<sqlx::Error> for ServiceError {
    fn from(err: sqlx::Error) -> Self {
        ServiceError::Store(StoreError::from(err))
    }
}
