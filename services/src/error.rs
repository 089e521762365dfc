use sea_orm::{DbErr, SqlErr};
use thiserror::Error;
use validator::ValidationErrors;

use crate::access::AccessError;
use crate::grade::InvalidInputError;

/// Error returned by every service operation.
///
/// Transports translate the variants into HTTP statuses or GraphQL error codes;
/// services never pick a status themselves.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Unauthenticated(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("storage error: {0}")]
    Storage(#[from] DbErr),

    #[error("export failed: {0}")]
    Export(#[from] csv::Error),
}

impl ServiceError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }
}

impl From<AccessError> for ServiceError {
    fn from(err: AccessError) -> Self {
        match err {
            AccessError::Unauthenticated => Self::Unauthenticated(err.to_string()),
            AccessError::Forbidden(reason) => Self::Forbidden(reason),
        }
    }
}

impl From<ValidationErrors> for ServiceError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(common::format_validation_errors(&errors))
    }
}

impl From<InvalidInputError> for ServiceError {
    fn from(err: InvalidInputError) -> Self {
        Self::Validation(err.to_string())
    }
}

/// Turns a unique-index violation into the validation error `describe` picks
/// for the offending constraint; other errors pass through as `Storage`.
///
/// `describe` receives the driver's message (e.g. `UNIQUE constraint failed: students.email`).
pub(crate) fn map_unique_violation<F>(err: DbErr, describe: F) -> ServiceError
where
    F: FnOnce(&str) -> String,
{
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => ServiceError::Validation(describe(&detail)),
        _ => ServiceError::Storage(err),
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
