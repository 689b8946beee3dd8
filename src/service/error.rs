//! Error types for movie info service operations.

use thiserror::Error;

use crate::store::StoreError;
use crate::translator::translate;
use crate::validation::FieldError;

/// Error type for CRUD service operations.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The record failed one or more field rules.
    #[error("{}", translate(.0))]
    Validation(Vec<FieldError>),
    /// No record exists with this id.
    #[error("movie info not found: {0}")]
    NotFound(String),
    /// The record store failed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

impl ServiceError {
    /// Map this error to an HTTP-style status code.
    pub fn status_code(&self) -> u16 {
        match self {
            ServiceError::Validation(_) => 400,
            ServiceError::NotFound(_) => 404,
            ServiceError::Store(_) => 500,
        }
    }
}
