use classroom_api_types::FieldError;
use classroom_core::domain::{AccessError, CodeError, DomainError, FileStoreError, MembershipError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Access(#[from] AccessError),
    /// Authenticated, but not allowed to touch an entity outside a course route.
    #[error("Access denied")]
    Forbidden,
    #[error("Validation error")]
    Validation(Vec<FieldError>),
    #[error("{0}")]
    BadRequest(&'static str),
    #[error(transparent)]
    Membership(#[from] MembershipError),
    #[error(transparent)]
    Code(#[from] CodeError),
    #[error("{0}")]
    NotFound(&'static str),
    #[error(transparent)]
    Storage(#[from] FileStoreError),
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl ServiceError {
    pub fn invalid(field: &str, err: DomainError) -> Self {
        ServiceError::Validation(vec![FieldError::new(field, err.to_string())])
    }
}

/// Collects every field failure of a request body before giving up.
#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<FieldError>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn check<T>(&mut self, field: &str, result: Result<T, DomainError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                self.errors.push(FieldError::new(field, err.to_string()));
                None
            }
        }
    }

    pub fn reject(&mut self, field: &str, message: impl Into<String>) {
        self.errors.push(FieldError::new(field, message));
    }

    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn into_error(self) -> ServiceError {
        ServiceError::Validation(self.errors)
    }
}
