use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("invalid grade: {0}. grade must be in [0, 100]")]
    InvalidGrade(u16),
    #[error("{0} is required")]
    EmptyField(&'static str),
    #[error("{field} must be between {min} and {max} characters, got {actual}")]
    InvalidLength {
        field: &'static str,
        min: usize,
        max: usize,
        actual: usize,
    },
    #[error("invalid email address")]
    InvalidEmail,
    #[error("{0} must be a valid URL")]
    InvalidUrl(&'static str),
    #[error("unknown role: {0}")]
    UnknownRole(String),
    #[error("unknown resource type: {0}")]
    UnknownResourceType(String),
}
