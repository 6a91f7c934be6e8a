use axum::{
    Json,
    extract::{
        multipart::{MultipartError, MultipartRejection},
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};
use classroom_api_types::{ErrorResponse, FieldError};
use classroom_core::domain::{AccessError, CodeError};
use tracing::error;

use crate::service::ServiceError;

/// Error body plus status, built from whatever a handler failed with.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    code: &'static str,
    message: String,
    details: Option<Vec<FieldError>>,
}

impl ApiError {
    fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
            details: None,
        }
    }

    fn internal() -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "INTERNAL_ERROR",
            "Internal server error",
        )
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Access(access) => {
                let (status, code) = match access {
                    AccessError::Unauthenticated | AccessError::WrongRole => {
                        (StatusCode::UNAUTHORIZED, "UNAUTHORIZED")
                    }
                    AccessError::NotFoundOrDenied => (StatusCode::NOT_FOUND, "COURSE_NOT_FOUND"),
                };
                ApiError::new(status, code, access.to_string())
            }
            ServiceError::Forbidden => {
                ApiError::new(StatusCode::FORBIDDEN, "FORBIDDEN", "Access denied")
            }
            ServiceError::Validation(details) => ApiError {
                details: Some(details),
                ..ApiError::new(StatusCode::BAD_REQUEST, "VALIDATION_ERROR", "Validation error")
            },
            ServiceError::BadRequest(message) => {
                ApiError::new(StatusCode::BAD_REQUEST, "BAD_REQUEST", message)
            }
            ServiceError::Membership(rule) => {
                ApiError::new(StatusCode::BAD_REQUEST, rule.code(), rule.to_string())
            }
            ServiceError::Code(code_err) => {
                let (status, code) = match code_err {
                    CodeError::InvalidFormat => (StatusCode::BAD_REQUEST, "INVALID_CODE_FORMAT"),
                    CodeError::NotFound => (StatusCode::NOT_FOUND, "INVALID_CODE"),
                };
                ApiError::new(status, code, code_err.to_string())
            }
            ServiceError::NotFound(message) => {
                ApiError::new(StatusCode::NOT_FOUND, "NOT_FOUND", message)
            }
            ServiceError::Storage(err) => {
                error!(error = %err, "file store failure");
                ApiError::internal()
            }
            ServiceError::Unexpected(err) => {
                error!(error = ?err, "unexpected failure");
                ApiError::internal()
            }
        }
    }
}

/// Well-formed JSON whose values have the wrong shape is a validation failure
/// like any other; syntax and content-type problems are not.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonDataError(err) => {
                let text = err.body_text();
                let (field, message) = data_error_field(&text);
                ApiError {
                    details: Some(vec![FieldError::new(field, message)]),
                    ..ApiError::new(StatusCode::BAD_REQUEST, "VALIDATION_ERROR", "Validation error")
                }
            }
            other => ApiError::new(other.status(), "INVALID_BODY", other.body_text()),
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::new(StatusCode::BAD_REQUEST, "INVALID_QUERY", rejection.body_text())
    }
}

const DATA_ERROR_PREFIX: &str = "Failed to deserialize the JSON body into the target type: ";

/// Splits `path: message` out of a JSON data error; errors at the document
/// root are reported against `body`.
fn data_error_field(text: &str) -> (String, String) {
    let detail = text.strip_prefix(DATA_ERROR_PREFIX).unwrap_or(text);
    match detail.split_once(": ") {
        Some((path, message)) if !path.is_empty() && !path.contains(' ') => {
            (path.to_string(), message.to_string())
        }
        _ => ("body".to_string(), detail.to_string()),
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        ApiError::new(err.status(), "INVALID_UPLOAD", err.body_text())
    }
}

impl From<MultipartRejection> for ApiError {
    fn from(rejection: MultipartRejection) -> Self {
        ApiError::new(rejection.status(), "INVALID_UPLOAD", rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut body = ErrorResponse::new(self.code, self.message);
        if let Some(details) = self.details {
            body = body.with_details(details);
        }

        (self.status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use classroom_core::domain::MembershipError;

    #[test]
    fn access_denials_map_to_401_and_404() {
        let unauthenticated = ApiError::from(ServiceError::Access(AccessError::Unauthenticated));
        let wrong_role = ApiError::from(ServiceError::Access(AccessError::WrongRole));
        let hidden = ApiError::from(ServiceError::Access(AccessError::NotFoundOrDenied));

        assert_eq!(unauthenticated.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(wrong_role.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(hidden.status(), StatusCode::NOT_FOUND);
        assert_eq!(hidden.message, "Course not found or access denied");
    }

    #[test]
    fn membership_rules_are_bad_requests_with_their_code() {
        let err = ApiError::from(ServiceError::Membership(MembershipError::AlreadyEnrolled));

        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.code, "ALREADY_ENROLLED");
    }

    #[test]
    fn unexpected_errors_hide_their_cause() {
        let err = ApiError::from(ServiceError::Unexpected(anyhow::anyhow!(
            "connection refused by 10.0.0.7"
        )));

        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message, "Internal server error");
    }

    #[test]
    fn data_errors_are_attributed_to_their_field() {
        let (field, message) = data_error_field(
            "Failed to deserialize the JSON body into the target type: code: invalid type: integer `5`, expected a string at line 1 column 9",
        );
        assert_eq!(field, "code");
        assert!(message.starts_with("invalid type"));

        let (field, _) = data_error_field(
            "Failed to deserialize the JSON body into the target type: invalid type: sequence, expected struct JoinCourseRequest at line 1 column 0",
        );
        assert_eq!(field, "body");
    }

    #[test]
    fn unknown_code_is_not_found_and_bad_shape_is_bad_request() {
        assert_eq!(
            ApiError::from(ServiceError::Code(CodeError::NotFound)).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::from(ServiceError::Code(CodeError::InvalidFormat)).status(),
            StatusCode::BAD_REQUEST
        );
    }
}
