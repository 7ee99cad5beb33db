use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use shared::{ErrorResponse, FieldErrorDetail, ValidationErrorResponse};
use thiserror::Error;
use tracing::error;

use crate::domain::{DomainError, FieldError};

/// Everything a handler can fail with, mapped onto HTTP in `into_response`
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// The request could not be decoded at all
    #[error("malformed {location}: {message}")]
    Malformed {
        location: &'static str,
        message: String,
    },
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Malformed {
            location: "body",
            message: rejection.body_text(),
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::Malformed {
            location: "query",
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Domain(DomainError::Validation(errors)) => unprocessable(
                errors.iter().map(field_detail).collect(),
            ),
            ApiError::Domain(DomainError::NotFound(kind)) => {
                detail(StatusCode::NOT_FOUND, format!("{} not found", kind))
            }
            ApiError::Domain(DomainError::DuplicateEmail(_)) => detail(
                StatusCode::CONFLICT,
                "A user with this email already exists".to_string(),
            ),
            ApiError::Domain(DomainError::Storage(e)) => {
                error!("Storage failure while handling request: {:?}", e);
                detail(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            ApiError::Malformed { location, message } => unprocessable(vec![FieldErrorDetail {
                loc: vec![location.to_string()],
                msg: message,
            }]),
        }
    }
}

fn field_detail(error: &FieldError) -> FieldErrorDetail {
    FieldErrorDetail {
        loc: vec![error.source.as_str().to_string(), error.field.clone()],
        msg: error.message.clone(),
    }
}

fn detail(status: StatusCode, message: String) -> Response {
    (status, Json(ErrorResponse { detail: message })).into_response()
}

fn unprocessable(detail: Vec<FieldErrorDetail>) -> Response {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(ValidationErrorResponse { detail }),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EntityKind, FieldSource};
    use crate::storage::StoreError;

    #[test]
    fn test_status_codes() {
        let cases = vec![
            (
                ApiError::from(DomainError::invalid(FieldSource::Query, "limit", "too big")),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                ApiError::from(DomainError::NotFound(EntityKind::User)),
                StatusCode::NOT_FOUND,
            ),
            (
                ApiError::from(DomainError::DuplicateEmail("a@b.co".to_string())),
                StatusCode::CONFLICT,
            ),
            (
                ApiError::from(DomainError::Storage(StoreError::Database(sqlx::Error::PoolTimedOut))),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                ApiError::Malformed {
                    location: "body",
                    message: "expected value".to_string(),
                },
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(error.into_response().status(), expected);
        }
    }

    #[test]
    fn test_field_detail_location() {
        let detail = field_detail(&FieldError::new(FieldSource::Body, "email", "bad"));
        assert_eq!(detail.loc, vec!["body".to_string(), "email".to_string()]);
        assert_eq!(detail.msg, "bad");
    }
}
