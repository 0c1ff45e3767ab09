//! Maps validation and service failures onto HTTP responses.

use crate::app::ServiceError;
use crate::transport::http::types::{ErrorResponse, FieldError, ValidationErrorResponse};
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use tracing::error;

const INTERNAL_ERROR_DETAIL: &str = "Internal server error";
const JSON_DATA_PREFIX: &str = "Failed to deserialize the JSON body into the target type: ";

#[derive(Debug, Error)]
pub enum ApiError {
    /// The request did not match the expected shape (422).
    #[error("request validation failed")]
    Validation(Vec<FieldError>),

    #[error(transparent)]
    Service(#[from] ServiceError),
}

impl ApiError {
    pub fn from_json_rejection(rejection: JsonRejection) -> Self {
        let (loc, kind) = match &rejection {
            JsonRejection::JsonDataError(_) => {
                let text = rejection.body_text();
                let detail = text.strip_prefix(JSON_DATA_PREFIX).unwrap_or(&text);
                let mut loc = vec!["body".to_string()];
                if let Some(field) = offending_field(detail) {
                    loc.push(field);
                }
                (loc, "type_error")
            }
            JsonRejection::JsonSyntaxError(_) => (vec!["body".to_string()], "value_error.jsondecode"),
            JsonRejection::MissingJsonContentType(_) => {
                (vec!["header".to_string(), "content-type".to_string()], "value_error.content_type")
            }
            _ => (vec!["body".to_string()], "value_error"),
        };
        ApiError::Validation(vec![FieldError {
            loc,
            msg: rejection.body_text(),
            kind: kind.to_string(),
        }])
    }

    pub fn from_path_rejection(rejection: PathRejection, param: &str) -> Self {
        ApiError::Validation(vec![FieldError::new(
            &["path", param],
            rejection.body_text(),
            "type_error.integer",
        )])
    }
}

/// Pulls the field name out of a serde data error.
///
/// Nested failures are reported as `field: message`; missing fields as
/// ``missing field `field` ``.
fn offending_field(detail: &str) -> Option<String> {
    if let Some(rest) = detail.strip_prefix("missing field `") {
        return rest.split('`').next().map(str::to_string);
    }
    let (path, _) = detail.split_once(": ")?;
    let is_path = !path.is_empty()
        && path
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '[' | ']'));
    is_path.then(|| path.to_string())
}

fn detail(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            detail: message.into(),
        }),
    )
        .into_response()
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ValidationErrorResponse { detail: errors }),
            )
                .into_response(),
            ApiError::Service(err) => match err {
                ServiceError::NotFound(message) => detail(StatusCode::NOT_FOUND, message),
                ServiceError::EmailTaken => detail(StatusCode::BAD_REQUEST, err.to_string()),
                ServiceError::InvalidCredentials => {
                    let mut resp = detail(StatusCode::UNAUTHORIZED, err.to_string());
                    resp.headers_mut().insert(
                        header::WWW_AUTHENTICATE,
                        header::HeaderValue::from_static("Bearer"),
                    );
                    resp
                }
                ServiceError::Storage(_) | ServiceError::Auth(_) | ServiceError::Task(_) => {
                    error!(error = %err, "request failed");
                    detail(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_DETAIL)
                }
            },
        }
    }
}
