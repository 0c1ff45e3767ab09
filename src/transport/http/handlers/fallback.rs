//! `{"detail": ...}` bodies for requests no route answers.

use crate::transport::http::types::ErrorResponse;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

pub const NOT_FOUND_DETAIL: &str = "Not Found";
pub const METHOD_NOT_ALLOWED_DETAIL: &str = "Method Not Allowed";

pub async fn not_found_handler() -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            detail: NOT_FOUND_DETAIL.to_string(),
        }),
    )
}

/// Replaces the router's empty 405 body, keeping the `Allow` header.
///
/// No handler returns 405 itself, so every 405 here comes from method routing.
pub async fn method_not_allowed_body(response: Response) -> Response {
    if response.status() != StatusCode::METHOD_NOT_ALLOWED {
        return response;
    }
    let allow = response.headers().get(axum::http::header::ALLOW).cloned();
    let mut replaced = (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(ErrorResponse {
            detail: METHOD_NOT_ALLOWED_DETAIL.to_string(),
        }),
    )
        .into_response();
    if let Some(allow) = allow {
        replaced.headers_mut().insert(axum::http::header::ALLOW, allow);
    }
    replaced
}
