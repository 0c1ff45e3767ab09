use crate::transport::http::error::ApiError;
use crate::transport::http::types::{
    AppState, ErrorResponse, Token, UserCreate, UserOut, ValidationErrorResponse,
};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;

fn validated(request: Result<Json<UserCreate>, JsonRejection>) -> Result<UserCreate, ApiError> {
    let Json(input) = request.map_err(ApiError::from_json_rejection)?;
    input.check().map_err(ApiError::Validation)?;
    Ok(input)
}

#[utoipa::path(
    post,
    path = "/api/register",
    tag = "auth",
    request_body = UserCreate,
    responses(
        (status = 200, description = "User registered", body = UserOut),
        (status = 400, description = "Email already registered", body = ErrorResponse),
        (status = 422, description = "Invalid request body", body = ValidationErrorResponse)
    )
)]
pub async fn register_handler(
    State(state): State<AppState>,
    request: Result<Json<UserCreate>, JsonRejection>,
) -> Result<Json<UserOut>, ApiError> {
    let input = validated(request)?;
    Ok(Json(state.auth.register(input).await?))
}

#[utoipa::path(
    post,
    path = "/api/login",
    tag = "auth",
    request_body = UserCreate,
    responses(
        (status = 200, description = "Access token issued", body = Token),
        (status = 401, description = "Incorrect email or password", body = ErrorResponse),
        (status = 422, description = "Invalid request body", body = ValidationErrorResponse)
    )
)]
pub async fn login_handler(
    State(state): State<AppState>,
    request: Result<Json<UserCreate>, JsonRejection>,
) -> Result<Json<Token>, ApiError> {
    let input = validated(request)?;
    Ok(Json(state.auth.login(input).await?))
}
