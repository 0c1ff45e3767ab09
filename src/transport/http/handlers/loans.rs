use crate::transport::http::error::ApiError;
use crate::transport::http::types::{
    AppState, ErrorResponse, LoanCreate, LoanOut, ValidationErrorResponse,
};
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::Json;

#[utoipa::path(
    post,
    path = "/api/loans/",
    tag = "loans",
    request_body = LoanCreate,
    responses(
        (status = 200, description = "Loan created", body = LoanOut),
        (status = 422, description = "Invalid request body", body = ValidationErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn create_loan_handler(
    State(state): State<AppState>,
    request: Result<Json<LoanCreate>, JsonRejection>,
) -> Result<Json<LoanOut>, ApiError> {
    let Json(input) = request.map_err(ApiError::from_json_rejection)?;
    let loan = state.loans.create_loan(input).await?;
    Ok(Json(loan))
}

#[utoipa::path(
    get,
    path = "/api/loans/{loan_id}",
    tag = "loans",
    params(("loan_id" = i64, Path, description = "Loan identifier")),
    responses(
        (status = 200, description = "Loan found", body = LoanOut),
        (status = 404, description = "Loan not found", body = ErrorResponse),
        (status = 422, description = "Identifier is not an integer", body = ValidationErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn read_loan_handler(
    State(state): State<AppState>,
    loan_id: Result<Path<i64>, PathRejection>,
) -> Result<Json<LoanOut>, ApiError> {
    let Path(loan_id) = loan_id.map_err(|e| ApiError::from_path_rejection(e, "loan_id"))?;
    let loan = state.loans.get_loan(loan_id).await?;
    Ok(Json(loan))
}
