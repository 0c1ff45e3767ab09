use crate::domain::model::LoanStatus;
use crate::transport::http::handlers::{auth, fallback, health, loans, root};
use crate::transport::http::types::{
    ErrorResponse, FieldError, HealthResponse, LoanCreate, LoanOut, RootResponse, Token,
    UserCreate, UserOut, ValidationErrorResponse,
};
use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(title = "MariKaya API", version = "0.1.0"),
    paths(
        root::root_handler,
        health::healthcheck_handler,
        auth::register_handler,
        auth::login_handler,
        loans::create_loan_handler,
        loans::read_loan_handler
    ),
    components(schemas(
        UserCreate,
        UserOut,
        Token,
        LoanCreate,
        LoanOut,
        LoanStatus,
        RootResponse,
        HealthResponse,
        ErrorResponse,
        FieldError,
        ValidationErrorResponse
    )),
    tags(
        (name = "auth", description = "Registration and login"),
        (name = "loans", description = "Loan creation and lookup")
    )
)]
pub struct ApiDoc;

pub fn create_router(app_state: crate::transport::http::types::AppState) -> Router {
    Router::new()
        .route("/", get(root::root_handler))
        .route("/health", get(health::healthcheck_handler))
        .route("/api/register", post(auth::register_handler))
        .route("/api/login", post(auth::login_handler))
        .route("/api/loans/", post(loans::create_loan_handler))
        .route("/api/loans", post(loans::create_loan_handler))
        .route("/api/loans/:loan_id", get(loans::read_loan_handler))
        .fallback(fallback::not_found_handler)
        .layer(middleware::map_response(fallback::method_not_allowed_body))
        .with_state(app_state)
}
