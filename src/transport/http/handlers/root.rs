use crate::transport::http::types::RootResponse;
use axum::Json;

pub const WELCOME_MESSAGE: &str = "Welcome to MariKaya API";

#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Static welcome payload", body = RootResponse))
)]
pub async fn root_handler() -> Json<RootResponse> {
    Json(RootResponse {
        message: WELCOME_MESSAGE.to_string(),
    })
}
