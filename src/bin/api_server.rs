// src/bin/api_server.rs

use anyhow::Context;
use chrono::Duration;
use marikaya_api::infra::config::{Config, StorageBackend};
use marikaya_api::infra::logging;
use marikaya_api::infra::shutdown::shutdown_signal;
use marikaya_api::transport;
use marikaya_api::{MemoryStore, PostgresStore, Store, TokenIssuer};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    logging::init_logger(config.log_format);

    // --- Storage Initialization ---
    let store: Arc<dyn Store> = match config.storage_backend {
        StorageBackend::Postgres => {
            let url = config
                .database_url
                .as_deref()
                .context("DATABASE_URL must be set")?;
            info!(max_connections = config.db_max_connections, "connecting to Postgres");
            let store = PostgresStore::connect(url, config.db_max_connections)
                .await
                .context("failed to connect to Postgres and create schema")?;
            info!("schema ready (users, loans, payments)");
            Arc::new(store)
        }
        StorageBackend::Memory => {
            warn!("STORAGE_BACKEND=memory: data is lost on exit");
            MemoryStore::new_shared()
        }
    };

    let tokens = TokenIssuer::new(
        config.secret_key.as_bytes(),
        Duration::minutes(config.access_token_expire_minutes),
    );
    let app_state = transport::http::AppState::new(store, tokens);

    // --- API Server Initialization ---
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);
    let app = transport::http::create_router(app_state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", transport::http::ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    info!(addr = %config.bind_addr, "API server listening");
    info!("Swagger UI available at /swagger-ui");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(tokio::signal::ctrl_c()))
        .await?;

    info!("graceful shutdown complete");
    Ok(())
}
