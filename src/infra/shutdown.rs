use std::future::Future;
use std::io;
use tracing::{error, info};

/// Resolves when `signal` fires. If the listener cannot be installed the future never
/// resolves, so the server keeps serving until it is killed.
pub async fn shutdown_signal<F>(signal: F)
where
    F: Future<Output = io::Result<()>>,
{
    match signal.await {
        Ok(()) => info!("shutdown signal received"),
        Err(e) => {
            error!(error = %e, "cannot listen for shutdown signal; serving until killed");
            std::future::pending::<()>().await;
        }
    }
}
