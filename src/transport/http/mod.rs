pub mod error;
pub mod router;
pub mod types;
pub mod handlers {
    pub mod auth;
    pub mod fallback;
    pub mod health;
    pub mod loans;
    pub mod root;
}

pub use error::ApiError;
pub use router::{create_router, ApiDoc};
pub use types::AppState;
