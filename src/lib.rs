pub mod app;
pub mod crypto;
pub mod domain;
pub mod infra;
pub mod storage;
pub mod transport;

// Convenience re-exports (keeps call-sites clean)
pub use app::{AuthService, LoanService, ServiceError};
pub use crypto::TokenIssuer;
pub use infra::config::Config;
pub use storage::{MemoryStore, PostgresStore, Store};
