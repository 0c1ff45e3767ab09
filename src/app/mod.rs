pub mod auth_service;
pub mod error;
pub mod loan_service;

pub use auth_service::AuthService;
pub use error::ServiceError;
pub use loan_service::LoanService;
