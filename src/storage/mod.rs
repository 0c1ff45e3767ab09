//! Persistence for users, loans and payments.
//!
//! [`Store`] is the seam between the services and the database. Handlers receive an
//! `Arc<dyn Store>` through application state; there is no global connection.

pub mod error;
pub mod memory;
pub mod postgres;
pub mod schema;

pub use error::{StorageError, StorageResult};
pub use memory::MemoryStore;
pub use postgres::PostgresStore;

use crate::domain::model::{Loan, NewLoan, NewPayment, NewUser, Payment, User};
use async_trait::async_trait;

/// Storage operations used by the services.
///
/// Every call is its own unit of work: implementations commit on success and leave no partial
/// writes on failure.
#[async_trait]
pub trait Store: Send + Sync {
    /// Inserts a user. Fails with [`StorageError::UniqueViolation`] if the email is taken.
    async fn insert_user(&self, user: NewUser) -> StorageResult<User>;

    async fn find_user(&self, id: i64) -> StorageResult<Option<User>>;

    async fn find_user_by_email(&self, email: &str) -> StorageResult<Option<User>>;

    /// Inserts a loan. Fails with [`StorageError::ForeignKeyViolation`] if `user_id` is set and
    /// does not resolve to a user.
    async fn insert_loan(&self, loan: NewLoan) -> StorageResult<Loan>;

    async fn find_loan(&self, id: i64) -> StorageResult<Option<Loan>>;

    /// Loans whose `user_id` is `user_id`, oldest first.
    async fn loans_for_user(&self, user_id: i64) -> StorageResult<Vec<Loan>>;

    /// Inserts a payment. Fails with [`StorageError::ForeignKeyViolation`] if the loan is missing.
    async fn insert_payment(&self, payment: NewPayment) -> StorageResult<Payment>;

    /// Payments recorded against `loan_id`, oldest first.
    async fn payments_for_loan(&self, loan_id: i64) -> StorageResult<Vec<Payment>>;

    /// Cheap liveness check.
    async fn ping(&self) -> StorageResult<()>;
}
