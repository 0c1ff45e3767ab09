//! Storage error types.

use thiserror::Error;

/// Storage-specific errors.
#[derive(Debug, Error)]
pub enum StorageError {
    /// A unique constraint rejected the write (e.g. duplicate email).
    #[error("unique constraint violated: {constraint}")]
    UniqueViolation { constraint: String },

    /// A foreign reference does not resolve.
    #[error("foreign key violated: {constraint}")]
    ForeignKeyViolation { constraint: String },

    /// A stored row could not be mapped back into an entity.
    #[error("corrupt row in {table}: {message}")]
    Decode { table: &'static str, message: String },

    /// Anything else coming out of the database driver.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;

// Postgres SQLSTATE codes.
const UNIQUE_VIOLATION: &str = "23505";
const FOREIGN_KEY_VIOLATION: &str = "23503";

impl StorageError {
    /// Classifies a driver error, pulling constraint violations out of the generic bucket.
    pub fn from_sqlx(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            let constraint = db_err.constraint().unwrap_or("unknown").to_string();
            match db_err.code().as_deref() {
                Some(UNIQUE_VIOLATION) => return StorageError::UniqueViolation { constraint },
                Some(FOREIGN_KEY_VIOLATION) => {
                    return StorageError::ForeignKeyViolation { constraint }
                }
                _ => {}
            }
        }
        StorageError::Database(err)
    }
}
