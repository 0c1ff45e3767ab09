use chrono::{DateTime, Utc};

/// A registered account.
///
/// Deliberately not `Serialize`: the password hash must never leave the process.
/// Use [`crate::transport::http::types::UserOut`] for responses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub hashed_password: String,
    pub full_name: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Fields for a user that has not been stored yet.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub hashed_password: String,
    pub full_name: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl NewUser {
    pub fn new(email: String, hashed_password: String, full_name: Option<String>) -> Self {
        Self {
            email,
            hashed_password,
            full_name,
            is_active: true,
            created_at: super::now_utc(),
        }
    }

    pub(crate) fn with_id(self, id: i64) -> User {
        User {
            id,
            email: self.email,
            hashed_password: self.hashed_password,
            full_name: self.full_name,
            is_active: self.is_active,
            created_at: self.created_at,
        }
    }
}
