//! Registration and login.
//!
//! Argon2 is deliberately slow, so hashing and verification run on the blocking pool.

use crate::app::ServiceError;
use crate::crypto::{hash_password, verify_password, TokenIssuer};
use crate::domain::model::NewUser;
use crate::storage::{StorageError, Store};
use crate::transport::http::types::{Token, UserCreate, UserOut};
use std::sync::Arc;
use tracing::{info, instrument, warn};

#[derive(Clone)]
pub struct AuthService {
    store: Arc<dyn Store>,
    tokens: TokenIssuer,
}

impl AuthService {
    pub fn new(store: Arc<dyn Store>, tokens: TokenIssuer) -> Self {
        Self { store, tokens }
    }

    pub fn tokens(&self) -> &TokenIssuer {
        &self.tokens
    }

    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn register(&self, input: UserCreate) -> Result<UserOut, ServiceError> {
        if self.store.find_user_by_email(&input.email).await?.is_some() {
            return Err(ServiceError::EmailTaken);
        }

        let password = input.password;
        let hashed = tokio::task::spawn_blocking(move || hash_password(&password)).await??;

        let user = NewUser::new(input.email, hashed, input.full_name);
        let stored = match self.store.insert_user(user).await {
            Ok(u) => u,
            // Lost a race with a concurrent registration for the same email.
            Err(StorageError::UniqueViolation { .. }) => return Err(ServiceError::EmailTaken),
            Err(e) => return Err(e.into()),
        };
        info!(user_id = stored.id, "user registered");
        Ok(stored.into())
    }

    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn login(&self, input: UserCreate) -> Result<Token, ServiceError> {
        let Some(user) = self.store.find_user_by_email(&input.email).await? else {
            warn!("login for unknown email");
            return Err(ServiceError::InvalidCredentials);
        };

        let password = input.password;
        let hashed = user.hashed_password.clone();
        let matches =
            tokio::task::spawn_blocking(move || verify_password(&password, &hashed)).await?;
        if !matches {
            warn!(user_id = user.id, "wrong password");
            return Err(ServiceError::InvalidCredentials);
        }

        let access_token = self.tokens.issue(user.id)?;
        info!(user_id = user.id, "access token issued");
        Ok(Token::bearer(access_token))
    }
}
