//! In-memory [`Store`] for tests and database-less local runs.
//!
//! Enforces the same invariants as the Postgres schema: unique email, foreign references that
//! must resolve, and sequential identifiers per table starting at 1.

use crate::domain::model::{Loan, NewLoan, NewPayment, NewUser, Payment, User};
use crate::storage::{StorageError, StorageResult, Store};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Default)]
struct Tables {
    users: BTreeMap<i64, User>,
    loans: BTreeMap<i64, Loan>,
    payments: BTreeMap<i64, Payment>,
}

fn next_id<V>(table: &BTreeMap<i64, V>) -> i64 {
    table.keys().next_back().map_or(1, |last| last + 1)
}

#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn new_shared() -> Arc<Self> {
        Arc::new(Self::new())
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn insert_user(&self, user: NewUser) -> StorageResult<User> {
        let mut tables = self.tables.write().await;
        if tables.users.values().any(|u| u.email == user.email) {
            return Err(StorageError::UniqueViolation {
                constraint: "users_email_key".to_string(),
            });
        }
        let stored = user.with_id(next_id(&tables.users));
        tables.users.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn find_user(&self, id: i64) -> StorageResult<Option<User>> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> StorageResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| u.email == email).cloned())
    }

    async fn insert_loan(&self, loan: NewLoan) -> StorageResult<Loan> {
        let mut tables = self.tables.write().await;
        if let Some(user_id) = loan.user_id {
            if !tables.users.contains_key(&user_id) {
                return Err(StorageError::ForeignKeyViolation {
                    constraint: "loans_user_id_fkey".to_string(),
                });
            }
        }
        let stored = loan.with_id(next_id(&tables.loans));
        tables.loans.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn find_loan(&self, id: i64) -> StorageResult<Option<Loan>> {
        Ok(self.tables.read().await.loans.get(&id).cloned())
    }

    async fn loans_for_user(&self, user_id: i64) -> StorageResult<Vec<Loan>> {
        let tables = self.tables.read().await;
        Ok(tables
            .loans
            .values()
            .filter(|l| l.user_id == Some(user_id))
            .cloned()
            .collect())
    }

    async fn insert_payment(&self, payment: NewPayment) -> StorageResult<Payment> {
        let mut tables = self.tables.write().await;
        if !tables.loans.contains_key(&payment.loan_id) {
            return Err(StorageError::ForeignKeyViolation {
                constraint: "payments_loan_id_fkey".to_string(),
            });
        }
        let stored = payment.with_id(next_id(&tables.payments));
        tables.payments.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn payments_for_loan(&self, loan_id: i64) -> StorageResult<Vec<Payment>> {
        let tables = self.tables.read().await;
        Ok(tables
            .payments
            .values()
            .filter(|p| p.loan_id == loan_id)
            .cloned()
            .collect())
    }

    async fn ping(&self) -> StorageResult<()> {
        Ok(())
    }
}
