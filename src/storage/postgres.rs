//! PostgreSQL-backed [`Store`].
//!
//! Writes run inside a transaction that is committed on success; an early return drops the
//! transaction, which rolls it back and hands the connection back to the pool.

use crate::domain::model::{Loan, LoanStatus, NewLoan, NewPayment, NewUser, Payment, User};
use crate::storage::schema;
use crate::storage::{StorageError, StorageResult, Store};
use async_trait::async_trait;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use tracing::{debug, instrument};

const USER_COLUMNS: &str = "id, email, hashed_password, full_name, is_active, created_at";
const LOAN_COLUMNS: &str = "id, user_id, amount, interest_rate, term_months, status, created_at";
const PAYMENT_COLUMNS: &str = "id, loan_id, amount, paid_at";

#[derive(Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Connects to `database_url` and creates the tables if they are missing.
    pub async fn connect(database_url: &str, max_connections: u32) -> StorageResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        let store = Self::new(pool);
        store.create_schema().await?;
        Ok(store)
    }

    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Applies the `CREATE TABLE IF NOT EXISTS` statements. Safe to call on every start.
    pub async fn create_schema(&self) -> StorageResult<()> {
        let mut tx = self.pool.begin().await?;
        for stmt in schema::statements() {
            sqlx::query(stmt).execute(&mut *tx).await?;
        }
        tx.commit().await?;
        debug!("schema ensured");
        Ok(())
    }
}

fn user_from_row(row: &PgRow) -> StorageResult<User> {
    Ok(User {
        id: row.try_get("id")?,
        email: row.try_get("email")?,
        hashed_password: row.try_get("hashed_password")?,
        full_name: row.try_get("full_name")?,
        is_active: row.try_get("is_active")?,
        created_at: row.try_get("created_at")?,
    })
}

fn loan_from_row(row: &PgRow) -> StorageResult<Loan> {
    let status: String = row.try_get("status")?;
    let status = status
        .parse::<LoanStatus>()
        .map_err(|message| StorageError::Decode { table: "loans", message })?;
    Ok(Loan {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        amount: row.try_get("amount")?,
        interest_rate: row.try_get("interest_rate")?,
        term_months: row.try_get("term_months")?,
        status,
        created_at: row.try_get("created_at")?,
    })
}

fn payment_from_row(row: &PgRow) -> StorageResult<Payment> {
    Ok(Payment {
        id: row.try_get("id")?,
        loan_id: row.try_get("loan_id")?,
        amount: row.try_get("amount")?,
        paid_at: row.try_get("paid_at")?,
    })
}

#[async_trait]
impl Store for PostgresStore {
    #[instrument(skip(self, user), fields(email = %user.email))]
    async fn insert_user(&self, user: NewUser) -> StorageResult<User> {
        let mut tx = self.pool.begin().await?;
        let sql = format!(
            "INSERT INTO users (email, hashed_password, full_name, is_active, created_at)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {}",
            USER_COLUMNS
        );
        let row = sqlx::query(&sql)
            .bind(&user.email)
            .bind(&user.hashed_password)
            .bind(&user.full_name)
            .bind(user.is_active)
            .bind(user.created_at)
            .fetch_one(&mut *tx)
            .await
            .map_err(StorageError::from_sqlx)?;
        let stored = user_from_row(&row)?;
        tx.commit().await?;
        Ok(stored)
    }

    async fn find_user(&self, id: i64) -> StorageResult<Option<User>> {
        let sql = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);
        let row = sqlx::query(&sql).bind(id).fetch_optional(&self.pool).await?;
        row.as_ref().map(user_from_row).transpose()
    }

    async fn find_user_by_email(&self, email: &str) -> StorageResult<Option<User>> {
        let sql = format!("SELECT {} FROM users WHERE email = $1", USER_COLUMNS);
        let row = sqlx::query(&sql).bind(email).fetch_optional(&self.pool).await?;
        row.as_ref().map(user_from_row).transpose()
    }

    #[instrument(skip(self, loan))]
    async fn insert_loan(&self, loan: NewLoan) -> StorageResult<Loan> {
        let mut tx = self.pool.begin().await?;
        let sql = format!(
            "INSERT INTO loans (user_id, amount, interest_rate, term_months, status, created_at)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {}",
            LOAN_COLUMNS
        );
        let row = sqlx::query(&sql)
            .bind(loan.user_id)
            .bind(loan.amount)
            .bind(loan.interest_rate)
            .bind(loan.term_months)
            .bind(loan.status.as_str())
            .bind(loan.created_at)
            .fetch_one(&mut *tx)
            .await
            .map_err(StorageError::from_sqlx)?;
        let stored = loan_from_row(&row)?;
        tx.commit().await?;
        Ok(stored)
    }

    async fn find_loan(&self, id: i64) -> StorageResult<Option<Loan>> {
        let sql = format!("SELECT {} FROM loans WHERE id = $1", LOAN_COLUMNS);
        let row = sqlx::query(&sql).bind(id).fetch_optional(&self.pool).await?;
        row.as_ref().map(loan_from_row).transpose()
    }

    async fn loans_for_user(&self, user_id: i64) -> StorageResult<Vec<Loan>> {
        let sql = format!(
            "SELECT {} FROM loans WHERE user_id = $1 ORDER BY id ASC",
            LOAN_COLUMNS
        );
        let rows = sqlx::query(&sql).bind(user_id).fetch_all(&self.pool).await?;
        rows.iter().map(loan_from_row).collect()
    }

    #[instrument(skip(self, payment), fields(loan_id = payment.loan_id))]
    async fn insert_payment(&self, payment: NewPayment) -> StorageResult<Payment> {
        let mut tx = self.pool.begin().await?;
        let sql = format!(
            "INSERT INTO payments (loan_id, amount, paid_at)
             VALUES ($1, $2, $3)
             RETURNING {}",
            PAYMENT_COLUMNS
        );
        let row = sqlx::query(&sql)
            .bind(payment.loan_id)
            .bind(payment.amount)
            .bind(payment.paid_at)
            .fetch_one(&mut *tx)
            .await
            .map_err(StorageError::from_sqlx)?;
        let stored = payment_from_row(&row)?;
        tx.commit().await?;
        Ok(stored)
    }

    async fn payments_for_loan(&self, loan_id: i64) -> StorageResult<Vec<Payment>> {
        let sql = format!(
            "SELECT {} FROM payments WHERE loan_id = $1 ORDER BY id ASC",
            PAYMENT_COLUMNS
        );
        let rows = sqlx::query(&sql).bind(loan_id).fetch_all(&self.pool).await?;
        rows.iter().map(payment_from_row).collect()
    }

    async fn ping(&self) -> StorageResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
