//! Persisted entities.
//!
//! Entities reference each other by identifier only (`Loan::user_id`, `Payment::loan_id`).
//! Traversal goes through explicit lookups on [`crate::storage::Store`].

pub mod loan;
pub mod payment;
pub mod user;

pub use loan::{Loan, LoanStatus, NewLoan, DEFAULT_INTEREST_RATE};
pub use payment::{NewPayment, Payment};
pub use user::{NewUser, User};

use chrono::{DateTime, SubsecRound, Utc};

/// Server-side creation timestamp.
///
/// Truncated to microseconds, which is what Postgres `TIMESTAMPTZ` keeps, so a value read back
/// from storage compares equal to the one handed out at creation.
pub fn now_utc() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}
