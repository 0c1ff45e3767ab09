use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

/// Annual interest rate applied when the caller does not supply one.
pub const DEFAULT_INTEREST_RATE: f64 = 0.2;

/// Lifecycle status of a loan. Stored as lowercase text.
///
/// Only `pending` exists today; no transitions are defined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum LoanStatus {
    #[default]
    Pending,
}

impl LoanStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoanStatus::Pending => "pending",
        }
    }
}

impl fmt::Display for LoanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LoanStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(LoanStatus::Pending),
            other => Err(format!("unknown loan status '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Loan {
    pub id: i64,
    /// Borrower. `None` until ownership is assigned.
    pub user_id: Option<i64>,
    pub amount: f64,
    pub interest_rate: f64,
    pub term_months: i32,
    pub status: LoanStatus,
    pub created_at: DateTime<Utc>,
}

/// Fields for a loan that has not been stored yet.
#[derive(Debug, Clone)]
pub struct NewLoan {
    pub user_id: Option<i64>,
    pub amount: f64,
    pub interest_rate: f64,
    pub term_months: i32,
    pub status: LoanStatus,
    pub created_at: DateTime<Utc>,
}

impl NewLoan {
    /// A fresh `pending` loan stamped with the current time and no borrower.
    pub fn pending(amount: f64, interest_rate: f64, term_months: i32) -> Self {
        Self {
            user_id: None,
            amount,
            interest_rate,
            term_months,
            status: LoanStatus::Pending,
            created_at: super::now_utc(),
        }
    }

    pub fn for_user(mut self, user_id: i64) -> Self {
        self.user_id = Some(user_id);
        self
    }

    pub(crate) fn with_id(self, id: i64) -> Loan {
        Loan {
            id,
            user_id: self.user_id,
            amount: self.amount,
            interest_rate: self.interest_rate,
            term_months: self.term_months,
            status: self.status,
            created_at: self.created_at,
        }
    }
}
