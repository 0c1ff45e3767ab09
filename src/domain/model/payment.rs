use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq)]
pub struct Payment {
    pub id: i64,
    pub loan_id: i64,
    pub amount: f64,
    pub paid_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewPayment {
    pub loan_id: i64,
    pub amount: f64,
    pub paid_at: DateTime<Utc>,
}

impl NewPayment {
    pub fn new(loan_id: i64, amount: f64) -> Self {
        Self {
            loan_id,
            amount,
            paid_at: super::now_utc(),
        }
    }

    pub(crate) fn with_id(self, id: i64) -> Payment {
        Payment {
            id,
            loan_id: self.loan_id,
            amount: self.amount,
            paid_at: self.paid_at,
        }
    }
}
