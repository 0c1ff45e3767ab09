//! Loan creation and lookup.

use crate::app::ServiceError;
use crate::domain::model::NewLoan;
use crate::storage::Store;
use crate::transport::http::types::{LoanCreate, LoanOut};
use std::sync::Arc;
use tracing::{debug, error, info, instrument};

pub const LOAN_NOT_FOUND: &str = "Loan not found";

#[derive(Clone)]
pub struct LoanService {
    store: Arc<dyn Store>,
}

impl LoanService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Stores a new `pending` loan with no borrower and returns its projection.
    ///
    /// Amount, rate and term are taken as given; only their types are checked upstream.
    #[instrument(skip(self, input), fields(amount = input.amount, term_months = input.term_months))]
    pub async fn create_loan(&self, input: LoanCreate) -> Result<LoanOut, ServiceError> {
        let new_loan = NewLoan::pending(input.amount, input.interest_rate, input.term_months);
        let loan = self.store.insert_loan(new_loan).await.map_err(|e| {
            error!(error = %e, "failed to store loan");
            e
        })?;
        info!(loan_id = loan.id, "loan created");
        Ok(loan.into())
    }

    #[instrument(skip(self))]
    pub async fn get_loan(&self, loan_id: i64) -> Result<LoanOut, ServiceError> {
        let loan = self.store.find_loan(loan_id).await.map_err(|e| {
            error!(error = %e, "failed to read loan");
            e
        })?;
        match loan {
            Some(loan) => Ok(loan.into()),
            None => {
                debug!("loan not found");
                Err(ServiceError::NotFound(LOAN_NOT_FOUND))
            }
        }
    }
}
