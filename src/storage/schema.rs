//! Table definitions, applied idempotently at startup.

pub const CREATE_USERS: &str = "CREATE TABLE IF NOT EXISTS users (
    id BIGSERIAL PRIMARY KEY,
    email TEXT NOT NULL UNIQUE,
    hashed_password TEXT NOT NULL,
    full_name TEXT,
    is_active BOOLEAN NOT NULL DEFAULT TRUE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
)";

pub const CREATE_LOANS: &str = "CREATE TABLE IF NOT EXISTS loans (
    id BIGSERIAL PRIMARY KEY,
    user_id BIGINT REFERENCES users(id),
    amount DOUBLE PRECISION NOT NULL,
    interest_rate DOUBLE PRECISION NOT NULL DEFAULT 0.2,
    term_months INTEGER NOT NULL,
    status TEXT NOT NULL DEFAULT 'pending',
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
)";

pub const CREATE_PAYMENTS: &str = "CREATE TABLE IF NOT EXISTS payments (
    id BIGSERIAL PRIMARY KEY,
    loan_id BIGINT NOT NULL REFERENCES loans(id),
    amount DOUBLE PRECISION NOT NULL,
    paid_at TIMESTAMPTZ NOT NULL DEFAULT now()
)";

pub const CREATE_INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS loans_user_id_idx ON loans (user_id)",
    "CREATE INDEX IF NOT EXISTS payments_loan_id_idx ON payments (loan_id)",
];

/// Statements in dependency order (referenced tables first).
pub fn statements() -> Vec<&'static str> {
    let mut all = vec![CREATE_USERS, CREATE_LOANS, CREATE_PAYMENTS];
    all.extend_from_slice(CREATE_INDEXES);
    all
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statements_are_idempotent_and_ordered() {
        let stmts = statements();
        assert!(stmts.iter().all(|s| s.contains("IF NOT EXISTS")));
        let users = stmts.iter().position(|s| *s == CREATE_USERS).unwrap();
        let loans = stmts.iter().position(|s| *s == CREATE_LOANS).unwrap();
        let payments = stmts.iter().position(|s| *s == CREATE_PAYMENTS).unwrap();
        assert!(users < loans && loans < payments);
    }
}
