use crate::app::{AuthService, LoanService};
use crate::crypto::TokenIssuer;
use crate::domain::model::{Loan, LoanStatus, User, DEFAULT_INTEREST_RATE};
use crate::storage::Store;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use validator::{Validate, ValidationErrors};

/// Shared, immutable per-process state. The store handle is the only route to the database.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub loans: LoanService,
    pub auth: AuthService,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, tokens: TokenIssuer) -> Self {
        Self {
            loans: LoanService::new(store.clone()),
            auth: AuthService::new(store.clone(), tokens),
            store,
        }
    }
}

#[derive(Deserialize, Debug, Clone, ToSchema, Validate)]
pub struct UserCreate {
    /// Must be a syntactically valid address.
    #[schema(example = "budi@example.com")]
    #[validate(email(message = "value is not a valid email address"))]
    pub email: String,
    /// Plaintext; hashed before it is stored.
    pub password: String,
    #[serde(default)]
    pub full_name: Option<String>,
}

impl UserCreate {
    /// Shape checks serde cannot express. Runs before the request reaches a service.
    pub fn check(&self) -> Result<(), Vec<FieldError>> {
        self.validate().map_err(|errors| field_errors(&errors))
    }
}

/// Flattens `validator` output into body field errors, ordered by field name.
pub fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut out: Vec<FieldError> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            let field = field.to_string();
            errs.iter().map(move |err| FieldError {
                loc: vec!["body".to_string(), field.clone()],
                msg: err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("invalid {}", field)),
                kind: format!("value_error.{}", err.code),
            })
        })
        .collect();
    out.sort_by(|a, b| a.loc.cmp(&b.loc));
    out
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct UserOut {
    pub id: i64,
    pub email: String,
    pub full_name: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserOut {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            full_name: user.full_name,
            is_active: user.is_active,
            created_at: user.created_at,
        }
    }
}

pub const TOKEN_TYPE_BEARER: &str = "bearer";

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct Token {
    pub access_token: String,
    /// Always `bearer`.
    pub token_type: String,
}

impl Token {
    pub fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: TOKEN_TYPE_BEARER.to_string(),
        }
    }
}

fn default_interest_rate() -> f64 {
    DEFAULT_INTEREST_RATE
}

#[derive(Deserialize, Debug, Clone, ToSchema)]
pub struct LoanCreate {
    #[schema(example = 1000.0)]
    pub amount: f64,
    /// Annual rate; 0.2 when omitted.
    #[serde(default = "default_interest_rate")]
    #[schema(default = 0.2)]
    pub interest_rate: f64,
    #[schema(example = 12)]
    pub term_months: i32,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct LoanOut {
    pub id: i64,
    pub amount: f64,
    pub interest_rate: f64,
    pub term_months: i32,
    pub status: LoanStatus,
    pub created_at: DateTime<Utc>,
}

impl From<Loan> for LoanOut {
    fn from(loan: Loan) -> Self {
        Self {
            id: loan.id,
            amount: loan.amount,
            interest_rate: loan.interest_rate,
            term_months: loan.term_months,
            status: loan.status,
            created_at: loan.created_at,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct RootResponse {
    pub message: String,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Error body for everything except validation failures.
#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct ErrorResponse {
    pub detail: String,
}

/// One offending input field.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct FieldError {
    /// Location, e.g. `["body", "email"]` or `["path", "loan_id"]`.
    pub loc: Vec<String>,
    pub msg: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl FieldError {
    pub fn new(loc: &[&str], msg: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            loc: loc.iter().map(|s| s.to_string()).collect(),
            msg: msg.into(),
            kind: kind.into(),
        }
    }
}

/// Error body for validation failures (422).
#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct ValidationErrorResponse {
    pub detail: Vec<FieldError>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::NewLoan;

    fn user(email: &str) -> UserCreate {
        UserCreate {
            email: email.to_string(),
            password: "pw".to_string(),
            full_name: None,
        }
    }

    #[test]
    fn email_syntax() {
        for ok in ["budi@example.com", "a.b+tag@sub.example.co.id", "user@bücher.de"] {
            assert!(user(ok).check().is_ok(), "{ok} should be valid");
        }
        for bad in [
            "",
            "plain",
            "@example.com",
            "a@",
            "a b@c.com",
            "a@@b.com",
            "<>@example.com",
            "a(b)@example.com",
            "\"@example.com",
        ] {
            assert!(user(bad).check().is_err(), "{bad} should be invalid");
        }
    }

    #[test]
    fn user_create_validation_points_at_email() {
        let errors = user("nope").check().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].loc, vec!["body", "email"]);
        assert_eq!(errors[0].msg, "value is not a valid email address");
        assert_eq!(errors[0].kind, "value_error.email");
    }

    #[test]
    fn loan_create_defaults_interest_rate() {
        let input: LoanCreate =
            serde_json::from_value(serde_json::json!({ "amount": 1000, "term_months": 12 }))
                .unwrap();
        assert_eq!(input.interest_rate, 0.2);
        assert_eq!(input.amount, 1000.0);
    }

    #[test]
    fn loan_create_rejects_fractional_term() {
        let res: Result<LoanCreate, _> =
            serde_json::from_value(serde_json::json!({ "amount": 1, "term_months": 1.5 }));
        assert!(res.is_err());
    }

    #[test]
    fn user_out_never_carries_password() {
        let user = User {
            id: 3,
            email: "a@b.co".to_string(),
            hashed_password: "$argon2id$secret".to_string(),
            full_name: Some("A".to_string()),
            is_active: true,
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(UserOut::from(user)).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 5);
        assert!(!obj.contains_key("hashed_password"));
        assert!(!obj.contains_key("password"));
    }

    #[test]
    fn loan_out_is_field_for_field() {
        let loan = NewLoan::pending(250.5, 0.15, 6).with_id(9);
        let out = LoanOut::from(loan.clone());
        assert_eq!(out.id, 9);
        assert_eq!(out.amount, loan.amount);
        assert_eq!(out.interest_rate, loan.interest_rate);
        assert_eq!(out.term_months, loan.term_months);
        assert_eq!(out.created_at, loan.created_at);
        let json = serde_json::to_value(&out).unwrap();
        assert_eq!(json["status"], "pending");
    }

    #[test]
    fn token_type_is_bearer() {
        let json = serde_json::to_value(Token::bearer("abc".to_string())).unwrap();
        assert_eq!(json, serde_json::json!({ "access_token": "abc", "token_type": "bearer" }));
    }
}
