#![allow(dead_code)]

use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use chrono::Duration;
use marikaya_api::domain::model::{Loan, NewLoan, NewPayment, NewUser, Payment, User};
use marikaya_api::storage::{StorageError, StorageResult};
use marikaya_api::{transport, MemoryStore, Store, TokenIssuer};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

pub const TEST_SECRET: &[u8] = b"integration-test-secret";

/// Full router over a fresh in-memory store.
pub fn test_app() -> Router {
    app_with_store(MemoryStore::new_shared())
}

pub fn app_with_store(store: Arc<dyn Store>) -> Router {
    let tokens = TokenIssuer::new(TEST_SECRET, Duration::minutes(30));
    transport::http::create_router(transport::http::AppState::new(store, tokens))
}

/// Driver message that must never reach a client.
pub const DRIVER_FAILURE: &str = "pool timed out while waiting for an open connection";

/// Store whose every call fails as if the connection pool were exhausted.
pub struct UnreachableStore;

fn pool_timed_out<T>() -> StorageResult<T> {
    Err(StorageError::Database(sqlx::Error::PoolTimedOut))
}

#[async_trait::async_trait]
impl Store for UnreachableStore {
    async fn insert_user(&self, _user: NewUser) -> StorageResult<User> {
        pool_timed_out()
    }

    async fn find_user(&self, _id: i64) -> StorageResult<Option<User>> {
        pool_timed_out()
    }

    async fn find_user_by_email(&self, _email: &str) -> StorageResult<Option<User>> {
        pool_timed_out()
    }

    async fn insert_loan(&self, _loan: NewLoan) -> StorageResult<Loan> {
        pool_timed_out()
    }

    async fn find_loan(&self, _id: i64) -> StorageResult<Option<Loan>> {
        pool_timed_out()
    }

    async fn loans_for_user(&self, _user_id: i64) -> StorageResult<Vec<Loan>> {
        pool_timed_out()
    }

    async fn insert_payment(&self, _payment: NewPayment) -> StorageResult<Payment> {
        pool_timed_out()
    }

    async fn payments_for_loan(&self, _loan_id: i64) -> StorageResult<Vec<Payment>> {
        pool_timed_out()
    }

    async fn ping(&self) -> StorageResult<()> {
        pool_timed_out()
    }
}

pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

pub async fn post_json(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::GET, uri, None).await
}
