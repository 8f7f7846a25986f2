// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use fitbro_backend::config::Config;
use fitbro_backend::db::Database;
use fitbro_backend::middleware::auth::create_jwt;
use fitbro_backend::models::user::CreateUser;
use fitbro_backend::models::{Role, User};
use fitbro_backend::routes::create_router;
use fitbro_backend::services::password::hash_password;
use fitbro_backend::AppState;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tower::ServiceExt;

static APP_COUNTER: AtomicUsize = AtomicUsize::new(0);

/// Create a test app backed by a private in-memory database.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub async fn create_test_app() -> (Router, Arc<AppState>) {
    let n = APP_COUNTER.fetch_add(1, Ordering::SeqCst);
    let config = Config {
        upload_dir: std::env::temp_dir().join(format!(
            "fitbro-test-static-{}-{}",
            std::process::id(),
            n
        )),
        ..Config::default()
    };
    let db = Database::new_in_memory()
        .await
        .expect("Failed to open in-memory database");

    let state = Arc::new(AppState::new(config, db));
    (create_router(state.clone()), state)
}

/// Insert a user directly and return the stored row.
#[allow(dead_code)]
pub async fn seed_user(
    state: &AppState,
    mobile: &str,
    password: &str,
    role: Role,
    gym_id: Option<i64>,
) -> User {
    let payload = CreateUser {
        name: format!("User {}", mobile),
        mobile: mobile.to_string(),
        email: None,
        password: password.to_string(),
        role,
        gym_id,
    };
    let hash = hash_password(password).expect("hash");
    state
        .db
        .create_user(&payload, &hash)
        .await
        .expect("Failed to seed user")
}

/// Create a test JWT token for `user`.
#[allow(dead_code)]
pub fn token_for(state: &AppState, user: &User) -> String {
    create_test_jwt(&user.mobile, user.role, &user.name, &state.config.jwt_signing_key)
}

/// Create a test JWT token with arbitrary claims.
#[allow(dead_code)]
pub fn create_test_jwt(mobile: &str, role: Role, name: &str, signing_key: &[u8]) -> String {
    create_jwt(mobile, role, name, signing_key, 1).expect("Failed to sign token")
}

/// Seed a FitBro Admin and return a token for it.
#[allow(dead_code)]
pub async fn admin_token(state: &AppState) -> String {
    let admin = seed_user(state, "9000000000", "admin-pass", Role::FitbroAdmin, None).await;
    token_for(state, &admin)
}

/// Send a JSON request and decode the JSON response (Null when empty).
#[allow(dead_code)]
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

/// Create a gym (and its owner) through the API; returns the gym JSON.
#[allow(dead_code)]
pub async fn create_gym(app: &Router, token: &str, name: &str, owner_mobile: &str) -> Value {
    let (status, gym) = send(
        app,
        Method::POST,
        "/gyms",
        Some(token),
        Some(json!({
            "name": name,
            "address": "12 MG Road",
            "owner_mobile": owner_mobile,
            "owner_name": "Owner",
            "owner_email": "owner@example.com",
            "owner_password": "owner-pass",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create gym: {}", gym);
    gym
}

/// Create a membership plan through the API; returns the plan JSON.
#[allow(dead_code)]
pub async fn create_plan(app: &Router, token: &str, gym_id: i64, months: i64) -> Value {
    let (status, plan) = send(
        app,
        Method::POST,
        "/membership-plans",
        Some(token),
        Some(json!({
            "gym_id": gym_id,
            "name": format!("{} month plan", months),
            "duration_months": months,
            "price": 1500.0,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create plan: {}", plan);
    plan
}

/// Enroll a member through the API; returns the member JSON.
#[allow(dead_code)]
pub async fn create_member(
    app: &Router,
    token: &str,
    gym_id: i64,
    plan_id: i64,
    mobile: &str,
    start: &str,
) -> Value {
    let (status, member) = send(
        app,
        Method::POST,
        "/members",
        Some(token),
        Some(json!({
            "gym_id": gym_id,
            "membership_plan_id": plan_id,
            "name": "Ravi",
            "mobile": mobile,
            "join_date": start,
            "membership_start_date": start,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create member: {}", member);
    member
}
