// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Gym onboarding and logo upload tests.

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};
use fitbro_backend::error::AppError;
use fitbro_backend::models::gym::CreateGym;
use serde_json::json;
use tower::ServiceExt;

mod common;
use common::{admin_token, create_gym, create_test_app, send};

#[tokio::test]
async fn test_create_gym_provisions_owner() {
    let (app, state) = create_test_app().await;
    let admin = admin_token(&state).await;
    let gym = create_gym(&app, &admin, "Powerhouse", "9700003000").await;
    assert_eq!(gym["is_active"], true);
    assert!(gym["logo_url"].is_null());

    let (status, login) = send(
        &app,
        Method::POST,
        "/auth/login",
        None,
        Some(json!({"mobile": "9700003000", "password": "owner-pass"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(login["role"], "Gym Owner");

    let owner_token = login["access_token"].as_str().unwrap();
    let (status, me) = send(&app, Method::GET, "/auth/me", Some(owner_token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["gym_id"], gym["id"]);

    // Owners may read their gym but not list every tenant.
    let (status, _) = send(
        &app,
        Method::GET,
        &format!("/gyms/{}", gym["id"]),
        Some(owner_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, Method::GET, "/gyms", Some(owner_token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_store_duplicate_name_has_readable_conflict() {
    let (_app, state) = create_test_app().await;
    let gym = |owner_mobile: &str| CreateGym {
        name: "Twin Gym".to_string(),
        address: None,
        contract_start: None,
        contract_end: None,
        recurring_revenue_start: None,
        owner_mobile: owner_mobile.to_string(),
        owner_name: "Twin Owner".to_string(),
        owner_email: "twin@example.com".to_string(),
        owner_password: None,
    };

    state
        .db
        .create_gym_with_owner(&gym("9700009001"), "hash")
        .await
        .unwrap();
    match state.db.create_gym_with_owner(&gym("9700009002"), "hash").await {
        Err(AppError::Conflict(msg)) => assert_eq!(msg, "Gym with this name already exists"),
        other => panic!("expected conflict, got {:?}", other),
    }
    // The owner row of the failed insert was rolled back with it.
    assert!(state.db.get_user_by_mobile("9700009002").await.unwrap().is_none());
}

#[tokio::test]
async fn test_duplicate_gym_name_and_owner() {
    let (app, state) = create_test_app().await;
    let admin = admin_token(&state).await;
    create_gym(&app, &admin, "Unique Fitness", "9700003001").await;

    let attempt = |name: &str, mobile: &str| {
        json!({
            "name": name,
            "owner_mobile": mobile,
            "owner_name": "Owner",
            "owner_email": "owner@example.com",
            "owner_password": "owner-pass",
        })
    };

    let (status, _) = send(
        &app,
        Method::POST,
        "/gyms",
        Some(&admin),
        Some(attempt("Unique Fitness", "9700003002")),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send(
        &app,
        Method::POST,
        "/gyms",
        Some(&admin),
        Some(attempt("Another Fitness", "9700003001")),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    // Neither failed attempt left a gym behind.
    let (_, gyms) = send(&app, Method::GET, "/gyms", Some(&admin), None).await;
    assert_eq!(gyms.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_owner_password_required_without_default() {
    let (app, state) = create_test_app().await;
    let admin = admin_token(&state).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/gyms",
        Some(&admin),
        Some(json!({
            "name": "No Password Gym",
            "owner_mobile": "9700003003",
            "owner_name": "Owner",
            "owner_email": "owner@example.com",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "validation_error");
}

#[tokio::test]
async fn test_update_and_assign_owner() {
    let (app, state) = create_test_app().await;
    let admin = admin_token(&state).await;
    let first = create_gym(&app, &admin, "First", "9700003004").await;
    let second = create_gym(&app, &admin, "Second", "9700003005").await;

    let (status, _) = send(
        &app,
        Method::PUT,
        &format!("/gyms/{}", second["id"]),
        Some(&admin),
        Some(json!({"name": "First"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, renamed) = send(
        &app,
        Method::PUT,
        &format!("/gyms/{}", first["id"]),
        Some(&admin),
        Some(json!({"name": "First Renamed", "address": "New address"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(renamed["name"], "First Renamed");
    assert_eq!(renamed["owner_mobile"], "9700003004");

    let (status, reassigned) = send(
        &app,
        Method::PUT,
        &format!("/gyms/{}/assign_owner", first["id"]),
        Some(&admin),
        Some(json!({"owner_mobile": "9700003099"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(reassigned["owner_mobile"], "9700003099");
}

fn multipart_request(uri: &str, token: &str, file_name: &str, bytes: &[u8]) -> Request<Body> {
    let boundary = "fitbro-test-boundary";
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{b}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{f}\"\r\nContent-Type: application/octet-stream\r\n\r\n",
            b = boundary,
            f = file_name
        )
        .as_bytes(),
    );
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{}--\r\n", boundary).as_bytes());

    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", boundary),
        )
        .body(Body::from(body))
        .unwrap()
}

#[tokio::test]
async fn test_logo_upload_and_serve() {
    let (app, state) = create_test_app().await;
    let admin = admin_token(&state).await;
    let gym = create_gym(&app, &admin, "Logo Gym", "9700003006").await;
    let uri = format!("/gyms/{}/upload_logo", gym["id"]);

    let response = app
        .clone()
        .oneshot(multipart_request(&uri, &admin, "Logo.PNG", b"\x89PNG fake image"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let updated: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    let logo_url = updated["logo_url"].as_str().unwrap().to_string();
    assert!(logo_url.starts_with(&format!("/static/logos/gym_{}_", gym["id"])));
    assert!(logo_url.ends_with(".png"));

    let response = app
        .clone()
        .oneshot(Request::builder().uri(&logo_url).body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let served = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&served[..], b"\x89PNG fake image");

    // Different content never overwrites the first file.
    let response = app
        .clone()
        .oneshot(multipart_request(&uri, &admin, "logo.png", b"\x89PNG second image"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let second: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_ne!(second["logo_url"].as_str().unwrap(), logo_url);
}

#[tokio::test]
async fn test_logo_rejects_unknown_extension() {
    let (app, state) = create_test_app().await;
    let admin = admin_token(&state).await;
    let gym = create_gym(&app, &admin, "Exe Gym", "9700003007").await;

    let response = app
        .oneshot(multipart_request(
            &format!("/gyms/{}/upload_logo", gym["id"]),
            &admin,
            "logo.exe",
            b"MZ",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
