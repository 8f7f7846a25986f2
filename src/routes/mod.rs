// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! HTTP route handlers.

pub mod announcements;
pub mod assessments;
pub mod auth;
pub mod catalog;
pub mod cycle_plans;
pub mod equipment;
pub mod gyms;
pub mod members;
pub mod membership_plans;
pub mod users;
pub mod visitors;
pub mod workout_logs;
pub mod workout_plan_entries;

use crate::error::{AppError, Result};
use crate::middleware::auth::{require_auth, AuthUser};
use crate::models::{Role, User};
use crate::AppState;
use axum::http::{header, Method};
use axum::{middleware, routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Roles allowed to change the exercise catalog.
pub const CATALOG_EDITORS: &[Role] = &[Role::FitbroAdmin, Role::GymOwner, Role::GymInstructor];

/// Roles that may browse across tenants.
pub const PLATFORM_STAFF: &[Role] = &[Role::FitbroAdmin, Role::FitbroOfficer];

/// `?gym_id=` filter shared by tenant-scoped list endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct GymFilter {
    pub gym_id: Option<i64>,
}

/// `?member_id=` filter shared by member-scoped list endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct MemberFilter {
    pub member_id: Option<i64>,
}

/// Load the user row behind an authenticated token.
pub(crate) async fn caller(state: &AppState, user: &AuthUser) -> Result<User> {
    state
        .db
        .get_user_by_mobile(&user.mobile)
        .await?
        .ok_or(AppError::InvalidToken)
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct HealthResponse {
    pub status: String,
    pub build_id: String,
}

/// Health check response
async fn health_check() -> Json<HealthResponse> {
    let build_id = option_env!("BUILD_ID").unwrap_or("unknown").to_string();
    Json(HealthResponse {
        status: "ok".to_string(),
        build_id,
    })
}

/// Every route that needs a bearer token.
fn protected_routes(state: &AppState) -> Router<Arc<AppState>> {
    Router::new()
        .merge(auth::routes())
        .merge(gyms::routes(state.config.max_logo_bytes))
        .merge(users::routes())
        .merge(membership_plans::routes())
        .merge(members::routes())
        .merge(cycle_plans::routes())
        .merge(workout_plan_entries::routes())
        .merge(workout_logs::routes())
        .merge(catalog::routes())
        .merge(equipment::routes())
        .merge(assessments::routes())
        .merge(visitors::routes())
        .merge(announcements::routes())
}

/// Build the complete router with all routes.
pub fn create_router(state: Arc<AppState>) -> Router {
    // CORS layer - allow requests from frontend URL and localhost (for dev)
    let frontend_url = state.config.frontend_url.clone();
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::AllowOrigin::predicate(
            move |origin: &axum::http::HeaderValue, _request_parts: &axum::http::request::Parts| {
                let origin_str = origin.to_str().unwrap_or("");
                origin_str == frontend_url
                    || origin_str.starts_with("http://localhost")
                    || origin_str.starts_with("http://127.0.0.1")
            },
        ))
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT]);

    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/health", get(health_check))
        .merge(auth::public_routes())
        .nest_service("/static", ServeDir::new(&state.config.upload_dir));

    // Protected routes (auth required)
    let protected_routes = protected_routes(&state)
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(middleware::from_fn(
            crate::middleware::security::add_security_headers,
        ))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}
