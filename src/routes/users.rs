// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Staff account routes.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};
use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::extract::ValidatedJson;
use crate::middleware::AuthUser;
use crate::models::user::{CreateUser, UpdateUser};
use crate::models::{Role, User};
use crate::routes::{GymFilter, PLATFORM_STAFF};
use crate::services::password;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route("/users/{id}", get(get_user).patch(update_user))
}

async fn ensure_mobile_free(state: &AppState, mobile: &str, exclude_id: Option<i64>) -> Result<()> {
    match state.db.get_user_by_mobile(mobile).await? {
        Some(existing) if Some(existing.id) != exclude_id => Err(AppError::Conflict(
            "User with this mobile already exists".to_string(),
        )),
        _ => Ok(()),
    }
}

async fn list_users(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(filter): Query<GymFilter>,
) -> Result<Json<Vec<User>>> {
    user.require_roles(&state.config, PLATFORM_STAFF)?;
    Ok(Json(state.db.list_users(filter.gym_id).await?))
}

async fn get_user(State(state): State<Arc<AppState>>, Path(id): Path<i64>) -> Result<Json<User>> {
    let user = state
        .db
        .get_user(id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
    Ok(Json(user))
}

async fn create_user(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    ValidatedJson(payload): ValidatedJson<CreateUser>,
) -> Result<(StatusCode, Json<User>)> {
    user.require_roles(&state.config, &[Role::FitbroAdmin])?;

    ensure_mobile_free(&state, &payload.mobile, None).await?;
    if let Some(gym_id) = payload.gym_id {
        state.db.require("gyms", gym_id, "Gym").await?;
    }

    let hash = password::hash_password(&payload.password)?;
    let created = state.db.create_user(&payload, &hash).await?;

    tracing::info!(user_id = created.id, role = %created.role, "Created user");
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_user(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i64>,
    ValidatedJson(payload): ValidatedJson<UpdateUser>,
) -> Result<Json<User>> {
    user.require_roles(&state.config, &[Role::FitbroAdmin])?;

    let mut existing = state
        .db
        .get_user(id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    if let Some(mobile) = &payload.mobile {
        ensure_mobile_free(&state, mobile, Some(id)).await?;
    }
    if let Some(gym_id) = payload.gym_id {
        state.db.require("gyms", gym_id, "Gym").await?;
    }

    if let Some(new_password) = &payload.password {
        existing.password_hash = password::hash_password(new_password)?;
    }
    payload.apply(&mut existing);

    Ok(Json(state.db.update_user(&existing).await?))
}
