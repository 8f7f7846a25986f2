// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Gym (tenant) routes.

use axum::{
    extract::{DefaultBodyLimit, Multipart, Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Extension, Json, Router,
};
use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::extract::ValidatedJson;
use crate::middleware::AuthUser;
use crate::models::gym::{AssignOwner, CreateGym, UpdateGym};
use crate::models::{Gym, Role};
use crate::routes::PLATFORM_STAFF;
use crate::services::password;
use crate::AppState;

/// Multipart framing on top of the logo bytes.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

pub fn routes(max_logo_bytes: usize) -> Router<Arc<AppState>> {
    Router::new()
        .route("/gyms", get(list_gyms).post(create_gym))
        .route("/gyms/{id}", get(get_gym).put(update_gym))
        .route("/gyms/{id}/assign_owner", put(assign_owner))
        .route(
            "/gyms/{id}/upload_logo",
            post(upload_logo).layer(DefaultBodyLimit::max(max_logo_bytes + MULTIPART_OVERHEAD)),
        )
}

async fn load_gym(state: &AppState, id: i64) -> Result<Gym> {
    state
        .db
        .get_gym(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Gym not found".to_string()))
}

async fn list_gyms(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<Gym>>> {
    user.require_roles(&state.config, PLATFORM_STAFF)?;
    Ok(Json(state.db.list_gyms().await?))
}

async fn get_gym(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> Result<Json<Gym>> {
    user.require_roles(
        &state.config,
        &[Role::FitbroAdmin, Role::FitbroOfficer, Role::GymOwner],
    )?;
    Ok(Json(load_gym(&state, id).await?))
}

/// Create a gym and provision its owner account.
async fn create_gym(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    ValidatedJson(payload): ValidatedJson<CreateGym>,
) -> Result<(StatusCode, Json<Gym>)> {
    user.require_roles(&state.config, &[Role::FitbroAdmin])?;

    if state.db.gym_name_taken(&payload.name, None).await? {
        return Err(AppError::Conflict(
            "Gym with this name already exists".to_string(),
        ));
    }
    if state.db.get_user_by_mobile(&payload.owner_mobile).await?.is_some() {
        return Err(AppError::Conflict(
            "User with this mobile already exists".to_string(),
        ));
    }

    let owner_password = payload
        .owner_password
        .as_deref()
        .or(state.config.default_owner_password.as_deref())
        .ok_or_else(|| {
            AppError::Validation(
                "owner_password is required (no default owner password configured)".to_string(),
            )
        })?;
    let hash = password::hash_password(owner_password)?;

    let gym = state.db.create_gym_with_owner(&payload, &hash).await?;
    Ok((StatusCode::CREATED, Json(gym)))
}

async fn update_gym(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i64>,
    ValidatedJson(payload): ValidatedJson<UpdateGym>,
) -> Result<Json<Gym>> {
    user.require_roles(&state.config, &[Role::FitbroAdmin, Role::GymOwner])?;

    let mut gym = load_gym(&state, id).await?;
    if let Some(name) = &payload.name {
        if state.db.gym_name_taken(name, Some(id)).await? {
            return Err(AppError::Conflict(
                "Gym with this name already exists".to_string(),
            ));
        }
    }

    payload.apply(&mut gym);
    Ok(Json(state.db.update_gym(&gym).await?))
}

async fn assign_owner(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i64>,
    ValidatedJson(payload): ValidatedJson<AssignOwner>,
) -> Result<Json<Gym>> {
    user.require_roles(&state.config, &[Role::FitbroAdmin])?;

    let mut gym = load_gym(&state, id).await?;
    gym.owner_mobile = payload.owner_mobile;
    let gym = state.db.update_gym(&gym).await?;

    tracing::info!(gym_id = id, owner_mobile = %gym.owner_mobile, "Reassigned gym owner");
    Ok(Json(gym))
}

/// Store an uploaded logo (multipart field `file`) and record its URL.
async fn upload_logo(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i64>,
    mut multipart: Multipart,
) -> Result<Json<Gym>> {
    user.require_roles(&state.config, &[Role::FitbroAdmin, Role::GymOwner])?;

    let mut gym = load_gym(&state, id).await?;

    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.body_text()))?
    {
        if field.name() == Some("file") {
            let file_name = field.file_name().unwrap_or_default().to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(e.body_text()))?;
            upload = Some((file_name, bytes));
            break;
        }
    }

    let (file_name, bytes) =
        upload.ok_or_else(|| AppError::BadRequest("Missing multipart field 'file'".to_string()))?;

    gym.logo_url = Some(state.logos.store(id, &file_name, &bytes).await?);

    Ok(Json(state.db.update_gym(&gym).await?))
}
