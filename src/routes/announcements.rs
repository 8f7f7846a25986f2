// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Gym announcement routes.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get},
    Extension, Json, Router,
};
use std::sync::Arc;

use crate::error::Result;
use crate::extract::ValidatedJson;
use crate::middleware::AuthUser;
use crate::models::announcement::CreateAnnouncement;
use crate::models::Announcement;
use crate::routes::{caller, GymFilter};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/announcements",
            get(list_announcements).post(create_announcement),
        )
        .route("/announcements/{id}", delete(delete_announcement))
}

async fn list_announcements(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<GymFilter>,
) -> Result<Json<Vec<Announcement>>> {
    Ok(Json(state.db.list_announcements(filter.gym_id).await?))
}

async fn create_announcement(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    ValidatedJson(payload): ValidatedJson<CreateAnnouncement>,
) -> Result<(StatusCode, Json<Announcement>)> {
    state.db.require("gyms", payload.gym_id, "Gym").await?;
    let author = caller(&state, &user).await?;

    let announcement = state
        .db
        .insert_announcement(&payload, Some(author.id))
        .await?;
    Ok((StatusCode::CREATED, Json(announcement)))
}

async fn delete_announcement(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    state.db.delete_announcement(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
