// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Gym equipment inventory routes.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::extract::ValidatedJson;
use crate::models::catalog::{CreateEquipment, UpdateEquipment};
use crate::models::Equipment;
use crate::routes::GymFilter;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/equipment", get(list_equipment).post(create_equipment))
        .route(
            "/equipment/{id}",
            get(get_equipment)
                .put(update_equipment)
                .delete(delete_equipment),
        )
}

async fn list_equipment(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<GymFilter>,
) -> Result<Json<Vec<Equipment>>> {
    Ok(Json(state.db.list_equipment(filter.gym_id).await?))
}

async fn get_equipment(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Equipment>> {
    let equipment = state
        .db
        .get_equipment(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Equipment not found".to_string()))?;
    Ok(Json(equipment))
}

async fn create_equipment(
    State(state): State<Arc<AppState>>,
    ValidatedJson(payload): ValidatedJson<CreateEquipment>,
) -> Result<(StatusCode, Json<Equipment>)> {
    state.db.require("gyms", payload.gym_id, "Gym").await?;
    let equipment = state.db.insert_equipment(&payload).await?;
    Ok((StatusCode::CREATED, Json(equipment)))
}

async fn update_equipment(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    ValidatedJson(payload): ValidatedJson<UpdateEquipment>,
) -> Result<Json<Equipment>> {
    let mut equipment = state
        .db
        .get_equipment(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Equipment not found".to_string()))?;
    payload.apply(&mut equipment);
    Ok(Json(state.db.update_equipment(&equipment).await?))
}

async fn delete_equipment(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    state.db.delete_equipment(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
