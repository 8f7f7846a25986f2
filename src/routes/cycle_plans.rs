// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Training cycle routes.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::extract::ValidatedJson;
use crate::models::cycle::{CreateCyclePlan, UpdateCyclePlan};
use crate::models::CyclePlan;
use crate::services::cycle;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/cycle-plans", get(list_cycles).post(create_cycle))
        .route("/cycle-plans/{id}", get(get_cycle).put(update_cycle))
        .route("/cycle-plans/{id}/delete", put(delete_cycle))
}

#[derive(Debug, Default, Deserialize)]
pub struct CycleQuery {
    pub member_id: Option<i64>,
    #[serde(default)]
    pub include_deleted: bool,
}

async fn list_cycles(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CycleQuery>,
) -> Result<Json<Vec<CyclePlan>>> {
    Ok(Json(
        state
            .db
            .list_cycles(query.member_id, query.include_deleted)
            .await?,
    ))
}

/// Direct lookup; soft-deleted cycles are still returned here.
async fn get_cycle(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<CyclePlan>> {
    let cycle = state
        .db
        .get_cycle(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Cycle plan not found".to_string()))?;
    Ok(Json(cycle))
}

async fn create_cycle(
    State(state): State<Arc<AppState>>,
    ValidatedJson(payload): ValidatedJson<CreateCyclePlan>,
) -> Result<(StatusCode, Json<CyclePlan>)> {
    cycle::check_window(payload.start_date, payload.end_date)?;
    state.db.require("members", payload.member_id, "Member").await?;
    cycle::check_admission(&state.db, payload.member_id, payload.status, None).await?;

    let created = state.db.insert_cycle(&payload).await?;
    tracing::info!(
        cycle_id = created.id,
        member_id = created.member_id,
        status = created.status.as_str(),
        "Created cycle plan"
    );
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_cycle(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    ValidatedJson(payload): ValidatedJson<UpdateCyclePlan>,
) -> Result<Json<CyclePlan>> {
    let mut existing = state
        .db
        .get_cycle(id)
        .await?
        .filter(|c| !c.is_deleted)
        .ok_or_else(|| AppError::NotFound("Cycle plan not found".to_string()))?;

    if let Some(member_id) = payload.member_id {
        state.db.require("members", member_id, "Member").await?;
    }
    payload.apply(&mut existing);

    cycle::check_window(existing.start_date, existing.end_date)?;
    cycle::check_admission(&state.db, existing.member_id, existing.status, Some(id)).await?;

    Ok(Json(state.db.update_cycle(&existing).await?))
}

async fn delete_cycle(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<CyclePlan>> {
    let deleted = state.db.soft_delete_cycle(id).await?;
    tracing::info!(cycle_id = id, "Soft-deleted cycle plan");
    Ok(Json(deleted))
}
