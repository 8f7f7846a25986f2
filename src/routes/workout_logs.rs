// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Completed workout routes.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::extract::ValidatedJson;
use crate::models::cycle::{CreateWorkoutLog, UpdateWorkoutLog};
use crate::models::WorkoutLog;
use crate::routes::MemberFilter;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/workout-logs", get(list_logs).post(create_log))
        .route("/workout-logs/{id}", get(get_log).patch(update_log))
}

/// The entry must sit in the cycle and the cycle must belong to the member.
async fn check_chain(state: &AppState, member_id: i64, cycle_plan_id: i64, entry_id: i64) -> Result<()> {
    state.db.require("members", member_id, "Member").await?;

    let cycle = state
        .db
        .get_cycle(cycle_plan_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Cycle plan not found".to_string()))?;
    if cycle.member_id != member_id {
        return Err(AppError::BadRequest(format!(
            "Cycle plan {} does not belong to member {}",
            cycle_plan_id, member_id
        )));
    }

    let entry = state
        .db
        .get_entry(entry_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Workout plan entry not found".to_string()))?;
    if entry.cycle_plan_id != cycle_plan_id {
        return Err(AppError::BadRequest(format!(
            "Workout plan entry {} does not belong to cycle plan {}",
            entry_id, cycle_plan_id
        )));
    }
    Ok(())
}

async fn list_logs(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<MemberFilter>,
) -> Result<Json<Vec<WorkoutLog>>> {
    Ok(Json(state.db.list_logs(filter.member_id).await?))
}

async fn get_log(State(state): State<Arc<AppState>>, Path(id): Path<i64>) -> Result<Json<WorkoutLog>> {
    let log = state
        .db
        .get_log(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Workout log not found".to_string()))?;
    Ok(Json(log))
}

async fn create_log(
    State(state): State<Arc<AppState>>,
    ValidatedJson(payload): ValidatedJson<CreateWorkoutLog>,
) -> Result<(StatusCode, Json<WorkoutLog>)> {
    check_chain(
        &state,
        payload.member_id,
        payload.cycle_plan_id,
        payload.workout_plan_entry_id,
    )
    .await?;

    let log = state.db.insert_log(&payload).await?;
    Ok((StatusCode::CREATED, Json(log)))
}

async fn update_log(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    ValidatedJson(payload): ValidatedJson<UpdateWorkoutLog>,
) -> Result<Json<WorkoutLog>> {
    let mut log = state
        .db
        .get_log(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Workout log not found".to_string()))?;

    payload.apply(&mut log);
    check_chain(&state, log.member_id, log.cycle_plan_id, log.workout_plan_entry_id).await?;

    Ok(Json(state.db.update_log(&log).await?))
}
