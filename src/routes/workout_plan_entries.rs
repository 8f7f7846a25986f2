// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Planned workout routes.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::db::SwapCounts;
use crate::error::{AppError, Result};
use crate::extract::ValidatedJson;
use crate::models::cycle::{CreateWorkoutPlanEntry, SwapWorkoutDay, UpdateWorkoutPlanEntry};
use crate::models::WorkoutPlanEntry;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/workout-plan-entries",
            get(list_entries).post(create_entry),
        )
        .route(
            "/workout-plan-entries/swap-workout-day",
            post(swap_workout_day),
        )
        .route(
            "/workout-plan-entries/{id}",
            get(get_entry).put(update_entry).delete(delete_entry),
        )
}

#[derive(Debug, Default, Deserialize)]
pub struct EntryQuery {
    pub cycle_plan_id: Option<i64>,
    pub member_id: Option<i64>,
}

async fn require_refs(state: &AppState, workout_id: i64, exercise_id: i64) -> Result<()> {
    state.db.require("workouts", workout_id, "Workout").await?;
    state.db.require("exercises", exercise_id, "Exercise").await
}

async fn list_entries(
    State(state): State<Arc<AppState>>,
    Query(query): Query<EntryQuery>,
) -> Result<Json<Vec<WorkoutPlanEntry>>> {
    Ok(Json(
        state
            .db
            .list_entries(query.cycle_plan_id, query.member_id)
            .await?,
    ))
}

async fn get_entry(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<WorkoutPlanEntry>> {
    let entry = state
        .db
        .get_entry(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Workout plan entry not found".to_string()))?;
    Ok(Json(entry))
}

async fn create_entry(
    State(state): State<Arc<AppState>>,
    ValidatedJson(payload): ValidatedJson<CreateWorkoutPlanEntry>,
) -> Result<(StatusCode, Json<WorkoutPlanEntry>)> {
    state
        .db
        .require("cycle_plans", payload.cycle_plan_id, "Cycle plan")
        .await?;
    require_refs(&state, payload.workout_id, payload.exercise_id).await?;

    let entry = state.db.insert_entry(&payload).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

async fn update_entry(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    ValidatedJson(payload): ValidatedJson<UpdateWorkoutPlanEntry>,
) -> Result<Json<WorkoutPlanEntry>> {
    let mut entry = state
        .db
        .get_entry(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Workout plan entry not found".to_string()))?;

    payload.apply(&mut entry);
    require_refs(&state, entry.workout_id, entry.exercise_id).await?;

    Ok(Json(state.db.update_entry(&entry).await?))
}

async fn delete_entry(State(state): State<Arc<AppState>>, Path(id): Path<i64>) -> Result<StatusCode> {
    state.db.delete_entry(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Move every entry on `from_date` to `to_date` and vice versa.
async fn swap_workout_day(
    State(state): State<Arc<AppState>>,
    ValidatedJson(payload): ValidatedJson<SwapWorkoutDay>,
) -> Result<Json<SwapCounts>> {
    state
        .db
        .require("cycle_plans", payload.cycle_plan_id, "Cycle plan")
        .await?;
    if payload.from_date == payload.to_date {
        return Err(AppError::BadRequest(
            "from_date and to_date must differ".to_string(),
        ));
    }

    let counts = state
        .db
        .swap_entry_days(payload.cycle_plan_id, payload.from_date, payload.to_date)
        .await?;
    Ok(Json(counts))
}
