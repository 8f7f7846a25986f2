// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Exercise catalog routes: programs, workouts and exercises.
//!
//! All three tables share the master/override layout, so every write
//! goes through [`catalog::validate_node`] before it reaches the store.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::db::CatalogTable;
use crate::error::{AppError, Result};
use crate::extract::ValidatedJson;
use crate::middleware::AuthUser;
use crate::models::catalog::{
    CreateExercise, CreateProgram, CreateWorkout, UpdateExercise, UpdateProgram, UpdateWorkout,
};
use crate::models::{Exercise, Program, Workout};
use crate::routes::{GymFilter, CATALOG_EDITORS};
use crate::services::catalog;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/programs", get(list_programs).post(create_program))
        .route(
            "/programs/{id}",
            get(get_program).put(update_program).delete(delete_program),
        )
        .route("/workouts", get(list_workouts).post(create_workout))
        .route(
            "/workouts/{id}",
            get(get_workout).put(update_workout).delete(delete_workout),
        )
        .route("/exercises", get(list_exercises).post(create_exercise))
        .route(
            "/exercises/{id}",
            get(get_exercise)
                .put(update_exercise)
                .patch(update_exercise)
                .delete(delete_exercise),
        )
}

// ─── Programs ────────────────────────────────────────────────

async fn list_programs(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<GymFilter>,
) -> Result<Json<Vec<Program>>> {
    Ok(Json(state.db.list_programs(filter.gym_id).await?))
}

async fn get_program(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Program>> {
    let program = state
        .db
        .get_program(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Program not found".to_string()))?;
    Ok(Json(program))
}

async fn create_program(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    ValidatedJson(payload): ValidatedJson<CreateProgram>,
) -> Result<(StatusCode, Json<Program>)> {
    user.require_roles(&state.config, CATALOG_EDITORS)?;
    catalog::validate_node(
        &state.db,
        CatalogTable::Programs,
        None,
        payload.kind,
        payload.gym_id,
        payload.parent_id,
    )
    .await?;

    let program = state.db.insert_program(&payload).await?;
    Ok((StatusCode::CREATED, Json(program)))
}

async fn update_program(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i64>,
    ValidatedJson(payload): ValidatedJson<UpdateProgram>,
) -> Result<Json<Program>> {
    user.require_roles(&state.config, CATALOG_EDITORS)?;

    let mut program = state
        .db
        .get_program(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Program not found".to_string()))?;
    let workout_ids = payload.apply(&mut program);

    catalog::validate_node(
        &state.db,
        CatalogTable::Programs,
        Some(id),
        program.kind,
        program.gym_id,
        program.parent_id,
    )
    .await?;

    Ok(Json(
        state
            .db
            .update_program(&program, workout_ids.as_deref())
            .await?,
    ))
}

async fn delete_program(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    user.require_roles(&state.config, CATALOG_EDITORS)?;
    state.db.delete_program(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ─── Workouts ────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct WorkoutQuery {
    pub program_id: Option<i64>,
    pub gym_id: Option<i64>,
}

async fn list_workouts(
    State(state): State<Arc<AppState>>,
    Query(query): Query<WorkoutQuery>,
) -> Result<Json<Vec<Workout>>> {
    Ok(Json(
        state
            .db
            .list_workouts(query.program_id, query.gym_id)
            .await?,
    ))
}

async fn get_workout(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Workout>> {
    let workout = state
        .db
        .get_workout(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Workout not found".to_string()))?;
    Ok(Json(workout))
}

async fn create_workout(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    ValidatedJson(payload): ValidatedJson<CreateWorkout>,
) -> Result<(StatusCode, Json<Workout>)> {
    user.require_roles(&state.config, CATALOG_EDITORS)?;
    if let Some(program_id) = payload.program_id {
        state.db.require("programs", program_id, "Program").await?;
    }
    catalog::validate_node(
        &state.db,
        CatalogTable::Workouts,
        None,
        payload.kind,
        payload.gym_id,
        payload.parent_id,
    )
    .await?;

    let workout = state.db.insert_workout(&payload).await?;
    Ok((StatusCode::CREATED, Json(workout)))
}

async fn update_workout(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i64>,
    ValidatedJson(payload): ValidatedJson<UpdateWorkout>,
) -> Result<Json<Workout>> {
    user.require_roles(&state.config, CATALOG_EDITORS)?;

    let mut workout = state
        .db
        .get_workout(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Workout not found".to_string()))?;
    if let Some(program_id) = payload.program_id {
        state.db.require("programs", program_id, "Program").await?;
    }
    payload.apply(&mut workout);

    catalog::validate_node(
        &state.db,
        CatalogTable::Workouts,
        Some(id),
        workout.kind,
        workout.gym_id,
        workout.parent_id,
    )
    .await?;

    Ok(Json(state.db.update_workout(&workout).await?))
}

async fn delete_workout(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    user.require_roles(&state.config, CATALOG_EDITORS)?;
    state.db.delete_workout(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ─── Exercises ───────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct ExerciseQuery {
    pub workout_id: Option<i64>,
    pub gym_id: Option<i64>,
}

async fn require_exercise_refs(
    state: &AppState,
    workout_id: i64,
    equipment_id: Option<i64>,
) -> Result<()> {
    state.db.require("workouts", workout_id, "Workout").await?;
    if let Some(equipment_id) = equipment_id {
        state.db.require("equipment", equipment_id, "Equipment").await?;
    }
    Ok(())
}

async fn list_exercises(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ExerciseQuery>,
) -> Result<Json<Vec<Exercise>>> {
    Ok(Json(
        state
            .db
            .list_exercises(query.workout_id, query.gym_id)
            .await?,
    ))
}

async fn get_exercise(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Exercise>> {
    let exercise = state
        .db
        .get_exercise(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Exercise not found".to_string()))?;
    Ok(Json(exercise))
}

async fn create_exercise(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    ValidatedJson(payload): ValidatedJson<CreateExercise>,
) -> Result<(StatusCode, Json<Exercise>)> {
    user.require_roles(&state.config, CATALOG_EDITORS)?;
    require_exercise_refs(&state, payload.workout_id, payload.equipment_id).await?;
    catalog::validate_node(
        &state.db,
        CatalogTable::Exercises,
        None,
        payload.kind,
        payload.gym_id,
        payload.parent_id,
    )
    .await?;

    let exercise = state.db.insert_exercise(&payload).await?;
    Ok((StatusCode::CREATED, Json(exercise)))
}

async fn update_exercise(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i64>,
    ValidatedJson(payload): ValidatedJson<UpdateExercise>,
) -> Result<Json<Exercise>> {
    user.require_roles(&state.config, CATALOG_EDITORS)?;

    let mut exercise = state
        .db
        .get_exercise(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Exercise not found".to_string()))?;
    payload.apply(&mut exercise);

    require_exercise_refs(&state, exercise.workout_id, exercise.equipment_id).await?;
    catalog::validate_node(
        &state.db,
        CatalogTable::Exercises,
        Some(id),
        exercise.kind,
        exercise.gym_id,
        exercise.parent_id,
    )
    .await?;

    Ok(Json(state.db.update_exercise(&exercise).await?))
}

async fn delete_exercise(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    user.require_roles(&state.config, CATALOG_EDITORS)?;
    state.db.delete_exercise(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
