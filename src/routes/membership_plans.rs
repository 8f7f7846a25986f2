// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Membership plan routes, including the brief listing shown at the front desk.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::extract::ValidatedJson;
use crate::models::membership_plan::{CreateMembershipPlan, PlanBrief, UpdateMembershipPlan};
use crate::models::MembershipPlan;
use crate::routes::GymFilter;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/membership-plans", get(list_plans).post(create_plan))
        .route(
            "/membership-plans/{id}",
            get(get_plan).put(update_plan).delete(delete_plan),
        )
        .route("/visitors/gym/{gym_id}/plans", get(list_gym_plan_briefs))
}

async fn require_programs(state: &AppState, program_ids: &[i64]) -> Result<()> {
    for id in program_ids {
        state.db.require("programs", *id, "Program").await?;
    }
    Ok(())
}

async fn list_plans(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<GymFilter>,
) -> Result<Json<Vec<MembershipPlan>>> {
    Ok(Json(state.db.list_plans(filter.gym_id).await?))
}

async fn get_plan(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<MembershipPlan>> {
    let plan = state
        .db
        .get_plan(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Membership plan not found".to_string()))?;
    Ok(Json(plan))
}

async fn create_plan(
    State(state): State<Arc<AppState>>,
    ValidatedJson(payload): ValidatedJson<CreateMembershipPlan>,
) -> Result<(StatusCode, Json<MembershipPlan>)> {
    state.db.require("gyms", payload.gym_id, "Gym").await?;
    require_programs(&state, &payload.program_ids).await?;

    let plan = state.db.create_plan(&payload).await?;
    Ok((StatusCode::CREATED, Json(plan)))
}

async fn update_plan(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    ValidatedJson(payload): ValidatedJson<UpdateMembershipPlan>,
) -> Result<Json<MembershipPlan>> {
    let mut plan = state
        .db
        .get_plan(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Membership plan not found".to_string()))?;

    let program_ids = payload.apply(&mut plan);
    if let Some(ids) = &program_ids {
        require_programs(&state, ids).await?;
    }

    // Existing members keep the end date computed when they joined.
    Ok(Json(
        state.db.update_plan(&plan, program_ids.as_deref()).await?,
    ))
}

async fn delete_plan(State(state): State<Arc<AppState>>, Path(id): Path<i64>) -> Result<StatusCode> {
    state.db.delete_plan(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_gym_plan_briefs(
    State(state): State<Arc<AppState>>,
    Path(gym_id): Path<i64>,
) -> Result<Json<Vec<PlanBrief>>> {
    state.db.require("gyms", gym_id, "Gym").await?;
    Ok(Json(state.db.list_plan_briefs(gym_id).await?))
}
