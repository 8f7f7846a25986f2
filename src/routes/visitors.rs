// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Walk-in visitor (lead) routes and their follow-up history.

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
use crate::models::visitor::{
    CreateFollowUp, CreateVisitor, RegistrationOutcome, UpdateVisitor, VisitorDetail,
};
use crate::models::{Visitor, VisitorFollowUp};
use crate::routes::{caller, GymFilter};
use crate::services::visitor;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/visitors", get(list_visitors).post(register_visitor))
        .route("/visitors/{id}", get(get_visitor).put(update_visitor))
        .route(
            "/visitor-followup/{id}/",
            get(list_followups).post(add_followup),
        )
        .route(
            "/visitor-followup/{id}",
            get(list_followups).post(add_followup),
        )
}

async fn load_visitor(state: &AppState, id: i64) -> Result<Visitor> {
    state
        .db
        .get_visitor(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Visitor not found".to_string()))
}

/// Register a walk-in. The status code tells the front desk whether this
/// is a new lead (201), an existing member (409) or a returning lead (200).
async fn register_visitor(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    ValidatedJson(payload): ValidatedJson<CreateVisitor>,
) -> Result<(StatusCode, Json<RegistrationOutcome>)> {
    let staff = caller(&state, &user).await?;
    let gym_id = visitor::resolve_gym_id(payload.gym_id, staff.gym_id)?;
    state.db.require("gyms", gym_id, "Gym").await?;
    if let Some(plan_id) = payload.interested_plan_id {
        state
            .db
            .require("membership_plans", plan_id, "Membership plan")
            .await?;
    }

    let outcome = visitor::register(&state.db, gym_id, &payload, &user.name).await?;
    let status = match outcome {
        RegistrationOutcome::Created { .. } => StatusCode::CREATED,
        RegistrationOutcome::AlreadyConverted { .. } => StatusCode::CONFLICT,
        RegistrationOutcome::WelcomeBack { .. } => StatusCode::OK,
    };
    Ok((status, Json(outcome)))
}

async fn list_visitors(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<GymFilter>,
) -> Result<Json<Vec<Visitor>>> {
    Ok(Json(state.db.list_visitors(filter.gym_id).await?))
}

async fn get_visitor(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<VisitorDetail>> {
    let visitor = load_visitor(&state, id).await?;
    let followups = state.db.list_followups(id).await?;
    Ok(Json(VisitorDetail { visitor, followups }))
}

async fn update_visitor(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i64>,
    ValidatedJson(payload): ValidatedJson<UpdateVisitor>,
) -> Result<Json<Visitor>> {
    let mut existing = load_visitor(&state, id).await?;
    let read_status = existing.status;

    if let Some(next) = payload.status {
        visitor::check_transition(existing.status, next)?;
        existing.status = next;
    }
    if let Some(plan_id) = payload.interested_plan_id {
        state
            .db
            .require("membership_plans", plan_id, "Membership plan")
            .await?;
    }

    payload.apply(&mut existing);
    existing.updated_by = Some(user.name.clone());

    Ok(Json(state.db.update_visitor(&existing, read_status).await?))
}

async fn list_followups(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<VisitorFollowUp>>> {
    state.db.require("visitors", id, "Visitor").await?;
    Ok(Json(state.db.list_followups(id).await?))
}

async fn add_followup(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i64>,
    ValidatedJson(payload): ValidatedJson<CreateFollowUp>,
) -> Result<(StatusCode, Json<VisitorFollowUp>)> {
    let existing = load_visitor(&state, id).await?;
    if let Some(next) = payload.status {
        visitor::check_transition(existing.status, next)?;
    }
    let staff = caller(&state, &user).await?;

    let followup = state
        .db
        .add_followup(id, &payload, existing.status, Some(staff.id), &user.name)
        .await?;

    tracing::info!(visitor_id = id, followup_id = followup.id, "Recorded visitor follow-up");
    Ok((StatusCode::CREATED, Json(followup)))
}
