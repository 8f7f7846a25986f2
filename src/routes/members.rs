// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Member routes. Membership end dates are always derived from the plan.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::extract::ValidatedJson;
use crate::models::member::{CreateMember, UpdateMember};
use crate::models::{Member, MembershipPlan};
use crate::routes::GymFilter;
use crate::services::membership;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/members", get(list_members).post(create_member))
        .route(
            "/members/{id}",
            get(get_member).put(update_member).patch(update_member),
        )
}

async fn load_plan(state: &AppState, id: i64) -> Result<MembershipPlan> {
    state
        .db
        .get_plan(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Membership plan not found".to_string()))
}

async fn ensure_mobile_free(state: &AppState, mobile: &str, exclude_id: Option<i64>) -> Result<()> {
    if state.db.member_mobile_taken(mobile, exclude_id).await? {
        return Err(AppError::Conflict(
            "Member with this mobile already exists".to_string(),
        ));
    }
    Ok(())
}

async fn list_members(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<GymFilter>,
) -> Result<Json<Vec<Member>>> {
    Ok(Json(state.db.list_members(filter.gym_id).await?))
}

async fn get_member(State(state): State<Arc<AppState>>, Path(id): Path<i64>) -> Result<Json<Member>> {
    let member = state
        .db
        .get_member(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Member not found".to_string()))?;
    Ok(Json(member))
}

async fn create_member(
    State(state): State<Arc<AppState>>,
    ValidatedJson(payload): ValidatedJson<CreateMember>,
) -> Result<(StatusCode, Json<Member>)> {
    state.db.require("gyms", payload.gym_id, "Gym").await?;
    let plan = load_plan(&state, payload.membership_plan_id).await?;
    ensure_mobile_free(&state, &payload.mobile, None).await?;

    let start = payload.membership_start_date;
    let mut member = Member {
        id: 0,
        gym_id: payload.gym_id,
        membership_plan_id: plan.id,
        name: payload.name,
        mobile: payload.mobile,
        email: payload.email,
        photo_url: payload.photo_url,
        dob: payload.dob,
        gender: payload.gender,
        address: payload.address,
        join_date: payload.join_date,
        active: payload.active,
        membership_start_date: start,
        membership_end_date: start,
    };
    membership::assign_plan(&mut member, &plan, start)?;

    let member = state.db.insert_member(&member).await?;
    tracing::info!(
        member_id = member.id,
        plan_id = plan.id,
        end_date = %member.membership_end_date,
        "Enrolled member"
    );
    Ok((StatusCode::CREATED, Json(member)))
}

async fn update_member(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    ValidatedJson(payload): ValidatedJson<UpdateMember>,
) -> Result<Json<Member>> {
    let mut member = state
        .db
        .get_member(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Member not found".to_string()))?;

    if let Some(mobile) = &payload.mobile {
        ensure_mobile_free(&state, mobile, Some(id)).await?;
    }
    if let Some(gym_id) = payload.gym_id {
        state.db.require("gyms", gym_id, "Gym").await?;
    }

    payload.apply_profile(&mut member);

    // A new plan, start date or gym all re-derive the membership window.
    if payload.changes_membership_window() || payload.gym_id.is_some() {
        let plan_id = payload
            .membership_plan_id
            .unwrap_or(member.membership_plan_id);
        let plan = load_plan(&state, plan_id).await?;
        let start = payload
            .membership_start_date
            .unwrap_or(member.membership_start_date);
        membership::assign_plan(&mut member, &plan, start)?;
    }

    Ok(Json(state.db.update_member(&member).await?))
}
