// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Fitness assessment routes: templates and recorded results.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, patch},
    Json, Router,
};
use serde_json::{Map, Value};
use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::extract::ValidatedJson;
use crate::models::assessment::{
    CreateAssessmentResult, CreateAssessmentTemplate, UpdateAssessmentResult,
    UpdateAssessmentTemplate,
};
use crate::models::{AssessmentResult, AssessmentTemplate};
use crate::routes::{GymFilter, MemberFilter};
use crate::services::catalog;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/assessment-templates",
            get(list_templates).post(create_template),
        )
        .route(
            "/assessment-templates/{id}",
            patch(update_template).delete(delete_template),
        )
        .route("/assessment-results", get(list_results).post(create_result))
        .route(
            "/assessment-results/{id}",
            patch(update_result).delete(delete_result),
        )
}

async fn load_template(state: &AppState, id: i64) -> Result<AssessmentTemplate> {
    state
        .db
        .get_template(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Assessment template not found".to_string()))
}

/// Every key in `values` must name an attribute of `template`.
fn check_values(values: &Map<String, Value>, template: &AssessmentTemplate) -> Result<()> {
    let unknown = AssessmentResult::unknown_keys(values, template);
    if unknown.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(format!(
            "Unknown attributes for template '{}': {}",
            template.name,
            unknown.join(", ")
        )))
    }
}

// ─── Templates ───────────────────────────────────────────────

async fn list_templates(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<GymFilter>,
) -> Result<Json<Vec<AssessmentTemplate>>> {
    Ok(Json(state.db.list_templates(filter.gym_id).await?))
}

async fn create_template(
    State(state): State<Arc<AppState>>,
    ValidatedJson(payload): ValidatedJson<CreateAssessmentTemplate>,
) -> Result<(StatusCode, Json<AssessmentTemplate>)> {
    catalog::check_placement(payload.kind, payload.gym_id)?;
    if let Some(gym_id) = payload.gym_id {
        state.db.require("gyms", gym_id, "Gym").await?;
    }

    let template = state.db.insert_template(&payload).await?;
    Ok((StatusCode::CREATED, Json(template)))
}

async fn update_template(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    ValidatedJson(payload): ValidatedJson<UpdateAssessmentTemplate>,
) -> Result<Json<AssessmentTemplate>> {
    let mut template = load_template(&state, id).await?;
    payload.apply(&mut template);

    catalog::check_placement(template.kind, template.gym_id)?;
    if let Some(gym_id) = template.gym_id {
        state.db.require("gyms", gym_id, "Gym").await?;
    }

    Ok(Json(state.db.update_template(&template).await?))
}

async fn delete_template(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    state.db.delete_template(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ─── Results ─────────────────────────────────────────────────

async fn list_results(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<MemberFilter>,
) -> Result<Json<Vec<AssessmentResult>>> {
    Ok(Json(state.db.list_results(filter.member_id).await?))
}

async fn create_result(
    State(state): State<Arc<AppState>>,
    ValidatedJson(payload): ValidatedJson<CreateAssessmentResult>,
) -> Result<(StatusCode, Json<AssessmentResult>)> {
    state.db.require("members", payload.member_id, "Member").await?;
    let template = load_template(&state, payload.template_id).await?;
    check_values(&payload.values, &template)?;

    let result = state.db.insert_result(&payload).await?;
    Ok((StatusCode::CREATED, Json(result)))
}

async fn update_result(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    ValidatedJson(payload): ValidatedJson<UpdateAssessmentResult>,
) -> Result<Json<AssessmentResult>> {
    let mut result = state
        .db
        .get_result(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Assessment result not found".to_string()))?;

    if let Some(taken_at) = payload.taken_at {
        result.taken_at = taken_at;
    }
    if let Some(values) = payload.values {
        let template = load_template(&state, result.template_id).await?;
        check_values(&values, &template)?;
        result.values = sqlx::types::Json(values);
    }

    Ok(Json(state.db.update_result(&result).await?))
}

async fn delete_result(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    state.db.delete_result(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
