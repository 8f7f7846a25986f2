// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

use sqlx::types::Json;

use super::{expect_deleted, Database};
use crate::error::{AppError, Result};
use crate::models::assessment::{CreateAssessmentResult, CreateAssessmentTemplate};
use crate::models::{AssessmentResult, AssessmentTemplate};

const TEMPLATE_COLUMNS: &str = "id, name, attributes, kind, gym_id";
const RESULT_COLUMNS: &str = "id, member_id, template_id, taken_at, result_values";

impl Database {
    // ─── Assessment Template Operations ──────────────────────────

    pub async fn get_template(&self, id: i64) -> Result<Option<AssessmentTemplate>> {
        let sql = format!(
            "SELECT {} FROM assessment_templates WHERE id = ?",
            TEMPLATE_COLUMNS
        );
        Ok(sqlx::query_as::<_, AssessmentTemplate>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    /// Masters plus, when `gym_id` is given, that gym's overrides.
    pub async fn list_templates(&self, gym_id: Option<i64>) -> Result<Vec<AssessmentTemplate>> {
        let sql = format!(
            "SELECT {} FROM assessment_templates
             WHERE ?1 IS NULL OR gym_id IS NULL OR gym_id = ?1 ORDER BY id",
            TEMPLATE_COLUMNS
        );
        Ok(sqlx::query_as::<_, AssessmentTemplate>(&sql)
            .bind(gym_id)
            .fetch_all(&self.pool)
            .await?)
    }

    pub async fn insert_template(
        &self,
        payload: &CreateAssessmentTemplate,
    ) -> Result<AssessmentTemplate> {
        let id = sqlx::query(
            "INSERT INTO assessment_templates (name, attributes, kind, gym_id) VALUES (?, ?, ?, ?)",
        )
        .bind(&payload.name)
        .bind(Json(&payload.attributes))
        .bind(payload.kind)
        .bind(payload.gym_id)
        .execute(&self.pool)
        .await?
        .last_insert_rowid();

        self.fetch_template(id).await
    }

    pub async fn update_template(&self, template: &AssessmentTemplate) -> Result<AssessmentTemplate> {
        sqlx::query(
            "UPDATE assessment_templates SET name = ?, attributes = ?, kind = ?, gym_id = ? WHERE id = ?",
        )
        .bind(&template.name)
        .bind(&template.attributes)
        .bind(template.kind)
        .bind(template.gym_id)
        .bind(template.id)
        .execute(&self.pool)
        .await?;

        self.fetch_template(template.id).await
    }

    pub async fn delete_template(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM assessment_templates WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        expect_deleted(result.rows_affected(), "Assessment template")
    }

    async fn fetch_template(&self, id: i64) -> Result<AssessmentTemplate> {
        self.get_template(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Assessment template not found".to_string()))
    }

    // ─── Assessment Result Operations ────────────────────────────

    pub async fn get_result(&self, id: i64) -> Result<Option<AssessmentResult>> {
        let sql = format!(
            "SELECT {} FROM assessment_results WHERE id = ?",
            RESULT_COLUMNS
        );
        Ok(sqlx::query_as::<_, AssessmentResult>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    pub async fn list_results(&self, member_id: Option<i64>) -> Result<Vec<AssessmentResult>> {
        let sql = format!(
            "SELECT {} FROM assessment_results WHERE (?1 IS NULL OR member_id = ?1)
             ORDER BY taken_at DESC, id DESC",
            RESULT_COLUMNS
        );
        Ok(sqlx::query_as::<_, AssessmentResult>(&sql)
            .bind(member_id)
            .fetch_all(&self.pool)
            .await?)
    }

    pub async fn insert_result(&self, payload: &CreateAssessmentResult) -> Result<AssessmentResult> {
        let id = sqlx::query(
            r#"INSERT INTO assessment_results (member_id, template_id, taken_at, result_values)
               VALUES (?, ?, ?, ?)"#,
        )
        .bind(payload.member_id)
        .bind(payload.template_id)
        .bind(payload.taken_at)
        .bind(Json(&payload.values))
        .execute(&self.pool)
        .await?
        .last_insert_rowid();

        self.fetch_result(id).await
    }

    pub async fn update_result(&self, result: &AssessmentResult) -> Result<AssessmentResult> {
        sqlx::query("UPDATE assessment_results SET taken_at = ?, result_values = ? WHERE id = ?")
            .bind(result.taken_at)
            .bind(&result.values)
            .bind(result.id)
            .execute(&self.pool)
            .await?;

        self.fetch_result(result.id).await
    }

    pub async fn delete_result(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM assessment_results WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        expect_deleted(result.rows_affected(), "Assessment result")
    }

    async fn fetch_result(&self, id: i64) -> Result<AssessmentResult> {
        self.get_result(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Assessment result not found".to_string()))
    }
}
