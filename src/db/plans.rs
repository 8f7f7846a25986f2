// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

use sqlx::{Sqlite, Transaction};

use super::{expect_deleted, Database};
use crate::error::{AppError, Result};
use crate::models::membership_plan::{CreateMembershipPlan, PlanBrief};
use crate::models::MembershipPlan;

const PLAN_COLUMNS: &str = "id, gym_id, name, description, duration_months, price, plan_type, \
    offer_start_date, offer_end_date, offer_terms, status, start_date, end_date";

impl Database {
    // ─── Membership Plan Operations ──────────────────────────────

    pub async fn get_plan(&self, id: i64) -> Result<Option<MembershipPlan>> {
        let sql = format!("SELECT {} FROM membership_plans WHERE id = ?", PLAN_COLUMNS);
        let plan = sqlx::query_as::<_, MembershipPlan>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match plan {
            Some(mut plan) => {
                plan.program_ids = self.plan_program_ids(plan.id).await?;
                Ok(Some(plan))
            }
            None => Ok(None),
        }
    }

    pub async fn list_plans(&self, gym_id: Option<i64>) -> Result<Vec<MembershipPlan>> {
        let sql = format!(
            "SELECT {} FROM membership_plans WHERE (?1 IS NULL OR gym_id = ?1) ORDER BY id",
            PLAN_COLUMNS
        );
        let mut plans = sqlx::query_as::<_, MembershipPlan>(&sql)
            .bind(gym_id)
            .fetch_all(&self.pool)
            .await?;

        for plan in &mut plans {
            plan.program_ids = self.plan_program_ids(plan.id).await?;
        }
        Ok(plans)
    }

    /// Brief listing of a gym's plans for lead capture.
    pub async fn list_plan_briefs(&self, gym_id: i64) -> Result<Vec<PlanBrief>> {
        Ok(sqlx::query_as::<_, PlanBrief>(
            "SELECT id, name, description, price FROM membership_plans WHERE gym_id = ? ORDER BY id",
        )
        .bind(gym_id)
        .fetch_all(&self.pool)
        .await?)
    }

    pub async fn create_plan(&self, payload: &CreateMembershipPlan) -> Result<MembershipPlan> {
        let mut tx = self.pool.begin().await?;

        let id = sqlx::query(
            r#"INSERT INTO membership_plans (gym_id, name, description, duration_months, price, plan_type,
                   offer_start_date, offer_end_date, offer_terms, status, start_date, end_date)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(payload.gym_id)
        .bind(&payload.name)
        .bind(&payload.description)
        .bind(payload.duration_months)
        .bind(payload.price)
        .bind(&payload.plan_type)
        .bind(payload.offer_start_date)
        .bind(payload.offer_end_date)
        .bind(&payload.offer_terms)
        .bind(&payload.status)
        .bind(payload.start_date)
        .bind(payload.end_date)
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();

        replace_plan_programs(&mut tx, id, &payload.program_ids).await?;
        tx.commit().await?;

        self.fetch_plan(id).await
    }

    /// Write back `plan`, replacing its program links when `program_ids` is set.
    pub async fn update_plan(
        &self,
        plan: &MembershipPlan,
        program_ids: Option<&[i64]>,
    ) -> Result<MembershipPlan> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"UPDATE membership_plans
               SET name = ?, description = ?, duration_months = ?, price = ?, plan_type = ?,
                   offer_start_date = ?, offer_end_date = ?, offer_terms = ?, status = ?,
                   start_date = ?, end_date = ?
               WHERE id = ?"#,
        )
        .bind(&plan.name)
        .bind(&plan.description)
        .bind(plan.duration_months)
        .bind(plan.price)
        .bind(&plan.plan_type)
        .bind(plan.offer_start_date)
        .bind(plan.offer_end_date)
        .bind(&plan.offer_terms)
        .bind(&plan.status)
        .bind(plan.start_date)
        .bind(plan.end_date)
        .bind(plan.id)
        .execute(&mut *tx)
        .await?;

        if let Some(ids) = program_ids {
            replace_plan_programs(&mut tx, plan.id, ids).await?;
        }
        tx.commit().await?;

        self.fetch_plan(plan.id).await
    }

    /// Delete a plan that no member references.
    pub async fn delete_plan(&self, id: i64) -> Result<()> {
        let in_use: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM members WHERE membership_plan_id = ?")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;
        if in_use > 0 {
            return Err(AppError::Conflict(format!(
                "Membership plan is used by {} member(s)",
                in_use
            )));
        }

        let result = sqlx::query("DELETE FROM membership_plans WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        expect_deleted(result.rows_affected(), "Membership plan")
    }

    async fn plan_program_ids(&self, plan_id: i64) -> Result<Vec<i64>> {
        Ok(sqlx::query_scalar(
            "SELECT program_id FROM membership_plan_programs WHERE plan_id = ? ORDER BY program_id",
        )
        .bind(plan_id)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn fetch_plan(&self, id: i64) -> Result<MembershipPlan> {
        self.get_plan(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Membership plan not found".to_string()))
    }
}

async fn replace_plan_programs(
    tx: &mut Transaction<'_, Sqlite>,
    plan_id: i64,
    program_ids: &[i64],
) -> Result<()> {
    sqlx::query("DELETE FROM membership_plan_programs WHERE plan_id = ?")
        .bind(plan_id)
        .execute(&mut **tx)
        .await?;

    for program_id in program_ids {
        sqlx::query("INSERT OR IGNORE INTO membership_plan_programs (plan_id, program_id) VALUES (?, ?)")
            .bind(plan_id)
            .bind(program_id)
            .execute(&mut **tx)
            .await?;
    }
    Ok(())
}
