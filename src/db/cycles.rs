// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

use chrono::Utc;

use super::Database;
use crate::error::{AppError, Result};
use crate::models::cycle::{CreateCyclePlan, ACTIVE_CYCLE_CONFLICT};
use crate::models::{CyclePlan, CycleStatus};

const CYCLE_COLUMNS: &str =
    "id, member_id, cycle_number, start_date, end_date, duration, status, is_deleted, created_at";

/// The partial unique index on live active cycles is the only unique
/// constraint on `cycle_plans`, so any unique violation here is that one.
fn map_cycle_error(err: sqlx::Error) -> AppError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            AppError::Conflict(ACTIVE_CYCLE_CONFLICT.to_string())
        }
        _ => err.into(),
    }
}

impl Database {
    // ─── Cycle Plan Operations ───────────────────────────────────

    /// Direct lookup; soft-deleted rows are returned too.
    pub async fn get_cycle(&self, id: i64) -> Result<Option<CyclePlan>> {
        let sql = format!("SELECT {} FROM cycle_plans WHERE id = ?", CYCLE_COLUMNS);
        Ok(sqlx::query_as::<_, CyclePlan>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    pub async fn list_cycles(
        &self,
        member_id: Option<i64>,
        include_deleted: bool,
    ) -> Result<Vec<CyclePlan>> {
        let sql = format!(
            "SELECT {} FROM cycle_plans
             WHERE (?1 IS NULL OR member_id = ?1) AND (?2 OR is_deleted = 0)
             ORDER BY member_id, cycle_number, id",
            CYCLE_COLUMNS
        );
        Ok(sqlx::query_as::<_, CyclePlan>(&sql)
            .bind(member_id)
            .bind(include_deleted)
            .fetch_all(&self.pool)
            .await?)
    }

    /// Whether `member_id` has a live active cycle other than `exclude_id`.
    pub async fn active_cycle_exists(&self, member_id: i64, exclude_id: Option<i64>) -> Result<bool> {
        let found: bool = sqlx::query_scalar(
            r#"SELECT EXISTS(
                   SELECT 1 FROM cycle_plans
                   WHERE member_id = ?1 AND status = ?2 AND is_deleted = 0
                     AND (?3 IS NULL OR id != ?3))"#,
        )
        .bind(member_id)
        .bind(CycleStatus::Active)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(found)
    }

    pub async fn insert_cycle(&self, payload: &CreateCyclePlan) -> Result<CyclePlan> {
        let id = sqlx::query(
            r#"INSERT INTO cycle_plans (member_id, cycle_number, start_date, end_date, duration,
                                        status, is_deleted, created_at)
               VALUES (?, ?, ?, ?, ?, ?, 0, ?)"#,
        )
        .bind(payload.member_id)
        .bind(payload.cycle_number)
        .bind(payload.start_date)
        .bind(payload.end_date)
        .bind(payload.duration)
        .bind(payload.status)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(map_cycle_error)?
        .last_insert_rowid();

        self.fetch_cycle(id).await
    }

    pub async fn update_cycle(&self, cycle: &CyclePlan) -> Result<CyclePlan> {
        sqlx::query(
            r#"UPDATE cycle_plans
               SET member_id = ?, cycle_number = ?, start_date = ?, end_date = ?, duration = ?, status = ?
               WHERE id = ?"#,
        )
        .bind(cycle.member_id)
        .bind(cycle.cycle_number)
        .bind(cycle.start_date)
        .bind(cycle.end_date)
        .bind(cycle.duration)
        .bind(cycle.status)
        .bind(cycle.id)
        .execute(&self.pool)
        .await
        .map_err(map_cycle_error)?;

        self.fetch_cycle(cycle.id).await
    }

    /// Mark a cycle deleted. The row is kept and stays readable by id.
    pub async fn soft_delete_cycle(&self, id: i64) -> Result<CyclePlan> {
        let result = sqlx::query("UPDATE cycle_plans SET is_deleted = 1 WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Cycle plan not found".to_string()));
        }
        self.fetch_cycle(id).await
    }

    async fn fetch_cycle(&self, id: i64) -> Result<CyclePlan> {
        self.get_cycle(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Cycle plan not found".to_string()))
    }
}
