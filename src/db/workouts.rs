// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Scheduled workout plan entries and the logs recorded against them.

use chrono::NaiveDate;
use serde::Serialize;

use super::{expect_deleted, Database};
use crate::error::{AppError, Result};
use crate::models::cycle::{CreateWorkoutLog, CreateWorkoutPlanEntry};
use crate::models::{WorkoutLog, WorkoutPlanEntry};

const ENTRY_COLUMNS: &str = "e.id, e.cycle_plan_id, e.day_date, e.workout_id, e.exercise_id, \
    e.planned_sets, e.planned_reps, e.planned_weight, e.planned_minutes, e.planned_rpe, e.planned_notes";

const LOG_COLUMNS: &str = "id, member_id, cycle_plan_id, workout_plan_entry_id, actual_sets, \
    actual_reps, actual_weight, actual_minutes, actual_rpe, actual_notes, status, workout_date";

/// Entries moved by a day swap, in each direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SwapCounts {
    pub moved_to_date: i64,
    pub moved_from_date: i64,
}

impl Database {
    // ─── Workout Plan Entry Operations ───────────────────────────

    pub async fn get_entry(&self, id: i64) -> Result<Option<WorkoutPlanEntry>> {
        let sql = format!(
            "SELECT {} FROM workout_plan_entries e WHERE e.id = ?",
            ENTRY_COLUMNS
        );
        Ok(sqlx::query_as::<_, WorkoutPlanEntry>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    /// List entries, optionally narrowed to one cycle or one member's cycles.
    pub async fn list_entries(
        &self,
        cycle_plan_id: Option<i64>,
        member_id: Option<i64>,
    ) -> Result<Vec<WorkoutPlanEntry>> {
        let sql = format!(
            "SELECT {} FROM workout_plan_entries e
             JOIN cycle_plans c ON c.id = e.cycle_plan_id
             WHERE (?1 IS NULL OR e.cycle_plan_id = ?1)
               AND (?2 IS NULL OR c.member_id = ?2)
             ORDER BY e.day_date, e.id",
            ENTRY_COLUMNS
        );
        Ok(sqlx::query_as::<_, WorkoutPlanEntry>(&sql)
            .bind(cycle_plan_id)
            .bind(member_id)
            .fetch_all(&self.pool)
            .await?)
    }

    pub async fn insert_entry(&self, payload: &CreateWorkoutPlanEntry) -> Result<WorkoutPlanEntry> {
        let id = sqlx::query(
            r#"INSERT INTO workout_plan_entries (cycle_plan_id, day_date, workout_id, exercise_id,
                   planned_sets, planned_reps, planned_weight, planned_minutes, planned_rpe, planned_notes)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(payload.cycle_plan_id)
        .bind(payload.day_date)
        .bind(payload.workout_id)
        .bind(payload.exercise_id)
        .bind(payload.planned_sets)
        .bind(payload.planned_reps)
        .bind(payload.planned_weight)
        .bind(payload.planned_minutes)
        .bind(payload.planned_rpe)
        .bind(&payload.planned_notes)
        .execute(&self.pool)
        .await?
        .last_insert_rowid();

        self.fetch_entry(id).await
    }

    pub async fn update_entry(&self, entry: &WorkoutPlanEntry) -> Result<WorkoutPlanEntry> {
        sqlx::query(
            r#"UPDATE workout_plan_entries
               SET day_date = ?, workout_id = ?, exercise_id = ?, planned_sets = ?, planned_reps = ?,
                   planned_weight = ?, planned_minutes = ?, planned_rpe = ?, planned_notes = ?
               WHERE id = ?"#,
        )
        .bind(entry.day_date)
        .bind(entry.workout_id)
        .bind(entry.exercise_id)
        .bind(entry.planned_sets)
        .bind(entry.planned_reps)
        .bind(entry.planned_weight)
        .bind(entry.planned_minutes)
        .bind(entry.planned_rpe)
        .bind(&entry.planned_notes)
        .bind(entry.id)
        .execute(&self.pool)
        .await?;

        self.fetch_entry(entry.id).await
    }

    pub async fn delete_entry(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM workout_plan_entries WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        expect_deleted(result.rows_affected(), "Workout plan entry")
    }

    /// Exchange the scheduled dates of every entry on `from` and `to`
    /// within one cycle.
    pub async fn swap_entry_days(
        &self,
        cycle_plan_id: i64,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<SwapCounts> {
        let mut tx = self.pool.begin().await?;

        let count_sql =
            "SELECT COUNT(*) FROM workout_plan_entries WHERE cycle_plan_id = ? AND day_date = ?";
        let on_from: i64 = sqlx::query_scalar(count_sql)
            .bind(cycle_plan_id)
            .bind(from)
            .fetch_one(&mut *tx)
            .await?;
        let on_to: i64 = sqlx::query_scalar(count_sql)
            .bind(cycle_plan_id)
            .bind(to)
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query(
            r#"UPDATE workout_plan_entries
               SET day_date = CASE WHEN day_date = ?2 THEN ?3 ELSE ?2 END
               WHERE cycle_plan_id = ?1 AND day_date IN (?2, ?3)"#,
        )
        .bind(cycle_plan_id)
        .bind(from)
        .bind(to)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::info!(cycle_plan_id, %from, %to, on_from, on_to, "Swapped workout days");
        Ok(SwapCounts {
            moved_to_date: on_from,
            moved_from_date: on_to,
        })
    }

    async fn fetch_entry(&self, id: i64) -> Result<WorkoutPlanEntry> {
        self.get_entry(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Workout plan entry not found".to_string()))
    }

    // ─── Workout Log Operations ──────────────────────────────────

    pub async fn get_log(&self, id: i64) -> Result<Option<WorkoutLog>> {
        let sql = format!("SELECT {} FROM workout_logs WHERE id = ?", LOG_COLUMNS);
        Ok(sqlx::query_as::<_, WorkoutLog>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    pub async fn list_logs(&self, member_id: Option<i64>) -> Result<Vec<WorkoutLog>> {
        let sql = format!(
            "SELECT {} FROM workout_logs WHERE (?1 IS NULL OR member_id = ?1)
             ORDER BY workout_date DESC, id DESC",
            LOG_COLUMNS
        );
        Ok(sqlx::query_as::<_, WorkoutLog>(&sql)
            .bind(member_id)
            .fetch_all(&self.pool)
            .await?)
    }

    pub async fn insert_log(&self, payload: &CreateWorkoutLog) -> Result<WorkoutLog> {
        let id = sqlx::query(
            r#"INSERT INTO workout_logs (member_id, cycle_plan_id, workout_plan_entry_id, actual_sets,
                   actual_reps, actual_weight, actual_minutes, actual_rpe, actual_notes, status, workout_date)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(payload.member_id)
        .bind(payload.cycle_plan_id)
        .bind(payload.workout_plan_entry_id)
        .bind(payload.actual_sets)
        .bind(payload.actual_reps)
        .bind(payload.actual_weight)
        .bind(payload.actual_minutes)
        .bind(payload.actual_rpe)
        .bind(&payload.actual_notes)
        .bind(&payload.status)
        .bind(payload.workout_date)
        .execute(&self.pool)
        .await?
        .last_insert_rowid();

        self.fetch_log(id).await
    }

    pub async fn update_log(&self, log: &WorkoutLog) -> Result<WorkoutLog> {
        sqlx::query(
            r#"UPDATE workout_logs
               SET member_id = ?, cycle_plan_id = ?, workout_plan_entry_id = ?, actual_sets = ?,
                   actual_reps = ?, actual_weight = ?, actual_minutes = ?, actual_rpe = ?,
                   actual_notes = ?, status = ?, workout_date = ?
               WHERE id = ?"#,
        )
        .bind(log.member_id)
        .bind(log.cycle_plan_id)
        .bind(log.workout_plan_entry_id)
        .bind(log.actual_sets)
        .bind(log.actual_reps)
        .bind(log.actual_weight)
        .bind(log.actual_minutes)
        .bind(log.actual_rpe)
        .bind(&log.actual_notes)
        .bind(&log.status)
        .bind(log.workout_date)
        .bind(log.id)
        .execute(&self.pool)
        .await?;

        self.fetch_log(log.id).await
    }

    async fn fetch_log(&self, id: i64) -> Result<WorkoutLog> {
        self.get_log(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Workout log not found".to_string()))
    }
}
