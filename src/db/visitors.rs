// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

use chrono::Utc;

use super::Database;
use crate::error::{AppError, Result};
use crate::models::visitor::{CreateFollowUp, CreateVisitor, VISITOR_STATUS_CHANGED};
use crate::models::{Visitor, VisitorFollowUp, VisitorStatus};
use crate::time_utils::today_utc;

const VISITOR_COLUMNS: &str = "id, gym_id, first_name, last_name, mobile, email, fitness_goal, \
    interested_plan_id, status, comments, last_followup, created_at, updated_at, created_by, updated_by";

const FOLLOWUP_COLUMNS: &str = "id, visitor_id, comment, next_followup, status, created_at, created_by";

impl Database {
    // ─── Visitor Operations ──────────────────────────────────────

    pub async fn get_visitor(&self, id: i64) -> Result<Option<Visitor>> {
        let sql = format!("SELECT {} FROM visitors WHERE id = ?", VISITOR_COLUMNS);
        Ok(sqlx::query_as::<_, Visitor>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    /// Newest first.
    pub async fn list_visitors(&self, gym_id: Option<i64>) -> Result<Vec<Visitor>> {
        let sql = format!(
            "SELECT {} FROM visitors WHERE (?1 IS NULL OR gym_id = ?1)
             ORDER BY created_at DESC, id DESC",
            VISITOR_COLUMNS
        );
        Ok(sqlx::query_as::<_, Visitor>(&sql)
            .bind(gym_id)
            .fetch_all(&self.pool)
            .await?)
    }

    /// Most recent visit by `mobile` at `gym_id`.
    pub async fn latest_visitor(&self, gym_id: i64, mobile: &str) -> Result<Option<Visitor>> {
        let sql = format!(
            "SELECT {} FROM visitors WHERE gym_id = ? AND mobile = ?
             ORDER BY created_at DESC, id DESC LIMIT 1",
            VISITOR_COLUMNS
        );
        Ok(sqlx::query_as::<_, Visitor>(&sql)
            .bind(gym_id)
            .bind(mobile)
            .fetch_optional(&self.pool)
            .await?)
    }

    /// Insert a `Contacted` visitor unless the gym already has one with
    /// the same mobile number.
    ///
    /// The existence check and the insert are a single statement, so two
    /// concurrent registrations cannot both create a row. Returns `None`
    /// when a prior visit exists.
    pub async fn insert_visitor_if_new(
        &self,
        gym_id: i64,
        payload: &CreateVisitor,
        created_by: &str,
    ) -> Result<Option<Visitor>> {
        let now = Utc::now();
        let result = sqlx::query(
            r#"INSERT INTO visitors (gym_id, first_name, last_name, mobile, email, fitness_goal,
                   interested_plan_id, status, comments, last_followup, created_at, updated_at,
                   created_by, updated_by)
               SELECT ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, NULL, ?10, ?10, ?11, ?11
               WHERE NOT EXISTS (SELECT 1 FROM visitors WHERE gym_id = ?1 AND mobile = ?4)"#,
        )
        .bind(gym_id)
        .bind(&payload.first_name)
        .bind(&payload.last_name)
        .bind(&payload.mobile)
        .bind(&payload.email)
        .bind(&payload.fitness_goal)
        .bind(payload.interested_plan_id)
        .bind(VisitorStatus::Contacted)
        .bind(&payload.comments)
        .bind(now)
        .bind(created_by)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.fetch_visitor(result.last_insert_rowid()).await.map(Some)
    }

    /// Write `visitor` back, provided its stored status is still
    /// `read_status`. A status moved by a concurrent writer is a conflict.
    pub async fn update_visitor(
        &self,
        visitor: &Visitor,
        read_status: VisitorStatus,
    ) -> Result<Visitor> {
        let result = sqlx::query(
            r#"UPDATE visitors
               SET first_name = ?, last_name = ?, email = ?, fitness_goal = ?, interested_plan_id = ?,
                   status = ?, comments = ?, last_followup = ?, updated_at = ?, updated_by = ?
               WHERE id = ? AND status = ?"#,
        )
        .bind(&visitor.first_name)
        .bind(&visitor.last_name)
        .bind(&visitor.email)
        .bind(&visitor.fitness_goal)
        .bind(visitor.interested_plan_id)
        .bind(visitor.status)
        .bind(&visitor.comments)
        .bind(visitor.last_followup)
        .bind(Utc::now())
        .bind(&visitor.updated_by)
        .bind(visitor.id)
        .bind(read_status)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            self.fetch_visitor(visitor.id).await?;
            return Err(AppError::Conflict(VISITOR_STATUS_CHANGED.to_string()));
        }
        self.fetch_visitor(visitor.id).await
    }

    async fn fetch_visitor(&self, id: i64) -> Result<Visitor> {
        self.get_visitor(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Visitor not found".to_string()))
    }

    // ─── Follow-up Operations ────────────────────────────────────

    /// Newest first.
    pub async fn list_followups(&self, visitor_id: i64) -> Result<Vec<VisitorFollowUp>> {
        let sql = format!(
            "SELECT {} FROM visitor_followups WHERE visitor_id = ? ORDER BY created_at DESC, id DESC",
            FOLLOWUP_COLUMNS
        );
        Ok(sqlx::query_as::<_, VisitorFollowUp>(&sql)
            .bind(visitor_id)
            .fetch_all(&self.pool)
            .await?)
    }

    /// Append a follow-up and stamp the visitor's `last_followup`. When
    /// `payload.status` is set the visitor moves to it in the same
    /// transaction. The caller checked the transition from `read_status`;
    /// if the stored status no longer matches, nothing is written.
    pub async fn add_followup(
        &self,
        visitor_id: i64,
        payload: &CreateFollowUp,
        read_status: VisitorStatus,
        user_id: Option<i64>,
        user_name: &str,
    ) -> Result<VisitorFollowUp> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query(
            r#"UPDATE visitors
               SET status = COALESCE(?, status), last_followup = ?, updated_at = ?, updated_by = ?
               WHERE id = ? AND status = ?"#,
        )
        .bind(payload.status)
        .bind(today_utc())
        .bind(now)
        .bind(user_name)
        .bind(visitor_id)
        .bind(read_status)
        .execute(&mut *tx)
        .await?;
        if updated.rows_affected() == 0 {
            return Err(AppError::Conflict(VISITOR_STATUS_CHANGED.to_string()));
        }

        let id = sqlx::query(
            r#"INSERT INTO visitor_followups (visitor_id, comment, next_followup, status, created_at, created_by)
               VALUES (?, ?, ?, ?, ?, ?)"#,
        )
        .bind(visitor_id)
        .bind(&payload.comment)
        .bind(payload.next_followup)
        .bind(payload.status)
        .bind(now)
        .bind(user_id)
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();

        let sql = format!("SELECT {} FROM visitor_followups WHERE id = ?", FOLLOWUP_COLUMNS);
        let followup = sqlx::query_as::<_, VisitorFollowUp>(&sql)
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(followup)
    }
}
