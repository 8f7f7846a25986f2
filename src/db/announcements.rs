// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

use chrono::Utc;

use super::{expect_deleted, Database};
use crate::error::{AppError, Result};
use crate::models::announcement::CreateAnnouncement;
use crate::models::Announcement;

impl Database {
    // ─── Announcement Operations ─────────────────────────────────

    /// Newest first.
    pub async fn list_announcements(&self, gym_id: Option<i64>) -> Result<Vec<Announcement>> {
        Ok(sqlx::query_as::<_, Announcement>(
            r#"SELECT id, gym_id, title, message, posted_at, created_by FROM announcements
               WHERE (?1 IS NULL OR gym_id = ?1)
               ORDER BY posted_at DESC, id DESC"#,
        )
        .bind(gym_id)
        .fetch_all(&self.pool)
        .await?)
    }

    pub async fn insert_announcement(
        &self,
        payload: &CreateAnnouncement,
        created_by: Option<i64>,
    ) -> Result<Announcement> {
        let id = sqlx::query(
            r#"INSERT INTO announcements (gym_id, title, message, posted_at, created_by)
               VALUES (?, ?, ?, ?, ?)"#,
        )
        .bind(payload.gym_id)
        .bind(&payload.title)
        .bind(&payload.message)
        .bind(Utc::now())
        .bind(created_by)
        .execute(&self.pool)
        .await?
        .last_insert_rowid();

        sqlx::query_as::<_, Announcement>(
            "SELECT id, gym_id, title, message, posted_at, created_by FROM announcements WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Announcement not found".to_string()))
    }

    pub async fn delete_announcement(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM announcements WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        expect_deleted(result.rows_affected(), "Announcement")
    }
}
