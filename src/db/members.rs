// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

use super::Database;
use crate::error::{AppError, Result};
use crate::models::Member;

const MEMBER_COLUMNS: &str = "id, gym_id, membership_plan_id, name, mobile, email, photo_url, \
    dob, gender, address, join_date, active, membership_start_date, membership_end_date";

impl Database {
    // ─── Member Operations ───────────────────────────────────────

    pub async fn get_member(&self, id: i64) -> Result<Option<Member>> {
        let sql = format!("SELECT {} FROM members WHERE id = ?", MEMBER_COLUMNS);
        Ok(sqlx::query_as::<_, Member>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    pub async fn list_members(&self, gym_id: Option<i64>) -> Result<Vec<Member>> {
        let sql = format!(
            "SELECT {} FROM members WHERE (?1 IS NULL OR gym_id = ?1) ORDER BY id",
            MEMBER_COLUMNS
        );
        Ok(sqlx::query_as::<_, Member>(&sql)
            .bind(gym_id)
            .fetch_all(&self.pool)
            .await?)
    }

    /// Insert `member` (its `id` is ignored) and return the stored row.
    pub async fn insert_member(&self, member: &Member) -> Result<Member> {
        let id = sqlx::query(
            r#"INSERT INTO members (gym_id, membership_plan_id, name, mobile, email, photo_url, dob,
                   gender, address, join_date, active, membership_start_date, membership_end_date)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(member.gym_id)
        .bind(member.membership_plan_id)
        .bind(&member.name)
        .bind(&member.mobile)
        .bind(&member.email)
        .bind(&member.photo_url)
        .bind(member.dob)
        .bind(&member.gender)
        .bind(&member.address)
        .bind(member.join_date)
        .bind(member.active)
        .bind(member.membership_start_date)
        .bind(member.membership_end_date)
        .execute(&self.pool)
        .await?
        .last_insert_rowid();

        self.fetch_member(id).await
    }

    pub async fn update_member(&self, member: &Member) -> Result<Member> {
        sqlx::query(
            r#"UPDATE members
               SET gym_id = ?, membership_plan_id = ?, name = ?, mobile = ?, email = ?, photo_url = ?,
                   dob = ?, gender = ?, address = ?, join_date = ?, active = ?,
                   membership_start_date = ?, membership_end_date = ?
               WHERE id = ?"#,
        )
        .bind(member.gym_id)
        .bind(member.membership_plan_id)
        .bind(&member.name)
        .bind(&member.mobile)
        .bind(&member.email)
        .bind(&member.photo_url)
        .bind(member.dob)
        .bind(&member.gender)
        .bind(&member.address)
        .bind(member.join_date)
        .bind(member.active)
        .bind(member.membership_start_date)
        .bind(member.membership_end_date)
        .bind(member.id)
        .execute(&self.pool)
        .await?;

        self.fetch_member(member.id).await
    }

    /// Whether a member other than `exclude_id` already uses `mobile`.
    pub async fn member_mobile_taken(&self, mobile: &str, exclude_id: Option<i64>) -> Result<bool> {
        let taken: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM members WHERE mobile = ?1 AND (?2 IS NULL OR id != ?2))",
        )
        .bind(mobile)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(taken)
    }

    async fn fetch_member(&self, id: i64) -> Result<Member> {
        self.get_member(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Member not found".to_string()))
    }
}
