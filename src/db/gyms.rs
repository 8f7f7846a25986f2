// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

use chrono::Utc;

use super::Database;
use crate::error::{AppError, Result};
use crate::models::gym::CreateGym;
use crate::models::{Gym, Role};

const GYM_COLUMNS: &str = "id, name, address, contract_start, contract_end, \
    recurring_revenue_start, owner_mobile, owner_name, owner_email, is_active, \
    logo_url, created_at";

impl Database {
    // ─── Gym Operations ──────────────────────────────────────────

    pub async fn list_gyms(&self) -> Result<Vec<Gym>> {
        let sql = format!("SELECT {} FROM gyms ORDER BY id", GYM_COLUMNS);
        Ok(sqlx::query_as::<_, Gym>(&sql).fetch_all(&self.pool).await?)
    }

    pub async fn get_gym(&self, id: i64) -> Result<Option<Gym>> {
        let sql = format!("SELECT {} FROM gyms WHERE id = ?", GYM_COLUMNS);
        Ok(sqlx::query_as::<_, Gym>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    /// Whether another gym (not `exclude_id`) already uses `name`.
    pub async fn gym_name_taken(&self, name: &str, exclude_id: Option<i64>) -> Result<bool> {
        let taken: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM gyms WHERE name = ?1 AND (?2 IS NULL OR id != ?2))",
        )
        .bind(name)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(taken)
    }

    /// Create a gym together with its Gym Owner account.
    ///
    /// Both rows are written in one transaction; a duplicate gym name or
    /// owner mobile leaves neither behind.
    pub async fn create_gym_with_owner(
        &self,
        payload: &CreateGym,
        owner_password_hash: &str,
    ) -> Result<Gym> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        let gym_id = sqlx::query(
            r#"INSERT INTO gyms (name, address, contract_start, contract_end, recurring_revenue_start,
                                 owner_mobile, owner_name, owner_email, is_active, logo_url, created_at)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?, 1, NULL, ?)"#,
        )
        .bind(&payload.name)
        .bind(&payload.address)
        .bind(payload.contract_start)
        .bind(payload.contract_end)
        .bind(payload.recurring_revenue_start)
        .bind(&payload.owner_mobile)
        .bind(&payload.owner_name)
        .bind(&payload.owner_email)
        .bind(now)
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();

        sqlx::query(
            r#"INSERT INTO users (name, mobile, email, password_hash, role, gym_id, is_active, created_at)
               VALUES (?, ?, ?, ?, ?, ?, 1, ?)"#,
        )
        .bind(&payload.owner_name)
        .bind(&payload.owner_mobile)
        .bind(&payload.owner_email)
        .bind(owner_password_hash)
        .bind(Role::GymOwner)
        .bind(gym_id)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::info!(gym_id, owner_mobile = %payload.owner_mobile, "Created gym and owner");
        self.fetch_gym(gym_id).await
    }

    /// Write back every mutable column of `gym`.
    pub async fn update_gym(&self, gym: &Gym) -> Result<Gym> {
        sqlx::query(
            r#"UPDATE gyms
               SET name = ?, address = ?, contract_start = ?, contract_end = ?,
                   recurring_revenue_start = ?, owner_mobile = ?, owner_name = ?,
                   owner_email = ?, is_active = ?, logo_url = ?
               WHERE id = ?"#,
        )
        .bind(&gym.name)
        .bind(&gym.address)
        .bind(gym.contract_start)
        .bind(gym.contract_end)
        .bind(gym.recurring_revenue_start)
        .bind(&gym.owner_mobile)
        .bind(&gym.owner_name)
        .bind(&gym.owner_email)
        .bind(gym.is_active)
        .bind(&gym.logo_url)
        .bind(gym.id)
        .execute(&self.pool)
        .await?;

        self.fetch_gym(gym.id).await
    }

    async fn fetch_gym(&self, id: i64) -> Result<Gym> {
        self.get_gym(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Gym not found".to_string()))
    }
}
