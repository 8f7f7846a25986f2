// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

use chrono::Utc;

use super::Database;
use crate::error::{AppError, Result};
use crate::models::user::CreateUser;
use crate::models::User;

const USER_COLUMNS: &str =
    "id, name, mobile, email, password_hash, role, gym_id, is_active, created_at";

impl Database {
    // ─── User Operations ─────────────────────────────────────────

    pub async fn get_user(&self, id: i64) -> Result<Option<User>> {
        let sql = format!("SELECT {} FROM users WHERE id = ?", USER_COLUMNS);
        Ok(sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    /// Look up a user by login mobile number.
    pub async fn get_user_by_mobile(&self, mobile: &str) -> Result<Option<User>> {
        let sql = format!("SELECT {} FROM users WHERE mobile = ?", USER_COLUMNS);
        Ok(sqlx::query_as::<_, User>(&sql)
            .bind(mobile)
            .fetch_optional(&self.pool)
            .await?)
    }

    pub async fn list_users(&self, gym_id: Option<i64>) -> Result<Vec<User>> {
        let sql = format!(
            "SELECT {} FROM users WHERE (?1 IS NULL OR gym_id = ?1) ORDER BY id",
            USER_COLUMNS
        );
        Ok(sqlx::query_as::<_, User>(&sql)
            .bind(gym_id)
            .fetch_all(&self.pool)
            .await?)
    }

    /// Insert a user with an already-hashed password.
    pub async fn create_user(&self, payload: &CreateUser, password_hash: &str) -> Result<User> {
        let id = sqlx::query(
            r#"INSERT INTO users (name, mobile, email, password_hash, role, gym_id, is_active, created_at)
               VALUES (?, ?, ?, ?, ?, ?, 1, ?)"#,
        )
        .bind(&payload.name)
        .bind(&payload.mobile)
        .bind(&payload.email)
        .bind(password_hash)
        .bind(payload.role)
        .bind(payload.gym_id)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?
        .last_insert_rowid();

        self.fetch_user(id).await
    }

    /// Write back every mutable profile column of `user`.
    pub async fn update_user(&self, user: &User) -> Result<User> {
        sqlx::query(
            r#"UPDATE users
               SET name = ?, mobile = ?, email = ?, password_hash = ?, role = ?, gym_id = ?, is_active = ?
               WHERE id = ?"#,
        )
        .bind(&user.name)
        .bind(&user.mobile)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.role)
        .bind(user.gym_id)
        .bind(user.is_active)
        .bind(user.id)
        .execute(&self.pool)
        .await?;

        self.fetch_user(user.id).await
    }

    /// Replace a stored password hash (used when upgrading legacy rows).
    pub async fn set_password_hash(&self, id: i64, password_hash: &str) -> Result<()> {
        sqlx::query("UPDATE users SET password_hash = ? WHERE id = ?")
            .bind(password_hash)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn fetch_user(&self, id: i64) -> Result<User> {
        self.get_user(id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }
}
