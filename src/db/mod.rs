// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Database layer (SQLite via sqlx).
//!
//! [`Database`] owns the connection pool. Typed operations live in one
//! submodule per entity family, each adding an `impl Database` block.

mod announcements;
mod assessments;
mod catalog;
mod cycles;
mod equipment;
mod gyms;
mod members;
mod plans;
mod users;
mod visitors;
mod workouts;

pub use catalog::{CatalogTable, MAX_TREE_DEPTH};
pub use workouts::SwapCounts;

use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;

use crate::config::AdminSeed;
use crate::error::{AppError, Result};
use crate::models::Role;
use crate::services::password;

/// SQLite database handle.
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open (creating if needed) the database at `url`.
    pub async fn connect(url: &str) -> Result<Self> {
        ensure_sqlite_dir(url)
            .map_err(|e| AppError::Database(format!("Failed to create database directory: {}", e)))?;

        let options = SqliteConnectOptions::from_str(url)
            .map_err(|e| AppError::Database(format!("Invalid database URL: {}", e)))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .foreign_keys(true)
            .busy_timeout(Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .map_err(|e| AppError::Database(format!("Failed to open database: {}", e)))?;

        tracing::info!(url, "Connected to SQLite");

        Ok(Self { pool })
    }

    /// Private in-memory database with migrations applied, for tests.
    ///
    /// Every pooled connection to `:memory:` would see its own empty
    /// database, so the pool is pinned to one connection that never expires.
    pub async fn new_in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(|e| AppError::Database(e.to_string()))?
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        let db = Self { pool };
        db.migrate().await?;
        Ok(db)
    }

    /// Apply embedded migrations.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Failed to apply migrations: {}", e)))?;
        tracing::info!("Database migrations applied");
        Ok(())
    }

    /// Create the bootstrap FitBro Admin unless an admin already exists.
    ///
    /// Returns whether an account was created.
    pub async fn seed_admin(&self, seed: &AdminSeed) -> Result<bool> {
        let existing: Option<i64> = sqlx::query_scalar("SELECT id FROM users WHERE role = ? LIMIT 1")
            .bind(Role::FitbroAdmin)
            .fetch_optional(&self.pool)
            .await?;

        if existing.is_some() {
            return Ok(false);
        }

        let hash = password::hash_password(&seed.password)?;
        sqlx::query(
            r#"INSERT INTO users (name, mobile, email, password_hash, role, gym_id, is_active, created_at)
               VALUES (?, ?, NULL, ?, ?, NULL, 1, ?)"#,
        )
        .bind(&seed.name)
        .bind(&seed.mobile)
        .bind(hash)
        .bind(Role::FitbroAdmin)
        .bind(chrono::Utc::now())
        .execute(&self.pool)
        .await?;

        tracing::info!(mobile = %seed.mobile, "Seeded FitBro Admin account");
        Ok(true)
    }

    /// Whether a row with `id` exists in `table`.
    pub(crate) async fn exists(&self, table: &'static str, id: i64) -> Result<bool> {
        let sql = format!("SELECT EXISTS(SELECT 1 FROM {} WHERE id = ?)", table);
        let found: bool = sqlx::query_scalar(&sql)
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(found)
    }

    /// Fail with `NotFound("<label> not found")` unless the row exists.
    pub async fn require(&self, table: &'static str, id: i64, label: &str) -> Result<()> {
        if self.exists(table, id).await? {
            Ok(())
        } else {
            Err(AppError::NotFound(format!("{} not found", label)))
        }
    }
}

/// Map a delete's affected-row count to `NotFound` when nothing matched.
fn expect_deleted(rows_affected: u64, label: &str) -> Result<()> {
    if rows_affected == 0 {
        Err(AppError::NotFound(format!("{} not found", label)))
    } else {
        Ok(())
    }
}

/// Create the parent directory of a file-backed SQLite URL.
pub fn ensure_sqlite_dir(db_url: &str) -> std::io::Result<()> {
    let path = db_url
        .strip_prefix("sqlite://")
        .or_else(|| db_url.strip_prefix("sqlite:"));

    let Some(path) = path else {
        return Ok(());
    };

    let path = path.split('?').next().unwrap_or(path);
    if path == ":memory:" || path.is_empty() {
        return Ok(());
    }

    let path = path.strip_prefix("file:").unwrap_or(path);
    if let Some(parent) = Path::new(path).parent() {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}
