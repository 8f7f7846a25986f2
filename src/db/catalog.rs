// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Program, workout and exercise catalog.

use sqlx::{Sqlite, Transaction};

use super::{expect_deleted, Database};
use crate::error::{AppError, Result};
use crate::models::catalog::{CreateExercise, CreateProgram, CreateWorkout};
use crate::models::{Exercise, Program, Workout};

/// Deepest parent chain the catalog accepts. The lineage walk stops one
/// step past it, so a longer result means the chain is too deep.
pub const MAX_TREE_DEPTH: usize = 64;

/// Catalog tables that form a parent/child tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogTable {
    Programs,
    Workouts,
    Exercises,
}

impl CatalogTable {
    pub fn table(&self) -> &'static str {
        match self {
            CatalogTable::Programs => "programs",
            CatalogTable::Workouts => "workouts",
            CatalogTable::Exercises => "exercises",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CatalogTable::Programs => "Program",
            CatalogTable::Workouts => "Workout",
            CatalogTable::Exercises => "Exercise",
        }
    }
}

const PROGRAM_COLUMNS: &str = "id, name, description, kind, gym_id, parent_id, goals, status";
const WORKOUT_COLUMNS: &str = "id, name, description, program_id, kind, gym_id, parent_id, active";
const EXERCISE_COLUMNS: &str = "id, name, description, primary_muscles, secondary_muscles, \
    is_time_based, workout_id, kind, gym_id, parent_id, is_enabled, equipment_id";

impl Database {
    // ─── Tree Operations ─────────────────────────────────────────

    /// Ids on the path from `start_id` up to its root, starting with
    /// `start_id` itself. Empty when `start_id` does not exist. At most
    /// `MAX_TREE_DEPTH + 1` ids are returned.
    pub async fn catalog_lineage(&self, table: CatalogTable, start_id: i64) -> Result<Vec<i64>> {
        let sql = format!(
            r#"WITH RECURSIVE lineage(id, parent_id, depth) AS (
                   SELECT id, parent_id, 0 FROM {table} WHERE id = ?1
                   UNION ALL
                   SELECT t.id, t.parent_id, l.depth + 1
                   FROM {table} t JOIN lineage l ON t.id = l.parent_id
                   WHERE l.depth < ?2
               )
               SELECT id FROM lineage ORDER BY depth"#,
            table = table.table()
        );
        Ok(sqlx::query_scalar(&sql)
            .bind(start_id)
            .bind(MAX_TREE_DEPTH as i64)
            .fetch_all(&self.pool)
            .await?)
    }

    // ─── Program Operations ──────────────────────────────────────

    pub async fn get_program(&self, id: i64) -> Result<Option<Program>> {
        let sql = format!("SELECT {} FROM programs WHERE id = ?", PROGRAM_COLUMNS);
        let program = sqlx::query_as::<_, Program>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match program {
            Some(mut program) => {
                program.workout_ids = self.program_workout_ids(program.id).await?;
                Ok(Some(program))
            }
            None => Ok(None),
        }
    }

    /// Masters plus, when `gym_id` is given, that gym's overrides.
    pub async fn list_programs(&self, gym_id: Option<i64>) -> Result<Vec<Program>> {
        let sql = format!(
            "SELECT {} FROM programs WHERE ?1 IS NULL OR gym_id IS NULL OR gym_id = ?1 ORDER BY id",
            PROGRAM_COLUMNS
        );
        let mut programs = sqlx::query_as::<_, Program>(&sql)
            .bind(gym_id)
            .fetch_all(&self.pool)
            .await?;

        for program in &mut programs {
            program.workout_ids = self.program_workout_ids(program.id).await?;
        }
        Ok(programs)
    }

    pub async fn insert_program(&self, payload: &CreateProgram) -> Result<Program> {
        let mut tx = self.pool.begin().await?;

        let id = sqlx::query(
            r#"INSERT INTO programs (name, description, kind, gym_id, parent_id, goals, status)
               VALUES (?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(&payload.name)
        .bind(&payload.description)
        .bind(payload.kind)
        .bind(payload.gym_id)
        .bind(payload.parent_id)
        .bind(&payload.goals)
        .bind(&payload.status)
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();

        if !payload.workout_ids.is_empty() {
            attach_workouts(&mut tx, id, &payload.workout_ids).await?;
        }
        tx.commit().await?;

        self.fetch_program(id).await
    }

    /// Write back `program`, re-pointing workouts when `workout_ids` is set.
    pub async fn update_program(
        &self,
        program: &Program,
        workout_ids: Option<&[i64]>,
    ) -> Result<Program> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"UPDATE programs
               SET name = ?, description = ?, kind = ?, gym_id = ?, parent_id = ?, goals = ?, status = ?
               WHERE id = ?"#,
        )
        .bind(&program.name)
        .bind(&program.description)
        .bind(program.kind)
        .bind(program.gym_id)
        .bind(program.parent_id)
        .bind(&program.goals)
        .bind(&program.status)
        .bind(program.id)
        .execute(&mut *tx)
        .await?;

        if let Some(ids) = workout_ids {
            attach_workouts(&mut tx, program.id, ids).await?;
        }
        tx.commit().await?;

        self.fetch_program(program.id).await
    }

    pub async fn delete_program(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM programs WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        expect_deleted(result.rows_affected(), "Program")
    }

    async fn program_workout_ids(&self, program_id: i64) -> Result<Vec<i64>> {
        Ok(
            sqlx::query_scalar("SELECT id FROM workouts WHERE program_id = ? ORDER BY id")
                .bind(program_id)
                .fetch_all(&self.pool)
                .await?,
        )
    }

    async fn fetch_program(&self, id: i64) -> Result<Program> {
        self.get_program(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Program not found".to_string()))
    }

    // ─── Workout Operations ──────────────────────────────────────

    pub async fn get_workout(&self, id: i64) -> Result<Option<Workout>> {
        let sql = format!("SELECT {} FROM workouts WHERE id = ?", WORKOUT_COLUMNS);
        Ok(sqlx::query_as::<_, Workout>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    pub async fn list_workouts(
        &self,
        program_id: Option<i64>,
        gym_id: Option<i64>,
    ) -> Result<Vec<Workout>> {
        let sql = format!(
            "SELECT {} FROM workouts
             WHERE (?1 IS NULL OR program_id = ?1)
               AND (?2 IS NULL OR gym_id IS NULL OR gym_id = ?2)
             ORDER BY id",
            WORKOUT_COLUMNS
        );
        Ok(sqlx::query_as::<_, Workout>(&sql)
            .bind(program_id)
            .bind(gym_id)
            .fetch_all(&self.pool)
            .await?)
    }

    pub async fn insert_workout(&self, payload: &CreateWorkout) -> Result<Workout> {
        let id = sqlx::query(
            r#"INSERT INTO workouts (name, description, program_id, kind, gym_id, parent_id, active)
               VALUES (?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(&payload.name)
        .bind(&payload.description)
        .bind(payload.program_id)
        .bind(payload.kind)
        .bind(payload.gym_id)
        .bind(payload.parent_id)
        .bind(payload.active)
        .execute(&self.pool)
        .await?
        .last_insert_rowid();

        self.fetch_workout(id).await
    }

    pub async fn update_workout(&self, workout: &Workout) -> Result<Workout> {
        sqlx::query(
            r#"UPDATE workouts
               SET name = ?, description = ?, program_id = ?, kind = ?, gym_id = ?, parent_id = ?, active = ?
               WHERE id = ?"#,
        )
        .bind(&workout.name)
        .bind(&workout.description)
        .bind(workout.program_id)
        .bind(workout.kind)
        .bind(workout.gym_id)
        .bind(workout.parent_id)
        .bind(workout.active)
        .bind(workout.id)
        .execute(&self.pool)
        .await?;

        self.fetch_workout(workout.id).await
    }

    pub async fn delete_workout(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM workouts WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        expect_deleted(result.rows_affected(), "Workout")
    }

    async fn fetch_workout(&self, id: i64) -> Result<Workout> {
        self.get_workout(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Workout not found".to_string()))
    }

    // ─── Exercise Operations ─────────────────────────────────────

    pub async fn get_exercise(&self, id: i64) -> Result<Option<Exercise>> {
        let sql = format!("SELECT {} FROM exercises WHERE id = ?", EXERCISE_COLUMNS);
        Ok(sqlx::query_as::<_, Exercise>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    pub async fn list_exercises(
        &self,
        workout_id: Option<i64>,
        gym_id: Option<i64>,
    ) -> Result<Vec<Exercise>> {
        let sql = format!(
            "SELECT {} FROM exercises
             WHERE (?1 IS NULL OR workout_id = ?1)
               AND (?2 IS NULL OR gym_id IS NULL OR gym_id = ?2)
             ORDER BY id",
            EXERCISE_COLUMNS
        );
        Ok(sqlx::query_as::<_, Exercise>(&sql)
            .bind(workout_id)
            .bind(gym_id)
            .fetch_all(&self.pool)
            .await?)
    }

    pub async fn insert_exercise(&self, payload: &CreateExercise) -> Result<Exercise> {
        let id = sqlx::query(
            r#"INSERT INTO exercises (name, description, primary_muscles, secondary_muscles,
                   is_time_based, workout_id, kind, gym_id, parent_id, is_enabled, equipment_id)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(&payload.name)
        .bind(&payload.description)
        .bind(&payload.primary_muscles)
        .bind(&payload.secondary_muscles)
        .bind(payload.is_time_based)
        .bind(payload.workout_id)
        .bind(payload.kind)
        .bind(payload.gym_id)
        .bind(payload.parent_id)
        .bind(payload.is_enabled)
        .bind(payload.equipment_id)
        .execute(&self.pool)
        .await?
        .last_insert_rowid();

        self.fetch_exercise(id).await
    }

    pub async fn update_exercise(&self, exercise: &Exercise) -> Result<Exercise> {
        sqlx::query(
            r#"UPDATE exercises
               SET name = ?, description = ?, primary_muscles = ?, secondary_muscles = ?,
                   is_time_based = ?, workout_id = ?, kind = ?, gym_id = ?, parent_id = ?,
                   is_enabled = ?, equipment_id = ?
               WHERE id = ?"#,
        )
        .bind(&exercise.name)
        .bind(&exercise.description)
        .bind(&exercise.primary_muscles)
        .bind(&exercise.secondary_muscles)
        .bind(exercise.is_time_based)
        .bind(exercise.workout_id)
        .bind(exercise.kind)
        .bind(exercise.gym_id)
        .bind(exercise.parent_id)
        .bind(exercise.is_enabled)
        .bind(exercise.equipment_id)
        .bind(exercise.id)
        .execute(&self.pool)
        .await?;

        self.fetch_exercise(exercise.id).await
    }

    pub async fn delete_exercise(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM exercises WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        expect_deleted(result.rows_affected(), "Exercise")
    }

    async fn fetch_exercise(&self, id: i64) -> Result<Exercise> {
        self.get_exercise(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Exercise not found".to_string()))
    }
}

/// Make `workout_ids` exactly the set of workouts under `program_id`.
async fn attach_workouts(
    tx: &mut Transaction<'_, Sqlite>,
    program_id: i64,
    workout_ids: &[i64],
) -> Result<()> {
    sqlx::query("UPDATE workouts SET program_id = NULL WHERE program_id = ?")
        .bind(program_id)
        .execute(&mut **tx)
        .await?;

    for workout_id in workout_ids {
        let result = sqlx::query("UPDATE workouts SET program_id = ? WHERE id = ?")
            .bind(program_id)
            .bind(workout_id)
            .execute(&mut **tx)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Workout {} not found", workout_id)));
        }
    }
    Ok(())
}
