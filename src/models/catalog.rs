// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Training catalog models: programs, workouts, exercises and equipment.
//!
//! Programs, workouts and exercises each form a per-table tree through
//! `parent_id`. A `master` row is a tenant-independent template; an
//! `override` row belongs to one gym and usually points at the master it
//! customizes.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Whether a catalog row is a shared template or a gym-specific copy.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(type_name = "TEXT", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum CatalogKind {
    #[default]
    Master,
    Override,
}

/// Program row.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Program {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub kind: CatalogKind,
    pub gym_id: Option<i64>,
    pub parent_id: Option<i64>,
    pub goals: Option<String>,
    pub status: String,
    /// Workouts attached to this program, filled in by the db layer
    #[sqlx(skip)]
    pub workout_ids: Vec<i64>,
}

fn default_status() -> String {
    "Active".to_string()
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateProgram {
    #[validate(length(min = 1, max = 128))]
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub kind: CatalogKind,
    pub gym_id: Option<i64>,
    pub parent_id: Option<i64>,
    pub goals: Option<String>,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default)]
    pub workout_ids: Vec<i64>,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateProgram {
    #[validate(length(min = 1, max = 128))]
    pub name: Option<String>,
    pub description: Option<String>,
    pub kind: Option<CatalogKind>,
    pub gym_id: Option<i64>,
    pub parent_id: Option<i64>,
    pub goals: Option<String>,
    pub status: Option<String>,
    pub workout_ids: Option<Vec<i64>>,
}

impl UpdateProgram {
    /// Apply scalar fields; returns the replacement workout set, if any.
    pub fn apply(self, program: &mut Program) -> Option<Vec<i64>> {
        if let Some(name) = self.name {
            program.name = name;
        }
        if self.description.is_some() {
            program.description = self.description;
        }
        if let Some(kind) = self.kind {
            program.kind = kind;
        }
        if self.gym_id.is_some() {
            program.gym_id = self.gym_id;
        }
        if self.parent_id.is_some() {
            program.parent_id = self.parent_id;
        }
        if self.goals.is_some() {
            program.goals = self.goals;
        }
        if let Some(status) = self.status {
            program.status = status;
        }
        self.workout_ids
    }
}

/// Workout row.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Workout {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub program_id: Option<i64>,
    pub kind: CatalogKind,
    pub gym_id: Option<i64>,
    pub parent_id: Option<i64>,
    pub active: bool,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateWorkout {
    #[validate(length(min = 1, max = 128))]
    pub name: String,
    pub description: Option<String>,
    pub program_id: Option<i64>,
    #[serde(default)]
    pub kind: CatalogKind,
    pub gym_id: Option<i64>,
    pub parent_id: Option<i64>,
    #[serde(default = "default_true")]
    pub active: bool,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateWorkout {
    #[validate(length(min = 1, max = 128))]
    pub name: Option<String>,
    pub description: Option<String>,
    pub program_id: Option<i64>,
    pub kind: Option<CatalogKind>,
    pub gym_id: Option<i64>,
    pub parent_id: Option<i64>,
    pub active: Option<bool>,
}

impl UpdateWorkout {
    pub fn apply(self, workout: &mut Workout) {
        if let Some(name) = self.name {
            workout.name = name;
        }
        if self.description.is_some() {
            workout.description = self.description;
        }
        if self.program_id.is_some() {
            workout.program_id = self.program_id;
        }
        if let Some(kind) = self.kind {
            workout.kind = kind;
        }
        if self.gym_id.is_some() {
            workout.gym_id = self.gym_id;
        }
        if self.parent_id.is_some() {
            workout.parent_id = self.parent_id;
        }
        if let Some(active) = self.active {
            workout.active = active;
        }
    }
}

/// Exercise row.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Exercise {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub primary_muscles: Option<String>,
    pub secondary_muscles: Option<String>,
    pub is_time_based: bool,
    pub workout_id: i64,
    pub kind: CatalogKind,
    pub gym_id: Option<i64>,
    pub parent_id: Option<i64>,
    pub is_enabled: bool,
    pub equipment_id: Option<i64>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateExercise {
    #[validate(length(min = 1, max = 128))]
    pub name: String,
    pub description: Option<String>,
    #[validate(length(max = 64))]
    pub primary_muscles: Option<String>,
    #[validate(length(max = 64))]
    pub secondary_muscles: Option<String>,
    #[serde(default)]
    pub is_time_based: bool,
    pub workout_id: i64,
    #[serde(default)]
    pub kind: CatalogKind,
    pub gym_id: Option<i64>,
    pub parent_id: Option<i64>,
    #[serde(default = "default_true")]
    pub is_enabled: bool,
    pub equipment_id: Option<i64>,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateExercise {
    #[validate(length(min = 1, max = 128))]
    pub name: Option<String>,
    pub description: Option<String>,
    #[validate(length(max = 64))]
    pub primary_muscles: Option<String>,
    #[validate(length(max = 64))]
    pub secondary_muscles: Option<String>,
    pub is_time_based: Option<bool>,
    pub workout_id: Option<i64>,
    pub kind: Option<CatalogKind>,
    pub gym_id: Option<i64>,
    pub parent_id: Option<i64>,
    pub is_enabled: Option<bool>,
    pub equipment_id: Option<i64>,
}

impl UpdateExercise {
    pub fn apply(self, exercise: &mut Exercise) {
        if let Some(name) = self.name {
            exercise.name = name;
        }
        if self.description.is_some() {
            exercise.description = self.description;
        }
        if self.primary_muscles.is_some() {
            exercise.primary_muscles = self.primary_muscles;
        }
        if self.secondary_muscles.is_some() {
            exercise.secondary_muscles = self.secondary_muscles;
        }
        if let Some(time_based) = self.is_time_based {
            exercise.is_time_based = time_based;
        }
        if let Some(workout_id) = self.workout_id {
            exercise.workout_id = workout_id;
        }
        if let Some(kind) = self.kind {
            exercise.kind = kind;
        }
        if self.gym_id.is_some() {
            exercise.gym_id = self.gym_id;
        }
        if self.parent_id.is_some() {
            exercise.parent_id = self.parent_id;
        }
        if let Some(enabled) = self.is_enabled {
            exercise.is_enabled = enabled;
        }
        if self.equipment_id.is_some() {
            exercise.equipment_id = self.equipment_id;
        }
    }
}

/// Equipment row.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Equipment {
    pub id: i64,
    pub gym_id: i64,
    pub name: String,
    pub category: Option<String>,
    pub manufacturer: Option<String>,
    pub purchase_date: Option<NaiveDate>,
    pub warranty_years: Option<i64>,
    pub status: String,
}

fn default_equipment_status() -> String {
    "active".to_string()
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateEquipment {
    pub gym_id: i64,
    #[validate(length(min = 1, max = 128))]
    pub name: String,
    #[validate(length(max = 64))]
    pub category: Option<String>,
    #[validate(length(max = 64))]
    pub manufacturer: Option<String>,
    pub purchase_date: Option<NaiveDate>,
    #[validate(range(min = 0, max = 50))]
    pub warranty_years: Option<i64>,
    #[serde(default = "default_equipment_status")]
    #[validate(length(min = 1, max = 32))]
    pub status: String,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateEquipment {
    #[validate(length(min = 1, max = 128))]
    pub name: Option<String>,
    #[validate(length(max = 64))]
    pub category: Option<String>,
    #[validate(length(max = 64))]
    pub manufacturer: Option<String>,
    pub purchase_date: Option<NaiveDate>,
    #[validate(range(min = 0, max = 50))]
    pub warranty_years: Option<i64>,
    #[validate(length(min = 1, max = 32))]
    pub status: Option<String>,
}

impl UpdateEquipment {
    pub fn apply(self, equipment: &mut Equipment) {
        if let Some(name) = self.name {
            equipment.name = name;
        }
        if self.category.is_some() {
            equipment.category = self.category;
        }
        if self.manufacturer.is_some() {
            equipment.manufacturer = self.manufacturer;
        }
        if self.purchase_date.is_some() {
            equipment.purchase_date = self.purchase_date;
        }
        if self.warranty_years.is_some() {
            equipment.warranty_years = self.warranty_years;
        }
        if let Some(status) = self.status {
            equipment.status = status;
        }
    }
}
