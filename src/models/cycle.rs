// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Training cycle models: cycle plans, scheduled entries and logs.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Conflict detail reported when a member would end up with two live
/// active cycles.
pub const ACTIVE_CYCLE_CONFLICT: &str = "Member already has an active cycle";

/// Lifecycle status of a cycle plan.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(type_name = "TEXT")]
pub enum CycleStatus {
    #[default]
    Future,
    Active,
    Completed,
    Terminated,
}

impl CycleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CycleStatus::Future => "Future",
            CycleStatus::Active => "Active",
            CycleStatus::Completed => "Completed",
            CycleStatus::Terminated => "Terminated",
        }
    }
}

/// Cycle plan row. Soft-deleted rows keep their data and stay
/// reachable by id.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct CyclePlan {
    pub id: i64,
    pub member_id: i64,
    pub cycle_number: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Length in days
    pub duration: i64,
    pub status: CycleStatus,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
}

fn default_duration() -> i64 {
    30
}

/// Payload for `POST /cycle-plans`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCyclePlan {
    pub member_id: i64,
    #[validate(range(min = 1))]
    pub cycle_number: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default = "default_duration")]
    #[validate(range(min = 1, max = 366))]
    pub duration: i64,
    #[serde(default)]
    pub status: CycleStatus,
}

/// Payload for `PUT /cycle-plans/{id}`.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateCyclePlan {
    pub member_id: Option<i64>,
    #[validate(range(min = 1))]
    pub cycle_number: Option<i64>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    #[validate(range(min = 1, max = 366))]
    pub duration: Option<i64>,
    pub status: Option<CycleStatus>,
}

impl UpdateCyclePlan {
    pub fn apply(self, cycle: &mut CyclePlan) {
        if let Some(member_id) = self.member_id {
            cycle.member_id = member_id;
        }
        if let Some(number) = self.cycle_number {
            cycle.cycle_number = number;
        }
        if let Some(start) = self.start_date {
            cycle.start_date = start;
        }
        if let Some(end) = self.end_date {
            cycle.end_date = end;
        }
        if let Some(duration) = self.duration {
            cycle.duration = duration;
        }
        if let Some(status) = self.status {
            cycle.status = status;
        }
    }
}

/// One planned exercise on one day of a cycle.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct WorkoutPlanEntry {
    pub id: i64,
    pub cycle_plan_id: i64,
    pub day_date: NaiveDate,
    pub workout_id: i64,
    pub exercise_id: i64,
    pub planned_sets: Option<i64>,
    pub planned_reps: Option<i64>,
    pub planned_weight: Option<f64>,
    pub planned_minutes: Option<i64>,
    pub planned_rpe: Option<i64>,
    pub planned_notes: Option<String>,
}

/// Payload for `POST /workout-plan-entries`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateWorkoutPlanEntry {
    pub cycle_plan_id: i64,
    pub day_date: NaiveDate,
    pub workout_id: i64,
    pub exercise_id: i64,
    #[validate(range(min = 0))]
    pub planned_sets: Option<i64>,
    #[validate(range(min = 0))]
    pub planned_reps: Option<i64>,
    #[validate(range(min = 0.0))]
    pub planned_weight: Option<f64>,
    #[validate(range(min = 0))]
    pub planned_minutes: Option<i64>,
    #[validate(range(min = 1, max = 10))]
    pub planned_rpe: Option<i64>,
    pub planned_notes: Option<String>,
}

/// Payload for `PUT /workout-plan-entries/{id}`.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateWorkoutPlanEntry {
    pub day_date: Option<NaiveDate>,
    pub workout_id: Option<i64>,
    pub exercise_id: Option<i64>,
    #[validate(range(min = 0))]
    pub planned_sets: Option<i64>,
    #[validate(range(min = 0))]
    pub planned_reps: Option<i64>,
    #[validate(range(min = 0.0))]
    pub planned_weight: Option<f64>,
    #[validate(range(min = 0))]
    pub planned_minutes: Option<i64>,
    #[validate(range(min = 1, max = 10))]
    pub planned_rpe: Option<i64>,
    pub planned_notes: Option<String>,
}

impl UpdateWorkoutPlanEntry {
    pub fn apply(self, entry: &mut WorkoutPlanEntry) {
        if let Some(day) = self.day_date {
            entry.day_date = day;
        }
        if let Some(workout_id) = self.workout_id {
            entry.workout_id = workout_id;
        }
        if let Some(exercise_id) = self.exercise_id {
            entry.exercise_id = exercise_id;
        }
        if self.planned_sets.is_some() {
            entry.planned_sets = self.planned_sets;
        }
        if self.planned_reps.is_some() {
            entry.planned_reps = self.planned_reps;
        }
        if self.planned_weight.is_some() {
            entry.planned_weight = self.planned_weight;
        }
        if self.planned_minutes.is_some() {
            entry.planned_minutes = self.planned_minutes;
        }
        if self.planned_rpe.is_some() {
            entry.planned_rpe = self.planned_rpe;
        }
        if self.planned_notes.is_some() {
            entry.planned_notes = self.planned_notes;
        }
    }
}

/// Payload for `POST /workout-plan-entries/swap-workout-day`.
#[derive(Debug, Deserialize, Validate)]
pub struct SwapWorkoutDay {
    pub cycle_plan_id: i64,
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,
}

/// Actual performance recorded against a planned entry.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct WorkoutLog {
    pub id: i64,
    pub member_id: i64,
    pub cycle_plan_id: i64,
    pub workout_plan_entry_id: i64,
    pub actual_sets: Option<i64>,
    pub actual_reps: Option<i64>,
    pub actual_weight: Option<f64>,
    pub actual_minutes: Option<i64>,
    pub actual_rpe: Option<i64>,
    pub actual_notes: Option<String>,
    pub status: Option<String>,
    pub workout_date: NaiveDate,
}

/// Payload for `POST /workout-logs`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateWorkoutLog {
    pub member_id: i64,
    pub cycle_plan_id: i64,
    pub workout_plan_entry_id: i64,
    #[validate(range(min = 0))]
    pub actual_sets: Option<i64>,
    #[validate(range(min = 0))]
    pub actual_reps: Option<i64>,
    #[validate(range(min = 0.0))]
    pub actual_weight: Option<f64>,
    #[validate(range(min = 0))]
    pub actual_minutes: Option<i64>,
    #[validate(range(min = 1, max = 10))]
    pub actual_rpe: Option<i64>,
    pub actual_notes: Option<String>,
    #[validate(length(max = 32))]
    pub status: Option<String>,
    pub workout_date: NaiveDate,
}

/// Payload for `PATCH /workout-logs/{id}`.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateWorkoutLog {
    pub member_id: Option<i64>,
    pub cycle_plan_id: Option<i64>,
    pub workout_plan_entry_id: Option<i64>,
    #[validate(range(min = 0))]
    pub actual_sets: Option<i64>,
    #[validate(range(min = 0))]
    pub actual_reps: Option<i64>,
    #[validate(range(min = 0.0))]
    pub actual_weight: Option<f64>,
    #[validate(range(min = 0))]
    pub actual_minutes: Option<i64>,
    #[validate(range(min = 1, max = 10))]
    pub actual_rpe: Option<i64>,
    pub actual_notes: Option<String>,
    #[validate(length(max = 32))]
    pub status: Option<String>,
    pub workout_date: Option<NaiveDate>,
}

impl UpdateWorkoutLog {
    pub fn apply(self, log: &mut WorkoutLog) {
        if let Some(member_id) = self.member_id {
            log.member_id = member_id;
        }
        if let Some(cycle_plan_id) = self.cycle_plan_id {
            log.cycle_plan_id = cycle_plan_id;
        }
        if let Some(entry_id) = self.workout_plan_entry_id {
            log.workout_plan_entry_id = entry_id;
        }
        if self.actual_sets.is_some() {
            log.actual_sets = self.actual_sets;
        }
        if self.actual_reps.is_some() {
            log.actual_reps = self.actual_reps;
        }
        if self.actual_weight.is_some() {
            log.actual_weight = self.actual_weight;
        }
        if self.actual_minutes.is_some() {
            log.actual_minutes = self.actual_minutes;
        }
        if self.actual_rpe.is_some() {
            log.actual_rpe = self.actual_rpe;
        }
        if self.actual_notes.is_some() {
            log.actual_notes = self.actual_notes;
        }
        if self.status.is_some() {
            log.status = self.status;
        }
        if let Some(date) = self.workout_date {
            log.workout_date = date;
        }
    }
}
