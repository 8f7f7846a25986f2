// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.
//!
//! Row types derive `sqlx::FromRow` and serialize straight to the API.
//! Request payloads derive `validator::Validate` and are checked by
//! [`crate::extract::ValidatedJson`] before a handler runs.

pub mod announcement;
pub mod assessment;
pub mod catalog;
pub mod cycle;
pub mod gym;
pub mod member;
pub mod membership_plan;
pub mod user;
pub mod visitor;

pub use announcement::Announcement;
pub use assessment::{AssessmentResult, AssessmentTemplate};
pub use catalog::{CatalogKind, Equipment, Exercise, Program, Workout};
pub use cycle::{CyclePlan, CycleStatus, WorkoutLog, WorkoutPlanEntry};
pub use gym::Gym;
pub use member::Member;
pub use membership_plan::MembershipPlan;
pub use user::{Role, User};
pub use visitor::{Visitor, VisitorFollowUp, VisitorStatus};
