// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Sales-lead (visitor) models and follow-up log.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

pub const VISITOR_STATUS_CHANGED: &str = "Visitor status changed while the request was processed";

/// Lead status. `Contacted` is the only non-terminal state.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(type_name = "TEXT")]
pub enum VisitorStatus {
    #[default]
    Contacted,
    Converted,
    #[serde(rename = "Not Interested")]
    #[sqlx(rename = "Not Interested")]
    NotInterested,
}

impl VisitorStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VisitorStatus::Contacted => "Contacted",
            VisitorStatus::Converted => "Converted",
            VisitorStatus::NotInterested => "Not Interested",
        }
    }

    /// Contacted moves to either terminal state; re-asserting the
    /// current state is a no-op.
    pub fn can_transition_to(self, next: VisitorStatus) -> bool {
        self == next || self == VisitorStatus::Contacted
    }
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Visitor {
    pub id: i64,
    pub gym_id: i64,
    pub first_name: String,
    pub last_name: Option<String>,
    pub mobile: String,
    pub email: Option<String>,
    pub fitness_goal: Option<String>,
    pub interested_plan_id: Option<i64>,
    pub status: VisitorStatus,
    pub comments: Option<String>,
    pub last_followup: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by: Option<String>,
    pub updated_by: Option<String>,
}

/// Payload for `POST /visitors`. `gym_id` falls back to the caller's gym.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateVisitor {
    pub gym_id: Option<i64>,
    #[validate(length(min = 1, max = 64))]
    pub first_name: String,
    #[validate(length(max = 64))]
    pub last_name: Option<String>,
    #[validate(length(min = 6, max = 20))]
    pub mobile: String,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(max = 256))]
    pub fitness_goal: Option<String>,
    pub interested_plan_id: Option<i64>,
    pub comments: Option<String>,
}

/// Payload for `PUT /visitors/{id}`.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateVisitor {
    #[validate(length(min = 1, max = 64))]
    pub first_name: Option<String>,
    #[validate(length(max = 64))]
    pub last_name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(max = 256))]
    pub fitness_goal: Option<String>,
    pub interested_plan_id: Option<i64>,
    pub status: Option<VisitorStatus>,
    pub comments: Option<String>,
}

impl UpdateVisitor {
    /// Apply everything except `status`, which is checked by the caller.
    pub fn apply(self, visitor: &mut Visitor) {
        if let Some(first_name) = self.first_name {
            visitor.first_name = first_name;
        }
        if self.last_name.is_some() {
            visitor.last_name = self.last_name;
        }
        if self.email.is_some() {
            visitor.email = self.email;
        }
        if self.fitness_goal.is_some() {
            visitor.fitness_goal = self.fitness_goal;
        }
        if self.interested_plan_id.is_some() {
            visitor.interested_plan_id = self.interested_plan_id;
        }
        if self.comments.is_some() {
            visitor.comments = self.comments;
        }
    }
}

/// Append-only follow-up note on a visitor.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct VisitorFollowUp {
    pub id: i64,
    pub visitor_id: i64,
    pub comment: Option<String>,
    pub next_followup: Option<NaiveDate>,
    pub status: Option<VisitorStatus>,
    pub created_at: DateTime<Utc>,
    pub created_by: Option<i64>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateFollowUp {
    #[validate(length(max = 1024))]
    pub comment: Option<String>,
    pub next_followup: Option<NaiveDate>,
    pub status: Option<VisitorStatus>,
}

/// Visitor detail with its follow-up history.
#[derive(Debug, Serialize)]
pub struct VisitorDetail {
    #[serde(flatten)]
    pub visitor: Visitor,
    pub followups: Vec<VisitorFollowUp>,
}

/// Result of a registration attempt against prior visits for the same
/// gym and mobile number.
#[derive(Debug, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RegistrationOutcome {
    Created {
        visitor: Visitor,
    },
    AlreadyConverted {
        message: String,
        first_name: String,
        visit_date: NaiveDate,
        fitness_goal: Option<String>,
    },
    WelcomeBack {
        message: String,
        first_name: String,
        visit_date: NaiveDate,
        fitness_goal: Option<String>,
    },
}
