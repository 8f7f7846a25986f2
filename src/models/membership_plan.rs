// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Membership plan model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Membership plan row, with the linked program ids filled in by the db layer.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct MembershipPlan {
    pub id: i64,
    pub gym_id: i64,
    pub name: String,
    pub description: Option<String>,
    /// Whole calendar months a membership on this plan lasts
    pub duration_months: i64,
    pub price: f64,
    pub plan_type: String,
    pub offer_start_date: Option<NaiveDate>,
    pub offer_end_date: Option<NaiveDate>,
    pub offer_terms: Option<String>,
    pub status: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    #[sqlx(skip)]
    pub program_ids: Vec<i64>,
}

/// Brief plan listing used by visitor registration screens.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct PlanBrief {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
}

fn default_plan_type() -> String {
    "Regular".to_string()
}

fn default_status() -> String {
    "Active".to_string()
}

/// Payload for `POST /membership-plans`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateMembershipPlan {
    pub gym_id: i64,
    #[validate(length(min = 1, max = 128))]
    pub name: String,
    pub description: Option<String>,
    #[validate(range(min = 1, max = 120))]
    pub duration_months: i64,
    #[validate(range(min = 0.0))]
    pub price: f64,
    #[serde(default = "default_plan_type")]
    pub plan_type: String,
    pub offer_start_date: Option<NaiveDate>,
    pub offer_end_date: Option<NaiveDate>,
    pub offer_terms: Option<String>,
    #[serde(default = "default_status")]
    pub status: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub program_ids: Vec<i64>,
}

/// Payload for `PUT /membership-plans/{id}`.
///
/// `program_ids`, when present, replaces the linked set wholesale.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateMembershipPlan {
    #[validate(length(min = 1, max = 128))]
    pub name: Option<String>,
    pub description: Option<String>,
    #[validate(range(min = 1, max = 120))]
    pub duration_months: Option<i64>,
    #[validate(range(min = 0.0))]
    pub price: Option<f64>,
    pub plan_type: Option<String>,
    pub offer_start_date: Option<NaiveDate>,
    pub offer_end_date: Option<NaiveDate>,
    pub offer_terms: Option<String>,
    pub status: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub program_ids: Option<Vec<i64>>,
}

impl UpdateMembershipPlan {
    /// Apply scalar fields; returns the replacement program set, if any.
    pub fn apply(self, plan: &mut MembershipPlan) -> Option<Vec<i64>> {
        if let Some(name) = self.name {
            plan.name = name;
        }
        if let Some(description) = self.description {
            plan.description = Some(description);
        }
        if let Some(months) = self.duration_months {
            plan.duration_months = months;
        }
        if let Some(price) = self.price {
            plan.price = price;
        }
        if let Some(plan_type) = self.plan_type {
            plan.plan_type = plan_type;
        }
        if let Some(date) = self.offer_start_date {
            plan.offer_start_date = Some(date);
        }
        if let Some(date) = self.offer_end_date {
            plan.offer_end_date = Some(date);
        }
        if let Some(terms) = self.offer_terms {
            plan.offer_terms = Some(terms);
        }
        if let Some(status) = self.status {
            plan.status = status;
        }
        if let Some(date) = self.start_date {
            plan.start_date = Some(date);
        }
        if let Some(date) = self.end_date {
            plan.end_date = Some(date);
        }
        self.program_ids
    }
}
