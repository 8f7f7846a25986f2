// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Gym member model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Member row.
///
/// `membership_end_date` is always derived from the plan duration and
/// `membership_start_date`; it is never taken from a request.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Member {
    pub id: i64,
    pub gym_id: i64,
    pub membership_plan_id: i64,
    pub name: String,
    pub mobile: String,
    pub email: Option<String>,
    pub photo_url: Option<String>,
    pub dob: Option<NaiveDate>,
    pub gender: Option<String>,
    pub address: Option<String>,
    pub join_date: NaiveDate,
    pub active: bool,
    pub membership_start_date: NaiveDate,
    pub membership_end_date: NaiveDate,
}

fn default_active() -> bool {
    true
}

/// Payload for `POST /members`.
///
/// Unknown fields such as a client-computed `membership_end_date` are
/// accepted and dropped.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateMember {
    pub gym_id: i64,
    pub membership_plan_id: i64,
    #[validate(length(min = 1, max = 128))]
    pub name: String,
    #[validate(length(min = 6, max = 20))]
    pub mobile: String,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(max = 256))]
    pub photo_url: Option<String>,
    pub dob: Option<NaiveDate>,
    #[validate(length(max = 16))]
    pub gender: Option<String>,
    #[validate(length(max = 256))]
    pub address: Option<String>,
    pub join_date: NaiveDate,
    #[serde(default = "default_active")]
    pub active: bool,
    pub membership_start_date: NaiveDate,
}

/// Payload for `PUT|PATCH /members/{id}`.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateMember {
    pub gym_id: Option<i64>,
    pub membership_plan_id: Option<i64>,
    #[validate(length(min = 1, max = 128))]
    pub name: Option<String>,
    #[validate(length(min = 6, max = 20))]
    pub mobile: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(max = 256))]
    pub photo_url: Option<String>,
    pub dob: Option<NaiveDate>,
    #[validate(length(max = 16))]
    pub gender: Option<String>,
    #[validate(length(max = 256))]
    pub address: Option<String>,
    pub join_date: Option<NaiveDate>,
    pub active: Option<bool>,
    pub membership_start_date: Option<NaiveDate>,
}

impl UpdateMember {
    /// Whether the update touches an input of the end-date calculation.
    pub fn changes_membership_window(&self) -> bool {
        self.membership_plan_id.is_some() || self.membership_start_date.is_some()
    }

    /// Apply profile fields. Plan and start date are handled by the
    /// membership service so the end date can be recomputed.
    pub fn apply_profile(&self, member: &mut Member) {
        if let Some(gym_id) = self.gym_id {
            member.gym_id = gym_id;
        }
        if let Some(name) = &self.name {
            member.name = name.clone();
        }
        if let Some(mobile) = &self.mobile {
            member.mobile = mobile.clone();
        }
        if let Some(email) = &self.email {
            member.email = Some(email.clone());
        }
        if let Some(photo_url) = &self.photo_url {
            member.photo_url = Some(photo_url.clone());
        }
        if let Some(dob) = self.dob {
            member.dob = Some(dob);
        }
        if let Some(gender) = &self.gender {
            member.gender = Some(gender.clone());
        }
        if let Some(address) = &self.address {
            member.address = Some(address.clone());
        }
        if let Some(join_date) = self.join_date {
            member.join_date = join_date;
        }
        if let Some(active) = self.active {
            member.active = active;
        }
    }
}
