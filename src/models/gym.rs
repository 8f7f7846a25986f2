// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Gym (tenant root) model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Gym row. Gyms are never deleted; `is_active` is the only off switch.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Gym {
    pub id: i64,
    pub name: String,
    pub address: Option<String>,
    pub contract_start: Option<NaiveDate>,
    pub contract_end: Option<NaiveDate>,
    pub recurring_revenue_start: Option<NaiveDate>,
    pub owner_mobile: String,
    pub owner_name: String,
    pub owner_email: String,
    pub is_active: bool,
    /// Public path of the uploaded logo (e.g. `/static/logos/gym_1_ab12cd34.png`)
    pub logo_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Payload for `POST /gyms`. Also provisions the owner account.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateGym {
    #[validate(length(min = 1, max = 128))]
    pub name: String,
    #[validate(length(max = 256))]
    pub address: Option<String>,
    pub contract_start: Option<NaiveDate>,
    pub contract_end: Option<NaiveDate>,
    pub recurring_revenue_start: Option<NaiveDate>,
    #[validate(length(min = 6, max = 20))]
    pub owner_mobile: String,
    #[validate(length(min = 1, max = 128))]
    pub owner_name: String,
    #[validate(email)]
    pub owner_email: String,
    /// Initial password for the owner; falls back to `DEFAULT_OWNER_PASSWORD`.
    #[validate(length(min = 6, max = 128))]
    pub owner_password: Option<String>,
}

/// Payload for `PUT /gyms/{id}`. Absent fields are left untouched.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateGym {
    #[validate(length(min = 1, max = 128))]
    pub name: Option<String>,
    #[validate(length(max = 256))]
    pub address: Option<String>,
    pub contract_start: Option<NaiveDate>,
    pub contract_end: Option<NaiveDate>,
    pub recurring_revenue_start: Option<NaiveDate>,
    pub is_active: Option<bool>,
    #[validate(length(min = 6, max = 20))]
    pub owner_mobile: Option<String>,
    #[validate(length(min = 1, max = 128))]
    pub owner_name: Option<String>,
    #[validate(email)]
    pub owner_email: Option<String>,
}

impl UpdateGym {
    pub fn apply(self, gym: &mut Gym) {
        if let Some(name) = self.name {
            gym.name = name;
        }
        if let Some(address) = self.address {
            gym.address = Some(address);
        }
        if let Some(start) = self.contract_start {
            gym.contract_start = Some(start);
        }
        if let Some(end) = self.contract_end {
            gym.contract_end = Some(end);
        }
        if let Some(start) = self.recurring_revenue_start {
            gym.recurring_revenue_start = Some(start);
        }
        if let Some(active) = self.is_active {
            gym.is_active = active;
        }
        if let Some(mobile) = self.owner_mobile {
            gym.owner_mobile = mobile;
        }
        if let Some(name) = self.owner_name {
            gym.owner_name = name;
        }
        if let Some(email) = self.owner_email {
            gym.owner_email = email;
        }
    }
}

/// Payload for `PUT /gyms/{id}/assign_owner`.
#[derive(Debug, Deserialize, Validate)]
pub struct AssignOwner {
    #[validate(length(min = 6, max = 20))]
    pub owner_mobile: String,
}
