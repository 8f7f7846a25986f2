// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Gym-scoped notice shown to members and staff.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Announcement {
    pub id: i64,
    pub gym_id: i64,
    pub title: String,
    pub message: String,
    pub posted_at: DateTime<Utc>,
    pub created_by: Option<i64>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateAnnouncement {
    pub gym_id: i64,
    #[validate(length(min = 1, max = 128))]
    pub title: String,
    #[validate(length(min = 1, max = 4096))]
    pub message: String,
}
