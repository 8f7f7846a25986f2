// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Cycle-plan admission rule: a member has at most one live active cycle.
//!
//! The pre-check gives callers a clear conflict before anything is
//! written; the partial unique index on `cycle_plans` catches the
//! requests that race past it.

use chrono::NaiveDate;

use crate::db::Database;
use crate::error::{AppError, Result};
use crate::models::cycle::ACTIVE_CYCLE_CONFLICT;
use crate::models::CycleStatus;

/// Reject windows that end before they start.
pub fn check_window(start: NaiveDate, end: NaiveDate) -> Result<()> {
    if end < start {
        return Err(AppError::Validation(format!(
            "end_date {} is before start_date {}",
            end, start
        )));
    }
    Ok(())
}

/// Fail with a conflict if writing `status` for `member_id` would create a
/// second live active cycle. `exclude_id` is the cycle being updated.
pub async fn check_admission(
    db: &Database,
    member_id: i64,
    status: CycleStatus,
    exclude_id: Option<i64>,
) -> Result<()> {
    if status != CycleStatus::Active {
        return Ok(());
    }

    if db.active_cycle_exists(member_id, exclude_id).await? {
        tracing::info!(member_id, ?exclude_id, "Rejected second active cycle");
        return Err(AppError::Conflict(ACTIVE_CYCLE_CONFLICT.to_string()));
    }
    Ok(())
}
