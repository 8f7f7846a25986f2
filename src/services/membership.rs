// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Membership lifecycle calculator.
//!
//! A member's end date is a pure function of the plan duration and the
//! start date. It is recomputed whenever either input changes and is
//! never accepted from a caller.

use chrono::NaiveDate;

use crate::error::{AppError, Result};
use crate::models::{Member, MembershipPlan};
use crate::time_utils::add_months;

/// End date for a membership of `duration_months` starting on `start`.
pub fn membership_end_date(start: NaiveDate, duration_months: i64) -> Result<NaiveDate> {
    let months = u32::try_from(duration_months)
        .ok()
        .filter(|m| *m >= 1)
        .ok_or_else(|| {
            AppError::BadRequest(format!(
                "Plan duration must be at least one month, got {}",
                duration_months
            ))
        })?;

    add_months(start, months)
        .ok_or_else(|| AppError::BadRequest("Membership end date out of range".to_string()))
}

/// Point `member` at `plan` starting on `start` and recompute the end date.
///
/// The plan must belong to the member's gym.
pub fn assign_plan(member: &mut Member, plan: &MembershipPlan, start: NaiveDate) -> Result<()> {
    if plan.gym_id != member.gym_id {
        return Err(AppError::BadRequest(format!(
            "Membership plan {} does not belong to gym {}",
            plan.id, member.gym_id
        )));
    }

    member.membership_end_date = membership_end_date(start, plan.duration_months)?;
    member.membership_plan_id = plan.id;
    member.membership_start_date = start;
    Ok(())
}
