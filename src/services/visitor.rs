// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Visitor registration: deduplicate by (gym, mobile) and classify
//! returning leads.

use crate::db::Database;
use crate::error::{AppError, Result};
use crate::models::visitor::{CreateVisitor, RegistrationOutcome};
use crate::models::{Visitor, VisitorStatus};

/// Pick the gym a registration belongs to: the explicit id, else the
/// caller's own gym. There is no fallback tenant.
pub fn resolve_gym_id(explicit: Option<i64>, caller_gym: Option<i64>) -> Result<i64> {
    explicit.or(caller_gym).ok_or_else(|| {
        AppError::BadRequest(
            "gym_id is required when the caller is not affiliated with a gym".to_string(),
        )
    })
}

/// Classify an existing visit found for the same gym and mobile.
pub fn classify_prior(prior: &Visitor) -> RegistrationOutcome {
    let visit_date = prior.created_at.date_naive();
    let goal = prior.fitness_goal.as_deref().unwrap_or("not recorded");

    if prior.status == VisitorStatus::Converted {
        RegistrationOutcome::AlreadyConverted {
            message: format!(
                "Mobile already registered & converted: {}, on {}, goal: {}",
                prior.first_name, visit_date, goal
            ),
            first_name: prior.first_name.clone(),
            visit_date,
            fitness_goal: prior.fitness_goal.clone(),
        }
    } else {
        RegistrationOutcome::WelcomeBack {
            message: format!(
                "Welcome back {}. We remember your visit on {} with fitness goal {}",
                prior.first_name, visit_date, goal
            ),
            first_name: prior.first_name.clone(),
            visit_date,
            fitness_goal: prior.fitness_goal.clone(),
        }
    }
}

/// Register a visitor at `gym_id`, or report the prior visit instead.
pub async fn register(
    db: &Database,
    gym_id: i64,
    payload: &CreateVisitor,
    created_by: &str,
) -> Result<RegistrationOutcome> {
    if let Some(visitor) = db.insert_visitor_if_new(gym_id, payload, created_by).await? {
        tracing::info!(gym_id, visitor_id = visitor.id, "Registered new visitor");
        return Ok(RegistrationOutcome::Created { visitor });
    }

    let prior = db
        .latest_visitor(gym_id, &payload.mobile)
        .await?
        .ok_or_else(|| {
            AppError::Internal(anyhow::anyhow!(
                "Visitor insert skipped but no prior visit found"
            ))
        })?;

    tracing::info!(gym_id, prior_id = prior.id, status = prior.status.as_str(), "Returning visitor");
    Ok(classify_prior(&prior))
}

/// Reject status changes the lead state machine does not allow.
pub fn check_transition(from: VisitorStatus, to: VisitorStatus) -> Result<()> {
    if from.can_transition_to(to) {
        Ok(())
    } else {
        Err(AppError::BadRequest(format!(
            "Visitor status cannot change from {} to {}",
            from.as_str(),
            to.as_str()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn visitor(status: VisitorStatus) -> Visitor {
        let created = Utc.with_ymd_and_hms(2025, 2, 10, 9, 0, 0).unwrap();
        Visitor {
            id: 4,
            gym_id: 1,
            first_name: "Meera".to_string(),
            last_name: None,
            mobile: "9000000044".to_string(),
            email: None,
            fitness_goal: Some("Weight loss".to_string()),
            interested_plan_id: None,
            status,
            comments: None,
            last_followup: None,
            created_at: created,
            updated_at: created,
            created_by: None,
            updated_by: None,
        }
    }

    #[test]
    fn test_resolve_gym_id() {
        assert_eq!(resolve_gym_id(Some(3), Some(9)).unwrap(), 3);
        assert_eq!(resolve_gym_id(None, Some(9)).unwrap(), 9);
        assert!(matches!(
            resolve_gym_id(None, None),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn test_converted_prior_is_rejected() {
        match classify_prior(&visitor(VisitorStatus::Converted)) {
            RegistrationOutcome::AlreadyConverted {
                first_name,
                visit_date,
                message,
                ..
            } => {
                assert_eq!(first_name, "Meera");
                assert_eq!(visit_date.to_string(), "2025-02-10");
                assert!(message.contains("converted"));
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn test_other_priors_welcome_back() {
        for status in [VisitorStatus::Contacted, VisitorStatus::NotInterested] {
            let outcome = classify_prior(&visitor(status));
            assert!(matches!(outcome, RegistrationOutcome::WelcomeBack { .. }));
        }
    }

    #[test]
    fn test_check_transition() {
        assert!(check_transition(VisitorStatus::Contacted, VisitorStatus::Converted).is_ok());
        assert!(check_transition(VisitorStatus::NotInterested, VisitorStatus::Contacted).is_err());
    }
}
