// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Training cycle, planned workout and workout log tests.

use axum::http::{Method, StatusCode};
use axum::Router;
use chrono::NaiveDate;
use fitbro_backend::error::AppError;
use fitbro_backend::models::cycle::{CreateCyclePlan, ACTIVE_CYCLE_CONFLICT};
use fitbro_backend::models::CycleStatus;
use serde_json::{json, Value};

mod common;
use common::{admin_token, create_gym, create_member, create_plan, create_test_app, send};

/// A gym with one enrolled member; returns (admin token, member id).
async fn enrolled_member(app: &Router, state: &fitbro_backend::AppState) -> (String, i64) {
    let admin = admin_token(state).await;
    let gym = create_gym(app, &admin, "Cycle Gym", "9700001000").await;
    let gym_id = gym["id"].as_i64().unwrap();
    let plan = create_plan(app, &admin, gym_id, 6).await;
    let member = create_member(
        app,
        &admin,
        gym_id,
        plan["id"].as_i64().unwrap(),
        "9600001000",
        "2025-03-01",
    )
    .await;
    (admin, member["id"].as_i64().unwrap())
}

async fn post_cycle(app: &Router, token: &str, body: Value) -> (StatusCode, Value) {
    send(app, Method::POST, "/cycle-plans", Some(token), Some(body)).await
}

#[tokio::test]
async fn test_second_active_cycle_conflicts() {
    let (app, state) = create_test_app().await;
    let (admin, member_id) = enrolled_member(&app, &state).await;

    let (status, first) = post_cycle(
        &app,
        &admin,
        json!({"member_id": member_id, "cycle_number": 1, "start_date": "2025-03-01",
               "end_date": "2025-03-30", "status": "Active"}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(first["duration"], 30);

    let (status, body) = post_cycle(
        &app,
        &admin,
        json!({"member_id": member_id, "cycle_number": 2, "start_date": "2025-04-01",
               "end_date": "2025-04-30", "status": "Active"}),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["details"], "Member already has an active cycle");

    // A future cycle is fine alongside the active one.
    let (status, future) = post_cycle(
        &app,
        &admin,
        json!({"member_id": member_id, "cycle_number": 2, "start_date": "2025-04-01",
               "end_date": "2025-04-30"}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(future["status"], "Future");

    // Promoting it while the first is still active is not.
    let (status, _) = send(
        &app,
        Method::PUT,
        &format!("/cycle-plans/{}", future["id"]),
        Some(&admin),
        Some(json!({"status": "Active"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

fn cycle(member_id: i64, number: i64, status: CycleStatus) -> CreateCyclePlan {
    let start = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
    CreateCyclePlan {
        member_id,
        cycle_number: number,
        start_date: start,
        end_date: start + chrono::Duration::days(29),
        duration: 30,
        status,
    }
}

#[tokio::test]
async fn test_store_rejects_second_active_cycle() {
    let (app, state) = create_test_app().await;
    let (_, member_id) = enrolled_member(&app, &state).await;

    // Straight to the store, as two racing requests that both passed the
    // route's pre-check would.
    state
        .db
        .insert_cycle(&cycle(member_id, 1, CycleStatus::Active))
        .await
        .unwrap();
    let result = state
        .db
        .insert_cycle(&cycle(member_id, 2, CycleStatus::Active))
        .await;
    match result {
        Err(AppError::Conflict(msg)) => assert_eq!(msg, ACTIVE_CYCLE_CONFLICT),
        other => panic!("expected conflict, got {:?}", other),
    }

    let live = state.db.list_cycles(Some(member_id), false).await.unwrap();
    assert_eq!(live.len(), 1);
}

#[tokio::test]
async fn test_store_ignores_deleted_active_cycle() {
    let (app, state) = create_test_app().await;
    let (_, member_id) = enrolled_member(&app, &state).await;

    let old = state
        .db
        .insert_cycle(&cycle(member_id, 1, CycleStatus::Active))
        .await
        .unwrap();
    state.db.soft_delete_cycle(old.id).await.unwrap();

    // The deleted row no longer holds the slot.
    let live = state
        .db
        .insert_cycle(&cycle(member_id, 2, CycleStatus::Active))
        .await
        .unwrap();

    // Writing the deleted row back as Active leaves it outside the index.
    let mut revived = state.db.get_cycle(old.id).await.unwrap().unwrap();
    revived.cycle_number = 3;
    let revived = state.db.update_cycle(&revived).await.unwrap();
    assert!(revived.is_deleted);
    assert_eq!(revived.status, CycleStatus::Active);

    // A live Future row promoted next to the live Active one is refused.
    let mut next = state
        .db
        .insert_cycle(&cycle(member_id, 4, CycleStatus::Future))
        .await
        .unwrap();
    next.status = CycleStatus::Active;
    assert!(matches!(
        state.db.update_cycle(&next).await,
        Err(AppError::Conflict(_))
    ));

    let current = state.db.get_cycle(live.id).await.unwrap().unwrap();
    assert_eq!(current.status, CycleStatus::Active);
    let next = state.db.get_cycle(next.id).await.unwrap().unwrap();
    assert_eq!(next.status, CycleStatus::Future);
}

#[tokio::test]
async fn test_soft_delete_frees_active_slot() {
    let (app, state) = create_test_app().await;
    let (admin, member_id) = enrolled_member(&app, &state).await;

    let (_, first) = post_cycle(
        &app,
        &admin,
        json!({"member_id": member_id, "cycle_number": 1, "start_date": "2025-03-01",
               "end_date": "2025-03-30", "status": "Active"}),
    )
    .await;
    let first_id = first["id"].as_i64().unwrap();

    let (status, deleted) = send(
        &app,
        Method::PUT,
        &format!("/cycle-plans/{}/delete", first_id),
        Some(&admin),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted["is_deleted"], true);

    // Idempotent.
    let (status, _) = send(
        &app,
        Method::PUT,
        &format!("/cycle-plans/{}/delete", first_id),
        Some(&admin),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = post_cycle(
        &app,
        &admin,
        json!({"member_id": member_id, "cycle_number": 2, "start_date": "2025-04-01",
               "end_date": "2025-04-30", "status": "Active"}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    // Hidden from the list, still reachable directly, but not editable.
    let (_, listed) = send(
        &app,
        Method::GET,
        &format!("/cycle-plans?member_id={}", member_id),
        Some(&admin),
        None,
    )
    .await;
    assert_eq!(listed.as_array().unwrap().len(), 1);

    let (_, all) = send(
        &app,
        Method::GET,
        &format!("/cycle-plans?member_id={}&include_deleted=true", member_id),
        Some(&admin),
        None,
    )
    .await;
    assert_eq!(all.as_array().unwrap().len(), 2);

    let (status, direct) = send(
        &app,
        Method::GET,
        &format!("/cycle-plans/{}", first_id),
        Some(&admin),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(direct["is_deleted"], true);

    let (status, _) = send(
        &app,
        Method::PUT,
        &format!("/cycle-plans/{}", first_id),
        Some(&admin),
        Some(json!({"cycle_number": 9})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_cycle_window_and_member_checks() {
    let (app, state) = create_test_app().await;
    let (admin, member_id) = enrolled_member(&app, &state).await;

    let (status, _) = post_cycle(
        &app,
        &admin,
        json!({"member_id": member_id, "cycle_number": 1, "start_date": "2025-03-30",
               "end_date": "2025-03-01"}),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = post_cycle(
        &app,
        &admin,
        json!({"member_id": 999, "cycle_number": 1, "start_date": "2025-03-01",
               "end_date": "2025-03-30"}),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

/// Program, workout and two exercises; returns (workout id, [exercise ids]).
async fn seed_catalog(app: &Router, token: &str) -> (i64, Vec<i64>) {
    let (_, workout) = send(
        app,
        Method::POST,
        "/workouts",
        Some(token),
        Some(json!({"name": "Leg day"})),
    )
    .await;
    let workout_id = workout["id"].as_i64().unwrap();

    let mut exercises = Vec::new();
    for name in ["Squat", "Lunge"] {
        let (status, exercise) = send(
            app,
            Method::POST,
            "/exercises",
            Some(token),
            Some(json!({"name": name, "workout_id": workout_id})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED, "{}", exercise);
        exercises.push(exercise["id"].as_i64().unwrap());
    }
    (workout_id, exercises)
}

#[tokio::test]
async fn test_swap_workout_day() {
    let (app, state) = create_test_app().await;
    let (admin, member_id) = enrolled_member(&app, &state).await;
    let (workout_id, exercises) = seed_catalog(&app, &admin).await;

    let (_, cycle) = post_cycle(
        &app,
        &admin,
        json!({"member_id": member_id, "cycle_number": 1, "start_date": "2025-03-01",
               "end_date": "2025-03-30", "status": "Active"}),
    )
    .await;
    let cycle_id = cycle["id"].as_i64().unwrap();

    for (day, exercise_id) in [
        ("2025-03-03", exercises[0]),
        ("2025-03-03", exercises[1]),
        ("2025-03-05", exercises[0]),
    ] {
        let (status, _) = send(
            &app,
            Method::POST,
            "/workout-plan-entries",
            Some(&admin),
            Some(json!({"cycle_plan_id": cycle_id, "day_date": day,
                        "workout_id": workout_id, "exercise_id": exercise_id,
                        "planned_sets": 3, "planned_reps": 10})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, counts) = send(
        &app,
        Method::POST,
        "/workout-plan-entries/swap-workout-day",
        Some(&admin),
        Some(json!({"cycle_plan_id": cycle_id, "from_date": "2025-03-03",
                    "to_date": "2025-03-05"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(counts["moved_to_date"], 2);
    assert_eq!(counts["moved_from_date"], 1);

    let (_, entries) = send(
        &app,
        Method::GET,
        &format!("/workout-plan-entries?member_id={}", member_id),
        Some(&admin),
        None,
    )
    .await;
    let entries = entries.as_array().unwrap();
    assert_eq!(entries.len(), 3);
    let on_fifth = entries.iter().filter(|e| e["day_date"] == "2025-03-05").count();
    let on_third = entries.iter().filter(|e| e["day_date"] == "2025-03-03").count();
    assert_eq!((on_fifth, on_third), (2, 1));
}

#[tokio::test]
async fn test_workout_log_chain_checked() {
    let (app, state) = create_test_app().await;
    let (admin, member_id) = enrolled_member(&app, &state).await;
    let (workout_id, exercises) = seed_catalog(&app, &admin).await;

    let (_, cycle) = post_cycle(
        &app,
        &admin,
        json!({"member_id": member_id, "cycle_number": 1, "start_date": "2025-03-01",
               "end_date": "2025-03-30", "status": "Active"}),
    )
    .await;
    let (_, other_cycle) = post_cycle(
        &app,
        &admin,
        json!({"member_id": member_id, "cycle_number": 2, "start_date": "2025-04-01",
               "end_date": "2025-04-30"}),
    )
    .await;
    let (_, entry) = send(
        &app,
        Method::POST,
        "/workout-plan-entries",
        Some(&admin),
        Some(json!({"cycle_plan_id": cycle["id"], "day_date": "2025-03-03",
                    "workout_id": workout_id, "exercise_id": exercises[0]})),
    )
    .await;

    let (status, _) = send(
        &app,
        Method::POST,
        "/workout-logs",
        Some(&admin),
        Some(json!({"member_id": member_id, "cycle_plan_id": other_cycle["id"],
                    "workout_plan_entry_id": entry["id"], "workout_date": "2025-03-03"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, log) = send(
        &app,
        Method::POST,
        "/workout-logs",
        Some(&admin),
        Some(json!({"member_id": member_id, "cycle_plan_id": cycle["id"],
                    "workout_plan_entry_id": entry["id"], "workout_date": "2025-03-03",
                    "actual_sets": 3, "actual_reps": 8})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, patched) = send(
        &app,
        Method::PATCH,
        &format!("/workout-logs/{}", log["id"]),
        Some(&admin),
        Some(json!({"actual_reps": 10, "status": "done"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(patched["actual_reps"], 10);
    assert_eq!(patched["actual_sets"], 3);
}
