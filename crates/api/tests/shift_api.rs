//! Work shifts through the HTTP API, the periodic sweep, and payroll built
//! on top of completed shifts.

mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use common::*;
use faena_api::background::shift_sweep::{sweep_once, SweepReport};
use rust_decimal_macros::dec;
use serde_json::json;
use sqlx::PgPool;

/// Move a shift's clock back so it looks like it started `minutes` ago.
async fn backdate(pool: &PgPool, id: i64, minutes: i64) {
    sqlx::query(
        "UPDATE work_shifts SET started_at = NOW() - make_interval(mins => $2) WHERE id = $1",
    )
    .bind(id)
    .bind(minutes as i32)
    .execute(pool)
    .await
    .unwrap();
}

async fn clock_in(pool: &PgPool, token: &str) -> i64 {
    let response = post_json_auth(
        build_test_app(pool.clone()),
        "/api/v1/shifts",
        token,
        json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}

async fn shift_json(pool: &PgPool, token: &str, id: i64) -> serde_json::Value {
    let response = get_auth(
        build_test_app(pool.clone()),
        &format!("/api/v1/shifts/{id}"),
        token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await
}

// ---------------------------------------------------------------------------
// Clock in / out
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn second_clock_in_conflicts(pool: PgPool) {
    let (worker, token) = create_user_and_login(&pool, "op@faena.test", WORKER).await;

    let response = post_json_auth(
        build_test_app(pool.clone()),
        "/api/v1/shifts",
        &token,
        json!({ "notes": "Turno mañana" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let shift = body_json(response).await;
    assert_eq!(shift["user_id"], worker.id);
    assert_eq!(shift["status"], "active");

    let response = post_json_auth(
        build_test_app(pool.clone()),
        "/api/v1/shifts",
        &token,
        json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn current_shift_follows_clock_in_and_out(pool: PgPool) {
    let (_, token) = create_user_and_login(&pool, "op@faena.test", WORKER).await;

    let response = get_auth(build_test_app(pool.clone()), "/api/v1/shifts/current", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_json(response).await["data"].is_null());

    let id = clock_in(&pool, &token).await;
    backdate(&pool, id, 120).await;

    let response = get_auth(build_test_app(pool.clone()), "/api/v1/shifts/current", &token).await;
    let current = body_json(response).await;
    assert_eq!(current["data"]["id"], id);
    assert!(current["data"]["worked_minutes"].as_i64().unwrap() >= 120);

    let response = post_auth(
        build_test_app(pool.clone()),
        &format!("/api/v1/shifts/{id}/clock-out"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let closed = body_json(response).await;
    assert_eq!(closed["status"], "completed");
    assert!(closed["ended_at"].is_string());
    assert_eq!(closed["overtime_minutes"], 0);

    let response = get_auth(build_test_app(pool.clone()), "/api/v1/shifts/current", &token).await;
    assert!(body_json(response).await["data"].is_null());

    // Clocking out twice is a state conflict.
    let response = post_auth(
        build_test_app(pool.clone()),
        &format!("/api/v1/shifts/{id}/clock-out"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn workers_cannot_touch_other_shifts(pool: PgPool) {
    let (_, owner) = create_user_and_login(&pool, "op@faena.test", WORKER).await;
    let (_, intruder) = create_user_and_login(&pool, "otro@faena.test", WORKER).await;
    let (_, supervisor) = create_user_and_login(&pool, "sup@faena.test", SUPERVISOR).await;
    let id = clock_in(&pool, &owner).await;

    let response = post_auth(
        build_test_app(pool.clone()),
        &format!("/api/v1/shifts/{id}/clock-out"),
        &intruder,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = get_auth(
        build_test_app(pool.clone()),
        &format!("/api/v1/shifts/{id}"),
        &intruder,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // Supervisors may close anyone's shift.
    let response = post_auth(
        build_test_app(pool.clone()),
        &format!("/api/v1/shifts/{id}/cancel"),
        &supervisor,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "cancelled");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn worker_list_is_scoped_to_own_shifts(pool: PgPool) {
    let (worker, token) = create_user_and_login(&pool, "op@faena.test", WORKER).await;
    let (other, other_token) = create_user_and_login(&pool, "otro@faena.test", WORKER).await;
    clock_in(&pool, &token).await;
    clock_in(&pool, &other_token).await;

    let response = get_auth(
        build_test_app(pool.clone()),
        &format!("/api/v1/shifts?user_id={}", other.id),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let shifts = body_json(response).await;
    let shifts = shifts.as_array().unwrap();
    assert_eq!(shifts.len(), 1);
    assert_eq!(shifts[0]["user_id"], worker.id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn supervisor_clocks_in_on_behalf_of_worker(pool: PgPool) {
    let (_, supervisor) = create_user_and_login(&pool, "sup@faena.test", SUPERVISOR).await;
    let worker = create_user(&pool, "op@faena.test", WORKER).await;

    let response = post_json_auth(
        build_test_app(pool.clone()),
        "/api/v1/shifts",
        &supervisor,
        json!({ "user_id": worker.id }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["user_id"], worker.id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn rest_cannot_exceed_elapsed_time(pool: PgPool) {
    let (_, token) = create_user_and_login(&pool, "op@faena.test", WORKER).await;
    let id = clock_in(&pool, &token).await;

    let response = post_json_auth(
        build_test_app(pool.clone()),
        &format!("/api/v1/shifts/{id}/rest"),
        &token,
        json!({ "minutes": 30 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    backdate(&pool, id, 90).await;
    let response = post_json_auth(
        build_test_app(pool.clone()),
        &format!("/api/v1/shifts/{id}/rest"),
        &token,
        json!({ "minutes": 30 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let shift = body_json(response).await;
    assert_eq!(shift["rest_minutes"], 30);
    let worked = shift["worked_minutes"].as_i64().unwrap();
    assert!((60..=61).contains(&worked), "worked {worked}");
}

// ---------------------------------------------------------------------------
// Sweep
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn sweep_pauses_at_regular_limit_then_finalizes(pool: PgPool) {
    let (_, token) = create_user_and_login(&pool, "op@faena.test", WORKER).await;
    let id = clock_in(&pool, &token).await;
    backdate(&pool, id, 14 * 60).await;

    let now = Utc::now();
    let report = sweep_once(&pool, now).await.unwrap();
    assert_eq!(
        report,
        SweepReport {
            examined: 1,
            paused: 1,
            finalized: 0,
            lost_races: 0
        }
    );

    let shift = shift_json(&pool, &token, id).await;
    assert_eq!(shift["status"], "paused");
    assert_eq!(shift["auto_paused"], true);
    assert_eq!(shift["regular_minutes"], 540);
    assert!(shift["overtime_confirmed"].is_null());

    // The pause was back-dated five hours, past the decision window.
    let report = sweep_once(&pool, now).await.unwrap();
    assert_eq!(report.finalized, 1);

    let shift = shift_json(&pool, &token, id).await;
    assert_eq!(shift["status"], "completed");
    assert_eq!(shift["auto_finalized"], true);
    assert_eq!(shift["overtime_confirmed"], false);
    assert_eq!(shift["regular_minutes"], 540);
    assert_eq!(shift["overtime_minutes"], 0);

    // Nothing left to sweep.
    let report = sweep_once(&pool, now).await.unwrap();
    assert_eq!(report.examined, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn sweep_caps_confirmed_overtime_at_thirteen_hours(pool: PgPool) {
    let (_, token) = create_user_and_login(&pool, "op@faena.test", WORKER).await;
    let id = clock_in(&pool, &token).await;
    backdate(&pool, id, 15 * 60).await;
    sqlx::query("UPDATE work_shifts SET overtime_confirmed = true WHERE id = $1")
        .bind(id)
        .execute(&pool)
        .await
        .unwrap();

    let report = sweep_once(&pool, Utc::now()).await.unwrap();
    assert_eq!(report.finalized, 1);

    let shift = shift_json(&pool, &token, id).await;
    assert_eq!(shift["status"], "completed");
    assert_eq!(shift["regular_minutes"], 540);
    assert_eq!(shift["overtime_minutes"], 240);
    assert_eq!(shift["worked_minutes"], 780);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn short_shift_is_left_alone(pool: PgPool) {
    let (_, token) = create_user_and_login(&pool, "op@faena.test", WORKER).await;
    let id = clock_in(&pool, &token).await;
    backdate(&pool, id, 8 * 60).await;

    let report = sweep_once(&pool, Utc::now()).await.unwrap();
    assert_eq!(report.examined, 1);
    assert_eq!(report.paused + report.finalized, 0);
    assert_eq!(shift_json(&pool, &token, id).await["status"], "active");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn confirmed_overtime_resumes_and_books_pause_as_rest(pool: PgPool) {
    let (_, token) = create_user_and_login(&pool, "op@faena.test", WORKER).await;
    let id = clock_in(&pool, &token).await;
    backdate(&pool, id, 10 * 60).await;
    sweep_once(&pool, Utc::now()).await.unwrap();

    let response = post_auth(
        build_test_app(pool.clone()),
        &format!("/api/v1/shifts/{id}/confirm-overtime"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let shift = body_json(response).await;
    assert_eq!(shift["status"], "active");
    assert_eq!(shift["overtime_confirmed"], true);
    let rest = shift["rest_minutes"].as_i64().unwrap();
    assert!((59..=61).contains(&rest), "rest {rest}");

    // Deciding twice is rejected.
    let response = post_auth(
        build_test_app(pool.clone()),
        &format!("/api/v1/shifts/{id}/reject-overtime"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = post_auth(
        build_test_app(pool.clone()),
        &format!("/api/v1/shifts/{id}/clock-out"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "completed");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn rejected_overtime_closes_at_pause_with_regular_hours(pool: PgPool) {
    let (_, token) = create_user_and_login(&pool, "op@faena.test", WORKER).await;
    let id = clock_in(&pool, &token).await;
    backdate(&pool, id, 10 * 60).await;
    let report = sweep_once(&pool, Utc::now()).await.unwrap();
    assert_eq!(report.paused, 1);

    let response = post_auth(
        build_test_app(pool.clone()),
        &format!("/api/v1/shifts/{id}/reject-overtime"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    // Read back what was stored, not the action's response.
    let shift = shift_json(&pool, &token, id).await;
    assert_eq!(shift["status"], "completed");
    assert_eq!(shift["overtime_confirmed"], false);
    assert_eq!(shift["auto_finalized"], false);
    assert!(shift["paused_at"].is_null());
    let started = chrono::DateTime::parse_from_rfc3339(shift["started_at"].as_str().unwrap()).unwrap();
    let ended = chrono::DateTime::parse_from_rfc3339(shift["ended_at"].as_str().unwrap()).unwrap();
    // Ends where the sweep paused it, not at the moment of rejection.
    assert_eq!((ended - started).num_minutes(), 540);
    assert_eq!(shift["worked_minutes"], 540);
    assert_eq!(shift["regular_minutes"], 540);
    assert_eq!(shift["overtime_minutes"], 0);

    let report = sweep_once(&pool, Utc::now()).await.unwrap();
    assert_eq!(report.examined, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn confirm_overtime_requires_paused_shift(pool: PgPool) {
    let (_, token) = create_user_and_login(&pool, "op@faena.test", WORKER).await;
    let id = clock_in(&pool, &token).await;

    let response = post_auth(
        build_test_app(pool.clone()),
        &format!("/api/v1/shifts/{id}/confirm-overtime"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

// ---------------------------------------------------------------------------
// Payroll
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn payroll_pays_regular_hours_of_completed_shifts(pool: PgPool) {
    let (_, supervisor) = create_user_and_login(&pool, "sup@faena.test", SUPERVISOR).await;
    let (worker, token) = create_user_and_login(&pool, "op@faena.test", WORKER).await;
    let id = clock_in(&pool, &token).await;
    backdate(&pool, id, 10 * 60).await;
    sweep_once(&pool, Utc::now()).await.unwrap();

    let response = post_auth(
        build_test_app(pool.clone()),
        &format!("/api/v1/shifts/{id}/reject-overtime"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let shift = body_json(response).await;
    assert_eq!(shift["regular_minutes"], 540);
    assert_eq!(shift["overtime_minutes"], 0);

    let today = Utc::now().date_naive();
    let period = json!({
        "period_start": today - Duration::days(2),
        "period_end": today + Duration::days(1),
    });
    let response = post_json_auth(
        build_test_app(pool.clone()),
        "/api/v1/payroll",
        &supervisor,
        period.clone(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let rows = body_json(response).await;
    let rows = rows["data"].as_array().unwrap().clone();
    // Only the worker has shifts; the supervisor is skipped.
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["user_id"], worker.id);
    assert_eq!(rows[0]["shift_count"], 1);
    assert_eq!(dec(&rows[0]["regular_pay"]), dec!(54000));
    assert_eq!(dec(&rows[0]["overtime_pay"]), dec!(0));
    assert_eq!(dec(&rows[0]["total_pay"]), dec!(54000));

    // Regenerating replaces the row instead of adding one.
    let response = post_json_auth(
        build_test_app(pool.clone()),
        "/api/v1/payroll",
        &supervisor,
        period,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let response = get_auth(build_test_app(pool.clone()), "/api/v1/payroll", &supervisor).await;
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn worker_cannot_generate_payroll(pool: PgPool) {
    let (_, token) = create_user_and_login(&pool, "op@faena.test", WORKER).await;
    let response = post_json_auth(
        build_test_app(pool.clone()),
        "/api/v1/payroll",
        &token,
        json!({ "period_start": "2026-03-01", "period_end": "2026-03-31" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn payroll_includes_workers_deactivated_after_their_shifts(pool: PgPool) {
    let (_, admin) = create_user_and_login(&pool, "admin@faena.test", ADMIN).await;
    let (worker, token) = create_user_and_login(&pool, "op@faena.test", WORKER).await;
    let id = clock_in(&pool, &token).await;
    backdate(&pool, id, 4 * 60).await;
    let response = post_auth(
        build_test_app(pool.clone()),
        &format!("/api/v1/shifts/{id}/clock-out"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = delete_auth(
        build_test_app(pool.clone()),
        &format!("/api/v1/users/{}", worker.id),
        &admin,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let today = Utc::now().date_naive();
    let response = post_json_auth(
        build_test_app(pool.clone()),
        "/api/v1/payroll",
        &admin,
        json!({ "period_start": today - Duration::days(1), "period_end": today }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let rows = body_json(response).await["data"].as_array().unwrap().clone();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["user_id"], worker.id);
    assert_eq!(rows[0]["shift_count"], 1);
    let regular = rows[0]["regular_minutes"].as_i64().unwrap();
    assert!((239..=241).contains(&regular), "regular {regular}");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn payroll_for_unknown_worker_writes_nothing(pool: PgPool) {
    let (_, supervisor) = create_user_and_login(&pool, "sup@faena.test", SUPERVISOR).await;
    let response = post_json_auth(
        build_test_app(pool.clone()),
        "/api/v1/payroll",
        &supervisor,
        json!({ "user_id": 987654, "period_start": "2026-03-01", "period_end": "2026-03-31" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = get_auth(build_test_app(pool.clone()), "/api/v1/payroll", &supervisor).await;
    assert!(body_json(response).await.as_array().unwrap().is_empty());
}
