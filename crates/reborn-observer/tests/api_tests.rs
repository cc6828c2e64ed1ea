//! Integration tests for the API endpoints.
//!
//! Tests drive the `Router` directly via `tower::ServiceExt` without
//! starting a TCP server.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use reborn_core::config::SimulationBoundsConfig;
use reborn_core::{GameStore, OperatorState};
use reborn_observer::router::build_router;
use reborn_observer::state::AppState;
use reborn_types::GameState;
use serde_json::Value;
use tower::ServiceExt;

fn make_store(initial: GameState) -> Arc<GameStore> {
    Arc::new(GameStore::standard(initial))
}

fn make_test_state() -> Arc<AppState> {
    Arc::new(AppState::new(make_store(GameState::default())))
}

fn make_operated_state() -> (Arc<AppState>, Arc<OperatorState>) {
    let operator = Arc::new(OperatorState::new(
        200,
        &SimulationBoundsConfig::default(),
    ));
    let state =
        AppState::new(make_store(GameState::default())).with_operator(Arc::clone(&operator));
    (Arc::new(state), operator)
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn get(state: Arc<AppState>, uri: &str) -> (StatusCode, Value) {
    let response = build_router(state)
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    (status, body_to_json(response.into_body()).await)
}

async fn post_json(state: Arc<AppState>, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = build_router(state)
        .oneshot(
            Request::post(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

async fn post_empty(state: Arc<AppState>, uri: &str) -> (StatusCode, Value) {
    let response = build_router(state)
        .oneshot(Request::post(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    (status, body_to_json(response.into_body()).await)
}

// =========================================================================
// Queries
// =========================================================================

#[tokio::test]
async fn test_health() {
    let (status, json) = get(make_test_state(), "/api/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert_eq!(json["day"], 1);
    assert_eq!(json["total_lives"], 0);
}

#[tokio::test]
async fn test_get_state_includes_derived_values() {
    let (status, json) = get(make_test_state(), "/api/state").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["active_activity"], "explore");
    assert_eq!(json["selected_housing"], "shelter");
    assert!(json["active_job"].is_null());
    assert_eq!(json["skills"]["adaptation"]["level"], 1);
    assert_eq!(json["derived"]["current_day"], 1);
    assert_eq!(json["derived"]["joy"], 1);
    assert!(json["derived"]["multipliers"].is_object());
}

#[tokio::test]
async fn test_list_activities() {
    let (status, json) = get(make_test_state(), "/api/activities").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["count"], 5);

    let first = &json["activities"][0];
    assert_eq!(first["id"], "explore");
    assert_eq!(first["index"], 0);
    assert_eq!(first["active"], true);
    assert_eq!(first["unlock"]["status"], "unlocked");

    let second = &json["activities"][1];
    assert_eq!(second["active"], false);
    assert_eq!(second["unlock"]["status"], "locked");
    assert!(!second["unlock"]["missing"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_get_activity_by_id() {
    let (status, json) = get(make_test_state(), "/api/activities/learn_language").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["id"], "learn_language");
    assert_eq!(json["index"], 1);
}

#[tokio::test]
async fn test_get_activity_not_found() {
    let (status, json) = get(make_test_state(), "/api/activities/juggling").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["status"], 404);
}

#[tokio::test]
async fn test_list_jobs() {
    let (status, json) = get(make_test_state(), "/api/jobs").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["count"], 4);
    assert_eq!(json["jobs"][0]["id"], "scrap_runner");
    assert_eq!(json["jobs"][0]["active"], false);
}

#[tokio::test]
async fn test_get_job_not_found() {
    let (status, _) = get(make_test_state(), "/api/jobs/astronaut").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_upgrades() {
    let initial = GameState {
        echoes: 1_000_000,
        ..GameState::default()
    };
    let state = Arc::new(AppState::new(make_store(initial)));
    let (status, json) = get(state, "/api/upgrades").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["echoes"], 1_000_000);

    let upgrades = json["upgrades"].as_array().unwrap();
    assert_eq!(upgrades.len(), 3);
    for upgrade in upgrades {
        assert_eq!(upgrade["level"], 0);
        assert_eq!(upgrade["affordable"], true);
    }
}

#[tokio::test]
async fn test_get_shop() {
    let (status, json) = get(make_test_state(), "/api/shop").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["housing"][0]["id"], "shelter");
    assert_eq!(json["housing"][0]["active"], true);
    assert_eq!(json["housing"][1]["active"], false);
    assert_eq!(json["other"][0]["owned"], false);
}

#[tokio::test]
async fn test_get_reincarnation_preview() {
    let initial = GameState {
        credits: 500.0,
        echoes: 3,
        ..GameState::default()
    };
    let state = Arc::new(AppState::new(make_store(initial)));
    let (status, json) = get(state, "/api/reincarnation").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["echo_gain"], 2);
    assert_eq!(json["echoes_after"], 5);
    assert_eq!(json["lives_after"], 1);
}

#[tokio::test]
async fn test_get_log_with_limit() {
    let (status, json) = get(make_test_state(), "/api/log").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["count"], 2);

    let (_, json) = get(make_test_state(), "/api/log?limit=1").await;
    assert_eq!(json["count"], 1);
    assert_eq!(json["lines"][0], GameState::awakening_log().last().unwrap().as_str());
}

#[tokio::test]
async fn test_nonexistent_route_returns_404() {
    let response = build_router(make_test_state())
        .oneshot(Request::get("/api/agents").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// =========================================================================
// Commands
// =========================================================================

#[tokio::test]
async fn test_set_activity_command() {
    let state = make_test_state();
    let (status, json) = post_json(
        Arc::clone(&state),
        "/api/commands",
        serde_json::json!({"type": "set_activity", "id": "train_body"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["active_activity"], "train_body");
    assert_eq!(state.store.snapshot().active_activity, "train_body");
}

#[tokio::test]
async fn test_set_job_command_starts_wait() {
    let state = make_test_state();
    let (status, json) = post_json(
        Arc::clone(&state),
        "/api/commands",
        serde_json::json!({"type": "set_job", "id": "scrap_runner"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["active_job"], "scrap_runner");
    assert!(json["job_wait_seconds_remaining"].as_f64().unwrap() > 0.0);
}

#[tokio::test]
async fn test_unknown_shop_item_is_ignored() {
    let state = make_test_state();
    let (status, json) = post_json(
        Arc::clone(&state),
        "/api/commands",
        serde_json::json!({"type": "buy_other", "id": "yacht"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["owned_other"], serde_json::json!([]));
}

#[tokio::test]
async fn test_reincarnate_command() {
    let initial = GameState {
        credits: 250.0,
        ..GameState::default()
    };
    let state = Arc::new(AppState::new(make_store(initial)));
    let (status, json) = post_json(
        state,
        "/api/commands",
        serde_json::json!({"type": "reincarnate"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total_lives"], 1);
    assert_eq!(json["echoes"], 1);
    assert_eq!(json["life_seconds"], 0.0);
}

#[tokio::test]
async fn test_unknown_command_type_is_rejected() {
    let (status, _) = post_json(
        make_test_state(),
        "/api/commands",
        serde_json::json!({"type": "fly_to_moon"}),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

// =========================================================================
// Operator
// =========================================================================

#[tokio::test]
async fn test_operator_endpoints_need_a_run_loop() {
    let (status, json) = post_empty(make_test_state(), "/api/operator/pause").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json["status"], 503);
}

#[tokio::test]
async fn test_pause_and_resume() {
    let (state, operator) = make_operated_state();

    let (status, json) = post_empty(Arc::clone(&state), "/api/operator/pause").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["ok"], true);
    assert!(operator.is_paused());

    let (_, json) = get(Arc::clone(&state), "/api/operator/status").await;
    assert_eq!(json["paused"], true);

    let (status, _) = post_empty(state, "/api/operator/resume").await;
    assert_eq!(status, StatusCode::OK);
    assert!(!operator.is_paused());
}

#[tokio::test]
async fn test_commands_accepted_while_paused() {
    let (state, operator) = make_operated_state();
    operator.pause();
    let (status, json) = post_json(
        state,
        "/api/commands",
        serde_json::json!({"type": "select_housing", "id": "small_house"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["selected_housing"], "small_house");
}

#[tokio::test]
async fn test_set_speed() {
    let (state, operator) = make_operated_state();
    let (status, json) = post_json(
        state,
        "/api/operator/speed",
        serde_json::json!({"tick_interval_ms": 500}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["previous_interval_ms"], 200);
    assert_eq!(json["new_interval_ms"], 500);
    assert_eq!(operator.tick_interval_ms(), 500);
}

#[tokio::test]
async fn test_set_speed_below_minimum_is_rejected() {
    let (state, operator) = make_operated_state();
    let (status, json) = post_json(
        state,
        "/api/operator/speed",
        serde_json::json!({"tick_interval_ms": 1}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["status"], 400);
    assert_eq!(operator.tick_interval_ms(), 200);
}

#[tokio::test]
async fn test_stop() {
    let (state, operator) = make_operated_state();
    let (status, _) = post_empty(Arc::clone(&state), "/api/operator/stop").await;
    assert_eq!(status, StatusCode::OK);
    assert!(operator.is_stop_requested());

    let (_, json) = get(state, "/api/operator/status").await;
    assert_eq!(json["stop_requested"], true);
    assert_eq!(json["ticks"], 0);
}
