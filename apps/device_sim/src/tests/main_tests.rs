use super::*;
use axum::{body, body::Body, http::Request};
use tower::ServiceExt;

fn test_app() -> (Router, Arc<SimState>) {
    let state = Arc::new(SimState {
        motor: Mutex::new(MotorState::new()),
        latency: Duration::ZERO,
    });
    (build_router(state.clone()), state)
}

async fn get_path(app: &Router, path: &str) -> (StatusCode, String) {
    let request = Request::get(path).body(Body::empty()).expect("request");
    let response = app.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let body = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    (status, String::from_utf8(body.to_vec()).expect("utf8"))
}

#[tokio::test]
async fn known_commands_answer_ok_and_move_the_motor() {
    let (app, state) = test_app();

    for path in ["/on", "/dir/forward", "/speed/42"] {
        let (status, body) = get_path(&app, path).await;
        assert_eq!(status, StatusCode::OK, "path {path}");
        assert_eq!(body, "OK");
    }

    assert_eq!(
        *state.motor.lock().await,
        MotorState {
            powered: true,
            speed: 42,
            direction: shared::domain::Direction::Forward,
        }
    );
}

#[tokio::test]
async fn stop_resets_the_motor() {
    let (app, state) = test_app();
    get_path(&app, "/on").await;
    get_path(&app, "/speed/90").await;

    let (status, _) = get_path(&app, "/stop").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(*state.motor.lock().await, MotorState::new());
}

#[tokio::test]
async fn bad_speed_is_a_bad_request() {
    let (app, state) = test_app();

    let (status, body) = get_path(&app, "/speed/250").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("invalid speed"));
    assert_eq!(*state.motor.lock().await, MotorState::new());
}

#[tokio::test]
async fn unknown_path_is_not_found() {
    let (app, _state) = test_app();
    let (status, _) = get_path(&app, "/dir/up").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn commands_require_get() {
    let (app, _state) = test_app();
    let request = Request::post("/on").body(Body::empty()).expect("request");
    let response = app.oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn status_reports_simulated_state() {
    let (app, _state) = test_app();
    get_path(&app, "/on").await;
    get_path(&app, "/dir/reverse").await;

    let (status, body) = get_path(&app, "/status").await;

    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body).expect("json");
    assert_eq!(json["powered"], true);
    assert_eq!(json["direction"], "reverse");
    assert_eq!(json["summary"], "Motor: ON | Speed: 0 | Direction: REVERSE");
}
