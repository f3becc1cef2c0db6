use std::{sync::Arc, time::Duration};

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use shared::{
    domain::Game,
    error::{MSG_CONNECTION_ERROR, MSG_SUBMIT_FAILED},
    protocol::{SubmitRequest, SubmitResponse},
};
use tokio::{net::TcpListener, sync::Mutex};

use crate::{
    config::ClientSettings,
    controller::SelectionController,
    submission::{
        decode_submit_response, resolve_redirect, HttpSubmitClient, SubmitError, SubmitPhase,
        SubmitTransport,
    },
};

#[derive(Clone)]
struct StubState {
    status: StatusCode,
    body: &'static str,
    delay: Duration,
    received: Arc<Mutex<Vec<serde_json::Value>>>,
}

async fn handle_submit(
    State(state): State<StubState>,
    Json(payload): Json<serde_json::Value>,
) -> (StatusCode, &'static str) {
    state.received.lock().await.push(payload);
    if !state.delay.is_zero() {
        tokio::time::sleep(state.delay).await;
    }
    (state.status, state.body)
}

async fn spawn_submit_server(
    status: StatusCode,
    body: &'static str,
    delay: Duration,
) -> (String, Arc<Mutex<Vec<serde_json::Value>>>) {
    let received = Arc::new(Mutex::new(Vec::new()));
    let state = StubState {
        status,
        body,
        delay,
        received: received.clone(),
    };
    let app = Router::new()
        .route("/submit", post(handle_submit))
        .with_state(state);

    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    (format!("http://{addr}"), received)
}

fn settings_for(server_url: String) -> ClientSettings {
    ClientSettings {
        server_url,
        ..ClientSettings::default()
    }
}

fn sample_request() -> SubmitRequest {
    SubmitRequest {
        full_name: "Ana Souza".to_string(),
        games: vec![
            Game::from_numbers([1, 2, 3, 4, 5, 6]).expect("game"),
            Game::from_numbers([11, 22, 33, 44, 55, 60]).expect("game"),
        ],
    }
}

#[tokio::test]
async fn posts_camel_case_json_and_reads_success() {
    let (server_url, received) = spawn_submit_server(
        StatusCode::OK,
        r#"{"success":true,"redirect":"/success?val=12"}"#,
        Duration::ZERO,
    )
    .await;
    let client = HttpSubmitClient::new(&settings_for(server_url)).expect("client");

    let response = client.submit(&sample_request()).await.expect("response");
    assert_eq!(response, SubmitResponse::accepted("/success?val=12"));

    let bodies = received.lock().await.clone();
    assert_eq!(
        bodies,
        vec![serde_json::json!({
            "fullName": "Ana Souza",
            "games": [[1, 2, 3, 4, 5, 6], [11, 22, 33, 44, 55, 60]],
        })]
    );
}

#[tokio::test]
async fn error_status_with_json_body_is_a_server_rejection() {
    let (server_url, _received) = spawn_submit_server(
        StatusCode::BAD_REQUEST,
        r#"{"success":false,"message":"Missing data"}"#,
        Duration::ZERO,
    )
    .await;
    let client = HttpSubmitClient::new(&settings_for(server_url)).expect("client");

    let response = client.submit(&sample_request()).await.expect("response");
    assert_eq!(response, SubmitResponse::rejected("Missing data"));
}

#[tokio::test]
async fn non_json_body_is_a_transport_failure() {
    let (server_url, _received) = spawn_submit_server(
        StatusCode::INTERNAL_SERVER_ERROR,
        "<html>Internal Server Error</html>",
        Duration::ZERO,
    )
    .await;
    let client = HttpSubmitClient::new(&settings_for(server_url)).expect("client");

    let err = client.submit(&sample_request()).await.expect_err("failure");
    assert!(matches!(err, SubmitError::Transport { .. }));
    assert_eq!(err.user_message(), MSG_CONNECTION_ERROR);
}

#[tokio::test]
async fn null_success_flag_is_a_server_failure_not_a_connection_error() {
    let (server_url, _received) =
        spawn_submit_server(StatusCode::OK, r#"{"success":null}"#, Duration::ZERO).await;
    let client = HttpSubmitClient::new(&settings_for(server_url)).expect("client");

    let now = std::time::Instant::now();
    let mut controller = SelectionController::default();
    for n in 1..=6 {
        controller.toggle_number(n, now).expect("toggle");
    }
    controller.commit_game().expect("commit");
    controller.set_full_name("Ana");

    let phase = controller.submit(&client).await.expect("sent").clone();
    assert_eq!(phase, SubmitPhase::Idle);
    assert_eq!(
        controller.view(std::time::Instant::now()).error.as_deref(),
        Some(MSG_SUBMIT_FAILED)
    );
}

#[tokio::test]
async fn non_string_message_is_dropped_from_rejection() {
    let (server_url, _received) = spawn_submit_server(
        StatusCode::BAD_REQUEST,
        r#"{"success":false,"message":42}"#,
        Duration::ZERO,
    )
    .await;
    let client = HttpSubmitClient::new(&settings_for(server_url)).expect("client");

    let response = client.submit(&sample_request()).await.expect("response");
    assert_eq!(
        response,
        SubmitResponse {
            success: false,
            message: None,
            redirect: None,
        }
    );
}

#[test]
fn decoding_ignores_wrong_typed_fields() {
    let response =
        decode_submit_response(br#"{"success":"yes","redirect":["/a"],"extra":1}"#)
            .expect("json");
    assert!(!response.success);
    assert_eq!(response.redirect, None);

    let response = decode_submit_response(br#"{"success":true,"redirect":"/ok"}"#)
        .expect("json");
    assert_eq!(response, SubmitResponse::accepted("/ok"));

    assert!(matches!(
        decode_submit_response(b"[1, 2"),
        Err(SubmitError::Transport { .. })
    ));
}

#[tokio::test]
async fn unreachable_server_is_a_transport_failure() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let client =
        HttpSubmitClient::new(&settings_for(format!("http://{addr}"))).expect("client");
    let err = client.submit(&sample_request()).await.expect_err("failure");
    assert!(matches!(err, SubmitError::Transport { .. }));
}

#[tokio::test]
async fn configured_timeout_turns_hung_request_into_transport_failure() {
    let (server_url, _received) = spawn_submit_server(
        StatusCode::OK,
        r#"{"success":true,"redirect":"/success"}"#,
        Duration::from_secs(5),
    )
    .await;
    let settings = ClientSettings {
        request_timeout_secs: Some(1),
        ..settings_for(server_url)
    };
    let client = HttpSubmitClient::new(&settings).expect("client");

    let err = client.submit(&sample_request()).await.expect_err("timeout");
    assert!(matches!(err, SubmitError::Transport { .. }));
}

#[tokio::test]
async fn controller_round_trip_against_stub_server() {
    let (server_url, received) = spawn_submit_server(
        StatusCode::OK,
        r#"{"success":true,"redirect":"/success?val=6"}"#,
        Duration::ZERO,
    )
    .await;
    let client = HttpSubmitClient::new(&settings_for(server_url.clone())).expect("client");

    let now = std::time::Instant::now();
    let mut controller = SelectionController::default();
    for n in [6, 5, 4, 3, 2, 1] {
        controller.toggle_number(n, now).expect("toggle");
    }
    controller.commit_game().expect("commit");
    controller.set_full_name("Ana");

    let phase = controller.submit(&client).await.expect("sent").clone();
    let SubmitPhase::Redirecting { target } = &phase else {
        panic!("expected redirect, got {phase:?}");
    };
    assert_eq!(
        client.resolve_redirect(target).expect("url").as_str(),
        format!("{server_url}/success?val=6")
    );
    assert_eq!(received.lock().await.len(), 1);
}

#[test]
fn redirect_resolution_keeps_absolute_targets() {
    let base = url::Url::parse("http://127.0.0.1:5000").expect("base");
    assert_eq!(
        resolve_redirect(&base, "https://bets.example/done")
            .expect("url")
            .as_str(),
        "https://bets.example/done"
    );
    assert_eq!(
        resolve_redirect(&base, "/success?val=30").expect("url").as_str(),
        "http://127.0.0.1:5000/success?val=30"
    );
}
