//! Test utilities for integration tests
use std::sync::{Arc, RwLock};
use std::time::Duration;

use axum::{
    Router,
    body::Body,
    http::{Request, Response},
};
use serde_json::Value;
use tower::util::ServiceExt;

use educompass::api::AppState;
use educompass::api::app;
use educompass::core::AppConfig;
use educompass::qa::{HttpQaClient, SharedQaClient};

/// Creates a test application router whose chat panel sends
/// questions to `qa_api_url`, normally a `mockito` server.
pub fn test_app(qa_api_url: &str) -> Router {
    let app_config = AppConfig {
        qa_api_url: qa_api_url.to_string(),
        thread_id: String::from("main_session"),
        request_timeout: Duration::from_secs(5),
    };
    let qa_client: SharedQaClient = Arc::new(HttpQaClient::new(qa_api_url));
    let app_state = AppState::new(&app_config, qa_client);
    app(Arc::new(RwLock::new(app_state)))
}

pub async fn body_to_string(body: Body) -> String {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Failed to read body");
    String::from_utf8(bytes.to_vec()).expect("Body is not UTF-8")
}

/// POST a url encoded form to the app
pub async fn post_form(app: &Router, uri: &str, body: &str) -> Response<Body> {
    app.clone()
        .oneshot(
            Request::builder()
                .uri(uri)
                .method("POST")
                .header("content-type", "application/x-www-form-urlencoded")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
}

pub async fn chat_state(app: &Router) -> Value {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/chat/state")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let body = body_to_string(response.into_body()).await;
    serde_json::from_str(&body).expect("State is not JSON")
}

/// Poll the chat state until no exchange is in flight
pub async fn wait_until_settled(app: &Router) -> Value {
    for _ in 0..250 {
        let state = chat_state(app).await;
        if state["in_flight"] == Value::Bool(false) {
            return state;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    panic!("Exchange never settled");
}
