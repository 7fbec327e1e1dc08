//! HTTP route handlers for Mathcards.

use axum::{
    Router,
    http::HeaderValue,
    routing::{get, post},
};
use mathcards_common::constants::paths;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::CorsConfig;
use crate::state::AppState;

mod error;
mod health;
mod practice;

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors);

    Router::new()
        // Health & Status
        .route("/health", get(health::health_check))
        .route("/metrics", get(health::metrics))

        // Practice sessions
        .route(paths::START, post(practice::start_session))
        .route(paths::NEXT, get(practice::next_operation))
        .route(paths::ANSWER, post(practice::submit_answer))

        .layer(cors)
        .layer(TraceLayer::new_for_http())

        // Add shared state
        .with_state(state)
}

/// CORS for the browser frontend; any origin unless an allow-list is configured
fn cors_layer(config: &CorsConfig) -> CorsLayer {
    if config.allowed_origins.is_empty() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(origin = %origin, error = %e, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode, header};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn test_app() -> Router {
        let mut config = AppConfig::default();
        config.practice.rng_seed = Some(7);
        create_router(AppState::new(config))
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        send(app, request).await
    }

    async fn post_json(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        send(app, request).await
    }

    async fn start(app: &Router, mode: &str, difficulty: i64, total: i64) -> String {
        let (status, body) = post_json(
            app,
            "/api/start",
            json!({ "mode": mode, "difficulty": difficulty, "total_operations": total }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        body["session_id"].as_str().unwrap().to_string()
    }

    fn expected(operation: &Value) -> i64 {
        let a = operation["a"].as_i64().unwrap();
        let b = operation["b"].as_i64().unwrap();
        match operation["operator"].as_str().unwrap() {
            "+" => a + b,
            "-" => a - b,
            other => panic!("unexpected operator {other}"),
        }
    }

    #[tokio::test]
    async fn test_full_session_flow() {
        let app = test_app();
        let (status, body) = post_json(
            &app,
            "/api/start",
            json!({ "mode": "sum", "difficulty": 1, "total_operations": 3 }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 3);
        let id = body["session_id"].as_str().unwrap().to_string();

        let (status, next) = get_json(&app, &format!("/api/next/{id}")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(next["finished"], false);
        assert_eq!(next["index"], 1);
        assert_eq!(next["total"], 3);
        assert_eq!(next["results"], json!([]));
        assert_eq!(next["operation"]["operator"], "+");
        assert!(next["operation"].get("result").is_none());

        let mut operation = next["operation"].clone();
        for index in 2..=3 {
            let (status, body) =
                post_json(&app, &format!("/api/answer/{id}"), json!({ "answer": expected(&operation) })).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body["finished"], false);
            assert_eq!(body["index"], index);
            assert_eq!(body["last_result"]["correct"], true);
            operation = body["operation"].clone();
        }

        let (_, done) =
            post_json(&app, &format!("/api/answer/{id}"), json!({ "answer": expected(&operation) })).await;
        assert_eq!(done["finished"], true);
        assert_eq!(done["total"], 3);
        assert_eq!(done["results"].as_array().unwrap().len(), 3);
        assert_eq!(done["last_result"], done["results"][2]);
    }

    #[tokio::test]
    async fn test_wrong_answer_finishes_single_problem_session() {
        let app = test_app();
        let id = start(&app, "sub", 1, 1).await;

        let (_, next) = get_json(&app, &format!("/api/next/{id}")).await;
        let operation = next["operation"].clone();
        let answer = expected(&operation) + 1;

        let (status, body) = post_json(&app, &format!("/api/answer/{id}"), json!({ "answer": answer })).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["finished"], true);
        assert_eq!(body["results"].as_array().unwrap().len(), 1);
        assert_eq!(body["results"][0]["correct"], false);
        assert_eq!(body["results"][0]["expected"], expected(&operation));
        assert_eq!(body["results"][0]["operation"], operation);

        // Further answers leave the log alone
        for _ in 0..2 {
            let (_, again) = post_json(&app, &format!("/api/answer/{id}"), json!({ "answer": 0 })).await;
            assert_eq!(again, body);
        }
    }

    #[tokio::test]
    async fn test_unknown_session_is_not_found() {
        let app = test_app();
        let (status, body) = get_json(&app, "/api/next/nope").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "not_found");

        let (status, _) = post_json(&app, "/api/answer/nope", json!({ "answer": 1 })).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = post_json(&app, "/api/answer/nope", json!({ "answer": "x" })).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_malformed_answer_leaves_session_untouched() {
        let app = test_app();
        let id = start(&app, "mix", 3, 4).await;
        let (_, before) = get_json(&app, &format!("/api/next/{id}")).await;

        for payload in [json!({ "answer": "not-a-number" }), json!({ "answer": 2.5 }), json!({})] {
            let (status, body) = post_json(&app, &format!("/api/answer/{id}"), payload).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body["error"], "invalid_input");
        }

        let (_, after) = get_json(&app, &format!("/api/next/{id}")).await;
        assert_eq!(before, after);
        assert_eq!(after["index"], 1);
    }

    #[tokio::test]
    async fn test_start_normalizes_settings() {
        let app = test_app();

        // Non-positive counts give an already finished session
        let (_, body) = post_json(
            &app,
            "/api/start",
            json!({ "mode": "sum", "difficulty": 2, "total_operations": -3 }),
        )
        .await;
        assert_eq!(body["total"], 0);
        let id = body["session_id"].as_str().unwrap();
        let (_, next) = get_json(&app, &format!("/api/next/{id}")).await;
        assert_eq!(next["finished"], true);
        assert!(next["last_result"].is_null());

        // Unknown difficulty is accepted
        let id = start(&app, "mix", 7, 5).await;
        let (status, _) = get_json(&app, &format!("/api/next/{id}")).await;
        assert_eq!(status, StatusCode::OK);

        // Wrong types are rejected
        let (status, _) = post_json(&app, "/api/start", json!({ "mode": "sum" })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let (status, _) = post_json(
            &app,
            "/api/start",
            json!({ "mode": "sum", "difficulty": 2, "total_operations": 2.5 }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_start_accepts_numeric_strings_and_integral_floats() {
        let app = test_app();
        let (status, body) = post_json(
            &app,
            "/api/start",
            json!({ "mode": "sum", "difficulty": "1", "total_operations": 2.0 }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 2);

        let id = body["session_id"].as_str().unwrap();
        let (_, next) = get_json(&app, &format!("/api/next/{id}")).await;
        assert_eq!(next["operation"]["operator"], "+");
        assert_eq!(next["total"], 2);
    }

    #[tokio::test]
    async fn test_health_and_metrics() {
        let app = test_app();
        let (status, body) = get_json(&app, "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");

        let id = start(&app, "sum", 1, 1).await;
        post_json(&app, &format!("/api/answer/{id}"), json!({ "answer": 0 })).await;
        start(&app, "sum", 1, 2).await;

        let (_, metrics) = get_json(&app, "/metrics").await;
        assert_eq!(metrics["sessions"], 2);
        assert_eq!(metrics["finished_sessions"], 1);
        assert_eq!(metrics["active_sessions"], 1);
        assert_eq!(metrics["answers_recorded"], 1);
    }

    #[test]
    fn test_cors_allow_list_skips_invalid_origins() {
        let config = CorsConfig {
            allowed_origins: vec!["http://localhost:5173".to_string(), "bad\norigin".to_string()],
        };
        // Building the layer must not panic on the invalid entry
        let _layer = cors_layer(&config);
    }
}
