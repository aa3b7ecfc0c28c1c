use axum::{middleware, routing::get, Router};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use super::employees;
use super::health;
use super::middleware::{api_key_middleware, logging_middleware};
use super::state::AppState;

/// Create the full router with application state.
///
/// Layer order, outermost first: request id, trace, logging, API key guard, routes.
pub fn create_router(state: AppState) -> Router {
    let guard = state.api_key_guard.clone();

    Router::new()
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))
        .route("/live", get(health::live_check))
        .merge(employees::create_employee_router())
        .with_state(state)
        .layer(middleware::from_fn_with_state(guard, api_key_middleware))
        .layer(middleware::from_fn(logging_middleware))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AppConfig, AuthConfig, StoreConfig};
    use axum::body::{to_bytes, Body};
    use axum::http::{header, HeaderMap, Method, Request, StatusCode};
    use serde_json::{json, Value};
    use std::io::Write;
    use std::sync::{Arc, Mutex};
    use tower::ServiceExt;

    const KEY: &str = "test-key";

    fn app_with(config: AppConfig) -> Router {
        create_router(crate::create_app_state(&config).unwrap())
    }

    fn app() -> Router {
        app_with(AppConfig {
            auth: AuthConfig {
                api_key: Some(KEY.to_string()),
                ..AuthConfig::default()
            },
            ..AppConfig::default()
        })
    }

    async fn send(
        app: &Router,
        method: Method,
        uri: &str,
        key: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, HeaderMap, Vec<u8>) {
        let mut builder = Request::builder().method(method).uri(uri);

        if let Some(key) = key {
            builder = builder.header("ApiKey", key);
        }

        let body = match body {
            Some(value) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(value.to_string())
            }
            None => Body::empty(),
        };

        let response = app
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();

        (status, headers, bytes.to_vec())
    }

    fn as_json(body: &[u8]) -> Value {
        serde_json::from_slice(body).unwrap()
    }

    #[tokio::test]
    async fn test_list_seeded_employees() {
        let app = app();

        let (status, _, body) = send(&app, Method::GET, "/employees", None, None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            as_json(&body),
            json!([
                {"id": 1, "name": "John Doe", "position": "Developer"},
                {"id": 2, "name": "Jane Smith", "position": "Manager"}
            ])
        );
    }

    #[tokio::test]
    async fn test_unseeded_store_is_empty() {
        let app = app_with(AppConfig {
            store: StoreConfig { seed: false },
            ..AppConfig::default()
        });

        let (status, _, body) = send(&app, Method::GET, "/employees", None, None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(as_json(&body), json!([]));
    }

    #[tokio::test]
    async fn test_unknown_ids_are_not_found() {
        let app = app();
        let update = json!({"name": "X", "position": "Y"});

        let (status, _, body) = send(&app, Method::GET, "/employees/42", None, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(as_json(&body)["error"]["type"], "not_found_error");

        let (status, _, _) =
            send(&app, Method::PUT, "/employees/42", Some(KEY), Some(update)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _, _) = send(&app, Method::DELETE, "/employees/42", None, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _, _) = send(&app, Method::GET, "/employees/-1", None, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_non_integer_id_is_bad_request() {
        let app = app();

        let (status, headers, body) = send(&app, Method::GET, "/employees/abc", None, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(
            headers[header::CONTENT_TYPE]
                .to_str()
                .unwrap()
                .starts_with("application/json")
        );
        assert_eq!(as_json(&body)["error"]["code"], "invalid_path_parameter");

        let (status, _, body) = send(&app, Method::DELETE, "/employees/1.5", None, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(as_json(&body)["error"]["type"], "invalid_request_error");
    }

    #[tokio::test]
    async fn test_create_assigns_id_and_location() {
        let app = app();

        let (status, headers, body) = send(
            &app,
            Method::POST,
            "/employees",
            Some(KEY),
            Some(json!({"id": 1, "name": "Alice", "position": "QA"})),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(headers[header::LOCATION], "/employees/3");
        assert_eq!(
            as_json(&body),
            json!({"id": 3, "name": "Alice", "position": "QA"})
        );

        let (status, _, body) = send(&app, Method::GET, "/employees/3", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(as_json(&body)["name"], "Alice");

        let (_, _, body) = send(&app, Method::GET, "/employees/1", None, None).await;
        assert_eq!(as_json(&body)["name"], "John Doe");
    }

    #[tokio::test]
    async fn test_created_ids_keep_increasing() {
        let app = app();
        let body = json!({"name": "N", "position": "P"});

        let (_, _, first) = send(&app, Method::POST, "/employees", Some(KEY), Some(body.clone())).await;
        let (status, _, _) = send(&app, Method::DELETE, "/employees/3", None, None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (_, _, second) = send(&app, Method::POST, "/employees", Some(KEY), Some(body)).await;

        assert_eq!(as_json(&first)["id"], 3);
        assert_eq!(as_json(&second)["id"], 4);
    }

    #[tokio::test]
    async fn test_update_keeps_id() {
        let app = app();

        let (status, _, body) = send(
            &app,
            Method::PUT,
            "/employees/2",
            Some(KEY),
            Some(json!({"id": 7, "name": "Jane S.", "position": "Director"})),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            as_json(&body),
            json!({"id": 2, "name": "Jane S.", "position": "Director"})
        );

        let (_, _, body) = send(&app, Method::GET, "/employees/2", None, None).await;
        assert_eq!(as_json(&body)["position"], "Director");

        let (status, _, _) = send(&app, Method::GET, "/employees/7", None, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_mutations_require_api_key() {
        let app = app();
        let body = json!({"name": "Mallory", "position": "Intruder"});

        for key in [None, Some("wrong"), Some("")] {
            let (status, headers, text) =
                send(&app, Method::POST, "/employees", key, Some(body.clone())).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED);
            assert_eq!(text, b"Unauthorized");
            assert!(
                headers[header::CONTENT_TYPE]
                    .to_str()
                    .unwrap()
                    .starts_with("text/plain")
            );

            let (status, _, _) =
                send(&app, Method::PUT, "/employees/1", key, Some(body.clone())).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED);
        }

        let (_, _, list) = send(&app, Method::GET, "/employees", None, None).await;
        assert_eq!(as_json(&list).as_array().unwrap().len(), 2);

        let (_, _, employee) = send(&app, Method::GET, "/employees/1", None, None).await;
        assert_eq!(as_json(&employee)["name"], "John Doe");
    }

    #[tokio::test]
    async fn test_auth_runs_before_body_and_lookup() {
        let app = app();

        let request = Request::builder()
            .method(Method::POST)
            .uri("/employees")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let (status, _, _) = send(
            &app,
            Method::PUT,
            "/employees/42",
            None,
            Some(json!({"name": "X", "position": "Y"})),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_reads_and_deletes_ignore_api_key() {
        let app = app();

        let (status, _, _) = send(&app, Method::GET, "/employees", Some("wrong"), None).await;
        assert_eq!(status, StatusCode::OK);

        let (status, _, _) = send(&app, Method::GET, "/employees/2", Some("wrong"), None).await;
        assert_eq!(status, StatusCode::OK);

        let (status, _, body) = send(&app, Method::DELETE, "/employees/2", None, None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn test_unconfigured_key_rejects_mutations() {
        let app = app_with(AppConfig::default());

        let (status, _, _) = send(
            &app,
            Method::POST,
            "/employees",
            Some(KEY),
            Some(json!({"name": "A", "position": "B"})),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_malformed_body_with_valid_key() {
        let app = app();

        let request = Request::builder()
            .method(Method::POST)
            .uri("/employees")
            .header("ApiKey", KEY)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(as_json(&body)["error"]["code"], "json_parse_error");
    }

    #[tokio::test]
    async fn test_walkthrough() {
        let app = app();

        let (status, _, body) = send(
            &app,
            Method::POST,
            "/employees",
            Some(KEY),
            Some(json!({"name": "Alice", "position": "QA"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(as_json(&body)["id"], 3);

        let (status, _, body) = send(&app, Method::GET, "/employees/3", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            as_json(&body),
            json!({"id": 3, "name": "Alice", "position": "QA"})
        );

        let (status, _, _) = send(&app, Method::DELETE, "/employees/1", None, None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _, _) = send(&app, Method::GET, "/employees/1", None, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _, _) = send(
            &app,
            Method::PUT,
            "/employees/2",
            None,
            Some(json!({"name": "Jane S.", "position": "Director"})),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (_, _, body) = send(&app, Method::GET, "/employees/2", None, None).await;
        assert_eq!(as_json(&body)["position"], "Manager");
    }

    #[tokio::test]
    async fn test_health_endpoints() {
        let app = app();

        let (status, _, body) = send(&app, Method::GET, "/health", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(as_json(&body)["status"], "healthy");

        let (status, _, body) = send(&app, Method::GET, "/ready", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(as_json(&body)["checks"][0]["employees"], 2);

        let (status, _, _) = send(&app, Method::GET, "/live", None, None).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_request_id_is_echoed() {
        let app = app();

        let (_, headers, _) = send(&app, Method::GET, "/employees", None, None).await;
        assert!(headers.contains_key("x-request-id"));

        let request = Request::builder()
            .uri("/employees/1")
            .header("x-request-id", "req-42")
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.headers()["x-request-id"], "req-42");
    }

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl CapturedLogs {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_rejected_request_is_logged_before_and_after() {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::INFO)
            .finish();
        // Thread-local; the current-thread test runtime keeps every event on this thread
        let _guard = tracing::subscriber::set_default(subscriber);
        let app = app();
        let body = json!({"name": "Eve", "position": "Intern"});

        let (status, _, _) =
            send(&app, Method::POST, "/employees", None, Some(body.clone())).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let output = logs.contents();
        let request_at = output.find("Request: POST /employees").unwrap();
        let response_at = output.find("Response: 401").unwrap();
        assert!(request_at < response_at);
        assert!(!output.contains("Employee created"));

        let (status, _, _) = send(&app, Method::POST, "/employees", Some(KEY), Some(body)).await;
        assert_eq!(status, StatusCode::CREATED);

        let output = logs.contents();
        assert!(output.contains("Employee created"));
        assert!(output.contains("Response: 201"));
    }
}
