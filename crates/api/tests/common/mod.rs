//! Shared test harness: the full application router (same middleware stack
//! as production) plus a stub auth service bound to a loopback port so
//! session introspection and the proxy can be exercised for real.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::body::{Body, Bytes};
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderMap, HeaderName, Method, Request, Response, StatusCode};
use axum::response::{Html, IntoResponse};
use axum::routing::{any, get};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use sqlx::PgPool;
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;
use uuid::Uuid;

use mentora_api::config::ServerConfig;
use mentora_api::retrieval::SimulatedRetriever;
use mentora_api::routes;
use mentora_api::state::AppState;
use mentora_authsvc::AuthServiceClient;

/// Token the stub auth service accepts.
pub const TEST_TOKEN: &str = "test-session-token";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config(auth_service_url: &str) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        auth_service_url: auth_service_url.to_string(),
        auth_service_timeout_secs: 2,
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool and auth service URL.
///
/// This mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack (CORS, request ID, timeout, tracing,
/// panic recovery) that production uses.
pub fn build_test_app(pool: PgPool, auth_service_url: &str) -> Router {
    let config = test_config(auth_service_url);

    let auth_client = Arc::new(
        AuthServiceClient::new(
            config.auth_service_url.clone(),
            Duration::from_secs(config.auth_service_timeout_secs),
        )
        .expect("auth client"),
    );

    let state = AppState {
        pool,
        config: Arc::new(config),
        auth_client,
        retriever: Arc::new(SimulatedRetriever),
    };

    let cors = CorsLayer::new()
        .allow_origin(["http://localhost:3000".parse().unwrap()])
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600));

    let request_id_header = HeaderName::from_static("x-request-id");

    Router::new()
        .merge(routes::health::router())
        .nest("/api", routes::api_routes())
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors)
        .with_state(state)
}

/// Spawn a stub auth service for `user_id` on a loopback port.
///
/// Serves `get-session` (valid for [`TEST_TOKEN`]) plus a few endpoints the
/// proxy tests forward to. Returns its base URL.
pub async fn spawn_auth_stub(user_id: Uuid) -> String {
    let app = Router::new()
        .route(
            "/api/auth/get-session",
            get(move |headers: HeaderMap| async move {
                let token = headers
                    .get("x-session-token")
                    .and_then(|v| v.to_str().ok());
                if token == Some(TEST_TOKEN) {
                    axum::Json(json!({
                        "session": { "token": TEST_TOKEN },
                        "user": { "id": user_id, "email": "student@example.com" },
                    }))
                    .into_response()
                } else {
                    StatusCode::UNAUTHORIZED.into_response()
                }
            }),
        )
        .route(
            "/api/auth/echo",
            any(|method: Method, headers: HeaderMap, body: Bytes| async move {
                let header_str = |name: &str| {
                    headers
                        .get(name)
                        .and_then(|v| v.to_str().ok())
                        .map(str::to_owned)
                };
                axum::Json(json!({
                    "method": method.as_str(),
                    "body": String::from_utf8_lossy(&body),
                    "forwardedHost": header_str("x-forwarded-host"),
                    "forwardedProto": header_str("x-forwarded-proto"),
                }))
            }),
        )
        .route(
            "/api/auth/html-error",
            get(|| async { Html("<!DOCTYPE html><html><body>Server Error</body></html>") }),
        )
        .route("/api/auth/plain", get(|| async { "plain text reply" }));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub auth service");
    let addr = listener.local_addr().expect("stub addr");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("stub auth service");
    });

    format!("http://{addr}")
}

/// A loopback URL nothing is listening on (for unreachable-upstream tests).
pub async fn unreachable_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind throwaway listener");
    let addr = listener.local_addr().expect("throwaway addr");
    drop(listener);
    format!("http://{addr}")
}

/// Send a request through the router, optionally authenticated with the
/// stub's session token and carrying a JSON body.
pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Response<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("host", "mentora.test");

    if let Some(token) = token {
        builder = builder.header("x-session-token", token);
    }

    let request = match body {
        Some(json) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    app.oneshot(request).await.unwrap()
}

pub async fn get_req(app: Router, uri: &str, token: Option<&str>) -> Response<Body> {
    send(app, Method::GET, uri, token, None).await
}

/// Collect a response body as parsed JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap_or_else(|e| {
        panic!(
            "response body was not JSON ({e}): {}",
            String::from_utf8_lossy(&bytes)
        )
    })
}

/// Collect a response body as text.
pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8_lossy(&bytes).to_string()
}
