//! Opaque passthrough proxy for the external auth service.
//!
//! Everything under `/api/auth` is forwarded once — method, body, and
//! headers — with only the host/forwarding headers rewritten. The auth
//! service's answer is relayed as-is, except that HTML error pages are
//! translated into a JSON error so API clients never have to parse HTML.

use std::net::SocketAddr;

use axum::body::Body;
use axum::extract::{ConnectInfo, OriginalUri, Request, State};
use axum::http::header::{CONNECTION, CONTENT_LENGTH, CONTENT_TYPE, HOST, TRANSFER_ENCODING};
use axum::http::{HeaderMap, HeaderName, HeaderValue, Response, StatusCode};
use axum::response::IntoResponse;
use serde_json::json;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Path fragments whose failures callers are expected to retry.
const RETRYABLE_PATHS: &[&str] = &["sign-in", "sign-up", "session"];

/// Largest request body the proxy will buffer for forwarding.
const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Catch-all handler for `/api/auth/{*}`; single forward attempt, bounded
/// by the auth client's timeout.
pub async fn forward(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    request: Request,
) -> AppResult<impl IntoResponse> {
    let path_and_query = uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or(uri.path());

    let method = request.method().clone();
    let peer = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ci| ci.0);
    let headers = request.headers().clone();

    let body = axum::body::to_bytes(request.into_body(), MAX_BODY_BYTES)
        .await
        .map_err(|err| AppError::BadRequest(format!("Failed to read request body: {err}")))?;

    let forwarded_headers = build_forward_headers(&headers, peer);

    let upstream = state
        .auth_client
        .forward(method, path_and_query, forwarded_headers, body.to_vec())
        .await
        .map_err(|err| {
            tracing::error!(error = %err, path = path_and_query, "Auth proxy forward failed");
            if is_retryable_path(path_and_query) {
                AppError::Upstream {
                    message: "Authentication service is temporarily unavailable".to_string(),
                    retryable: true,
                }
            } else {
                AppError::Upstream {
                    message: "Failed to proxy auth request to auth service".to_string(),
                    retryable: false,
                }
            }
        })?;

    relay(upstream).await
}

/// Copy inbound headers for the outbound call, rewriting the routing ones.
///
/// `host` and `content-length` are dropped (reqwest derives both);
/// `x-forwarded-*` record where the request really came from.
fn build_forward_headers(inbound: &HeaderMap, peer: Option<SocketAddr>) -> HeaderMap {
    let mut headers = inbound.clone();

    let inbound_host = headers.remove(HOST);
    headers.remove(CONTENT_LENGTH);

    if let Some(host) = inbound_host {
        headers.insert(HeaderName::from_static("x-forwarded-host"), host);
    }
    headers.insert(
        HeaderName::from_static("x-forwarded-proto"),
        HeaderValue::from_static("http"),
    );
    if let Some(value) = peer.and_then(|addr| HeaderValue::from_str(&addr.ip().to_string()).ok()) {
        headers.insert(HeaderName::from_static("x-forwarded-for"), value);
    }

    headers
}

fn is_retryable_path(path: &str) -> bool {
    RETRYABLE_PATHS.iter().any(|p| path.contains(p))
}

fn is_hop_by_hop(name: &HeaderName) -> bool {
    *name == CONNECTION || *name == TRANSFER_ENCODING || *name == CONTENT_LENGTH
}

/// Relay the upstream response: status and headers preserved, HTML error
/// pages translated to a JSON 500.
async fn relay(upstream: reqwest::Response) -> AppResult<Response<Body>> {
    let status = upstream.status();
    let headers = upstream.headers().clone();

    let is_json = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.contains("application/json"));

    let bytes = upstream.bytes().await.map_err(|err| {
        tracing::error!(error = %err, "Failed to read auth service response body");
        AppError::Upstream {
            message: "Failed to proxy auth request to auth service".to_string(),
            retryable: false,
        }
    })?;

    if !is_json && looks_like_html(&bytes) {
        tracing::error!(
            status = status.as_u16(),
            "Auth service returned an HTML error page",
        );
        let body = json!({
            "error": "Authentication service is not available",
            "message": "Please try again later",
        });
        return Ok((StatusCode::INTERNAL_SERVER_ERROR, axum::Json(body)).into_response());
    }

    let mut builder = Response::builder().status(status);
    for (name, value) in headers.iter() {
        if !is_hop_by_hop(name) {
            builder = builder.header(name, value);
        }
    }

    builder
        .body(Body::from(bytes))
        .map_err(|err| AppError::InternalError(format!("Failed to build proxy response: {err}")))
}

fn looks_like_html(body: &[u8]) -> bool {
    let head = &body[..body.len().min(512)];
    let text = String::from_utf8_lossy(head);
    text.contains("<!DOCTYPE html>") || text.contains("<html")
}
