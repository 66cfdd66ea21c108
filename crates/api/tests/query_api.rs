//! Integration tests for the query orchestrator: validation, anonymous
//! pass-through, personalized adaptation, and the disabled-personalization
//! envelope.

mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

use common::{body_json, send, spawn_auth_stub, TEST_TOKEN};

// ---------------------------------------------------------------------------
// Test: a missing or empty query is rejected
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn missing_query_returns_400(pool: PgPool) {
    let auth_url = spawn_auth_stub(Uuid::new_v4()).await;
    let app = common::build_test_app(pool, &auth_url);

    let response = send(app, Method::POST, "/api/query", None, Some(json!({}))).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Query is required");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn blank_query_returns_400(pool: PgPool) {
    let auth_url = spawn_auth_stub(Uuid::new_v4()).await;
    let app = common::build_test_app(pool, &auth_url);

    let response = send(
        app,
        Method::POST,
        "/api/query",
        None,
        Some(json!({ "query": "   " })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Test: anonymous queries pass through unmodified
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn anonymous_query_passes_through(pool: PgPool) {
    let auth_url = spawn_auth_stub(Uuid::new_v4()).await;
    let app = common::build_test_app(pool, &auth_url);

    let response = send(
        app,
        Method::POST,
        "/api/query",
        None,
        Some(json!({ "query": "How do I install git?" })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;

    assert_eq!(body["originalQuery"], "How do I install git?");
    assert_eq!(body["processedQuery"], "How do I install git?");
    assert!(body["userContext"].is_null());
    assert_eq!(body["topK"], 5);
    assert_eq!(body["results"].as_array().unwrap().len(), 1);
}

// ---------------------------------------------------------------------------
// Test: an authenticated user without a profile also passes through
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn profileless_user_passes_through(pool: PgPool) {
    let auth_url = spawn_auth_stub(Uuid::new_v4()).await;
    let app = common::build_test_app(pool, &auth_url);

    let response = send(
        app,
        Method::POST,
        "/api/query",
        Some(TEST_TOKEN),
        Some(json!({ "query": "What is ownership?", "topK": 2 })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!(body["userContext"].is_null());
    assert_eq!(body["topK"], 2);
}

// ---------------------------------------------------------------------------
// Test: a beginner profile personalizes both the query and the answer
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn beginner_profile_personalizes_query_and_answer(pool: PgPool) {
    let auth_url = spawn_auth_stub(Uuid::new_v4()).await;

    send(
        common::build_test_app(pool.clone(), &auth_url),
        Method::POST,
        "/api/profile",
        Some(TEST_TOKEN),
        Some(json!({
            "programming_experience": "beginner",
            "os_preference": "windows",
            "development_tools": ["VS Code"],
        })),
    )
    .await;

    let response = send(
        common::build_test_app(pool, &auth_url),
        Method::POST,
        "/api/query",
        Some(TEST_TOKEN),
        Some(json!({ "query": "How do I debug my code?", "topK": 1 })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;

    assert_eq!(body["originalQuery"], "How do I debug my code?");
    assert_eq!(
        body["processedQuery"],
        "How do I debug my code? (explain in simple terms, with examples, for a beginner)"
    );

    let context = &body["userContext"];
    assert_eq!(context["personalizationEnabled"], true);
    assert_eq!(context["queryComplexity"], "simple");
    assert_eq!(context["userContext"]["experienceLevel"], "beginner");
    assert_eq!(context["userContext"]["osPreference"], "windows");
    assert_eq!(context["userContext"]["familiarTools"], json!(["VS Code"]));
    assert_eq!(context["profile"]["programming_experience"], "beginner");

    // The answer went through the beginner rule.
    let answer = body["results"][0]["message"]["content"].as_str().unwrap();
    assert!(answer.contains("**Beginner Tip:**"));
}

// ---------------------------------------------------------------------------
// Test: disabled personalization passes text through and flags the envelope
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn disabled_personalization_marks_envelope(pool: PgPool) {
    let auth_url = spawn_auth_stub(Uuid::new_v4()).await;

    send(
        common::build_test_app(pool.clone(), &auth_url),
        Method::POST,
        "/api/profile",
        Some(TEST_TOKEN),
        Some(json!({ "programming_experience": "beginner" })),
    )
    .await;
    send(
        common::build_test_app(pool.clone(), &auth_url),
        Method::PUT,
        "/api/profile/preferences",
        Some(TEST_TOKEN),
        Some(json!({ "personalization_enabled": false })),
    )
    .await;

    let response = send(
        common::build_test_app(pool, &auth_url),
        Method::POST,
        "/api/query",
        Some(TEST_TOKEN),
        Some(json!({ "query": "How do I debug my code?", "topK": 1 })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;

    // Text untouched both ways.
    assert_eq!(body["processedQuery"], body["originalQuery"]);
    let answer = body["results"][0]["message"]["content"].as_str().unwrap();
    assert!(!answer.contains("**Beginner Tip:**"));

    let context = &body["userContext"];
    assert_eq!(context["personalizationEnabled"], false);
    assert!(context["userContext"].is_null());
    assert!(context.get("queryComplexity").is_none());
}
