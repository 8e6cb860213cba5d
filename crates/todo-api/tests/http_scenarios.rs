//! End-to-end HTTP scenarios against an in-memory SQLite database.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{
        header::{CONTENT_TYPE, COOKIE, SET_COOKIE},
        HeaderMap, Method, Request, StatusCode,
    },
    Router,
};
use chrono::{Duration, Utc};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;
use todo_api::{router, AppState};
use todo_core::repositories::UserRepository;
use todo_infrastructure::{create_sqlite_pool, migrate_sqlite, SqliteTaskStore, SqliteUserRepository};
use todo_security::{JwtService, PasswordService};
use todo_shared::AppConfig;

const PASSWORD: &str = "password123";

async fn app() -> Router {
    let config = AppConfig::defaults().unwrap();
    let pool = create_sqlite_pool(&config.database).await.unwrap();
    migrate_sqlite(&pool).await.unwrap();

    let users = Arc::new(SqliteUserRepository::new(pool.clone()));
    let hash = PasswordService::hash(PASSWORD).unwrap();
    users.create("alice@example.com", &hash).await.unwrap();
    users.create("bob@example.com", &hash).await.unwrap();

    router(AppState::new(pool, SqliteTaskStore::new(), users, config.session))
}

struct Reply {
    status: StatusCode,
    headers: HeaderMap,
    body: Value,
}

async fn send(app: &Router, method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> Reply {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(COOKIE, format!("token={}", token));
    }
    let body = match body {
        Some(value) => {
            builder = builder.header(CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    let response = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    Reply { status, headers, body }
}

fn session_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find_map(|v| v.strip_prefix("token="))
        .and_then(|rest| rest.split(';').next())
        .map(str::to_string)
}

async fn login(app: &Router, email: &str) -> String {
    let reply = send(
        app,
        Method::POST,
        "/auth/login",
        None,
        Some(json!({ "email": email, "password": PASSWORD })),
    )
    .await;
    assert_eq!(reply.status, StatusCode::OK);
    session_token(&reply.headers).expect("session cookie")
}

async fn create_todo(app: &Router, token: &str, title: &str) -> Value {
    let reply = send(
        app,
        Method::POST,
        "/todo",
        Some(token),
        Some(json!({ "title": title, "description": "" })),
    )
    .await;
    assert_eq!(reply.status, StatusCode::CREATED);
    reply.body
}

#[tokio::test]
async fn health_is_public() {
    let app = app().await;
    let reply = send(&app, Method::GET, "/health", None, None).await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body["status"], "healthy");
}

#[tokio::test]
async fn login_sets_hardened_cookie() {
    let app = app().await;
    let reply = send(
        &app,
        Method::POST,
        "/auth/login",
        None,
        Some(json!({ "email": "alice@example.com", "password": PASSWORD })),
    )
    .await;

    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body["message"], "login success");
    let cookie = reply.headers.get(SET_COOKIE).unwrap().to_str().unwrap();
    assert!(cookie.starts_with("token="));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Strict"));
    assert!(cookie.contains("Max-Age=3600"));
}

#[tokio::test]
async fn bad_credentials_are_indistinguishable() {
    let app = app().await;
    let wrong_password = send(
        &app,
        Method::POST,
        "/auth/login",
        None,
        Some(json!({ "email": "alice@example.com", "password": "nope" })),
    )
    .await;
    let unknown_email = send(
        &app,
        Method::POST,
        "/auth/login",
        None,
        Some(json!({ "email": "carol@example.com", "password": PASSWORD })),
    )
    .await;

    for reply in [&wrong_password, &unknown_email] {
        assert_eq!(reply.status, StatusCode::UNAUTHORIZED);
        assert_eq!(reply.body["message"], "invalid email or password");
        assert!(reply.headers.get(SET_COOKIE).is_none());
    }
}

#[tokio::test]
async fn login_validation_reports_fields() {
    let app = app().await;
    let reply = send(
        &app,
        Method::POST,
        "/auth/login",
        None,
        Some(json!({ "email": "not-an-email", "password": "" })),
    )
    .await;

    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert!(reply.body["fields"]["email"].is_string());
    assert!(reply.body["fields"]["password"].is_string());
}

#[tokio::test]
async fn todo_routes_require_a_valid_session() {
    let app = app().await;
    let expired = JwtService::new("secret", 3600)
        .issue_at(1, Utc::now() - Duration::hours(2))
        .unwrap();

    for token in [None, Some("garbage"), Some(expired.value.as_str())] {
        let reply = send(&app, Method::GET, "/todo", token, None).await;
        assert_eq!(reply.status, StatusCode::UNAUTHORIZED);
        assert_eq!(reply.body["error"], "Unauthorized");
    }
}

#[tokio::test]
async fn session_for_deleted_user_is_rejected() {
    let app = app().await;
    let token = JwtService::new("secret", 3600).issue(999).unwrap();

    let reply = send(&app, Method::GET, "/todo", Some(&token.value), None).await;
    assert_eq!(reply.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn create_then_list_with_defaults() {
    let app = app().await;
    let token = login(&app, "alice@example.com").await;

    let created = create_todo(&app, &token, "Buy milk").await;
    assert_eq!(created["title"], "Buy milk");
    assert_eq!(created["status"], "active");
    assert!(created["done_at"].is_null());

    let reply = send(&app, Method::GET, "/todo", Some(&token), None).await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body["data"].as_array().unwrap().len(), 1);
    assert_eq!(reply.body["data"][0]["id"], created["id"]);
    assert_eq!(
        reply.body["pagination"],
        json!({
            "total_pages": 1,
            "current_page": 1,
            "has_next": false,
            "has_prev": false,
            "limit": 20
        })
    );

    // every authenticated response carries a fresh session
    assert!(session_token(&reply.headers).is_some());
}

#[tokio::test]
async fn list_query_is_lenient() {
    let app = app().await;
    let token = login(&app, "alice@example.com").await;
    for i in 0..3 {
        create_todo(&app, &token, &format!("task {}", i)).await;
    }

    let reply = send(&app, Method::GET, "/todo?page=abc&limit=500", Some(&token), None).await;
    assert_eq!(reply.body["pagination"]["current_page"], 1);
    assert_eq!(reply.body["pagination"]["limit"], 100);

    let reply = send(&app, Method::GET, "/todo?page=2&limit=2", Some(&token), None).await;
    assert_eq!(reply.body["data"].as_array().unwrap().len(), 1);
    assert_eq!(reply.body["data"][0]["title"], "task 0");
    assert_eq!(reply.body["pagination"]["total_pages"], 2);
    assert_eq!(reply.body["pagination"]["has_prev"], true);
    assert_eq!(reply.body["pagination"]["has_next"], false);
}

#[tokio::test]
async fn completed_tasks_are_hidden_unless_requested() {
    let app = app().await;
    let token = login(&app, "alice@example.com").await;
    let task = create_todo(&app, &token, "Finish me").await;
    create_todo(&app, &token, "Still open").await;

    let done = send(
        &app,
        Method::PUT,
        &format!("/todo/{}/done", task["id"]),
        Some(&token),
        Some(json!({ "is_done": true })),
    )
    .await;
    assert_eq!(done.status, StatusCode::OK);
    assert_eq!(done.body["status"], "completed");

    let active = send(&app, Method::GET, "/todo", Some(&token), None).await;
    assert_eq!(active.body["data"].as_array().unwrap().len(), 1);

    for flag in ["true", "1"] {
        let all = send(&app, Method::GET, &format!("/todo?include_done={}", flag), Some(&token), None).await;
        assert_eq!(all.body["data"].as_array().unwrap().len(), 2);
    }
}

#[tokio::test]
async fn patching_a_completed_task_is_rejected() {
    let app = app().await;
    let token = login(&app, "alice@example.com").await;
    let task = create_todo(&app, &token, "Ship it").await;
    let uri = format!("/todo/{}", task["id"]);

    send(
        &app,
        Method::PUT,
        &format!("{}/done", uri),
        Some(&token),
        Some(json!({ "is_done": true })),
    )
    .await;

    let reply = send(&app, Method::PATCH, &uri, Some(&token), Some(json!({ "title": "Renamed" }))).await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert!(reply.body["message"].as_str().unwrap().contains("already"));

    let stored = send(&app, Method::GET, &uri, Some(&token), None).await;
    assert_eq!(stored.body["title"], "Ship it");
}

#[tokio::test]
async fn patch_applies_partial_changes() {
    let app = app().await;
    let token = login(&app, "alice@example.com").await;
    let task = create_todo(&app, &token, "Draft").await;

    let reply = send(
        &app,
        Method::PATCH,
        &format!("/todo/{}", task["id"]),
        Some(&token),
        Some(json!({ "description": "with details" })),
    )
    .await;

    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body["title"], "Draft");
    assert_eq!(reply.body["description"], "with details");
}

#[tokio::test]
async fn repeated_done_requests_do_not_bump_updated_at() {
    let app = app().await;
    let token = login(&app, "alice@example.com").await;
    let task = create_todo(&app, &token, "Once").await;
    let uri = format!("/todo/{}/done", task["id"]);

    let first = send(&app, Method::PUT, &uri, Some(&token), Some(json!({ "is_done": true }))).await;
    let second = send(&app, Method::PUT, &uri, Some(&token), Some(json!({ "is_done": true }))).await;

    assert_eq!(second.status, StatusCode::OK);
    assert_eq!(first.body["updated_at"], second.body["updated_at"]);
    assert_eq!(first.body["done_at"], second.body["done_at"]);
}

#[tokio::test]
async fn foreign_tasks_look_missing() {
    let app = app().await;
    let alice = login(&app, "alice@example.com").await;
    let bob = login(&app, "bob@example.com").await;
    let task = create_todo(&app, &alice, "Alice only").await;
    let uri = format!("/todo/{}", task["id"]);

    let patch = send(&app, Method::PATCH, &uri, Some(&bob), Some(json!({ "title": "Mine now" }))).await;
    assert_eq!(patch.status, StatusCode::NOT_FOUND);
    assert_eq!(patch.body["message"], "todo not found");

    let done = send(
        &app,
        Method::PUT,
        &format!("{}/done", uri),
        Some(&bob),
        Some(json!({ "is_done": true })),
    )
    .await;
    assert_eq!(done.status, StatusCode::NOT_FOUND);

    let delete = send(&app, Method::DELETE, &uri, Some(&bob), None).await;
    assert_eq!(delete.status, StatusCode::NO_CONTENT);

    let survivor = send(&app, Method::GET, &uri, Some(&alice), None).await;
    assert_eq!(survivor.status, StatusCode::OK);
    assert_eq!(survivor.body["title"], "Alice only");
}

#[tokio::test]
async fn delete_is_idempotent() {
    let app = app().await;
    let token = login(&app, "alice@example.com").await;
    let task = create_todo(&app, &token, "Temporary").await;
    let uri = format!("/todo/{}", task["id"]);

    for _ in 0..2 {
        let reply = send(&app, Method::DELETE, &uri, Some(&token), None).await;
        assert_eq!(reply.status, StatusCode::NO_CONTENT);
    }

    let gone = send(&app, Method::GET, &uri, Some(&token), None).await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_requests_are_bad_requests() {
    let app = app().await;
    let token = login(&app, "alice@example.com").await;

    let bad_id = send(&app, Method::PATCH, "/todo/abc", Some(&token), Some(json!({ "title": "x" }))).await;
    assert_eq!(bad_id.status, StatusCode::BAD_REQUEST);

    let no_title = send(&app, Method::POST, "/todo", Some(&token), Some(json!({ "title": "" }))).await;
    assert_eq!(no_title.status, StatusCode::BAD_REQUEST);
    assert!(no_title.body["fields"]["title"].is_string());

    let long = send(
        &app,
        Method::POST,
        "/todo",
        Some(&token),
        Some(json!({ "title": "t".repeat(101) })),
    )
    .await;
    assert_eq!(long.status, StatusCode::BAD_REQUEST);

    let task = create_todo(&app, &token, "Valid").await;
    let missing_flag = send(
        &app,
        Method::PUT,
        &format!("/todo/{}/done", task["id"]),
        Some(&token),
        Some(json!({})),
    )
    .await;
    assert_eq!(missing_flag.status, StatusCode::BAD_REQUEST);
}
