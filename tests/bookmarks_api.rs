use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode, header},
};
use serde_json::{Value, json};
use tower::ServiceExt;

use web_collector::error::{StoreError, StoreResult};
use web_collector::handler::AppState;
use web_collector::model::Bookmark;
use web_collector::server::build_router;
use web_collector::store::{BookmarkStore, InMemoryStore};

const ORIGIN: &str = "http://localhost:3000";

fn app_with(store: Arc<dyn BookmarkStore>) -> Router {
    build_router(AppState::new(store), ORIGIN).unwrap()
}

fn seeded_app() -> Router {
    app_with(Arc::new(InMemoryStore::with_samples()))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(raw) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(raw.to_string())
        }
        None => Body::empty(),
    };

    let response = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

#[tokio::test]
async fn create_list_delete_scenario() {
    let app = seeded_app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/bookmarks",
        Some(r#"{"title":"Test","url":"https://x.com"}"#),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["id"], "4");
    assert_eq!(body["data"]["title"], "Test");
    assert_eq!(body["data"]["url"], "https://x.com");

    let (status, body) = send(&app, Method::GET, "/api/v1/bookmarks", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 4);

    let (status, body) = send(&app, Method::DELETE, "/api/v1/bookmarks/2", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": true, "message": "Bookmark deleted"}));

    let (status, body) = send(&app, Method::GET, "/api/v1/bookmarks/2", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"success": false, "error": "Bookmark not found"}));

    let (_, body) = send(&app, Method::GET, "/api/v1/bookmarks", None).await;
    let ids: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["1", "3", "4"]);
}

#[tokio::test]
async fn get_single_bookmark_has_rfc3339_timestamp() {
    let app = seeded_app();
    let (status, body) = send(&app, Method::GET, "/api/v1/bookmarks/1", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["title"], "Google");
    let created_at = body["data"]["created_at"].as_str().unwrap();
    assert!(chrono::DateTime::parse_from_rfc3339(created_at).is_ok());
}

#[tokio::test]
async fn health_and_ping() {
    let app = seeded_app();

    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok", "service": "web-collector-backend"}));

    let (status, body) = send(&app, Method::GET, "/api/v1/ping", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "pong"}));
}

#[tokio::test]
async fn create_rejects_missing_fields() {
    let app = seeded_app();

    let (status, body) = send(&app, Method::POST, "/api/v1/bookmarks", Some(r#"{"title":"only"}"#)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Invalid request body");
    assert_eq!(body["details"], "url is required");

    let (status, _) = send(&app, Method::POST, "/api/v1/bookmarks", Some(r#"{"title":"","url":"https://x.com"}"#)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = send(&app, Method::GET, "/api/v1/bookmarks", None).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn create_rejects_malformed_json() {
    let app = seeded_app();

    let (status, body) = send(&app, Method::POST, "/api/v1/bookmarks", Some("{not json")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid request body");
    assert!(body["details"].is_string());

    // No content type at all.
    let (status, _) = send(&app, Method::POST, "/api/v1/bookmarks", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn create_keeps_whitespace_values() {
    let app = seeded_app();

    let (status, body) = send(&app, Method::POST, "/api/v1/bookmarks", Some(r#"{"title":"   ","url":"https://x.com"}"#)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["id"], "4");
    assert_eq!(body["data"]["title"], "   ");
}

#[tokio::test]
async fn update_with_null_body_changes_nothing() {
    let app = seeded_app();
    let (_, before) = send(&app, Method::GET, "/api/v1/bookmarks/1", None).await;

    let (status, body) = send(&app, Method::PUT, "/api/v1/bookmarks/1", Some("null")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, before);

    let (status, _) = send(&app, Method::PUT, "/api/v1/bookmarks/99", Some("null")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_changes_only_given_fields() {
    let app = seeded_app();

    let (status, body) = send(&app, Method::PUT, "/api/v1/bookmarks/2", Some(r#"{"url":"https://gitlab.com"}"#)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["title"], "GitHub");
    assert_eq!(body["data"]["url"], "https://gitlab.com");

    let (status, body) = send(&app, Method::PUT, "/api/v1/bookmarks/2", Some(r#"{"title":"GitLab","url":""}"#)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["title"], "GitLab");
    assert_eq!(body["data"]["url"], "https://gitlab.com");
}

#[tokio::test]
async fn update_validates_body_before_lookup() {
    let app = seeded_app();

    let (status, _) = send(&app, Method::PUT, "/api/v1/bookmarks/99", Some("[1,2")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(&app, Method::PUT, "/api/v1/bookmarks/99", Some(r#"{"title":"x"}"#)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Bookmark not found");
}

#[tokio::test]
async fn delete_unknown_leaves_collection_unchanged() {
    let app = seeded_app();
    let (_, before) = send(&app, Method::GET, "/api/v1/bookmarks", None).await;

    let (status, body) = send(&app, Method::DELETE, "/api/v1/bookmarks/42", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);

    let (_, after) = send(&app, Method::GET, "/api/v1/bookmarks", None).await;
    assert_eq!(before, after);
}

#[tokio::test]
async fn preflight_gets_no_content() {
    let app = seeded_app();
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/v1/bookmarks")
        .header(header::ORIGIN, ORIGIN)
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(
        response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        ORIGIN
    );
    assert_eq!(
        response.headers().get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS).unwrap(),
        "true"
    );
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert!(bytes.is_empty());
}

#[tokio::test]
async fn wildcard_origin_allows_any_caller() {
    let app = build_router(AppState::new(Arc::new(InMemoryStore::new())), "*").unwrap();
    let request = Request::builder()
        .uri("/api/v1/bookmarks")
        .header(header::ORIGIN, "https://anywhere.example")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "*"
    );
}

struct PoisonedStore;

impl BookmarkStore for PoisonedStore {
    fn create(&self, _title: &str, _url: &str) -> StoreResult<Bookmark> {
        Err(StoreError::LockPoisoned("test".into()))
    }

    fn get_all(&self) -> StoreResult<Vec<Bookmark>> {
        Err(StoreError::LockPoisoned("test".into()))
    }

    fn get_by_id(&self, _id: &str) -> StoreResult<Option<Bookmark>> {
        panic!("get_by_id exploded")
    }

    fn update(&self, _id: &str, _title: &str, _url: &str) -> StoreResult<Option<Bookmark>> {
        Err(StoreError::LockPoisoned("test".into()))
    }

    fn delete(&self, _id: &str) -> StoreResult<bool> {
        Err(StoreError::LockPoisoned("test".into()))
    }
}

#[tokio::test]
async fn failures_become_generic_500() {
    let app = app_with(Arc::new(PoisonedStore));
    let generic = json!({
        "success": false,
        "error": "Internal server error",
        "message": "Something went wrong",
    });

    let (status, body) = send(&app, Method::GET, "/api/v1/bookmarks", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, generic);

    let (status, body) = send(&app, Method::GET, "/api/v1/bookmarks/1", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, generic);
}

#[tokio::test]
async fn concurrent_posts_get_distinct_ids() {
    let app = app_with(Arc::new(InMemoryStore::new()));

    let mut tasks = Vec::new();
    for i in 0..32 {
        let app = app.clone();
        tasks.push(tokio::spawn(async move {
            let raw = format!(r#"{{"title":"t{i}","url":"https://example.com/{i}"}}"#);
            let (status, body) = send(&app, Method::POST, "/api/v1/bookmarks", Some(&raw)).await;
            assert_eq!(status, StatusCode::CREATED);
            body["data"]["id"].as_str().unwrap().to_string()
        }));
    }

    let mut ids = Vec::new();
    for task in tasks {
        ids.push(task.await.unwrap());
    }
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 32);
}
