use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, HeaderMap, Request, StatusCode};
use axum::Router;
use chrono::{DateTime, Utc};
use serde_json::{json, Value};
use tower::Service;

use common::rate_limit::RateLimiter;
use models::review::{Model as Review, NewReview};
use server::routes::{self, ServerState};
use service::admin::AdminGate;
use service::contact::{repository::memory::InMemoryContactRepository, ContactService};
use service::errors::ServiceError;
use service::reviews::repository::{memory::InMemoryReviewRepository, ReviewRepository};
use service::reviews::ReviewService;

const PASSWORD: &str = "test-admin-password";
const TOKEN: &str = "test-admin-token";

fn cors() -> tower_http::cors::CorsLayer { tower_http::cors::CorsLayer::very_permissive() }

struct TestApp {
    router: Router,
    reviews: Arc<InMemoryReviewRepository>,
    contacts: Arc<InMemoryContactRepository>,
}

fn build_app_with(limiter: RateLimiter) -> TestApp {
    let reviews = Arc::new(InMemoryReviewRepository::new());
    let contacts = Arc::new(InMemoryContactRepository::new());
    let state = ServerState {
        reviews: ReviewService::new(reviews.clone()),
        contacts: ContactService::new(contacts.clone()),
        admin: AdminGate::new(PASSWORD, TOKEN),
    };
    let router = routes::build_router(state, limiter, cors(), "target/no-static-assets");
    TestApp { router, reviews, contacts }
}

fn build_app() -> TestApp { build_app_with(RateLimiter::disabled()) }

/// Storage that always fails, for the 500 paths.
struct BrokenReviews;

#[async_trait]
impl ReviewRepository for BrokenReviews {
    async fn list(&self) -> Result<Vec<Review>, ServiceError> { Err(ServiceError::Db("connection refused".into())) }
    async fn create(&self, _new: NewReview) -> Result<Review, ServiceError> { Err(ServiceError::Db("connection refused".into())) }
    async fn delete(&self, _id: i32) -> Result<bool, ServiceError> { Err(ServiceError::Db("connection refused".into())) }
}

async fn send(app: &Router, req: Request<Body>) -> anyhow::Result<(StatusCode, HeaderMap, Value)> {
    let resp = app.clone().call(req).await?;
    let status = resp.status();
    let headers = resp.headers().clone();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await?;
    let body = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes)? };
    Ok((status, headers, body))
}

fn json_req(method: &str, uri: &str, body: &Value) -> anyhow::Result<Request<Body>> {
    Ok(Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(body)?))?)
}

fn admin_req(method: &str, uri: &str) -> anyhow::Result<Request<Body>> {
    Ok(Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {TOKEN}"))
        .body(Body::empty())?)
}

fn get(uri: &str) -> anyhow::Result<Request<Body>> {
    Ok(Request::builder().uri(uri).body(Body::empty())?)
}

fn ayse() -> Value {
    json!({"name": "Ayşe", "service": "ev-temizligi", "rating": 5, "text": "Harika"})
}

#[tokio::test]
async fn health_reports_ok_with_timestamp() -> anyhow::Result<()> {
    let app = build_app();
    let (status, headers, body) = send(&app.router, get("/api/health")?).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "OK");
    assert!(DateTime::parse_from_rfc3339(body["timestamp"].as_str().unwrap_or_default()).is_ok());
    assert_eq!(headers.get("x-content-type-options").unwrap(), "nosniff");
    assert_eq!(headers.get("x-frame-options").unwrap(), "SAMEORIGIN");
    Ok(())
}

#[tokio::test]
async fn submitted_review_appears_first() -> anyhow::Result<()> {
    let app = build_app();
    let before = Utc::now();

    let (status, _, body) = send(&app.router, json_req("POST", "/api/reviews", &json!({"name": "Önceki", "service": "ofis-temizligi", "rating": 4, "text": "İyi"}))?).await?;
    assert_eq!(status, StatusCode::CREATED);
    tokio::time::sleep(Duration::from_millis(5)).await;

    let (status, _, body2) = send(&app.router, json_req("POST", "/api/reviews", &ayse())?).await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body2["message"], "Yorumunuz başarıyla eklendi!");
    assert_eq!(body2["review"]["name"], "Ayşe");
    assert!(body2["review"]["email"].is_null());
    let created = DateTime::parse_from_rfc3339(body2["review"]["created_at"].as_str().unwrap_or_default())?;
    assert!(created.with_timezone(&Utc) >= before);
    assert!(body2["review"]["id"].as_i64() > body["review"]["id"].as_i64());

    let (status, _, list) = send(&app.router, get("/api/reviews")?).await?;
    assert_eq!(status, StatusCode::OK);
    let list = list.as_array().cloned().unwrap_or_default();
    assert_eq!(list.len(), 2);
    assert_eq!(list[0]["name"], "Ayşe");
    assert_eq!(list[0]["rating"], 5);
    Ok(())
}

#[tokio::test]
async fn invalid_reviews_are_rejected_and_not_stored() -> anyhow::Result<()> {
    let app = build_app();
    let cases = [
        (json!({"name": "Ayşe", "service": "ev-temizligi", "rating": 6, "text": "x"}), "Rating must be between 1 and 5"),
        (json!({"name": "Ayşe", "service": "ev-temizligi", "rating": 0, "text": "x"}), "Missing required fields"),
        (json!({"service": "ev-temizligi", "rating": 5, "text": "x"}), "Missing required fields"),
        (json!({"name": "Ayşe", "service": "ev-temizligi", "rating": 5, "text": "   "}), "Missing required fields"),
        (json!({"name": "a".repeat(101), "service": "ev-temizligi", "rating": 5, "text": "x"}), "Field too long"),
    ];
    for (body, message) in cases {
        let (status, _, resp) = send(&app.router, json_req("POST", "/api/reviews", &body)?).await?;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
        assert_eq!(resp["error"], message);
    }
    assert!(app.reviews.is_empty());
    Ok(())
}

#[tokio::test]
async fn malformed_json_is_bad_request() -> anyhow::Result<()> {
    let app = build_app();
    let req = Request::builder()
        .method("POST")
        .uri("/api/contact")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))?;
    let (status, _, body) = send(&app.router, req).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid request body");
    Ok(())
}

#[tokio::test]
async fn contact_submission_and_validation() -> anyhow::Result<()> {
    let app = build_app();
    let (status, _, body) = send(
        &app.router,
        json_req("POST", "/api/contact", &json!({"name": "Mehmet", "phone": "05551112233", "service": "ofis-temizligi"}))?,
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Contact request submitted successfully");
    assert_eq!(body["request"]["is_processed"], false);
    assert!(body["request"]["message"].is_null());

    let (status, _, body) = send(
        &app.router,
        json_req("POST", "/api/contact", &json!({"name": "Mehmet", "service": "ofis-temizligi", "message": "Merhaba"}))?,
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing required fields");
    Ok(())
}

#[tokio::test]
async fn login_returns_token_that_opens_admin_routes() -> anyhow::Result<()> {
    let app = build_app();

    let (status, _, body) = send(&app.router, json_req("POST", "/api/admin/login", &json!({"password": "wrong"}))?).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid password");

    let (status, _, body) = send(&app.router, json_req("POST", "/api/admin/login", &json!({}))?).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Password required");

    let (status, _, body) = send(&app.router, json_req("POST", "/api/admin/login", &json!({"password": PASSWORD}))?).await?;
    assert_eq!(status, StatusCode::OK);
    let token = body["token"].as_str().unwrap_or_default().to_string();
    assert_eq!(token, TOKEN);

    let req = Request::builder()
        .uri("/api/admin/reviews")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())?;
    let (status, _, body) = send(&app.router, req).await?;
    assert_eq!(status, StatusCode::OK);
    assert!(body.is_array());
    Ok(())
}

#[tokio::test]
async fn admin_routes_reject_missing_or_wrong_token() -> anyhow::Result<()> {
    let app = build_app();
    for (method, uri) in [
        ("GET", "/api/admin/reviews"),
        ("DELETE", "/api/admin/reviews/1"),
        ("GET", "/api/admin/contact-requests"),
        ("PATCH", "/api/admin/contact-requests/1/process"),
        ("PATCH", "/api/admin/contact-requests/1/unprocess"),
        ("DELETE", "/api/admin/contact-requests/1"),
    ] {
        let req = Request::builder().method(method).uri(uri).body(Body::empty())?;
        let (status, _, body) = send(&app.router, req).await?;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{method} {uri}");
        assert_eq!(body["error"], "Unauthorized");

        let req = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::AUTHORIZATION, "Bearer nope")
            .body(Body::empty())?;
        let (status, _, _) = send(&app.router, req).await?;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
    Ok(())
}

#[tokio::test]
async fn deleting_reviews() -> anyhow::Result<()> {
    let app = build_app();
    let (_, _, created) = send(&app.router, json_req("POST", "/api/reviews", &ayse())?).await?;
    let id = created["review"]["id"].as_i64().unwrap_or_default();

    let (status, _, body) = send(&app.router, admin_req("DELETE", &format!("/api/admin/reviews/{id}"))?).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Review deleted successfully");

    let (_, _, list) = send(&app.router, get("/api/reviews")?).await?;
    assert!(list.as_array().map(|a| a.iter().all(|r| r["id"] != id)).unwrap_or(false));

    let (status, _, body) = send(&app.router, admin_req("DELETE", &format!("/api/admin/reviews/{id}"))?).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Review not found");

    let (status, _, _) = send(&app.router, admin_req("DELETE", "/api/admin/reviews/abc")?).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn contact_processing_toggle() -> anyhow::Result<()> {
    let app = build_app();
    let (_, _, created) = send(
        &app.router,
        json_req("POST", "/api/contact", &json!({"name": "Zeynep", "phone": "05320000000", "service": "villa-temizligi", "message": "Hafta sonu"}))?,
    )
    .await?;
    let id = created["request"]["id"].as_i64().unwrap_or_default();

    let (status, _, body) = send(&app.router, admin_req("PATCH", &format!("/api/admin/contact-requests/{id}/process"))?).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Request marked processed");
    assert!(app.contacts.get(id as i32).map(|r| r.is_processed).unwrap_or(false));

    let (_, _, list) = send(&app.router, admin_req("GET", "/api/admin/contact-requests")?).await?;
    assert_eq!(list[0]["is_processed"], 1);

    let (status, _, body) = send(&app.router, admin_req("PATCH", &format!("/api/admin/contact-requests/{id}/unprocess"))?).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Request marked unprocessed");
    let (_, _, list) = send(&app.router, admin_req("GET", "/api/admin/contact-requests")?).await?;
    assert_eq!(list[0]["is_processed"], 0);

    let (status, _, body) = send(&app.router, admin_req("PATCH", "/api/admin/contact-requests/99999/process")?).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Request not found");

    let (status, _, body) = send(&app.router, admin_req("DELETE", &format!("/api/admin/contact-requests/{id}"))?).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Contact request deleted");
    assert!(app.contacts.get(id as i32).is_none());

    let (status, _, _) = send(&app.router, admin_req("DELETE", &format!("/api/admin/contact-requests/{id}"))?).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn contact_unprocess_then_process_ends_processed() -> anyhow::Result<()> {
    let app = build_app();
    let (_, _, created) = send(
        &app.router,
        json_req("POST", "/api/contact", &json!({"name": "Zeynep", "phone": "05320000000", "service": "villa-temizligi"}))?,
    )
    .await?;
    let id = created["request"]["id"].as_i64().unwrap_or_default();

    let (status, _, body) = send(&app.router, admin_req("PATCH", &format!("/api/admin/contact-requests/{id}/unprocess"))?).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["request"]["is_processed"], false);

    let (status, _, body) = send(&app.router, admin_req("PATCH", &format!("/api/admin/contact-requests/{id}/process"))?).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["request"]["is_processed"], true);

    let (_, _, list) = send(&app.router, admin_req("GET", "/api/admin/contact-requests")?).await?;
    assert_eq!(list[0]["is_processed"], 1);
    Ok(())
}

#[tokio::test]
async fn storage_failures_hide_details() -> anyhow::Result<()> {
    let state = ServerState {
        reviews: ReviewService::new(Arc::new(BrokenReviews)),
        contacts: ContactService::new(Arc::new(InMemoryContactRepository::new())),
        admin: AdminGate::new(PASSWORD, TOKEN),
    };
    let router = routes::build_router(state, RateLimiter::disabled(), cors(), "target/no-static-assets");

    let (status, _, body) = send(&router, get("/api/reviews")?).await?;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Internal server error");

    let (status, _, body) = send(&router, json_req("POST", "/api/reviews", &ayse())?).await?;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Bir hata oluştu, lütfen tekrar deneyin.");
    Ok(())
}

#[tokio::test]
async fn unknown_routes_get_json_404() -> anyhow::Result<()> {
    let app = build_app();
    let (status, _, body) = send(&app.router, get("/api/nope")?).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Route not found");

    let (status, _, body) = send(&app.router, json_req("POST", "/does/not/exist", &json!({}))?).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Route not found");
    Ok(())
}

#[tokio::test]
async fn rate_limit_returns_429_with_retry_after() -> anyhow::Result<()> {
    let app = build_app_with(RateLimiter::new(Duration::from_secs(60), 2, true));
    for _ in 0..2 {
        let (status, _, _) = send(&app.router, get("/api/reviews")?).await?;
        assert_eq!(status, StatusCode::OK);
    }
    let (status, headers, body) = send(&app.router, get("/api/reviews")?).await?;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(body["error"], "Too many requests, please try again later.");
    let retry: u64 = headers.get(header::RETRY_AFTER).and_then(|v| v.to_str().ok()).and_then(|v| v.parse().ok()).unwrap_or(0);
    assert!((1..=60).contains(&retry));
    Ok(())
}

#[tokio::test]
async fn openapi_document_is_served() -> anyhow::Result<()> {
    let app = build_app();
    let (status, _, body) = send(&app.router, get("/api/openapi.json")?).await?;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/api/reviews"].is_object());
    Ok(())
}
