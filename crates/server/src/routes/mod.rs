pub mod admin;
pub mod contact;
pub mod reviews;

use axum::{
    extract::DefaultBodyLimit,
    handler::HandlerWithoutStateExt,
    middleware,
    routing::{delete, get, patch, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    services::ServeDir,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;

use common::{rate_limit::RateLimiter, types::Health};
use service::{admin::AdminGate, contact::ContactService, reviews::ReviewService};

use crate::errors::{ApiError, ROUTE_NOT_FOUND};
use crate::middleware::{enforce_rate_limit, security_headers};
use crate::openapi::ApiDoc;

pub const BODY_LIMIT_BYTES: usize = 10 * 1024 * 1024;

#[derive(Clone)]
pub struct ServerState {
    pub reviews: ReviewService,
    pub contacts: ContactService,
    pub admin: AdminGate,
}

#[utoipa::path(
    get, path = "/api/health", tag = "health",
    responses(
        (status = 200, description = "Liveness", body = crate::openapi::HealthResponse)
    )
)]
pub async fn health() -> Json<Health> {
    Json(Health::ok())
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub async fn route_not_found() -> ApiError {
    ApiError::not_found(ROUTE_NOT_FOUND)
}

/// Build the full application router: public API, admin API behind the token
/// gate, static assets, and the JSON 404 for everything else.
pub fn build_router(state: ServerState, limiter: RateLimiter, cors: CorsLayer, static_dir: &str) -> Router {
    let public = Router::new()
        .route("/api/health", get(health))
        .route("/api/openapi.json", get(openapi_json))
        .route("/api/reviews", get(reviews::list_reviews).post(reviews::create_review))
        .route("/api/contact", post(contact::create_contact))
        .route("/api/admin/login", post(admin::login));

    let admin_routes = Router::new()
        .route("/api/admin/reviews", get(admin::list_reviews))
        .route("/api/admin/reviews/:id", delete(admin::delete_review))
        .route("/api/admin/contact-requests", get(admin::list_contact_requests))
        .route("/api/admin/contact-requests/:id", delete(admin::delete_contact_request))
        .route("/api/admin/contact-requests/:id/process", patch(admin::mark_processed))
        .route("/api/admin/contact-requests/:id/unprocess", patch(admin::mark_unprocessed))
        .route_layer(middleware::from_fn_with_state(state.clone(), admin::require_admin_token));

    // anything that is neither a route nor a file gets the JSON 404
    let static_files = ServeDir::new(static_dir)
        .call_fallback_on_method_not_allowed(true)
        .not_found_service(route_not_found.into_service());

    let [nosniff, frame_options, referrer, dns_prefetch] = security_headers();

    public
        .merge(admin_routes)
        .route_layer(middleware::from_fn_with_state(limiter, enforce_rate_limit))
        .fallback_service(static_files)
        .with_state(state)
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .layer(nosniff)
        .layer(frame_options)
        .layer(referrer)
        .layer(dns_prefetch)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
