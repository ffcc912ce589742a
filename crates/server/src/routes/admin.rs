use axum::{
    extract::{rejection::{JsonRejection, PathRejection}, Path, Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use common::types::MessageBody;
use models::contact_request::ListedContactRequest;
use models::review::Model as Review;

use crate::errors::ApiError;
use crate::routes::ServerState;

#[derive(Debug, Default, Deserialize)]
pub struct LoginInput {
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginOutput {
    pub token: String,
}

#[utoipa::path(
    post, path = "/api/admin/login", tag = "admin",
    request_body = crate::openapi::LoginRequest,
    responses(
        (status = 200, description = "Token issued", body = crate::openapi::TokenResponse),
        (status = 400, description = "Password required"),
        (status = 401, description = "Invalid password")
    )
)]
pub async fn login(
    State(state): State<ServerState>,
    payload: Result<Json<LoginInput>, JsonRejection>,
) -> Result<Json<LoginOutput>, ApiError> {
    let Json(input) = payload.map_err(|_| ApiError::invalid_body())?;
    let token = state.admin.login(input.password.as_deref())?;
    Ok(Json(LoginOutput { token: token.to_string() }))
}

/// Middleware: the admin routes require `Authorization: Bearer <token>`.
pub async fn require_admin_token(State(state): State<ServerState>, req: Request, next: Next) -> Result<Response, ApiError> {
    let header = req.headers().get(AUTHORIZATION).and_then(|v| v.to_str().ok());
    state.admin.authorize(header)?;
    Ok(next.run(req).await)
}

#[utoipa::path(
    get, path = "/api/admin/reviews", tag = "admin",
    responses(
        (status = 200, description = "All reviews", body = [crate::openapi::ReviewDoc]),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_reviews(State(state): State<ServerState>) -> Result<Json<Vec<Review>>, ApiError> {
    Ok(Json(state.reviews.list().await?))
}

#[utoipa::path(
    delete, path = "/api/admin/reviews/{id}", tag = "admin",
    params(("id" = i32, Path, description = "Review id")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 404, description = "Review not found"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn delete_review(
    State(state): State<ServerState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<MessageBody>, ApiError> {
    // a non-numeric id cannot match any row
    let Ok(Path(id)) = id else { return Err(ApiError::not_found("Review not found")) };
    state.reviews.delete(id).await?;
    Ok(Json(MessageBody { message: "Review deleted successfully".into() }))
}

#[utoipa::path(
    get, path = "/api/admin/contact-requests", tag = "admin",
    responses(
        (status = 200, description = "Inbox, newest first; is_processed is 0 or 1", body = [crate::openapi::ListedContactDoc]),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_contact_requests(State(state): State<ServerState>) -> Result<Json<Vec<ListedContactRequest>>, ApiError> {
    Ok(Json(state.contacts.list().await?))
}

async fn set_processed(state: ServerState, id: Result<Path<i32>, PathRejection>, processed: bool) -> Result<Json<Value>, ApiError> {
    let Ok(Path(id)) = id else { return Err(ApiError::not_found("Request not found")) };
    let request = state.contacts.set_processed(id, processed).await?;
    let message = if processed { "Request marked processed" } else { "Request marked unprocessed" };
    Ok(Json(json!({ "message": message, "request": request })))
}

#[utoipa::path(
    patch, path = "/api/admin/contact-requests/{id}/process", tag = "admin",
    params(("id" = i32, Path, description = "Contact request id")),
    responses(
        (status = 200, description = "Marked processed"),
        (status = 404, description = "Request not found")
    )
)]
pub async fn mark_processed(State(state): State<ServerState>, id: Result<Path<i32>, PathRejection>) -> Result<Json<Value>, ApiError> {
    set_processed(state, id, true).await
}

#[utoipa::path(
    patch, path = "/api/admin/contact-requests/{id}/unprocess", tag = "admin",
    params(("id" = i32, Path, description = "Contact request id")),
    responses(
        (status = 200, description = "Marked unprocessed"),
        (status = 404, description = "Request not found")
    )
)]
pub async fn mark_unprocessed(State(state): State<ServerState>, id: Result<Path<i32>, PathRejection>) -> Result<Json<Value>, ApiError> {
    set_processed(state, id, false).await
}

#[utoipa::path(
    delete, path = "/api/admin/contact-requests/{id}", tag = "admin",
    params(("id" = i32, Path, description = "Contact request id")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 404, description = "Request not found")
    )
)]
pub async fn delete_contact_request(
    State(state): State<ServerState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<MessageBody>, ApiError> {
    let Ok(Path(id)) = id else { return Err(ApiError::not_found("Request not found")) };
    state.contacts.delete(id).await?;
    Ok(Json(MessageBody { message: "Contact request deleted".into() }))
}
