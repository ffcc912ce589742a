use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use models::review::Model as Review;
use service::reviews::domain::CreateReviewInput;

use crate::errors::ApiError;
use crate::routes::ServerState;

pub const REVIEW_CREATED: &str = "Yorumunuz başarıyla eklendi!";
pub const REVIEW_SUBMIT_FAILED: &str = "Bir hata oluştu, lütfen tekrar deneyin.";

#[utoipa::path(
    get, path = "/api/reviews", tag = "reviews",
    responses(
        (status = 200, description = "All reviews, newest first", body = [crate::openapi::ReviewDoc]),
        (status = 500, description = "Storage failure")
    )
)]
pub async fn list_reviews(State(state): State<ServerState>) -> Result<Json<Vec<Review>>, ApiError> {
    Ok(Json(state.reviews.list().await?))
}

#[utoipa::path(
    post, path = "/api/reviews", tag = "reviews",
    request_body = crate::openapi::ReviewInputDoc,
    responses(
        (status = 201, description = "Created"),
        (status = 400, description = "Validation failed"),
        (status = 500, description = "Storage failure")
    )
)]
pub async fn create_review(
    State(state): State<ServerState>,
    payload: Result<Json<CreateReviewInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let Json(input) = payload.map_err(|_| ApiError::invalid_body())?;
    let review = state
        .reviews
        .submit(input)
        .await
        .map_err(|e| ApiError::from_service(e, REVIEW_SUBMIT_FAILED))?;
    Ok((StatusCode::CREATED, Json(json!({ "message": REVIEW_CREATED, "review": review }))))
}
