use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use service::contact::domain::CreateContactInput;

use crate::errors::ApiError;
use crate::routes::ServerState;

pub const CONTACT_CREATED: &str = "Contact request submitted successfully";

#[utoipa::path(
    post, path = "/api/contact", tag = "contact",
    request_body = crate::openapi::ContactInputDoc,
    responses(
        (status = 201, description = "Created"),
        (status = 400, description = "Validation failed"),
        (status = 500, description = "Storage failure")
    )
)]
pub async fn create_contact(
    State(state): State<ServerState>,
    payload: Result<Json<CreateContactInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let Json(input) = payload.map_err(|_| ApiError::invalid_body())?;
    let request = state.contacts.submit(input).await?;
    Ok((StatusCode::CREATED, Json(json!({ "message": CONTACT_CREATED, "request": request }))))
}
