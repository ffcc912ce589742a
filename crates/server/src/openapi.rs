use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String, pub timestamp: String }

#[derive(ToSchema)]
pub struct ReviewDoc {
    pub id: i32,
    pub name: String,
    pub email: Option<String>,
    pub service: String,
    pub rating: i32,
    pub text: String,
    pub created_at: String,
}

#[derive(ToSchema)]
pub struct ReviewInputDoc {
    pub name: String,
    pub email: Option<String>,
    pub service: String,
    pub rating: i32,
    pub text: String,
}

#[derive(ToSchema)]
pub struct ContactInputDoc { pub name: String, pub phone: String, pub service: String, pub message: Option<String> }

#[derive(ToSchema)]
pub struct ListedContactDoc {
    pub id: i32,
    pub name: String,
    pub phone: String,
    pub service: String,
    pub message: Option<String>,
    pub created_at: String,
    pub is_processed: u8,
}

#[derive(ToSchema)]
pub struct LoginRequest { pub password: String }

#[derive(ToSchema)]
pub struct TokenResponse { pub token: String }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::reviews::list_reviews,
        crate::routes::reviews::create_review,
        crate::routes::contact::create_contact,
        crate::routes::admin::login,
        crate::routes::admin::list_reviews,
        crate::routes::admin::delete_review,
        crate::routes::admin::list_contact_requests,
        crate::routes::admin::mark_processed,
        crate::routes::admin::mark_unprocessed,
        crate::routes::admin::delete_contact_request,
    ),
    components(
        schemas(
            HealthResponse,
            ReviewDoc,
            ReviewInputDoc,
            ContactInputDoc,
            ListedContactDoc,
            LoginRequest,
            TokenResponse,
        )
    ),
    tags(
        (name = "health"),
        (name = "reviews"),
        (name = "contact"),
        (name = "admin")
    )
)]
pub struct ApiDoc;
