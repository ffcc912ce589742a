use async_trait::async_trait;
use sea_orm::DatabaseConnection;

use models::review::{self, Model, NewReview};

use crate::errors::ServiceError;
use crate::reviews::repository::ReviewRepository;

/// SeaORM-backed repository implementation.
pub struct SeaOrmReviewRepository {
    pub db: DatabaseConnection,
}

#[async_trait]
impl ReviewRepository for SeaOrmReviewRepository {
    async fn list(&self) -> Result<Vec<Model>, ServiceError> {
        Ok(review::list_newest_first(&self.db).await?)
    }

    async fn create(&self, new: NewReview) -> Result<Model, ServiceError> {
        Ok(review::create(&self.db, new).await?)
    }

    async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
        Ok(review::delete(&self.db, id).await?)
    }
}
