use async_trait::async_trait;
use sea_orm::DatabaseConnection;

use models::contact_request::{self, Model, NewContactRequest};

use crate::contact::repository::ContactRepository;
use crate::errors::ServiceError;

pub struct SeaOrmContactRepository {
    pub db: DatabaseConnection,
}

#[async_trait]
impl ContactRepository for SeaOrmContactRepository {
    async fn list(&self) -> Result<Vec<Model>, ServiceError> {
        Ok(contact_request::list_newest_first(&self.db).await?)
    }

    async fn create(&self, new: NewContactRequest) -> Result<Model, ServiceError> {
        Ok(contact_request::create(&self.db, new).await?)
    }

    async fn set_processed(&self, id: i32, processed: bool) -> Result<Option<Model>, ServiceError> {
        Ok(contact_request::set_processed(&self.db, id, processed).await?)
    }

    async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
        Ok(contact_request::delete(&self.db, id).await?)
    }
}
