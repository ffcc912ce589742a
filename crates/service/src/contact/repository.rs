use async_trait::async_trait;

use models::contact_request::{Model, NewContactRequest};

use crate::errors::ServiceError;

#[async_trait]
pub trait ContactRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Model>, ServiceError>;
    async fn create(&self, new: NewContactRequest) -> Result<Model, ServiceError>;
    async fn set_processed(&self, id: i32, processed: bool) -> Result<Option<Model>, ServiceError>;
    async fn delete(&self, id: i32) -> Result<bool, ServiceError>;
}

pub mod memory {
    use super::*;
    use std::sync::{Mutex, MutexGuard, PoisonError};

    use chrono::Utc;

    #[derive(Default)]
    pub struct InMemoryContactRepository {
        state: Mutex<State>,
    }

    #[derive(Default)]
    struct State {
        rows: Vec<Model>,
        last_id: i32,
    }

    impl InMemoryContactRepository {
        pub fn new() -> Self { Self::default() }

        pub fn insert_row(&self, row: Model) {
            let mut state = self.lock();
            state.last_id = state.last_id.max(row.id);
            state.rows.push(row);
        }

        pub fn get(&self, id: i32) -> Option<Model> {
            self.lock().rows.iter().find(|r| r.id == id).cloned()
        }

        fn lock(&self) -> MutexGuard<'_, State> {
            self.state.lock().unwrap_or_else(PoisonError::into_inner)
        }
    }

    #[async_trait]
    impl ContactRepository for InMemoryContactRepository {
        async fn list(&self) -> Result<Vec<Model>, ServiceError> {
            let mut rows = self.lock().rows.clone();
            rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
            Ok(rows)
        }

        async fn create(&self, new: NewContactRequest) -> Result<Model, ServiceError> {
            new.validate()?;
            let mut state = self.lock();
            state.last_id += 1;
            let row = Model {
                id: state.last_id,
                name: new.name,
                phone: new.phone,
                service: new.service,
                message: new.message,
                created_at: Utc::now().into(),
                is_processed: false,
            };
            state.rows.push(row.clone());
            Ok(row)
        }

        async fn set_processed(&self, id: i32, processed: bool) -> Result<Option<Model>, ServiceError> {
            let mut state = self.lock();
            let Some(row) = state.rows.iter_mut().find(|r| r.id == id) else {
                return Ok(None);
            };
            row.is_processed = processed;
            Ok(Some(row.clone()))
        }

        async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
            let mut state = self.lock();
            let before = state.rows.len();
            state.rows.retain(|r| r.id != id);
            Ok(state.rows.len() != before)
        }
    }
}
