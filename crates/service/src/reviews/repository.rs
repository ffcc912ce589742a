use async_trait::async_trait;

use models::review::{Model, NewReview};

use crate::errors::ServiceError;

/// Storage for reviews. `list` is newest first.
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Model>, ServiceError>;
    async fn create(&self, new: NewReview) -> Result<Model, ServiceError>;
    /// Returns false when no review had this id.
    async fn delete(&self, id: i32) -> Result<bool, ServiceError>;
}

/// In-memory repository for tests and database-less local runs.
pub mod memory {
    use super::*;
    use std::sync::{Mutex, MutexGuard, PoisonError};

    use chrono::Utc;

    #[derive(Default)]
    pub struct InMemoryReviewRepository {
        state: Mutex<State>,
    }

    #[derive(Default)]
    struct State {
        rows: Vec<Model>,
        last_id: i32,
    }

    impl InMemoryReviewRepository {
        pub fn new() -> Self { Self::default() }

        /// Seed a row verbatim (keeps its id and timestamp).
        pub fn insert_row(&self, row: Model) {
            let mut state = self.lock();
            state.last_id = state.last_id.max(row.id);
            state.rows.push(row);
        }

        pub fn len(&self) -> usize { self.lock().rows.len() }

        pub fn is_empty(&self) -> bool { self.len() == 0 }

        fn lock(&self) -> MutexGuard<'_, State> {
            self.state.lock().unwrap_or_else(PoisonError::into_inner)
        }
    }

    #[async_trait]
    impl ReviewRepository for InMemoryReviewRepository {
        async fn list(&self) -> Result<Vec<Model>, ServiceError> {
            let mut rows = self.lock().rows.clone();
            rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
            Ok(rows)
        }

        async fn create(&self, new: NewReview) -> Result<Model, ServiceError> {
            // same constraint the CHECK enforces in PostgreSQL
            new.validate()?;
            let mut state = self.lock();
            state.last_id += 1;
            let row = Model {
                id: state.last_id,
                name: new.name,
                email: new.email,
                service: new.service,
                rating: new.rating,
                text: new.text,
                created_at: Utc::now().into(),
            };
            state.rows.push(row.clone());
            Ok(row)
        }

        async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
            let mut state = self.lock();
            let before = state.rows.len();
            state.rows.retain(|r| r.id != id);
            Ok(state.rows.len() != before)
        }
    }
}
