use std::sync::Arc;

use tracing::{info, instrument, warn};

use models::review::Model;

use crate::errors::ServiceError;
use crate::reviews::domain::CreateReviewInput;
use crate::reviews::repository::ReviewRepository;

/// Review rules on top of a [`ReviewRepository`].
#[derive(Clone)]
pub struct ReviewService {
    repo: Arc<dyn ReviewRepository>,
}

impl ReviewService {
    pub fn new(repo: Arc<dyn ReviewRepository>) -> Self { Self { repo } }

    pub async fn list(&self) -> Result<Vec<Model>, ServiceError> { self.repo.list().await }

    /// Validate and store a public submission.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::reviews::{ReviewService, domain::CreateReviewInput, repository::memory::InMemoryReviewRepository};
    /// let svc = ReviewService::new(Arc::new(InMemoryReviewRepository::new()));
    /// let input = CreateReviewInput {
    ///     name: Some("Ayşe".into()),
    ///     service: Some("ev-temizligi".into()),
    ///     rating: Some(5),
    ///     text: Some("Harika".into()),
    ///     ..Default::default()
    /// };
    /// let row = tokio_test::block_on(svc.submit(input)).unwrap();
    /// assert_eq!(row.rating, 5);
    /// ```
    #[instrument(skip_all)]
    pub async fn submit(&self, input: CreateReviewInput) -> Result<Model, ServiceError> {
        let new = input.into_new_review()?;
        if !common::catalog::is_known(&new.service) {
            warn!(service = %new.service, "review_for_unknown_service");
        }
        let row = self.repo.create(new).await?;
        info!(review_id = row.id, rating = row.rating, "review_created");
        Ok(row)
    }

    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        if !self.repo.delete(id).await? {
            return Err(ServiceError::not_found("Review not found"));
        }
        info!(review_id = id, "review_deleted");
        Ok(())
    }
}
