use std::sync::Arc;

use tracing::{info, instrument, warn};

use models::contact_request::{ListedContactRequest, Model};

use crate::contact::domain::CreateContactInput;
use crate::contact::repository::ContactRepository;
use crate::errors::ServiceError;

#[derive(Clone)]
pub struct ContactService {
    repo: Arc<dyn ContactRepository>,
}

impl ContactService {
    pub fn new(repo: Arc<dyn ContactRepository>) -> Self { Self { repo } }

    #[instrument(skip_all)]
    pub async fn submit(&self, input: CreateContactInput) -> Result<Model, ServiceError> {
        let new = input.into_new_request()?;
        if !common::catalog::is_known(&new.service) {
            warn!(service = %new.service, "contact_for_unknown_service");
        }
        let row = self.repo.create(new).await?;
        info!(contact_id = row.id, service = %row.service, "contact_request_created");
        Ok(row)
    }

    /// Admin inbox, newest first, with the integer processed flag.
    pub async fn list(&self) -> Result<Vec<ListedContactRequest>, ServiceError> {
        Ok(self.repo.list().await?.into_iter().map(ListedContactRequest::from).collect())
    }

    pub async fn set_processed(&self, id: i32, processed: bool) -> Result<Model, ServiceError> {
        let row = self
            .repo
            .set_processed(id, processed)
            .await?
            .ok_or_else(|| ServiceError::not_found("Request not found"))?;
        info!(contact_id = id, processed, "contact_request_flagged");
        Ok(row)
    }

    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        if !self.repo.delete(id).await? {
            return Err(ServiceError::not_found("Request not found"));
        }
        info!(contact_id = id, "contact_request_deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contact::repository::memory::InMemoryContactRepository;

    fn service() -> (ContactService, Arc<InMemoryContactRepository>) {
        let repo = Arc::new(InMemoryContactRepository::new());
        (ContactService::new(repo.clone()), repo)
    }

    fn input() -> CreateContactInput {
        CreateContactInput {
            name: Some("Mehmet".into()),
            phone: Some("05551112233".into()),
            service: Some("ofis-temizligi".into()),
            message: None,
        }
    }

    #[tokio::test]
    async fn submitted_request_starts_unprocessed() {
        let (svc, _) = service();
        let row = svc.submit(input()).await.unwrap();
        assert!(!row.is_processed);
        let listed = svc.list().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].is_processed, 0);
        assert_eq!(listed[0].message, None);
    }

    #[tokio::test]
    async fn toggle_processed_is_idempotent() {
        let (svc, repo) = service();
        let row = svc.submit(input()).await.unwrap();
        svc.set_processed(row.id, true).await.unwrap();
        svc.set_processed(row.id, true).await.unwrap();
        assert!(repo.get(row.id).unwrap().is_processed);
        assert_eq!(svc.list().await.unwrap()[0].is_processed, 1);
        svc.set_processed(row.id, false).await.unwrap();
        assert!(!repo.get(row.id).unwrap().is_processed);
    }

    #[tokio::test]
    async fn unprocess_then_process_ends_processed() {
        let (svc, repo) = service();
        let row = svc.submit(input()).await.unwrap();
        let r = svc.set_processed(row.id, false).await.unwrap();
        assert!(!r.is_processed);
        let r = svc.set_processed(row.id, true).await.unwrap();
        assert!(r.is_processed);
        assert!(repo.get(row.id).unwrap().is_processed);
    }

    #[tokio::test]
    async fn unknown_id_is_not_found() {
        let (svc, _) = service();
        let err = svc.set_processed(99999, true).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(ref m) if m == "Request not found"));
        assert!(matches!(svc.delete(99999).await, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn delete_removes_row() {
        let (svc, repo) = service();
        let row = svc.submit(input()).await.unwrap();
        svc.delete(row.id).await.unwrap();
        assert!(repo.get(row.id).is_none());
    }
}
