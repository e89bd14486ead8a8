use std::sync::Arc;

use tracing::{info, instrument};

use super::domain::{AuthorRead, AuthorWrite};
use super::repository::AuthorRepository;
use crate::errors::ServiceError;

/// Author use cases, independent of the web framework.
pub struct AuthorService<R: AuthorRepository + ?Sized = dyn AuthorRepository> {
    repo: Arc<R>,
}

impl<R: AuthorRepository + ?Sized> AuthorService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    /// Every author, ordered by id. No filtering, no pagination.
    pub async fn list_authors(&self) -> Result<Vec<AuthorRead>, ServiceError> {
        self.repo.list().await
    }

    /// `Ok(None)` when no author has `id`; absence is not an error here.
    pub async fn get_author(&self, id: i32) -> Result<Option<AuthorRead>, ServiceError> {
        self.repo.get(id).await
    }

    #[instrument(skip(self, input))]
    pub async fn create_author(&self, input: AuthorWrite) -> Result<AuthorRead, ServiceError> {
        let created = self.repo.create(&input).await?;
        info!(author_id = created.id, "author_created");
        Ok(created)
    }

    /// Replace both name fields. Existence is discovered by the store.
    #[instrument(skip(self, input))]
    pub async fn update_author(&self, input: AuthorWrite, id: i32) -> Result<AuthorRead, ServiceError> {
        let updated = self.repo.update(id, &input).await?;
        info!(author_id = id, "author_updated");
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete_author(&self, id: i32) -> Result<(), ServiceError> {
        self.repo.delete(id).await?;
        info!(author_id = id, "author_deleted");
        Ok(())
    }
}
