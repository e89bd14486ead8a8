use async_trait::async_trait;

use super::domain::{AuthorRead, AuthorWrite};
use crate::errors::ServiceError;

/// Repository abstraction for author persistence.
#[async_trait]
pub trait AuthorRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<AuthorRead>, ServiceError>;
    async fn get(&self, id: i32) -> Result<Option<AuthorRead>, ServiceError>;
    async fn create(&self, input: &AuthorWrite) -> Result<AuthorRead, ServiceError>;
    /// Fails with `NotFound` when no author has `id`.
    async fn update(&self, id: i32, input: &AuthorWrite) -> Result<AuthorRead, ServiceError>;
    /// Fails with `NotFound` when no author has `id`, `Conflict` when books still reference it.
    async fn delete(&self, id: i32) -> Result<(), ServiceError>;
}

/// Simple in-memory mock repository for tests
pub mod mock {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::{Mutex, PoisonError};

    #[derive(Default)]
    pub struct MockAuthorRepository {
        rows: Mutex<BTreeMap<i32, AuthorRead>>,
        next_id: Mutex<i32>,
    }

    #[async_trait]
    impl AuthorRepository for MockAuthorRepository {
        async fn list(&self) -> Result<Vec<AuthorRead>, ServiceError> {
            let rows = self.rows.lock().unwrap_or_else(PoisonError::into_inner);
            Ok(rows.values().cloned().collect())
        }

        async fn get(&self, id: i32) -> Result<Option<AuthorRead>, ServiceError> {
            let rows = self.rows.lock().unwrap_or_else(PoisonError::into_inner);
            Ok(rows.get(&id).cloned())
        }

        async fn create(&self, input: &AuthorWrite) -> Result<AuthorRead, ServiceError> {
            let mut next_id = self.next_id.lock().unwrap_or_else(PoisonError::into_inner);
            *next_id += 1;
            let author = AuthorRead { id: *next_id, first_name: input.first_name.clone(), last_name: input.last_name.clone() };
            let mut rows = self.rows.lock().unwrap_or_else(PoisonError::into_inner);
            rows.insert(author.id, author.clone());
            Ok(author)
        }

        async fn update(&self, id: i32, input: &AuthorWrite) -> Result<AuthorRead, ServiceError> {
            let mut rows = self.rows.lock().unwrap_or_else(PoisonError::into_inner);
            let row = rows.get_mut(&id).ok_or_else(|| ServiceError::not_found("author", id))?;
            row.first_name = input.first_name.clone();
            row.last_name = input.last_name.clone();
            Ok(row.clone())
        }

        async fn delete(&self, id: i32) -> Result<(), ServiceError> {
            let mut rows = self.rows.lock().unwrap_or_else(PoisonError::into_inner);
            rows.remove(&id).map(|_| ()).ok_or_else(|| ServiceError::not_found("author", id))
        }
    }
}
