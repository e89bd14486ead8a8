use async_trait::async_trait;

use super::domain::{BookFields, BookRead};
use crate::errors::ServiceError;

/// Repository abstraction for book persistence. Every method returns the joined read view.
#[async_trait]
pub trait BookRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<BookRead>, ServiceError>;
    async fn get(&self, id: i32) -> Result<Option<BookRead>, ServiceError>;
    /// Fails with `Conflict` when `author_id` references no author.
    async fn create(&self, fields: &BookFields) -> Result<BookRead, ServiceError>;
    async fn update(&self, id: i32, fields: &BookFields) -> Result<BookRead, ServiceError>;
    async fn delete(&self, id: i32) -> Result<(), ServiceError>;
}

/// Simple in-memory mock repository for tests
pub mod mock {
    use super::*;
    use crate::author::domain::AuthorRead;
    use std::collections::BTreeMap;
    use std::sync::{Mutex, PoisonError};

    #[derive(Default)]
    struct State {
        authors: BTreeMap<i32, AuthorRead>,
        books: BTreeMap<i32, BookFields>,
        next_id: i32,
    }

    impl State {
        fn read(&self, id: i32, fields: &BookFields) -> BookRead {
            BookRead {
                id,
                title: fields.title.clone(),
                date_published: fields.date_published,
                is_fiction: fields.is_fiction,
                author: self.authors.get(&fields.author_id).cloned(),
            }
        }

        fn check_author(&self, author_id: i32) -> Result<(), ServiceError> {
            if self.authors.contains_key(&author_id) {
                Ok(())
            } else {
                Err(ServiceError::Conflict(format!("author {author_id} does not exist")))
            }
        }
    }

    /// Emulates the store's foreign key: books may only reference known authors.
    #[derive(Default)]
    pub struct MockBookRepository {
        state: Mutex<State>,
    }

    impl MockBookRepository {
        pub fn with_author(self, author: AuthorRead) -> Self {
            self.state
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .authors
                .insert(author.id, author);
            self
        }
    }

    #[async_trait]
    impl BookRepository for MockBookRepository {
        async fn list(&self) -> Result<Vec<BookRead>, ServiceError> {
            let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            Ok(state.books.iter().map(|(id, f)| state.read(*id, f)).collect())
        }

        async fn get(&self, id: i32) -> Result<Option<BookRead>, ServiceError> {
            let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            Ok(state.books.get(&id).map(|f| state.read(id, f)))
        }

        async fn create(&self, fields: &BookFields) -> Result<BookRead, ServiceError> {
            let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            state.check_author(fields.author_id)?;
            state.next_id += 1;
            let id = state.next_id;
            state.books.insert(id, fields.clone());
            Ok(state.read(id, fields))
        }

        async fn update(&self, id: i32, fields: &BookFields) -> Result<BookRead, ServiceError> {
            let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            if !state.books.contains_key(&id) {
                return Err(ServiceError::not_found("book", id));
            }
            state.check_author(fields.author_id)?;
            state.books.insert(id, fields.clone());
            Ok(state.read(id, fields))
        }

        async fn delete(&self, id: i32) -> Result<(), ServiceError> {
            let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            state.books.remove(&id).map(|_| ()).ok_or_else(|| ServiceError::not_found("book", id))
        }
    }
}
