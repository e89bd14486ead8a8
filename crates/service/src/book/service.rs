use std::sync::Arc;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use tracing::{info, instrument};

use super::domain::{BookFields, BookRead, BookWrite};
use super::repository::BookRepository;
use crate::errors::ServiceError;

/// Book use cases. Same shape as the author service plus date parsing on writes.
pub struct BookService<R: BookRepository + ?Sized = dyn BookRepository> {
    repo: Arc<R>,
}

impl<R: BookRepository + ?Sized> BookService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    pub async fn list_books(&self) -> Result<Vec<BookRead>, ServiceError> {
        self.repo.list().await
    }

    pub async fn get_book(&self, id: i32) -> Result<Option<BookRead>, ServiceError> {
        self.repo.get(id).await
    }

    #[instrument(skip(self, input), fields(author_id = input.author_id))]
    pub async fn create_book(&self, input: BookWrite) -> Result<BookRead, ServiceError> {
        let fields = into_fields(input)?;
        let created = self.repo.create(&fields).await?;
        info!(book_id = created.id, "book_created");
        Ok(created)
    }

    #[instrument(skip(self, input), fields(author_id = input.author_id))]
    pub async fn update_book(&self, input: BookWrite, id: i32) -> Result<BookRead, ServiceError> {
        let fields = into_fields(input)?;
        let updated = self.repo.update(id, &fields).await?;
        info!(book_id = id, "book_updated");
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete_book(&self, id: i32) -> Result<(), ServiceError> {
        self.repo.delete(id).await?;
        info!(book_id = id, "book_deleted");
        Ok(())
    }
}

fn into_fields(input: BookWrite) -> Result<BookFields, ServiceError> {
    Ok(BookFields {
        date_published: parse_date_published(&input.date_published)?,
        title: input.title,
        author_id: input.author_id,
        is_fiction: input.is_fiction,
    })
}

/// Accepts `YYYY-MM-DD`, US-style `M/D/YYYY`, an RFC 3339 timestamp (taken in UTC)
/// or a local `YYYY-MM-DDTHH:MM:SS[.fff]`; the time of day is dropped.
pub fn parse_date_published(raw: &str) -> Result<NaiveDate, ServiceError> {
    let s = raw.trim();
    if let Some(d) = ["%Y-%m-%d", "%m/%d/%Y"]
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
    {
        return Ok(d);
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
        return Ok(ts.with_timezone(&Utc).date_naive());
    }
    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|dt| dt.date())
        .ok_or_else(|| ServiceError::InvalidDate(raw.to_string()))
}
