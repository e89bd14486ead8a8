//! Demo data for a fresh database.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use sea_orm::DatabaseConnection;
use tracing::info;

use crate::author::domain::AuthorWrite;
use crate::author::repo::seaorm::SeaOrmAuthorRepository;
use crate::author::repository::AuthorRepository;
use crate::author::AuthorService;
use crate::book::domain::BookWrite;
use crate::book::repo::seaorm::SeaOrmBookRepository;
use crate::book::repository::BookRepository;
use crate::book::BookService;
use crate::errors::ServiceError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub authors: usize,
    pub books: usize,
}

const AUTHORS: [(&str, &str); 3] = [("jon", "doe"), ("william", "shakes"), ("Yuval Noah", "Harari")];

const BOOKS: [(&str, bool); 4] = [
    ("sapien", false),
    ("homo deus", false),
    ("the ugly duckling", true),
    ("whas up bitches", true),
];

pub async fn run(db: &DatabaseConnection) -> Result<SeedReport, ServiceError> {
    let authors = AuthorService::new(Arc::new(SeaOrmAuthorRepository { db: db.clone() }));
    let books = BookService::new(Arc::new(SeaOrmBookRepository { db: db.clone() }));
    seed_with(&authors, &books, Utc::now().date_naive()).await
}

/// Every book goes to the last author created.
pub async fn seed_with<A, B>(
    authors: &AuthorService<A>,
    books: &BookService<B>,
    published: NaiveDate,
) -> Result<SeedReport, ServiceError>
where
    A: AuthorRepository + ?Sized,
    B: BookRepository + ?Sized,
{
    let mut owner = None;
    for (first, last) in AUTHORS {
        let created = authors
            .create_author(AuthorWrite { first_name: first.into(), last_name: last.into() })
            .await?;
        owner = Some(created.id);
    }
    let owner = owner.ok_or_else(|| ServiceError::Db("no author to own the seeded books".into()))?;

    for (title, is_fiction) in BOOKS {
        books
            .create_book(BookWrite {
                title: title.into(),
                author_id: owner,
                date_published: published.format("%Y-%m-%d").to_string(),
                is_fiction,
            })
            .await?;
    }

    let report = SeedReport { authors: AUTHORS.len(), books: BOOKS.len() };
    info!(authors = report.authors, books = report.books, "seed_completed");
    Ok(report)
}
