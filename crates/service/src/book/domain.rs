use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::author::domain::AuthorRead;

/// Read view of a book with its author embedded.
///
/// `author` is `None` only when the join finds no author row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookRead {
    pub id: i32,
    pub title: String,
    pub date_published: NaiveDate,
    pub is_fiction: bool,
    pub author: Option<AuthorRead>,
}

impl BookRead {
    pub fn from_row(book: models::book::Model, author: Option<models::author::Model>) -> Self {
        Self {
            id: book.id,
            title: book.title,
            date_published: book.date_published,
            is_fiction: book.is_fiction,
            author: author.map(AuthorRead::from),
        }
    }
}

/// Full replacement payload as received; `date_published` is still unparsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookWrite {
    pub title: String,
    pub author_id: i32,
    pub date_published: String,
    pub is_fiction: bool,
}

/// Column values handed to the repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookFields {
    pub title: String,
    pub author_id: i32,
    pub date_published: NaiveDate,
    pub is_fiction: bool,
}
