use std::sync::Arc;

use sea_orm::DatabaseConnection;
use service::author::repo::seaorm::SeaOrmAuthorRepository;
use service::author::repository::AuthorRepository;
use service::author::AuthorService;
use service::book::repo::seaorm::SeaOrmBookRepository;
use service::book::repository::BookRepository;
use service::book::BookService;

/// Shared by every handler; holds no per-request data.
#[derive(Clone)]
pub struct ServerState {
    pub authors: Arc<AuthorService>,
    pub books: Arc<BookService>,
}

impl ServerState {
    pub fn new(authors: Arc<dyn AuthorRepository>, books: Arc<dyn BookRepository>) -> Self {
        Self {
            authors: Arc::new(AuthorService::new(authors)),
            books: Arc::new(BookService::new(books)),
        }
    }

    pub fn from_db(db: DatabaseConnection) -> Self {
        Self::new(
            Arc::new(SeaOrmAuthorRepository { db: db.clone() }),
            Arc::new(SeaOrmBookRepository { db }),
        )
    }
}
