use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("invalid datePublished `{0}`: expected YYYY-MM-DD or an RFC 3339 timestamp")]
    InvalidDate(String),
    #[error("{0}")]
    NotFound(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("database error: {0}")]
    Db(String),
}

impl ServiceError {
    pub fn not_found(entity: &str, id: i32) -> Self {
        Self::NotFound(format!("{entity} {id} could not be found"))
    }

    /// Classify a store error raised while touching `entity` #`id`.
    pub fn from_db(entity: &str, id: Option<i32>, err: DbErr) -> Self {
        if let Some(SqlErr::ForeignKeyConstraintViolation(msg)) = err.sql_err() {
            return Self::Conflict(format!("{entity} violates a foreign key constraint: {msg}"));
        }
        match (err, id) {
            (DbErr::RecordNotUpdated, Some(id)) => Self::not_found(entity, id),
            (DbErr::RecordNotFound(msg), _) => Self::NotFound(msg),
            (other, _) => Self::Db(other.to_string()),
        }
    }
}
