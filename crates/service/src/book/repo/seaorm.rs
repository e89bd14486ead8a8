use sea_orm::{
    ActiveModelTrait,
    ActiveValue::{Set, Unchanged},
    DatabaseConnection, EntityTrait, QueryOrder,
};

use models::{author, book};

use crate::book::domain::{BookFields, BookRead};
use crate::book::repository::BookRepository;
use crate::errors::ServiceError;

pub struct SeaOrmBookRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmBookRepository {
    /// Re-read a row that was just written so callers get the joined projection.
    async fn read_back(&self, id: i32) -> Result<BookRead, ServiceError> {
        self.get(id).await?.ok_or_else(|| ServiceError::not_found("book", id))
    }
}

#[async_trait::async_trait]
impl BookRepository for SeaOrmBookRepository {
    async fn list(&self) -> Result<Vec<BookRead>, ServiceError> {
        let rows = book::Entity::find()
            .find_also_related(author::Entity)
            .order_by_asc(book::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| ServiceError::from_db("book", None, e))?;
        Ok(rows.into_iter().map(|(b, a)| BookRead::from_row(b, a)).collect())
    }

    async fn get(&self, id: i32) -> Result<Option<BookRead>, ServiceError> {
        let found = book::Entity::find_by_id(id)
            .find_also_related(author::Entity)
            .one(&self.db)
            .await
            .map_err(|e| ServiceError::from_db("book", Some(id), e))?;
        Ok(found.map(|(b, a)| BookRead::from_row(b, a)))
    }

    async fn create(&self, fields: &BookFields) -> Result<BookRead, ServiceError> {
        let am = book::ActiveModel {
            title: Set(fields.title.clone()),
            is_fiction: Set(fields.is_fiction),
            date_published: Set(fields.date_published),
            author_id: Set(fields.author_id),
            ..Default::default()
        };
        let created = am.insert(&self.db).await.map_err(|e| ServiceError::from_db("book", None, e))?;
        self.read_back(created.id).await
    }

    async fn update(&self, id: i32, fields: &BookFields) -> Result<BookRead, ServiceError> {
        let am = book::ActiveModel {
            id: Unchanged(id),
            title: Set(fields.title.clone()),
            is_fiction: Set(fields.is_fiction),
            date_published: Set(fields.date_published),
            author_id: Set(fields.author_id),
        };
        am.update(&self.db).await.map_err(|e| ServiceError::from_db("book", Some(id), e))?;
        self.read_back(id).await
    }

    async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        let res = book::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| ServiceError::from_db("book", Some(id), e))?;
        if res.rows_affected == 0 {
            return Err(ServiceError::not_found("book", id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::author::domain::AuthorWrite;
    use crate::author::repo::seaorm::SeaOrmAuthorRepository;
    use crate::author::repository::AuthorRepository;
    use crate::test_support::get_db;
    use chrono::NaiveDate;

    fn fields(author_id: i32, title: &str) -> BookFields {
        BookFields {
            title: title.into(),
            author_id,
            date_published: NaiveDate::from_ymd_opt(2023, 1, 2).unwrap(),
            is_fiction: false,
        }
    }

    #[tokio::test]
    async fn book_reads_embed_the_author() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let authors = SeaOrmAuthorRepository { db: db.clone() };
        let books = SeaOrmBookRepository { db };

        let harari = authors
            .create(&AuthorWrite { first_name: "Yuval Noah".into(), last_name: "Harari".into() })
            .await?;
        let created = books.create(&fields(harari.id, "sapien")).await?;
        assert_eq!(created.author.as_ref(), Some(&harari));
        assert_eq!(created.date_published, NaiveDate::from_ymd_opt(2023, 1, 2).unwrap());

        let listed = books.list().await?;
        assert_eq!(listed, vec![created.clone()]);

        let mut changed = fields(harari.id, "homo deus");
        changed.is_fiction = true;
        let updated = books.update(created.id, &changed).await?;
        assert_eq!(updated.title, "homo deus");
        assert!(updated.is_fiction);
        assert_eq!(updated.author.map(|a| a.last_name), Some("Harari".to_string()));
        Ok(())
    }

    #[tokio::test]
    async fn unknown_author_is_a_conflict() -> Result<(), anyhow::Error> {
        let books = SeaOrmBookRepository { db: get_db().await? };
        let err = books.create(&fields(404, "orphan")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)), "got {err:?}");
        Ok(())
    }

    #[tokio::test]
    async fn author_with_books_is_protected() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let authors = SeaOrmAuthorRepository { db: db.clone() };
        let books = SeaOrmBookRepository { db };

        let owner = authors
            .create(&AuthorWrite { first_name: "jon".into(), last_name: "doe".into() })
            .await?;
        let book = books.create(&fields(owner.id, "the ugly duckling")).await?;

        let err = authors.delete(owner.id).await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)), "got {err:?}");

        books.delete(book.id).await?;
        authors.delete(owner.id).await?;
        Ok(())
    }

    #[tokio::test]
    async fn missing_book_is_not_found() -> Result<(), anyhow::Error> {
        let books = SeaOrmBookRepository { db: get_db().await? };
        assert!(books.get(1).await?.is_none());
        let err = books.update(1, &fields(1, "ghost")).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)), "got {err:?}");
        let err = books.delete(1).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)), "got {err:?}");
        Ok(())
    }
}
