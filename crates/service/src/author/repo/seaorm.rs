use sea_orm::{ActiveModelTrait, ActiveValue::{Set, Unchanged}, DatabaseConnection, EntityTrait, QueryOrder};

use models::author;

use crate::author::domain::{AuthorRead, AuthorWrite};
use crate::author::repository::AuthorRepository;
use crate::errors::ServiceError;

pub struct SeaOrmAuthorRepository {
    pub db: DatabaseConnection,
}

#[async_trait::async_trait]
impl AuthorRepository for SeaOrmAuthorRepository {
    async fn list(&self) -> Result<Vec<AuthorRead>, ServiceError> {
        let rows = author::Entity::find()
            .order_by_asc(author::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| ServiceError::from_db("author", None, e))?;
        Ok(rows.into_iter().map(AuthorRead::from).collect())
    }

    async fn get(&self, id: i32) -> Result<Option<AuthorRead>, ServiceError> {
        let found = author::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ServiceError::from_db("author", Some(id), e))?;
        Ok(found.map(AuthorRead::from))
    }

    async fn create(&self, input: &AuthorWrite) -> Result<AuthorRead, ServiceError> {
        let am = author::ActiveModel {
            first_name: Set(input.first_name.clone()),
            last_name: Set(input.last_name.clone()),
            ..Default::default()
        };
        let created = am.insert(&self.db).await.map_err(|e| ServiceError::from_db("author", None, e))?;
        Ok(created.into())
    }

    async fn update(&self, id: i32, input: &AuthorWrite) -> Result<AuthorRead, ServiceError> {
        let am = author::ActiveModel {
            id: Unchanged(id),
            first_name: Set(input.first_name.clone()),
            last_name: Set(input.last_name.clone()),
        };
        let updated = am.update(&self.db).await.map_err(|e| ServiceError::from_db("author", Some(id), e))?;
        Ok(updated.into())
    }

    async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        let res = author::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| ServiceError::from_db("author", Some(id), e))?;
        if res.rows_affected == 0 {
            return Err(ServiceError::not_found("author", id));
        }
        Ok(())
    }
}
