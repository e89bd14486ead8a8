//! Create `book` table with FK to `author`.
//!
//! Deleting an author that still owns books is refused by the store (NO ACTION);
//! SQLite and Postgres both report that as a plain foreign key violation.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Book::Table)
                    .if_not_exists()
                    .col(pk_auto(Book::Id))
                    .col(string(Book::Title).not_null())
                    .col(boolean(Book::IsFiction).not_null())
                    .col(date(Book::DatePublished).not_null())
                    .col(integer(Book::AuthorId).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_book_author")
                            .from(Book::Table, Book::AuthorId)
                            .to(Author::Table, Author::Id)
                            .on_delete(ForeignKeyAction::NoAction)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_book_author_id")
                    .table(Book::Table)
                    .col(Book::AuthorId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Book::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Book { Table, Id, Title, IsFiction, DatePublished, AuthorId }

#[derive(DeriveIden)]
enum Author { Table, Id }
