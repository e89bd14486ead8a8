//! Entities and connection factory for the bookshelf store.

pub mod db;
pub mod author;
pub mod book;
