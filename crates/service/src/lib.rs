//! Service layer: read views, repositories and the author/book use cases.
//! - Repositories hide sea-orm behind one trait per entity.
//! - Services own input shaping (date parsing) and logging.
//! - Every read path returns the entity's read view, never a raw row.

pub mod errors;
pub mod author;
pub mod book;
pub mod seed;
#[cfg(test)]
pub mod test_support;
