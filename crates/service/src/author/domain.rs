use serde::{Deserialize, Serialize};

/// Read view of an author, shared by every read and write-return path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorRead {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
}

impl From<models::author::Model> for AuthorRead {
    fn from(m: models::author::Model) -> Self {
        Self { id: m.id, first_name: m.first_name, last_name: m.last_name }
    }
}

/// Full replacement payload for create and update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorWrite {
    pub first_name: String,
    pub last_name: String,
}
