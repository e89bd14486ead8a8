use serde::Serialize;
use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthorDoc { pub id: i32, pub first_name: String, pub last_name: String }

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthorWriteDoc { pub first_name: String, pub last_name: String }

/// A book as returned by every read and write endpoint.
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookDoc {
    pub id: i32,
    pub title: String,
    pub date_published: chrono::NaiveDate,
    pub is_fiction: bool,
    pub author: Option<AuthorDoc>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookWriteDoc {
    pub title: String,
    pub author_id: i32,
    /// `YYYY-MM-DD` or an RFC 3339 timestamp.
    #[schema(example = "2023-01-02")]
    pub date_published: String,
    pub is_fiction: bool,
}

#[derive(Serialize, ToSchema)]
pub struct FieldErrorDoc {
    #[serde(rename = "type")]
    #[schema(example = "field")]
    pub kind: String,
    #[schema(value_type = Option<Object>)]
    pub value: Option<serde_json::Value>,
    #[schema(example = "Invalid value")]
    pub msg: String,
    #[schema(example = "title")]
    pub path: String,
    #[schema(example = "body")]
    pub location: String,
}

#[derive(ToSchema)]
pub struct ValidationErrorDoc { pub errors: Vec<FieldErrorDoc> }

#[derive(ToSchema)]
pub struct ErrorDoc {
    #[schema(example = "Not Found")]
    pub error: String,
    pub message: String,
}

#[derive(OpenApi)]
#[openapi(
    info(title = "bookshelf", description = "Authors and their books"),
    paths(
        crate::routes::health,
        crate::routes::authors::list,
        crate::routes::authors::get,
        crate::routes::authors::create,
        crate::routes::authors::update,
        crate::routes::authors::delete,
        crate::routes::books::list,
        crate::routes::books::get,
        crate::routes::books::create,
        crate::routes::books::update,
        crate::routes::books::delete,
    ),
    components(
        schemas(
            HealthResponse,
            AuthorDoc,
            AuthorWriteDoc,
            BookDoc,
            BookWriteDoc,
            FieldErrorDoc,
            ValidationErrorDoc,
            ErrorDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "authors"),
        (name = "books")
    )
)]
pub struct ApiDoc;
