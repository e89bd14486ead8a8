use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use service::book::domain::{BookRead, BookWrite};

use crate::errors::ApiError;
use crate::state::ServerState;
use crate::validation::{parse_id, Validated};

fn not_found(raw: &str) -> ApiError {
    ApiError::NotFound(format!("book {raw} could not be found"))
}

#[utoipa::path(
    get, path = "/api/books", tag = "books",
    responses(
        (status = 200, description = "Every book with its author", body = [crate::openapi::BookDoc]),
        (status = 500, description = "Store failure", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<BookRead>>, ApiError> {
    Ok(Json(state.books.list_books().await?))
}

#[utoipa::path(
    get, path = "/api/books/{id}", tag = "books",
    params(("id" = i32, Path, description = "Book id")),
    responses(
        (status = 200, description = "The book with its author", body = crate::openapi::BookDoc),
        (status = 404, description = "No such book", body = crate::openapi::ErrorDoc),
        (status = 500, description = "Store failure", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn get(State(state): State<ServerState>, Path(raw): Path<String>) -> Result<Json<BookRead>, ApiError> {
    let id = parse_id(&raw).ok_or_else(|| not_found(&raw))?;
    state.books.get_book(id).await?.map(Json).ok_or_else(|| not_found(&raw))
}

#[utoipa::path(
    post, path = "/api/books", tag = "books",
    request_body = crate::openapi::BookWriteDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::BookDoc),
        (status = 400, description = "Invalid body or datePublished", body = crate::openapi::ValidationErrorDoc),
        (status = 409, description = "authorId references no author", body = crate::openapi::ErrorDoc),
        (status = 500, description = "Store failure", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    Validated(input): Validated<BookWrite>,
) -> Result<(StatusCode, Json<BookRead>), ApiError> {
    let created = state.books.create_book(input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    put, path = "/api/books/{id}", tag = "books",
    params(("id" = i32, Path, description = "Book id")),
    request_body = crate::openapi::BookWriteDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::BookDoc),
        (status = 400, description = "Invalid body or datePublished", body = crate::openapi::ValidationErrorDoc),
        (status = 404, description = "No such book", body = crate::openapi::ErrorDoc),
        (status = 409, description = "authorId references no author", body = crate::openapi::ErrorDoc),
        (status = 500, description = "Store failure", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    Path(raw): Path<String>,
    Validated(input): Validated<BookWrite>,
) -> Result<Json<BookRead>, ApiError> {
    let id = parse_id(&raw).ok_or_else(|| not_found(&raw))?;
    Ok(Json(state.books.update_book(input, id).await?))
}

#[utoipa::path(
    delete, path = "/api/books/{id}", tag = "books",
    params(("id" = i32, Path, description = "Book id")),
    responses(
        (status = 200, description = "Deleted; body is the string \"book was deleted\"", body = String),
        (status = 404, description = "No such book", body = crate::openapi::ErrorDoc),
        (status = 500, description = "Store failure", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn delete(
    State(state): State<ServerState>,
    Path(raw): Path<String>,
) -> Result<Json<&'static str>, ApiError> {
    let id = parse_id(&raw).ok_or_else(|| not_found(&raw))?;
    state.books.delete_book(id).await?;
    Ok(Json("book was deleted"))
}
