use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use service::author::domain::{AuthorRead, AuthorWrite};

use crate::errors::ApiError;
use crate::state::ServerState;
use crate::validation::{parse_id, Validated};

fn not_found(raw: &str) -> ApiError {
    ApiError::NotFound(format!("author {raw} could not be found"))
}

#[utoipa::path(
    get, path = "/api/authors", tag = "authors",
    responses(
        (status = 200, description = "Every author", body = [crate::openapi::AuthorDoc]),
        (status = 500, description = "Store failure", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<AuthorRead>>, ApiError> {
    Ok(Json(state.authors.list_authors().await?))
}

#[utoipa::path(
    get, path = "/api/authors/{id}", tag = "authors",
    params(("id" = i32, Path, description = "Author id")),
    responses(
        (status = 200, description = "The author", body = crate::openapi::AuthorDoc),
        (status = 404, description = "No such author", body = crate::openapi::ErrorDoc),
        (status = 500, description = "Store failure", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn get(State(state): State<ServerState>, Path(raw): Path<String>) -> Result<Json<AuthorRead>, ApiError> {
    let id = parse_id(&raw).ok_or_else(|| not_found(&raw))?;
    state.authors.get_author(id).await?.map(Json).ok_or_else(|| not_found(&raw))
}

#[utoipa::path(
    post, path = "/api/authors", tag = "authors",
    request_body = crate::openapi::AuthorWriteDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::AuthorDoc),
        (status = 400, description = "Invalid body", body = crate::openapi::ValidationErrorDoc),
        (status = 500, description = "Store failure", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    Validated(input): Validated<AuthorWrite>,
) -> Result<(StatusCode, Json<AuthorRead>), ApiError> {
    let created = state.authors.create_author(input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    put, path = "/api/authors/{id}", tag = "authors",
    params(("id" = i32, Path, description = "Author id")),
    request_body = crate::openapi::AuthorWriteDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::AuthorDoc),
        (status = 400, description = "Invalid body", body = crate::openapi::ValidationErrorDoc),
        (status = 404, description = "No such author", body = crate::openapi::ErrorDoc),
        (status = 500, description = "Store failure", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    Path(raw): Path<String>,
    Validated(input): Validated<AuthorWrite>,
) -> Result<Json<AuthorRead>, ApiError> {
    let id = parse_id(&raw).ok_or_else(|| not_found(&raw))?;
    Ok(Json(state.authors.update_author(input, id).await?))
}

#[utoipa::path(
    delete, path = "/api/authors/{id}", tag = "authors",
    params(("id" = i32, Path, description = "Author id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "No such author", body = crate::openapi::ErrorDoc),
        (status = 409, description = "Author still owns books", body = crate::openapi::ErrorDoc),
        (status = 500, description = "Store failure", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn delete(State(state): State<ServerState>, Path(raw): Path<String>) -> Result<StatusCode, ApiError> {
    let id = parse_id(&raw).ok_or_else(|| not_found(&raw))?;
    state.authors.delete_author(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
