pub mod authors;
pub mod books;

use axum::{response::Redirect, routing::get, Json, Router};
use common::types::Health;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::openapi::ApiDoc;
use crate::state::ServerState;

#[utoipa::path(
    get, path = "/health", tag = "health",
    responses((status = 200, description = "Service is up", body = crate::openapi::HealthResponse))
)]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router: health, the author and book APIs, and the docs
/// (Swagger UI at `/docs`, also reachable from `/api-docs`).
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let api = Router::new()
        .route("/api/authors", get(authors::list).post(authors::create))
        .route(
            "/api/authors/:id",
            get(authors::get).put(authors::update).delete(authors::delete),
        )
        .route("/api/books", get(books::list).post(books::create))
        .route(
            "/api/books/:id",
            get(books::get).put(books::update).delete(books::delete),
        );

    Router::new()
        .route("/health", get(health))
        .merge(api)
        .merge(SwaggerUi::new("/docs").url("/docs.json", ApiDoc::openapi()))
        // older clients bookmarked the UI here
        .route("/api-docs", get(|| async { Redirect::permanent("/docs/") }))
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 5xx responses and transport failures
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
