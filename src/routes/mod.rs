use axum::{
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::trace::TraceLayer;

use crate::middleware::request_id::{make_span_with_request_id, request_id_middleware};
use crate::state::AppState;

pub mod favorites;
pub mod movies;
pub mod recommendations;

/// Creates the application router with all routes
///
/// The request-id middleware is the outermost layer so the trace span of
/// every request carries the id.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", api_routes(state))
        .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
        .layer(axum::middleware::from_fn(request_id_middleware))
}

/// API routes under /api/v1
fn api_routes(state: AppState) -> Router {
    Router::new()
        .route("/recommendations", get(recommendations::recommend))
        .route("/movies", get(movies::browse))
        .route("/movies/filters", get(movies::filters))
        .route("/movies/:index/details", get(movies::details))
        .route(
            "/favorites",
            get(favorites::list)
                .post(favorites::add)
                .delete(favorites::clear),
        )
        .route("/favorites/:index", delete(favorites::remove))
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
