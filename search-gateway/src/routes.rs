//! Route configuration.

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers;
use crate::state::AppState;

/// Creates all gateway routes.
///
/// # Routes
///
/// - `POST /` - Catalog search with configured credentials
/// - `POST /load-data` - Upload and index a JSON array of records
/// - `GET /search` - Single-field match query
/// - `GET /health` - Health check
pub fn create_routes(state: AppState) -> Router {
    Router::new()
        .route("/", post(handlers::catalog_handler))
        .route("/load-data", post(handlers::load_data_handler))
        .route("/search", get(handlers::search_handler))
        .route("/health", get(handlers::health_handler))
        .with_state(state)
}
