//! Catalog search endpoint handler.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use search_gateway_ingest::BatchLoader;
use search_gateway_repository::SearchIndexClient;
use search_gateway_shared::{MatchQuery, MatchResult};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Term searched when the request carries a blank one.
pub const DEFAULT_SEARCH_TERM: &str = "default-car";

/// Body of `POST /`.
#[derive(Debug, Deserialize)]
pub struct CatalogRequest {
    #[serde(rename = "searchTerm")]
    pub search_term: Option<String>,
}

/// Body of a successful catalog search.
#[derive(Debug, Serialize)]
pub struct CatalogResponse {
    pub result: MatchResult,
}

/// Handler for searching the configured car catalog.
///
/// # HTTP Request
///
/// `POST /` with `{"searchTerm": "<name>"}`
///
/// Uses the catalog credentials from configuration. Each call provisions the
/// catalog index, loads the configured data file into it and then matches
/// the term against the catalog field.
///
/// # Response
///
/// - `200 OK` - `{"result": <MatchResult>}`
/// - `400 Bad Request` - Body is not JSON or lacks `searchTerm`
/// - `500 Internal Server Error` - Credentials not configured, data file
///   unreadable, or engine failure
#[instrument(skip_all)]
pub async fn catalog_handler(
    State(state): State<AppState>,
    body: Result<Json<CatalogRequest>, JsonRejection>,
) -> ApiResult<Json<CatalogResponse>> {
    let Json(request) = body?;
    let term = request
        .search_term
        .ok_or_else(|| ApiError::invalid("Invalid request, 'searchTerm' is required"))?;

    let term = match term.trim() {
        "" => DEFAULT_SEARCH_TERM.to_string(),
        trimmed => trimmed.to_string(),
    };
    info!(term = %term, "Catalog search requested");

    let config = state.config();
    let credentials = config
        .catalog_credentials()
        .ok_or_else(|| ApiError::configuration("catalog credentials are not configured"))?;

    let engine = state.connector().connect(&credentials).await?;
    let client = SearchIndexClient::with_config(engine.clone(), state.search_config());

    client.ensure_index(&config.catalog_index).await;

    BatchLoader::new(engine)
        .load_file(&config.catalog_index, &config.catalog_data_file)
        .await?;

    let result = client
        .find(
            &config.catalog_index,
            &MatchQuery::new(config.catalog_field.as_str(), term),
        )
        .await?;

    Ok(Json(CatalogResponse { result }))
}
