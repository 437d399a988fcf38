//! Match query endpoint handler.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use search_gateway_repository::{Credentials, SearchIndexClient};
use search_gateway_shared::{MatchQuery, MatchResult};
use serde::Deserialize;
use tracing::instrument;

use super::required;
use crate::error::ApiResult;
use crate::state::AppState;

/// Query string of `GET /search`.
///
/// Every parameter is optional at the extractor level so that a missing one
/// is answered with the gateway's own error body.
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub cloud_id: Option<String>,
    pub api_key: Option<String>,
    pub index_name: Option<String>,
    /// Field to match on.
    pub keyword: Option<String>,
    /// Value to match.
    pub mname: Option<String>,
}

/// Handler for single-field match queries.
///
/// # HTTP Request
///
/// `GET /search?cloud_id=..&api_key=..&index_name=..&keyword=<field>&mname=<value>`
///
/// # Response
///
/// - `200 OK` - `{"status":"found",...}` or `{"status":"empty"}`
/// - `400 Bad Request` - Missing or blank parameter, unknown field, malformed credentials
/// - `401 Unauthorized` - Credentials rejected by the engine
/// - `500 Internal Server Error` - Engine unreachable or failing
#[instrument(skip_all, fields(index, field))]
pub async fn search_handler(
    State(state): State<AppState>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> ApiResult<Json<MatchResult>> {
    let Query(params) = params?;

    let cloud_id = required(params.cloud_id, "cloud_id")?;
    let api_key = required(params.api_key, "api_key")?;
    let index_name = required(params.index_name, "index_name")?;
    let field = required(params.keyword, "keyword")?;
    let value = required(params.mname, "mname")?;

    let span = tracing::Span::current();
    span.record("index", index_name.as_str());
    span.record("field", field.as_str());

    let engine = state
        .connector()
        .connect(&Credentials::new(cloud_id, api_key))
        .await?;

    let result = SearchIndexClient::with_config(engine, state.search_config())
        .find(&index_name, &MatchQuery::new(field, value))
        .await?;

    Ok(Json(result))
}
