//! Upload ingest endpoint handler.

use axum::{
    extract::{multipart::{Field, MultipartRejection}, Multipart, State},
    Json,
};
use search_gateway_ingest::{read_records, BatchLoader};
use search_gateway_repository::{Credentials, SearchIndexClient};
use serde::Serialize;
use tempfile::NamedTempFile;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, instrument};

use super::required;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Body of a successful upload.
#[derive(Debug, Serialize)]
pub struct LoadDataResponse {
    /// Human readable confirmation.
    pub message: String,
    /// Index the records were written to.
    pub index: String,
    /// Number of records submitted.
    pub total: usize,
    /// Number of records the engine accepted.
    pub succeeded: usize,
    /// Number of records the engine rejected.
    pub failed: usize,
}

/// An uploaded file staged on local disk.
///
/// The file is removed when this value is dropped.
struct StagedUpload {
    file_name: String,
    file: NamedTempFile,
}

#[derive(Default)]
struct LoadDataForm {
    upload: Option<StagedUpload>,
    cloud_id: Option<String>,
    api_key: Option<String>,
    index_name: Option<String>,
}

/// Handler for uploading a JSON array of car records.
///
/// # HTTP Request
///
/// `POST /load-data` (multipart: `file`, `cloud_id`, `api_key`, `index_name`)
///
/// The upload is parsed before the engine is contacted, so a malformed file
/// indexes nothing. Then the index is provisioned and every record is
/// submitted in one bulk request.
///
/// # Response
///
/// - `200 OK` - Upload indexed, with per-record counts
/// - `400 Bad Request` - Missing field, malformed upload or credentials
/// - `401 Unauthorized` - Credentials rejected by the engine
/// - `500 Internal Server Error` - Engine unreachable or failing
#[instrument(skip_all)]
pub async fn load_data_handler(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<Json<LoadDataResponse>> {
    let mut multipart = multipart?;
    let mut form = LoadDataForm::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => form.upload = Some(stage_upload(&state, field).await?),
            Some("cloud_id") => form.cloud_id = Some(field.text().await?),
            Some("api_key") => form.api_key = Some(field.text().await?),
            Some("index_name") => form.index_name = Some(field.text().await?),
            other => debug!(field = ?other, "Ignoring unexpected form field"),
        }
    }

    let upload = form.upload.ok_or(ApiError::MissingField("file"))?;
    let cloud_id = required(form.cloud_id, "cloud_id")?;
    let api_key = required(form.api_key, "api_key")?;
    let index_name = required(form.index_name, "index_name")?;

    let records = read_records(upload.file.path()).await?;
    debug!(
        file_name = %upload.file_name,
        records = records.len(),
        "Parsed upload"
    );

    let engine = state
        .connector()
        .connect(&Credentials::new(cloud_id, api_key))
        .await?;

    SearchIndexClient::new(engine.clone())
        .ensure_index(&index_name)
        .await;

    let report = BatchLoader::new(engine).load(&index_name, &records).await?;

    info!(
        file_name = %upload.file_name,
        index = %index_name,
        succeeded = report.succeeded,
        failed = report.failed,
        "Upload indexed"
    );

    Ok(Json(LoadDataResponse {
        message: format!("Data from '{}' indexed successfully!", upload.file_name),
        index: index_name,
        total: report.total,
        succeeded: report.succeeded,
        failed: report.failed,
    }))
}

/// Stream a file field into a scoped temporary file.
async fn stage_upload(state: &AppState, mut field: Field<'_>) -> ApiResult<StagedUpload> {
    let file_name = field
        .file_name()
        .filter(|name| !name.is_empty())
        .unwrap_or("upload.json")
        .to_string();

    let mut builder = tempfile::Builder::new();
    builder.prefix("upload-").suffix(".json");
    let file = match &state.config().upload_dir {
        Some(dir) => builder.tempfile_in(dir)?,
        None => builder.tempfile()?,
    };

    let mut out = tokio::fs::File::from_std(file.reopen()?);
    let mut written = 0usize;
    while let Some(chunk) = field.chunk().await? {
        written += chunk.len();
        out.write_all(&chunk).await?;
    }
    out.flush().await?;

    debug!(file_name = %file_name, bytes = written, path = %file.path().display(), "Staged upload");

    Ok(StagedUpload { file_name, file })
}
