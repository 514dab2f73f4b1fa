//! Axum route handlers for the Resume API.

use axum::{
    extract::{Multipart, Path, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse},
    Json,
};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::models::resume::ResumeRow;
use crate::review::uploads::store_temp_file;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub id: i64,
    pub feedback_text: Option<String>,
    pub download_url: String,
}

#[derive(Debug, Serialize)]
pub struct ResumeDetailResponse {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub original_filename: String,
    pub job_title: String,
    /// "processing" until the upload workflow has written its results.
    pub status: &'static str,
    pub feedback_text: Option<String>,
    pub download_url: Option<String>,
}

impl From<ResumeRow> for ResumeDetailResponse {
    fn from(row: ResumeRow) -> Self {
        let processed = row.is_processed();
        Self {
            id: row.id,
            created_at: row.created_at,
            status: if processed { "complete" } else { "processing" },
            download_url: processed.then(|| download_url(row.id)),
            original_filename: row.original_filename,
            job_title: row.job_title,
            feedback_text: row.feedback_text,
        }
    }
}

fn download_url(id: i64) -> String {
    format!("/api/v1/resumes/{id}/download")
}

struct UploadForm {
    filename: String,
    bytes: Bytes,
    job_title: String,
}

async fn read_upload_form(mut multipart: Multipart) -> Result<UploadForm, AppError> {
    let mut file: Option<(String, Bytes)> = None;
    let mut job_title: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                let filename = field
                    .file_name()
                    .map(str::to_string)
                    .filter(|f| !f.trim().is_empty())
                    .ok_or_else(|| AppError::Validation("file must have a filename".to_string()))?;
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read file: {e}")))?;
                file = Some((filename, bytes));
            }
            Some("job_title") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read job_title: {e}")))?;
                job_title = Some(text);
            }
            _ => {}
        }
    }

    let (filename, bytes) =
        file.ok_or_else(|| AppError::Validation("file is required".to_string()))?;
    if bytes.is_empty() {
        return Err(AppError::Validation("file cannot be empty".to_string()));
    }
    let job_title = job_title
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::Validation("job_title cannot be empty".to_string()))?;

    Ok(UploadForm {
        filename,
        bytes,
        job_title,
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/resumes
///
/// Multipart fields: `file` (the resume) and `job_title`.
/// Runs the whole review pipeline before responding.
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<UploadResponse>), AppError> {
    let form = read_upload_form(multipart).await?;
    info!(
        "Received {:?} ({} bytes) for role {:?}",
        form.filename,
        form.bytes.len(),
        form.job_title
    );

    let temp = store_temp_file(&state.config.upload_dir, &form.filename, form.bytes.clone())
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to store upload: {e}")))?;

    let row = state
        .resumes
        .upload(temp.path(), &form.filename, &form.job_title)
        .await?;
    drop(temp);

    Ok((
        StatusCode::CREATED,
        Json(UploadResponse {
            id: row.id,
            feedback_text: row.feedback_text,
            download_url: download_url(row.id),
        }),
    ))
}

/// GET /api/v1/resumes/:id
pub async fn handle_get_resume(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ResumeDetailResponse>, AppError> {
    let row = find_resume(&state, id).await?;
    Ok(Json(row.into()))
}

/// GET /api/v1/resumes/:id/revised
///
/// The revised HTML exactly as the reviewer produced it.
pub async fn handle_get_revised_html(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Html<String>, AppError> {
    let row = find_resume(&state, id).await?;
    match row.revised_html {
        Some(html) if row.result_pdf_path.is_some() => Ok(Html(html)),
        _ => Err(AppError::NotFound(format!("Resume {id} has no revision yet"))),
    }
}

/// GET /api/v1/resumes/:id/download
///
/// Streams the rendered PDF as an attachment.
pub async fn handle_download_pdf(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let row = find_resume(&state, id).await?;
    let pdf_path = row
        .result_pdf_path
        .ok_or_else(|| AppError::NotFound(format!("Resume {id} has no revision yet")))?;

    let bytes = match tokio::fs::read(&pdf_path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(AppError::NotFound(format!("PDF for resume {id} is missing")));
        }
        Err(e) => {
            return Err(AppError::Internal(anyhow::anyhow!(
                "Failed to read {pdf_path}: {e}"
            )))
        }
    };

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{id}_revised.pdf\""),
            ),
        ],
        bytes,
    ))
}

async fn find_resume(state: &AppState, id: i64) -> Result<ResumeRow, AppError> {
    state
        .resumes
        .get_resume(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Resume {id} not found")))
}
