//! Upload workflow — drives one resume from an uploaded file to a fully processed record.
//!
//! Flow: create placeholder → extract HTML → LLM review → parse → render PDF →
//!       single update of all AI-derived fields → return the record.
//!
//! Steps run strictly in order. Nothing is retried and nothing is rolled back:
//! when a step after the first fails, the placeholder row stays in the store in
//! its unprocessed state and the collaborator's error is returned unchanged.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};

use crate::models::resume::{NewResume, ResumeRow, ResumeUpdate};
use crate::review::extractor::{DocumentExtractor, ExtractionError};
use crate::review::feedback::{AiServiceError, FeedbackGenerator};
use crate::review::parser::parse_ai_response;
use crate::review::renderer::{PdfRenderer, RenderError};
use crate::review::store::{ResumeStore, StoreError};

const REVISED_PDF_SUFFIX: &str = "_revised.pdf";

#[derive(Debug, Error)]
pub enum UploadError {
    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error(transparent)]
    AiService(#[from] AiServiceError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Resume {0} disappeared before its results could be saved")]
    RecordVanished(i64),
}

pub struct ResumeService {
    store: Arc<dyn ResumeStore>,
    extractor: Arc<dyn DocumentExtractor>,
    feedback: Arc<dyn FeedbackGenerator>,
    renderer: Arc<dyn PdfRenderer>,
    output_dir: PathBuf,
}

impl ResumeService {
    pub fn new(
        store: Arc<dyn ResumeStore>,
        extractor: Arc<dyn DocumentExtractor>,
        feedback: Arc<dyn FeedbackGenerator>,
        renderer: Arc<dyn PdfRenderer>,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            store,
            extractor,
            feedback,
            renderer,
            output_dir: output_dir.into(),
        }
    }

    /// Where the revised PDF for `id` is written.
    pub fn pdf_path_for(&self, id: i64) -> PathBuf {
        self.output_dir.join(format!("{id}{REVISED_PDF_SUFFIX}"))
    }

    /// Runs the full pipeline for a file the caller has already written to disk.
    /// The caller owns `file_path` and is responsible for removing it.
    pub async fn upload(
        &self,
        file_path: &Path,
        original_filename: &str,
        job_title: &str,
    ) -> Result<ResumeRow, UploadError> {
        let placeholder = self
            .store
            .create(NewResume {
                original_filename: original_filename.to_string(),
                job_title: job_title.to_string(),
            })
            .await?;
        let resume_id = placeholder.id;
        info!(resume_id, "Created placeholder for {original_filename:?} ({job_title})");

        match self.process(resume_id, file_path, job_title).await {
            Ok(row) => {
                info!(resume_id, "Resume processing complete");
                Ok(row)
            }
            Err(e) => {
                warn!(resume_id, "Resume processing failed, placeholder left unprocessed: {e}");
                Err(e)
            }
        }
    }

    async fn process(
        &self,
        resume_id: i64,
        file_path: &Path,
        job_title: &str,
    ) -> Result<ResumeRow, UploadError> {
        let resume_html = self.extractor.extract(file_path).await?;
        info!(resume_id, "Extracted {} bytes of resume HTML", resume_html.len());

        let raw = self
            .feedback
            .generate_feedback(&resume_html, job_title)
            .await?;

        let parsed = parse_ai_response(&raw);
        if !parsed.has_revision() {
            warn!(resume_id, "LLM answer had no revised HTML section");
        }

        let pdf_path = self.pdf_path_for(resume_id);
        self.renderer.render(&parsed.revised_html, &pdf_path).await?;
        info!(resume_id, "Rendered revised PDF to {}", pdf_path.display());

        self.store
            .update(
                resume_id,
                ResumeUpdate {
                    resume_html,
                    feedback_text: parsed.feedback_text,
                    revised_html: parsed.revised_html,
                    result_pdf_path: pdf_path.to_string_lossy().into_owned(),
                },
            )
            .await?
            .ok_or(UploadError::RecordVanished(resume_id))
    }

    /// Returns the stored row as-is, placeholder or complete.
    pub async fn get_resume(&self, id: i64) -> Result<Option<ResumeRow>, StoreError> {
        self.store.get_by_id(id).await
    }
}
