//! In-memory collaborators for exercising the review pipeline without Postgres,
//! the LLM, or a PDF converter.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use crate::llm_client::LlmError;
use crate::models::resume::{NewResume, ResumeRow, ResumeUpdate};
use crate::review::extractor::{DocumentExtractor, ExtractionError};
use crate::review::feedback::{AiServiceError, FeedbackGenerator};
use crate::review::renderer::{PdfRenderer, RenderError};
use crate::review::store::{ResumeStore, StoreError};

#[derive(Default)]
pub struct InMemoryResumeStore {
    rows: Mutex<HashMap<i64, ResumeRow>>,
    next_id: Mutex<i64>,
    fail_creates: bool,
    drop_updates: bool,
}

impl InMemoryResumeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every `create` fails as if the database were unreachable.
    pub fn failing_creates() -> Self {
        Self {
            fail_creates: true,
            ..Self::default()
        }
    }

    /// `update` behaves as if the row had been deleted in the meantime.
    pub fn dropping_updates() -> Self {
        Self {
            drop_updates: true,
            ..Self::default()
        }
    }

    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }
}

#[async_trait]
impl ResumeStore for InMemoryResumeStore {
    async fn create(&self, new: NewResume) -> Result<ResumeRow, StoreError> {
        if self.fail_creates {
            return Err(StoreError::Database(sqlx::Error::PoolTimedOut));
        }
        let id = {
            let mut next = self.next_id.lock().unwrap();
            *next += 1;
            *next
        };
        let row = ResumeRow {
            id,
            created_at: Utc::now(),
            original_filename: new.original_filename,
            job_title: new.job_title,
            resume_html: None,
            feedback_text: None,
            revised_html: None,
            result_pdf_path: None,
        };
        self.rows.lock().unwrap().insert(id, row.clone());
        Ok(row)
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<ResumeRow>, StoreError> {
        Ok(self.rows.lock().unwrap().get(&id).cloned())
    }

    async fn update(
        &self,
        id: i64,
        update: ResumeUpdate,
    ) -> Result<Option<ResumeRow>, StoreError> {
        if self.drop_updates {
            return Ok(None);
        }
        let mut rows = self.rows.lock().unwrap();
        Ok(rows.get_mut(&id).map(|row| {
            row.resume_html = Some(update.resume_html);
            row.feedback_text = Some(update.feedback_text);
            row.revised_html = Some(update.revised_html);
            row.result_pdf_path = Some(update.result_pdf_path);
            row.clone()
        }))
    }
}

/// Returns fixed HTML, or fails with `ExtractionError::Empty` when built with `failing()`.
pub struct StubExtractor {
    html: Option<String>,
}

impl StubExtractor {
    pub fn returning(html: &str) -> Self {
        Self {
            html: Some(html.to_string()),
        }
    }

    pub fn failing() -> Self {
        Self { html: None }
    }
}

#[async_trait]
impl DocumentExtractor for StubExtractor {
    async fn extract(&self, _path: &Path) -> Result<String, ExtractionError> {
        self.html.clone().ok_or(ExtractionError::Empty)
    }
}

/// Feedback generator driven by a closure over `(resume_html, job_title)`.
pub struct ScriptedFeedback {
    respond: Box<dyn Fn(&str, &str) -> Result<String, AiServiceError> + Send + Sync>,
    calls: AtomicUsize,
}

impl ScriptedFeedback {
    pub fn new(
        respond: impl Fn(&str, &str) -> Result<String, AiServiceError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            respond: Box::new(respond),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn replying(text: &str) -> Self {
        let text = text.to_string();
        Self::new(move |_, _| Ok(text.clone()))
    }

    /// Echoes both inputs back in the two-section format.
    pub fn echoing() -> Self {
        Self::new(|html, title| Ok(format!("1) Feedback for {title}. 2) <html>{html}</html>")))
    }

    pub fn rate_limited() -> Self {
        Self::new(|_, _| Err(AiServiceError::Llm(LlmError::RateLimited { retries: 3 })))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FeedbackGenerator for ScriptedFeedback {
    async fn generate_feedback(
        &self,
        resume_html: &str,
        job_title: &str,
    ) -> Result<String, AiServiceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        (self.respond)(resume_html, job_title)
    }
}

/// Writes the HTML itself to the output path, or fails when built with `failing()`.
#[derive(Default)]
pub struct RecordingRenderer {
    fail: bool,
    rendered: Mutex<Vec<PathBuf>>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn rendered(&self) -> Vec<PathBuf> {
        self.rendered.lock().unwrap().clone()
    }
}

#[async_trait]
impl PdfRenderer for RecordingRenderer {
    async fn render(&self, html: &str, output_path: &Path) -> Result<(), RenderError> {
        self.rendered.lock().unwrap().push(output_path.to_path_buf());
        if self.fail {
            return Err(RenderError::Failed {
                status: "exit status: 1".to_string(),
                stderr: "Exit with code 1 due to network error".to_string(),
            });
        }
        if let Some(parent) = output_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(output_path, html).await?;
        Ok(())
    }
}
