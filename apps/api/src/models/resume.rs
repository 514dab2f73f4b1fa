use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row of the `resumes` table.
///
/// The four AI-derived fields are either all `None` (placeholder, processing
/// not complete) or all `Some` (fully processed). The store API only accepts a
/// complete [`ResumeUpdate`], so no other combination is ever written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ResumeRow {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub original_filename: String,
    pub job_title: String,
    pub resume_html: Option<String>,
    pub feedback_text: Option<String>,
    pub revised_html: Option<String>,
    pub result_pdf_path: Option<String>,
}

impl ResumeRow {
    pub fn is_processed(&self) -> bool {
        self.resume_html.is_some()
            && self.feedback_text.is_some()
            && self.revised_html.is_some()
            && self.result_pdf_path.is_some()
    }
}

/// Fields known when an upload arrives, before any processing.
#[derive(Debug, Clone)]
pub struct NewResume {
    pub original_filename: String,
    pub job_title: String,
}

/// The full AI-derived result, written in a single update.
#[derive(Debug, Clone)]
pub struct ResumeUpdate {
    pub resume_html: String,
    pub feedback_text: String,
    pub revised_html: String,
    pub result_pdf_path: String,
}
