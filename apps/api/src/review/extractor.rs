//! Document extraction — turns an uploaded file into an HTML string for the reviewer.

use std::path::Path;

use askama::Template;
use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Unsupported document type: {0}")]
    Unsupported(String),

    #[error("Failed to read document: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to extract PDF text: {0}")]
    Pdf(String),

    #[error("Document contains no extractable text")]
    Empty,

    #[error("Failed to build HTML from text: {0}")]
    Template(#[from] askama::Error),
}

/// Converts a document on disk into HTML.
#[async_trait]
pub trait DocumentExtractor: Send + Sync {
    async fn extract(&self, path: &Path) -> Result<String, ExtractionError>;
}

/// Extension-dispatching extractor for PDF, HTML, plain text and Markdown files.
pub struct FileExtractor;

#[async_trait]
impl DocumentExtractor for FileExtractor {
    async fn extract(&self, path: &Path) -> Result<String, ExtractionError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        let html = match ext.as_str() {
            "pdf" => {
                let bytes = tokio::fs::read(path).await?;
                // pdf-extract is CPU-bound and synchronous
                let text = tokio::task::spawn_blocking(move || {
                    pdf_extract::extract_text_from_mem(&bytes)
                })
                .await
                .map_err(|e| ExtractionError::Pdf(e.to_string()))?
                .map_err(|e| ExtractionError::Pdf(e.to_string()))?;
                text_to_html(&text)?
            }
            "html" | "htm" => {
                let html = tokio::fs::read_to_string(path).await?;
                if html.trim().is_empty() {
                    return Err(ExtractionError::Empty);
                }
                html
            }
            "txt" | "md" => text_to_html(&tokio::fs::read_to_string(path).await?)?,
            other => return Err(ExtractionError::Unsupported(format!(".{other}"))),
        };

        debug!("Extracted {} bytes of HTML from {}", html.len(), path.display());
        Ok(html)
    }
}

/// Plain text wrapped in a minimal HTML document; every line is escaped on render.
#[derive(Template)]
#[template(path = "resume_text.html")]
struct ResumeTextHtml {
    paragraphs: Vec<Vec<String>>,
}

/// One `<p>` per blank-line separated block, line breaks inside a block kept as `<br>`.
fn text_to_html(text: &str) -> Result<String, ExtractionError> {
    let normalized = text.replace("\r\n", "\n");
    let paragraphs: Vec<Vec<String>> = normalized
        .split("\n\n")
        .map(|block| {
            block
                .lines()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(String::from)
                .collect::<Vec<_>>()
        })
        .filter(|p| !p.is_empty())
        .collect();

    if paragraphs.is_empty() {
        return Err(ExtractionError::Empty);
    }

    Ok(ResumeTextHtml { paragraphs }.render()?)
}
