//! PDF rendering — hands the revised HTML to an external HTML→PDF converter.
//!
//! The converter is invoked as `<bin> <args..> <input.html> <output.pdf>`, which
//! matches `wkhtmltopdf` (the default) and most of its drop-in replacements.
//! A blank revision still renders, as an empty page.

use std::io::Write;
use std::path::Path;
use std::process::Stdio;

use async_trait::async_trait;
use thiserror::Error;
use tempfile::NamedTempFile;
use tokio::process::Command;
use tracing::debug;

/// Stands in for a blank revision; converters reject zero-byte input.
const EMPTY_DOCUMENT: &str =
    "<!DOCTYPE html>\n<html><head><meta charset=\"utf-8\"></head><body></body></html>";

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Renderer I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Renderer exited with {status}: {stderr}")]
    Failed { status: String, stderr: String },

    #[error("Renderer produced no file at {0}")]
    MissingOutput(String),
}

#[async_trait]
pub trait PdfRenderer: Send + Sync {
    async fn render(&self, html: &str, output_path: &Path) -> Result<(), RenderError>;
}

pub struct CommandPdfRenderer {
    bin: String,
    args: Vec<String>,
}

impl CommandPdfRenderer {
    pub fn new(bin: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            bin: bin.into(),
            args,
        }
    }
}

#[async_trait]
impl PdfRenderer for CommandPdfRenderer {
    async fn render(&self, html: &str, output_path: &Path) -> Result<(), RenderError> {
        if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let document = if html.trim().is_empty() {
            EMPTY_DOCUMENT.to_string()
        } else {
            html.to_string()
        };
        // Deleted when dropped at the end of this call.
        let input = tokio::task::spawn_blocking(move || write_input(&document))
            .await
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))??;

        debug!(
            "Rendering {} -> {} with {}",
            input.path().display(),
            output_path.display(),
            self.bin
        );

        let output = Command::new(&self.bin)
            .args(&self.args)
            .arg(input.path())
            .arg(output_path)
            .stdin(Stdio::null())
            .output()
            .await?;

        if !output.status.success() {
            return Err(RenderError::Failed {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        if !tokio::fs::try_exists(output_path).await? {
            return Err(RenderError::MissingOutput(output_path.display().to_string()));
        }

        Ok(())
    }
}

fn write_input(document: &str) -> std::io::Result<NamedTempFile> {
    let mut input = tempfile::Builder::new()
        .prefix("revised-")
        .suffix(".html")
        .tempfile()?;
    input.write_all(document.as_bytes())?;
    input.flush()?;
    Ok(input)
}
