//! Temp-file bookkeeping for uploads: the workflow reads from disk, so the
//! handler parks the multipart bytes in `UPLOAD_DIR` for the duration of the call.

use std::io::Write;
use std::path::Path;

use bytes::Bytes;
use tempfile::NamedTempFile;
use uuid::Uuid;

/// An uploaded file on disk, named `{uuid}{ext}`. Removed when dropped.
pub struct TempUpload {
    file: NamedTempFile,
}

impl TempUpload {
    pub fn path(&self) -> &Path {
        self.file.path()
    }
}

pub async fn store_temp_file(
    upload_dir: &Path,
    original_filename: &str,
    bytes: Bytes,
) -> std::io::Result<TempUpload> {
    tokio::fs::create_dir_all(upload_dir).await?;

    let dir = upload_dir.to_path_buf();
    let suffix = extension_of(original_filename);
    let file = tokio::task::spawn_blocking(move || -> std::io::Result<NamedTempFile> {
        let mut file = tempfile::Builder::new()
            .prefix(&Uuid::new_v4().to_string())
            .rand_bytes(0)
            .suffix(&suffix)
            .tempfile_in(&dir)?;
        file.write_all(&bytes)?;
        file.flush()?;
        Ok(file)
    })
    .await
    .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))??;

    Ok(TempUpload { file })
}

/// Lowercased `.ext` of a client-supplied filename, or empty if it has none
/// or it contains anything but ASCII alphanumerics.
fn extension_of(filename: &str) -> String {
    Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .filter(|e| !e.is_empty() && e.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(|e| format!(".{}", e.to_ascii_lowercase()))
        .unwrap_or_default()
}
