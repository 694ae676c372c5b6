/**
 * Upload Storage
 *
 * Writes multipart uploads under the public root and maps stored public
 * paths (`/uploads/files/...`) back to disk locations.
 *
 * # Cleanup
 *
 * Every file written here is owned by a [`PendingFile`] until the request
 * commits. If the handler returns early for any reason, dropping the guard
 * deletes the partial upload.
 */

use std::io;
use std::path::{Component, Path, PathBuf};

use axum::extract::multipart::Field;
use tokio::io::AsyncWriteExt;

use crate::backend::error::{BackendError, BackendResult};

/// A file on disk that is deleted on drop unless kept
#[derive(Debug)]
pub struct PendingFile {
    path: PathBuf,
    public_path: String,
    size: u64,
    armed: bool,
}

impl PendingFile {
    /// Public path relative to the public root, e.g. `/uploads/files/1-a.txt`
    pub fn public_path(&self) -> &str {
        &self.public_path
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    /// Disarm the guard; the file stays on disk
    pub fn keep(mut self) -> String {
        self.armed = false;
        std::mem::take(&mut self.public_path)
    }
}

impl Drop for PendingFile {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        // Drop cannot await; a single unlink is short enough to run inline
        match std::fs::remove_file(&self.path) {
            Ok(()) => tracing::debug!("[Storage] Removed abandoned upload {}", self.path.display()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!("[Storage] Failed to remove {}: {}", self.path.display(), e),
        }
    }
}

/// Reduce a client-supplied file name to a safe single path segment
pub fn sanitize_filename(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or_default();
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() {
        "file".to_string()
    } else {
        cleaned.to_string()
    }
}

/// Resolve a stored public path against the public root
///
/// Returns `None` for paths that would escape the root.
pub fn resolve_public_path(public_dir: &Path, public_path: &str) -> Option<PathBuf> {
    let relative = Path::new(public_path.trim_start_matches('/'));
    let safe = relative
        .components()
        .all(|component| matches!(component, Component::Normal(_)));
    (safe && !public_path.trim_start_matches('/').is_empty()).then(|| public_dir.join(relative))
}

/// Stream one multipart field to `<public_dir>/<relative_dir>/<file_name>`
///
/// Fails with `PayloadTooLarge` as soon as more than `limit` bytes arrive;
/// the partial file is removed.
pub async fn store_field(
    mut field: Field<'_>,
    public_dir: &Path,
    relative_dir: &str,
    file_name: &str,
    limit: u64,
) -> BackendResult<PendingFile> {
    let dir = public_dir.join(relative_dir);
    tokio::fs::create_dir_all(&dir).await?;

    let path = dir.join(file_name);
    let mut file = tokio::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&path)
        .await?;

    let mut pending = PendingFile {
        path,
        public_path: format!("/{}/{}", relative_dir.trim_matches('/'), file_name),
        size: 0,
        armed: true,
    };

    while let Some(chunk) = field.chunk().await? {
        pending.size += chunk.len() as u64;
        if pending.size > limit {
            tracing::warn!("[Storage] Upload {} exceeded {} bytes", file_name, limit);
            return Err(BackendError::PayloadTooLarge { limit });
        }
        file.write_all(&chunk).await?;
    }
    file.flush().await?;

    Ok(pending)
}

/// Delete a stored public file
pub async fn remove_public_file(public_dir: &Path, public_path: &str) -> io::Result<()> {
    let path = resolve_public_path(public_dir, public_path)
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "path escapes the public root"))?;
    tokio::fs::remove_file(path).await
}

/// Stored name for an upload: `{millis}-{random}-{suffix}`
///
/// The random part keeps names distinct when uploads land in the same
/// millisecond.
pub fn unique_name(suffix: &str) -> String {
    format!(
        "{}-{}-{}",
        chrono::Utc::now().timestamp_millis(),
        uuid::Uuid::new_v4().simple(),
        suffix
    )
}
