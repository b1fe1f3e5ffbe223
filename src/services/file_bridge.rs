//! Filesystem Bridge
//!
//! The one filesystem side effect the controller performs on user files:
//! copying a picked file into a launcher-owned directory.

use crate::error::{CopyFailedSnafu, Result};
use crate::helpers::paths;
use async_trait::async_trait;
use snafu::ResultExt;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

#[async_trait]
pub trait FileBridge: Send + Sync {
    /// Copy `source` into `destination_dir` (created if missing), keeping its
    /// file name. An existing file with the same name is overwritten.
    /// Returns the path of the copy.
    async fn copy_file(&self, source: &Path, destination_dir: &Path) -> Result<PathBuf>;
}

/// Bridge backed by the local filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileBridge;

#[async_trait]
impl FileBridge for LocalFileBridge {
    async fn copy_file(&self, source: &Path, destination_dir: &Path) -> Result<PathBuf> {
        let file_name = paths::file_name(&source.to_string_lossy());
        let target = destination_dir.join(&file_name);

        fs::create_dir_all(destination_dir).await.context(CopyFailedSnafu {
            source_path: source.to_path_buf(),
            destination: destination_dir.to_path_buf(),
        })?;

        if same_file(source, &target).await {
            debug!(target = ?target, "Source already in place, copy skipped");
            return Ok(target);
        }

        fs::copy(source, &target).await.context(CopyFailedSnafu {
            source_path: source.to_path_buf(),
            destination: destination_dir.to_path_buf(),
        })?;

        debug!(source = ?source, target = ?target, "File copied");
        Ok(target)
    }
}

/// Copying a file onto itself truncates it
async fn same_file(source: &Path, target: &Path) -> bool {
    match (fs::canonicalize(source).await, fs::canonicalize(target).await) {
        (Ok(source), Ok(target)) => source == target,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_copy_creates_destination_dir() {
        let dir = TempDir::new().expect("temp dir");
        let source = dir.path().join("sunset.png");
        std::fs::write(&source, b"png").expect("write source");
        let destination = dir.path().join("cultivation").join("bg");

        let copied = LocalFileBridge
            .copy_file(&source, &destination)
            .await
            .expect("copy");

        assert_eq!(copied, destination.join("sunset.png"));
        assert_eq!(std::fs::read(&copied).expect("read copy"), b"png");
    }

    #[tokio::test]
    async fn test_copy_missing_source_fails() {
        let dir = TempDir::new().expect("temp dir");
        let source = dir.path().join("missing.png");

        let err = LocalFileBridge
            .copy_file(&source, dir.path())
            .await
            .expect_err("missing source");
        assert!(matches!(err, Error::CopyFailed { .. }));
    }

    #[tokio::test]
    async fn test_copy_onto_itself_keeps_content() {
        let dir = TempDir::new().expect("temp dir");
        let destination = dir.path().join("bg");
        std::fs::create_dir_all(&destination).expect("mkdir");
        let existing = destination.join("sunset.png");
        std::fs::write(&existing, b"sunset bytes").expect("write");

        let copied = LocalFileBridge
            .copy_file(&existing, &destination)
            .await
            .expect("copy onto itself");

        assert_eq!(copied, existing);
        assert_eq!(std::fs::read(&existing).expect("read"), b"sunset bytes");
    }
}
