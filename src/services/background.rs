//! Background Importer
//!
//! Classifies a background value as a remote URL or a local file and stores
//! it. Local files are copied into `<data>/cultivation/bg/` first, and the
//! record points at the copy. Two sources with the same file name share one
//! slot; the later import replaces the earlier one.

use crate::domain::config::{OptionKey, OptionValue};
use crate::error::{Error, Result};
use crate::helpers::{self, paths};
use crate::services::{ConfigStore, FileBridge};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

/// How a background value is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackgroundSource {
    Empty,
    Url,
    LocalPath,
}

impl BackgroundSource {
    pub fn classify(value: &str) -> Self {
        if value.is_empty() {
            BackgroundSource::Empty
        } else if paths::is_url(value) {
            BackgroundSource::Url
        } else {
            BackgroundSource::LocalPath
        }
    }
}

/// What a background change persisted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackgroundChange {
    /// Empty value stored, no filesystem access
    Cleared,
    /// URL stored verbatim
    Url(String),
    /// Local file copied and the copy's path stored
    Imported(String),
}

impl BackgroundChange {
    /// Value now held by `customBackground`
    pub fn stored_value(&self) -> &str {
        match self {
            BackgroundChange::Cleared => "",
            BackgroundChange::Url(url) => url,
            BackgroundChange::Imported(stored) => stored,
        }
    }
}

pub struct BackgroundImporter {
    store: Arc<dyn ConfigStore>,
    bridge: Arc<dyn FileBridge>,
    data_dir: PathBuf,
}

impl BackgroundImporter {
    pub fn new(store: Arc<dyn ConfigStore>, bridge: Arc<dyn FileBridge>, data_dir: impl Into<PathBuf>) -> Self {
        Self {
            store,
            bridge,
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Persisted location for an imported local file
    pub fn imported_path(&self, value: &str) -> Result<String> {
        let file_name = paths::file_name(value);
        if file_name.is_empty() {
            return Err(Error::Invalid {
                message: format!("Background path has no file name: {value}"),
            });
        }
        Ok(paths::join(&helpers::background_dir(&self.data_dir), &file_name))
    }

    /// Store a new background value
    pub async fn set_background(&self, value: &str) -> Result<BackgroundChange> {
        let change = match BackgroundSource::classify(value) {
            BackgroundSource::Empty => BackgroundChange::Cleared,
            BackgroundSource::Url => BackgroundChange::Url(value.to_string()),
            BackgroundSource::LocalPath => self.import(value).await?,
        };

        self.store
            .set(OptionKey::CustomBackground, OptionValue::Text(change.stored_value().to_string()))
            .await?;

        info!(background = change.stored_value(), "Background updated");
        Ok(change)
    }

    async fn import(&self, value: &str) -> Result<BackgroundChange> {
        let import_failed = |source: Error| Error::ImportFailed {
            value: value.to_string(),
            source: Box::new(source),
        };

        let source = paths::normalize(value);
        let stored = self.imported_path(&source).map_err(import_failed)?;
        let destination = PathBuf::from(helpers::background_dir(&self.data_dir));

        self.bridge
            .copy_file(Path::new(&source), &destination)
            .await
            .map_err(|e| {
                warn!(source = %source, error = %e, "Background copy failed");
                import_failed(e)
            })?;

        Ok(BackgroundChange::Imported(stored))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::{JsonConfigStore, LocalFileBridge};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::TempDir;

    #[derive(Default)]
    struct CountingBridge {
        copies: AtomicUsize,
    }

    #[async_trait]
    impl FileBridge for CountingBridge {
        async fn copy_file(&self, source: &Path, destination_dir: &Path) -> Result<PathBuf> {
            self.copies.fetch_add(1, Ordering::SeqCst);
            Ok(destination_dir.join(paths::file_name(&source.to_string_lossy())))
        }
    }

    fn store_in(dir: &TempDir) -> Arc<JsonConfigStore> {
        Arc::new(JsonConfigStore::new(dir.path().join("configuration.json")))
    }

    async fn stored_background(store: &JsonConfigStore) -> Option<OptionValue> {
        store.get(OptionKey::CustomBackground).await.expect("get background")
    }

    #[test]
    fn test_classify() {
        assert_eq!(BackgroundSource::classify(""), BackgroundSource::Empty);
        assert_eq!(BackgroundSource::classify("https://example.com/x.png"), BackgroundSource::Url);
        assert_eq!(BackgroundSource::classify("C:/Users/me/bg.png"), BackgroundSource::LocalPath);
    }

    #[test]
    fn test_imported_path_from_windows_source() {
        let dir = TempDir::new().expect("temp dir");
        let importer = BackgroundImporter::new(store_in(&dir), Arc::new(LocalFileBridge), "/appdata");

        assert_eq!(
            importer.imported_path("C:\\images\\sunset.png").expect("path"),
            "/appdata/cultivation/bg/sunset.png"
        );
    }

    #[tokio::test]
    async fn test_url_is_stored_verbatim_without_copy() {
        let dir = TempDir::new().expect("temp dir");
        let store = store_in(&dir);
        let bridge = Arc::new(CountingBridge::default());
        let importer = BackgroundImporter::new(store.clone(), bridge.clone(), dir.path());

        let change = importer
            .set_background("https://example.com/x.png")
            .await
            .expect("set url");

        assert_eq!(change, BackgroundChange::Url("https://example.com/x.png".to_string()));
        assert_eq!(bridge.copies.load(Ordering::SeqCst), 0);
        assert_eq!(
            stored_background(&store).await,
            Some(OptionValue::Text("https://example.com/x.png".to_string()))
        );
    }

    #[tokio::test]
    async fn test_empty_value_clears_without_copy() {
        let dir = TempDir::new().expect("temp dir");
        let store = store_in(&dir);
        let bridge = Arc::new(CountingBridge::default());
        let importer = BackgroundImporter::new(store.clone(), bridge.clone(), dir.path());

        assert_eq!(importer.set_background("").await.expect("clear"), BackgroundChange::Cleared);
        assert_eq!(bridge.copies.load(Ordering::SeqCst), 0);
        assert_eq!(stored_background(&store).await, Some(OptionValue::Text(String::new())));
    }

    #[tokio::test]
    async fn test_local_file_is_copied_then_stored() {
        let dir = TempDir::new().expect("temp dir");
        let store = store_in(&dir);
        let data_dir = dir.path().join("appdata");
        let source = dir.path().join("pictures").join("sunset.png");
        std::fs::create_dir_all(source.parent().expect("parent")).expect("mkdir");
        std::fs::write(&source, b"sunset").expect("write source");

        let importer = BackgroundImporter::new(store.clone(), Arc::new(LocalFileBridge), &data_dir);
        let change = importer
            .set_background(&source.to_string_lossy())
            .await
            .expect("import");

        let expected = importer.imported_path("sunset.png").expect("path");
        assert_eq!(change.stored_value(), expected);
        assert_eq!(std::fs::read(&expected).expect("read copy"), b"sunset");
        assert_eq!(stored_background(&store).await, Some(OptionValue::Text(expected)));
    }

    #[tokio::test]
    async fn test_same_file_name_overwrites_previous_import() {
        let dir = TempDir::new().expect("temp dir");
        let store = store_in(&dir);
        let data_dir = dir.path().join("appdata");
        let first = dir.path().join("a").join("bg.png");
        let second = dir.path().join("b").join("bg.png");
        for (path, content) in [(&first, b"first"), (&second, b"later")] {
            std::fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
            std::fs::write(path, content).expect("write source");
        }

        let importer = BackgroundImporter::new(store, Arc::new(LocalFileBridge), &data_dir);
        importer.set_background(&first.to_string_lossy()).await.expect("first");
        let change = importer.set_background(&second.to_string_lossy()).await.expect("second");

        assert_eq!(std::fs::read(change.stored_value()).expect("read copy"), b"later");
    }

    #[tokio::test]
    async fn test_copy_failure_persists_nothing() {
        let dir = TempDir::new().expect("temp dir");
        let store = store_in(&dir);
        store
            .set(OptionKey::CustomBackground, "https://example.com/old.png".into())
            .await
            .expect("seed");
        let importer = BackgroundImporter::new(store.clone(), Arc::new(LocalFileBridge), dir.path());

        let missing = dir.path().join("nowhere").join("missing.png");
        let err = importer
            .set_background(&missing.to_string_lossy())
            .await
            .expect_err("copy must fail");

        assert!(matches!(err, Error::ImportFailed { .. }));
        assert_eq!(
            stored_background(&store).await,
            Some(OptionValue::Text("https://example.com/old.png".to_string()))
        );
    }

    #[tokio::test]
    async fn test_reimporting_stored_background_keeps_image() {
        let dir = TempDir::new().expect("temp dir");
        let store = store_in(&dir);
        let data_dir = dir.path().join("appdata");
        let source = dir.path().join("pics").join("sunset.png");
        std::fs::create_dir_all(source.parent().expect("parent")).expect("mkdir");
        std::fs::write(&source, b"sunset bytes").expect("write source");

        let importer = BackgroundImporter::new(store.clone(), Arc::new(LocalFileBridge), &data_dir);
        let first = importer
            .set_background(&source.to_string_lossy())
            .await
            .expect("first import");
        let stored = first.stored_value().to_string();

        let second = importer.set_background(&stored).await.expect("re-import");

        assert_eq!(second.stored_value(), stored);
        assert_eq!(std::fs::read(&stored).expect("read copy"), b"sunset bytes");
        assert_eq!(stored_background(&store).await, Some(OptionValue::Text(stored)));
    }
}
