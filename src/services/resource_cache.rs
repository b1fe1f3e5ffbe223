//! Resource Cache
//!
//! Version-keyed metadata cache. A refresh that cannot reach its source is
//! reported as absence, never as an error; callers disable whatever depends
//! on the entry.

use crate::constants::RESOURCE_INDEX_FILE_NAME;
use crate::domain::resources::{CacheEntry, VersionResources};
use crate::error::{Error, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::fs;
use tracing::{debug, info, warn};

/// Where version lists and per-version metadata come from
#[async_trait]
pub trait ResourceSource: Send + Sync {
    /// Selectable client versions
    async fn versions(&self) -> Result<Vec<String>>;

    /// Metadata document for one version
    async fn fetch(&self, version: &str) -> Result<VersionResources>;
}

/// Source backed by a static HTTP index
///
/// Layout: `<base>/index.json` lists versions, `<base>/<version>.json` holds
/// each version's document.
pub struct HttpResourceSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpResourceSource {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, file: &str) -> String {
        format!("{}/{}", self.base_url, file)
    }
}

#[async_trait]
impl ResourceSource for HttpResourceSource {
    async fn versions(&self) -> Result<Vec<String>> {
        let url = self.url(RESOURCE_INDEX_FILE_NAME);
        debug!(url = %url, "Fetching version index");
        let versions = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json::<Vec<String>>()
            .await?;
        Ok(versions)
    }

    async fn fetch(&self, version: &str) -> Result<VersionResources> {
        let url = self.url(&format!("{version}.json"));
        debug!(url = %url, "Fetching version resources");
        let resources = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json::<VersionResources>()
            .await?;
        Ok(resources)
    }
}

/// Source used when no resource index is configured: versions come from local
/// configuration and no metadata is ever available.
#[derive(Debug, Clone, Default)]
pub struct OfflineResourceSource {
    versions: Vec<String>,
}

impl OfflineResourceSource {
    pub fn new(versions: Vec<String>) -> Self {
        Self { versions }
    }
}

#[async_trait]
impl ResourceSource for OfflineResourceSource {
    async fn versions(&self) -> Result<Vec<String>> {
        Ok(self.versions.clone())
    }

    async fn fetch(&self, version: &str) -> Result<VersionResources> {
        Err(Error::CacheRefreshFailed {
            version: version.to_string(),
            message: "no resource index configured".to_string(),
        })
    }
}

/// Cache of the last fetched entry, persisted as JSON
pub struct ResourceCacheManager {
    source: Arc<dyn ResourceSource>,
    cache_path: PathBuf,
}

impl ResourceCacheManager {
    pub fn new(source: Arc<dyn ResourceSource>, cache_path: impl Into<PathBuf>) -> Self {
        Self {
            source,
            cache_path: cache_path.into(),
        }
    }

    pub fn cache_path(&self) -> &Path {
        &self.cache_path
    }

    /// Selectable client versions, empty when the source is unreachable
    pub async fn versions(&self) -> Vec<String> {
        match self.source.versions().await {
            Ok(versions) => versions,
            Err(e) => {
                warn!(error = %e, "Failed to load client versions");
                Vec::new()
            }
        }
    }

    /// Fetch and cache the entry for `version`; `None` when it cannot be fetched
    pub async fn refresh(&self, version: &str) -> Option<CacheEntry> {
        let resources = match self.source.fetch(version).await {
            Ok(resources) => resources,
            Err(e) => {
                let e = match e {
                    e @ Error::CacheRefreshFailed { .. } => e,
                    other => Error::CacheRefreshFailed {
                        version: version.to_string(),
                        message: other.to_string(),
                    },
                };
                warn!(error = %e, "Resource refresh failed");
                return None;
            }
        };

        let entry = CacheEntry::new(version, resources);
        if let Err(e) = self.write(&entry).await {
            warn!(path = ?self.cache_path, error = %e, "Failed to persist resource cache");
        } else {
            info!(version, link = ?entry.metadata_backup_link, "Resource cache refreshed");
        }
        Some(entry)
    }

    /// Last successfully cached entry, without network access
    pub async fn read_cached(&self) -> Option<CacheEntry> {
        let content = fs::read_to_string(&self.cache_path).await.ok()?;
        match serde_json::from_str(&content) {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!(path = ?self.cache_path, error = %e, "Ignoring unreadable resource cache");
                None
            }
        }
    }

    /// Cached entry, only if it was built for `version`
    pub async fn read_cached_for(&self, version: &str) -> Option<CacheEntry> {
        self.read_cached().await.filter(|entry| entry.is_for(version))
    }

    async fn write(&self, entry: &CacheEntry) -> Result<()> {
        if let Some(parent) = self.cache_path.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::write(&self.cache_path, serde_json::to_string_pretty(entry)?).await?;
        Ok(())
    }
}
