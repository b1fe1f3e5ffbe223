//! Service Hub
//!
//! Bundles every collaborator the settings controller talks to, so the
//! controller can be rebuilt on reinitialization without re-wiring anything.

use crate::constants::SERVER_CONFIG_FILE_NAME;
use crate::helpers::paths;
use crate::services::{
    BackgroundImporter, ConfigStore, EncryptionFlagClient, FileBridge, OptionCatalog,
    ResourceCacheManager,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Central hub for the controller's collaborators
#[derive(Clone)]
pub struct ServiceHub {
    store: Arc<dyn ConfigStore>,
    resources: Arc<ResourceCacheManager>,
    encryption: Arc<dyn EncryptionFlagClient>,
    background: Arc<BackgroundImporter>,
    catalog: Arc<dyn OptionCatalog>,
    server_config_name: String,
}

impl ServiceHub {
    /// Wire the collaborators together. The background importer shares `store`.
    pub fn new(
        store: Arc<dyn ConfigStore>,
        bridge: Arc<dyn FileBridge>,
        resources: ResourceCacheManager,
        encryption: Arc<dyn EncryptionFlagClient>,
        catalog: Arc<dyn OptionCatalog>,
        data_dir: &Path,
    ) -> Self {
        let background = Arc::new(BackgroundImporter::new(store.clone(), bridge, data_dir));
        Self {
            store,
            resources: Arc::new(resources),
            encryption,
            background,
            catalog,
            server_config_name: SERVER_CONFIG_FILE_NAME.to_string(),
        }
    }

    /// Override the server config file name looked up next to the jar
    pub fn with_server_config_name(mut self, name: impl Into<String>) -> Self {
        self.server_config_name = name.into();
        self
    }

    pub fn store(&self) -> &dyn ConfigStore {
        self.store.as_ref()
    }

    pub fn resources(&self) -> &ResourceCacheManager {
        &self.resources
    }

    pub fn encryption(&self) -> &dyn EncryptionFlagClient {
        self.encryption.as_ref()
    }

    pub fn background(&self) -> &BackgroundImporter {
        &self.background
    }

    pub fn catalog(&self) -> &dyn OptionCatalog {
        self.catalog.as_ref()
    }

    /// `<directory of jar>/config.json`
    pub fn server_config_path(&self, grasscutter_jar: &str) -> PathBuf {
        PathBuf::from(paths::join(&paths::directory_of(grasscutter_jar), &self.server_config_name))
    }
}

impl std::fmt::Debug for ServiceHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceHub")
            .field("resource_cache", &self.resources.cache_path())
            .field("data_dir", &self.background.data_dir())
            .field("server_config_name", &self.server_config_name)
            .finish()
    }
}
