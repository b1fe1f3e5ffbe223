//! Application - Controller Bootstrap
//!
//! Wires the real collaborators from a [`LauncherConfig`] and starts a
//! settings controller on top of them.

use crate::app::config::LauncherConfig;
use crate::constants::{LANG_DIR_NAME, THEMES_DIR_NAME};
use crate::error::Result;
use crate::services::{
    DirectoryCatalog, HttpResourceSource, JsonConfigStore, LocalFileBridge, OfflineResourceSource,
    ResourceCacheManager, ResourceSource, ServerConfigFlag, ServiceHub,
};
use crate::states::{SettingsController, SettingsEvent};
use crossbeam_channel::Receiver;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Build the service hub for `data_dir`, writing a default record if none exists
pub async fn build_services(config: &LauncherConfig, data_dir: &Path) -> Result<ServiceHub> {
    let store = Arc::new(JsonConfigStore::new(config.config_file(data_dir)));
    if store.ensure_initialized().await? {
        info!(path = ?store.path(), "First launch, default configuration written");
    }

    let source: Arc<dyn ResourceSource> = match config.resources_base_url() {
        Some(url) => {
            info!(url, "Using remote resource index");
            Arc::new(HttpResourceSource::new(url, config.request_timeout())?)
        }
        None => {
            info!("No resource index configured, running offline");
            Arc::new(OfflineResourceSource::new(config.client_versions.clone()))
        }
    };
    let resources = ResourceCacheManager::new(source, config.resource_cache_file(data_dir));

    let resources_dir = config.resources_dir(data_dir);
    let catalog = DirectoryCatalog::new(
        resources_dir.join(LANG_DIR_NAME),
        resources_dir.join(THEMES_DIR_NAME),
    );

    let services = ServiceHub::new(
        store,
        Arc::new(LocalFileBridge),
        resources,
        Arc::new(ServerConfigFlag::default()),
        Arc::new(catalog),
        data_dir,
    )
    .with_server_config_name(config.server_config_name.clone());

    Ok(services)
}

/// Start a controller and hand back the receiving end of its event channel
pub async fn start_controller(
    config: &LauncherConfig,
    data_dir: &Path,
) -> Result<(SettingsController, Receiver<SettingsEvent>)> {
    let services = build_services(config, data_dir).await?;
    let (tx, rx) = crossbeam_channel::unbounded();
    let controller = SettingsController::init(services, tx).await;
    Ok((controller, rx))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::config::{OptionKey, OptionValue};
    use crate::services::ConfigStore;
    use crate::states::EncryptionStatus;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_first_launch_writes_default_record() {
        let dir = TempDir::new().expect("temp dir");
        let config = LauncherConfig {
            client_versions: vec!["4.0".to_string()],
            ..Default::default()
        };

        let (controller, _events) = start_controller(&config, dir.path()).await.expect("start");

        assert!(config.config_file(dir.path()).exists());
        assert_eq!(controller.view().language, "en");
        assert_eq!(controller.view().available_versions, vec!["4.0"]);
        assert_eq!(controller.view().available_themes, vec!["default"]);
        assert_eq!(controller.view().encryption, EncryptionStatus::Unknown);
    }

    #[tokio::test]
    async fn test_offline_refresh_leaves_link_absent() {
        let dir = TempDir::new().expect("temp dir");
        let config = LauncherConfig::default();
        let (mut controller, _events) = start_controller(&config, dir.path()).await.expect("start");

        controller.set_client_version("4.0").await.expect("set version");

        assert_eq!(controller.view().metadata_download_link, None);
        let stored = controller
            .services()
            .store()
            .get(OptionKey::ClientVersion)
            .await
            .expect("get");
        assert_eq!(stored, Some(OptionValue::Text("4.0".to_string())));
    }

    #[tokio::test]
    async fn test_custom_server_config_name() {
        let dir = TempDir::new().expect("temp dir");
        let config = LauncherConfig {
            server_config_name: "server.json".to_string(),
            ..Default::default()
        };

        let services = build_services(&config, dir.path()).await.expect("services");

        assert_eq!(
            services.server_config_path("/opt/gc/grasscutter.jar"),
            Path::new("/opt/gc/server.json")
        );
    }
}
