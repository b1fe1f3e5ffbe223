//! Settings Controller
//!
//! Single point of mutation for every launcher option. Each edit is
//! persisted first, then its side effect runs, then the view is either
//! patched in place or rebuilt from the record (see [`OptionPolicy`]).
//!
//! Failures never leave the controller: each one is logged, reported as a
//! toast on the event channel, and returned to the caller.

use crate::domain::config::{ConfigurationRecord, OptionKey, OptionValue, ValueKind};
use crate::error::{Error, Result};
use crate::services::{BackgroundChange, ServiceHub};
use crate::states::policy::{OptionPolicy, Persist, SideEffect};
use crate::states::ui_event::SettingsEvent;
use crate::states::view::{EncryptionStatus, ViewState};
use crossbeam_channel::Sender;
use tracing::{debug, error, info, warn};

/// What an edit ended up doing to the view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    /// Persisted and patched into the current view
    Applied,
    /// Persisted, then the view was rebuilt from the record
    Reinitialized,
    /// A precondition failed; nothing was touched
    Refused,
}

pub struct SettingsController {
    services: ServiceHub,
    view: ViewState,
    events: Sender<SettingsEvent>,
    generation: u64,
}

impl SettingsController {
    /// Load the record and every option list, then build the first view
    pub async fn init(services: ServiceHub, events: Sender<SettingsEvent>) -> Self {
        let view = build_view(&services).await;
        info!(
            version = %view.client_version,
            language = %view.language,
            theme = %view.theme,
            "Settings controller initialized"
        );
        Self {
            services,
            view,
            events,
            generation: 0,
        }
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// Number of reinitializations so far
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn services(&self) -> &ServiceHub {
        &self.services
    }

    /// Apply an edit according to the option's policy
    pub async fn set_option(&mut self, key: OptionKey, value: OptionValue) -> Result<EditOutcome> {
        let policy = OptionPolicy::for_key(key);
        debug!(%key, ?value, ?policy, "Option edit");

        if let Err(e) = key.check(&value) {
            return Err(self.report(key, e));
        }

        let stored = match policy.persist {
            Persist::Write => {
                if let Err(e) = self.services.store().set(key, value.clone()).await {
                    return Err(self.report(key, e));
                }
                value
            }
            Persist::Delegated => value,
            Persist::Invert | Persist::External => {
                let e = Error::Invalid {
                    message: format!("{key} is toggled, not set"),
                };
                return Err(self.report(key, e));
            }
        };

        let mut reinit = policy.reinit;
        let stored = match policy.side_effect {
            SideEffect::None => stored,
            SideEffect::RefreshResources => {
                let version = stored.as_text().unwrap_or_default();
                self.view.metadata_download_link = self
                    .services
                    .resources()
                    .refresh(version)
                    .await
                    .and_then(|entry| entry.metadata_backup_link);
                stored
            }
            SideEffect::ImportBackground => {
                let requested = stored.as_text().unwrap_or_default();
                let change = match self.services.background().set_background(requested).await {
                    Ok(change) => change,
                    Err(e) => return Err(self.report(key, e)),
                };
                // Clearing goes through `clear_background` when a reload is wanted
                if change == BackgroundChange::Cleared {
                    reinit = false;
                }
                OptionValue::Text(change.stored_value().to_string())
            }
            SideEffect::ToggleServerEncryption => stored,
        };

        self.view.apply(key, &stored);
        self.emit(SettingsEvent::OptionChanged { key });
        info!(%key, value = ?stored, "Option updated");

        if reinit {
            self.reinitialize().await;
            Ok(EditOutcome::Reinitialized)
        } else {
            Ok(EditOutcome::Applied)
        }
    }

    /// Read the persisted flag for `key` and store its inverse. Returns the
    /// new value.
    pub async fn toggle_option(&mut self, key: OptionKey) -> Result<bool> {
        if key.kind() != ValueKind::Flag {
            let e = Error::Invalid {
                message: format!("{key} is not a flag"),
            };
            return Err(self.report(key, e));
        }

        let current = match self.services.store().get(key).await {
            Ok(value) => value.and_then(|v| v.as_flag()).unwrap_or(false),
            Err(e) if e.is_store_unavailable() => {
                warn!(%key, error = %e, "Configuration unavailable, toggling from default");
                ConfigurationRecord::default()
                    .get(key)
                    .and_then(|v| v.as_flag())
                    .unwrap_or(false)
            }
            Err(e) => return Err(self.report(key, e)),
        };

        let next = OptionValue::Flag(!current);
        if let Err(e) = self.services.store().set(key, next.clone()).await {
            return Err(self.report(key, e));
        }

        self.view.apply(key, &next);
        self.emit(SettingsEvent::OptionChanged { key });
        info!(%key, enabled = !current, "Option toggled");

        if OptionPolicy::for_key(key).reinit {
            self.reinitialize().await;
        }
        Ok(!current)
    }

    pub async fn set_game_install_path(&mut self, path: &str) -> Result<EditOutcome> {
        self.set_option(OptionKey::GameInstallPath, path.into()).await
    }

    pub async fn set_grasscutter_jar_path(&mut self, path: &str) -> Result<EditOutcome> {
        self.set_option(OptionKey::GrasscutterJarPath, path.into()).await
    }

    pub async fn set_java_path(&mut self, path: &str) -> Result<EditOutcome> {
        self.set_option(OptionKey::JavaPath, path.into()).await
    }

    pub async fn set_extra_tool_path(&mut self, path: &str) -> Result<EditOutcome> {
        self.set_option(OptionKey::ExtraToolPath, path.into()).await
    }

    pub async fn set_client_version(&mut self, version: &str) -> Result<EditOutcome> {
        self.set_option(OptionKey::ClientVersion, version.into()).await
    }

    pub async fn set_language(&mut self, language: &str) -> Result<EditOutcome> {
        self.set_option(OptionKey::Language, language.into()).await
    }

    pub async fn set_theme(&mut self, theme: &str) -> Result<EditOutcome> {
        self.set_option(OptionKey::Theme, theme.into()).await
    }

    pub async fn set_background(&mut self, value: &str) -> Result<EditOutcome> {
        self.set_option(OptionKey::CustomBackground, value.into()).await
    }

    pub async fn set_swag_mode(&mut self, enabled: bool) -> Result<EditOutcome> {
        self.set_option(OptionKey::SwagMode, enabled.into()).await
    }

    pub async fn toggle_grasscutter_with_game(&mut self) -> Result<bool> {
        self.toggle_option(OptionKey::GrasscutterWithGame).await
    }

    /// Store an empty background and reload
    pub async fn clear_background(&mut self) -> Result<EditOutcome> {
        if let Err(e) = self.services.background().set_background("").await {
            return Err(self.report(OptionKey::CustomBackground, e));
        }
        self.view.custom_background.clear();
        self.emit(SettingsEvent::OptionChanged {
            key: OptionKey::CustomBackground,
        });
        self.reinitialize().await;
        Ok(EditOutcome::Reinitialized)
    }

    /// Flip the encryption flag in the server's config next to the jar
    pub async fn toggle_encryption(&mut self) -> Result<EditOutcome> {
        let policy = OptionPolicy::ENCRYPTION_TOGGLE;

        // The record may have changed since the view was built
        self.view.grasscutter_jar_path = self.persisted_jar_path().await;
        if !self.view.can_toggle_encryption() {
            warn!("Encryption toggle refused: no Grasscutter jar configured");
            self.emit(SettingsEvent::error("Set the Grasscutter jar path before toggling encryption"));
            return Ok(EditOutcome::Refused);
        }

        let server_config = self.services.server_config_path(&self.view.grasscutter_jar_path);
        if let Err(e) = self.services.encryption().toggle(&server_config).await {
            error!(path = ?server_config, error = %e, "Encryption toggle failed");
            self.emit(SettingsEvent::error(format!("Could not toggle encryption: {e}")));
            return Err(e);
        }

        // The server may rewrite its config at any time; trust a fresh read
        self.view.encryption = match self.services.encryption().is_enabled(&server_config).await {
            Ok(enabled) => EncryptionStatus::from_flag(enabled),
            Err(e) => {
                warn!(path = ?server_config, error = %e, "Failed to re-read encryption flag");
                EncryptionStatus::Unknown
            }
        };
        info!(status = ?self.view.encryption, "Encryption toggled");
        self.emit(SettingsEvent::EncryptionChanged {
            status: self.view.encryption,
        });

        if policy.reinit {
            self.reinitialize().await;
            return Ok(EditOutcome::Reinitialized);
        }
        Ok(EditOutcome::Applied)
    }

    /// Discard the view and rebuild it from the persisted record
    pub async fn reinitialize(&mut self) {
        self.view = build_view(&self.services).await;
        self.generation += 1;
        info!(generation = self.generation, "Settings reinitialized");
        self.emit(SettingsEvent::Reinitialized {
            generation: self.generation,
        });
    }

    async fn persisted_jar_path(&self) -> String {
        match self.services.store().get(OptionKey::GrasscutterJarPath).await {
            Ok(value) => value
                .and_then(|v| v.as_text().map(str::to_string))
                .unwrap_or_default(),
            Err(e) => {
                warn!(error = %e, "Configuration unavailable, using displayed jar path");
                self.view.grasscutter_jar_path.clone()
            }
        }
    }

    fn emit(&self, event: SettingsEvent) {
        // The host may have stopped listening
        let _ = self.events.send(event);
    }

    fn report(&self, key: OptionKey, e: Error) -> Error {
        error!(%key, error = %e, "Option edit failed");
        self.emit(SettingsEvent::error(format!("Could not update {key}: {e}")));
        e
    }
}

impl std::fmt::Debug for SettingsController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SettingsController")
            .field("generation", &self.generation)
            .field("view", &self.view)
            .finish()
    }
}

async fn build_view(services: &ServiceHub) -> ViewState {
    let record = match services.store().load_all().await {
        Ok(record) => record,
        Err(e) => {
            warn!(error = %e, "Configuration unavailable, using defaults");
            ConfigurationRecord::default()
        }
    };

    let mut view = ViewState::from_record(&record);

    let (languages, themes, versions) = futures::join!(
        services.catalog().languages(),
        services.catalog().themes(),
        services.resources().versions(),
    );
    view.available_languages = languages;
    view.available_themes = themes;
    view.available_versions = versions;

    view.encryption = match record.grasscutter_jar() {
        Some(jar) => {
            let server_config = services.server_config_path(jar);
            match services.encryption().is_enabled(&server_config).await {
                Ok(enabled) => EncryptionStatus::from_flag(enabled),
                Err(e) => {
                    warn!(path = ?server_config, error = %e, "Encryption flag unreadable");
                    EncryptionStatus::Unknown
                }
            }
        }
        None => EncryptionStatus::Unknown,
    };

    if let Some(version) = record.selected_version() {
        view.metadata_download_link = services
            .resources()
            .read_cached_for(version)
            .await
            .and_then(|entry| entry.metadata_backup_link);
    }

    view
}
