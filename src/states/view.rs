//! View State
//!
//! In-memory mirror of the configuration record for the options screen, plus
//! fields that are derived rather than persisted. Rebuilt from scratch on
//! every reinitialization.

use crate::constants::{DEFAULT_LANGUAGE, DEFAULT_THEME};
use crate::domain::catalog::LanguageOption;
use crate::domain::config::{ConfigurationRecord, OptionKey, OptionValue};
use serde::Serialize;

/// Encryption flag as last read from the server's config
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EncryptionStatus {
    /// Not read: jar path unset or the server config unreadable
    #[default]
    Unknown,
    Enabled,
    Disabled,
}

impl EncryptionStatus {
    pub fn from_flag(enabled: bool) -> Self {
        if enabled {
            EncryptionStatus::Enabled
        } else {
            EncryptionStatus::Disabled
        }
    }
}

/// State backing the options screen
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ViewState {
    pub game_install_path: String,
    pub grasscutter_jar_path: String,
    pub java_path: String,
    pub client_version: String,
    pub grasscutter_with_game: bool,
    pub language: String,
    pub custom_background: String,
    pub theme: String,
    pub swag_mode: bool,
    pub extra_tool_path: String,

    // Derived, never persisted
    pub available_languages: Vec<LanguageOption>,
    pub available_themes: Vec<String>,
    pub available_versions: Vec<String>,
    pub metadata_download_link: Option<String>,
    pub encryption: EncryptionStatus,
}

fn or_default(value: &str, default: &str) -> String {
    if value.is_empty() {
        default.to_string()
    } else {
        value.to_string()
    }
}

impl ViewState {
    /// Mirror the persisted fields of a record; derived fields start empty
    pub fn from_record(record: &ConfigurationRecord) -> Self {
        let text = |value: &Option<String>| value.clone().unwrap_or_default();
        Self {
            game_install_path: text(&record.game_install_path),
            grasscutter_jar_path: text(&record.grasscutter_jar_path),
            java_path: text(&record.java_path),
            client_version: text(&record.client_version),
            grasscutter_with_game: record.grasscutter_with_game,
            language: or_default(&record.language, DEFAULT_LANGUAGE),
            custom_background: text(&record.custom_background),
            theme: or_default(&record.theme, DEFAULT_THEME),
            swag_mode: record.swag_mode,
            extra_tool_path: text(&record.extra_tool_path),
            ..Default::default()
        }
    }

    /// Mirror a value just persisted for `key`
    pub fn apply(&mut self, key: OptionKey, value: &OptionValue) {
        match (key, value) {
            (OptionKey::GameInstallPath, OptionValue::Text(v)) => self.game_install_path = v.clone(),
            (OptionKey::GrasscutterJarPath, OptionValue::Text(v)) => self.grasscutter_jar_path = v.clone(),
            (OptionKey::JavaPath, OptionValue::Text(v)) => self.java_path = v.clone(),
            (OptionKey::ClientVersion, OptionValue::Text(v)) => self.client_version = v.clone(),
            (OptionKey::GrasscutterWithGame, OptionValue::Flag(v)) => self.grasscutter_with_game = *v,
            (OptionKey::Language, OptionValue::Text(v)) => self.language = or_default(v, DEFAULT_LANGUAGE),
            (OptionKey::CustomBackground, OptionValue::Text(v)) => self.custom_background = v.clone(),
            (OptionKey::Theme, OptionValue::Text(v)) => self.theme = or_default(v, DEFAULT_THEME),
            (OptionKey::SwagMode, OptionValue::Flag(v)) => self.swag_mode = *v,
            (OptionKey::ExtraToolPath, OptionValue::Text(v)) => self.extra_tool_path = v.clone(),
            _ => {}
        }
    }

    /// Encryption can only be toggled once a jar is configured
    pub fn can_toggle_encryption(&self) -> bool {
        !self.grasscutter_jar_path.is_empty()
    }

    /// The metadata download action needs a link from the resource cache
    pub fn can_download_metadata(&self) -> bool {
        self.metadata_download_link.as_deref().is_some_and(|link| !link.is_empty())
    }

    /// The auxiliary tool path is only shown in swag mode
    pub fn extra_tool_visible(&self) -> bool {
        self.swag_mode
    }
}
