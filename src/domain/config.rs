//! Config - Persisted Launcher Configuration
//!
//! The configuration record is a flat map of option name to value. Every
//! option is independently settable; no combination is rejected here.

use crate::constants::*;
use crate::error::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Persisted launcher configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigurationRecord {
    /// Game executable
    pub game_install_path: Option<String>,
    /// Grasscutter server jar; its directory holds the server's own config
    #[serde(rename = "grasscutter_path")]
    pub grasscutter_jar_path: Option<String>,
    /// Java runtime used to start the server
    pub java_path: Option<String>,
    /// Selected client version
    pub client_version: Option<String>,
    /// Start the server together with the game
    pub grasscutter_with_game: bool,
    /// UI language code
    #[serde(deserialize_with = "language_or_default")]
    pub language: String,
    /// Background image URL or local asset path
    #[serde(rename = "customBackground")]
    pub custom_background: Option<String>,
    /// UI theme name
    #[serde(deserialize_with = "theme_or_default")]
    pub theme: String,
    /// Enables the auxiliary tool options
    pub swag_mode: bool,
    /// Auxiliary tool location, only shown with swag mode
    #[serde(rename = "akebi_path")]
    pub extra_tool_path: Option<String>,
}

impl Default for ConfigurationRecord {
    fn default() -> Self {
        Self {
            game_install_path: None,
            grasscutter_jar_path: None,
            java_path: None,
            client_version: None,
            grasscutter_with_game: false,
            language: DEFAULT_LANGUAGE.to_string(),
            custom_background: None,
            theme: DEFAULT_THEME.to_string(),
            swag_mode: false,
            extra_tool_path: None,
        }
    }
}

/// A persisted `null` reads as `default`
fn null_as<'de, D>(deserializer: D, default: &str) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_else(|| default.to_string()))
}

fn language_or_default<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    null_as(deserializer, DEFAULT_LANGUAGE)
}

fn theme_or_default<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    null_as(deserializer, DEFAULT_THEME)
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

impl ConfigurationRecord {
    /// Grasscutter jar path, `None` when unset or empty
    pub fn grasscutter_jar(&self) -> Option<&str> {
        non_empty(&self.grasscutter_jar_path)
    }

    /// Client version, `None` when unset or empty
    pub fn selected_version(&self) -> Option<&str> {
        non_empty(&self.client_version)
    }

    /// Read one option by key
    pub fn get(&self, key: OptionKey) -> Option<OptionValue> {
        let text = |value: &Option<String>| value.clone().map(OptionValue::Text);
        match key {
            OptionKey::GameInstallPath => text(&self.game_install_path),
            OptionKey::GrasscutterJarPath => text(&self.grasscutter_jar_path),
            OptionKey::JavaPath => text(&self.java_path),
            OptionKey::ClientVersion => text(&self.client_version),
            OptionKey::GrasscutterWithGame => Some(OptionValue::Flag(self.grasscutter_with_game)),
            OptionKey::Language => Some(OptionValue::Text(self.language.clone())),
            OptionKey::CustomBackground => text(&self.custom_background),
            OptionKey::Theme => Some(OptionValue::Text(self.theme.clone())),
            OptionKey::SwagMode => Some(OptionValue::Flag(self.swag_mode)),
            OptionKey::ExtraToolPath => text(&self.extra_tool_path),
        }
    }
}

/// Kind of value an option holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Text,
    Flag,
}

/// Addressable option in the configuration record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionKey {
    GameInstallPath,
    GrasscutterJarPath,
    JavaPath,
    ClientVersion,
    GrasscutterWithGame,
    Language,
    CustomBackground,
    Theme,
    SwagMode,
    ExtraToolPath,
}

impl OptionKey {
    pub const ALL: [OptionKey; 10] = [
        OptionKey::GameInstallPath,
        OptionKey::GrasscutterJarPath,
        OptionKey::JavaPath,
        OptionKey::ClientVersion,
        OptionKey::GrasscutterWithGame,
        OptionKey::Language,
        OptionKey::CustomBackground,
        OptionKey::Theme,
        OptionKey::SwagMode,
        OptionKey::ExtraToolPath,
    ];

    /// Key name in the persisted record
    pub fn as_str(self) -> &'static str {
        match self {
            OptionKey::GameInstallPath => KEY_GAME_INSTALL_PATH,
            OptionKey::GrasscutterJarPath => KEY_GRASSCUTTER_PATH,
            OptionKey::JavaPath => KEY_JAVA_PATH,
            OptionKey::ClientVersion => KEY_CLIENT_VERSION,
            OptionKey::GrasscutterWithGame => KEY_GRASSCUTTER_WITH_GAME,
            OptionKey::Language => KEY_LANGUAGE,
            OptionKey::CustomBackground => KEY_CUSTOM_BACKGROUND,
            OptionKey::Theme => KEY_THEME,
            OptionKey::SwagMode => KEY_SWAG_MODE,
            OptionKey::ExtraToolPath => KEY_AKEBI_PATH,
        }
    }

    pub fn kind(self) -> ValueKind {
        match self {
            OptionKey::GrasscutterWithGame | OptionKey::SwagMode => ValueKind::Flag,
            _ => ValueKind::Text,
        }
    }

    /// Ensure a value matches this option's kind
    pub fn check(self, value: &OptionValue) -> Result<()> {
        if value.kind() == self.kind() {
            Ok(())
        } else {
            Err(Error::Invalid {
                message: format!("{value:?} is not a valid value for {self}"),
            })
        }
    }

    /// Parse a raw string into a value of this option's kind
    pub fn parse_value(self, raw: &str) -> Result<OptionValue> {
        match self.kind() {
            ValueKind::Text => Ok(OptionValue::Text(raw.to_string())),
            ValueKind::Flag => raw.parse::<bool>().map(OptionValue::Flag).map_err(|_| Error::Invalid {
                message: format!("{self} expects true or false, got {raw:?}"),
            }),
        }
    }
}

impl fmt::Display for OptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OptionKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        OptionKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| Error::Invalid {
                message: format!("Unknown option: {s}"),
            })
    }
}

/// Value of a single option
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Flag(bool),
    Text(String),
}

impl OptionValue {
    pub fn kind(&self) -> ValueKind {
        match self {
            OptionValue::Flag(_) => ValueKind::Flag,
            OptionValue::Text(_) => ValueKind::Text,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            OptionValue::Text(text) => Some(text),
            OptionValue::Flag(_) => None,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            OptionValue::Flag(flag) => Some(*flag),
            OptionValue::Text(_) => None,
        }
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        OptionValue::Text(value.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        OptionValue::Text(value)
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        OptionValue::Flag(value)
    }
}
