//! Launcher Constants
//!
//! Persisted key names, directory names and defaults shared across modules.

/// Persisted option keys in the configuration record
pub const KEY_GAME_INSTALL_PATH: &str = "game_install_path";
pub const KEY_GRASSCUTTER_PATH: &str = "grasscutter_path";
pub const KEY_JAVA_PATH: &str = "java_path";
pub const KEY_CLIENT_VERSION: &str = "client_version";
pub const KEY_GRASSCUTTER_WITH_GAME: &str = "grasscutter_with_game";
pub const KEY_LANGUAGE: &str = "language";
pub const KEY_CUSTOM_BACKGROUND: &str = "customBackground";
pub const KEY_THEME: &str = "theme";
pub const KEY_SWAG_MODE: &str = "swag_mode";
pub const KEY_AKEBI_PATH: &str = "akebi_path";

/// Defaults for a freshly created record
pub const DEFAULT_LANGUAGE: &str = "en";
pub const DEFAULT_THEME: &str = "default";

/// Launcher-owned subdirectory of the application data directory
pub const APP_DIR_NAME: &str = "cultivation";
/// Background assets live under `<data>/cultivation/bg/`
pub const BACKGROUND_DIR_NAME: &str = "bg";
pub const THEMES_DIR_NAME: &str = "themes";
pub const LANG_DIR_NAME: &str = "lang";
pub const LOG_DIR_NAME: &str = "logs";

pub const CONFIG_FILE_NAME: &str = "configuration.json";
pub const RESOURCE_CACHE_FILE_NAME: &str = "resources_cache.json";
pub const LAUNCHER_CONFIG_FILE_NAME: &str = "cultivation-settings.toml";
pub const THEME_INDEX_FILE_NAME: &str = "index.json";

/// Server-owned config file next to the grasscutter jar
pub const SERVER_CONFIG_FILE_NAME: &str = "config.json";

/// JSON pointers into the server-owned config
pub const ENCRYPTION_FLAG_POINTER: &str = "/server/http/encryption/useEncryption";
pub const ENCRYPTION_ROUTING_POINTER: &str = "/server/http/encryption/useInRouting";

/// Version metadata index
pub const RESOURCE_INDEX_FILE_NAME: &str = "index.json";
pub const REQUEST_TIMEOUT_SECS: u64 = 30;
