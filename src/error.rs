//! Error types for the settings controller
//!
//! Centralized error handling using snafu for ergonomic error definitions.

use snafu::Snafu;
use std::path::PathBuf;

/// Main error type for the settings controller
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    /// The configuration record file is missing, unreadable or corrupt
    #[snafu(display("Configuration store unavailable at {}: {message}", path.display()))]
    StoreUnavailable { path: PathBuf, message: String },

    /// An encryption operation targeted a server config that does not exist
    #[snafu(display("Server config missing: {}", path.display()))]
    ServerConfigMissing { path: PathBuf },

    /// The server config exists but could not be interpreted
    #[snafu(display("Server config invalid at {}: {message}", path.display()))]
    ServerConfigInvalid { path: PathBuf, message: String },

    /// Filesystem bridge copy failure
    #[snafu(display(
        "Failed to copy {} into {}: {source}",
        source_path.display(),
        destination.display()
    ))]
    CopyFailed {
        source_path: PathBuf,
        destination: PathBuf,
        source: std::io::Error,
    },

    /// Background import failed; nothing was persisted
    #[snafu(display("Failed to import background {value}: {source}"))]
    ImportFailed { value: String, source: Box<Error> },

    /// Resource metadata could not be fetched for a version
    #[snafu(display("Failed to refresh resource cache for {version}: {message}"))]
    CacheRefreshFailed { version: String, message: String },

    /// Invalid input or configuration
    #[snafu(display("Invalid: {message}"))]
    Invalid { message: String },

    /// IO error (file operations)
    #[snafu(display("IO error: {source}"))]
    Io { source: std::io::Error },

    /// JSON serialization/deserialization error
    #[snafu(display("JSON error: {source}"))]
    Json { source: serde_json::Error },

    /// TOML deserialization error
    #[snafu(display("TOML parse error: {source}"))]
    TomlDe { source: toml::de::Error },

    /// HTTP transport error
    #[snafu(display("HTTP error: {source}"))]
    Http { source: reqwest::Error },
}

impl Error {
    /// Whether the caller should fall back to a default configuration record
    pub fn is_store_unavailable(&self) -> bool {
        matches!(self, Error::StoreUnavailable { .. })
    }
}

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io { source }
    }
}

impl From<serde_json::Error> for Error {
    fn from(source: serde_json::Error) -> Self {
        Error::Json { source }
    }
}

impl From<toml::de::Error> for Error {
    fn from(source: toml::de::Error) -> Self {
        Error::TomlDe { source }
    }
}

impl From<reqwest::Error> for Error {
    fn from(source: reqwest::Error) -> Self {
        Error::Http { source }
    }
}

/// Result type alias for convenience
pub type Result<T, E = Error> = std::result::Result<T, E>;
