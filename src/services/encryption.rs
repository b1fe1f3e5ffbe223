//! Encryption Flag Client
//!
//! Reads and flips the encryption flag inside the Grasscutter server's own
//! `config.json`. The file belongs to the server: it is never created here,
//! and the server may rewrite it at any time, so reads can be stale.

use crate::constants::{ENCRYPTION_FLAG_POINTER, ENCRYPTION_ROUTING_POINTER};
use crate::error::{Error, Result};
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::path::Path;
use tokio::fs;
use tracing::{info, warn};

/// Access to the external server's encryption flag
#[async_trait]
pub trait EncryptionFlagClient: Send + Sync {
    /// Current flag value. Fails with `ServerConfigMissing` when the file
    /// cannot be read.
    async fn is_enabled(&self, server_config: &Path) -> Result<bool>;

    /// Invert the flag and persist it. Each call flips the state.
    async fn toggle(&self, server_config: &Path) -> Result<()>;
}

/// Client for Grasscutter's JSON server config
#[derive(Debug, Clone)]
pub struct ServerConfigFlag {
    flag_pointer: String,
    mirror_pointers: Vec<String>,
}

impl Default for ServerConfigFlag {
    fn default() -> Self {
        Self {
            flag_pointer: ENCRYPTION_FLAG_POINTER.to_string(),
            mirror_pointers: vec![ENCRYPTION_ROUTING_POINTER.to_string()],
        }
    }
}

impl ServerConfigFlag {
    async fn read(&self, path: &Path) -> Result<Value> {
        let content = fs::read_to_string(path).await.map_err(|e| {
            warn!(path = ?path, error = %e, "Server config not readable");
            Error::ServerConfigMissing {
                path: path.to_path_buf(),
            }
        })?;

        serde_json::from_str(&content).map_err(|e| Error::ServerConfigInvalid {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    fn flag(&self, path: &Path, config: &Value) -> Result<bool> {
        match config.pointer(&self.flag_pointer) {
            None | Some(Value::Null) => Ok(false),
            Some(Value::Bool(enabled)) => Ok(*enabled),
            Some(other) => Err(Error::ServerConfigInvalid {
                path: path.to_path_buf(),
                message: format!("{} is not a boolean: {other}", self.flag_pointer),
            }),
        }
    }
}

/// Set the value at a JSON pointer, creating missing intermediate objects
fn set_pointer(root: &mut Value, pointer: &str, value: Value) -> std::result::Result<(), String> {
    let tokens: Vec<String> = pointer
        .split('/')
        .skip(1)
        .map(|token| token.replace("~1", "/").replace("~0", "~"))
        .collect();

    let Some((last, parents)) = tokens.split_last() else {
        return Err(format!("invalid pointer {pointer:?}"));
    };

    let mut current = root;
    for token in parents {
        let Value::Object(map) = current else {
            return Err(format!("{pointer} crosses a non-object at {token:?}"));
        };
        current = map
            .entry(token.clone())
            .or_insert_with(|| Value::Object(Map::new()));
    }

    match current {
        Value::Object(map) => {
            map.insert(last.clone(), value);
            Ok(())
        }
        _ => Err(format!("{pointer} parent is not an object")),
    }
}

#[async_trait]
impl EncryptionFlagClient for ServerConfigFlag {
    async fn is_enabled(&self, server_config: &Path) -> Result<bool> {
        let config = self.read(server_config).await?;
        self.flag(server_config, &config)
    }

    async fn toggle(&self, server_config: &Path) -> Result<()> {
        let mut config = self.read(server_config).await?;
        let enabled = !self.flag(server_config, &config)?;

        for pointer in std::iter::once(&self.flag_pointer).chain(&self.mirror_pointers) {
            set_pointer(&mut config, pointer, Value::Bool(enabled)).map_err(|message| {
                Error::ServerConfigInvalid {
                    path: server_config.to_path_buf(),
                    message,
                }
            })?;
        }

        fs::write(server_config, serde_json::to_string_pretty(&config)?).await?;
        info!(path = ?server_config, enabled, "Server encryption toggled");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SERVER_CONFIG: &str = r#"{
  "folderStructure": { "resources": "./resources" },
  "server": {
    "http": {
      "bindPort": 443,
      "encryption": { "useEncryption": true, "useInRouting": true, "keystore": "./keystore.p12" }
    }
  }
}"#;

    fn write_config(dir: &TempDir, content: &str) -> std::path::PathBuf {
        let path = dir.path().join("config.json");
        std::fs::write(&path, content).expect("write config");
        path
    }

    #[tokio::test]
    async fn test_is_enabled_reads_flag() {
        let dir = TempDir::new().expect("temp dir");
        let path = write_config(&dir, SERVER_CONFIG);

        assert!(ServerConfigFlag::default().is_enabled(&path).await.expect("read"));
    }

    #[tokio::test]
    async fn test_missing_file_is_server_config_missing() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("config.json");
        let client = ServerConfigFlag::default();

        assert!(matches!(
            client.is_enabled(&path).await,
            Err(Error::ServerConfigMissing { .. })
        ));
        assert!(matches!(
            client.toggle(&path).await,
            Err(Error::ServerConfigMissing { .. })
        ));
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_toggle_pair_restores_flag() {
        let dir = TempDir::new().expect("temp dir");
        let path = write_config(&dir, SERVER_CONFIG);
        let client = ServerConfigFlag::default();

        let before = client.is_enabled(&path).await.expect("read");
        client.toggle(&path).await.expect("first toggle");
        assert_eq!(client.is_enabled(&path).await.expect("read"), !before);
        client.toggle(&path).await.expect("second toggle");
        assert_eq!(client.is_enabled(&path).await.expect("read"), before);
    }

    #[tokio::test]
    async fn test_toggle_mirrors_routing_and_keeps_other_fields() {
        let dir = TempDir::new().expect("temp dir");
        let path = write_config(&dir, SERVER_CONFIG);

        ServerConfigFlag::default().toggle(&path).await.expect("toggle");

        let raw = std::fs::read_to_string(&path).expect("read");
        let config: Value = serde_json::from_str(&raw).expect("json");
        assert_eq!(config.pointer("/server/http/encryption/useEncryption"), Some(&Value::Bool(false)));
        assert_eq!(config.pointer("/server/http/encryption/useInRouting"), Some(&Value::Bool(false)));
        assert_eq!(config.pointer("/server/http/bindPort"), Some(&Value::from(443)));
        assert!(raw.find("folderStructure") < raw.find("server"));
    }

    #[tokio::test]
    async fn test_absent_flag_reads_disabled_and_toggles_on() {
        let dir = TempDir::new().expect("temp dir");
        let path = write_config(&dir, r#"{"server": {}}"#);
        let client = ServerConfigFlag::default();

        assert!(!client.is_enabled(&path).await.expect("read"));
        client.toggle(&path).await.expect("toggle");
        assert!(client.is_enabled(&path).await.expect("read"));
    }

    #[tokio::test]
    async fn test_non_boolean_flag_is_invalid() {
        let dir = TempDir::new().expect("temp dir");
        let path = write_config(
            &dir,
            r#"{"server": {"http": {"encryption": {"useEncryption": "yes"}}}}"#,
        );

        assert!(matches!(
            ServerConfigFlag::default().is_enabled(&path).await,
            Err(Error::ServerConfigInvalid { .. })
        ));
    }
}
