//! ConfigStore - Configuration Record Persistence
//!
//! Async key-value access to the launcher's configuration record. Each `set`
//! is durable before it returns; there is no transaction spanning keys.

use crate::domain::config::{ConfigurationRecord, OptionKey, OptionValue};
use crate::error::{Error, Result};
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Key-value persistence for the configuration record
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Read the whole record. Fails with `StoreUnavailable` when the backing
    /// file is missing or unreadable.
    async fn load_all(&self) -> Result<ConfigurationRecord>;

    /// Read a single option
    async fn get(&self, key: OptionKey) -> Result<Option<OptionValue>>;

    /// Write a single option; the write is on disk when this returns
    async fn set(&self, key: OptionKey, value: OptionValue) -> Result<()>;
}

/// JSON file backed store
///
/// Keys this crate does not know about are kept as-is on every write.
pub struct JsonConfigStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write a default record if no file exists yet. Returns whether one was created.
    pub async fn ensure_initialized(&self) -> Result<bool> {
        let _guard = self.write_lock.lock().await;
        if fs::try_exists(&self.path).await? {
            return Ok(false);
        }

        let defaults = serde_json::to_value(ConfigurationRecord::default())?;
        let Value::Object(map) = defaults else {
            return Err(Error::Invalid {
                message: "Default configuration did not serialize to an object".to_string(),
            });
        };
        self.write_map(&map).await?;
        info!(path = ?self.path, "Created default configuration");
        Ok(true)
    }

    fn unavailable(&self, message: impl Into<String>) -> Error {
        Error::StoreUnavailable {
            path: self.path.clone(),
            message: message.into(),
        }
    }

    async fn read_map(&self) -> Result<Map<String, Value>> {
        let content = fs::read_to_string(&self.path)
            .await
            .map_err(|e| self.unavailable(e.to_string()))?;

        if content.trim().is_empty() {
            return Ok(Map::new());
        }

        match serde_json::from_str::<Value>(&content) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(_) => Err(self.unavailable("configuration is not a JSON object")),
            Err(e) => Err(self.unavailable(e.to_string())),
        }
    }

    async fn write_map(&self, map: &Map<String, Value>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let content = serde_json::to_string_pretty(map)?;
        let tmp_path = self.path.with_extension("json.tmp");

        let mut file = fs::File::create(&tmp_path).await?;
        file.write_all(content.as_bytes()).await?;
        file.sync_all().await?;
        drop(file);

        fs::rename(&tmp_path, &self.path).await?;
        Ok(())
    }
}

fn value_from_json(key: OptionKey, value: &Value) -> Result<Option<OptionValue>> {
    match value {
        Value::Null => Ok(None),
        Value::Bool(flag) => Ok(Some(OptionValue::Flag(*flag))),
        Value::String(text) => Ok(Some(OptionValue::Text(text.clone()))),
        other => Err(Error::Invalid {
            message: format!("Unexpected value for {key}: {other}"),
        }),
    }
}

#[async_trait]
impl ConfigStore for JsonConfigStore {
    async fn load_all(&self) -> Result<ConfigurationRecord> {
        let map = self.read_map().await?;
        serde_json::from_value(Value::Object(map)).map_err(|e| self.unavailable(e.to_string()))
    }

    async fn get(&self, key: OptionKey) -> Result<Option<OptionValue>> {
        let map = self.read_map().await?;
        match map.get(key.as_str()) {
            Some(value) => value_from_json(key, value),
            None => Ok(None),
        }
    }

    async fn set(&self, key: OptionKey, value: OptionValue) -> Result<()> {
        key.check(&value)?;

        let _guard = self.write_lock.lock().await;
        let mut map = if fs::try_exists(&self.path).await? {
            self.read_map().await?
        } else {
            Map::new()
        };

        map.insert(key.as_str().to_string(), serde_json::to_value(&value)?);
        self.write_map(&map).await?;

        debug!(key = %key, "Option persisted");
        Ok(())
    }
}
