//! Resources - Version-Keyed Metadata Cache Types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Metadata document published for one client version
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionResources {
    /// Backup download for the client's metadata
    #[serde(default)]
    pub metadata_backup_link: Option<String>,
}

/// Cached metadata for the selected client version
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    /// Client version this entry was built for
    pub version: String,
    /// Backup download for the client's metadata
    pub metadata_backup_link: Option<String>,
    /// When the entry was fetched
    pub fetched_at: DateTime<Utc>,
}

impl CacheEntry {
    /// Build an entry from a freshly fetched document
    pub fn new(version: impl Into<String>, resources: VersionResources) -> Self {
        Self {
            version: version.into(),
            metadata_backup_link: resources.metadata_backup_link.filter(|link| !link.is_empty()),
            fetched_at: Utc::now(),
        }
    }

    /// Whether this entry belongs to `version`
    pub fn is_for(&self, version: &str) -> bool {
        self.version == version
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_backup_link_is_absent() {
        let entry = CacheEntry::new(
            "4.0",
            VersionResources {
                metadata_backup_link: Some(String::new()),
            },
        );
        assert_eq!(entry.metadata_backup_link, None);
        assert!(entry.is_for("4.0"));
        assert!(!entry.is_for("4.1"));
    }

    #[test]
    fn test_resources_document_tolerates_extra_fields() {
        let json = r#"{"metadata_backup_link": "https://cache/4.0.zip", "patch": "x"}"#;
        let doc: VersionResources = serde_json::from_str(json).expect("parse document");
        assert_eq!(doc.metadata_backup_link.as_deref(), Some("https://cache/4.0.zip"));
    }
}
