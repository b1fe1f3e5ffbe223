//! Catalog - Selectable Languages and Themes

use serde::{Deserialize, Serialize};

/// A selectable UI language
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageOption {
    /// Language code, also the translation file stem (e.g. "en")
    pub code: String,
    /// Human-readable name shown in the selector
    pub name: String,
}

impl LanguageOption {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }
}

/// Theme metadata file (`themes/<dir>/index.json`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeIndex {
    pub name: String,
}
