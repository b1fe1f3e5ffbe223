//! Option Catalog
//!
//! Enumerates selectable languages and themes. Translation and theme loading
//! themselves live elsewhere; this only lists what can be chosen.

use crate::constants::{DEFAULT_LANGUAGE, DEFAULT_THEME, THEME_INDEX_FILE_NAME};
use crate::domain::catalog::{LanguageOption, ThemeIndex};
use async_trait::async_trait;
use serde::Deserialize;
use std::path::PathBuf;
use tokio::fs;
use tracing::warn;

#[async_trait]
pub trait OptionCatalog: Send + Sync {
    async fn languages(&self) -> Vec<LanguageOption>;
    async fn themes(&self) -> Vec<String>;
}

#[derive(Deserialize)]
struct LanguageFile {
    language_name: String,
}

/// Catalog read from `lang/*.json` and `themes/*/index.json`
#[derive(Debug, Clone)]
pub struct DirectoryCatalog {
    lang_dir: PathBuf,
    themes_dir: PathBuf,
}

impl DirectoryCatalog {
    pub fn new(lang_dir: impl Into<PathBuf>, themes_dir: impl Into<PathBuf>) -> Self {
        Self {
            lang_dir: lang_dir.into(),
            themes_dir: themes_dir.into(),
        }
    }

    async fn read_languages(&self) -> std::io::Result<Vec<LanguageOption>> {
        let mut languages = Vec::new();
        let mut entries = fs::read_dir(&self.lang_dir).await?;

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().is_none_or(|ext| ext != "json") {
                continue;
            }
            let Some(code) = path.file_stem().map(|stem| stem.to_string_lossy().to_string()) else {
                continue;
            };

            let content = fs::read_to_string(&path).await?;
            match serde_json::from_str::<LanguageFile>(&content) {
                Ok(file) => languages.push(LanguageOption::new(code, file.language_name)),
                Err(e) => warn!(path = ?path, error = %e, "Skipping language file"),
            }
        }

        languages.sort_by(|a, b| a.code.cmp(&b.code));
        Ok(languages)
    }

    async fn read_themes(&self) -> std::io::Result<Vec<String>> {
        let mut themes = Vec::new();
        let mut entries = fs::read_dir(&self.themes_dir).await?;

        while let Some(entry) = entries.next_entry().await? {
            if !entry.file_type().await?.is_dir() {
                continue;
            }
            let index = entry.path().join(THEME_INDEX_FILE_NAME);
            let Ok(content) = fs::read_to_string(&index).await else {
                continue;
            };
            match serde_json::from_str::<ThemeIndex>(&content) {
                Ok(theme) => themes.push(theme.name),
                Err(e) => warn!(path = ?index, error = %e, "Skipping theme"),
            }
        }

        themes.sort();
        Ok(themes)
    }
}

#[async_trait]
impl OptionCatalog for DirectoryCatalog {
    async fn languages(&self) -> Vec<LanguageOption> {
        match self.read_languages().await {
            Ok(languages) if !languages.is_empty() => languages,
            Ok(_) => vec![LanguageOption::new(DEFAULT_LANGUAGE, "English")],
            Err(e) => {
                warn!(dir = ?self.lang_dir, error = %e, "Failed to list languages");
                vec![LanguageOption::new(DEFAULT_LANGUAGE, "English")]
            }
        }
    }

    /// `default` first, then every installed theme
    async fn themes(&self) -> Vec<String> {
        let installed = self.read_themes().await.unwrap_or_else(|e| {
            warn!(dir = ?self.themes_dir, error = %e, "Failed to list themes");
            Vec::new()
        });

        std::iter::once(DEFAULT_THEME.to_string())
            .chain(installed.into_iter().filter(|name| name != DEFAULT_THEME))
            .collect()
    }
}
