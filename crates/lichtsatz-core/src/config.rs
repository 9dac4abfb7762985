// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Application configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::PageSize;

/// Persistent application settings.
///
/// Per-request options (`DocumentOptions`) are seeded from these defaults and
/// may be overridden on each invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Default page size for new documents.
    pub default_page_size: PageSize,
    /// Place the uploaded photo on the page by default.
    pub include_photo: bool,
    /// Run text recognition by default.
    pub extract_text: bool,
    /// Recognition language passed to both engines (tesseract language code).
    pub ocr_language: String,
    /// Override directory for the fallback engine's model files.
    /// `None` means the default cache location.
    pub ocr_model_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_page_size: PageSize::A4,
            include_photo: true,
            extract_text: true,
            ocr_language: "eng".to_string(),
            ocr_model_dir: None,
        }
    }
}

impl AppConfig {
    /// Load settings from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Write settings to a JSON file (pretty-printed).
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), contents)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_upload_form() {
        let config = AppConfig::default();
        assert_eq!(config.default_page_size, PageSize::A4);
        assert!(config.include_photo);
        assert!(config.extract_text);
        assert_eq!(config.ocr_language, "eng");
        assert!(config.ocr_model_dir.is_none());
    }

    #[test]
    fn round_trips_through_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = AppConfig::default();
        config.default_page_size = PageSize::Letter;
        config.extract_text = false;
        config.save(&path).unwrap();

        let loaded = AppConfig::load(&path).unwrap();
        assert_eq!(loaded.default_page_size, PageSize::Letter);
        assert!(!loaded.extract_text);
        assert_eq!(loaded.ocr_language, "eng");
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: AppConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.default_page_size, PageSize::A4);
        assert_eq!(config.ocr_language, "eng");
    }
}
