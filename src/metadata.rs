//! Per-notice `metadata.json` descriptors.
//!
//! Every notice directory carries a descriptor:
//!
//! ```json
//! {
//!   "name": "App1",
//!   "description": "Privacy notice for App1",
//!   "main_language": "it",
//!   "languages": {
//!     "it": ["1.1", "1.0"],
//!     "en": ["1.0"]
//!   },
//!   "versions": ["1.0", "1.1"]
//! }
//! ```
//!
//! `languages` is the archive history: one list per language, most recent
//! tag first. The archiver is the only writer and only ever appends a tag.
//!
//! Unknown keys survive a load/save round trip so hand-added fields are not
//! lost when the archiver rewrites the file.

use crate::version;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const METADATA_FILE: &str = "metadata.json";

/// Canonical language when a descriptor does not name one.
pub const DEFAULT_MAIN_LANGUAGE: &str = "it";

#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("no metadata.json in {0}")]
    Missing(PathBuf),
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NoticeMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_language: Option<String>,
    /// Archived tags per language, most recent first.
    #[serde(default)]
    pub languages: BTreeMap<String, Vec<String>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub versions: Vec<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl NoticeMetadata {
    /// Load `metadata.json` from a notice directory.
    pub fn load(notice_dir: &Path) -> Result<Self, MetadataError> {
        let path = notice_dir.join(METADATA_FILE);
        if !path.is_file() {
            return Err(MetadataError::Missing(notice_dir.to_path_buf()));
        }
        let content = fs::read_to_string(&path).map_err(|source| MetadataError::Io {
            path: path.clone(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| MetadataError::Json { path, source })
    }

    /// Write `metadata.json` back, pretty-printed with a trailing newline.
    pub fn save(&self, notice_dir: &Path) -> Result<(), MetadataError> {
        let path = notice_dir.join(METADATA_FILE);
        let mut json = serde_json::to_string_pretty(self).map_err(|source| MetadataError::Json {
            path: path.clone(),
            source,
        })?;
        json.push('\n');
        fs::write(&path, json).map_err(|source| MetadataError::Io { path, source })
    }

    pub fn canonical_language(&self) -> &str {
        self.main_language
            .as_deref()
            .filter(|l| !l.is_empty())
            .unwrap_or(DEFAULT_MAIN_LANGUAGE)
    }

    /// Most recent archived tag for a language.
    pub fn latest_recorded(&self, language: &str) -> Option<&str> {
        self.languages
            .get(language)
            .and_then(|tags| tags.first())
            .map(String::as_str)
    }

    /// Add `tag` to a language's history, keeping it sorted most recent first.
    ///
    /// Returns `false` when the tag was already recorded; the list is then
    /// left exactly as it was.
    pub fn record_version(&mut self, language: &str, tag: &str) -> bool {
        let tags = self.languages.entry(language.to_string()).or_default();
        if tags.iter().any(|t| t == tag) {
            return false;
        }
        tags.push(tag.to_string());
        version::sort_descending(tags);
        true
    }
}
