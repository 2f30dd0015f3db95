//! UI strings per language.
//!
//! Each `locales/<lang>.json` file is a tree of strings:
//!
//! ```json
//! {
//!   "read": "Leggi",
//!   "languages": { "it": "Italiano", "en": "English" },
//!   "apps": { "app1": { "name": "App1" } }
//! }
//! ```
//!
//! Keys are dotted paths into that tree (`apps.app1.name`). A [`Translator`]
//! binds one language to its table; render functions receive it explicitly.
//! There is no process-wide "current language".

use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

#[derive(Error, Debug)]
pub enum LocaleError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid locale file {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// A node in a locale string tree.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Entry {
    Text(String),
    Table(BTreeMap<String, Entry>),
}

/// Why a dotted key did not resolve to a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// Some segment of the key does not exist.
    Missing,
    /// The key names a table, not a string.
    NotText,
}

/// One language's string tree.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct LocaleTable(BTreeMap<String, Entry>);

impl LocaleTable {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Resolve a dotted key to a string.
    pub fn lookup(&self, key: &str) -> Result<&str, LookupError> {
        let mut segments = key.split('.');
        let first = segments.next().ok_or(LookupError::Missing)?;
        let entry = self.0.get(first).ok_or(LookupError::Missing)?;
        lookup_entry(entry, segments)
    }
}

fn lookup_entry<'a, 'k>(
    entry: &'a Entry,
    mut rest: impl Iterator<Item = &'k str>,
) -> Result<&'a str, LookupError> {
    match (entry, rest.next()) {
        (Entry::Text(text), None) => Ok(text.as_str()),
        (Entry::Table(_), None) => Err(LookupError::NotText),
        (Entry::Text(_), Some(_)) => Err(LookupError::Missing),
        (Entry::Table(children), Some(segment)) => {
            let child = children.get(segment).ok_or(LookupError::Missing)?;
            lookup_entry(child, rest)
        }
    }
}

/// Every loaded locale table, keyed by language code.
#[derive(Debug, Clone, Default)]
pub struct Locales {
    tables: BTreeMap<String, LocaleTable>,
    default_language: String,
}

impl Locales {
    pub fn new(tables: BTreeMap<String, LocaleTable>, default_language: &str) -> Self {
        Self {
            tables,
            default_language: default_language.to_string(),
        }
    }

    /// Load every `<lang>.json` in `dir`.
    ///
    /// A missing directory gives an empty set. Files that fail to read or
    /// parse are skipped with a warning.
    pub fn load(dir: &Path, default_language: &str) -> Self {
        let mut tables = BTreeMap::new();
        if !dir.is_dir() {
            warn!("locales directory {} not found", dir.display());
            return Self::new(tables, default_language);
        }

        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("cannot read locales directory {}: {e}", dir.display());
                return Self::new(tables, default_language);
            }
        };
        let mut files: Vec<PathBuf> = entries
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.is_file() && p.extension().is_some_and(|e| e == "json"))
            .collect();
        files.sort();

        for path in files {
            let Some(code) = path.file_stem().map(|s| s.to_string_lossy().to_string()) else {
                continue;
            };
            match load_table(&path) {
                Ok(table) => {
                    tables.insert(code, table);
                }
                Err(e) => warn!("could not load locale file: {e}"),
            }
        }
        Self::new(tables, default_language)
    }

    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    pub fn is_supported(&self, language: &str) -> bool {
        self.tables.contains_key(language)
    }

    /// A translator for `language`, using the default language's table when
    /// `language` has none.
    pub fn translator(&self, language: &str) -> Translator<'_> {
        let table = self
            .tables
            .get(language)
            .or_else(|| self.tables.get(&self.default_language));
        Translator {
            language: language.to_string(),
            table,
        }
    }
}

fn load_table(path: &Path) -> Result<LocaleTable, LocaleError> {
    let content = fs::read_to_string(path).map_err(|source| LocaleError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    LocaleTable::from_json(&content).map_err(|source| LocaleError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Strings for one language.
#[derive(Debug, Clone)]
pub struct Translator<'a> {
    language: String,
    table: Option<&'a LocaleTable>,
}

impl<'a> Translator<'a> {
    pub fn new(language: &str, table: Option<&'a LocaleTable>) -> Self {
        Self {
            language: language.to_string(),
            table,
        }
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// Explicit lookup, for callers that need to know whether a key exists.
    pub fn lookup(&self, key: &str) -> Result<&'a str, LookupError> {
        self.table.ok_or(LookupError::Missing)?.lookup(key)
    }

    /// The string for `key`, or the key itself when it does not resolve.
    pub fn t(&self, key: &str) -> String {
        self.lookup(key).unwrap_or(key).to_string()
    }

    /// The string for `key`, or `default` when it does not resolve.
    pub fn t_or(&self, key: &str, default: &str) -> String {
        self.lookup(key).unwrap_or(default).to_string()
    }

    /// Like [`t`](Self::t), replacing every `{name}` with its value.
    pub fn t_with(&self, key: &str, params: &[(&str, &str)]) -> String {
        fill(&self.t(key), params)
    }

    /// Display name of a language in this translator's language, falling
    /// back to its native name.
    pub fn language_label(&self, code: &str) -> String {
        self.lookup(&format!("languages.{code}"))
            .map(str::to_string)
            .unwrap_or_else(|_| language_name(code))
    }
}

/// Replace every `{name}` in `template` with its value.
pub fn fill(template: &str, params: &[(&str, &str)]) -> String {
    let mut text = template.to_string();
    for (name, value) in params {
        text = text.replace(&format!("{{{name}}}"), value);
    }
    text
}

/// Native name of a language code, or the code uppercased.
pub fn language_name(code: &str) -> String {
    match code {
        "it" => "Italiano".to_string(),
        "en" => "English".to_string(),
        "fr" => "Français".to_string(),
        "de" => "Deutsch".to_string(),
        "sl" => "Slovenščina".to_string(),
        "es" => "Español".to_string(),
        other => other.to_uppercase(),
    }
}
