//! YAML front matter for notice documents.
//!
//! A notice document is Markdown with an optional YAML block on top:
//!
//! ```text
//! ---
//! version: "1.1"
//! title: Privacy notice
//! updated: 2024-03-01
//! ---
//! # Privacy notice
//! ...
//! ```
//!
//! Only `version` is interpreted. Every other key is kept in an open
//! [`FrontMatter::extra`] map so templates can reach it without the record
//! type growing a field per key.

use serde_json::Value;
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FrontMatterError {
    #[error("front matter opened with --- but never closed")]
    Unterminated,
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("front matter must be a mapping of keys to values")]
    NotAMapping,
    #[error("front matter key is not a string: {0}")]
    NonStringKey(String),
    #[error("version must be a string or a number")]
    InvalidVersion,
    #[error("value of '{0}' cannot be represented as JSON: {1}")]
    Value(String, serde_json::Error),
}

/// Parsed front matter: the version plus everything else.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrontMatter {
    /// Declared version, `None` when absent or empty.
    pub version: Option<String>,
    /// All other keys, in key order.
    pub extra: BTreeMap<String, Value>,
}

/// A document split into front matter and Markdown body.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub front_matter: FrontMatter,
    pub body: String,
}

/// Parse a whole document.
///
/// Documents without a leading `---` line have empty front matter and the
/// full input as body.
pub fn parse(raw: &str) -> Result<Document, FrontMatterError> {
    let (yaml, body) = split(raw)?;
    let front_matter = match yaml {
        Some(yaml) => parse_yaml(yaml)?,
        None => FrontMatter::default(),
    };
    Ok(Document {
        front_matter,
        body: body.to_string(),
    })
}

/// Split `raw` into the YAML block (without delimiters) and the body.
fn split(raw: &str) -> Result<(Option<&str>, &str), FrontMatterError> {
    let mut lines = raw.split_inclusive('\n');
    let Some(first) = lines.next() else {
        return Ok((None, raw));
    };
    if first.trim_end() != "---" {
        return Ok((None, raw));
    }

    let yaml_start = first.len();
    let mut offset = yaml_start;
    for line in lines {
        if line.trim_end() == "---" {
            let yaml = &raw[yaml_start..offset];
            let body = &raw[offset + line.len()..];
            return Ok((Some(yaml), body));
        }
        offset += line.len();
    }
    Err(FrontMatterError::Unterminated)
}

fn parse_yaml(yaml: &str) -> Result<FrontMatter, FrontMatterError> {
    let value: serde_yaml::Value = serde_yaml::from_str(yaml)?;
    let mapping = match value {
        serde_yaml::Value::Null => return Ok(FrontMatter::default()),
        serde_yaml::Value::Mapping(m) => m,
        _ => return Err(FrontMatterError::NotAMapping),
    };

    let mut front_matter = FrontMatter::default();
    for (key, value) in mapping {
        let key = match key {
            serde_yaml::Value::String(s) => s,
            other => return Err(FrontMatterError::NonStringKey(format!("{other:?}"))),
        };
        if key == "version" {
            front_matter.version = version_string(&value)?;
        } else {
            let json =
                serde_json::to_value(&value).map_err(|e| FrontMatterError::Value(key.clone(), e))?;
            front_matter.extra.insert(key, json);
        }
    }
    Ok(front_matter)
}

/// `version: "1.1"` and `version: 1.1` both mean tag `1.1`.
fn version_string(value: &serde_yaml::Value) -> Result<Option<String>, FrontMatterError> {
    let raw = match value {
        serde_yaml::Value::Null => return Ok(None),
        serde_yaml::Value::String(s) => s.trim().to_string(),
        serde_yaml::Value::Number(n) => n.to_string(),
        _ => return Err(FrontMatterError::InvalidVersion),
    };
    Ok(if raw.is_empty() { None } else { Some(raw) })
}
