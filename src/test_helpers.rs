//! Shared test utilities for the notice-press test suite.
//!
//! Provides tree builders that write notices into a temp directory, plus
//! lookups that panic with a clear message on a miss.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = TempDir::new().unwrap();
//! write_metadata(tmp.path(), "app1", r#"{"main_language":"it"}"#);
//! write_latest(tmp.path(), "app1", "it", "1.1", "Testo.\n");
//!
//! let catalog = Catalog::load(tmp.path());
//! let notice = find_notice(&catalog, "app1");
//! assert_eq!(record_order(notice, "it"), vec![("1.1", true)]);
//! ```

use std::fs;
use std::path::Path;
use tempfile::TempDir;

use crate::catalog::{Catalog, Notice};

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/site/` to a temp directory and return it.
///
/// Tests get an isolated copy they can archive into without touching the
/// source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/site");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

// =========================================================================
// Tree builders (paths are relative to a notices root)
// =========================================================================

/// Write `content` at `root/rel`, creating parent directories.
pub fn write_file(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

pub fn write_metadata(root: &Path, notice: &str, json: &str) {
    write_file(root, &format!("{notice}/metadata.json"), json);
}

/// Write `<notice>/<lang>/latest.md` declaring `version`.
pub fn write_latest(root: &Path, notice: &str, lang: &str, version: &str, body: &str) {
    write_file(
        root,
        &format!("{notice}/{lang}/latest.md"),
        &document(version, body),
    );
}

/// Write `<notice>/<lang>/v<version>/notice.md`.
pub fn write_snapshot(root: &Path, notice: &str, lang: &str, version: &str, body: &str) {
    write_file(
        root,
        &format!("{notice}/{lang}/v{version}/notice.md"),
        &document(version, body),
    );
}

fn document(version: &str, body: &str) -> String {
    format!("---\nversion: \"{version}\"\n---\n{body}")
}

// =========================================================================
// Metadata readers
// =========================================================================

pub fn read_metadata_text(root: &Path, notice: &str) -> String {
    fs::read_to_string(root.join(notice).join("metadata.json")).unwrap()
}

/// `languages.<lang>` from a notice's metadata.json.
pub fn recorded_versions(root: &Path, notice: &str, lang: &str) -> Vec<String> {
    let value: serde_json::Value = serde_json::from_str(&read_metadata_text(root, notice)).unwrap();
    value["languages"][lang]
        .as_array()
        .unwrap_or_else(|| panic!("no languages.{lang} in {notice}/metadata.json"))
        .iter()
        .map(|v| v.as_str().unwrap().to_string())
        .collect()
}

// =========================================================================
// Catalog lookups (panic with a clear message on miss)
// =========================================================================

/// Find a notice by id. Panics if not found.
pub fn find_notice<'a>(catalog: &'a Catalog, id: &str) -> &'a Notice {
    catalog.find_notice(id).unwrap_or_else(|| {
        let ids = notice_ids(catalog);
        panic!("notice '{id}' not found. Available: {ids:?}")
    })
}

/// All notice ids in catalog order.
pub fn notice_ids(catalog: &Catalog) -> Vec<&str> {
    catalog.notices().iter().map(|n| n.id.as_str()).collect()
}

/// `(version, is_latest)` for each record of a language, in record order.
pub fn record_order<'a>(notice: &'a Notice, lang: &str) -> Vec<(&'a str, bool)> {
    notice
        .records(lang)
        .iter()
        .map(|r| (r.version.as_str(), r.is_latest))
        .collect()
}
