//! # Notice Press
//!
//! Versioning and publishing for multilingual legal notices (privacy
//! policies, terms of service). Authors edit one mutable `latest.md` per
//! language; the tool turns every new declared version into an immutable
//! snapshot and builds a site that serves both.
//!
//! # Architecture: Archive, Then Resolve
//!
//! ```text
//! 1. Archive   notices/<id>/<lang>/latest.md  →  v<version>/notice.md + metadata.json
//! 2. Resolve   notices/                        →  Catalog (records, status, pages)
//! 3. Build     Catalog + locales/ + assets/    →  dist/  (or an external command)
//! ```
//!
//! The filesystem is the only data store. Archiving is append-only; the
//! catalog is a read-only view rebuilt on every run.
//!
//! ## Notice Tree
//!
//! ```text
//! notices/
//! └── app1/
//!     ├── metadata.json          # name, description, main_language, languages
//!     ├── it/
//!     │   ├── latest.md          # front matter declares `version: "1.1"`
//!     │   ├── v1.0/notice.md     # immutable snapshot
//!     │   └── v1.1/notice.md
//!     └── en/
//!         └── latest.md
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`version`] | Version tag parsing and numeric ordering |
//! | [`frontmatter`] | `---` delimited YAML front matter splitting |
//! | [`metadata`] | `metadata.json` descriptor load/save and version bookkeeping |
//! | [`tree`] | Directory layout conventions and listing |
//! | [`archive`] | Snapshotting `latest.md` and the `--process-all` run |
//! | [`catalog`] | Read-side model: records, version resolution, translation status |
//! | [`translate`] | Locale string tables and the explicit [`translate::Translator`] |
//! | [`config`] | `config.toml` loading, merging and validation |
//! | [`site`] | The site-build step: external command or built-in generator |
//! | [`generate`] | Built-in HTML renderer using Maud |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Numeric Version Ordering
//!
//! Tags compare component by component as integers, with missing components
//! treated as zero: `1.2 < 1.2.1 < 1.10 < 2.0`, and `1.0 == 1`. Tags that do
//! not parse sort after every well-formed tag. See [`version::VersionKey`].
//!
//! ## Snapshots Are Never Rewritten
//!
//! A version that already has a snapshot directory is left alone, even when
//! `latest.md` was edited without bumping its version. Publishing a change
//! means bumping the version.
//!
//! ## Explicit Translators
//!
//! Every render function receives the [`translate::Translator`] for its page.
//! There is no global "current language" to set and restore.

pub mod archive;
pub mod catalog;
pub mod config;
pub mod frontmatter;
pub mod generate;
pub mod metadata;
pub mod output;
pub mod site;
pub mod translate;
pub mod tree;
pub mod version;

#[cfg(test)]
pub(crate) mod test_helpers;
