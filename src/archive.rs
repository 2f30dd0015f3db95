//! Version archiving.
//!
//! Turns each language's mutable `latest.md` into an immutable snapshot the
//! first time its declared version is seen:
//!
//! ```text
//! it/latest.md  (version: "1.1")
//!     └─ no it/v1.1/notice.md yet
//!          → copy latest.md byte-for-byte to it/v1.1/notice.md
//!          → metadata.json: languages.it = ["1.1", "1.0", ...]
//! ```
//!
//! ## Guarantees
//!
//! - **Append-only**: existing snapshots are never opened for writing. A tag
//!   that already has a snapshot is a no-op, even if `latest.md` was edited
//!   without bumping its version.
//! - **Idempotent**: a second run over an unchanged tree archives nothing.
//! - **Isolated failures**: a broken notice or language is recorded in the
//!   [`ArchiveReport`] and the run moves on to the next one.
//!
//! Only [`Archiver::process_all`] can fail as a whole, and only when the
//! site-build step that follows archiving fails. The archive report is
//! delivered before the build starts.

use crate::frontmatter::{self, FrontMatterError};
use crate::metadata::{MetadataError, NoticeMetadata};
use crate::site::{BuildError, SiteBuilder};
use crate::tree;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{error, info, warn};

#[derive(Error, Debug)]
pub enum ArchiveError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("{0} is not valid UTF-8")]
    Encoding(PathBuf),
    #[error("Front matter error in {path}: {source}")]
    FrontMatter {
        path: PathBuf,
        source: FrontMatterError,
    },
    #[error("Version {0:?} cannot be used as a directory name")]
    UnsafeVersion(String),
    #[error("Metadata error: {0}")]
    Metadata(#[from] MetadataError),
}

/// What happened to one language of one notice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A new snapshot was written and recorded in metadata.
    Archived { version: String },
    /// A snapshot for the declared version already existed.
    AlreadyArchived { version: String },
    /// Nothing to archive.
    Skipped(SkipReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NoLatestDocument,
    NoVersion,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageOutcome {
    pub notice: String,
    pub language: String,
    pub outcome: Outcome,
}

/// A failure scoped to one notice, or to one language when `language` is set.
#[derive(Debug)]
pub struct ItemError {
    pub notice: String,
    pub language: Option<String>,
    pub error: ArchiveError,
}

#[derive(Debug, Default)]
pub struct ArchiveReport {
    pub outcomes: Vec<LanguageOutcome>,
    /// Notice directories without a descriptor.
    pub skipped_notices: Vec<String>,
    pub errors: Vec<ItemError>,
}

impl ArchiveReport {
    pub fn archived(&self) -> impl Iterator<Item = &LanguageOutcome> {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.outcome, Outcome::Archived { .. }))
    }

    pub fn archived_count(&self) -> usize {
        self.archived().count()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Archives every notice under a notices root.
pub struct Archiver {
    root: PathBuf,
}

impl Archiver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Archive every notice, hand the report to `on_archived`, then run the
    /// site build.
    ///
    /// `on_archived` runs before the build starts, so the report is seen even
    /// when the build fails.
    pub fn process_all(
        &self,
        builder: &dyn SiteBuilder,
        on_archived: impl FnOnce(&ArchiveReport),
    ) -> Result<ArchiveReport, BuildError> {
        let report = self.archive();
        on_archived(&report);
        info!("running site build: {}", builder.describe());
        builder.build()?;
        Ok(report)
    }

    /// Archive every notice under the root.
    pub fn archive(&self) -> ArchiveReport {
        let mut report = ArchiveReport::default();

        if !self.root.is_dir() {
            warn!("notices directory {} not found", self.root.display());
            return report;
        }
        let notice_dirs = match tree::notice_dirs(&self.root) {
            Ok(dirs) => dirs,
            Err(source) => {
                error!("cannot list {}: {source}", self.root.display());
                report.errors.push(ItemError {
                    notice: String::new(),
                    language: None,
                    error: ArchiveError::Io {
                        path: self.root.clone(),
                        source,
                    },
                });
                return report;
            }
        };

        for notice_dir in notice_dirs {
            self.archive_notice(&notice_dir, &mut report);
        }
        report
    }

    fn archive_notice(&self, notice_dir: &Path, report: &mut ArchiveReport) {
        let notice = tree::dir_name(notice_dir);

        match NoticeMetadata::load(notice_dir) {
            Ok(_) => {}
            Err(MetadataError::Missing(_)) => {
                warn!("no metadata found for {notice}, skipping");
                report.skipped_notices.push(notice);
                return;
            }
            Err(e) => {
                error!("cannot read metadata for {notice}: {e}");
                report.errors.push(ItemError {
                    notice,
                    language: None,
                    error: e.into(),
                });
                return;
            }
        }

        let language_dirs = match tree::language_dirs(notice_dir) {
            Ok(dirs) => dirs,
            Err(source) => {
                error!("cannot list languages of {notice}: {source}");
                report.errors.push(ItemError {
                    notice,
                    language: None,
                    error: ArchiveError::Io {
                        path: notice_dir.to_path_buf(),
                        source,
                    },
                });
                return;
            }
        };

        for language_dir in language_dirs {
            let language = tree::dir_name(&language_dir);
            match archive_language(notice_dir, &language_dir, &notice, &language) {
                Ok(outcome) => report.outcomes.push(LanguageOutcome {
                    notice: notice.clone(),
                    language,
                    outcome,
                }),
                Err(e) => {
                    error!("failed to archive {notice}/{language}: {e}");
                    report.errors.push(ItemError {
                        notice: notice.clone(),
                        language: Some(language),
                        error: e,
                    });
                }
            }
        }
    }
}

fn archive_language(
    notice_dir: &Path,
    language_dir: &Path,
    notice: &str,
    language: &str,
) -> Result<Outcome, ArchiveError> {
    let latest_path = tree::latest_path(language_dir);
    if !latest_path.is_file() {
        warn!("no latest.md found for {notice}/{language}, skipping");
        return Ok(Outcome::Skipped(SkipReason::NoLatestDocument));
    }

    let raw = fs::read(&latest_path).map_err(|source| ArchiveError::Io {
        path: latest_path.clone(),
        source,
    })?;
    let text =
        std::str::from_utf8(&raw).map_err(|_| ArchiveError::Encoding(latest_path.clone()))?;
    let document = frontmatter::parse(text).map_err(|source| ArchiveError::FrontMatter {
        path: latest_path.clone(),
        source,
    })?;

    let Some(version) = document.front_matter.version else {
        warn!("no version found in front matter for {notice}/{language}, skipping");
        return Ok(Outcome::Skipped(SkipReason::NoVersion));
    };
    if !tree::is_safe_version(&version) {
        return Err(ArchiveError::UnsafeVersion(version));
    }

    let snapshot_path = tree::snapshot_path(language_dir, &version);
    if snapshot_path.exists() {
        info!("version {version} already exists for {notice}/{language}");
        return Ok(Outcome::AlreadyArchived { version });
    }

    let snapshot_dir = tree::snapshot_dir(language_dir, &version);
    fs::create_dir_all(&snapshot_dir).map_err(|source| ArchiveError::Io {
        path: snapshot_dir.clone(),
        source,
    })?;
    fs::write(&snapshot_path, &raw).map_err(|source| ArchiveError::Io {
        path: snapshot_path.clone(),
        source,
    })?;
    info!("archived version {version} for {notice}/{language}");

    // Reloaded so that tags recorded for earlier languages in this run are kept.
    let mut metadata = NoticeMetadata::load(notice_dir)?;
    if metadata.record_version(language, &version) {
        metadata.save(notice_dir)?;
        info!("updated metadata for {notice}/{language} with version {version}");
    }

    Ok(Outcome::Archived { version })
}
