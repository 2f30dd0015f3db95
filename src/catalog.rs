//! Read-only catalog of notices and their versions.
//!
//! [`Catalog::load`] walks the notice tree once and answers every question
//! the renderer asks about it:
//!
//! | Query | Answer |
//! |-------|--------|
//! | [`Catalog::notices`] | every notice with a readable `metadata.json` |
//! | [`Notice::languages`] | language → records, latest document first |
//! | [`resolve_version`] | the record for a requested tag, with fallbacks |
//! | [`resolve_version_for_path`] | the same, from a `/v1.2/` URL segment |
//! | [`Catalog::translation_status`] | whether a translation lags the canonical language |
//! | [`Catalog::pages`] | one page per notice × language × record |
//!
//! Loading never fails. Broken notices are logged and left out; broken
//! documents are logged and left out of their language; a language with no
//! usable document is left out of its notice. Documents declaring a version
//! that cannot be a path segment (`../x`, `a/b`) count as broken.
//!
//! Snapshot pages are addressed by their directory name, so two snapshots
//! declaring the same tag still get distinct URLs.
//!
//! ## Record Order
//!
//! Within a language, the mutable `latest.md` comes first, whatever its tag.
//! Snapshots follow by tag, most recent first. Snapshot tags that are not
//! dotted integers come last, ordered by raw string (also descending).

use crate::frontmatter;
use crate::metadata::{MetadataError, NoticeMetadata};
use crate::tree;
use crate::version::{self, VersionKey};
use serde::Serialize;
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Tag used for a latest document that declares no version.
pub const UNVERSIONED: &str = "latest";

/// One document at one version.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VersionRecord {
    pub version: String,
    pub is_latest: bool,
    /// Name of the `v<version>` directory holding a snapshot; `None` for the
    /// latest document.
    pub snapshot_dir: Option<String>,
    pub path: PathBuf,
    /// Markdown body without front matter.
    pub body: String,
    /// Front-matter keys other than `version`.
    pub extra: BTreeMap<String, Value>,
}

impl VersionRecord {
    pub fn title(&self) -> Option<&str> {
        self.extra.get("title").and_then(Value::as_str)
    }
}

/// A legal-document family.
#[derive(Debug, Clone, Serialize)]
pub struct Notice {
    pub id: String,
    pub name: String,
    pub description: String,
    pub canonical_language: String,
    /// Declared version list from metadata, passed through untouched.
    pub versions: Vec<String>,
    languages: BTreeMap<String, Vec<VersionRecord>>,
    #[serde(skip)]
    metadata: NoticeMetadata,
}

impl Notice {
    /// Languages with at least one record, each list in record order.
    pub fn languages(&self) -> &BTreeMap<String, Vec<VersionRecord>> {
        &self.languages
    }

    pub fn language_codes(&self) -> impl Iterator<Item = &str> {
        self.languages.keys().map(String::as_str)
    }

    pub fn records(&self, language: &str) -> &[VersionRecord] {
        self.languages
            .get(language)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn has_language(&self, language: &str) -> bool {
        self.languages.contains_key(language)
    }

    /// The descriptor this notice was built from.
    pub fn metadata(&self) -> &NoticeMetadata {
        &self.metadata
    }
}

/// Result of comparing a translation against the canonical language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranslationStatus {
    pub is_outdated: bool,
    pub canonical_version: String,
    pub translation_version: String,
    /// Translation tag compared to canonical tag.
    #[serde(skip)]
    pub comparison: Ordering,
}

/// One row of a status report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusEntry {
    pub notice: String,
    pub language: String,
    pub status: TranslationStatus,
}

/// One renderable page.
#[derive(Debug, Clone)]
pub struct PageRef<'a> {
    pub notice: &'a Notice,
    pub language: &'a str,
    pub record: &'a VersionRecord,
    pub url: String,
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    notices: Vec<Notice>,
}

impl Catalog {
    /// Build the catalog from a notices root. Never fails.
    pub fn load(root: &Path) -> Self {
        if !root.is_dir() {
            warn!("notices directory {} not found", root.display());
            return Self::default();
        }
        let notice_dirs = match tree::notice_dirs(root) {
            Ok(dirs) => dirs,
            Err(e) => {
                warn!("cannot list {}: {e}", root.display());
                return Self::default();
            }
        };
        let notices = notice_dirs.iter().filter_map(|d| load_notice(d)).collect();
        Self { notices }
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn find_notice(&self, id: &str) -> Option<&Notice> {
        self.notices.iter().find(|n| n.id == id)
    }

    /// Notices that have at least one record in `language`.
    pub fn notices_for_language<'a>(
        &'a self,
        language: &'a str,
    ) -> impl Iterator<Item = &'a Notice> + 'a {
        self.notices.iter().filter(move |n| n.has_language(language))
    }

    /// The current record for a notice and language.
    pub fn latest_version(&self, id: &str, language: &str) -> Option<&VersionRecord> {
        let notice = self.find_notice(id)?;
        resolve_version(notice.records(language), None)
    }

    /// Compare the most recent recorded tag of `language` with that of the
    /// notice's canonical language.
    ///
    /// Only the first entry of each metadata list is compared; whether every
    /// intermediate version was translated is not checked.
    pub fn translation_status(&self, id: &str, language: &str) -> Option<TranslationStatus> {
        let notice = self.find_notice(id)?;
        status_from_metadata(&notice.metadata, language)
    }

    /// Status of every non-canonical language recorded in each notice's
    /// metadata, in notice then language order.
    pub fn status_report(&self) -> Vec<StatusEntry> {
        let mut entries = Vec::new();
        for notice in &self.notices {
            let canonical = notice.metadata.canonical_language();
            for language in notice.metadata.languages.keys() {
                if language == canonical {
                    continue;
                }
                if let Some(status) = status_from_metadata(&notice.metadata, language) {
                    entries.push(StatusEntry {
                        notice: notice.id.clone(),
                        language: language.clone(),
                        status,
                    });
                }
            }
        }
        entries
    }

    /// Every page to render: latest documents at `/notices/<id>/<lang>/`,
    /// snapshots at `/notices/<id>/<lang>/v<version>/`.
    ///
    /// A URL already taken by an earlier page is logged and skipped.
    pub fn pages(&self) -> Vec<PageRef<'_>> {
        let mut pages = Vec::new();
        let mut seen = HashSet::new();
        for notice in &self.notices {
            for (language, records) in &notice.languages {
                for record in records {
                    let url = page_url(&notice.id, language, record);
                    if !seen.insert(url.clone()) {
                        warn!("duplicate page {url} from {}, skipped", record.path.display());
                        continue;
                    }
                    pages.push(PageRef {
                        notice,
                        language,
                        record,
                        url,
                    });
                }
            }
        }
        pages
    }
}

/// URL of the page showing `record`.
///
/// Snapshots use their directory name; a snapshot record built by hand
/// without one falls back to `v<version>`.
pub fn page_url(id: &str, language: &str, record: &VersionRecord) -> String {
    if record.is_latest {
        return format!("/notices/{id}/{language}/");
    }
    match &record.snapshot_dir {
        Some(dir) => format!("/notices/{id}/{language}/{dir}/"),
        None => format!(
            "/notices/{id}/{language}/{}/",
            version::snapshot_dir_name(&record.version)
        ),
    }
}

/// Pick a record from a language's list.
///
/// - `requested` names a snapshot directory → that snapshot
/// - `requested` names an existing record → that record
/// - `requested` names nothing → the latest document
/// - nothing requested → the latest document, else the first record
/// - empty list → `None`
pub fn resolve_version<'a>(
    records: &'a [VersionRecord],
    requested: Option<&str>,
) -> Option<&'a VersionRecord> {
    if let Some(tag) = requested {
        let matches = |r: &&VersionRecord| version::same_version(&r.version, tag);
        let in_dir = |r: &&VersionRecord| {
            r.snapshot_dir
                .as_deref()
                .is_some_and(|dir| version::same_version(dir, tag))
        };
        // A snapshot wins over a latest document declaring the same tag.
        let found = records
            .iter()
            .find(in_dir)
            .or_else(|| records.iter().filter(|r| !r.is_latest).find(matches))
            .or_else(|| records.iter().find(matches));
        if found.is_some() {
            return found;
        }
        return records.iter().find(|r| r.is_latest);
    }
    records.iter().find(|r| r.is_latest).or_else(|| records.first())
}

/// [`resolve_version`] driven by a URL path such as `/notices/app1/it/v1.2/`.
///
/// The first `/v<digits and dots>/` segment is the requested tag.
pub fn resolve_version_for_path<'a>(
    records: &'a [VersionRecord],
    path: &str,
) -> Option<&'a VersionRecord> {
    resolve_version(records, requested_tag(path))
}

/// Extract the tag from a `/v1.2/` path segment, if any.
pub fn requested_tag(path: &str) -> Option<&str> {
    let segments: Vec<&str> = path.split('/').collect();
    // A segment needs a slash on both sides.
    let inner = segments.get(1..segments.len().saturating_sub(1))?;
    inner.iter().copied().find_map(|segment| {
        let digits = segment.strip_prefix('v')?;
        let valid = !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit() || c == '.');
        valid.then_some(segment)
    })
}

/// Latest-first, then snapshots by tag descending.
pub fn sort_records(records: &mut [VersionRecord]) {
    records.sort_by(|a, b| match (a.is_latest, b.is_latest) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        _ => VersionKey::new(&b.version).cmp(&VersionKey::new(&a.version)),
    });
}

fn status_from_metadata(metadata: &NoticeMetadata, language: &str) -> Option<TranslationStatus> {
    let canonical = metadata.latest_recorded(metadata.canonical_language())?;
    let translation = metadata.latest_recorded(language)?;
    let comparison = version::compare(translation, canonical);
    Some(TranslationStatus {
        is_outdated: comparison == Ordering::Less,
        canonical_version: canonical.to_string(),
        translation_version: translation.to_string(),
        comparison,
    })
}

fn load_notice(dir: &Path) -> Option<Notice> {
    let id = tree::dir_name(dir);
    let metadata = match NoticeMetadata::load(dir) {
        Ok(m) => m,
        Err(MetadataError::Missing(_)) => {
            warn!("no metadata found for {id}, excluded from catalog");
            return None;
        }
        Err(e) => {
            warn!("could not load notice {id}: {e}");
            return None;
        }
    };

    let languages = load_languages(dir, &id);
    Some(Notice {
        name: metadata
            .name
            .clone()
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| id.clone()),
        description: metadata.description.clone().unwrap_or_default(),
        canonical_language: metadata.canonical_language().to_string(),
        versions: metadata.versions.clone(),
        id,
        languages,
        metadata,
    })
}

fn load_languages(notice_dir: &Path, id: &str) -> BTreeMap<String, Vec<VersionRecord>> {
    let mut languages = BTreeMap::new();
    let language_dirs = match tree::language_dirs(notice_dir) {
        Ok(dirs) => dirs,
        Err(e) => {
            warn!("cannot list languages of {id}: {e}");
            return languages;
        }
    };
    for language_dir in language_dirs {
        let records = load_records(&language_dir);
        if !records.is_empty() {
            languages.insert(tree::dir_name(&language_dir), records);
        }
    }
    languages
}

/// Every resolvable record in a language directory, sorted.
pub fn load_records(language_dir: &Path) -> Vec<VersionRecord> {
    let mut records = Vec::new();

    let latest = tree::latest_path(language_dir);
    if latest.is_file()
        && let Some(record) = read_record(&latest, None, UNVERSIONED)
    {
        records.push(record);
    }

    match tree::snapshot_dirs(language_dir) {
        Ok(dirs) => {
            for dir in dirs {
                let path = dir.join(tree::SNAPSHOT_FILE);
                if !path.is_file() {
                    continue;
                }
                let dir_name = tree::dir_name(&dir);
                let fallback = dir_name.strip_prefix('v').unwrap_or(&dir_name).to_string();
                if let Some(record) = read_record(&path, Some(dir_name), &fallback) {
                    records.push(record);
                }
            }
        }
        Err(e) => warn!("cannot list versions in {}: {e}", language_dir.display()),
    }

    sort_records(&mut records);
    records
}

/// `snapshot_dir` is `None` for the latest document.
fn read_record(
    path: &Path,
    snapshot_dir: Option<String>,
    fallback_version: &str,
) -> Option<VersionRecord> {
    let content = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            warn!("could not read {}: {e}", path.display());
            return None;
        }
    };
    let document = match frontmatter::parse(&content) {
        Ok(d) => d,
        Err(e) => {
            warn!("could not parse front matter of {}: {e}", path.display());
            return None;
        }
    };
    let version = document
        .front_matter
        .version
        .unwrap_or_else(|| fallback_version.to_string());
    if !tree::is_safe_version(&version) {
        warn!("unusable version {version:?} in {}, skipped", path.display());
        return None;
    }
    Some(VersionRecord {
        version,
        is_latest: snapshot_dir.is_none(),
        snapshot_dir,
        path: path.to_path_buf(),
        body: document.body,
        extra: document.front_matter.extra,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use tempfile::TempDir;

    fn record(version: &str, is_latest: bool) -> VersionRecord {
        VersionRecord {
            version: version.to_string(),
            is_latest,
            snapshot_dir: (!is_latest).then(|| format!("v{version}")),
            path: PathBuf::new(),
            body: String::new(),
            extra: BTreeMap::new(),
        }
    }

    // =========================================================================
    // resolve_version
    // =========================================================================

    #[test]
    fn resolve_requested_tag() {
        let records = vec![record("2.0", true), record("1.5", false), record("1.0", false)];
        let found = resolve_version(&records, Some("v1.5")).unwrap();
        assert_eq!(found.version, "1.5");
        assert!(!found.is_latest);
    }

    #[test]
    fn resolve_prefers_snapshot_over_latest_with_same_tag() {
        let records = vec![record("1.1", true), record("1.1", false), record("1.0", false)];
        let found = resolve_version(&records, Some("v1.1")).unwrap();
        assert!(!found.is_latest);
    }

    #[test]
    fn resolve_unknown_tag_falls_back_to_latest() {
        let records = vec![record("1.0", true)];
        let found = resolve_version(&records, Some("v9.9")).unwrap();
        assert!(found.is_latest);
        assert_eq!(found.version, "1.0");
    }

    #[test]
    fn resolve_unknown_tag_without_latest_is_none() {
        let records = vec![record("1.0", false)];
        assert!(resolve_version(&records, Some("2.0")).is_none());
    }

    #[test]
    fn resolve_nothing_requested() {
        let records = vec![record("1.0", false), record("2.0", true)];
        assert!(resolve_version(&records, None).unwrap().is_latest);

        let snapshots_only = vec![record("2.0", false), record("1.0", false)];
        assert_eq!(resolve_version(&snapshots_only, None).unwrap().version, "2.0");
    }

    #[test]
    fn resolve_empty_list() {
        assert!(resolve_version(&[], None).is_none());
        assert!(resolve_version(&[], Some("1.0")).is_none());
    }

    #[test]
    fn resolve_from_path() {
        let records = vec![record("2.0", true), record("1.0", false)];
        let old = resolve_version_for_path(&records, "/notices/app1/it/v1.0/").unwrap();
        assert_eq!(old.version, "1.0");
        let current = resolve_version_for_path(&records, "/notices/app1/it/").unwrap();
        assert!(current.is_latest);
    }

    #[test]
    fn requested_tag_needs_surrounding_slashes() {
        assert_eq!(requested_tag("/notices/app1/it/v1.2/"), Some("v1.2"));
        assert_eq!(requested_tag("/notices/app1/it/v1.2"), None);
        assert_eq!(requested_tag("v1.2/"), None);
        assert_eq!(requested_tag("/notices/app1/it/vx/"), None);
        assert_eq!(requested_tag("/notices/vendor/it/"), None);
        assert_eq!(requested_tag(""), None);
    }

    // =========================================================================
    // Record ordering
    // =========================================================================

    #[test]
    fn latest_first_then_descending() {
        let mut records = vec![
            record("1.2", false),
            record("1.10", false),
            record("0.9", true),
            record("2.0", false),
        ];
        sort_records(&mut records);
        let order: Vec<(&str, bool)> = records
            .iter()
            .map(|r| (r.version.as_str(), r.is_latest))
            .collect();
        assert_eq!(
            order,
            vec![("0.9", true), ("2.0", false), ("1.10", false), ("1.2", false)]
        );
    }

    #[test]
    fn malformed_tags_sort_last() {
        let mut records = vec![
            record("draft-a", false),
            record("1.0", false),
            record("draft-b", false),
            record("3.0", false),
        ];
        sort_records(&mut records);
        let order: Vec<&str> = records.iter().map(|r| r.version.as_str()).collect();
        assert_eq!(order, vec!["3.0", "1.0", "draft-b", "draft-a"]);
    }

    // =========================================================================
    // Loading
    // =========================================================================

    #[test]
    fn load_builds_languages_from_tree() {
        let tmp = TempDir::new().unwrap();
        write_metadata(
            tmp.path(),
            "app1",
            r#"{"name":"App1","description":"First","main_language":"it","languages":{"it":["1.1","1.0"]}}"#,
        );
        write_latest(tmp.path(), "app1", "it", "1.1", "Corrente.\n");
        write_snapshot(tmp.path(), "app1", "it", "1.0", "Vecchio.\n");
        write_snapshot(tmp.path(), "app1", "it", "1.1", "Corrente.\n");

        let catalog = Catalog::load(tmp.path());
        let notice = find_notice(&catalog, "app1");

        assert_eq!(notice.name, "App1");
        assert_eq!(notice.description, "First");
        assert_eq!(notice.canonical_language, "it");
        assert_eq!(
            record_order(notice, "it"),
            vec![("1.1", true), ("1.1", false), ("1.0", false)]
        );
        assert_eq!(notice.records("it")[0].body, "Corrente.\n");
    }

    #[test]
    fn extra_front_matter_is_kept() {
        let tmp = TempDir::new().unwrap();
        write_metadata(tmp.path(), "app1", "{}");
        write_file(
            tmp.path(),
            "app1/en/latest.md",
            "---\nversion: \"1.0\"\ntitle: Privacy\n---\nBody\n",
        );

        let catalog = Catalog::load(tmp.path());
        let latest = catalog.latest_version("app1", "en").unwrap();
        assert_eq!(latest.title(), Some("Privacy"));
        assert_eq!(latest.body, "Body\n");
    }

    #[test]
    fn name_falls_back_to_id() {
        let tmp = TempDir::new().unwrap();
        write_metadata(tmp.path(), "app9", "{}");

        let catalog = Catalog::load(tmp.path());
        let notice = find_notice(&catalog, "app9");
        assert_eq!(notice.name, "app9");
        assert_eq!(notice.description, "");
        assert_eq!(notice.canonical_language, "it");
        assert!(notice.languages().is_empty());
    }

    #[test]
    fn malformed_metadata_is_excluded() {
        let tmp = TempDir::new().unwrap();
        write_metadata(tmp.path(), "broken", "{ this is not json");
        write_latest(tmp.path(), "broken", "it", "1.0", "x\n");
        write_metadata(tmp.path(), "good", "{}");

        let catalog = Catalog::load(tmp.path());

        assert_eq!(notice_ids(&catalog), vec!["good"]);
    }

    #[test]
    fn directory_without_metadata_is_excluded() {
        let tmp = TempDir::new().unwrap();
        write_latest(tmp.path(), "orphan", "it", "1.0", "x\n");

        let catalog = Catalog::load(tmp.path());
        assert!(catalog.notices().is_empty());
    }

    #[test]
    fn empty_language_is_excluded() {
        let tmp = TempDir::new().unwrap();
        write_metadata(tmp.path(), "app1", "{}");
        write_latest(tmp.path(), "app1", "it", "1.0", "x\n");
        std::fs::create_dir_all(tmp.path().join("app1/de/v1.0")).unwrap();

        let catalog = Catalog::load(tmp.path());
        let notice = find_notice(&catalog, "app1");
        assert_eq!(notice.language_codes().collect::<Vec<_>>(), vec!["it"]);
    }

    #[test]
    fn unparsable_document_is_skipped() {
        let tmp = TempDir::new().unwrap();
        write_metadata(tmp.path(), "app1", "{}");
        write_file(tmp.path(), "app1/it/latest.md", "---\nversion: 1.0\n");
        write_snapshot(tmp.path(), "app1", "it", "1.0", "ok\n");

        let catalog = Catalog::load(tmp.path());
        let notice = find_notice(&catalog, "app1");
        assert_eq!(record_order(notice, "it"), vec![("1.0", false)]);
    }

    #[test]
    fn snapshot_without_version_uses_directory_name() {
        let tmp = TempDir::new().unwrap();
        write_metadata(tmp.path(), "app1", "{}");
        write_file(tmp.path(), "app1/it/v2.3/notice.md", "no front matter\n");
        write_file(tmp.path(), "app1/it/vdraft/notice.md", "draft\n");

        let catalog = Catalog::load(tmp.path());
        let notice = find_notice(&catalog, "app1");
        assert_eq!(
            record_order(notice, "it"),
            vec![("2.3", false), ("draft", false)]
        );
    }

    #[test]
    fn missing_root_is_empty() {
        let tmp = TempDir::new().unwrap();
        let catalog = Catalog::load(&tmp.path().join("nope"));
        assert!(catalog.notices().is_empty());
    }

    // =========================================================================
    // Translation status
    // =========================================================================

    #[test]
    fn outdated_translation() {
        let tmp = TempDir::new().unwrap();
        write_metadata(
            tmp.path(),
            "app1",
            r#"{"main_language":"it","languages":{"it":["2.0","1.5"],"en":["1.5"]}}"#,
        );

        let catalog = Catalog::load(tmp.path());
        let status = catalog.translation_status("app1", "en").unwrap();

        assert!(status.is_outdated);
        assert_eq!(status.canonical_version, "2.0");
        assert_eq!(status.translation_version, "1.5");
        assert_eq!(status.comparison, Ordering::Less);
    }

    #[test]
    fn up_to_date_translation() {
        let tmp = TempDir::new().unwrap();
        write_metadata(
            tmp.path(),
            "app1",
            r#"{"languages":{"it":["1.10"],"en":["1.10.0"]}}"#,
        );

        let catalog = Catalog::load(tmp.path());
        let status = catalog.translation_status("app1", "en").unwrap();
        assert!(!status.is_outdated);
        assert_eq!(status.comparison, Ordering::Equal);
    }

    #[test]
    fn status_none_without_recorded_versions() {
        let tmp = TempDir::new().unwrap();
        write_metadata(tmp.path(), "app1", r#"{"languages":{"it":["1.0"],"en":[]}}"#);
        write_metadata(tmp.path(), "app2", r#"{"languages":{"en":["1.0"]}}"#);

        let catalog = Catalog::load(tmp.path());
        assert!(catalog.translation_status("app1", "en").is_none());
        assert!(catalog.translation_status("app1", "fr").is_none());
        // Canonical "it" has no history.
        assert!(catalog.translation_status("app2", "en").is_none());
        assert!(catalog.translation_status("missing", "en").is_none());
    }

    #[test]
    fn status_report_skips_canonical() {
        let tmp = TempDir::new().unwrap();
        write_metadata(
            tmp.path(),
            "app1",
            r#"{"main_language":"it","languages":{"it":["2.0"],"en":["1.0"],"de":["2.0"]}}"#,
        );

        let catalog = Catalog::load(tmp.path());
        let report = catalog.status_report();

        let rows: Vec<(&str, bool)> = report
            .iter()
            .map(|e| (e.language.as_str(), e.status.is_outdated))
            .collect();
        assert_eq!(rows, vec![("de", false), ("en", true)]);
    }

    // =========================================================================
    // Pages
    // =========================================================================

    #[test]
    fn pages_have_latest_and_versioned_urls() {
        let tmp = TempDir::new().unwrap();
        write_metadata(tmp.path(), "app1", "{}");
        write_latest(tmp.path(), "app1", "it", "1.1", "x\n");
        write_snapshot(tmp.path(), "app1", "it", "1.0", "y\n");

        let catalog = Catalog::load(tmp.path());
        let urls: Vec<String> = catalog.pages().into_iter().map(|p| p.url).collect();

        assert_eq!(urls, vec!["/notices/app1/it/", "/notices/app1/it/v1.0/"]);
    }

    #[test]
    fn page_urls_resolve_back_to_their_record() {
        let tmp = TempDir::new().unwrap();
        write_metadata(tmp.path(), "app1", "{}");
        write_latest(tmp.path(), "app1", "en", "3.0", "now\n");
        write_snapshot(tmp.path(), "app1", "en", "2.0", "then\n");
        write_snapshot(tmp.path(), "app1", "en", "1.0", "long ago\n");

        let catalog = Catalog::load(tmp.path());
        for page in catalog.pages() {
            let records = page.notice.records(page.language);
            let resolved = resolve_version_for_path(records, &page.url).unwrap();
            assert_eq!(resolved, page.record, "url {}", page.url);
        }
    }

    #[test]
    fn snapshots_declaring_the_same_tag_keep_their_own_pages() {
        let tmp = TempDir::new().unwrap();
        write_metadata(tmp.path(), "app1", "{}");
        write_file(tmp.path(), "app1/it/v1.0/notice.md", "---\nversion: \"1.1\"\n---\nprima\n");
        write_snapshot(tmp.path(), "app1", "it", "1.1", "seconda\n");

        let catalog = Catalog::load(tmp.path());
        let pages = catalog.pages();
        let mut urls: Vec<&str> = pages.iter().map(|p| p.url.as_str()).collect();
        urls.sort();

        assert_eq!(urls, vec!["/notices/app1/it/v1.0/", "/notices/app1/it/v1.1/"]);
        for page in &pages {
            let records = page.notice.records(page.language);
            let resolved = resolve_version_for_path(records, &page.url).unwrap();
            assert_eq!(resolved, page.record, "url {}", page.url);
        }
    }

    #[test]
    fn path_like_declared_version_is_dropped() {
        let tmp = TempDir::new().unwrap();
        write_metadata(tmp.path(), "app1", "{}");
        write_file(
            tmp.path(),
            "app1/it/v1.0/notice.md",
            "---\nversion: \"/../../../escaped\"\n---\nx\n",
        );
        write_latest(tmp.path(), "app1", "it", "2.0", "ok\n");

        let catalog = Catalog::load(tmp.path());
        let notice = find_notice(&catalog, "app1");

        assert_eq!(record_order(notice, "it"), vec![("2.0", true)]);
        let urls: Vec<String> = catalog.pages().into_iter().map(|p| p.url).collect();
        assert_eq!(urls, vec!["/notices/app1/it/"]);
    }

    #[test]
    fn resolve_by_directory_name_first() {
        let mut older = record("1.1", false);
        older.snapshot_dir = Some("v1.0".into());
        let records = vec![record("1.1", true), older, record("1.1", false)];

        let found = resolve_version(&records, Some("v1.0")).unwrap();
        assert_eq!(found.snapshot_dir.as_deref(), Some("v1.0"));
        let found = resolve_version(&records, Some("v1.1")).unwrap();
        assert_eq!(found.snapshot_dir.as_deref(), Some("v1.1"));
    }

    #[test]
    fn notices_for_language_filters() {
        let tmp = TempDir::new().unwrap();
        write_metadata(tmp.path(), "app1", "{}");
        write_latest(tmp.path(), "app1", "it", "1.0", "x\n");
        write_metadata(tmp.path(), "app2", "{}");
        write_latest(tmp.path(), "app2", "en", "1.0", "x\n");

        let catalog = Catalog::load(tmp.path());
        let ids: Vec<&str> = catalog
            .notices_for_language("en")
            .map(|n| n.id.as_str())
            .collect();
        assert_eq!(ids, vec!["app2"]);
    }
}
