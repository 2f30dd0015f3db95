//! Version tags and their ordering.
//!
//! Every notice document declares a version in its front matter and every
//! snapshot lives under a `v<version>/` directory. Tags are dot-separated
//! sequences of non-negative integers, compared component by component:
//!
//! - `"1.2"` < `"1.2.1"` < `"1.10"` < `"2.0"`
//! - `"1"` == `"1.0"` == `"1.0.0"` (missing trailing components count as zero)
//! - `"v1.2"` parses the same as `"1.2"` (the directory prefix is tolerated)
//!
//! ## Malformed Tags
//!
//! Hand-edited trees sometimes contain directories like `v1.0-draft`. Those
//! never crash anything: [`VersionKey`] wraps either a parsed tag or the raw
//! string, and every raw string sorts below every well-formed tag. Among
//! themselves, raw strings compare lexically.

use std::cmp::Ordering;
use std::fmt;

/// A parsed dotted-integer version tag.
#[derive(Debug, Clone)]
pub struct VersionTag {
    components: Vec<u64>,
}

impl VersionTag {
    /// Parse a tag like `"1.2"` or `"v1.2.3"`.
    ///
    /// Returns `None` for empty input, empty components (`"1..2"`) or any
    /// non-digit character past the optional leading `v`.
    pub fn parse(raw: &str) -> Option<Self> {
        let digits = strip_prefix_v(raw);
        if digits.is_empty() {
            return None;
        }
        let components = digits
            .split('.')
            .map(|part| {
                if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                    None
                } else {
                    part.parse::<u64>().ok()
                }
            })
            .collect::<Option<Vec<_>>>()?;
        Some(Self { components })
    }

    pub fn components(&self) -> &[u64] {
        &self.components
    }
}

impl PartialEq for VersionTag {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for VersionTag {}

impl PartialOrd for VersionTag {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for VersionTag {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.components.len().max(other.components.len());
        for i in 0..len {
            let a = self.components.get(i).copied().unwrap_or(0);
            let b = other.components.get(i).copied().unwrap_or(0);
            match a.cmp(&b) {
                Ordering::Equal => continue,
                unequal => return unequal,
            }
        }
        Ordering::Equal
    }
}

impl fmt::Display for VersionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.components.iter().map(u64::to_string).collect();
        write!(f, "{}", parts.join("."))
    }
}

/// Sort key for any version string, well-formed or not.
///
/// `Malformed` is declared first so the derived ordering puts every malformed
/// key below every parsed one.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum VersionKey {
    Malformed(String),
    Tag(VersionTag),
}

impl VersionKey {
    pub fn new(raw: &str) -> Self {
        match VersionTag::parse(raw) {
            Some(tag) => VersionKey::Tag(tag),
            None => VersionKey::Malformed(raw.to_string()),
        }
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, VersionKey::Malformed(_))
    }
}

/// Compare two raw version strings under the tag ordering.
pub fn compare(a: &str, b: &str) -> Ordering {
    VersionKey::new(a).cmp(&VersionKey::new(b))
}

/// Whether two raw strings name the same version.
///
/// `"v1.0"`, `"1.0"` and `"1"` all match each other. Malformed strings only
/// match when identical after stripping the `v`.
pub fn same_version(a: &str, b: &str) -> bool {
    match (VersionTag::parse(a), VersionTag::parse(b)) {
        (Some(x), Some(y)) => x == y,
        _ => strip_prefix_v(a) == strip_prefix_v(b),
    }
}

/// Sort raw tags most recent first.
pub fn sort_descending(tags: &mut [String]) {
    tags.sort_by(|a, b| compare(b, a));
}

/// Name of the snapshot directory for a tag: `1.2` → `v1.2`.
pub fn snapshot_dir_name(version: &str) -> String {
    format!("v{}", strip_prefix_v(version))
}

fn strip_prefix_v(raw: &str) -> &str {
    raw.strip_prefix('v').unwrap_or(raw)
}
