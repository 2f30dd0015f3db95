//! HTML site generation.
//!
//! The built-in site-build step. Loads the catalog and the locale tables and
//! writes a static site.
//!
//! ## Generated Pages
//!
//! - **Index page** (`/index.html`): every notice with links to its languages
//! - **Notice pages** (`/notices/{id}/index.html`): languages and their current versions
//! - **Document pages** (`/notices/{id}/{lang}/index.html`): the latest document
//! - **Archived pages** (`/notices/{id}/{lang}/v{version}/index.html`): one per snapshot
//!
//! Document pages carry a version selector and, for translations that lag
//! the canonical language, a warning banner.
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html
//! ├── assets/                    # Copied verbatim from assets_dir
//! └── notices/
//!     └── app1/
//!         ├── index.html
//!         ├── it/
//!         │   ├── index.html
//!         │   └── v1.0/index.html
//!         └── en/
//!             └── index.html
//! ```
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating and
//! `pulldown-cmark` for document bodies. Every render function takes the
//! [`Translator`] for the page's language as an argument.

use crate::catalog::{self, Catalog, Notice, TranslationStatus, VersionRecord};
use crate::config::SiteConfig;
use crate::output;
use crate::site::{BuildError, SiteBuilder};
use crate::translate::{Locales, Translator, fill};
use crate::version::snapshot_dir_name;
use maud::{DOCTYPE, Markup, PreEscaped, html};
use pulldown_cmark::{Options, Parser, html as md_html};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Asset copy error: {0}")]
    Walk(#[from] walkdir::Error),
}

/// What a generation run wrote.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct GenerateSummary {
    pub output_dir: PathBuf,
    /// Notice ids, in catalog order.
    pub notices: Vec<String>,
    /// URLs of document pages, latest and archived.
    pub document_urls: Vec<String>,
    pub assets_copied: usize,
}

const CSS: &str = include_str!("../static/style.css");

/// The built-in [`SiteBuilder`].
#[derive(Debug, Clone)]
pub struct Generator {
    config: SiteConfig,
    root: PathBuf,
}

impl Generator {
    pub fn new(config: SiteConfig, root: &Path) -> Self {
        Self {
            config,
            root: root.to_path_buf(),
        }
    }
}

impl SiteBuilder for Generator {
    fn build(&self) -> Result<(), BuildError> {
        let summary = generate(&self.config, &self.root)?;
        output::print_generate_output(&summary);
        Ok(())
    }

    fn describe(&self) -> String {
        format!(
            "built-in generator → {}",
            self.config.output_path(&self.root).display()
        )
    }
}

/// Generate the whole site for the site rooted at `root`.
pub fn generate(config: &SiteConfig, root: &Path) -> Result<GenerateSummary, GenerateError> {
    let catalog = Catalog::load(&config.notices_path(root));
    let locales = Locales::load(&config.locales_path(root), &config.default_language);
    let output_dir = config.output_path(root);

    fs::create_dir_all(&output_dir)?;
    let mut summary = GenerateSummary {
        output_dir: output_dir.clone(),
        ..Default::default()
    };

    let home = locales.translator(&config.default_language);
    let index_html = render_index(&catalog, &home, &config.site.title);
    fs::write(output_dir.join("index.html"), index_html.into_string())?;

    for notice in catalog.notices() {
        let dir = output_dir.join("notices").join(&notice.id);
        fs::create_dir_all(&dir)?;
        let html = render_notice_page(notice, &home);
        fs::write(dir.join("index.html"), html.into_string())?;
        summary.notices.push(notice.id.clone());
    }

    for page in catalog.pages() {
        let records = page.notice.records(page.language);
        let status = if page.language == page.notice.canonical_language {
            None
        } else {
            catalog.translation_status(&page.notice.id, page.language)
        };
        let t = locales.translator(page.language);
        let html = render_document_page(&DocumentView {
            notice: page.notice,
            language: page.language,
            record: page.record,
            records,
            status: status.as_ref(),
            t: &t,
        });

        let dir = output_dir.join(page.url.trim_matches('/'));
        fs::create_dir_all(&dir)?;
        fs::write(dir.join("index.html"), html.into_string())?;
        summary.document_urls.push(page.url.clone());
    }

    let assets = config.assets_path(root);
    if assets.is_dir() {
        summary.assets_copied = copy_assets(&assets, &output_dir.join(&config.assets_dir))?;
    }

    info!(
        "generated {} notices, {} document pages",
        summary.notices.len(),
        summary.document_urls.len()
    );
    Ok(summary)
}

/// Copy every file under `src` to the same relative path under `dst`.
fn copy_assets(src: &Path, dst: &Path) -> Result<usize, GenerateError> {
    let mut copied = 0;
    for entry in WalkDir::new(src).sort_by_file_name() {
        let entry = entry?;
        let Ok(rel) = entry.path().strip_prefix(src) else {
            continue;
        };
        let target = dst.join(rel);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            fs::copy(entry.path(), &target)?;
            copied += 1;
        }
    }
    Ok(copied)
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure
fn base_document(lang: &str, title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang=(lang) {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (PreEscaped(CSS)) }
            }
            body {
                (content)
            }
        }
    }
}

/// Renders the site header with breadcrumb
fn site_header(breadcrumb: Markup) -> Markup {
    html! {
        header.site-header {
            nav.breadcrumb {
                (breadcrumb)
            }
        }
    }
}

/// Display name of a notice, preferring the locale's `apps.<id>.name`.
fn notice_name(notice: &Notice, t: &Translator) -> String {
    t.t_or(&format!("apps.{}.name", notice.id), &notice.name)
}

fn notice_description(notice: &Notice, t: &Translator) -> String {
    t.t_or(&format!("apps.{}.description", notice.id), &notice.description)
}

fn markdown_to_html(markdown: &str) -> String {
    let parser = Parser::new_ext(markdown, Options::ENABLE_TABLES);
    let mut out = String::new();
    md_html::push_html(&mut out, parser);
    out
}

fn version_label(record: &VersionRecord, t: &Translator) -> String {
    if record.is_latest {
        format!("{} ({})", t.t_or("latest", "Latest"), snapshot_dir_name(&record.version))
    } else {
        record
            .snapshot_dir
            .clone()
            .unwrap_or_else(|| snapshot_dir_name(&record.version))
    }
}

// ============================================================================
// Page Renderers
// ============================================================================

/// Renders the home page: one card per notice.
fn render_index(catalog: &Catalog, t: &Translator, default_title: &str) -> Markup {
    let title = t.t_or("privacyCenter", default_title);
    let content = html! {
        (site_header(html! { a href="/" { (title) } }))
        main.index-page {
            header.page-header {
                h1 { (title) }
                @if let Ok(subtitle) = t.lookup("subtitle") {
                    p.subtitle { (subtitle) }
                }
            }
            ul.notice-list {
                @for notice in catalog.notices() {
                    li.notice-card {
                        h2 { a href={ "/notices/" (notice.id) "/" } { (notice_name(notice, t)) } }
                        p.notice-description { (notice_description(notice, t)) }
                        ul.language-links {
                            @for code in notice.language_codes() {
                                li {
                                    a href={ "/notices/" (notice.id) "/" (code) "/" } {
                                        (t.language_label(code))
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    };
    base_document(t.language(), &title, content)
}

/// Renders a notice overview: languages with their current version.
fn render_notice_page(notice: &Notice, t: &Translator) -> Markup {
    let name = notice_name(notice, t);
    let breadcrumb = html! {
        a href="/" { (t.t_or("privacyCenter", "Home")) }
        " › "
        (name)
    };
    let content = html! {
        (site_header(breadcrumb))
        main.notice-page {
            h1 { (name) }
            p.notice-description { (notice_description(notice, t)) }
            ul.language-list {
                @for (code, records) in notice.languages() {
                    @if let Some(current) = catalog::resolve_version(records, None) {
                        li {
                            a href={ "/notices/" (notice.id) "/" (code) "/" } {
                                (t.language_label(code))
                            }
                            " "
                            span.version { (snapshot_dir_name(&current.version)) }
                            @if *code == notice.canonical_language {
                                " "
                                span.canonical-badge { "★" }
                            }
                        }
                    }
                }
            }
        }
    };
    base_document(t.language(), &name, content)
}

/// Everything a document page shows.
struct DocumentView<'a> {
    notice: &'a Notice,
    language: &'a str,
    record: &'a VersionRecord,
    records: &'a [VersionRecord],
    status: Option<&'a TranslationStatus>,
    t: &'a Translator<'a>,
}

/// Renders one document at one version.
fn render_document_page(view: &DocumentView) -> Markup {
    let t = view.t;
    let notice = view.notice;
    let name = notice_name(notice, t);
    let heading = view.record.title().map(str::to_string).unwrap_or_else(|| name.clone());

    let breadcrumb = html! {
        a href="/" { (t.t_or("privacyCenter", "Home")) }
        " › "
        a href={ "/notices/" (notice.id) "/" } { (name) }
        " › "
        (t.language_label(view.language))
    };

    let outdated = view.status.filter(|s| s.is_outdated).map(|s| {
        let template = t.t_or(
            "outdatedWarning",
            "This translation (v{translation}) is older than the original (v{canonical}).",
        );
        fill(
            &template,
            &[
                ("translation", s.translation_version.as_str()),
                ("canonical", s.canonical_version.as_str()),
            ],
        )
    });

    let content = html! {
        (site_header(breadcrumb))
        main.document-page {
            nav.version-selector {
                span.version-label { (t.t_or("version", "Version:")) }
                ul {
                    @for record in view.records {
                        @let current = std::ptr::eq(record, view.record);
                        li class=[current.then_some("current")] {
                            a href=(catalog::page_url(&notice.id, view.language, record)) {
                                (version_label(record, t))
                            }
                        }
                    }
                }
            }
            @if let Some(message) = &outdated {
                p.banner.outdated-warning role="alert" { (message) }
            }
            @if !view.record.is_latest {
                p.banner.archived-notice {
                    (t.t_or("archivedVersion", "You are viewing an archived version."))
                    " "
                    a href={ "/notices/" (notice.id) "/" (view.language) "/" } {
                        (t.t_or("latest", "Latest"))
                    }
                }
            }
            article.notice-content {
                h1 { (heading) }
                (PreEscaped(markdown_to_html(&view.record.body)))
            }
        }
    };

    base_document(view.language, &format!("{heading} – {name}"), content)
}

// ============================================================================
// Tests
// ============================================================================
