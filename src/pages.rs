use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use crate::config::ArchiverConfig;
use crate::content;
use crate::error::ArchiveError;
use crate::extract;
use crate::fetch::Fetcher;
use crate::images;
use crate::markdown;
use crate::results::ArchivedPage;
use crate::utils;

/// Archives one page at a time into a fixed output directory.
///
/// Each URL runs the full pipeline: throttle, fetch, extract, relocate
/// images, convert, assemble, pick a unique filename, write. A failure at
/// any step returns an error for that URL only; no file is written for a
/// failed page.
pub struct PageArchiver {
    config: ArchiverConfig,
    fetcher: Fetcher,
    output_dir: PathBuf,
}

impl PageArchiver {
    /// Create an archiver writing into the given directory
    pub fn new(
        output_dir: impl Into<PathBuf>,
        config: ArchiverConfig,
    ) -> Result<Self, ArchiveError> {
        let fetcher = Fetcher::new(&config)?;
        Ok(Self {
            config,
            fetcher,
            output_dir: output_dir.into(),
        })
    }

    /// Archive a single URL and return the written page
    pub async fn archive(&self, url_str: &str) -> Result<ArchivedPage, ArchiveError> {
        ::log::info!("Processing URL: {}", url_str);

        // Politeness throttle between successive page requests
        if self.config.throttle_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.config.throttle_ms)).await;
        }

        let url = Url::parse(url_str).map_err(|source| ArchiveError::InvalidUrl {
            url: url_str.to_string(),
            source,
        })?;

        let html = self.fetcher.fetch_page(&url).await?;
        let extracted = extract::extract_content(&html, &url)?;
        let title = resolve_title(&extracted.title, &url);

        let mut tree = content::parse_fragment(&extracted.content);
        let report =
            images::relocate_images(&mut tree, &url, &self.fetcher, &self.output_dir, &self.config)
                .await;
        if report.relocated + report.failed > 0 {
            ::log::debug!(
                "Images for {}: {} relocated, {} degraded to links",
                url_str,
                report.relocated,
                report.failed
            );
        }

        let body_markdown = markdown::convert(&tree);
        let document = assemble_document(&title, url_str, &body_markdown);
        let filename = self.write_document(&title, &url, &document)?;

        Ok(ArchivedPage {
            title,
            source_url: url_str.to_string(),
            body_markdown,
            filename,
        })
    }

    /// Pick a collision-free filename and write the document
    fn write_document(&self, title: &str, url: &Url, document: &str) -> Result<String, ArchiveError> {
        let base = base_name(title, url);
        let path = utils::unique_md_path(&self.output_dir, &base);

        fs::write(&path, document).map_err(|source| ArchiveError::Io {
            path: path.clone(),
            source,
        })?;

        Ok(path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default())
    }
}

/// Title for the page, falling back to the URL host when extraction found none
fn resolve_title(extracted: &str, url: &Url) -> String {
    let trimmed = extracted.trim();
    if trimmed.is_empty() {
        url.host_str().unwrap_or("page").to_string()
    } else {
        trimmed.to_string()
    }
}

/// Base filename for the note; never empty.
///
/// Titles made entirely of illegal characters sanitize to nothing, so fall
/// back to the sanitized host, then to a literal placeholder.
fn base_name(title: &str, url: &Url) -> String {
    let base = utils::sanitize_filename(title);
    if !base.is_empty() {
        return base;
    }

    let host = utils::sanitize_filename(url.host_str().unwrap_or(""));
    if !host.is_empty() {
        host
    } else {
        String::from("page")
    }
}

/// Final document text: title header, source URL line, converted body
fn assemble_document(title: &str, source_url: &str, body: &str) -> String {
    let document = format!("# {title}\n\nURL: {source_url}\n\n{body}");
    utils::collapse_blank_runs(&document)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assemble_document_format() {
        let doc = assemble_document("Title", "https://ex.com/p", "Body");
        assert_eq!(doc, "# Title\n\nURL: https://ex.com/p\n\nBody");
    }

    #[test]
    fn test_assemble_document_collapses_newline_runs() {
        let doc = assemble_document("T", "https://ex.com/p", "A\n\n\n\nB");
        assert_eq!(doc, "# T\n\nURL: https://ex.com/p\n\nA\n\nB");
        assert!(!doc.contains("\n\n\n"));
    }

    #[test]
    fn test_assemble_document_with_empty_body() {
        let doc = assemble_document("T", "https://ex.com/p", "");
        assert_eq!(doc, "# T\n\nURL: https://ex.com/p");
    }

    #[test]
    fn test_resolve_title_falls_back_to_host() {
        let url = Url::parse("https://ex.com/some/page").unwrap();
        assert_eq!(resolve_title("", &url), "ex.com");
        assert_eq!(resolve_title("   ", &url), "ex.com");
        assert_eq!(resolve_title("  Real Title  ", &url), "Real Title");
    }

    #[test]
    fn test_base_name_fallbacks() {
        let url = Url::parse("https://ex.com/p").unwrap();
        assert_eq!(base_name("My Page", &url), "My_Page");
        assert_eq!(base_name("???", &url), "ex.com");

        let hostless = Url::parse("mailto:someone@ex.com").unwrap();
        assert_eq!(base_name("???", &hostless), "page");
    }

    #[test]
    fn test_write_document_collision_suffixes() {
        let dir = tempfile::tempdir().unwrap();
        let archiver =
            PageArchiver::new(dir.path(), ArchiverConfig::default()).unwrap();
        let url = Url::parse("https://ex.com/p").unwrap();

        let first = archiver.write_document("Same Title", &url, "one").unwrap();
        let second = archiver.write_document("Same Title", &url, "two").unwrap();
        let third = archiver.write_document("Same Title", &url, "three").unwrap();

        assert_eq!(first, "Same_Title.md");
        assert_eq!(second, "Same_Title_1.md");
        assert_eq!(third, "Same_Title_2.md");

        // Earlier files are untouched
        let contents = fs::read_to_string(dir.path().join("Same_Title.md")).unwrap();
        assert_eq!(contents, "one");
    }
}
