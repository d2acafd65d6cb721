//! Archive web pages as Markdown notes in a local vault.
//!
//! Given a list of URLs, each page is fetched, reduced to its readable main
//! content, converted tag by tag into Markdown, and written to the output
//! directory under a collision-free name. Embedded images are downloaded
//! next to the notes and referenced with vault-style `![[...]]` embeds.

pub mod config;
pub mod content;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod images;
pub mod markdown;
pub mod pages;
pub mod results;
pub mod utils;

// Re-export commonly used types for convenience
pub use config::ArchiverConfig;
pub use error::ArchiveError;
pub use pages::PageArchiver;
pub use results::{ArchivedPage, BatchSummary};

use std::fs;
use std::path::{Path, PathBuf};

/// Builder for archiving a list of URLs into an output directory
pub struct Batch {
    output_dir: PathBuf,
    config: ArchiverConfig,
}

impl Batch {
    /// Create a new Batch writing into the given directory
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            config: ArchiverConfig::default(),
        }
    }

    /// Apply a configuration
    pub fn with_config(mut self, config: ArchiverConfig) -> Self {
        self.config = config;
        self
    }

    /// Override the User-Agent sent with every request
    pub fn with_user_agent(mut self, user_agent: &str) -> Self {
        self.config.user_agent = user_agent.to_string();
        self
    }

    /// Override the pause before each page fetch
    pub fn with_throttle_ms(mut self, throttle_ms: u64) -> Self {
        self.config.throttle_ms = throttle_ms;
        self
    }

    /// Read a URL list file and archive every entry.
    ///
    /// An unreadable list file is fatal to the run; everything after that
    /// point degrades per URL.
    pub async fn run_file(self, urls_file: &Path) -> Result<BatchSummary, ArchiveError> {
        let urls = utils::read_url_list(urls_file)?;
        if urls.is_empty() {
            ::log::warn!("No usable URLs found in {}", urls_file.display());
        } else {
            ::log::info!("Found {} URLs to process", urls.len());
        }
        self.run(&urls).await
    }

    /// Archive every URL strictly in order, continuing past per-URL failures
    pub async fn run(self, urls: &[String]) -> Result<BatchSummary, ArchiveError> {
        fs::create_dir_all(&self.output_dir).map_err(|source| ArchiveError::Io {
            path: self.output_dir.clone(),
            source,
        })?;

        let archiver = PageArchiver::new(&self.output_dir, self.config)?;
        let mut summary = BatchSummary::default();

        for url in urls {
            match archiver.archive(url).await {
                Ok(page) => {
                    ::log::info!("Created file: {}", page.filename);
                    summary.archived += 1;
                }
                Err(e) => {
                    ::log::error!("Failed to process {}: {}", url, e);
                    summary.failed += 1;
                }
            }
        }

        ::log::info!(
            "Archiving complete - {} pages written, {} failed",
            summary.archived,
            summary.failed
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_batch_continues_past_bad_urls() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("vault");

        let urls = vec!["not a url".to_string(), "::also-bad::".to_string()];
        let summary = Batch::new(&out)
            .with_throttle_ms(0)
            .run(&urls)
            .await
            .unwrap();

        assert_eq!(summary.archived, 0);
        assert_eq!(summary.failed, 2);

        // The output directory was created, but no files were written
        assert!(out.is_dir());
        assert_eq!(fs::read_dir(&out).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_run_file_missing_list_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let result = Batch::new(dir.path().join("vault"))
            .run_file(Path::new("/nonexistent/urls.txt"))
            .await;
        assert!(matches!(result, Err(ArchiveError::UrlList { .. })));
    }

    #[test]
    fn test_builder_overrides() {
        let batch = Batch::new("/tmp/vault")
            .with_user_agent("webvault/0.1")
            .with_throttle_ms(0);
        assert_eq!(batch.config.user_agent, "webvault/0.1");
        assert_eq!(batch.config.throttle_ms, 0);

        let custom = ArchiverConfig {
            fetch_timeout_secs: 30,
            ..ArchiverConfig::default()
        };
        let batch = Batch::new("/tmp/vault").with_config(custom);
        assert_eq!(batch.config.fetch_timeout_secs, 30);
    }
}
