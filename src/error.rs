use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced while archiving pages.
///
/// Per-URL errors are caught at the batch loop and logged; only URL-list and
/// output-directory failures end a run early. Per-image failures never reach
/// this type - they degrade to a placeholder link inside the relocator.
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// Network failure, timeout, or non-2xx response
    #[error("request failed: {0}")]
    Fetch(#[from] reqwest::Error),

    /// A URL from the input list could not be parsed
    #[error("invalid URL {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// The readability extractor rejected the fetched page
    #[error("content extraction failed for {url}: {message}")]
    Extraction { url: String, message: String },

    /// A file or directory could not be written
    #[error("filesystem error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The URL list file could not be read
    #[error("cannot read URL list {path}: {source}")]
    UrlList {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Invalid configuration contents
    #[error("invalid configuration: {0}")]
    Config(String),
}
