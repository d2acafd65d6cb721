use serde::{Deserialize, Serialize};

/// A page successfully archived to disk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchivedPage {
    /// Title of the page (never empty; falls back to the URL host)
    pub title: String,

    /// URL the page was fetched from
    pub source_url: String,

    /// Converted Markdown body, without the document header
    pub body_markdown: String,

    /// Name of the Markdown file written to the output directory
    pub filename: String,
}

/// Totals reported after a batch run
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct BatchSummary {
    /// Pages written to disk
    pub archived: usize,

    /// URLs that failed and were skipped
    pub failed: usize,
}
