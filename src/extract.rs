use readability::extractor;
use url::Url;

use crate::error::ArchiveError;

/// Readable content pulled out of a full page
pub struct Extracted {
    /// Page title as reported by the extractor; may be empty
    pub title: String,

    /// Reduced HTML fragment holding the main content
    pub content: String,
}

/// Run the readability extractor over a fetched page.
///
/// The boilerplate-removal algorithm itself is opaque here: raw HTML in,
/// title plus reduced main-content fragment out. Relative links inside the
/// fragment are left as-is; the image relocator resolves them against the
/// page URL later.
pub fn extract_content(html: &str, url: &Url) -> Result<Extracted, ArchiveError> {
    let product =
        extractor::extract(&mut html.as_bytes(), url).map_err(|e| ArchiveError::Extraction {
            url: url.to_string(),
            message: format!("{e:?}"),
        })?;

    Ok(Extracted {
        title: product.title,
        content: product.content,
    })
}
