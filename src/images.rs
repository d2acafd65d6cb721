use std::path::Path;

use chrono::Local;
use url::Url;

use crate::config::ArchiverConfig;
use crate::content::{self, ContentNode, ElementNode};
use crate::fetch::Fetcher;
use crate::utils::random_suffix;

/// Label for the degraded link left behind when an image cannot be relocated
const PLACEHOLDER_LABEL: &str = "Изображение";

/// Outcome counters for one page's image relocation pass
#[derive(Debug, Clone, Copy, Default)]
pub struct RelocationReport {
    /// Images downloaded and rewritten to vault embeds
    pub relocated: usize,

    /// Images degraded to placeholder links
    pub failed: usize,
}

/// A planned relocation for one embedded image
struct ImageReference {
    /// Child-index path of the `img` node within the tree
    node_path: Vec<usize>,

    /// Raw `src` attribute, possibly relative
    src: String,
}

/// Download every embedded image and rewrite its node in place.
///
/// Successful downloads are written to the output directory under a
/// generated name and the `img` node becomes a `![[name]]` vault embed.
/// Any per-image failure degrades that one node to a plain Markdown link
/// and processing continues; nothing here aborts the page.
pub async fn relocate_images(
    root: &mut ElementNode,
    page_url: &Url,
    fetcher: &Fetcher,
    output_dir: &Path,
    config: &ArchiverConfig,
) -> RelocationReport {
    let mut sites = Vec::new();
    collect_image_nodes(root, &mut Vec::new(), &mut sites);

    let mut report = RelocationReport::default();
    for site in sites {
        let replacement =
            relocate_one(&site.src, page_url, fetcher, output_dir, config, &mut report).await;
        content::replace_child(root, &site.node_path, ContentNode::Text(replacement));
    }
    report
}

/// Collect every `img` element with a non-empty `src`.
///
/// Nodes with no usable `src` stay in the tree; the converter renders
/// childless elements as nothing.
fn collect_image_nodes(node: &ElementNode, path: &mut Vec<usize>, out: &mut Vec<ImageReference>) {
    for (index, child) in node.children.iter().enumerate() {
        if let ContentNode::Element(el) = child {
            path.push(index);
            if el.tag == "img" {
                if let Some(src) = el.attr("src") {
                    if !src.is_empty() {
                        out.push(ImageReference {
                            node_path: path.clone(),
                            src: src.to_string(),
                        });
                    }
                }
            } else {
                collect_image_nodes(el, path, out);
            }
            path.pop();
        }
    }
}

async fn relocate_one(
    src: &str,
    page_url: &Url,
    fetcher: &Fetcher,
    output_dir: &Path,
    config: &ArchiverConfig,
    report: &mut RelocationReport,
) -> String {
    let image_url = match resolve_image_url(src, page_url) {
        Ok(resolved) => resolved,
        Err(e) => {
            ::log::warn!("Cannot resolve image URL {}: {}", src, e);
            report.failed += 1;
            return placeholder(src);
        }
    };

    let filename = image_filename(&image_url, config.suffix_length);

    let bytes = match fetcher.fetch_bytes(&image_url).await {
        Ok(bytes) => bytes,
        Err(e) => {
            ::log::warn!("Failed to download image {}: {}", image_url, e);
            report.failed += 1;
            return placeholder(image_url.as_str());
        }
    };

    if let Err(e) = tokio::fs::write(output_dir.join(&filename), &bytes).await {
        ::log::warn!("Failed to save image {} as {}: {}", image_url, filename, e);
        report.failed += 1;
        return placeholder(image_url.as_str());
    }

    ::log::debug!("Relocated image {} -> {}", image_url, filename);
    report.relocated += 1;
    format!("![[{filename}]]")
}

fn placeholder(url: &str) -> String {
    format!("[{PLACEHOLDER_LABEL}]({url})")
}

/// Resolve an image `src` to an absolute URL.
///
/// Absolute http(s) URLs pass through unchanged; anything else is joined
/// against the page URL.
pub fn resolve_image_url(src: &str, page_url: &Url) -> Result<Url, url::ParseError> {
    if src.starts_with("http://") || src.starts_with("https://") {
        Url::parse(src)
    } else {
        page_url.join(src)
    }
}

/// Generated local name: `Pasted image <YYYYMMDDHHMMSS>_<suffix><ext>`
pub fn image_filename(image_url: &Url, suffix_length: usize) -> String {
    let timestamp = Local::now().format("%Y%m%d%H%M%S");
    format!(
        "Pasted image {}_{}{}",
        timestamp,
        random_suffix(suffix_length),
        image_extension(image_url)
    )
}

/// Extension from the URL path, dot included, truncated to 4 characters;
/// `.png` when the path has none.
fn image_extension(image_url: &Url) -> String {
    let name = image_url.path().rsplit('/').next().unwrap_or("");
    match name.rfind('.') {
        Some(pos) if pos > 0 && pos + 1 < name.len() => name[pos..].chars().take(4).collect(),
        _ => String::from(".png"),
    }
}
