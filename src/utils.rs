use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use rand::Rng;
use rand::distr::Alphanumeric;
use regex::Regex;

use crate::error::ArchiveError;

/// Characters that are illegal in filenames on common filesystems
static ILLEGAL_CHARS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[\\/*?:"<>|]"#).expect("valid regex"));

static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

static UNDERSCORE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"_+").expect("valid regex"));

static BLANK_RUN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").expect("valid regex"));

/// Convert a title to a safe base filename.
///
/// Removes characters illegal in filenames, collapses whitespace runs and
/// repeated underscores into a single underscore, and trims underscores at
/// both ends. The result may be empty if the title was entirely illegal
/// characters; callers must supply a fallback base name.
pub fn sanitize_filename(title: &str) -> String {
    let name = ILLEGAL_CHARS_RE.replace_all(title, "");
    let name = WHITESPACE_RE.replace_all(&name, "_");
    let name = UNDERSCORE_RE.replace_all(&name, "_");
    name.trim_matches('_').to_string()
}

/// Generate a random alphanumeric token of the given length.
///
/// Uniform over the 62-character alphabet; not cryptographically secured -
/// only used to disambiguate image filenames sharing a timestamp.
pub fn random_suffix(length: usize) -> String {
    rand::rng()
        .sample_iter(Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

/// Find an unused `.md` path for the given base name.
///
/// Reads live directory state: `<base>.md` first, then `<base>_1.md`,
/// `<base>_2.md`, and so on. Callers writing from multiple tasks would have
/// to serialize this check-then-create per base name; the archiver is
/// sequential, so no guard is needed.
pub fn unique_md_path(dir: &Path, base: &str) -> PathBuf {
    let mut candidate = dir.join(format!("{base}.md"));
    let mut counter = 0;
    while candidate.exists() {
        counter += 1;
        candidate = dir.join(format!("{base}_{counter}.md"));
    }
    candidate
}

/// Read a URL list file: one URL per line, blank lines and `#` comments skipped.
pub fn read_url_list(path: &Path) -> Result<Vec<String>, ArchiveError> {
    let contents = fs::read_to_string(path).map_err(|source| ArchiveError::UrlList {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect())
}

/// Trim the text and collapse every run of 3+ newlines to exactly 2.
pub fn collapse_blank_runs(text: &str) -> String {
    BLANK_RUN_RE.replace_all(text.trim(), "\n\n").to_string()
}
