//! Changed-file manifest parsing.

use std::io;
use std::path::Path;

use crate::ports::FileSystem;

/// Keeps the trimmed lines of `text` that end with `suffix`, in order.
///
/// Duplicates and non-existent paths are kept; they fail later, per file.
#[must_use]
pub fn parse_manifest(text: &str, suffix: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| line.ends_with(suffix))
        .map(String::from)
        .collect()
}

/// Reads the manifest at `path` and selects the source files in it.
///
/// # Errors
///
/// Returns the underlying read failure if the manifest cannot be read.
pub fn select_sources(fs: &dyn FileSystem, path: &Path, suffix: &str) -> io::Result<Vec<String>> {
    let text = fs.read_to_string(path)?;
    let selected = parse_manifest(&text, suffix);
    tracing::debug!(manifest = %path.display(), selected = selected.len(), "manifest read");
    Ok(selected)
}
