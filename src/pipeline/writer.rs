//! Persisting generated text: per-file test modules and README sections.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;

use crate::error::ItemError;
use crate::ports::FileSystem;

/// Header appended to the aggregate document before each run's sections.
pub const DOCS_HEADER: &str = "## Generated Documentation";

/// Identifier for a source path: `/` becomes `_` and every `.py` is dropped.
#[must_use]
pub fn artifact_id(source_path: &str) -> String {
    source_path.replace('/', "_").replace(super::SOURCE_SUFFIX, "")
}

/// Where the generated tests for `source_path` live under `root`.
///
/// `src/app.py` maps to `<root>/test_src_app.py`.
#[must_use]
pub fn test_artifact_path(root: &Path, source_path: &str) -> PathBuf {
    root.join(format!("test_{}.py", artifact_id(source_path)))
}

/// Writes generated tests verbatim, replacing any previous artifact.
///
/// # Errors
///
/// Returns [`ItemError::Write`] if the directory or file cannot be written.
pub fn write_test_artifact(
    fs: &dyn FileSystem,
    root: &Path,
    source_path: &str,
    text: &str,
) -> Result<PathBuf, ItemError> {
    let path = test_artifact_path(root, source_path);
    fs.write(&path, text).map_err(|source| ItemError::Write { path: path.clone(), source })?;
    Ok(path)
}

/// Generated documentation keyed by file name, in insertion order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DocSections(IndexMap<String, String>);

impl DocSections {
    /// Creates an empty set of sections.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the text for `file`. A file seen again keeps its first position.
    pub fn insert(&mut self, file: impl Into<String>, text: impl Into<String>) {
        self.0.insert(file.into(), text.into());
    }

    /// Number of files with documentation.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no documentation was collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates `(file, text)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(f, t)| (f.as_str(), t.as_str()))
    }
}

/// Appends `sections` to `existing` and returns the new document.
///
/// The existing text is kept byte for byte, line endings included; then
/// [`DOCS_HEADER`] and one `### <file>` subsection per entry, separated by
/// blank lines. The header is written even when `sections` is empty.
/// Nothing is deduplicated: running twice on the same file yields two sections.
#[must_use]
pub fn merge_sections(existing: &str, sections: &DocSections) -> String {
    let mut out = String::with_capacity(existing.len() + 64);
    if !existing.is_empty() {
        out.push_str(existing);
        if !existing.ends_with('\n') {
            out.push('\n');
        }
    }
    out.push_str(DOCS_HEADER);
    for (file, text) in sections.iter() {
        let _ = writeln!(out);
        let _ = writeln!(out, "### {file}");
        let _ = writeln!(out, "{text}");
    }
    out
}
