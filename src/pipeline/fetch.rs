//! Source file fetching.

use std::path::Path;

use crate::error::ItemError;
use crate::ports::FileSystem;

/// Reads the full text of a source file named in the manifest.
///
/// # Errors
///
/// Returns [`ItemError::Fetch`] if the file is missing or unreadable.
pub fn fetch_source(fs: &dyn FileSystem, path: &str) -> Result<String, ItemError> {
    fs.read_to_string(Path::new(path))
        .map_err(|source| ItemError::Fetch { path: path.to_string(), source })
}
