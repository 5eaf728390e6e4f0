//! Batch orchestration: fetch, generate, and persist each selected file.

use std::path::Path;

use crate::context::ServiceContext;
use crate::error::{Error, ItemError};
use crate::ports::GenerationRequest;

use super::fetch::fetch_source;
use super::manifest::select_sources;
use super::prompt::{doc_request, test_request};
use super::writer::{merge_sections, write_test_artifact, DocSections};
use super::SOURCE_SUFFIX;

/// Outcome for one file of the manifest.
#[derive(Debug)]
pub struct ItemResult {
    /// Path as listed in the manifest.
    pub file: String,
    /// The generated text, or why this file failed.
    pub outcome: Result<String, ItemError>,
}

/// Per-file results of a batch, in manifest order.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// One entry per attempted file.
    pub items: Vec<ItemResult>,
}

impl BatchReport {
    /// Number of files attempted.
    #[must_use]
    pub fn attempted(&self) -> usize {
        self.items.len()
    }

    /// Number of files that produced an artifact.
    #[must_use]
    pub fn succeeded(&self) -> usize {
        self.items.iter().filter(|item| item.outcome.is_ok()).count()
    }

    /// Results that failed.
    pub fn failures(&self) -> impl Iterator<Item = &ItemResult> {
        self.items.iter().filter(|item| item.outcome.is_err())
    }
}

/// How a run ended.
#[derive(Debug)]
pub enum RunOutcome {
    /// The manifest named no source files; nothing was generated.
    NoSources,
    /// Every selected file was attempted.
    Completed(BatchReport),
}

/// Generates a test module under `tests_root` for every source in the manifest.
///
/// # Errors
///
/// Only a manifest read failure is returned; per-file failures are reported
/// in the [`BatchReport`].
pub async fn generate_tests(
    ctx: &ServiceContext,
    manifest: &Path,
    tests_root: &Path,
) -> Result<RunOutcome, Error> {
    let files = read_manifest(ctx, manifest)?;
    if files.is_empty() {
        println!("No Python files were modified. Skipping test case generation.");
        return Ok(RunOutcome::NoSources);
    }

    let mut report = BatchReport::default();
    for file in files {
        println!("Processing {file}...");
        let outcome = match generate_one(ctx, &file, test_request).await {
            Ok(text) => {
                println!("Generated test case: {text}");
                write_test_artifact(ctx.fs.as_ref(), tests_root, &file, &text).map(|path| {
                    tracing::info!(file = %file, artifact = %path.display(), "test generated");
                    println!("Test generated for {file}");
                    text
                })
            }
            Err(e) => Err(e),
        };
        report.items.push(finish_item(file, outcome));
    }
    Ok(RunOutcome::Completed(report))
}

/// Generates documentation for every source in the manifest and appends it
/// to the aggregate document at `readme`.
///
/// The document is read once before the first file and rewritten once after
/// the last. The header is appended even when every file failed.
///
/// # Errors
///
/// Returns an error if the manifest cannot be read or the document cannot be
/// read or rewritten. Per-file failures are reported in the [`BatchReport`].
pub async fn generate_docs(
    ctx: &ServiceContext,
    manifest: &Path,
    readme: &Path,
) -> Result<RunOutcome, Error> {
    let files = read_manifest(ctx, manifest)?;
    if files.is_empty() {
        println!("No Python files were modified. Skipping documentation generation.");
        return Ok(RunOutcome::NoSources);
    }

    let existing = if ctx.fs.exists(readme) {
        ctx.fs.read_to_string(readme).map_err(|source| readme_error(readme, source))?
    } else {
        String::new()
    };

    let mut sections = DocSections::new();
    let mut report = BatchReport::default();
    for file in files {
        println!("Processing {file}...");
        let outcome = generate_one(ctx, &file, doc_request).await.map(|text| {
            sections.insert(file.clone(), text.clone());
            println!("Documentation generated for {file}");
            text
        });
        report.items.push(finish_item(file, outcome));
    }

    if sections.is_empty() {
        tracing::warn!(readme = %readme.display(), "no documentation generated, appending an empty section");
    }
    let merged = merge_sections(&existing, &sections);
    ctx.fs.write(readme, &merged).map_err(|source| readme_error(readme, source))?;
    println!("{} updated with documentation for {} file(s).", readme.display(), sections.len());
    tracing::info!(readme = %readme.display(), sections = sections.len(), "document rewritten");

    Ok(RunOutcome::Completed(report))
}

fn read_manifest(ctx: &ServiceContext, manifest: &Path) -> Result<Vec<String>, Error> {
    select_sources(ctx.fs.as_ref(), manifest, SOURCE_SUFFIX)
        .map_err(|source| Error::Manifest { path: manifest.to_path_buf(), source })
}

fn readme_error(readme: &Path, source: std::io::Error) -> Error {
    Error::Readme { path: readme.to_path_buf(), source }
}

/// Fetches `file` and asks the generator for text about it.
async fn generate_one(
    ctx: &ServiceContext,
    file: &str,
    build: fn(&str, &str) -> GenerationRequest,
) -> Result<String, ItemError> {
    let source = fetch_source(ctx.fs.as_ref(), file)?;
    let request = build(file, &source);
    let response = ctx.generator.generate(&request).await?;
    Ok(response.text)
}

/// Logs a failed item and wraps the outcome.
fn finish_item(file: String, outcome: Result<String, ItemError>) -> ItemResult {
    if let Err(e) = &outcome {
        tracing::error!(file = %file, error = %e, "failed to process file");
        println!("Error processing {file}: {e}");
    }
    ItemResult { file, outcome }
}
