//! Batch generation pipelines over a manifest of changed files.
//!
//! Both pipelines share the same shape: select sources from the manifest,
//! then for each one fetch the text, ask the generator, and persist the
//! answer. Failures are captured per file in a [`orchestrator::BatchReport`].

pub mod fetch;
pub mod manifest;
pub mod orchestrator;
pub mod prompt;
pub mod writer;

pub use orchestrator::{generate_docs, generate_tests, BatchReport, ItemResult, RunOutcome};

/// Suffix of the source files the pipelines act on.
pub const SOURCE_SUFFIX: &str = ".py";

/// Directory test artifacts are written under.
pub const TESTS_DIR: &str = "tests";

/// Aggregate document the documentation pipeline appends to.
pub const README_PATH: &str = "README.md";
