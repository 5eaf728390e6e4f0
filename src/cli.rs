//! CLI argument definitions.

use std::path::PathBuf;

use clap::{CommandFactory, FromArgMatches, Parser};

/// The two batch pipelines, one per binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pipeline {
    /// Generate pytest modules under `tests/`.
    Tests,
    /// Append generated documentation to `README.md`.
    Docs,
}

impl Pipeline {
    /// Binary name shown in usage and errors.
    #[must_use]
    pub fn bin_name(self) -> &'static str {
        match self {
            Self::Tests => "testgen",
            Self::Docs => "docgen",
        }
    }

    fn about(self) -> &'static str {
        match self {
            Self::Tests => "Generate test cases for modified files.",
            Self::Docs => "Generate documentation for modified files and append it to README.md.",
        }
    }
}

/// Arguments shared by both binaries.
#[derive(Debug, Parser)]
#[command(version)]
pub struct Cli {
    /// Path to the file containing the list of changed files.
    #[arg(long, value_name = "PATH")]
    pub changed_files: PathBuf,
}

impl Cli {
    /// Parses `args` for the given pipeline's binary.
    ///
    /// # Errors
    ///
    /// Returns clap's error for missing or unknown arguments, and for
    /// `--help` / `--version` (whose error kind carries the text to print).
    pub fn try_parse_for<I, T>(pipeline: Pipeline, args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let mut command = Self::command().name(pipeline.bin_name()).about(pipeline.about());
        let matches = command.try_get_matches_from_mut(args)?;
        Self::from_arg_matches(&matches).map_err(|err| err.format(&mut command))
    }
}
