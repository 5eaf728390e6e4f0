//! Generate tests and documentation for changed source files.
//!
//! Two binaries share this library: `testgen` writes generated pytest
//! modules under `tests/`, and `docgen` appends generated documentation to
//! `README.md`. Both read a manifest of changed paths and process each
//! Python file in turn, isolating failures per file.

pub mod adapters;
pub mod cassette;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod logging;
pub mod pipeline;
pub mod ports;

use cli::{Cli, Pipeline};
use config::Settings;
use error::Error;

/// Run a pipeline with the provided arguments.
///
/// `load_settings` is called once, after the arguments are accepted, so
/// `--help` and `--version` work without any configuration.
///
/// # Errors
///
/// Returns an error when argument parsing fails, the settings are invalid,
/// or the run fails outside its per-file loop.
pub fn run<I, T, F>(pipeline: Pipeline, args: I, load_settings: F) -> Result<(), Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
    F: FnOnce() -> Result<Settings, Error>,
{
    let cli = match Cli::try_parse_for(pipeline, args) {
        Ok(cli) => cli,
        Err(err) if !err.use_stderr() => {
            print!("{err}");
            return Ok(());
        }
        Err(err) => return Err(Error::Usage(err.to_string())),
    };
    let settings = load_settings()?;
    tracing::info!(pipeline = pipeline.bin_name(), manifest = %cli.changed_files.display(), "starting run");
    commands::dispatch(pipeline, &cli.changed_files, &settings)
}
