//! Command dispatch and handlers.

pub mod docgen;
pub mod testgen;

use std::path::Path;

use crate::cassette::session::RecordingSession;
use crate::cli::Pipeline;
use crate::config::Settings;
use crate::context::ServiceContext;
use crate::error::Error;
use crate::pipeline::{BatchReport, RunOutcome};

/// Run `pipeline` over the manifest at `manifest`.
///
/// When the settings ask for recording, all port interactions are written to
/// per-port cassette files once the run ends, even if it failed.
///
/// # Errors
///
/// Returns an error if the context cannot be built, the runtime cannot start,
/// the pipeline fails outside its per-file loop, or the recording cannot be saved.
pub fn dispatch(pipeline: Pipeline, manifest: &Path, settings: &Settings) -> Result<(), Error> {
    let (ctx, session) = ServiceContext::from_settings(settings)?;

    let result = dispatch_with_context(pipeline, manifest, &ctx);

    if let Some(session) = session {
        // Drop context first to release Arc references
        drop(ctx);
        finish_recording(session)?;
    }

    result
}

/// Run `pipeline` with the given service context on a current-thread runtime.
///
/// # Errors
///
/// See [`dispatch`].
pub fn dispatch_with_context(
    pipeline: Pipeline,
    manifest: &Path,
    ctx: &ServiceContext,
) -> Result<(), Error> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(Error::Runtime)?;

    let outcome = runtime.block_on(async {
        match pipeline {
            Pipeline::Tests => testgen::run_with_context(ctx, manifest).await,
            Pipeline::Docs => docgen::run_with_context(ctx, manifest).await,
        }
    })?;

    if let RunOutcome::Completed(report) = &outcome {
        print_summary(report);
    }
    Ok(())
}

fn print_summary(report: &BatchReport) {
    let failed = report.attempted() - report.succeeded();
    println!(
        "Processed {} file(s): {} succeeded, {failed} failed.",
        report.attempted(),
        report.succeeded()
    );
    tracing::info!(attempted = report.attempted(), failed, "batch finished");
}

/// Finish a recording session and print the output directory.
fn finish_recording(session: RecordingSession) -> Result<(), Error> {
    let output_dir = session.finish().map_err(Error::Cassette)?;
    eprintln!("Recording saved to: {}", output_dir.display());
    Ok(())
}
