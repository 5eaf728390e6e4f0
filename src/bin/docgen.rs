//! Binary entrypoint for `docgen`.

use std::process::ExitCode;

use changegen::cli::Pipeline;
use changegen::config::Settings;

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    changegen::logging::init();

    match changegen::run(Pipeline::Docs, std::env::args(), Settings::from_env) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "docgen failed");
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
