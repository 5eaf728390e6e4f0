//! Binary entrypoint for `testgen`.

use std::process::ExitCode;

use changegen::cli::Pipeline;
use changegen::config::Settings;

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    changegen::logging::init();

    match changegen::run(Pipeline::Tests, std::env::args(), Settings::from_env) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "testgen failed");
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
