//! Replaying adapters that replay recorded interactions.

pub mod filesystem;
pub mod generator;

use std::sync::Mutex;

use serde::de::DeserializeOwned;

use crate::cassette::replayer::CassetteReplayer;

pub use filesystem::ReplayingFileSystem;
pub use generator::ReplayingGenerator;

/// Take the output of the next recorded interaction for `port::method`.
///
/// # Panics
///
/// Panics if the cassette has no more interactions for the pair.
pub(crate) fn next_output(
    replayer: &Mutex<CassetteReplayer>,
    port: &str,
    method: &str,
) -> serde_json::Value {
    let mut replayer = replayer.lock().expect("replayer lock poisoned");
    replayer.next_interaction(port, method).output
}

/// Decode a recorded `Result` using the Ok/Err JSON convention.
///
/// Reads what `recording::Tape::result` writes. Lowercase `ok`/`err` keys are
/// accepted for hand-written cassettes.
pub(crate) fn replay_result<T: DeserializeOwned>(
    output: &serde_json::Value,
    context: &str,
) -> Result<T, String> {
    if let Some(err) = output.get("Err").or_else(|| output.get("err")) {
        return Err(err.as_str().unwrap_or("unknown error").to_string());
    }
    let value = output.get("Ok").or_else(|| output.get("ok")).unwrap_or(output);
    serde_json::from_value(value.clone())
        .map_err(|e| format!("{context}: failed to deserialize recorded output: {e}"))
}
