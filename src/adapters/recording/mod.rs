//! Decorators that pass each port call through and append it to a cassette.
//!
//! Results are stored as `{"Ok": value}` or `{"Err": message}`, which the
//! replaying adapters read back.

pub mod filesystem;
pub mod generator;

use std::fmt::Display;
use std::sync::{Arc, Mutex};

use serde::Serialize;
use serde_json::{json, Value};

use crate::cassette::recorder::CassetteRecorder;

pub use filesystem::RecordingFileSystem;
pub use generator::RecordingGenerator;

/// A recorder bound to one port name.
pub(crate) struct Tape {
    port: &'static str,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl Tape {
    pub(crate) fn new(port: &'static str, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { port, recorder }
    }

    /// Appends a call whose output is a plain value.
    pub(crate) fn value(&self, method: &str, input: &impl Serialize, output: &impl Serialize) {
        self.push(method, to_json(input), to_json(output));
    }

    /// Appends a call whose output is a `Result`; errors keep only their message.
    pub(crate) fn result<T: Serialize, E: Display>(
        &self,
        method: &str,
        input: &impl Serialize,
        outcome: &Result<T, E>,
    ) {
        let output = match outcome {
            Ok(v) => json!({ "Ok": to_json(v) }),
            Err(e) => json!({ "Err": e.to_string() }),
        };
        self.push(method, to_json(input), output);
    }

    fn push(&self, method: &str, input: Value, output: Value) {
        let mut recorder = self.recorder.lock().expect("cassette recorder lock poisoned");
        recorder.record(self.port, method, input, output);
    }
}

/// Port inputs and outputs are plain data; a failure here is a bug.
fn to_json(value: &impl Serialize) -> Value {
    serde_json::to_value(value).expect("port data is always representable as JSON")
}
