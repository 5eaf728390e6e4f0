//! Records generation requests and what the backend answered.

use std::sync::{Arc, Mutex};

use super::Tape;
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::{GenerationFuture, GenerationRequest, Generator};

/// Wraps a [`Generator`], appending each request and its outcome to the
/// `generator` cassette.
pub struct RecordingGenerator {
    inner: Box<dyn Generator>,
    tape: Tape,
}

impl RecordingGenerator {
    /// Records calls made to `inner` into `recorder`.
    pub fn new(inner: Box<dyn Generator>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, tape: Tape::new("generator", recorder) }
    }
}

impl Generator for RecordingGenerator {
    fn generate(&self, request: &GenerationRequest) -> GenerationFuture<'_> {
        let request = request.clone();

        Box::pin(async move {
            let outcome = self.inner.generate(&request).await;
            self.tape.result("generate", &request, &outcome);
            outcome
        })
    }
}
