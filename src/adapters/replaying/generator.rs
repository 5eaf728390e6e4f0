//! Replaying adapter for the `Generator` port.

use std::sync::Mutex;

use super::{next_output, replay_result};
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::{
    GenerationError, GenerationFuture, GenerationRequest, GenerationResponse, Generator,
};

/// Serves recorded generations from a cassette.
pub struct ReplayingGenerator {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingGenerator {
    /// Create a replaying generator backed by the given replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }
}

impl Generator for ReplayingGenerator {
    fn generate(&self, _request: &GenerationRequest) -> GenerationFuture<'_> {
        let output = next_output(&self.replayer, "generator", "generate");
        let result: Result<GenerationResponse, GenerationError> =
            replay_result(&output, "generator::generate").map_err(GenerationError::Replayed);
        Box::pin(async move { result })
    }
}
