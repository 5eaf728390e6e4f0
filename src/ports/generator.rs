//! Generator port for remote text generation.

use std::fmt;
use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Boxed future type alias used by [`Generator`] to keep the trait dyn-compatible.
pub type GenerationFuture<'a> =
    Pin<Box<dyn Future<Output = Result<GenerationResponse, GenerationError>> + Send + 'a>>;

/// The format the generated text is expected to be in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Python source, used for generated test modules.
    Python,
    /// Markdown prose, used for generated documentation.
    Markdown,
}

impl OutputFormat {
    /// The wire name of this format.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Python => "python",
            Self::Markdown => "markdown",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request to generate text for one source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Path of the source file the prompt is about.
    pub target_file_name: String,
    /// The full instruction, with the file name and source text embedded.
    pub prompt: String,
    /// Language of the source file (e.g. `"python"`).
    pub language: String,
    /// Expected format of the generated text.
    pub output_format: OutputFormat,
}

/// The text returned by a generation call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationResponse {
    /// The generated text, untouched.
    pub text: String,
}

/// Failures raised by a [`Generator`] backend.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// The endpoint answered with a non-success status.
    #[error("generation endpoint returned status {status}: {body}")]
    Status {
        /// Numeric HTTP status code.
        status: u16,
        /// Raw response body.
        body: String,
    },
    /// The request could not be sent or the response could not be read.
    #[error("generation request failed: {0}")]
    Transport(String),
    /// The response body did not have the expected shape.
    #[error("failed to decode generation response: {0}")]
    Decode(String),
    /// A replayed interaction recorded a failure.
    #[error("{0}")]
    Replayed(String),
}

/// Generates text from a prompt.
pub trait Generator: Send + Sync {
    /// Generates text for the given request.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails (network, auth, non-success status, etc.).
    fn generate(&self, request: &GenerationRequest) -> GenerationFuture<'_>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_format_serializes_lowercase() {
        assert_eq!(serde_json::to_value(OutputFormat::Python).unwrap(), "python");
        assert_eq!(serde_json::to_value(OutputFormat::Markdown).unwrap(), "markdown");
        assert_eq!(OutputFormat::Markdown.to_string(), "markdown");
    }

    #[test]
    fn status_error_embeds_code_and_body() {
        let err = GenerationError::Status { status: 503, body: "{\"error\":\"busy\"}".into() };
        let msg = err.to_string();
        assert!(msg.contains("503"));
        assert!(msg.contains("{\"error\":\"busy\"}"));
    }
}
