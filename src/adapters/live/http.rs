//! Live adapter for the `Generator` port using a plain JSON endpoint.
//!
//! The endpoint receives `{"prompt", "language", "output_format"}` and answers
//! with `{"text": ...}` on success.

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::ports::generator::{
    GenerationError, GenerationFuture, GenerationRequest, GenerationResponse, Generator,
    OutputFormat,
};

/// Live generator that POSTs prompts to a configured endpoint.
pub struct HttpGenerator {
    client: Client,
    endpoint: String,
    token: Option<String>,
}

impl HttpGenerator {
    /// Creates a client for `endpoint`, authorizing with `token` as a bearer
    /// token when one is given.
    #[must_use]
    pub fn new(endpoint: impl Into<String>, token: Option<String>) -> Self {
        Self { client: Client::new(), endpoint: endpoint.into(), token }
    }
}

#[derive(Serialize)]
struct HttpRequestBody<'a> {
    prompt: &'a str,
    language: &'a str,
    output_format: OutputFormat,
}

#[derive(Deserialize)]
struct HttpResponseBody {
    text: String,
}

/// Turns a raw endpoint answer into generated text.
///
/// Any non-2xx status is an error carrying the status code and the body verbatim.
fn decode_response(status: u16, body: String) -> Result<GenerationResponse, GenerationError> {
    if !(200..300).contains(&status) {
        return Err(GenerationError::Status { status, body });
    }
    let parsed: HttpResponseBody =
        serde_json::from_str(&body).map_err(|e| GenerationError::Decode(e.to_string()))?;
    Ok(GenerationResponse { text: parsed.text })
}

impl Generator for HttpGenerator {
    fn generate(&self, request: &GenerationRequest) -> GenerationFuture<'_> {
        let prompt = request.prompt.clone();
        let language = request.language.clone();
        let output_format = request.output_format;

        Box::pin(async move {
            let body = HttpRequestBody { prompt: &prompt, language: &language, output_format };
            let mut call = self.client.post(&self.endpoint).json(&body);
            if let Some(token) = &self.token {
                call = call.bearer_auth(token);
            }

            let response =
                call.send().await.map_err(|e| GenerationError::Transport(e.to_string()))?;
            let status = response.status().as_u16();
            let text =
                response.text().await.map_err(|e| GenerationError::Transport(e.to_string()))?;
            tracing::debug!(status, endpoint = %self.endpoint, "generation endpoint responded");

            decode_response(status, text)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::live::one_shot::serve_once;

    fn request() -> GenerationRequest {
        GenerationRequest {
            target_file_name: "app.py".into(),
            prompt: "Generate pytest test cases for 'app.py'".into(),
            language: "python".into(),
            output_format: OutputFormat::Python,
        }
    }

    #[tokio::test]
    async fn success_returns_text_field() {
        let (root, server) = serve_once("200 OK", r#"{"text":"def test_app(): assert True"}"#);
        let generator = HttpGenerator::new(format!("{root}/generate"), Some("secret".into()));

        let response = generator.generate(&request()).await.unwrap();
        assert_eq!(response.text, "def test_app(): assert True");

        let raw = server.join().unwrap();
        assert!(raw.starts_with("POST /generate"));
        assert!(raw.to_ascii_lowercase().contains("authorization: bearer secret"));
        assert!(raw.contains(r#""output_format":"python""#));
        assert!(raw.contains(r#""language":"python""#));
    }

    #[tokio::test]
    async fn non_success_error_contains_status_and_body() {
        let body = r#"{"detail":"quota exceeded"}"#;
        let (root, server) = serve_once("429 Too Many Requests", body);
        let generator = HttpGenerator::new(format!("{root}/generate"), None);

        let err = generator.generate(&request()).await.unwrap_err();
        server.join().unwrap();

        let msg = err.to_string();
        assert!(msg.contains("429"), "missing status in {msg}");
        assert!(msg.contains(body), "missing body in {msg}");
    }

    #[test]
    fn malformed_success_body_is_decode_error() {
        let err = decode_response(200, "not json".into()).unwrap_err();
        assert!(matches!(err, GenerationError::Decode(_)));
    }
}
