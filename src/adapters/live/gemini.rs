//! Live adapter for the `Generator` port using the Gemini `generateContent` API.

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::ports::generator::{
    GenerationError, GenerationFuture, GenerationRequest, GenerationResponse, Generator,
};

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Live generator that calls Google's Gemini API.
pub struct GeminiGenerator {
    client: Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
}

impl GeminiGenerator {
    /// Creates a client for the given model. A missing key is sent as no key
    /// at all, and the service rejects the call.
    #[must_use]
    pub fn new(model: impl Into<String>, api_key: Option<String>) -> Self {
        Self::with_base_url(GEMINI_API_BASE, model, api_key)
    }

    /// Creates a client talking to a different API root.
    #[must_use]
    pub fn with_base_url(
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key: Option<String>,
    ) -> Self {
        Self { client: Client::new(), base_url: base_url.into(), model: model.into(), api_key }
    }

    fn url(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url.trim_end_matches('/'), self.model)
    }
}

/// Request body for `generateContent`.
#[derive(Serialize)]
struct GeminiRequest<'a> {
    contents: Vec<GeminiContent<'a>>,
}

/// One turn of the conversation.
#[derive(Serialize)]
struct GeminiContent<'a> {
    role: &'a str,
    parts: Vec<GeminiPart>,
}

#[derive(Serialize, Deserialize)]
struct GeminiPart {
    #[serde(default)]
    text: String,
}

#[derive(Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

fn build_body(request: &GenerationRequest) -> GeminiRequest<'static> {
    let hint = format!(
        "Language: {}. Output format: {}.",
        request.language, request.output_format
    );
    GeminiRequest {
        contents: vec![GeminiContent {
            role: "user",
            parts: vec![GeminiPart { text: request.prompt.clone() }, GeminiPart { text: hint }],
        }],
    }
}

/// Turns a raw `generateContent` answer into generated text.
fn decode_response(status: u16, body: String) -> Result<GenerationResponse, GenerationError> {
    if !(200..300).contains(&status) {
        return Err(GenerationError::Status { status, body });
    }
    let parsed: GeminiResponse =
        serde_json::from_str(&body).map_err(|e| GenerationError::Decode(e.to_string()))?;
    let candidate = parsed
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| GenerationError::Decode(format!("response has no candidates: {body}")))?;
    let text = candidate.content.parts.into_iter().map(|part| part.text).collect::<String>();
    Ok(GenerationResponse { text })
}

impl Generator for GeminiGenerator {
    fn generate(&self, request: &GenerationRequest) -> GenerationFuture<'_> {
        let body = build_body(request);
        let url = self.url();

        Box::pin(async move {
            let mut call = self.client.post(&url).json(&body);
            if let Some(key) = &self.api_key {
                call = call.header("x-goog-api-key", key);
            }

            let response =
                call.send().await.map_err(|e| GenerationError::Transport(e.to_string()))?;
            let status = response.status().as_u16();
            let text =
                response.text().await.map_err(|e| GenerationError::Transport(e.to_string()))?;
            tracing::debug!(status, model = %self.model, "gemini responded");

            decode_response(status, text)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::live::one_shot::serve_once;
    use crate::ports::OutputFormat;

    fn request() -> GenerationRequest {
        GenerationRequest {
            target_file_name: "app.py".into(),
            prompt: "Generate pytest test cases".into(),
            language: "python".into(),
            output_format: OutputFormat::Python,
        }
    }

    #[test]
    fn body_carries_prompt_and_format_hint() {
        let body = serde_json::to_value(build_body(&request())).unwrap();
        let parts = &body["contents"][0]["parts"];
        assert_eq!(parts[0]["text"], "Generate pytest test cases");
        assert_eq!(parts[1]["text"], "Language: python. Output format: python.");
        assert_eq!(body["contents"][0]["role"], "user");
    }

    #[test]
    fn url_includes_model() {
        let g = GeminiGenerator::with_base_url("http://localhost:1/v1beta/", "gemini-1.5-flash", None);
        assert_eq!(g.url(), "http://localhost:1/v1beta/models/gemini-1.5-flash:generateContent");
    }

    #[test]
    fn decodes_concatenated_candidate_parts() {
        let body = r#"{"candidates":[{"content":{"parts":[{"text":"def test_a():"},{"text":" pass"}]}}]}"#;
        let response = decode_response(200, body.to_string()).unwrap();
        assert_eq!(response.text, "def test_a(): pass");
    }

    #[test]
    fn non_success_keeps_status_and_body() {
        let body = r#"{"error":{"code":403,"message":"API key not valid"}}"#;
        match decode_response(403, body.to_string()) {
            Err(GenerationError::Status { status, body: raw }) => {
                assert_eq!(status, 403);
                assert_eq!(raw, body);
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[test]
    fn empty_candidates_is_a_decode_error() {
        let err = decode_response(200, r#"{"candidates":[]}"#.to_string()).unwrap_err();
        assert!(matches!(err, GenerationError::Decode(_)));
    }

    const ANSWER: &str = r#"{"candidates":[{"content":{"parts":[{"text":"def test_app(): pass"}]}}]}"#;

    #[tokio::test]
    async fn sends_api_key_header_when_configured() {
        let (root, server) = serve_once("200 OK", ANSWER);
        let generator =
            GeminiGenerator::with_base_url(root, "gemini-1.5-flash", Some("k-123".into()));

        let response = generator.generate(&request()).await.unwrap();
        assert_eq!(response.text, "def test_app(): pass");

        let raw = server.join().unwrap();
        assert!(raw.starts_with("POST /models/gemini-1.5-flash:generateContent"));
        assert!(raw.to_ascii_lowercase().contains("x-goog-api-key: k-123"));
        assert!(raw.contains("Generate pytest test cases"));
    }

    #[tokio::test]
    async fn omits_api_key_header_without_a_key() {
        let (root, server) = serve_once("403 Forbidden", r#"{"error":{"code":403}}"#);
        let generator = GeminiGenerator::with_base_url(root, "gemini-1.5-flash", None);

        let err = generator.generate(&request()).await.unwrap_err();
        assert!(matches!(err, GenerationError::Status { status: 403, .. }));

        let raw = server.join().unwrap();
        assert!(!raw.to_ascii_lowercase().contains("x-goog-api-key"));
    }
}
