//! Prompts sent to the generator.

use crate::ports::{GenerationRequest, OutputFormat};

const SOURCE_LANGUAGE: &str = "python";

/// Request for pytest test cases covering `file_name`.
#[must_use]
pub fn test_request(file_name: &str, source_text: &str) -> GenerationRequest {
    GenerationRequest {
        target_file_name: file_name.to_string(),
        prompt: format!(
            "Generate pytest test cases for the Flask application code in '{file_name}':\n\n{source_text}"
        ),
        language: SOURCE_LANGUAGE.to_string(),
        output_format: OutputFormat::Python,
    }
}

/// Request for Markdown documentation of `file_name`.
#[must_use]
pub fn doc_request(file_name: &str, source_text: &str) -> GenerationRequest {
    GenerationRequest {
        target_file_name: file_name.to_string(),
        prompt: format!(
            "Generate Markdown documentation for the Python code in '{file_name}'. \
             Describe its purpose, public functions and classes, and usage:\n\n{source_text}"
        ),
        language: SOURCE_LANGUAGE.to_string(),
        output_format: OutputFormat::Markdown,
    }
}
