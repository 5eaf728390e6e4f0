//! Live adapters for real external interactions.

pub mod filesystem;
pub mod gemini;
pub mod http;

pub use filesystem::LiveFileSystem;
pub use gemini::GeminiGenerator;
pub use http::HttpGenerator;

#[cfg(test)]
pub(crate) mod one_shot;
