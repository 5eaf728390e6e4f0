//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the pipelines and an external
//! system (the disk, the generation service). Implementations live in
//! `src/adapters/`.

pub mod filesystem;
pub mod generator;

pub use filesystem::FileSystem;
pub use generator::{
    GenerationError, GenerationFuture, GenerationRequest, GenerationResponse, Generator,
    OutputFormat,
};
