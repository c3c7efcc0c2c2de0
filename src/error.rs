// src/error.rs
use folio_fo::GenerateError;
use folio_style::ConfigError;
use folio_traits::{EngineError, ResourceError};
use thiserror::Error;

/// A comprehensive error type for the document generation pipeline.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Style sheet or font configuration that has to be fixed before anything is generated.
    #[error("Invalid configuration: {0}")]
    Configuration(#[from] ConfigError),

    #[error("Markup generation failed: {0}")]
    Generate(#[from] GenerateError),

    #[error("Rendering failed: {0}")]
    Engine(#[from] EngineError),

    #[error("Resource error: {0}")]
    Resource(#[from] ResourceError),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Pipeline is not configured correctly: {0}")]
    Config(String),
}
