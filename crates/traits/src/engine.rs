use crate::font::FontSet;
use thiserror::Error;

/// An opaque failure reported by the external rendering engine.
#[derive(Error, Debug, Clone)]
#[error("Render engine '{engine}' failed: {message}")]
pub struct EngineError {
    pub engine: String,
    pub message: String,
}

impl EngineError {
    pub fn new(engine: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            engine: engine.into(),
            message: message.into(),
        }
    }
}

/// The page-layout engine that turns the generated markup into a finished
/// document (typically PDF bytes).
pub trait RenderEngine: Send + Sync {
    fn render(&self, markup: &str, fonts: &FontSet) -> Result<Vec<u8>, EngineError>;

    fn name(&self) -> &'static str;
}
