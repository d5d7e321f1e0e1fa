use ogcard_render::RenderError;
use ogcard_style::StyleParseError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid style value: {0}")]
    Style(#[from] StyleParseError),
    #[error("Rendering error: {0}")]
    Render(#[from] RenderError),
    #[error("Other pipeline error: {0}")]
    Other(String),
}

impl From<tokio::task::JoinError> for PipelineError {
    fn from(e: tokio::task::JoinError) -> Self {
        PipelineError::Other(format!("render task failed: {}", e))
    }
}

/// A document whose card could not be produced.
#[derive(Debug)]
pub struct CardFailure {
    /// Output path the card would have been written to.
    pub path: String,
    pub error: RenderError,
}

impl std::fmt::Display for CardFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.error.path() {
            Some(asset) => write!(f, "{} (asset '{}'): {}", self.path, asset, self.error),
            None => write!(f, "{}: {}", self.path, self.error),
        }
    }
}
