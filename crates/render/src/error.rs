use ogcard_layout::LayoutError;
use ogcard_traits::FontError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to load asset '{path}': {message}")]
    Asset { path: String, message: String },
    #[error("Font error: {0}")]
    Font(#[from] FontError),
    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),
    #[error("PNG encoding failed: {0}")]
    Encoding(String),
    #[error("Invalid canvas: {0}")]
    InvalidCanvas(String),
    #[error("Image cache unavailable while loading '{key}': {message}")]
    Cache { key: String, message: String },
}

impl RenderError {
    pub fn asset(path: impl Into<String>, message: impl ToString) -> Self {
        RenderError::Asset {
            path: path.into(),
            message: message.to_string(),
        }
    }

    /// The asset path that caused the failure, if one did.
    pub fn path(&self) -> Option<&str> {
        match self {
            RenderError::Asset { path, .. } => Some(path),
            RenderError::Font(FontError::LoadFailed { path, .. }) => Some(path),
            _ => None,
        }
    }
}
