use thiserror::Error;

/// Errors raised at the I/O edges of the canvas (image files and settings).
///
/// Editing operations themselves never fail; degenerate input is skipped.
#[derive(Debug, Error)]
pub enum CanvasError {
    #[error("Failed to decode or encode image: {0}")]
    Image(#[from] image::ImageError),

    #[error("Failed to access file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to (de)serialize tool settings: {0}")]
    Settings(#[from] serde_json::Error),
}

/// Result type for fallible canvas operations
pub type CanvasResult<T> = Result<T, CanvasError>;
