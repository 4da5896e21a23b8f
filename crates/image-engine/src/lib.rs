//! Image transform pipeline for the process server.
//!
//! Decodes an uploaded image, resolves the target size (aspect lock +
//! maximum-dimension clamp), resizes or letterboxes it, applies contrast
//! and sharpening, and encodes the result as PNG.

pub mod adjust;
pub mod compose;
pub mod dimensions;
pub mod encode;
pub mod params;
pub mod pipeline;
pub mod resize;

// Re-exports for convenience
pub use dimensions::{TargetSize, clamp_to_max, resolve_target_size};
pub use params::{AspectRatio, FillColor, ProcessParams, ResizeMode};
pub use pipeline::{ProcessedImage, process_image};

/// Largest width or height the pipeline will ever produce.
pub const MAX_DIMENSION: u32 = 2048;

/// Errors that can occur while transforming an image.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("{0}")]
    InvalidImage(String),

    #[error("Invalid parameter '{param}': {message}")]
    InvalidParameter { param: String, message: String },

    #[error("{0}")]
    Encode(String),
}

impl EngineError {
    pub fn invalid_param(param: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            param: param.into(),
            message: message.into(),
        }
    }
}

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;
