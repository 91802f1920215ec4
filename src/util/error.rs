//! Error types for dotfind.

use thiserror::Error;

/// Result alias for dotfind operations.
pub type DotFindResult<T> = std::result::Result<T, DotFindError>;

/// Errors that can occur when running dotfind algorithms.
#[derive(Debug, Error)]
pub enum DotFindError {
    /// An image dimension is zero.
    #[error("invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    /// The pixel buffer is shorter than `width * height`.
    #[error("pixel buffer too small: needed {needed}, got {got}")]
    BufferTooSmall { needed: usize, got: usize },
    /// The scorer was called with an empty ground-truth set.
    #[error("ground-truth set is empty")]
    EmptyGroundTruth,
    /// Image decoding or loading failed.
    #[cfg(feature = "image-io")]
    #[error("image i/o failed: {reason}")]
    ImageIo { reason: String },
}
