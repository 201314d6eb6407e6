use thiserror::Error;

/// Hard failures surfaced to callers.
///
/// Failed decode attempts are not errors; they are reported as
/// [`DecodeOutcome::NotFound`](crate::DecodeOutcome::NotFound).
#[derive(Error, Debug)]
pub enum ScanError {
    /// Raster dimensions or buffer length are unusable
    #[error("malformed input raster {width}x{height}x{channels}: {reason}")]
    MalformedInput {
        /// Requested width
        width: usize,
        /// Requested height
        height: usize,
        /// Requested channel count
        channels: usize,
        /// What was wrong
        reason: &'static str,
    },

    /// Only 1 (gray) and 3 (RGB) channel rasters are accepted
    #[error("unsupported channel count: {0}")]
    UnsupportedChannels(usize),

    /// Source image could not be decoded
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// File system failure while loading input
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Crate result alias
pub type Result<T> = std::result::Result<T, ScanError>;
