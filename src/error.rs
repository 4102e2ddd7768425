//! Error type for parameter validation, color parsing, and export.

use std::path::PathBuf;

/// Errors raised at the boundary of the renderer.
///
/// Rendering itself never fails once parameters have been validated; every
/// variant here is raised before any pixel is written or after the raster is
/// complete (export).
#[derive(Debug, thiserror::Error)]
pub enum PatternError {
    /// A color string was not `#` followed by six hex digits.
    #[error("invalid color {input:?}: {reason}")]
    InvalidColor { input: String, reason: &'static str },

    /// Gradient interpolation needs at least two anchor colors.
    #[error("gradient needs at least 2 color stops, got {count}")]
    TooFewStops { count: usize },

    /// A scalar render parameter was NaN or infinite.
    #[error("parameter `{name}` must be finite, got {value}")]
    NonFiniteParameter { name: &'static str, value: f64 },

    /// A pattern identifier did not name any known pattern.
    #[error("unknown pattern {0:?}")]
    UnknownPattern(String),

    /// A stop index was outside the current palette.
    #[error("color stop index {index} out of range (palette has {len} stops)")]
    StopIndexOutOfRange { index: usize, len: usize },

    /// Two rasters with different dimensions were compared.
    #[error("raster size mismatch: {a_width}x{a_height} vs {b_width}x{b_height}")]
    SizeMismatch {
        a_width: u32,
        a_height: u32,
        b_width: u32,
        b_height: u32,
    },

    /// A pixel buffer did not hold exactly `width * height` RGBA pixels.
    #[error("pixel buffer holds {actual} bytes, expected {expected}")]
    BufferLength { expected: usize, actual: usize },

    /// PNG encoding or decoding failed.
    #[error("image codec error: {0}")]
    Image(#[from] image::ImageError),

    /// Reading or writing an image file failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, PatternError>;
