//! Error type shared by the canvas, color, and snapshot code.

use thiserror::Error;

/// Errors raised by canvas operations.
///
/// Painting, filling, clearing, and resizing never fail; only color parsing,
/// pixel reads, and snapshot handling produce these.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CanvasError {
    /// Text is neither `#`-prefixed nor shaped like `rgb(r, g, b)`.
    #[error("unrecognized color format: {0:?}")]
    UnrecognizedColorFormat(String),

    /// `#`-prefixed text that does not hold paintable hex digits.
    #[error("invalid hex color: {0:?}")]
    InvalidColorFormat(String),

    /// Stored snapshot data could not be parsed or failed validation.
    #[error("corrupt persisted snapshot: {0}")]
    CorruptPersistedSnapshot(String),

    /// A snapshot was applied to a grid of a different size.
    #[error("snapshot dimension {found} does not match grid dimension {expected}")]
    DimensionMismatch { expected: u32, found: u32 },

    /// The backing surface could not be created or read.
    #[error("surface error: {0}")]
    Surface(String),
}

/// Convenience alias for results carrying a [`CanvasError`].
pub type CanvasResult<T> = Result<T, CanvasError>;
