//! Error types for the layout engine.
//!
//! This module defines all error types that can occur while constructing,
//! measuring and painting layout elements.

/// Result type alias for layout operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during PDF composition.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Element does not fit the column horizontally, even on an empty column
    #[error("{element} is too wide: needs {width} but the column offers {available}")]
    ElementTooWide {
        /// Kind of the offending element (e.g. "Paragraph")
        element: String,
        /// Measured width
        width: f64,
        /// Width available in the column
        available: f64,
    },

    /// Element is taller than a full, empty column
    #[error("{element} is too tall: needs {height} but a full column offers {available}")]
    ElementTooTall {
        /// Kind of the offending element
        element: String,
        /// Measured height
        height: f64,
        /// Height of an empty column
        available: f64,
    },

    /// Font cannot represent a character
    #[error("Font {font} cannot encode character {ch:?}")]
    Encoding {
        /// The unrepresentable character
        ch: char,
        /// Base font name of the font that was asked
        font: String,
    },

    /// Invalid constructor input (negative padding, font size below 1, ...)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Font program could not be loaded
    #[error("Font error: {0}")]
    Font(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Check whether this error was raised while placing an element in a column.
    pub fn is_layout_error(&self) -> bool {
        matches!(self, Error::ElementTooWide { .. } | Error::ElementTooTall { .. })
    }
}

/// Fail with [`Error::InvalidArgument`] unless `value` is a finite, non-negative number.
pub(crate) fn ensure_non_negative(what: &str, value: f64) -> Result<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(Error::InvalidArgument(format!("{} must be >= 0, got {}", what, value)))
    }
}
