//! Configuration for page layouts.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Page geometry and spacing rules used by [`MultiColumnLayout`].
///
/// Ratios are fractions of the page width (horizontal values) or height
/// (vertical values).
///
/// [`MultiColumnLayout`]: crate::layout::MultiColumnLayout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Left and right page margin.
    pub horizontal_margin_ratio: f64,

    /// Top and bottom page margin.
    pub vertical_margin_ratio: f64,

    /// Gap between adjacent columns.
    pub column_gap_ratio: f64,

    /// Vertical spacing around elements without a font.
    pub implicit_margin: f64,

    /// Vertical spacing around text elements, as a multiple of their font size.
    pub text_margin_factor: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutConfig {
    /// Configuration with the default ratios.
    pub fn new() -> Self {
        Self {
            horizontal_margin_ratio: 0.1,
            vertical_margin_ratio: 0.1,
            column_gap_ratio: 0.05,
            implicit_margin: 14.0,
            text_margin_factor: 1.2,
        }
    }

    /// Parse a configuration from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| Error::InvalidArgument(format!("layout config: {}", e)))
    }

    /// Set the left/right page margin ratio.
    pub fn with_horizontal_margin_ratio(mut self, ratio: f64) -> Self {
        self.horizontal_margin_ratio = ratio;
        self
    }

    /// Set the top/bottom page margin ratio.
    pub fn with_vertical_margin_ratio(mut self, ratio: f64) -> Self {
        self.vertical_margin_ratio = ratio;
        self
    }

    /// Set the column gap ratio.
    pub fn with_column_gap_ratio(mut self, ratio: f64) -> Self {
        self.column_gap_ratio = ratio;
        self
    }

    /// Set the spacing used around elements without a font.
    pub fn with_implicit_margin(mut self, margin: f64) -> Self {
        self.implicit_margin = margin;
        self
    }

    /// Set the font-size multiple used around text elements.
    pub fn with_text_margin_factor(mut self, factor: f64) -> Self {
        self.text_margin_factor = factor;
        self
    }
}
