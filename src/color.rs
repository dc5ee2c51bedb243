//! Colors for backgrounds, borders and text.
//!
//! Every color can be reduced to 8-bit RGB, which is what the content
//! stream writer emits (`rg` / `RG` operators).

use serde::{Deserialize, Serialize};

/// A color in one of the supported models.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Color {
    /// RGB, each channel 0-255
    Rgb {
        /// Red channel
        r: u8,
        /// Green channel
        g: u8,
        /// Blue channel
        b: u8,
    },
    /// CMYK, each component 0.0-1.0
    Cmyk {
        /// Cyan
        c: f64,
        /// Magenta
        m: f64,
        /// Yellow
        y: f64,
        /// Key (black)
        k: f64,
    },
    /// Gray level 0.0 (black) - 1.0 (white)
    Gray(f64),
}

impl Color {
    /// Create an RGB color.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_compose::color::Color;
    ///
    /// let red = Color::rgb(255, 0, 0);
    /// assert_eq!(red.to_rgb(), (255, 0, 0));
    /// ```
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color::Rgb { r, g, b }
    }

    /// Create a CMYK color; components are clamped to 0.0-1.0.
    pub fn cmyk(c: f64, m: f64, y: f64, k: f64) -> Self {
        Color::Cmyk {
            c: clamp_unit(c),
            m: clamp_unit(m),
            y: clamp_unit(y),
            k: clamp_unit(k),
        }
    }

    /// Create a gray color; the level is clamped to 0.0-1.0.
    pub fn gray(level: f64) -> Self {
        Color::Gray(clamp_unit(level))
    }

    /// Create a black color.
    pub fn black() -> Self {
        Self::rgb(0, 0, 0)
    }

    /// Create a white color.
    pub fn white() -> Self {
        Self::rgb(255, 255, 255)
    }

    /// Parse `#rrggbb` or `rrggbb`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
        Some(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Resolve an X11 color name (case-insensitive) to RGB.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_compose::color::Color;
    ///
    /// assert_eq!(Color::named("SteelBlue").unwrap().to_rgb(), (70, 130, 180));
    /// assert!(Color::named("no-such-color").is_none());
    /// ```
    pub fn named(name: &str) -> Option<Self> {
        let wanted = name.to_ascii_lowercase();
        X11_COLORS
            .iter()
            .find(|(n, _)| *n == wanted)
            .and_then(|(_, hex)| Self::from_hex(hex))
    }

    /// Convert to 8-bit RGB.
    pub fn to_rgb(&self) -> (u8, u8, u8) {
        match *self {
            Color::Rgb { r, g, b } => (r, g, b),
            Color::Cmyk { c, m, y, k } => (
                to_byte((1.0 - c) * (1.0 - k)),
                to_byte((1.0 - m) * (1.0 - k)),
                to_byte((1.0 - y) * (1.0 - k)),
            ),
            Color::Gray(level) => {
                let v = to_byte(level);
                (v, v, v)
            },
        }
    }

    /// RGB components scaled to 0.0-1.0, as content stream operands.
    pub fn to_rgb_components(&self) -> (f64, f64, f64) {
        let (r, g, b) = self.to_rgb();
        (r as f64 / 255.0, g as f64 / 255.0, b as f64 / 255.0)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::black()
    }
}

fn clamp_unit(v: f64) -> f64 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(0.0, 1.0)
    }
}

fn to_byte(unit: f64) -> u8 {
    (unit * 255.0).round().clamp(0.0, 255.0) as u8
}

/// The X11 color names most commonly used in documents.
const X11_COLORS: &[(&str, &str)] = &[
    ("aliceblue", "#f0f8ff"),
    ("antiquewhite", "#faebd7"),
    ("aqua", "#00ffff"),
    ("aquamarine", "#7fffd4"),
    ("azure", "#f0ffff"),
    ("beige", "#f5f5dc"),
    ("black", "#000000"),
    ("blue", "#0000ff"),
    ("blueviolet", "#8a2be2"),
    ("brown", "#a52a2a"),
    ("burlywood", "#deb887"),
    ("cadetblue", "#5f9ea0"),
    ("chartreuse", "#7fff00"),
    ("chocolate", "#d2691e"),
    ("coral", "#ff7f50"),
    ("cornflowerblue", "#6495ed"),
    ("crimson", "#dc143c"),
    ("cyan", "#00ffff"),
    ("darkblue", "#00008b"),
    ("darkgray", "#a9a9a9"),
    ("darkgreen", "#006400"),
    ("darkorange", "#ff8c00"),
    ("darkred", "#8b0000"),
    ("deeppink", "#ff1493"),
    ("dimgray", "#696969"),
    ("firebrick", "#b22222"),
    ("forestgreen", "#228b22"),
    ("fuchsia", "#ff00ff"),
    ("gold", "#ffd700"),
    ("goldenrod", "#daa520"),
    ("gray", "#808080"),
    ("green", "#008000"),
    ("honeydew", "#f0fff0"),
    ("hotpink", "#ff69b4"),
    ("indianred", "#cd5c5c"),
    ("indigo", "#4b0082"),
    ("ivory", "#fffff0"),
    ("khaki", "#f0e68c"),
    ("lavender", "#e6e6fa"),
    ("lightblue", "#add8e6"),
    ("lightgray", "#d3d3d3"),
    ("lightgreen", "#90ee90"),
    ("lightyellow", "#ffffe0"),
    ("lime", "#00ff00"),
    ("linen", "#faf0e6"),
    ("magenta", "#ff00ff"),
    ("maroon", "#800000"),
    ("navy", "#000080"),
    ("olive", "#808000"),
    ("orange", "#ffa500"),
    ("orchid", "#da70d6"),
    ("pink", "#ffc0cb"),
    ("plum", "#dda0dd"),
    ("purple", "#800080"),
    ("red", "#ff0000"),
    ("royalblue", "#4169e1"),
    ("salmon", "#fa8072"),
    ("seagreen", "#2e8b57"),
    ("silver", "#c0c0c0"),
    ("skyblue", "#87ceeb"),
    ("slategray", "#708090"),
    ("steelblue", "#4682b4"),
    ("tan", "#d2b48c"),
    ("teal", "#008080"),
    ("tomato", "#ff6347"),
    ("turquoise", "#40e0d0"),
    ("violet", "#ee82ee"),
    ("wheat", "#f5deb3"),
    ("white", "#ffffff"),
    ("whitesmoke", "#f5f5f5"),
    ("yellow", "#ffff00"),
    ("yellowgreen", "#9acd32"),
];
