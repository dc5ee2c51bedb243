//! Fonts consumed by the text elements.
//!
//! A [`Font`] reports metrics, maps characters to codes and supplies the
//! PDF dictionary that goes into a page's `Resources/Font` table. Two
//! implementations ship with the crate:
//!
//! - [`StandardFont`]: the 14 standard PostScript fonts, WinAnsi encoded
//! - [`TrueTypeFont`]: a TrueType/OpenType program addressed by glyph index (Identity-H)

pub mod encoding;
pub mod standard;
pub mod truetype;

pub use standard::{Base14, FontFamily, FontWeight, StandardFont};
pub use truetype::TrueTypeFont;

use crate::error::{Error, Result};
use crate::object::{Dictionary, Object};
use std::fmt::Debug;

/// How a font's character codes are written into a show-text operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EncodingKind {
    /// Two-byte glyph indices, horizontal writing
    IdentityH,
    /// Two-byte glyph indices, vertical writing
    IdentityV,
    /// One byte per character, ASCII compatible (literal strings)
    SingleByte,
    /// Two-byte pictographic codes
    Symbol,
    /// One byte per character under a font-specific encoding
    Custom,
}

impl EncodingKind {
    /// Number of hex digits per character code, or `None` for literal strings.
    pub fn hex_digits(&self) -> Option<usize> {
        match self {
            EncodingKind::IdentityH | EncodingKind::IdentityV | EncodingKind::Symbol => Some(4),
            EncodingKind::Custom => Some(2),
            EncodingKind::SingleByte => None,
        }
    }

    /// Largest code this kind can write.
    pub fn max_code(&self) -> u32 {
        match self.hex_digits() {
            Some(4) => 0xFFFF,
            _ => 0xFF,
        }
    }
}

/// Capability a text element needs from its font.
pub trait Font: Debug + Send + Sync {
    /// PostScript name of the font (the `BaseFont` entry).
    fn base_font(&self) -> String;

    /// How codes produced by [`Font::character_code`] are written.
    fn encoding_kind(&self) -> EncodingKind;

    /// Code for `ch`, or `None` if the font cannot represent it.
    fn character_code(&self, ch: char) -> Option<u32>;

    /// Advance width of `ch` in 1/1000 em.
    fn glyph_width(&self, ch: char) -> f64;

    /// The font's PDF dictionary entries.
    fn dictionary(&self) -> Dictionary;

    /// Width of `text` in user-space units.
    ///
    /// Character spacing applies to every character and word spacing to
    /// every ASCII space.
    fn width(&self, text: &str, font_size: f64, character_spacing: f64, word_spacing: f64) -> f64 {
        let mut glyphs = 0.0;
        let mut chars = 0usize;
        let mut spaces = 0usize;
        for ch in text.chars() {
            glyphs += self.glyph_width(ch);
            chars += 1;
            if ch == ' ' {
                spaces += 1;
            }
        }
        glyphs * font_size / 1000.0
            + character_spacing * chars as f64
            + word_spacing * spaces as f64
    }

    /// Dictionary keys, in insertion order.
    fn keys(&self) -> Vec<String> {
        self.dictionary().keys().cloned().collect()
    }

    /// Dictionary entry for `key`.
    fn get(&self, key: &str) -> Option<Object> {
        self.dictionary().get(key).cloned()
    }
}

/// Map every character of `text` to its code under `font`.
///
/// Fails on the first character the font cannot represent, including codes
/// wider than the font's encoding kind can write.
pub fn encode_text(font: &dyn Font, text: &str) -> Result<Vec<u32>> {
    let max_code = font.encoding_kind().max_code();
    text.chars()
        .map(|ch| {
            font.character_code(ch)
                .filter(|code| *code <= max_code)
                .ok_or_else(|| Error::Encoding {
                    ch,
                    font: font.base_font(),
                })
        })
        .collect()
}
