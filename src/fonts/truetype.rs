//! TrueType/OpenType fonts addressed by glyph index.
//!
//! Wraps the `ttf-parser` crate. The font is written as a Type0 composite
//! font with Identity-H (or Identity-V) encoding, so every character code in
//! the content stream is a two-byte glyph index.

use super::{EncodingKind, Font};
use crate::error::{Error, Result};
use crate::object::{Dictionary, Object};
use std::collections::HashMap;
use std::path::Path;
use ttf_parser::{Face, GlyphId};

/// Parsed TrueType font.
#[derive(Debug, Clone)]
pub struct TrueTypeFont {
    postscript_name: String,
    /// Unicode to glyph ID
    unicode_to_glyph: HashMap<char, u16>,
    /// Glyph advance widths in 1/1000 em, indexed by glyph ID
    glyph_widths: Vec<u16>,
    vertical: bool,
}

impl TrueTypeFont {
    /// Parse a TrueType/OpenType font from raw data.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        if data.is_empty() {
            return Err(Error::Font("font file is empty".to_string()));
        }

        let (postscript_name, unicode_to_glyph, glyph_widths) = {
            let face = Face::parse(&data, 0).map_err(|e| Error::Font(e.to_string()))?;

            let postscript_name = face
                .names()
                .into_iter()
                .find(|name| name.name_id == ttf_parser::name_id::POST_SCRIPT_NAME)
                .and_then(|name| name.to_string())
                .unwrap_or_else(|| "Unnamed".to_string());

            // Basic Multilingual Plane only
            let mut unicode_to_glyph = HashMap::new();
            for codepoint in 0..=0xFFFF_u32 {
                if let Some(ch) = char::from_u32(codepoint) {
                    if let Some(glyph_id) = face.glyph_index(ch) {
                        unicode_to_glyph.insert(ch, glyph_id.0);
                    }
                }
            }

            let units_per_em = u32::from(face.units_per_em().max(1));
            let glyph_widths: Vec<u16> = (0..face.number_of_glyphs())
                .map(|gid| {
                    let advance = u32::from(face.glyph_hor_advance(GlyphId(gid)).unwrap_or(0));
                    (advance * 1000 / units_per_em) as u16
                })
                .collect();
            (postscript_name, unicode_to_glyph, glyph_widths)
        };

        log::debug!(
            "Loaded TrueType font {} ({} mapped characters)",
            postscript_name,
            unicode_to_glyph.len()
        );

        Ok(Self {
            postscript_name,
            unicode_to_glyph,
            glyph_widths,
            vertical: false,
        })
    }

    /// Read and parse a font file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let data = std::fs::read(path)?;
        Self::from_bytes(data)
    }

    /// Switch to vertical writing (Identity-V).
    pub fn vertical(mut self) -> Self {
        self.vertical = true;
        self
    }

    /// Glyph ID for a character.
    pub fn glyph_id(&self, ch: char) -> Option<u16> {
        self.unicode_to_glyph.get(&ch).copied()
    }
}

impl Font for TrueTypeFont {
    fn base_font(&self) -> String {
        self.postscript_name.clone()
    }

    fn encoding_kind(&self) -> EncodingKind {
        if self.vertical {
            EncodingKind::IdentityV
        } else {
            EncodingKind::IdentityH
        }
    }

    fn character_code(&self, ch: char) -> Option<u32> {
        self.glyph_id(ch).map(u32::from)
    }

    fn glyph_width(&self, ch: char) -> f64 {
        self.glyph_id(ch)
            .and_then(|gid| self.glyph_widths.get(gid as usize))
            .map(|w| f64::from(*w))
            .unwrap_or(500.0)
    }

    fn dictionary(&self) -> Dictionary {
        let encoding = if self.vertical {
            "Identity-V"
        } else {
            "Identity-H"
        };
        let mut dict = Dictionary::new();
        dict.insert("Type".to_string(), Object::name("Font"));
        dict.insert("Subtype".to_string(), Object::name("Type0"));
        dict.insert("BaseFont".to_string(), Object::name(self.postscript_name.clone()));
        dict.insert("Encoding".to_string(), Object::name(encoding));
        dict
    }
}
