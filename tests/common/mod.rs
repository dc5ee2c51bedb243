#![allow(dead_code)]
//! Shared helpers for the integration tests.

use pdf_compose::fonts::{EncodingKind, Font};
use pdf_compose::layout::Chunk;
use pdf_compose::object::{Dictionary, Object};
use std::sync::Arc;

/// Identity-H font whose glyph index is the character's code point and
/// whose glyphs are all half an em wide.
#[derive(Debug, Clone)]
pub struct MonoFont {
    name: String,
}

impl MonoFont {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }
}

impl Font for MonoFont {
    fn base_font(&self) -> String {
        self.name.clone()
    }

    fn encoding_kind(&self) -> EncodingKind {
        EncodingKind::IdentityH
    }

    fn character_code(&self, ch: char) -> Option<u32> {
        let code = ch as u32;
        (code <= 0xFFFF).then_some(code)
    }

    fn glyph_width(&self, _ch: char) -> f64 {
        500.0
    }

    fn dictionary(&self) -> Dictionary {
        let mut dictionary = Dictionary::new();
        dictionary.insert("Type".to_string(), Object::name("Font"));
        dictionary.insert("Subtype".to_string(), Object::name("Type0"));
        dictionary.insert("BaseFont".to_string(), Object::name(&self.name));
        dictionary.insert("Encoding".to_string(), Object::name("Identity-H"));
        dictionary
    }
}

pub fn mono() -> Arc<dyn Font> {
    Arc::new(MonoFont::new("TestMono"))
}

/// Chunk in [`MonoFont`]: every character is `size / 2` wide.
pub fn mono_chunk(text: &str, size: f64) -> Chunk {
    Chunk::new(text, mono(), size).expect("valid chunk")
}

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Occurrences of `needle` in `haystack`, in order.
pub fn positions(haystack: &str, needle: &str) -> Vec<usize> {
    haystack.match_indices(needle).map(|(i, _)| i).collect()
}
