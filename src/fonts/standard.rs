//! The 14 standard PostScript fonts.
//!
//! Every conforming reader carries these, so they need no embedded program.
//! Text fonts are WinAnsi encoded; Symbol and ZapfDingbats use their
//! built-in encodings and are addressed by raw byte codes.

use super::encoding::unicode_to_winansi;
use super::{EncodingKind, Font};
use crate::object::{Dictionary, Object};

/// Font family selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontFamily {
    /// Helvetica (sans-serif)
    Helvetica,
    /// Times (serif)
    Times,
    /// Courier (monospace)
    Courier,
    /// Symbol
    Symbol,
    /// ZapfDingbats
    ZapfDingbats,
}

/// Font weight selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontWeight {
    /// Normal weight
    #[default]
    Normal,
    /// Bold weight
    Bold,
}

/// One of the 14 standard fonts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Base14 {
    /// Helvetica
    Helvetica,
    /// Helvetica-Bold
    HelveticaBold,
    /// Helvetica-Oblique
    HelveticaOblique,
    /// Helvetica-BoldOblique
    HelveticaBoldOblique,
    /// Times-Roman
    TimesRoman,
    /// Times-Bold
    TimesBold,
    /// Times-Italic
    TimesItalic,
    /// Times-BoldItalic
    TimesBoldItalic,
    /// Courier
    Courier,
    /// Courier-Bold
    CourierBold,
    /// Courier-Oblique
    CourierOblique,
    /// Courier-BoldOblique
    CourierBoldOblique,
    /// Symbol
    Symbol,
    /// ZapfDingbats
    ZapfDingbats,
}

impl Base14 {
    /// All standard fonts.
    pub const ALL: [Base14; 14] = [
        Base14::Helvetica,
        Base14::HelveticaBold,
        Base14::HelveticaOblique,
        Base14::HelveticaBoldOblique,
        Base14::TimesRoman,
        Base14::TimesBold,
        Base14::TimesItalic,
        Base14::TimesBoldItalic,
        Base14::Courier,
        Base14::CourierBold,
        Base14::CourierOblique,
        Base14::CourierBoldOblique,
        Base14::Symbol,
        Base14::ZapfDingbats,
    ];

    /// PostScript name.
    pub fn name(&self) -> &'static str {
        match self {
            Base14::Helvetica => "Helvetica",
            Base14::HelveticaBold => "Helvetica-Bold",
            Base14::HelveticaOblique => "Helvetica-Oblique",
            Base14::HelveticaBoldOblique => "Helvetica-BoldOblique",
            Base14::TimesRoman => "Times-Roman",
            Base14::TimesBold => "Times-Bold",
            Base14::TimesItalic => "Times-Italic",
            Base14::TimesBoldItalic => "Times-BoldItalic",
            Base14::Courier => "Courier",
            Base14::CourierBold => "Courier-Bold",
            Base14::CourierOblique => "Courier-Oblique",
            Base14::CourierBoldOblique => "Courier-BoldOblique",
            Base14::Symbol => "Symbol",
            Base14::ZapfDingbats => "ZapfDingbats",
        }
    }

    /// Look up a standard font by PostScript name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|b| b.name() == name)
    }

    /// Choose the face of `family` matching weight and slant.
    pub fn select(family: FontFamily, weight: FontWeight, italic: bool) -> Self {
        let bold = weight == FontWeight::Bold;
        match (family, bold, italic) {
            (FontFamily::Helvetica, false, false) => Base14::Helvetica,
            (FontFamily::Helvetica, true, false) => Base14::HelveticaBold,
            (FontFamily::Helvetica, false, true) => Base14::HelveticaOblique,
            (FontFamily::Helvetica, true, true) => Base14::HelveticaBoldOblique,
            (FontFamily::Times, false, false) => Base14::TimesRoman,
            (FontFamily::Times, true, false) => Base14::TimesBold,
            (FontFamily::Times, false, true) => Base14::TimesItalic,
            (FontFamily::Times, true, true) => Base14::TimesBoldItalic,
            (FontFamily::Courier, false, false) => Base14::Courier,
            (FontFamily::Courier, true, false) => Base14::CourierBold,
            (FontFamily::Courier, false, true) => Base14::CourierOblique,
            (FontFamily::Courier, true, true) => Base14::CourierBoldOblique,
            (FontFamily::Symbol, _, _) => Base14::Symbol,
            (FontFamily::ZapfDingbats, _, _) => Base14::ZapfDingbats,
        }
    }

    fn is_symbolic(&self) -> bool {
        matches!(self, Base14::Symbol | Base14::ZapfDingbats)
    }

    /// Advance widths for the printable ASCII range, if the face has a table.
    fn ascii_widths(&self) -> Option<&'static [u16; 95]> {
        match self {
            Base14::Helvetica | Base14::HelveticaOblique => Some(&HELVETICA_WIDTHS),
            Base14::HelveticaBold | Base14::HelveticaBoldOblique => Some(&HELVETICA_BOLD_WIDTHS),
            Base14::TimesRoman => Some(&TIMES_ROMAN_WIDTHS),
            Base14::TimesBold => Some(&TIMES_BOLD_WIDTHS),
            Base14::TimesItalic => Some(&TIMES_ITALIC_WIDTHS),
            Base14::TimesBoldItalic => Some(&TIMES_BOLD_ITALIC_WIDTHS),
            _ => None,
        }
    }

    fn default_width(&self) -> f64 {
        match self {
            Base14::Helvetica
            | Base14::HelveticaBold
            | Base14::HelveticaOblique
            | Base14::HelveticaBoldOblique => 556.0,
            Base14::Courier
            | Base14::CourierBold
            | Base14::CourierOblique
            | Base14::CourierBoldOblique => 600.0,
            Base14::ZapfDingbats => 788.0,
            _ => 500.0,
        }
    }
}

/// A standard font as a [`Font`].
///
/// # Examples
///
/// ```
/// use pdf_compose::fonts::{Font, StandardFont};
///
/// let helvetica = StandardFont::helvetica();
/// assert_eq!(helvetica.base_font(), "Helvetica");
/// // "Hi" = 722 + 222 thousandths of an em
/// assert!((helvetica.width("Hi", 10.0, 0.0, 0.0) - 9.44).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StandardFont {
    base: Base14,
}

impl StandardFont {
    /// Wrap a standard face.
    pub fn new(base: Base14) -> Self {
        Self { base }
    }

    /// Helvetica, the default text font.
    pub fn helvetica() -> Self {
        Self::new(Base14::Helvetica)
    }

    /// Look up by PostScript name.
    pub fn from_name(name: &str) -> Option<Self> {
        Base14::from_name(name).map(Self::new)
    }

    /// Choose the face of `family` matching weight and slant.
    pub fn select(family: FontFamily, weight: FontWeight, italic: bool) -> Self {
        Self::new(Base14::select(family, weight, italic))
    }

    /// The wrapped face.
    pub fn base(&self) -> Base14 {
        self.base
    }
}

impl Default for StandardFont {
    fn default() -> Self {
        Self::helvetica()
    }
}

impl Font for StandardFont {
    fn base_font(&self) -> String {
        self.base.name().to_string()
    }

    fn encoding_kind(&self) -> EncodingKind {
        if self.base.is_symbolic() {
            EncodingKind::Custom
        } else {
            EncodingKind::SingleByte
        }
    }

    fn character_code(&self, ch: char) -> Option<u32> {
        if self.base.is_symbolic() {
            let code = ch as u32;
            return (32..=255).contains(&code).then_some(code);
        }
        unicode_to_winansi(ch as u32).map(u32::from)
    }

    fn glyph_width(&self, ch: char) -> f64 {
        if let Some(table) = self.base.ascii_widths() {
            let code = ch as u32;
            if (32..=126).contains(&code) {
                return table[(code - 32) as usize] as f64;
            }
            if let Some(w) = punctuation_width(self.base, ch) {
                return w;
            }
        }
        self.base.default_width()
    }

    fn dictionary(&self) -> Dictionary {
        let mut dict = Dictionary::new();
        dict.insert("Type".to_string(), Object::name("Font"));
        dict.insert("Subtype".to_string(), Object::name("Type1"));
        dict.insert("BaseFont".to_string(), Object::name(self.base.name()));
        if !self.base.is_symbolic() {
            dict.insert("Encoding".to_string(), Object::name("WinAnsiEncoding"));
        }
        dict
    }
}

/// Widths of the WinAnsi characters outside ASCII that list and markup
/// labels commonly use.
fn punctuation_width(base: Base14, ch: char) -> Option<f64> {
    let serif = matches!(
        base,
        Base14::TimesRoman | Base14::TimesBold | Base14::TimesItalic | Base14::TimesBoldItalic
    );
    let w = match ch {
        '\u{00A0}' => if serif { 250.0 } else { 278.0 },
        '\u{2022}' => 350.0,
        '\u{2013}' => if serif { 500.0 } else { 556.0 },
        '\u{2014}' | '\u{2026}' => 1000.0,
        '\u{2018}' | '\u{2019}' => if serif { 333.0 } else { 222.0 },
        _ => return None,
    };
    Some(w)
}

const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

const TIMES_ROMAN_WIDTHS: [u16; 95] = [
    250, 333, 408, 500, 500, 833, 778, 180, 333, 333, 500, 564, 250, 333, 250, 278,
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500, 278, 278, 564, 564, 564, 444,
    921, 722, 667, 667, 722, 611, 556, 722, 722, 333, 389, 722, 611, 889, 722, 722,
    556, 722, 667, 556, 611, 722, 722, 944, 722, 722, 611, 333, 278, 333, 469, 500,
    333, 444, 500, 444, 500, 444, 333, 500, 500, 278, 278, 500, 278, 778, 500, 500,
    500, 500, 333, 389, 278, 500, 500, 722, 500, 500, 444, 480, 200, 480, 541,
];

const TIMES_BOLD_WIDTHS: [u16; 95] = [
    250, 333, 555, 500, 500, 1000, 833, 278, 333, 333, 500, 570, 250, 333, 250, 278,
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500, 333, 333, 570, 570, 570, 500,
    930, 722, 667, 722, 722, 667, 611, 778, 778, 389, 500, 778, 667, 944, 722, 778,
    611, 778, 722, 556, 667, 722, 722, 1000, 722, 722, 667, 333, 278, 333, 581, 500,
    333, 500, 556, 444, 556, 444, 333, 500, 556, 278, 333, 556, 278, 833, 556, 500,
    556, 556, 444, 389, 333, 556, 500, 722, 500, 500, 444, 394, 220, 394, 520,
];

const TIMES_ITALIC_WIDTHS: [u16; 95] = [
    250, 333, 420, 500, 500, 833, 778, 214, 333, 333, 500, 675, 250, 333, 250, 278,
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500, 333, 333, 675, 675, 675, 500,
    920, 611, 611, 667, 722, 611, 611, 722, 722, 333, 444, 667, 556, 833, 667, 722,
    611, 722, 611, 500, 556, 722, 611, 833, 611, 556, 556, 389, 278, 389, 422, 500,
    333, 500, 500, 444, 500, 444, 278, 500, 500, 278, 278, 444, 278, 722, 500, 500,
    500, 500, 389, 389, 278, 500, 444, 667, 444, 444, 389, 400, 275, 400, 541,
];

const TIMES_BOLD_ITALIC_WIDTHS: [u16; 95] = [
    250, 389, 555, 500, 500, 833, 778, 278, 333, 333, 500, 570, 250, 333, 250, 278,
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500, 333, 333, 570, 570, 570, 500,
    832, 667, 667, 667, 722, 667, 667, 722, 778, 389, 500, 667, 611, 889, 722, 722,
    611, 722, 667, 556, 611, 722, 667, 889, 667, 611, 611, 333, 278, 333, 570, 500,
    333, 500, 500, 444, 500, 444, 333, 500, 556, 278, 278, 500, 278, 778, 556, 500,
    500, 500, 389, 389, 278, 556, 444, 667, 500, 444, 389, 348, 220, 348, 570,
];
