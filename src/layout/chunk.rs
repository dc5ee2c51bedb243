//! A single styled run of text that never wraps.

use crate::color::Color;
use crate::error::{ensure_non_negative, Error, Result};
use crate::fonts::encoding::encode_hex_codes;
use crate::fonts::{encode_text, Font};
use crate::geometry::{Rect, Size};
use crate::layout::box_model::{paint_background_and_borders, BoxModel};
use crate::layout::element::{placement, FontHint, LayoutElement, MeasureCache};
use crate::writer::{ContentStreamOp, Page, TextArrayItem};
use std::sync::Arc;

/// One line of text in a single font, size and color.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use pdf_compose::fonts::StandardFont;
/// use pdf_compose::geometry::{Rect, Size};
/// use pdf_compose::layout::{Chunk, LayoutElement};
/// use pdf_compose::writer::Page;
///
/// let mut chunk = Chunk::new("Hello", Arc::new(StandardFont::helvetica()), 12.0).unwrap();
/// let mut page = Page::new(595.0, 842.0);
/// chunk.paint(Rect::new(72.0, 700.0, 200.0, 12.0), &mut page).unwrap();
///
/// let content = page.contents().to_latin1_string();
/// assert!(content.contains("(Hello) Tj"));
/// assert_eq!(chunk.previous_paint_box().unwrap().x, 72.0);
/// ```
#[derive(Debug, Clone)]
pub struct Chunk {
    text: String,
    font: Arc<dyn Font>,
    font_size: f64,
    font_color: Color,
    character_spacing: f64,
    word_spacing: f64,
    box_model: BoxModel,
    cache: MeasureCache,
}

impl Chunk {
    /// Create a black chunk with no spacing adjustments.
    pub fn new(text: impl Into<String>, font: Arc<dyn Font>, font_size: f64) -> Result<Self> {
        Self::builder(text, font).font_size(font_size).build()
    }

    /// Start building a chunk (font size 12 unless set).
    pub fn builder(text: impl Into<String>, font: Arc<dyn Font>) -> ChunkBuilder {
        ChunkBuilder {
            text: text.into(),
            font,
            font_size: 12.0,
            font_color: Color::black(),
            character_spacing: 0.0,
            word_spacing: 0.0,
            box_model: BoxModel::default(),
        }
    }

    /// The text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The font.
    pub fn font(&self) -> &Arc<dyn Font> {
        &self.font
    }

    /// Font size.
    pub fn font_size(&self) -> f64 {
        self.font_size
    }

    /// Text color.
    pub fn font_color(&self) -> Color {
        self.font_color
    }

    /// Extra space after every character.
    pub fn character_spacing(&self) -> f64 {
        self.character_spacing
    }

    /// Extra space after every ASCII space.
    pub fn word_spacing(&self) -> f64 {
        self.word_spacing
    }

    /// Replace the box model.
    pub fn with_box_model(mut self, box_model: BoxModel) -> Self {
        self.box_model = box_model;
        self.cache = MeasureCache::default();
        self
    }

    /// Same style, different text, with only the background carried over.
    pub(crate) fn derive(&self, text: impl Into<String>) -> Chunk {
        Chunk {
            text: text.into(),
            font: Arc::clone(&self.font),
            font_size: self.font_size,
            font_color: self.font_color,
            character_spacing: self.character_spacing,
            word_spacing: self.word_spacing,
            box_model: self.box_model.background_only(),
            cache: MeasureCache::default(),
        }
    }

    /// Width of `text` in this chunk's style, without padding.
    pub(crate) fn text_width(&self, text: &str) -> f64 {
        self.font
            .width(text, self.font_size, self.character_spacing, self.word_spacing)
    }

    fn show_text_op(&self, codes: &[u32]) -> ContentStreamOp {
        match self.font.encoding_kind().hex_digits() {
            Some(digits) => ContentStreamOp::ShowTextArray(vec![TextArrayItem::HexText(
                encode_hex_codes(codes, digits),
            )]),
            // encode_text bounds single-byte codes to 0xFF
            None => ContentStreamOp::ShowText(codes.iter().map(|code| *code as u8).collect()),
        }
    }
}

impl LayoutElement for Chunk {
    fn measure(&self, available: Size) -> Result<Size> {
        self.cache.get_or_try_insert(available, || {
            let padding = self.box_model.padding();
            Ok(Size::new(
                self.text_width(&self.text) + padding.horizontal(),
                self.font_size + padding.vertical(),
            ))
        })
    }

    fn paint(&mut self, available: Rect, page: &mut Page) -> Result<()> {
        let measured = self.measure(available.size())?;
        let codes = encode_text(self.font.as_ref(), &self.text)?;
        let rect = placement(&self.box_model, available, measured);
        log::trace!(
            "Painting chunk {:?} at ({}, {}) size {}x{}",
            self.text,
            rect.x,
            rect.y,
            rect.width,
            rect.height
        );

        let font_name = page.resources_mut().intern_font(&self.font);
        paint_background_and_borders(&self.box_model, rect, page);

        let padding = self.box_model.padding();
        let (r, g, b) = self.font_color.to_rgb_components();
        let show = self.show_text_op(&codes);

        let mut w = page.writer();
        w.save_graphics_state();
        if self.character_spacing != 0.0 {
            w.op(ContentStreamOp::SetCharacterSpacing(self.character_spacing));
        }
        if self.word_spacing != 0.0 {
            w.op(ContentStreamOp::SetWordSpacing(self.word_spacing));
        }
        w.op(ContentStreamOp::BeginText)
            .op(ContentStreamOp::SetFillColorRGB(r, g, b))
            .op(ContentStreamOp::SetFont(font_name, 1.0))
            .op(ContentStreamOp::SetTextMatrix(
                self.font_size,
                0.0,
                0.0,
                self.font_size,
                rect.x + padding.left,
                rect.y + padding.bottom,
            ))
            .op(show)
            .op(ContentStreamOp::EndText)
            .restore_graphics_state();

        self.box_model.set_previous_paint_box(rect);
        Ok(())
    }

    fn box_model(&self) -> &BoxModel {
        &self.box_model
    }

    fn box_model_mut(&mut self) -> &mut BoxModel {
        &mut self.box_model
    }

    fn font_hint(&self) -> Option<FontHint> {
        Some(FontHint {
            font: Arc::clone(&self.font),
            font_size: self.font_size,
            font_color: self.font_color,
        })
    }

    fn validate_encoding(&self) -> Result<()> {
        encode_text(self.font.as_ref(), &self.text).map(|_| ())
    }

    fn kind(&self) -> &'static str {
        "Chunk"
    }
}

/// Builder for [`Chunk`].
#[derive(Debug)]
pub struct ChunkBuilder {
    text: String,
    font: Arc<dyn Font>,
    font_size: f64,
    font_color: Color,
    character_spacing: f64,
    word_spacing: f64,
    box_model: BoxModel,
}

impl ChunkBuilder {
    /// Font size (at least 1).
    pub fn font_size(mut self, size: f64) -> Self {
        self.font_size = size;
        self
    }

    /// Text color.
    pub fn font_color(mut self, color: Color) -> Self {
        self.font_color = color;
        self
    }

    /// Extra space after every character.
    pub fn character_spacing(mut self, spacing: f64) -> Self {
        self.character_spacing = spacing;
        self
    }

    /// Extra space after every ASCII space.
    pub fn word_spacing(mut self, spacing: f64) -> Self {
        self.word_spacing = spacing;
        self
    }

    /// Box model.
    pub fn box_model(mut self, box_model: BoxModel) -> Self {
        self.box_model = box_model;
        self
    }

    /// Validate and build.
    pub fn build(self) -> Result<Chunk> {
        if !(self.font_size >= 1.0 && self.font_size.is_finite()) {
            return Err(Error::InvalidArgument(format!(
                "font_size must be >= 1, got {}",
                self.font_size
            )));
        }
        ensure_non_negative("character_spacing", self.character_spacing)?;
        ensure_non_negative("word_spacing", self.word_spacing)?;
        Ok(Chunk {
            text: self.text,
            font: self.font,
            font_size: self.font_size,
            font_color: self.font_color,
            character_spacing: self.character_spacing,
            word_spacing: self.word_spacing,
            box_model: self.box_model,
            cache: MeasureCache::default(),
        })
    }
}
