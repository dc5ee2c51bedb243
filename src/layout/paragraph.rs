//! Wrapping paragraphs built from styled chunks.
//!
//! Construction splits the caller's chunks into atomic sub-chunks (one word,
//! or one whitespace run when whitespace is preserved). Lines are filled
//! greedily; nothing is hyphenated. After painting, each caller chunk's
//! paint box is the union of the boxes of the sub-chunks it produced.

use crate::color::Color;
use crate::error::{ensure_non_negative, Error, Result};
use crate::fonts::Font;
use crate::geometry::{Rect, Size, EPSILON};
use crate::layout::box_model::{paint_background_and_borders, BoxModel};
use crate::layout::chunk::Chunk;
use crate::layout::element::{placement, FontHint, LayoutElement, MeasureCache};
use crate::writer::{begin_marked_content, end_marked_content, Page};
use std::sync::Arc;

/// Characters that attach to the preceding word without a space.
const CLOSING_PUNCTUATION: &[char] = &['.', ',', ';', ':', '!', '?', ')', ']', '}', '\'', '"', '%'];

/// Leading multiplier when none is given.
pub const DEFAULT_MULTIPLIED_LEADING: f64 = 1.2;

/// Horizontal arrangement of the lines of a paragraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TextAlignment {
    /// Ragged right
    #[default]
    Left,
    /// Ragged left
    Right,
    /// Centered lines
    Centered,
    /// Stretched to the full width except the last line
    Justified,
}

#[derive(Debug, Clone)]
struct SubChunk {
    chunk: Chunk,
    /// Index of the caller chunk this came from
    origin: usize,
}

impl SubChunk {
    fn is_whitespace(&self) -> bool {
        self.chunk.text().chars().all(char::is_whitespace)
    }
}

/// One laid-out line: sub-chunk indices and the width of each as painted.
#[derive(Debug, Clone, PartialEq)]
struct Line {
    items: Vec<LineItem>,
    width: f64,
    /// Tallest sub-chunk on the line
    max_height: f64,
}

#[derive(Debug, Clone, PartialEq)]
struct LineItem {
    sub_chunk: usize,
    /// Text with trailing spaces removed, when it differs from the sub-chunk's
    trimmed: Option<String>,
    width: f64,
    height: f64,
}

/// A paragraph mixing fonts, sizes and colors.
#[derive(Debug, Clone)]
pub struct HeterogeneousParagraph {
    chunks: Vec<Chunk>,
    sub_chunks: Vec<SubChunk>,
    text_alignment: TextAlignment,
    fixed_leading: Option<f64>,
    multiplied_leading: Option<f64>,
    preserve_whitespaces: bool,
    box_model: BoxModel,
    cache: MeasureCache,
}

impl HeterogeneousParagraph {
    /// Left-aligned paragraph with default leading.
    pub fn new(chunks: Vec<Chunk>) -> Self {
        Self::from_parts(chunks, TextAlignment::Left, None, None, false, BoxModel::default())
    }

    /// Start building a paragraph.
    pub fn builder(chunks: Vec<Chunk>) -> ParagraphBuilder<Vec<Chunk>> {
        ParagraphBuilder::new(chunks)
    }

    fn from_parts(
        chunks: Vec<Chunk>,
        text_alignment: TextAlignment,
        fixed_leading: Option<f64>,
        multiplied_leading: Option<f64>,
        preserve_whitespaces: bool,
        box_model: BoxModel,
    ) -> Self {
        let sub_chunks = if preserve_whitespaces {
            split_preserving(&chunks)
        } else {
            split_collapsing(&chunks)
        };
        if sub_chunks.is_empty() {
            log::warn!("Paragraph has no content");
        }
        Self {
            chunks,
            sub_chunks,
            text_alignment,
            fixed_leading,
            multiplied_leading,
            preserve_whitespaces,
            box_model,
            cache: MeasureCache::default(),
        }
    }

    /// The caller's chunks, with paint boxes after painting.
    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    /// Text of every atomic sub-chunk, in order.
    pub fn sub_chunk_texts(&self) -> Vec<&str> {
        self.sub_chunks.iter().map(|s| s.chunk.text()).collect()
    }

    /// Line alignment.
    pub fn text_alignment(&self) -> TextAlignment {
        self.text_alignment
    }

    /// Text of each line as it would be laid out in `available_width`.
    pub fn lines(&self, available_width: f64) -> Vec<String> {
        let inner = available_width - self.box_model.padding().horizontal();
        self.break_lines(inner)
            .iter()
            .map(|line| {
                line.items
                    .iter()
                    .map(|item| match &item.trimmed {
                        Some(text) => text.as_str(),
                        None => self.sub_chunks[item.sub_chunk].chunk.text(),
                    })
                    .collect::<String>()
            })
            .collect()
    }

    /// Measured width of each line in `available_width`, before justification.
    pub fn line_widths(&self, available_width: f64) -> Vec<f64> {
        let inner = available_width - self.box_model.padding().horizontal();
        self.break_lines(inner).iter().map(|l| l.width).collect()
    }

    fn line_height(&self, line: &Line) -> f64 {
        let factor = self.multiplied_leading.unwrap_or(DEFAULT_MULTIPLIED_LEADING);
        (line.max_height * factor + self.fixed_leading.unwrap_or(0.0)).ceil()
    }

    fn break_lines(&self, inner_width: f64) -> Vec<Line> {
        let mut lines = Vec::new();
        let mut current: Vec<LineItem> = Vec::new();
        let mut current_width = 0.0;

        for (index, sub) in self.sub_chunks.iter().enumerate() {
            let text = sub.chunk.text();
            let size = sub.chunk.measure(Size::new(inner_width, f64::MAX));
            let (full_width, height) = match size {
                Ok(size) => (size.width, size.height),
                Err(_) => (sub.chunk.text_width(text), sub.chunk.font_size()),
            };
            let fit_width = if self.preserve_whitespaces {
                full_width
            } else {
                sub.chunk.text_width(text.trim_end())
            };

            if !current.is_empty() && current_width + fit_width > inner_width + EPSILON {
                lines.push(self.finish_line(std::mem::take(&mut current)));
                current_width = 0.0;
            }
            current.push(LineItem {
                sub_chunk: index,
                trimmed: None,
                width: full_width,
                height,
            });
            current_width += full_width;
        }
        if !current.is_empty() {
            lines.push(self.finish_line(current));
        }
        lines.retain(|line| !line.items.is_empty());
        lines
    }

    fn finish_line(&self, mut items: Vec<LineItem>) -> Line {
        if !self.preserve_whitespaces {
            while items
                .last()
                .map(|item| self.sub_chunks[item.sub_chunk].is_whitespace())
                .unwrap_or(false)
            {
                items.pop();
            }
            while items
                .first()
                .map(|item| self.sub_chunks[item.sub_chunk].is_whitespace())
                .unwrap_or(false)
            {
                items.remove(0);
            }
            if let Some(last) = items.last_mut() {
                let chunk = &self.sub_chunks[last.sub_chunk].chunk;
                let trimmed = chunk.text().trim_end();
                if trimmed.len() != chunk.text().len() {
                    last.width = chunk.text_width(trimmed) + chunk.box_model().padding().horizontal();
                    last.trimmed = Some(trimmed.to_string());
                }
            }
        }
        let width = items.iter().map(|item| item.width).sum();
        let max_height = items.iter().map(|item| item.height).fold(0.0, f64::max);
        Line {
            items,
            width,
            max_height,
        }
    }

    /// Horizontal offset of the line and the extra space after each gap.
    fn line_offsets(&self, line: &Line, inner_width: f64, is_last: bool) -> (f64, f64) {
        let slack = (inner_width - line.width).max(0.0);
        match self.text_alignment {
            TextAlignment::Left => (0.0, 0.0),
            TextAlignment::Right => (slack, 0.0),
            TextAlignment::Centered => (slack / 2.0, 0.0),
            TextAlignment::Justified if is_last => (0.0, 0.0),
            TextAlignment::Justified => {
                let gaps = line.items.len().saturating_sub(1).max(1) as f64;
                (0.0, floor_to_8_digits(slack / gaps))
            },
        }
    }
}

/// Floor to 8 fractional digits.
fn floor_to_8_digits(value: f64) -> f64 {
    (value * 1e8).floor() / 1e8
}

/// R1: maximal runs of whitespace and non-whitespace.
fn split_preserving(chunks: &[Chunk]) -> Vec<SubChunk> {
    let mut out = Vec::new();
    for (origin, chunk) in chunks.iter().enumerate() {
        let mut run = String::new();
        let mut run_is_space = None;
        for ch in chunk.text().chars() {
            let is_space = ch.is_whitespace();
            if run_is_space.is_some_and(|s| s != is_space) {
                out.push(SubChunk {
                    chunk: chunk.derive(std::mem::take(&mut run)),
                    origin,
                });
            }
            run_is_space = Some(is_space);
            run.push(ch);
        }
        if !run.is_empty() {
            out.push(SubChunk {
                chunk: chunk.derive(run),
                origin,
            });
        }
    }
    out
}

/// R2: one sub-chunk per word, carrying a single trailing space where the
/// source had whitespace or where adjacent chunks would otherwise fuse.
fn split_collapsing(chunks: &[Chunk]) -> Vec<SubChunk> {
    let mut out = Vec::new();
    for (origin, chunk) in chunks.iter().enumerate() {
        let text = chunk.text();
        let words: Vec<&str> = text.split_whitespace().collect();
        let next = chunks[origin + 1..]
            .iter()
            .map(Chunk::text)
            .find(|t| !t.is_empty());
        for (i, word) in words.iter().enumerate() {
            let is_last_word = i + 1 == words.len();
            let trailing_space = if !is_last_word {
                true
            } else {
                match next {
                    None => false,
                    Some(next_text) => {
                        text.ends_with(char::is_whitespace)
                            || next_text.starts_with(char::is_whitespace)
                            || !next_text.starts_with(CLOSING_PUNCTUATION)
                    },
                }
            };
            let text = if trailing_space {
                format!("{} ", word)
            } else {
                word.to_string()
            };
            out.push(SubChunk {
                chunk: chunk.derive(text),
                origin,
            });
        }
    }
    // The paragraph's final word never carries a trailing space.
    if let Some(last) = out.last_mut() {
        let trimmed = last.chunk.text().trim_end().to_string();
        if trimmed.len() != last.chunk.text().len() {
            last.chunk = last.chunk.derive(trimmed);
        }
    }
    out
}

impl LayoutElement for HeterogeneousParagraph {
    fn measure(&self, available: Size) -> Result<Size> {
        self.cache.get_or_try_insert(available, || {
            let padding = self.box_model.padding();
            let inner_width = available.width - padding.horizontal();
            let lines = self.break_lines(inner_width);
            if lines.is_empty() {
                return Ok(Size::new(padding.horizontal(), padding.vertical()));
            }
            let widest = lines.iter().map(|l| l.width).fold(0.0, f64::max);
            // aligned text other than Left spans the whole inner width
            let width = match self.text_alignment {
                TextAlignment::Left => widest,
                _ => widest.max(inner_width),
            };
            let height: f64 = lines.iter().map(|l| self.line_height(l)).sum();
            Ok(Size::new(width + padding.horizontal(), height + padding.vertical()))
        })
    }

    fn paint(&mut self, available: Rect, page: &mut Page) -> Result<()> {
        let measured = self.measure(available.size())?;
        self.validate_encoding()?;

        let rect = placement(&self.box_model, available, measured);
        let padding = self.box_model.padding();
        let lines = self.break_lines(available.width - padding.horizontal());
        let inner_width = rect.width - padding.horizontal();

        let token = begin_marked_content(page, "P", None);
        paint_background_and_borders(&self.box_model, rect, page);

        let mut painted: Vec<(usize, Rect)> = Vec::with_capacity(self.sub_chunks.len());
        let mut line_top = rect.top() - padding.top;
        for (line_index, line) in lines.iter().enumerate() {
            let is_last = line_index + 1 == lines.len();
            let (offset, extra) = self.line_offsets(line, inner_width, is_last);
            let baseline_band = line_top - line.max_height;
            let mut x = rect.x + padding.left + offset;
            for item in &line.items {
                let sub = &mut self.sub_chunks[item.sub_chunk];
                let target = Rect::new(x, baseline_band, item.width, item.height);
                let used = match &item.trimmed {
                    Some(text) => {
                        let mut trimmed = sub.chunk.derive(text.clone());
                        trimmed.paint(target, page)?;
                        let used = trimmed.previous_paint_box().unwrap_or(target);
                        sub.chunk.box_model_mut().set_previous_paint_box(used);
                        used
                    },
                    None => {
                        sub.chunk.paint(target, page)?;
                        sub.chunk.previous_paint_box().unwrap_or(target)
                    },
                };
                painted.push((sub.origin, used));
                x += item.width + extra;
            }
            line_top -= self.line_height(line);
        }

        end_marked_content(page, token);

        for (origin, chunk) in self.chunks.iter_mut().enumerate() {
            let merged = painted
                .iter()
                .filter(|(o, _)| *o == origin)
                .map(|(_, r)| *r)
                .reduce(|a, b| a.union(&b));
            if let Some(merged) = merged {
                chunk.box_model_mut().set_previous_paint_box(merged);
            }
        }
        self.box_model.set_previous_paint_box(rect);
        log::trace!("Painted paragraph with {} lines at {:?}", lines.len(), rect);
        Ok(())
    }

    fn box_model(&self) -> &BoxModel {
        &self.box_model
    }

    fn box_model_mut(&mut self) -> &mut BoxModel {
        &mut self.box_model
    }

    fn font_hint(&self) -> Option<FontHint> {
        self.chunks.first().and_then(|c| c.font_hint())
    }

    fn validate_encoding(&self) -> Result<()> {
        self.sub_chunks
            .iter()
            .try_for_each(|sub| sub.chunk.validate_encoding())
    }

    fn kind(&self) -> &'static str {
        "HeterogeneousParagraph"
    }
}

/// What a [`ParagraphBuilder`] turns into a paragraph.
pub trait ParagraphSource {
    /// The built paragraph type.
    type Output;

    /// Build the paragraph.
    fn into_paragraph(self, options: ParagraphOptions) -> Result<Self::Output>;
}

/// Paragraph-level options collected by [`ParagraphBuilder`].
#[derive(Debug, Clone, Default)]
pub struct ParagraphOptions {
    text_alignment: TextAlignment,
    fixed_leading: Option<f64>,
    multiplied_leading: Option<f64>,
    preserve_whitespaces: bool,
    box_model: BoxModel,
}

impl ParagraphOptions {
    fn validate(&self) -> Result<()> {
        if let Some(fixed) = self.fixed_leading {
            ensure_non_negative("fixed_leading", fixed)?;
        }
        if let Some(factor) = self.multiplied_leading {
            if !(factor > 0.0 && factor.is_finite()) {
                return Err(Error::InvalidArgument(format!(
                    "multiplied_leading must be > 0, got {}",
                    factor
                )));
            }
        }
        Ok(())
    }

    fn apply(self, chunks: Vec<Chunk>) -> HeterogeneousParagraph {
        HeterogeneousParagraph::from_parts(
            chunks,
            self.text_alignment,
            self.fixed_leading,
            self.multiplied_leading,
            self.preserve_whitespaces,
            self.box_model,
        )
    }
}

impl ParagraphSource for Vec<Chunk> {
    type Output = HeterogeneousParagraph;

    fn into_paragraph(self, options: ParagraphOptions) -> Result<HeterogeneousParagraph> {
        options.validate()?;
        Ok(options.apply(self))
    }
}

/// Builder shared by the paragraph types.
#[derive(Debug, Clone)]
pub struct ParagraphBuilder<S> {
    source: S,
    options: ParagraphOptions,
}

impl<S: ParagraphSource> ParagraphBuilder<S> {
    fn new(source: S) -> Self {
        Self {
            source,
            options: ParagraphOptions::default(),
        }
    }

    /// Line alignment.
    pub fn text_alignment(mut self, alignment: TextAlignment) -> Self {
        self.options.text_alignment = alignment;
        self
    }

    /// Constant added to every line height.
    pub fn fixed_leading(mut self, leading: f64) -> Self {
        self.options.fixed_leading = Some(leading);
        self
    }

    /// Factor applied to the tallest sub-chunk of each line.
    pub fn multiplied_leading(mut self, factor: f64) -> Self {
        self.options.multiplied_leading = Some(factor);
        self
    }

    /// Keep whitespace runs as they are instead of collapsing them.
    pub fn preserve_whitespaces(mut self, preserve: bool) -> Self {
        self.options.preserve_whitespaces = preserve;
        self
    }

    /// Box model of the paragraph.
    pub fn box_model(mut self, box_model: BoxModel) -> Self {
        self.options.box_model = box_model;
        self
    }

    /// Validate and build.
    pub fn build(self) -> Result<S::Output> {
        self.source.into_paragraph(self.options)
    }
}

/// Text in a single style, as a paragraph.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use pdf_compose::fonts::StandardFont;
/// use pdf_compose::layout::{LayoutElement, Paragraph, TextAlignment};
/// use pdf_compose::geometry::Size;
///
/// let paragraph = Paragraph::builder(
///     "The quick brown fox jumps over the lazy dog",
///     Arc::new(StandardFont::helvetica()),
/// )
/// .font_size(12.0)
/// .text_alignment(TextAlignment::Justified)
/// .build()
/// .unwrap();
///
/// let size = paragraph.measure(Size::new(100.0, 500.0)).unwrap();
/// assert_eq!(size.width, 100.0);
/// assert!(paragraph.lines(100.0).len() > 1);
/// ```
#[derive(Debug, Clone)]
pub struct Paragraph {
    inner: HeterogeneousParagraph,
}

/// Text and style of a homogeneous paragraph under construction.
#[derive(Debug, Clone)]
pub struct ParagraphText {
    text: String,
    font: Arc<dyn Font>,
    font_size: f64,
    font_color: Color,
    character_spacing: f64,
    word_spacing: f64,
}

impl ParagraphSource for ParagraphText {
    type Output = Paragraph;

    fn into_paragraph(self, options: ParagraphOptions) -> Result<Paragraph> {
        options.validate()?;
        let chunk = Chunk::builder(self.text, self.font)
            .font_size(self.font_size)
            .font_color(self.font_color)
            .character_spacing(self.character_spacing)
            .word_spacing(self.word_spacing)
            .build()?;
        Ok(Paragraph {
            inner: options.apply(vec![chunk]),
        })
    }
}

impl ParagraphBuilder<ParagraphText> {
    /// Font size (at least 1).
    pub fn font_size(mut self, size: f64) -> Self {
        self.source.font_size = size;
        self
    }

    /// Text color.
    pub fn font_color(mut self, color: Color) -> Self {
        self.source.font_color = color;
        self
    }

    /// Extra space after every character.
    pub fn character_spacing(mut self, spacing: f64) -> Self {
        self.source.character_spacing = spacing;
        self
    }

    /// Extra space after every ASCII space.
    pub fn word_spacing(mut self, spacing: f64) -> Self {
        self.source.word_spacing = spacing;
        self
    }
}

impl Paragraph {
    /// Black, left-aligned paragraph.
    pub fn new(text: impl Into<String>, font: Arc<dyn Font>, font_size: f64) -> Result<Self> {
        Self::builder(text, font).font_size(font_size).build()
    }

    /// Start building a paragraph (font size 12 unless set).
    pub fn builder(text: impl Into<String>, font: Arc<dyn Font>) -> ParagraphBuilder<ParagraphText> {
        ParagraphBuilder::new(ParagraphText {
            text: text.into(),
            font,
            font_size: 12.0,
            font_color: Color::black(),
            character_spacing: 0.0,
            word_spacing: 0.0,
        })
    }

    /// The underlying mixed-style paragraph.
    pub fn as_heterogeneous(&self) -> &HeterogeneousParagraph {
        &self.inner
    }

    /// Text of each line as it would be laid out in `available_width`.
    pub fn lines(&self, available_width: f64) -> Vec<String> {
        self.inner.lines(available_width)
    }
}

impl LayoutElement for Paragraph {
    fn measure(&self, available: Size) -> Result<Size> {
        self.inner.measure(available)
    }

    fn paint(&mut self, available: Rect, page: &mut Page) -> Result<()> {
        self.inner.paint(available, page)
    }

    fn box_model(&self) -> &BoxModel {
        self.inner.box_model()
    }

    fn box_model_mut(&mut self) -> &mut BoxModel {
        self.inner.box_model_mut()
    }

    fn font_hint(&self) -> Option<FontHint> {
        self.inner.font_hint()
    }

    fn validate_encoding(&self) -> Result<()> {
        self.inner.validate_encoding()
    }

    fn kind(&self) -> &'static str {
        "Paragraph"
    }
}
