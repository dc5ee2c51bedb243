//! Paragraphs from a small inline markup: `**bold**`, `*italic*` or
//! `_italic_`, `==highlight==` and `\` escapes.

use crate::color::Color;
use crate::error::Result;
use crate::fonts::{Base14, Font, FontFamily, FontWeight, StandardFont};
use crate::geometry::{Rect, Size};
use crate::layout::box_model::BoxModel;
use crate::layout::chunk::Chunk;
use crate::layout::element::{FontHint, LayoutElement};
use crate::layout::paragraph::{HeterogeneousParagraph, ParagraphBuilder};
use crate::writer::Page;
use std::sync::Arc;

/// The four faces used by markup.
#[derive(Debug, Clone)]
pub struct MarkdownFonts {
    /// Plain text
    pub regular: Arc<dyn Font>,
    /// `**...**`
    pub bold: Arc<dyn Font>,
    /// `*...*`
    pub italic: Arc<dyn Font>,
    /// Both
    pub bold_italic: Arc<dyn Font>,
}

impl MarkdownFonts {
    /// Faces of a standard font family.
    pub fn family(family: FontFamily) -> Self {
        let face = |weight, italic| -> Arc<dyn Font> {
            Arc::new(StandardFont::new(Base14::select(family, weight, italic)))
        };
        Self {
            regular: face(FontWeight::Normal, false),
            bold: face(FontWeight::Bold, false),
            italic: face(FontWeight::Normal, true),
            bold_italic: face(FontWeight::Bold, true),
        }
    }

    fn pick(&self, style: Style) -> &Arc<dyn Font> {
        match (style.bold, style.italic) {
            (false, false) => &self.regular,
            (true, false) => &self.bold,
            (false, true) => &self.italic,
            (true, true) => &self.bold_italic,
        }
    }
}

impl Default for MarkdownFonts {
    fn default() -> Self {
        Self::family(FontFamily::Helvetica)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Style {
    bold: bool,
    italic: bool,
    highlight: bool,
}

/// A styled run of text produced by the markup parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkdownRun {
    /// Text with markup removed
    pub text: String,
    /// Inside `**`
    pub bold: bool,
    /// Inside `*` or `_`
    pub italic: bool,
    /// Inside `==`
    pub highlight: bool,
}

/// Split `source` into styled runs.
///
/// Unclosed markers simply run to the end of the input. A trailing lone
/// backslash is kept as text.
pub fn parse_inline(source: &str) -> Vec<MarkdownRun> {
    let chars: Vec<char> = source.chars().collect();
    let mut runs = Vec::new();
    let mut style = Style::default();
    let mut pending = String::new();
    let mut escaped = false;
    let mut i = 0;

    let flush = |pending: &mut String, style: Style, runs: &mut Vec<MarkdownRun>| {
        if !pending.is_empty() {
            runs.push(MarkdownRun {
                text: std::mem::take(pending),
                bold: style.bold,
                italic: style.italic,
                highlight: style.highlight,
            });
        }
    };

    while i < chars.len() {
        let ch = chars[i];
        let next = chars.get(i + 1).copied();
        if escaped {
            pending.push(ch);
            escaped = false;
            i += 1;
            continue;
        }
        match (ch, next) {
            ('\\', Some(_)) => {
                escaped = true;
                i += 1;
            },
            ('*', Some('*')) => {
                flush(&mut pending, style, &mut runs);
                style.bold = !style.bold;
                i += 2;
            },
            ('=', Some('=')) => {
                flush(&mut pending, style, &mut runs);
                style.highlight = !style.highlight;
                i += 2;
            },
            ('*', _) | ('_', _) => {
                flush(&mut pending, style, &mut runs);
                style.italic = !style.italic;
                i += 1;
            },
            _ => {
                pending.push(ch);
                i += 1;
            },
        }
    }
    flush(&mut pending, style, &mut runs);
    runs
}

/// A paragraph written in inline markup.
///
/// ```
/// use pdf_compose::layout::MarkdownParagraph;
///
/// let paragraph = MarkdownParagraph::new("Some **bold** and *italic* text", 12.0).unwrap();
/// assert_eq!(paragraph.runs().len(), 5);
/// ```
#[derive(Debug, Clone)]
pub struct MarkdownParagraph {
    runs: Vec<MarkdownRun>,
    inner: HeterogeneousParagraph,
}

impl MarkdownParagraph {
    /// Default highlight color.
    pub const HIGHLIGHT: Color = Color::Rgb { r: 255, g: 255, b: 0 };

    /// Helvetica family, black text, yellow highlight.
    pub fn new(source: &str, font_size: f64) -> Result<Self> {
        Self::with_style(source, MarkdownStyle::new(font_size))
    }

    /// Parse `source` with explicit fonts and colors.
    pub fn with_style(source: &str, style: MarkdownStyle) -> Result<Self> {
        Self::with_paragraph_options(source, style, |builder| builder)
    }

    /// Parse `source` and adjust the paragraph builder (alignment, leading,
    /// box model) before building.
    pub fn with_paragraph_options(
        source: &str,
        style: MarkdownStyle,
        configure: impl FnOnce(ParagraphBuilder<Vec<Chunk>>) -> ParagraphBuilder<Vec<Chunk>>,
    ) -> Result<Self> {
        let runs = parse_inline(source);
        let mut chunks = Vec::with_capacity(runs.len());
        for run in &runs {
            let run_style = Style {
                bold: run.bold,
                italic: run.italic,
                highlight: run.highlight,
            };
            let mut builder = Chunk::builder(run.text.clone(), Arc::clone(style.fonts.pick(run_style)))
                .font_size(style.font_size)
                .font_color(style.font_color);
            if run.highlight {
                builder = builder.box_model(
                    BoxModel::builder()
                        .background_color(style.highlight_color)
                        .build()?,
                );
            }
            chunks.push(builder.build()?);
        }
        log::trace!("Parsed markup into {} runs", runs.len());
        let inner = configure(HeterogeneousParagraph::builder(chunks)).build()?;
        Ok(Self { runs, inner })
    }

    /// Parsed runs.
    pub fn runs(&self) -> &[MarkdownRun] {
        &self.runs
    }

    /// The underlying paragraph.
    pub fn as_heterogeneous(&self) -> &HeterogeneousParagraph {
        &self.inner
    }
}

/// Fonts, size and colors for [`MarkdownParagraph`].
#[derive(Debug, Clone)]
pub struct MarkdownStyle {
    /// Faces
    pub fonts: MarkdownFonts,
    /// Size of every run
    pub font_size: f64,
    /// Text color
    pub font_color: Color,
    /// Background of `==...==` runs
    pub highlight_color: Color,
}

impl MarkdownStyle {
    /// Helvetica family at `font_size`.
    pub fn new(font_size: f64) -> Self {
        Self {
            fonts: MarkdownFonts::default(),
            font_size,
            font_color: Color::black(),
            highlight_color: MarkdownParagraph::HIGHLIGHT,
        }
    }
}

impl LayoutElement for MarkdownParagraph {
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
        "MarkdownParagraph"
    }
}
