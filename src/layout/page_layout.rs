//! Flowing elements down columns and across pages.

use crate::config::LayoutConfig;
use crate::error::{Error, Result};
use crate::geometry::{Rect, Size, EPSILON};
use crate::layout::element::{FontHint, LayoutElement};
use crate::writer::{Document, Page};

/// Width and height of an A4 page in points.
pub const A4: (f64, f64) = (595.0, 842.0);

/// Places elements one after another on the pages of a document.
pub trait PageLayout {
    /// Measure and paint `element` below the previous one, moving to the
    /// next column (or page) when it does not fit the remaining space.
    fn append_layout_element(&mut self, element: &mut dyn LayoutElement) -> Result<()>;

    /// Continue in the next column, starting a page after the last one.
    fn next_column(&mut self);

    /// Continue at the top of the first column of a new page.
    fn next_page(&mut self);
}

/// Equal-width columns with margins and gaps taken from a [`LayoutConfig`].
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use pdf_compose::fonts::StandardFont;
/// use pdf_compose::layout::{MultiColumnLayout, PageLayout, Paragraph};
/// use pdf_compose::writer::Document;
///
/// let mut document = Document::new();
/// let mut layout = MultiColumnLayout::two_column(&mut document).unwrap();
/// let mut paragraph =
///     Paragraph::new("Hello columns", Arc::new(StandardFont::helvetica()), 12.0).unwrap();
/// layout.append_layout_element(&mut paragraph).unwrap();
/// assert_eq!(layout.column(), 0);
/// assert_eq!(document.len(), 1);
/// ```
#[derive(Debug)]
pub struct MultiColumnLayout<'a> {
    document: &'a mut Document,
    page_index: usize,
    page_size: Size,
    column: usize,
    columns: usize,
    cursor: f64,
    pending_spacing: f64,
    first_in_column: bool,
    config: LayoutConfig,
}

impl<'a> MultiColumnLayout<'a> {
    /// Layout with `columns` columns and default configuration.
    pub fn new(document: &'a mut Document, columns: usize) -> Result<Self> {
        Self::with_config(document, columns, LayoutConfig::default())
    }

    /// One column spanning the page between the margins.
    pub fn single_column(document: &'a mut Document) -> Result<Self> {
        Self::new(document, 1)
    }

    /// Two columns.
    pub fn two_column(document: &'a mut Document) -> Result<Self> {
        Self::new(document, 2)
    }

    /// Layout starting on the last page of `document`; an empty
    /// document gets an A4 page.
    pub fn with_config(document: &'a mut Document, columns: usize, config: LayoutConfig) -> Result<Self> {
        if columns == 0 {
            return Err(Error::InvalidArgument("column count must be at least 1".to_string()));
        }
        if document.is_empty() {
            document.append_page(A4.0, A4.1);
        }
        let page_index = document.len() - 1;
        let page_size = document
            .page(page_index)
            .map(Page::size)
            .ok_or_else(|| Error::InvalidArgument("document has no pages".to_string()))?;

        let mut layout = Self {
            document,
            page_index,
            page_size,
            column: 0,
            columns,
            cursor: 0.0,
            pending_spacing: 0.0,
            first_in_column: true,
            config,
        };
        if layout.column_width() <= 0.0 {
            return Err(Error::InvalidArgument(format!(
                "{} columns leave no room on a page {} wide",
                columns, page_size.width
            )));
        }
        layout.reset_column();
        Ok(layout)
    }

    /// Index of the page being filled.
    pub fn page_index(&self) -> usize {
        self.page_index
    }

    /// Index of the column being filled (0-based).
    pub fn column(&self) -> usize {
        self.column
    }

    /// Number of columns per page.
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Y coordinate below the last element in the current column.
    pub fn cursor(&self) -> f64 {
        self.cursor
    }

    /// The document being filled.
    pub fn document(&self) -> &Document {
        self.document
    }

    /// Configuration in use.
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    fn horizontal_margin(&self) -> f64 {
        self.page_size.width * self.config.horizontal_margin_ratio
    }

    fn vertical_margin(&self) -> f64 {
        self.page_size.height * self.config.vertical_margin_ratio
    }

    fn gap(&self) -> f64 {
        self.page_size.width * self.config.column_gap_ratio
    }

    /// Width of one column.
    pub fn column_width(&self) -> f64 {
        let gaps = (self.columns - 1) as f64 * self.gap();
        (self.page_size.width - 2.0 * self.horizontal_margin() - gaps) / self.columns as f64
    }

    /// Height of an empty column.
    pub fn column_height(&self) -> f64 {
        self.page_size.height - 2.0 * self.vertical_margin()
    }

    fn column_x(&self) -> f64 {
        self.horizontal_margin() + self.column as f64 * (self.column_width() + self.gap())
    }

    fn reset_column(&mut self) {
        self.cursor = self.page_size.height - self.vertical_margin();
        self.pending_spacing = 0.0;
        self.first_in_column = true;
    }

    /// Vertical spacing for an element: its explicit margin, else a multiple
    /// of its font size, else the configured constant.
    fn spacing(&self, explicit: Option<f64>, hint: Option<&FontHint>) -> f64 {
        explicit.unwrap_or_else(|| match hint {
            Some(hint) => self.config.text_margin_factor * hint.font_size,
            None => self.config.implicit_margin,
        })
    }

    fn place(&mut self, element: &mut dyn LayoutElement, may_spill: bool) -> Result<()> {
        let model = element.box_model();
        let (margin_top, margin_bottom) = (model.margin_top(), model.margin_bottom());
        let margin_left = model.margin_left().unwrap_or(0.0);
        let margin_right = model.margin_right().unwrap_or(0.0);
        let hint = element.font_hint();

        let margin_top = if self.first_in_column {
            0.0
        } else {
            self.spacing(margin_top, hint.as_ref())
        };
        let spacing = self.pending_spacing.max(margin_top);
        let bottom = self.vertical_margin();
        let available_width = (self.column_width() - margin_left - margin_right).max(0.0);
        let available_height = (self.cursor - bottom - spacing).max(0.0);

        let size = element.measure(Size::new(available_width, available_height))?;
        log::trace!(
            "Measured {} as {}x{} against {}x{}",
            element.kind(),
            size.width,
            size.height,
            available_width,
            available_height
        );
        if size.width > available_width + EPSILON {
            return Err(Error::ElementTooWide {
                element: element.kind().to_string(),
                width: size.width,
                available: available_width,
            });
        }
        if size.height > self.column_height() + EPSILON {
            return Err(Error::ElementTooTall {
                element: element.kind().to_string(),
                height: size.height,
                available: self.column_height(),
            });
        }
        if size.height > available_height + EPSILON {
            if !may_spill {
                return Err(Error::ElementTooTall {
                    element: element.kind().to_string(),
                    height: size.height,
                    available: available_height,
                });
            }
            log::debug!(
                "{} needs {} but column {} has {} left",
                element.kind(),
                size.height,
                self.column,
                available_height
            );
            self.next_column();
            return self.place(element, false);
        }

        let target = Rect::new(self.column_x() + margin_left, bottom, available_width, available_height);
        let page = self
            .document
            .page_mut(self.page_index)
            .ok_or_else(|| Error::InvalidArgument(format!("page {} does not exist", self.page_index)))?;
        element.paint(target, page)?;

        self.cursor = element
            .previous_paint_box()
            .map(|used| used.bottom())
            .unwrap_or(target.top() - size.height);
        self.pending_spacing = self.spacing(margin_bottom, hint.as_ref());
        self.first_in_column = false;
        Ok(())
    }
}

impl PageLayout for MultiColumnLayout<'_> {
    fn append_layout_element(&mut self, element: &mut dyn LayoutElement) -> Result<()> {
        self.place(element, true)
    }

    fn next_column(&mut self) {
        self.column += 1;
        if self.column >= self.columns {
            self.next_page();
            return;
        }
        log::debug!("Moving to column {} on page {}", self.column, self.page_index);
        self.reset_column();
    }

    fn next_page(&mut self) {
        self.page_index = self
            .document
            .append_page(self.page_size.width, self.page_size.height);
        self.column = 0;
        self.reset_column();
        log::debug!("Started page {}", self.page_index);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fonts::{Base14, StandardFont};
    use crate::layout::{BoxModel, Chunk};
    use std::sync::Arc;

    fn chunk(text: &str, size: f64) -> Chunk {
        Chunk::new(text, Arc::new(StandardFont::new(Base14::Courier)), size).unwrap()
    }

    #[test]
    fn test_geometry() {
        let mut document = Document::new();
        document.append_page(600.0, 800.0);
        let layout = MultiColumnLayout::two_column(&mut document).unwrap();
        // 600 - 2 * 60 - 30 = 450, split in two
        assert_eq!(layout.column_width(), 225.0);
        assert_eq!(layout.column_height(), 640.0);
        assert_eq!(layout.cursor(), 720.0);
    }

    #[test]
    fn test_empty_document_gets_a4() {
        let mut document = Document::new();
        let layout = MultiColumnLayout::single_column(&mut document).unwrap();
        assert_eq!(layout.page_index(), 0);
        drop(layout);
        assert_eq!(document.page(0).unwrap().size(), Size::new(595.0, 842.0));
    }

    #[test]
    fn test_zero_columns_rejected() {
        let mut document = Document::new();
        assert!(matches!(
            MultiColumnLayout::new(&mut document, 0),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_first_element_has_no_top_margin() {
        let mut document = Document::new();
        document.append_page(600.0, 800.0);
        let mut layout = MultiColumnLayout::single_column(&mut document).unwrap();

        let mut first = chunk("one", 10.0);
        layout.append_layout_element(&mut first).unwrap();
        assert_eq!(first.previous_paint_box().unwrap().top(), 720.0);
        assert_eq!(layout.cursor(), 710.0);

        // text spacing is 1.2 x font size
        let mut second = chunk("two", 10.0);
        layout.append_layout_element(&mut second).unwrap();
        assert_eq!(second.previous_paint_box().unwrap().top(), 698.0);
    }

    #[test]
    fn test_explicit_margins() {
        let mut document = Document::new();
        document.append_page(600.0, 800.0);
        let mut layout = MultiColumnLayout::single_column(&mut document).unwrap();

        let mut first = chunk("one", 10.0)
            .with_box_model(BoxModel::builder().margin_bottom(30.0).build().unwrap());
        layout.append_layout_element(&mut first).unwrap();
        let mut second = chunk("two", 10.0).with_box_model(
            BoxModel::builder().margins(5.0, 0.0, 0.0, 20.0).build().unwrap(),
        );
        layout.append_layout_element(&mut second).unwrap();
        let used = second.previous_paint_box().unwrap();
        // larger of the previous bottom margin and this top margin
        assert_eq!(used.top(), 680.0);
        assert_eq!(used.x, 80.0);
    }

    #[test]
    fn test_too_wide() {
        let mut document = Document::new();
        document.append_page(200.0, 800.0);
        let mut layout = MultiColumnLayout::single_column(&mut document).unwrap();
        let mut wide = chunk("this is far too long for the column", 10.0);
        let err = layout.append_layout_element(&mut wide).unwrap_err();
        assert!(matches!(err, Error::ElementTooWide { .. }));
        assert!(err.is_layout_error());
        assert!(document.page(0).unwrap().contents().is_empty());
    }

    #[test]
    fn test_spill_to_next_column_and_page() {
        let mut document = Document::new();
        document.append_page(600.0, 100.0);
        // column height 80
        let mut layout = MultiColumnLayout::two_column(&mut document).unwrap();
        let tall = || chunk("x", 50.0);

        layout.append_layout_element(&mut tall()).unwrap();
        assert_eq!((layout.page_index(), layout.column()), (0, 0));
        layout.append_layout_element(&mut tall()).unwrap();
        assert_eq!((layout.page_index(), layout.column()), (0, 1));
        layout.append_layout_element(&mut tall()).unwrap();
        assert_eq!((layout.page_index(), layout.column()), (1, 0));
        assert_eq!(layout.document().len(), 2);
    }

    #[test]
    fn test_taller_than_column() {
        let mut document = Document::new();
        document.append_page(600.0, 100.0);
        let mut layout = MultiColumnLayout::single_column(&mut document).unwrap();
        let err = layout.append_layout_element(&mut chunk("x", 90.0)).unwrap_err();
        assert!(matches!(err, Error::ElementTooTall { height, available, .. } if height == 90.0 && available == 80.0));
        assert_eq!(layout.document().len(), 1);
    }
}
