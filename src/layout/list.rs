//! Bulleted and numbered lists.

use crate::color::Color;
use crate::error::{Error, Result};
use crate::fonts::{Font, StandardFont};
use crate::geometry::{Rect, Size};
use crate::layout::box_model::{paint_background_and_borders, BoxModel};
use crate::layout::chunk::Chunk;
use crate::layout::element::{placement, FontHint, LayoutElement, MeasureCache};
use crate::layout::roman;
use crate::writer::{begin_marked_content, end_marked_content, Page};
use std::sync::Arc;

/// Space between the index column and the items.
pub const INDEX_GAP: f64 = 5.0;

const BULLET: &str = "\u{2022}";
const DEFAULT_INDEX_SIZE: f64 = 12.0;

/// How list items are labelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListIndex {
    /// `•`
    Unordered,
    /// `1.`, `2.`, ...
    Decimal,
    /// `a.`, `b.`, ..., `z.`, `aa.`, ...
    Alphabetic,
    /// `I.`, `II.`, ... up to 3999
    Roman,
}

impl ListIndex {
    /// Label of the 1-based item `number`, or `None` if the style has no
    /// representation for it.
    pub fn label(&self, number: usize) -> Option<String> {
        if number == 0 {
            return None;
        }
        match self {
            ListIndex::Unordered => Some(BULLET.to_string()),
            ListIndex::Decimal => Some(format!("{}.", number)),
            ListIndex::Alphabetic => Some(format!("{}.", alphabetic(number))),
            ListIndex::Roman => u32::try_from(number)
                .ok()
                .and_then(roman::format)
                .map(|numeral| numeral + "."),
        }
    }
}

/// Spreadsheet-style base-26 lowercase label: 1 is `a`, 27 is `aa`.
///
/// ```
/// use pdf_compose::layout::list::alphabetic;
///
/// assert_eq!(alphabetic(26), "z");
/// assert_eq!(alphabetic(703), "aaa");
/// ```
pub fn alphabetic(number: usize) -> String {
    let mut remaining = number;
    let mut letters = Vec::new();
    while remaining > 0 {
        remaining -= 1;
        letters.push(char::from(b'a' + (remaining % 26) as u8));
        remaining /= 26;
    }
    letters.iter().rev().collect()
}

#[derive(Debug)]
struct ListItem {
    index: Chunk,
    element: Box<dyn LayoutElement>,
}

/// A column of labelled items.
///
/// ```
/// use std::sync::Arc;
/// use pdf_compose::fonts::StandardFont;
/// use pdf_compose::layout::{Chunk, List};
///
/// let font = Arc::new(StandardFont::helvetica());
/// let mut list = List::roman();
/// for word in ["Lorem", "Ipsum"] {
///     list.add_item(Chunk::new(word, font.clone(), 12.0).unwrap()).unwrap();
/// }
/// assert_eq!(list.index_labels(), vec!["I.", "II."]);
/// ```
#[derive(Debug)]
pub struct List {
    style: ListIndex,
    items: Vec<ListItem>,
    box_model: BoxModel,
    cache: MeasureCache,
}

impl List {
    /// Empty list with the given label style.
    pub fn new(style: ListIndex) -> Self {
        Self {
            style,
            items: Vec::new(),
            box_model: BoxModel::default(),
            cache: MeasureCache::default(),
        }
    }

    /// `1.`, `2.`, ...
    pub fn ordered() -> Self {
        Self::new(ListIndex::Decimal)
    }

    /// Bullets.
    pub fn unordered() -> Self {
        Self::new(ListIndex::Unordered)
    }

    /// `a.`, `b.`, ...
    pub fn alphabetic() -> Self {
        Self::new(ListIndex::Alphabetic)
    }

    /// `I.`, `II.`, ...
    pub fn roman() -> Self {
        Self::new(ListIndex::Roman)
    }

    /// Replace the box model.
    pub fn with_box_model(mut self, box_model: BoxModel) -> Self {
        self.box_model = box_model;
        self.cache = MeasureCache::default();
        self
    }

    /// Label style.
    pub fn style(&self) -> ListIndex {
        self.style
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True if the list has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Labels of the items, in order.
    pub fn index_labels(&self) -> Vec<&str> {
        self.items.iter().map(|item| item.index.text()).collect()
    }

    /// The items, in order.
    pub fn items(&self) -> impl Iterator<Item = &dyn LayoutElement> {
        self.items.iter().map(|item| item.element.as_ref())
    }

    /// Append an item. Fails if the label style cannot number it.
    pub fn add_item(&mut self, element: impl LayoutElement + 'static) -> Result<()> {
        self.add_boxed_item(Box::new(element))
    }

    /// Append an already boxed item.
    pub fn add_boxed_item(&mut self, element: Box<dyn LayoutElement>) -> Result<()> {
        let number = self.items.len() + 1;
        let label = self.style.label(number).ok_or_else(|| {
            Error::InvalidArgument(format!(
                "{:?} list index cannot label item {}",
                self.style, number
            ))
        })?;
        let index = index_chunk(label, element.font_hint())?;
        self.items.push(ListItem { index, element });
        self.cache = MeasureCache::default();
        Ok(())
    }

    /// Chained [`List::add_item`].
    pub fn with_item(mut self, element: impl LayoutElement + 'static) -> Result<Self> {
        self.add_item(element)?;
        Ok(self)
    }

    fn index_width(&self, available: Size) -> Result<f64> {
        self.items.iter().try_fold(0.0, |widest: f64, item| {
            Ok(widest.max(item.index.measure(available)?.width))
        })
    }

    fn child_available(&self, available: Size, index_width: f64) -> Size {
        let padding = self.box_model.padding();
        Size::new(
            (available.width - padding.horizontal() - index_width - INDEX_GAP).max(0.0),
            (available.height - padding.vertical()).max(0.0),
        )
    }

    /// Height of every row and the widest child, for `available`.
    fn rows(&self, available: Size) -> Result<(f64, Vec<f64>, f64)> {
        let index_width = self.index_width(available)?;
        let child_available = self.child_available(available, index_width);
        let mut heights = Vec::with_capacity(self.items.len());
        let mut widest_child: f64 = 0.0;
        for item in &self.items {
            let index = item.index.measure(available)?;
            let child = item.element.measure(child_available)?;
            widest_child = widest_child.max(child.width);
            heights.push(index.height.max(child.height));
        }
        Ok((index_width, heights, widest_child))
    }
}

/// Index label styled after the item's text, defaulting to Helvetica 12.
fn index_chunk(label: String, hint: Option<FontHint>) -> Result<Chunk> {
    let helvetica = || -> Arc<dyn Font> { Arc::new(StandardFont::helvetica()) };
    let Some(hint) = hint else {
        return Chunk::builder(label, helvetica())
            .font_size(DEFAULT_INDEX_SIZE)
            .font_color(Color::black())
            .build();
    };
    let chunk = Chunk::builder(label.clone(), Arc::clone(&hint.font))
        .font_size(hint.font_size)
        .font_color(hint.font_color)
        .build()?;
    if chunk.validate_encoding().is_ok() {
        return Ok(chunk);
    }
    log::debug!(
        "Font {} cannot encode list label {:?}, using Helvetica",
        hint.font.base_font(),
        label
    );
    Chunk::builder(label, helvetica())
        .font_size(hint.font_size)
        .font_color(hint.font_color)
        .build()
}

impl LayoutElement for List {
    fn measure(&self, available: Size) -> Result<Size> {
        self.cache.get_or_try_insert(available, || {
            let padding = self.box_model.padding();
            if self.items.is_empty() {
                return Ok(Size::new(padding.horizontal(), padding.vertical()));
            }
            let (index_width, heights, widest_child) = self.rows(available)?;
            Ok(Size::new(
                index_width + INDEX_GAP + widest_child + padding.horizontal(),
                heights.iter().sum::<f64>() + padding.vertical(),
            ))
        })
    }

    fn paint(&mut self, available: Rect, page: &mut Page) -> Result<()> {
        let measured = self.measure(available.size())?;
        let (index_width, heights, _) = self.rows(available.size())?;
        self.validate_encoding()?;
        let child_width = self.child_available(available.size(), index_width).width;

        let rect = placement(&self.box_model, available, measured);
        let padding = self.box_model.padding();
        let left = rect.x + padding.left;

        let list_token = begin_marked_content(page, "L", None);
        paint_background_and_borders(&self.box_model, rect, page);

        let mut row_tops = Vec::with_capacity(heights.len());
        let mut top = rect.top() - padding.top;
        for height in &heights {
            row_tops.push(top);
            top -= height;
        }

        for (row, item) in self.items.iter_mut().enumerate().rev() {
            let row_height = heights[row];
            let row_bottom = row_tops[row] - row_height;
            let item_token = begin_marked_content(page, "LI", None);
            item.index
                .paint(Rect::new(left, row_bottom, index_width, row_height), page)?;
            item.element.paint(
                Rect::new(left + index_width + INDEX_GAP, row_bottom, child_width, row_height),
                page,
            )?;
            end_marked_content(page, item_token);
        }

        end_marked_content(page, list_token);
        self.box_model.set_previous_paint_box(rect);
        log::trace!("Painted list of {} items at {:?}", self.items.len(), rect);
        Ok(())
    }

    fn box_model(&self) -> &BoxModel {
        &self.box_model
    }

    fn box_model_mut(&mut self) -> &mut BoxModel {
        &mut self.box_model
    }

    fn font_hint(&self) -> Option<FontHint> {
        self.items.first().and_then(|item| item.element.font_hint())
    }

    fn validate_encoding(&self) -> Result<()> {
        self.items.iter().try_for_each(|item| {
            item.index.validate_encoding()?;
            item.element.validate_encoding()
        })
    }

    fn kind(&self) -> &'static str {
        "List"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fonts::Base14;

    fn courier_chunk(text: &str) -> Chunk {
        Chunk::new(text, Arc::new(StandardFont::new(Base14::Courier)), 10.0).unwrap()
    }

    #[test]
    fn test_labels() {
        assert_eq!(ListIndex::Decimal.label(3).unwrap(), "3.");
        assert_eq!(ListIndex::Alphabetic.label(28).unwrap(), "ab.");
        assert_eq!(ListIndex::Roman.label(4).unwrap(), "IV.");
        assert_eq!(ListIndex::Roman.label(4000), None);
        assert_eq!(ListIndex::Unordered.label(7).unwrap(), "\u{2022}");
        assert_eq!(ListIndex::Decimal.label(0), None);
    }

    #[test]
    fn test_alphabetic() {
        for (n, expected) in [(1, "a"), (26, "z"), (27, "aa"), (52, "az"), (53, "ba"), (702, "zz"), (703, "aaa")] {
            assert_eq!(alphabetic(n), expected);
        }
    }

    #[test]
    fn test_index_follows_child_font() {
        let list = List::ordered().with_item(courier_chunk("x")).unwrap();
        let hint = LayoutElement::font_hint(&list).unwrap();
        assert_eq!(hint.font.base_font(), "Courier");
        assert_eq!(list.items[0].index.font_size(), 10.0);
        assert_eq!(list.items[0].index.font().base_font(), "Courier");
    }

    #[test]
    fn test_index_without_hint_is_helvetica() {
        let chunk = index_chunk("1.".to_string(), None).unwrap();
        assert_eq!(chunk.font().base_font(), "Helvetica");
        assert_eq!(chunk.font_size(), 12.0);
    }

    #[test]
    fn test_index_falls_back_when_font_cannot_encode() {
        let hint = FontHint {
            font: Arc::new(StandardFont::new(Base14::TimesRoman)),
            font_size: 9.0,
            font_color: Color::black(),
        };
        // U+2022 is in WinAnsi, so the child font is kept
        assert_eq!(
            index_chunk(BULLET.to_string(), Some(hint.clone())).unwrap().font().base_font(),
            "Times-Roman"
        );
        // Roman digits are not, so Helvetica is used
        let chunk = index_chunk("\u{2163}".to_string(), Some(hint)).unwrap();
        assert_eq!(chunk.font().base_font(), "Helvetica");
        assert_eq!(chunk.font_size(), 9.0);
    }

    #[test]
    fn test_measure() {
        let list = List::ordered()
            .with_item(courier_chunk("aa"))
            .unwrap()
            .with_item(courier_chunk("bbbb"))
            .unwrap();
        // index "1." = 12, gap 5, widest child 24, two rows of 10
        assert_eq!(list.measure(Size::new(200.0, 200.0)).unwrap(), Size::new(41.0, 20.0));
        assert_eq!(List::unordered().measure(Size::new(10.0, 10.0)).unwrap(), Size::zero());
    }

    #[test]
    fn test_paint_bottom_up() {
        let mut list = List::ordered()
            .with_item(courier_chunk("top"))
            .unwrap()
            .with_item(courier_chunk("bottom"))
            .unwrap();
        let mut page = Page::new(300.0, 300.0);
        list.paint(Rect::new(0.0, 0.0, 300.0, 300.0), &mut page).unwrap();
        let content = page.contents().to_latin1_string();
        let bottom = content.find("(bottom) Tj").unwrap();
        let top = content.find("(top) Tj").unwrap();
        assert!(bottom < top);
        assert!(content.contains("10 0 0 10 17 290 Tm"));
        assert!(content.contains("10 0 0 10 17 280 Tm"));
        assert!(page.contents().is_balanced());
    }
}
