//! The two-phase measure/paint contract.

use crate::color::Color;
use crate::error::Result;
use crate::fonts::Font;
use crate::geometry::{align, Rect, Size};
use crate::layout::box_model::BoxModel;
use crate::writer::Page;
use std::cell::RefCell;
use std::fmt::Debug;
use std::sync::Arc;

/// Font, size and color of a text element.
///
/// Containers size derived text (list indices) from it and page layouts
/// use it for implicit spacing.
#[derive(Debug, Clone)]
pub struct FontHint {
    /// Font
    pub font: Arc<dyn Font>,
    /// Font size
    pub font_size: f64,
    /// Text color
    pub font_color: Color,
}

/// Anything that can be placed on a page.
pub trait LayoutElement: Debug {
    /// Outer size (padding included, margins excluded) within `available`.
    ///
    /// Deterministic for a given `available`. An element that does not fit
    /// still reports its size; the caller decides what to do.
    fn measure(&self, available: Size) -> Result<Size>;

    /// Place the element inside `available`, write its operators to `page`
    /// and record the rectangle used as [`LayoutElement::previous_paint_box`].
    fn paint(&mut self, available: Rect, page: &mut Page) -> Result<()>;

    /// Box-model attributes.
    fn box_model(&self) -> &BoxModel;

    /// Mutable box-model attributes.
    fn box_model_mut(&mut self) -> &mut BoxModel;

    /// Outer rectangle used by the last paint.
    fn previous_paint_box(&self) -> Option<Rect> {
        self.box_model().previous_paint_box()
    }

    /// Font information for text elements.
    fn font_hint(&self) -> Option<FontHint> {
        None
    }

    /// Check that every character this element and its children paint can be
    /// encoded by its font, without writing anything.
    ///
    /// Containers call this on their children before opening any operator,
    /// so a failing paint leaves the page untouched.
    fn validate_encoding(&self) -> Result<()> {
        Ok(())
    }

    /// Element kind, for error messages.
    fn kind(&self) -> &'static str;
}

/// Position an element of `measured` size inside `available` by its alignment.
pub(crate) fn placement(model: &BoxModel, available: Rect, measured: Size) -> Rect {
    align(
        available,
        measured,
        model.horizontal_alignment(),
        model.vertical_alignment(),
    )
}

/// Small per-element memo of `measure` results keyed by the available size.
#[derive(Debug, Default)]
pub(crate) struct MeasureCache {
    entries: RefCell<Vec<(Size, Size)>>,
}

impl MeasureCache {
    const CAPACITY: usize = 8;

    pub(crate) fn get_or_try_insert(
        &self,
        available: Size,
        compute: impl FnOnce() -> Result<Size>,
    ) -> Result<Size> {
        let hit = self
            .entries
            .borrow()
            .iter()
            .find(|(key, _)| *key == available)
            .map(|(_, size)| *size);
        if let Some(size) = hit {
            return Ok(size);
        }

        let size = compute()?;
        let mut entries = self.entries.borrow_mut();
        if entries.len() >= Self::CAPACITY {
            entries.remove(0);
        }
        entries.push((available, size));
        Ok(size)
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.entries.borrow().len()
    }
}

impl Clone for MeasureCache {
    fn clone(&self) -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_cache_hits_and_evicts() {
        let cache = MeasureCache::default();
        let calls = Cell::new(0);
        let compute = |w: f64| {
            calls.set(calls.get() + 1);
            Ok(Size::new(w / 2.0, 10.0))
        };

        for _ in 0..3 {
            let size = cache
                .get_or_try_insert(Size::new(100.0, 50.0), || compute(100.0))
                .unwrap();
            assert_eq!(size, Size::new(50.0, 10.0));
        }
        assert_eq!(calls.get(), 1);

        for i in 0..10 {
            let w = 200.0 + i as f64;
            cache.get_or_try_insert(Size::new(w, 50.0), || compute(w)).unwrap();
        }
        assert_eq!(cache.len(), MeasureCache::CAPACITY);
    }

    #[test]
    fn test_errors_are_not_cached() {
        let cache = MeasureCache::default();
        let failed = cache.get_or_try_insert(Size::zero(), || {
            Err(crate::error::Error::InvalidArgument("boom".to_string()))
        });
        assert!(failed.is_err());
        assert_eq!(cache.len(), 0);
    }
}
