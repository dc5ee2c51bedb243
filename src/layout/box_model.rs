//! Box-model attributes shared by every layout element, and the
//! background/border painter.

use crate::color::Color;
use crate::error::{ensure_non_negative, Result};
use crate::geometry::{HorizontalAlignment, Rect, VerticalAlignment};
use crate::writer::{ContentStreamOp, Page};

/// Four per-side values (padding, border widths).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Sides {
    /// Top side
    pub top: f64,
    /// Right side
    pub right: f64,
    /// Bottom side
    pub bottom: f64,
    /// Left side
    pub left: f64,
}

impl Sides {
    /// Per-side values in CSS order.
    pub fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// The same value on every side.
    pub fn uniform(value: f64) -> Self {
        Self::new(value, value, value, value)
    }

    /// Left plus right.
    pub fn horizontal(&self) -> f64 {
        self.left + self.right
    }

    /// Top plus bottom.
    pub fn vertical(&self) -> f64 {
        self.top + self.bottom
    }

    /// Whether all four sides are equal.
    pub fn is_uniform(&self) -> bool {
        self.top == self.right && self.right == self.bottom && self.bottom == self.left
    }

    /// Whether any side is non-zero.
    pub fn any(&self) -> bool {
        self.top > 0.0 || self.right > 0.0 || self.bottom > 0.0 || self.left > 0.0
    }

    fn validate(&self, what: &str) -> Result<()> {
        ensure_non_negative(&format!("{}_top", what), self.top)?;
        ensure_non_negative(&format!("{}_right", what), self.right)?;
        ensure_non_negative(&format!("{}_bottom", what), self.bottom)?;
        ensure_non_negative(&format!("{}_left", what), self.left)?;
        Ok(())
    }
}

/// Background, borders, padding, margins and alignment of an element.
///
/// Built through [`BoxModel::builder`], which rejects negative values.
/// Margins are optional: `None` lets the page layout apply its implicit
/// spacing.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BoxModel {
    background_color: Option<Color>,
    border_color: Option<Color>,
    border_widths: Sides,
    border_dash_pattern: Vec<i32>,
    border_dash_phase: i32,
    padding: Sides,
    margin_top: Option<f64>,
    margin_right: Option<f64>,
    margin_bottom: Option<f64>,
    margin_left: Option<f64>,
    horizontal_alignment: HorizontalAlignment,
    vertical_alignment: VerticalAlignment,
    previous_paint_box: Option<Rect>,
}

impl BoxModel {
    /// Start building a box model.
    pub fn builder() -> BoxModelBuilder {
        BoxModelBuilder::default()
    }

    /// Background fill, if any.
    pub fn background_color(&self) -> Option<Color> {
        self.background_color
    }

    /// Border stroke color, if set.
    pub fn border_color(&self) -> Option<Color> {
        self.border_color
    }

    /// Border widths.
    pub fn border_widths(&self) -> Sides {
        self.border_widths
    }

    /// Border dash pattern (empty for solid).
    pub fn border_dash_pattern(&self) -> &[i32] {
        &self.border_dash_pattern
    }

    /// Border dash phase.
    pub fn border_dash_phase(&self) -> i32 {
        self.border_dash_phase
    }

    /// Padding.
    pub fn padding(&self) -> Sides {
        self.padding
    }

    /// Explicit top margin.
    pub fn margin_top(&self) -> Option<f64> {
        self.margin_top
    }

    /// Explicit right margin.
    pub fn margin_right(&self) -> Option<f64> {
        self.margin_right
    }

    /// Explicit bottom margin.
    pub fn margin_bottom(&self) -> Option<f64> {
        self.margin_bottom
    }

    /// Explicit left margin.
    pub fn margin_left(&self) -> Option<f64> {
        self.margin_left
    }

    /// Horizontal alignment within the available box.
    pub fn horizontal_alignment(&self) -> HorizontalAlignment {
        self.horizontal_alignment
    }

    /// Vertical alignment within the available box.
    pub fn vertical_alignment(&self) -> VerticalAlignment {
        self.vertical_alignment
    }

    /// Outer rectangle used by the last paint.
    pub fn previous_paint_box(&self) -> Option<Rect> {
        self.previous_paint_box
    }

    pub(crate) fn set_previous_paint_box(&mut self, rect: Rect) {
        self.previous_paint_box = Some(rect);
    }

    /// Only the background color, e.g. for paragraph sub-chunks.
    pub(crate) fn background_only(&self) -> BoxModel {
        BoxModel {
            background_color: self.background_color,
            ..BoxModel::default()
        }
    }

    /// Whether painting produces any background or border operators.
    pub fn has_decoration(&self) -> bool {
        self.background_color.is_some() || self.border_widths.any()
    }
}

/// Validating builder for [`BoxModel`].
///
/// # Examples
///
/// ```
/// use pdf_compose::color::Color;
/// use pdf_compose::layout::BoxModel;
///
/// let model = BoxModel::builder()
///     .padding(5.0)
///     .border_width(1.0)
///     .background_color(Color::named("lightgray").unwrap())
///     .build()
///     .unwrap();
/// assert_eq!(model.padding().horizontal(), 10.0);
///
/// assert!(BoxModel::builder().padding(-1.0).build().is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct BoxModelBuilder {
    model: BoxModel,
}

impl BoxModelBuilder {
    /// Fill the box with `color`.
    pub fn background_color(mut self, color: Color) -> Self {
        self.model.background_color = Some(color);
        self
    }

    /// Stroke borders with `color`.
    pub fn border_color(mut self, color: Color) -> Self {
        self.model.border_color = Some(color);
        self
    }

    /// Same border width on every side.
    pub fn border_width(mut self, width: f64) -> Self {
        self.model.border_widths = Sides::uniform(width);
        self
    }

    /// Per-side border widths.
    pub fn border_widths(mut self, top: f64, right: f64, bottom: f64, left: f64) -> Self {
        self.model.border_widths = Sides::new(top, right, bottom, left);
        self
    }

    /// Dashed borders.
    pub fn border_dash(mut self, pattern: Vec<i32>, phase: i32) -> Self {
        self.model.border_dash_pattern = pattern;
        self.model.border_dash_phase = phase;
        self
    }

    /// Same padding on every side.
    pub fn padding(mut self, padding: f64) -> Self {
        self.model.padding = Sides::uniform(padding);
        self
    }

    /// Per-side padding.
    pub fn paddings(mut self, top: f64, right: f64, bottom: f64, left: f64) -> Self {
        self.model.padding = Sides::new(top, right, bottom, left);
        self
    }

    /// Same explicit margin on every side.
    pub fn margin(self, margin: f64) -> Self {
        self.margins(margin, margin, margin, margin)
    }

    /// Per-side explicit margins.
    pub fn margins(mut self, top: f64, right: f64, bottom: f64, left: f64) -> Self {
        self.model.margin_top = Some(top);
        self.model.margin_right = Some(right);
        self.model.margin_bottom = Some(bottom);
        self.model.margin_left = Some(left);
        self
    }

    /// Explicit top margin.
    pub fn margin_top(mut self, margin: f64) -> Self {
        self.model.margin_top = Some(margin);
        self
    }

    /// Explicit bottom margin.
    pub fn margin_bottom(mut self, margin: f64) -> Self {
        self.model.margin_bottom = Some(margin);
        self
    }

    /// Horizontal alignment.
    pub fn horizontal_alignment(mut self, alignment: HorizontalAlignment) -> Self {
        self.model.horizontal_alignment = alignment;
        self
    }

    /// Vertical alignment.
    pub fn vertical_alignment(mut self, alignment: VerticalAlignment) -> Self {
        self.model.vertical_alignment = alignment;
        self
    }

    /// Validate and build.
    pub fn build(self) -> Result<BoxModel> {
        let model = self.model;
        model.padding.validate("padding")?;
        model.border_widths.validate("border_width")?;
        for (what, margin) in [
            ("margin_top", model.margin_top),
            ("margin_right", model.margin_right),
            ("margin_bottom", model.margin_bottom),
            ("margin_left", model.margin_left),
        ] {
            if let Some(value) = margin {
                ensure_non_negative(what, value)?;
            }
        }
        if model.border_dash_pattern.iter().any(|d| *d < 0) {
            return Err(crate::error::Error::InvalidArgument(format!(
                "border_dash_pattern must not contain negative values, got {:?}",
                model.border_dash_pattern
            )));
        }
        Ok(model)
    }
}

/// Paint the background and borders of `model` around `rect`, inside `q ... Q`.
///
/// Writes nothing when the box has neither.
pub(crate) fn paint_background_and_borders(model: &BoxModel, rect: Rect, page: &mut Page) {
    if !model.has_decoration() {
        return;
    }

    let widths = model.border_widths;
    let has_border = widths.any();
    let uniform_border = has_border && widths.is_uniform();
    let stroke = model.border_color.unwrap_or_default().to_rgb_components();
    let dash = (!model.border_dash_pattern.is_empty()).then(|| {
        ContentStreamOp::SetDashPattern(
            model.border_dash_pattern.iter().map(|d| f64::from(*d)).collect(),
            f64::from(model.border_dash_phase),
        )
    });
    let outline = ContentStreamOp::Rectangle(rect.x, rect.y, rect.width, rect.height);

    let mut w = page.writer();
    w.save_graphics_state();

    if let Some(background) = model.background_color {
        let (r, g, b) = background.to_rgb_components();
        w.op(ContentStreamOp::SetFillColorRGB(r, g, b));
        if uniform_border {
            w.op(ContentStreamOp::SetStrokeColorRGB(stroke.0, stroke.1, stroke.2))
                .op(ContentStreamOp::SetLineWidth(widths.top));
            if let Some(dash) = dash.clone() {
                w.op(dash);
            }
            w.op(outline.clone()).op(ContentStreamOp::FillStroke);
        } else {
            w.op(outline.clone()).op(ContentStreamOp::Fill);
        }
    } else if uniform_border {
        w.op(ContentStreamOp::SetStrokeColorRGB(stroke.0, stroke.1, stroke.2))
            .op(ContentStreamOp::SetLineWidth(widths.top));
        if let Some(dash) = dash.clone() {
            w.op(dash);
        }
        w.op(outline).op(ContentStreamOp::Stroke);
    }

    if has_border && !uniform_border {
        w.op(ContentStreamOp::SetStrokeColorRGB(stroke.0, stroke.1, stroke.2));
        if let Some(dash) = dash {
            w.op(dash);
        }
        let sides = [
            (widths.top, (rect.left(), rect.top()), (rect.right(), rect.top())),
            (widths.right, (rect.right(), rect.top()), (rect.right(), rect.bottom())),
            (widths.bottom, (rect.left(), rect.bottom()), (rect.right(), rect.bottom())),
            (widths.left, (rect.left(), rect.bottom()), (rect.left(), rect.top())),
        ];
        for (width, from, to) in sides {
            if width <= 0.0 {
                continue;
            }
            w.op(ContentStreamOp::SetLineWidth(width))
                .op(ContentStreamOp::MoveTo(from.0, from.1))
                .op(ContentStreamOp::LineTo(to.0, to.1))
                .op(ContentStreamOp::Stroke);
        }
    }

    w.restore_graphics_state();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn painted(model: &BoxModel) -> String {
        let mut page = Page::new(200.0, 200.0);
        paint_background_and_borders(model, Rect::new(10.0, 20.0, 30.0, 40.0), &mut page);
        page.contents().to_latin1_string()
    }

    #[test]
    fn test_builder_validation() {
        assert!(BoxModel::builder().padding(2.0).build().is_ok());
        assert!(BoxModel::builder().paddings(1.0, -1.0, 0.0, 0.0).build().is_err());
        assert!(BoxModel::builder().border_width(-0.5).build().is_err());
        assert!(BoxModel::builder().margin_top(-3.0).build().is_err());
        assert!(BoxModel::builder().border_dash(vec![3, -1], 0).build().is_err());
    }

    #[test]
    fn test_margins_default_to_implicit() {
        let model = BoxModel::builder().margin_bottom(4.0).build().unwrap();
        assert_eq!(model.margin_top(), None);
        assert_eq!(model.margin_bottom(), Some(4.0));
    }

    #[test]
    fn test_nothing_to_paint() {
        assert_eq!(painted(&BoxModel::default()), "");
    }

    #[test]
    fn test_background_only() {
        let model = BoxModel::builder()
            .background_color(Color::rgb(255, 0, 0))
            .build()
            .unwrap();
        assert_eq!(painted(&model), "q\n1 0 0 rg\n10 20 30 40 re\nf\nQ\n");
    }

    #[test]
    fn test_background_with_uniform_border_uses_fill_stroke() {
        let model = BoxModel::builder()
            .background_color(Color::white())
            .border_width(2.0)
            .build()
            .unwrap();
        assert_eq!(
            painted(&model),
            "q\n1 1 1 rg\n0 0 0 RG\n2 w\n10 20 30 40 re\nB\nQ\n"
        );
    }

    #[test]
    fn test_dashed_uniform_border() {
        let model = BoxModel::builder()
            .border_width(1.0)
            .border_color(Color::rgb(0, 0, 255))
            .border_dash(vec![3, 2], 1)
            .build()
            .unwrap();
        assert_eq!(painted(&model), "q\n0 0 1 RG\n1 w\n[3 2] 1 d\n10 20 30 40 re\nS\nQ\n");
    }

    #[test]
    fn test_unequal_borders_draw_sides() {
        let model = BoxModel::builder()
            .border_widths(1.0, 0.0, 2.0, 0.0)
            .build()
            .unwrap();
        assert_eq!(
            painted(&model),
            "q\n0 0 0 RG\n1 w\n10 60 m\n40 60 l\nS\n2 w\n10 20 m\n40 20 l\nS\nQ\n"
        );
    }

    #[test]
    fn test_sides() {
        let sides = Sides::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(sides.horizontal(), 6.0);
        assert_eq!(sides.vertical(), 4.0);
        assert!(!sides.is_uniform());
        assert!(Sides::uniform(2.0).is_uniform());
        assert!(!Sides::default().any());
    }
}
