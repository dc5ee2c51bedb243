//! Geometric primitives for page layout.
//!
//! All coordinates are in PDF user space: the origin is the bottom-left
//! corner of the page and y grows upward. One unit is 1/72 inch.

use serde::{Deserialize, Serialize};

/// Tolerance used when comparing layout coordinates.
pub const EPSILON: f64 = 1e-6;

/// A width/height pair.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    /// Width
    pub width: f64,
    /// Height
    pub height: f64,
}

impl Size {
    /// Create a new size.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_compose::geometry::Size;
    ///
    /// let size = Size::new(100.0, 50.0);
    /// assert_eq!(size.width, 100.0);
    /// ```
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// A size of zero by zero.
    pub fn zero() -> Self {
        Self::default()
    }
}

/// A rectangle in user space, anchored at its bottom-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// X coordinate of the left edge
    pub x: f64,
    /// Y coordinate of the bottom edge
    pub y: f64,
    /// Width of rectangle (non-negative)
    pub width: f64,
    /// Height of rectangle (non-negative)
    pub height: f64,
}

impl Rect {
    /// Create a new rectangle from its bottom-left corner and dimensions.
    ///
    /// Negative dimensions are clamped to zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_compose::geometry::Rect;
    ///
    /// let rect = Rect::new(0.0, 0.0, 100.0, 50.0);
    /// assert_eq!(rect.top(), 50.0);
    /// assert_eq!(rect.right(), 100.0);
    /// ```
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    /// Create a rectangle from two corner points.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_compose::geometry::Rect;
    ///
    /// let rect = Rect::from_points(110.0, 70.0, 10.0, 20.0);
    /// assert_eq!(rect.x, 10.0);
    /// assert_eq!(rect.y, 20.0);
    /// assert_eq!(rect.width, 100.0);
    /// assert_eq!(rect.height, 50.0);
    /// ```
    pub fn from_points(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self::new(x0.min(x1), y0.min(y1), (x1 - x0).abs(), (y1 - y0).abs())
    }

    /// Get the left edge x-coordinate.
    pub fn left(&self) -> f64 {
        self.x
    }

    /// Get the right edge x-coordinate.
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Get the bottom edge y-coordinate.
    pub fn bottom(&self) -> f64 {
        self.y
    }

    /// Get the top edge y-coordinate.
    pub fn top(&self) -> f64 {
        self.y + self.height
    }

    /// Get the dimensions of the rectangle.
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Bounding box of both rectangles.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_compose::geometry::Rect;
    ///
    /// let r1 = Rect::new(0.0, 0.0, 50.0, 50.0);
    /// let r2 = Rect::new(25.0, 25.0, 50.0, 50.0);
    /// let union = r1.union(&r2);
    ///
    /// assert_eq!(union.right(), 75.0);
    /// assert_eq!(union.top(), 75.0);
    /// ```
    pub fn union(&self, other: &Rect) -> Rect {
        Rect::from_points(
            self.left().min(other.left()),
            self.bottom().min(other.bottom()),
            self.right().max(other.right()),
            self.top().max(other.top()),
        )
    }

    /// Check whether `other` lies inside this rectangle, up to [`EPSILON`].
    pub fn contains(&self, other: &Rect) -> bool {
        other.left() >= self.left() - EPSILON
            && other.right() <= self.right() + EPSILON
            && other.bottom() >= self.bottom() - EPSILON
            && other.top() <= self.top() + EPSILON
    }

    /// Shrink the rectangle by the given amounts on each side.
    pub fn inset(&self, top: f64, right: f64, bottom: f64, left: f64) -> Rect {
        Rect::new(
            self.x + left,
            self.y + bottom,
            self.width - left - right,
            self.height - top - bottom,
        )
    }
}

/// Horizontal placement of an element inside its available box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum HorizontalAlignment {
    /// Flush against the left edge
    #[default]
    Left,
    /// Centered
    Middle,
    /// Flush against the right edge
    Right,
}

/// Vertical placement of an element inside its available box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum VerticalAlignment {
    /// Flush against the top edge
    #[default]
    Top,
    /// Centered
    Middle,
    /// Flush against the bottom edge
    Bottom,
}

/// Place a box of `size` inside `available` according to the alignments.
///
/// Middle alignment truncates the centering offset toward zero.
///
/// # Examples
///
/// ```
/// use pdf_compose::geometry::{align, HorizontalAlignment, Rect, Size, VerticalAlignment};
///
/// let placed = align(
///     Rect::new(0.0, 0.0, 100.0, 100.0),
///     Size::new(25.0, 10.0),
///     HorizontalAlignment::Middle,
///     VerticalAlignment::Top,
/// );
/// assert_eq!(placed, Rect::new(37.0, 90.0, 25.0, 10.0));
/// ```
pub fn align(
    available: Rect,
    size: Size,
    horizontal: HorizontalAlignment,
    vertical: VerticalAlignment,
) -> Rect {
    let x = match horizontal {
        HorizontalAlignment::Left => available.x,
        HorizontalAlignment::Middle => available.x + ((available.width - size.width) / 2.0).trunc(),
        HorizontalAlignment::Right => available.x + (available.width - size.width),
    };
    let y = match vertical {
        VerticalAlignment::Bottom => available.y,
        VerticalAlignment::Middle => available.y + ((available.height - size.height) / 2.0).trunc(),
        VerticalAlignment::Top => available.y + (available.height - size.height),
    };
    Rect::new(x, y, size.width, size.height)
}
