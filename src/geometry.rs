//! Geometric primitives for layout analysis.
//!
//! Issue locations are reported as the union bounding box of the offending
//! elements, so the only operations the analyzers need are edge accessors
//! and rectangle union.

/// A 2D point in page-viewport space (y measured from the top of the page).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    /// X coordinate
    pub x: f32,
    /// Y coordinate
    pub y: f32,
}

impl Point {
    /// Create a new point.
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle in page-viewport space.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Rect {
    /// X coordinate of the top-left corner
    pub x: f32,
    /// Y coordinate of the top-left corner
    pub y: f32,
    /// Width, >= 0
    pub width: f32,
    /// Height, >= 0
    pub height: f32,
}

impl Rect {
    /// Create a new rectangle from position and dimensions.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_qc::geometry::Rect;
    ///
    /// let rect = Rect::new(10.0, 20.0, 100.0, 50.0);
    /// assert_eq!(rect.right(), 110.0);
    /// assert_eq!(rect.bottom(), 70.0);
    /// ```
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rectangle from two corner points.
    pub fn from_points(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self {
            x: x0,
            y: y0,
            width: x1 - x0,
            height: y1 - y0,
        }
    }

    /// Left edge x-coordinate.
    pub fn left(&self) -> f32 {
        self.x
    }

    /// Right edge x-coordinate.
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Top edge y-coordinate.
    pub fn top(&self) -> f32 {
        self.y
    }

    /// Bottom edge y-coordinate.
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Center point of the rectangle.
    pub fn center(&self) -> Point {
        Point {
            x: self.x + self.width / 2.0,
            y: self.y + self.height / 2.0,
        }
    }

    /// Smallest rectangle containing both `self` and `other`.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_qc::geometry::Rect;
    ///
    /// let a = Rect::new(0.0, 0.0, 50.0, 50.0);
    /// let b = Rect::new(25.0, 25.0, 50.0, 50.0);
    /// let u = a.union(&b);
    /// assert_eq!(u.right(), 75.0);
    /// assert_eq!(u.bottom(), 75.0);
    /// ```
    pub fn union(&self, other: &Rect) -> Rect {
        let x0 = self.left().min(other.left());
        let y0 = self.top().min(other.top());
        let x1 = self.right().max(other.right());
        let y1 = self.bottom().max(other.bottom());
        Rect::from_points(x0, y0, x1, y1)
    }
}

/// Union bounding box of a non-empty sequence of rectangles.
///
/// Returns `None` for an empty input; issue locations are only ever built
/// from at least one element.
pub fn union_all<'a, I>(rects: I) -> Option<Rect>
where
    I: IntoIterator<Item = &'a Rect>,
{
    let mut iter = rects.into_iter();
    let first = *iter.next()?;
    Some(iter.fold(first, |acc, r| acc.union(r)))
}
