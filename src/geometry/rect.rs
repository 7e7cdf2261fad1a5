use nalgebra::Point2;

use crate::math::Coord;

/// An axis-aligned rectangle given by its four bounds.
///
/// `top` is the smaller y bound and `bottom` the larger one, matching a
/// y-down screen frame; the predicates below only rely on `top <= bottom`.
/// `Rect::default()` is the canonical empty rect with all bounds zero. It
/// encloses the origin, so `is_empty()` is `false` for it; only inverted
/// bounds such as [`Rect::max_invalid`] report empty.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect<T> {
    pub left: T,
    pub top: T,
    pub right: T,
    pub bottom: T,
}

/// Integer-domain rectangle.
pub type Rect64 = Rect<i64>;

/// Floating-domain rectangle.
pub type RectD = Rect<f64>;

impl<T: Coord> Rect<T> {
    /// Creates a rect from its four bounds.
    #[must_use]
    pub fn new(left: T, top: T, right: T, bottom: T) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Returns the maximally invalid rect: the identity for min/max folding.
    ///
    /// Any absorbed point shrinks it to a valid rect.
    #[must_use]
    pub fn max_invalid() -> Self {
        Self::new(T::MAX, T::MAX, T::LOWEST, T::LOWEST)
    }

    /// Returns `true` if the rect encloses no point.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.left > self.right || self.top > self.bottom
    }

    /// Horizontal extent.
    #[must_use]
    pub fn width(&self) -> T {
        self.right - self.left
    }

    /// Vertical extent.
    #[must_use]
    pub fn height(&self) -> T {
        self.bottom - self.top
    }

    /// Grows the rect to enclose `pt`.
    pub fn absorb(&mut self, pt: &Point2<T>) {
        if pt.x < self.left {
            self.left = pt.x;
        }
        if pt.x > self.right {
            self.right = pt.x;
        }
        if pt.y < self.top {
            self.top = pt.y;
        }
        if pt.y > self.bottom {
            self.bottom = pt.y;
        }
    }

    /// Returns `true` if `pt` lies inside or on the border of the rect.
    #[must_use]
    pub fn contains(&self, pt: &Point2<T>) -> bool {
        pt.x >= self.left && pt.x <= self.right && pt.y >= self.top && pt.y <= self.bottom
    }

    /// Smallest rect enclosing both `self` and `other`. Empty operands are ignored.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }
        let pick_min = |a: T, b: T| if b < a { b } else { a };
        let pick_max = |a: T, b: T| if b > a { b } else { a };
        Self::new(
            pick_min(self.left, other.left),
            pick_min(self.top, other.top),
            pick_max(self.right, other.right),
            pick_max(self.bottom, other.bottom),
        )
    }

    /// Returns the rect's corners as a closed path, clockwise in a y-down frame.
    #[must_use]
    pub fn as_path(&self) -> Vec<Point2<T>> {
        vec![
            Point2::new(self.left, self.top),
            Point2::new(self.right, self.top),
            Point2::new(self.right, self.bottom),
            Point2::new(self.left, self.bottom),
        ]
    }
}
