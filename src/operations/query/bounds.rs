use nalgebra::Point2;

use crate::geometry::Rect;
use crate::math::Coord;

/// Computes the bounding rectangle of a path.
///
/// Returns `Rect::default()` (all zero) for an empty path, never the
/// maximally invalid accumulator. That rect is not `is_empty()` and equals
/// the bounds of a lone point at the origin, so callers that must tell the
/// two apart check whether the input has any points.
#[must_use]
pub fn bounds<T: Coord>(path: &[Point2<T>]) -> Rect<T> {
    finish(path.iter().fold(Rect::max_invalid(), absorb))
}

/// Computes the bounding rectangle of every point in a collection of paths.
#[must_use]
pub fn bounds_paths<T: Coord>(paths: &[Vec<Point2<T>>]) -> Rect<T> {
    finish(paths.iter().flatten().fold(Rect::max_invalid(), absorb))
}

fn absorb<T: Coord>(mut rec: Rect<T>, pt: &Point2<T>) -> Rect<T> {
    rec.absorb(pt);
    rec
}

fn finish<T: Coord>(rec: Rect<T>) -> Rect<T> {
    if rec.is_empty() {
        Rect::new(T::ZERO, T::ZERO, T::ZERO, T::ZERO)
    } else {
        rec
    }
}
