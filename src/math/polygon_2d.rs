use super::{Coord, Point64};

/// Exact cross product of the edges `a -> b` and `b -> c`.
///
/// `(b - a) x (c - b)`: positive when `a, b, c` turn counter-clockwise
/// (y-up), negative when clockwise, zero when collinear. Differences are
/// widened to `i128`, so the result is exact for coordinates within
/// [`MAX_COORD`](super::MAX_COORD).
#[must_use]
pub fn cross_product(a: Point64, b: Point64, c: Point64) -> i128 {
    let (ax, ay) = (i128::from(a.x), i128::from(a.y));
    let (bx, by) = (i128::from(b.x), i128::from(b.y));
    let (cx, cy) = (i128::from(c.x), i128::from(c.y));
    (bx - ax) * (cy - by) - (by - ay) * (cx - bx)
}

/// Returns `true` if `a, b, c` lie exactly on one line.
///
/// Coincident points count as collinear, so zero-length edges and spikes
/// (`a == c`) are both reported.
#[must_use]
pub fn is_collinear(a: Point64, b: Point64, c: Point64) -> bool {
    cross_product(a, b, c) == 0
}

/// Computes the signed area of a closed path (shoelace formula).
///
/// Positive for counter-clockwise in a y-up frame, negative for clockwise.
#[must_use]
pub fn area<T: Coord>(path: &[nalgebra::Point2<T>]) -> f64 {
    let n = path.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    let mut prev = &path[n - 1];
    for pt in path {
        let (px, py) = (prev.x.to_f64(), prev.y.to_f64());
        let (x, y) = (pt.x.to_f64(), pt.y.to_f64());
        sum += px * y - x * py;
        prev = pt;
    }
    sum * 0.5
}

/// Sums the signed areas of all paths.
#[must_use]
pub fn area_paths<T: Coord>(paths: &[Vec<nalgebra::Point2<T>>]) -> f64 {
    paths.iter().map(|p| area(p)).sum()
}
