use nalgebra::Point2;

use crate::math::{Coord, Path, Paths};

/// Translates every point of a path by `(dx, dy)`.
#[must_use]
pub fn translate_path<T: Coord>(path: &[Point2<T>], dx: T, dy: T) -> Path<T> {
    path.iter()
        .map(|pt| Point2::new(pt.x + dx, pt.y + dy))
        .collect()
}

/// Translates every path of a collection by `(dx, dy)`.
#[must_use]
pub fn translate_paths<T: Coord>(paths: &[Path<T>], dx: T, dy: T) -> Paths<T> {
    paths.iter().map(|p| translate_path(p, dx, dy)).collect()
}
