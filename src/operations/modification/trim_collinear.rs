use crate::error::Result;
use crate::math::polygon_2d::is_collinear;
use crate::math::scale::{precision_scale, scale_path_to_64, scale_path_to_d};
use crate::math::{Path64, PathD, Point64, PointD};

/// Removes every vertex that is exactly collinear with its neighbours.
///
/// Removal cascades: dropping a vertex can leave its kept predecessor
/// collinear with the new neighbours, in which case the predecessor goes too.
/// Coincident vertices and spikes count as collinear.
///
/// - Open paths keep both end points. A two-point open path is returned
///   unchanged unless its points coincide, in which case it is empty.
/// - Closed paths are also trimmed across the wrap-around. A closed result
///   with fewer than three vertices is empty.
///
/// The result is a subsequence of `path`, and trimming it again changes nothing.
#[must_use]
pub fn trim_collinear(path: &[Point64], is_open: bool) -> Path64 {
    let len = path.len();
    if len < 3 {
        if !is_open || len < 2 || path[0] == path[1] {
            return Vec::new();
        }
        return path.to_vec();
    }

    let mut start = 0;
    let mut stop = len - 1;
    if !is_open {
        // Move both ends off any collinear run that straddles the wrap.
        while start != stop && is_collinear(path[stop], path[start], path[start + 1]) {
            start += 1;
        }
        while start != stop && is_collinear(path[stop - 1], path[stop], path[start]) {
            stop -= 1;
        }
        if start == stop {
            return Vec::new();
        }
    }

    let mut dst: Path64 = Vec::with_capacity(stop - start + 1);
    dst.push(path[start]);
    for i in start + 1..stop {
        let next = path[i + 1];
        if !is_collinear(dst[dst.len() - 1], path[i], next) {
            dst.push(path[i]);
            continue;
        }
        while dst.len() > 1 && is_collinear(dst[dst.len() - 2], dst[dst.len() - 1], next) {
            dst.pop();
        }
    }

    if is_open {
        dst.push(path[stop]);
        if dst.len() == 2 && dst[0] == dst[1] {
            return Vec::new();
        }
        return dst;
    }

    if !is_collinear(dst[dst.len() - 1], path[stop], dst[0]) {
        dst.push(path[stop]);
    }
    close_wrap(&mut dst);
    if dst.len() < 3 {
        return Vec::new();
    }
    dst
}

/// Drops vertices at either end of a closed path while the triples that span
/// the wrap-around are collinear.
fn close_wrap(dst: &mut Path64) {
    while dst.len() >= 3 {
        let n = dst.len();
        if is_collinear(dst[n - 2], dst[n - 1], dst[0]) {
            dst.pop();
        } else if is_collinear(dst[n - 1], dst[0], dst[1]) {
            dst.remove(0);
        } else {
            break;
        }
    }
}

/// Trims collinear vertices from a floating path.
///
/// The path is scaled by `10^precision` onto the integer grid, trimmed
/// exactly there, and scaled back. Collinearity is therefore judged at
/// that resolution.
///
/// # Errors
///
/// Returns `GeometryError::ParameterOutOfRange` if `precision` is outside `[-8, 8]`.
pub fn trim_collinear_d(path: &[PointD], precision: i32, is_open: bool) -> Result<PathD> {
    let scale = precision_scale(precision)?;
    let trimmed = trim_collinear(&scale_path_to_64(path, scale), is_open);
    Ok(scale_path_to_d(&trimmed, 1.0 / scale))
}
