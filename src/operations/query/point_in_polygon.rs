use crate::error::Result;
use crate::math::polygon_2d::cross_product;
use crate::math::scale::{precision_scale, scale_path_to_64, scale_point_to_64};
use crate::math::{Point64, PointD};

/// Classification of a point relative to a closed polygon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointInPolygonResult {
    IsInside,
    IsOutside,
    IsOn,
}

/// Classifies `pt` as inside, outside, or on the boundary of `polygon`.
///
/// Crossing-number test along a horizontal ray, using only coordinate
/// comparisons and the sign of an exact cross product. A polygon with fewer
/// than three vertices is always outside. Self-intersecting polygons are
/// classified by the even-odd rule.
///
/// # Algorithm
///
/// The walk starts at the first vertex off the query's horizontal line and
/// wraps around once. Runs of vertices on the same side of that line are
/// skipped; every edge that changes side is tested for a crossing left of
/// the query, and any vertex on the line is checked for a boundary touch.
#[must_use]
pub fn point_in_polygon(pt: Point64, polygon: &[Point64]) -> PointInPolygonResult {
    let n = polygon.len();
    if n < 3 {
        return PointInPolygonResult::IsOutside;
    }

    let Some(first) = polygon.iter().position(|v| v.y != pt.y) else {
        return classify_on_flat_polygon(pt, polygon);
    };

    let mut inside = false;
    let mut is_above = polygon[first].y < pt.y;
    let starting_above = is_above;
    let mut end = n;
    let mut curr = first + 1;

    loop {
        if curr == end {
            if end == first || first == 0 {
                break;
            }
            // Wrap around and finish with the vertices before `first`.
            end = first;
            curr = 0;
        }

        if is_above {
            while curr != end && polygon[curr].y < pt.y {
                curr += 1;
            }
        } else {
            while curr != end && polygon[curr].y > pt.y {
                curr += 1;
            }
        }
        if curr == end {
            continue;
        }

        let prev = polygon[if curr == 0 { n - 1 } else { curr - 1 }];
        let cur = polygon[curr];

        if cur.y == pt.y {
            if cur.x == pt.x || (prev.y == pt.y && ((pt.x < prev.x) != (pt.x < cur.x))) {
                return PointInPolygonResult::IsOn;
            }
            curr += 1;
            if curr == first {
                break;
            }
            continue;
        }

        if pt.x < cur.x && pt.x < prev.x {
            // Edge lies entirely right of the query.
        } else if pt.x > prev.x && pt.x > cur.x {
            inside = !inside;
        } else {
            let d = cross_product(prev, cur, pt);
            if d == 0 {
                return PointInPolygonResult::IsOn;
            }
            if (d < 0) == is_above {
                inside = !inside;
            }
        }
        is_above = !is_above;
        curr += 1;
    }

    // The edge entering `first` still changes side.
    if is_above != starting_above {
        let curr = if curr >= n { 0 } else { curr };
        let prev = polygon[if curr == 0 { n - 1 } else { curr - 1 }];
        let d = cross_product(prev, polygon[curr], pt);
        if d == 0 {
            return PointInPolygonResult::IsOn;
        }
        if (d < 0) == is_above {
            inside = !inside;
        }
    }

    if inside {
        PointInPolygonResult::IsInside
    } else {
        PointInPolygonResult::IsOutside
    }
}

/// Every vertex lies on the query's horizontal line: the polygon has no
/// interior, so the query is either on one of its edges or outside.
fn classify_on_flat_polygon(pt: Point64, polygon: &[Point64]) -> PointInPolygonResult {
    let mut prev = polygon[polygon.len() - 1];
    for &cur in polygon {
        if cur.x == pt.x || ((pt.x < prev.x) != (pt.x < cur.x)) {
            return PointInPolygonResult::IsOn;
        }
        prev = cur;
    }
    PointInPolygonResult::IsOutside
}

/// Classifies a floating point against a floating polygon.
///
/// Both are first scaled by `10^precision` onto the integer grid, so
/// classification is exact at that resolution.
///
/// # Errors
///
/// Returns `GeometryError::ParameterOutOfRange` if `precision` is outside `[-8, 8]`.
pub fn point_in_polygon_d(
    pt: &PointD,
    polygon: &[PointD],
    precision: i32,
) -> Result<PointInPolygonResult> {
    let scale = precision_scale(precision)?;
    Ok(point_in_polygon(
        scale_point_to_64(pt, scale),
        &scale_path_to_64(polygon, scale),
    ))
}
