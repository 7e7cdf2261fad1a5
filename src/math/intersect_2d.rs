use super::{PointD, Vector2, TOLERANCE};

/// Parametric 2D line-line intersection.
///
/// Given lines `p1 + t * d1` and `p2 + u * d2`, returns `(t, u)` if not parallel.
#[must_use]
pub fn line_line_intersect_2d(
    p1: &PointD,
    d1: &Vector2,
    p2: &PointD,
    d2: &Vector2,
) -> Option<(f64, f64)> {
    let cross = d1.perp(d2);
    if cross.abs() < TOLERANCE {
        return None;
    }
    let d = p2 - p1;
    let t = d.perp(d2) / cross;
    let u = d.perp(d1) / cross;
    Some((t, u))
}

/// Bounded segment-segment intersection in 2D.
///
/// Returns `(intersection_point, t, u)` where `t` and `u` are in `[0, 1]`.
/// Parallel and collinear segments report no intersection.
#[must_use]
pub fn segment_segment_intersect_2d(
    a0: &PointD,
    a1: &PointD,
    b0: &PointD,
    b1: &PointD,
) -> Option<(PointD, f64, f64)> {
    let da = a1 - a0;
    let db = b1 - b0;
    let (t, u) = line_line_intersect_2d(a0, &da, b0, &db)?;

    let eps = TOLERANCE;
    if t >= -eps && t <= 1.0 + eps && u >= -eps && u <= 1.0 + eps {
        let t = t.clamp(0.0, 1.0);
        Some((point_at(a0, &da, t), t, u.clamp(0.0, 1.0)))
    } else {
        None
    }
}

/// Linear interpolation: `origin + dir * t`.
#[must_use]
pub fn point_at(origin: &PointD, dir: &Vector2, t: f64) -> PointD {
    origin + dir * t
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn crossing_lines() {
        let (t, u) = line_line_intersect_2d(
            &PointD::new(0.0, 0.0),
            &Vector2::new(1.0, 0.0),
            &PointD::new(2.0, -1.0),
            &Vector2::new(0.0, 1.0),
        )
        .unwrap();
        assert_relative_eq!(t, 2.0);
        assert_relative_eq!(u, 1.0);
    }

    #[test]
    fn parallel_lines() {
        let hit = line_line_intersect_2d(
            &PointD::new(0.0, 0.0),
            &Vector2::new(1.0, 1.0),
            &PointD::new(0.0, 1.0),
            &Vector2::new(2.0, 2.0),
        );
        assert!(hit.is_none());
    }

    #[test]
    fn crossing_segments() {
        let (pt, t, u) = segment_segment_intersect_2d(
            &PointD::new(0.0, 0.0),
            &PointD::new(4.0, 4.0),
            &PointD::new(0.0, 4.0),
            &PointD::new(4.0, 0.0),
        )
        .unwrap();
        assert_relative_eq!(pt.x, 2.0);
        assert_relative_eq!(pt.y, 2.0);
        assert_relative_eq!(t, 0.5);
        assert_relative_eq!(u, 0.5);
    }

    #[test]
    fn disjoint_segments() {
        let hit = segment_segment_intersect_2d(
            &PointD::new(0.0, 0.0),
            &PointD::new(1.0, 0.0),
            &PointD::new(2.0, -1.0),
            &PointD::new(2.0, 1.0),
        );
        assert!(hit.is_none());
    }
}
