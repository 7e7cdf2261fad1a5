use super::PointD;

/// Returns the minimum distance from `pt` to the segment from `a` to `b`.
#[must_use]
pub fn point_to_segment_dist(pt: &PointD, a: &PointD, b: &PointD) -> f64 {
    let ab = b - a;
    let len_sq = ab.norm_squared();
    if len_sq < 1e-20 {
        // Degenerate segment (zero length).
        return (pt - a).norm();
    }

    // Project onto the infinite line, clamp to the segment.
    let t = ((pt - a).dot(&ab) / len_sq).clamp(0.0, 1.0);
    (pt - (a + ab * t)).norm()
}

/// Returns the minimum distance from `pt` to any segment of `path`.
///
/// A closed path includes the segment from its last vertex back to the
/// first. An empty path is infinitely far away.
#[must_use]
pub fn point_to_path_dist(pt: &PointD, path: &[PointD], closed: bool) -> f64 {
    match path {
        [] => f64::INFINITY,
        [only] => (pt - only).norm(),
        _ => {
            let open = path
                .windows(2)
                .map(|w| point_to_segment_dist(pt, &w[0], &w[1]));
            let closing = closed.then(|| point_to_segment_dist(pt, &path[path.len() - 1], &path[0]));
            open.chain(closing).fold(f64::INFINITY, f64::min)
        }
    }
}
