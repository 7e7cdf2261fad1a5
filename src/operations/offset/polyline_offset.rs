use std::f64::consts::{PI, TAU};

use nalgebra::Rotation2;

use crate::error::{OperationError, Result};
use crate::math::distance_2d::point_to_path_dist;
use crate::math::intersect_2d::{line_line_intersect_2d, point_at, segment_segment_intersect_2d};
use crate::math::polygon_2d::area;
use crate::math::scale::{scale_path_to_64, scale_path_to_d};
use crate::math::{Path64, PathD, Paths64, PointD, Vector2, TOLERANCE};

use super::{EndType, JoinType, OffsetEngine};

/// When `cos(angle between consecutive segments) < this`, a mitered corner
/// gets a flat cap instead. Only near-180° reversals (> ~169°) qualify.
const FLAT_CAP_COS: f64 = -0.98;

/// Automatic arc tolerance as a fraction of `|delta|`.
const ARC_TOLERANCE_FACTOR: f64 = 1.0 / 500.0;

/// Smallest automatic arc tolerance, in integer units.
const MIN_ARC_TOLERANCE: f64 = 0.25;

/// Offsets below this magnitude cannot move a vertex on the integer grid.
const MIN_DELTA: f64 = 0.5;

/// Relative slack allowed when checking that offset vertices keep their
/// distance from the source path.
const CLEARANCE_SLACK: f64 = 1e-7;

#[derive(Debug)]
struct OffsetGroup {
    paths: Paths64,
    join_type: JoinType,
    end_type: EndType,
}

/// Default [`OffsetEngine`]: offsets each path edge by edge and removes the
/// self-intersection loops the raw offset produces.
///
/// # Algorithm
///
/// 1. **Phase A**: Offset each segment perpendicular to its direction.
/// 2. **Phase B**: Join consecutive offset segments at each vertex. Corners
///    on the offset side get the group's join; inner corners are mitered,
///    and near-reversals get a flat cap instead of a divergent miter.
/// 3. **Phase C**: Find self-intersections, split the outline there, and keep
///    the loop whose winding matches the input.
///
/// Open paths are outlined on both sides and capped according to their end
/// type. Results are rounded to the integer grid. Overlapping results of
/// different paths are not merged.
///
/// # Sign Convention
///
/// Positive deltas grow closed polygons and shrink holes. The orientation of
/// the outermost path in a group (the one holding its lowest vertex) decides
/// which winding counts as a hole. Open paths are always offset by `|delta|`.
#[derive(Debug)]
pub struct PolylineOffset {
    miter_limit: f64,
    arc_tolerance: f64,
    groups: Vec<OffsetGroup>,
}

impl PolylineOffset {
    /// Sets the maximum distance, in integer units, that a rounded join may
    /// deviate from the true arc. Non-positive values select the automatic
    /// tolerance of `|delta| / 500`, but never below `0.25`.
    #[must_use]
    pub fn with_arc_tolerance(mut self, arc_tolerance: f64) -> Self {
        self.arc_tolerance = arc_tolerance;
        self
    }

    /// Removes every added path.
    pub fn clear(&mut self) {
        self.groups.clear();
    }
}

impl OffsetEngine for PolylineOffset {
    fn new(miter_limit: f64) -> Self {
        Self {
            miter_limit,
            arc_tolerance: 0.0,
            groups: Vec::new(),
        }
    }

    fn add_paths(&mut self, paths: &[Path64], join_type: JoinType, end_type: EndType) {
        self.groups.push(OffsetGroup {
            paths: paths.iter().filter(|p| !p.is_empty()).cloned().collect(),
            join_type,
            end_type,
        });
    }

    fn execute(&mut self, delta: f64) -> Result<Paths64> {
        if !delta.is_finite() {
            return Err(
                OperationError::InvalidInput(format!("offset delta {delta} is not finite")).into(),
            );
        }
        if !self.miter_limit.is_finite() || self.miter_limit <= 0.0 {
            return Err(OperationError::InvalidInput(format!(
                "miter limit {} must be positive",
                self.miter_limit
            ))
            .into());
        }
        tracing::debug!(groups = self.groups.len(), delta, "offsetting paths");

        if delta.abs() < MIN_DELTA {
            return Ok(self.groups.iter().flat_map(|g| g.paths.iter().cloned()).collect());
        }

        let mut result = Vec::new();
        for group in &self.groups {
            let offsetter = Offsetter::new(self, group.join_type, delta.abs());
            for path in offsetter.offset_group(group, delta) {
                let mut rounded = scale_path_to_64(&path, 1.0);
                rounded.dedup();
                if rounded.len() > 1 && rounded.first() == rounded.last() {
                    rounded.pop();
                }
                if rounded.len() >= 3 {
                    result.push(rounded);
                }
            }
        }
        Ok(result)
    }
}

/// Per-group offset parameters.
struct Offsetter {
    join_type: JoinType,
    abs_delta: f64,
    miter_limit: f64,
    steps_per_rad: f64,
}

impl Offsetter {
    fn new(engine: &PolylineOffset, join_type: JoinType, abs_delta: f64) -> Self {
        let arc_tolerance = if engine.arc_tolerance > 0.0 {
            engine.arc_tolerance.min(abs_delta)
        } else {
            (abs_delta * ARC_TOLERANCE_FACTOR)
                .max(MIN_ARC_TOLERANCE)
                .min(abs_delta)
        };
        let steps_per_360 = (PI / (1.0 - arc_tolerance / abs_delta).acos()).min(abs_delta * PI);
        Self {
            join_type,
            abs_delta,
            miter_limit: engine.miter_limit.max(1.0),
            steps_per_rad: steps_per_360.max(1.0) / TAU,
        }
    }

    fn offset_group(&self, group: &OffsetGroup, delta: f64) -> Vec<PathD> {
        let paths: Vec<PathD> = group
            .paths
            .iter()
            .map(|p| strip_duplicates(&scale_path_to_d(p, 1.0)))
            .collect();
        let end_type = group.end_type;
        let mut result = Vec::with_capacity(paths.len());

        match end_type {
            EndType::Polygon => {
                let d_left = if is_reversed(&paths) { delta } else { -delta };
                for path in &paths {
                    let offset = if path.len() == 1 || area(path).abs() < TOLERANCE {
                        // No interior: only an outward offset leaves anything.
                        if delta > 0.0 {
                            self.offset_flat(&extreme_points(path), cap_for_join(self.join_type))
                        } else {
                            None
                        }
                    } else {
                        self.offset_polygon(path, d_left)
                    };
                    self.keep(&mut result, offset, path);
                }
            }
            EndType::Joined => {
                for path in &paths {
                    let path_area = area(path);
                    if path.len() == 1 || path_area.abs() < TOLERANCE {
                        let offset = self.offset_flat(&extreme_points(path), cap_for_join(self.join_type));
                        self.keep(&mut result, offset, path);
                        continue;
                    }
                    let ccw: PathD = if path_area < 0.0 {
                        path.iter().rev().copied().collect()
                    } else {
                        path.clone()
                    };
                    let outer = self.offset_polygon(&ccw, -self.abs_delta);
                    self.keep(&mut result, outer, path);
                    let inner = self.offset_polygon(&ccw, self.abs_delta).map(|mut hole| {
                        hole.reverse();
                        hole
                    });
                    self.keep(&mut result, inner, path);
                }
            }
            EndType::Butt | EndType::Square | EndType::Round => {
                for path in &paths {
                    let offset = self.offset_flat(path, end_type);
                    self.keep(&mut result, offset, path);
                }
            }
        }
        result
    }

    fn keep(&self, result: &mut Vec<PathD>, offset: Option<PathD>, path: &[PointD]) {
        match offset {
            Some(p) => result.push(p),
            None => tracing::trace!(
                vertices = path.len(),
                delta = self.abs_delta,
                "offset path collapsed"
            ),
        }
    }

    /// Offsets a path with no interior (one point, or collinear vertices) as
    /// an open path with the given cap.
    fn offset_flat(&self, path: &[PointD], cap: EndType) -> Option<PathD> {
        match path {
            [] => None,
            [pt] => self.point_shape(*pt, cap),
            _ => self.offset_open(path, cap),
        }
    }

    /// Offsets a closed polygon to its left by `d_left`.
    fn offset_polygon(&self, path: &[PointD], d_left: f64) -> Option<PathD> {
        let n = path.len();

        // Phase A: segment directions.
        let mut directions = Vec::with_capacity(n);
        for i in 0..n {
            directions.push(segment_direction(&path[i], &path[(i + 1) % n])?);
        }

        // Phase B: raw outline.
        let mut raw = Vec::with_capacity(n * 2);
        for i in 0..n {
            let prev = if i == 0 { n - 1 } else { i - 1 };
            self.push_join(&mut raw, path[i], directions[prev], directions[i], d_left);
        }

        // Phase C: remove self-intersection loops.
        let original_area = area(path);
        let winding_sign = original_area.signum();
        let trimmed = trim_closed_loops(&raw, winding_sign);
        if trimmed.len() < 3 {
            return None;
        }

        let result_area = area(&trimmed);
        if result_area * winding_sign <= 0.0 {
            return None;
        }
        // Inward offsets must shrink; growth means the offset passed through
        // the center.
        let is_inward = original_area * d_left > 0.0;
        if is_inward && result_area.abs() > original_area.abs() {
            return None;
        }
        // Every vertex of a true offset keeps its distance from the path.
        let clearance = self.abs_delta - self.abs_delta.max(1.0) * CLEARANCE_SLACK;
        if trimmed.iter().any(|pt| point_to_path_dist(pt, path, true) < clearance) {
            return None;
        }
        Some(trimmed)
    }

    /// Outlines both sides of an open path and caps its ends.
    fn offset_open(&self, path: &[PointD], cap: EndType) -> Option<PathD> {
        let n = path.len();
        let d = self.abs_delta;
        let mut points = path.to_vec();
        if cap == EndType::Square {
            let first = segment_direction(&path[0], &path[1])?;
            let last = segment_direction(&path[n - 2], &path[n - 1])?;
            points[0] -= first * d;
            points[n - 1] += last * d;
        }

        // Forward offset: left side of the path at +|d|.
        let forward = self.one_side(&points, d)?;

        // Backward offset: reverse the path, left side at +|d|.
        // Reversals make the backward side retrace points the forward side
        // already emitted; filter them so no collinear overlapping edges
        // reach the trimmer.
        let reversed: PathD = points.iter().rev().copied().collect();
        let backward = self.one_side(&reversed, d)?;
        let dup_tol_sq = TOLERANCE * TOLERANCE * 1e8;
        let filtered_backward = backward.iter().filter(|bp| {
            !forward
                .iter()
                .any(|fp| (*bp - fp).norm_squared() < dup_tol_sq)
        });

        let mut combined = forward.clone();
        if cap == EndType::Round {
            // Sweep clockwise from the left side round the tip to the right.
            let tip = points[n - 1];
            self.push_arc(&mut combined, tip, forward[forward.len() - 1] - tip, -PI);
        }
        combined.extend(filtered_backward);
        if cap == EndType::Round {
            let tail = points[0];
            self.push_arc(&mut combined, tail, backward[backward.len() - 1] - tail, -PI);
        }
        if combined.len() < 3 {
            return None;
        }

        // Trim self-intersections using the outline's own winding.
        let winding = area(&combined).signum();
        let sign = if winding.abs() < 0.5 { 1.0 } else { winding };
        let mut trimmed = trim_closed_loops(&combined, sign);
        if trimmed.len() < 3 {
            return None;
        }
        if area(&trimmed) < 0.0 {
            trimmed.reverse();
        }
        Some(rotate_to_canonical_start(&trimmed))
    }

    /// Builds a one-sided offset of an open path (Phase A + B).
    fn one_side(&self, points: &[PointD], distance: f64) -> Option<PathD> {
        let n = points.len();
        let mut directions = Vec::with_capacity(n - 1);
        for i in 0..n - 1 {
            directions.push(segment_direction(&points[i], &points[i + 1])?);
        }

        let mut raw = Vec::with_capacity(n * 2);
        raw.push(points[0] + left_normal(&directions[0]) * distance);
        for i in 1..n - 1 {
            self.push_join(&mut raw, points[i], directions[i - 1], directions[i], distance);
        }
        raw.push(points[n - 1] + left_normal(&directions[n - 2]) * distance);
        Some(raw)
    }

    /// Shape left by offsetting a single point outwards.
    fn point_shape(&self, center: PointD, cap: EndType) -> Option<PathD> {
        let r = self.abs_delta;
        match cap {
            EndType::Round => {
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                let steps = (TAU * self.steps_per_rad).ceil().max(3.0) as usize;
                #[allow(clippy::cast_precision_loss)]
                let step = TAU / steps as f64;
                let radius = Vector2::new(r, 0.0);
                Some(
                    (0..steps)
                        .map(|k| {
                            #[allow(clippy::cast_precision_loss)]
                            let rotation = Rotation2::new(step * k as f64);
                            center + rotation * radius
                        })
                        .collect(),
                )
            }
            EndType::Square => Some(vec![
                PointD::new(center.x - r, center.y - r),
                PointD::new(center.x + r, center.y - r),
                PointD::new(center.x + r, center.y + r),
                PointD::new(center.x - r, center.y + r),
            ]),
            EndType::Polygon | EndType::Joined | EndType::Butt => None,
        }
    }

    /// Pushes the corner point(s) joining two offset segments at `vertex`.
    fn push_join(
        &self,
        raw: &mut PathD,
        vertex: PointD,
        dir_prev: Vector2,
        dir_next: Vector2,
        distance: f64,
    ) {
        let n1 = left_normal(&dir_prev) * distance;
        let n2 = left_normal(&dir_next) * distance;
        let p1 = vertex + n1;
        let p2 = vertex + n2;
        let cross = dir_prev.perp(&dir_next);
        let dot = dir_prev.dot(&dir_next);

        if cross.abs() < TOLERANCE && dot > 0.0 {
            raw.push(p1);
            return;
        }

        // A reversal is on the outside for either side.
        let is_convex = cross.abs() < TOLERANCE || cross * distance < 0.0;
        if !is_convex {
            self.push_miter(raw, vertex, (p1, dir_prev), (p2, dir_next), dot);
            return;
        }

        match self.join_type {
            JoinType::Miter => self.push_miter(raw, vertex, (p1, dir_prev), (p2, dir_next), dot),
            JoinType::Square => self.push_square(raw, vertex, (p1, dir_prev), (p2, dir_next), n1 + n2),
            JoinType::Round => {
                // Convex corners turn away from the offset side.
                let angle = cross.abs().atan2(dot) * -distance.signum();
                raw.push(p1);
                self.push_arc(raw, vertex, n1, angle);
                raw.push(p2);
            }
        }
    }

    /// Miter corner: a single point where the offset lines meet, or a bevel
    /// (two points) when that point lies beyond the miter limit. Near-reversals
    /// get a flat cap.
    fn push_miter(
        &self,
        raw: &mut PathD,
        vertex: PointD,
        (p1, dir_prev): (PointD, Vector2),
        (p2, dir_next): (PointD, Vector2),
        dot: f64,
    ) {
        if dot < FLAT_CAP_COS {
            raw.push(p1);
            raw.push(p2);
            return;
        }
        let Some((t, _)) = line_line_intersect_2d(&p1, &dir_prev, &p2, &dir_next) else {
            raw.push(p1);
            return;
        };
        let corner = point_at(&p1, &dir_prev, t);
        let limit = self.miter_limit * self.abs_delta;
        if (corner - vertex).norm_squared() > limit * limit {
            raw.push(p1);
            raw.push(p2);
        } else {
            raw.push(corner);
        }
    }

    /// Square corner: cut perpendicular to the corner's bisector at
    /// `|delta|` from the vertex.
    fn push_square(
        &self,
        raw: &mut PathD,
        vertex: PointD,
        (p1, dir_prev): (PointD, Vector2),
        (p2, dir_next): (PointD, Vector2),
        normal_sum: Vector2,
    ) {
        let bisector = normal_sum.try_normalize(TOLERANCE).unwrap_or(dir_prev);
        let edge_point = vertex + bisector * self.abs_delta;
        let edge_dir = left_normal(&bisector);
        let a = line_line_intersect_2d(&p1, &dir_prev, &edge_point, &edge_dir);
        let b = line_line_intersect_2d(&p2, &dir_next, &edge_point, &edge_dir);
        if let (Some((ta, _)), Some((tb, _))) = (a, b) {
            raw.push(point_at(&p1, &dir_prev, ta));
            raw.push(point_at(&p2, &dir_next, tb));
        } else {
            raw.push(p1);
            raw.push(p2);
        }
    }

    /// Pushes the interior points of an arc around `center`, starting from
    /// `center + from` and sweeping `angle` radians (counter-clockwise when
    /// positive). The end point is not pushed.
    fn push_arc(&self, raw: &mut PathD, center: PointD, from: Vector2, angle: f64) {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let steps = (angle.abs() * self.steps_per_rad).ceil().max(1.0) as usize;
        #[allow(clippy::cast_precision_loss)]
        let step = angle / steps as f64;
        for k in 1..steps {
            #[allow(clippy::cast_precision_loss)]
            let rotation = Rotation2::new(step * k as f64);
            raw.push(center + rotation * from);
        }
    }
}

/// Caps used for paths with no interior, chosen by join type.
fn cap_for_join(join_type: JoinType) -> EndType {
    match join_type {
        JoinType::Round => EndType::Round,
        JoinType::Square => EndType::Square,
        JoinType::Miter => EndType::Butt,
    }
}

/// Drops consecutive duplicate vertices, including a closing duplicate of
/// the first vertex.
fn strip_duplicates(path: &[PointD]) -> PathD {
    let mut result = path.to_vec();
    result.dedup();
    if result.len() > 1 && result.first() == result.last() {
        result.pop();
    }
    result
}

/// Reduces a path whose vertices all lie on one line to its two end points,
/// or to a single point when they coincide.
fn extreme_points(path: &[PointD]) -> PathD {
    let lexicographic = |a: &&PointD, b: &&PointD| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y));
    match (path.iter().min_by(lexicographic), path.iter().max_by(lexicographic)) {
        (Some(lo), Some(hi)) if lo == hi => vec![*lo],
        (Some(lo), Some(hi)) => vec![*lo, *hi],
        _ => Vec::new(),
    }
}

/// Returns `true` when the outermost closed path of a group winds clockwise.
///
/// The path holding the lowest vertex (smallest `y`, then smallest `x`)
/// cannot be a hole.
fn is_reversed(paths: &[PathD]) -> bool {
    let mut lowest: Option<(usize, PointD)> = None;
    for (i, path) in paths.iter().enumerate() {
        if path.len() < 3 {
            continue;
        }
        for pt in path {
            let is_lower = match lowest {
                None => true,
                Some((_, low)) => pt.y < low.y || (pt.y <= low.y && pt.x < low.x),
            };
            if is_lower {
                lowest = Some((i, *pt));
            }
        }
    }
    lowest.is_some_and(|(i, _)| area(&paths[i]) < 0.0)
}

/// Computes the normalized direction from point `a` to point `b`.
fn segment_direction(a: &PointD, b: &PointD) -> Option<Vector2> {
    (b - a).try_normalize(TOLERANCE)
}

/// Returns the left-pointing normal of a direction vector.
fn left_normal(dir: &Vector2) -> Vector2 {
    Vector2::new(-dir.y, dir.x)
}

/// Checks whether segments i and j are adjacent in a closed polyline.
fn are_adjacent(i: usize, j: usize, n: usize) -> bool {
    let diff = i.abs_diff(j);
    diff == 1 || diff == n - 1
}

/// Finds the first self-intersection between non-adjacent segments in a closed polygon.
///
/// Skips endpoint-to-endpoint touches (both `t` and `u` near 0 or 1) which
/// occur when an outline revisits the same point at non-adjacent vertex
/// positions. Only genuine crossings are reported.
///
/// Returns `(i, j, intersection_point)` where `i < j` are segment indices.
fn find_first_self_intersection(points: &[PointD]) -> Option<(usize, usize, PointD)> {
    let n = points.len();
    if n < 4 {
        return None;
    }
    let eps = TOLERANCE * 100.0;
    for i in 0..n {
        let i_next = (i + 1) % n;
        for j in (i + 2)..n {
            if are_adjacent(i, j, n) {
                continue;
            }
            let j_next = (j + 1) % n;
            if let Some((pt, t, u)) =
                segment_segment_intersect_2d(&points[i], &points[i_next], &points[j], &points[j_next])
            {
                let t_at_end = t < eps || t > 1.0 - eps;
                let u_at_end = u < eps || u > 1.0 - eps;
                if t_at_end && u_at_end {
                    continue;
                }
                return Some((i, j, pt));
            }
        }
    }
    None
}

/// Splits a closed polygon at the intersection of segments `i` and `j` into two loops.
///
/// Assumes `i < j`:
/// - loop A: `[intersection, P(i+1), ..., P(j)]`
/// - loop B: `[intersection, P(j+1), ..., P(i)]` (wrapping around)
fn split_at_intersection(
    points: &[PointD],
    seg_i: usize,
    seg_j: usize,
    intersection: PointD,
) -> (PathD, PathD) {
    let n = points.len();

    let mut a = Vec::with_capacity(seg_j - seg_i + 1);
    a.push(intersection);
    a.extend_from_slice(&points[(seg_i + 1)..=seg_j]);

    let mut b = Vec::with_capacity(n - (seg_j - seg_i) + 1);
    b.push(intersection);
    let mut idx = (seg_j + 1) % n;
    loop {
        b.push(points[idx]);
        if idx == seg_i {
            break;
        }
        idx = (idx + 1) % n;
    }

    (a, b)
}

/// Removes consecutive near-duplicates and collinear (on-edge) vertices
/// from a closed polygon.
///
/// Splits that land on existing vertices leave both kinds behind.
fn clean_polygon(points: &[PointD]) -> PathD {
    if points.len() < 3 {
        return points.to_vec();
    }

    let tol_sq = TOLERANCE * TOLERANCE * 100.0;
    let mut deduped: PathD = Vec::with_capacity(points.len());
    for &pt in points {
        if deduped.last().is_some_and(|last| (pt - last).norm_squared() < tol_sq) {
            continue;
        }
        deduped.push(pt);
    }
    if deduped.len() > 1 && (deduped[deduped.len() - 1] - deduped[0]).norm_squared() < tol_sq {
        deduped.pop();
    }
    if deduped.len() < 3 {
        return deduped;
    }

    let n = deduped.len();
    let mut cleaned = Vec::with_capacity(n);
    for i in 0..n {
        let prev = deduped[if i == 0 { n - 1 } else { i - 1 }];
        let next = deduped[(i + 1) % n];
        let cross = (deduped[i] - prev).perp(&(next - deduped[i]));
        if cross.abs() >= TOLERANCE {
            cleaned.push(deduped[i]);
        }
    }

    // Never reduce below 3 vertices.
    if cleaned.len() < 3 {
        return deduped;
    }
    cleaned
}

/// Recursively removes self-intersection loops from a closed polygon.
///
/// At each self-intersection, splits into two loops, trims both, then keeps
/// the one whose winding matches `winding_sign`. Junk loops from collapsed
/// features wind oppositely and are discarded. Each split strictly reduces
/// the vertex count.
fn trim_closed_loops(points: &[PointD], winding_sign: f64) -> PathD {
    let pts = clean_polygon(points);
    if pts.len() < 4 {
        return pts;
    }
    let Some((i, j, pt)) = find_first_self_intersection(&pts) else {
        return pts;
    };
    let (a, b) = split_at_intersection(&pts, i, j, pt);
    let trimmed_a = trim_closed_loops(&a, winding_sign);
    let trimmed_b = trim_closed_loops(&b, winding_sign);
    let area_a = area(&trimmed_a);
    let area_b = area(&trimmed_b);
    let a_correct = area_a * winding_sign > 0.0;
    let b_correct = area_b * winding_sign > 0.0;
    match (a_correct, b_correct) {
        (true, false) => trimmed_a,
        (false, true) => trimmed_b,
        // Both match or neither: keep the larger one.
        _ if area_a.abs() >= area_b.abs() => trimmed_a,
        _ => trimmed_b,
    }
}

/// Rotates a closed polygon so it starts at the leftmost vertex (smallest x),
/// breaking ties by smallest y.
fn rotate_to_canonical_start(points: &[PointD]) -> PathD {
    let mut best = 0;
    for (i, pt) in points.iter().enumerate().skip(1) {
        let b = &points[best];
        if pt.x < b.x - TOLERANCE || ((pt.x - b.x).abs() < TOLERANCE && pt.y < b.y) {
            best = i;
        }
    }
    let mut rotated = Vec::with_capacity(points.len());
    rotated.extend_from_slice(&points[best..]);
    rotated.extend_from_slice(&points[..best]);
    rotated
}
