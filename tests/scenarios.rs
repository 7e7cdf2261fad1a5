#![allow(clippy::unwrap_used)]

use std::cell::RefCell;

use approx::assert_relative_eq;
use polykit::error::{GeometryError, OperationError};
use polykit::geometry::{poly_tree_to_paths, PolyTree, Rect64, RectD};
use polykit::math::polygon_2d::area;
use polykit::math::{Path64, Paths64, Point64, PointD};
use polykit::operations::boolean::{
    difference, intersect, union_subjects, BooleanOp, ClipEngine, ClipType, FillRule,
};
use polykit::operations::creation::{make_path, make_path_d};
use polykit::operations::modification::trim_collinear;
use polykit::operations::offset::{
    inflate_paths, inflate_paths_d, EndType, JoinType, PolylineOffset, DEFAULT_MITER_LIMIT,
    DEFAULT_PRECISION,
};
use polykit::operations::query::{
    bounds, bounds_paths, point_in_polygon, point_in_polygon_d, PointInPolygonResult,
};
use polykit::operations::transform::translate_paths;
use polykit::PolykitError;

thread_local! {
    static CALLS: RefCell<Vec<String>> = const { RefCell::new(Vec::new()) };
}

fn record(call: String) {
    CALLS.with(|c| c.borrow_mut().push(call));
}

fn take_calls() -> Vec<String> {
    CALLS.with(|c| c.take())
}

/// Logs every call it receives and returns its subjects unchanged.
#[derive(Default)]
struct RecordingEngine {
    subjects: Paths64,
    open: Paths64,
}

impl ClipEngine<i64> for RecordingEngine {
    fn add_subject(&mut self, paths: &[Path64]) {
        record(format!("subject {}", paths.len()));
        self.subjects.extend_from_slice(paths);
    }

    fn add_open_subject(&mut self, paths: &[Path64]) {
        record(format!("open {}", paths.len()));
        self.open.extend_from_slice(paths);
    }

    fn add_clip(&mut self, paths: &[Path64]) {
        record(format!("clip {}", paths.len()));
    }

    fn execute(&mut self, clip_type: ClipType, fill_rule: FillRule) -> polykit::Result<Paths64> {
        record(format!("execute {clip_type:?} {fill_rule:?}"));
        Ok(self.subjects.clone())
    }

    fn execute_tree(
        &mut self,
        clip_type: ClipType,
        fill_rule: FillRule,
    ) -> polykit::Result<(PolyTree<i64>, Paths64)> {
        record(format!("tree {clip_type:?} {fill_rule:?}"));
        let mut tree = PolyTree::new();
        for path in &self.subjects {
            tree.add_child(path.clone());
        }
        Ok((tree, self.open.clone()))
    }
}

fn p(x: i64, y: i64) -> Point64 {
    Point64::new(x, y)
}

fn square() -> Path64 {
    vec![p(0, 0), p(10, 0), p(10, 10), p(0, 10)]
}

#[test]
fn collinear_vertex_is_trimmed() {
    let path = vec![p(0, 0), p(5, 0), p(10, 0), p(10, 10), p(0, 10)];
    assert_eq!(trim_collinear(&path, false), square());
}

#[test]
fn square_classification() {
    let sq = square();
    assert_eq!(point_in_polygon(p(5, 5), &sq), PointInPolygonResult::IsInside);
    assert_eq!(point_in_polygon(p(15, 5), &sq), PointInPolygonResult::IsOutside);
    assert_eq!(point_in_polygon(p(10, 5), &sq), PointInPolygonResult::IsOn);
}

#[test]
fn path_literal_parses() {
    assert_eq!(make_path("0,0 10,0 10,10 0,10"), square());
}

#[test]
fn float_inflate_rejects_precision_nine() {
    let path = make_path_d("0,0 10,0 10,10 0,10");
    let err = inflate_paths_d::<PolylineOffset>(
        &[path],
        1.0,
        JoinType::Miter,
        EndType::Polygon,
        DEFAULT_MITER_LIMIT,
        9,
    )
    .unwrap_err();
    match err {
        PolykitError::Geometry(GeometryError::ParameterOutOfRange { parameter, value, .. }) => {
            assert_eq!(parameter, "precision");
            assert_relative_eq!(value, 9.0);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn bounds_of_nothing_and_of_a_point() {
    assert_eq!(bounds_paths::<i64>(&[]), Rect64::default());
    assert_eq!(bounds(&[p(3, 4)]), Rect64::new(3, 4, 3, 4));
}

#[test]
fn float_inflate_grows_square() {
    let path = make_path_d("0,0 10,0 10,10 0,10");
    let result = inflate_paths_d::<PolylineOffset>(
        &[path],
        1.0,
        JoinType::Miter,
        EndType::Polygon,
        DEFAULT_MITER_LIMIT,
        DEFAULT_PRECISION,
    )
    .unwrap();
    assert_eq!(result.len(), 1);
    assert_eq!(bounds_paths(&result), RectD::new(-1.0, -1.0, 11.0, 11.0));
    assert_relative_eq!(area(&result[0]), 144.0, epsilon = 1e-9);

    let inside = point_in_polygon_d(&PointD::new(10.5, 5.0), &result[0], DEFAULT_PRECISION).unwrap();
    assert_eq!(inside, PointInPolygonResult::IsInside);
}

#[test]
fn inflate_then_trim_then_translate() {
    let result = inflate_paths::<PolylineOffset>(
        &[square()],
        2.0,
        JoinType::Miter,
        EndType::Polygon,
        DEFAULT_MITER_LIMIT,
    )
    .unwrap();
    let trimmed = trim_collinear(&result[0], false);
    assert_eq!(trimmed.len(), 4);
    let moved = translate_paths(&[trimmed], 2, 2);
    assert_eq!(bounds_paths(&moved), Rect64::new(0, 0, 14, 14));
}

#[test]
fn facade_drives_engine_in_order() {
    take_calls();
    let subjects = vec![square()];
    let clips = vec![square(), square()];
    let result = intersect::<RecordingEngine, i64>(&subjects, &clips, FillRule::NonZero).unwrap();
    assert_eq!(result, subjects);
    assert_eq!(
        take_calls(),
        vec!["subject 1", "clip 2", "execute Intersection NonZero"]
    );

    difference::<RecordingEngine, i64>(&subjects, &clips, FillRule::EvenOdd).unwrap();
    union_subjects::<RecordingEngine, i64>(&subjects, FillRule::Positive).unwrap();
    assert_eq!(
        take_calls(),
        vec![
            "subject 1",
            "clip 2",
            "execute Difference EvenOdd",
            "subject 1",
            "clip 0",
            "execute Union Positive",
        ]
    );
}

#[test]
fn tree_execution_passes_open_subjects() {
    take_calls();
    let subjects = vec![square()];
    let open = vec![vec![p(-5, 5), p(15, 5)]];
    let (tree, open_result) = BooleanOp::new(ClipType::Xor, FillRule::Negative, &subjects, &[])
        .with_open_subjects(&open)
        .execute_tree::<RecordingEngine>()
        .unwrap();
    assert_eq!(poly_tree_to_paths(&tree), subjects);
    assert_eq!(open_result, open);
    assert_eq!(
        take_calls(),
        vec!["subject 1", "open 1", "clip 0", "tree Xor Negative"]
    );
}

#[derive(Default)]
struct FailingEngine;

impl ClipEngine<i64> for FailingEngine {
    fn add_subject(&mut self, _: &[Path64]) {}
    fn add_open_subject(&mut self, _: &[Path64]) {}
    fn add_clip(&mut self, _: &[Path64]) {}

    fn execute(&mut self, _: ClipType, _: FillRule) -> polykit::Result<Paths64> {
        Err(OperationError::Failed("coordinate overflow".to_owned()).into())
    }

    fn execute_tree(&mut self, _: ClipType, _: FillRule) -> polykit::Result<(PolyTree<i64>, Paths64)> {
        Err(OperationError::Failed("coordinate overflow".to_owned()).into())
    }
}

#[test]
fn engine_failure_surfaces_as_operation_error() {
    let err = union_subjects::<FailingEngine, i64>(&[square()], FillRule::NonZero).unwrap_err();
    assert!(matches!(err, PolykitError::Operation(OperationError::Failed(_))));
    assert_eq!(err.to_string(), "operation failed: coordinate overflow");
}
