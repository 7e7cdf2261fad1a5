use crate::error::{OperationError, PolykitError, Result};
use crate::geometry::PolyTree;
use crate::math::{Coord, Path, Paths};

use super::engine::{ClipEngine, ClipType, FillRule};

/// A boolean operation between closed subjects and clips, with optional open
/// subjects.
///
/// Every execution builds a fresh engine, so one `BooleanOp` can be run
/// against several engines and no state is shared between calls.
pub struct BooleanOp<'a, T: Coord> {
    clip_type: ClipType,
    fill_rule: FillRule,
    subjects: &'a [Path<T>],
    open_subjects: &'a [Path<T>],
    clips: &'a [Path<T>],
}

impl<'a, T: Coord> BooleanOp<'a, T> {
    /// Creates a new `BooleanOp` operation.
    #[must_use]
    pub fn new(
        clip_type: ClipType,
        fill_rule: FillRule,
        subjects: &'a [Path<T>],
        clips: &'a [Path<T>],
    ) -> Self {
        Self {
            clip_type,
            fill_rule,
            subjects,
            open_subjects: &[],
            clips,
        }
    }

    /// Adds open subject paths to the operation.
    #[must_use]
    pub fn with_open_subjects(mut self, open_subjects: &'a [Path<T>]) -> Self {
        self.open_subjects = open_subjects;
        self
    }

    /// Executes the operation on a fresh `E` and returns the closed results.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::Failed` if the engine fails.
    pub fn execute<E: ClipEngine<T>>(&self) -> Result<Paths<T>> {
        let mut engine = self.load::<E>();
        engine
            .execute(self.clip_type, self.fill_rule)
            .map_err(|e| failed(self.clip_type, &e))
    }

    /// Executes the operation on a fresh `E` and returns the closed results
    /// nested by containment, plus any open results.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::Failed` if the engine fails.
    pub fn execute_tree<E: ClipEngine<T>>(&self) -> Result<(PolyTree<T>, Paths<T>)> {
        let mut engine = self.load::<E>();
        engine
            .execute_tree(self.clip_type, self.fill_rule)
            .map_err(|e| failed(self.clip_type, &e))
    }

    fn load<E: ClipEngine<T>>(&self) -> E {
        tracing::debug!(
            clip_type = ?self.clip_type,
            fill_rule = ?self.fill_rule,
            subjects = self.subjects.len(),
            open_subjects = self.open_subjects.len(),
            clips = self.clips.len(),
            "boolean op"
        );
        let mut engine = E::default();
        engine.add_subject(self.subjects);
        if !self.open_subjects.is_empty() {
            engine.add_open_subject(self.open_subjects);
        }
        engine.add_clip(self.clips);
        engine
    }
}

fn failed(clip_type: ClipType, err: &PolykitError) -> PolykitError {
    tracing::debug!(?clip_type, %err, "clip engine failed");
    match err {
        PolykitError::Operation(OperationError::Failed(msg)) => {
            OperationError::Failed(msg.clone()).into()
        }
        other => OperationError::Failed(format!("{clip_type:?}: {other}")).into(),
    }
}

/// Applies `clip_type` between `subjects` and `clips` using engine `E`.
///
/// # Errors
///
/// Returns `OperationError::Failed` if the engine fails.
pub fn boolean_op<E: ClipEngine<T>, T: Coord>(
    clip_type: ClipType,
    fill_rule: FillRule,
    subjects: &[Path<T>],
    clips: &[Path<T>],
) -> Result<Paths<T>> {
    BooleanOp::new(clip_type, fill_rule, subjects, clips).execute::<E>()
}

/// Intersection of `subjects` and `clips`.
///
/// # Errors
///
/// Returns `OperationError::Failed` if the engine fails.
pub fn intersect<E: ClipEngine<T>, T: Coord>(
    subjects: &[Path<T>],
    clips: &[Path<T>],
    fill_rule: FillRule,
) -> Result<Paths<T>> {
    boolean_op::<E, T>(ClipType::Intersection, fill_rule, subjects, clips)
}

/// Union of `subjects` and `clips`.
///
/// # Errors
///
/// Returns `OperationError::Failed` if the engine fails.
pub fn union<E: ClipEngine<T>, T: Coord>(
    subjects: &[Path<T>],
    clips: &[Path<T>],
    fill_rule: FillRule,
) -> Result<Paths<T>> {
    boolean_op::<E, T>(ClipType::Union, fill_rule, subjects, clips)
}

/// Union of `subjects` alone, merging overlapping subjects.
///
/// # Errors
///
/// Returns `OperationError::Failed` if the engine fails.
pub fn union_subjects<E: ClipEngine<T>, T: Coord>(
    subjects: &[Path<T>],
    fill_rule: FillRule,
) -> Result<Paths<T>> {
    boolean_op::<E, T>(ClipType::Union, fill_rule, subjects, &[])
}

/// `subjects` minus `clips`.
///
/// # Errors
///
/// Returns `OperationError::Failed` if the engine fails.
pub fn difference<E: ClipEngine<T>, T: Coord>(
    subjects: &[Path<T>],
    clips: &[Path<T>],
    fill_rule: FillRule,
) -> Result<Paths<T>> {
    boolean_op::<E, T>(ClipType::Difference, fill_rule, subjects, clips)
}

/// Symmetric difference of `subjects` and `clips`.
///
/// # Errors
///
/// Returns `OperationError::Failed` if the engine fails.
pub fn xor<E: ClipEngine<T>, T: Coord>(
    subjects: &[Path<T>],
    clips: &[Path<T>],
    fill_rule: FillRule,
) -> Result<Paths<T>> {
    boolean_op::<E, T>(ClipType::Xor, fill_rule, subjects, clips)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::poly_tree_to_paths;
    use crate::math::{Path64, Paths64, Point64};

    /// Echoes its inputs: subjects, then a marker point encoding the clip
    /// type and fill rule, then clips. Open subjects come back as open results.
    #[derive(Default)]
    struct EchoEngine {
        subjects: Paths64,
        open: Paths64,
        clips: Paths64,
    }

    fn marker(clip_type: ClipType, fill_rule: FillRule) -> Path64 {
        vec![Point64::new(clip_type as i64, fill_rule as i64)]
    }

    impl ClipEngine<i64> for EchoEngine {
        fn add_subject(&mut self, paths: &[Path64]) {
            self.subjects.extend_from_slice(paths);
        }

        fn add_open_subject(&mut self, paths: &[Path64]) {
            self.open.extend_from_slice(paths);
        }

        fn add_clip(&mut self, paths: &[Path64]) {
            self.clips.extend_from_slice(paths);
        }

        fn execute(&mut self, clip_type: ClipType, fill_rule: FillRule) -> Result<Paths64> {
            let mut out = self.subjects.clone();
            out.push(marker(clip_type, fill_rule));
            out.extend(self.clips.iter().cloned());
            Ok(out)
        }

        fn execute_tree(
            &mut self,
            clip_type: ClipType,
            fill_rule: FillRule,
        ) -> Result<(PolyTree<i64>, Paths64)> {
            let mut tree = PolyTree::new();
            for path in self.execute(clip_type, fill_rule)? {
                tree.add_child(path);
            }
            Ok((tree, self.open.clone()))
        }
    }

    #[derive(Default)]
    struct BrokenEngine;

    impl ClipEngine<i64> for BrokenEngine {
        fn add_subject(&mut self, _: &[Path64]) {}
        fn add_open_subject(&mut self, _: &[Path64]) {}
        fn add_clip(&mut self, _: &[Path64]) {}

        fn execute(&mut self, _: ClipType, _: FillRule) -> Result<Paths64> {
            Err(OperationError::InvalidInput("unsupported".into()).into())
        }

        fn execute_tree(&mut self, _: ClipType, _: FillRule) -> Result<(PolyTree<i64>, Paths64)> {
            Err(OperationError::Failed("overflow".into()).into())
        }
    }

    fn square(x: i64) -> Path64 {
        vec![
            Point64::new(x, 0),
            Point64::new(x + 10, 0),
            Point64::new(x + 10, 10),
            Point64::new(x, 10),
        ]
    }

    #[test]
    fn free_functions_forward_clip_type_and_fill_rule() {
        let subjects = vec![square(0)];
        let clips = vec![square(5)];
        let cases = [
            (intersect::<EchoEngine, i64>(&subjects, &clips, FillRule::NonZero), ClipType::Intersection),
            (union::<EchoEngine, i64>(&subjects, &clips, FillRule::NonZero), ClipType::Union),
            (difference::<EchoEngine, i64>(&subjects, &clips, FillRule::NonZero), ClipType::Difference),
            (xor::<EchoEngine, i64>(&subjects, &clips, FillRule::NonZero), ClipType::Xor),
        ];
        for (result, clip_type) in cases {
            let result = result.unwrap();
            assert_eq!(result, vec![square(0), marker(clip_type, FillRule::NonZero), square(5)]);
        }
    }

    #[test]
    fn union_subjects_passes_no_clips() {
        let subjects = vec![square(0), square(20)];
        let result = union_subjects::<EchoEngine, i64>(&subjects, FillRule::Positive).unwrap();
        assert_eq!(
            result,
            vec![square(0), square(20), marker(ClipType::Union, FillRule::Positive)]
        );
    }

    #[test]
    fn each_call_uses_a_fresh_engine() {
        let subjects = vec![square(0)];
        let first = union_subjects::<EchoEngine, i64>(&subjects, FillRule::EvenOdd).unwrap();
        let second = union_subjects::<EchoEngine, i64>(&subjects, FillRule::EvenOdd).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
    }

    #[test]
    fn empty_inputs_are_forwarded() {
        let result = boolean_op::<EchoEngine, i64>(ClipType::Xor, FillRule::EvenOdd, &[], &[]);
        assert_eq!(result.unwrap(), vec![marker(ClipType::Xor, FillRule::EvenOdd)]);
    }

    #[test]
    fn tree_execution_returns_open_results() {
        let subjects = vec![square(0)];
        let open = vec![vec![Point64::new(-5, 5), Point64::new(15, 5)]];
        let op = BooleanOp::new(ClipType::Intersection, FillRule::EvenOdd, &subjects, &[])
            .with_open_subjects(&open);
        let (tree, open_out) = op.execute_tree::<EchoEngine>().unwrap();
        assert_eq!(open_out, open);
        assert_eq!(tree.len(), 2);
        assert_eq!(poly_tree_to_paths(&tree)[0], square(0));
    }

    #[test]
    fn engine_errors_become_operation_failures() {
        let subjects = vec![square(0)];
        let err = union_subjects::<BrokenEngine, i64>(&subjects, FillRule::EvenOdd).unwrap_err();
        assert!(matches!(err, PolykitError::Operation(OperationError::Failed(_))));

        let op = BooleanOp::new(ClipType::Union, FillRule::EvenOdd, &subjects, &[]);
        let err = op.execute_tree::<BrokenEngine>().unwrap_err();
        assert!(
            matches!(err, PolykitError::Operation(OperationError::Failed(ref msg)) if msg == "overflow")
        );
    }
}
