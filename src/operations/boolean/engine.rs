use crate::error::Result;
use crate::geometry::PolyTree;
use crate::math::{Coord, Path, Paths};

/// The set operation applied between subjects and clips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClipType {
    /// Regions covered by both subjects and clips.
    Intersection,
    /// Regions covered by subjects or clips.
    Union,
    /// Regions covered by subjects but not by clips.
    Difference,
    /// Regions covered by exactly one of subjects and clips.
    Xor,
}

/// Decides which winding numbers count as filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FillRule {
    /// Odd winding numbers are filled.
    #[default]
    EvenOdd,
    /// Any non-zero winding number is filled.
    NonZero,
    /// Strictly positive winding numbers are filled.
    Positive,
    /// Strictly negative winding numbers are filled.
    Negative,
}

/// A polygon clipping engine.
///
/// Each boolean operation builds a fresh engine with [`Default`], loads it
/// with subjects and clips, and executes it once. Implementations must be
/// deterministic: identical inputs in identical order under the same fill
/// rule give identical output.
pub trait ClipEngine<T: Coord>: Default {
    /// Adds closed subject paths.
    fn add_subject(&mut self, paths: &[Path<T>]);

    /// Adds open subject paths (polylines).
    fn add_open_subject(&mut self, paths: &[Path<T>]);

    /// Adds closed clip paths.
    fn add_clip(&mut self, paths: &[Path<T>]);

    /// Runs the operation and returns the closed result paths.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::Failed` if the engine cannot complete.
    fn execute(&mut self, clip_type: ClipType, fill_rule: FillRule) -> Result<Paths<T>>;

    /// Runs the operation and returns the closed results nested by
    /// containment, together with the open results.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::Failed` if the engine cannot complete.
    fn execute_tree(
        &mut self,
        clip_type: ClipType,
        fill_rule: FillRule,
    ) -> Result<(PolyTree<T>, Paths<T>)>;
}
