mod inflate;
mod polyline_offset;

pub use inflate::{inflate_paths, inflate_paths_d, DEFAULT_MITER_LIMIT, DEFAULT_PRECISION};
pub use polyline_offset::PolylineOffset;

use crate::error::Result;
use crate::math::{Path64, Paths64};

/// How convex corners are filled when offsetting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JoinType {
    /// Corners are cut off at distance `|delta|` from the vertex.
    Square,
    /// Corners are rounded with arcs of radius `|delta|`.
    Round,
    /// Corners are extended to a point, subject to the miter limit.
    Miter,
}

/// How paths are closed or capped when offsetting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EndType {
    /// Paths are closed polygons.
    Polygon,
    /// Open paths are joined end to start and offset on both sides.
    Joined,
    /// Open paths get flat ends at their end points.
    Butt,
    /// Open paths are extended by `|delta|` and squared off.
    Square,
    /// Open paths get semicircular ends.
    Round,
}

impl EndType {
    /// Returns `true` for the end types that leave a path open and cap it.
    #[must_use]
    pub fn is_full_open(self) -> bool {
        matches!(self, Self::Butt | Self::Square | Self::Round)
    }
}

/// A path offsetting engine working in the integer domain.
///
/// Paths are added in groups sharing a join and end type; one call to
/// [`execute`](Self::execute) offsets every group by the same delta.
pub trait OffsetEngine {
    /// Creates an empty engine with the given miter limit, expressed as a
    /// multiple of `|delta|`.
    fn new(miter_limit: f64) -> Self
    where
        Self: Sized;

    /// Adds a group of paths.
    fn add_paths(&mut self, paths: &[Path64], join_type: JoinType, end_type: EndType);

    /// Offsets every added path by `delta`.
    ///
    /// Positive deltas grow closed polygons and shrink their holes.
    ///
    /// # Errors
    ///
    /// Returns `OperationError` if the engine cannot complete.
    fn execute(&mut self, delta: f64) -> Result<Paths64>;
}
