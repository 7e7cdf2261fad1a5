pub mod distance_2d;
pub mod intersect_2d;
pub mod polygon_2d;
pub mod scale;

use std::fmt::Debug;
use std::ops::{Add, Sub};

/// Integer (fixed-precision) 2D point.
pub type Point64 = nalgebra::Point2<i64>;

/// Floating-point 2D point.
pub type PointD = nalgebra::Point2<f64>;

/// Floating-point 2D vector, used by the offset engine.
pub type Vector2 = nalgebra::Vector2<f64>;

/// An ordered sequence of points. Whether it is open or closed is decided by
/// the caller at each call site.
pub type Path<T> = Vec<nalgebra::Point2<T>>;

/// A collection of paths.
pub type Paths<T> = Vec<Path<T>>;

pub type Path64 = Path<i64>;
pub type PathD = Path<f64>;
pub type Paths64 = Paths<i64>;
pub type PathsD = Paths<f64>;

/// Largest coordinate magnitude for which the exact predicates cannot overflow.
///
/// Differences of two coordinates fit in 63 bits, so each product in the
/// `i128` cross product stays below `2^126`.
pub const MAX_COORD: i64 = i64::MAX >> 2;

/// Tolerance used only by the floating-point offset engine.
pub const TOLERANCE: f64 = 1e-10;

/// Scalar type usable as a coordinate in either numeric domain.
pub trait Coord:
    nalgebra::Scalar + Copy + PartialOrd + Debug + Add<Output = Self> + Sub<Output = Self>
{
    /// Largest representable value.
    const MAX: Self;
    /// Smallest (most negative) representable value.
    const LOWEST: Self;
    /// Additive identity.
    const ZERO: Self;

    /// Lossy conversion used by area and offset computations.
    fn to_f64(self) -> f64;
}

impl Coord for i64 {
    const MAX: Self = i64::MAX;
    const LOWEST: Self = i64::MIN;
    const ZERO: Self = 0;

    #[allow(clippy::cast_precision_loss)]
    fn to_f64(self) -> f64 {
        self as f64
    }
}

impl Coord for f64 {
    const MAX: Self = f64::MAX;
    const LOWEST: Self = f64::MIN;
    const ZERO: Self = 0.0;

    fn to_f64(self) -> f64 {
        self
    }
}
