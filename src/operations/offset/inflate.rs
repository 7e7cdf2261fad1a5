use crate::error::Result;
use crate::math::scale::{precision_scale, scale_paths_to_64, scale_paths_to_d};
use crate::math::{Path64, PathD, Paths64, PathsD};

use super::{EndType, JoinType, OffsetEngine};

/// Miter limit used when the caller has no preference.
pub const DEFAULT_MITER_LIMIT: f64 = 2.0;

/// Decimal precision used for floating offsets when the caller has no preference.
pub const DEFAULT_PRECISION: i32 = 2;

/// Offsets integer paths by `delta` using a fresh engine `E`.
///
/// # Errors
///
/// Returns `OperationError` if the engine fails.
pub fn inflate_paths<E: OffsetEngine>(
    paths: &[Path64],
    delta: f64,
    join_type: JoinType,
    end_type: EndType,
    miter_limit: f64,
) -> Result<Paths64> {
    let mut engine = E::new(miter_limit);
    engine.add_paths(paths, join_type, end_type);
    engine.execute(delta)
}

/// Offsets floating paths by `delta` using a fresh engine `E`.
///
/// The paths are scaled by `10^precision` onto the integer grid, offset by
/// `delta * 10^precision`, and scaled back.
///
/// # Errors
///
/// Returns `GeometryError::ParameterOutOfRange` if `precision` is outside
/// `[-8, 8]`; no engine is built in that case. Engine failures are returned
/// as `OperationError`.
pub fn inflate_paths_d<E: OffsetEngine>(
    paths: &[PathD],
    delta: f64,
    join_type: JoinType,
    end_type: EndType,
    miter_limit: f64,
    precision: i32,
) -> Result<PathsD> {
    let scale = precision_scale(precision)?;
    let scaled = scale_paths_to_64(paths, scale);
    let offset = inflate_paths::<E>(&scaled, delta * scale, join_type, end_type, miter_limit)?;
    Ok(scale_paths_to_d(&offset, 1.0 / scale))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::cell::Cell;

    use approx::assert_relative_eq;

    use super::*;
    use crate::error::{GeometryError, PolykitError};
    use crate::math::{Point64, PointD};

    thread_local! {
        static BUILT: Cell<usize> = const { Cell::new(0) };
    }

    /// Returns its input unchanged and reports the delta it was given as a
    /// one-point path.
    struct ProbeEngine {
        paths: Paths64,
    }

    impl OffsetEngine for ProbeEngine {
        fn new(_miter_limit: f64) -> Self {
            BUILT.with(|b| b.set(b.get() + 1));
            Self { paths: Vec::new() }
        }

        fn add_paths(&mut self, paths: &[Path64], _: JoinType, _: EndType) {
            self.paths.extend_from_slice(paths);
        }

        #[allow(clippy::cast_possible_truncation)]
        fn execute(&mut self, delta: f64) -> Result<Paths64> {
            let mut out = self.paths.clone();
            out.push(vec![Point64::new(delta.round() as i64, 0)]);
            Ok(out)
        }
    }

    fn unit_square() -> PathD {
        vec![
            PointD::new(0.0, 0.0),
            PointD::new(1.0, 0.0),
            PointD::new(1.0, 1.0),
            PointD::new(0.0, 1.0),
        ]
    }

    #[test]
    fn float_paths_are_scaled_and_restored() {
        let result = inflate_paths_d::<ProbeEngine>(
            &[unit_square()],
            0.5,
            JoinType::Miter,
            EndType::Polygon,
            DEFAULT_MITER_LIMIT,
            DEFAULT_PRECISION,
        )
        .unwrap();
        assert_eq!(result.len(), 2);
        assert_relative_eq!(result[0][2].x, 1.0);
        assert_relative_eq!(result[0][2].y, 1.0);
        // Delta reaches the engine scaled by 10^2.
        assert_relative_eq!(result[1][0].x, 0.5);
    }

    #[test]
    fn bad_precision_fails_before_engine_is_built() {
        let before = BUILT.with(Cell::get);
        let err = inflate_paths_d::<ProbeEngine>(
            &[unit_square()],
            1.0,
            JoinType::Round,
            EndType::Polygon,
            DEFAULT_MITER_LIMIT,
            9,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            PolykitError::Geometry(GeometryError::ParameterOutOfRange { .. })
        ));
        assert_eq!(BUILT.with(Cell::get), before);
    }
}
