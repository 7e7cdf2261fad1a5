use super::{Path64, PathD, Paths64, PathsD, Point64, PointD};
use crate::error::{GeometryError, Result};

/// Largest accepted decimal precision exponent (in magnitude).
///
/// Conversions between the integer and floating domains scale by
/// `10^precision`, with the exponent limited to `[-MAX_PRECISION, MAX_PRECISION]`.
pub const MAX_PRECISION: i32 = 8;

/// Checks that `precision` lies within `[-MAX_PRECISION, MAX_PRECISION]`.
///
/// # Errors
///
/// Returns `GeometryError::ParameterOutOfRange` otherwise.
pub fn check_precision(precision: i32) -> Result<()> {
    if (-MAX_PRECISION..=MAX_PRECISION).contains(&precision) {
        return Ok(());
    }
    tracing::warn!(precision, "precision exceeds the allowed range");
    Err(GeometryError::ParameterOutOfRange {
        parameter: "precision",
        value: f64::from(precision),
        min: f64::from(-MAX_PRECISION),
        max: f64::from(MAX_PRECISION),
    }
    .into())
}

/// Returns `10^precision` after validating the exponent.
///
/// # Errors
///
/// Returns `GeometryError::ParameterOutOfRange` if the precision is out of range.
pub fn precision_scale(precision: i32) -> Result<f64> {
    check_precision(precision)?;
    Ok(10f64.powi(precision))
}

/// Scales a floating point into the integer domain, rounding to nearest.
///
/// Values beyond the `i64` range saturate.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn scale_point_to_64(pt: &PointD, scale: f64) -> Point64 {
    Point64::new((pt.x * scale).round() as i64, (pt.y * scale).round() as i64)
}

/// Scales an integer point into the floating domain.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn scale_point_to_d(pt: &Point64, scale: f64) -> PointD {
    PointD::new(pt.x as f64 * scale, pt.y as f64 * scale)
}

/// Scales a floating path into the integer domain.
#[must_use]
pub fn scale_path_to_64(path: &[PointD], scale: f64) -> Path64 {
    path.iter().map(|pt| scale_point_to_64(pt, scale)).collect()
}

/// Scales an integer path into the floating domain.
#[must_use]
pub fn scale_path_to_d(path: &[Point64], scale: f64) -> PathD {
    path.iter().map(|pt| scale_point_to_d(pt, scale)).collect()
}

/// Scales floating paths into the integer domain.
#[must_use]
pub fn scale_paths_to_64(paths: &[PathD], scale: f64) -> Paths64 {
    paths.iter().map(|p| scale_path_to_64(p, scale)).collect()
}

/// Scales integer paths into the floating domain.
#[must_use]
pub fn scale_paths_to_d(paths: &[Path64], scale: f64) -> PathsD {
    paths.iter().map(|p| scale_path_to_d(p, scale)).collect()
}
