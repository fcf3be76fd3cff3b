//! Invariant checks run at the end of every constructor and conversion
//!
//! Failures are reported as [`CoordinateError::InvariantViolation`]. They mean
//! the conversion math produced something it should not have, never that the
//! caller passed bad input; argument validation happens in the constructors.
//!
//! The conversion comparisons in [`check_round_trip`] and
//! [`check_spherical_round_trip`] are compiled only with the `contracts`
//! feature (on by default).

use crate::coordinates::cartesian::CartesianPoint;
use crate::coordinates::spherical::SphericalPoint;
use crate::{CoordinateError, Result};
use log::warn;
use std::f64::consts::PI;

/// A type whose values carry checkable class invariants
pub trait Invariant {
    /// Returns `InvariantViolation` if `self` is not a valid value of its type
    fn check_invariants(&self) -> Result<()>;
}

/// Logs and builds an invariant violation
pub(crate) fn violation(message: String) -> CoordinateError {
    warn!("Invariant violation: {}", message);
    CoordinateError::InvariantViolation(message)
}

/// Every computed axis must be finite
pub(crate) fn ensure_finite_axes(x: f64, y: f64, z: f64) -> Result<()> {
    if x.is_finite() && y.is_finite() && z.is_finite() {
        Ok(())
    } else {
        Err(violation(format!(
            "calculated x, y or z is not finite: ({}, {}, {})",
            x, y, z
        )))
    }
}

/// A distance must be positive and finite
pub(crate) fn ensure_distance(distance: f64) -> Result<()> {
    if crate::tolerance::is_positive_finite(distance) {
        Ok(())
    } else {
        Err(violation(format!(
            "calculated distance {} is not positive finite",
            distance
        )))
    }
}

/// A central angle is NaN (undefined) or lies within `[0, π]`
pub(crate) fn ensure_central_angle(angle: f64) -> Result<()> {
    if angle.is_nan() || (0.0..=PI).contains(&angle) {
        Ok(())
    } else {
        Err(violation(format!(
            "calculated central angle {} is not in [0, pi]",
            angle
        )))
    }
}

/// `converted` must denote the same point as `source`
///
/// Canonical equality settles almost every case. Where it does not (far from
/// the origin a single ULP already exceeds the rounding resolution) the two
/// points may be [`ROUND_TRIP_TOLERANCE`](crate::constants::ROUND_TRIP_TOLERANCE)
/// apart relative to their distance from the origin.
#[cfg(feature = "contracts")]
pub(crate) fn check_round_trip(source: &CartesianPoint, converted: &CartesianPoint) -> Result<()> {
    use crate::constants::ROUND_TRIP_TOLERANCE;
    use crate::coordinates::cartesian::CENTER;

    if source == converted {
        return Ok(());
    }

    let drift = source.cartesian_distance(converted);
    let scale = source.cartesian_distance(&CENTER).max(1.0);
    if drift <= ROUND_TRIP_TOLERANCE * scale {
        Ok(())
    } else {
        Err(violation(format!(
            "converted coordinate {} is not equal to originating coordinate {}",
            converted, source
        )))
    }
}

#[cfg(not(feature = "contracts"))]
#[inline]
pub(crate) fn check_round_trip(_source: &CartesianPoint, _converted: &CartesianPoint) -> Result<()> {
    Ok(())
}

/// `converted` must lie at the radius, inclination and azimuth of `source`
///
/// Angles are read back with `atan2`, which stays accurate next to the poles
/// where `acos` does not. Each discrepancy is measured as the arc it spans:
/// the azimuth error is weighted by the distance from the z-axis, so the
/// arbitrary `phi` of a polar point never counts.
#[cfg(feature = "contracts")]
pub(crate) fn check_spherical_round_trip(
    source: &SphericalPoint,
    converted: &CartesianPoint,
) -> Result<()> {
    use crate::constants::{ROUND_TRIP_TOLERANCE, TWO_PI};
    use crate::coordinates::cartesian::CENTER;

    let axial = converted.x().hypot(converted.y());
    let radius = converted.cartesian_distance(&CENTER);
    let theta = axial.atan2(converted.z());

    let mut phi_error = converted.y().atan2(converted.x()) - source.phi();
    phi_error -= TWO_PI * (phi_error / TWO_PI).round();

    let drift = [
        (radius - source.radius()).abs(),
        (theta - source.theta()).abs() * source.radius(),
        phi_error.abs() * axial,
    ];
    let limit = ROUND_TRIP_TOLERANCE * source.radius().max(1.0);

    if drift.iter().all(|d| *d <= limit) {
        Ok(())
    } else {
        Err(violation(format!(
            "converted coordinate {} does not lie at {}",
            converted, source
        )))
    }
}

#[cfg(not(feature = "contracts"))]
#[inline]
pub(crate) fn check_spherical_round_trip(
    _source: &SphericalPoint,
    _converted: &CartesianPoint,
) -> Result<()> {
    Ok(())
}
