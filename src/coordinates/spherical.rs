//! # Spherical Coordinate Module
//!
//! Spherical points use the physics convention:
//!
//! - **radius**: distance from Earth's center of mass in meters, `>= 0`
//! - **theta**: inclination, the angle from the positive z-axis, `[0, π]`
//! - **phi**: azimuth in the xy-plane from the positive x-axis, normalized
//!   into `[0, 2π)` on construction
//!
//! ## Mathematical Conversion
//!
//! - `x = radius * sin(theta) * cos(phi)`
//! - `y = radius * sin(theta) * sin(phi)`
//! - `z = radius * cos(theta)`
//!
//! The Cartesian equivalent is computed once, when the point is built, and
//! every distance, angle and equality check reuses it.
//!
//! ## Poles
//!
//! At `theta = 0` or `theta = π` the azimuth carries no information. A
//! spherical point keeps whatever finite `phi` it was given there, while
//! converting a Cartesian point on the z-axis always yields `phi = 0`. Points
//! that differ only in their polar `phi` compare equal.

use super::cartesian::{CartesianPoint, CENTER};
use super::Coordinate;
use crate::constants::{DEG2RAD, RAD2DEG, ROUND_TRIP_TOLERANCE, SCALE, TWO_PI};
use crate::contract::{self, Invariant};
use crate::tolerance::{is_positive_finite, positive_remainder, scaled_equal};
use crate::{CoordinateError, Result};
use std::f64::consts::PI;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Point given by radius, inclination and azimuth
///
/// Immutable once built. Obtain shared instances through
/// [`CoordinateRegistry::spherical`](crate::CoordinateRegistry::spherical).
#[derive(Debug, Clone)]
pub struct SphericalPoint {
    radius: f64,
    theta: f64,
    phi: f64,
    cartesian: CartesianPoint,
}

impl SphericalPoint {
    /// Creates a new spherical point
    ///
    /// # Arguments
    ///
    /// * `radius` - Distance from the origin in meters, finite and `>= 0`
    /// * `theta` - Inclination in radians, within `[0, π]`
    /// * `phi` - Azimuth in radians, any finite value
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if any argument lies outside its domain.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use geocoord::SphericalPoint;
    /// use std::f64::consts::PI;
    ///
    /// let point = SphericalPoint::new(1.0, PI / 2.0, -PI / 2.0).unwrap();
    /// assert!((point.phi() - 3.0 * PI / 2.0).abs() < 1e-15);
    /// assert!(SphericalPoint::new(-1.0, 0.0, 0.0).is_err());
    /// ```
    pub fn new(radius: f64, theta: f64, phi: f64) -> Result<Self> {
        if !is_positive_finite(radius) {
            return Err(CoordinateError::InvalidArgument(format!(
                "radius must be positive and finite, got {}",
                radius
            )));
        }
        if !(theta.is_finite() && (0.0..=PI).contains(&theta)) {
            return Err(CoordinateError::InvalidArgument(format!(
                "theta must be within [0, pi], got {}",
                theta
            )));
        }
        if !phi.is_finite() {
            return Err(CoordinateError::InvalidArgument(format!(
                "phi must be finite, got {}",
                phi
            )));
        }

        let phi = positive_remainder(phi, TWO_PI, SCALE)?;
        let point = SphericalPoint {
            radius,
            theta,
            phi,
            cartesian: cartesian_equivalent(radius, theta, phi)?,
        };
        point.check_invariants()?;
        Ok(point)
    }

    /// Creates a spherical point from angles given in degrees
    pub fn from_degrees(radius: f64, theta_deg: f64, phi_deg: f64) -> Result<Self> {
        SphericalPoint::new(radius, theta_deg * DEG2RAD, phi_deg * DEG2RAD)
    }

    /// Distance from the origin in meters
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Inclination from the positive z-axis in radians, `[0, π]`
    pub fn theta(&self) -> f64 {
        self.theta
    }

    /// Azimuth from the positive x-axis in radians, `[0, 2π)`
    pub fn phi(&self) -> f64 {
        self.phi
    }

    /// Returns (theta, phi) in degrees
    pub fn angles_degrees(&self) -> (f64, f64) {
        (self.theta * RAD2DEG, self.phi * RAD2DEG)
    }
}

fn cartesian_equivalent(radius: f64, theta: f64, phi: f64) -> Result<CartesianPoint> {
    if scaled_equal(radius, 0.0, SCALE)? {
        return Ok(CENTER.clone());
    }

    let sin_theta = theta.sin();
    let x = radius * sin_theta * phi.cos();
    let y = radius * sin_theta * phi.sin();
    let z = radius * theta.cos();

    contract::ensure_finite_axes(x, y, z)?;
    CartesianPoint::new(x, y, z)
}

impl Coordinate for SphericalPoint {
    fn cartesian_form(&self) -> &CartesianPoint {
        &self.cartesian
    }

    fn spherical_form(&self) -> Result<SphericalPoint> {
        Ok(self.clone())
    }

    fn to_cartesian(&self) -> Result<CartesianPoint> {
        let converted = self.cartesian.clone();
        contract::check_spherical_round_trip(self, &converted)?;
        Ok(converted)
    }
}

impl Invariant for SphericalPoint {
    fn check_invariants(&self) -> Result<()> {
        if !is_positive_finite(self.radius) {
            return Err(contract::violation(format!(
                "radius {} is not positive finite",
                self.radius
            )));
        }
        if !(0.0..=PI).contains(&self.theta) {
            return Err(contract::violation(format!(
                "theta {} is outside [0, pi]",
                self.theta
            )));
        }
        if !(0.0..TWO_PI).contains(&self.phi) {
            return Err(contract::violation(format!(
                "phi {} is outside [0, 2pi)",
                self.phi
            )));
        }
        self.cartesian.check_invariants()?;

        // The Cartesian form must lie on the sphere of the stored radius
        let norm = self.cartesian.cartesian_distance(&CENTER);
        if !self.cartesian.is_center()
            && (norm - self.radius).abs() > ROUND_TRIP_TOLERANCE * self.radius.max(1.0)
        {
            return Err(contract::violation(format!(
                "Cartesian form {} has norm {} but radius is {}",
                self.cartesian, norm, self.radius
            )));
        }
        Ok(())
    }
}

impl PartialEq for SphericalPoint {
    fn eq(&self, other: &Self) -> bool {
        self.canonical_form() == other.canonical_form()
    }
}

impl PartialEq<CartesianPoint> for SphericalPoint {
    fn eq(&self, other: &CartesianPoint) -> bool {
        self.is_equal(other)
    }
}

impl Eq for SphericalPoint {}

impl Hash for SphericalPoint {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical_form().hash(state);
    }
}

impl fmt::Display for SphericalPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SphericalPoint(radius={}, theta={}, phi={})",
            self.radius, self.theta, self.phi
        )
    }
}
