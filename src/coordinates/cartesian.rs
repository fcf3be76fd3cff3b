//! # Cartesian Coordinate Module
//!
//! A 3D Cartesian point that serves both as one of the two public
//! representations and as the intermediate form every distance, angle and
//! equality computation goes through.
//!
//! ## Coordinate System Convention
//!
//! - **Origin**: Earth's center of mass ([`CENTER`])
//! - **Unit**: meters on every axis
//! - **Z-axis**: from the south pole towards the north pole
//! - **X/Y-axes**: span the equatorial plane, right-handed
//!
//! ## Internal Storage
//!
//! The three axes keep their full `f64` value. Next to them the point stores
//! its [`CanonicalForm`] (each axis rounded half-up to 12 fractional digits),
//! which is what `==`, `Hash` and the flyweight caches look at. Two points
//! closer than the rounding resolution are therefore the same value.
//!
//! ## Examples
//!
//! ```rust
//! use geocoord::{CartesianPoint, Coordinate, CENTER};
//!
//! let point = CartesianPoint::new(3.0, 7.0, 9.0).unwrap();
//! let distance = point.distance_to(&*CENTER).unwrap();
//! assert!((distance - 11.789826122551596).abs() < 1e-10);
//!
//! // Differences below the rounding resolution vanish
//! let nudged = CartesianPoint::new(3.0 + 1e-13, 7.0, 9.0).unwrap();
//! assert_eq!(point, nudged);
//! ```

use super::canonical::CanonicalForm;
use super::spherical::SphericalPoint;
use super::Coordinate;
use crate::contract::{self, Invariant};
use crate::location::CartesianTriple;
use crate::{CoordinateError, Result};
use lazy_static::lazy_static;
use nalgebra::Vector3;
use std::fmt;
use std::hash::{Hash, Hasher};

lazy_static! {
    /// Earth's center of mass, `(0, 0, 0)`
    pub static ref CENTER: CartesianPoint = CartesianPoint {
        x: 0.0,
        y: 0.0,
        z: 0.0,
        canonical: CanonicalForm::origin(),
    };
}

/// Three-dimensional Cartesian point, in meters from Earth's center of mass
///
/// Immutable once built. Obtain shared instances through
/// [`CoordinateRegistry::cartesian`](crate::CoordinateRegistry::cartesian).
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "CartesianTriple", into = "CartesianTriple")]
pub struct CartesianPoint {
    x: f64,
    y: f64,
    z: f64,
    canonical: CanonicalForm,
}

impl CartesianPoint {
    /// Creates a new Cartesian point
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if any of `x`, `y` or `z` is infinite or NaN.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use geocoord::CartesianPoint;
    ///
    /// let point = CartesianPoint::new(1.0, 2.0, 3.0).unwrap();
    /// assert_eq!(point.x(), 1.0);
    /// assert!(CartesianPoint::new(f64::NAN, 0.0, 0.0).is_err());
    /// ```
    pub fn new(x: f64, y: f64, z: f64) -> Result<Self> {
        if !(x.is_finite() && y.is_finite() && z.is_finite()) {
            return Err(CoordinateError::InvalidArgument(format!(
                "x, y and z must be finite, got ({}, {}, {})",
                x, y, z
            )));
        }

        let point = CartesianPoint {
            x,
            y,
            z,
            canonical: CanonicalForm::from_axes(x, y, z)?,
        };
        point.check_invariants()?;
        Ok(point)
    }

    /// X-component in meters
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Y-component in meters
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Z-component in meters (towards the north pole)
    pub fn z(&self) -> f64 {
        self.z
    }

    /// The rounded form used for equality and hashing
    pub fn canonical_form(&self) -> &CanonicalForm {
        &self.canonical
    }

    /// `true` if this point rounds to the origin
    pub fn is_center(&self) -> bool {
        self.canonical == CENTER.canonical
    }

    /// Euclidean distance to `other`
    ///
    /// Nested `hypot` calls keep intermediate values from overflowing where
    /// `sqrt(dx² + dy² + dz²)` would.
    pub fn cartesian_distance(&self, other: &CartesianPoint) -> f64 {
        let xy = (other.x - self.x).hypot(other.y - self.y);
        xy.hypot(other.z - self.z)
    }

    /// Distance to [`CENTER`]
    ///
    /// # Errors
    ///
    /// `InvariantViolation` if the length overflows, which finite axes near
    /// `f64::MAX` can do.
    pub fn norm(&self) -> Result<f64> {
        let norm = self.cartesian_distance(&CENTER);
        contract::ensure_distance(norm)?;
        Ok(norm)
    }

    /// Calculates the central angle to another point
    ///
    /// Both points are treated as vectors from the origin. Returns `Ok(NaN)` if
    /// either of them is [`CENTER`].
    ///
    /// # Errors
    ///
    /// `InvariantViolation` if either vector's length is not finite.
    pub fn angle_to(&self, other: &CartesianPoint) -> Result<f64> {
        if self.is_center() || other.is_center() {
            return Ok(f64::NAN);
        }

        let this_norm = self.norm()?;
        let other_norm = other.norm()?;

        // Scale first: x·x' may overflow even though both norms are finite
        let cos_angle = (self.to_vector3() / this_norm).dot(&(other.to_vector3() / other_norm));

        // Handle numerical precision issues
        Ok(cos_angle.clamp(-1.0, 1.0).acos())
    }

    /// Converts to nalgebra Vector3 for linear algebra operations
    pub fn to_vector3(&self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.z)
    }

    /// Creates from nalgebra Vector3
    pub fn from_vector3(vec: Vector3<f64>) -> Result<Self> {
        CartesianPoint::new(vec.x, vec.y, vec.z)
    }
}

impl Coordinate for CartesianPoint {
    fn cartesian_form(&self) -> &CartesianPoint {
        self
    }

    fn spherical_form(&self) -> Result<SphericalPoint> {
        if self.is_center() {
            return SphericalPoint::new(0.0, 0.0, 0.0);
        }

        let radius = self.norm()?;
        let theta = (self.z / radius).clamp(-1.0, 1.0).acos();
        // atan(y / x) loses the quadrant; phi is arbitrary on the z-axis, pick 0
        let phi = if self.x == 0.0 && self.y == 0.0 {
            0.0
        } else {
            self.y.atan2(self.x)
        };

        SphericalPoint::new(radius, theta, phi)
    }

    fn to_cartesian(&self) -> Result<CartesianPoint> {
        Ok(self.clone())
    }
}

impl Invariant for CartesianPoint {
    fn check_invariants(&self) -> Result<()> {
        contract::ensure_finite_axes(self.x, self.y, self.z)?;
        if self.canonical.as_str().is_empty() {
            return Err(contract::violation(
                "canonical form of a Cartesian point is empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl PartialEq for CartesianPoint {
    fn eq(&self, other: &Self) -> bool {
        self.canonical == other.canonical
    }
}

impl PartialEq<SphericalPoint> for CartesianPoint {
    fn eq(&self, other: &SphericalPoint) -> bool {
        self.is_equal(other)
    }
}

impl Eq for CartesianPoint {}

impl Hash for CartesianPoint {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical.hash(state);
    }
}

impl fmt::Display for CartesianPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CartesianPoint{}", self.canonical)
    }
}
