//! # Coordinate Module
//!
//! The [`Coordinate`] trait is the capability every representation offers:
//! conversion to either form, Cartesian distance, central angle and
//! representation-independent equality. Exactly two types implement it,
//! [`CartesianPoint`] and [`SphericalPoint`]; the trait is sealed.
//!
//! A representation supplies a borrow of its Cartesian equivalent, its
//! spherical equivalent and its checked conversion to Cartesian form.
//! Everything else is provided in terms of the Cartesian form, so a spherical
//! operand never needs converting twice.

pub mod canonical;
pub mod cartesian;
pub mod spherical;

pub use canonical::CanonicalForm;
pub use cartesian::{CartesianPoint, CENTER};
pub use spherical::SphericalPoint;

use crate::contract;
use crate::location::CartesianTriple;
use crate::Result;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

mod private {
    pub trait Sealed {}

    impl Sealed for super::CartesianPoint {}
    impl Sealed for super::SphericalPoint {}
    impl Sealed for super::SharedCoordinate {}
    impl<T: Sealed + ?Sized> Sealed for std::sync::Arc<T> {}
}

/// A point in space, whatever its representation
pub trait Coordinate: private::Sealed + fmt::Debug + Send + Sync {
    /// Cartesian equivalent of this coordinate
    fn cartesian_form(&self) -> &CartesianPoint;

    /// Spherical equivalent of this coordinate, without the round-trip check
    fn spherical_form(&self) -> Result<SphericalPoint>;

    /// Converts to Cartesian representation
    ///
    /// Fails with `InvariantViolation` if the result does not denote the same
    /// point as `self`.
    fn to_cartesian(&self) -> Result<CartesianPoint>;

    /// Converts to spherical representation
    ///
    /// Fails with `InvariantViolation` if the result does not denote the same
    /// point as `self`.
    fn to_spherical(&self) -> Result<SphericalPoint> {
        let converted = self.spherical_form()?;
        contract::check_round_trip(self.cartesian_form(), converted.cartesian_form())?;
        Ok(converted)
    }

    /// Rounded Cartesian form that equality and hashing are based on
    fn canonical_form(&self) -> &CanonicalForm {
        self.cartesian_form().canonical_form()
    }

    /// `true` if both coordinates denote the same point
    fn is_equal(&self, other: &dyn Coordinate) -> bool {
        self.canonical_form() == other.canonical_form()
    }

    /// Euclidean distance in meters
    fn distance_to(&self, other: &dyn Coordinate) -> Result<f64> {
        let distance = self
            .cartesian_form()
            .cartesian_distance(other.cartesian_form());
        contract::ensure_distance(distance)?;
        Ok(distance)
    }

    /// Angle at the origin between the vectors to both points, in radians
    ///
    /// Returns `Ok(NaN)` when either point is the origin: the angle is
    /// undefined there, which is not the same as zero. Fails with
    /// `InvariantViolation` if either vector's length overflows.
    fn central_angle(&self, other: &dyn Coordinate) -> Result<f64> {
        let angle = self.cartesian_form().angle_to(other.cartesian_form())?;
        contract::ensure_central_angle(angle)?;
        Ok(angle)
    }

    /// The Cartesian `(x, y, z)` triple handed to storage
    fn to_triple(&self) -> CartesianTriple {
        CartesianTriple::from(self.cartesian_form())
    }
}

impl<T: Coordinate + ?Sized> Coordinate for Arc<T> {
    fn cartesian_form(&self) -> &CartesianPoint {
        (**self).cartesian_form()
    }

    fn spherical_form(&self) -> Result<SphericalPoint> {
        (**self).spherical_form()
    }

    fn to_cartesian(&self) -> Result<CartesianPoint> {
        (**self).to_cartesian()
    }
}

/// A shared coordinate in either representation
#[derive(Debug, Clone)]
pub enum SharedCoordinate {
    Cartesian(Arc<CartesianPoint>),
    Spherical(Arc<SphericalPoint>),
}

impl SharedCoordinate {
    /// `true` if both handles point at the very same instance
    pub fn ptr_eq(&self, other: &SharedCoordinate) -> bool {
        match (self, other) {
            (SharedCoordinate::Cartesian(a), SharedCoordinate::Cartesian(b)) => Arc::ptr_eq(a, b),
            (SharedCoordinate::Spherical(a), SharedCoordinate::Spherical(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl Coordinate for SharedCoordinate {
    fn cartesian_form(&self) -> &CartesianPoint {
        match self {
            SharedCoordinate::Cartesian(point) => point.cartesian_form(),
            SharedCoordinate::Spherical(point) => point.cartesian_form(),
        }
    }

    fn spherical_form(&self) -> Result<SphericalPoint> {
        match self {
            SharedCoordinate::Cartesian(point) => point.spherical_form(),
            SharedCoordinate::Spherical(point) => point.spherical_form(),
        }
    }

    fn to_cartesian(&self) -> Result<CartesianPoint> {
        match self {
            SharedCoordinate::Cartesian(point) => point.to_cartesian(),
            SharedCoordinate::Spherical(point) => point.to_cartesian(),
        }
    }
}

impl From<Arc<CartesianPoint>> for SharedCoordinate {
    fn from(point: Arc<CartesianPoint>) -> Self {
        SharedCoordinate::Cartesian(point)
    }
}

impl From<Arc<SphericalPoint>> for SharedCoordinate {
    fn from(point: Arc<SphericalPoint>) -> Self {
        SharedCoordinate::Spherical(point)
    }
}

impl PartialEq for SharedCoordinate {
    fn eq(&self, other: &Self) -> bool {
        self.is_equal(other)
    }
}

impl Eq for SharedCoordinate {}

impl Hash for SharedCoordinate {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical_form().hash(state);
    }
}

impl fmt::Display for SharedCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SharedCoordinate::Cartesian(point) => fmt::Display::fmt(point, f),
            SharedCoordinate::Spherical(point) => fmt::Display::fmt(point, f),
        }
    }
}
