//! Geocoord: points in 3-D space as Cartesian or spherical coordinates
//!
//! This crate represents a location relative to Earth's center of mass in two
//! interchangeable forms, converts between them, measures distances and central
//! angles, and shares equal values through a concurrent flyweight cache.
//!
//! Equality never depends on the representation: every coordinate is compared
//! through its Cartesian canonical form (each axis rounded half-up to
//! [`constants::SCALE`] decimal digits).
//!
//! ```rust
//! use geocoord::{Coordinate, CoordinateRegistry};
//! use std::f64::consts::PI;
//! use std::sync::Arc;
//!
//! let registry = CoordinateRegistry::new();
//! let north = registry.spherical(1.0, 0.0, 0.0).unwrap();
//! let z_axis = registry.cartesian(0.0, 0.0, 1.0).unwrap();
//! assert!(north.is_equal(&z_axis));
//!
//! let x_axis = registry.cartesian(1.0, 0.0, 0.0).unwrap();
//! let angle = north.central_angle(&x_axis).unwrap();
//! assert!((angle - PI / 2.0).abs() < 1e-12);
//!
//! let again = registry.cartesian(0.0, 0.0, 1.0).unwrap();
//! assert!(Arc::ptr_eq(&z_axis, &again));
//! ```

use thiserror::Error;

pub mod constants;
pub mod contract;
pub mod coordinates;
pub mod flyweight;
pub mod location;
pub mod registry;
pub mod tolerance;

// Re-export commonly used types
pub use coordinates::cartesian::{CartesianPoint, CENTER};
pub use coordinates::spherical::SphericalPoint;
pub use coordinates::{CanonicalForm, Coordinate, SharedCoordinate};
pub use flyweight::FlyweightCache;
pub use location::{CartesianTriple, Location};
pub use registry::{CoordinateRegistry, RegistryConfig, RegistryStats};

/// Main error type for the geocoord library
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CoordinateError {
    /// A numeric field handed to a constructor lies outside its domain
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A tolerance helper was asked to decide something about a non-finite number
    #[error("Arithmetic error: {0}")]
    ArithmeticError(String),

    /// A computed value broke a class invariant; this is a bug, not bad input
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),
}

/// Result type for geocoord operations
pub type Result<T> = std::result::Result<T, CoordinateError>;
