//! Storage hand-off for coordinates
//!
//! A persisted coordinate is always its Cartesian `(x, y, z)` triple. The
//! record is plain serde data; whatever stores it is free to pick the format.

use crate::constants::DEFAULT_LOCATION;
use crate::coordinates::{CartesianPoint, Coordinate, SharedCoordinate};
use crate::registry::CoordinateRegistry;
use crate::{CoordinateError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Cartesian axes as written to and read from storage, in meters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CartesianTriple {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl From<&CartesianPoint> for CartesianTriple {
    fn from(point: &CartesianPoint) -> Self {
        CartesianTriple {
            x: point.x(),
            y: point.y(),
            z: point.z(),
        }
    }
}

impl From<CartesianPoint> for CartesianTriple {
    fn from(point: CartesianPoint) -> Self {
        CartesianTriple::from(&point)
    }
}

impl TryFrom<CartesianTriple> for CartesianPoint {
    type Error = CoordinateError;

    fn try_from(triple: CartesianTriple) -> Result<Self> {
        CartesianPoint::new(triple.x, triple.y, triple.z)
    }
}

/// A place in space, identified by its coordinate
///
/// Two locations are the same place when their coordinates are equal,
/// whichever representation each holds.
#[derive(Debug, Clone)]
pub struct Location {
    coordinate: SharedCoordinate,
}

impl Location {
    /// Location at an already shared coordinate
    pub fn new(coordinate: impl Into<SharedCoordinate>) -> Self {
        Location {
            coordinate: coordinate.into(),
        }
    }

    /// Location at the default coordinate `(1.2, 3.4, 5.6)`
    pub fn default_in(registry: &CoordinateRegistry) -> Result<Self> {
        let (x, y, z) = DEFAULT_LOCATION;
        Location::at(registry, x, y, z)
    }

    /// Location at the shared Cartesian point `(x, y, z)`
    pub fn at(registry: &CoordinateRegistry, x: f64, y: f64, z: f64) -> Result<Self> {
        Ok(Location::new(registry.cartesian(x, y, z)?))
    }

    /// The coordinate this location sits at
    pub fn coordinate(&self) -> &SharedCoordinate {
        &self.coordinate
    }

    /// The record a storage collaborator persists for this location
    pub fn write_record(&self) -> CartesianTriple {
        self.coordinate.to_triple()
    }

    /// Rebuilds a location from a stored record
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if the record holds a non-finite axis.
    pub fn read_record(registry: &CoordinateRegistry, record: CartesianTriple) -> Result<Self> {
        Ok(Location::new(registry.from_triple(record)?))
    }
}

impl PartialEq for Location {
    fn eq(&self, other: &Self) -> bool {
        self.coordinate == other.coordinate
    }
}

impl Eq for Location {}

impl Hash for Location {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.coordinate.hash(state);
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Location({})", self.coordinate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_default_location() {
        let registry = CoordinateRegistry::new();
        let location = Location::default_in(&registry).unwrap();

        assert_eq!(
            location.write_record(),
            CartesianTriple {
                x: 1.2,
                y: 3.4,
                z: 5.6
            }
        );
        assert_eq!(location, Location::at(&registry, 1.2, 3.4, 5.6).unwrap());
    }

    #[test]
    fn test_record_round_trip_shares_instance() {
        let registry = CoordinateRegistry::new();
        let location = Location::at(&registry, 92.0, -51.0, 65.25).unwrap();

        let restored = Location::read_record(&registry, location.write_record()).unwrap();
        assert_eq!(restored, location);
        assert!(restored.coordinate().ptr_eq(location.coordinate()));
    }

    #[test]
    fn test_spherical_location_writes_cartesian_record() {
        let registry = CoordinateRegistry::new();
        let location = Location::new(registry.spherical(2.0, PI / 2.0, PI / 2.0).unwrap());

        let record = location.write_record();
        assert!(record.x.abs() < 1e-12);
        assert!((record.y - 2.0).abs() < 1e-12);
        assert!(record.z.abs() < 1e-12);

        let restored = Location::read_record(&registry, record).unwrap();
        assert_eq!(restored, location);
        assert!(!restored.coordinate().ptr_eq(location.coordinate()));
    }

    #[test]
    fn test_read_record_rejects_non_finite() {
        let registry = CoordinateRegistry::new();
        let record = CartesianTriple {
            x: f64::NAN,
            y: 0.0,
            z: 0.0,
        };
        assert!(matches!(
            Location::read_record(&registry, record),
            Err(CoordinateError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_json_record() {
        let registry = CoordinateRegistry::new();
        let location = Location::at(&registry, 1.5, 0.0, -2.0).unwrap();

        let json = serde_json::to_string(&location.write_record()).unwrap();
        assert_eq!(json, r#"{"x":1.5,"y":0.0,"z":-2.0}"#);

        let record: CartesianTriple = serde_json::from_str(&json).unwrap();
        assert_eq!(Location::read_record(&registry, record).unwrap(), location);
    }

    #[test]
    fn test_cartesian_point_serde_validates() {
        let point: CartesianPoint = serde_json::from_str(r#"{"x":3.0,"y":7.0,"z":9.0}"#).unwrap();
        assert_eq!(point, CartesianPoint::new(3.0, 7.0, 9.0).unwrap());

        let json = serde_json::to_string(&point).unwrap();
        assert_eq!(json, r#"{"x":3.0,"y":7.0,"z":9.0}"#);

        assert!(serde_json::from_str::<CartesianPoint>(r#"{"x":3.0,"y":7.0}"#).is_err());
    }

    #[test]
    fn test_locations_as_hash_keys() {
        let registry = CoordinateRegistry::new();
        let a = Location::at(&registry, 0.0, 0.0, 1.0).unwrap();
        let b = Location::new(registry.spherical(1.0, 0.0, 0.0).unwrap());

        let mut set = std::collections::HashSet::new();
        set.insert(a);
        assert!(set.contains(&b));
    }
}
