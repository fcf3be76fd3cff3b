//! Constants module for coordinate calculations

use std::f64::consts::PI;

// Canonical form
/// Digits to the right of the decimal point that take part in equality and hashing
pub const SCALE: u32 = 12;

// Angles
/// Tau (2*PI) for full circle
pub const TWO_PI: f64 = 2.0 * PI;
/// Degrees to radians conversion factor
pub const DEG2RAD: f64 = PI / 180.0;
/// Radians to degrees conversion factor
pub const RAD2DEG: f64 = 180.0 / PI;

// Contracts
/// Relative distance a conversion round trip may drift before it counts as broken.
///
/// At Earth scale (~6.4e6 m) one ULP is already ~1e-9 m, well below the
/// `SCALE` resolution, so the round-trip check falls back to this bound.
pub const ROUND_TRIP_TOLERANCE: f64 = 1e-10;

// Earth constants
/// Earth's equatorial radius in meters
pub const EARTH_RADIUS: f64 = 6_378_136.6;

// Persistence
/// Coordinate a `Location` takes when nothing else is known
pub const DEFAULT_LOCATION: (f64, f64, f64) = (1.2, 3.4, 5.6);
