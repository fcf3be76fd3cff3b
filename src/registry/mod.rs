//! Coordinate registry
//!
//! The registry is the construction service for shared coordinates. It owns
//! one flyweight cache per representation and is passed to whoever needs to
//! build coordinates; there is no process-global cache.

use crate::coordinates::{CartesianPoint, Coordinate, SphericalPoint, CENTER};
use crate::flyweight::FlyweightCache;
use crate::location::CartesianTriple;
use crate::{CoordinateError, Result};
use log::debug;
use std::sync::Arc;

/// Configuration for the registry's caches
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Instances each cache reserves room for up front
    pub initial_capacity: usize,
    /// Lock shards per cache; `None` lets dashmap pick from the CPU count
    pub shard_amount: Option<usize>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            initial_capacity: 64,
            shard_amount: None,
        }
    }
}

impl RegistryConfig {
    /// Set initial capacity
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    /// Set shard amount
    pub fn with_shard_amount(mut self, shards: usize) -> Self {
        self.shard_amount = Some(shards);
        self
    }

    fn validate(&self) -> Result<()> {
        match self.shard_amount {
            Some(shards) if shards <= 1 || !shards.is_power_of_two() => {
                Err(CoordinateError::InvalidArgument(format!(
                    "shard amount must be a power of two greater than 1, got {}",
                    shards
                )))
            }
            _ => Ok(()),
        }
    }
}

/// Number of shared instances per representation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistryStats {
    /// Shared Cartesian instances, including the center
    pub cartesian_instances: usize,
    /// Shared spherical instances
    pub spherical_instances: usize,
}

/// Builds coordinates and hands out the shared instance for each value
///
/// ```rust
/// use geocoord::{Coordinate, CoordinateRegistry};
/// use std::sync::Arc;
///
/// let registry = CoordinateRegistry::new();
/// let a = registry.cartesian(1.0, 2.0, 3.0).unwrap();
/// let b = registry.cartesian(1.0, 2.0, 3.0 + 1e-13).unwrap();
/// assert!(Arc::ptr_eq(&a, &b));
/// ```
pub struct CoordinateRegistry {
    cartesian: FlyweightCache<CartesianPoint>,
    spherical: FlyweightCache<SphericalPoint>,
    center: Arc<CartesianPoint>,
}

impl CoordinateRegistry {
    /// Creates a registry with default configuration
    pub fn new() -> Self {
        Self::build(&RegistryConfig::default())
    }

    /// Creates a registry with the given configuration
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if the shard amount is not a power of two greater than 1.
    pub fn with_config(config: RegistryConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(&config))
    }

    fn build(config: &RegistryConfig) -> Self {
        let cartesian =
            FlyweightCache::with_capacity_and_shard_amount(config.initial_capacity, config.shard_amount);
        let spherical =
            FlyweightCache::with_capacity_and_shard_amount(config.initial_capacity, config.shard_amount);
        let center = cartesian.get_or_insert(CENTER.clone());

        debug!("Created coordinate registry with {:?}", config);
        Self {
            cartesian,
            spherical,
            center,
        }
    }

    /// Shared Cartesian point for `(x, y, z)`
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if any axis is infinite or NaN.
    pub fn cartesian(&self, x: f64, y: f64, z: f64) -> Result<Arc<CartesianPoint>> {
        Ok(self.share_cartesian(CartesianPoint::new(x, y, z)?))
    }

    /// Shared spherical point for `(radius, theta, phi)`
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if any argument lies outside its domain.
    pub fn spherical(&self, radius: f64, theta: f64, phi: f64) -> Result<Arc<SphericalPoint>> {
        Ok(self.share_spherical(SphericalPoint::new(radius, theta, phi)?))
    }

    /// The shared instance of Earth's center of mass
    pub fn center(&self) -> Arc<CartesianPoint> {
        Arc::clone(&self.center)
    }

    /// Shared instance equal to `point`
    pub fn share_cartesian(&self, point: CartesianPoint) -> Arc<CartesianPoint> {
        self.cartesian.get_or_insert(point)
    }

    /// Shared instance equal to `point`
    pub fn share_spherical(&self, point: SphericalPoint) -> Arc<SphericalPoint> {
        self.spherical.get_or_insert(point)
    }

    /// Converts `coordinate` to Cartesian form and returns the shared instance
    pub fn as_cartesian(&self, coordinate: &dyn Coordinate) -> Result<Arc<CartesianPoint>> {
        Ok(self.share_cartesian(coordinate.to_cartesian()?))
    }

    /// Converts `coordinate` to spherical form and returns the shared instance
    pub fn as_spherical(&self, coordinate: &dyn Coordinate) -> Result<Arc<SphericalPoint>> {
        Ok(self.share_spherical(coordinate.to_spherical()?))
    }

    /// Rebuilds a coordinate from the triple a storage collaborator read back
    pub fn from_triple(&self, triple: CartesianTriple) -> Result<Arc<CartesianPoint>> {
        self.cartesian(triple.x, triple.y, triple.z)
    }

    /// Returns registry statistics
    pub fn stats(&self) -> RegistryStats {
        RegistryStats {
            cartesian_instances: self.cartesian.len(),
            spherical_instances: self.spherical.len(),
        }
    }
}

impl Default for CoordinateRegistry {
    fn default() -> Self {
        Self::new()
    }
}
