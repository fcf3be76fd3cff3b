//! Concurrent value-sharing cache for immutable coordinates

use crate::coordinates::{CanonicalForm, Coordinate};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use log::{debug, trace};
use std::sync::Arc;

/// Maps canonical forms to the one shared instance that represents them
///
/// Keys are the full [`CanonicalForm`] rather than a digest of it, so two
/// unequal coordinates can never land on the same slot and two equal ones
/// always do.
pub struct FlyweightCache<T> {
    entries: DashMap<CanonicalForm, Arc<T>>,
}

impl<T: Coordinate> FlyweightCache<T> {
    /// Creates an empty cache
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Creates an empty cache sized for `capacity` instances
    ///
    /// # Arguments
    /// * `capacity` - Number of instances to reserve room for
    /// * `shard_amount` - Number of lock shards; a power of two greater than 1
    pub(crate) fn with_capacity_and_shard_amount(capacity: usize, shard_amount: Option<usize>) -> Self {
        let entries = match shard_amount {
            Some(shards) => DashMap::with_capacity_and_shard_amount(capacity, shards),
            None => DashMap::with_capacity(capacity),
        };
        Self { entries }
    }

    /// Returns the shared instance equal to `value`, registering `value` if there is none
    ///
    /// Lookup and insertion happen under the same shard lock, so concurrent
    /// callers racing with equal values all receive the same instance.
    pub fn get_or_insert(&self, value: T) -> Arc<T> {
        match self.entries.entry(value.canonical_form().clone()) {
            Entry::Occupied(entry) => {
                trace!("Reusing shared instance for {}", entry.key());
                Arc::clone(entry.get())
            }
            Entry::Vacant(entry) => {
                debug!("Registering shared instance for {}", entry.key());
                let shared = Arc::new(value);
                entry.insert(Arc::clone(&shared));
                shared
            }
        }
    }

    /// Gets the shared instance for `key`, if one is registered
    pub fn get(&self, key: &CanonicalForm) -> Option<Arc<T>> {
        self.entries.get(key).map(|entry| Arc::clone(entry.value()))
    }

    /// Returns whether an instance equal to `value` is registered
    pub fn contains(&self, value: &T) -> bool {
        self.entries.contains_key(value.canonical_form())
    }

    /// Returns the number of shared instances
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the cache is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T: Coordinate> Default for FlyweightCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coordinates::{CartesianPoint, SphericalPoint};
    use std::f64::consts::PI;
    use std::thread;

    #[test]
    fn test_equal_values_share_one_instance() {
        let cache = FlyweightCache::new();

        let first = cache.get_or_insert(CartesianPoint::new(3.0, 7.0, 9.0).unwrap());
        let second = cache.get_or_insert(CartesianPoint::new(3.0 + 1e-13, 7.0, 9.0).unwrap());

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.x(), 3.0);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_unequal_values_get_own_slots() {
        let cache = FlyweightCache::new();

        let a = cache.get_or_insert(CartesianPoint::new(3.0, 7.0, 9.0).unwrap());
        let b = cache.get_or_insert(CartesianPoint::new(3.0 + 2e-12, 7.0, 9.0).unwrap());

        assert!(!Arc::ptr_eq(&a, &b));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_get_and_contains() {
        let cache: FlyweightCache<SphericalPoint> = FlyweightCache::default();
        let point = SphericalPoint::new(1.0, PI / 2.0, PI).unwrap();
        let key = point.canonical_form().clone();

        assert!(cache.is_empty());
        assert!(cache.get(&key).is_none());
        assert!(!cache.contains(&point));

        let shared = cache.get_or_insert(point.clone());
        assert!(cache.contains(&point));
        assert!(Arc::ptr_eq(&shared, &cache.get(&key).unwrap()));
    }

    #[test]
    fn test_concurrent_inserts_agree() {
        let cache = Arc::new(FlyweightCache::with_capacity_and_shard_amount(16, Some(4)));

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let cache = Arc::clone(&cache);
                thread::spawn(move || {
                    let jitter = i as f64 * 1e-14;
                    cache.get_or_insert(CartesianPoint::new(1.0 + jitter, 2.0, 3.0).unwrap())
                })
            })
            .collect();

        let shared: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        for instance in &shared[1..] {
            assert!(Arc::ptr_eq(&shared[0], instance));
        }
        assert_eq!(cache.len(), 1);
    }
}
