//! Reusable entity pools
//!
//! Bullets and particles come and go hundreds of times per second; recycling
//! released instances keeps the per-tick heap churn at zero once the pools
//! are warm. Removal swap-pops from the live list (O(1), order not
//! preserved - render order for transient effects is not gameplay
//! significant).

use serde::{Deserialize, Serialize};

/// A capped pool of recyclable entities.
///
/// Every entity is in exactly one of the two lists: `live` (being updated
/// and rendered) or `free` (waiting for reuse). `spawn` at capacity is a
/// silent drop - a backpressure valve, not an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pool<T> {
    live: Vec<T>,
    /// Recycled storage only; not worth persisting
    #[serde(skip)]
    free: Vec<T>,
    capacity: usize,
}

impl<T> Pool<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            live: Vec::with_capacity(capacity),
            free: Vec::new(),
            capacity,
        }
    }

    /// Activate an entity: reuse a freed instance or build one with `make`,
    /// then let `init` overwrite its state. Returns `false` when the live
    /// count is at capacity and the spawn was dropped.
    pub fn spawn(&mut self, make: impl FnOnce() -> T, init: impl FnOnce(&mut T)) -> bool {
        if self.live.len() >= self.capacity {
            log::debug!("pool at capacity ({}), spawn dropped", self.capacity);
            return false;
        }
        let mut item = self.free.pop().unwrap_or_else(make);
        init(&mut item);
        self.live.push(item);
        true
    }

    /// Deactivate the live entity at `index` (swap-remove).
    pub fn release(&mut self, index: usize) {
        let item = self.live.swap_remove(index);
        self.free.push(item);
    }

    /// Sweep: release every live entity for which `keep` returns false.
    /// Iterates with swap-removal, so `keep` sees entities in no particular
    /// order.
    pub fn retain_recycle(&mut self, mut keep: impl FnMut(&mut T) -> bool) {
        let mut i = 0;
        while i < self.live.len() {
            if keep(&mut self.live[i]) {
                i += 1;
            } else {
                self.release(i);
            }
        }
    }

    /// Release everything (restart, wave reset).
    pub fn clear(&mut self) {
        self.free.append(&mut self.live);
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Live + free; constant between spawns that construct new entities.
    pub fn total(&self) -> usize {
        self.live.len() + self.free.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.live.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.live.iter_mut()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.live
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.live
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.live.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.live.get_mut(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_spawn_recycles_freed_instances() {
        let mut pool: Pool<u32> = Pool::new(4);
        assert!(pool.spawn(|| 1, |v| *v = 1));
        assert!(pool.spawn(|| 2, |v| *v = 2));
        assert_eq!(pool.total(), 2);

        pool.release(0);
        assert_eq!(pool.len(), 1);
        assert_eq!(pool.total(), 2);

        // Reuses the freed slot instead of constructing
        assert!(pool.spawn(|| unreachable!(), |v| *v = 3));
        assert_eq!(pool.total(), 2);
    }

    #[test]
    fn test_spawn_at_capacity_drops() {
        let mut pool: Pool<u32> = Pool::new(2);
        assert!(pool.spawn(|| 0, |_| {}));
        assert!(pool.spawn(|| 0, |_| {}));
        assert!(!pool.spawn(|| 0, |_| {}));
        assert_eq!(pool.len(), 2);
    }

    #[test]
    fn test_retain_recycle_sweeps_dead() {
        let mut pool: Pool<u32> = Pool::new(8);
        for i in 0..6 {
            pool.spawn(|| 0, |v| *v = i);
        }
        pool.retain_recycle(|v| *v % 2 == 0);
        assert_eq!(pool.len(), 3);
        assert_eq!(pool.total(), 6);
        assert!(pool.iter().all(|v| *v % 2 == 0));
    }

    #[test]
    fn test_clear_keeps_storage() {
        let mut pool: Pool<u32> = Pool::new(8);
        for _ in 0..5 {
            pool.spawn(|| 0, |_| {});
        }
        pool.clear();
        assert!(pool.is_empty());
        assert_eq!(pool.total(), 5);
    }

    proptest! {
        /// Single-membership invariant: across any spawn/release sequence,
        /// live never exceeds capacity and no instance is lost or duplicated
        /// (total only grows when a spawn had nothing to recycle).
        #[test]
        fn prop_pool_consistency(ops in prop::collection::vec((any::<bool>(), 0usize..16), 0..200)) {
            let mut pool: Pool<u64> = Pool::new(8);
            let mut constructed = 0usize;
            for (is_spawn, idx) in ops {
                if is_spawn {
                    let had_free = pool.total() > pool.len();
                    let before = pool.total();
                    let ok = pool.spawn(|| 0, |_| {});
                    if ok && !had_free {
                        constructed += 1;
                        prop_assert_eq!(pool.total(), before + 1);
                    } else {
                        prop_assert_eq!(pool.total(), before);
                    }
                } else if !pool.is_empty() {
                    let before = pool.total();
                    pool.release(idx % pool.len());
                    prop_assert_eq!(pool.total(), before);
                }
                prop_assert!(pool.len() <= pool.capacity());
                prop_assert_eq!(pool.total(), constructed);
            }
        }
    }
}
