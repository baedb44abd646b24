//! The Partition Store: the engine's core intermediate shuffle structure.
//!
//! A [`PartitionStore`] owns `P` partitions, each a writer-mutex-guarded list
//! of [`Group`]s (one per distinct key routed to that partition). During the
//! map phase, [`PartitionStore::emit`] is called concurrently from every
//! mapper thread; emits to distinct partitions proceed independently, while
//! emits to the same partition serialize on that partition's mutex.
//!
//! Once every mapper has joined, [`PartitionStore::into_sorted_partitions`]
//! consumes the store and returns each partition's groups sorted by key (and
//! each group's values sorted) as a plain, lock-free `Vec<Group>` -- the
//! store itself ceases to exist once map phase is over, enforcing the
//! populating-to-sorted transition at the type level: there is no type that
//! lets a reducer accidentally reach back into the map-phase locking scheme.

use crate::metrics::Metrics;
use std::cell::Cell;
use std::sync::{Arc, Mutex};
use std::thread;

/// Initial capacity for a partition's group list and a group's value list.
///
/// A small starting size that amortizes cheaply into Vec's geometric
/// doubling as a partition or group grows past it.
const INITIAL_CAPACITY: usize = 64;

/// One `(key, value-list, cursor)` triple inside a partition.
///
/// `cursor` is read and advanced by the [`crate::Getter`](crate::getter::Getter)
/// during the reduce phase; it is a `Cell` because the reduce phase accesses
/// a partition's groups from a single owning thread (no lock is needed, but
/// the cursor still needs interior mutability since the reducer only holds a
/// shared reference into the group list).
pub struct Group {
    pub(crate) key: String,
    pub(crate) values: Vec<String>,
    pub(crate) cursor: Cell<usize>,
}

impl Group {
    fn new(key: String, value: String) -> Self {
        let mut values = Vec::with_capacity(INITIAL_CAPACITY);
        values.push(value);
        Self { key, values, cursor: Cell::new(0) }
    }

    /// The group's key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The number of values accumulated for this key (after sorting, this is
    /// also the count the [`Getter`](crate::getter::Getter) will yield
    /// before exhausting).
    pub fn value_count(&self) -> usize {
        self.values.len()
    }
}

/// The map-phase intermediate store: `P` mutex-guarded partitions.
pub(crate) struct PartitionStore {
    partitions: Vec<Mutex<Vec<Group>>>,
}

impl PartitionStore {
    pub(crate) fn new(num_partitions: usize) -> Self {
        let partitions = (0..num_partitions)
            .map(|_| Mutex::new(Vec::with_capacity(INITIAL_CAPACITY)))
            .collect();
        Self { partitions }
    }

    pub(crate) fn num_partitions(&self) -> usize {
        self.partitions.len()
    }

    /// Insert `value` into the group for `key` in `partition`, creating the
    /// group if this is the first emit of that key in that partition.
    ///
    /// Acquires the partition's mutex, linearly scans for an existing group
    /// with this key, and appends to it (or creates a new one) before
    /// releasing the mutex. The scan is linear rather than hashed because
    /// emits are already serialized per partition and duplicate-key
    /// locality is typically high in practice, so the O(K) scan does not
    /// dominate -- the sort stage is the formal ordering step, not this one.
    ///
    /// # Panics
    ///
    /// Panics if `partition >= num_partitions` -- an out-of-range partition
    /// index is a contract violation by the partitioner; the closest safe-Rust
    /// analogue to "caller-supplied code broke its contract" is a panic
    /// rather than silent corruption.
    pub(crate) fn emit(&self, partition: usize, key: &str, value: &str) {
        let mut groups = self.partitions[partition].lock().unwrap();
        if let Some(group) = groups.iter_mut().find(|g| g.key == key) {
            group.values.push(value.to_string());
        } else {
            groups.push(Group::new(key.to_string(), value.to_string()));
        }
    }

    /// Consume the store, sorting each partition's groups by key and each
    /// group's values, in parallel across partitions -- partitions are
    /// independent, so sorting them concurrently is as correct as sorting
    /// them one at a time.
    ///
    /// The returned `Vec<Vec<Group>>` is plain data with no locking --
    /// ownership of partition `i` is handed wholesale to reduce worker `i`.
    pub(crate) fn into_sorted_partitions(self, metrics: Option<&Arc<Metrics>>) -> Vec<Vec<Group>> {
        let unsorted: Vec<Vec<Group>> = self
            .partitions
            .into_iter()
            .map(|m| m.into_inner().unwrap())
            .collect();

        thread::scope(|scope| {
            let handles: Vec<_> = unsorted
                .into_iter()
                .map(|mut groups| {
                    let metrics = metrics.cloned();
                    scope.spawn(move || {
                        groups.sort_by(|a, b| a.key.cmp(&b.key));
                        for group in &mut groups {
                            group.values.sort();
                        }
                        if let Some(metrics) = &metrics {
                            metrics.record_partition_sorted();
                        }
                        groups
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emit_groups_by_key_within_a_partition() {
        let store = PartitionStore::new(1);
        store.emit(0, "a", "1");
        store.emit(0, "a", "2");
        store.emit(0, "b", "3");
        let groups = &store.partitions[0].lock().unwrap();
        assert_eq!(groups.len(), 2);
        let a = groups.iter().find(|g| g.key == "a").unwrap();
        assert_eq!(a.values, vec!["1".to_string(), "2".to_string()]);
    }

    #[test]
    fn distinct_partitions_stay_independent() {
        let store = PartitionStore::new(2);
        store.emit(0, "x", "1");
        store.emit(1, "y", "2");
        assert_eq!(store.partitions[0].lock().unwrap().len(), 1);
        assert_eq!(store.partitions[1].lock().unwrap().len(), 1);
    }

    #[test]
    fn into_sorted_partitions_sorts_keys_and_values() {
        let store = PartitionStore::new(1);
        store.emit(0, "b", "2");
        store.emit(0, "a", "9");
        store.emit(0, "a", "1");

        let partitions = store.into_sorted_partitions(None);
        assert_eq!(partitions.len(), 1);
        let groups = &partitions[0];
        assert_eq!(groups[0].key(), "a");
        assert_eq!(groups[0].value_count(), 2);
        assert_eq!(groups[1].key(), "b");
    }

    #[test]
    fn into_sorted_partitions_records_one_metric_per_partition() {
        let store = PartitionStore::new(3);
        let metrics = Arc::new(Metrics::new());
        let _ = store.into_sorted_partitions(Some(&metrics));
        assert_eq!(metrics.snapshot().partitions_sorted, 3);
    }
}
