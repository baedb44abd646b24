//! The Emit Path: the engine-provided entry point mapper code calls.
//!
//! An [`Emitter`] is a cheap, `Clone`able handle mapper workers use to submit
//! `(key, value)` pairs. It is the thread-safe front door to the
//! [`PartitionStore`](crate::partition::PartitionStore): every mapper thread
//! holds its own clone, routes through the user partitioner, and the store
//! itself serializes concurrent writers per partition.

use crate::metrics::Metrics;
use crate::partition::PartitionStore;
use crate::partitioner::PartitionerFn;
use std::sync::Arc;

/// Handle passed to the user mapper so it can submit intermediate pairs.
///
/// Cloning an `Emitter` is cheap (two `Arc` clones) and every clone shares
/// the same underlying partitions -- concurrent `emit` calls across clones
/// are exactly what happens when several mapper threads run at once.
#[derive(Clone)]
pub struct Emitter {
    store: Arc<PartitionStore>,
    partitioner: Arc<PartitionerFn>,
    metrics: Option<Arc<Metrics>>,
}

impl Emitter {
    pub(crate) fn new(
        store: Arc<PartitionStore>,
        partitioner: Arc<PartitionerFn>,
        metrics: Option<Arc<Metrics>>,
    ) -> Self {
        Self { store, partitioner, metrics }
    }

    /// Submit a `(key, value)` pair.
    ///
    /// Both strings are copied into engine-owned storage immediately -- the
    /// caller's buffers may be reused or dropped the instant this call
    /// returns.
    ///
    /// # Panics
    ///
    /// Panics if the user partitioner returns an index outside
    /// `[0, num_partitions)` (see [`PartitionStore::emit`]'s panic note).
    pub fn emit(&self, key: &str, value: &str) {
        let partition = (self.partitioner)(key, self.store.num_partitions());
        self.store.emit(partition, key, value);
        if let Some(metrics) = &self.metrics {
            metrics.record_emit();
        }
    }

    /// Number of partitions this emitter routes into (equal to the
    /// configured reducer count).
    pub fn num_partitions(&self) -> usize {
        self.store.num_partitions()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::partitioner::default_hash_partition;

    #[test]
    fn emit_routes_through_the_partitioner() {
        let store = Arc::new(PartitionStore::new(4));
        let partitioner: Arc<PartitionerFn> = Arc::new(|k: &str, p: usize| default_hash_partition(k, p));
        let emitter = Emitter::new(store, partitioner, None);

        emitter.emit("alpha", "1");
        emitter.emit("alpha", "2");
        let store = Arc::try_unwrap(emitter.store).ok().unwrap();
        let partitions = store.into_sorted_partitions(None);
        let total: usize = partitions.iter().map(|p| p.len()).sum();
        assert_eq!(total, 1);
        let group = partitions.iter().flatten().next().unwrap();
        assert_eq!(group.value_count(), 2);
    }

    #[test]
    fn clones_share_the_same_store() {
        let store = Arc::new(PartitionStore::new(1));
        let partitioner: Arc<PartitionerFn> = Arc::new(|_: &str, _: usize| 0);
        let emitter = Emitter::new(store, partitioner, None);

        let clone = emitter.clone();
        clone.emit("k", "v");
        drop(clone);
        let store = Arc::try_unwrap(emitter.store).ok().unwrap();
        let partitions = store.into_sorted_partitions(None);
        assert_eq!(partitions[0].len(), 1);
    }

    #[test]
    fn records_emit_metrics_when_attached() {
        let store = Arc::new(PartitionStore::new(1));
        let partitioner: Arc<PartitionerFn> = Arc::new(|_: &str, _: usize| 0);
        let metrics = Arc::new(Metrics::new());
        let emitter = Emitter::new(store, partitioner, Some(Arc::clone(&metrics)));

        emitter.emit("a", "1");
        emitter.emit("b", "2");
        assert_eq!(metrics.snapshot().emits, 2);
    }
}
