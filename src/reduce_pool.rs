//! The Reduce Worker Pool: exactly `P` workers, one per partition.
//!
//! Each worker owns its partition's sorted groups outright (moved in from
//! [`PartitionStore::into_sorted_partitions`](crate::partition::PartitionStore::into_sorted_partitions))
//! and walks them in ascending key order, invoking the user reducer once per
//! group with a [`Getter`] scoped to that partition. Because exactly one
//! thread ever touches a given partition during this phase, no
//! synchronization is needed here.

use crate::getter::Getter;
use crate::metrics::Metrics;
use crate::partition::Group;
use std::sync::Arc;
use std::thread;

/// Shape of a user-supplied reducer: `(key, getter, partition_number) -> ()`.
pub type ReducerFn = dyn for<'p> Fn(&str, &Getter<'p>, usize) + Send + Sync;

/// Run the reduce phase: one worker per partition, each draining its
/// partition's groups in sorted order.
///
/// `partitions[i]` is handed to worker `i`; `partitions.len()` is always the
/// configured reducer count `M`, which is always equal to the partition
/// count `P` -- one reduce worker per partition, no exceptions.
pub(crate) fn run_reduce_phase(partitions: Vec<Vec<Group>>, reducer: &ReducerFn, metrics: Option<&Arc<Metrics>>) {
    thread::scope(|scope| {
        for (partition_number, groups) in partitions.into_iter().enumerate() {
            let metrics = metrics.cloned();
            scope.spawn(move || {
                let getter = Getter::new(&groups, metrics.clone());
                for group in &groups {
                    reducer(group.key(), &getter, partition_number);
                    if let Some(metrics) = &metrics {
                        metrics.record_key_reduced();
                    }
                }
            });
        }
    });
}
