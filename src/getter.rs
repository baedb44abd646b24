//! The per-`(partition, key)` value cursor the reducer pulls from.
//!
//! A [`Getter`] borrows a single partition's already-sorted groups for the
//! duration of one reduce worker's lifetime. The reducer calls
//! [`Getter::get_next`] repeatedly for its current key; the call returns
//! successive values in ascending order, then `None` once exhausted.
//!
//! # The cursor-reset quirk
//!
//! On exhaustion the group's cursor resets to `0` rather than staying past
//! the end. This is an intentional affordance: it lets a reducer re-drain
//! the same key's values by calling `get_next` again, at the cost of a
//! `while let Some(v) = get_next(...)` loop not being safe to re-enter
//! after its first `None` within the same reducer call. The engine keeps
//! this behavior rather than turning it into a one-shot iterator.

use crate::metrics::Metrics;
use crate::partition::Group;
use std::sync::Arc;

/// Borrowed, read-only view the reducer uses to pull values for one key.
///
/// Only the reduce worker that owns `partition_number` ever holds a
/// `Getter` for it, so no locking is required here: the group's cursor is
/// a `Cell<usize>`, mutated through a shared reference.
pub struct Getter<'p> {
    groups: &'p [Group],
    metrics: Option<Arc<Metrics>>,
}

impl<'p> Getter<'p> {
    pub(crate) fn new(groups: &'p [Group], metrics: Option<Arc<Metrics>>) -> Self {
        Self { groups, metrics }
    }

    /// Return the next unvisited value for `key`, or `None` once the group
    /// is exhausted (and reset its cursor to `0` for the next drain).
    ///
    /// `partition_number` is accepted to keep the engine-provided `Getter`
    /// signature uniform with the rest of the call, but this implementation
    /// only ever sees its own partition, so the argument is not otherwise
    /// used.
    pub fn get_next(&self, key: &str, _partition_number: usize) -> Option<&'p str> {
        let group = self.groups.iter().find(|g| g.key == key)?;
        let i = group.cursor.get();
        if i < group.values.len() {
            group.cursor.set(i + 1);
            if let Some(metrics) = &self.metrics {
                metrics.record_value_drained();
            }
            Some(&group.values[i])
        } else {
            group.cursor.set(0);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn group(key: &str, values: &[&str]) -> Group {
        Group {
            key: key.to_string(),
            values: values.iter().map(|s| s.to_string()).collect(),
            cursor: Cell::new(0),
        }
    }

    #[test]
    fn drains_values_in_order_then_absent() {
        let groups = vec![group("k", &["1", "2", "3"])];
        let getter = Getter::new(&groups, None);
        assert_eq!(getter.get_next("k", 0), Some("1"));
        assert_eq!(getter.get_next("k", 0), Some("2"));
        assert_eq!(getter.get_next("k", 0), Some("3"));
        assert_eq!(getter.get_next("k", 0), None);
    }

    #[test]
    fn missing_key_is_absent() {
        let groups = vec![group("k", &["1"])];
        let getter = Getter::new(&groups, None);
        assert_eq!(getter.get_next("missing", 0), None);
    }

    #[test]
    fn cursor_resets_after_exhaustion_allowing_redrain() {
        let groups = vec![group("k", &["1", "2"])];
        let getter = Getter::new(&groups, None);
        assert_eq!(getter.get_next("k", 0), Some("1"));
        assert_eq!(getter.get_next("k", 0), Some("2"));
        assert_eq!(getter.get_next("k", 0), None);
        // Re-invocation replays the same sequence.
        assert_eq!(getter.get_next("k", 0), Some("1"));
        assert_eq!(getter.get_next("k", 0), Some("2"));
        assert_eq!(getter.get_next("k", 0), None);
    }

    #[test]
    fn records_one_value_drained_metric_per_successful_get_next() {
        let groups = vec![group("k", &["1", "2"])];
        let metrics = Arc::new(Metrics::new());
        let getter = Getter::new(&groups, Some(Arc::clone(&metrics)));
        getter.get_next("k", 0);
        getter.get_next("k", 0);
        getter.get_next("k", 0); // exhausted, no metric recorded
        assert_eq!(metrics.snapshot().values_drained, 2);
    }
}
