//! Recorders that capture what mappers/reducers were invoked with.
//!
//! Both phases run user code on worker threads spawned inside
//! `thread::scope`, so a test that wants to inspect what happened needs
//! `Arc<Mutex<_>>`-backed shared state and a closure that locks it. These
//! wrappers hide that boilerplate behind a `.reducer()`/`.mapper()` method
//! that returns a plain closure suitable for [`run`](crate::run).

use crate::{Emitter, Getter};
use std::sync::{Arc, Mutex};

/// Captures every `(key, values)` group a reducer was invoked with.
///
/// Clone-cheap: internally an `Arc<Mutex<Vec<_>>>`, so you can hand
/// `recorder.reducer()` to [`run`](crate::run) and still read
/// `recorder` afterwards.
#[derive(Clone, Default)]
pub struct CollectingReducer {
    groups: Arc<Mutex<Vec<(String, Vec<String>)>>>,
}

impl CollectingReducer {
    /// Create a new, empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the closure to pass as the `reducer` argument to `run`/`Job::run`.
    ///
    /// Drains every value for the group's key via the supplied [`Getter`]
    /// and records `(key, values)` in call order.
    pub fn reducer(&self) -> impl for<'p> Fn(&str, &Getter<'p>, usize) + Send + Sync + 'static {
        let groups = Arc::clone(&self.groups);
        move |key: &str, getter: &Getter<'_>, partition: usize| {
            let mut values = Vec::new();
            while let Some(v) = getter.get_next(key, partition) {
                values.push(v.to_string());
            }
            groups.lock().unwrap().push((key.to_string(), values));
        }
    }

    /// The recorded groups in the order the reducer workers happened to
    /// deliver them (there is no cross-partition ordering guarantee).
    #[must_use]
    pub fn into_groups(self) -> Vec<(String, Vec<String>)> {
        Arc::try_unwrap(self.groups)
            .map(|mutex| mutex.into_inner().unwrap())
            .unwrap_or_else(|arc| arc.lock().unwrap().clone())
    }

    /// Like [`Self::into_groups`], but sorted by key with each value list
    /// sorted, for assertions that don't care about delivery order.
    #[must_use]
    pub fn into_sorted_groups(self) -> Vec<(String, Vec<String>)> {
        let mut groups = self.into_groups();
        for (_, values) in &mut groups {
            values.sort();
        }
        groups.sort_by(|a, b| a.0.cmp(&b.0));
        groups
    }
}

/// Captures every file name a mapper was invoked with, without running any
/// real mapping logic -- useful for isolating map-phase scheduling from
/// mapper behavior.
#[derive(Clone, Default)]
pub struct CollectingMapper {
    files: Arc<Mutex<Vec<String>>>,
}

impl CollectingMapper {
    /// Create a new, empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the closure to pass as the `mapper` argument to `run`/`Job::run`.
    ///
    /// Records the file name and emits nothing.
    pub fn mapper(&self) -> impl Fn(&str, &Emitter) + Send + Sync + 'static {
        let files = Arc::clone(&self.files);
        move |file: &str, _emitter: &Emitter| {
            files.lock().unwrap().push(file.to_string());
        }
    }

    /// The file names observed, in claim order.
    #[must_use]
    pub fn into_files(self) -> Vec<String> {
        Arc::try_unwrap(self.files)
            .map(|mutex| mutex.into_inner().unwrap())
            .unwrap_or_else(|arc| arc.lock().unwrap().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::run;

    #[test]
    fn collecting_reducer_records_groups() {
        let files = vec!["f".to_string()];
        let recorder = CollectingReducer::new();
        let reducer = recorder.reducer();
        let mapper = |_file: &str, emitter: &Emitter| {
            emitter.emit("a", "1");
            emitter.emit("a", "2");
            emitter.emit("b", "3");
        };
        run(&files, mapper, 1, reducer, 2).unwrap();
        let groups = recorder.into_sorted_groups();
        assert_eq!(
            groups,
            vec![
                ("a".to_string(), vec!["1".to_string(), "2".to_string()]),
                ("b".to_string(), vec!["3".to_string()]),
            ]
        );
    }

    #[test]
    fn collecting_mapper_records_every_file() {
        let files: Vec<String> = (0..5).map(|i| format!("f{i}")).collect();
        let recorder = CollectingMapper::new();
        let mapper = recorder.mapper();
        let reducer = |_k: &str, _g: &Getter<'_>, _p: usize| {};
        run(&files, mapper, 3, reducer, 1).unwrap();
        let mut seen = recorder.into_files();
        seen.sort();
        let mut expected = files;
        expected.sort();
        assert_eq!(seen, expected);
    }
}
