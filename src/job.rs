//! The top-level `Run` entry point and job configuration.
//!
//! This module wires the components together in phase order: build the
//! partition store, run the map phase to completion, sort each partition,
//! then run the reduce phase to completion. There is no checkpointing and
//! no recovery -- a panicking mapper or reducer propagates out of
//! `run`/`Job::run` just like any other Rust panic across `thread::scope`,
//! and the job is simply over; user-code and worker failures are not the
//! engine's problem to paper over.

use crate::emit::Emitter;
use crate::file_queue::{run_map_phase, MapperFn};
use crate::getter::Getter;
use crate::metrics::{Metrics, MetricsSnapshot};
use crate::partition::PartitionStore;
use crate::partitioner::{boxed, default_hash_partition, PartitionerFn};
use crate::reduce_pool::{run_reduce_phase, ReducerFn};
use std::fmt;
use std::sync::Arc;

/// Configuration errors reported at `Run` entry, before any worker starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// No input files were supplied.
    NoInputFiles,
    /// `num_mappers` was zero.
    ZeroMappers,
    /// `num_reducers` was zero.
    ZeroReducers,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NoInputFiles => write!(f, "no input files were supplied"),
            ConfigError::ZeroMappers => write!(f, "num_mappers must be at least 1"),
            ConfigError::ZeroReducers => write!(f, "num_reducers must be at least 1"),
        }
    }
}

impl std::error::Error for ConfigError {}

fn validate(files: &[String], num_mappers: usize, num_reducers: usize) -> Result<(), ConfigError> {
    if files.is_empty() {
        return Err(ConfigError::NoInputFiles);
    }
    if num_mappers == 0 {
        return Err(ConfigError::ZeroMappers);
    }
    if num_reducers == 0 {
        return Err(ConfigError::ZeroReducers);
    }
    Ok(())
}

/// Run a MapReduce job to completion with the default (djb2) partitioner.
///
/// Takes the input file list directly rather than a C-style `argv` with a
/// discarded program-name slot, since CLI argument parsing is out of
/// scope for this crate; the default partitioner is used automatically --
/// call [`run_with_partitioner`] to supply a custom one.
pub fn run(
    files: &[String],
    mapper: impl Fn(&str, &Emitter) + Send + Sync + 'static,
    num_mappers: usize,
    reducer: impl for<'p> Fn(&str, &Getter<'p>, usize) + Send + Sync + 'static,
    num_reducers: usize,
) -> Result<(), ConfigError> {
    run_with_partitioner(files, mapper, num_mappers, reducer, num_reducers, default_hash_partition)
}

/// Like [`run`], but with a user-supplied partitioner instead of the
/// default djb2 hash.
///
/// # Panics
///
/// Panics if `partitioner` ever returns an index outside
/// `[0, num_reducers)` -- see [`PartitionStore::emit`]'s panic note.
pub fn run_with_partitioner(
    files: &[String],
    mapper: impl Fn(&str, &Emitter) + Send + Sync + 'static,
    num_mappers: usize,
    reducer: impl for<'p> Fn(&str, &Getter<'p>, usize) + Send + Sync + 'static,
    num_reducers: usize,
    partitioner: impl Fn(&str, usize) -> usize + Send + Sync + 'static,
) -> Result<(), ConfigError> {
    validate(files, num_mappers, num_reducers)?;
    execute(files, &mapper, num_mappers, &reducer, num_reducers, boxed(partitioner), None);
    Ok(())
}

/// Richer entry point layered over [`run`]/[`run_with_partitioner`]:
/// bundles worker counts with an optional [`Metrics`] handle so a caller
/// can read counters back after the job completes.
pub struct Job {
    pub num_mappers: usize,
    pub num_reducers: usize,
    pub metrics: Option<Arc<Metrics>>,
}

impl Default for Job {
    fn default() -> Self {
        Self {
            num_mappers: num_cpus::get().max(1),
            num_reducers: num_cpus::get().max(1),
            metrics: None,
        }
    }
}

impl Job {
    /// Run the job with the default partitioner, wiring `self.metrics` (if
    /// set) through both phases.
    pub fn run(
        &self,
        files: &[String],
        mapper: impl Fn(&str, &Emitter) + Send + Sync + 'static,
        reducer: impl for<'p> Fn(&str, &Getter<'p>, usize) + Send + Sync + 'static,
    ) -> Result<(), ConfigError> {
        self.run_with_partitioner(files, mapper, reducer, default_hash_partition)
    }

    /// Run the job with a custom partitioner.
    pub fn run_with_partitioner(
        &self,
        files: &[String],
        mapper: impl Fn(&str, &Emitter) + Send + Sync + 'static,
        reducer: impl for<'p> Fn(&str, &Getter<'p>, usize) + Send + Sync + 'static,
        partitioner: impl Fn(&str, usize) -> usize + Send + Sync + 'static,
    ) -> Result<(), ConfigError> {
        validate(files, self.num_mappers, self.num_reducers)?;
        execute(
            files,
            &mapper,
            self.num_mappers,
            &reducer,
            self.num_reducers,
            boxed(partitioner),
            self.metrics.clone(),
        );
        Ok(())
    }

    /// Read a snapshot of `self.metrics`, if a collector is attached.
    pub fn metrics_snapshot(&self) -> Option<MetricsSnapshot> {
        self.metrics.as_ref().map(|m| m.snapshot())
    }
}

fn execute(
    files: &[String],
    mapper: &MapperFn,
    num_mappers: usize,
    reducer: &ReducerFn,
    num_reducers: usize,
    partitioner: Arc<PartitionerFn>,
    metrics: Option<Arc<Metrics>>,
) {
    let store = Arc::new(PartitionStore::new(num_reducers));
    let emitter = Emitter::new(Arc::clone(&store), partitioner, metrics.clone());

    run_map_phase(files.to_vec(), num_mappers, mapper, emitter, metrics.as_ref());

    // The map phase has joined every worker, so every `Emitter` clone that
    // held an `Arc<PartitionStore>` has been dropped: this is the sole
    // remaining reference, matching the POPULATING -> SORTED barrier.
    let store = Arc::try_unwrap(store)
        .unwrap_or_else(|_| unreachable!("all Emitter clones are dropped once the map phase joins"));
    let partitions = store.into_sorted_partitions(metrics.as_ref());

    run_reduce_phase(partitions, reducer, metrics.as_ref());
}
