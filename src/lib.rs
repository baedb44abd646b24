//! A single-process, multi-threaded MapReduce execution engine.
//!
//! This crate runs a MapReduce job entirely in-process over OS threads: a
//! map worker pool reads input files and calls a user-supplied mapper, the
//! engine partitions and sorts the emitted `(key, value)` pairs, and a
//! reduce worker pool delivers each partition's groups to a user-supplied
//! reducer in key order. There is no network, no persistence, and no
//! distribution across machines -- this is the single-host execution model
//! of the classic MapReduce paper, not a cluster scheduler.
//!
//! # Quick start
//!
//! ```no_run
//! use mapreduce_engine::{run, Emitter, Getter};
//!
//! let files = vec!["input-a.txt".to_string(), "input-b.txt".to_string()];
//!
//! let mapper = |file: &str, emitter: &Emitter| {
//!     let contents = std::fs::read_to_string(file).unwrap_or_default();
//!     for word in contents.split_whitespace() {
//!         emitter.emit(word, "1");
//!     }
//! };
//!
//! let reducer = |key: &str, getter: &Getter<'_>, partition: usize| {
//!     let mut count = 0;
//!     while getter.get_next(key, partition).is_some() {
//!         count += 1;
//!     }
//!     println!("{key} {count}");
//! };
//!
//! run(&files, mapper, 4, reducer, 4).unwrap();
//! ```
//!
//! # Phases
//!
//! A job runs in four strict phases, each a barrier on the next:
//!
//! 1. **Map**: the map worker pool drains a shared file queue across `N`
//!    worker threads, each calling the mapper and routing its emits
//!    through an [`Emitter`].
//! 2. **Sort**: the partition store is consumed, sorting each partition's
//!    groups by key and each group's values.
//! 3. **Reduce**: the reduce worker pool hands each sorted partition to
//!    exactly one worker thread, which delivers its groups to the reducer
//!    via a [`Getter`].
//! 4. **Done**: `run`/`Job::run` returns once every reduce worker has
//!    joined.
mod emit;
mod file_queue;
mod getter;
mod job;
mod metrics;
mod partition;
mod partitioner;
mod reduce_pool;
pub mod testing;

pub use emit::Emitter;
pub use getter::Getter;
pub use job::{run, run_with_partitioner, ConfigError, Job};
pub use metrics::{Metrics, MetricsSnapshot};
pub use partition::Group;
pub use partitioner::default_hash_partition;
