//! The Map Worker Pool: `N` workers draining a shared file queue.
//!
//! [`FileQueue`] is the one piece of shared state in the map phase besides
//! the partitions themselves: a claim cursor over the input file list. Each
//! worker loops "claim a file, invoke the mapper" until the queue is empty,
//! then terminates; the pool owner joins all workers before returning.

use crate::emit::Emitter;
use crate::metrics::Metrics;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

/// Shape of a user-supplied mapper: `(file_name, emitter) -> ()`.
pub type MapperFn = dyn Fn(&str, &Emitter) + Send + Sync;

struct FileQueue {
    files: Vec<String>,
    cursor: AtomicUsize,
}

impl FileQueue {
    fn new(files: Vec<String>) -> Self {
        Self { files, cursor: AtomicUsize::new(0) }
    }

    /// Atomically claim the next unclaimed file, or `None` once exhausted.
    ///
    /// Uses a single `fetch_add` rather than a lock-check-unlock sequence
    /// over a mutex-guarded cursor: same one-winner-per-index contract, less
    /// overhead, since the claim is a single word-sized operation rather
    /// than a critical section that also needs to copy a file name out
    /// before unlocking.
    fn claim(&self) -> Option<&str> {
        let idx = self.cursor.fetch_add(1, Ordering::SeqCst);
        self.files.get(idx).map(String::as_str)
    }
}

/// Run the map phase: spawn `num_mappers` workers sharing one [`FileQueue`],
/// invoking `mapper` once per file, then join all of them.
///
/// Every file is passed to the mapper exactly once, in an order determined
/// by worker scheduling -- there is no ordering guarantee across files.
pub(crate) fn run_map_phase(
    files: Vec<String>,
    num_mappers: usize,
    mapper: &MapperFn,
    emitter: Emitter,
    metrics: Option<&Arc<Metrics>>,
) {
    let queue = FileQueue::new(files);
    let num_workers = num_mappers.max(1);

    thread::scope(|scope| {
        for _ in 0..num_workers {
            let queue = &queue;
            let emitter = emitter.clone();
            let metrics = metrics.cloned();
            scope.spawn(move || {
                while let Some(file) = queue.claim() {
                    mapper(file, &emitter);
                    if let Some(metrics) = &metrics {
                        metrics.record_file_mapped();
                    }
                }
            });
        }
    });
}
