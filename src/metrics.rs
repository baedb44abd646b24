//! Run-level counters for a MapReduce job.
//!
//! A handle a caller can attach to a run, then snapshot and report once the
//! run completes. The counters tracked here are specific to this engine's
//! phases (files claimed, emits accepted, keys delivered to reducers) and
//! use lock-free atomics rather than a named-metric registry behind a
//! mutex, because the hottest path -- [`Emitter::emit`](crate::emit::Emitter::emit)
//! -- is called concurrently from every mapper thread and can't afford a
//! `Mutex<HashMap<String, Box<dyn Metric>>>` lookup per call.
//!
//! The counters themselves are always compiled in (they are a handful of
//! atomics, not worth gating); the `metrics` feature controls only the
//! JSON reporting convenience on [`MetricsSnapshot`], which pulls in
//! `serde`/`serde_json`.

use std::sync::atomic::{AtomicU64, Ordering};

#[cfg(feature = "metrics")]
use anyhow::{Context, Result};
#[cfg(feature = "metrics")]
use std::fs::File;
#[cfg(feature = "metrics")]
use std::io::Write;
#[cfg(feature = "metrics")]
use std::path::Path;

/// Thread-safe counters updated as a job runs.
///
/// Share one `Arc<Metrics>` across the map and reduce phases; call
/// [`Metrics::snapshot`] after the job returns to read a stable view.
#[derive(Default)]
pub struct Metrics {
    files_mapped: AtomicU64,
    emits: AtomicU64,
    partitions_sorted: AtomicU64,
    keys_reduced: AtomicU64,
    values_drained: AtomicU64,
}

impl Metrics {
    /// Create a fresh, zeroed counter set.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_file_mapped(&self) {
        self.files_mapped.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_emit(&self) {
        self.emits.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_partition_sorted(&self) {
        self.partitions_sorted.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_key_reduced(&self) {
        self.keys_reduced.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_value_drained(&self) {
        self.values_drained.fetch_add(1, Ordering::Relaxed);
    }

    /// Read a consistent-enough snapshot of the counters.
    ///
    /// Individual counters are read independently with `Relaxed` ordering,
    /// so a snapshot taken mid-run may see slightly interleaved values; once
    /// all worker threads have joined (i.e. after [`crate::run`] returns)
    /// the snapshot is exact.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            files_mapped: self.files_mapped.load(Ordering::Relaxed),
            emits: self.emits.load(Ordering::Relaxed),
            partitions_sorted: self.partitions_sorted.load(Ordering::Relaxed),
            keys_reduced: self.keys_reduced.load(Ordering::Relaxed),
            values_drained: self.values_drained.load(Ordering::Relaxed),
        }
    }
}

/// A point-in-time read of a [`Metrics`] counter set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "metrics", derive(serde::Serialize, serde::Deserialize))]
pub struct MetricsSnapshot {
    pub files_mapped: u64,
    pub emits: u64,
    pub partitions_sorted: u64,
    pub keys_reduced: u64,
    pub values_drained: u64,
}

#[cfg(feature = "metrics")]
impl MetricsSnapshot {
    /// Print the snapshot to stdout as pretty JSON.
    pub fn print(&self) {
        match serde_json::to_string_pretty(self) {
            Ok(json) => println!("{json}"),
            Err(e) => eprintln!("failed to format metrics: {e}"),
        }
    }

    /// Write the snapshot to `path` as JSON.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("serializing metrics snapshot")?;
        let mut file = File::create(path.as_ref())
            .with_context(|| format!("creating metrics file {}", path.as_ref().display()))?;
        file.write_all(json.as_bytes()).context("writing metrics file")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_start_at_zero() {
        let m = Metrics::new();
        let s = m.snapshot();
        assert_eq!(s.files_mapped, 0);
        assert_eq!(s.emits, 0);
        assert_eq!(s.keys_reduced, 0);
    }

    #[test]
    fn counters_accumulate() {
        let m = Metrics::new();
        m.record_file_mapped();
        m.record_file_mapped();
        m.record_emit();
        m.record_key_reduced();
        let s = m.snapshot();
        assert_eq!(s.files_mapped, 2);
        assert_eq!(s.emits, 1);
        assert_eq!(s.keys_reduced, 1);
    }

    #[cfg(feature = "metrics")]
    #[test]
    fn save_to_file_round_trips_as_json() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("metrics.json");
        let m = Metrics::new();
        m.record_emit();
        m.snapshot().save_to_file(&path)?;
        let contents = std::fs::read_to_string(&path)?;
        let parsed: MetricsSnapshot = serde_json::from_str(&contents)?;
        assert_eq!(parsed.emits, 1);
        Ok(())
    }
}
