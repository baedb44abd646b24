//! The user-supplied partitioner and the engine's default implementation.
//!
//! A partitioner decides which of the `P` partitions a key belongs to. It
//! must be a pure function of its inputs and must return a value in
//! `[0, num_partitions)` -- the engine trusts this and does not bounds-check
//! it (see [`PartitionerFn`]).

use std::sync::Arc;

/// The shape of a user-supplied partitioner: `(key, num_partitions) -> partition index`.
///
/// Boxed as `Arc<dyn Fn(...) + Send + Sync>` so it can be cloned cheaply and
/// shared across every mapper thread.
pub type PartitionerFn = dyn Fn(&str, usize) -> usize + Send + Sync;

/// djb2 over the key's bytes, modulo `num_partitions`.
///
/// ```text
/// hash <- 5381
/// for each byte c in key:
///     hash <- hash * 33 + c   (wrapping, unsigned 64-bit)
/// return hash mod num_partitions
/// ```
///
/// This is bit-exact with the canonical `MR_DefaultHashPartition`: the hash
/// is computed as a 64-bit unsigned value with wraparound so results match
/// across platforms regardless of the native `unsigned long` width.
///
/// # Panics
///
/// Panics if `num_partitions` is zero.
pub fn default_hash_partition(key: &str, num_partitions: usize) -> usize {
    assert!(num_partitions > 0, "default_hash_partition: num_partitions must be > 0");
    let mut hash: u64 = 5381;
    for &byte in key.as_bytes() {
        hash = hash.wrapping_mul(33).wrapping_add(byte as u64);
    }
    (hash % num_partitions as u64) as usize
}

/// Wrap a plain function/closure as a shareable [`PartitionerFn`].
pub(crate) fn boxed<F>(f: F) -> Arc<PartitionerFn>
where
    F: Fn(&str, usize) -> usize + Send + Sync + 'static,
{
    Arc::new(f)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_hand_computed_djb2() {
        // hash(5381, "a") = 5381*33 + 'a' = 177573 + 97 = 177670
        let expected = 177670u64 % 5;
        assert_eq!(default_hash_partition("a", 5), expected as usize);
    }

    #[test]
    fn bounds_hold_across_many_keys() {
        for i in 0..1000 {
            let key = format!("key-{i}");
            let p = default_hash_partition(&key, 17);
            assert!(p < 17);
        }
    }

    #[test]
    fn is_pure() {
        for _ in 0..100 {
            assert_eq!(default_hash_partition("stable-key", 7), default_hash_partition("stable-key", 7));
        }
    }

    #[test]
    #[should_panic]
    fn rejects_zero_partitions() {
        default_hash_partition("x", 0);
    }
}
