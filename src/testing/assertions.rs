//! Assertion helpers tuned to the shapes this engine produces.

use std::collections::HashSet;
use std::fmt::Debug;
use std::hash::Hash;

/// Assert that two `(key, Vec<value>)` collections are equal once both are
/// sorted by key and each value list is sorted.
///
/// This is the shape a [`CollectingReducer`](crate::testing::CollectingReducer)
/// produces, and keys/value order is only ever defined up to this
/// normalization: the sort stage sorts both levels, but two reducer
/// invocations of a test may still race on which partition finishes
/// first.
///
/// # Panics
///
/// Panics with a diff-style message if the normalized collections differ.
pub fn assert_kv_groups_equal(
    mut actual: Vec<(String, Vec<String>)>,
    mut expected: Vec<(String, Vec<String>)>,
) {
    for (_, values) in &mut actual {
        values.sort();
    }
    for (_, values) in &mut expected {
        values.sort();
    }
    actual.sort_by(|a, b| a.0.cmp(&b.0));
    expected.sort_by(|a, b| a.0.cmp(&b.0));

    assert_eq!(
        actual, expected,
        "grouped key/value mismatch after normalizing order\n  expected: {expected:?}\n  actual:   {actual:?}"
    );
}

/// Assert that every file in `files` was claimed exactly once by comparing
/// against the observed claim list (order-independent).
///
/// # Panics
///
/// Panics if `claimed` and `files` differ as multisets.
pub fn assert_every_file_claimed_once(claimed: &[String], files: &[String]) {
    assert_eq!(
        claimed.len(),
        files.len(),
        "claim count mismatch:\n  expected {} claims, saw {}\n  expected files: {files:?}\n  claimed: {claimed:?}",
        files.len(),
        claimed.len()
    );
    let claimed_set: HashSet<&str> = claimed.iter().map(String::as_str).collect();
    let files_set: HashSet<&str> = files.iter().map(String::as_str).collect();
    assert_eq!(
        claimed_set, files_set,
        "claimed files differ from the input list:\n  expected: {files:?}\n  claimed: {claimed:?}"
    );
}

/// Assert that a collection of values is sorted in ascending order.
///
/// # Panics
///
/// Panics at the first out-of-order adjacent pair.
pub fn assert_sorted<T: Debug + Ord>(values: &[T]) {
    for pair in values.windows(2) {
        assert!(
            pair[0] <= pair[1],
            "values are not sorted: {:?} appears before {:?} in {values:?}",
            pair[0],
            pair[1]
        );
    }
}

/// Assert that a collection contains exactly the given keys, ignoring
/// order and duplicates.
///
/// # Panics
///
/// Panics if the key sets differ.
pub fn assert_same_key_set<T: Debug + Eq + Hash + Clone>(actual_keys: &[T], expected_keys: &[T]) {
    let actual_set: HashSet<T> = actual_keys.iter().cloned().collect();
    let expected_set: HashSet<T> = expected_keys.iter().cloned().collect();
    assert_eq!(
        actual_set, expected_set,
        "key sets differ:\n  expected: {expected_keys:?}\n  actual:   {actual_keys:?}"
    );
}
