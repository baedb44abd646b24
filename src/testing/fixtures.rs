//! Pre-built test datasets, mostly input files on disk.
//!
//! Input files are the only I/O boundary this engine's public API has (a
//! mapper receives a file name); these fixtures build real temporary files
//! so tests exercise that boundary rather than mocking it away.

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// A set of input files under a temporary directory, kept alive for the
/// fixture's lifetime.
///
/// `files` holds each file's path as a `String`, ready to pass straight to
/// [`run`](crate::run)/[`run_with_partitioner`](crate::run_with_partitioner).
/// The backing directory is removed when the fixture is dropped.
pub struct FileFixture {
    pub files: Vec<String>,
    _dir: TempDir,
}

/// Write `contents` as one file per entry under a fresh temporary
/// directory and return a [`FileFixture`] referencing them.
///
/// # Panics
///
/// Panics if the temporary directory or any file cannot be created.
#[must_use]
pub fn file_fixture(contents: &[(&str, &str)]) -> FileFixture {
    let dir = tempfile::tempdir().expect("failed to create temp dir for file fixture");
    let mut files = Vec::with_capacity(contents.len());
    for (name, body) in contents {
        let path: PathBuf = dir.path().join(name);
        fs::write(&path, body).expect("failed to write fixture file");
        files.push(path.to_string_lossy().into_owned());
    }
    FileFixture { files, _dir: dir }
}

/// Shorthand for [`file_fixture`] when each file's content is whitespace-
/// separated words, the canonical word-count input shape.
#[must_use]
pub fn word_count_fixture(files: &[(&str, &str)]) -> FileFixture {
    file_fixture(files)
}

/// Build `num_files` files, each containing `lines_per_file` lines of the
/// form `key_<i> value_<i>_<j>`, for tests that need a larger, more
/// uniform input than the small hand-written scenarios.
#[must_use]
pub fn uniform_kv_fixture(num_files: usize, keys_per_file: usize, values_per_key: usize) -> FileFixture {
    let mut contents = Vec::with_capacity(num_files);
    let mut bodies = Vec::with_capacity(num_files);
    for file_idx in 0..num_files {
        let mut body = String::new();
        for key_idx in 0..keys_per_file {
            for value_idx in 0..values_per_key {
                body.push_str(&format!("key_{file_idx}_{key_idx} value_{value_idx}\n"));
            }
        }
        bodies.push(body);
    }
    for (file_idx, body) in bodies.iter().enumerate() {
        let name = format!("file_{file_idx}.txt");
        contents.push((name, body.as_str()));
    }
    let borrowed: Vec<(&str, &str)> = contents.iter().map(|(n, b)| (n.as_str(), *b)).collect();
    file_fixture(&borrowed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_fixture_writes_readable_files() {
        let fixture = file_fixture(&[("a.txt", "hello world"), ("b.txt", "foo bar")]);
        assert_eq!(fixture.files.len(), 2);
        let contents: Vec<String> = fixture.files.iter().map(|f| fs::read_to_string(f).unwrap()).collect();
        assert!(contents.contains(&"hello world".to_string()));
        assert!(contents.contains(&"foo bar".to_string()));
    }

    #[test]
    fn uniform_kv_fixture_produces_expected_file_count() {
        let fixture = uniform_kv_fixture(3, 2, 2);
        assert_eq!(fixture.files.len(), 3);
        let body = fs::read_to_string(&fixture.files[0]).unwrap();
        assert_eq!(body.lines().count(), 4);
    }
}
