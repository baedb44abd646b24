//! Testing utilities for code built on this engine.
//!
//! This module provides the pieces a caller needs to write idiomatic
//! tests for mapper/reducer pairs without wiring up `thread::scope` and
//! `Mutex<Vec<_>>` plumbing by hand every time: recorders that capture
//! what a mapper or reducer was called with, assertions tuned to the
//! `(key, Vec<value>)` shape reducers see, and fixtures for constructing
//! realistic input files under a temporary directory.
//!
//! # Quick start
//!
//! ```
//! use mapreduce_engine::testing::{word_count_fixture, CollectingReducer};
//! use mapreduce_engine::{run, Emitter};
//!
//! let fixture = word_count_fixture(&[("a", "x x y"), ("b", "y z")]);
//! let recorder = CollectingReducer::new();
//! let reducer = recorder.reducer();
//!
//! let mapper = |file: &str, emitter: &Emitter| {
//!     let contents = std::fs::read_to_string(file).unwrap();
//!     for word in contents.split_whitespace() {
//!         emitter.emit(word, "1");
//!     }
//! };
//!
//! run(&fixture.files, mapper, 2, reducer, 2).unwrap();
//! let groups = recorder.into_sorted_groups();
//! assert_eq!(groups[0], ("x".to_string(), vec!["1".to_string(), "1".to_string()]));
//! ```

pub mod assertions;
pub mod fixtures;
pub mod recorders;

pub use assertions::*;
pub use fixtures::*;
pub use recorders::*;
