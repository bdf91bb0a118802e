//! Error types.
//!
//! Only failures that would leave the parameter graph silently wrong are
//! errors. Lines that cannot be split into a key/value pair are skipped and
//! reported through [`crate::SkippedLine`] instead.

use std::path::PathBuf;

use crate::Star;

/// Fatal failures of a single parse.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// Failed to read the parameter file.
    #[error("Failed to read parameter file '{path}': {source}")]
    Io { path: PathBuf, source: std::io::Error },

    /// A recognised key carried a value of the wrong shape.
    #[error("Invalid value for `{key}` at line {line}: '{value}' (expected {expected})")]
    InvalidValue { line: usize, key: String, value: String, expected: &'static str },

    /// A bracketed dataset index was not a positive integer.
    #[error("Invalid dataset index in `{key}` at line {line}")]
    InvalidIndex { line: usize, key: String },

    /// A dataset key was given without its bracketed index.
    #[error("Missing dataset index for `{key}` at line {line}")]
    MissingIndex { line: usize, key: String },

    /// An indexed key arrived before the count key that sizes its arrays.
    #[error("`{key}` at line {line} requires `{count_key}` to be declared first")]
    MissingCount { line: usize, key: String, count_key: &'static str },

    /// An indexed key points past the declared count.
    #[error("Dataset index {index} of `{key}` at line {line} exceeds declared count {count}")]
    IndexOutOfRange { line: usize, key: String, index: usize, count: usize },

    /// A `y` limb-darkening coefficient arrived with no matching `x`.
    #[error("`{key}` at line {line} has no preceding x coefficient for the {star:?} star")]
    MissingCoefficient { line: usize, key: String, star: Star },

    /// The radial-velocity metadata has fewer entries than `phoebe_rvno` declares.
    #[error("Radial-velocity dataset {index} has no `{sequence}` entry (phoebe_rvno = {rvno})")]
    MissingSlot { sequence: &'static str, index: usize, rvno: usize },

    /// Radial-velocity keys were present but `phoebe_rvno` never was.
    #[error("Radial-velocity keys present but `phoebe_rvno` is not declared")]
    MissingRvCount,

    /// An observation file could not be loaded.
    #[error("Failed to load observations from '{path}': {source}")]
    Observation { path: PathBuf, source: ObservationError },

    /// The model-construction collaborator rejected the records.
    #[error("Model construction failed: {0}")]
    Build(#[source] Box<dyn std::error::Error + Send + Sync + 'static>),
}

/// Failures of the column-oriented observation loader.
#[derive(Debug, thiserror::Error)]
pub enum ObservationError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// A field is not a number.
    #[error("line {line}: '{value}' is not a number")]
    Malformed { line: usize, value: String },

    /// A row has the wrong number of columns.
    #[error("line {line}: expected {expected} columns, found {found}")]
    ColumnCount { line: usize, expected: usize, found: usize },

    /// The file holds no data rows.
    #[error("no data rows")]
    Empty,
}
