//! Engine run metrics.
//!
//! `Parser::run` only returns the records. `Parser::run_with_metrics` also
//! returns timings, line counts and the per-line diagnostics that were logged
//! along the way.
//!
//! ```text
//! total ─┬─ scan      (tokenize + route every line)
//!        └─ assemble  (RV reduction + observation loading)
//! ```

use serde::Serialize;
use std::fmt;
use std::time::Duration;

use crate::params::ParsedSystem;

// --- Diagnostics -------------------------------------------------------------

/// Why a line could not be split into a key/value pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// No `=` on the line.
    NoSeparator,
    /// More than one `=` on the line.
    ExtraSeparator,
    /// Nothing before the `=`.
    EmptyKey,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SkipReason::NoSeparator => "no '=' separator",
            SkipReason::ExtraSeparator => "more than one '='",
            SkipReason::EmptyKey => "empty key",
        })
    }
}

/// A line that was skipped without aborting the parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedLine {
    pub line: usize,
    pub text: String,
    pub reason: SkipReason,
}

/// Why a well-formed key had no effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IgnoreReason {
    UnknownKey,
    /// The key is known but not with this suffix (or lack of one).
    UnsupportedSuffix,
}

impl fmt::Display for IgnoreReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            IgnoreReason::UnknownKey => "unknown key",
            IgnoreReason::UnsupportedSuffix => "unsupported suffix",
        })
    }
}

/// A key the router did not act on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IgnoredKey {
    pub line: usize,
    pub key: String,
    pub reason: IgnoreReason,
}

// --- Metrics -----------------------------------------------------------------

#[derive(Debug, Default, Clone, Serialize)]
pub struct ParseMetrics {
    /// Total elapsed time for [`Parser::run_with_metrics`](super::Parser::run_with_metrics).
    pub total: Duration,
    /// Time spent tokenizing and routing lines.
    pub scan: Duration,
    /// Time spent in the radial-velocity reduction, observation loading included.
    pub assemble: Duration,
    /// Physical lines read.
    pub lines: usize,
    pub comments: usize,
    pub blank: usize,
    /// Keys that mutated a record or the accumulator.
    pub routed: usize,
    pub ignored: Vec<IgnoredKey>,
    pub skipped: Vec<SkippedLine>,
}

/// Parser output bundled with its metrics.
#[derive(Debug, Clone)]
pub struct RunResult {
    pub system: ParsedSystem,
    pub metrics: ParseMetrics,
}
