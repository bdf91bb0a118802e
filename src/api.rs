use crate::engine;
use crate::error::ParseError;
use crate::mesh::MeshConvention;
use crate::observations::{ColumnLoader, TextColumnLoader};
use crate::params::{EpochConvention, ParsedSystem};
use crate::system::{self, Output, RecordBuilder, SystemBuilder};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

pub use crate::engine::{IgnoreReason, IgnoredKey, SkipReason, SkippedLine};

/// Parsing context.
///
/// This holds the environment needed to load the observation files a legacy
/// file refers to.
#[derive(Clone, Copy)]
pub struct Context<'a> {
    /// Directory that relative observation paths are resolved against.
    /// `parse_file*` fill it in from the parameter file's location.
    pub base_dir: Option<&'a Path>,
    /// Loader for observation columns.
    pub loader: &'a dyn ColumnLoader,
}

impl Default for Context<'_> {
    fn default() -> Self {
        Self { base_dir: None, loader: &TextColumnLoader }
    }
}

impl fmt::Debug for Context<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context").field("base_dir", &self.base_dir).finish_non_exhaustive()
    }
}

/// Options selecting the output shape.
#[derive(Debug, Clone, Copy, Default)]
pub struct Options {
    /// Build a two-body system from the records.
    pub create_body: bool,
    /// Wrap the system in a bundle. Implies `create_body`.
    pub create_bundle: bool,
    /// Mesh convention handed to the system builder.
    pub mesh: MeshConvention,
    /// Epoch convention of the returned orbit.
    pub epoch: EpochConvention,
}

/// Additional details returned by [`parse_verbose_with`].
#[derive(Debug, Clone)]
pub struct ParseDetails {
    pub total: Duration,
    /// Time spent tokenizing and routing lines.
    pub scan: Duration,
    /// Time spent in the radial-velocity reduction.
    pub assemble: Duration,
    /// Time spent handing the records to the system builder.
    pub build: Duration,
    pub lines: usize,
    pub comments: usize,
    pub blank: usize,
    pub routed: usize,
    pub ignored: Vec<IgnoredKey>,
    pub skipped: Vec<SkippedLine>,
}

/// Result from [`parse_verbose_with`].
#[derive(Debug, Clone)]
pub struct ParseResultVerbose {
    /// Finalized records, after any epoch conversion.
    pub records: ParsedSystem,
    pub output: Output,
    pub elapsed: Duration,
    pub details: ParseDetails,
}

/// Parse the legacy file at `path` into records.
///
/// Relative observation paths are resolved against the file's directory.
pub fn parse_file(path: impl AsRef<Path>) -> Result<Output, ParseError> {
    parse_file_with(path.as_ref(), &Context::default(), &Options::default())
}

/// Parse the legacy file at `path` with the provided `context`/`options`.
///
/// A `context.base_dir` of `None` is replaced by the file's directory.
pub fn parse_file_with(path: &Path, context: &Context<'_>, options: &Options) -> Result<Output, ParseError> {
    let text = read_file(path)?;
    let context = Context { base_dir: context.base_dir.or_else(|| path.parent()), loader: context.loader };
    parse_with(&text, &context, options)
}

/// Parse `text` into finalized records, without any output shaping.
pub fn parse_records(text: &str, context: &Context<'_>) -> Result<ParsedSystem, ParseError> {
    engine::Parser::new(text).run(context)
}

/// Parse `text` and shape the result with the default [`RecordBuilder`].
///
/// # Example
/// ```
/// use phoebe_legacy::{Assembled, Context, Options, parse_with};
///
/// let text = "phoebe_period.VAL = 2.5\nphoebe_lcno = 1\nphoebe_lc_filter[1] = \"Johnson:B\"\n";
/// let out = parse_with(text, &Context::default(), &Options::default()).unwrap();
///
/// let Assembled::Records(system) = out else { panic!("records expected") };
/// assert_eq!(system.orbit.period.value, 2.5);
/// assert_eq!(system.primary.lc_deps[0].passband, "JOHNSON.B");
/// ```
pub fn parse_with(text: &str, context: &Context<'_>, options: &Options) -> Result<Output, ParseError> {
    parse_with_builder(text, context, options, &RecordBuilder)
}

/// Parse `text` and shape the result with a caller-supplied [`SystemBuilder`].
pub fn parse_with_builder<B: SystemBuilder>(
    text: &str,
    context: &Context<'_>,
    options: &Options,
    builder: &B,
) -> Result<system::Assembled<B::System, B::Bundle>, ParseError> {
    let records = parse_records(text, context)?;
    system::assemble(records, options, builder)
}

/// Parse `text` with `context`/`options` and return metrics and per-line
/// diagnostics alongside the output.
pub fn parse_verbose_with(text: &str, context: &Context<'_>, options: &Options) -> Result<ParseResultVerbose, ParseError> {
    let start = Instant::now();
    let run = engine::Parser::new(text).run_with_metrics(context)?;

    let build_start = Instant::now();
    let mut records = run.system;
    crate::epoch::convert(&mut records.orbit, options.epoch);
    let output = system::assemble(records.clone(), options, &RecordBuilder)?;
    let build = build_start.elapsed();

    let metrics = run.metrics;
    let elapsed = start.elapsed();
    let details = ParseDetails {
        total: elapsed,
        scan: metrics.scan,
        assemble: metrics.assemble,
        build,
        lines: metrics.lines,
        comments: metrics.comments,
        blank: metrics.blank,
        routed: metrics.routed,
        ignored: metrics.ignored,
        skipped: metrics.skipped,
    };

    Ok(ParseResultVerbose { records, output, elapsed, details })
}

fn read_file(path: &Path) -> Result<String, ParseError> {
    std::fs::read_to_string(path).map_err(|source| ParseError::Io { path: PathBuf::from(path), source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::Assembled;
    use std::io::Write;

    const MINIMAL: &str = "\
phoebe_lcno = 1
phoebe_rvno = 0
phoebe_period.VAL = 3.0
phoebe_ecc.VAL = 0.1
phoebe_incl.VAL = 85.0
phoebe_lc_filter[1] = \"Johnson:V\"
phoebe_el3[1].VAL = 0.05
";

    #[test]
    fn parse_with_returns_records_by_default() {
        let out = parse_with(MINIMAL, &Context::default(), &Options::default()).unwrap();
        let Assembled::Records(system) = out else { panic!("records expected") };
        assert_eq!(system.orbit.period.value, 3.0);
        assert_eq!(system.primary.lc_deps[0].l3, 0.05);
    }

    #[test]
    fn parse_verbose_includes_metrics() {
        let text = format!("# header\n\n{MINIMAL}not a pair\nphoebe_name = \"x\"\n");
        let res = parse_verbose_with(&text, &Context::default(), &Options::default()).unwrap();

        assert_eq!(res.elapsed, res.details.total);
        assert!(res.details.scan <= res.details.total);
        assert_eq!(res.details.comments, 1);
        assert_eq!(res.details.blank, 1);
        assert_eq!(res.details.routed, 7);
        assert_eq!(res.details.skipped.len(), 1);
        assert_eq!(res.details.skipped[0].reason, SkipReason::NoSeparator);
        assert_eq!(res.details.ignored.len(), 1);
        assert_eq!(res.details.ignored[0].reason, IgnoreReason::UnknownKey);
    }

    #[test]
    fn verbose_records_follow_epoch_option() {
        let text = "phoebe_hjd0.VAL = 2450000.0\nphoebe_period.VAL = 10.0\n";
        let options = Options { epoch: EpochConvention::PeriastronPassage, ..Options::default() };
        let res = parse_verbose_with(text, &Context::default(), &options).unwrap();
        assert_eq!(res.records.orbit.t0.value, 2449997.5);
        assert_eq!(res.records.orbit.t0type, EpochConvention::PeriastronPassage);
    }

    #[test]
    fn parse_file_reads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(MINIMAL.as_bytes()).unwrap();

        let out = parse_file(file.path()).unwrap();
        assert!(matches!(out, Assembled::Records(ref s) if s.orbit.ecc.value == 0.1));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = parse_file("/nonexistent/legacy.phoebe").unwrap_err();
        assert!(matches!(err, ParseError::Io { .. }));
    }

    #[test]
    fn default_context_has_no_base_dir() {
        let ctx = Context::default();
        assert!(ctx.base_dir.is_none());
        assert!(format!("{ctx:?}").starts_with("Context"));
    }
}
