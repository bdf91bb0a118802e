//! Parser driver.
//!
//! ```text
//! new() -> scan() -> finish()
//!           │          ├─ inherit component atm/alb/ld law into LC deps
//!           │          ├─ derive compute options (atm tables, grid sizes)
//!           │          └─ assemble_rv (second pass over the accumulator)
//!           └─ tokenize + route every line in file order
//! ```
//!
//! The scan is strictly sequential: LC slots and RV sequences are positional,
//! so no line may be reordered or skipped silently. Malformed lines are the
//! only thing dropped, and each one is logged and recorded.

use std::time::Instant;

use tracing::{info, warn};

use super::assembler::assemble_rv;
use super::metrics::{IgnoredKey, ParseMetrics, RunResult, SkippedLine};
use super::router::{Outcome, RecordSet, Router};
use super::tokenizer::{LineKind, tokenize_line};
use crate::Context;
use crate::error::ParseError;
use crate::params::{ParsedSystem, StarParameters};

/// Runs the two passes over one legacy file.
///
/// Usage: `Parser::new(text).run(&context)`.
#[derive(Debug)]
pub struct Parser<'a> {
    text: &'a str,
}

impl<'a> Parser<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text }
    }

    pub fn run(self, context: &Context<'_>) -> Result<ParsedSystem, ParseError> {
        self.run_with_metrics(context).map(|run| run.system)
    }

    pub fn run_with_metrics(self, context: &Context<'_>) -> Result<RunResult, ParseError> {
        let start = Instant::now();
        let mut metrics = ParseMetrics::default();

        let router = self.scan(&mut metrics)?;
        metrics.scan = start.elapsed();

        let assemble_start = Instant::now();
        let system = finish(router, context)?;
        metrics.assemble = assemble_start.elapsed();
        metrics.total = start.elapsed();

        info!(
            lines = metrics.lines,
            routed = metrics.routed,
            skipped = metrics.skipped.len(),
            lcno = system.lcno(),
            rvno = system.rvno(),
            "legacy parameter file loaded"
        );

        Ok(RunResult { system, metrics })
    }

    fn scan(&self, metrics: &mut ParseMetrics) -> Result<Router, ParseError> {
        let mut router = Router::default();

        for (idx, text) in self.text.lines().enumerate() {
            let line = idx + 1;
            metrics.lines += 1;

            match tokenize_line(line, text) {
                LineKind::Comment => metrics.comments += 1,
                LineKind::Blank => metrics.blank += 1,
                LineKind::Malformed(reason) => {
                    warn!(line, %reason, text, "skipping line that is not a key/value pair");
                    metrics.skipped.push(SkippedLine { line, text: text.to_string(), reason });
                }
                LineKind::Pair(pair) => match router.apply(&pair)? {
                    Outcome::Routed => metrics.routed += 1,
                    Outcome::Ignored(reason) => {
                        metrics.ignored.push(IgnoredKey { line, key: pair.key.to_string(), reason });
                    }
                },
            }
        }

        Ok(router)
    }
}

fn finish(router: Router, context: &Context<'_>) -> Result<ParsedSystem, ParseError> {
    let Router { records, rv } = router;
    let RecordSet { mut orbit, components, mesh, mut compute, lc_deps, lcno: _, rvno } = records;

    let rvno = match rvno {
        Some(n) => n,
        None if rv.is_empty() => 0,
        None => return Err(ParseError::MissingRvCount),
    };

    let [mut lc_primary, mut lc_secondary] = lc_deps;
    for (p, s) in lc_primary.iter_mut().zip(lc_secondary.iter_mut()) {
        p.inherit(&components[0]);
        s.inherit(&components[1]);
        s.reference = p.reference.clone();
    }

    compute.atm = [components[0].atm.into(), components[1].atm.into()];
    compute.gridsize = mesh.gridsize;

    orbit.c1label = components[0].label.clone();
    orbit.c2label = components[1].label.clone();

    let assembly = assemble_rv(&rv, rvno, &components, context.base_dir, context.loader)?;
    let [rv_primary, rv_secondary] = assembly.deps;
    let [obs_primary, obs_secondary] = assembly.observations;
    let [primary, secondary] = components;

    Ok(ParsedSystem {
        primary: StarParameters {
            component: primary,
            lc_deps: lc_primary,
            rv_deps: rv_primary,
            observations: obs_primary,
        },
        secondary: StarParameters {
            component: secondary,
            lc_deps: lc_secondary,
            rv_deps: rv_secondary,
            observations: obs_secondary,
        },
        orbit,
        mesh,
        compute,
    })
}
