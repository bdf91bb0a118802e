//! Legacy file engine.
//!
//! The engine turns the text of a legacy parameter file into a finalized
//! [`ParsedSystem`](crate::params::ParsedSystem). Work happens in two passes
//! over strictly ordered state:
//!
//! ```text
//! text ── tokenize_line ──┬── Comment / Blank ──────────────▶ counted
//!        (tokenizer.rs)   ├── Malformed ─────────────────────▶ SkippedLine (warn)
//!                         └── Pair(key, value)
//!                                  │
//!                                  v
//!                        resolve_index (index.rs)
//!                          name[n].SUFFIX → (name.SUFFIX, n-1)
//!                                  │
//!                                  v
//!                        Router::apply (router.rs)
//!                          rules::lookup → Route
//!                          normalize value (normalize.rs)
//!                                  │
//!                 ┌────────────────┴─────────────────┐
//!                 v                                  v
//!        RecordSet (orbit, components,      RvAccumulator (accumulator.rs)
//!        mesh, compute, LC slots)             parallel sequences, file order
//!                 │                                  │
//!                 └──────────────┬───────────────────┘
//!                                v
//!                   Parser::finish (parser.rs)
//!                     inherit atm/alb/ld law into LC deps
//!                     assemble_rv (assembler.rs): partition by star,
//!                     running indices, load observation files
//!                                │
//!                                v
//!                          ParsedSystem
//! ```
//!
//! Light-curve keys write into index slots as soon as they are seen.
//! Radial-velocity keys cannot: the star that owns dataset `i` and that
//! star's running index are only known once the whole file has been read,
//! so they are accumulated first and reduced afterwards.
//!
//! ## Responsibilities by module
//!
//! - `tokenizer.rs`: line classification and the key/value split.
//! - `index.rs`: bracketed dataset index extraction.
//! - `normalize.rs`: quoting, passband names, numbers and choice decoding.
//! - `router.rs`: applies routes from `crate::rules` to the record set.
//! - `accumulator.rs`: order-preserving radial-velocity sequences.
//! - `assembler.rs`: the radial-velocity reduction pass.
//! - `metrics.rs`: timings, counts and per-line diagnostics.
//! - `parser.rs`: drives the passes and finalizes the records.

#[path = "engine/accumulator.rs"]
mod accumulator;
#[path = "engine/assembler.rs"]
mod assembler;
#[path = "engine/index.rs"]
mod index;
#[path = "engine/metrics.rs"]
mod metrics;
#[path = "engine/normalize.rs"]
mod normalize;
#[path = "engine/parser.rs"]
mod parser;
#[path = "engine/router.rs"]
mod router;
#[path = "engine/tokenizer.rs"]
mod tokenizer;


pub use metrics::{IgnoreReason, IgnoredKey, SkipReason, SkippedLine};
pub use normalize::remap_passband;
pub use parser::Parser;
