extern crate self as phoebe_legacy;

use serde::Serialize;

#[macro_use]
mod macros;
mod api;
mod engine;
mod rules;

pub mod epoch;
pub mod error;
pub mod mesh;
pub mod observations;
pub mod params;
pub mod system;
pub mod units;

pub use api::{
    Context, IgnoreReason, IgnoredKey, Options, ParseDetails, ParseResultVerbose, SkipReason, SkippedLine,
    parse_file, parse_file_with, parse_records, parse_verbose_with, parse_with, parse_with_builder,
};
pub use engine::remap_passband;
pub use error::{ObservationError, ParseError};
pub use system::{Assembled, Output, RecordBuilder, SystemBuilder};

use crate::params::{ComponentField, OrbitField};
use crate::units::Conversion;

// --- Shared routing types ---------------------------------------------------

/// One of the two stellar components of a legacy model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Star {
    Primary,
    Secondary,
}

impl Star {
    pub const BOTH: [Star; 2] = [Star::Primary, Star::Secondary];

    /// Position of the star in per-star arrays (`0` for the primary).
    pub fn index(self) -> usize {
        match self {
            Star::Primary => 0,
            Star::Secondary => 1,
        }
    }

    /// Tag the legacy file uses for radial-velocity curves of this star.
    pub fn rv_tag(self) -> &'static str {
        match self {
            Star::Primary => "Primary RV",
            Star::Secondary => "Secondary RV",
        }
    }

    /// Prefix of synthetic radial-velocity dataset references.
    pub fn rv_prefix(self) -> &'static str {
        match self {
            Star::Primary => "primaryrv",
            Star::Secondary => "secondaryrv",
        }
    }
}

/// Value-kind suffix of a legacy key (`phoebe_ecc.VAL`, `phoebe_ecc.MIN`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Suffix {
    Val,
    Min,
    Max,
    Step,
    Adj,
}

impl Suffix {
    pub(crate) fn parse(s: &str) -> Option<Self> {
        match s {
            "VAL" => Some(Suffix::Val),
            "MIN" => Some(Suffix::Min),
            "MAX" => Some(Suffix::Max),
            "STEP" => Some(Suffix::Step),
            "ADJ" => Some(Suffix::Adj),
            _ => None,
        }
    }

    pub(crate) fn flag(self) -> Suffixes {
        match self {
            Suffix::Val => Suffixes::VAL,
            Suffix::Min => Suffixes::MIN,
            Suffix::Max => Suffixes::MAX,
            Suffix::Step => Suffixes::STEP,
            Suffix::Adj => Suffixes::ADJ,
        }
    }
}

bitflags::bitflags! {
    /// Suffixes a route accepts. `BARE` stands for a key without any suffix.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub(crate) struct Suffixes: u8 {
        const BARE = 1 << 0;
        const VAL  = 1 << 1;
        const MIN  = 1 << 2;
        const MAX  = 1 << 3;
        const STEP = 1 << 4;
        const ADJ  = 1 << 5;

        const SCALAR = Self::VAL.bits() | Self::MIN.bits() | Self::MAX.bits() | Self::STEP.bits() | Self::ADJ.bits();
    }
}

/// Coefficient of a limb-darkening pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Axis {
    X,
    Y,
}

impl Axis {
    pub(crate) fn slot(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
        }
    }
}

/// Per-index light-curve dataset fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum LcField {
    Reference,
    Passband,
    Ld(Star, Axis),
    PassbandLuminosity(Star),
    ThirdLight,
}

/// Radial-velocity metadata that is accumulated in file order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum RvField {
    Star,
    Passband,
    Filename,
    StatWeight,
    Label,
    Independent,
    Weighting,
    Ld(Star, Axis),
}

/// What a routed key mutates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Target {
    Orbit(OrbitField),
    Component(Star, ComponentField),
    AtmosphereSwitch(Star),
    ReflectionSwitch,
    Reflections,
    ExtinctionSwitch,
    ProximitySwitch(Star),
    LdModel,
    BolometricLd(Star, Axis),
    GridSize(Star),
    LcCount,
    RvCount,
    Lc(LcField),
    Rv(RvField),
}

/// A routing-table entry: bare legacy key, accepted suffixes, target field and
/// the conversion applied to numeric values before they are stored.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Route {
    pub key: &'static str,
    pub suffixes: Suffixes,
    pub target: Target,
    pub conversion: Conversion,
}

impl Route {
    /// True when the route handles keys carrying `suffix` (`None` = bare key).
    pub(crate) fn accepts(&self, suffix: Option<Suffix>) -> bool {
        let flag = suffix.map(Suffix::flag).unwrap_or(Suffixes::BARE);
        self.suffixes.contains(flag)
    }

    /// True when the key carries a bracketed dataset index in legacy files.
    pub(crate) fn is_indexed(&self) -> bool {
        matches!(self.target, Target::Lc(_) | Target::Rv(_))
    }
}
