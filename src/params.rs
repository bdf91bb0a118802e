//! Parameter records produced from a legacy file.
//!
//! Records are plain data: the parser creates them with defaults, mutates
//! them while consuming lines and hands them out read-only once the
//! radial-velocity reduction has run.

use serde::Serialize;
use std::path::PathBuf;

use crate::mesh::MeshConfig;
use crate::units::Conversion;
use crate::{Star, Suffix};

/// A fit-able scalar: value plus optional admissible range and optimizer step.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Scalar {
    pub value: f64,
    pub lower: Option<f64>,
    pub upper: Option<f64>,
    pub step: Option<f64>,
    /// Whether the legacy file marked the parameter for adjustment.
    pub adjust: bool,
}

impl Scalar {
    pub fn new(value: f64) -> Self {
        Self { value, ..Self::default() }
    }

    pub fn limits(&self) -> (Option<f64>, Option<f64>) {
        (self.lower, self.upper)
    }

    /// Store an already-converted numeric value for a suffix. Limits and step
    /// may arrive before or after the value.
    pub(crate) fn apply(&mut self, suffix: Suffix, value: f64) {
        match suffix {
            Suffix::Val => self.value = value,
            Suffix::Min => self.lower = Some(value),
            Suffix::Max => self.upper = Some(value),
            Suffix::Step => self.step = Some(value),
            Suffix::Adj => self.adjust = value != 0.0,
        }
    }

    /// Shift value and limits by a constant offset.
    pub(crate) fn shift(&mut self, offset: f64) {
        self.value += offset;
        self.lower = self.lower.map(|v| v + offset);
        self.upper = self.upper.map(|v| v + offset);
    }
}

/// Time reference of the orbital epoch `t0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EpochConvention {
    #[default]
    SuperiorConjunction,
    PeriastronPassage,
}

impl EpochConvention {
    pub fn name(self) -> &'static str {
        match self {
            EpochConvention::SuperiorConjunction => "superior conjunction",
            EpochConvention::PeriastronPassage => "periastron passage",
        }
    }
}

/// Scalar fields of [`OrbitRecord`] addressable by the key router.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrbitField {
    PeriodDerivative,
    ApsidalMotion,
    Eccentricity,
    Epoch,
    Inclination,
    Period,
    ArgumentOfPeriastron,
    PhaseShift,
    MassRatio,
    SemiMajorAxis,
    SystemicVelocity,
}

impl OrbitField {
    pub const ALL: [OrbitField; 11] = [
        OrbitField::PeriodDerivative,
        OrbitField::ApsidalMotion,
        OrbitField::Eccentricity,
        OrbitField::Epoch,
        OrbitField::Inclination,
        OrbitField::Period,
        OrbitField::ArgumentOfPeriastron,
        OrbitField::PhaseShift,
        OrbitField::MassRatio,
        OrbitField::SemiMajorAxis,
        OrbitField::SystemicVelocity,
    ];

    pub fn name(self) -> &'static str {
        match self {
            OrbitField::PeriodDerivative => "dpdt",
            OrbitField::ApsidalMotion => "dperdt",
            OrbitField::Eccentricity => "ecc",
            OrbitField::Epoch => "t0",
            OrbitField::Inclination => "incl",
            OrbitField::Period => "period",
            OrbitField::ArgumentOfPeriastron => "per0",
            OrbitField::PhaseShift => "phshift",
            OrbitField::MassRatio => "q",
            OrbitField::SemiMajorAxis => "sma",
            OrbitField::SystemicVelocity => "vgamma",
        }
    }

    /// How the legacy file states this field relative to the record.
    pub fn legacy_conversion(self) -> Conversion {
        match self {
            OrbitField::PeriodDerivative => Conversion::SecondsPerYearToDaysPerDay,
            OrbitField::ApsidalMotion => Conversion::DegreesPerYearToRadiansPerDay,
            OrbitField::ArgumentOfPeriastron => Conversion::DegreesToRadians,
            _ => Conversion::Identity,
        }
    }

    pub fn unit(self) -> &'static str {
        let conversion = self.legacy_conversion();
        if conversion != Conversion::Identity {
            return conversion.internal_unit();
        }
        match self {
            OrbitField::Epoch => "HJD",
            OrbitField::Inclination => "deg",
            OrbitField::Period => "d",
            OrbitField::SemiMajorAxis => "Rsol",
            OrbitField::SystemicVelocity => "km/s",
            _ => "",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrbitRecord {
    pub label: String,
    pub c1label: String,
    pub c2label: String,
    pub dpdt: Scalar,
    pub dperdt: Scalar,
    pub ecc: Scalar,
    pub t0: Scalar,
    pub incl: Scalar,
    pub period: Scalar,
    pub per0: Scalar,
    pub phshift: Scalar,
    pub q: Scalar,
    pub sma: Scalar,
    pub vgamma: Scalar,
    /// Longitude of the ascending node; legacy models always use zero.
    pub long_an: f64,
    pub t0type: EpochConvention,
}

impl Default for OrbitRecord {
    fn default() -> Self {
        Self {
            label: "myorbit".to_string(),
            c1label: "myprimary".to_string(),
            c2label: "mysecondary".to_string(),
            dpdt: Scalar::new(0.0),
            dperdt: Scalar::new(0.0),
            ecc: Scalar::new(0.0),
            t0: Scalar::new(0.0),
            incl: Scalar::new(90.0),
            period: Scalar::new(1.0),
            per0: Scalar::new(0.0),
            phshift: Scalar::new(0.0),
            q: Scalar::new(1.0),
            sma: Scalar::new(10.0),
            vgamma: Scalar::new(0.0),
            long_an: 0.0,
            t0type: EpochConvention::SuperiorConjunction,
        }
    }
}

impl OrbitRecord {
    pub fn scalar(&self, field: OrbitField) -> &Scalar {
        match field {
            OrbitField::PeriodDerivative => &self.dpdt,
            OrbitField::ApsidalMotion => &self.dperdt,
            OrbitField::Eccentricity => &self.ecc,
            OrbitField::Epoch => &self.t0,
            OrbitField::Inclination => &self.incl,
            OrbitField::Period => &self.period,
            OrbitField::ArgumentOfPeriastron => &self.per0,
            OrbitField::PhaseShift => &self.phshift,
            OrbitField::MassRatio => &self.q,
            OrbitField::SemiMajorAxis => &self.sma,
            OrbitField::SystemicVelocity => &self.vgamma,
        }
    }

    pub fn scalar_mut(&mut self, field: OrbitField) -> &mut Scalar {
        match field {
            OrbitField::PeriodDerivative => &mut self.dpdt,
            OrbitField::ApsidalMotion => &mut self.dperdt,
            OrbitField::Eccentricity => &mut self.ecc,
            OrbitField::Epoch => &mut self.t0,
            OrbitField::Inclination => &mut self.incl,
            OrbitField::Period => &mut self.period,
            OrbitField::ArgumentOfPeriastron => &mut self.per0,
            OrbitField::PhaseShift => &mut self.phshift,
            OrbitField::MassRatio => &mut self.q,
            OrbitField::SemiMajorAxis => &mut self.sma,
            OrbitField::SystemicVelocity => &mut self.vgamma,
        }
    }
}

/// Atmosphere model family of a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Atmosphere {
    Kurucz,
    #[default]
    Blackbody,
}

impl Atmosphere {
    pub fn name(self) -> &'static str {
        match self {
            Atmosphere::Kurucz => "kurucz",
            Atmosphere::Blackbody => "blackbody",
        }
    }
}

/// Limb-darkening law shared by both components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LimbDarkening {
    #[default]
    Linear,
    Logarithmic,
    SquareRoot,
}

impl LimbDarkening {
    pub fn name(self) -> &'static str {
        match self {
            LimbDarkening::Linear => "linear",
            LimbDarkening::Logarithmic => "logarithmic",
            LimbDarkening::SquareRoot => "square root",
        }
    }
}

/// Scalar fields of [`ComponentRecord`] addressable by the key router.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentField {
    Albedo,
    SyncPar,
    GravityDarkening,
    Potential,
    Teff,
    Metallicity,
}

impl ComponentField {
    pub const ALL: [ComponentField; 6] = [
        ComponentField::Albedo,
        ComponentField::SyncPar,
        ComponentField::GravityDarkening,
        ComponentField::Potential,
        ComponentField::Teff,
        ComponentField::Metallicity,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ComponentField::Albedo => "alb",
            ComponentField::SyncPar => "syncpar",
            ComponentField::GravityDarkening => "gravb",
            ComponentField::Potential => "pot",
            ComponentField::Teff => "teff",
            ComponentField::Metallicity => "abun",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentRecord {
    pub label: String,
    pub atm: Atmosphere,
    pub alb: Scalar,
    pub syncpar: Scalar,
    pub gravb: Scalar,
    pub pot: Scalar,
    pub teff: Scalar,
    pub abun: Scalar,
    pub ld_func: LimbDarkening,
    /// Bolometric limb-darkening coefficients `(x, y)`.
    pub ld_coeffs: [f64; 2],
    pub irradiator: bool,
}

impl ComponentRecord {
    pub fn new(star: Star) -> Self {
        let label = match star {
            Star::Primary => "myprimary",
            Star::Secondary => "mysecondary",
        };
        Self {
            label: label.to_string(),
            atm: Atmosphere::default(),
            alb: Scalar::new(1.0),
            syncpar: Scalar::new(1.0),
            gravb: Scalar::new(1.0),
            pot: Scalar::new(4.75),
            teff: Scalar::new(5772.0),
            abun: Scalar::new(0.0),
            ld_func: LimbDarkening::default(),
            ld_coeffs: [0.0, 0.0],
            irradiator: true,
        }
    }

    pub fn scalar(&self, field: ComponentField) -> &Scalar {
        match field {
            ComponentField::Albedo => &self.alb,
            ComponentField::SyncPar => &self.syncpar,
            ComponentField::GravityDarkening => &self.gravb,
            ComponentField::Potential => &self.pot,
            ComponentField::Teff => &self.teff,
            ComponentField::Metallicity => &self.abun,
        }
    }

    pub fn scalar_mut(&mut self, field: ComponentField) -> &mut Scalar {
        match field {
            ComponentField::Albedo => &mut self.alb,
            ComponentField::SyncPar => &mut self.syncpar,
            ComponentField::GravityDarkening => &mut self.gravb,
            ComponentField::Potential => &mut self.pot,
            ComponentField::Teff => &mut self.teff,
            ComponentField::Metallicity => &mut self.abun,
        }
    }
}

/// Per-passband light-curve parameters of one star.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LightCurveDependency {
    pub reference: String,
    pub passband: String,
    pub ld_coeffs: [f64; 2],
    /// Third light.
    pub l3: f64,
    /// Passband luminosity.
    pub pblum: f64,
    pub atm: Atmosphere,
    pub alb: f64,
    pub ld_func: LimbDarkening,
}

impl LightCurveDependency {
    pub fn new(index: usize) -> Self {
        Self {
            reference: format!("lightcurve_{index}"),
            passband: "JOHNSON.V".to_string(),
            ld_coeffs: [0.0, 0.0],
            l3: 0.0,
            pblum: 1.0,
            atm: Atmosphere::default(),
            alb: 1.0,
            ld_func: LimbDarkening::default(),
        }
    }

    pub(crate) fn inherit(&mut self, component: &ComponentRecord) {
        self.atm = component.atm;
        self.alb = component.alb.value;
        self.ld_func = component.ld_func;
    }
}

/// Per-dataset radial-velocity parameters of one star.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadialVelocityDependency {
    pub reference: String,
    pub passband: String,
    pub ld_coeffs: [f64; 2],
    pub atm: Atmosphere,
    pub alb: f64,
    pub ld_func: LimbDarkening,
}

impl RadialVelocityDependency {
    pub fn new(star: Star, running_index: usize, component: &ComponentRecord) -> Self {
        Self {
            reference: format!("{}_{running_index}", star.rv_prefix()),
            passband: "JOHNSON.V".to_string(),
            ld_coeffs: [0.0, 0.0],
            atm: component.atm,
            alb: component.alb.value,
            ld_func: component.ld_func,
        }
    }
}

/// Independent variable of an observed radial-velocity curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IndependentVariable {
    #[default]
    Time,
    Phase,
}

impl IndependentVariable {
    pub fn name(self) -> &'static str {
        match self {
            IndependentVariable::Time => "time",
            IndependentVariable::Phase => "phase",
        }
    }
}

/// Meaning of the optional third column of an observation file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Weighting {
    #[default]
    Undefined,
    Sigma,
    Weight,
}

impl Weighting {
    pub fn name(self) -> &'static str {
        match self {
            Weighting::Undefined => "undefined",
            Weighting::Sigma => "sigma",
            Weighting::Weight => "weight",
        }
    }

    /// Number of numeric columns the observation file carries.
    pub fn column_count(self) -> usize {
        match self {
            Weighting::Undefined => 2,
            Weighting::Sigma | Weighting::Weight => 3,
        }
    }
}

/// An observed radial-velocity curve loaded from a data file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RvObservation {
    pub reference: String,
    pub filename: PathBuf,
    pub independent: IndependentVariable,
    /// Time or phase column, depending on `independent`.
    pub indep: Vec<f64>,
    pub rv: Vec<f64>,
    pub sigma: Option<Vec<f64>>,
    pub weight: Option<Vec<f64>>,
    pub columns: Vec<String>,
    /// Statistical weight of the whole curve.
    pub statweight: f64,
    /// Free-text component label from the legacy file.
    pub user_components: String,
}

impl RvObservation {
    pub fn len(&self) -> usize {
        self.rv.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rv.is_empty()
    }
}

/// Atmosphere tables of the legacy compute backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AtmosphereTable {
    ExternAtmx,
    #[default]
    ExternPlanckint,
}

impl From<Atmosphere> for AtmosphereTable {
    fn from(atm: Atmosphere) -> Self {
        match atm {
            Atmosphere::Kurucz => AtmosphereTable::ExternAtmx,
            Atmosphere::Blackbody => AtmosphereTable::ExternPlanckint,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IrradiationMethod {
    None,
    #[default]
    Wilson,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RvMethod {
    #[default]
    FluxWeighted,
    Dynamical,
}

/// Compute options for the legacy backend, derived from the same file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComputeOptions {
    pub atm: [AtmosphereTable; 2],
    pub gridsize: [u32; 2],
    pub irrad_method: IrradiationMethod,
    pub refl_num: u32,
    /// Whether data should be de-reddened.
    pub ie: bool,
    pub rv_method: [RvMethod; 2],
}

impl Default for ComputeOptions {
    fn default() -> Self {
        Self {
            atm: [AtmosphereTable::default(); 2],
            gridsize: [60, 60],
            irrad_method: IrradiationMethod::default(),
            refl_num: 1,
            ie: false,
            rv_method: [RvMethod::default(); 2],
        }
    }
}

/// Everything the file describes for one star.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StarParameters {
    pub component: ComponentRecord,
    pub lc_deps: Vec<LightCurveDependency>,
    pub rv_deps: Vec<RadialVelocityDependency>,
    pub observations: Vec<RvObservation>,
}

/// Finalized parameter graph of a legacy file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedSystem {
    pub primary: StarParameters,
    pub secondary: StarParameters,
    pub orbit: OrbitRecord,
    pub mesh: MeshConfig,
    pub compute: ComputeOptions,
}

impl ParsedSystem {
    pub fn star(&self, star: Star) -> &StarParameters {
        match star {
            Star::Primary => &self.primary,
            Star::Secondary => &self.secondary,
        }
    }

    /// Number of light-curve datasets (identical for both stars).
    pub fn lcno(&self) -> usize {
        self.primary.lc_deps.len()
    }

    /// Number of radial-velocity datasets over both stars.
    pub fn rvno(&self) -> usize {
        self.primary.rv_deps.len() + self.secondary.rv_deps.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_accepts_limits_before_value() {
        let mut s = Scalar::default();
        s.apply(Suffix::Max, 2.0);
        s.apply(Suffix::Min, -1.0);
        s.apply(Suffix::Step, 0.01);
        s.apply(Suffix::Val, 0.5);
        assert_eq!(s.value, 0.5);
        assert_eq!(s.limits(), (Some(-1.0), Some(2.0)));
        assert_eq!(s.step, Some(0.01));
        assert!(!s.adjust);
    }

    #[test]
    fn orbit_field_accessors_are_consistent() {
        let mut orbit = OrbitRecord::default();
        for (i, field) in OrbitField::ALL.into_iter().enumerate() {
            orbit.scalar_mut(field).value = i as f64 + 0.5;
        }
        for (i, field) in OrbitField::ALL.into_iter().enumerate() {
            assert_eq!(orbit.scalar(field).value, i as f64 + 0.5, "{}", field.name());
        }
    }

    #[test]
    fn rv_dependency_reference_uses_running_index() {
        let comp = ComponentRecord::new(Star::Secondary);
        let dep = RadialVelocityDependency::new(Star::Secondary, 3, &comp);
        assert_eq!(dep.reference, "secondaryrv_3");
        assert_eq!(dep.atm, comp.atm);
    }
}
