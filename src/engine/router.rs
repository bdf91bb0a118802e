//! Key router.
//!
//! The router never branches on key names: it resolves the index, splits the
//! value-kind suffix, looks the bare key up in [`crate::rules`] and applies the
//! route's [`Target`]. Scalars share one code path for every suffix, so
//! `VAL`/`MIN`/`MAX`/`STEP` behave identically across the whole vocabulary.

use tracing::debug;

use super::accumulator::RvAccumulator;
use super::index::resolve_index;
use super::metrics::IgnoreReason;
use super::normalize::{
    UNDEFINED, clean, decode_independent, decode_ld_model, decode_switch, decode_weighting, parse_count,
    parse_dataset_count, parse_f64, parse_gridsize, remap_passband,
};
use super::tokenizer::RawLine;
use crate::error::ParseError;
use crate::mesh::MeshConfig;
use crate::params::{
    Atmosphere, ComponentRecord, ComputeOptions, IrradiationMethod, LightCurveDependency, OrbitRecord, RvMethod,
};
use crate::{Axis, LcField, Route, RvField, Star, Suffix, Target, rules};

/// Records mutated line by line during the scan.
#[derive(Debug)]
pub(crate) struct RecordSet {
    pub orbit: OrbitRecord,
    pub components: [ComponentRecord; 2],
    pub mesh: MeshConfig,
    pub compute: ComputeOptions,
    /// Light-curve slots, allocated by `phoebe_lcno`.
    pub lc_deps: [Vec<LightCurveDependency>; 2],
    pub lcno: Option<usize>,
    pub rvno: Option<usize>,
}

impl Default for RecordSet {
    fn default() -> Self {
        Self {
            orbit: OrbitRecord::default(),
            components: [ComponentRecord::new(Star::Primary), ComponentRecord::new(Star::Secondary)],
            mesh: MeshConfig::default(),
            compute: ComputeOptions::default(),
            lc_deps: [Vec::new(), Vec::new()],
            lcno: None,
            rvno: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Outcome {
    Routed,
    Ignored(IgnoreReason),
}

#[derive(Debug, Default)]
pub(crate) struct Router {
    pub records: RecordSet,
    pub rv: RvAccumulator,
}

/// `phoebe_ecc.VAL` → (`phoebe_ecc`, `VAL`). Unknown tails stay part of the key.
fn split_suffix(key: &str) -> (&str, Option<Suffix>) {
    match key.rsplit_once('.') {
        Some((base, tail)) => match Suffix::parse(tail) {
            Some(suffix) => (base, Some(suffix)),
            None => (key, None),
        },
        None => (key, None),
    }
}

impl Router {
    pub(crate) fn apply(&mut self, pair: &RawLine<'_>) -> Result<Outcome, ParseError> {
        let line = pair.line;
        let indexed =
            resolve_index(pair.key).map_err(|_| ParseError::InvalidIndex { line, key: pair.key.to_string() })?;
        let (name, suffix) = split_suffix(&indexed.bare);

        let Some(route) = rules::lookup(name) else {
            debug!(line, key = pair.key, "ignoring unknown key");
            return Ok(Outcome::Ignored(IgnoreReason::UnknownKey));
        };
        if !route.accepts(suffix) {
            debug!(line, key = pair.key, "ignoring unsupported suffix");
            return Ok(Outcome::Ignored(IgnoreReason::UnsupportedSuffix));
        }

        if indexed.index.is_some() && !route.is_indexed() {
            debug!(line, key = pair.key, "dataset index on a non-dataset key ignored");
        }
        debug!(line, key = route.key, ?suffix, index = ?indexed.index, target = ?route.target, "routing");
        self.dispatch(route, suffix, indexed.index, pair)?;
        Ok(Outcome::Routed)
    }

    fn dispatch(
        &mut self,
        route: &Route,
        suffix: Option<Suffix>,
        index: Option<usize>,
        pair: &RawLine<'_>,
    ) -> Result<(), ParseError> {
        let RawLine { line, key, value } = *pair;
        let records = &mut self.records;

        match route.target {
            Target::Orbit(field) => {
                let (suffix, number) = scalar_value(route, suffix, pair)?;
                records.orbit.scalar_mut(field).apply(suffix, number);
            }
            Target::Component(star, field) => {
                let (suffix, number) = scalar_value(route, suffix, pair)?;
                records.components[star.index()].scalar_mut(field).apply(suffix, number);
            }
            Target::AtmosphereSwitch(star) => {
                let kurucz = decode_switch(line, key, value)?;
                records.components[star.index()].atm = if kurucz { Atmosphere::Kurucz } else { Atmosphere::Blackbody };
            }
            Target::ReflectionSwitch => {
                // Legacy always runs at least one reflection, so both stars stay
                // irradiators; the switch only selects the irradiation method.
                let on = decode_switch(line, key, value)?;
                records.compute.irrad_method = if on { IrradiationMethod::Wilson } else { IrradiationMethod::None };
                for component in &mut records.components {
                    component.irradiator = true;
                }
            }
            Target::Reflections => records.compute.refl_num = parse_count(line, key, value)?,
            Target::ExtinctionSwitch => records.compute.ie = decode_switch(line, key, value)?,
            Target::ProximitySwitch(star) => {
                let on = decode_switch(line, key, value)?;
                records.compute.rv_method[star.index()] = if on { RvMethod::FluxWeighted } else { RvMethod::Dynamical };
            }
            Target::LdModel => {
                let law = decode_ld_model(line, key, value)?;
                for component in &mut records.components {
                    component.ld_func = law;
                }
            }
            Target::BolometricLd(star, axis) => {
                records.components[star.index()].ld_coeffs[axis.slot()] = parse_f64(line, key, value)?;
            }
            Target::GridSize(star) => records.mesh.gridsize[star.index()] = parse_gridsize(line, key, value)?,
            Target::LcCount => {
                let n = parse_dataset_count(line, key, value)?;
                records.lc_deps = [
                    (0..n).map(LightCurveDependency::new).collect(),
                    (0..n).map(LightCurveDependency::new).collect(),
                ];
                records.lcno = Some(n);
            }
            Target::RvCount => records.rvno = Some(parse_dataset_count(line, key, value)?),
            Target::Lc(field) => self.apply_lc(field, index, pair)?,
            Target::Rv(field) => self.apply_rv(field, index, pair)?,
        }
        Ok(())
    }

    fn apply_lc(&mut self, field: LcField, index: Option<usize>, pair: &RawLine<'_>) -> Result<(), ParseError> {
        let RawLine { line, key, value } = *pair;
        let index = index.ok_or_else(|| ParseError::MissingIndex { line, key: key.to_string() })?;
        let count = self.records.lcno.ok_or_else(|| ParseError::MissingCount {
            line,
            key: key.to_string(),
            count_key: "phoebe_lcno",
        })?;
        if index >= count {
            return Err(ParseError::IndexOutOfRange { line, key: key.to_string(), index, count });
        }

        let [primary, secondary] = &mut self.records.lc_deps;
        let (p, s) = (&mut primary[index], &mut secondary[index]);

        match field {
            LcField::Reference => {
                let name = clean(value);
                if name != UNDEFINED {
                    p.reference = name.to_string();
                    s.reference = name.to_string();
                }
            }
            LcField::Passband => {
                let passband = remap_passband(value);
                s.passband = passband.clone();
                p.passband = passband;
            }
            LcField::Ld(star, axis) => {
                let coeff = parse_f64(line, key, value)?;
                let dep = if star == Star::Primary { p } else { s };
                dep.ld_coeffs[axis.slot()] = coeff;
            }
            LcField::PassbandLuminosity(star) => {
                let pblum = parse_f64(line, key, value)?;
                let dep = if star == Star::Primary { p } else { s };
                dep.pblum = pblum;
            }
            LcField::ThirdLight => {
                let l3 = parse_f64(line, key, value)?;
                p.l3 = l3;
                s.l3 = l3;
            }
        }
        Ok(())
    }

    fn apply_rv(&mut self, field: RvField, index: Option<usize>, pair: &RawLine<'_>) -> Result<(), ParseError> {
        let RawLine { line, key, value } = *pair;
        let rv = &mut self.rv;

        match field {
            RvField::Star => {
                let star = if clean(value) == Star::Primary.rv_tag() { Star::Primary } else { Star::Secondary };
                rv.stars.push(star);
            }
            RvField::Passband => rv.passbands.push(remap_passband(value)),
            RvField::Filename => rv.filenames.push(clean(value).to_string()),
            RvField::StatWeight => rv.statweights.push(parse_f64(line, key, value)?),
            RvField::Label => rv.labels.push(clean(value).to_string()),
            RvField::Independent => rv.independent.push(decode_independent(value)),
            RvField::Weighting => rv.weighting.push(decode_weighting(value)),
            RvField::Ld(star, axis) => {
                let coeff = parse_f64(line, key, value)?;
                match axis {
                    Axis::X => rv.stage_x(star, index, coeff),
                    Axis::Y => {
                        if !rv.complete_pair(star, index, coeff) {
                            return Err(ParseError::MissingCoefficient { line, key: key.to_string(), star });
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

/// Numeric value of a scalar key, converted to internal units.
///
/// `ADJ` is a flag and is never unit-converted.
fn scalar_value(route: &Route, suffix: Option<Suffix>, pair: &RawLine<'_>) -> Result<(Suffix, f64), ParseError> {
    let suffix = suffix.unwrap_or(Suffix::Val);
    let raw = parse_f64(pair.line, pair.key, pair.value)?;
    let value = match suffix {
        Suffix::Adj => raw,
        _ => route.conversion.to_internal(raw),
    };
    Ok((suffix, value))
}
