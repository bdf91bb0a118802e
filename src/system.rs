//! Output assembly.
//!
//! The parser always produces a [`ParsedSystem`]. What the caller gets back
//! depends on [`Options`]:
//!
//! ```text
//! create_body  create_bundle   result
//! false        false           Assembled::Records(ParsedSystem)
//! true         false           Assembled::System(builder.system(..))
//! any          true            Assembled::Bundle(builder.bundle(..))
//! ```
//!
//! Construction of stars, systems and bundles is delegated to a
//! [`SystemBuilder`]. [`RecordBuilder`] is the default and just collects the
//! records into serializable values.

use serde::Serialize;
use std::convert::Infallible;

use crate::Options;
use crate::Star;
use crate::epoch;
use crate::error::ParseError;
use crate::mesh::{Mesh, MeshConvention};
use crate::params::{
    ComponentRecord, ComputeOptions, LightCurveDependency, OrbitRecord, ParsedSystem, RadialVelocityDependency,
    RvObservation,
};

/// A dataset dependency handed to the star builder.
#[derive(Debug, Clone, Copy)]
pub enum PassbandDependency<'a> {
    Lc(&'a LightCurveDependency),
    Rv(&'a RadialVelocityDependency),
}

/// Everything needed to build one star.
#[derive(Debug, Clone)]
pub struct StarInput<'a> {
    pub star: Star,
    pub component: &'a ComponentRecord,
    pub orbit: &'a OrbitRecord,
    pub mesh: Mesh,
    /// Light-curve dependencies first, then radial-velocity ones.
    pub pbdeps: Vec<PassbandDependency<'a>>,
    /// Observations, present only when the star has radial-velocity datasets.
    pub obs: Option<&'a [RvObservation]>,
}

/// Constructs stars, a two-body system and a bundle from finalized records.
pub trait SystemBuilder {
    type Star;
    type System;
    type Bundle;
    type Error: std::error::Error + Send + Sync + 'static;

    fn star(&self, input: StarInput<'_>) -> Result<Self::Star, Self::Error>;

    fn system(&self, stars: [Self::Star; 2], orbit: &OrbitRecord) -> Result<Self::System, Self::Error>;

    fn bundle(&self, system: Self::System, compute: &ComputeOptions) -> Result<Self::Bundle, Self::Error>;
}

/// The three output shapes.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Assembled<S, B> {
    Records(ParsedSystem),
    System(S),
    Bundle(B),
}

/// Output of the default builder.
pub type Output = Assembled<BodyBag, Bundle>;

/// A star with its mesh, datasets and observations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BinaryStar {
    pub component: ComponentRecord,
    pub orbit: String,
    pub mesh: Mesh,
    pub lc_deps: Vec<LightCurveDependency>,
    pub rv_deps: Vec<RadialVelocityDependency>,
    pub obs: Vec<RvObservation>,
}

/// Two stars on a shared orbit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BodyBag {
    pub label: String,
    pub orbit: OrbitRecord,
    pub stars: [BinaryStar; 2],
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bundle {
    pub system: BodyBag,
    pub compute: ComputeOptions,
}

/// Collects records into [`BinaryStar`], [`BodyBag`] and [`Bundle`] values.
#[derive(Debug, Default, Clone, Copy)]
pub struct RecordBuilder;

impl SystemBuilder for RecordBuilder {
    type Star = BinaryStar;
    type System = BodyBag;
    type Bundle = Bundle;
    type Error = Infallible;

    fn star(&self, input: StarInput<'_>) -> Result<BinaryStar, Infallible> {
        let mut lc_deps = Vec::new();
        let mut rv_deps = Vec::new();
        for dep in input.pbdeps {
            match dep {
                PassbandDependency::Lc(lc) => lc_deps.push(lc.clone()),
                PassbandDependency::Rv(rv) => rv_deps.push(rv.clone()),
            }
        }

        Ok(BinaryStar {
            component: input.component.clone(),
            orbit: input.orbit.label.clone(),
            mesh: input.mesh,
            lc_deps,
            rv_deps,
            obs: input.obs.map(<[RvObservation]>::to_vec).unwrap_or_default(),
        })
    }

    fn system(&self, stars: [BinaryStar; 2], orbit: &OrbitRecord) -> Result<BodyBag, Infallible> {
        Ok(BodyBag { label: orbit.label.clone(), orbit: orbit.clone(), stars })
    }

    fn bundle(&self, system: BodyBag, compute: &ComputeOptions) -> Result<Bundle, Infallible> {
        Ok(Bundle { system, compute: compute.clone() })
    }
}

/// Shape finalized records according to `options`.
///
/// The orbit epoch is brought to `options.epoch` first, whatever the shape.
pub fn assemble<B: SystemBuilder>(
    mut records: ParsedSystem,
    options: &Options,
    builder: &B,
) -> Result<Assembled<B::System, B::Bundle>, ParseError> {
    epoch::convert(&mut records.orbit, options.epoch);

    if !options.create_body && !options.create_bundle {
        return Ok(Assembled::Records(records));
    }

    let primary = builder.star(star_input(&records, Star::Primary, options.mesh)).map_err(build_error)?;
    let secondary = builder.star(star_input(&records, Star::Secondary, options.mesh)).map_err(build_error)?;
    let system = builder.system([primary, secondary], &records.orbit).map_err(build_error)?;

    if options.create_bundle {
        let bundle = builder.bundle(system, &records.compute).map_err(build_error)?;
        return Ok(Assembled::Bundle(bundle));
    }
    Ok(Assembled::System(system))
}

fn star_input(records: &ParsedSystem, star: Star, convention: MeshConvention) -> StarInput<'_> {
    let params = records.star(star);
    let pbdeps = params
        .lc_deps
        .iter()
        .map(PassbandDependency::Lc)
        .chain(params.rv_deps.iter().map(PassbandDependency::Rv))
        .collect();
    let obs = if params.rv_deps.is_empty() { None } else { Some(params.observations.as_slice()) };

    StarInput {
        star,
        component: &params.component,
        orbit: &records.orbit,
        mesh: records.mesh.for_star(star, convention),
        pbdeps,
        obs,
    }
}

fn build_error<E: std::error::Error + Send + Sync + 'static>(err: E) -> ParseError {
    ParseError::Build(Box::new(err))
}
