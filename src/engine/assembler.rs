//! Radial-velocity reduction.
//!
//! Runs once the whole file has been read and `rvno` is known. Dataset `i`
//! goes to the star tagged at position `i`; each star numbers its datasets
//! independently, in file order:
//!
//! ```text
//! i:      0          1            2          3
//! tag:    Primary    Secondary    Primary    Primary
//! ref:    primaryrv_0 secondaryrv_0 primaryrv_1 primaryrv_2
//! ```

use std::path::{Path, PathBuf};

use tracing::debug;

use super::accumulator::RvAccumulator;
use super::normalize::UNDEFINED;
use crate::Star;
use crate::error::ParseError;
use crate::observations::ColumnLoader;
use crate::params::{ComponentRecord, IndependentVariable, RadialVelocityDependency, RvObservation, Weighting};

/// Per-star output of the reduction.
#[derive(Debug, Default)]
pub(crate) struct RvAssembly {
    pub deps: [Vec<RadialVelocityDependency>; 2],
    pub observations: [Vec<RvObservation>; 2],
}

pub(crate) fn assemble_rv(
    acc: &RvAccumulator,
    rvno: usize,
    components: &[ComponentRecord; 2],
    base_dir: Option<&Path>,
    loader: &dyn ColumnLoader,
) -> Result<RvAssembly, ParseError> {
    let mut out = RvAssembly::default();
    let mut total = [0usize; 2];
    let mut observed = [0usize; 2];

    for i in 0..rvno {
        let star = *slot(&acc.stars, i, "phoebe_rv_dep", rvno)?;
        let s = star.index();
        let ld_key = match star {
            Star::Primary => "phoebe_ld_rvy1",
            Star::Secondary => "phoebe_ld_rvy2",
        };

        let mut dep = RadialVelocityDependency::new(star, total[s], &components[s]);
        dep.passband = slot(&acc.passbands, i, "phoebe_rv_filter", rvno)?.clone();
        dep.ld_coeffs = *slot(&acc.ld_pairs[s], i, ld_key, rvno)?;
        total[s] += 1;

        let filename = slot(&acc.filenames, i, "phoebe_rv_filename", rvno)?;
        if filename != UNDEFINED {
            let path = resolve_path(base_dir, filename);
            let independent = *slot(&acc.independent, i, "phoebe_rv_indep", rvno)?;
            let weighting = *slot(&acc.weighting, i, "phoebe_rv_indweight", rvno)?;
            let statweight = *slot(&acc.statweights, i, "phoebe_rv_sigma", rvno)?;
            let label = slot(&acc.labels, i, "phoebe_rv_id", rvno)?.clone();

            let columns = loader
                .load(&path, weighting.column_count())
                .map_err(|source| ParseError::Observation { path: path.clone(), source })?;

            let obs = build_observation(
                &dep.reference,
                path,
                independent,
                weighting,
                columns,
                statweight,
                label,
            );
            debug!(
                dataset = %dep.reference,
                points = obs.len(),
                observation = observed[s],
                "loaded radial-velocity observations"
            );
            out.observations[s].push(obs);
            observed[s] += 1;
        }

        out.deps[s].push(dep);
    }

    Ok(out)
}

fn slot<'a, T>(seq: &'a [T], index: usize, sequence: &'static str, rvno: usize) -> Result<&'a T, ParseError> {
    seq.get(index).ok_or(ParseError::MissingSlot { sequence, index, rvno })
}

/// Relative paths are taken relative to the parameter file's directory.
fn resolve_path(base_dir: Option<&Path>, filename: &str) -> PathBuf {
    let path = Path::new(filename);
    match base_dir {
        Some(dir) if path.is_relative() => dir.join(path),
        _ => path.to_path_buf(),
    }
}

fn build_observation(
    reference: &str,
    filename: PathBuf,
    independent: IndependentVariable,
    weighting: Weighting,
    columns: Vec<Vec<f64>>,
    statweight: f64,
    user_components: String,
) -> RvObservation {
    let mut columns = columns.into_iter();
    let indep = columns.next().unwrap_or_default();
    let rv = columns.next().unwrap_or_default();
    let third = columns.next();

    let mut names = vec![independent.name().to_string(), "rv".to_string()];
    let (sigma, weight) = match weighting {
        Weighting::Undefined => (None, None),
        Weighting::Sigma => {
            names.push("sigma".to_string());
            (third, None)
        }
        Weighting::Weight => {
            names.push("weight".to_string());
            (None, third)
        }
    };

    RvObservation {
        reference: reference.to_string(),
        filename,
        independent,
        indep,
        rv,
        sigma,
        weight,
        columns: names,
        statweight,
        user_components,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ObservationError;
    use std::cell::RefCell;

    /// Hands out fixed columns and records what it was asked for.
    #[derive(Default)]
    struct FakeLoader {
        calls: RefCell<Vec<(PathBuf, usize)>>,
    }

    impl ColumnLoader for FakeLoader {
        fn load(&self, path: &Path, columns: usize) -> Result<Vec<Vec<f64>>, ObservationError> {
            self.calls.borrow_mut().push((path.to_path_buf(), columns));
            Ok((0..columns).map(|c| vec![c as f64, c as f64 + 0.5]).collect())
        }
    }

    fn components() -> [ComponentRecord; 2] {
        [ComponentRecord::new(Star::Primary), ComponentRecord::new(Star::Secondary)]
    }

    fn push(acc: &mut RvAccumulator, star: Star, filename: &str, weighting: Weighting) {
        let i = acc.stars.len();
        acc.stars.push(star);
        acc.passbands.push("JOHNSON.V".to_string());
        acc.filenames.push(filename.to_string());
        acc.weighting.push(weighting);
        acc.independent.push(IndependentVariable::Time);
        acc.statweights.push(1.0);
        acc.labels.push(format!("set{i}"));
        for s in Star::BOTH {
            acc.stage_x(s, Some(i), 0.1 * i as f64);
            acc.complete_pair(s, Some(i), 0.2);
        }
    }

    #[test]
    fn running_indices_are_per_star() {
        let mut acc = RvAccumulator::default();
        push(&mut acc, Star::Primary, UNDEFINED, Weighting::Undefined);
        push(&mut acc, Star::Secondary, UNDEFINED, Weighting::Undefined);
        push(&mut acc, Star::Primary, UNDEFINED, Weighting::Undefined);

        let out = assemble_rv(&acc, 3, &components(), None, &FakeLoader::default()).unwrap();
        let refs: Vec<&str> = out.deps[0].iter().map(|d| d.reference.as_str()).collect();
        assert_eq!(refs, ["primaryrv_0", "primaryrv_1"]);
        assert_eq!(out.deps[1][0].reference, "secondaryrv_0");
        // ld pairs come from the global dataset index.
        assert_eq!(out.deps[0][1].ld_coeffs, [0.1 * 2.0, 0.2]);
        assert!(out.observations.iter().all(Vec::is_empty));
    }

    #[test]
    fn column_count_follows_weighting() {
        let mut acc = RvAccumulator::default();
        push(&mut acc, Star::Primary, "a.rv", Weighting::Undefined);
        push(&mut acc, Star::Primary, "b.rv", Weighting::Sigma);
        push(&mut acc, Star::Secondary, "/abs/c.rv", Weighting::Weight);

        let loader = FakeLoader::default();
        let out = assemble_rv(&acc, 3, &components(), Some(Path::new("/data")), &loader).unwrap();

        let calls = loader.calls.borrow();
        assert_eq!(calls[0], (PathBuf::from("/data/a.rv"), 2));
        assert_eq!(calls[1], (PathBuf::from("/data/b.rv"), 3));
        assert_eq!(calls[2], (PathBuf::from("/abs/c.rv"), 3));

        let sigma = &out.observations[0][1];
        assert_eq!(sigma.columns, ["time", "rv", "sigma"]);
        assert_eq!(sigma.sigma.as_deref(), Some(&[2.0, 2.5][..]));
        assert!(sigma.weight.is_none());

        let weight = &out.observations[1][0];
        assert_eq!(weight.reference, "secondaryrv_0");
        assert!(weight.sigma.is_none());
        assert!(weight.weight.is_some());
        assert_eq!(weight.statweight, 1.0);
        assert_eq!(weight.user_components, "set2");
    }

    #[test]
    fn missing_slot_is_fatal() {
        let mut acc = RvAccumulator::default();
        push(&mut acc, Star::Primary, UNDEFINED, Weighting::Undefined);

        let err = assemble_rv(&acc, 2, &components(), None, &FakeLoader::default()).unwrap_err();
        assert!(matches!(err, ParseError::MissingSlot { sequence: "phoebe_rv_dep", index: 1, rvno: 2 }));
    }

    #[test]
    fn observed_dataset_needs_every_description_slot() {
        let cases: [(&str, fn(&mut RvAccumulator)); 4] = [
            ("phoebe_rv_indep", |acc| acc.independent.clear()),
            ("phoebe_rv_indweight", |acc| acc.weighting.clear()),
            ("phoebe_rv_sigma", |acc| acc.statweights.clear()),
            ("phoebe_rv_id", |acc| acc.labels.clear()),
        ];
        for (key, drop_slot) in cases {
            let mut acc = RvAccumulator::default();
            push(&mut acc, Star::Primary, "ph.rv", Weighting::Sigma);
            drop_slot(&mut acc);

            let loader = FakeLoader::default();
            let err = assemble_rv(&acc, 1, &components(), None, &loader).unwrap_err();
            assert!(
                matches!(err, ParseError::MissingSlot { sequence, index: 0, rvno: 1 } if sequence == key),
                "{key}: {err:?}"
            );
            assert!(loader.calls.borrow().is_empty(), "{key}: file read before the check");
        }
    }

    #[test]
    fn unobserved_dataset_skips_description_slots() {
        let mut acc = RvAccumulator::default();
        push(&mut acc, Star::Primary, UNDEFINED, Weighting::Undefined);
        acc.independent.clear();
        acc.weighting.clear();
        acc.statweights.clear();
        acc.labels.clear();

        let out = assemble_rv(&acc, 1, &components(), None, &FakeLoader::default()).unwrap();
        assert_eq!(out.deps[0][0].reference, "primaryrv_0");
    }

    #[test]
    fn entries_beyond_rvno_are_ignored() {
        let mut acc = RvAccumulator::default();
        push(&mut acc, Star::Primary, UNDEFINED, Weighting::Undefined);
        push(&mut acc, Star::Secondary, UNDEFINED, Weighting::Undefined);

        let out = assemble_rv(&acc, 1, &components(), None, &FakeLoader::default()).unwrap();
        assert_eq!(out.deps[0].len() + out.deps[1].len(), 1);
    }
}
