//! Radial-velocity accumulator.
//!
//! Every RV key appends to its own sequence in file order; entry `i` of each
//! sequence belongs to RV dataset `i`. Limb-darkening pairs are per star: the
//! `x` coefficient is staged under its dataset index and the pair is only
//! appended when the matching `y` arrives.

use std::collections::HashMap;

use crate::Star;
use crate::params::{IndependentVariable, Weighting};

#[derive(Debug, Default)]
pub(crate) struct RvAccumulator {
    pub stars: Vec<Star>,
    pub passbands: Vec<String>,
    pub filenames: Vec<String>,
    pub statweights: Vec<f64>,
    pub labels: Vec<String>,
    pub independent: Vec<IndependentVariable>,
    pub weighting: Vec<Weighting>,
    /// Completed `(x, y)` pairs, one sequence per star.
    pub ld_pairs: [Vec<[f64; 2]>; 2],
    staged_x: [HashMap<Option<usize>, f64>; 2],
}

impl RvAccumulator {
    pub(crate) fn stage_x(&mut self, star: Star, index: Option<usize>, x: f64) {
        self.staged_x[star.index()].insert(index, x);
    }

    /// Pair `y` with the staged `x` of the same dataset index.
    ///
    /// Returns `false` when no `x` was staged; nothing is appended then.
    pub(crate) fn complete_pair(&mut self, star: Star, index: Option<usize>, y: f64) -> bool {
        match self.staged_x[star.index()].remove(&index) {
            Some(x) => {
                self.ld_pairs[star.index()].push([x, y]);
                true
            }
            None => false,
        }
    }

    /// True when no RV key has been seen at all.
    pub(crate) fn is_empty(&self) -> bool {
        self.stars.is_empty()
            && self.passbands.is_empty()
            && self.filenames.is_empty()
            && self.statweights.is_empty()
            && self.labels.is_empty()
            && self.independent.is_empty()
            && self.weighting.is_empty()
            && self.ld_pairs.iter().all(Vec::is_empty)
            && self.staged_x.iter().all(HashMap::is_empty)
    }
}
