//! Surface-mesh settings.
//!
//! Legacy files describe each star's mesh with a WD grid size. The marching
//! mesher uses a continuous refinement `delta` instead; the two are related by
//! an empirical power law:
//!
//! ```text
//! delta = 10^(-0.98359345 · log10(gridsize) + 0.4713824)
//! ```

use serde::Serialize;

use crate::Star;

const CALIBRATION_SLOPE: f64 = -0.98359345;
const CALIBRATION_INTERCEPT: f64 = 0.4713824;

/// Default WD grid size.
pub const DEFAULT_GRIDSIZE: u32 = 60;

/// Which meshing convention the caller wants for constructed bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MeshConvention {
    #[default]
    Wd,
    Marching,
}

impl MeshConvention {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "wd" => Some(MeshConvention::Wd),
            "marching" => Some(MeshConvention::Marching),
            _ => None,
        }
    }
}

/// Mesh settings handed to the model-construction collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Mesh {
    Wd { gridsize: u32 },
    Marching { delta: f64 },
}

/// WD grid sizes of both stars as read from the legacy file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MeshConfig {
    pub gridsize: [u32; 2],
}

impl Default for MeshConfig {
    fn default() -> Self {
        Self { gridsize: [DEFAULT_GRIDSIZE; 2] }
    }
}

impl MeshConfig {
    /// Mesh for `star` in the requested convention.
    pub fn for_star(&self, star: Star, convention: MeshConvention) -> Mesh {
        let gridsize = self.gridsize[star.index()];
        match convention {
            MeshConvention::Wd => Mesh::Wd { gridsize },
            MeshConvention::Marching => Mesh::Marching { delta: marching_delta(gridsize) },
        }
    }
}

/// Marching-mesh `delta` equivalent to a WD grid size.
pub fn marching_delta(gridsize: u32) -> f64 {
    let exponent = CALIBRATION_SLOPE * f64::from(gridsize).log10() + CALIBRATION_INTERCEPT;
    10f64.powf(exponent)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wd_convention_passes_gridsize_through() {
        let config = MeshConfig { gridsize: [40, 70] };
        assert_eq!(config.for_star(Star::Primary, MeshConvention::Wd), Mesh::Wd { gridsize: 40 });
        assert_eq!(config.for_star(Star::Secondary, MeshConvention::Wd), Mesh::Wd { gridsize: 70 });
    }

    #[test]
    fn marching_delta_follows_calibration() {
        // gridsize 1 leaves only the intercept.
        assert!((marching_delta(1) - 10f64.powf(CALIBRATION_INTERCEPT)).abs() < 1e-12);

        let delta = marching_delta(60);
        let expected = 10f64.powf(-0.98359345 * 60f64.log10() + 0.4713824);
        assert!((delta - expected).abs() < 1e-15);
        assert!(delta > 0.05 && delta < 0.06, "delta = {delta}");
    }

    #[test]
    fn finer_grid_gives_smaller_delta() {
        assert!(marching_delta(90) < marching_delta(30));
    }

    #[test]
    fn parse_convention_names() {
        assert_eq!(MeshConvention::parse("WD"), Some(MeshConvention::Wd));
        assert_eq!(MeshConvention::parse("marching"), Some(MeshConvention::Marching));
        assert_eq!(MeshConvention::parse("roche"), None);
    }
}
