use crate::params::OrbitField;
use crate::{Route, Target};

/// Orbit scalars. Every one accepts VAL/MIN/MAX/STEP (and ADJ).
pub(crate) fn routes() -> Vec<Route> {
    vec![
        route!("phoebe_dpdt" => Target::Orbit(OrbitField::PeriodDerivative),
            convert: OrbitField::PeriodDerivative.legacy_conversion()),
        route!("phoebe_dperdt" => Target::Orbit(OrbitField::ApsidalMotion),
            convert: OrbitField::ApsidalMotion.legacy_conversion()),
        route!("phoebe_ecc" => Target::Orbit(OrbitField::Eccentricity)),
        route!("phoebe_hjd0" => Target::Orbit(OrbitField::Epoch)),
        route!("phoebe_incl" => Target::Orbit(OrbitField::Inclination)),
        route!("phoebe_period" => Target::Orbit(OrbitField::Period)),
        route!("phoebe_perr0" => Target::Orbit(OrbitField::ArgumentOfPeriastron),
            convert: OrbitField::ArgumentOfPeriastron.legacy_conversion()),
        route!("phoebe_pshift" => Target::Orbit(OrbitField::PhaseShift)),
        route!("phoebe_rm" => Target::Orbit(OrbitField::MassRatio)),
        route!("phoebe_sma" => Target::Orbit(OrbitField::SemiMajorAxis)),
        route!("phoebe_vga" => Target::Orbit(OrbitField::SystemicVelocity)),
    ]
}
