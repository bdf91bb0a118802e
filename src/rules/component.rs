use crate::params::ComponentField;
use crate::{Axis, Route, Star, Target};

/// Component scalars, switches and system-wide choices.
pub(crate) fn routes() -> Vec<Route> {
    use Star::{Primary, Secondary};

    vec![
        // Scalars, one key per star.
        route!("phoebe_alb1" => Target::Component(Primary, ComponentField::Albedo)),
        route!("phoebe_alb2" => Target::Component(Secondary, ComponentField::Albedo)),
        route!("phoebe_f1" => Target::Component(Primary, ComponentField::SyncPar)),
        route!("phoebe_f2" => Target::Component(Secondary, ComponentField::SyncPar)),
        route!("phoebe_grb1" => Target::Component(Primary, ComponentField::GravityDarkening)),
        route!("phoebe_grb2" => Target::Component(Secondary, ComponentField::GravityDarkening)),
        route!("phoebe_pot1" => Target::Component(Primary, ComponentField::Potential)),
        route!("phoebe_pot2" => Target::Component(Secondary, ComponentField::Potential)),
        route!("phoebe_teff1" => Target::Component(Primary, ComponentField::Teff)),
        route!("phoebe_teff2" => Target::Component(Secondary, ComponentField::Teff)),
        route!("phoebe_met1" => Target::Component(Primary, ComponentField::Metallicity)),
        route!("phoebe_met2" => Target::Component(Secondary, ComponentField::Metallicity)),
        // Switches and choices.
        route!("phoebe_atm1_switch" [BARE] => Target::AtmosphereSwitch(Primary)),
        route!("phoebe_atm2_switch" [BARE] => Target::AtmosphereSwitch(Secondary)),
        route!("phoebe_reffect_switch" [BARE] => Target::ReflectionSwitch),
        route!("phoebe_reffect_reflections" [BARE] => Target::Reflections),
        route!("phoebe_ie_switch" [BARE] => Target::ExtinctionSwitch),
        route!("phoebe_proximity_rv1_switch" [BARE] => Target::ProximitySwitch(Primary)),
        route!("phoebe_proximity_rv2_switch" [BARE] => Target::ProximitySwitch(Secondary)),
        route!("phoebe_ld_model" [BARE] => Target::LdModel),
        // Bolometric limb darkening.
        route!("phoebe_ld_xbol1" [BARE] => Target::BolometricLd(Primary, Axis::X)),
        route!("phoebe_ld_ybol1" [BARE] => Target::BolometricLd(Primary, Axis::Y)),
        route!("phoebe_ld_xbol2" [BARE] => Target::BolometricLd(Secondary, Axis::X)),
        route!("phoebe_ld_ybol2" [BARE] => Target::BolometricLd(Secondary, Axis::Y)),
        // Meshes.
        route!("phoebe_grid_finesize1" [BARE] => Target::GridSize(Primary)),
        route!("phoebe_grid_finesize2" [BARE] => Target::GridSize(Secondary)),
    ]
}
