use crate::{Axis, LcField, Route, RvField, Star, Target};

/// Dataset counts plus the indexed light-curve and radial-velocity keys.
///
/// Light-curve keys write straight into their index slot. Radial-velocity keys
/// only feed the accumulator; their index is ignored and file order decides.
pub(crate) fn routes() -> Vec<Route> {
    use Star::{Primary, Secondary};

    vec![
        route!("phoebe_lcno" [BARE] => Target::LcCount),
        route!("phoebe_rvno" [BARE] => Target::RvCount),
        // Light curves.
        route!("phoebe_lc_filename" [BARE] => Target::Lc(LcField::Reference)),
        route!("phoebe_lc_filter" [BARE] => Target::Lc(LcField::Passband)),
        route!("phoebe_ld_lcx1" [VAL] => Target::Lc(LcField::Ld(Primary, Axis::X))),
        route!("phoebe_ld_lcx2" [VAL] => Target::Lc(LcField::Ld(Secondary, Axis::X))),
        route!("phoebe_ld_lcy1" [BARE] => Target::Lc(LcField::Ld(Primary, Axis::Y))),
        route!("phoebe_ld_lcy2" [BARE] => Target::Lc(LcField::Ld(Secondary, Axis::Y))),
        route!("phoebe_hla" [VAL] => Target::Lc(LcField::PassbandLuminosity(Primary))),
        route!("phoebe_cla" [VAL] => Target::Lc(LcField::PassbandLuminosity(Secondary))),
        route!("phoebe_el3" [VAL] => Target::Lc(LcField::ThirdLight)),
        // Radial velocities.
        route!("phoebe_rv_dep" [BARE] => Target::Rv(RvField::Star)),
        route!("phoebe_rv_filter" [BARE] => Target::Rv(RvField::Passband)),
        route!("phoebe_rv_filename" [BARE] => Target::Rv(RvField::Filename)),
        route!("phoebe_rv_sigma" [BARE] => Target::Rv(RvField::StatWeight)),
        route!("phoebe_rv_id" [BARE] => Target::Rv(RvField::Label)),
        route!("phoebe_rv_indep" [BARE] => Target::Rv(RvField::Independent)),
        route!("phoebe_rv_indweight" [BARE] => Target::Rv(RvField::Weighting)),
        route!("phoebe_ld_rvx1" [BARE] => Target::Rv(RvField::Ld(Primary, Axis::X))),
        route!("phoebe_ld_rvx2" [BARE] => Target::Rv(RvField::Ld(Secondary, Axis::X))),
        route!("phoebe_ld_rvy1" [BARE] => Target::Rv(RvField::Ld(Primary, Axis::Y))),
        route!("phoebe_ld_rvy2" [BARE] => Target::Rv(RvField::Ld(Secondary, Axis::Y))),
    ]
}
