use std::collections::HashSet;

use crate::params::{ComponentField, OrbitField};
use crate::rules;
use crate::units::Conversion;
use crate::{Star, Suffix, Suffixes, Target};

#[test]
fn keys_are_unique() {
    let mut seen = HashSet::new();
    for route in rules::all() {
        assert!(seen.insert(route.key), "duplicate route for {}", route.key);
    }
}

#[test]
fn every_key_uses_the_legacy_prefix() {
    for route in rules::all() {
        assert!(route.key.starts_with("phoebe_"), "{}", route.key);
        assert!(!route.key.contains('[') && !route.key.contains('.'), "{}", route.key);
    }
}

#[test]
fn every_orbit_field_has_exactly_one_route() {
    for field in OrbitField::ALL {
        let count = rules::all().iter().filter(|r| r.target == Target::Orbit(field)).count();
        assert_eq!(count, 1, "{}", field.name());
    }
}

#[test]
fn every_component_field_has_one_route_per_star() {
    for star in Star::BOTH {
        for field in ComponentField::ALL {
            let count = rules::all().iter().filter(|r| r.target == Target::Component(star, field)).count();
            assert_eq!(count, 1, "{star:?} {}", field.name());
        }
    }
}

#[test]
fn conversions_only_on_rates_and_periastron() {
    let converted: Vec<(&str, Conversion)> = rules::all()
        .iter()
        .filter(|r| r.conversion != Conversion::Identity)
        .map(|r| (r.key, r.conversion))
        .collect();

    assert_eq!(
        converted,
        vec![
            ("phoebe_dpdt", Conversion::SecondsPerYearToDaysPerDay),
            ("phoebe_dperdt", Conversion::DegreesPerYearToRadiansPerDay),
            ("phoebe_perr0", Conversion::DegreesToRadians),
        ]
    );
}

#[test]
fn orbit_routes_convert_like_their_field() {
    for route in rules::all() {
        if let Target::Orbit(field) = route.target {
            assert_eq!(route.conversion, field.legacy_conversion(), "{}", route.key);
            if route.conversion != Conversion::Identity {
                assert_eq!(field.unit(), route.conversion.internal_unit(), "{}", route.key);
            }
        }
    }
}

#[test]
fn scalar_routes_accept_every_value_kind() {
    for route in rules::all() {
        if matches!(route.target, Target::Orbit(_) | Target::Component(..)) {
            for suffix in [Suffix::Val, Suffix::Min, Suffix::Max, Suffix::Step, Suffix::Adj] {
                assert!(route.accepts(Some(suffix)), "{} {suffix:?}", route.key);
            }
            assert!(!route.accepts(None), "{} must not accept a bare key", route.key);
        }
    }
}

#[test]
fn structural_keys_are_bare() {
    for key in ["phoebe_lcno", "phoebe_rvno", "phoebe_ld_model", "phoebe_rv_dep"] {
        let route = rules::lookup(key).unwrap();
        assert_eq!(route.suffixes, Suffixes::BARE, "{key}");
        assert!(route.accepts(None));
        assert!(!route.accepts(Some(Suffix::Val)));
    }
}

#[test]
fn value_only_dataset_keys() {
    for key in ["phoebe_hla", "phoebe_cla", "phoebe_el3", "phoebe_ld_lcx1", "phoebe_ld_lcx2"] {
        let route = rules::lookup(key).unwrap();
        assert!(route.accepts(Some(Suffix::Val)), "{key}");
        assert!(!route.accepts(Some(Suffix::Min)), "{key}");
        assert!(route.is_indexed(), "{key}");
    }
}

#[test]
fn unknown_keys_are_not_routed() {
    assert!(rules::lookup("phoebe_name").is_none());
    assert!(rules::lookup("phoebe_ecc.VAL").is_none());
    assert!(rules::lookup("").is_none());
}

#[test]
fn vocabulary_size() {
    let scalars = rules::all().iter().filter(|r| r.suffixes == Suffixes::SCALAR).count();
    assert_eq!(scalars, 11 + 12);
    assert_eq!(rules::all().len(), 11 + 26 + 22);
}
