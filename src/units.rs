//! Legacy ↔ internal unit conversions.
//!
//! Legacy files store rates per year and angles in degrees; the records keep
//! rates per day and angles in radians. Every conversion is a single exact
//! multiplicative factor, so `to_legacy(to_internal(x)) == x` up to rounding.
//!
//! ```text
//! dpdt    s/yr   ──÷ 31557600──────────▶ d/d
//! dperdt  deg/yr ──× π/180 ÷ 365.25────▶ rad/d
//! per0    deg    ──× π/180─────────────▶ rad
//! ```

use serde::Serialize;
use std::f64::consts::PI;

/// Length of a Julian year in seconds.
pub const SECONDS_PER_JULIAN_YEAR: f64 = 31_557_600.0;

/// Length of a Julian year in days.
pub const DAYS_PER_JULIAN_YEAR: f64 = 365.25;

/// Radians per degree.
pub const RADIANS_PER_DEGREE: f64 = PI / 180.0;

/// Conversion applied to a routed numeric value (and its limits and step).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Conversion {
    #[default]
    Identity,
    /// Period derivative: seconds per year → days per day.
    SecondsPerYearToDaysPerDay,
    /// Apsidal motion: degrees per year → radians per day.
    DegreesPerYearToRadiansPerDay,
    /// Angle: degrees → radians.
    DegreesToRadians,
}

impl Conversion {
    /// Multiplicative factor from the legacy unit to the internal unit.
    pub fn factor(self) -> f64 {
        match self {
            Conversion::Identity => 1.0,
            Conversion::SecondsPerYearToDaysPerDay => 1.0 / SECONDS_PER_JULIAN_YEAR,
            Conversion::DegreesPerYearToRadiansPerDay => RADIANS_PER_DEGREE / DAYS_PER_JULIAN_YEAR,
            Conversion::DegreesToRadians => RADIANS_PER_DEGREE,
        }
    }

    pub fn to_internal(self, legacy: f64) -> f64 {
        match self {
            Conversion::Identity => legacy,
            Conversion::SecondsPerYearToDaysPerDay => legacy / SECONDS_PER_JULIAN_YEAR,
            Conversion::DegreesPerYearToRadiansPerDay => legacy * RADIANS_PER_DEGREE / DAYS_PER_JULIAN_YEAR,
            Conversion::DegreesToRadians => legacy * RADIANS_PER_DEGREE,
        }
    }

    pub fn to_legacy(self, internal: f64) -> f64 {
        match self {
            Conversion::Identity => internal,
            Conversion::SecondsPerYearToDaysPerDay => internal * SECONDS_PER_JULIAN_YEAR,
            Conversion::DegreesPerYearToRadiansPerDay => internal * DAYS_PER_JULIAN_YEAR / RADIANS_PER_DEGREE,
            Conversion::DegreesToRadians => internal / RADIANS_PER_DEGREE,
        }
    }

    pub fn legacy_unit(self) -> &'static str {
        match self {
            Conversion::Identity => "",
            Conversion::SecondsPerYearToDaysPerDay => "s/yr",
            Conversion::DegreesPerYearToRadiansPerDay => "deg/yr",
            Conversion::DegreesToRadians => "deg",
        }
    }

    pub fn internal_unit(self) -> &'static str {
        match self {
            Conversion::Identity => "",
            Conversion::SecondsPerYearToDaysPerDay => "d/d",
            Conversion::DegreesPerYearToRadiansPerDay => "rad/d",
            Conversion::DegreesToRadians => "rad",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Conversion; 4] = [
        Conversion::Identity,
        Conversion::SecondsPerYearToDaysPerDay,
        Conversion::DegreesPerYearToRadiansPerDay,
        Conversion::DegreesToRadians,
    ];

    #[test]
    fn degrees_round_trip_through_radians() {
        for deg in [0.0, 1.0, 45.0, 90.0, 123.456, 359.9, -72.5] {
            let rad = Conversion::DegreesToRadians.to_internal(deg);
            let back = Conversion::DegreesToRadians.to_legacy(rad);
            assert!((back - deg).abs() < 1e-12, "{deg} -> {rad} -> {back}");
        }
    }

    #[test]
    fn right_angle_is_half_pi() {
        let rad = Conversion::DegreesToRadians.to_internal(90.0);
        assert!((rad - PI / 2.0).abs() < 1e-15);
    }

    #[test]
    fn one_julian_year_of_seconds_is_one_day_per_day() {
        let rate = Conversion::SecondsPerYearToDaysPerDay.to_internal(SECONDS_PER_JULIAN_YEAR);
        assert!((rate - 1.0).abs() < 1e-15);
    }

    #[test]
    fn apsidal_rate_uses_julian_year() {
        let rate = Conversion::DegreesPerYearToRadiansPerDay.to_internal(365.25);
        assert!((rate - RADIANS_PER_DEGREE).abs() < 1e-15);
    }

    #[test]
    fn factor_matches_to_internal() {
        for conv in ALL {
            let x = 17.25;
            assert!((conv.to_internal(x) - x * conv.factor()).abs() < 1e-12);
            assert!((conv.to_legacy(conv.to_internal(x)) - x).abs() < 1e-9);
        }
    }

    #[test]
    fn identity_has_no_unit_labels() {
        for conv in ALL {
            let labelled = !conv.legacy_unit().is_empty() && !conv.internal_unit().is_empty();
            assert_eq!(labelled, conv != Conversion::Identity, "{conv:?}");
        }
        assert_eq!(Conversion::DegreesToRadians.legacy_unit(), "deg");
        assert_eq!(Conversion::DegreesToRadians.internal_unit(), "rad");
    }
}
