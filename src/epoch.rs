//! Orbital epoch conventions.
//!
//! Legacy models give `t0` at superior conjunction. The periastron-passage
//! epoch follows from the phase shift, the period and the argument of
//! periastron (radians):
//!
//! ```text
//! t0_perpass = t0_supconj + (phshift - 0.25 + per0 / 2π) · period
//! ```

use chrono::{DateTime, NaiveDateTime};
use std::f64::consts::TAU;

use crate::params::{EpochConvention, OrbitRecord};

/// Julian date of the Unix epoch (1970-01-01T00:00:00 UTC).
const UNIX_EPOCH_JD: f64 = 2_440_587.5;
const SECONDS_PER_DAY: f64 = 86_400.0;

fn offset(phshift: f64, period: f64, per0: f64) -> f64 {
    (phshift - 0.25 + per0 / TAU) * period
}

/// Epoch of periastron passage from an epoch of superior conjunction.
pub fn supconj_to_perpass(t0_supconj: f64, phshift: f64, period: f64, per0: f64) -> f64 {
    t0_supconj + offset(phshift, period, per0)
}

/// Epoch of superior conjunction from an epoch of periastron passage.
pub fn perpass_to_supconj(t0_perpass: f64, phshift: f64, period: f64, per0: f64) -> f64 {
    t0_perpass - offset(phshift, period, per0)
}

/// Rewrite `orbit.t0` (value and limits) to periastron passage.
///
/// Returns `false` and leaves the record alone when it already uses that
/// convention.
pub fn from_supconj_to_perpass(orbit: &mut OrbitRecord) -> bool {
    if orbit.t0type == EpochConvention::PeriastronPassage {
        return false;
    }
    let shift = offset(orbit.phshift.value, orbit.period.value, orbit.per0.value);
    orbit.t0.shift(shift);
    orbit.t0type = EpochConvention::PeriastronPassage;
    true
}

/// Inverse of [`from_supconj_to_perpass`].
pub fn from_perpass_to_supconj(orbit: &mut OrbitRecord) -> bool {
    if orbit.t0type == EpochConvention::SuperiorConjunction {
        return false;
    }
    let shift = offset(orbit.phshift.value, orbit.period.value, orbit.per0.value);
    orbit.t0.shift(-shift);
    orbit.t0type = EpochConvention::SuperiorConjunction;
    true
}

/// Bring `orbit` to the requested convention.
pub fn convert(orbit: &mut OrbitRecord, target: EpochConvention) -> bool {
    match target {
        EpochConvention::PeriastronPassage => from_supconj_to_perpass(orbit),
        EpochConvention::SuperiorConjunction => from_perpass_to_supconj(orbit),
    }
}

/// UTC calendar timestamp of a full Julian date.
///
/// Reduced or modified dates (anything before JD 2400000) return `None`, as
/// do dates outside chrono's range.
pub fn jd_to_datetime(jd: f64) -> Option<NaiveDateTime> {
    if !jd.is_finite() || jd < 2_400_000.0 {
        return None;
    }
    let seconds = (jd - UNIX_EPOCH_JD) * SECONDS_PER_DAY;
    let whole = seconds.floor();
    let nanos = ((seconds - whole) * 1e9).round().min(999_999_999.0) as u32;
    DateTime::from_timestamp(whole as i64, nanos).map(|dt| dt.naive_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::f64::consts::PI;

    #[test]
    fn circular_orbit_shifts_by_quarter_period() {
        let t0 = supconj_to_perpass(2450000.0, 0.0, 10.0, 0.0);
        assert!((t0 - 2449997.5).abs() < 1e-9);
    }

    #[test]
    fn inverse_restores_superior_conjunction() {
        let perpass = supconj_to_perpass(2455123.25, 0.03, 3.7, 1.2);
        let back = perpass_to_supconj(perpass, 0.03, 3.7, 1.2);
        assert!((back - 2455123.25).abs() < 1e-9);
    }

    #[test]
    fn record_conversion_updates_tag_and_limits() {
        let mut orbit = OrbitRecord::default();
        orbit.t0.value = 100.0;
        orbit.t0.lower = Some(99.0);
        orbit.period.value = 4.0;
        orbit.per0.value = PI / 2.0;

        assert!(from_supconj_to_perpass(&mut orbit));
        // (0 - 0.25 + 0.25) * 4 = 0
        assert!((orbit.t0.value - 100.0).abs() < 1e-12);
        assert_eq!(orbit.t0type, EpochConvention::PeriastronPassage);
        assert!(!from_supconj_to_perpass(&mut orbit));

        orbit.per0.value = 0.0;
        assert!(from_perpass_to_supconj(&mut orbit));
        assert!((orbit.t0.value - 101.0).abs() < 1e-12);
        assert!((orbit.t0.lower.unwrap() - 100.0).abs() < 1e-12);
        assert_eq!(orbit.t0type, EpochConvention::SuperiorConjunction);
    }

    #[test]
    fn convert_round_trips() {
        let mut orbit = OrbitRecord::default();
        orbit.t0.value = 2450000.0;
        orbit.period.value = 10.0;
        orbit.per0.value = 0.4;
        orbit.phshift.value = 0.1;
        let original = orbit.t0.value;

        convert(&mut orbit, EpochConvention::PeriastronPassage);
        convert(&mut orbit, EpochConvention::SuperiorConjunction);
        assert!((orbit.t0.value - original).abs() < 1e-9);
    }

    #[test]
    fn julian_date_of_j2000() {
        let dt = jd_to_datetime(2451545.0).unwrap();
        let expected = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap().and_hms_opt(12, 0, 0).unwrap();
        assert_eq!(dt, expected);
    }

    #[test]
    fn reduced_dates_are_not_converted() {
        assert!(jd_to_datetime(54000.0).is_none());
        assert!(jd_to_datetime(f64::NAN).is_none());
    }
}
