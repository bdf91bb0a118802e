//! Value normalization.
//!
//! Raw values arrive exactly as written after the `=`: possibly quoted,
//! possibly padded. Everything here is a pure function of the raw value; the
//! router decides which of them applies to a key.

use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::str::FromStr;

use crate::error::ParseError;
use crate::params::{IndependentVariable, LimbDarkening, Weighting};

/// Passband names that changed between the legacy tool and the current tables.
static PASSBAND_SYNONYMS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("COROT.SISMO", "COROT.SIS"),
        ("KEPLER.MEAN", "KEPLER.V"),
        ("IRAC.CH1", "IRAC.36"),
        ("MOST.DEFAULT", "MOST.V"),
        ("STROMGREN.HBETA_NARROW", "STROMGREN.HBN"),
        ("STROMGREN.HBETA_WIDE", "STROMGREN.HBW"),
        ("BOLOMETRIC.3000A-10000A", "OPEN.BOL"),
        ("HIPPARCOS.BT", "TYCHO.BT"),
        ("HIPPARCOS.VT", "TYCHO.VT"),
    ])
});

/// Sentinel the legacy tool writes for "no file" and "no name".
pub(crate) const UNDEFINED: &str = "Undefined";

/// Strip surrounding whitespace and one pair of double quotes.
pub(crate) fn clean(raw: &str) -> &str {
    let trimmed = raw.trim();
    trimmed
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .map(str::trim)
        .unwrap_or(trimmed)
}

/// Map a legacy passband name onto the canonical `INSTRUMENT.BAND` form.
///
/// ```
/// use phoebe_legacy::remap_passband;
///
/// assert_eq!(remap_passband("\"Johnson:V\""), "JOHNSON.V");
/// assert_eq!(remap_passband("\"Bessell IR:J\""), "BESSEL.J");
/// assert_eq!(remap_passband("\"Sloan:u'\""), "SDSS.U");
/// assert_eq!(remap_passband("JOHNSON.V"), "JOHNSON.V");
/// ```
///
/// Names already in canonical form are returned unchanged, so remapping is
/// idempotent.
pub fn remap_passband(raw: &str) -> String {
    let value = clean(raw);

    if value.starts_with("Bes") {
        let upper = value.to_uppercase().replace("L IR:", ".");
        if upper.starts_with("BESSEL.L") {
            return "BESSEL.LPRIME".to_string();
        }
        return upper.replace(':', ".");
    }

    if !value.contains(':') {
        return value.to_string();
    }

    let upper = value.replace(':', ".").to_uppercase();
    if let Some(renamed) = PASSBAND_SYNONYMS.get(upper.as_str()) {
        return (*renamed).to_string();
    }
    if let Some(band) = upper.strip_prefix("SLOAN") {
        let band = band.strip_suffix('\'').unwrap_or(band);
        return format!("SDSS{band}");
    }
    upper
}

/// Parse a floating-point value of a recognised key.
pub(crate) fn parse_f64(line: usize, key: &str, raw: &str) -> Result<f64, ParseError> {
    let value = clean(raw);
    value.parse::<f64>().map_err(|_| invalid(line, key, raw, "a number"))
}

/// Parse a count or grid size.
pub(crate) fn parse_count<T: FromStr>(line: usize, key: &str, raw: &str) -> Result<T, ParseError> {
    clean(raw).parse::<T>().map_err(|_| invalid(line, key, raw, "a non-negative integer"))
}

/// Largest dataset count accepted for `phoebe_lcno`.
pub(crate) const MAX_DATASETS: usize = 999;

/// Parse a dataset count; slots for every dataset are allocated up front.
pub(crate) fn parse_dataset_count(line: usize, key: &str, raw: &str) -> Result<usize, ParseError> {
    match clean(raw).parse::<usize>() {
        Ok(n) if n <= MAX_DATASETS => Ok(n),
        _ => Err(invalid(line, key, raw, "a dataset count between 0 and 999")),
    }
}

/// Parse a mesh grid size, which must be positive.
pub(crate) fn parse_gridsize(line: usize, key: &str, raw: &str) -> Result<u32, ParseError> {
    match clean(raw).parse::<u32>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(invalid(line, key, raw, "a positive integer")),
    }
}

/// Decode a `0`/`1` switch.
pub(crate) fn decode_switch(line: usize, key: &str, raw: &str) -> Result<bool, ParseError> {
    match clean(raw) {
        "1" => Ok(true),
        "0" => Ok(false),
        _ => Err(invalid(line, key, raw, "0 or 1")),
    }
}

pub(crate) fn decode_ld_model(line: usize, key: &str, raw: &str) -> Result<LimbDarkening, ParseError> {
    match clean(raw) {
        "Linear cosine law" => Ok(LimbDarkening::Linear),
        "Logarithmic law" => Ok(LimbDarkening::Logarithmic),
        "Square root law" => Ok(LimbDarkening::SquareRoot),
        _ => Err(invalid(line, key, raw, "a limb-darkening law name")),
    }
}

/// `"Time (HJD)"` and friends mean time; anything else means phase.
pub(crate) fn decode_independent(raw: &str) -> IndependentVariable {
    if clean(raw).starts_with("Time") { IndependentVariable::Time } else { IndependentVariable::Phase }
}

/// `"Standard deviation"` → sigma, `"Standard weight"` → weight.
pub(crate) fn decode_weighting(raw: &str) -> Weighting {
    match clean(raw).strip_prefix("Standard ").map(str::trim) {
        Some("deviation") => Weighting::Sigma,
        Some("weight") => Weighting::Weight,
        _ => Weighting::Undefined,
    }
}

fn invalid(line: usize, key: &str, raw: &str, expected: &'static str) -> ParseError {
    ParseError::InvalidValue { line, key: key.to_string(), value: raw.to_string(), expected }
}
