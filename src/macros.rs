#[macro_export]
macro_rules! regex {
    ($pat:literal) => {{
        static RE: once_cell::sync::Lazy<regex::Regex> =
            once_cell::sync::Lazy::new(|| regex::Regex::new($pat).unwrap());
        &*RE
    }};
}

/// Build a routing-table entry.
///
/// ```text
/// route!("phoebe_ecc" => target)                        // VAL|MIN|MAX|STEP|ADJ, no conversion
/// route!("phoebe_perr0" => target, convert: conversion)  // scalar with unit conversion
/// route!("phoebe_lcno" [BARE] => target)                 // explicit suffix set
/// ```
macro_rules! route {
    ($key:literal => $target:expr $(,)?) => {
        route!($key [SCALAR] => $target)
    };
    ($key:literal => $target:expr, convert: $conv:expr $(,)?) => {
        route!($key [SCALAR] => $target, convert: $conv)
    };
    ($key:literal [ $($suffix:ident)|+ ] => $target:expr $(,)?) => {
        route!($key [ $($suffix)|+ ] => $target, convert: $crate::units::Conversion::Identity)
    };
    ($key:literal [ $($suffix:ident)|+ ] => $target:expr, convert: $conv:expr $(,)?) => {
        $crate::Route {
            key: $key,
            suffixes: $($crate::Suffixes::$suffix)|+,
            target: $target,
            conversion: $conv,
        }
    };
}
