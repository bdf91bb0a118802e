//! The legacy key vocabulary.
//!
//! Each submodule contributes the routes for one family of targets. The full
//! table is built once and indexed by bare key; the router never branches on
//! key names itself.

use once_cell::sync::Lazy;
use std::collections::HashMap;

use crate::Route;

mod component;
mod dataset;
mod orbit;

#[cfg(test)]
mod tests;

static ROUTES: Lazy<Vec<Route>> = Lazy::new(|| {
    let mut routes = orbit::routes();
    routes.extend(component::routes());
    routes.extend(dataset::routes());
    routes
});

static BY_KEY: Lazy<HashMap<&'static str, &'static Route>> =
    Lazy::new(|| ROUTES.iter().map(|route| (route.key, route)).collect());

/// Route for a bare key (no index, no suffix).
pub(crate) fn lookup(key: &str) -> Option<&'static Route> {
    BY_KEY.get(key).copied()
}

/// Every route, in table order.
pub(crate) fn all() -> &'static [Route] {
    &ROUTES
}
