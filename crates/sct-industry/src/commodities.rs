//! EU-wide commodity pools, steel demand and optional buffers.

use crate::{EU_LOCATION, HBI_BUS, STEEL_BUS, STEEL_LOAD};
use sct_core::{Bus, Hours, Load, ProductionSeries, Store, TonnesPerHour};

/// The `EU steel` and `EU HBI` buses, both in tonnes
pub fn steel_buses() -> [Bus; 2] {
    [
        Bus::new(STEEL_BUS, "steel")
            .with_location(EU_LOCATION)
            .with_unit("t"),
        Bus::new(HBI_BUS, "HBI")
            .with_location(EU_LOCATION)
            .with_unit("t"),
    ]
}

/// Flat steel demand: the period total spread evenly over `nhours`.
///
/// A zero horizon yields a non-finite rate; callers must pass a positive one.
pub fn steel_load(production: &ProductionSeries, nhours: Hours) -> Load {
    let rate: TonnesPerHour = production.total() / nhours;
    Load::new(STEEL_LOAD, STEEL_BUS, rate.value()).with_carrier("steel")
}

/// One extendable, cyclic store per commodity pool
pub fn steel_stores() -> [Store; 2] {
    [
        Store::new(format!("{STEEL_BUS} Store"), STEEL_BUS)
            .with_carrier("steel")
            .extendable()
            .cyclic(),
        Store::new(format!("{HBI_BUS} Store"), HBI_BUS)
            .with_carrier("HBI")
            .extendable()
            .cyclic(),
    ]
}
