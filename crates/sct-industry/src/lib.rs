//! # sct-industry: Industry sector pathways
//!
//! Inserts endogenous primary steel production into a sector-coupled
//! [`Network`](sct_core::Network) via the hydrogen direct reduction route:
//!
//! ```text
//!   <node> ──electricity──┐                 ┌──electricity── <node>
//!                         ▼                 ▼
//!   <node> H2 ──H2──▶ [<node> DRI] ──HBI──▶ EU HBI ──HBI──▶ [<node> EAF] ──▶ EU steel ──▶ load
//!                                            │                                 │
//!                                      (EU HBI Store)                  (EU steel Store)
//! ```
//!
//! - DRI: Direct Reduced Iron, iron ore reduced with hydrogen
//! - HBI: Hot Briquetted Iron, compacted DRI used as furnace feedstock
//! - EAF: Electric Arc Furnace, melts HBI into steel
//!
//! Two policy switches shape the result (see [`policy`]):
//!
//! | option              | off (default)                              | on                         |
//! |---------------------|--------------------------------------------|----------------------------|
//! | `relocation_steel`  | per-node capacity capped at local demand   | unbounded capacity         |
//! | `flexibility_steel` | must-run (`p_min_pu = 1`), no stores       | `p_min_pu = 0`, two stores |
//!
//! ## Example
//!
//! ```rust
//! use sct_core::{Bus, CostTable, Hours, IndustrialProduction, Network, ProductionSeries};
//! use sct_industry::{build_steel_pathway, SteelInputs, SteelOptions, STEEL_SECTOR};
//!
//! let mut network = Network::new();
//! network.add_bus(Bus::new("DE0", "AC")).unwrap();
//! network.add_bus(Bus::new("DE0 H2", "H2")).unwrap();
//!
//! let costs = CostTable::new()
//!     .with("direct iron reduction furnace", "electricity-input", 1.5)
//!     .with("direct iron reduction furnace", "hydrogen-input", 0.3)
//!     .with("direct iron reduction furnace", "fixed", 100.0)
//!     .with("direct iron reduction furnace", "ore-input", 1.2)
//!     .with("iron ore DRI-ready", "commodity", 50.0)
//!     .with("electric arc furnace", "electricity-input", 0.8)
//!     .with("electric arc furnace", "fixed", 60.0)
//!     .with("electric arc furnace", "hbi-input", 1.1);
//!
//! let mut production = IndustrialProduction::new();
//! production.insert_sector(STEEL_SECTOR, ProductionSeries::scalar(8760.0));
//!
//! let nodes = vec!["DE0".to_string()];
//! let inputs = SteelInputs {
//!     industrial_production: &production,
//!     costs: &costs,
//!     nodes: &nodes,
//!     nhours: Hours(8760.0),
//! };
//! let report = build_steel_pathway(&mut network, &inputs, &SteelOptions::default()).unwrap();
//!
//! assert_eq!(report.links, vec!["DE0 DRI", "DE0 EAF"]);
//! assert_eq!(network.load("EU steel").unwrap().p_set, 1.0);
//! ```

pub mod builder;
pub mod commodities;
pub mod conversion;
pub mod policy;

pub use builder::{build_steel_pathway, SteelInputs, SteelPathwayPlan, SteelPathwayReport};
pub use commodities::{steel_buses, steel_load, steel_stores};
pub use conversion::{ConversionParameters, SteelProcess};
pub use policy::{SteelOptions, SteelPolicy};

/// Industrial production sector served by the hydrogen DRI + EAF route
pub const STEEL_SECTOR: &str = "DRI + Electric arc";

/// EU-wide steel pool (bus) and its demand (load)
pub const STEEL_BUS: &str = "EU steel";
pub const HBI_BUS: &str = "EU HBI";
pub const STEEL_LOAD: &str = "EU steel";

/// Location tag of the EU-wide commodity pools
pub const EU_LOCATION: &str = "EU";

/// Suffix of a node's hydrogen bus: `"<node> H2"`
pub const HYDROGEN_BUS_SUFFIX: &str = " H2";

/// Technology names in the cost table
pub mod technologies {
    pub const DRI_FURNACE: &str = "direct reduction furnace";
    /// Name used by the technology-data cost tables
    pub const DRI_FURNACE_TECHNOLOGY_DATA: &str = "direct iron reduction furnace";
    /// Lookup order for direct reduction furnace parameters
    pub const DRI_FURNACE_NAMES: [&str; 2] = [DRI_FURNACE, DRI_FURNACE_TECHNOLOGY_DATA];
    pub const ELECTRIC_ARC_FURNACE: &str = "electric arc furnace";
    pub const IRON_ORE: &str = "iron ore DRI-ready";
}

/// Parameter names in the cost table
pub mod parameters {
    pub const ELECTRICITY_INPUT: &str = "electricity-input";
    pub const HYDROGEN_INPUT: &str = "hydrogen-input";
    pub const HBI_INPUT: &str = "hbi-input";
    pub const ORE_INPUT: &str = "ore-input";
    pub const FIXED: &str = "fixed";
    pub const COMMODITY: &str = "commodity";
}

/// Name of the hydrogen bus at `node`
pub fn hydrogen_bus(node: &str) -> String {
    format!("{node}{HYDROGEN_BUS_SUFFIX}")
}
