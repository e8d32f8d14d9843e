//! Furnace conversion links: direct reduction (DRI) and electric arc (EAF).
//!
//! Both furnaces are modelled as links whose capacity is measured on their
//! electricity input. Cost-table values quoted per tonne of product are
//! therefore divided by the specific electricity input (MWh/t) to land on a
//! per-MW basis, and the product output becomes `1 / electricity_input`
//! tonnes per MWh.
//!
//! | process | bus0 (input) | bus1 (output) | bus2 (extra input) |
//! |---------|--------------|---------------|--------------------|
//! | DRI     | `<node>`     | `EU HBI`      | `<node> H2`        |
//! | EAF     | `<node>`     | `EU steel`    | `EU HBI`           |

use crate::policy::SteelPolicy;
use crate::technologies::{DRI_FURNACE_NAMES, ELECTRIC_ARC_FURNACE, IRON_ORE};
use crate::{hydrogen_bus, parameters, HBI_BUS, STEEL_BUS};
use sct_core::{CostTable, Hours, Link, Megawatts, SctResult, Tonnes};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SteelProcess {
    /// Hydrogen direct reduction of iron ore into HBI
    DirectReduction,
    /// Electric arc furnace melting HBI into steel
    ElectricArcFurnace,
}

impl SteelProcess {
    pub const ALL: [SteelProcess; 2] = [
        SteelProcess::DirectReduction,
        SteelProcess::ElectricArcFurnace,
    ];

    /// Link carrier, also the suffix of the link name
    pub fn carrier(self) -> &'static str {
        match self {
            SteelProcess::DirectReduction => "DRI",
            SteelProcess::ElectricArcFurnace => "EAF",
        }
    }

    pub fn link_name(self, node: &str) -> String {
        format!("{node} {}", self.carrier())
    }

    pub fn product_bus(self) -> &'static str {
        match self {
            SteelProcess::DirectReduction => HBI_BUS,
            SteelProcess::ElectricArcFurnace => STEEL_BUS,
        }
    }

    pub fn feedstock_bus(self, node: &str) -> String {
        match self {
            SteelProcess::DirectReduction => hydrogen_bus(node),
            SteelProcess::ElectricArcFurnace => HBI_BUS.to_string(),
        }
    }
}

/// Cost-table derived parameters shared by every node's link of one process.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConversionParameters {
    pub process: SteelProcess,
    /// MWh of electricity per tonne of product
    pub electricity_input: f64,
    /// Investment cost per MW of electricity input
    pub capital_cost: f64,
    /// Operating cost per MWh of electricity input
    pub marginal_cost: f64,
    /// Tonnes of product per MWh of electricity
    pub efficiency: f64,
    /// Feedstock drawn from bus2 per MWh of electricity (magnitude)
    pub feedstock_ratio: f64,
    /// MWh of electricity input needed per tonne of final steel
    pub electricity_per_tonne_steel: f64,
}

impl ConversionParameters {
    /// Direct reduction furnace: electricity + hydrogen → HBI.
    ///
    /// Sized on the HBI the node's own EAF consumes, so that without
    /// relocation each node supplies exactly its own feedstock.
    pub fn direct_reduction(costs: &CostTable) -> SctResult<Self> {
        let electricity_input = costs.get_any(&DRI_FURNACE_NAMES, parameters::ELECTRICITY_INPUT)?;
        let hydrogen_input = costs.get_any(&DRI_FURNACE_NAMES, parameters::HYDROGEN_INPUT)?;
        let fixed = costs.get_any(&DRI_FURNACE_NAMES, parameters::FIXED)?;
        let ore_price = costs.get(IRON_ORE, parameters::COMMODITY)?;
        let ore_input = costs.get_any(&DRI_FURNACE_NAMES, parameters::ORE_INPUT)?;
        let hbi_input = costs.get(ELECTRIC_ARC_FURNACE, parameters::HBI_INPUT)?;

        Ok(Self {
            process: SteelProcess::DirectReduction,
            electricity_input,
            capital_cost: fixed / electricity_input,
            marginal_cost: ore_price * ore_input / electricity_input,
            efficiency: 1.0 / electricity_input,
            feedstock_ratio: hydrogen_input / electricity_input,
            electricity_per_tonne_steel: hbi_input * electricity_input,
        })
    }

    /// Electric arc furnace: electricity + HBI → steel.
    pub fn electric_arc_furnace(costs: &CostTable) -> SctResult<Self> {
        let electricity_input = costs.get(ELECTRIC_ARC_FURNACE, parameters::ELECTRICITY_INPUT)?;
        let fixed = costs.get(ELECTRIC_ARC_FURNACE, parameters::FIXED)?;
        let hbi_input = costs.get(ELECTRIC_ARC_FURNACE, parameters::HBI_INPUT)?;

        Ok(Self {
            process: SteelProcess::ElectricArcFurnace,
            electricity_input,
            capital_cost: fixed / electricity_input,
            marginal_cost: 0.0,
            efficiency: 1.0 / electricity_input,
            feedstock_ratio: hbi_input / electricity_input,
            electricity_per_tonne_steel: electricity_input,
        })
    }

    pub fn for_process(process: SteelProcess, costs: &CostTable) -> SctResult<Self> {
        match process {
            SteelProcess::DirectReduction => Self::direct_reduction(costs),
            SteelProcess::ElectricArcFurnace => Self::electric_arc_furnace(costs),
        }
    }

    /// Signed bus2 efficiency in the one-primary-input convention; never positive
    /// for non-negative cost inputs.
    pub fn efficiency2(&self) -> f64 {
        -self.feedstock_ratio
    }

    /// Electricity-side capacity matching `steel` tonnes per period at a flat rate
    pub fn local_capacity(&self, steel: Tonnes, nhours: Hours) -> Megawatts {
        (steel / nhours).electrical_power(self.electricity_per_tonne_steel)
    }

    /// The link installed at `node`
    pub fn link(&self, node: &str, steel: Tonnes, nhours: Hours, policy: &SteelPolicy) -> Link {
        Link::new(self.process.link_name(node), self.process.carrier(), node)
            .with_output(self.process.product_bus(), self.efficiency)
            .with_input(self.process.feedstock_bus(node), self.feedstock_ratio)
            .with_capital_cost(self.capital_cost)
            .with_marginal_cost(self.marginal_cost)
            .with_p_nom_max(policy.p_nom_max(self.local_capacity(steel, nhours)))
            .with_p_min_pu(policy.p_min_pu())
            .extendable()
    }
}
