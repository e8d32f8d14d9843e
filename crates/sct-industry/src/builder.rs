//! Top-level steel pathway construction.
//!
//! Construction is split into a pure derivation step ([`SteelPathwayPlan::derive`])
//! and a registration step ([`SteelPathwayPlan::apply`]). Every cost lookup,
//! production lookup and bus reference is resolved before the first component
//! is added, so a failing build leaves the network as it was.

use crate::commodities::{steel_buses, steel_load, steel_stores};
use crate::conversion::ConversionParameters;
use crate::policy::{SteelOptions, SteelPolicy};
use crate::STEEL_SECTOR;
use sct_core::{
    Bus, ComponentKind, CostTable, Hours, IndustrialProduction, Link, Load, Network,
    ProductionSeries, SctError, SctResult, Store, TonnesPerHour,
};
use serde::Serialize;
use std::collections::HashSet;
use tracing::{debug, info};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Read-only inputs of the steel pathway
#[derive(Debug, Clone, Copy)]
pub struct SteelInputs<'a> {
    pub industrial_production: &'a IndustrialProduction,
    pub costs: &'a CostTable,
    /// Spatial nodes; each needs an electricity bus `<node>` and a hydrogen
    /// bus `<node> H2`
    pub nodes: &'a [String],
    /// Hours represented by the modelling horizon
    pub nhours: Hours,
}

/// Components to add, fully parameterised
#[derive(Debug, Clone)]
pub struct SteelPathwayPlan {
    pub policy: SteelPolicy,
    pub buses: Vec<Bus>,
    pub load: Load,
    pub stores: Vec<Store>,
    /// One DRI link per node, in node order
    pub dri_links: Vec<Link>,
    /// One EAF link per node, in node order
    pub eaf_links: Vec<Link>,
}

/// Names of the components a build added
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SteelPathwayReport {
    pub policy: SteelPolicy,
    pub buses: Vec<String>,
    pub loads: Vec<String>,
    pub stores: Vec<String>,
    pub links: Vec<String>,
    pub steel_demand: TonnesPerHour,
}

impl SteelPathwayPlan {
    pub fn derive(inputs: &SteelInputs<'_>, options: &SteelOptions) -> SctResult<Self> {
        let steel_production = inputs.industrial_production.sector(STEEL_SECTOR)?;
        let load = steel_load(steel_production, inputs.nhours);

        let policy = SteelPolicy::resolve(options);
        let stores = if policy.buffers_enabled() {
            Vec::from(steel_stores())
        } else {
            Vec::new()
        };

        let dri = ConversionParameters::direct_reduction(inputs.costs)?;
        let eaf = ConversionParameters::electric_arc_furnace(inputs.costs)?;
        let (dri_links, eaf_links): (Vec<Link>, Vec<Link>) =
            node_links(&dri, &eaf, inputs.nodes, steel_production, inputs.nhours, &policy)?
                .into_iter()
                .unzip();

        Ok(Self {
            policy,
            buses: Vec::from(steel_buses()),
            load,
            stores,
            dri_links,
            eaf_links,
        })
    }

    /// Verify that the plan can be registered on `network` in full: every
    /// name is free in the network and unique within the plan, and every
    /// port bus exists or is planned.
    pub fn check(&self, network: &Network) -> SctResult<()> {
        let mut planned: HashSet<(ComponentKind, String)> = HashSet::new();
        let mut claim = |kind: ComponentKind, name: &str| -> SctResult<()> {
            if network.contains(kind, name) || !planned.insert((kind, name.to_string())) {
                return Err(SctError::DuplicateComponent {
                    kind,
                    name: name.to_string(),
                });
            }
            Ok(())
        };
        for bus in &self.buses {
            claim(ComponentKind::Bus, &bus.name)?;
        }
        claim(ComponentKind::Load, &self.load.name)?;
        for store in &self.stores {
            claim(ComponentKind::Store, &store.name)?;
        }
        for link in self.links() {
            claim(ComponentKind::Link, &link.name)?;
        }

        for link in self.links() {
            for port in &link.ports {
                let planned_bus = self.buses.iter().any(|b| b.name == port.bus);
                if !planned_bus && !network.contains(ComponentKind::Bus, &port.bus) {
                    return Err(SctError::UnknownBus {
                        kind: ComponentKind::Link,
                        component: link.name.clone(),
                        bus: port.bus.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    pub fn links(&self) -> impl Iterator<Item = &Link> {
        self.dri_links.iter().chain(&self.eaf_links)
    }

    /// Register all components: buses, load, stores, DRI links, EAF links.
    pub fn apply(self, network: &mut Network) -> SctResult<SteelPathwayReport> {
        self.check(network)?;

        let mut report = SteelPathwayReport {
            policy: self.policy,
            buses: Vec::with_capacity(self.buses.len()),
            loads: Vec::with_capacity(1),
            stores: Vec::with_capacity(self.stores.len()),
            links: Vec::with_capacity(self.dri_links.len() + self.eaf_links.len()),
            steel_demand: TonnesPerHour(self.load.p_set),
        };

        for bus in self.buses {
            report.buses.push(bus.name.clone());
            network.add_bus(bus)?;
        }
        report.loads.push(self.load.name.clone());
        network.add_load(self.load)?;
        for store in self.stores {
            report.stores.push(store.name.clone());
            network.add_store(store)?;
        }
        for link in self.dri_links.into_iter().chain(self.eaf_links) {
            debug!(
                link = %link.name,
                p_nom_max = link.p_nom_max.value(),
                "adding steel furnace link"
            );
            report.links.push(link.name.clone());
            network.add_link(link)?;
        }
        Ok(report)
    }
}

/// Derive both furnace links for every node, preserving node order.
fn node_links(
    dri: &ConversionParameters,
    eaf: &ConversionParameters,
    nodes: &[String],
    steel_production: &ProductionSeries,
    nhours: Hours,
    policy: &SteelPolicy,
) -> SctResult<Vec<(Link, Link)>> {
    let for_node = |node: &String| -> SctResult<(Link, Link)> {
        let steel = steel_production.get(node)?;
        Ok((
            dri.link(node, steel, nhours, policy),
            eaf.link(node, steel, nhours, policy),
        ))
    };

    #[cfg(feature = "parallel")]
    let links = nodes.par_iter().map(for_node).collect();
    #[cfg(not(feature = "parallel"))]
    let links = nodes.iter().map(for_node).collect();

    links
}

/// Add endogenous primary steel production (hydrogen DRI + EAF) to `network`.
///
/// Creates the `EU steel` and `EU HBI` buses, a flat `EU steel` load, stores
/// when flexibility is enabled, and a DRI and an EAF link for every node.
/// Nothing is added when any input is missing.
pub fn build_steel_pathway(
    network: &mut Network,
    inputs: &SteelInputs<'_>,
    options: &SteelOptions,
) -> SctResult<SteelPathwayReport> {
    info!("Adding endogenous primary steel demand in tonnes.");
    let plan = SteelPathwayPlan::derive(inputs, options)?;
    let report = plan.apply(network)?;
    info!(
        nodes = inputs.nodes.len(),
        links = report.links.len(),
        stores = report.stores.len(),
        "Steel pathway added: {} t/h demand",
        report.steel_demand.value()
    );
    Ok(report)
}
