//! JSON network document.
//!
//! The document lists components by kind. JSON has no representation for
//! infinity, so unbounded capacities (`p_nom_max`, `e_nom_max`) are written
//! as `null` and a missing or `null` bound reads back as unbounded.
//!
//! ```json
//! {
//!   "buses": [{"name": "DE0", "carrier": "AC"}],
//!   "links": [{
//!     "name": "DE0 EAF", "carrier": "EAF",
//!     "ports": [{"bus": "DE0", "ratio": 1.0, "role": "input"}],
//!     "p_nom_max": null
//!   }]
//! }
//! ```

use anyhow::{Context, Result};
use sct_core::{Bus, Link, Load, Megawatts, Network, PerUnit, Port, SctResult, Store};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkDocument {
    pub buses: Vec<BusRecord>,
    pub loads: Vec<LoadRecord>,
    pub stores: Vec<StoreRecord>,
    pub links: Vec<LinkRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusRecord {
    pub name: String,
    pub carrier: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadRecord {
    pub name: String,
    pub bus: String,
    #[serde(default)]
    pub carrier: String,
    pub p_set: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreRecord {
    pub name: String,
    pub bus: String,
    #[serde(default)]
    pub carrier: String,
    #[serde(default)]
    pub e_nom_extendable: bool,
    /// `None` = unbounded
    #[serde(default)]
    pub e_nom_max: Option<f64>,
    #[serde(default)]
    pub e_cyclic: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkRecord {
    pub name: String,
    pub carrier: String,
    pub ports: Vec<Port>,
    #[serde(default)]
    pub capital_cost: f64,
    #[serde(default)]
    pub marginal_cost: f64,
    #[serde(default)]
    pub p_nom_extendable: bool,
    /// `None` = unbounded
    #[serde(default)]
    pub p_nom_max: Option<f64>,
    #[serde(default)]
    pub p_min_pu: f64,
}

fn bound(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}

impl NetworkDocument {
    pub fn from_network(network: &Network) -> Self {
        Self {
            buses: network
                .buses()
                .into_iter()
                .map(|b| BusRecord {
                    name: b.name.clone(),
                    carrier: b.carrier.clone(),
                    location: b.location.clone(),
                    unit: b.unit.clone(),
                })
                .collect(),
            loads: network
                .loads()
                .into_iter()
                .map(|l| LoadRecord {
                    name: l.name.clone(),
                    bus: l.bus.clone(),
                    carrier: l.carrier.clone(),
                    p_set: l.p_set,
                })
                .collect(),
            stores: network
                .stores()
                .into_iter()
                .map(|s| StoreRecord {
                    name: s.name.clone(),
                    bus: s.bus.clone(),
                    carrier: s.carrier.clone(),
                    e_nom_extendable: s.e_nom_extendable,
                    e_nom_max: bound(s.e_nom_max),
                    e_cyclic: s.e_cyclic,
                })
                .collect(),
            links: network
                .links()
                .into_iter()
                .map(|l| LinkRecord {
                    name: l.name.clone(),
                    carrier: l.carrier.clone(),
                    ports: l.ports.clone(),
                    capital_cost: l.capital_cost,
                    marginal_cost: l.marginal_cost,
                    p_nom_extendable: l.p_nom_extendable,
                    p_nom_max: bound(l.p_nom_max.value()),
                    p_min_pu: l.p_min_pu.value(),
                })
                .collect(),
        }
    }

    /// Build a network, registering buses before the components that attach
    /// to them.
    pub fn into_network(self) -> SctResult<Network> {
        let mut network = Network::new();
        for b in self.buses {
            network.add_bus(Bus {
                name: b.name,
                location: b.location,
                carrier: b.carrier,
                unit: b.unit,
            })?;
        }
        for l in self.loads {
            network.add_load(Load::new(l.name, l.bus, l.p_set).with_carrier(l.carrier))?;
        }
        for s in self.stores {
            network.add_store(Store {
                name: s.name,
                bus: s.bus,
                carrier: s.carrier,
                e_nom_extendable: s.e_nom_extendable,
                e_nom_max: s.e_nom_max.unwrap_or(f64::INFINITY),
                e_cyclic: s.e_cyclic,
            })?;
        }
        for l in self.links {
            network.add_link(Link {
                name: l.name,
                carrier: l.carrier,
                ports: l.ports,
                capital_cost: l.capital_cost,
                marginal_cost: l.marginal_cost,
                p_nom_extendable: l.p_nom_extendable,
                p_nom_max: l.p_nom_max.map(Megawatts).unwrap_or(Megawatts::INFINITY),
                p_min_pu: PerUnit(l.p_min_pu),
            })?;
        }
        Ok(network)
    }
}

pub fn load_network_json(path: &Path) -> Result<Network> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("reading network '{}'", path.display()))?;
    let document: NetworkDocument =
        serde_json::from_str(&data).context("parsing network json")?;
    let network = document
        .into_network()
        .with_context(|| format!("building network from '{}'", path.display()))?;
    debug!(path = %path.display(), stats = %network.stats(), "loaded network");
    Ok(network)
}

pub fn write_network_json(network: &Network, path: &Path) -> Result<()> {
    let document = NetworkDocument::from_network(network);
    let json = serde_json::to_string_pretty(&document).context("serializing network")?;
    fs::write(path, json).with_context(|| format!("writing network '{}'", path.display()))?;
    Ok(())
}
