//! # sct-core: Multi-carrier network model
//!
//! Data structures for a sector-coupled energy network: commodity buses,
//! demands, storage and multi-port conversion links, held in a directed
//! petgraph graph.
//!
//! ## Graph layout
//!
//! - **Nodes**: [`Bus`], [`Load`], [`Store`] and [`Link`] components
//! - **Edges**: [`Edge::Attachment`] ties a load or store to its bus;
//!   [`Edge::Port`] ties a link to each bus it draws from (bus → link) or
//!   feeds (link → bus)
//!
//! Component names are unique per [`ComponentKind`]; the network keeps a name
//! index so components can be looked up the way model builders refer to them
//! (`"EU steel"`, `"DE0 H2"`).
//!
//! ## Quick Start
//!
//! ```rust
//! use sct_core::*;
//!
//! let mut network = Network::new();
//! network.add_bus(Bus::new("DE0", "AC")).unwrap();
//! network.add_bus(Bus::new("DE0 H2", "H2")).unwrap();
//!
//! // 1 MWh electricity -> 0.7 MWh hydrogen
//! network
//!     .add_link(
//!         Link::new("DE0 electrolysis", "electrolysis", "DE0")
//!             .with_output("DE0 H2", 0.7)
//!             .extendable(),
//!     )
//!     .unwrap();
//!
//! let link = network.link("DE0 electrolysis").unwrap();
//! assert_eq!(link.efficiency(1), Some(0.7));
//! ```
//!
//! ## Modules
//!
//! - [`costs`] - technology cost table
//! - [`production`] - industrial production by sector and node
//! - [`diagnostics`] - validation findings
//! - [`graph_utils`] - topology statistics, islands, Graphviz export
//! - [`units`] - unit newtypes

use petgraph::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub mod costs;
pub mod diagnostics;
pub mod error;
pub mod graph_utils;
pub mod production;
pub mod units;

pub use costs::{CostEntry, CostTable};
pub use diagnostics::{DiagnosticIssue, Diagnostics, Severity};
pub use error::{SctError, SctResult};
pub use graph_utils::*;
pub use petgraph::graph::NodeIndex;
pub use production::{IndustrialProduction, ProductionSeries};
pub use units::{Hours, Megawatts, PerUnit, Tonnes, TonnesPerHour};

/// Kinds of components held by a [`Network`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComponentKind {
    Bus,
    Load,
    Store,
    Link,
}

impl std::fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ComponentKind::Bus => "Bus",
            ComponentKind::Load => "Load",
            ComponentKind::Store => "Store",
            ComponentKind::Link => "Link",
        };
        f.write_str(name)
    }
}

/// A commodity balance node (electricity at a region, an EU-wide steel pool, ...)
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Bus {
    pub name: String,
    /// Spatial tag, e.g. a region code or "EU"
    pub location: Option<String>,
    pub carrier: String,
    /// Unit of the commodity balance, e.g. "t" or "MWh"
    pub unit: Option<String>,
}

impl Bus {
    pub fn new(name: impl Into<String>, carrier: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            carrier: carrier.into(),
            ..Self::default()
        }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }
}

/// Fixed consumption drawn from a bus at every snapshot
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Load {
    pub name: String,
    pub bus: String,
    pub carrier: String,
    /// Consumption in bus units per hour
    pub p_set: f64,
}

impl Load {
    pub fn new(name: impl Into<String>, bus: impl Into<String>, p_set: f64) -> Self {
        Self {
            name: name.into(),
            bus: bus.into(),
            p_set,
            ..Self::default()
        }
    }

    pub fn with_carrier(mut self, carrier: impl Into<String>) -> Self {
        self.carrier = carrier.into();
        self
    }
}

/// Energy/commodity storage attached to a bus
#[derive(Debug, Clone, PartialEq)]
pub struct Store {
    pub name: String,
    pub bus: String,
    pub carrier: String,
    /// Whether the solver may size the storage capacity
    pub e_nom_extendable: bool,
    /// Upper bound on the storage capacity (`f64::INFINITY` = unbounded)
    pub e_nom_max: f64,
    /// Filling level at the end of the horizon equals the level at its start
    pub e_cyclic: bool,
}

impl Store {
    pub fn new(name: impl Into<String>, bus: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bus: bus.into(),
            carrier: String::new(),
            e_nom_extendable: false,
            e_nom_max: f64::INFINITY,
            e_cyclic: false,
        }
    }

    pub fn with_carrier(mut self, carrier: impl Into<String>) -> Self {
        self.carrier = carrier.into();
        self
    }

    pub fn extendable(mut self) -> Self {
        self.e_nom_extendable = true;
        self
    }

    pub fn cyclic(mut self) -> Self {
        self.e_cyclic = true;
        self
    }
}

/// Direction of a commodity flow at a link port
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PortRole {
    Input,
    Output,
}

/// One bus connection of a [`Link`].
///
/// `ratio` is the (non-negative) amount exchanged with `bus` per unit of flow
/// at the primary port.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Port {
    pub bus: String,
    pub ratio: f64,
    pub role: PortRole,
}

/// Multi-port conversion process.
///
/// Port 0 is always the primary input with ratio 1; capacity (`p_nom`) and
/// costs are measured on it. Further ports are explicit inputs or outputs.
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    pub name: String,
    pub carrier: String,
    pub ports: Vec<Port>,
    /// Annualised investment cost per MW of primary-port capacity
    pub capital_cost: f64,
    /// Operating cost per MWh through the primary port
    pub marginal_cost: f64,
    pub p_nom_extendable: bool,
    /// Upper bound on capacity (`Megawatts::INFINITY` = unbounded)
    pub p_nom_max: Megawatts,
    /// Minimum dispatch as a fraction of capacity
    pub p_min_pu: PerUnit,
}

impl Link {
    pub fn new(
        name: impl Into<String>,
        carrier: impl Into<String>,
        primary_bus: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            carrier: carrier.into(),
            ports: vec![Port {
                bus: primary_bus.into(),
                ratio: 1.0,
                role: PortRole::Input,
            }],
            capital_cost: 0.0,
            marginal_cost: 0.0,
            p_nom_extendable: false,
            p_nom_max: Megawatts::INFINITY,
            p_min_pu: PerUnit::ZERO,
        }
    }

    pub fn with_output(mut self, bus: impl Into<String>, ratio: f64) -> Self {
        self.ports.push(Port {
            bus: bus.into(),
            ratio,
            role: PortRole::Output,
        });
        self
    }

    pub fn with_input(mut self, bus: impl Into<String>, ratio: f64) -> Self {
        self.ports.push(Port {
            bus: bus.into(),
            ratio,
            role: PortRole::Input,
        });
        self
    }

    pub fn with_capital_cost(mut self, capital_cost: f64) -> Self {
        self.capital_cost = capital_cost;
        self
    }

    pub fn with_marginal_cost(mut self, marginal_cost: f64) -> Self {
        self.marginal_cost = marginal_cost;
        self
    }

    pub fn with_p_nom_max(mut self, p_nom_max: Megawatts) -> Self {
        self.p_nom_max = p_nom_max;
        self
    }

    pub fn with_p_min_pu(mut self, p_min_pu: PerUnit) -> Self {
        self.p_min_pu = p_min_pu;
        self
    }

    pub fn extendable(mut self) -> Self {
        self.p_nom_extendable = true;
        self
    }

    /// Bus connected at port `k` (`bus0`, `bus1`, ...)
    pub fn bus(&self, k: usize) -> Option<&str> {
        self.ports.get(k).map(|p| p.bus.as_str())
    }

    /// Signed conversion factor at port `k >= 1`: positive for outputs,
    /// negative for additional inputs. Port 0 has no efficiency.
    pub fn efficiency(&self, k: usize) -> Option<f64> {
        if k == 0 {
            return None;
        }
        self.ports.get(k).map(|p| match p.role {
            PortRole::Output => p.ratio,
            PortRole::Input => -p.ratio,
        })
    }

    pub fn inputs(&self) -> impl Iterator<Item = &Port> {
        self.ports.iter().filter(|p| p.role == PortRole::Input)
    }

    pub fn outputs(&self) -> impl Iterator<Item = &Port> {
        self.ports.iter().filter(|p| p.role == PortRole::Output)
    }
}

#[derive(Debug, Clone)]
pub enum Node {
    Bus(Bus),
    Load(Load),
    Store(Store),
    Link(Link),
}

impl Node {
    pub fn kind(&self) -> ComponentKind {
        match self {
            Node::Bus(_) => ComponentKind::Bus,
            Node::Load(_) => ComponentKind::Load,
            Node::Store(_) => ComponentKind::Store,
            Node::Link(_) => ComponentKind::Link,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Node::Bus(bus) => &bus.name,
            Node::Load(load) => &load.name,
            Node::Store(store) => &store.name,
            Node::Link(link) => &link.name,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Edge {
    /// Load or store connected to a bus
    Attachment,
    /// Link port; `index` is the port position on the link
    Port { index: usize, ratio: f64, role: PortRole },
}

/// The sector-coupled network graph
#[derive(Debug, Default, Clone)]
pub struct Network {
    graph: DiGraph<Node, Edge>,
    names: HashMap<(ComponentKind, String), NodeIndex>,
}

impl Network {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read-only view of the underlying graph
    pub fn graph(&self) -> &DiGraph<Node, Edge> {
        &self.graph
    }

    pub fn contains(&self, kind: ComponentKind, name: &str) -> bool {
        self.names.contains_key(&(kind, name.to_string()))
    }

    pub fn index_of(&self, kind: ComponentKind, name: &str) -> Option<NodeIndex> {
        self.names.get(&(kind, name.to_string())).copied()
    }

    fn insert(&mut self, node: Node) -> SctResult<NodeIndex> {
        let key = (node.kind(), node.label().to_string());
        if self.names.contains_key(&key) {
            return Err(SctError::DuplicateComponent {
                kind: key.0,
                name: key.1,
            });
        }
        let idx = self.graph.add_node(node);
        self.names.insert(key, idx);
        Ok(idx)
    }

    fn resolve_bus(&self, kind: ComponentKind, component: &str, bus: &str) -> SctResult<NodeIndex> {
        self.index_of(ComponentKind::Bus, bus)
            .ok_or_else(|| SctError::UnknownBus {
                kind,
                component: component.to_string(),
                bus: bus.to_string(),
            })
    }

    pub fn add_bus(&mut self, bus: Bus) -> SctResult<NodeIndex> {
        self.insert(Node::Bus(bus))
    }

    pub fn add_load(&mut self, load: Load) -> SctResult<NodeIndex> {
        let bus = self.resolve_bus(ComponentKind::Load, &load.name, &load.bus)?;
        let idx = self.insert(Node::Load(load))?;
        self.graph.add_edge(bus, idx, Edge::Attachment);
        Ok(idx)
    }

    pub fn add_store(&mut self, store: Store) -> SctResult<NodeIndex> {
        let bus = self.resolve_bus(ComponentKind::Store, &store.name, &store.bus)?;
        let idx = self.insert(Node::Store(store))?;
        self.graph.add_edge(bus, idx, Edge::Attachment);
        Ok(idx)
    }

    /// Register a link. Every port bus must already exist; nothing is added
    /// when one does not.
    pub fn add_link(&mut self, link: Link) -> SctResult<NodeIndex> {
        let buses = link
            .ports
            .iter()
            .map(|p| self.resolve_bus(ComponentKind::Link, &link.name, &p.bus))
            .collect::<SctResult<Vec<_>>>()?;
        let ports: Vec<(usize, f64, PortRole)> = link
            .ports
            .iter()
            .enumerate()
            .map(|(i, p)| (i, p.ratio, p.role))
            .collect();
        let idx = self.insert(Node::Link(link))?;
        for (bus, (index, ratio, role)) in buses.into_iter().zip(ports) {
            let edge = Edge::Port { index, ratio, role };
            match role {
                PortRole::Input => self.graph.add_edge(bus, idx, edge),
                PortRole::Output => self.graph.add_edge(idx, bus, edge),
            };
        }
        Ok(idx)
    }

    pub fn bus(&self, name: &str) -> Option<&Bus> {
        match self.index_of(ComponentKind::Bus, name).map(|i| &self.graph[i]) {
            Some(Node::Bus(b)) => Some(b),
            _ => None,
        }
    }

    pub fn load(&self, name: &str) -> Option<&Load> {
        match self.index_of(ComponentKind::Load, name).map(|i| &self.graph[i]) {
            Some(Node::Load(l)) => Some(l),
            _ => None,
        }
    }

    pub fn store(&self, name: &str) -> Option<&Store> {
        match self.index_of(ComponentKind::Store, name).map(|i| &self.graph[i]) {
            Some(Node::Store(s)) => Some(s),
            _ => None,
        }
    }

    pub fn link(&self, name: &str) -> Option<&Link> {
        match self.index_of(ComponentKind::Link, name).map(|i| &self.graph[i]) {
            Some(Node::Link(l)) => Some(l),
            _ => None,
        }
    }

    pub fn buses(&self) -> Vec<&Bus> {
        self.graph
            .node_weights()
            .filter_map(|n| match n {
                Node::Bus(b) => Some(b),
                _ => None,
            })
            .collect()
    }

    pub fn loads(&self) -> Vec<&Load> {
        self.graph
            .node_weights()
            .filter_map(|n| match n {
                Node::Load(l) => Some(l),
                _ => None,
            })
            .collect()
    }

    pub fn stores(&self) -> Vec<&Store> {
        self.graph
            .node_weights()
            .filter_map(|n| match n {
                Node::Store(s) => Some(s),
                _ => None,
            })
            .collect()
    }

    pub fn links(&self) -> Vec<&Link> {
        self.graph
            .node_weights()
            .filter_map(|n| match n {
                Node::Link(l) => Some(l),
                _ => None,
            })
            .collect()
    }

    /// Links of one carrier, in insertion order
    pub fn links_with_carrier(&self, carrier: &str) -> Vec<&Link> {
        self.links()
            .into_iter()
            .filter(|l| l.carrier == carrier)
            .collect()
    }

    /// Stores attached to a bus
    pub fn stores_at_bus(&self, bus: &str) -> Vec<&Store> {
        self.stores().into_iter().filter(|s| s.bus == bus).collect()
    }

    /// Total fixed consumption on buses of a carrier
    pub fn total_load(&self, carrier: &str) -> f64 {
        self.loads()
            .into_iter()
            .filter(|l| l.carrier == carrier)
            .map(|l| l.p_set)
            .sum()
    }

    pub fn stats(&self) -> NetworkStats {
        let mut stats = NetworkStats::default();
        for node in self.graph.node_weights() {
            match node {
                Node::Bus(_) => stats.num_buses += 1,
                Node::Load(_) => stats.num_loads += 1,
                Node::Store(_) => stats.num_stores += 1,
                Node::Link(l) => {
                    stats.num_links += 1;
                    if l.p_nom_extendable {
                        stats.num_extendable_links += 1;
                    }
                }
            }
        }
        stats.num_edges = self.graph.edge_count();
        stats
    }

    /// Check the network for issues that would make a downstream model
    /// ill-posed: dangling buses, non-finite attributes, inconsistent ports.
    pub fn validate_into(&self, diag: &mut Diagnostics) {
        let stats = self.stats();
        if stats.num_buses == 0 {
            diag.add_error("structure", "Network has no buses");
            return;
        }
        if stats.num_links == 0 && stats.num_buses > 1 {
            diag.add_warning("structure", "Network has multiple buses but no links");
        }

        for idx in self.graph.node_indices() {
            match &self.graph[idx] {
                Node::Bus(bus) => {
                    if self.graph.neighbors_undirected(idx).next().is_none() {
                        diag.add_warning_with_entity(
                            "structure",
                            "Bus is not connected",
                            &bus.name,
                        );
                    }
                }
                Node::Load(load) => {
                    if !load.p_set.is_finite() {
                        diag.add_warning_with_entity("numeric", "p_set is not finite", &load.name);
                    } else if load.p_set < 0.0 {
                        diag.add_warning_with_entity("numeric", "p_set is negative", &load.name);
                    }
                }
                Node::Store(store) => {
                    if !store.e_nom_extendable {
                        diag.add_warning_with_entity(
                            "structure",
                            "Store is not extendable and has no capacity",
                            &store.name,
                        );
                    }
                }
                Node::Link(link) => self.validate_link(link, diag),
            }
        }
    }

    fn validate_link(&self, link: &Link, diag: &mut Diagnostics) {
        match link.ports.first() {
            Some(p) if p.role == PortRole::Input && p.ratio == 1.0 => {}
            _ => diag.add_error_with_entity(
                "structure",
                "Port 0 must be the primary input with ratio 1",
                &link.name,
            ),
        }
        if link.outputs().next().is_none() {
            diag.add_warning_with_entity("structure", "Link has no output port", &link.name);
        }
        for (k, port) in link.ports.iter().enumerate() {
            if !port.ratio.is_finite() {
                diag.add_warning_with_entity(
                    "numeric",
                    &format!("ratio at port {k} is not finite"),
                    &link.name,
                );
            } else if port.ratio < 0.0 {
                diag.add_error_with_entity(
                    "numeric",
                    &format!("ratio at port {k} is negative; use an input port instead"),
                    &link.name,
                );
            }
        }
        for (attr, value) in [
            ("capital_cost", link.capital_cost),
            ("marginal_cost", link.marginal_cost),
        ] {
            if !value.is_finite() {
                diag.add_warning_with_entity(
                    "numeric",
                    &format!("{attr} is not finite"),
                    &link.name,
                );
            }
        }
        if link.p_nom_max.value().is_nan() {
            diag.add_warning_with_entity("numeric", "p_nom_max is NaN", &link.name);
        }
        let p_min = link.p_min_pu.value();
        if !(0.0..=1.0).contains(&p_min) {
            diag.add_error_with_entity("numeric", "p_min_pu outside [0, 1]", &link.name);
        }
    }
}

/// Component counts of a network
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NetworkStats {
    pub num_buses: usize,
    pub num_loads: usize,
    pub num_stores: usize,
    pub num_links: usize,
    pub num_extendable_links: usize,
    pub num_edges: usize,
}

impl std::fmt::Display for NetworkStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} buses, {} loads, {} stores, {} links ({} extendable)",
            self.num_buses,
            self.num_loads,
            self.num_stores,
            self.num_links,
            self.num_extendable_links
        )
    }
}
