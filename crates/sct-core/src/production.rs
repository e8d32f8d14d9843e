//! Industrial production volumes by sector and spatial node.
//!
//! Each sector column is a [`ProductionSeries`]: tonnes produced per reference
//! period, either per node or as one scalar broadcast to every node. The
//! series total is the sector-wide volume; the per-node value sizes
//! node-local capacity.

use crate::units::Tonnes;
use crate::{SctError, SctResult};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProductionSeries {
    /// One volume that applies to every node and is also the total
    Scalar(f64),
    PerNode(IndexMap<String, f64>),
}

impl Default for ProductionSeries {
    fn default() -> Self {
        ProductionSeries::PerNode(IndexMap::new())
    }
}

impl ProductionSeries {
    pub fn scalar(tonnes: f64) -> Self {
        ProductionSeries::Scalar(tonnes)
    }

    /// Set the volume at `node`. A scalar series becomes a per-node series
    /// holding only this entry.
    pub fn insert(&mut self, node: impl Into<String>, tonnes: f64) {
        if let ProductionSeries::Scalar(_) = self {
            *self = ProductionSeries::default();
        }
        if let ProductionSeries::PerNode(values) = self {
            values.insert(node.into(), tonnes);
        }
    }

    /// Volume at `node`.
    pub fn get(&self, node: &str) -> SctResult<Tonnes> {
        match self {
            ProductionSeries::Scalar(v) => Ok(Tonnes(*v)),
            ProductionSeries::PerNode(values) => values
                .get(node)
                .copied()
                .map(Tonnes)
                .ok_or_else(|| SctError::MissingProduction {
                    node: node.to_string(),
                }),
        }
    }

    /// Sector-wide volume
    pub fn total(&self) -> Tonnes {
        match self {
            ProductionSeries::Scalar(v) => Tonnes(*v),
            ProductionSeries::PerNode(values) => Tonnes(values.values().sum()),
        }
    }

    /// Per-node entries; empty for a scalar series
    pub fn iter(&self) -> Box<dyn Iterator<Item = (&str, Tonnes)> + '_> {
        match self {
            ProductionSeries::Scalar(_) => Box::new(std::iter::empty()),
            ProductionSeries::PerNode(values) => {
                Box::new(values.iter().map(|(n, v)| (n.as_str(), Tonnes(*v))))
            }
        }
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for ProductionSeries {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        ProductionSeries::PerNode(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// Production table: sector name to series
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IndustrialProduction {
    sectors: IndexMap<String, ProductionSeries>,
}

impl IndustrialProduction {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_sector(&mut self, sector: impl Into<String>, series: ProductionSeries) {
        self.sectors.insert(sector.into(), series);
    }

    /// Set one cell, creating the sector column when needed
    pub fn set(&mut self, sector: &str, node: &str, tonnes: f64) {
        self.sectors
            .entry(sector.to_string())
            .or_default()
            .insert(node, tonnes);
    }

    pub fn sector(&self, sector: &str) -> SctResult<&ProductionSeries> {
        self.sectors
            .get(sector)
            .ok_or_else(|| SctError::MissingSector(sector.to_string()))
    }

    pub fn sectors(&self) -> impl Iterator<Item = &str> {
        self.sectors.keys().map(String::as_str)
    }
}
