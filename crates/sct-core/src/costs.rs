//! Techno-economic cost and efficiency table.
//!
//! Entries are keyed by `(technology, parameter)`, mirroring the long format
//! of technology-data cost sheets:
//!
//! ```text
//! technology,parameter,value,unit
//! electric arc furnace,electricity-input,0.6395,MWh_el/t_steel
//! electric arc furnace,hbi-input,1.0,t_hbi/t_steel
//! ```
//!
//! Lookups are strict: an absent pair is a [`SctError::MissingCost`], never a
//! silent default.

use crate::{SctError, SctResult};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One row of the cost table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostEntry {
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl CostEntry {
    pub fn new(value: f64) -> Self {
        Self {
            value,
            unit: None,
            source: None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CostTable {
    entries: IndexMap<(String, String), CostEntry>,
}

impl CostTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an entry. Returns the previous entry, if any.
    pub fn insert(
        &mut self,
        technology: impl Into<String>,
        parameter: impl Into<String>,
        entry: CostEntry,
    ) -> Option<CostEntry> {
        self.entries
            .insert((technology.into(), parameter.into()), entry)
    }

    /// Builder-style insert of a bare value
    pub fn with(
        mut self,
        technology: impl Into<String>,
        parameter: impl Into<String>,
        value: f64,
    ) -> Self {
        self.insert(technology, parameter, CostEntry::new(value));
        self
    }

    pub fn entry(&self, technology: &str, parameter: &str) -> Option<&CostEntry> {
        self.entries
            .get(&(technology.to_string(), parameter.to_string()))
    }

    /// Value for `(technology, parameter)`.
    pub fn get(&self, technology: &str, parameter: &str) -> SctResult<f64> {
        self.entry(technology, parameter)
            .map(|e| e.value)
            .ok_or_else(|| SctError::missing_cost(technology, parameter))
    }

    /// Value for `parameter` under the first of `technologies` that has it.
    /// A miss is reported against the first name.
    pub fn get_any(&self, technologies: &[&str], parameter: &str) -> SctResult<f64> {
        technologies
            .iter()
            .find_map(|t| self.entry(t, parameter))
            .map(|e| e.value)
            .ok_or_else(|| {
                let technology = technologies.first().copied().unwrap_or_default();
                SctError::missing_cost(technology, parameter)
            })
    }

    pub fn contains(&self, technology: &str, parameter: &str) -> bool {
        self.entry(technology, parameter).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Distinct technology names in insertion order
    pub fn technologies(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for (technology, _) in self.entries.keys() {
            if !seen.contains(&technology.as_str()) {
                seen.push(technology);
            }
        }
        seen
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, &CostEntry)> {
        self.entries
            .iter()
            .map(|((t, p), e)| (t.as_str(), p.as_str(), e))
    }
}
