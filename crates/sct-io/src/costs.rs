//! Technology cost table in long CSV format.
//!
//! **Expected CSV format:** `technology, parameter, value` with optional
//! `unit` and `source` columns. Further columns (descriptions, currency year)
//! are ignored.

use anyhow::{Context, Result};
use csv::ReaderBuilder;
use sct_core::costs::{CostEntry, CostTable};
use serde::Deserialize;
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

#[derive(Debug, Deserialize)]
struct CostRecord {
    technology: String,
    parameter: String,
    value: f64,
    #[serde(default)]
    unit: Option<String>,
    #[serde(default)]
    source: Option<String>,
}

pub fn load_costs_csv(path: &Path) -> Result<CostTable> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("opening cost table '{}'", path.display()))?;
    let table =
        read_costs(file).with_context(|| format!("reading cost table '{}'", path.display()))?;
    debug!(
        path = %path.display(),
        entries = table.len(),
        technologies = table.technologies().len(),
        "loaded cost table"
    );
    Ok(table)
}

/// Parse a cost table from any reader. A repeated `(technology, parameter)`
/// pair keeps the last value.
pub fn read_costs<R: Read>(reader: R) -> Result<CostTable> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut table = CostTable::new();
    for (row, result) in rdr.deserialize().enumerate() {
        let record: CostRecord =
            result.with_context(|| format!("parsing cost record {}", row + 1))?;
        let entry = CostEntry {
            value: record.value,
            unit: record.unit.filter(|u| !u.is_empty()),
            source: record.source.filter(|s| !s.is_empty()),
        };
        if table
            .insert(record.technology.clone(), record.parameter.clone(), entry)
            .is_some()
        {
            warn!(
                technology = %record.technology,
                parameter = %record.parameter,
                "duplicate cost entry, keeping the last value"
            );
        }
    }
    Ok(table)
}
