//! Industrial production table.
//!
//! **Expected CSV format:** the first column holds the node name, every
//! further column is one industry sector with tonnes per period. An empty
//! cell leaves the node out of that sector.

use anyhow::{anyhow, bail, Context, Result};
use csv::ReaderBuilder;
use sct_core::production::IndustrialProduction;
use std::io::Read;
use std::path::Path;
use tracing::debug;

pub fn load_production_csv(path: &Path) -> Result<IndustrialProduction> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("opening industrial production '{}'", path.display()))?;
    let production = read_production(file)
        .with_context(|| format!("reading industrial production '{}'", path.display()))?;
    debug!(
        path = %path.display(),
        sectors = production.sectors().count(),
        "loaded industrial production"
    );
    Ok(production)
}

pub fn read_production<R: Read>(reader: R) -> Result<IndustrialProduction> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);
    let sectors: Vec<String> = rdr
        .headers()
        .context("reading production header")?
        .iter()
        .skip(1)
        .map(str::to_string)
        .collect();
    if sectors.is_empty() {
        bail!("production table has no sector columns");
    }

    let mut production = IndustrialProduction::new();
    for (row, result) in rdr.records().enumerate() {
        let record = result.with_context(|| format!("parsing production row {}", row + 1))?;
        let node = record
            .get(0)
            .filter(|n| !n.is_empty())
            .ok_or_else(|| anyhow!("production row {} has no node name", row + 1))?;
        for (sector, cell) in sectors.iter().zip(record.iter().skip(1)) {
            if cell.is_empty() {
                continue;
            }
            let tonnes: f64 = cell.parse().with_context(|| {
                format!("invalid production value '{cell}' for node '{node}', sector '{sector}'")
            })?;
            production.set(sector, node, tonnes);
        }
    }
    Ok(production)
}
