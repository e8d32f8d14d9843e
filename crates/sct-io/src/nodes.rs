//! Spatial node list: one node per line, blank lines and `#` comments skipped.

use anyhow::{bail, Context, Result};
use std::collections::HashSet;
use std::path::Path;

pub fn load_nodes(path: &Path) -> Result<Vec<String>> {
    let data = std::fs::read_to_string(path)
        .with_context(|| format!("reading node list '{}'", path.display()))?;
    parse_nodes(&data).with_context(|| format!("parsing node list '{}'", path.display()))
}

/// Node order is preserved; a repeated node is an error.
pub fn parse_nodes(data: &str) -> Result<Vec<String>> {
    let mut seen = HashSet::new();
    let mut nodes = Vec::new();
    for line in data.lines() {
        let node = line.split('#').next().unwrap_or_default().trim();
        if node.is_empty() {
            continue;
        }
        if !seen.insert(node) {
            bail!("duplicate node '{node}'");
        }
        nodes.push(node.to_string());
    }
    Ok(nodes)
}
