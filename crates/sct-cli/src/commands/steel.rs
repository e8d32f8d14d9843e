use anyhow::{Context, Result};
use sct_cli::cli::SteelCommands;
use sct_core::{Bus, Diagnostics, Hours, Network};
use sct_industry::{build_steel_pathway, hydrogen_bus, SteelInputs, SteelOptions, SteelPolicy};
use sct_io::{
    load_config, load_costs_csv, load_network_json, load_nodes, load_production_csv,
    write_network_json,
};
use std::path::Path;
use tracing::{info, warn};

pub fn handle(command: &SteelCommands) -> Result<()> {
    match command {
        SteelCommands::Build {
            costs,
            production,
            nodes,
            network,
            config,
            relocation,
            flexibility,
            nhours,
            out,
            json,
        } => {
            let costs = load_costs_csv(costs)?;
            let production = load_production_csv(production)?;
            let nodes = load_nodes(nodes)?;
            let mut options = load_options(config.as_deref())?;
            options.relocation_steel |= *relocation;
            options.flexibility_steel |= *flexibility;

            let mut network = match network {
                Some(path) => load_network_json(path)?,
                None => base_network(&nodes)?,
            };

            let inputs = SteelInputs {
                industrial_production: &production,
                costs: &costs,
                nodes: &nodes,
                nhours: Hours(*nhours),
            };
            let report = build_steel_pathway(&mut network, &inputs, &options)
                .context("building steel pathway")?;

            let mut diag = Diagnostics::new();
            network.validate_into(&mut diag);
            for issue in diag.warnings() {
                warn!("{issue}");
            }
            if diag.has_errors() {
                anyhow::bail!("network validation failed: {}", diag.summary());
            }

            if let Some(path) = out {
                write_network_json(&network, path)?;
                info!("Network written to {}", path.display());
            }

            if *json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("Steel pathway added for {} node(s):", nodes.len());
                println!("  Demand        : {:.4} t/h", report.steel_demand.value());
                println!("  Buses         : {}", report.buses.join(", "));
                println!("  Stores        : {}", report.stores.len());
                println!("  Links         : {}", report.links.len());
                println!("  Relocation    : {}", !report.policy.no_relocation);
                println!("  Flexibility   : {}", !report.policy.no_flexibility);
                println!("Network: {}", network.stats());
            }
            Ok(())
        }
        SteelCommands::InspectOptions { config } => {
            let options = load_options(config.as_deref())?;
            let policy = SteelPolicy::resolve(&options);
            println!("{}", serde_json::to_string_pretty(&policy)?);
            Ok(())
        }
    }
}

fn load_options(config: Option<&Path>) -> Result<SteelOptions> {
    match config {
        Some(path) => Ok(load_config(path)?.sector),
        None => Ok(SteelOptions::default()),
    }
}

/// Electricity and hydrogen bus for every node
fn base_network(nodes: &[String]) -> Result<Network> {
    let mut network = Network::new();
    for node in nodes {
        network.add_bus(Bus::new(node.clone(), "AC"))?;
        network.add_bus(Bus::new(hydrogen_bus(node), "H2"))?;
    }
    Ok(network)
}
