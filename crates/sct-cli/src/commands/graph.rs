use std::fs;

use anyhow::Result;
use sct_cli::cli::GraphCommands;
use sct_core::{graph_utils, Diagnostics};
use sct_io::load_network_json;

pub fn handle(command: &GraphCommands) -> Result<()> {
    match command {
        GraphCommands::Stats { network } => {
            let net = load_network_json(network)?;
            let stats = graph_utils::graph_stats(&net)?;
            println!("Graph statistics for {}:", network.display());
            println!("  Nodes         : {}", stats.node_count);
            println!("  Edges         : {}", stats.edge_count);
            println!("  Components    : {}", stats.connected_components);
            println!(
                "  Degree [min/avg/max]: {}/{:.2}/{}",
                stats.min_degree, stats.avg_degree, stats.max_degree
            );
            println!("  {}", net.stats());
            Ok(())
        }
        GraphCommands::Islands { network, emit } => {
            let net = load_network_json(network)?;
            let analysis = graph_utils::find_islands(&net)?;
            for summary in &analysis.islands {
                println!(
                    "Island {}: {} node(s) [{}]",
                    summary.island_id,
                    summary.node_count,
                    summary.carriers.join(", ")
                );
            }
            if *emit {
                println!("\nNode → Island assignments:");
                for assignment in &analysis.assignments {
                    println!(
                        "  idx {:>3}: {:<20} -> island {}",
                        assignment.node_index, assignment.label, assignment.island_id
                    );
                }
            }
            Ok(())
        }
        GraphCommands::Export {
            network,
            format,
            out,
        } => {
            let net = load_network_json(network)?;
            let dot = graph_utils::export_graph(&net, format)?;
            if let Some(path) = out {
                fs::write(path, &dot)?;
                println!("Graph exported to {}", path.display());
            } else {
                println!("{dot}");
            }
            Ok(())
        }
        GraphCommands::Validate { network } => {
            let net = load_network_json(network)?;
            let mut diag = Diagnostics::new();
            net.validate_into(&mut diag);
            println!("{diag}");
            if diag.has_errors() {
                anyhow::bail!("{}", diag.summary());
            }
            Ok(())
        }
    }
}
