use crate::{Edge, Network, Node, PortRole};
use anyhow::{anyhow, Result};
use petgraph::algo::connected_components;
use petgraph::visit::EdgeRef;
use std::collections::{HashSet, VecDeque};

/// Summary statistics for `graph stats` (size, degree distribution, weak components).
#[derive(Debug)]
pub struct GraphStats {
    pub node_count: usize,
    pub edge_count: usize,
    pub connected_components: usize,
    pub min_degree: usize,
    pub avg_degree: f64,
    pub max_degree: usize,
}

/// One weakly connected part of the network.
#[derive(Debug)]
pub struct IslandSummary {
    pub island_id: usize,
    pub node_count: usize,
    /// Carriers of the buses inside the island, sorted and deduplicated
    pub carriers: Vec<String>,
}

/// Island membership of a single component.
#[derive(Debug)]
pub struct NodeAssignment {
    pub node_index: usize,
    pub label: String,
    pub island_id: usize,
}

#[derive(Debug)]
pub struct IslandAnalysis {
    pub islands: Vec<IslandSummary>,
    pub assignments: Vec<NodeAssignment>,
}

/// Degree statistics over all components, counting edges in both directions.
pub fn graph_stats(network: &Network) -> Result<GraphStats> {
    let graph = network.graph();
    let node_count = graph.node_count();
    let degrees: Vec<usize> = graph
        .node_indices()
        .map(|n| graph.neighbors_undirected(n).count())
        .collect();
    let avg_degree = if node_count == 0 {
        0.0
    } else {
        degrees.iter().sum::<usize>() as f64 / node_count as f64
    };
    Ok(GraphStats {
        node_count,
        edge_count: graph.edge_count(),
        connected_components: connected_components(graph),
        min_degree: degrees.iter().copied().min().unwrap_or(0),
        avg_degree,
        max_degree: degrees.iter().copied().max().unwrap_or(0),
    })
}

/// Breadth-first labelling of weakly connected components.
///
/// Sector coupling links join otherwise separate carrier networks, so a
/// regional electricity bus and an EU-wide commodity pool end up in the same
/// island once a conversion link connects them.
pub fn find_islands(network: &Network) -> Result<IslandAnalysis> {
    let graph = network.graph();
    let mut visited = HashSet::new();
    let mut islands = Vec::new();
    let mut assignments = Vec::new();
    for start in graph.node_indices() {
        if visited.contains(&start) {
            continue;
        }
        let mut queue = VecDeque::from([start]);
        let mut members = Vec::new();
        while let Some(node) = queue.pop_front() {
            if !visited.insert(node) {
                continue;
            }
            members.push(node);
            queue.extend(graph.neighbors_undirected(node).filter(|n| !visited.contains(n)));
        }
        let island_id = islands.len();
        let mut carriers: Vec<String> = members
            .iter()
            .filter_map(|&n| match &graph[n] {
                Node::Bus(bus) => Some(bus.carrier.clone()),
                _ => None,
            })
            .collect();
        carriers.sort();
        carriers.dedup();
        islands.push(IslandSummary {
            island_id,
            node_count: members.len(),
            carriers,
        });
        assignments.extend(members.into_iter().map(|n| NodeAssignment {
            node_index: n.index(),
            label: graph[n].label().to_string(),
            island_id,
        }));
    }
    assignments.sort_by_key(|a| a.node_index);
    Ok(IslandAnalysis {
        islands,
        assignments,
    })
}

/// Export the topology as Graphviz DOT.
pub fn export_graph(network: &Network, format: &str) -> Result<String> {
    match format.to_ascii_lowercase().as_str() {
        "graphviz" | "dot" => Ok(render_dot(network)),
        other => Err(anyhow!("unsupported graph export format '{other}'")),
    }
}

fn render_dot(network: &Network) -> String {
    let graph = network.graph();
    let mut buffer = String::from("digraph sct_network {\n");
    for node in graph.node_indices() {
        let shape = match &graph[node] {
            Node::Bus(_) => "ellipse",
            Node::Load(_) => "invtriangle",
            Node::Store(_) => "cylinder",
            Node::Link(_) => "box",
        };
        let label = sanitize_label(graph[node].label());
        buffer.push_str(&format!(
            "  n{} [label=\"{}\", shape={}];\n",
            node.index(),
            label,
            shape
        ));
    }
    for edge in graph.edge_references() {
        let source = edge.source().index();
        let target = edge.target().index();
        match edge.weight() {
            Edge::Attachment => buffer.push_str(&format!("  n{source} -> n{target};\n")),
            Edge::Port { ratio, role, .. } => {
                let style = match role {
                    PortRole::Input => "solid",
                    PortRole::Output => "bold",
                };
                buffer.push_str(&format!(
                    "  n{source} -> n{target} [label=\"{ratio:.3}\", style={style}];\n"
                ));
            }
        }
    }
    buffer.push('}');
    buffer
}

fn sanitize_label(label: &str) -> String {
    label.replace('"', "\\\"")
}
