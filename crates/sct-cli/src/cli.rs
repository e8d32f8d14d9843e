use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "sct", author, version, about = "Sector coupling toolkit", long_about = None)]
pub struct Cli {
    /// Set the logging level
    #[arg(long, default_value = "info")]
    pub log_level: tracing::Level,

    /// Worker threads for per-node derivation ("auto" = all cores)
    #[arg(long, default_value = "auto")]
    pub threads: String,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Industry sector: primary steel pathway
    Steel {
        #[command(subcommand)]
        command: SteelCommands,
    },
    /// Graph utilities on a network JSON document
    Graph {
        #[command(subcommand)]
        command: GraphCommands,
    },
    /// Generate shell completion scripts
    Completions {
        /// Shell type
        #[arg(value_enum)]
        shell: Shell,
        /// Write output to a file instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

#[derive(Subcommand, Debug)]
pub enum SteelCommands {
    /// Add hydrogen DRI + EAF steel production to a network
    Build {
        /// Technology cost table (long CSV)
        #[arg(long)]
        costs: PathBuf,
        /// Industrial production per node and sector (CSV)
        #[arg(long)]
        production: PathBuf,
        /// Spatial nodes, one per line
        #[arg(long)]
        nodes: PathBuf,
        /// Base network (JSON); electricity and H2 buses are created per node when omitted
        #[arg(long)]
        network: Option<PathBuf>,
        /// Options file (TOML/YAML/JSON) with a `sector` section
        #[arg(long)]
        config: Option<PathBuf>,
        /// Enable relocation regardless of the options file
        #[arg(long)]
        relocation: bool,
        /// Enable flexibility regardless of the options file
        #[arg(long)]
        flexibility: bool,
        /// Hours represented by the modelling horizon
        #[arg(long, default_value_t = 8760.0)]
        nhours: f64,
        /// Write the resulting network (JSON)
        #[arg(short, long)]
        out: Option<PathBuf>,
        /// Print the build report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the resolved steel policy for an options file
    InspectOptions {
        /// Options file (TOML/YAML/JSON)
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[derive(Subcommand, Debug)]
pub enum GraphCommands {
    /// Graph stats summary
    Stats {
        /// Path to the network document (JSON)
        network: PathBuf,
    },
    /// Find islands in the network
    Islands {
        /// Path to the network document (JSON)
        network: PathBuf,
        /// Emit island IDs
        #[arg(long)]
        emit: bool,
    },
    /// Export graph to various formats
    Export {
        /// Path to the network document (JSON)
        network: PathBuf,
        /// Output format
        #[arg(long, default_value = "graphviz")]
        format: String,
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Report validation findings
    Validate {
        /// Path to the network document (JSON)
        network: PathBuf,
    },
}

pub fn build_cli_command() -> clap::Command {
    Cli::command()
}
