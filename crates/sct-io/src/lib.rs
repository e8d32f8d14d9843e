//! File loaders and writers for the sector coupling toolkit.
//!
//! | input                 | format                                          |
//! |-----------------------|-------------------------------------------------|
//! | technology costs      | long CSV: `technology,parameter,value[,unit,source]` |
//! | industrial production | wide CSV: node column, one column per sector    |
//! | spatial nodes         | text, one node per line, `#` comments           |
//! | options               | TOML / YAML / JSON with a `[sector]` section    |
//! | network               | JSON document (see [`network::NetworkDocument`]) |

pub mod config;
pub mod costs;
pub mod network;
pub mod nodes;
pub mod production;

pub use config::{load_config, SectorConfig};
pub use costs::{load_costs_csv, read_costs};
pub use network::{load_network_json, write_network_json, NetworkDocument};
pub use nodes::{load_nodes, parse_nodes};
pub use production::{load_production_csv, read_production};
