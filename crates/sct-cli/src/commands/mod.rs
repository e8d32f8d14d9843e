pub mod graph;
pub mod steel;
pub mod util;
