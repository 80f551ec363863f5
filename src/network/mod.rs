// Thematic similarity networks over text columns.

pub mod builder;
pub mod graphml;

pub use builder::{build_network, NetworkStats, DEFAULT_SIMILARITY_THRESHOLD};
pub use graphml::write_graphml;
