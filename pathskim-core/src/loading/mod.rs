//! This module is responsible for loading GMNS-style CSV inputs
//! and building a routable [`Network`](crate::Network).

mod builder;
mod config;
pub mod gmns;

pub use builder::{create_network, read_demand};
pub use config::NetworkConfig;
