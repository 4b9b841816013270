//! Data model for directed transportation networks
//!
//! Contains nodes, links, travel modes and the agents whose paths are
//! resolved against the network.

pub mod agent;
pub mod cost;
pub mod mode;
pub mod network;

pub use agent::Agent;
pub use cost::{CostType, LengthUnit};
pub use mode::{ModeProfile, ModeRegistry, SpeedRule, UseMask};
pub use network::{Link, Network, NetworkBuilder, Node};
