pub use crate::{Cost, LinkNo, MAX_LABEL_COST, NodeNo, UNREACHABLE_COST};

// Re-export key components
pub use crate::export::{OutputFormat, save_agent_paths, save_matrix};
pub use crate::loading::{NetworkConfig, create_network, read_demand};
pub use crate::model::{
    Agent, CostType, LengthUnit, ModeProfile, Network, NetworkBuilder, SpeedRule, UseMask,
};
pub use crate::routing::matrix::{compute_skim, find_shortest_path_network};
pub use crate::routing::{PathFinder, PathReport, SeqType, ShortestPathTree, SkimMatrix};
pub use crate::{Error, GraphView};
