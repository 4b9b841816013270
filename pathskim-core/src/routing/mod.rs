//! Shortest path search and everything built on top of it

pub mod engine;
pub mod matrix;
pub mod query;
pub mod tree;

pub use engine::{LabelCorrecting, single_source};
pub use matrix::{SkimMatrix, SkimMeta, compute_skim, find_shortest_path_network};
pub use query::{PathFinder, PathReport, SeqType, path_sequence};
pub use tree::ShortestPathTree;
