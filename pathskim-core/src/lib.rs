//! Shortest paths and skim matrices over directed transportation networks.
//!
//! The crate is organised bottom-up: a [`Network`] is loaded (or built), a
//! [`GraphView`] exposes it to the label-correcting engine as forward-star
//! arrays, and the [`PathFinder`] / matrix assembler drive the engine for
//! single queries, agents and origin-destination skims.

pub mod error;
pub mod export;
pub mod graph;
pub mod loading;
pub mod model;
pub mod prelude;
pub mod routing;

pub use error::Error;
pub use graph::{CostKey, GraphView};
pub use model::{
    Agent, CostType, LengthUnit, Link, ModeProfile, ModeRegistry, Network, NetworkBuilder, Node,
    SpeedRule, UseMask,
};
pub use routing::{PathFinder, PathReport, SeqType, ShortestPathTree, SkimMatrix, SkimMeta};

/// Dense internal node index
pub type NodeNo = usize;
/// Dense internal link index
pub type LinkNo = usize;
/// Path cost in minutes or length units, depending on the [`CostType`]
pub type Cost = f64;

/// Label assigned to nodes the engine has not reached.
///
/// Any label at or above this value means "no path".
pub const MAX_LABEL_COST: Cost = 2_147_483_647.0;

/// Value reported for unreachable pairs in cost queries and skim matrices
pub const UNREACHABLE_COST: Cost = 9_999_999.0;
