//! Engine-facing adjacency representation of a [`Network`](crate::Network)

mod view;

pub use view::{CostKey, GraphView};
