use crate::{Cost, LinkNo, NodeNo};

/// Traveller with a fixed origin and destination.
///
/// `path_cost`, `node_path` and `link_path` are written by
/// [`PathFinder::find_path_for_agents`](crate::PathFinder::find_path_for_agents).
/// Both paths stay empty when origin and destination coincide or when no path
/// exists.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Agent {
    pub id: String,
    pub origin_id: String,
    pub destination_id: String,
    pub path_cost: Cost,
    pub node_path: Vec<NodeNo>,
    pub link_path: Vec<LinkNo>,
}

impl Agent {
    pub fn new(
        id: impl Into<String>,
        origin_id: impl Into<String>,
        destination_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            origin_id: origin_id.into(),
            destination_id: destination_id.into(),
            ..Self::default()
        }
    }

    pub fn has_path(&self) -> bool {
        !self.link_path.is_empty()
    }

    pub(crate) fn clear_path(&mut self) {
        self.path_cost = 0.0;
        self.node_path.clear();
        self.link_path.clear();
    }
}
