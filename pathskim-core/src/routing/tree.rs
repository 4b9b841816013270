//! Shortest-path tree produced by one engine run, and path reconstruction

use crate::{Cost, LinkNo, NodeNo};

/// Labels and predecessors for every node, rooted at one origin.
///
/// The origin carries label `0` and no predecessors. Nodes the engine did not
/// reach keep the sentinel label (`>= max_label_cost`) and no predecessors.
#[derive(Debug, Clone, PartialEq)]
pub struct ShortestPathTree {
    pub(crate) origin: Option<NodeNo>,
    pub(crate) labels: Vec<Cost>,
    pub(crate) node_preds: Vec<Option<NodeNo>>,
    pub(crate) link_preds: Vec<Option<LinkNo>>,
    pub(crate) max_label_cost: Cost,
}

impl ShortestPathTree {
    pub fn new(node_count: usize, max_label_cost: Cost) -> Self {
        Self {
            origin: None,
            labels: vec![max_label_cost; node_count],
            node_preds: vec![None; node_count],
            link_preds: vec![None; node_count],
            max_label_cost,
        }
    }

    /// Drops every label and predecessor from a previous run
    pub(crate) fn reset(&mut self, origin: NodeNo, node_count: usize, max_label_cost: Cost) {
        self.origin = Some(origin);
        self.max_label_cost = max_label_cost;

        self.labels.clear();
        self.labels.resize(node_count, max_label_cost);
        self.node_preds.clear();
        self.node_preds.resize(node_count, None);
        self.link_preds.clear();
        self.link_preds.resize(node_count, None);
    }

    /// Root of the tree, `None` before the first run
    pub fn origin(&self) -> Option<NodeNo> {
        self.origin
    }

    pub fn labels(&self) -> &[Cost] {
        &self.labels
    }

    pub fn node_preds(&self) -> &[Option<NodeNo>] {
        &self.node_preds
    }

    pub fn link_preds(&self) -> &[Option<LinkNo>] {
        &self.link_preds
    }

    pub fn max_label_cost(&self) -> Cost {
        self.max_label_cost
    }

    /// Label of `dest`; the sentinel if it was not reached
    pub fn cost(&self, dest: NodeNo) -> Cost {
        self.labels[dest]
    }

    pub fn is_reachable(&self, dest: NodeNo) -> bool {
        self.labels[dest] < self.max_label_cost
    }

    /// Node sequence from the origin to `dest`, `None` if `dest` is unreachable
    pub fn node_path(&self, dest: NodeNo) -> Option<Vec<NodeNo>> {
        if !self.is_reachable(dest) {
            return None;
        }

        let mut path = vec![dest];
        let mut current = dest;
        while let Some(prev) = self.node_preds[current] {
            path.push(prev);
            current = prev;
        }
        path.reverse();
        Some(path)
    }

    /// Traversed links from the origin to `dest`, `None` if `dest` is unreachable
    pub fn link_path(&self, dest: NodeNo) -> Option<Vec<LinkNo>> {
        if !self.is_reachable(dest) {
            return None;
        }

        let mut path = Vec::new();
        let mut current = dest;
        while let (Some(link), Some(prev)) = (self.link_preds[current], self.node_preds[current]) {
            path.push(link);
            current = prev;
        }
        path.reverse();
        Some(path)
    }
}
