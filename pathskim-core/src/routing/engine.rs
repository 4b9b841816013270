//! Deque-based label-correcting shortest path search (SLF scanning order)

use std::collections::VecDeque;

use fixedbitset::FixedBitSet;

use super::tree::ShortestPathTree;
use crate::graph::GraphView;
use crate::model::UseMask;
use crate::{Error, NodeNo};

/// Single-source engine with its own tree and scan buffers.
///
/// One instance per thread: the view is only read, all mutable state lives
/// here and is reset at the start of every run.
#[derive(Debug, Clone)]
pub struct LabelCorrecting {
    tree: ShortestPathTree,
    queue: VecDeque<NodeNo>,
    queued: FixedBitSet,
    scanned: FixedBitSet,
}

impl LabelCorrecting {
    pub fn new(view: &GraphView) -> Self {
        let node_count = view.node_count();
        Self {
            tree: ShortestPathTree::new(node_count, view.max_label_cost()),
            queue: VecDeque::with_capacity(node_count.min(1024)),
            queued: FixedBitSet::with_capacity(node_count),
            scanned: FixedBitSet::with_capacity(node_count),
        }
    }

    /// Computes the shortest-path tree rooted at `origin` over links whose
    /// allowed uses intersect `filter`.
    ///
    /// A node whose label improves after it has been scanned goes to the
    /// front of the queue, a node labelled for the first time to the back.
    /// Nodes at or beyond the view's last through node are labelled but only
    /// expanded when they are the origin.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidNodeIndex`] if `origin` is not a node of the view
    pub fn run(
        &mut self,
        view: &GraphView,
        origin: NodeNo,
        filter: UseMask,
    ) -> Result<&ShortestPathTree, Error> {
        let node_count = view.node_count();
        if origin >= node_count {
            return Err(Error::InvalidNodeIndex(origin));
        }

        self.tree.reset(origin, node_count, view.max_label_cost());
        self.queue.clear();
        self.queued.clear();
        self.queued.grow(node_count);
        self.scanned.clear();
        self.scanned.grow(node_count);

        let last_thru_node = view.last_thru_node();
        let tree = &mut self.tree;

        tree.labels[origin] = 0.0;
        self.queue.push_back(origin);
        self.queued.insert(origin);

        while let Some(node) = self.queue.pop_front() {
            self.queued.set(node, false);
            self.scanned.insert(node);

            if node >= last_thru_node && node != origin {
                continue;
            }

            let label = tree.labels[node];
            for &link in view.outgoing(node) {
                if !view.allowed_uses(link).intersects(filter) {
                    continue;
                }

                let next = view.to_node(link);
                let candidate = label + view.link_cost(link);
                if candidate < tree.labels[next] {
                    tree.labels[next] = candidate;
                    tree.node_preds[next] = Some(node);
                    tree.link_preds[next] = Some(link);

                    if !self.queued.contains(next) {
                        if self.scanned.contains(next) {
                            self.queue.push_front(next);
                        } else {
                            self.queue.push_back(next);
                        }
                        self.queued.insert(next);
                    }
                }
            }
        }

        Ok(&self.tree)
    }

    /// Tree of the most recent run
    pub fn tree(&self) -> &ShortestPathTree {
        &self.tree
    }

    pub fn into_tree(self) -> ShortestPathTree {
        self.tree
    }
}

/// One-off single-source search with freshly allocated buffers
///
/// # Errors
///
/// Returns [`Error::InvalidNodeIndex`] if `origin` is not a node of the view
pub fn single_source(
    view: &GraphView,
    origin: NodeNo,
    filter: UseMask,
) -> Result<ShortestPathTree, Error> {
    let mut engine = LabelCorrecting::new(view);
    engine.run(view, origin, filter)?;
    Ok(engine.into_tree())
}
