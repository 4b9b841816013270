use log::debug;

use crate::model::{CostType, ModeProfile, Network, UseMask};
use crate::{Cost, LinkNo, NodeNo};

/// Identifies the contents of the active link cost array
#[derive(Debug, Clone, PartialEq)]
pub struct CostKey {
    pub cost_type: CostType,
    pub mode: ModeProfile,
}

impl CostKey {
    pub fn new(cost_type: CostType, mode: ModeProfile) -> Self {
        Self { cost_type, mode }
    }
}

impl Default for CostKey {
    fn default() -> Self {
        Self::new(CostType::Time, ModeProfile::all())
    }
}

/// Forward-star view of a network.
///
/// Outgoing links of node `i` are `sorted_links[first_link[i]..last_link[i]]`.
/// Link attributes are indexed by link number. The cost array is rebuilt only
/// when the requested [`CostKey`] differs from the one it was built for.
#[derive(Debug, Clone)]
pub struct GraphView {
    first_link: Vec<usize>,
    last_link: Vec<usize>,
    sorted_links: Vec<LinkNo>,
    to_node: Vec<NodeNo>,
    allowed_uses: Vec<UseMask>,
    link_costs: Vec<Cost>,
    last_thru_node: NodeNo,
    max_label_cost: Cost,
    cost_key: Option<CostKey>,
}

impl GraphView {
    /// Builds the adjacency arrays; link costs stay unset until the first
    /// [`refresh`](Self::refresh)
    pub fn new(network: &Network) -> Self {
        let node_count = network.node_count();
        let links = network.links();

        // Counting sort of links by source node keeps parallel links in load order
        let mut counts = vec![0usize; node_count];
        for link in links {
            counts[link.from_node_no] += 1;
        }

        let mut first_link = Vec::with_capacity(node_count);
        let mut offset = 0;
        for &count in &counts {
            first_link.push(offset);
            offset += count;
        }

        let mut next = first_link.clone();
        let mut sorted_links = vec![0; links.len()];
        for link in links {
            let slot = &mut next[link.from_node_no];
            sorted_links[*slot] = link.no;
            *slot += 1;
        }

        Self {
            last_link: next,
            first_link,
            sorted_links,
            to_node: links.iter().map(|link| link.to_node_no).collect(),
            allowed_uses: links.iter().map(|link| link.allowed_uses).collect(),
            link_costs: vec![0.0; links.len()],
            last_thru_node: network.last_thru_node(),
            max_label_cost: network.max_label_cost(),
            cost_key: None,
        }
    }

    /// Builds the view with costs for `key` already in place
    pub fn with_costs(network: &Network, key: &CostKey) -> Self {
        let mut view = Self::new(network);
        view.refresh(network, key);
        view
    }

    /// Makes the cost array match `key`, rebuilding it in O(links) only if
    /// the key changed. Returns whether a rebuild happened.
    ///
    /// `network` must be the network the view was built from.
    pub fn refresh(&mut self, network: &Network, key: &CostKey) -> bool {
        if self.cost_key.as_ref() == Some(key) {
            return false;
        }
        debug_assert_eq!(network.link_count(), self.link_costs.len());

        let registry = network.registry();
        for (cost, link) in self.link_costs.iter_mut().zip(network.links()) {
            *cost = match key.cost_type {
                CostType::Time => key.mode.travel_time(link, registry),
                CostType::Distance => link.length,
            };
        }

        debug!(
            "Rebuilt {} link costs for {} ({})",
            self.link_costs.len(),
            key.cost_type,
            key.mode.name
        );
        self.cost_key = Some(key.clone());
        true
    }

    pub fn cost_key(&self) -> Option<&CostKey> {
        self.cost_key.as_ref()
    }

    pub fn node_count(&self) -> usize {
        self.first_link.len()
    }

    pub fn link_count(&self) -> usize {
        self.to_node.len()
    }

    /// Outgoing links of `node`
    #[inline]
    pub fn outgoing(&self, node: NodeNo) -> &[LinkNo] {
        &self.sorted_links[self.first_link[node]..self.last_link[node]]
    }

    pub fn first_link(&self, node: NodeNo) -> usize {
        self.first_link[node]
    }

    pub fn last_link(&self, node: NodeNo) -> usize {
        self.last_link[node]
    }

    #[inline]
    pub fn to_node(&self, link: LinkNo) -> NodeNo {
        self.to_node[link]
    }

    #[inline]
    pub fn link_cost(&self, link: LinkNo) -> Cost {
        self.link_costs[link]
    }

    #[inline]
    pub fn allowed_uses(&self, link: LinkNo) -> UseMask {
        self.allowed_uses[link]
    }

    pub fn link_costs(&self) -> &[Cost] {
        &self.link_costs
    }

    pub fn last_thru_node(&self) -> NodeNo {
        self.last_thru_node
    }

    pub fn max_label_cost(&self) -> Cost {
        self.max_label_cost
    }
}
