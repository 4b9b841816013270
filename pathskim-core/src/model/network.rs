//! Network nodes, links and the ID <-> index mapping

use hashbrown::{HashMap, HashSet};

use super::cost::LengthUnit;
use super::mode::{ModeRegistry, UseMask};
use crate::{Cost, Error, LinkNo, MAX_LABEL_COST, NodeNo};

/// Network node (intersection, stop or zone centroid)
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// External ID
    pub id: String,
    /// Dense internal index
    pub no: NodeNo,
    /// Set for traffic-analysis zone centroids
    pub zone_id: Option<String>,
}

impl Node {
    /// Centroids are nodes with a numeric zone designator
    pub fn is_centroid(&self) -> bool {
        self.zone_id.as_deref().is_some_and(|zone| {
            let zone = zone.trim();
            !zone.is_empty() && zone.bytes().all(|b| b.is_ascii_digit())
        })
    }
}

/// Directed network link
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    /// External ID
    pub id: String,
    pub no: LinkNo,
    pub from_node_no: NodeNo,
    pub to_node_no: NodeNo,
    /// Length in the network length unit
    pub length: Cost,
    /// Free-flow travel time in minutes
    pub fftt: Cost,
    pub allowed_uses: UseMask,
}

/// Directed multigraph loaded once per session
#[derive(Debug, Clone)]
pub struct Network {
    nodes: Vec<Node>,
    links: Vec<Link>,
    id_to_no: HashMap<String, NodeNo>,
    registry: ModeRegistry,
    length_unit: LengthUnit,
    last_thru_node: NodeNo,
    max_label_cost: Cost,
}

impl Network {
    pub fn builder() -> NetworkBuilder {
        NetworkBuilder::new()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn node(&self, no: NodeNo) -> &Node {
        &self.nodes[no]
    }

    pub fn link(&self, no: LinkNo) -> &Link {
        &self.links[no]
    }

    /// Internal index of an external node ID
    ///
    /// # Errors
    ///
    /// Returns [`Error::NodeNotFound`] if the ID is not part of the network
    pub fn node_no(&self, id: &str) -> Result<NodeNo, Error> {
        self.id_to_no
            .get(id)
            .copied()
            .ok_or_else(|| Error::NodeNotFound(id.to_string()))
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.id_to_no.contains_key(id)
    }

    pub fn node_id(&self, no: NodeNo) -> &str {
        &self.nodes[no].id
    }

    pub fn link_id(&self, no: LinkNo) -> &str {
        &self.links[no].id
    }

    pub fn registry(&self) -> &ModeRegistry {
        &self.registry
    }

    pub fn length_unit(&self) -> LengthUnit {
        self.length_unit
    }

    /// Nodes at or beyond this index are never expanded as intermediate hops
    pub fn last_thru_node(&self) -> NodeNo {
        self.last_thru_node
    }

    pub fn max_label_cost(&self) -> Cost {
        self.max_label_cost
    }

    /// External IDs of all zone centroids, in index order
    pub fn centroid_ids(&self) -> Vec<String> {
        self.nodes
            .iter()
            .filter(|node| node.is_centroid())
            .map(|node| node.id.clone())
            .collect()
    }
}

struct PendingNode {
    id: String,
    zone_id: Option<String>,
    through: bool,
}

struct PendingLink {
    id: String,
    from: String,
    to: String,
    length: Cost,
    fftt: Cost,
    allowed_uses: String,
}

/// Incremental network construction.
///
/// Terminal nodes are moved behind all through nodes when the network is
/// built, which is what defines [`Network::last_thru_node`].
pub struct NetworkBuilder {
    nodes: Vec<PendingNode>,
    links: Vec<PendingLink>,
    length_unit: LengthUnit,
    max_label_cost: Cost,
}

impl Default for NetworkBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl NetworkBuilder {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            links: Vec::new(),
            length_unit: LengthUnit::default(),
            max_label_cost: MAX_LABEL_COST,
        }
    }

    pub fn length_unit(&mut self, unit: LengthUnit) -> &mut Self {
        self.length_unit = unit;
        self
    }

    pub fn max_label_cost(&mut self, cost: Cost) -> &mut Self {
        self.max_label_cost = cost;
        self
    }

    pub fn add_node(&mut self, id: impl Into<String>) -> &mut Self {
        self.push_node(id.into(), None, true)
    }

    /// Zone centroid that traffic may pass through
    pub fn add_zone(&mut self, id: impl Into<String>, zone_id: impl Into<String>) -> &mut Self {
        self.push_node(id.into(), Some(zone_id.into()), true)
    }

    /// Node that may start or end a path but is never passed through
    pub fn add_terminal_node(
        &mut self,
        id: impl Into<String>,
        zone_id: Option<String>,
    ) -> &mut Self {
        self.push_node(id.into(), zone_id, false)
    }

    fn push_node(&mut self, id: String, zone_id: Option<String>, through: bool) -> &mut Self {
        self.nodes.push(PendingNode {
            id,
            zone_id,
            through,
        });
        self
    }

    pub fn add_link(
        &mut self,
        id: impl Into<String>,
        from: impl Into<String>,
        to: impl Into<String>,
        length: Cost,
        fftt: Cost,
        allowed_uses: &str,
    ) -> &mut Self {
        self.links.push(PendingLink {
            id: id.into(),
            from: from.into(),
            to: to.into(),
            length,
            fftt,
            allowed_uses: allowed_uses.to_string(),
        });
        self
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Finalizes the network
    ///
    /// # Errors
    ///
    /// Returns an error on duplicate node IDs, links referencing unknown
    /// nodes, negative or non-finite link attributes, or more mode tags than
    /// the registry can hold
    pub fn build(self) -> Result<Network, Error> {
        {
            let mut seen = HashSet::with_capacity(self.nodes.len());
            for node in &self.nodes {
                if !seen.insert(node.id.as_str()) {
                    return Err(Error::InvalidData(format!(
                        "duplicate node ID: {}",
                        node.id
                    )));
                }
            }
        }

        let (through, terminal): (Vec<_>, Vec<_>) =
            self.nodes.into_iter().partition(|node| node.through);
        let last_thru_node = through.len();

        let nodes: Vec<Node> = through
            .into_iter()
            .chain(terminal)
            .enumerate()
            .map(|(no, node)| Node {
                id: node.id,
                no,
                zone_id: node.zone_id.filter(|zone| !zone.trim().is_empty()),
            })
            .collect();

        let id_to_no: HashMap<String, NodeNo> =
            nodes.iter().map(|node| (node.id.clone(), node.no)).collect();

        let mut registry = ModeRegistry::new();
        let mut links = Vec::with_capacity(self.links.len());
        for (no, link) in self.links.into_iter().enumerate() {
            let endpoint = |id: &str| {
                id_to_no.get(id).copied().ok_or_else(|| {
                    Error::InvalidData(format!(
                        "link {} references unknown node {id}",
                        link.id
                    ))
                })
            };
            let from_node_no = endpoint(&link.from)?;
            let to_node_no = endpoint(&link.to)?;

            for (name, value) in [("length", link.length), ("free-flow time", link.fftt)] {
                if !value.is_finite() || value < 0.0 {
                    return Err(Error::InvalidData(format!(
                        "link {} has invalid {name}: {value}",
                        link.id
                    )));
                }
            }

            links.push(Link {
                allowed_uses: registry.parse_allowed_uses(&link.allowed_uses)?,
                id: link.id,
                no,
                from_node_no,
                to_node_no,
                length: link.length,
                fftt: link.fftt,
            });
        }

        Ok(Network {
            nodes,
            links,
            id_to_no,
            registry,
            length_unit: self.length_unit,
            last_thru_node,
            max_label_cost: self.max_label_cost,
        })
    }
}
