//! Query entry points over one network session

use std::fmt;
use std::str::FromStr;
use std::time::{Duration, Instant};

use hashbrown::HashMap;
use itertools::Itertools;
use log::{info, trace};

use super::engine::LabelCorrecting;
use super::matrix::{SkimMatrix, compute_skim};
use super::tree::ShortestPathTree;
use crate::graph::{CostKey, GraphView};
use crate::model::{Agent, CostType, ModeProfile, Network, UseMask};
use crate::{Cost, Error, NodeNo, UNREACHABLE_COST};

/// Form of a reconstructed path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeqType {
    #[default]
    Node,
    Link,
}

impl FromStr for SeqType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        if s.starts_with("node") {
            Ok(SeqType::Node)
        } else if s.starts_with("link") {
            Ok(SeqType::Link)
        } else {
            Err(Error::InvalidData(format!(
                "unknown sequence type '{s}', expected 'node' or 'link'"
            )))
        }
    }
}

/// External IDs along the path from the tree origin to `dest`
pub fn path_sequence(
    network: &Network,
    tree: &ShortestPathTree,
    dest: NodeNo,
    seq_type: SeqType,
) -> Option<Vec<String>> {
    match seq_type {
        SeqType::Node => tree.node_path(dest).map(|path| {
            path.into_iter()
                .map(|no| network.node_id(no).to_string())
                .collect()
        }),
        SeqType::Link => tree.link_path(dest).map(|path| {
            path.into_iter()
                .map(|no| network.link_id(no).to_string())
                .collect()
        }),
    }
}

/// Result of a one-to-one query
#[derive(Debug, Clone, PartialEq)]
pub struct PathReport {
    pub cost_type: CostType,
    /// `None` when the destination is unreachable
    pub cost: Option<Cost>,
    pub units: &'static str,
    pub seq_type: SeqType,
    pub path: Vec<String>,
}

impl PathReport {
    pub fn is_reachable(&self) -> bool {
        self.cost.is_some()
    }

    pub fn path_string(&self) -> String {
        self.path.iter().join(";")
    }
}

impl fmt::Display for PathReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.cost {
            None => write!(f, "path {}: infinity | path: ", self.cost_type),
            Some(cost) => {
                let kind = match self.seq_type {
                    SeqType::Node => "node",
                    SeqType::Link => "link",
                };
                write!(
                    f,
                    "path {}: {cost:.4} {} | {kind} path: {}",
                    self.cost_type,
                    self.units,
                    self.path_string()
                )
            }
        }
    }
}

/// Query orchestrator for one network.
///
/// Owns the cost selector cache (through its [`GraphView`]), the engine
/// buffers, and a depth-one cache of the last origin searched. Switching the
/// cost type or mode rebuilds the cost array and drops the cached tree.
#[derive(Debug)]
pub struct PathFinder<'a> {
    network: &'a Network,
    view: GraphView,
    engine: LabelCorrecting,
    mode: ModeProfile,
    filter: UseMask,
    last_origin: Option<NodeNo>,
}

impl<'a> PathFinder<'a> {
    /// Session with the unrestricted mode and time costs
    pub fn new(network: &'a Network) -> Self {
        let view = GraphView::with_costs(network, &CostKey::default());
        let engine = LabelCorrecting::new(&view);
        Self {
            network,
            view,
            engine,
            mode: ModeProfile::all(),
            filter: UseMask::ALL,
            last_origin: None,
        }
    }

    /// # Errors
    ///
    /// Returns an error if the mode has an invalid speed
    pub fn with_mode(network: &'a Network, mode: ModeProfile) -> Result<Self, Error> {
        let mut finder = Self::new(network);
        finder.set_mode(mode)?;
        Ok(finder)
    }

    pub fn network(&self) -> &'a Network {
        self.network
    }

    pub fn view(&self) -> &GraphView {
        &self.view
    }

    pub fn mode(&self) -> &ModeProfile {
        &self.mode
    }

    /// Tree of the most recent search
    pub fn tree(&self) -> &ShortestPathTree {
        self.engine.tree()
    }

    /// Switches the travel mode. Costs are transformed on the next query.
    ///
    /// # Errors
    ///
    /// Returns an error if the mode has an invalid speed
    pub fn set_mode(&mut self, mode: ModeProfile) -> Result<(), Error> {
        mode.validate()?;
        if mode != self.mode {
            self.filter = mode.filter(self.network.registry());
            self.mode = mode;
            self.last_origin = None;
        }
        Ok(())
    }

    fn prepare(&mut self, cost_type: CostType) {
        let current = self
            .view
            .cost_key()
            .is_some_and(|key| key.cost_type == cost_type && key.mode == self.mode);
        if !current {
            let key = CostKey::new(cost_type, self.mode.clone());
            self.view.refresh(self.network, &key);
            self.last_origin = None;
        }
    }

    fn ensure_tree(&mut self, origin: NodeNo) -> Result<&ShortestPathTree, Error> {
        if self.last_origin == Some(origin) {
            trace!("Reusing shortest path tree from node {origin}");
        } else {
            self.last_origin = None;
            self.engine.run(&self.view, origin, self.filter)?;
            self.last_origin = Some(origin);
        }
        Ok(self.engine.tree())
    }

    /// Shortest-path tree from `origin_id` under `cost_type`
    ///
    /// # Errors
    ///
    /// Returns [`Error::NodeNotFound`] for an unknown origin
    pub fn single_source_shortest_path(
        &mut self,
        origin_id: &str,
        cost_type: CostType,
    ) -> Result<&ShortestPathTree, Error> {
        let origin = self.network.node_no(origin_id)?;
        self.prepare(cost_type);
        self.ensure_tree(origin)
    }

    /// One-to-one query with the reconstructed path
    ///
    /// # Errors
    ///
    /// Returns [`Error::NodeNotFound`] if either endpoint is unknown
    pub fn find_shortest_path(
        &mut self,
        from_id: &str,
        to_id: &str,
        seq_type: SeqType,
        cost_type: CostType,
    ) -> Result<PathReport, Error> {
        let network = self.network;
        let from = network.node_no(from_id)?;
        let to = network.node_no(to_id)?;

        self.prepare(cost_type);
        let tree = self.ensure_tree(from)?;
        let units = cost_type.units(network.length_unit());

        Ok(match path_sequence(network, tree, to, seq_type) {
            Some(path) => PathReport {
                cost_type,
                cost: Some(tree.cost(to)),
                units,
                seq_type,
                path,
            },
            None => PathReport {
                cost_type,
                cost: None,
                units,
                seq_type,
                path: Vec::new(),
            },
        })
    }

    /// One-to-one cost, [`UNREACHABLE_COST`] when no path exists
    ///
    /// # Errors
    ///
    /// Returns [`Error::NodeNotFound`] if either endpoint is unknown
    pub fn get_shortest_path(
        &mut self,
        from_id: &str,
        to_id: &str,
        cost_type: CostType,
    ) -> Result<Cost, Error> {
        let from = self.network.node_no(from_id)?;
        let to = self.network.node_no(to_id)?;

        self.prepare(cost_type);
        let tree = self.ensure_tree(from)?;
        Ok(if tree.is_reachable(to) {
            tree.cost(to)
        } else {
            UNREACHABLE_COST
        })
    }

    /// Cost and `;`-joined path to every other node, keyed by destination ID.
    ///
    /// Unreachable destinations carry the sentinel label and an empty path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NodeNotFound`] for an unknown origin
    pub fn get_shortest_path_tree(
        &mut self,
        from_id: &str,
        seq_type: SeqType,
        cost_type: CostType,
    ) -> Result<HashMap<String, (Cost, String)>, Error> {
        let network = self.network;
        let from = network.node_no(from_id)?;

        self.prepare(cost_type);
        let tree = self.ensure_tree(from)?;

        Ok(network
            .nodes()
            .iter()
            .filter(|node| node.no != from)
            .map(|node| {
                let path = path_sequence(network, tree, node.no, seq_type)
                    .map(|path| path.join(";"))
                    .unwrap_or_default();
                (node.id.clone(), (tree.cost(node.no), path))
            })
            .collect())
    }

    /// Resolves the path of every agent in order.
    ///
    /// All endpoints are checked before any search runs. Agents whose origin
    /// equals their destination are skipped; consecutive agents sharing an
    /// origin reuse the same tree.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NodeNotFound`] if any agent references an unknown node
    pub fn find_path_for_agents(
        &mut self,
        agents: &mut [Agent],
        cost_type: CostType,
    ) -> Result<(), Error> {
        let network = self.network;
        let endpoints = agents
            .iter()
            .map(|agent| -> Result<_, Error> {
                if agent.origin_id == agent.destination_id {
                    Ok(None)
                } else {
                    Ok(Some((
                        network.node_no(&agent.origin_id)?,
                        network.node_no(&agent.destination_id)?,
                    )))
                }
            })
            .collect::<Result<Vec<_>, Error>>()?;

        self.prepare(cost_type);

        let mut routed = 0;
        for (agent, endpoints) in agents.iter_mut().zip(endpoints) {
            agent.clear_path();
            let Some((origin, dest)) = endpoints else {
                continue;
            };

            let tree = self.ensure_tree(origin)?;
            agent.path_cost = tree.cost(dest);

            if let (Some(node_path), Some(link_path)) = (tree.node_path(dest), tree.link_path(dest))
            {
                agent.node_path = node_path;
                agent.link_path = link_path;
                routed += 1;
            }
        }

        info!("Found paths for {routed} of {} agents", agents.len());
        Ok(())
    }

    /// Dense cost matrix between `zone_ids` under the current mode
    ///
    /// # Errors
    ///
    /// Returns [`Error::NodeNotFound`] if a zone ID is not a network node
    pub fn skim(
        &mut self,
        zone_ids: &[String],
        cost_type: CostType,
        placeholder: Cost,
    ) -> Result<SkimMatrix, Error> {
        self.prepare(cost_type);
        compute_skim(self.network, &self.view, zone_ids, placeholder)
    }

    /// Builds one tree per node and reports the total time
    ///
    /// # Errors
    ///
    /// Only fails if the view and network disagree on the node count
    pub fn benchmark_apsp(&mut self, cost_type: CostType) -> Result<Duration, Error> {
        self.prepare(cost_type);

        let start = Instant::now();
        for origin in 0..self.network.node_count() {
            self.ensure_tree(origin)?;
        }
        let elapsed = start.elapsed();

        info!(
            "processing time of finding all-pairs shortest paths: {:.4} s",
            elapsed.as_secs_f64()
        );
        Ok(elapsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MAX_LABEL_COST;
    use crate::model::NetworkBuilder;

    fn diamond() -> Network {
        let mut builder = NetworkBuilder::new();
        builder
            .add_node("1")
            .add_node("2")
            .add_node("3")
            .add_node("4")
            .add_node("5")
            .add_link("a", "1", "2", 2.0, 1.0, "auto")
            .add_link("b", "1", "3", 1.0, 4.0, "auto;walk")
            .add_link("c", "2", "4", 2.0, 2.0, "auto")
            .add_link("d", "3", "4", 1.0, 1.0, "walk");
        builder.build().unwrap()
    }

    #[test]
    fn reports_path_and_cost() {
        let network = diamond();
        let mut finder = PathFinder::new(&network);

        let report = finder
            .find_shortest_path("1", "4", SeqType::Node, CostType::Time)
            .unwrap();
        assert_eq!(report.cost, Some(3.0));
        assert_eq!(report.path, vec!["1", "2", "4"]);
        assert_eq!(
            report.to_string(),
            "path time: 3.0000 minutes | node path: 1;2;4"
        );

        let report = finder
            .find_shortest_path("1", "4", SeqType::Link, CostType::Distance)
            .unwrap();
        assert_eq!(report.cost, Some(2.0));
        assert_eq!(
            report.to_string(),
            "path distance: 2.0000 miles | link path: b;d"
        );
    }

    #[test]
    fn unreachable_pairs() {
        let network = diamond();
        let mut finder = PathFinder::new(&network);

        let report = finder
            .find_shortest_path("4", "1", SeqType::Node, CostType::Time)
            .unwrap();
        assert!(!report.is_reachable());
        assert_eq!(report.to_string(), "path time: infinity | path: ");

        assert_eq!(
            finder.get_shortest_path("1", "5", CostType::Time).unwrap(),
            UNREACHABLE_COST
        );
    }

    #[test]
    fn unknown_nodes_are_errors() {
        let network = diamond();
        let mut finder = PathFinder::new(&network);

        assert!(matches!(
            finder.get_shortest_path("1", "99", CostType::Time),
            Err(Error::NodeNotFound(id)) if id == "99"
        ));
        assert!(matches!(
            finder.find_shortest_path("0", "1", SeqType::Node, CostType::Time),
            Err(Error::NodeNotFound(_))
        ));
        assert!(finder.get_shortest_path_tree("x", SeqType::Node, CostType::Time).is_err());
    }

    #[test]
    fn tree_excludes_source() {
        let network = diamond();
        let mut finder = PathFinder::new(&network);

        let tree = finder
            .get_shortest_path_tree("1", SeqType::Node, CostType::Time)
            .unwrap();
        assert_eq!(tree.len(), 4);
        assert!(!tree.contains_key("1"));
        assert_eq!(tree["4"], (3.0, "1;2;4".to_string()));
        assert_eq!(tree["5"], (MAX_LABEL_COST, String::new()));
    }

    #[test]
    fn mode_switch_changes_filter_and_costs() {
        let network = diamond();
        let mut finder = PathFinder::with_mode(&network, ModeProfile::walk()).unwrap();

        // walk: only b and d, 1 + 1 mile at 3 mph
        let cost = finder.get_shortest_path("1", "4", CostType::Time).unwrap();
        assert!((cost - 40.0).abs() < 1e-9);
        assert_eq!(
            finder.get_shortest_path("1", "2", CostType::Time).unwrap(),
            UNREACHABLE_COST
        );

        finder.set_mode(ModeProfile::all()).unwrap();
        assert_eq!(finder.get_shortest_path("1", "4", CostType::Time).unwrap(), 3.0);
    }

    #[test]
    fn agents_share_origin_tree() {
        let network = diamond();
        let mut finder = PathFinder::new(&network);
        let mut agents = vec![
            Agent::new("1", "1", "4"),
            Agent::new("2", "1", "3"),
            Agent::new("3", "2", "2"),
            Agent::new("4", "4", "1"),
        ];

        finder
            .find_path_for_agents(&mut agents, CostType::Time)
            .unwrap();

        assert_eq!(agents[0].path_cost, 3.0);
        assert_eq!(agents[0].node_path, vec![0, 1, 3]);
        assert_eq!(agents[0].link_path, vec![0, 2]);
        assert_eq!(agents[1].link_path, vec![1]);
        assert!(!agents[2].has_path());
        assert_eq!(agents[2].path_cost, 0.0);
        assert!(!agents[3].has_path());
        assert_eq!(agents[3].path_cost, MAX_LABEL_COST);
    }

    #[test]
    fn agents_are_validated_before_routing() {
        let network = diamond();
        let mut finder = PathFinder::new(&network);
        let mut agents = vec![Agent::new("1", "1", "4"), Agent::new("2", "1", "nowhere")];

        assert!(finder.find_path_for_agents(&mut agents, CostType::Time).is_err());
        assert!(agents[0].node_path.is_empty());
    }

    #[test]
    fn selector_switch_reproduces_tree() {
        let network = diamond();
        let mut finder = PathFinder::new(&network);

        let time = finder
            .single_source_shortest_path("1", CostType::Time)
            .unwrap()
            .clone();
        finder
            .single_source_shortest_path("1", CostType::Distance)
            .unwrap();
        let again = finder
            .single_source_shortest_path("1", CostType::Time)
            .unwrap();

        assert_eq!(&time, again);
    }

    #[test]
    fn benchmark_visits_every_origin() {
        let network = diamond();
        let mut finder = PathFinder::new(&network);
        finder.benchmark_apsp(CostType::Time).unwrap();
        assert_eq!(finder.tree().origin(), Some(4));
    }
}
