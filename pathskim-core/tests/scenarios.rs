use pathskim_core::prelude::*;
use pathskim_core::routing::single_source;
use pathskim_core::{CostKey, Network};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn diamond() -> Network {
    let mut builder = NetworkBuilder::new();
    builder
        .add_node("1")
        .add_node("2")
        .add_node("3")
        .add_node("4")
        .add_link("1-2", "1", "2", 1.0, 1.0, "")
        .add_link("1-3", "1", "3", 4.0, 4.0, "")
        .add_link("2-4", "2", "4", 2.0, 2.0, "")
        .add_link("3-4", "3", "4", 1.0, 1.0, "");
    builder.build().unwrap()
}

/// Random multigraph with parallel links, self loops and mixed mode tags
fn random_network(seed: u64, nodes: usize, links: usize) -> Network {
    let mut rng = StdRng::seed_from_u64(seed);
    let uses = ["", "auto", "walk", "auto;walk", "bike"];
    let mut builder = NetworkBuilder::new();
    for i in 0..nodes {
        builder.add_node(i.to_string());
    }
    for i in 0..links {
        let from = rng.gen_range(0..nodes);
        let to = rng.gen_range(0..nodes);
        let length = rng.gen_range(0..50) as f64 / 10.0;
        let fftt = rng.gen_range(0..100) as f64 / 4.0;
        let allowed = uses[rng.gen_range(0..uses.len())];
        builder.add_link(
            format!("l{i}"),
            from.to_string(),
            to.to_string(),
            length,
            fftt,
            allowed,
        );
    }
    builder.build().unwrap()
}

/// Plain Bellman-Ford over the same costs and filter
fn reference_costs(network: &Network, view: &GraphView, origin: usize, filter: UseMask) -> Vec<f64> {
    let mut labels = vec![f64::INFINITY; network.node_count()];
    labels[origin] = 0.0;
    for _ in 0..network.node_count() {
        let mut changed = false;
        for link in network.links() {
            if !link.allowed_uses.intersects(filter) {
                continue;
            }
            let candidate = labels[link.from_node_no] + view.link_cost(link.no);
            if candidate < labels[link.to_node_no] {
                labels[link.to_node_no] = candidate;
                changed = true;
            }
        }
        if !changed {
            break;
        }
    }
    labels
}

#[test]
fn diamond_labels_and_path() {
    let network = diamond();
    let mut finder = PathFinder::new(&network);
    let tree = finder
        .single_source_shortest_path("1", CostType::Time)
        .unwrap();

    let label = |id: &str| tree.cost(network.node_no(id).unwrap());
    assert_eq!(label("1"), 0.0);
    assert_eq!(label("2"), 1.0);
    assert_eq!(label("3"), 4.0);
    assert_eq!(label("4"), 3.0);

    let report = finder
        .find_shortest_path("1", "4", SeqType::Node, CostType::Time)
        .unwrap();
    assert_eq!(report.path, vec!["1", "2", "4"]);
}

#[test]
fn origin_without_outgoing_links_reaches_nothing() {
    let network = diamond();
    let mut finder = PathFinder::new(&network);
    let tree = finder
        .single_source_shortest_path("4", CostType::Time)
        .unwrap()
        .clone();

    for node in network.nodes().iter().filter(|node| node.id != "4") {
        assert_eq!(tree.cost(node.no), MAX_LABEL_COST);
        assert_eq!(tree.node_preds()[node.no], None);
        assert_eq!(tree.link_preds()[node.no], None);

        let report = finder
            .find_shortest_path("4", &node.id, SeqType::Link, CostType::Time)
            .unwrap();
        assert!(!report.is_reachable());
    }
}

#[test]
fn origin_tree_root() {
    let network = diamond();
    let mut finder = PathFinder::new(&network);
    let tree = finder
        .single_source_shortest_path("2", CostType::Time)
        .unwrap();
    let origin = network.node_no("2").unwrap();

    assert_eq!(tree.cost(origin), 0.0);
    assert_eq!(tree.node_path(origin), Some(vec![origin]));
    assert_eq!(tree.link_path(origin), Some(vec![]));
}

#[test]
fn three_zone_matrix() {
    let mut builder = NetworkBuilder::new();
    builder
        .add_zone("10", "10")
        .add_zone("20", "20")
        .add_zone("30", "30")
        .add_node("junction")
        .add_link("a", "10", "junction", 1.0, 3.0, "")
        .add_link("b", "junction", "30", 1.0, 3.0, "")
        .add_link("c", "30", "20", 1.0, 2.5, "")
        .add_link("d", "30", "10", 1.0, 4.0, "")
        // a self loop on a sink zone must not create a way out of it
        .add_link("e", "20", "20", 1.0, 1.0, "");
    let network = builder.build().unwrap();

    let zones = network.centroid_ids();
    assert_eq!(zones, vec!["10", "20", "30"]);

    let mut finder = PathFinder::new(&network);
    let matrix = finder
        .skim(&zones, CostType::Time, UNREACHABLE_COST)
        .unwrap();

    for i in 0..3 {
        assert_eq!(matrix.get(i, i), 0.0);
    }
    assert_eq!(matrix.get_by_id("30", "20"), Some(2.5));
    assert_eq!(matrix.get_by_id("10", "20"), Some(8.5));
    assert_eq!(matrix.get_by_id("20", "10"), Some(UNREACHABLE_COST));
}

#[test]
fn unreachable_pair_uses_placeholder() {
    let mut builder = NetworkBuilder::new();
    builder
        .add_zone("10", "10")
        .add_zone("20", "20")
        .add_zone("30", "30")
        .add_link("a", "30", "20", 1.0, 2.0, "")
        .add_link("b", "30", "10", 1.0, 1.0, "");
    let network = builder.build().unwrap();
    let zones = network.centroid_ids();

    let mut finder = PathFinder::new(&network);
    let matrix = finder
        .skim(&zones, CostType::Time, UNREACHABLE_COST)
        .unwrap();

    assert_eq!(matrix.get_by_id("10", "20"), Some(UNREACHABLE_COST));
    assert_eq!(matrix.get_by_id("30", "20"), Some(2.0));
    for i in 0..zones.len() {
        assert_eq!(matrix.get(i, i), 0.0);
    }
}

#[test]
fn labels_are_globally_optimal_and_match_paths() {
    for seed in 1..=5 {
        let network = random_network(seed, 40, 160);
        let view = GraphView::with_costs(&network, &CostKey::default());

        for origin in [0, 7, 19, 39] {
            let tree = single_source(&view, origin, UseMask::ALL).unwrap();
            let expected = reference_costs(&network, &view, origin, UseMask::ALL);

            for dest in 0..network.node_count() {
                if expected[dest].is_infinite() {
                    assert!(!tree.is_reachable(dest));
                    continue;
                }
                assert!((tree.cost(dest) - expected[dest]).abs() < 1e-9);

                let path_cost: f64 = tree
                    .link_path(dest)
                    .unwrap()
                    .iter()
                    .map(|&link| view.link_cost(link))
                    .sum();
                assert!((path_cost - tree.cost(dest)).abs() < 1e-9);
            }
        }
    }
}

#[test]
fn repeated_queries_are_idempotent() {
    let network = random_network(42, 30, 120);
    let view = GraphView::with_costs(&network, &CostKey::default());

    let first = single_source(&view, 3, UseMask::ALL).unwrap();
    let second = single_source(&view, 3, UseMask::ALL).unwrap();
    assert_eq!(first, second);
}

#[test]
fn switching_cost_type_back_reproduces_time_tree() {
    let network = random_network(7, 30, 120);
    let mut finder = PathFinder::new(&network);

    let time = finder
        .single_source_shortest_path("5", CostType::Time)
        .unwrap()
        .clone();
    let distance = finder
        .single_source_shortest_path("5", CostType::Distance)
        .unwrap()
        .clone();
    let again = finder
        .single_source_shortest_path("5", CostType::Time)
        .unwrap();

    assert_eq!(&time, again);
    assert_eq!(distance.origin(), time.origin());
}

#[test]
fn restricting_modes_never_lowers_labels() {
    for seed in 11..=14 {
        let network = random_network(seed, 30, 150);
        let view = GraphView::with_costs(&network, &CostKey::default());
        let registry = network.registry();
        let walk = registry.mask_of("walk");
        let walk_or_auto = walk.union(registry.mask_of("auto"));

        let all = single_source(&view, 0, UseMask::ALL).unwrap();
        let wider = single_source(&view, 0, walk_or_auto).unwrap();
        let narrow = single_source(&view, 0, walk).unwrap();

        for dest in 0..network.node_count() {
            assert!(all.cost(dest) <= wider.cost(dest));
            assert!(wider.cost(dest) <= narrow.cost(dest));
        }

        let expected = reference_costs(&network, &view, 0, walk);
        for dest in 0..network.node_count() {
            if expected[dest].is_finite() {
                assert!((narrow.cost(dest) - expected[dest]).abs() < 1e-9);
            } else {
                assert!(!narrow.is_reachable(dest));
            }
        }
    }
}

#[test]
fn agents_populate_paths() {
    let network = diamond();
    let mut finder = PathFinder::new(&network);
    let mut agents = vec![
        Agent::new("a", "1", "4"),
        Agent::new("b", "1", "2"),
        Agent::new("c", "3", "3"),
        Agent::new("d", "2", "4"),
    ];

    finder
        .find_path_for_agents(&mut agents, CostType::Time)
        .unwrap();

    let ids = |agent: &Agent| -> Vec<&str> {
        agent
            .node_path
            .iter()
            .map(|&no| network.node_id(no))
            .collect()
    };
    assert_eq!(ids(&agents[0]), vec!["1", "2", "4"]);
    assert_eq!(ids(&agents[1]), vec!["1", "2"]);
    assert!(agents[2].node_path.is_empty() && agents[2].link_path.is_empty());
    assert_eq!(agents[3].path_cost, 2.0);
    assert_eq!(agents[3].link_path.len(), 1);
}
