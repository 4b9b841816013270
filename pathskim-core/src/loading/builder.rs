use std::path::Path;

use hashbrown::HashSet;
use log::{info, trace, warn};

use super::config::NetworkConfig;
use super::gmns::{RawDemand, RawLink, RawNode, deserialize_csv_file};
use crate::model::{Agent, NetworkBuilder};
use crate::{Error, Network};

/// Creates a network from the node and link tables named in `config`
///
/// # Errors
///
/// Returns an error if a file is missing or the tables describe an invalid
/// network (duplicate node IDs, negative link attributes)
pub fn create_network(config: &NetworkConfig) -> Result<Network, Error> {
    validate_config(config)?;

    info!("Reading nodes from {}", config.node_path().display());
    let nodes: Vec<RawNode> = deserialize_csv_file(&config.node_path())?;
    info!("Reading links from {}", config.link_path().display());
    let links: Vec<RawLink> = deserialize_csv_file(&config.link_path())?;

    let mut builder = NetworkBuilder::new();
    builder
        .length_unit(config.length_unit)
        .max_label_cost(config.max_label_cost);

    let mut node_ids = HashSet::with_capacity(nodes.len());
    for node in nodes {
        if node.node_id.is_empty() {
            warn!("Skipping node without node_id");
            continue;
        }
        node_ids.insert(node.node_id.clone());

        if node.zone_id.is_empty() {
            builder.add_node(node.node_id);
        } else if config.terminal_centroids {
            builder.add_terminal_node(node.node_id, Some(node.zone_id));
        } else {
            builder.add_zone(node.node_id, node.zone_id);
        }
    }

    let mut skipped = 0usize;
    for link in links {
        if !node_ids.contains(&link.from_node_id) || !node_ids.contains(&link.to_node_id) {
            trace!(
                "Link {} connects unknown nodes {} -> {}",
                link.link_id,
                link.from_node_id,
                link.to_node_id
            );
            skipped += 1;
            continue;
        }

        let (Some(length), Some(free_speed)) = (link.length, link.free_speed) else {
            skipped += 1;
            continue;
        };
        let fftt = length / free_speed * 60.0;
        if !(length.is_finite() && length >= 0.0 && free_speed > 0.0 && fftt.is_finite()) {
            trace!(
                "Link {} has unusable length {length} or free speed {free_speed}",
                link.link_id
            );
            skipped += 1;
            continue;
        }

        builder.add_link(
            link.link_id,
            link.from_node_id,
            link.to_node_id,
            length,
            fftt,
            &link.allowed_uses,
        );
    }
    if skipped > 0 {
        warn!(
            "Skipped {skipped} links with unknown end nodes, missing or invalid length, or non-positive free speed"
        );
    }

    let network = builder.build()?;
    info!(
        "Network loaded: {} nodes, {} links, {} centroids",
        network.node_count(),
        network.link_count(),
        network.centroid_ids().len()
    );
    Ok(network)
}

/// Reads agents from a demand table with `agent_id`, `o_node_id` and
/// `d_node_id` columns. Rows without an `agent_id` are numbered by position.
///
/// # Errors
///
/// Returns an error if the file cannot be read
pub fn read_demand(path: &Path) -> Result<Vec<Agent>, Error> {
    let rows: Vec<RawDemand> = deserialize_csv_file(path)?;
    let agents: Vec<Agent> = rows
        .into_iter()
        .enumerate()
        .map(|(i, row)| {
            let id = if row.agent_id.is_empty() {
                (i + 1).to_string()
            } else {
                row.agent_id
            };
            Agent::new(id, row.o_node_id, row.d_node_id)
        })
        .collect();

    info!("Read {} agents from {}", agents.len(), path.display());
    Ok(agents)
}

fn validate_config(config: &NetworkConfig) -> Result<(), Error> {
    if !config.input_dir.is_dir() {
        return Err(Error::IoError(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("Input directory not found: {}", config.input_dir.display()),
        )));
    }

    for path in [config.node_path(), config.link_path()] {
        if !path.exists() {
            return Err(Error::IoError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Network file not found: {}", path.display()),
            )));
        }
    }

    if config.max_label_cost <= 0.0 {
        return Err(Error::InvalidData(format!(
            "max_label_cost must be positive, got {}",
            config.max_label_cost
        )));
    }

    Ok(())
}
