//! Origin-destination skim matrices over zone centroids

use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::{DateTime, Local};
use log::info;
use rayon::prelude::*;
use serde::Serialize;

use super::engine::LabelCorrecting;
use crate::export::{OutputFormat, save_matrix};
use crate::graph::{CostKey, GraphView};
use crate::model::{CostType, ModeProfile, Network};
use crate::{Cost, Error, NodeNo, UNREACHABLE_COST};

/// Descriptive attributes stored alongside a matrix
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkimMeta {
    pub description: String,
    pub mode: String,
    pub units: String,
    pub cost_type: CostType,
    pub generated_at: DateTime<Local>,
    pub method: String,
}

/// Dense zone x zone cost matrix, row-major, rows are origins
#[derive(Debug, Clone, PartialEq)]
pub struct SkimMatrix {
    zones: Vec<String>,
    values: Vec<Cost>,
    meta: SkimMeta,
}

impl SkimMatrix {
    pub fn zones(&self) -> &[String] {
        &self.zones
    }

    pub fn size(&self) -> usize {
        self.zones.len()
    }

    pub fn values(&self) -> &[Cost] {
        &self.values
    }

    pub fn meta(&self) -> &SkimMeta {
        &self.meta
    }

    pub fn get(&self, origin: usize, dest: usize) -> Cost {
        self.values[origin * self.zones.len() + dest]
    }

    pub fn row(&self, origin: usize) -> &[Cost] {
        let n = self.zones.len();
        &self.values[origin * n..(origin + 1) * n]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cost]> {
        // chunks_exact(0) panics, an empty matrix simply has no rows
        self.values.chunks_exact(self.zones.len().max(1))
    }

    /// Cost between two zones by ID
    pub fn get_by_id(&self, origin_id: &str, dest_id: &str) -> Option<Cost> {
        let origin = self.zones.iter().position(|zone| zone == origin_id)?;
        let dest = self.zones.iter().position(|zone| zone == dest_id)?;
        Some(self.get(origin, dest))
    }
}

/// Computes the skim between `zone_ids` on the costs currently held by
/// `view`.
///
/// Each origin is an independent single-source search; rayon workers each
/// own one engine and share the view read-only. Unreachable pairs get
/// `placeholder`, the diagonal is zero.
///
/// # Errors
///
/// Returns [`Error::NodeNotFound`] for unknown zone IDs and
/// [`Error::InvalidData`] if the view has no cost array yet
pub fn compute_skim(
    network: &Network,
    view: &GraphView,
    zone_ids: &[String],
    placeholder: Cost,
) -> Result<SkimMatrix, Error> {
    let key = view
        .cost_key()
        .ok_or_else(|| Error::InvalidData("graph view has no link costs".to_string()))?;
    let zones = zone_ids
        .iter()
        .map(|id| network.node_no(id))
        .collect::<Result<Vec<NodeNo>, Error>>()?;
    let filter = key.mode.filter(network.registry());

    info!(
        "Computing {n}x{n} {} skim for mode {}",
        key.cost_type,
        key.mode.name,
        n = zones.len()
    );
    let start = Instant::now();

    let rows = zones
        .par_iter()
        .map_init(
            || LabelCorrecting::new(view),
            |engine, &origin| -> Result<Vec<Cost>, Error> {
                let tree = engine.run(view, origin, filter)?;
                Ok(zones
                    .iter()
                    .map(|&dest| {
                        if tree.is_reachable(dest) {
                            tree.cost(dest)
                        } else {
                            placeholder
                        }
                    })
                    .collect())
            },
        )
        .collect::<Result<Vec<_>, Error>>()?;

    info!(
        "Matrix creation time: {:.2} s",
        start.elapsed().as_secs_f64()
    );

    Ok(SkimMatrix {
        zones: zone_ids.to_vec(),
        values: rows.concat(),
        meta: SkimMeta {
            description: format!(
                "Shortest path travel {} matrix for {}",
                key.cost_type, key.mode.name
            ),
            mode: key.mode.name.clone(),
            units: key.cost_type.units(network.length_unit()).to_string(),
            cost_type: key.cost_type,
            generated_at: Local::now(),
            method: "Deque label-correcting".to_string(),
        },
    })
}

/// Skim over every centroid of `network` for `mode`, written to
/// `output_dir` in `output_type` format (`.csv` or `.json`).
///
/// The format is checked before any computation. The mode's cost transform
/// is applied once, before the parallel phase.
///
/// # Errors
///
/// Returns [`Error::UnsupportedFormat`] for unknown output types,
/// [`Error::InvalidData`] for invalid modes or networks without centroids,
/// and I/O errors from the export
pub fn find_shortest_path_network(
    network: &Network,
    mode: &ModeProfile,
    cost_type: CostType,
    output_type: &str,
    output_dir: &Path,
) -> Result<PathBuf, Error> {
    let format: OutputFormat = output_type.parse()?;
    mode.validate()?;

    let zones = network.centroid_ids();
    if zones.is_empty() {
        return Err(Error::InvalidData(
            "network has no zone centroids to build a matrix from".to_string(),
        ));
    }

    let view = GraphView::with_costs(network, &CostKey::new(cost_type, mode.clone()));
    let matrix = compute_skim(network, &view, &zones, UNREACHABLE_COST)?;

    save_matrix(&matrix, format, output_dir)
}
