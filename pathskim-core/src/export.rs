//! Writing skim matrices and agent paths to disk

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use itertools::Itertools;
use log::info;
use serde::Serialize;

use crate::model::{Agent, Network};
use crate::routing::{SkimMatrix, SkimMeta};
use crate::{Cost, Error};

/// Matrix file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Csv,
    Json,
}

impl OutputFormat {
    pub const SUPPORTED: &'static str = "{.csv, .json}";

    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().trim_start_matches('.').to_ascii_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            _ => Err(Error::UnsupportedFormat {
                format: s.to_string(),
                supported: Self::SUPPORTED,
            }),
        }
    }
}

pub fn matrix_file_name(matrix: &SkimMatrix, format: OutputFormat) -> String {
    format!(
        "shortest_path_matrix_{}_{}.{}",
        matrix.meta().cost_type,
        matrix.meta().mode,
        format.extension()
    )
}

/// Writes `matrix` into `output_dir`, creating the directory if needed.
/// Returns the path of the written file.
///
/// # Errors
///
/// Returns an error if the directory or file cannot be written
pub fn save_matrix(
    matrix: &SkimMatrix,
    format: OutputFormat,
    output_dir: &Path,
) -> Result<PathBuf, Error> {
    fs::create_dir_all(output_dir)?;
    let path = output_dir.join(matrix_file_name(matrix, format));
    let mut writer = BufWriter::new(File::create(&path)?);

    match format {
        OutputFormat::Csv => write_matrix_csv(matrix, &mut writer)?,
        OutputFormat::Json => write_matrix_json(matrix, &mut writer)?,
    }
    writer.flush()?;

    info!("Matrix '{}' saved to: {}", matrix.meta().mode, path.display());
    Ok(path)
}

/// Header row of zone IDs, then one row per origin with two decimals
///
/// # Errors
///
/// Returns an error if writing fails
pub fn write_matrix_csv<W: Write>(matrix: &SkimMatrix, writer: W) -> Result<(), Error> {
    let mut csv = csv::Writer::from_writer(writer);

    csv.write_record(std::iter::once("").chain(matrix.zones().iter().map(String::as_str)))?;
    for (zone, row) in matrix.zones().iter().zip(matrix.rows()) {
        csv.write_record(
            std::iter::once(zone.clone()).chain(row.iter().map(|value| format!("{value:.2}"))),
        )?;
    }

    csv.flush()?;
    Ok(())
}

#[derive(Serialize)]
struct MatrixDocument<'a> {
    meta: &'a SkimMeta,
    zones: &'a [String],
    matrix: Vec<&'a [Cost]>,
}

/// Metadata, zone IDs and nested rows as one JSON document
///
/// # Errors
///
/// Returns an error if serialization or writing fails
pub fn write_matrix_json<W: Write>(matrix: &SkimMatrix, writer: W) -> Result<(), Error> {
    let document = MatrixDocument {
        meta: matrix.meta(),
        zones: matrix.zones(),
        matrix: matrix.rows().collect(),
    };
    serde_json::to_writer_pretty(writer, &document)?;
    Ok(())
}

/// One CSV row per agent with `;`-joined node and link ID sequences
///
/// # Errors
///
/// Returns an error if the file cannot be written
pub fn save_agent_paths(network: &Network, agents: &[Agent], path: &Path) -> Result<(), Error> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut csv = csv::Writer::from_path(path)?;

    csv.write_record([
        "agent_id",
        "o_node_id",
        "d_node_id",
        "path_cost",
        "node_sequence",
        "link_sequence",
    ])?;
    for agent in agents {
        let node_sequence = agent.node_path.iter().map(|&no| network.node_id(no)).join(";");
        let link_sequence = agent.link_path.iter().map(|&no| network.link_id(no)).join(";");
        let path_cost = format!("{:.4}", agent.path_cost);
        csv.write_record([
            agent.id.as_str(),
            agent.origin_id.as_str(),
            agent.destination_id.as_str(),
            path_cost.as_str(),
            node_sequence.as_str(),
            link_sequence.as_str(),
        ])?;
    }
    csv.flush()?;

    info!("Paths of {} agents saved to: {}", agents.len(), path.display());
    Ok(())
}
