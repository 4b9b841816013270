//! One function per subcommand

use std::collections::BTreeMap;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use pathskim_core::prelude::*;
use tracing::{info, info_span};

use crate::cli::QueryArgs;
use crate::error::CliError;
use crate::settings::Settings;

/// Loaded network plus the settings it came from
pub struct Session {
    pub settings: Settings,
    pub network: Network,
}

impl Session {
    pub fn open(settings: Settings) -> Result<Self, CliError> {
        let network = {
            let _span = info_span!("load", dir = %settings.network.input_dir.display()).entered();
            create_network(&settings.network)?
        };
        Ok(Self { settings, network })
    }

    fn finder(&self, query: &QueryArgs) -> Result<PathFinder<'_>, CliError> {
        let mode = self.settings.mode(&query.mode)?;
        Ok(PathFinder::with_mode(&self.network, mode)?)
    }
}

pub fn skim(
    session: &Session,
    query: &QueryArgs,
    format: Option<String>,
    output: Option<PathBuf>,
) -> Result<(), CliError> {
    let skim = &session.settings.skim;
    let format: OutputFormat = format.as_deref().unwrap_or(&skim.format).parse()?;
    let output = output.unwrap_or_else(|| skim.output_dir.clone());

    let zones = session.network.centroid_ids();
    if zones.is_empty() {
        return Err(Error::InvalidData(
            "network has no zone centroids to build a matrix from".to_string(),
        )
        .into());
    }

    let mut finder = session.finder(query)?;
    let _span = info_span!("skim", mode = %finder.mode().name, cost = %query.cost).entered();
    let matrix = finder.skim(&zones, query.cost, skim.placeholder)?;
    let path = save_matrix(&matrix, format, &output)?;

    info!(zones = zones.len(), path = %path.display(), "skim written");
    Ok(())
}

pub fn path(
    session: &Session,
    query: &QueryArgs,
    from: &str,
    to: &str,
    seq: SeqType,
) -> Result<(), CliError> {
    let mut finder = session.finder(query)?;
    let report = finder.find_shortest_path(from, to, seq, query.cost)?;

    writeln!(io::stdout().lock(), "{report}")?;
    Ok(())
}

pub fn tree(
    session: &Session,
    query: &QueryArgs,
    from: &str,
    seq: SeqType,
) -> Result<(), CliError> {
    let mut finder = session.finder(query)?;
    let tree: BTreeMap<_, _> = finder
        .get_shortest_path_tree(from, seq, query.cost)?
        .into_iter()
        .collect();

    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &tree)?;
    writeln!(stdout)?;
    Ok(())
}

pub fn agents(
    session: &Session,
    query: &QueryArgs,
    demand: &Path,
    output: Option<PathBuf>,
) -> Result<(), CliError> {
    let mut agents = read_demand(demand)?;
    let mut finder = session.finder(query)?;
    {
        let _span = info_span!("agents", count = agents.len()).entered();
        finder.find_path_for_agents(&mut agents, query.cost)?;
    }

    let output = output.unwrap_or_else(|| session.settings.skim.output_dir.join("agent.csv"));
    save_agent_paths(&session.network, &agents, &output)?;
    Ok(())
}

pub fn bench(session: &Session, query: &QueryArgs) -> Result<(), CliError> {
    let mut finder = session.finder(query)?;
    let elapsed = finder.benchmark_apsp(query.cost)?;

    let nodes = session.network.node_count();
    writeln!(
        io::stdout().lock(),
        "{nodes} trees in {:.4} s ({:.3} ms per origin)",
        elapsed.as_secs_f64(),
        elapsed.as_secs_f64() * 1000.0 / nodes.max(1) as f64
    )?;
    Ok(())
}
