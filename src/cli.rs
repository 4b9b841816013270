use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use pathskim_core::prelude::{CostType, SeqType};

/// Shortest paths and zone skims on GMNS networks
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// TOML settings file with `[network]`, `[skim]` and `[[modes]]` tables
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding node.csv and link.csv, overrides the settings file
    #[arg(short, long, global = true)]
    pub input_dir: Option<PathBuf>,

    /// Worker threads for matrix computation, overrides the settings file
    #[arg(short = 'j', long, global = true)]
    pub threads: Option<usize>,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Write the centroid-to-centroid cost matrix
    Skim {
        #[command(flatten)]
        query: QueryArgs,

        /// Output format, `csv` or `json`
        #[arg(short, long)]
        format: Option<String>,

        /// Output directory
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the shortest path between two nodes
    Path {
        #[arg(long)]
        from: String,

        #[arg(long)]
        to: String,

        #[command(flatten)]
        query: QueryArgs,

        /// Report the path as `node` or `link` IDs
        #[arg(long, default_value = "node")]
        seq: SeqType,
    },
    /// Print cost and path from one node to every other node as JSON
    Tree {
        #[arg(long)]
        from: String,

        #[command(flatten)]
        query: QueryArgs,

        #[arg(long, default_value = "node")]
        seq: SeqType,
    },
    /// Route every agent of a demand table and write their paths
    Agents {
        /// CSV with agent_id, o_node_id and d_node_id columns
        #[arg(short, long)]
        demand: PathBuf,

        /// Output CSV, defaults to agent.csv in the skim output directory
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        query: QueryArgs,
    },
    /// Time one shortest-path tree from every node
    Bench {
        #[command(flatten)]
        query: QueryArgs,
    },
}

#[derive(Debug, Args)]
pub struct QueryArgs {
    /// Travel mode, a built-in name or one from the settings file
    #[arg(short, long, default_value = "all")]
    pub mode: String,

    /// Link cost, `time` or `distance`
    #[arg(long, default_value = "time")]
    pub cost: CostType,
}
