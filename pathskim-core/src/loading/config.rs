use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::model::LengthUnit;
use crate::{Cost, MAX_LABEL_COST};

/// Where the network files live and how to interpret them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    pub input_dir: PathBuf,
    pub node_file: String,
    pub link_file: String,
    pub length_unit: LengthUnit,
    /// Centroids start and end paths but are never passed through
    pub terminal_centroids: bool,
    pub max_label_cost: Cost,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("."),
            node_file: "node.csv".to_string(),
            link_file: "link.csv".to_string(),
            length_unit: LengthUnit::Mile,
            terminal_centroids: false,
            max_label_cost: MAX_LABEL_COST,
        }
    }
}

impl NetworkConfig {
    pub fn new(input_dir: impl AsRef<Path>) -> Self {
        Self {
            input_dir: input_dir.as_ref().to_path_buf(),
            ..Self::default()
        }
    }

    pub fn node_path(&self) -> PathBuf {
        self.input_dir.join(&self.node_file)
    }

    pub fn link_path(&self) -> PathBuf {
        self.input_dir.join(&self.link_file)
    }
}
