use std::fs;
use std::path::{Path, PathBuf};

use pathskim_core::prelude::{Cost, ModeProfile, NetworkConfig, UNREACHABLE_COST};
use serde::Deserialize;

use crate::error::CliError;

/// Contents of the TOML settings file
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub network: NetworkConfig,
    pub skim: SkimSettings,
    /// Extra travel modes; a mode named like a built-in one replaces it
    pub modes: Vec<ModeProfile>,
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SkimSettings {
    /// Written for origin-destination pairs without a path
    pub placeholder: Cost,
    pub threads: Option<usize>,
    pub format: String,
    pub output_dir: PathBuf,
}

impl Default for SkimSettings {
    fn default() -> Self {
        Self {
            placeholder: UNREACHABLE_COST,
            threads: None,
            format: "csv".to_string(),
            output_dir: PathBuf::from("output"),
        }
    }
}

impl Settings {
    /// Reads a settings file. Relative paths inside it are resolved against
    /// the file's directory.
    pub fn load(path: &Path) -> Result<Self, CliError> {
        let text = fs::read_to_string(path).map_err(|source| CliError::ReadSettings {
            path: path.to_path_buf(),
            source,
        })?;
        let mut settings: Settings =
            toml::from_str(&text).map_err(|source| CliError::ParseSettings {
                path: path.to_path_buf(),
                source,
            })?;

        if let Some(base) = path.parent() {
            settings.network.input_dir = base.join(&settings.network.input_dir);
            settings.skim.output_dir = base.join(&settings.skim.output_dir);
        }
        Ok(settings)
    }

    /// Looks up a travel mode by name, settings file first
    pub fn mode(&self, name: &str) -> Result<ModeProfile, CliError> {
        self.modes
            .iter()
            .chain(ModeProfile::builtin().iter())
            .find(|mode| mode.name.eq_ignore_ascii_case(name))
            .cloned()
            .ok_or_else(|| CliError::UnknownMode(name.to_string()))
    }
}
