use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Error;

/// Selects which per-link cost array the engine runs on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CostType {
    /// Free-flow travel time in minutes
    #[default]
    Time,
    /// Link length in the network length unit
    Distance,
}

impl CostType {
    pub fn units(self, length_unit: LengthUnit) -> &'static str {
        match self {
            CostType::Time => "minutes",
            CostType::Distance => length_unit.plural(),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CostType::Time => "time",
            CostType::Distance => "distance",
        }
    }
}

impl fmt::Display for CostType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CostType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        if s.starts_with("dis") {
            Ok(CostType::Distance)
        } else if s == "time" {
            Ok(CostType::Time)
        } else {
            Err(Error::InvalidData(format!(
                "unknown cost type '{s}', expected 'time' or 'distance'"
            )))
        }
    }
}

/// Unit of link lengths; speeds are expressed in this unit per hour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthUnit {
    #[default]
    Mile,
    Kilometer,
}

impl LengthUnit {
    pub fn plural(self) -> &'static str {
        match self {
            LengthUnit::Mile => "miles",
            LengthUnit::Kilometer => "kilometers",
        }
    }
}
