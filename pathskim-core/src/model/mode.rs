//! Travel modes: which links a mode may use and how fast it moves on them

use serde::{Deserialize, Serialize};

use super::network::Link;
use crate::{Cost, Error};

/// Set of mode tags permitted on a link, or requested by a query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct UseMask(u64);

impl UseMask {
    /// Open to every mode
    pub const ALL: UseMask = UseMask(u64::MAX);
    pub const NONE: UseMask = UseMask(0);
    /// Bit shared by every unrestricted link; queried tags the registry has
    /// never seen map here so they only travel on unrestricted links.
    const UNLISTED: UseMask = UseMask(1 << 63);

    pub const fn bits(self) -> u64 {
        self.0
    }

    pub const fn is_all(self) -> bool {
        self.0 == u64::MAX
    }

    pub const fn intersects(self, other: UseMask) -> bool {
        self.0 & other.0 != 0
    }

    #[must_use]
    pub const fn union(self, other: UseMask) -> UseMask {
        UseMask(self.0 | other.0)
    }
}

/// Assigns a bit to every mode tag found in a network's `allowed_uses`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModeRegistry {
    tags: Vec<String>,
}

impl ModeRegistry {
    const MAX_TAGS: usize = 63;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    fn is_all(tag: &str) -> bool {
        tag.is_empty() || tag.eq_ignore_ascii_case("all")
    }

    fn register(&mut self, tag: &str) -> Result<UseMask, Error> {
        if let Some(bit) = self.tags.iter().position(|t| t == tag) {
            return Ok(UseMask(1 << bit));
        }
        if self.tags.len() == Self::MAX_TAGS {
            return Err(Error::InvalidData(format!(
                "too many distinct mode tags (max {}), cannot add '{tag}'",
                Self::MAX_TAGS
            )));
        }
        self.tags.push(tag.to_string());
        Ok(UseMask(1 << (self.tags.len() - 1)))
    }

    /// Parses an `allowed_uses` value such as `auto;bike` into a mask,
    /// registering tags seen for the first time. Empty and `all` mean
    /// unrestricted.
    pub fn parse_allowed_uses(&mut self, value: &str) -> Result<UseMask, Error> {
        let tags: Vec<&str> = value
            .split([';', ',', ' '])
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect();

        if tags.is_empty() || tags.iter().any(|t| Self::is_all(t)) {
            return Ok(UseMask::ALL);
        }

        tags.into_iter().try_fold(UseMask::NONE, |mask, tag| {
            Ok(mask.union(self.register(tag)?))
        })
    }

    /// Mask a query for `tag` must intersect with
    pub fn mask_of(&self, tag: &str) -> UseMask {
        let tag = tag.trim();
        if Self::is_all(tag) {
            return UseMask::ALL;
        }
        self.tags
            .iter()
            .position(|t| t == tag)
            .map_or(UseMask::UNLISTED, |bit| UseMask(1 << bit))
    }
}

/// How a mode's link travel time derives from the link attributes
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum SpeedRule {
    /// Use the network free-flow travel time
    #[default]
    Network,
    /// Every link is traversed at `speed` (length units per hour)
    Uniform { speed: f64 },
    /// Links that explicitly list `tag` are traversed at `speed`; the others
    /// keep their free-flow time
    Access { tag: String, speed: f64 },
}

/// Travel mode: the tags it may use and its cost transform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModeProfile {
    pub name: String,
    /// Link tags this mode may traverse; empty means every link
    #[serde(default)]
    pub uses: Vec<String>,
    #[serde(default)]
    pub speed: SpeedRule,
}

impl ModeProfile {
    pub fn new(name: impl Into<String>, uses: &[&str], speed: SpeedRule) -> Self {
        Self {
            name: name.into(),
            uses: uses.iter().map(ToString::to_string).collect(),
            speed,
        }
    }

    /// Unrestricted mode on network travel times
    pub fn all() -> Self {
        Self::new("all", &[], SpeedRule::Network)
    }

    pub fn auto() -> Self {
        Self::new("auto", &["auto"], SpeedRule::Network)
    }

    pub fn walk() -> Self {
        Self::new("walk", &["walk"], SpeedRule::Uniform { speed: 3.0 })
    }

    pub fn bike() -> Self {
        Self::new("bike", &["bike"], SpeedRule::Uniform { speed: 10.0 })
    }

    /// Transit riders walk to and between stops on walk links
    pub fn transit() -> Self {
        Self::new(
            "transit",
            &["transit", "walk"],
            SpeedRule::Access {
                tag: "walk".to_string(),
                speed: 3.0,
            },
        )
    }

    pub fn builtin() -> Vec<ModeProfile> {
        vec![
            Self::all(),
            Self::auto(),
            Self::walk(),
            Self::bike(),
            Self::transit(),
        ]
    }

    /// Rejects speeds that would produce negative or infinite link costs
    pub fn validate(&self) -> Result<(), Error> {
        let speed = match &self.speed {
            SpeedRule::Network => return Ok(()),
            SpeedRule::Uniform { speed } | SpeedRule::Access { speed, .. } => *speed,
        };
        if speed.is_finite() && speed > 0.0 {
            Ok(())
        } else {
            Err(Error::InvalidData(format!(
                "mode '{}' has invalid speed {speed}",
                self.name
            )))
        }
    }

    /// Links this mode may traverse
    pub fn filter(&self, registry: &ModeRegistry) -> UseMask {
        if self.uses.iter().any(|tag| ModeRegistry::is_all(tag.trim())) || self.uses.is_empty() {
            return UseMask::ALL;
        }
        self.uses
            .iter()
            .fold(UseMask::NONE, |mask, tag| mask.union(registry.mask_of(tag)))
    }

    /// Travel time in minutes on `link` for this mode
    pub fn travel_time(&self, link: &Link, registry: &ModeRegistry) -> Cost {
        match &self.speed {
            SpeedRule::Network => link.fftt,
            SpeedRule::Uniform { speed } => link.length / speed * 60.0,
            SpeedRule::Access { tag, speed } => {
                let uses = link.allowed_uses;
                if !uses.is_all() && uses.intersects(registry.mask_of(tag)) {
                    link.length / speed * 60.0
                } else {
                    link.fftt
                }
            }
        }
    }
}
