//! Enumeration types for agent context and environment classification.
//!
//! Covers the terrain biomes reported by the host, the particle effects
//! that make up the current weather, and the exploration mode an agent is
//! classified into before a radius is computed.

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Biome
// ---------------------------------------------------------------------------

/// Terrain biome at the agent's position, as classified by the host.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Biome {
    /// Biome is unknown or not yet generated.
    #[default]
    None,
    /// Open grassland with scattered groves.
    Meadows,
    /// Dense conifer forest.
    BlackForest,
    /// Waterlogged lowland with thick tree cover.
    Swamp,
    /// High snowy peaks.
    Mountain,
    /// Flat open steppe.
    Plains,
    /// Open water.
    Ocean,
    /// Fog-shrouded highlands.
    Mistlands,
    /// Volcanic wasteland.
    AshLands,
    /// Frozen far north.
    DeepNorth,
}

impl Biome {
    /// Every biome variant, in declaration order.
    pub const ALL: [Self; 10] = [
        Self::None,
        Self::Meadows,
        Self::BlackForest,
        Self::Swamp,
        Self::Mountain,
        Self::Plains,
        Self::Ocean,
        Self::Mistlands,
        Self::AshLands,
        Self::DeepNorth,
    ];
}

// ---------------------------------------------------------------------------
// Particle effects
// ---------------------------------------------------------------------------

/// A weather particle effect that occludes vision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParticleEffect {
    /// Low-lying mist.
    Mist,
    /// Thunderstorm debris and lightning.
    Storm,
    /// Falling rain.
    Rain,
    /// Falling snow.
    Snow,
}

impl ParticleEffect {
    /// Effects in matching priority order.
    ///
    /// A particle system whose name contains several keywords is counted
    /// once, as the first effect in this list that matches.
    pub const MATCH_ORDER: [Self; 4] = [Self::Mist, Self::Storm, Self::Rain, Self::Snow];

    /// Lowercase keyword searched for in particle system names.
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Mist => "mist",
            Self::Storm => "storm",
            Self::Rain => "rain",
            Self::Snow => "snow",
        }
    }

    /// Classify a host particle system name.
    ///
    /// Matching is a case-insensitive substring search, so `"Rain_Heavy"`
    /// and `"SnowStorm"` both classify (the latter as [`Self::Storm`], since
    /// storm precedes snow in [`Self::MATCH_ORDER`]). Returns `None` for
    /// names that mention no known effect.
    pub fn from_name(name: &str) -> Option<Self> {
        let lowered = name.to_lowercase();
        Self::MATCH_ORDER
            .into_iter()
            .find(|effect| lowered.contains(effect.keyword()))
    }
}

// ---------------------------------------------------------------------------
// Exploration mode
// ---------------------------------------------------------------------------

/// The agent context that selects the base radius.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExploreMode {
    /// Inside a dungeon, building, or other enclosed space.
    Interior,
    /// Aboard (or riding next to the pilot of) a vessel.
    Sea,
    /// On foot in the open world.
    Land,
}

impl fmt::Display for ExploreMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Interior => "interior",
            Self::Sea => "sea",
            Self::Land => "land",
        };
        f.write_str(label)
    }
}
