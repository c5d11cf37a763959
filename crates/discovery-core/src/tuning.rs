//! Formula coefficients for the factor calculators.
//!
//! Every number the factor formulas depend on, other than the eight bounded
//! parameters, lives here as data. Alternate tunings (a different interior
//! radius, a tighter vessel detection range, other forest penalties) are a
//! change to the `tuning` section of the settings file, not a code change.
//!
//! # Defaults
//!
//! | Biome        | In forest | Open |
//! |--------------|-----------|------|
//! | Swamp        | -0.8      | 0.1  |
//! | Black Forest | -0.6      | 0.2  |
//! | Meadows      | -0.4      | 0.3  |
//!
//! | Particle | Weight |
//! |----------|--------|
//! | Mist     | 0.5    |
//! | Storm    | 0.3    |
//! | Rain     | 0.2    |
//! | Snow     | 0.7    |

use serde::{Deserialize, Serialize};

use discovery_types::{Biome, ParticleEffect};

/// Coefficient tables and constants used by the radius engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tuning {
    /// Radius returned while the agent is in an interior.
    #[serde(default = "default_interior_radius")]
    pub interior_radius: f32,

    /// Horizontal range within which a piloted vessel puts an agent at sea.
    #[serde(default = "default_vessel_detection_radius")]
    pub vessel_detection_radius: f32,

    /// Baseline added to the factor sum before it scales the base radius.
    ///
    /// Defaults to 0.0: the total multiplier is the plain factor sum. With
    /// 1.0, neutral conditions reveal exactly the base radius.
    #[serde(default = "default_neutral_multiplier")]
    pub neutral_multiplier: f32,

    /// Scale applied to fog density before it joins the particle score.
    #[serde(default = "default_fog_scale")]
    pub fog_scale: f32,

    /// Upper bound of the combined fog and particle visibility loss.
    #[serde(default = "default_max_visibility_loss")]
    pub max_visibility_loss: f32,

    /// Occlusion weight of each particle effect.
    #[serde(default = "default_particles")]
    pub particles: Vec<ParticleWeight>,

    /// Altitude factor constants.
    #[serde(default)]
    pub altitude: AltitudeTuning,

    /// Forest cover coefficients per biome.
    #[serde(default = "default_biomes")]
    pub biomes: Vec<BiomeCover>,
}

impl Tuning {
    /// Weight of `effect`, or 0.0 if the table does not list it.
    pub fn particle_weight(&self, effect: ParticleEffect) -> f32 {
        self.particles
            .iter()
            .find(|entry| entry.effect == effect)
            .map_or(0.0, |entry| entry.weight)
    }

    /// Forest cover coefficients for `biome`, if the table lists it.
    pub fn biome_cover(&self, biome: Biome) -> Option<&BiomeCover> {
        self.biomes.iter().find(|entry| entry.biome == biome)
    }
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            interior_radius: default_interior_radius(),
            vessel_detection_radius: default_vessel_detection_radius(),
            neutral_multiplier: default_neutral_multiplier(),
            fog_scale: default_fog_scale(),
            max_visibility_loss: default_max_visibility_loss(),
            particles: default_particles(),
            altitude: AltitudeTuning::default(),
            biomes: default_biomes(),
        }
    }
}

/// Occlusion weight of one particle effect.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParticleWeight {
    /// The effect.
    pub effect: ParticleEffect,
    /// How strongly it occludes vision.
    pub weight: f32,
}

/// Altitude factor constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AltitudeTuning {
    /// Height above water that adds one full multiplier unit.
    #[serde(default = "default_units_per_step")]
    pub units_per_step: f32,

    /// Height above water beyond which altitude stops counting.
    #[serde(default = "default_max_height")]
    pub max_height: f32,
}

impl Default for AltitudeTuning {
    fn default() -> Self {
        Self {
            units_per_step: default_units_per_step(),
            max_height: default_max_height(),
        }
    }
}

/// Signed coefficients for one biome.
///
/// `in_forest` applies when the forest lookup reports cover at the agent's
/// position, `open` otherwise. Both are scaled by the forest weight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BiomeCover {
    /// The biome.
    pub biome: Biome,
    /// Coefficient under forest cover.
    pub in_forest: f32,
    /// Coefficient in open terrain.
    pub open: f32,
}

// ---------------------------------------------------------------------------
// Default value functions (serde default requires named functions)
// ---------------------------------------------------------------------------

/// The lowest value `MinimumRadius` may take.
const fn default_interior_radius() -> f32 {
    10.0
}

const fn default_vessel_detection_radius() -> f32 {
    30.0
}

const fn default_neutral_multiplier() -> f32 {
    0.0
}

const fn default_fog_scale() -> f32 {
    10.0
}

const fn default_max_visibility_loss() -> f32 {
    1.5
}

const fn default_units_per_step() -> f32 {
    100.0
}

const fn default_max_height() -> f32 {
    1000.0
}

fn default_particles() -> Vec<ParticleWeight> {
    vec![
        ParticleWeight {
            effect: ParticleEffect::Mist,
            weight: 0.5,
        },
        ParticleWeight {
            effect: ParticleEffect::Storm,
            weight: 0.3,
        },
        ParticleWeight {
            effect: ParticleEffect::Rain,
            weight: 0.2,
        },
        ParticleWeight {
            effect: ParticleEffect::Snow,
            weight: 0.7,
        },
    ]
}

fn default_biomes() -> Vec<BiomeCover> {
    vec![
        BiomeCover {
            biome: Biome::Swamp,
            in_forest: -0.8,
            open: 0.1,
        },
        BiomeCover {
            biome: Biome::BlackForest,
            in_forest: -0.6,
            open: 0.2,
        },
        BiomeCover {
            biome: Biome::Meadows,
            in_forest: -0.4,
            open: 0.3,
        },
    ]
}
