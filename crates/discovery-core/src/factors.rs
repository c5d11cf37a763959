//! Environmental factor calculators.
//!
//! Each factor turns part of the agent and environment snapshot into a
//! signed contribution to the total multiplier. Factors are independent of
//! one another and are summed, not multiplied, before the sum is applied to
//! the base radius once.
//!
//! - **Lighting** -- brighter of the directional and ambient light, with a
//!   magnitude-1 light as neutral.
//! - **Weather** -- fog density plus particle effects, as a visibility loss.
//! - **Altitude** -- height above the water line. Never negative.
//! - **Biome** -- forest cover penalty or open ground bonus per biome.
//!
//! Missing data degrades to a zero contribution: an empty particle list
//! adds no loss and an unlisted biome adds nothing.

use discovery_types::{AgentState, EnvironmentSnapshot, ParticleEffect, Vec3};
use tracing::trace;

use crate::config::{ConfigSnapshot, Parameter};
use crate::tuning::Tuning;

// ---------------------------------------------------------------------------
// Forest lookup
// ---------------------------------------------------------------------------

/// Terrain query answering whether a position is under forest cover.
///
/// Implemented by the host's world generator. Closures of the form
/// `Fn(Vec3) -> bool` implement it directly.
pub trait ForestCover {
    /// Whether `position` lies inside a forest.
    fn in_forest(&self, position: Vec3) -> bool;
}

impl<F> ForestCover for F
where
    F: Fn(Vec3) -> bool,
{
    fn in_forest(&self, position: Vec3) -> bool {
        self(position)
    }
}

/// Terrain without any forest.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenTerrain;

impl ForestCover for OpenTerrain {
    fn in_forest(&self, _position: Vec3) -> bool {
        false
    }
}

/// Terrain that is forest everywhere.
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformForest;

impl ForestCover for UniformForest {
    fn in_forest(&self, _position: Vec3) -> bool {
        true
    }
}

// ---------------------------------------------------------------------------
// Factor set
// ---------------------------------------------------------------------------

/// The four factor contributions for one computation.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FactorSet {
    /// Lighting contribution.
    pub lighting: f32,
    /// Weather contribution.
    pub weather: f32,
    /// Altitude contribution.
    pub altitude: f32,
    /// Biome contribution.
    pub biome: f32,
}

impl FactorSet {
    /// Sum of the four contributions.
    pub fn sum(&self) -> f32 {
        self.lighting + self.weather + self.altitude + self.biome
    }
}

/// Evaluate every factor for one agent.
pub fn evaluate(
    agent: &AgentState,
    env: &EnvironmentSnapshot,
    forest: &dyn ForestCover,
    config: &ConfigSnapshot,
    tuning: &Tuning,
) -> FactorSet {
    let factors = FactorSet {
        lighting: lighting(env, config.get(Parameter::DaylightRadiusMultiplier)),
        weather: weather(env, config.get(Parameter::WeatherRadiusMultiplier), tuning),
        altitude: altitude(agent, env, config.get(Parameter::AltitudeRadiusMultiplier), tuning),
        biome: biome(agent, forest, config.get(Parameter::ForestRadiusMultiplier), tuning),
    };
    trace!(
        lighting = factors.lighting,
        weather = factors.weather,
        altitude = factors.altitude,
        biome = factors.biome,
        "factors evaluated"
    );
    factors
}

// ---------------------------------------------------------------------------
// Lighting
// ---------------------------------------------------------------------------

/// Brightness of the scene: the larger of the intensity-scaled directional
/// light and the ambient light.
pub fn light_magnitude(env: &EnvironmentSnapshot) -> f32 {
    let directional = env
        .directional_color
        .scaled(env.directional_intensity)
        .magnitude();
    directional.max(env.ambient_color.magnitude())
}

/// Lighting contribution: `(magnitude - 1) * weight`.
pub fn lighting(env: &EnvironmentSnapshot, weight: f32) -> f32 {
    (light_magnitude(env) - 1.0) * weight
}

// ---------------------------------------------------------------------------
// Weather
// ---------------------------------------------------------------------------

/// Summed occlusion weight of the active particle systems.
///
/// Each system counts once, as the first effect its name matches.
pub fn particle_score(env: &EnvironmentSnapshot, tuning: &Tuning) -> f32 {
    env.particle_systems
        .iter()
        .filter_map(|name| ParticleEffect::from_name(name))
        .map(|effect| tuning.particle_weight(effect))
        .sum()
}

/// Combined fog and particle visibility loss, within `[0, max_visibility_loss]`.
pub fn visibility_loss(env: &EnvironmentSnapshot, tuning: &Tuning) -> f32 {
    let raw = env
        .fog_density
        .mul_add(tuning.fog_scale, particle_score(env, tuning));
    raw.max(0.0).min(tuning.max_visibility_loss.max(0.0))
}

/// Weather contribution: `-visibility_loss * weight`. Never positive.
pub fn weather(env: &EnvironmentSnapshot, weight: f32, tuning: &Tuning) -> f32 {
    -visibility_loss(env, tuning) * weight
}

// ---------------------------------------------------------------------------
// Altitude
// ---------------------------------------------------------------------------

/// Agent elevation above the water line, within `[0, max_height]`.
pub fn height_above_water(agent: &AgentState, env: &EnvironmentSnapshot, tuning: &Tuning) -> f32 {
    let height = agent.position.y - env.water_level;
    height.max(0.0).min(tuning.altitude.max_height.max(0.0))
}

/// Altitude contribution: one weighted unit per `units_per_step` of height.
pub fn altitude(agent: &AgentState, env: &EnvironmentSnapshot, weight: f32, tuning: &Tuning) -> f32 {
    let step = tuning.altitude.units_per_step;
    if step <= 0.0 {
        return 0.0;
    }
    height_above_water(agent, env, tuning) / step * weight
}

// ---------------------------------------------------------------------------
// Biome
// ---------------------------------------------------------------------------

/// Biome contribution from the forest cover table, scaled by `weight`.
///
/// The forest lookup is only consulted for biomes the table lists.
pub fn biome(agent: &AgentState, forest: &dyn ForestCover, weight: f32, tuning: &Tuning) -> f32 {
    let Some(cover) = tuning.biome_cover(agent.biome) else {
        return 0.0;
    };
    let coefficient = if forest.in_forest(agent.position) {
        cover.in_forest
    } else {
        cover.open
    };
    coefficient * weight
}

#[cfg(test)]
mod tests {
    use discovery_types::{Biome, Color};

    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    fn unit_light() -> EnvironmentSnapshot {
        EnvironmentSnapshot {
            directional_color: Color::rgb(0.6, 0.8, 0.0),
            directional_intensity: 1.0,
            ambient_color: Color::BLACK,
            ..EnvironmentSnapshot::default()
        }
    }

    #[test]
    fn unit_magnitude_light_is_neutral() {
        assert!(close(light_magnitude(&unit_light()), 1.0));
        assert!(close(lighting(&unit_light(), 0.3), 0.0));
    }

    #[test]
    fn intensity_scales_directional_light() {
        let env = EnvironmentSnapshot {
            directional_intensity: 2.0,
            ..unit_light()
        };
        assert!(close(lighting(&env, 0.3), 0.3));
    }

    #[test]
    fn ambient_light_used_when_brighter() {
        let env = EnvironmentSnapshot {
            directional_intensity: 0.0,
            ambient_color: Color::rgb(0.0, 0.0, 0.5),
            ..unit_light()
        };
        assert!(close(light_magnitude(&env), 0.5));
        assert!(close(lighting(&env, 1.0), -0.5));
    }

    #[test]
    fn alpha_does_not_brighten() {
        let env = EnvironmentSnapshot {
            directional_color: Color {
                a: 50.0,
                ..Color::rgb(0.6, 0.8, 0.0)
            },
            ..unit_light()
        };
        assert!(close(light_magnitude(&env), 1.0));
    }

    #[test]
    fn darkness_reduces_by_full_weight() {
        let env = EnvironmentSnapshot {
            directional_intensity: 0.0,
            ..unit_light()
        };
        assert!(close(lighting(&env, 0.3), -0.3));
    }

    #[test]
    fn clear_weather_costs_nothing() {
        let tuning = Tuning::default();
        assert!(close(weather(&EnvironmentSnapshot::default(), 0.3, &tuning), 0.0));
    }

    #[test]
    fn particles_add_their_weights() {
        let tuning = Tuning::default();
        let env = EnvironmentSnapshot {
            particle_systems: vec!["Rain".to_owned(), "Mist".to_owned(), "Leaves".to_owned()],
            ..EnvironmentSnapshot::default()
        };
        assert!(close(particle_score(&env, &tuning), 0.7));
        assert!(close(weather(&env, 1.0, &tuning), -0.7));
    }

    #[test]
    fn heavy_fog_and_snow_saturate_at_max_loss() {
        let tuning = Tuning::default();
        let env = EnvironmentSnapshot {
            fog_density: 0.15,
            particle_systems: vec!["Snow".to_owned()],
            ..EnvironmentSnapshot::default()
        };
        assert!(close(visibility_loss(&env, &tuning), 1.5));
        assert!(close(weather(&env, 0.3, &tuning), -0.45));
    }

    #[test]
    fn negative_fog_never_improves_visibility() {
        let tuning = Tuning::default();
        let env = EnvironmentSnapshot {
            fog_density: -1.0,
            ..EnvironmentSnapshot::default()
        };
        assert!(close(visibility_loss(&env, &tuning), 0.0));
    }

    #[test]
    fn altitude_adds_one_unit_per_hundred() {
        let tuning = Tuning::default();
        let env = EnvironmentSnapshot {
            water_level: 30.0,
            ..EnvironmentSnapshot::default()
        };
        let agent = AgentState {
            position: Vec3::new(0.0, 230.0, 0.0),
            ..AgentState::default()
        };
        assert!(close(height_above_water(&agent, &env, &tuning), 200.0));
        assert!(close(altitude(&agent, &env, 1.5, &tuning), 3.0));
    }

    #[test]
    fn below_water_never_reduces() {
        let tuning = Tuning::default();
        let env = EnvironmentSnapshot {
            water_level: 30.0,
            ..EnvironmentSnapshot::default()
        };
        let agent = AgentState {
            position: Vec3::new(0.0, 10.0, 0.0),
            ..AgentState::default()
        };
        assert!(close(altitude(&agent, &env, 2.0, &tuning), 0.0));
    }

    #[test]
    fn altitude_is_capped() {
        let tuning = Tuning::default();
        let agent = AgentState {
            position: Vec3::new(0.0, 5000.0, 0.0),
            ..AgentState::default()
        };
        let env = EnvironmentSnapshot::default();
        assert!(close(height_above_water(&agent, &env, &tuning), 1000.0));
        assert!(close(altitude(&agent, &env, 1.0, &tuning), 10.0));
    }

    #[test]
    fn zero_step_disables_altitude() {
        let mut tuning = Tuning::default();
        tuning.altitude.units_per_step = 0.0;
        let agent = AgentState {
            position: Vec3::new(0.0, 300.0, 0.0),
            ..AgentState::default()
        };
        assert!(close(altitude(&agent, &EnvironmentSnapshot::default(), 1.0, &tuning), 0.0));
    }

    #[test]
    fn biome_table_in_forest_and_open() {
        let tuning = Tuning::default();
        let cases = [
            (Biome::Swamp, -0.8, 0.1),
            (Biome::BlackForest, -0.6, 0.2),
            (Biome::Meadows, -0.4, 0.3),
        ];
        for (b, wooded, open) in cases {
            let agent = AgentState {
                biome: b,
                ..AgentState::default()
            };
            assert!(close(biome(&agent, &UniformForest, 1.0, &tuning), wooded), "{b:?} wooded");
            assert!(close(biome(&agent, &OpenTerrain, 0.5, &tuning), open * 0.5), "{b:?} open");
        }
    }

    #[test]
    fn unlisted_biomes_contribute_nothing() {
        let tuning = Tuning::default();
        for b in [Biome::Mountain, Biome::Plains, Biome::Ocean, Biome::None] {
            let agent = AgentState {
                biome: b,
                ..AgentState::default()
            };
            assert!(close(biome(&agent, &UniformForest, 1.0, &tuning), 0.0));
        }
    }

    #[test]
    fn forest_lookup_keyed_on_position() {
        let tuning = Tuning::default();
        let forest = |p: Vec3| p.x > 100.0;
        let mut agent = AgentState {
            biome: Biome::BlackForest,
            ..AgentState::default()
        };
        assert!(close(biome(&agent, &forest, 1.0, &tuning), 0.2));
        agent.position.x = 150.0;
        assert!(close(biome(&agent, &forest, 1.0, &tuning), -0.6));
    }

    #[test]
    fn factor_set_sums() {
        let set = FactorSet {
            lighting: 0.1,
            weather: -0.2,
            altitude: 0.5,
            biome: 0.3,
        };
        assert!(close(set.sum(), 0.7));
    }
}
