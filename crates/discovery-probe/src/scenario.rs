//! Scenario files: a sequence of host snapshots to run the engine against.
//!
//! A scenario stands in for the host. Each tick carries the agent, its
//! neighbours, the environment, and the forest patches around it, plus an
//! optional settings update delivered before the tick is computed (as a
//! synchronised remote update would arrive mid-session).
//!
//! ```yaml
//! ticks:
//!   - label: meadows at noon
//!     agent:
//!       position: { x: 0, y: 32, z: 0 }
//!       biome: meadows
//!     environment:
//!       directional_color: { r: 1, g: 0.95, b: 0.9 }
//!       directional_intensity: 0.6
//!       water_level: 30
//!     forest_patches:
//!       - { x: 120, z: 40, radius: 60 }
//!     settings_update:
//!       origin: client
//!       values:
//!         MaximumRadius: 5000
//! ```

use std::path::Path;

use discovery_core::{ForestCover, SettingsUpdate, SyncOrigin};
use discovery_types::{AgentState, EnvironmentSnapshot, Vec3};
use serde::Deserialize;

use crate::error::ProbeError;

/// A full scenario.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Scenario {
    /// Ticks to compute, in order.
    #[serde(default)]
    pub ticks: Vec<ScenarioTick>,
}

impl Scenario {
    /// Load a scenario from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::ScenarioIo`] if the file cannot be read, or
    /// [`ProbeError::ScenarioYaml`] if it is not a valid scenario.
    pub fn from_file(path: &Path) -> Result<Self, ProbeError> {
        let display = path.display().to_string();
        let contents = std::fs::read_to_string(path).map_err(|source| ProbeError::ScenarioIo {
            path: display.clone(),
            source,
        })?;
        Self::parse(&contents).map_err(|source| ProbeError::ScenarioYaml {
            path: display,
            source,
        })
    }

    /// Parse a scenario from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns the YAML error if the string is not a valid scenario.
    pub fn parse(yaml: &str) -> Result<Self, serde_yml::Error> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yml::from_str(yaml)
    }

    /// A single tick: an agent standing at sea level on open land at noon.
    pub fn builtin() -> Self {
        Self {
            ticks: vec![ScenarioTick {
                label: "open land at noon".to_owned(),
                agent: AgentState::default(),
                environment: EnvironmentSnapshot::default(),
                nearby: Vec::new(),
                forest_patches: Vec::new(),
                settings_update: None,
            }],
        }
    }
}

/// One host update.
#[derive(Debug, Clone, Deserialize)]
pub struct ScenarioTick {
    /// Free-form label used in logs.
    #[serde(default)]
    pub label: String,

    /// The agent being revealed around.
    #[serde(default)]
    pub agent: AgentState,

    /// Environment at the agent.
    #[serde(default)]
    pub environment: EnvironmentSnapshot,

    /// Other agents nearby.
    #[serde(default)]
    pub nearby: Vec<AgentState>,

    /// Circular forest patches on the ground plane.
    #[serde(default)]
    pub forest_patches: Vec<ForestPatch>,

    /// Settings update delivered before this tick.
    #[serde(default)]
    pub settings_update: Option<RemoteUpdate>,
}

/// A settings batch and the source it claims to come from.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteUpdate {
    /// Where the batch came from.
    pub origin: SyncOrigin,
    /// Named parameter values.
    pub values: SettingsUpdate,
}

/// A circle of forest cover on the ground plane.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ForestPatch {
    /// Centre east-west coordinate.
    pub x: f32,
    /// Centre north-south coordinate.
    pub z: f32,
    /// Patch radius.
    pub radius: f32,
}

/// Forest lookup over a tick's patches.
#[derive(Debug, Clone, Copy)]
pub struct PatchForest<'a> {
    patches: &'a [ForestPatch],
}

impl<'a> PatchForest<'a> {
    /// Wrap a list of patches.
    pub const fn new(patches: &'a [ForestPatch]) -> Self {
        Self { patches }
    }
}

impl ForestCover for PatchForest<'_> {
    fn in_forest(&self, position: Vec3) -> bool {
        self.patches.iter().any(|patch| {
            position.horizontal_distance(Vec3::new(patch.x, position.y, patch.z)) <= patch.radius
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use discovery_types::Biome;

    use super::*;

    #[test]
    fn parse_scenario_with_update() {
        let yaml = r"
ticks:
  - label: swamp edge
    agent:
      position: { x: 10, y: 35, z: 10 }
      biome: swamp
    environment:
      fog_density: 0.05
      particle_systems: [Rain]
      water_level: 30
    forest_patches:
      - { x: 0, z: 0, radius: 20 }
    settings_update:
      origin: client
      values:
        MaximumRadius: 5000
  - label: second
";
        let scenario = Scenario::parse(yaml).unwrap();
        assert_eq!(scenario.ticks.len(), 2);
        let first = scenario.ticks.first().unwrap();
        assert_eq!(first.agent.biome, Biome::Swamp);
        assert_eq!(first.environment.particle_systems, vec!["Rain".to_owned()]);
        let update = first.settings_update.as_ref().unwrap();
        assert_eq!(update.origin, SyncOrigin::Client);
        assert_eq!(update.values.len(), 1);
        assert!(scenario.ticks.get(1).unwrap().settings_update.is_none());
    }

    #[test]
    fn empty_scenario_has_no_ticks() {
        assert!(Scenario::parse("").unwrap().ticks.is_empty());
    }

    #[test]
    fn patch_forest_uses_ground_distance() {
        let patches = [ForestPatch {
            x: 0.0,
            z: 0.0,
            radius: 20.0,
        }];
        let forest = PatchForest::new(&patches);
        assert!(forest.in_forest(Vec3::new(10.0, 300.0, 10.0)));
        assert!(!forest.in_forest(Vec3::new(30.0, 0.0, 0.0)));
    }

    #[test]
    fn builtin_has_one_tick() {
        assert_eq!(Scenario::builtin().ticks.len(), 1);
    }
}
