//! Snapshot structs handed to the radius engine by the host.
//!
//! [`AgentState`] and [`EnvironmentSnapshot`] are produced fresh by the host
//! before every computation and are never cached by the engine.
//! [`RadiusBreakdown`] flows the other way: it is derived per call for
//! diagnostics display and carries no identity beyond that call.

use serde::{Deserialize, Serialize};

use crate::enums::{Biome, ExploreMode};

// ---------------------------------------------------------------------------
// Geometry and colour
// ---------------------------------------------------------------------------

/// A position in world space. `y` is the vertical axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    /// East-west coordinate.
    pub x: f32,
    /// Elevation.
    pub y: f32,
    /// North-south coordinate.
    pub z: f32,
}

impl Vec3 {
    /// Create a position from its three components.
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Distance between two positions projected onto the ground plane.
    ///
    /// Elevation is ignored, so an agent on a deck above a pilot still
    /// counts as close to them.
    pub fn horizontal_distance(self, other: Self) -> f32 {
        (self.x - other.x).hypot(self.z - other.z)
    }
}

/// A linear RGBA colour. Channels above 1.0 are allowed (HDR lighting).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    /// Red channel.
    pub r: f32,
    /// Green channel.
    pub g: f32,
    /// Blue channel.
    pub b: f32,
    /// Alpha channel. Never participates in visibility.
    #[serde(default = "default_alpha")]
    pub a: f32,
}

impl Color {
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);

    /// Create an opaque colour.
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Scale the colour channels by `factor`, leaving alpha untouched.
    pub const fn scaled(self, factor: f32) -> Self {
        Self {
            r: self.r * factor,
            g: self.g * factor,
            b: self.b * factor,
            a: self.a,
        }
    }

    /// Euclidean length of the RGB channels.
    pub fn magnitude(self) -> f32 {
        self.b.mul_add(self.b, self.r.mul_add(self.r, self.g * self.g)).sqrt()
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

const fn default_alpha() -> f32 {
    1.0
}

// ---------------------------------------------------------------------------
// Agent state
// ---------------------------------------------------------------------------

/// The agent whose surroundings are being revealed, or one of its neighbours.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AgentState {
    /// World position. Only elevation and horizontal proximity matter.
    #[serde(default)]
    pub position: Vec3,
    /// Biome at the agent's position.
    #[serde(default)]
    pub biome: Biome,
    /// Whether the agent is inside a dungeon, building, or similar.
    #[serde(default)]
    pub in_interior: bool,
    /// Whether the agent is attached to a piloted vessel (at the helm).
    #[serde(default)]
    pub attached_to_ship: bool,
}

// ---------------------------------------------------------------------------
// Environment snapshot
// ---------------------------------------------------------------------------

/// Lighting and weather conditions sampled at the same instant as the agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvironmentSnapshot {
    /// Colour of the sun or moon light.
    pub directional_color: Color,
    /// Intensity multiplier applied to `directional_color`.
    pub directional_intensity: f32,
    /// Ambient light colour.
    pub ambient_color: Color,
    /// Exponential fog density. Typically 0.001 to 0.15.
    pub fog_density: f32,
    /// Names of the particle systems active in the current weather.
    pub particle_systems: Vec<String>,
    /// Fraction of the day elapsed, in `[0, 1)`.
    pub time_of_day: f32,
    /// Sea level elevation used as the altitude reference.
    pub water_level: f32,
}

impl Default for EnvironmentSnapshot {
    /// A clear midday: full white sun, no fog, no weather.
    ///
    /// The sun's magnitude is `sqrt(3)`, brighter than the magnitude-1
    /// light that leaves the lighting factor at zero.
    fn default() -> Self {
        Self {
            directional_color: Color::rgb(1.0, 1.0, 1.0),
            directional_intensity: 1.0,
            ambient_color: Color::BLACK,
            fog_density: 0.0,
            particle_systems: Vec::new(),
            time_of_day: 0.5,
            water_level: 0.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Radius breakdown
// ---------------------------------------------------------------------------

/// Per-call breakdown of how a reveal radius was assembled.
///
/// Purely for display. Every factor is a signed contribution to
/// `total_multiplier`; interior computations carry zero for all of them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RadiusBreakdown {
    /// Mode the agent was classified into.
    pub mode: ExploreMode,
    /// Anchor radius for the mode before environmental factors.
    pub base_radius: f32,
    /// Lighting contribution.
    pub lighting: f32,
    /// Weather contribution (never positive).
    pub weather: f32,
    /// Altitude contribution (never negative).
    pub altitude: f32,
    /// Biome and forest cover contribution.
    pub biome: f32,
    /// Multiplier applied to `base_radius`.
    pub total_multiplier: f32,
    /// Radius returned to the host, after clamping.
    pub final_radius: f32,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn horizontal_distance_ignores_elevation() {
        let a = Vec3::new(0.0, 0.0, 0.0);
        let b = Vec3::new(3.0, 250.0, 4.0);
        assert!((a.horizontal_distance(b) - 5.0).abs() < 1e-6);
    }

    #[test]
    fn color_magnitude_ignores_alpha() {
        let opaque = Color::rgb(0.6, 0.8, 0.0);
        let clear = Color { a: 0.0, ..opaque };
        assert!((opaque.magnitude() - 1.0).abs() < 1e-6);
        assert!((opaque.magnitude() - clear.magnitude()).abs() < f32::EPSILON);
    }

    #[test]
    fn scaled_keeps_alpha() {
        let c = Color { r: 1.0, g: 0.5, b: 0.25, a: 0.3 }.scaled(2.0);
        assert!((c.r - 2.0).abs() < f32::EPSILON);
        assert!((c.b - 0.5).abs() < f32::EPSILON);
        assert!((c.a - 0.3).abs() < f32::EPSILON);
    }

    #[test]
    fn environment_deserializes_with_defaults() {
        let env: EnvironmentSnapshot =
            serde_json::from_str(r#"{"fog_density": 0.02, "particle_systems": ["Rain"]}"#)
                .unwrap();
        assert!((env.fog_density - 0.02).abs() < f32::EPSILON);
        assert_eq!(env.particle_systems, vec!["Rain".to_owned()]);
        assert!((env.directional_intensity - 1.0).abs() < f32::EPSILON);
        assert!((env.time_of_day - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn default_sun_is_brighter_than_unit_light() {
        let env = EnvironmentSnapshot::default();
        let lit = env.directional_color.scaled(env.directional_intensity);
        assert!((lit.magnitude() - 3.0_f32.sqrt()).abs() < 1e-6);
        assert!(env.ambient_color.magnitude().abs() < f32::EPSILON);
    }

    #[test]
    fn agent_state_defaults_to_open_land() {
        let agent = AgentState::default();
        assert!(!agent.in_interior);
        assert!(!agent.attached_to_ship);
        assert_eq!(agent.biome, Biome::None);
    }
}
