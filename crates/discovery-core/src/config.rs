//! Bounded configuration and settings file loading.
//!
//! The engine is driven by eight named floating-point parameters. Each has a
//! fixed valid range and default, and every write is clamped into range
//! rather than rejected. [`BoundedConfig`] is the process-wide store: it is
//! shared behind an [`Arc`](std::sync::Arc) between the host simulation loop
//! and whatever settings provider pushes updates, so each value lives in an
//! atomic cell and a single [`BoundedConfig::set`] is one atomic store of an
//! already-clamped value.
//!
//! The canonical settings file is `discovery-config.yaml`. [`SettingsFile`]
//! mirrors its structure; values in the file may be out of range and are
//! clamped when the store is built from it.
//!
//! | Parameter                  | Range       | Default |
//! |----------------------------|-------------|---------|
//! | `MinimumRadius`            | 10 - 200    | 35      |
//! | `MaximumRadius`            | 200 - 1000  | 1000    |
//! | `LandExploreRadius`        | 0 - 1000    | 150     |
//! | `SeaExploreRadius`         | 0 - 1000    | 200     |
//! | `AltitudeRadiusMultiplier` | 0 - 2       | 1.5     |
//! | `ForestRadiusMultiplier`   | 0 - 1       | 1.0     |
//! | `DaylightRadiusMultiplier` | 0 - 1       | 0.3     |
//! | `WeatherRadiusMultiplier`  | 0 - 1       | 0.3     |

use std::fmt;
use std::path::Path;
use std::sync::atomic::{AtomicU32, Ordering};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::tuning::Tuning;

/// Errors that can occur when loading or addressing configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// A parameter name that is not one of the declared parameters.
    ///
    /// This is an integration error, never a user-facing one: callers are
    /// expected to abort rather than fall back to a default.
    #[error("unknown configuration parameter: {name}")]
    UnknownParameter {
        /// The name that failed to resolve.
        name: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

// ---------------------------------------------------------------------------
// Parameters
// ---------------------------------------------------------------------------

/// One of the declared configuration parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Parameter {
    /// Absolute floor of the computed radius.
    MinimumRadius,
    /// Absolute ceiling of the computed radius.
    MaximumRadius,
    /// Base radius on land.
    LandExploreRadius,
    /// Base radius aboard a vessel.
    SeaExploreRadius,
    /// Weight of the altitude factor.
    AltitudeRadiusMultiplier,
    /// Weight of the biome and forest factor.
    ForestRadiusMultiplier,
    /// Weight of the lighting factor.
    DaylightRadiusMultiplier,
    /// Weight of the weather factor.
    WeatherRadiusMultiplier,
}

/// Valid range and default of a [`Parameter`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterBounds {
    /// Smallest storable value.
    pub min: f32,
    /// Largest storable value.
    pub max: f32,
    /// Value used before any write, and in place of NaN writes.
    pub default: f32,
}

impl Parameter {
    /// Every declared parameter.
    pub const ALL: [Self; 8] = [
        Self::MinimumRadius,
        Self::MaximumRadius,
        Self::LandExploreRadius,
        Self::SeaExploreRadius,
        Self::AltitudeRadiusMultiplier,
        Self::ForestRadiusMultiplier,
        Self::DaylightRadiusMultiplier,
        Self::WeatherRadiusMultiplier,
    ];

    /// Canonical name, as used by settings providers.
    pub const fn name(self) -> &'static str {
        match self {
            Self::MinimumRadius => "MinimumRadius",
            Self::MaximumRadius => "MaximumRadius",
            Self::LandExploreRadius => "LandExploreRadius",
            Self::SeaExploreRadius => "SeaExploreRadius",
            Self::AltitudeRadiusMultiplier => "AltitudeRadiusMultiplier",
            Self::ForestRadiusMultiplier => "ForestRadiusMultiplier",
            Self::DaylightRadiusMultiplier => "DaylightRadiusMultiplier",
            Self::WeatherRadiusMultiplier => "WeatherRadiusMultiplier",
        }
    }

    /// Declared range and default.
    pub const fn bounds(self) -> ParameterBounds {
        let (min, max, default) = match self {
            Self::MinimumRadius => (10.0, 200.0, 35.0),
            Self::MaximumRadius => (200.0, 1000.0, 1000.0),
            Self::LandExploreRadius => (0.0, 1000.0, 150.0),
            Self::SeaExploreRadius => (0.0, 1000.0, 200.0),
            Self::AltitudeRadiusMultiplier => (0.0, 2.0, 1.5),
            Self::ForestRadiusMultiplier => (0.0, 1.0, 1.0),
            Self::DaylightRadiusMultiplier | Self::WeatherRadiusMultiplier => (0.0, 1.0, 0.3),
        };
        ParameterBounds { min, max, default }
    }

    /// Resolve a canonical parameter name.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownParameter`] if `name` is not declared.
    pub fn from_name(name: &str) -> Result<Self, ConfigError> {
        Self::ALL
            .into_iter()
            .find(|p| p.name() == name)
            .ok_or_else(|| ConfigError::UnknownParameter {
                name: name.to_owned(),
            })
    }

    /// Clamp `value` into this parameter's range.
    ///
    /// NaN has no meaningful position in the range and maps to the default.
    pub fn clamp(self, value: f32) -> f32 {
        let bounds = self.bounds();
        if value.is_nan() {
            bounds.default
        } else {
            value.clamp(bounds.min, bounds.max)
        }
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Bounded store
// ---------------------------------------------------------------------------

/// Process-wide parameter store with a clamp-on-write invariant.
///
/// Each value is an `f32` kept as raw bits in an [`AtomicU32`]. Readers on
/// the simulation loop never block on a concurrent settings update; a
/// computation that reads several parameters may observe some old and
/// some new values, which is acceptable because every call treats the
/// store as a momentary snapshot.
#[derive(Debug)]
pub struct BoundedConfig {
    minimum_radius: AtomicU32,
    maximum_radius: AtomicU32,
    land_explore_radius: AtomicU32,
    sea_explore_radius: AtomicU32,
    altitude_radius_multiplier: AtomicU32,
    forest_radius_multiplier: AtomicU32,
    daylight_radius_multiplier: AtomicU32,
    weather_radius_multiplier: AtomicU32,
}

impl BoundedConfig {
    /// Create a store holding every parameter's default.
    pub fn new() -> Self {
        let cell = |p: Parameter| AtomicU32::new(p.bounds().default.to_bits());
        Self {
            minimum_radius: cell(Parameter::MinimumRadius),
            maximum_radius: cell(Parameter::MaximumRadius),
            land_explore_radius: cell(Parameter::LandExploreRadius),
            sea_explore_radius: cell(Parameter::SeaExploreRadius),
            altitude_radius_multiplier: cell(Parameter::AltitudeRadiusMultiplier),
            forest_radius_multiplier: cell(Parameter::ForestRadiusMultiplier),
            daylight_radius_multiplier: cell(Parameter::DaylightRadiusMultiplier),
            weather_radius_multiplier: cell(Parameter::WeatherRadiusMultiplier),
        }
    }

    /// Create a store from the values in a settings file, clamping each.
    pub fn from_settings(settings: &SettingsFile) -> Self {
        let config = Self::new();
        for (parameter, value) in settings.parameter_values() {
            config.set(parameter, value);
        }
        config
    }

    const fn cell(&self, parameter: Parameter) -> &AtomicU32 {
        match parameter {
            Parameter::MinimumRadius => &self.minimum_radius,
            Parameter::MaximumRadius => &self.maximum_radius,
            Parameter::LandExploreRadius => &self.land_explore_radius,
            Parameter::SeaExploreRadius => &self.sea_explore_radius,
            Parameter::AltitudeRadiusMultiplier => &self.altitude_radius_multiplier,
            Parameter::ForestRadiusMultiplier => &self.forest_radius_multiplier,
            Parameter::DaylightRadiusMultiplier => &self.daylight_radius_multiplier,
            Parameter::WeatherRadiusMultiplier => &self.weather_radius_multiplier,
        }
    }

    /// Current stored value.
    pub fn get(&self, parameter: Parameter) -> f32 {
        f32::from_bits(self.cell(parameter).load(Ordering::Acquire))
    }

    /// Store `value` clamped into range and return what was stored.
    ///
    /// Never fails. Out-of-range values are expected (for example from a
    /// remote source mid-update) and are logged at debug level only.
    pub fn set(&self, parameter: Parameter, value: f32) -> f32 {
        let stored = parameter.clamp(value);
        if value.is_nan() {
            warn!(
                parameter = parameter.name(),
                stored, "NaN written to configuration, using default"
            );
        } else {
            let bounds = parameter.bounds();
            if value < bounds.min || value > bounds.max {
                debug!(
                    parameter = parameter.name(),
                    requested = value,
                    stored,
                    "configuration write clamped into range"
                );
            }
        }
        self.cell(parameter).store(stored.to_bits(), Ordering::Release);
        stored
    }

    /// Restore a parameter to its default.
    pub fn reset(&self, parameter: Parameter) {
        self.set(parameter, parameter.bounds().default);
    }

    /// Read a parameter by its canonical name.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownParameter`] if `name` is not declared.
    pub fn get_by_name(&self, name: &str) -> Result<f32, ConfigError> {
        Ok(self.get(Parameter::from_name(name)?))
    }

    /// Write a parameter by its canonical name, returning the stored value.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownParameter`] if `name` is not declared.
    pub fn set_by_name(&self, name: &str, value: f32) -> Result<f32, ConfigError> {
        Ok(self.set(Parameter::from_name(name)?, value))
    }

    /// Read every parameter once into a plain value.
    pub fn snapshot(&self) -> ConfigSnapshot {
        ConfigSnapshot {
            minimum_radius: self.get(Parameter::MinimumRadius),
            maximum_radius: self.get(Parameter::MaximumRadius),
            land_explore_radius: self.get(Parameter::LandExploreRadius),
            sea_explore_radius: self.get(Parameter::SeaExploreRadius),
            altitude_radius_multiplier: self.get(Parameter::AltitudeRadiusMultiplier),
            forest_radius_multiplier: self.get(Parameter::ForestRadiusMultiplier),
            daylight_radius_multiplier: self.get(Parameter::DaylightRadiusMultiplier),
            weather_radius_multiplier: self.get(Parameter::WeatherRadiusMultiplier),
        }
    }
}

impl Default for BoundedConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// A momentary copy of every parameter, each within its declared range.
///
/// Only constructible from defaults, from a [`BoundedConfig`], or through
/// [`ConfigSnapshot::with`], all of which clamp.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConfigSnapshot {
    minimum_radius: f32,
    maximum_radius: f32,
    land_explore_radius: f32,
    sea_explore_radius: f32,
    altitude_radius_multiplier: f32,
    forest_radius_multiplier: f32,
    daylight_radius_multiplier: f32,
    weather_radius_multiplier: f32,
}

impl ConfigSnapshot {
    /// Value of `parameter` in this snapshot.
    pub const fn get(&self, parameter: Parameter) -> f32 {
        match parameter {
            Parameter::MinimumRadius => self.minimum_radius,
            Parameter::MaximumRadius => self.maximum_radius,
            Parameter::LandExploreRadius => self.land_explore_radius,
            Parameter::SeaExploreRadius => self.sea_explore_radius,
            Parameter::AltitudeRadiusMultiplier => self.altitude_radius_multiplier,
            Parameter::ForestRadiusMultiplier => self.forest_radius_multiplier,
            Parameter::DaylightRadiusMultiplier => self.daylight_radius_multiplier,
            Parameter::WeatherRadiusMultiplier => self.weather_radius_multiplier,
        }
    }

    /// Copy of this snapshot with `parameter` replaced by the clamped `value`.
    #[must_use]
    pub fn with(mut self, parameter: Parameter, value: f32) -> Self {
        let value = parameter.clamp(value);
        let slot = match parameter {
            Parameter::MinimumRadius => &mut self.minimum_radius,
            Parameter::MaximumRadius => &mut self.maximum_radius,
            Parameter::LandExploreRadius => &mut self.land_explore_radius,
            Parameter::SeaExploreRadius => &mut self.sea_explore_radius,
            Parameter::AltitudeRadiusMultiplier => &mut self.altitude_radius_multiplier,
            Parameter::ForestRadiusMultiplier => &mut self.forest_radius_multiplier,
            Parameter::DaylightRadiusMultiplier => &mut self.daylight_radius_multiplier,
            Parameter::WeatherRadiusMultiplier => &mut self.weather_radius_multiplier,
        };
        *slot = value;
        self
    }
}

impl Default for ConfigSnapshot {
    fn default() -> Self {
        BoundedConfig::new().snapshot()
    }
}

// ---------------------------------------------------------------------------
// Settings file
// ---------------------------------------------------------------------------

/// Top-level settings file.
///
/// Mirrors the structure of `discovery-config.yaml`. Every section is
/// optional and falls back to defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SettingsFile {
    /// Lock and other provider-level flags.
    #[serde(default)]
    pub general: GeneralSettings,

    /// Radius bounds and base radii.
    #[serde(default)]
    pub exploration_radius: RadiusSettings,

    /// Factor weights.
    #[serde(default)]
    pub multipliers: MultiplierSettings,

    /// Diagnostics display channels.
    #[serde(default)]
    pub display: DisplayChannels,

    /// Formula coefficients.
    #[serde(default)]
    pub tuning: Tuning,
}

impl SettingsFile {
    /// Load settings from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse settings from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let settings: Self = serde_yml::from_str(yaml)?;
        Ok(settings)
    }

    /// Raw (unclamped) value of every parameter, as written in the file.
    pub const fn parameter_values(&self) -> [(Parameter, f32); 8] {
        let radius = &self.exploration_radius;
        let multipliers = &self.multipliers;
        [
            (Parameter::MinimumRadius, radius.minimum_radius),
            (Parameter::MaximumRadius, radius.maximum_radius),
            (Parameter::LandExploreRadius, radius.land_explore_radius),
            (Parameter::SeaExploreRadius, radius.sea_explore_radius),
            (
                Parameter::AltitudeRadiusMultiplier,
                multipliers.altitude_radius_multiplier,
            ),
            (
                Parameter::ForestRadiusMultiplier,
                multipliers.forest_radius_multiplier,
            ),
            (
                Parameter::DaylightRadiusMultiplier,
                multipliers.daylight_radius_multiplier,
            ),
            (
                Parameter::WeatherRadiusMultiplier,
                multipliers.weather_radius_multiplier,
            ),
        ]
    }
}

/// Provider-level flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneralSettings {
    /// When set, only the authoritative source may change values.
    #[serde(default = "default_true")]
    pub lock_configuration: bool,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            lock_configuration: true,
        }
    }
}

/// Radius bounds and per-mode base radii.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadiusSettings {
    /// Absolute floor of the computed radius.
    #[serde(default = "default_minimum_radius")]
    pub minimum_radius: f32,

    /// Absolute ceiling of the computed radius.
    #[serde(default = "default_maximum_radius")]
    pub maximum_radius: f32,

    /// Base radius on land.
    #[serde(default = "default_land_explore_radius")]
    pub land_explore_radius: f32,

    /// Base radius aboard a vessel.
    #[serde(default = "default_sea_explore_radius")]
    pub sea_explore_radius: f32,
}

impl Default for RadiusSettings {
    fn default() -> Self {
        Self {
            minimum_radius: default_minimum_radius(),
            maximum_radius: default_maximum_radius(),
            land_explore_radius: default_land_explore_radius(),
            sea_explore_radius: default_sea_explore_radius(),
        }
    }
}

/// Factor weights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiplierSettings {
    /// Weight of the altitude factor.
    #[serde(default = "default_altitude_radius_multiplier")]
    pub altitude_radius_multiplier: f32,

    /// Weight of the biome and forest factor.
    #[serde(default = "default_forest_radius_multiplier")]
    pub forest_radius_multiplier: f32,

    /// Weight of the lighting factor.
    #[serde(default = "default_daylight_radius_multiplier")]
    pub daylight_radius_multiplier: f32,

    /// Weight of the weather factor.
    #[serde(default = "default_weather_radius_multiplier")]
    pub weather_radius_multiplier: f32,
}

impl Default for MultiplierSettings {
    fn default() -> Self {
        Self {
            altitude_radius_multiplier: default_altitude_radius_multiplier(),
            forest_radius_multiplier: default_forest_radius_multiplier(),
            daylight_radius_multiplier: default_daylight_radius_multiplier(),
            weather_radius_multiplier: default_weather_radius_multiplier(),
        }
    }
}

/// Which diagnostics the host should display.
///
/// Toggling a channel never changes what the engine computes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayChannels {
    /// Show the current radius.
    #[serde(default)]
    pub current_radius: bool,

    /// Show the per-factor breakdown.
    #[serde(default)]
    pub variables: bool,

    /// Show the raw debug snapshot (time of day, mode, altitude).
    #[serde(default)]
    pub debug: bool,
}

impl DisplayChannels {
    /// Every channel enabled.
    pub const ALL: Self = Self {
        current_radius: true,
        variables: true,
        debug: true,
    };

    /// Whether at least one channel is enabled.
    pub const fn any(self) -> bool {
        self.current_radius || self.variables || self.debug
    }
}

// ---------------------------------------------------------------------------
// Default value functions (serde default requires named functions)
// ---------------------------------------------------------------------------

const fn default_minimum_radius() -> f32 {
    35.0
}

const fn default_maximum_radius() -> f32 {
    1000.0
}

const fn default_land_explore_radius() -> f32 {
    150.0
}

const fn default_sea_explore_radius() -> f32 {
    200.0
}

const fn default_altitude_radius_multiplier() -> f32 {
    1.5
}

const fn default_forest_radius_multiplier() -> f32 {
    1.0
}

const fn default_daylight_radius_multiplier() -> f32 {
    0.3
}

const fn default_weather_radius_multiplier() -> f32 {
    0.3
}

const fn default_true() -> bool {
    true
}
