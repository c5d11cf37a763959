//! Reveal radius engine for map discovery.
//!
//! Computes, once per terrain update, the radius around an agent within
//! which the host marks map territory as explored. The radius follows the
//! agent's context (interior, sea, land) and the environment (light,
//! weather, altitude, forest cover), and always stays within the
//! administrator-configured bounds.
//!
//! # Modules
//!
//! - [`config`] -- Bounded parameter store and settings file loading.
//! - [`tuning`] -- Formula coefficients kept as data.
//! - [`classifier`] -- Exploration mode and base radius selection.
//! - [`factors`] -- Lighting, weather, altitude, and biome factors.
//! - [`radius`] -- [`compute_reveal_radius`] and [`RadiusEngine`].
//! - [`diagnostics`] -- Breakdown projection and display channel text.
//! - [`sync`] -- Settings provider gatekeeping with a configuration lock.
//!
//! [`compute_reveal_radius`]: radius::compute_reveal_radius
//! [`RadiusEngine`]: radius::RadiusEngine

pub mod classifier;
pub mod config;
pub mod diagnostics;
pub mod factors;
pub mod radius;
pub mod sync;
pub mod tuning;

// Re-export primary types at crate root.
pub use config::{BoundedConfig, ConfigError, ConfigSnapshot, DisplayChannels, Parameter, SettingsFile};
pub use factors::{FactorSet, ForestCover, OpenTerrain, UniformForest};
pub use radius::{RadiusEngine, RevealOutcome, RevealRequest, compute_reveal_radius};
pub use sync::{SettingsSync, SettingsUpdate, SyncOrigin, SyncOutcome};
pub use tuning::Tuning;
