//! Shared type definitions for the discovery radius engine.
//!
//! This crate holds the plain data exchanged between the host and the
//! engine: per-call agent and environment snapshots going in, and the
//! radius breakdown coming out.
//!
//! # Modules
//!
//! - [`enums`] -- Biomes, particle effects, and exploration modes
//! - [`structs`] -- Agent and environment snapshots, geometry, breakdown

pub mod enums;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{Biome, ExploreMode, ParticleEffect};
pub use structs::{AgentState, Color, EnvironmentSnapshot, RadiusBreakdown, Vec3};
