//! Reveal radius computation: classification, aggregation, and clamping.
//!
//! This is the entry point the host's terrain reveal routine calls once per
//! update. Each call is independent: the only state read is a momentary
//! snapshot of the bounded configuration, and nothing is written.
//!
//! # Pipeline
//!
//! 1. Classify the agent (interior, sea, land) and pick the base radius.
//! 2. Interior: return the tuned interior radius, skipping every factor.
//! 3. Otherwise evaluate the four factors and sum them. The tuned neutral
//!    multiplier (0 by default) is added to the sum.
//! 4. Scale the base radius and clamp to `[MinimumRadius, MaximumRadius]`.

use std::sync::Arc;

use discovery_types::{AgentState, EnvironmentSnapshot, ExploreMode, RadiusBreakdown};
use tracing::debug;

use crate::classifier;
use crate::config::{BoundedConfig, ConfigSnapshot, Parameter};
use crate::diagnostics;
use crate::factors::{self, FactorSet, ForestCover};
use crate::tuning::Tuning;

/// Result of one reveal radius computation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealOutcome {
    /// Radius for the host to reveal around the agent.
    pub radius: f32,
    /// How the radius was assembled.
    pub breakdown: RadiusBreakdown,
}

impl RevealOutcome {
    /// Mode the agent was classified into.
    pub const fn mode(&self) -> ExploreMode {
        self.breakdown.mode
    }
}

/// Compute the reveal radius for `agent`.
///
/// `config` must be a snapshot taken for this call. Outside interiors the
/// result lies in `[MinimumRadius, MaximumRadius]`; inside, it is exactly
/// `tuning.interior_radius`.
pub fn compute_reveal_radius(
    agent: &AgentState,
    env: &EnvironmentSnapshot,
    config: &ConfigSnapshot,
    nearby: &[AgentState],
    forest: &dyn ForestCover,
    tuning: &Tuning,
) -> RevealOutcome {
    let mode = classifier::classify(agent, nearby, tuning.vessel_detection_radius);
    let base = classifier::base_radius(mode, config, tuning);

    if mode == ExploreMode::Interior {
        let breakdown = diagnostics::project(mode, base, FactorSet::default(), 0.0, base);
        debug!(%mode, radius = base, "reveal radius computed");
        return RevealOutcome {
            radius: base,
            breakdown,
        };
    }

    let factors = factors::evaluate(agent, env, forest, config, tuning);
    let total = tuning.neutral_multiplier + factors.sum();
    let radius = clamp_radius(base * total, config);

    debug!(
        %mode,
        base,
        total_multiplier = total,
        radius,
        "reveal radius computed"
    );

    RevealOutcome {
        radius,
        breakdown: diagnostics::project(mode, base, factors, total, radius),
    }
}

/// Clamp a raw radius to the configured bounds.
///
/// A non-finite raw radius (from NaN inputs) degrades to the minimum.
fn clamp_radius(raw: f32, config: &ConfigSnapshot) -> f32 {
    let min = config.get(Parameter::MinimumRadius);
    let max = config.get(Parameter::MaximumRadius);
    if raw.is_nan() {
        return min;
    }
    // MinimumRadius tops out where MaximumRadius starts, so min <= max.
    raw.max(min).min(max)
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Inputs for one computation, sampled by the host at the same instant.
#[derive(Clone, Copy)]
pub struct RevealRequest<'a> {
    /// The agent whose surroundings are revealed.
    pub agent: &'a AgentState,
    /// Lighting and weather at the agent.
    pub environment: &'a EnvironmentSnapshot,
    /// Other agents near the agent (may include the agent itself).
    pub nearby: &'a [AgentState],
    /// Forest lookup for the agent's world.
    pub forest: &'a dyn ForestCover,
}

/// The radius engine as the host holds it: a shared configuration store
/// and the tuning tables.
#[derive(Debug, Clone)]
pub struct RadiusEngine {
    config: Arc<BoundedConfig>,
    tuning: Tuning,
}

impl RadiusEngine {
    /// Create an engine over a shared configuration store.
    pub const fn new(config: Arc<BoundedConfig>, tuning: Tuning) -> Self {
        Self { config, tuning }
    }

    /// The shared configuration store.
    pub const fn config(&self) -> &Arc<BoundedConfig> {
        &self.config
    }

    /// The tuning tables.
    pub const fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Compute the reveal radius against the current configuration.
    pub fn compute(&self, request: &RevealRequest<'_>) -> RevealOutcome {
        let config = self.config.snapshot();
        compute_reveal_radius(
            request.agent,
            request.environment,
            &config,
            request.nearby,
            request.forest,
            &self.tuning,
        )
    }
}

impl Default for RadiusEngine {
    fn default() -> Self {
        Self::new(Arc::new(BoundedConfig::new()), Tuning::default())
    }
}
