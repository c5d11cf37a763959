//! Agent context classification and base radius selection.
//!
//! An agent in an interior is always [`ExploreMode::Interior`], whatever else
//! is true about it. Otherwise an agent is at sea when any agent within the
//! vessel detection radius (itself included) is at the helm of a piloted
//! vessel, so passengers inherit the sea radius from their pilot.

use discovery_types::{AgentState, ExploreMode};
use tracing::trace;

use crate::config::{ConfigSnapshot, Parameter};
use crate::tuning::Tuning;

/// Classify the agent's exploration mode.
///
/// `nearby` may contain the agent itself; it is checked either way.
pub fn classify(agent: &AgentState, nearby: &[AgentState], detection_radius: f32) -> ExploreMode {
    if agent.in_interior {
        return ExploreMode::Interior;
    }
    if near_piloted_vessel(agent, nearby, detection_radius) {
        ExploreMode::Sea
    } else {
        ExploreMode::Land
    }
}

/// Whether the agent, or anyone within `detection_radius` of it on the
/// ground plane, is attached to a piloted vessel.
pub fn near_piloted_vessel(
    agent: &AgentState,
    nearby: &[AgentState],
    detection_radius: f32,
) -> bool {
    if agent.attached_to_ship {
        return true;
    }
    nearby.iter().any(|other| {
        other.attached_to_ship
            && agent.position.horizontal_distance(other.position) <= detection_radius
    })
}

/// Anchor radius for a mode, before environmental factors apply.
pub fn base_radius(mode: ExploreMode, config: &ConfigSnapshot, tuning: &Tuning) -> f32 {
    let radius = match mode {
        ExploreMode::Interior => tuning.interior_radius,
        ExploreMode::Sea => config.get(Parameter::SeaExploreRadius),
        ExploreMode::Land => config.get(Parameter::LandExploreRadius),
    };
    trace!(%mode, radius, "base radius selected");
    radius
}
