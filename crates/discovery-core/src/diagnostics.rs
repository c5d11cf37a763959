//! Diagnostics projection and display text.
//!
//! [`project`] assembles the [`RadiusBreakdown`] returned with every radius.
//! [`render`] turns a breakdown into the text of whichever display channels
//! the host has enabled. Neither touches engine state, and the radius the
//! host receives is the same whether zero or all channels are on.

use discovery_types::{AgentState, EnvironmentSnapshot, ExploreMode, RadiusBreakdown};

use crate::config::DisplayChannels;
use crate::factors::{self, FactorSet};
use crate::tuning::Tuning;

/// Assemble the breakdown for one computation.
pub const fn project(
    mode: ExploreMode,
    base_radius: f32,
    factors: FactorSet,
    total_multiplier: f32,
    final_radius: f32,
) -> RadiusBreakdown {
    RadiusBreakdown {
        mode,
        base_radius,
        lighting: factors.lighting,
        weather: factors.weather,
        altitude: factors.altitude,
        biome: factors.biome,
        total_multiplier,
        final_radius,
    }
}

/// Display text for the enabled channels. Disabled channels are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiagnosticsReport {
    /// Current radius line.
    pub current_radius: Option<String>,
    /// Factor breakdown.
    pub variables: Option<String>,
    /// Raw debug snapshot.
    pub debug: Option<String>,
}

impl DiagnosticsReport {
    /// Text of every enabled channel, in display order.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        [&self.current_radius, &self.variables, &self.debug]
            .into_iter()
            .filter_map(|channel| channel.as_deref())
    }
}

/// Render the enabled channels for one computation.
pub fn render(
    channels: DisplayChannels,
    breakdown: &RadiusBreakdown,
    agent: &AgentState,
    env: &EnvironmentSnapshot,
    tuning: &Tuning,
) -> DiagnosticsReport {
    DiagnosticsReport {
        current_radius: channels
            .current_radius
            .then(|| radius_text(breakdown.final_radius)),
        variables: channels.variables.then(|| variables_text(breakdown)),
        debug: channels.debug.then(|| {
            debug_text(
                env.time_of_day,
                breakdown.mode,
                factors::height_above_water(agent, env, tuning),
            )
        }),
    }
}

/// `Discovery radius: radius=163.5`
pub fn radius_text(radius: f32) -> String {
    format!("Discovery radius: radius={radius:.1}")
}

/// Multi-line factor breakdown. Interiors show only radius and base.
///
/// In an interior the base is the interior radius the agent actually gets,
/// not the land or sea base it would have outside, so `Base` and `Radius`
/// read the same.
pub fn variables_text(breakdown: &RadiusBreakdown) -> String {
    let mut text = format!(
        "Discovery radius variables\nRadius: {:.1}\nBase: {:.1}",
        breakdown.final_radius, breakdown.base_radius
    );
    if breakdown.mode != ExploreMode::Interior {
        text.push_str(&format!(
            "\nTotal multiplier (sum): {:.2}\nLighting multiplier: {:.1}\nWeather multiplier: {:.1}\nAltitude multiplier: {:.1}\nBiome multiplier: {:.1}",
            breakdown.total_multiplier,
            breakdown.lighting,
            breakdown.weather,
            breakdown.altitude,
            breakdown.biome,
        ));
    }
    text
}

/// Multi-line debug snapshot: clock time, mode, and altitude.
pub fn debug_text(time_of_day: f32, mode: ExploreMode, altitude: f32) -> String {
    let fraction = day_fraction(time_of_day);
    format!(
        "Discovery radius debug:\ntime={} ({fraction:.3})\nmode={mode}\naltitude={altitude:.1}",
        clock_time(fraction)
    )
}

/// Wrap a time-of-day value into `[0, 1)`. Non-finite values read as midnight.
fn day_fraction(time_of_day: f32) -> f32 {
    if time_of_day.is_finite() {
        time_of_day.rem_euclid(1.0)
    } else {
        0.0
    }
}

/// `HH:MM` for a day fraction in `[0, 1)`.
pub fn clock_time(fraction: f32) -> String {
    let hours_total = fraction * 24.0;
    let hours = hours_total.floor();
    let minutes = ((hours_total - hours) * 60.0).floor();
    format!("{hours:02.0}:{minutes:02.0}")
}

#[cfg(test)]
mod tests {
    use discovery_types::Vec3;

    use super::*;

    fn land_breakdown() -> RadiusBreakdown {
        project(
            ExploreMode::Land,
            150.0,
            FactorSet {
                lighting: 0.0,
                weather: -0.12,
                altitude: 0.5,
                biome: 0.3,
            },
            1.63,
            244.5,
        )
    }

    #[test]
    fn project_copies_every_field() {
        let b = land_breakdown();
        assert_eq!(b.mode, ExploreMode::Land);
        assert!((b.base_radius - 150.0).abs() < f32::EPSILON);
        assert!((b.weather + 0.12).abs() < f32::EPSILON);
        assert!((b.altitude - 0.5).abs() < f32::EPSILON);
        assert!((b.total_multiplier - 1.63).abs() < f32::EPSILON);
        assert!((b.final_radius - 244.5).abs() < f32::EPSILON);
    }

    #[test]
    fn radius_line_format() {
        assert_eq!(radius_text(163.5), "Discovery radius: radius=163.5");
    }

    #[test]
    fn variables_include_factors_outside_interiors() {
        let text = variables_text(&land_breakdown());
        assert_eq!(
            text,
            "Discovery radius variables\nRadius: 244.5\nBase: 150.0\nTotal multiplier (sum): 1.63\nLighting multiplier: 0.0\nWeather multiplier: -0.1\nAltitude multiplier: 0.5\nBiome multiplier: 0.3"
        );
    }

    #[test]
    fn variables_omit_factors_in_interiors() {
        let b = project(ExploreMode::Interior, 10.0, FactorSet::default(), 0.0, 10.0);
        assert_eq!(variables_text(&b), "Discovery radius variables\nRadius: 10.0\nBase: 10.0");
    }

    #[test]
    fn interior_variables_report_interior_base() {
        let agent = AgentState {
            in_interior: true,
            ..AgentState::default()
        };
        let env = EnvironmentSnapshot::default();
        let tuning = Tuning::default();
        let out = crate::radius::compute_reveal_radius(
            &agent,
            &env,
            &crate::config::ConfigSnapshot::default(),
            &[],
            &crate::factors::OpenTerrain,
            &tuning,
        );
        let text = variables_text(&out.breakdown);
        assert!(text.ends_with("Radius: 10.0\nBase: 10.0"), "{text}");
    }

    #[test]
    fn clock_time_formats_hours_and_minutes() {
        assert_eq!(clock_time(0.0), "00:00");
        assert_eq!(clock_time(0.5), "12:00");
        assert_eq!(clock_time(0.75), "18:00");
        assert_eq!(clock_time(0.3125), "07:30");
    }

    #[test]
    fn debug_text_format() {
        assert_eq!(
            debug_text(0.5, ExploreMode::Sea, 12.34),
            "Discovery radius debug:\ntime=12:00 (0.500)\nmode=sea\naltitude=12.3"
        );
    }

    #[test]
    fn time_of_day_wraps() {
        assert!(debug_text(1.25, ExploreMode::Land, 0.0).contains("time=06:00 (0.250)"));
        assert!(debug_text(f32::NAN, ExploreMode::Land, 0.0).contains("time=00:00"));
    }

    #[test]
    fn render_only_enabled_channels() {
        let agent = AgentState {
            position: Vec3::new(0.0, 60.0, 0.0),
            ..AgentState::default()
        };
        let env = EnvironmentSnapshot {
            water_level: 30.0,
            ..EnvironmentSnapshot::default()
        };
        let tuning = Tuning::default();
        let b = land_breakdown();

        let none = render(DisplayChannels::default(), &b, &agent, &env, &tuning);
        assert_eq!(none, DiagnosticsReport::default());
        assert_eq!(none.lines().count(), 0);

        let debug_only = DisplayChannels {
            debug: true,
            ..DisplayChannels::default()
        };
        let report = render(debug_only, &b, &agent, &env, &tuning);
        assert!(report.current_radius.is_none());
        assert!(report.variables.is_none());
        assert!(report.debug.as_deref().is_some_and(|t| t.ends_with("altitude=30.0")));

        let all = render(DisplayChannels::ALL, &b, &agent, &env, &tuning);
        assert_eq!(all.lines().count(), 3);
    }
}
