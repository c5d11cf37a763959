//! Discovery probe: runs the reveal radius engine over a scenario file.
//!
//! The probe plays the host. It loads the settings file, wires the shared
//! configuration into a settings synchroniser and a radius engine, then
//! walks a scenario tick by tick, printing whichever diagnostics channels
//! the settings enable.
//!
//! # Startup Sequence
//!
//! 1. Initialize structured logging (tracing)
//! 2. Load settings from `DISCOVERY_CONFIG` or `discovery-config.yaml`
//! 3. Load the scenario from the first argument, `DISCOVERY_SCENARIO`, or
//!    `discovery-scenario.yaml`
//! 4. Build the shared configuration, synchroniser, and engine
//! 5. Compute every tick and print diagnostics

mod error;
mod scenario;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use discovery_core::diagnostics;
use discovery_core::{
    BoundedConfig, RadiusEngine, RevealRequest, SettingsFile, SettingsSync, SyncOutcome,
};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use crate::error::ProbeError;
use crate::scenario::{PatchForest, Scenario, ScenarioTick};

const DEFAULT_CONFIG_PATH: &str = "discovery-config.yaml";
const DEFAULT_SCENARIO_PATH: &str = "discovery-scenario.yaml";

/// Application entry point for the probe.
///
/// # Errors
///
/// Returns an error if the settings or scenario cannot be loaded, or if a
/// scenario update names an unknown parameter.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("discovery-probe starting");

    // 2. Load settings.
    let settings = load_settings()?;
    info!(
        lock_configuration = settings.general.lock_configuration,
        land = settings.exploration_radius.land_explore_radius,
        sea = settings.exploration_radius.sea_explore_radius,
        "Settings loaded"
    );

    // 3. Load scenario.
    let scenario = load_scenario()?;
    info!(ticks = scenario.ticks.len(), "Scenario loaded");

    // 4. Wire the shared configuration.
    let config = Arc::new(BoundedConfig::from_settings(&settings));
    let sync = SettingsSync::new(Arc::clone(&config), settings.general.lock_configuration);
    let engine = RadiusEngine::new(config, settings.tuning.clone());

    // 5. Run.
    for (index, tick) in scenario.ticks.iter().enumerate() {
        run_tick(index, tick, &engine, &sync, &settings)?;
    }

    info!("discovery-probe finished");
    Ok(())
}

/// Apply a tick's settings update, compute its radius, and print the
/// enabled diagnostics.
fn run_tick(
    index: usize,
    tick: &ScenarioTick,
    engine: &RadiusEngine,
    sync: &SettingsSync,
    settings: &SettingsFile,
) -> Result<(), ProbeError> {
    if let Some(update) = &tick.settings_update {
        match sync.apply(&update.values, update.origin)? {
            SyncOutcome::Applied { written } => {
                info!(tick = index, written, "Settings update applied");
            }
            SyncOutcome::Locked => {
                warn!(tick = index, "Settings update refused, configuration locked");
            }
        }
    }

    let forest = PatchForest::new(&tick.forest_patches);
    let request = RevealRequest {
        agent: &tick.agent,
        environment: &tick.environment,
        nearby: &tick.nearby,
        forest: &forest,
    };
    let outcome = engine.compute(&request);

    info!(
        tick = index,
        label = %tick.label,
        mode = %outcome.mode(),
        radius = outcome.radius,
        "Reveal radius"
    );
    debug!(
        tick = index,
        breakdown = serde_json::to_string(&outcome.breakdown)?,
        "Radius breakdown"
    );

    let report = diagnostics::render(
        settings.display,
        &outcome.breakdown,
        &tick.agent,
        &tick.environment,
        engine.tuning(),
    );
    for line in report.lines() {
        println!("{line}");
    }
    Ok(())
}

/// Load settings from `DISCOVERY_CONFIG` or `discovery-config.yaml`.
///
/// A missing file falls back to defaults.
fn load_settings() -> Result<SettingsFile, ProbeError> {
    let path = std::env::var_os("DISCOVERY_CONFIG")
        .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);
    if path.exists() {
        Ok(SettingsFile::from_file(&path)?)
    } else {
        info!(path = %path.display(), "Settings file not found, using defaults");
        Ok(SettingsFile::default())
    }
}

/// Load the scenario named on the command line, by `DISCOVERY_SCENARIO`, or
/// `discovery-scenario.yaml`, in that order.
///
/// A missing default file falls back to the built-in single-tick scenario.
/// An explicitly named file must exist.
fn load_scenario() -> Result<Scenario, ProbeError> {
    let explicit = std::env::args_os()
        .nth(1)
        .or_else(|| std::env::var_os("DISCOVERY_SCENARIO"))
        .map(PathBuf::from);
    if let Some(path) = explicit {
        return Scenario::from_file(&path);
    }
    let path = Path::new(DEFAULT_SCENARIO_PATH);
    if path.exists() {
        Scenario::from_file(path)
    } else {
        info!("Scenario file not found, using built-in scenario");
        Ok(Scenario::builtin())
    }
}
