//! Error types for the probe binary.
//!
//! [`ProbeError`] is the top-level error type that wraps all possible
//! failure modes while loading inputs and running a scenario.

/// Top-level error for the probe binary.
///
/// Each variant wraps a specific subsystem error, providing a single
/// error type that `main` can propagate with `?`.
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    /// Settings loading failed, or a settings update named an unknown
    /// parameter.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: discovery_core::ConfigError,
    },

    /// The scenario file could not be read.
    #[error("failed to read scenario {path}: {source}")]
    ScenarioIo {
        /// Path of the scenario file.
        path: String,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The scenario file is not valid YAML for a scenario.
    #[error("failed to parse scenario {path}: {source}")]
    ScenarioYaml {
        /// Path of the scenario file.
        path: String,
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// A breakdown could not be encoded for the log.
    #[error("failed to encode breakdown: {source}")]
    Encode {
        /// The underlying JSON error.
        #[from]
        source: serde_json::Error,
    },
}
