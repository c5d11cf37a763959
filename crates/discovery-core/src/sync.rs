//! Settings synchronisation with a configuration lock.
//!
//! A settings provider (a server pushing values to clients, an admin
//! console, a file watcher) delivers batches of named values. When the lock
//! is set, only the authoritative source may change anything; client
//! batches are refused whole. The lock itself belongs to the authoritative
//! source; clients can never set or clear it. Accepted batches are written
//! through the bounded path, so out-of-range values arrive clamped.
//!
//! Every name in a batch is resolved before anything is written. A batch
//! with an unknown name is an integration error and writes nothing.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::{BoundedConfig, ConfigError, Parameter, SettingsFile};

/// Where a settings update came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncOrigin {
    /// The server or administrator that owns the configuration.
    Authoritative,
    /// A non-authoritative participant, such as a connected client.
    Client,
}

/// What happened to a settings update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Every value was written (clamped where needed).
    Applied {
        /// Number of parameters written.
        written: usize,
    },
    /// The lock is set and the update was not authoritative.
    Locked,
}

/// A batch of named parameter values.
pub type SettingsUpdate = BTreeMap<String, f32>;

/// Gatekeeper between a settings provider and the shared configuration.
#[derive(Debug)]
pub struct SettingsSync {
    config: Arc<BoundedConfig>,
    locked: AtomicBool,
}

impl SettingsSync {
    /// Wrap a shared configuration store.
    pub const fn new(config: Arc<BoundedConfig>, locked: bool) -> Self {
        Self {
            config,
            locked: AtomicBool::new(locked),
        }
    }

    /// The shared configuration store.
    pub const fn config(&self) -> &Arc<BoundedConfig> {
        &self.config
    }

    /// Whether non-authoritative updates are currently refused.
    pub fn is_locked(&self) -> bool {
        self.locked.load(Ordering::Acquire)
    }

    /// Change the lock. Only the authoritative source may do so, whether or
    /// not the lock is currently set.
    pub fn set_locked(&self, locked: bool, origin: SyncOrigin) -> SyncOutcome {
        if origin == SyncOrigin::Client {
            warn!(requested = locked, "client attempted to change configuration lock");
            return SyncOutcome::Locked;
        }
        self.locked.store(locked, Ordering::Release);
        info!(locked, ?origin, "configuration lock updated");
        SyncOutcome::Applied { written: 0 }
    }

    /// Apply a batch of named values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownParameter`] if any name in the batch is
    /// not declared. Nothing is written in that case.
    pub fn apply(
        &self,
        update: &SettingsUpdate,
        origin: SyncOrigin,
    ) -> Result<SyncOutcome, ConfigError> {
        let resolved = update
            .iter()
            .map(|(name, value)| Parameter::from_name(name).map(|p| (p, *value)))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(self.write_all(&resolved, origin))
    }

    /// Apply every parameter and the lock flag from a settings file.
    ///
    /// The lock in the file is honoured only for authoritative origins.
    pub fn apply_settings(&self, settings: &SettingsFile, origin: SyncOrigin) -> SyncOutcome {
        let outcome = self.write_all(&settings.parameter_values(), origin);
        if origin == SyncOrigin::Authoritative {
            self.locked
                .store(settings.general.lock_configuration, Ordering::Release);
        }
        outcome
    }

    fn write_all(&self, values: &[(Parameter, f32)], origin: SyncOrigin) -> SyncOutcome {
        if origin == SyncOrigin::Client && self.is_locked() {
            warn!(
                parameters = values.len(),
                "configuration is locked, refusing client update"
            );
            return SyncOutcome::Locked;
        }
        for &(parameter, value) in values {
            self.config.set(parameter, value);
        }
        info!(written = values.len(), ?origin, "configuration update applied");
        SyncOutcome::Applied {
            written: values.len(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn update(entries: &[(&str, f32)]) -> SettingsUpdate {
        entries
            .iter()
            .map(|&(name, value)| (name.to_owned(), value))
            .collect()
    }

    #[test]
    fn locked_store_refuses_clients() {
        let sync = SettingsSync::new(Arc::new(BoundedConfig::new()), true);
        let outcome = sync
            .apply(&update(&[("LandExploreRadius", 500.0)]), SyncOrigin::Client)
            .unwrap();
        assert_eq!(outcome, SyncOutcome::Locked);
        assert!((sync.config().get(Parameter::LandExploreRadius) - 150.0).abs() < f32::EPSILON);
    }

    #[test]
    fn authoritative_updates_pass_the_lock_and_clamp() {
        let sync = SettingsSync::new(Arc::new(BoundedConfig::new()), true);
        let outcome = sync
            .apply(
                &update(&[("MaximumRadius", 5000.0), ("WeatherRadiusMultiplier", 0.5)]),
                SyncOrigin::Authoritative,
            )
            .unwrap();
        assert_eq!(outcome, SyncOutcome::Applied { written: 2 });
        assert!((sync.config().get(Parameter::MaximumRadius) - 1000.0).abs() < f32::EPSILON);
        assert!((sync.config().get(Parameter::WeatherRadiusMultiplier) - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn unlocked_store_accepts_clients() {
        let sync = SettingsSync::new(Arc::new(BoundedConfig::new()), false);
        let outcome = sync
            .apply(&update(&[("SeaExploreRadius", 300.0)]), SyncOrigin::Client)
            .unwrap();
        assert_eq!(outcome, SyncOutcome::Applied { written: 1 });
        assert!((sync.config().get(Parameter::SeaExploreRadius) - 300.0).abs() < f32::EPSILON);
    }

    #[test]
    fn unknown_name_writes_nothing() {
        let sync = SettingsSync::new(Arc::new(BoundedConfig::new()), false);
        let result = sync.apply(
            &update(&[("LandExploreRadius", 400.0), ("FogRadius", 1.0)]),
            SyncOrigin::Authoritative,
        );
        assert!(matches!(result, Err(ConfigError::UnknownParameter { .. })));
        assert!((sync.config().get(Parameter::LandExploreRadius) - 150.0).abs() < f32::EPSILON);
    }

    #[test]
    fn only_authority_changes_the_lock() {
        let sync = SettingsSync::new(Arc::new(BoundedConfig::new()), true);
        assert_eq!(sync.set_locked(false, SyncOrigin::Client), SyncOutcome::Locked);
        assert!(sync.is_locked());
        sync.set_locked(false, SyncOrigin::Authoritative);
        assert!(!sync.is_locked());
    }

    #[test]
    fn client_cannot_change_lock_even_when_unlocked() {
        let sync = SettingsSync::new(Arc::new(BoundedConfig::new()), false);
        assert_eq!(sync.set_locked(true, SyncOrigin::Client), SyncOutcome::Locked);
        assert!(!sync.is_locked());

        sync.set_locked(true, SyncOrigin::Authoritative);
        assert_eq!(sync.set_locked(false, SyncOrigin::Client), SyncOutcome::Locked);
        assert!(sync.is_locked());
    }

    #[test]
    fn settings_file_sets_lock_only_from_authority() {
        let sync = SettingsSync::new(Arc::new(BoundedConfig::new()), false);
        let mut settings = SettingsFile::default();
        settings.general.lock_configuration = true;
        settings.exploration_radius.land_explore_radius = 90.0;

        let outcome = sync.apply_settings(&settings, SyncOrigin::Client);
        assert_eq!(outcome, SyncOutcome::Applied { written: 8 });
        assert!(!sync.is_locked());
        assert!((sync.config().get(Parameter::LandExploreRadius) - 90.0).abs() < f32::EPSILON);

        sync.apply_settings(&settings, SyncOrigin::Authoritative);
        assert!(sync.is_locked());
    }
}
