/*
 * Copyright (c) 2024. Govcraft
 *
 * Licensed under either of
 *   * Apache License, Version 2.0 (the "License");
 *     you may not use this file except in compliance with the License.
 *     You may obtain a copy of the License at http://www.apache.org/licenses/LICENSE-2.0
 *   * MIT license: http://opensource.org/licenses/MIT
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the applicable License for the specific language governing permissions and
 * limitations under that License.
 */

use std::path::Path;
use std::time::Duration;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

/// Configuration for the selective receive stack.
///
/// Loaded from TOML files in XDG-compliant directories. Every section and
/// field may be omitted; missing values take their defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectiveConfig {
    /// Matching behaviour of every new tracker
    pub tracker: TrackerConfig,
    /// Timeout configuration
    pub timeouts: TimeoutConfig,
    /// Limits and capacity configuration
    pub limits: LimitsConfig,
    /// Tracing and logging configuration
    pub tracing: TracingConfig,
}

/// How a [`MatchTracker`](crate::MatchTracker) locates items and treats duplicates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Direction of the match-list scan
    pub search: SearchStrategy,
    /// When a second hit on a satisfied slot is reported
    pub duplicates: DuplicatePolicy,
}

/// Scan order used to find an incoming item in the match list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchStrategy {
    /// Scan from the head until half the round has arrived, then from the tail.
    #[default]
    Bidirectional,
    /// Always scan from the head.
    Forward,
}

/// Handling of an item that lands on an already satisfied slot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// Log the hit; the round fails only when the count reaches the list
    /// length without full coverage.
    #[default]
    Deferred,
    /// Fail the round on the duplicate itself.
    Immediate,
}

/// Timeout-related configuration values
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Longest wait for a whole round in milliseconds; 0 waits forever
    pub receive_timeout_ms: u64,
}

/// Limits and capacity configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Default MPSC channel size for reply inboxes
    pub inbox_capacity: usize,
}

/// Tracing and logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TracingConfig {
    /// Default filter directive for binaries that install a subscriber
    pub level: String,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            receive_timeout_ms: 0,
        }
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            inbox_capacity: 255,
        }
    }
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl SelectiveConfig {
    /// Round receive deadline, or `None` to wait without limit.
    #[must_use]
    pub const fn receive_timeout(&self) -> Option<Duration> {
        match self.timeouts.receive_timeout_ms {
            0 => None,
            ms => Some(Duration::from_millis(ms)),
        }
    }

    /// Reply inbox capacity; a configured 0 is raised to 1, the smallest
    /// bounded channel.
    #[must_use]
    pub fn inbox_capacity(&self) -> usize {
        self.limits.inbox_capacity.max(1)
    }

    /// Parses a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns the TOML error if the text is malformed or a value has the
    /// wrong type.
    pub fn from_toml_str(config_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(config_str)
    }

    /// Load configuration from XDG-compliant locations
    ///
    /// Looks for `selective/config.toml` under `$XDG_CONFIG_HOME` and then
    /// `$XDG_CONFIG_DIRS`. If no configuration file is found, returns the
    /// default configuration. If a file exists but is malformed, logs an
    /// error and uses defaults.
    pub fn load() -> Self {
        use tracing::{error, info};

        let xdg_dirs = match xdg::BaseDirectories::with_prefix("selective") {
            Ok(dirs) => dirs,
            Err(e) => {
                error!("Failed to initialize XDG directories: {}", e);
                return Self::default();
            }
        };

        if let Some(path) = xdg_dirs.find_config_file("config.toml") {
            Self::load_from(&path)
        } else {
            info!("No configuration file found, using defaults");
            Self::default()
        }
    }

    /// Load configuration from an explicit file, falling back to defaults on
    /// any read or parse error.
    pub fn load_from(path: &Path) -> Self {
        use tracing::{error, info};

        info!("Loading configuration from: {}", path.display());
        match std::fs::read_to_string(path) {
            Ok(config_str) => match Self::from_toml_str(&config_str) {
                Ok(config) => {
                    info!("Successfully loaded configuration");
                    config
                }
                Err(e) => {
                    error!("Failed to parse configuration file {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                error!("Failed to read configuration file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}

lazy_static! {
    /// Global configuration instance loaded from XDG-compliant locations
    pub static ref CONFIG: SelectiveConfig = SelectiveConfig::load();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_bidirectional_and_deferred() {
        let config = SelectiveConfig::default();
        assert_eq!(config.tracker.search, SearchStrategy::Bidirectional);
        assert_eq!(config.tracker.duplicates, DuplicatePolicy::Deferred);
        assert_eq!(config.limits.inbox_capacity, 255);
        assert_eq!(config.receive_timeout(), None);
        assert_eq!(config.tracing.level, "info");
    }

    #[test]
    fn partial_toml_keeps_remaining_defaults() {
        let config = SelectiveConfig::from_toml_str(
            r#"
            [tracker]
            duplicates = "immediate"

            [timeouts]
            receive_timeout_ms = 250
            "#,
        )
        .unwrap();
        assert_eq!(config.tracker.duplicates, DuplicatePolicy::Immediate);
        assert_eq!(config.tracker.search, SearchStrategy::Bidirectional);
        assert_eq!(config.receive_timeout(), Some(Duration::from_millis(250)));
        assert_eq!(config.limits.inbox_capacity, 255);
    }

    #[test]
    fn zero_inbox_capacity_is_raised_to_one() {
        let config = SelectiveConfig::from_toml_str("[limits]\ninbox_capacity = 0\n").unwrap();
        assert_eq!(config.limits.inbox_capacity, 0);
        assert_eq!(config.inbox_capacity(), 1);
        assert_eq!(SelectiveConfig::default().inbox_capacity(), 255);
    }

    #[test]
    fn unknown_strategy_is_rejected() {
        let result = SelectiveConfig::from_toml_str("[tracker]\nsearch = \"sideways\"\n");
        assert!(result.is_err());
    }
}
