//! Tunable strategy parameters.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{BULLET_EXCHANGE_RATE, SENSE_RADIUS, VICTORY_POINTS_TO_WIN};
use crate::strategy::{DEFAULT_CHECKS_PER_SIDE, DEFAULT_DEGREE_OFFSET};

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// The configuration file is not valid JSON for this schema.
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    /// A field holds a value outside its allowed range.
    #[error("invalid config value for `{field}`: {reason}")]
    Invalid {
        /// Name of the offending field.
        field: &'static str,
        /// Why the value was rejected.
        reason: &'static str,
    },
}

/// Parameters of the archon and gardener strategies.
///
/// Missing fields take their default when deserialized.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategyConfig {
    /// Bullets per victory point.
    pub bullet_exchange_rate: f32,
    /// Victory points needed to win.
    pub victory_points_to_win: u32,
    /// Radius for sensing trees to shake or water.
    pub sense_radius: f32,
    /// Angular spacing between probes when a move is blocked, in degrees.
    pub move_degree_offset: f32,
    /// Probes on each side of a blocked heading.
    pub move_checks_per_side: u32,
    /// Legal planting directions needed before a gardener plants.
    pub planting_threshold: usize,
    /// Directions tried by archons when hiring and gardeners when planting.
    pub build_attempts: u32,
    /// Angular spacing between build directions, in degrees.
    pub build_spacing_degrees: f32,
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            bullet_exchange_rate: BULLET_EXCHANGE_RATE,
            victory_points_to_win: VICTORY_POINTS_TO_WIN,
            sense_radius: SENSE_RADIUS,
            move_degree_offset: DEFAULT_DEGREE_OFFSET,
            move_checks_per_side: DEFAULT_CHECKS_PER_SIDE,
            planting_threshold: 1,
            build_attempts: 5,
            build_spacing_degrees: 60.0,
        }
    }
}

impl StrategyConfig {
    /// Bullets that buy every victory point still needed to win.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn donation_threshold(&self) -> f32 {
        self.bullet_exchange_rate * self.victory_points_to_win as f32
    }

    /// Check that every field is in range.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first bad field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("bullet_exchange_rate", self.bullet_exchange_rate)?;
        positive("sense_radius", self.sense_radius)?;
        positive("move_degree_offset", self.move_degree_offset)?;
        positive("build_spacing_degrees", self.build_spacing_degrees)?;
        if self.victory_points_to_win == 0 {
            return Err(ConfigError::Invalid {
                field: "victory_points_to_win",
                reason: "must be at least 1",
            });
        }
        if self.planting_threshold == 0 {
            return Err(ConfigError::Invalid {
                field: "planting_threshold",
                reason: "must be at least 1",
            });
        }
        if self.build_attempts == 0 {
            return Err(ConfigError::Invalid {
                field: "build_attempts",
                reason: "must be at least 1",
            });
        }
        Ok(())
    }

    /// Load and validate a configuration from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or validated.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }
}

/// Reject non-finite or non-positive values.
pub(crate) fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: "must be finite and positive",
        })
    }
}
