// ABOUTME: Environment configuration for the detection loop and session runtime
// ABOUTME: Parses COACH_* variables with defaults and rejects unusable values
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration
//!
//! | Variable | Default |
//! |---|---|
//! | `COACH_FRAME_INTERVAL_MS` | 33 |
//! | `COACH_WARMUP_MS` | 500 |
//! | `COACH_TICK_MS` | 1000 |
//! | `COACH_ALLOW_DEFAULT_PROFILE` | true |
//! | `COACH_STOP_ON_GOAL` | true |
//! | `ENVIRONMENT` | development |

use std::env::{self, VarError};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use coach_core::constants::{env_config, timing};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::{AppError, AppResult};

/// Deployment environment
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Production deployment
    Production,
    /// Test runs
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Timing and exit policy of the detection loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetectionConfig {
    /// Period of the frame loop
    pub frame_interval: Duration,
    /// Delay after the video first becomes ready before detection starts
    pub warmup: Duration,
    /// Period of the elapsed-time timer
    pub tick_interval: Duration,
    /// Return from the loop as soon as the session goal is reached
    pub stop_on_goal: bool,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            frame_interval: Duration::from_millis(timing::DEFAULT_FRAME_INTERVAL_MS),
            warmup: Duration::from_millis(timing::DEFAULT_WARMUP_MS),
            tick_interval: Duration::from_millis(timing::DEFAULT_TICK_MS),
            stop_on_goal: true,
        }
    }
}

impl DetectionConfig {
    /// Reject intervals the loop cannot schedule
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` if the frame or tick interval is zero.
    pub fn validate(&self) -> AppResult<()> {
        if self.frame_interval.is_zero() {
            return Err(AppError::config_invalid(format!(
                "{} must be greater than zero",
                env_config::FRAME_INTERVAL_MS
            )));
        }
        if self.tick_interval.is_zero() {
            return Err(AppError::config_invalid(format!(
                "{} must be greater than zero",
                env_config::TICK_MS
            )));
        }
        Ok(())
    }
}

/// Runtime configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoachConfig {
    /// Deployment environment
    pub environment: Environment,
    /// Detection loop settings
    pub detection: DetectionConfig,
    /// Whether unknown exercises use the default profile
    pub allow_default_profile: bool,
}

impl Default for CoachConfig {
    fn default() -> Self {
        Self {
            environment: Environment::default(),
            detection: DetectionConfig::default(),
            allow_default_profile: true,
        }
    }
}

impl CoachConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` if a variable is set but cannot be parsed, or
    /// if the resulting detection settings are unusable.
    pub fn from_env() -> AppResult<Self> {
        let detection = DetectionConfig {
            frame_interval: Duration::from_millis(env_parse(
                env_config::FRAME_INTERVAL_MS,
                timing::DEFAULT_FRAME_INTERVAL_MS,
            )?),
            warmup: Duration::from_millis(env_parse(
                env_config::WARMUP_MS,
                timing::DEFAULT_WARMUP_MS,
            )?),
            tick_interval: Duration::from_millis(env_parse(
                env_config::TICK_MS,
                timing::DEFAULT_TICK_MS,
            )?),
            stop_on_goal: env_flag(env_config::STOP_ON_GOAL, true)?,
        };
        detection.validate()?;

        let config = Self {
            environment: env_string(env_config::ENVIRONMENT)?
                .map_or_else(Environment::default, |value| {
                    Environment::from_str_or_default(&value)
                }),
            detection,
            allow_default_profile: env_flag(env_config::ALLOW_DEFAULT_PROFILE, true)?,
        };
        info!(
            environment = %config.environment,
            frame_interval_ms = config.detection.frame_interval.as_millis(),
            warmup_ms = config.detection.warmup.as_millis(),
            tick_ms = config.detection.tick_interval.as_millis(),
            "Configuration loaded from environment"
        );
        Ok(config)
    }

    /// One-line summary for startup logs
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Rep Coach Configuration: environment={}, frame_interval={}ms, warmup={}ms, tick={}ms, default_profile={}, stop_on_goal={}",
            self.environment,
            self.detection.frame_interval.as_millis(),
            self.detection.warmup.as_millis(),
            self.detection.tick_interval.as_millis(),
            if self.allow_default_profile { "enabled" } else { "disabled" },
            self.detection.stop_on_goal,
        )
    }
}

/// Value of `key`, `None` when unset
fn env_string(key: &str) -> AppResult<Option<String>> {
    match env::var(key) {
        Ok(value) => Ok(Some(value)),
        Err(VarError::NotPresent) => Ok(None),
        Err(VarError::NotUnicode(_)) => Err(AppError::config_invalid(format!(
            "{key} is not valid unicode"
        ))),
    }
}

fn env_parse<T: FromStr>(key: &str, default: T) -> AppResult<T> {
    let Some(raw) = env_string(key)? else {
        return Ok(default);
    };
    raw.trim()
        .parse()
        .map_err(|_| AppError::config_invalid(format!("Invalid {key} value: '{raw}'")))
}

fn env_flag(key: &str, default: bool) -> AppResult<bool> {
    let Some(raw) = env_string(key)? else {
        return Ok(default);
    };
    parse_flag(&raw).ok_or_else(|| AppError::config_invalid(format!("Invalid {key} value: '{raw}'")))
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("TRUE"), Some(true));
        assert_eq!(parse_flag(" 0 "), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }

    #[test]
    fn test_environment_from_str() {
        assert_eq!(Environment::from_str_or_default("prod"), Environment::Production);
        assert_eq!(Environment::from_str_or_default("TEST"), Environment::Testing);
        assert_eq!(Environment::from_str_or_default("staging"), Environment::Development);
    }

    #[test]
    fn test_zero_intervals_rejected() {
        let frame = DetectionConfig {
            frame_interval: Duration::ZERO,
            ..DetectionConfig::default()
        };
        assert!(frame.validate().is_err());

        let tick = DetectionConfig {
            tick_interval: Duration::ZERO,
            ..DetectionConfig::default()
        };
        assert!(tick.validate().is_err());
        assert!(DetectionConfig::default().validate().is_ok());
    }
}
