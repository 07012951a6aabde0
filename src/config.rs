//! Locomotion tuning loaded from JSON.
//!
//! Every field has a default, so a config file only needs the values it
//! overrides. Unknown keys are rejected to catch typos.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{
    DAMPING_INTEGRAL_LIMIT, DAMPING_KD, DAMPING_KI, DAMPING_KP, HEADING_INTEGRAL_LIMIT,
    HEADING_KD, HEADING_KI, HEADING_KP, IDLE_SECONDS_MAX, IDLE_SECONDS_MIN,
    INTENSITY_RAMP_PER_SECOND, POST_TURN_INTENSITY, STOP_ANGULAR_SPEED, TURN_THRESHOLD_DEGREES,
};
use crate::pid::PidConfig;

/// Errors raised while loading or validating a [`LocomotionConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        /// File that was requested.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The config text was not valid JSON for this schema.
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    /// A value parsed but falls outside its allowed domain.
    #[error("invalid {field}: {reason}")]
    Invalid {
        /// Dotted path of the offending field.
        field: String,
        /// Why the value was rejected.
        reason: String,
    },
}

/// Uniform range idle periods are drawn from, in simulated seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IdleRange {
    /// Shortest idle period.
    pub min: f32,
    /// Longest idle period.
    pub max: f32,
}

impl Default for IdleRange {
    fn default() -> Self {
        Self {
            min: IDLE_SECONDS_MIN,
            max: IDLE_SECONDS_MAX,
        }
    }
}

/// Tuning shared by the three locomotion states.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LocomotionConfig {
    /// Range the standing idle timer is drawn from.
    pub idle_seconds: IdleRange,
    /// Movement intensity change per simulated second.
    pub intensity_ramp_per_second: f32,
    /// Heading deviation, in degrees, that forces an in-place turn.
    pub turn_threshold_degrees: f32,
    /// Angular speed at or below which a coasting actor may stand.
    pub stop_angular_speed: f32,
    /// Movement intensity written once the turn animation starts.
    pub post_turn_intensity: f32,
    /// Heading-angle loop.
    pub heading_pid: PidConfig,
    /// Angular-velocity damping loop.
    pub damping_pid: PidConfig,
}

impl Default for LocomotionConfig {
    fn default() -> Self {
        Self {
            idle_seconds: IdleRange::default(),
            intensity_ramp_per_second: INTENSITY_RAMP_PER_SECOND,
            turn_threshold_degrees: TURN_THRESHOLD_DEGREES,
            stop_angular_speed: STOP_ANGULAR_SPEED,
            post_turn_intensity: POST_TURN_INTENSITY,
            heading_pid: PidConfig::new(HEADING_KP, HEADING_KI, HEADING_KD)
                .with_integral_limit(HEADING_INTEGRAL_LIMIT),
            damping_pid: PidConfig::new(DAMPING_KP, DAMPING_KI, DAMPING_KD)
                .with_integral_limit(DAMPING_INTEGRAL_LIMIT),
        }
    }
}

fn ensure(ok: bool, field: &str, reason: &str) -> Result<(), ConfigError> {
    if ok {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field: field.to_owned(),
            reason: reason.to_owned(),
        })
    }
}

fn validate_pid(name: &str, pid: &PidConfig) -> Result<(), ConfigError> {
    for (gain, value) in [("kp", pid.kp), ("ki", pid.ki), ("kd", pid.kd)] {
        ensure(
            value.is_finite() && value >= 0.0,
            &format!("{name}.{gain}"),
            "gains must be finite and non-negative",
        )?;
    }
    if let (Some(min), Some(max)) = (pid.output_min, pid.output_max) {
        ensure(
            min <= max,
            &format!("{name}.output_min"),
            "must not exceed output_max",
        )?;
    }
    for (bound, value) in [("output_min", pid.output_min), ("output_max", pid.output_max)] {
        ensure(
            value.map_or(true, |v| !v.is_nan()),
            &format!("{name}.{bound}"),
            "must be a number",
        )?;
    }
    ensure(
        pid.integral_limit.map_or(true, |limit| limit >= 0.0),
        &format!("{name}.integral_limit"),
        "must be non-negative",
    )
}

impl LocomotionConfig {
    /// Checks every value against its allowed domain.
    ///
    /// # Errors
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let IdleRange { min, max } = self.idle_seconds;
        ensure(
            min.is_finite() && min >= 0.0,
            "idle_seconds.min",
            "must be finite and non-negative",
        )?;
        ensure(
            max.is_finite() && max >= min,
            "idle_seconds.max",
            "must be finite and at least idle_seconds.min",
        )?;
        ensure(
            self.intensity_ramp_per_second.is_finite() && self.intensity_ramp_per_second > 0.0,
            "intensity_ramp_per_second",
            "must be finite and positive",
        )?;
        ensure(
            self.turn_threshold_degrees > 0.0 && self.turn_threshold_degrees <= 180.0,
            "turn_threshold_degrees",
            "must lie in (0, 180]",
        )?;
        ensure(
            self.stop_angular_speed.is_finite() && self.stop_angular_speed >= 0.0,
            "stop_angular_speed",
            "must be finite and non-negative",
        )?;
        ensure(
            (0.0..=1.0).contains(&self.post_turn_intensity),
            "post_turn_intensity",
            "must lie in [0, 1]",
        )?;
        validate_pid("heading_pid", &self.heading_pid)?;
        validate_pid("damping_pid", &self.damping_pid)
    }

    /// Parses and validates a JSON config.
    ///
    /// # Errors
    /// Returns [`ConfigError::Parse`] for malformed JSON or unknown keys and
    /// [`ConfigError::Invalid`] for out-of-domain values.
    ///
    /// # Examples
    /// ```
    /// use strider::LocomotionConfig;
    /// let config = LocomotionConfig::from_json_str(r#"{ "turn_threshold_degrees": 120.0 }"#)
    ///     .expect("valid config");
    /// assert_eq!(config.turn_threshold_degrees, 120.0);
    /// assert_eq!(config.post_turn_intensity, 0.6);
    /// ```
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates the JSON config at `path`.
    ///
    /// # Errors
    /// Returns [`ConfigError::Io`] when the file cannot be read, otherwise
    /// the errors of [`LocomotionConfig::from_json_str`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let file = path.as_ref();
        let text = fs::read_to_string(file).map_err(|source| ConfigError::Io {
            path: file.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }
}
