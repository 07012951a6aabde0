//! Scalar PID controller used by the steering loops.
//!
//! The controller is fed a pre-computed error each tick and returns
//! `kp * error + ki * integral + kd * derivative`. Output and integral clamps
//! are optional; a config built with [`PidConfig::new`] is unbounded.

use serde::{Deserialize, Serialize};

/// Gains and clamps for a [`PidController`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PidConfig {
    /// Proportional gain.
    pub kp: f32,
    /// Integral gain.
    pub ki: f32,
    /// Derivative gain.
    pub kd: f32,
    /// Lower bound applied to the controller output, if any.
    pub output_min: Option<f32>,
    /// Upper bound applied to the controller output, if any.
    pub output_max: Option<f32>,
    /// Symmetric bound on the accumulated integral, if any.
    pub integral_limit: Option<f32>,
}

impl Default for PidConfig {
    fn default() -> Self {
        Self::new(1.0, 0.0, 0.0)
    }
}

impl PidConfig {
    /// Creates an unbounded config with the given gains.
    #[must_use]
    pub const fn new(kp: f32, ki: f32, kd: f32) -> Self {
        Self {
            kp,
            ki,
            kd,
            output_min: None,
            output_max: None,
            integral_limit: None,
        }
    }

    /// Bounds the controller output to `[min, max]`.
    #[must_use]
    pub const fn with_output_limits(mut self, min: f32, max: f32) -> Self {
        self.output_min = Some(min);
        self.output_max = Some(max);
        self
    }

    /// Bounds the accumulated integral to `[-limit, limit]`.
    ///
    /// # Example
    /// ```
    /// use strider::pid::{PidConfig, PidController};
    ///
    /// let mut pid = PidController::new(PidConfig::new(0.0, 1.0, 0.0).with_integral_limit(1.5));
    /// pid.calculate(2.0, 0.5);
    /// pid.calculate(2.0, 0.5);
    /// assert_eq!(pid.state().integral, 1.5);
    /// ```
    #[must_use]
    pub const fn with_integral_limit(mut self, limit: f32) -> Self {
        self.integral_limit = Some(limit);
        self
    }
}

/// Running state carried between [`PidController::calculate`] calls.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PidState {
    /// Accumulated `error * dt`.
    pub integral: f32,
    /// Error passed to the previous calculation.
    pub previous_error: f32,
}

/// Stateful PID controller.
///
/// Each steering loop owns its own controller; running state is never shared.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PidController {
    config: PidConfig,
    state: PidState,
}

impl PidController {
    /// Creates a controller with fresh running state.
    #[must_use]
    pub const fn new(config: PidConfig) -> Self {
        Self {
            config,
            state: PidState {
                integral: 0.0,
                previous_error: 0.0,
            },
        }
    }

    /// Feeds `error` observed over `dt` seconds and returns the correction.
    ///
    /// A non-positive or non-finite `dt` counts as no elapsed time: the
    /// integral is left alone and the derivative term is zero.
    ///
    /// # Example
    /// ```
    /// use strider::pid::{PidConfig, PidController};
    ///
    /// let mut pid = PidController::new(PidConfig::new(1.0, 0.0, 0.0));
    /// assert_eq!(pid.calculate(10.0, 0.1), 10.0);
    /// assert_eq!(pid.calculate(10.0, 0.1), 10.0);
    /// ```
    pub fn calculate(&mut self, error: f32, dt: f32) -> f32 {
        let elapsed = if dt.is_finite() && dt > 0.0 { dt } else { 0.0 };

        let accumulated = self.state.integral + error * elapsed;
        self.state.integral = match self.config.integral_limit {
            Some(limit) => accumulated.max(-limit.abs()).min(limit.abs()),
            None => accumulated,
        };

        let derivative = if elapsed > 0.0 {
            (error - self.state.previous_error) / elapsed
        } else {
            0.0
        };
        self.state.previous_error = error;

        let PidConfig { kp, ki, kd, .. } = self.config;
        let output = kp * error + ki * self.state.integral + kd * derivative;
        let floored = self.config.output_min.map_or(output, |min| output.max(min));
        self.config.output_max.map_or(floored, |max| floored.min(max))
    }

    /// Clears the integral and previous error for a new control episode.
    pub fn reset(&mut self) {
        self.state = PidState::default();
    }

    /// Current running state.
    #[must_use]
    pub const fn state(&self) -> &PidState {
        &self.state
    }

    /// Gains and clamps this controller was built with.
    #[must_use]
    pub const fn config(&self) -> &PidConfig {
        &self.config
    }
}
