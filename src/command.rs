//! Commands delivered to the active locomotion state.
//!
//! Commands come from input handling or AI and are dispatched synchronously;
//! nothing is queued. Each state matches [`Command`] exhaustively, so adding
//! a variant forces every state to decide how it reacts.

use glam::Vec3;
use log::warn;

use crate::vector_math::{forward_from_yaw, yaw_degrees};

/// A directive for the active state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Walk toward a world-space direction.
    Move(MoveDirective),
}

impl From<MoveDirective> for Command {
    fn from(directive: MoveDirective) -> Self {
        Self::Move(directive)
    }
}

/// Desired walking direction.
///
/// The direction is normalised on construction. Input that cannot be
/// normalised is stored as the zero vector, which carries no heading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveDirective {
    direction: Vec3,
}

impl MoveDirective {
    /// Builds a directive from any world-space vector.
    #[must_use]
    pub fn new(direction: Vec3) -> Self {
        let normalised = if direction.is_finite() {
            direction.try_normalize()
        } else {
            None
        };
        if normalised.is_none() {
            warn!("move directive {direction:?} has no usable direction");
        }
        Self {
            direction: normalised.unwrap_or(Vec3::ZERO),
        }
    }

    /// Builds a directive pointing along the given world yaw in degrees.
    #[must_use]
    pub fn toward_yaw(yaw: f32) -> Self {
        Self::new(forward_from_yaw(yaw))
    }

    /// Unit direction, or zero when the input was degenerate.
    #[must_use]
    pub const fn direction(&self) -> Vec3 {
        self.direction
    }

    /// World yaw of the direction in degrees, if it has a horizontal part.
    #[must_use]
    pub fn heading_degrees(&self) -> Option<f32> {
        yaw_degrees(self.direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn direction_is_normalised() {
        let directive = MoveDirective::new(Vec3::new(0.0, 0.0, 5.0));
        assert_eq!(directive.direction(), Vec3::Z);
    }

    #[test]
    fn degenerate_direction_has_no_heading() {
        assert_eq!(MoveDirective::new(Vec3::ZERO).direction(), Vec3::ZERO);
        assert!(MoveDirective::new(Vec3::ZERO).heading_degrees().is_none());
        assert!(MoveDirective::new(Vec3::splat(f32::INFINITY))
            .heading_degrees()
            .is_none());
    }

    #[test]
    fn toward_yaw_reports_same_heading() {
        let heading = MoveDirective::toward_yaw(-60.0)
            .heading_degrees()
            .unwrap_or(f32::NAN);
        assert_relative_eq!(heading, -60.0, epsilon = 1e-3);
    }

    #[test]
    fn directive_converts_into_command() {
        let directive = MoveDirective::toward_yaw(0.0);
        assert_eq!(Command::from(directive), Command::Move(directive));
    }
}
