//! Utility helpers for tests.
//!
//! Deterministic stand-ins for the collaborators the locomotion states
//! drive. Every fake records what it was asked to do so tests can assert on
//! it afterwards.

pub mod fakes;

pub use fakes::{FixedJitter, ScriptedAnimator, StubBody};

use strider::{Command, MoveDirective};

/// Move command toward `yaw` degrees.
///
/// # Examples
/// ```
/// use strider::Command;
/// let Command::Move(directive) = test_utils::walk(90.0);
/// assert!((directive.direction().x - 1.0).abs() < 1e-5);
/// ```
#[must_use]
pub fn walk(yaw: f32) -> Command {
    Command::Move(MoveDirective::toward_yaw(yaw))
}
