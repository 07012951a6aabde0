//! Boundary traits for the collaborators the locomotion core drives.
//!
//! The physics integrator, animation player and idle-time randomness belong
//! to the host. States see them only through these traits, bundled per call
//! in a [`Rig`].

use std::fmt;

use glam::Vec3;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::vector_math::WORLD_UP;

/// Named animation cues the states can fire or query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimationCue {
    /// In-place turn played while the actor reorients.
    Turn,
    /// Idle fidget played when the standing timer elapses.
    Linger,
}

impl fmt::Display for AnimationCue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Turn => f.write_str("turn"),
            Self::Linger => f.write_str("linger"),
        }
    }
}

/// Rigid body the actor steers.
///
/// Sensed values are refreshed by the physics layer before each tick.
#[cfg_attr(test, mockall::automock)]
pub trait Body {
    /// Current forward heading as a world-space vector.
    fn forward(&self) -> Vec3;

    /// Local up axis that steering torque is applied about.
    fn up(&self) -> Vec3 {
        WORLD_UP
    }

    /// Current angular velocity in engine units.
    fn angular_velocity(&self) -> Vec3;

    /// Submits a torque for the physics integrator to consume this tick.
    fn apply_torque(&mut self, torque: Vec3);
}

/// Animation playback the states poll and drive.
#[cfg_attr(test, mockall::automock)]
pub trait Animator {
    /// Fire-and-forget request to start `cue`.
    fn trigger(&mut self, cue: AnimationCue);

    /// Whether `cue` is the state currently playing.
    fn is_playing(&self, cue: AnimationCue) -> bool;

    /// Whether a blend away from `cue` is in progress.
    fn is_blending_out(&self, cue: AnimationCue) -> bool;

    /// Locomotion blend parameter as last written.
    fn movement_intensity(&self) -> f32;

    /// Writes the locomotion blend parameter.
    fn set_movement_intensity(&mut self, intensity: f32);
}

/// Source of idle-timer durations.
pub trait IdleJitter {
    /// Draws a duration uniformly from `[min, max]`.
    fn sample(&mut self, min: f32, max: f32) -> f32;
}

/// Deterministic [`IdleJitter`] backed by a seeded `SmallRng`.
///
/// Give each actor its own instance so actors never share RNG state.
#[derive(Debug, Clone)]
pub struct SeededJitter(SmallRng);

impl SeededJitter {
    /// Seeds the generator; the same seed replays the same idle periods.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self(SmallRng::seed_from_u64(seed))
    }
}

impl IdleJitter for SeededJitter {
    fn sample(&mut self, min: f32, max: f32) -> f32 {
        if min < max {
            self.0.gen_range(min..=max)
        } else {
            min
        }
    }
}

/// Collaborators lent to a state for one call.
pub struct Rig<'a> {
    /// Physics body being steered.
    pub body: &'a mut dyn Body,
    /// Animation playback.
    pub animator: &'a mut dyn Animator,
    /// Idle-period randomness.
    pub jitter: &'a mut dyn IdleJitter,
    /// Simulated seconds covered by this call; zero during command dispatch.
    pub dt: f32,
}

impl<'a> Rig<'a> {
    /// Bundles collaborators for a call covering `dt` seconds.
    pub fn new(
        body: &'a mut dyn Body,
        animator: &'a mut dyn Animator,
        jitter: &'a mut dyn IdleJitter,
        dt: f32,
    ) -> Self {
        Self {
            body,
            animator,
            jitter,
            dt,
        }
    }

    /// Timestep with non-positive or non-finite values treated as zero.
    #[must_use]
    pub fn elapsed(&self) -> f32 {
        if self.dt.is_finite() && self.dt > 0.0 {
            self.dt
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_jitter_stays_in_range_and_replays() {
        let mut first = SeededJitter::new(7);
        let mut second = SeededJitter::new(7);
        for _ in 0..64 {
            let sample = first.sample(4.0, 10.0);
            assert!((4.0..=10.0).contains(&sample), "{sample} out of range");
            assert_eq!(sample, second.sample(4.0, 10.0));
        }
    }

    #[test]
    fn collapsed_range_returns_lower_bound() {
        let mut jitter = SeededJitter::new(0);
        assert_eq!(jitter.sample(3.0, 3.0), 3.0);
        assert_eq!(jitter.sample(5.0, 1.0), 5.0);
    }

    #[test]
    fn cue_names_render_lowercase() {
        assert_eq!(AnimationCue::Turn.to_string(), "turn");
        assert_eq!(AnimationCue::Linger.to_string(), "linger");
    }
}
