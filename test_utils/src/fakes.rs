//! Recording fakes for [`Body`], [`Animator`] and [`IdleJitter`].

use glam::Vec3;
use strider::vector_math::forward_from_yaw;
use strider::{AnimationCue, Animator, Body, IdleJitter};

/// Body whose sensed values are set directly by the test.
#[derive(Clone, Debug)]
pub struct StubBody {
    pub forward: Vec3,
    pub up: Vec3,
    pub angular_velocity: Vec3,
    pub torques: Vec<Vec3>,
}

impl StubBody {
    /// Create a body at rest facing `yaw` degrees.
    ///
    /// # Examples
    /// ```
    /// use test_utils::StubBody;
    /// let body = StubBody::facing(0.0);
    /// assert!((body.forward.z - 1.0).abs() < 1e-6);
    /// ```
    pub fn facing(yaw: f32) -> Self {
        Self {
            forward: forward_from_yaw(yaw),
            up: Vec3::Y,
            angular_velocity: Vec3::ZERO,
            torques: Vec::new(),
        }
    }

    /// Set the sensed spin about +Y.
    pub fn spinning(mut self, rate: f32) -> Self {
        self.angular_velocity = Vec3::new(0.0, rate, 0.0);
        self
    }

    /// Torque applied most recently, if any.
    pub fn last_torque(&self) -> Option<Vec3> {
        self.torques.last().copied()
    }
}

impl Default for StubBody {
    fn default() -> Self {
        Self::facing(0.0)
    }
}

impl Body for StubBody {
    fn forward(&self) -> Vec3 {
        self.forward
    }

    fn up(&self) -> Vec3 {
        self.up
    }

    fn angular_velocity(&self) -> Vec3 {
        self.angular_velocity
    }

    fn apply_torque(&mut self, torque: Vec3) {
        self.torques.push(torque);
    }
}

/// Animator whose playback flags are flipped by the test.
#[derive(Clone, Debug, Default)]
pub struct ScriptedAnimator {
    pub turn_playing: bool,
    pub turn_blending_out: bool,
    pub intensity: f32,
    pub cues: Vec<AnimationCue>,
    pub intensity_writes: Vec<f32>,
}

impl ScriptedAnimator {
    /// Report the turn cue as started.
    pub fn start_turn(&mut self) {
        self.turn_playing = true;
        self.turn_blending_out = false;
    }

    /// Report a blend away from the turn cue.
    pub fn blend_out_turn(&mut self) {
        self.turn_playing = true;
        self.turn_blending_out = true;
    }

    /// Return to no turn activity.
    pub fn finish_turn(&mut self) {
        self.turn_playing = false;
        self.turn_blending_out = false;
    }

    /// Number of times `cue` was triggered.
    pub fn count(&self, cue: AnimationCue) -> usize {
        self.cues.iter().filter(|fired| **fired == cue).count()
    }
}

impl Animator for ScriptedAnimator {
    fn trigger(&mut self, cue: AnimationCue) {
        self.cues.push(cue);
    }

    fn is_playing(&self, cue: AnimationCue) -> bool {
        cue == AnimationCue::Turn && self.turn_playing
    }

    fn is_blending_out(&self, cue: AnimationCue) -> bool {
        cue == AnimationCue::Turn && self.turn_blending_out
    }

    fn movement_intensity(&self) -> f32 {
        self.intensity
    }

    fn set_movement_intensity(&mut self, intensity: f32) {
        self.intensity = intensity;
        self.intensity_writes.push(intensity);
    }
}

/// Jitter that always returns the same duration, clamped into range.
#[derive(Clone, Copy, Debug)]
pub struct FixedJitter(pub f32);

impl IdleJitter for FixedJitter {
    fn sample(&mut self, min: f32, max: f32) -> f32 {
        self.0.clamp(min, max.max(min))
    }
}
