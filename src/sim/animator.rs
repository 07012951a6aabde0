//! Clock-driven stand-in for an animation player.

use log::trace;

use crate::rig::{AnimationCue, Animator};

/// Remaining time below this counts as elapsed, absorbing float drift.
const SETTLE_SECONDS: f32 = 1e-5;

/// Timing of the turn clip played by [`TimedAnimator`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TurnClip {
    /// Seconds between the trigger and the clip becoming the playing state.
    pub start_delay: f32,
    /// Seconds the clip plays before blending out.
    pub play_duration: f32,
    /// Seconds spent blending away from the clip.
    pub blend_duration: f32,
    /// Root-motion yaw delivered over the play duration, in degrees.
    pub root_yaw_degrees: f32,
}

impl Default for TurnClip {
    fn default() -> Self {
        Self {
            start_delay: 0.1,
            play_duration: 0.8,
            blend_duration: 0.2,
            root_yaw_degrees: 180.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Playback {
    Idle,
    Pending { remaining: f32 },
    Playing { remaining: f32 },
    BlendingOut { remaining: f32 },
}

/// Plays the turn clip on a timer and records every other cue.
#[derive(Debug, Clone, PartialEq)]
pub struct TimedAnimator {
    clip: TurnClip,
    playback: Playback,
    intensity: f32,
    lingers: usize,
    turns: usize,
}

impl TimedAnimator {
    /// Creates an idle animator for `clip`.
    #[must_use]
    pub const fn new(clip: TurnClip) -> Self {
        Self {
            clip,
            playback: Playback::Idle,
            intensity: 0.0,
            lingers: 0,
            turns: 0,
        }
    }

    /// Number of fidget cues received.
    #[must_use]
    pub const fn lingers(&self) -> usize {
        self.lingers
    }

    /// Number of turn cues received.
    #[must_use]
    pub const fn turns(&self) -> usize {
        self.turns
    }

    /// Advances playback by `dt` seconds and returns the root-motion yaw,
    /// in degrees, to apply to the body for this step.
    pub fn advance(&mut self, dt: f32) -> f32 {
        if !(dt.is_finite() && dt > 0.0) {
            return 0.0;
        }
        let clip = self.clip;
        let (next, root_yaw) = match self.playback {
            Playback::Idle => (Playback::Idle, 0.0),
            Playback::Pending { remaining } if remaining - dt > SETTLE_SECONDS => {
                (Playback::Pending { remaining: remaining - dt }, 0.0)
            }
            Playback::Pending { .. } => (
                Playback::Playing {
                    remaining: clip.play_duration,
                },
                0.0,
            ),
            Playback::Playing { remaining } => {
                let step = dt.min(remaining);
                let share = if clip.play_duration > 0.0 {
                    step / clip.play_duration
                } else {
                    1.0
                };
                let left = remaining - step;
                let next = if left > SETTLE_SECONDS {
                    Playback::Playing { remaining: left }
                } else {
                    Playback::BlendingOut {
                        remaining: clip.blend_duration,
                    }
                };
                (next, clip.root_yaw_degrees * share)
            }
            Playback::BlendingOut { remaining } if remaining - dt > SETTLE_SECONDS => (
                Playback::BlendingOut {
                    remaining: remaining - dt,
                },
                0.0,
            ),
            Playback::BlendingOut { .. } => (Playback::Idle, 0.0),
        };
        if next != self.playback {
            trace!("turn clip {:?} -> {next:?}", self.playback);
        }
        self.playback = next;
        root_yaw
    }
}

impl Default for TimedAnimator {
    fn default() -> Self {
        Self::new(TurnClip::default())
    }
}

impl Animator for TimedAnimator {
    fn trigger(&mut self, cue: AnimationCue) {
        match cue {
            AnimationCue::Turn => {
                self.turns += 1;
                self.playback = Playback::Pending {
                    remaining: self.clip.start_delay,
                };
            }
            AnimationCue::Linger => self.lingers += 1,
        }
    }

    fn is_playing(&self, cue: AnimationCue) -> bool {
        match cue {
            AnimationCue::Turn => matches!(
                self.playback,
                Playback::Playing { .. } | Playback::BlendingOut { .. }
            ),
            AnimationCue::Linger => false,
        }
    }

    fn is_blending_out(&self, cue: AnimationCue) -> bool {
        match cue {
            AnimationCue::Turn => matches!(self.playback, Playback::BlendingOut { .. }),
            AnimationCue::Linger => false,
        }
    }

    fn movement_intensity(&self) -> f32 {
        self.intensity
    }

    fn set_movement_intensity(&mut self, intensity: f32) {
        self.intensity = intensity.clamp(0.0, 1.0);
    }
}
