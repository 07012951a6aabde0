//! Idle state: lingers in place and fidgets on a jittered timer.

use crate::command::Command;
use crate::config::IdleRange;
use crate::rig::{AnimationCue, Rig};
use crate::state_machine::{Outcome, State, StateId};

/// Residual wait, in seconds, treated as already elapsed.
const SETTLE_SECONDS: f64 = 1e-5;

/// At-rest behaviour with no physical actuation.
///
/// Elapsed time is summed in `f64` against the sampled wait, so a wait that is
/// a whole number of ticks fires on exactly that tick.
#[derive(Debug, Clone, PartialEq)]
pub struct Standing {
    idle: IdleRange,
    wait: f32,
    waited: f64,
}

impl Standing {
    /// Creates the state; the timer is seeded on entry.
    #[must_use]
    pub const fn new(idle: IdleRange) -> Self {
        Self {
            idle,
            wait: 0.0,
            waited: 0.0,
        }
    }

    /// Seconds left until the next fidget cue.
    #[must_use]
    #[expect(
        clippy::cast_possible_truncation,
        reason = "remaining wait is bounded by the f32 sample"
    )]
    pub fn idle_timer(&self) -> f32 {
        let remaining = f64::from(self.wait) - self.waited;
        if remaining > 0.0 {
            remaining as f32
        } else {
            0.0
        }
    }

    /// Range the idle timer is drawn from.
    #[must_use]
    pub const fn idle_range(&self) -> IdleRange {
        self.idle
    }

    fn reseed(&mut self, rig: &mut Rig<'_>) {
        self.wait = rig.jitter.sample(self.idle.min, self.idle.max);
        self.waited = 0.0;
    }
}

impl State for Standing {
    fn id(&self) -> StateId {
        StateId::Standing
    }

    fn on_enter(&mut self, _previous: Option<StateId>, rig: &mut Rig<'_>) -> bool {
        self.reseed(rig);
        true
    }

    fn on_update(&mut self, rig: &mut Rig<'_>) -> Outcome {
        self.waited += f64::from(rig.elapsed());
        if self.waited + SETTLE_SECONDS >= f64::from(self.wait) {
            rig.animator.trigger(AnimationCue::Linger);
            self.reseed(rig);
        }
        Outcome::Stay
    }

    fn handle_command(&mut self, command: &Command, _rig: &mut Rig<'_>) -> Outcome {
        match command {
            Command::Move(_) => Outcome::goto_with(StateId::Moving, *command),
        }
    }
}
