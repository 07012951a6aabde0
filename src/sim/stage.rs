//! Fixed-order driver for a headless actor.

use crate::actor::Actor;
use crate::command::Command;
use crate::config::LocomotionConfig;
use crate::rig::SeededJitter;
use crate::state_machine::StateId;

use super::{TimedAnimator, YawBody};

/// Actor wired to the reference body and animator.
pub type SimActor = Actor<YawBody, TimedAnimator, SeededJitter>;

/// Runs one actor against [`YawBody`] and [`TimedAnimator`].
///
/// Each step runs, in order: command dispatch, the actor tick, animation
/// playback (whose root motion rotates the body) and body integration.
#[derive(Debug)]
pub struct Stage {
    actor: SimActor,
    ticks: u64,
    elapsed: f32,
}

impl Stage {
    /// Builds a stage around a fresh actor standing idle.
    #[must_use]
    pub fn new(config: LocomotionConfig, body: YawBody, animator: TimedAnimator, seed: u64) -> Self {
        Self {
            actor: Actor::new(config, body, animator, SeededJitter::new(seed)),
            ticks: 0,
            elapsed: 0.0,
        }
    }

    /// Advances the simulation by `dt` seconds, delivering `command` first.
    pub fn step(&mut self, dt: f32, command: Option<Command>) -> StateId {
        if let Some(issued) = command {
            self.actor.dispatch(issued);
        }
        self.actor.tick(dt);
        let root_yaw = self.actor.animator_mut().advance(dt);
        let body = self.actor.body_mut();
        body.rotate(root_yaw);
        body.integrate(dt);
        self.ticks += 1;
        if dt.is_finite() && dt > 0.0 {
            self.elapsed += dt;
        }
        self.actor.active_state()
    }

    /// Steps until `done` holds for the active state or `max_ticks` pass.
    ///
    /// Returns the number of steps taken.
    pub fn run_until(
        &mut self,
        dt: f32,
        max_ticks: u64,
        mut command: impl FnMut(u64) -> Option<Command>,
        mut done: impl FnMut(StateId) -> bool,
    ) -> u64 {
        let mut taken = 0;
        while taken < max_ticks {
            let issued = command(self.ticks);
            let state = self.step(dt, issued);
            taken += 1;
            if done(state) {
                break;
            }
        }
        taken
    }

    /// The simulated actor.
    #[must_use]
    pub const fn actor(&self) -> &SimActor {
        &self.actor
    }

    /// Steps taken so far.
    #[must_use]
    pub const fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Simulated seconds elapsed.
    #[must_use]
    pub const fn elapsed(&self) -> f32 {
        self.elapsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::MoveDirective;

    #[test]
    fn idle_stage_stays_standing() {
        let mut stage = Stage::new(
            LocomotionConfig::default(),
            YawBody::default(),
            TimedAnimator::default(),
            1,
        );
        for _ in 0..30 {
            assert_eq!(stage.step(0.05, None), StateId::Standing);
        }
        assert_eq!(stage.ticks(), 30);
    }

    #[test]
    fn walking_then_releasing_returns_to_standing() {
        let mut stage = Stage::new(
            LocomotionConfig::default(),
            YawBody::default(),
            TimedAnimator::default(),
            1,
        );
        let walk = Command::Move(MoveDirective::toward_yaw(30.0));
        assert_eq!(stage.step(0.05, Some(walk)), StateId::Moving);

        let taken = stage.run_until(0.05, 400, |_| None, |state| state == StateId::Standing);
        assert!(taken < 400, "actor never came to rest");
        assert_eq!(stage.actor().active_state(), StateId::Standing);
    }
}
