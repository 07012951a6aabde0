//! A locomotion-driven actor: state arena, machine and collaborators.
use log::debug;

use crate::command::Command;
use crate::config::LocomotionConfig;
use crate::rig::{Animator, Body, IdleJitter, Rig};
use crate::state_machine::{StateId, StateMachine};
use crate::states::StateSet;

/// Owns everything one character needs to walk, turn and idle.
///
/// Each actor holds its own states and jitter source, so actors never share
/// mutable state.
#[derive(Debug)]
pub struct Actor<B, A, J> {
    config: LocomotionConfig,
    states: StateSet,
    machine: StateMachine,
    body: B,
    animator: A,
    jitter: J,
}

impl<B, A, J> Actor<B, A, J>
where
    B: Body,
    A: Animator,
    J: IdleJitter,
{
    /// Creates an actor standing idle.
    #[must_use]
    pub fn new(config: LocomotionConfig, body: B, animator: A, jitter: J) -> Self {
        let mut actor = Self {
            states: StateSet::new(&config),
            machine: StateMachine::new(StateId::Standing),
            config,
            body,
            animator,
            jitter,
        };
        let mut rig = Rig::new(
            &mut actor.body,
            &mut actor.animator,
            &mut actor.jitter,
            0.0,
        );
        if !actor.machine.start(&mut actor.states, &mut rig) {
            debug!("initial state refused entry");
        }
        actor
    }

    /// Advances the active state by `dt` simulated seconds.
    pub fn tick(&mut self, dt: f32) {
        let mut rig = Rig::new(&mut self.body, &mut self.animator, &mut self.jitter, dt);
        self.machine.update(&mut self.states, &mut rig);
    }

    /// Delivers `command` to the active state immediately.
    pub fn dispatch(&mut self, incoming: impl Into<Command>) {
        let command = incoming.into();
        let mut rig = Rig::new(&mut self.body, &mut self.animator, &mut self.jitter, 0.0);
        self.machine.dispatch(&command, &mut self.states, &mut rig);
    }

    /// The state currently receiving ticks and commands.
    #[must_use]
    pub const fn active_state(&self) -> StateId {
        self.machine.active()
    }

    /// Read-only view of the state instances.
    #[must_use]
    pub const fn states(&self) -> &StateSet {
        &self.states
    }

    /// Tuning the states were built from.
    #[must_use]
    pub const fn config(&self) -> &LocomotionConfig {
        &self.config
    }

    /// The steered body.
    #[must_use]
    pub const fn body(&self) -> &B {
        &self.body
    }

    /// Mutable access to the body, for the physics layer.
    pub fn body_mut(&mut self) -> &mut B {
        &mut self.body
    }

    /// The animation player.
    #[must_use]
    pub const fn animator(&self) -> &A {
        &self.animator
    }

    /// Mutable access to the animation player.
    pub fn animator_mut(&mut self) -> &mut A {
        &mut self.animator
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::MoveDirective;
    use crate::rig::{MockAnimator, MockBody, SeededJitter};
    use glam::Vec3;

    fn quiet_animator() -> MockAnimator {
        let mut animator = MockAnimator::new();
        animator.expect_trigger().return_const(());
        animator.expect_is_playing().return_const(false);
        animator.expect_is_blending_out().return_const(false);
        animator.expect_movement_intensity().return_const(0.0_f32);
        animator.expect_set_movement_intensity().return_const(());
        animator
    }

    fn still_body() -> MockBody {
        let mut body = MockBody::new();
        body.expect_forward().return_const(Vec3::Z);
        body.expect_up().return_const(Vec3::Y);
        body.expect_angular_velocity().return_const(Vec3::ZERO);
        body.expect_apply_torque().return_const(());
        body
    }

    #[test]
    fn starts_standing_with_seeded_idle_timer() {
        let actor = Actor::new(
            LocomotionConfig::default(),
            still_body(),
            quiet_animator(),
            SeededJitter::new(3),
        );
        assert_eq!(actor.active_state(), StateId::Standing);
        let timer = actor.states().standing().idle_timer();
        assert!((4.0..=10.0).contains(&timer), "{timer} outside idle range");
    }

    #[test]
    fn move_command_is_replayed_into_moving() {
        let mut actor = Actor::new(
            LocomotionConfig::default(),
            still_body(),
            quiet_animator(),
            SeededJitter::new(3),
        );
        let directive = MoveDirective::toward_yaw(20.0);
        actor.dispatch(directive);

        assert_eq!(actor.active_state(), StateId::Moving);
        assert_eq!(actor.states().moving().directive(), Some(directive));
        assert!(actor.states().moving().command_received());
    }
}
