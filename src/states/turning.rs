//! In-place reorientation driven by the turn animation's root motion.

use log::warn;

use crate::command::{Command, MoveDirective};
use crate::rig::{AnimationCue, Rig};
use crate::state_machine::{Outcome, State, StateId};

/// Progress through the turn animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnPhase {
    /// Turn cue fired; waiting for the animator to start playing it.
    AwaitingStart,
    /// Turn is playing; waiting for it to blend out.
    Running,
}

/// Plays the turn animation and hands control back once it blends out.
#[derive(Debug, Clone, PartialEq)]
pub struct Turning {
    post_turn_intensity: f32,
    phase: TurnPhase,
    return_to: Option<StateId>,
    cached: Option<MoveDirective>,
}

impl Turning {
    /// Creates the state; `post_turn_intensity` is written when the turn starts.
    #[must_use]
    pub const fn new(post_turn_intensity: f32) -> Self {
        Self {
            post_turn_intensity,
            phase: TurnPhase::AwaitingStart,
            return_to: None,
            cached: None,
        }
    }

    /// Current phase of the turn.
    #[must_use]
    pub const fn phase(&self) -> TurnPhase {
        self.phase
    }

    /// Latest directive received during the turn.
    #[must_use]
    pub const fn cached_directive(&self) -> Option<MoveDirective> {
        self.cached
    }

    /// State resumed when the turn completes.
    #[must_use]
    pub const fn return_to(&self) -> Option<StateId> {
        self.return_to
    }
}

impl State for Turning {
    fn id(&self) -> StateId {
        StateId::Turning
    }

    fn on_enter(&mut self, previous: Option<StateId>, rig: &mut Rig<'_>) -> bool {
        let Some(caller) = previous else {
            warn!("turning needs a state to return to; refusing entry");
            return false;
        };
        self.return_to = Some(caller);
        self.cached = None;
        self.phase = TurnPhase::AwaitingStart;
        rig.animator.trigger(AnimationCue::Turn);
        true
    }

    fn on_update(&mut self, rig: &mut Rig<'_>) -> Outcome {
        match self.phase {
            TurnPhase::AwaitingStart => {
                if rig.animator.is_playing(AnimationCue::Turn) {
                    self.phase = TurnPhase::Running;
                    rig.animator.set_movement_intensity(self.post_turn_intensity);
                }
                Outcome::Stay
            }
            TurnPhase::Running => {
                if !rig.animator.is_blending_out(AnimationCue::Turn) {
                    return Outcome::Stay;
                }
                self.return_to.map_or(Outcome::Stay, |next| Outcome::Goto {
                    next,
                    replay: self.cached.map(Command::Move),
                })
            }
        }
    }

    fn handle_command(&mut self, command: &Command, _rig: &mut Rig<'_>) -> Outcome {
        match command {
            Command::Move(directive) => self.cached = Some(*directive),
        }
        Outcome::Stay
    }

    fn on_leave(&mut self) {
        self.return_to = None;
        self.cached = None;
        self.phase = TurnPhase::AwaitingStart;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rig::{IdleJitter, MockAnimator, MockBody};
    use mockall::predicate::eq;

    struct NoJitter;

    impl IdleJitter for NoJitter {
        fn sample(&mut self, min: f32, _max: f32) -> f32 {
            min
        }
    }

    #[test]
    fn refuses_entry_without_previous_state() {
        let mut body = MockBody::new();
        let mut animator = MockAnimator::new();
        animator.expect_trigger().never();
        let mut jitter = NoJitter;
        let mut rig = Rig::new(&mut body, &mut animator, &mut jitter, 0.0);
        let mut state = Turning::new(0.6);

        assert!(!state.on_enter(None, &mut rig));
        assert_eq!(state.return_to(), None);
    }

    #[test]
    fn entry_fires_turn_cue_and_remembers_caller() {
        let mut body = MockBody::new();
        let mut animator = MockAnimator::new();
        animator
            .expect_trigger()
            .with(eq(AnimationCue::Turn))
            .times(1)
            .return_const(());
        let mut jitter = NoJitter;
        let mut rig = Rig::new(&mut body, &mut animator, &mut jitter, 0.0);
        let mut state = Turning::new(0.6);

        assert!(state.on_enter(Some(StateId::Moving), &mut rig));
        assert_eq!(state.return_to(), Some(StateId::Moving));
        assert_eq!(state.phase(), TurnPhase::AwaitingStart);
    }

    #[test]
    fn playing_turn_sets_post_turn_intensity_once() {
        let mut body = MockBody::new();
        let mut animator = MockAnimator::new();
        animator.expect_trigger().return_const(());
        animator.expect_is_playing().return_const(true);
        animator.expect_is_blending_out().return_const(false);
        animator
            .expect_set_movement_intensity()
            .with(eq(0.6))
            .times(1)
            .return_const(());
        let mut jitter = NoJitter;
        let mut rig = Rig::new(&mut body, &mut animator, &mut jitter, 0.1);
        let mut state = Turning::new(0.6);
        state.on_enter(Some(StateId::Moving), &mut rig);

        assert_eq!(state.on_update(&mut rig), Outcome::Stay);
        assert_eq!(state.phase(), TurnPhase::Running);
        assert_eq!(state.on_update(&mut rig), Outcome::Stay);
    }

    #[test]
    fn blend_out_returns_with_latest_cached_directive() {
        let mut body = MockBody::new();
        let mut animator = MockAnimator::new();
        animator.expect_trigger().return_const(());
        animator.expect_is_playing().return_const(true);
        animator.expect_is_blending_out().return_const(true);
        animator.expect_set_movement_intensity().return_const(());
        let mut jitter = NoJitter;
        let mut rig = Rig::new(&mut body, &mut animator, &mut jitter, 0.1);
        let mut state = Turning::new(0.6);
        state.on_enter(Some(StateId::Moving), &mut rig);

        let first = MoveDirective::toward_yaw(90.0);
        let latest = MoveDirective::toward_yaw(120.0);
        state.handle_command(&Command::Move(first), &mut rig);
        state.handle_command(&Command::Move(latest), &mut rig);
        assert_eq!(state.cached_directive(), Some(latest));

        state.on_update(&mut rig);
        assert_eq!(
            state.on_update(&mut rig),
            Outcome::goto_with(StateId::Moving, Command::Move(latest))
        );
    }

    #[test]
    fn blend_out_without_commands_returns_bare() {
        let mut body = MockBody::new();
        let mut animator = MockAnimator::new();
        animator.expect_trigger().return_const(());
        animator.expect_is_playing().return_const(true);
        animator.expect_is_blending_out().return_const(true);
        animator.expect_set_movement_intensity().return_const(());
        let mut jitter = NoJitter;
        let mut rig = Rig::new(&mut body, &mut animator, &mut jitter, 0.1);
        let mut state = Turning::new(0.6);
        state.on_enter(Some(StateId::Moving), &mut rig);

        state.on_update(&mut rig);
        assert_eq!(state.on_update(&mut rig), Outcome::goto(StateId::Moving));
    }

    #[test]
    fn leaving_clears_turn_context() {
        let mut body = MockBody::new();
        let mut animator = MockAnimator::new();
        animator.expect_trigger().return_const(());
        let mut jitter = NoJitter;
        let mut rig = Rig::new(&mut body, &mut animator, &mut jitter, 0.0);
        let mut state = Turning::new(0.6);
        state.on_enter(Some(StateId::Moving), &mut rig);
        state.handle_command(&Command::Move(MoveDirective::toward_yaw(10.0)), &mut rig);

        state.on_leave();
        assert_eq!(state.return_to(), None);
        assert_eq!(state.cached_directive(), None);
        assert_eq!(state.phase(), TurnPhase::AwaitingStart);
    }
}
