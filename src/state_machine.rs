//! Hierarchical locomotion state machine.
//!
//! The machine holds only the [`StateId`] of the active state. State
//! instances live in an arena owned by the actor and are reached through
//! [`StateArena`], so the machine never owns or aliases them.
//!
//! States do not call back into the machine. They return an [`Outcome`]
//! from their update and command handlers; the machine performs the
//! requested transition and, once it commits, re-delivers the replay
//! command to the newly active state within the same call.

use std::fmt;

use log::debug;

use crate::command::Command;
use crate::rig::Rig;

/// Identifies one of the mutually exclusive locomotion states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateId {
    /// Idle, lingering in place.
    Standing,
    /// Walking toward a commanded heading.
    Moving,
    /// Reorienting in place before walking resumes.
    Turning,
}

impl StateId {
    /// Every state, in declaration order.
    pub const ALL: [Self; 3] = [Self::Standing, Self::Moving, Self::Turning];
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Standing => f.write_str("standing"),
            Self::Moving => f.write_str("moving"),
            Self::Turning => f.write_str("turning"),
        }
    }
}

/// What a state asks of the machine after handling a call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outcome {
    /// Remain in the current state.
    Stay,
    /// Transition to `next`; if it commits, dispatch `replay` to it.
    Goto {
        /// Requested state.
        next: StateId,
        /// Command re-delivered to `next` once it is active.
        replay: Option<Command>,
    },
}

impl Outcome {
    /// Requests a transition with nothing to replay.
    #[must_use]
    pub const fn goto(next: StateId) -> Self {
        Self::Goto { next, replay: None }
    }

    /// Requests a transition that re-delivers `command` on success.
    #[must_use]
    pub const fn goto_with(next: StateId, command: Command) -> Self {
        Self::Goto {
            next,
            replay: Some(command),
        }
    }
}

/// Lifecycle every locomotion state implements.
pub trait State {
    /// Arena slot this state occupies.
    fn id(&self) -> StateId;

    /// Prepares the state for activation.
    ///
    /// `previous` is the state being left, or `None` when the machine starts.
    /// Returning `false` refuses the transition and leaves the machine where
    /// it was.
    fn on_enter(&mut self, previous: Option<StateId>, rig: &mut Rig<'_>) -> bool;

    /// Per-tick work while active.
    fn on_update(&mut self, rig: &mut Rig<'_>) -> Outcome;

    /// Reacts to a command delivered while active.
    fn handle_command(&mut self, command: &Command, rig: &mut Rig<'_>) -> Outcome;

    /// Called after a transition away from this state has committed.
    fn on_leave(&mut self) {}
}

/// Storage that resolves a [`StateId`] to its state instance.
pub trait StateArena {
    /// Mutable access to the state in slot `id`.
    fn state_mut(&mut self, id: StateId) -> &mut dyn State;
}

/// Tracks the active state and forwards ticks and commands to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateMachine {
    active: StateId,
}

impl StateMachine {
    /// Creates a machine whose active state is `initial`.
    ///
    /// Call [`StateMachine::start`] before the first tick so the initial
    /// state runs its entry hook.
    #[must_use]
    pub const fn new(initial: StateId) -> Self {
        Self { active: initial }
    }

    /// The state currently receiving ticks and commands.
    #[must_use]
    pub const fn active(&self) -> StateId {
        self.active
    }

    /// Runs the initial state's entry hook with no previous state.
    ///
    /// Returns whether the initial state accepted activation.
    pub fn start<A>(&self, states: &mut A, rig: &mut Rig<'_>) -> bool
    where
        A: StateArena + ?Sized,
    {
        let accepted = states.state_mut(self.active).on_enter(None, rig);
        debug!("start in {} (accepted: {accepted})", self.active);
        accepted
    }

    /// Attempts to make `next` the active state.
    ///
    /// Re-entering the active state is a no-op that returns `false`. Otherwise
    /// `next` decides through its entry hook; on refusal nothing changes.
    pub fn change_state<A>(&mut self, next: StateId, states: &mut A, rig: &mut Rig<'_>) -> bool
    where
        A: StateArena + ?Sized,
    {
        let previous = self.active;
        if next == previous {
            return false;
        }
        if !states.state_mut(next).on_enter(Some(previous), rig) {
            debug!("{previous} -> {next} refused");
            return false;
        }
        states.state_mut(previous).on_leave();
        self.active = next;
        debug!("{previous} -> {next}");
        true
    }

    /// Forwards one tick to the active state.
    pub fn update<A>(&mut self, states: &mut A, rig: &mut Rig<'_>)
    where
        A: StateArena + ?Sized,
    {
        let outcome = states.state_mut(self.active).on_update(rig);
        self.follow(outcome, states, rig);
    }

    /// Delivers `command` to the active state.
    pub fn dispatch<A>(&mut self, command: &Command, states: &mut A, rig: &mut Rig<'_>)
    where
        A: StateArena + ?Sized,
    {
        let outcome = states.state_mut(self.active).handle_command(command, rig);
        self.follow(outcome, states, rig);
    }

    fn follow<A>(&mut self, outcome: Outcome, states: &mut A, rig: &mut Rig<'_>)
    where
        A: StateArena + ?Sized,
    {
        let Outcome::Goto { next, replay } = outcome else {
            return;
        };
        if self.change_state(next, states, rig) {
            if let Some(command) = replay {
                self.dispatch(&command, states, rig);
            }
        }
    }
}
