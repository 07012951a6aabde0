//! The three concrete locomotion states and the arena that owns them.

mod moving;
mod standing;
mod turning;

pub use moving::Moving;
pub use standing::Standing;
pub use turning::{TurnPhase, Turning};

use crate::config::LocomotionConfig;
use crate::state_machine::{State, StateArena, StateId};

/// One instance of each state, owned per actor.
#[derive(Debug, Clone, PartialEq)]
pub struct StateSet {
    standing: Standing,
    moving: Moving,
    turning: Turning,
}

impl StateSet {
    /// Builds every state from the shared tuning.
    #[must_use]
    pub const fn new(config: &LocomotionConfig) -> Self {
        Self {
            standing: Standing::new(config.idle_seconds),
            moving: Moving::new(config),
            turning: Turning::new(config.post_turn_intensity),
        }
    }

    /// The idle state.
    #[must_use]
    pub const fn standing(&self) -> &Standing {
        &self.standing
    }

    /// The walking state.
    #[must_use]
    pub const fn moving(&self) -> &Moving {
        &self.moving
    }

    /// The in-place turn state.
    #[must_use]
    pub const fn turning(&self) -> &Turning {
        &self.turning
    }
}

impl StateArena for StateSet {
    fn state_mut(&mut self, id: StateId) -> &mut dyn State {
        match id {
            StateId::Standing => &mut self.standing,
            StateId::Moving => &mut self.moving,
            StateId::Turning => &mut self.turning,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arena_resolves_each_slot_to_matching_state() {
        let mut states = StateSet::new(&LocomotionConfig::default());
        for id in StateId::ALL {
            assert_eq!(states.state_mut(id).id(), id);
        }
    }
}
