//! Locomotion core for a simulated actor.
//!
//! A small state machine picks between standing, moving and turning each
//! tick, and while moving two PID loops turn a commanded heading into torque
//! about the body's up axis. The physics body, animation player and idle-time
//! randomness are reached through the traits in [`rig`]; [`sim`] provides
//! headless stand-ins for all three.
pub mod actor;
pub mod command;
pub mod config;
pub mod constants;
pub mod logging;
pub mod pid;
pub mod rig;
pub mod sim;
pub mod state_machine;
pub mod states;
pub mod vector_math;
pub use constants::*;

// Re-export commonly used items
pub use actor::Actor;
pub use command::{Command, MoveDirective};
pub use config::{ConfigError, IdleRange, LocomotionConfig};
pub use logging::init as init_logging;
pub use pid::{PidConfig, PidController, PidState};
pub use rig::{AnimationCue, Animator, Body, IdleJitter, Rig, SeededJitter};
pub use state_machine::{Outcome, State, StateArena, StateId, StateMachine};
pub use states::{Moving, Standing, StateSet, TurnPhase, Turning};
pub use vector_math::{delta_angle, move_towards, signed_angle, yaw_degrees};

pub mod prelude {
    //! Prelude exports used in documentation examples.
    //!
    //! ```rust
    //! use strider::prelude::*;
    //!
    //! let mut actor = Actor::new(
    //!     LocomotionConfig::default(),
    //!     YawBody::default(),
    //!     TimedAnimator::default(),
    //!     SeededJitter::new(7),
    //! );
    //! actor.dispatch(MoveDirective::toward_yaw(45.0));
    //! assert_eq!(actor.active_state(), StateId::Moving);
    //! ```

    pub use crate::sim::{Stage, TimedAnimator, YawBody};
    pub use crate::Actor;
    pub use crate::Command;
    pub use crate::LocomotionConfig;
    pub use crate::MoveDirective;
    pub use crate::SeededJitter;
    pub use crate::StateId;
}
