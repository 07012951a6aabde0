//! Headless reference collaborators for demos and scenario tests.
//!
//! None of this is needed to embed the locomotion core in a host engine; it
//! stands in for the physics integrator and animation player so the state
//! machine can be exercised end to end.

mod animator;
mod body;
mod stage;

pub use animator::{TimedAnimator, TurnClip};
pub use body::YawBody;
pub use stage::{SimActor, Stage};
