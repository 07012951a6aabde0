//! Default locomotion tuning values.
//!
//! These seed [`LocomotionConfig::default`](crate::config::LocomotionConfig)
//! and are exported so tests and tools can reason about the stock behaviour
//! without constructing a config.

/// Shortest idle period before a fidget cue, in simulated seconds.
pub const IDLE_SECONDS_MIN: f32 = 4.0;
/// Longest idle period before a fidget cue, in simulated seconds.
pub const IDLE_SECONDS_MAX: f32 = 10.0;
/// Movement intensity change per simulated second while ramping.
pub const INTENSITY_RAMP_PER_SECOND: f32 = 1.0;
/// Heading deviation at which walking gives way to an in-place turn.
pub const TURN_THRESHOLD_DEGREES: f32 = 100.0;
/// Angular speed at or below which a coasting actor may settle.
pub const STOP_ANGULAR_SPEED: f32 = 0.1;
/// Movement intensity written once the turn animation is observed playing.
pub const POST_TURN_INTENSITY: f32 = 0.6;
/// Slack applied to heading comparisons to absorb trigonometric round-off.
pub const ANGLE_TOLERANCE_DEGREES: f32 = 1e-4;

/// Proportional gain of the heading-angle loop.
pub const HEADING_KP: f32 = 0.2;
/// Integral gain of the heading-angle loop.
pub const HEADING_KI: f32 = 0.02;
/// Derivative gain of the heading-angle loop.
pub const HEADING_KD: f32 = 0.05;
/// Integral clamp of the heading-angle loop, in degree-seconds.
pub const HEADING_INTEGRAL_LIMIT: f32 = 90.0;

/// Proportional gain of the angular-velocity damping loop.
pub const DAMPING_KP: f32 = 4.0;
/// Integral gain of the angular-velocity damping loop.
pub const DAMPING_KI: f32 = 0.0;
/// Derivative gain of the angular-velocity damping loop.
pub const DAMPING_KD: f32 = 0.0;
/// Integral clamp of the angular-velocity damping loop.
pub const DAMPING_INTEGRAL_LIMIT: f32 = 10.0;
