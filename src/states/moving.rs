//! Directed locomotion steered by two PID loops.
//!
//! Each tick the heading loop turns the angle between the body's yaw and the
//! commanded heading into torque, and the damping loop opposes the body's
//! current yaw rate. Their sum is applied about the body's up axis.

use glam::Vec3;
use log::trace;

use crate::command::{Command, MoveDirective};
use crate::config::LocomotionConfig;
use crate::constants::ANGLE_TOLERANCE_DEGREES;
use crate::pid::PidController;
use crate::rig::Rig;
use crate::state_machine::{Outcome, State, StateId};
use crate::vector_math::{delta_angle, move_towards, signed_angle, yaw_degrees, WORLD_UP};

/// Walking state with physically simulated steering.
#[derive(Debug, Clone, PartialEq)]
pub struct Moving {
    ramp_per_second: f32,
    turn_threshold: f32,
    stop_angular_speed: f32,
    heading: PidController,
    damping: PidController,
    directive: Option<MoveDirective>,
    received: bool,
    last_torque: Vec3,
}

impl Moving {
    /// Builds the state and its two controllers from `config`.
    #[must_use]
    pub const fn new(config: &LocomotionConfig) -> Self {
        Self {
            ramp_per_second: config.intensity_ramp_per_second,
            turn_threshold: config.turn_threshold_degrees,
            stop_angular_speed: config.stop_angular_speed,
            heading: PidController::new(config.heading_pid),
            damping: PidController::new(config.damping_pid),
            directive: None,
            received: false,
            last_torque: Vec3::ZERO,
        }
    }

    /// Most recent directive, kept as the steering target while coasting.
    #[must_use]
    pub const fn directive(&self) -> Option<MoveDirective> {
        self.directive
    }

    /// Whether a directive arrived since the last update.
    #[must_use]
    pub const fn command_received(&self) -> bool {
        self.received
    }

    /// Torque applied by the most recent update.
    #[must_use]
    pub const fn last_torque(&self) -> Vec3 {
        self.last_torque
    }

    /// Heading-angle loop.
    #[must_use]
    pub const fn heading_pid(&self) -> &PidController {
        &self.heading
    }

    /// Angular-velocity damping loop.
    #[must_use]
    pub const fn damping_pid(&self) -> &PidController {
        &self.damping
    }

    fn walk(&mut self, rig: &mut Rig<'_>, step: f32) -> Outcome {
        let intensity = move_towards(rig.animator.movement_intensity(), 1.0, step);
        rig.animator.set_movement_intensity(intensity);

        let deviation = self
            .directive
            .and_then(|directive| signed_angle(rig.body.forward(), directive.direction()))
            .unwrap_or(0.0);
        if deviation.abs() >= self.turn_threshold - ANGLE_TOLERANCE_DEGREES {
            return Outcome::goto(StateId::Turning);
        }

        self.steer(rig);
        Outcome::Stay
    }

    #[expect(
        clippy::float_cmp,
        reason = "move_towards lands exactly on its target, so zero is reached exactly."
    )]
    fn coast(&mut self, rig: &mut Rig<'_>, step: f32) -> Outcome {
        let intensity = move_towards(rig.animator.movement_intensity(), 0.0, step);
        rig.animator.set_movement_intensity(intensity);

        let settled = rig.body.angular_velocity().length() <= self.stop_angular_speed;
        if intensity == 0.0 && settled {
            return Outcome::goto(StateId::Standing);
        }

        self.steer(rig);
        Outcome::Stay
    }

    fn steer(&mut self, rig: &mut Rig<'_>) {
        let dt = rig.elapsed();
        let target = self.directive.and_then(|directive| directive.heading_degrees());
        let angle_error = match (yaw_degrees(rig.body.forward()), target) {
            (Some(current), Some(wanted)) => delta_angle(current, wanted),
            _ => 0.0,
        };
        let from_angle = self.heading.calculate(angle_error, dt);

        let up = rig.body.up().try_normalize().unwrap_or(WORLD_UP);
        let yaw_rate = rig.body.angular_velocity().dot(up);
        let from_damping = self.damping.calculate(-yaw_rate, dt);

        let torque = up * (from_angle + from_damping);
        rig.body.apply_torque(torque);
        self.last_torque = torque;
        trace!("steer: error {angle_error:.3} deg, rate {yaw_rate:.3}, torque {torque:?}");
    }
}

impl State for Moving {
    fn id(&self) -> StateId {
        StateId::Moving
    }

    fn on_enter(&mut self, _previous: Option<StateId>, _rig: &mut Rig<'_>) -> bool {
        self.heading.reset();
        self.damping.reset();
        self.directive = None;
        self.received = false;
        self.last_torque = Vec3::ZERO;
        true
    }

    fn on_update(&mut self, rig: &mut Rig<'_>) -> Outcome {
        let step = self.ramp_per_second * rig.elapsed();
        let outcome = if self.received {
            self.walk(rig, step)
        } else {
            self.coast(rig, step)
        };
        self.received = false;
        outcome
    }

    fn handle_command(&mut self, command: &Command, _rig: &mut Rig<'_>) -> Outcome {
        match command {
            Command::Move(directive) => {
                self.directive = Some(*directive);
                self.received = true;
            }
        }
        Outcome::Stay
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pid::PidConfig;
    use crate::rig::{IdleJitter, MockAnimator, MockBody};
    use approx::assert_relative_eq;
    use mockall::predicate::eq;

    struct NoJitter;

    impl IdleJitter for NoJitter {
        fn sample(&mut self, min: f32, _max: f32) -> f32 {
            min
        }
    }

    fn proportional_config() -> LocomotionConfig {
        LocomotionConfig {
            heading_pid: PidConfig::new(1.0, 0.0, 0.0),
            damping_pid: PidConfig::new(2.0, 0.0, 0.0),
            ..LocomotionConfig::default()
        }
    }

    fn body_facing_z(spin: f32) -> MockBody {
        let mut body = MockBody::new();
        body.expect_forward().return_const(Vec3::Z);
        body.expect_up().return_const(Vec3::Y);
        body.expect_angular_velocity()
            .return_const(Vec3::new(0.0, spin, 0.0));
        body
    }

    fn animator_at(intensity: f32) -> MockAnimator {
        let mut animator = MockAnimator::new();
        animator
            .expect_movement_intensity()
            .return_const(intensity);
        animator
    }

    fn entered(config: &LocomotionConfig, rig: &mut Rig<'_>) -> Moving {
        let mut state = Moving::new(config);
        assert!(state.on_enter(Some(StateId::Standing), rig));
        state
    }

    #[test]
    fn commanded_update_ramps_up_and_applies_summed_torque() {
        let mut body = body_facing_z(0.5);
        body.expect_apply_torque()
            .withf(|torque| (*torque - Vec3::new(0.0, 29.0, 0.0)).length() < 1e-3)
            .times(1)
            .return_const(());
        let mut animator = animator_at(0.2);
        animator
            .expect_set_movement_intensity()
            .withf(|intensity| (intensity - 0.3).abs() < 1e-6)
            .times(1)
            .return_const(());
        let mut jitter = NoJitter;
        let mut rig = Rig::new(&mut body, &mut animator, &mut jitter, 0.1);
        let mut state = entered(&proportional_config(), &mut rig);

        state.handle_command(&Command::Move(MoveDirective::toward_yaw(30.0)), &mut rig);
        assert!(state.command_received());

        assert_eq!(state.on_update(&mut rig), Outcome::Stay);
        // 30 deg * kp 1 plus damping 2 * -0.5.
        assert_relative_eq!(state.last_torque().y, 29.0, epsilon = 1e-3);
        assert!(!state.command_received());
    }

    #[test]
    fn large_deviation_requests_turn_without_torque() {
        let mut body = body_facing_z(0.0);
        body.expect_apply_torque().never();
        let mut animator = animator_at(1.0);
        animator
            .expect_set_movement_intensity()
            .with(eq(1.0))
            .times(1)
            .return_const(());
        let mut jitter = NoJitter;
        let mut rig = Rig::new(&mut body, &mut animator, &mut jitter, 0.1);
        let mut state = entered(&proportional_config(), &mut rig);

        state.handle_command(&Command::Move(MoveDirective::toward_yaw(-150.0)), &mut rig);
        assert_eq!(state.on_update(&mut rig), Outcome::goto(StateId::Turning));
        assert!(!state.command_received());
    }

    #[test]
    fn coasting_ramps_down_and_keeps_damping() {
        let mut body = body_facing_z(1.0);
        body.expect_apply_torque()
            .withf(|torque| (*torque - Vec3::new(0.0, -2.0, 0.0)).length() < 1e-3)
            .times(1)
            .return_const(());
        let mut animator = animator_at(0.5);
        animator
            .expect_set_movement_intensity()
            .withf(|intensity| (intensity - 0.4).abs() < 1e-6)
            .times(1)
            .return_const(());
        let mut jitter = NoJitter;
        let mut rig = Rig::new(&mut body, &mut animator, &mut jitter, 0.1);
        let mut state = entered(&proportional_config(), &mut rig);

        assert_eq!(state.on_update(&mut rig), Outcome::Stay);
    }

    #[test]
    fn coasting_at_rest_requests_standing() {
        let mut body = body_facing_z(0.05);
        body.expect_apply_torque().never();
        let mut animator = animator_at(0.05);
        animator
            .expect_set_movement_intensity()
            .with(eq(0.0))
            .times(1)
            .return_const(());
        let mut jitter = NoJitter;
        let mut rig = Rig::new(&mut body, &mut animator, &mut jitter, 0.1);
        let mut state = entered(&proportional_config(), &mut rig);

        assert_eq!(state.on_update(&mut rig), Outcome::goto(StateId::Standing));
    }

    #[test]
    fn entry_clears_steering_history() {
        let mut body = body_facing_z(0.0);
        body.expect_apply_torque().return_const(());
        let mut animator = animator_at(0.5);
        animator
            .expect_set_movement_intensity()
            .return_const(());
        let mut jitter = NoJitter;
        let mut rig = Rig::new(&mut body, &mut animator, &mut jitter, 0.1);
        let config = LocomotionConfig {
            heading_pid: PidConfig::new(1.0, 1.0, 1.0),
            ..LocomotionConfig::default()
        };
        let mut state = entered(&config, &mut rig);

        state.handle_command(&Command::Move(MoveDirective::toward_yaw(45.0)), &mut rig);
        state.on_update(&mut rig);
        assert!(state.heading_pid().state().integral > 0.0);

        assert!(state.on_enter(Some(StateId::Turning), &mut rig));
        assert_relative_eq!(state.heading_pid().state().integral, 0.0);
        assert_relative_eq!(state.heading_pid().state().previous_error, 0.0);
        assert!(state.directive().is_none());
        assert_eq!(state.last_torque(), Vec3::ZERO);
    }
}
