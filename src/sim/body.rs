//! A rigid body constrained to rotate about world up.

use glam::Vec3;

use crate::rig::Body;
use crate::vector_math::{forward_from_yaw, WORLD_UP};

/// Yaw-only body integrating torque with inertia and angular drag.
///
/// Yaw is kept in degrees and a unit torque about +Y adds `1 / inertia`
/// degrees per second per second. Like an engine body, the sensed angular
/// velocity is reported in radians per second.
#[derive(Debug, Clone, PartialEq)]
pub struct YawBody {
    yaw: f32,
    yaw_rate: f32,
    inertia: f32,
    drag: f32,
    pending_torque: f32,
}

impl YawBody {
    /// Creates a body at rest facing `yaw` degrees.
    ///
    /// Non-positive inertia is raised to one; negative drag is treated as none.
    #[must_use]
    pub fn new(yaw: f32, inertia: f32, drag: f32) -> Self {
        Self {
            yaw,
            yaw_rate: 0.0,
            inertia: if inertia > 0.0 { inertia } else { 1.0 },
            drag: drag.max(0.0),
            pending_torque: 0.0,
        }
    }

    /// Current yaw in degrees, wrapped to `[0, 360)`.
    #[must_use]
    pub fn yaw(&self) -> f32 {
        self.yaw.rem_euclid(360.0)
    }

    /// Current yaw rate in degrees per second.
    #[must_use]
    pub const fn yaw_rate(&self) -> f32 {
        self.yaw_rate
    }

    /// Torque about +Y accumulated since the last integration.
    #[must_use]
    pub const fn pending_torque(&self) -> f32 {
        self.pending_torque
    }

    /// Rotates the body directly, as animation root motion does.
    pub fn rotate(&mut self, degrees: f32) {
        if degrees.is_finite() {
            self.yaw = (self.yaw + degrees).rem_euclid(360.0);
        }
    }

    /// Consumes the pending torque and advances the body by `dt` seconds.
    pub fn integrate(&mut self, dt: f32) {
        let torque = std::mem::take(&mut self.pending_torque);
        if !(dt.is_finite() && dt > 0.0) {
            return;
        }
        self.yaw_rate += torque / self.inertia * dt;
        self.yaw_rate *= (1.0 - self.drag * dt).max(0.0);
        self.yaw = (self.yaw + self.yaw_rate * dt).rem_euclid(360.0);
    }
}

impl Default for YawBody {
    fn default() -> Self {
        Self::new(0.0, 0.2, 1.0)
    }
}

impl Body for YawBody {
    fn forward(&self) -> Vec3 {
        forward_from_yaw(self.yaw)
    }

    fn angular_velocity(&self) -> Vec3 {
        WORLD_UP * self.yaw_rate.to_radians()
    }

    fn apply_torque(&mut self, torque: Vec3) {
        if torque.is_finite() {
            self.pending_torque += torque.dot(WORLD_UP);
        }
    }
}
