//! Heading and ramp helpers shared by the locomotion states.
//!
//! World up is +Y and the fixed heading reference is +Z. Yaw grows
//! counter-clockwise about +Y, so a positive torque about up increases it.
use glam::Vec3;

/// Fixed world reference axis that yaw is measured from.
pub const WORLD_FORWARD: Vec3 = Vec3::Z;
/// World up axis that yaw is measured about.
pub const WORLD_UP: Vec3 = Vec3::Y;

/// Returns the unit vector in the horizontal plane pointing along `vector`.
///
/// The vertical component is discarded before normalising. Non-finite input
/// or a vector with no horizontal extent yields `None`.
///
/// # Examples
///
/// ```
/// use glam::Vec3;
/// use strider::vector_math::horizontal;
/// let flat = horizontal(Vec3::new(3.0, 7.0, 4.0)).unwrap();
/// assert!((flat.x - 0.6).abs() < 1e-6);
/// assert!((flat.z - 0.8).abs() < 1e-6);
/// assert!(horizontal(Vec3::Y).is_none());
/// ```
#[must_use]
pub fn horizontal(vector: Vec3) -> Option<Vec3> {
    if !vector.is_finite() {
        return None;
    }
    Vec3::new(vector.x, 0.0, vector.z).try_normalize()
}

/// World yaw of `vector` in degrees, measured from [`WORLD_FORWARD`] about
/// [`WORLD_UP`].
///
/// # Examples
///
/// ```
/// use glam::Vec3;
/// use strider::vector_math::yaw_degrees;
/// let yaw = yaw_degrees(Vec3::X).unwrap();
/// assert!((yaw - 90.0).abs() < 1e-4);
/// ```
#[must_use]
pub fn yaw_degrees(vector: Vec3) -> Option<f32> {
    horizontal(vector).map(|flat| flat.x.atan2(flat.z).to_degrees())
}

/// Horizontal unit vector with the given world yaw.
#[must_use]
pub fn forward_from_yaw(yaw: f32) -> Vec3 {
    let (sin, cos) = yaw.to_radians().sin_cos();
    Vec3::new(sin, 0.0, cos)
}

/// Smallest signed difference from `current` to `target`, in degrees.
///
/// The result lies in `(-180, 180]`; exactly opposite headings report
/// `+180`.
///
/// # Examples
///
/// ```
/// use strider::vector_math::delta_angle;
/// assert!((delta_angle(350.0, 10.0) - 20.0).abs() < 1e-4);
/// assert!((delta_angle(10.0, 350.0) + 20.0).abs() < 1e-4);
/// assert!((delta_angle(0.0, -180.0) - 180.0).abs() < 1e-4);
/// ```
#[must_use]
pub fn delta_angle(current: f32, target: f32) -> f32 {
    let wrapped = (target - current).rem_euclid(360.0);
    if wrapped > 180.0 {
        wrapped - 360.0
    } else {
        wrapped
    }
}

/// Signed horizontal angle from `from` to `to` about [`WORLD_UP`], in degrees.
///
/// Returns `None` when either vector has no horizontal extent.
#[must_use]
pub fn signed_angle(from: Vec3, to: Vec3) -> Option<f32> {
    Some(delta_angle(yaw_degrees(from)?, yaw_degrees(to)?))
}

/// Moves `current` toward `target` by at most `max_delta`.
///
/// Lands exactly on `target` once within reach. A non-positive or
/// non-finite step leaves `current` unchanged.
///
/// # Examples
///
/// ```
/// use strider::vector_math::move_towards;
/// assert_eq!(move_towards(0.0, 1.0, 0.25), 0.25);
/// assert_eq!(move_towards(0.9, 1.0, 0.25), 1.0);
/// assert_eq!(move_towards(0.1, 0.0, 0.25), 0.0);
/// ```
#[must_use]
pub fn move_towards(current: f32, target: f32, max_delta: f32) -> f32 {
    if !max_delta.is_finite() || max_delta <= 0.0 {
        return current;
    }
    let gap = target - current;
    if gap.abs() <= max_delta {
        target
    } else {
        current + max_delta.copysign(gap)
    }
}
