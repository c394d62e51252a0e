//! World-space rays for picking queries

use nalgebra::Unit;

use crate::foundation::math::Vec3;

/// Shortest direction vector [`Ray::new`] accepts as normalizable
const MIN_DIRECTION_NORM: f32 = 1.0e-6;

/// A ray for picking, usually derived from a screen coordinate and the
/// camera state by the GUI layer
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    /// The origin point of the ray in world space
    pub origin: Vec3,
    /// The direction of the ray, always normalized
    pub direction: Vec3,
}

impl Ray {
    /// Create a ray with the given origin and direction.
    ///
    /// The direction is normalized here; `None` is returned when it is too
    /// short to normalize, so a malformed ray can never reach a pick query.
    pub fn new(origin: Vec3, direction: Vec3) -> Option<Self> {
        Unit::try_new(direction, MIN_DIRECTION_NORM).map(|direction| Self {
            origin,
            direction: direction.into_inner(),
        })
    }

    /// Get a point along the ray at distance `t`
    pub fn point_at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}
