//! Axis-aligned bounding boxes
//!
//! All containment and intersection tests use closed intervals on each
//! axis: a box touching another only at a boundary counts as contained and
//! intersecting. No epsilon is applied at this layer; callers needing
//! tolerance pad their bounds before insertion.

use crate::foundation::math::Vec3;

/// Axis-Aligned Bounding Box in world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner of the box
    pub min: Vec3,
    /// Maximum corner of the box
    pub max: Vec3,
}

impl Aabb {
    /// Create a new box from min and max corners
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Create a box spanning `[min, max]` on all three axes
    pub fn cube(min: f32, max: f32) -> Self {
        Self::new(Vec3::new(min, min, min), Vec3::new(max, max, max))
    }

    /// Create a box centered at a point with given half-size
    pub fn from_center_extents(center: Vec3, extents: Vec3) -> Self {
        Self {
            min: center - extents,
            max: center + extents,
        }
    }

    /// Get the center of the box
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Get the extents (half-size) of the box
    pub fn extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    /// Get the full edge lengths of the box
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Check if this box contains a point
    pub fn contains_point(&self, point: Vec3) -> bool {
        point.x >= self.min.x && point.x <= self.max.x &&
        point.y >= self.min.y && point.y <= self.max.y &&
        point.z >= self.min.z && point.z <= self.max.z
    }

    /// Check if this box fully contains another box
    pub fn contains(&self, other: &Aabb) -> bool {
        other.min.x >= self.min.x && other.max.x <= self.max.x &&
        other.min.y >= self.min.y && other.max.y <= self.max.y &&
        other.min.z >= self.min.z && other.max.z <= self.max.z
    }

    /// Check if this box intersects another box
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x && self.max.x >= other.min.x &&
        self.min.y <= other.max.y && self.max.y >= other.min.y &&
        self.min.z <= other.max.z && self.max.z >= other.min.z
    }

    /// Get one of the eight octant boxes produced by splitting at the center.
    ///
    /// Octant layout (low bit = X, then Y, then Z):
    /// bit clear keeps the `min` half of the axis, bit set the `max` half.
    pub fn octant(&self, index: usize) -> Self {
        let center = self.center();
        let (min_x, max_x) = if index & 1 == 0 { (self.min.x, center.x) } else { (center.x, self.max.x) };
        let (min_y, max_y) = if index & 2 == 0 { (self.min.y, center.y) } else { (center.y, self.max.y) };
        let (min_z, max_z) = if index & 4 == 0 { (self.min.z, center.z) } else { (center.z, self.max.z) };
        Self::new(Vec3::new(min_x, min_y, min_z), Vec3::new(max_x, max_y, max_z))
    }

    /// Test ray intersection with this box using the slab method.
    ///
    /// Returns the distance to the entry point if the ray intersects, None
    /// otherwise. A ray starting inside the box reports distance zero.
    /// Based on "An Efficient and Robust Ray-Box Intersection Algorithm".
    pub fn intersect_ray(&self, ray_origin: Vec3, ray_dir: Vec3) -> Option<f32> {
        // IEEE division yields signed infinities for axis-parallel rays,
        // which the min/max folding below handles without special cases.
        let inv_dir = Vec3::new(1.0 / ray_dir.x, 1.0 / ray_dir.y, 1.0 / ray_dir.z);

        let t1 = (self.min.x - ray_origin.x) * inv_dir.x;
        let t2 = (self.max.x - ray_origin.x) * inv_dir.x;
        let t3 = (self.min.y - ray_origin.y) * inv_dir.y;
        let t4 = (self.max.y - ray_origin.y) * inv_dir.y;
        let t5 = (self.min.z - ray_origin.z) * inv_dir.z;
        let t6 = (self.max.z - ray_origin.z) * inv_dir.z;

        let tmin = t1.min(t2).max(t3.min(t4)).max(t5.min(t6));
        let tmax = t1.max(t2).min(t3.max(t4)).min(t5.max(t6));

        // Ray intersects if tmax >= tmin and the exit is in front of the origin
        if tmax >= tmin && tmax >= 0.0 {
            Some(tmin.max(0.0))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn containment_is_closed_interval() {
        let outer = Aabb::cube(-10.0, 10.0);
        // Touching the boundary still counts as contained
        let touching = Aabb::new(Vec3::new(-10.0, 0.0, 0.0), Vec3::new(0.0, 10.0, 10.0));
        assert!(outer.contains(&touching));

        let sticking_out = Aabb::new(Vec3::new(-10.1, 0.0, 0.0), Vec3::new(0.0, 1.0, 1.0));
        assert!(!outer.contains(&sticking_out));
    }

    #[test]
    fn boxes_touching_at_a_face_intersect() {
        let a = Aabb::cube(0.0, 1.0);
        let b = Aabb::new(Vec3::new(1.0, 0.0, 0.0), Vec3::new(2.0, 1.0, 1.0));
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));

        let c = Aabb::new(Vec3::new(1.5, 0.0, 0.0), Vec3::new(2.0, 1.0, 1.0));
        assert!(!a.intersects(&c));
    }

    #[test]
    fn zero_volume_box_behaves_like_a_point() {
        let outer = Aabb::cube(-1.0, 1.0);
        let point = Aabb::new(Vec3::zeros(), Vec3::zeros());
        assert!(outer.contains(&point));
        assert!(point.intersects(&outer));
        assert_eq!(point.size(), Vec3::zeros());
    }

    #[test]
    fn octants_partition_the_box() {
        let outer = Aabb::cube(-8.0, 8.0);
        // Octant 0 keeps every min half, octant 7 every max half
        assert_eq!(outer.octant(0), Aabb::cube(-8.0, 0.0));
        assert_eq!(outer.octant(7), Aabb::cube(0.0, 8.0));
        assert_eq!(
            outer.octant(1),
            Aabb::new(Vec3::new(0.0, -8.0, -8.0), Vec3::new(8.0, 0.0, 0.0))
        );
        for index in 0..8 {
            assert!(outer.contains(&outer.octant(index)));
        }
    }

    #[test]
    fn ray_hits_box_head_on() {
        let aabb = Aabb::cube(-1.0, 1.0);
        let distance = aabb
            .intersect_ray(Vec3::new(0.0, 0.0, -5.0), Vec3::new(0.0, 0.0, 1.0))
            .unwrap();
        assert!((distance - 4.0).abs() < 1e-6);
    }

    #[test]
    fn ray_misses_box_to_the_side() {
        let aabb = Aabb::cube(-1.0, 1.0);
        assert!(aabb
            .intersect_ray(Vec3::new(5.0, 0.0, -5.0), Vec3::new(0.0, 0.0, 1.0))
            .is_none());
    }

    #[test]
    fn ray_starting_inside_reports_zero_distance() {
        let aabb = Aabb::cube(-1.0, 1.0);
        let distance = aabb
            .intersect_ray(Vec3::zeros(), Vec3::new(0.0, 0.0, 1.0))
            .unwrap();
        assert_eq!(distance, 0.0);
    }

    #[test]
    fn ray_pointing_away_misses() {
        let aabb = Aabb::cube(-1.0, 1.0);
        assert!(aabb
            .intersect_ray(Vec3::new(0.0, 0.0, -5.0), Vec3::new(0.0, 0.0, -1.0))
            .is_none());
    }

    #[test]
    fn axis_parallel_ray_inside_the_slab_hits() {
        let aabb = Aabb::cube(-1.0, 1.0);
        let distance = aabb
            .intersect_ray(Vec3::new(0.5, -0.5, -5.0), Vec3::new(0.0, 0.0, 1.0))
            .unwrap();
        assert!((distance - 4.0).abs() < 1e-6);
    }

    #[test]
    fn axis_parallel_ray_outside_the_slab_misses() {
        let aabb = Aabb::cube(-1.0, 1.0);
        assert!(aabb
            .intersect_ray(Vec3::new(2.0, 0.0, -5.0), Vec3::new(0.0, 0.0, 1.0))
            .is_none());
    }
}
