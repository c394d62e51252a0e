//! Broad-phase ray picking
//!
//! Orchestrates the picking pipeline: pruned index walk, bounds pre-filter,
//! then exact intersection through the caller-supplied geometry capability.

use approx::relative_eq;

use crate::foundation::math::Vec3;
use crate::pick::Ray;
use crate::spatial::SpatialIndex;

/// Distance tolerance within which two hits count as tied and fall back
/// to the caller's priority rank
const HIT_DISTANCE_TOLERANCE: f32 = 1.0e-4;

/// The result of one successful ray/object exact intersection
#[derive(Debug, Clone)]
pub struct Hit<T> {
    /// Handle of the struck object
    pub object: T,
    /// The distance from the ray origin to the hit point
    pub distance: f32,
    /// The point of intersection in world space
    pub point: Vec3,
}

/// A pick ray plus the hits accumulated while resolving it
#[derive(Debug)]
pub struct HitQuery<T> {
    ray: Ray,
    hits: Vec<Hit<T>>,
}

impl<T> HitQuery<T> {
    /// Create an empty query for `ray`
    pub fn new(ray: Ray) -> Self {
        Self {
            ray,
            hits: Vec::new(),
        }
    }

    /// The ray this query resolves
    pub fn ray(&self) -> &Ray {
        &self.ray
    }

    /// Record a hit
    pub fn add(&mut self, hit: Hit<T>) {
        self.hits.push(hit);
    }

    /// Order hits ascending by distance.
    ///
    /// Hits whose distances are equal within floating tolerance are ordered
    /// by the caller's `priority` rank instead, lower rank first (e.g. rank
    /// brush faces below entity bounds so faces win ties). The sort is
    /// stable, so the result is deterministic for identical input state.
    pub fn sort_by_distance<P>(&mut self, priority: P)
    where
        P: Fn(&Hit<T>) -> u32,
    {
        self.hits
            .sort_by(|a, b| a.distance.total_cmp(&b.distance));

        // Re-rank runs of near-equal distances; a stable slice sort keeps
        // the distance order between hits of equal rank
        let mut start = 0;
        while start < self.hits.len() {
            let mut end = start + 1;
            while end < self.hits.len()
                && relative_eq!(
                    self.hits[end].distance,
                    self.hits[end - 1].distance,
                    epsilon = HIT_DISTANCE_TOLERANCE,
                    max_relative = HIT_DISTANCE_TOLERANCE
                )
            {
                end += 1;
            }
            self.hits[start..end].sort_by_key(|hit| priority(hit));
            start = end;
        }
    }

    /// All recorded hits, in accumulation order until sorted
    pub fn hits(&self) -> &[Hit<T>] {
        &self.hits
    }

    /// Consume the query, returning its hits ("pick all under cursor")
    pub fn into_hits(self) -> Vec<Hit<T>> {
        self.hits
    }

    /// The first recorded hit, the nearest one once sorted
    pub fn first(&self) -> Option<&Hit<T>> {
        self.hits.first()
    }

    /// Number of recorded hits
    pub fn len(&self) -> usize {
        self.hits.len()
    }

    /// Whether the ray struck nothing
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }
}

/// Ray picker over a [`SpatialIndex`].
///
/// Stateless aside from the index reference: construct one per index and
/// reuse it for every interactive query (mouse clicks, drag previews).
/// Picking never mutates the index or any object and never fails; a ray
/// that strikes nothing yields an empty result.
pub struct Picker<'a, T> {
    index: &'a SpatialIndex<T>,
}

impl<'a, T: PartialEq + Clone> Picker<'a, T> {
    /// Create a picker over `index`
    pub fn new(index: &'a SpatialIndex<T>) -> Self {
        Self { index }
    }

    /// Resolve `query` against the index.
    ///
    /// Walks only subtrees whose boxes the query ray could intersect,
    /// pre-filters candidates by their stored bounds, and hands survivors
    /// to `exact` for the real test against brush faces or entity bounds.
    ///
    /// # Arguments
    /// * `query` - accumulates hits; call [`HitQuery::sort_by_distance`]
    ///   on it before reading results off
    /// * `exact` - the geometry kernel's intersection capability, returning
    ///   the hit distance and point for a struck object
    pub fn pick<F>(&self, query: &mut HitQuery<T>, mut exact: F)
    where
        F: FnMut(&Ray, &T) -> Option<(f32, Vec3)>,
    {
        let ray = *query.ray();
        let mut candidates = 0usize;
        self.index.walk(
            |node| node.intersect_ray(ray.origin, ray.direction).is_some(),
            |bounds, object| {
                if bounds.intersect_ray(ray.origin, ray.direction).is_none() {
                    return;
                }
                candidates += 1;
                if let Some((distance, point)) = exact(&ray, object) {
                    query.add(Hit {
                        object: object.clone(),
                        distance,
                        point,
                    });
                }
            },
        );
        log::trace!(
            "pick resolved {} candidates into {} hits",
            candidates,
            query.len()
        );
    }

    /// Resolve `ray` and return only the nearest hit.
    ///
    /// `priority` breaks distance ties the same way as
    /// [`HitQuery::sort_by_distance`].
    pub fn pick_first<F, P>(&self, ray: Ray, exact: F, priority: P) -> Option<Hit<T>>
    where
        F: FnMut(&Ray, &T) -> Option<(f32, Vec3)>,
        P: Fn(&Hit<T>) -> u32,
    {
        let mut query = HitQuery::new(ray);
        self.pick(&mut query, exact);
        query.sort_by_distance(priority);
        query.first().cloned()
    }
}
