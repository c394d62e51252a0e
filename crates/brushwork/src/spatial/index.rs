//! Bounded octree over axis-aligned bounds
//!
//! Objects live at the lowest node whose box fully contains their bounds;
//! an object straddling a subdivision boundary stays at the parent instead
//! of being duplicated into children, so each (bounds, object) pair is
//! stored exactly once. Nodes subdivide lazily on insertion and are never
//! pruned on removal; an empty subtree costs only traversal.

use thiserror::Error;

use crate::spatial::Aabb;

/// Errors reported by [`SpatialIndex`] mutations.
///
/// Both variants leave the index exactly as it was before the failed call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SpatialError {
    /// Insertion bounds are not fully contained in the index's world bounds.
    ///
    /// Always the caller's fault; the editor rejects the edit and surfaces
    /// the error to the user.
    #[error("object bounds {object:?} are not contained in world bounds {world:?}")]
    OutOfBounds {
        /// Bounds of the rejected object
        object: Aabb,
        /// Fixed world bounds of the index
        world: Aabb,
    },

    /// No stored (bounds, object) pair matches a removal request exactly.
    ///
    /// Raised both when the object was never inserted and when the bounds
    /// differ from the ones registered at insertion time; either way the
    /// document model and the index have desynchronized.
    #[error("no object stored with bounds {bounds:?}")]
    NotFound {
        /// Bounds the removal asked for
        bounds: Aabb,
    },
}

/// Single node in the octree hierarchy
#[derive(Debug)]
struct Node<T> {
    /// World-space coverage box of this subtree
    bounds: Aabb,

    /// Objects stored directly at this node, keyed by their exact bounds
    objects: Vec<(Aabb, T)>,

    /// Child nodes (8 octants), None until this node first subdivides
    children: Option<Box<[Node<T>; 8]>>,
}

impl<T: PartialEq> Node<T> {
    fn new(bounds: Aabb) -> Self {
        Self {
            bounds,
            objects: Vec::new(),
            children: None,
        }
    }

    /// Whether children of this node would still respect the cell floor.
    ///
    /// Subdividing halves the box on every axis; a node whose children
    /// would fall below `min_cell_size` on any axis is a leaf regardless
    /// of occupancy. The result depends only on the node's box, so the
    /// storage node chosen for a given bounds never depends on what else
    /// has been inserted.
    fn splittable(&self, min_cell_size: f32) -> bool {
        let half = self.bounds.extents();
        half.x >= min_cell_size && half.y >= min_cell_size && half.z >= min_cell_size
    }

    /// Index of the single child octant that fully contains `bounds`.
    ///
    /// Returns None when no octant contains the bounds (it straddles a
    /// subdivision plane) or when more than one does (a zero-volume box
    /// lying exactly on a plane is contained by every octant touching it);
    /// both cases keep the object at this node.
    fn target_octant(&self, bounds: &Aabb) -> Option<usize> {
        let mut target = None;
        for octant in 0..8 {
            if self.bounds.octant(octant).contains(bounds) {
                if target.is_some() {
                    return None;
                }
                target = Some(octant);
            }
        }
        target
    }

    /// Create the eight child nodes if they do not exist yet
    fn subdivide(&mut self) {
        if self.children.is_none() {
            let bounds = self.bounds;
            self.children = Some(Box::new(std::array::from_fn(|octant| {
                Self::new(bounds.octant(octant))
            })));
        }
    }

    /// Insert a pair whose bounds are known to lie within this node's box
    fn insert(&mut self, bounds: Aabb, object: T, min_cell_size: f32) {
        if self.splittable(min_cell_size) {
            if let Some(octant) = self.target_octant(&bounds) {
                self.subdivide();
                if let Some(children) = self.children.as_mut() {
                    children[octant].insert(bounds, object, min_cell_size);
                    return;
                }
            }
        }
        self.objects.push((bounds, object));
    }

    /// Remove the exact pair from the node insertion would have chosen.
    ///
    /// Follows the same descent as [`Node::insert`] but never creates
    /// children; a missing child on the path means the pair is not stored.
    fn remove(&mut self, bounds: &Aabb, object: &T, min_cell_size: f32) -> bool {
        if self.splittable(min_cell_size) {
            if let Some(octant) = self.target_octant(bounds) {
                return match self.children.as_mut() {
                    Some(children) => children[octant].remove(bounds, object, min_cell_size),
                    None => false,
                };
            }
        }
        if let Some(index) = self
            .objects
            .iter()
            .position(|(stored, held)| stored == bounds && held == object)
        {
            self.objects.swap_remove(index);
            true
        } else {
            false
        }
    }

    /// Check for the exact pair along the descent insertion would take
    fn contains(&self, bounds: &Aabb, object: &T, min_cell_size: f32) -> bool {
        if self.splittable(min_cell_size) {
            if let Some(octant) = self.target_octant(bounds) {
                return match self.children.as_ref() {
                    Some(children) => children[octant].contains(bounds, object, min_cell_size),
                    None => false,
                };
            }
        }
        self.objects
            .iter()
            .any(|(stored, held)| stored == bounds && held == object)
    }

    /// Visit every stored object in every node whose box satisfies `enter`
    fn walk<E, V>(&self, enter: &mut E, visitor: &mut V)
    where
        E: FnMut(&Aabb) -> bool,
        V: FnMut(&Aabb, &T),
    {
        if !enter(&self.bounds) {
            return;
        }
        for (bounds, object) in &self.objects {
            visitor(bounds, object);
        }
        if let Some(children) = self.children.as_ref() {
            for child in children.iter() {
                child.walk(enter, visitor);
            }
        }
    }

    /// Count stored pairs in this node and all children
    fn object_count(&self) -> usize {
        let mut count = self.objects.len();
        if let Some(children) = self.children.as_ref() {
            for child in children.iter() {
                count += child.object_count();
            }
        }
        count
    }
}

/// Bounded octree mapping axis-aligned bounds to opaque object handles.
///
/// The document model constructs one index per level, sized to the level's
/// fixed world bounds, and keeps it in sync with every structural edit:
/// a move or resize is always remove-with-old-bounds then insert-with-new,
/// never an in-place update. The index stores bounds and handles only; the
/// document model exclusively owns the real brushes and entities.
///
/// Single-threaded by design: mutation happens only on the serialized
/// document-edit path, and read-only queries (picking, marquee selection)
/// need no internal locking.
///
/// # Usage
/// ```
/// use brushwork::{Aabb, SpatialIndex};
///
/// let mut index = SpatialIndex::new(Aabb::cube(-128.0, 128.0), 32.0);
/// index.insert(Aabb::cube(1.0, 2.0), "brush")?;
/// assert!(index.contains(&Aabb::cube(1.0, 2.0), &"brush"));
/// index.remove(&Aabb::cube(1.0, 2.0), &"brush")?;
/// assert!(index.is_empty());
/// # Ok::<(), brushwork::SpatialError>(())
/// ```
#[derive(Debug)]
pub struct SpatialIndex<T> {
    /// Root node covering the entire world volume
    root: Node<T>,

    /// Subdivision floor; nodes never get smaller than this on any axis
    min_cell_size: f32,
}

impl<T: PartialEq> SpatialIndex<T> {
    /// Create an index covering the fixed `world_bounds`.
    ///
    /// # Panics
    /// Panics if `min_cell_size` is not strictly positive. A correct caller
    /// never hits this; the document-open path validates settings first
    /// (see [`crate::config::IndexSettings::build_index`]).
    pub fn new(world_bounds: Aabb, min_cell_size: f32) -> Self {
        assert!(
            min_cell_size > 0.0,
            "spatial index cell floor must be positive"
        );
        log::debug!(
            "spatial index over {:?}, cell floor {}",
            world_bounds,
            min_cell_size
        );
        Self {
            root: Node::new(world_bounds),
            min_cell_size,
        }
    }

    /// The fixed world volume this index covers
    pub fn world_bounds(&self) -> &Aabb {
        &self.root.bounds
    }

    /// The subdivision floor fixed at construction
    pub fn min_cell_size(&self) -> f32 {
        self.min_cell_size
    }

    /// Insert a (bounds, object) pair.
    ///
    /// The pair is stored at the lowest node whose box fully contains
    /// `bounds`; which node that is depends only on the bounds, the world
    /// bounds, and the cell floor, so query results are reproducible
    /// regardless of insertion order.
    ///
    /// # Errors
    /// [`SpatialError::OutOfBounds`] if `bounds` is not fully contained in
    /// the world bounds; the index is unchanged.
    pub fn insert(&mut self, bounds: Aabb, object: T) -> Result<(), SpatialError> {
        if !self.root.bounds.contains(&bounds) {
            return Err(SpatialError::OutOfBounds {
                object: bounds,
                world: self.root.bounds,
            });
        }
        log::trace!("insert object at {:?}", bounds);
        self.root.insert(bounds, object, self.min_cell_size);
        Ok(())
    }

    /// Remove a previously inserted (bounds, object) pair.
    ///
    /// `bounds` must be exactly the bounds passed to [`SpatialIndex::insert`];
    /// moving an object is remove-with-old-bounds then insert-with-new.
    ///
    /// # Errors
    /// [`SpatialError::NotFound`] if no stored pair matches both `bounds`
    /// and `object` exactly; the index is unchanged.
    pub fn remove(&mut self, bounds: &Aabb, object: &T) -> Result<(), SpatialError> {
        if self.root.remove(bounds, object, self.min_cell_size) {
            log::trace!("removed object at {:?}", bounds);
            Ok(())
        } else {
            Err(SpatialError::NotFound { bounds: *bounds })
        }
    }

    /// Whether the exact (bounds, object) pair is currently stored
    pub fn contains(&self, bounds: &Aabb, object: &T) -> bool {
        self.root.contains(bounds, object, self.min_cell_size)
    }

    /// Visit every stored object whose bounds intersect `region`.
    ///
    /// Descends only nodes whose boxes intersect `region`. Each stored
    /// object is visited at most once per call; with no intervening
    /// mutation, repeated calls visit the identical multiset of objects.
    pub fn query<V>(&self, region: &Aabb, mut visitor: V)
    where
        V: FnMut(&Aabb, &T),
    {
        self.root.walk(
            &mut |node: &Aabb| node.intersects(region),
            &mut |bounds: &Aabb, object: &T| {
                if bounds.intersects(region) {
                    visitor(bounds, object);
                }
            },
        );
    }

    /// Pruned traversal: visit every stored object of every node whose
    /// coverage box satisfies `enter`.
    ///
    /// A node failing `enter` prunes its whole subtree. This is the seam
    /// the picker uses to cull by ray without the index knowing any ray
    /// geometry; [`SpatialIndex::query`] is a specialization of it.
    pub fn walk<E, V>(&self, mut enter: E, mut visitor: V)
    where
        E: FnMut(&Aabb) -> bool,
        V: FnMut(&Aabb, &T),
    {
        self.root.walk(&mut enter, &mut visitor);
    }

    /// Total number of stored (bounds, object) pairs
    pub fn object_count(&self) -> usize {
        self.root.object_count()
    }

    /// Whether the index stores no objects at all
    pub fn is_empty(&self) -> bool {
        self.object_count() == 0
    }

    /// Drop every stored object and node, keeping world bounds and cell
    /// floor (document reload path)
    pub fn clear(&mut self) {
        log::debug!("clearing spatial index");
        self.root = Node::new(self.root.bounds);
    }
}
