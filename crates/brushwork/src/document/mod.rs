//! Handle types the owning document threads through the index
//!
//! The document model exclusively owns the level's brushes and entities;
//! the spatial index only ever sees these opaque handles together with the
//! bounds registered for them. The document keeps both in sync: an entry
//! is removed before its object is deleted, and a move is re-registered as
//! remove-then-insert.

use slotmap::new_key_type;

new_key_type! {
    /// Stable key of a convex-solid brush owned by the document model.
    pub struct BrushKey;

    /// Stable key of a point or volume entity owned by the document model.
    pub struct EntityKey;
}

/// Opaque handle for anything pickable in a level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectHandle {
    /// A convex-solid brush
    Brush(BrushKey),
    /// An entity (light, spawn point, trigger volume, ...)
    Entity(EntityKey),
}

impl ObjectHandle {
    /// Default tie-break rank for pick queries, lower wins: when a brush
    /// face and an entity's bounds sit at the same distance along a ray,
    /// the face is selected.
    pub fn pick_rank(self) -> u32 {
        match self {
            Self::Brush(_) => 0,
            Self::Entity(_) => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    #[test]
    fn brushes_outrank_entities_on_ties() {
        let mut brushes: SlotMap<BrushKey, ()> = SlotMap::with_key();
        let mut entities: SlotMap<EntityKey, ()> = SlotMap::with_key();
        let brush = ObjectHandle::Brush(brushes.insert(()));
        let entity = ObjectHandle::Entity(entities.insert(()));
        assert!(brush.pick_rank() < entity.pick_rank());
    }

    #[test]
    fn handles_compare_by_identity() {
        let mut brushes: SlotMap<BrushKey, ()> = SlotMap::with_key();
        let first = ObjectHandle::Brush(brushes.insert(()));
        let second = ObjectHandle::Brush(brushes.insert(()));
        assert_ne!(first, second);
        assert_eq!(first, first);
    }
}
