//! Spatial partitioning for level geometry
//!
//! Provides the bounded octree that maps axis-aligned bounds to opaque
//! object handles, used as the broad phase for picking and marquee
//! selection.

mod bounds;
mod index;

pub use bounds::Aabb;
pub use index::{SpatialError, SpatialIndex};
