//! # Brushwork
//!
//! Spatial indexing and ray picking core for a 3D level geometry editor.
//!
//! A level is a set of convex-solid brushes and entities, each with an
//! axis-aligned bounding box, owned by a document model that edits them
//! interactively. This crate provides the two pieces that make those edits
//! and the mouse-driven selection on top of them fast:
//!
//! - [`SpatialIndex`]: a fixed-bounds octree mapping bounding boxes to
//!   opaque object handles, updated incrementally on every structural edit
//! - [`Picker`]: broad-phase ray queries over the index, delegating exact
//!   intersection to the caller's geometry kernel and returning hits
//!   ordered nearest-first
//!
//! ## Quick Start
//!
//! ```rust
//! use brushwork::prelude::*;
//!
//! let mut index = SpatialIndex::new(Aabb::cube(-128.0, 128.0), 32.0);
//! index.insert(Aabb::cube(1.0, 2.0), 1)?;
//! assert!(index.contains(&Aabb::cube(1.0, 2.0), &1));
//!
//! let picker = Picker::new(&index);
//! let ray = Ray::new(Vec3::new(1.5, 1.5, -10.0), Vec3::new(0.0, 0.0, 1.0)).unwrap();
//! let hit = picker.pick_first(
//!     ray,
//!     |ray, _object| {
//!         // stand-in for the geometry kernel's exact intersection test
//!         Aabb::cube(1.0, 2.0)
//!             .intersect_ray(ray.origin, ray.direction)
//!             .map(|distance| (distance, ray.point_at(distance)))
//!     },
//!     |_hit| 0,
//! );
//! assert!(hit.is_some());
//! # Ok::<(), brushwork::SpatialError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names)]

pub mod config;
pub mod document;
pub mod foundation;
pub mod pick;
pub mod spatial;

pub use pick::{Hit, HitQuery, Picker, Ray};
pub use spatial::{Aabb, SpatialError, SpatialIndex};

/// Common imports for crate users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError, IndexSettings},
        document::{BrushKey, EntityKey, ObjectHandle},
        foundation::math::Vec3,
        pick::{Hit, HitQuery, Picker, Ray},
        spatial::{Aabb, SpatialError, SpatialIndex},
    };
}
