//! Ray picking over the spatial index
//!
//! Turns a world-space ray into an ordered list of struck objects. The
//! index serves purely as a broad phase; exact intersection against brush
//! faces or entity bounds is delegated to the caller's geometry kernel.

mod picker;
mod ray;

pub use picker::{Hit, HitQuery, Picker};
pub use ray::Ray;
