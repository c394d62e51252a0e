//! Math utilities and types
//!
//! Fundamental math types for world-space level geometry.

pub use nalgebra::Vector3;

/// 3D vector type
pub type Vec3 = Vector3<f32>;
