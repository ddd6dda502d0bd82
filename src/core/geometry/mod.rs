//! Geometry

mod frame;
mod ray;
mod vector2;
mod vector3;

// Re-export
pub use frame::*;
pub use ray::*;
pub use vector2::*;
pub use vector3::*;
