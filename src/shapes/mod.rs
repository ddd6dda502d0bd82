//! Shapes

use crate::core::geometry::{Isect, Ray};
use std::sync::Arc;

mod sphere;
mod triangle;

// Re-export
pub use sphere::*;
pub use triangle::*;

/// Shape trait provides common behavior for intersectable geometry.
pub trait Shape {
    /// Returns the intersection with a ray beyond its minimum parametric
    /// distance, if any.
    ///
    /// * `ray` - The ray.
    fn intersect(&self, ray: &Ray) -> Option<Isect>;
}

/// Atomic reference counted `Shape`.
pub type ArcShape = Arc<dyn Shape + Send + Sync>;
