//! Rays and intersection records.

use crate::core::common::Float;
use crate::core::geometry::{Point3f, Vector3f};

/// A ray with origin, unit direction and a minimum parametric distance that
/// guards against self-intersection. Rays are not mutated after construction.
#[derive(Copy, Clone, Debug)]
pub struct Ray {
    /// Origin.
    pub org: Point3f,

    /// Unit direction.
    pub dir: Vector3f,

    /// Minimum parametric distance along the ray.
    pub tmin: Float,
}

impl Ray {
    /// Creates a new `Ray`.
    ///
    /// * `org`  - Origin.
    /// * `dir`  - Unit direction.
    /// * `tmin` - Minimum parametric distance along the ray.
    pub fn new(org: Point3f, dir: Vector3f, tmin: Float) -> Self {
        Self { org, dir, tmin }
    }

    /// Returns the point at the given parametric distance.
    ///
    /// * `t` - Parametric distance.
    pub fn at(&self, t: Float) -> Point3f {
        self.org + self.dir * t
    }
}

/// Surface intersection record. Only valid when the scene reports a hit.
#[derive(Copy, Clone, Debug)]
pub struct Isect {
    /// Distance along the ray.
    pub dist: Float,

    /// Unit surface normal at the hit point.
    pub normal: Vector3f,

    /// Index into the scene's material table.
    pub mat_id: usize,

    /// Index into the scene's light table when the surface emits.
    pub light_id: Option<usize>,
}
