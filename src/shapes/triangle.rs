//! Triangles

use crate::core::common::Float;
use crate::core::geometry::{Isect, Point3f, Ray, Vector3f};
use crate::shapes::Shape;

/// A triangle with a precomputed geometric normal. Triangles back both the
/// box walls and the emissive faces of area lights; emissive ones carry the
/// id of their light.
pub struct Triangle {
    /// First vertex.
    pub p0: Point3f,

    /// Second vertex.
    pub p1: Point3f,

    /// Third vertex.
    pub p2: Point3f,

    /// Unit geometric normal, oriented by the winding `p0 → p1 → p2`.
    pub normal: Vector3f,

    /// Index into the scene's material table.
    pub mat_id: usize,

    /// Index into the scene's light table when the triangle emits.
    pub light_id: Option<usize>,
}

impl Triangle {
    /// Creates a new non-emissive `Triangle`.
    ///
    /// * `p0`     - First vertex.
    /// * `p1`     - Second vertex.
    /// * `p2`     - Third vertex.
    /// * `mat_id` - Index into the scene's material table.
    pub fn new(p0: Point3f, p1: Point3f, p2: Point3f, mat_id: usize) -> Self {
        let normal = (p1 - p0).cross(&(p2 - p0)).normalize();
        Self {
            p0,
            p1,
            p2,
            normal,
            mat_id,
            light_id: None,
        }
    }

    /// Creates a new emissive `Triangle`.
    ///
    /// * `p0`       - First vertex.
    /// * `p1`       - Second vertex.
    /// * `p2`       - Third vertex.
    /// * `mat_id`   - Index into the scene's material table.
    /// * `light_id` - Index into the scene's light table.
    pub fn emissive(
        p0: Point3f,
        p1: Point3f,
        p2: Point3f,
        mat_id: usize,
        light_id: usize,
    ) -> Self {
        Self {
            light_id: Some(light_id),
            ..Self::new(p0, p1, p2, mat_id)
        }
    }
}

impl Shape for Triangle {
    /// Returns the intersection with a ray beyond its minimum parametric
    /// distance, if any (Möller–Trumbore).
    ///
    /// * `ray` - The ray.
    fn intersect(&self, ray: &Ray) -> Option<Isect> {
        let e1 = self.p1 - self.p0;
        let e2 = self.p2 - self.p0;

        let pvec = ray.dir.cross(&e2);
        let det = e1.dot(&pvec);
        if det == 0.0 {
            return None;
        }
        let inv_det = 1.0 / det;

        let tvec = ray.org - self.p0;
        let u = tvec.dot(&pvec) * inv_det;
        if !(0.0..=1.0).contains(&u) {
            return None;
        }

        let qvec = tvec.cross(&e1);
        let v = ray.dir.dot(&qvec) * inv_det;
        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let t: Float = e2.dot(&qvec) * inv_det;
        if t <= ray.tmin {
            return None;
        }

        Some(Isect {
            dist: t,
            normal: self.normal,
            mat_id: self.mat_id,
            light_id: self.light_id,
        })
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_triangle() -> Triangle {
        Triangle::new(
            Point3f::new(0.0, 0.0, 0.0),
            Point3f::new(1.0, 0.0, 0.0),
            Point3f::new(0.0, 1.0, 0.0),
            0,
        )
    }

    #[test]
    fn hit_inside() {
        let tri = unit_triangle();
        let ray = Ray::new(
            Point3f::new(0.25, 0.25, 5.0),
            Vector3f::new(0.0, 0.0, -1.0),
            0.0,
        );

        let isect = tri.intersect(&ray).unwrap();
        assert!((isect.dist - 5.0).abs() < 1e-5);
        assert!((isect.normal - Vector3f::new(0.0, 0.0, 1.0)).length() < 1e-5);
    }

    #[test]
    fn miss_outside_edges() {
        let tri = unit_triangle();
        for org in [
            Point3f::new(0.75, 0.75, 5.0),
            Point3f::new(-0.1, 0.5, 5.0),
            Point3f::new(0.5, -0.1, 5.0),
        ] {
            let ray = Ray::new(org, Vector3f::new(0.0, 0.0, -1.0), 0.0);
            assert!(tri.intersect(&ray).is_none());
        }
    }

    #[test]
    fn parallel_ray_misses() {
        let tri = unit_triangle();
        let ray = Ray::new(
            Point3f::new(0.25, 0.25, 5.0),
            Vector3f::new(1.0, 0.0, 0.0),
            0.0,
        );
        assert!(tri.intersect(&ray).is_none());
    }

    #[test]
    fn hits_from_both_sides() {
        let tri = unit_triangle();
        let from_below = Ray::new(
            Point3f::new(0.25, 0.25, -5.0),
            Vector3f::new(0.0, 0.0, 1.0),
            0.0,
        );

        let isect = tri.intersect(&from_below).unwrap();
        // The geometric normal does not flip with the approach side.
        assert!((isect.normal - Vector3f::new(0.0, 0.0, 1.0)).length() < 1e-5);
    }
}
