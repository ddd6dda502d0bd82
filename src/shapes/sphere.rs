//! Spheres

use crate::core::common::Float;
use crate::core::geometry::{Isect, Point3f, Ray};
use crate::shapes::Shape;

/// A sphere described by center and radius. Spheres never emit light here.
pub struct Sphere {
    /// Center.
    pub center: Point3f,

    /// Radius.
    pub radius: Float,

    /// Index into the scene's material table.
    pub mat_id: usize,
}

impl Sphere {
    /// Creates a new `Sphere`.
    ///
    /// * `center` - Center.
    /// * `radius` - Radius.
    /// * `mat_id` - Index into the scene's material table.
    pub fn new(center: Point3f, radius: Float, mat_id: usize) -> Self {
        Self {
            center,
            radius,
            mat_id,
        }
    }
}

impl Shape for Sphere {
    /// Returns the intersection with a ray beyond its minimum parametric
    /// distance, if any.
    ///
    /// * `ray` - The ray.
    fn intersect(&self, ray: &Ray) -> Option<Isect> {
        // Solve the quadratic in f64; the catastrophic cancellation in the
        // discriminant is otherwise visible at grazing hits.
        let ox = (ray.org.x - self.center.x) as f64;
        let oy = (ray.org.y - self.center.y) as f64;
        let oz = (ray.org.z - self.center.z) as f64;
        let dx = ray.dir.x as f64;
        let dy = ray.dir.y as f64;
        let dz = ray.dir.z as f64;

        let a = dx * dx + dy * dy + dz * dz;
        let b = 2.0 * (dx * ox + dy * oy + dz * oz);
        let c = ox * ox + oy * oy + oz * oz - (self.radius as f64) * (self.radius as f64);

        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            return None;
        }
        let root = discriminant.sqrt();

        // The numerically stable pair of roots.
        let q = if b < 0.0 {
            -0.5 * (b - root)
        } else {
            -0.5 * (b + root)
        };
        let (t0, t1) = {
            let (t0, t1) = (q / a, if q != 0.0 { c / q } else { q / a });
            if t0 <= t1 {
                (t0, t1)
            } else {
                (t1, t0)
            }
        };

        let tmin = ray.tmin as f64;
        let t = if t0 > tmin {
            t0
        } else if t1 > tmin {
            t1
        } else {
            return None;
        };

        let t = t as Float;
        let normal = (ray.at(t) - self.center) / self.radius;

        Some(Isect {
            dist: t,
            normal,
            mat_id: self.mat_id,
            light_id: None,
        })
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
