//! Scene

use crate::core::camera::Camera;
use crate::core::common::{Float, EPS_RAY};
use crate::core::geometry::{Isect, Point3f, Ray, Vector3f};
use crate::core::light::ArcLight;
use crate::core::material::Material;
use crate::shapes::ArcShape;

/// An immutable scene: camera, geometry, material table and light table.
/// Shared read-only between all rendering workers.
pub struct Scene {
    /// The camera.
    pub camera: Camera,

    /// All scene geometry.
    pub geometry: Vec<ArcShape>,

    /// The material table, indexed by `Isect::mat_id`.
    pub materials: Vec<Material>,

    /// All light sources, indexed by `Isect::light_id`.
    pub lights: Vec<ArcLight>,

    /// The environment light, when the scene has one. Also present in
    /// `lights`.
    pub background: Option<ArcLight>,

    /// Human readable scene description.
    pub name: String,

    /// Short tag used to derive default output filenames.
    pub acronym: String,
}

impl Scene {
    /// Returns the closest intersection along a ray, if any.
    ///
    /// * `ray` - The ray.
    pub fn intersect(&self, ray: &Ray) -> Option<Isect> {
        let mut closest: Option<Isect> = None;
        for shape in self.geometry.iter() {
            if let Some(isect) = shape.intersect(ray) {
                if closest.map_or(true, |c| isect.dist < c.dist) {
                    closest = Some(isect);
                }
            }
        }
        closest
    }

    /// Returns true when the segment from a point toward a direction is
    /// blocked before reaching the given distance. The segment is shortened
    /// at both ends to avoid self-intersection.
    ///
    /// * `p`        - Segment start.
    /// * `dir`      - Unit direction.
    /// * `max_dist` - Distance to the light; may be infinite.
    pub fn occluded(&self, p: &Point3f, dir: &Vector3f, max_dist: Float) -> bool {
        let ray = Ray::new(*p + *dir * EPS_RAY, *dir, 0.0);
        let limit = max_dist - 2.0 * EPS_RAY;

        for shape in self.geometry.iter() {
            if let Some(isect) = shape.intersect(&ray) {
                if isect.dist < limit {
                    return true;
                }
            }
        }
        false
    }

    /// Returns the material with the given id.
    ///
    /// * `id` - Index into the material table.
    pub fn material(&self, id: usize) -> &Material {
        &self.materials[id]
    }

    /// Returns the light with the given id.
    ///
    /// * `id` - Index into the light table.
    pub fn light(&self, id: usize) -> &ArcLight {
        &self.lights[id]
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
