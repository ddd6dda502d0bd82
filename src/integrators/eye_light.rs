//! Eye Light Integrator

use crate::core::common::INV_PI;
use crate::core::geometry::Ray;
use crate::core::rng::RNG;
use crate::core::scene::Scene;
use crate::core::spectrum::Spectrum;
use crate::integrators::Integrator;

/// A diagnostic estimator that shades every hit with the diffuse reflectance
/// attenuated by the angle to the viewer, as if a light rode on the camera.
/// Fast preview only; not energy correct.
pub struct EyeLightIntegrator;

impl Integrator for EyeLightIntegrator {
    /// Returns the incident radiance at the origin of a given camera ray.
    ///
    /// * `scene` - The scene.
    /// * `ray`   - The camera ray.
    /// * `rng`   - The sampler owned by the current iteration (unused).
    fn li(&self, scene: &Scene, ray: &Ray, _rng: &mut RNG) -> Spectrum {
        let Some(isect) = scene.intersect(ray) else {
            return Spectrum::ZERO;
        };

        // Directly visible emitters show their radiance.
        if let Some(light_id) = isect.light_id {
            return scene.light(light_id).radiance();
        }

        let cos_theta = isect.normal.dot(&-ray.dir).abs();
        scene.material(isect.mat_id).diffuse_reflectance * (cos_theta * INV_PI)
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::camera::Camera;
    use crate::core::geometry::{Point3f, Vector2i, Vector3f};
    use crate::core::material::Material;
    use crate::core::common::PI;
    use crate::shapes::Sphere;
    use std::sync::Arc;

    fn head_on_scene() -> Scene {
        Scene {
            camera: Camera::new(
                Point3f::new(0.0, -4.0, 0.0),
                Vector3f::new(0.0, 1.0, 0.0),
                Vector3f::new(0.0, 0.0, 1.0),
                Vector2i::new(8, 8),
                45.0,
            ),
            geometry: vec![Arc::new(Sphere::new(Point3f::zero(), 1.0, 0))],
            materials: vec![Material::diffuse(Spectrum::new(0.8))],
            lights: vec![],
            background: None,
            name: String::new(),
            acronym: String::new(),
        }
    }

    #[test]
    fn head_on_hit_shades_with_full_cosine() {
        let scene = head_on_scene();
        let mut rng = RNG::new(0);
        let ray = Ray::new(Point3f::new(0.0, -4.0, 0.0), Vector3f::new(0.0, 1.0, 0.0), 0.0);

        let radiance = EyeLightIntegrator.li(&scene, &ray, &mut rng);
        assert!((radiance.r() - 0.8 / PI).abs() < 1e-4);
    }

    #[test]
    fn miss_is_black() {
        let scene = head_on_scene();
        let mut rng = RNG::new(0);
        let ray = Ray::new(Point3f::new(0.0, -4.0, 0.0), Vector3f::new(0.0, 0.0, 1.0), 0.0);

        assert!(EyeLightIntegrator.li(&scene, &ray, &mut rng).is_black());
    }
}
