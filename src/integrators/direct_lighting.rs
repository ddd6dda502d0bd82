//! Direct Lighting Integrator

use crate::core::common::EPS_RAY;
use crate::core::geometry::{Frame, Ray};
use crate::core::rng::RNG;
use crate::core::sampling::balance_heuristic;
use crate::core::scene::Scene;
use crate::core::spectrum::Spectrum;
use crate::integrators::Integrator;

/// Estimates direct illumination at the first camera-ray hit by combining
/// two strategies with the balance heuristic: sampling every light, and
/// sampling the BRDF once to catch emitters the light strategy handles
/// poorly (highly glossy lobes, large nearby lights).
pub struct DirectLightingIntegrator;

impl Integrator for DirectLightingIntegrator {
    /// Returns the incident radiance at the origin of a given camera ray.
    ///
    /// * `scene` - The scene.
    /// * `ray`   - The camera ray.
    /// * `rng`   - The sampler owned by the current iteration.
    fn li(&self, scene: &Scene, ray: &Ray, rng: &mut RNG) -> Spectrum {
        let Some(isect) = scene.intersect(ray) else {
            return Spectrum::ZERO;
        };

        // Directly visible emitters show their radiance; no reflection off
        // an emitting surface.
        if let Some(light_id) = isect.light_id {
            return scene.light(light_id).radiance();
        }

        let hit_point = ray.at(isect.dist);
        let frame = Frame::from_z(&isect.normal);
        let wo_local = frame.to_local(&-ray.dir);
        let material = scene.material(isect.mat_id);

        let mut l = Spectrum::ZERO;

        // Light sampling pass. The environment contributes through the BRDF
        // pass alone; its balance weight here would be identically zero.
        for light in scene.lights.iter() {
            if light.is_infinite() {
                continue;
            }

            let u = rng.uniform_vec2f();
            let li = light.sample_li(&hit_point, &frame, &u);
            if li.value.is_black() {
                continue;
            }

            // Delta lights have no BRDF-sampling competitor.
            let weight = if light.is_delta_light() {
                1.0
            } else {
                let scattering_pdf = material.pdf(&wo_local, &frame.to_local(&li.wi));
                balance_heuristic(li.pdf, scattering_pdf)
            };

            if weight > 0.0 && !scene.occluded(&hit_point, &li.wi, li.dist) {
                l += li.value * material.f(&frame.to_local(&li.wi), &wo_local) * weight;
            }
        }

        // BRDF sampling pass.
        let u = rng.uniform_vec2f();
        let u_lobe = rng.uniform_float();
        let Some(bs) = material.sample_f(&wo_local, &u, u_lobe) else {
            return l;
        };
        if bs.pdf == 0.0 {
            return l;
        }

        let wi = frame.to_world(&bs.wi);
        let cos_theta = isect.normal.dot(&wi);
        if cos_theta <= 0.0 {
            return l;
        }

        let second_ray = Ray::new(hit_point + wi * EPS_RAY, wi, 0.0);
        match scene.intersect(&second_ray) {
            Some(light_isect) => {
                // Only area emitters are reachable; a point has no surface.
                if let Some(light_id) = light_isect.light_id {
                    let light = scene.light(light_id);
                    let light_pdf = light.pdf_li(light_isect.dist, &wi);
                    let weight = balance_heuristic(bs.pdf, light_pdf);

                    l += light.radiance()
                        * material.f(&bs.wi, &wo_local)
                        * (cos_theta * weight / bs.pdf);
                }
            }
            None => {
                if let Some(background) = scene.background.as_ref() {
                    l += background.radiance()
                        * material.f(&bs.wi, &wo_local)
                        * (cos_theta / bs.pdf);
                }
            }
        }

        l
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
    use crate::lights::PointLight;
    use crate::shapes::Triangle;
    use std::sync::Arc;

    // A single diffuse floor quad with one point light above it.
    fn point_light_scene() -> Scene {
        let floor_a = Triangle::new(
            Point3f::new(-5.0, -5.0, 0.0),
            Point3f::new(5.0, -5.0, 0.0),
            Point3f::new(5.0, 5.0, 0.0),
            0,
        );
        let floor_b = Triangle::new(
            Point3f::new(-5.0, -5.0, 0.0),
            Point3f::new(5.0, 5.0, 0.0),
            Point3f::new(-5.0, 5.0, 0.0),
            0,
        );
        Scene {
            camera: Camera::new(
                Point3f::new(0.0, 0.0, 3.0),
                Vector3f::new(0.0, 0.0, -1.0),
                Vector3f::new(0.0, 1.0, 0.0),
                Vector2i::new(8, 8),
                45.0,
            ),
            geometry: vec![Arc::new(floor_a), Arc::new(floor_b)],
            materials: vec![Material::diffuse(Spectrum::new(0.6))],
            lights: vec![Arc::new(PointLight::new(
                Point3f::new(0.0, 0.0, 2.0),
                Spectrum::new(10.0),
            ))],
            background: None,
            name: String::new(),
            acronym: String::new(),
        }
    }

    #[test]
    fn point_light_estimate_has_zero_variance() {
        // With a single point light the light pass is deterministic and the
        // BRDF pass finds no emitter, so the estimate must not depend on the
        // sampler state.
        let scene = point_light_scene();
        let ray = Ray::new(Point3f::new(0.0, 0.0, 3.0), Vector3f::new(0.0, 0.0, -1.0), 0.0);

        let a = DirectLightingIntegrator.li(&scene, &ray, &mut RNG::new(1));
        let b = DirectLightingIntegrator.li(&scene, &ray, &mut RNG::new(99));
        assert_eq!(a, b);
    }

    #[test]
    fn point_light_estimate_matches_closed_form() {
        // Directly below the light: L = I/d² · cosθ · ρ/π with cosθ = 1,
        // d = 2.
        let scene = point_light_scene();
        let ray = Ray::new(Point3f::new(0.0, 0.0, 3.0), Vector3f::new(0.0, 0.0, -1.0), 0.0);

        let l = DirectLightingIntegrator.li(&scene, &ray, &mut RNG::new(1));
        let expected = 10.0 / 4.0 * 0.6 / PI;
        assert!((l.r() - expected).abs() < 1e-4);
    }
}
