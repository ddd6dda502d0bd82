//! Path Integrator

use crate::core::common::{min, Float, EPS_RAY, INFINITY};
use crate::core::geometry::{Frame, Ray};
use crate::core::rng::RNG;
use crate::core::sampling::balance_heuristic;
use crate::core::scene::Scene;
use crate::core::spectrum::Spectrum;
use crate::integrators::Integrator;

/// A unidirectional path tracer. Emitter hits along the walk are weighted
/// against the light-sampling strategy with the balance heuristic, except on
/// the camera segment where no competing strategy exists. Russian roulette
/// terminates the walk unbiasedly at every bounce; no depth cap is applied.
pub struct PathIntegrator {
    /// Accepted for configuration compatibility; the walk is terminated by
    /// Russian roulette alone.
    #[allow(dead_code)]
    max_path_length: u32,

    /// Accepted for configuration compatibility; see `max_path_length`.
    #[allow(dead_code)]
    min_path_length: u32,
}

impl PathIntegrator {
    /// Creates a new `PathIntegrator`.
    ///
    /// * `max_path_length` - Accepted and ignored.
    /// * `min_path_length` - Accepted and ignored.
    pub fn new(max_path_length: u32, min_path_length: u32) -> Self {
        Self {
            max_path_length,
            min_path_length,
        }
    }
}

impl Default for PathIntegrator {
    /// Returns a `PathIntegrator` with the default path length bounds.
    fn default() -> Self {
        Self::new(10, 0)
    }
}

impl Integrator for PathIntegrator {
    /// Returns the incident radiance at the origin of a given camera ray.
    ///
    /// * `scene` - The scene.
    /// * `ray`   - The camera ray.
    /// * `rng`   - The sampler owned by the current iteration.
    fn li(&self, scene: &Scene, ray: &Ray, rng: &mut RNG) -> Spectrum {
        let mut l = Spectrum::ZERO;
        let mut beta = Spectrum::ONE;
        let mut ray = *ray;
        // Density of the last BRDF-sampled segment, for weighting emitter
        // hits against the light-sampling strategy.
        let mut bsdf_pdf: Float = 1.0;
        let mut first_hit = true;

        loop {
            let Some(isect) = scene.intersect(&ray) else {
                if let Some(background) = scene.background.as_ref() {
                    let weight = if first_hit {
                        1.0
                    } else {
                        balance_heuristic(bsdf_pdf, background.pdf_li(INFINITY, &ray.dir))
                    };
                    l += beta * background.radiance() * weight;
                }
                break;
            };

            // Emission ends the walk; emitters do not reflect.
            if let Some(light_id) = isect.light_id {
                let light = scene.light(light_id);
                let weight = if first_hit {
                    1.0
                } else {
                    balance_heuristic(bsdf_pdf, light.pdf_li(isect.dist, &ray.dir))
                };
                l += beta * light.radiance() * weight;
                break;
            }
            first_hit = false;

            let hit_point = ray.at(isect.dist);
            let frame = Frame::from_z(&isect.normal);
            let wo_local = frame.to_local(&-ray.dir);
            let material = scene.material(isect.mat_id);

            let u = rng.uniform_vec2f();
            let u_lobe = rng.uniform_float();
            let Some(bs) = material.sample_f(&wo_local, &u, u_lobe) else {
                break;
            };
            if bs.pdf == 0.0 {
                break;
            }

            let wi = frame.to_world(&bs.wi);
            let cos_theta = isect.normal.dot(&wi).abs();
            let delta = material.f(&bs.wi, &wo_local) * (cos_theta / bs.pdf);

            // Russian roulette on the throughput increment.
            let q = min(1.0, delta.max_component_value());
            if rng.uniform_float() >= q {
                break;
            }
            beta *= delta / q;

            debug_assert!(!beta.has_nans());

            ray = Ray::new(hit_point + wi * EPS_RAY, wi, 0.0);
            bsdf_pdf = bs.pdf;
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
    use crate::core::light::ArcLight;
    use crate::core::material::Material;
    use crate::lights::InfiniteAreaLight;
    use std::sync::Arc;

    // An empty scene lit by a constant environment.
    fn sky_only_scene() -> Scene {
        let sky: ArcLight =
            Arc::new(InfiniteAreaLight::new(Spectrum::from_rgb(0.2, 0.4, 0.8)));
        Scene {
            camera: Camera::new(
                Point3f::zero(),
                Vector3f::new(0.0, 1.0, 0.0),
                Vector3f::new(0.0, 0.0, 1.0),
                Vector2i::new(8, 8),
                45.0,
            ),
            geometry: vec![],
            materials: vec![],
            lights: vec![sky.clone()],
            background: Some(sky),
            name: String::new(),
            acronym: String::new(),
        }
    }

    #[test]
    fn camera_ray_miss_returns_background_unweighted() {
        let scene = sky_only_scene();
        let mut rng = RNG::new(0);
        let ray = Ray::new(Point3f::zero(), Vector3f::new(0.0, 1.0, 0.0), 0.0);

        let l = PathIntegrator::default().li(&scene, &ray, &mut rng);
        assert_eq!(l, Spectrum::from_rgb(0.2, 0.4, 0.8));
    }

    #[test]
    fn black_material_terminates_without_contribution() {
        let mut scene = sky_only_scene();
        scene.background = None;
        scene.lights.clear();
        scene.materials.push(Material::diffuse(Spectrum::ZERO));
        scene.geometry.push(Arc::new(crate::shapes::Sphere::new(
            Point3f::new(0.0, 3.0, 0.0),
            1.0,
            0,
        )));

        let mut rng = RNG::new(0);
        let ray = Ray::new(Point3f::zero(), Vector3f::new(0.0, 1.0, 0.0), 0.0);

        let l = PathIntegrator::default().li(&scene, &ray, &mut rng);
        assert!(l.is_black());
    }
}
