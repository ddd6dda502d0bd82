//! Integrators

use crate::core::common::Float;
use crate::core::framebuffer::Framebuffer;
use crate::core::geometry::{Ray, Vector2f};
use crate::core::rng::RNG;
use crate::core::scene::Scene;
use crate::core::spectrum::Spectrum;
use rayon::prelude::*;
use std::time::{Duration, Instant};

mod direct_lighting;
mod eye_light;
mod path;

// Re-export
pub use direct_lighting::*;
pub use eye_light::*;
pub use path::*;

/// Integrator trait provides the per-sample radiance estimate.
pub trait Integrator: Send + Sync {
    /// Returns the incident radiance at the origin of a given camera ray.
    ///
    /// * `scene` - The scene.
    /// * `ray`   - The camera ray.
    /// * `rng`   - The sampler owned by the current iteration.
    fn li(&self, scene: &Scene, ray: &Ray, rng: &mut RNG) -> Spectrum;
}

/// Renders one full iteration into a framebuffer: one jittered sample per
/// pixel, visited in flat row-major order.
///
/// * `integrator`  - The radiance estimator.
/// * `scene`       - The scene.
/// * `framebuffer` - Accumulation target.
/// * `iteration`   - Iteration index; combined with the base seed.
/// * `base_seed`   - Base RNG seed.
pub fn render_iteration(
    integrator: &dyn Integrator,
    scene: &Scene,
    framebuffer: &mut Framebuffer,
    iteration: usize,
    base_seed: u64,
) {
    let mut rng = RNG::new(base_seed ^ iteration as u64);

    let res = scene.camera.resolution();
    for pix_id in 0..(res.x * res.y) {
        let x = pix_id % res.x;
        let y = pix_id / res.x;

        let sample = Vector2f::new(x as Float, y as Float) + rng.uniform_vec2f();
        let ray = scene.camera.generate_ray(&sample);
        let radiance = integrator.li(scene, &ray, &mut rng);

        framebuffer.add_color(&sample, &radiance);
    }
}

/// Renders a number of iterations across a fixed set of workers and returns
/// the merged framebuffer together with the iteration count actually
/// completed.
///
/// Worker `w` renders iterations `w, w + n_workers, …` into a private
/// framebuffer; the per-iteration RNG streams depend only on the iteration
/// index and the framebuffers merge in worker order, so the result is
/// reproducible for a fixed `n_workers`.
///
/// * `integrator` - The radiance estimator.
/// * `scene`      - The scene.
/// * `base_seed`  - Base RNG seed.
/// * `iterations` - Number of iterations to render.
/// * `max_time`   - Wall-clock budget; when set it overrides `iterations`
///                  and workers stop between iterations once it is spent.
/// * `n_workers`  - Number of parallel workers.
pub fn render(
    integrator: &dyn Integrator,
    scene: &Scene,
    base_seed: u64,
    iterations: usize,
    max_time: Option<Duration>,
    n_workers: usize,
) -> (Framebuffer, usize) {
    let start = Instant::now();
    let resolution = scene.camera.resolution();

    let workers: Vec<(Framebuffer, usize)> = (0..n_workers)
        .into_par_iter()
        .map(|w| {
            let mut framebuffer = Framebuffer::new(resolution);
            let mut completed = 0;
            let mut iteration = w;

            loop {
                let budget_left = match max_time {
                    Some(limit) => start.elapsed() < limit,
                    None => iteration < iterations,
                };
                // The first worker always contributes one iteration so a tiny
                // time budget still produces an image.
                if !budget_left && !(w == 0 && completed == 0) {
                    break;
                }

                render_iteration(integrator, scene, &mut framebuffer, iteration, base_seed);
                completed += 1;
                iteration += n_workers;
            }

            (framebuffer, completed)
        })
        .collect();

    let mut framebuffer = Framebuffer::new(resolution);
    let mut total_iterations = 0;
    for (worker_framebuffer, completed) in workers.iter() {
        framebuffer.add_framebuffer(worker_framebuffer);
        total_iterations += completed;
    }

    debug!(
        "Rendered {} iterations in {:.2}s on {} workers",
        total_iterations,
        start.elapsed().as_secs_f64(),
        n_workers
    );

    (framebuffer, total_iterations)
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
