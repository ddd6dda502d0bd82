#[macro_use]
extern crate log;

use raybox::core::app::{Algorithm, OPTIONS};
use raybox::core::common::Float;
use raybox::core::geometry::Vector2i;
use raybox::integrators::{
    render, DirectLightingIntegrator, EyeLightIntegrator, Integrator, PathIntegrator,
};
use raybox::scenes::{cornell_box, preset};
use std::path::Path;
use std::time::{Duration, Instant};

/// Default image resolution.
const RESOLUTION: Vector2i = Vector2i { x: 512, y: 512 };

fn main() {
    // Initialize `env_logger`.
    env_logger::init();

    // Load the program options.
    let options = OPTIONS.clone();

    // Configure number of threads.
    let n_threads = options.threads();
    rayon::ThreadPoolBuilder::new()
        .num_threads(n_threads)
        .build_global()
        .unwrap();

    let scene = cornell_box(RESOLUTION, preset(options.scene));

    let integrator: Box<dyn Integrator> = match options.algorithm {
        Algorithm::EyeLight => Box::new(EyeLightIntegrator),
        Algorithm::DirectIllumination => Box::new(DirectLightingIntegrator),
        Algorithm::PathTracing => Box::new(PathIntegrator::default()),
    };

    info!("Scene:     {}", scene.name);
    info!("Algorithm: {}", options.algorithm.name());
    if let Some(media) = options.media {
        info!("Volume:    {:?} (not rendered)", media);
    }
    match options.max_time {
        Some(seconds) => info!("Budget:    {:.2}s", seconds),
        None => info!("Budget:    {} iterations", options.iterations),
    }

    let start = Instant::now();
    let max_time = options.max_time.map(Duration::from_secs_f32);
    let (mut framebuffer, iterations) = render(
        integrator.as_ref(),
        &scene,
        options.base_seed,
        options.iterations as usize,
        max_time,
        n_threads,
    );
    framebuffer.scale(1.0 / iterations as Float);

    info!(
        "Done:      {} iterations in {:.2}s",
        iterations,
        start.elapsed().as_secs_f64()
    );

    let path = options.output_path(&scene.acronym);
    if let Err(err) = framebuffer.save(Path::new(&path)) {
        error!("Failed to write '{}': {}", path, err);
        std::process::exit(1);
    }
    info!("Image:     {}", path);
}
