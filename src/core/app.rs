//! Application related stuff

use crate::core::common::Float;
use crate::scenes::N_PRESETS;
use clap::{Parser, ValueEnum};
use lazy_static::lazy_static;

lazy_static! {
    /// The global application options.
    pub static ref OPTIONS: Options = Options::parse();
}

/// The rendering algorithm.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Algorithm {
    /// Eye-light preview shading.
    #[value(name = "el")]
    EyeLight,

    /// Direct illumination with multiple importance sampling.
    #[value(name = "di")]
    DirectIllumination,

    /// Unidirectional path tracing.
    #[value(name = "pt")]
    PathTracing,
}

impl Algorithm {
    /// Returns the human readable algorithm name.
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::EyeLight => "eye light",
            Algorithm::DirectIllumination => "direct illumination",
            Algorithm::PathTracing => "path tracing",
        }
    }

    /// Returns the short algorithm tag used in default filenames.
    pub fn acronym(&self) -> &'static str {
        match self {
            Algorithm::EyeLight => "el",
            Algorithm::DirectIllumination => "di",
            Algorithm::PathTracing => "pt",
        }
    }
}

/// Participating media variants. Accepted on the command line for
/// compatibility; the estimators do not implement volumetric scattering.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum MediaType {
    /// Global homogeneous medium.
    #[value(name = "gh")]
    GlobalHomogeneous,

    /// Isotropic scattering medium.
    #[value(name = "iso")]
    Isotropic,
}

/// System wide options.
#[derive(Parser, Clone, Debug)]
#[command(
    name = "raybox",
    about = "Monte Carlo renderer for Cornell-box style scenes",
    long_about = None
)]
pub struct Options {
    /// Scene preset to render.
    #[arg(
        short = 's',
        long = "scene",
        value_name = "ID",
        default_value_t = 0,
        value_parser = parse_scene_id,
        help = "Render the given scene preset (0..=7)."
    )]
    pub scene: u32,

    /// The rendering algorithm.
    #[arg(
        short = 'a',
        long = "algorithm",
        value_enum,
        default_value_t = Algorithm::PathTracing,
        help = "Use the given rendering algorithm."
    )]
    pub algorithm: Algorithm,

    /// Participating media variant; accepted but not honored by the
    /// estimators.
    #[arg(
        short = 'v',
        long = "volume",
        value_enum,
        help = "Select a participating media type (accepted, not rendered)."
    )]
    pub media: Option<MediaType>,

    /// Number of iterations to run.
    #[arg(
        short = 'i',
        long = "iterations",
        value_name = "NUM",
        default_value_t = 1,
        value_parser = clap::value_parser!(u32).range(1..),
        help = "Run the given number of iterations."
    )]
    pub iterations: u32,

    /// Wall-clock budget in seconds; overrides the iteration count.
    #[arg(
        short = 't',
        long = "time",
        value_name = "SECONDS",
        value_parser = parse_seconds,
        help = "Run for the given number of seconds (takes precedence over -i)."
    )]
    pub max_time: Option<Float>,

    /// Path of the output image.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "FILE",
        help = "Write the image to the given file (.bmp or .hdr)."
    )]
    pub output_name: Option<String>,

    /// Number of worker threads; 0 uses all logical CPUs.
    #[arg(
        long = "nthreads",
        value_name = "NUM",
        default_value_t = 0,
        help = "Use the given number of threads for rendering (0 = all)."
    )]
    pub n_threads: usize,

    /// Base seed for the per-iteration random streams.
    #[arg(
        long = "seed",
        value_name = "NUM",
        default_value_t = 1234,
        help = "Base seed of the random number generators."
    )]
    pub base_seed: u64,
}

impl Options {
    /// Returns the number of threads to use.
    pub fn threads(&self) -> usize {
        let max_threads = std::thread::available_parallelism().map_or(1, |n| n.get());
        match self.n_threads {
            0 => max_threads,
            n if n > max_threads => {
                warn!("Num threads > max logical CPUs {}", max_threads);
                max_threads
            }
            n => n,
        }
    }

    /// Returns the output path: the user-given name with a `.bmp` fallback
    /// extension, or a default derived from the scene and algorithm tags.
    ///
    /// * `scene_acronym` - Short tag of the rendered scene.
    pub fn output_path(&self, scene_acronym: &str) -> String {
        match self.output_name.as_ref() {
            Some(name) if name.ends_with(".bmp") || name.ends_with(".hdr") => name.clone(),
            Some(name) => format!("{}.bmp", name),
            None => format!("{}_{}.bmp", scene_acronym, self.algorithm.acronym()),
        }
    }
}

/// Parses and validates a scene preset id.
///
/// * `s` - The raw argument.
fn parse_scene_id(s: &str) -> Result<u32, String> {
    let id: u32 = s.parse().map_err(|_| format!("`{}` is not a number", s))?;
    if id < N_PRESETS {
        Ok(id)
    } else {
        Err(format!("scene id must be in 0..={}", N_PRESETS - 1))
    }
}

/// Parses and validates a non-negative duration in seconds.
///
/// * `s` - The raw argument.
fn parse_seconds(s: &str) -> Result<Float, String> {
    let seconds: Float = s.parse().map_err(|_| format!("`{}` is not a number", s))?;
    if seconds >= 0.0 {
        Ok(seconds)
    } else {
        Err(String::from("time must be non-negative"))
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
