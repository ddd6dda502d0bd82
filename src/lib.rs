//! Monte Carlo light-transport renderer for Cornell-box style scenes.
//!
//! The crate renders one of eight built-in scene presets with one of three
//! estimators (eye-light preview, direct illumination with multiple
//! importance sampling, unidirectional path tracing) and writes the result
//! as BMP or Radiance HDR.

#[macro_use]
extern crate log;

pub mod core;
pub mod integrators;
pub mod lights;
pub mod scenes;
pub mod shapes;
