//! Framebuffer

use crate::core::common::{Float, Int};
use crate::core::geometry::{Vector2f, Vector2i};
use crate::core::image_io::{write_bmp, write_hdr};
use crate::core::spectrum::Spectrum;
use std::io;
use std::path::Path;

/// A 2-D grid of RGB accumulators. Samples splat into the bin containing
/// their raster position; per-iteration framebuffers merge by addition, so
/// accumulation commutes across workers.
#[derive(Clone)]
pub struct Framebuffer {
    /// Image resolution in pixels.
    resolution: Vector2i,

    /// Accumulated color, row-major, top row first.
    pixels: Vec<Spectrum>,
}

impl Framebuffer {
    /// Creates a new black `Framebuffer`.
    ///
    /// * `resolution` - Image resolution in pixels.
    pub fn new(resolution: Vector2i) -> Self {
        let n = (resolution.x * resolution.y) as usize;
        Self {
            resolution,
            pixels: vec![Spectrum::ZERO; n],
        }
    }

    /// Returns the image resolution in pixels.
    pub fn resolution(&self) -> Vector2i {
        self.resolution
    }

    /// Splats a color into the bin containing the sample position. Samples
    /// outside the image are ignored.
    ///
    /// * `sample` - Raster-space sample position.
    /// * `color`  - The color to accumulate.
    pub fn add_color(&mut self, sample: &Vector2f, color: &Spectrum) {
        let x = sample.x as Int;
        let y = sample.y as Int;

        if sample.x < 0.0 || sample.y < 0.0 || x >= self.resolution.x || y >= self.resolution.y {
            return;
        }

        self.pixels[(y * self.resolution.x + x) as usize] += *color;
    }

    /// Adds another framebuffer of the same resolution bin by bin.
    ///
    /// * `other` - The framebuffer to merge in.
    pub fn add_framebuffer(&mut self, other: &Framebuffer) {
        assert_eq!(self.resolution, other.resolution);
        for (dst, src) in self.pixels.iter_mut().zip(other.pixels.iter()) {
            *dst += *src;
        }
    }

    /// Scales every bin by a constant.
    ///
    /// * `s` - The scale factor.
    pub fn scale(&mut self, s: Float) {
        for pixel in self.pixels.iter_mut() {
            *pixel *= s;
        }
    }

    /// Returns the accumulated color of a pixel.
    ///
    /// * `x` - Pixel column.
    /// * `y` - Pixel row.
    pub fn pixel(&self, x: Int, y: Int) -> Spectrum {
        self.pixels[(y * self.resolution.x + x) as usize]
    }

    /// Returns the raw pixel storage.
    pub fn pixels(&self) -> &[Spectrum] {
        &self.pixels
    }

    /// Saves the image, choosing the format from the file extension:
    /// `.hdr` writes Radiance RGBE, anything else a 24-bit BMP.
    ///
    /// * `path` - Output file path.
    pub fn save(&self, path: &Path) -> io::Result<()> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("hdr") => write_hdr(path, &self.pixels, self.resolution),
            _ => write_bmp(path, &self.pixels, self.resolution),
        }
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splats_into_containing_bin() {
        let mut fb = Framebuffer::new(Vector2i::new(4, 4));
        fb.add_color(&Vector2f::new(2.75, 1.25), &Spectrum::ONE);
        fb.add_color(&Vector2f::new(2.01, 1.99), &Spectrum::ONE);

        assert_eq!(fb.pixel(2, 1), Spectrum::new(2.0));
        assert_eq!(fb.pixel(2, 2), Spectrum::ZERO);
    }

    #[test]
    fn ignores_out_of_range_samples() {
        let mut fb = Framebuffer::new(Vector2i::new(2, 2));
        fb.add_color(&Vector2f::new(-0.5, 0.5), &Spectrum::ONE);
        fb.add_color(&Vector2f::new(0.5, 2.5), &Spectrum::ONE);

        assert!(fb.pixels().iter().all(|p| p.is_black()));
    }

    #[test]
    fn merge_and_scale() {
        let mut a = Framebuffer::new(Vector2i::new(2, 1));
        let mut b = Framebuffer::new(Vector2i::new(2, 1));
        a.add_color(&Vector2f::new(0.5, 0.5), &Spectrum::ONE);
        b.add_color(&Vector2f::new(0.5, 0.5), &Spectrum::new(3.0));

        a.add_framebuffer(&b);
        a.scale(0.25);

        assert_eq!(a.pixel(0, 0), Spectrum::new(1.0));
    }
}
