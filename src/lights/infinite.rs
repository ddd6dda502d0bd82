//! Infinite Area Light Source

use crate::core::common::{Float, INFINITY, INV_FOUR_PI, TWO_PI};
use crate::core::geometry::{Frame, Point3f, Vector2f, Vector3f};
use crate::core::light::{Li, Light};
use crate::core::sampling::uniform_sample_hemisphere;
use crate::core::spectrum::Spectrum;

/// An environment light of constant radiance at infinite distance.
pub struct InfiniteAreaLight {
    /// Background radiance.
    pub color: Spectrum,
}

impl InfiniteAreaLight {
    /// Creates a new `InfiniteAreaLight`.
    ///
    /// * `color` - Background radiance.
    pub fn new(color: Spectrum) -> Self {
        Self { color }
    }
}

impl Light for InfiniteAreaLight {
    /// Samples a direction on the hemisphere above the shading point. The
    /// returned value carries the `2π` factor of the uniform hemisphere
    /// density, so it is already divided by the sampling pdf.
    ///
    /// * `p`     - The shading point (unused, the light is at infinity).
    /// * `frame` - Shading frame at the point.
    /// * `u`     - Random sample values.
    fn sample_li(&self, _p: &Point3f, frame: &Frame, u: &Vector2f) -> Li {
        let wi = frame.to_world(&uniform_sample_hemisphere(u)).normalize();

        let cos_theta = frame.normal().dot(&wi);
        let value = if cos_theta <= 0.0 {
            Spectrum::ZERO
        } else {
            self.color * (cos_theta * TWO_PI)
        };

        Li::new(wi, INFINITY, INV_FOUR_PI, value)
    }

    /// Returns the density used to weight BRDF samples that escape toward
    /// the environment.
    ///
    /// * `dist` - Distance to the light (infinite).
    /// * `wi`   - Unit direction from the shading point.
    fn pdf_li(&self, _dist: Float, _wi: &Vector3f) -> Float {
        INV_FOUR_PI
    }

    /// Returns the background radiance.
    fn radiance(&self) -> Spectrum {
        self.color
    }

    /// Returns whether the light sits at infinity.
    fn is_infinite(&self) -> bool {
        true
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rng::RNG;

    #[test]
    fn samples_stay_above_the_surface() {
        let light = InfiniteAreaLight::new(Spectrum::new(1.0));
        let frame = Frame::from_z(&Vector3f::new(0.0, 1.0, 1.0));
        let mut rng = RNG::new(9);

        for _ in 0..1000 {
            let li = light.sample_li(&Point3f::zero(), &frame, &rng.uniform_vec2f());
            assert_eq!(li.dist, INFINITY);
            if !li.value.is_black() {
                assert!(frame.normal().dot(&li.wi) > 0.0);
            }
        }
    }

    #[test]
    fn irradiance_estimate_matches_closed_form() {
        // For constant radiance L over the hemisphere the weighted samples
        // average to E = π·L (the factor cosθ·2π is 1/pdf · cosθ).
        let light = InfiniteAreaLight::new(Spectrum::new(0.5));
        let frame = Frame::from_z(&Vector3f::new(0.0, 0.0, 1.0));
        let mut rng = RNG::new(4);

        let n = 100_000;
        let mut sum = 0.0;
        for _ in 0..n {
            sum += light
                .sample_li(&Point3f::zero(), &frame, &rng.uniform_vec2f())
                .value
                .r();
        }
        let estimate = sum / n as Float;
        assert!((estimate - 0.5 * std::f32::consts::PI).abs() < 0.02);
    }
}
