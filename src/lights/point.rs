//! Point Light Source

use crate::core::common::Float;
use crate::core::geometry::{Frame, Point3f, Vector2f, Vector3f};
use crate::core::light::{Li, Light};
use crate::core::spectrum::Spectrum;

/// An isotropic point light that emits the same radiant intensity in all
/// directions. Its distribution is a delta; estimators give it the
/// light-strategy weight 1 and BRDF sampling can never reach it.
pub struct PointLight {
    /// Position.
    pub position: Point3f,

    /// Radiant intensity.
    pub intensity: Spectrum,
}

impl PointLight {
    /// Creates a new `PointLight`.
    ///
    /// * `position`  - Position.
    /// * `intensity` - Radiant intensity.
    pub fn new(position: Point3f, intensity: Spectrum) -> Self {
        Self {
            position,
            intensity,
        }
    }
}

impl Light for PointLight {
    /// Samples the illumination arriving at a shading point from this light.
    ///
    /// * `p`     - The shading point.
    /// * `frame` - Shading frame at the point.
    /// * `u`     - Random sample values (unused, the light is a point).
    fn sample_li(&self, p: &Point3f, frame: &Frame, _u: &Vector2f) -> Li {
        let mut wi = self.position - *p;
        let dist_squared = wi.length_squared();
        let dist = dist_squared.sqrt();
        wi = wi / dist;

        let cos_theta = frame.normal().dot(&wi);
        let value = if cos_theta <= 0.0 {
            Spectrum::ZERO
        } else {
            self.intensity * (cos_theta / dist_squared)
        };

        Li::new(wi, dist, 1.0, value)
    }

    /// Returns the density with which `sample_li()` would generate a
    /// direction reaching this light. A BRDF sample cannot hit a point, so
    /// the density is zero.
    ///
    /// * `dist` - Distance to the light surface along the direction.
    /// * `wi`   - Unit direction from the shading point toward the light.
    fn pdf_li(&self, _dist: Float, _wi: &Vector3f) -> Float {
        0.0
    }

    /// Returns the radiance the light emits toward any point that sees it.
    /// A point light has no surface to hit.
    fn radiance(&self) -> Spectrum {
        Spectrum::ZERO
    }

    /// Returns whether the light is described by a delta distribution.
    fn is_delta_light(&self) -> bool {
        true
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
