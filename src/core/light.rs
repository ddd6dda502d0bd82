//! Light

use crate::core::common::Float;
use crate::core::geometry::{Frame, Point3f, Vector2f, Vector3f};
use crate::core::spectrum::Spectrum;
use std::sync::Arc;

/// Return value for `Light::sample_li()`.
#[derive(Copy, Clone, Debug)]
pub struct Li {
    /// Unit direction from the shading point toward the light.
    pub wi: Vector3f,

    /// Distance to the light; infinite for environment lights.
    pub dist: Float,

    /// Density of the sample in solid-angle measure at the shading point.
    /// Delta lights report 1 by convention.
    pub pdf: Float,

    /// Incident radiance with the geometry terms (and, for area lights, the
    /// inverse density) already folded in. Estimators add
    /// `value · f · weight` without dividing by the pdf again.
    pub value: Spectrum,
}

impl Li {
    /// Return a new `Li`.
    ///
    /// * `wi`    - Unit direction from the shading point toward the light.
    /// * `dist`  - Distance to the light.
    /// * `pdf`   - Density of the sample in solid-angle measure.
    /// * `value` - Weighted incident radiance.
    pub fn new(wi: Vector3f, dist: Float, pdf: Float, value: Spectrum) -> Self {
        Self {
            wi,
            dist,
            pdf,
            value,
        }
    }
}

/// Light trait provides common behavior.
pub trait Light {
    /// Samples the illumination arriving at a shading point from this light.
    ///
    /// * `p`     - The shading point.
    /// * `frame` - Shading frame at the point; its z-axis is the normal.
    /// * `u`     - Random sample values.
    fn sample_li(&self, p: &Point3f, frame: &Frame, u: &Vector2f) -> Li;

    /// Returns the density, in solid-angle measure, with which `sample_li()`
    /// would generate a direction that reaches this light. Used to weight
    /// BRDF-sampled hits.
    ///
    /// * `dist` - Distance to the light surface along the direction.
    /// * `wi`   - Unit direction from the shading point toward the light.
    fn pdf_li(&self, dist: Float, wi: &Vector3f) -> Float;

    /// Returns the radiance the light emits toward any point that sees it.
    fn radiance(&self) -> Spectrum;

    /// Returns whether the light is described by a delta distribution.
    fn is_delta_light(&self) -> bool {
        false
    }

    /// Returns whether the light sits at infinity.
    fn is_infinite(&self) -> bool {
        false
    }
}

/// Atomic reference counted `Light`.
pub type ArcLight = Arc<dyn Light + Send + Sync>;
