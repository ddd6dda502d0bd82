//! Diffuse Area Light Source

use crate::core::common::{max, Float};
use crate::core::geometry::{Frame, Point3f, Vector2f, Vector3f};
use crate::core::light::{Li, Light};
use crate::core::sampling::uniform_sample_triangle;
use crate::core::spectrum::Spectrum;

/// A one-sided area light over a single triangle with spatially and
/// directionally uniform emitted radiance.
pub struct DiffuseAreaLight {
    /// Triangle origin.
    pub p0: Point3f,

    /// First edge vector.
    pub e1: Vector3f,

    /// Second edge vector.
    pub e2: Vector3f,

    /// Frame whose z-axis is the emitting side's normal.
    pub frame: Frame,

    /// Emitted radiance.
    pub radiance: Spectrum,

    /// Reciprocal of the triangle area, `2 / |e1 × e2|`.
    pub inv_area: Float,
}

impl DiffuseAreaLight {
    /// Creates a new `DiffuseAreaLight` over the triangle `p0, p1, p2`. The
    /// winding determines the emitting side.
    ///
    /// * `p0`       - First vertex.
    /// * `p1`       - Second vertex.
    /// * `p2`       - Third vertex.
    /// * `radiance` - Emitted radiance.
    pub fn new(p0: Point3f, p1: Point3f, p2: Point3f, radiance: Spectrum) -> Self {
        let e1 = p1 - p0;
        let e2 = p2 - p0;

        let normal = e1.cross(&e2);
        let inv_area = 2.0 / normal.length();

        Self {
            p0,
            e1,
            e2,
            frame: Frame::from_z(&normal),
            radiance,
            inv_area,
        }
    }
}

impl Light for DiffuseAreaLight {
    /// Samples the illumination arriving at a shading point from a uniformly
    /// chosen point on the triangle. The returned value folds in both cosine
    /// factors and the conversion from area to solid-angle density, so it is
    /// already divided by the returned pdf.
    ///
    /// * `p`     - The shading point.
    /// * `frame` - Shading frame at the point.
    /// * `u`     - Random sample values.
    fn sample_li(&self, p: &Point3f, frame: &Frame, u: &Vector2f) -> Li {
        let b = uniform_sample_triangle(u);
        let on_light = self.p0 + self.e1 * b.x + self.e2 * b.y;

        let mut wi = on_light - *p;
        let dist_squared = wi.length_squared();
        let dist = dist_squared.sqrt();
        wi = wi / dist;

        let cos_x = frame.normal().dot(&wi);
        let cos_y = -wi.dot(&self.frame.normal());

        if cos_x <= 0.0 || cos_y <= 0.0 {
            return Li::new(wi, dist, 0.0, Spectrum::ZERO);
        }

        let value = self.radiance * (cos_x * cos_y / (dist_squared * self.inv_area));
        let pdf = dist_squared * self.inv_area / cos_y;

        Li::new(wi, dist, pdf, value)
    }

    /// Returns the solid-angle density with which `sample_li()` would
    /// generate a direction that reaches the light at the given distance.
    /// One-sided: the density diverges toward the back face, which zeroes
    /// the balance weight of a sample that grazes it.
    ///
    /// * `dist` - Distance to the light surface along the direction.
    /// * `wi`   - Unit direction from the shading point toward the light.
    fn pdf_li(&self, dist: Float, wi: &Vector3f) -> Float {
        let cos_y = max(0.0, self.frame.normal().dot(&-*wi));
        dist * dist * self.inv_area / cos_y
    }

    /// Returns the emitted radiance.
    fn radiance(&self) -> Spectrum {
        self.radiance
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::common::INFINITY;
    use proptest::prelude::*;

    // A light at z = 1 facing down (-z).
    fn overhead_light() -> DiffuseAreaLight {
        DiffuseAreaLight::new(
            Point3f::new(-0.5, -0.5, 1.0),
            Point3f::new(-0.5, 0.5, 1.0),
            Point3f::new(0.5, -0.5, 1.0),
            Spectrum::new(4.0),
        )
    }

    #[test]
    fn faces_down() {
        let light = overhead_light();
        assert!((light.frame.normal() - Vector3f::new(0.0, 0.0, -1.0)).length() < 1e-5);
        assert!((light.inv_area - 2.0).abs() < 1e-5);
    }

    proptest! {
        #[test]
        fn sampled_points_lie_on_triangle(x in 0.0..1.0f32, y in 0.0..1.0f32) {
            let light = overhead_light();
            let b = uniform_sample_triangle(&Vector2f::new(x, y));
            let p = light.p0 + light.e1 * b.x + light.e2 * b.y;

            prop_assert!(b.x >= 0.0 && b.y >= 0.0 && b.x + b.y <= 1.0);
            prop_assert!((p.z - 1.0).abs() < 1e-6);
        }

        #[test]
        fn value_pdf_product_recovers_radiance(x in 0.0..1.0f32, y in 0.0..1.0f32) {
            let light = overhead_light();
            let frame = Frame::from_z(&Vector3f::new(0.0, 0.0, 1.0));
            let shading_point = Point3f::new(0.1, -0.2, 0.0);

            let li = light.sample_li(&shading_point, &frame, &Vector2f::new(x, y));
            prop_assume!(!li.value.is_black());

            // value · pdf = Le · cosθ at the shading point.
            let cos_x = frame.normal().dot(&li.wi);
            let recovered = li.value * li.pdf;
            prop_assert!((recovered.r() - 4.0 * cos_x).abs() < 1e-3);
        }
    }

    #[test]
    fn back_side_sample_is_black() {
        let light = overhead_light();
        let frame = Frame::from_z(&Vector3f::new(0.0, 0.0, -1.0));

        // Shading point above the light sees its back face.
        let li = light.sample_li(&Point3f::new(0.0, 0.0, 2.0), &frame, &Vector2f::new(0.3, 0.3));
        assert!(li.value.is_black());
        assert_eq!(li.pdf, 0.0);
    }

    #[test]
    fn back_side_pdf_diverges() {
        let light = overhead_light();
        // A direction arriving at the back face: cos_y clamps to 0.
        assert_eq!(light.pdf_li(1.0, &Vector3f::new(0.0, 0.0, -1.0)), INFINITY);
    }
}
