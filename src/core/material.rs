//! Material

use crate::core::common::*;
use crate::core::geometry::{Frame, Vector2f, Vector3f};
use crate::core::sampling::*;
use crate::core::spectrum::Spectrum;

/// Return value for `Material::sample_f()`.
#[derive(Copy, Clone, Debug)]
pub struct BxDFSample {
    /// Sampled incident direction in the shading frame's local space.
    pub wi: Vector3f,

    /// Combined density of the sampled direction in solid-angle measure.
    pub pdf: Float,
}

/// A surface material combining a Lambertian lobe with a modified Phong
/// glossy lobe. All directions are expressed in the shading frame's local
/// space where the surface normal is `(0, 0, 1)`; `wi` points toward the
/// light and `wo` toward the viewer.
///
/// For energy conservation the component-wise sum of the two reflectances
/// is expected to stay ≤ 1; the sampling densities assume it.
#[derive(Copy, Clone, Debug)]
pub struct Material {
    /// Diffuse reflectance.
    pub diffuse_reflectance: Spectrum,

    /// Glossy reflectance.
    pub phong_reflectance: Spectrum,

    /// Phong exponent (≥ 1).
    pub phong_exponent: Float,
}

impl Material {
    /// Creates a new purely diffuse `Material`.
    ///
    /// * `diffuse_reflectance` - Diffuse reflectance.
    pub fn diffuse(diffuse_reflectance: Spectrum) -> Self {
        Self {
            diffuse_reflectance,
            phong_reflectance: Spectrum::ZERO,
            phong_exponent: 1.0,
        }
    }

    /// Creates a new `Material` with both lobes.
    ///
    /// * `diffuse_reflectance` - Diffuse reflectance.
    /// * `phong_reflectance`   - Glossy reflectance.
    /// * `phong_exponent`      - Phong exponent (≥ 1).
    pub fn glossy(
        diffuse_reflectance: Spectrum,
        phong_reflectance: Spectrum,
        phong_exponent: Float,
    ) -> Self {
        Self {
            diffuse_reflectance,
            phong_reflectance,
            phong_exponent,
        }
    }

    /// Evaluates the BRDF.
    ///
    /// * `wi` - Incident direction, local space.
    /// * `wo` - Outgoing direction, local space.
    pub fn f(&self, wi: &Vector3f, wo: &Vector3f) -> Spectrum {
        if wi.z <= 0.0 && wo.z <= 0.0 {
            return Spectrum::ZERO;
        }

        let diffuse = self.diffuse_reflectance * INV_PI;

        let cos_alpha = max(0.0, reflect_z(wi).dot(wo));
        let glossy = self.phong_reflectance
            * ((self.phong_exponent + 2.0) * INV_TWO_PI * cos_alpha.powf(self.phong_exponent));

        diffuse + glossy
    }

    /// Samples an incident direction, choosing a lobe by its relative albedo
    /// weight and returning the combined density. Returns `None` for a black
    /// material; the caller is expected to terminate.
    ///
    /// * `wo`     - Outgoing direction, local space.
    /// * `u`      - Random sample for the chosen lobe.
    /// * `u_lobe` - Random sample for lobe selection.
    pub fn sample_f(&self, wo: &Vector3f, u: &Vector2f, u_lobe: Float) -> Option<BxDFSample> {
        let (pd, _) = self.lobe_probabilities()?;

        let wi = if u_lobe < pd {
            cosine_sample_hemisphere(u)
        } else {
            // Sample the Phong lobe in a frame aligned with the perfect
            // reflection of wo.
            let lobe_frame = Frame::from_z(&reflect_z(wo));
            lobe_frame.to_world(&sample_phong_lobe(u, self.phong_exponent))
        };

        Some(BxDFSample {
            wi,
            pdf: self.pdf(wo, &wi),
        })
    }

    /// Evaluates the combined density of sampling `wi` via `sample_f()`.
    ///
    /// * `wo` - Outgoing direction, local space.
    /// * `wi` - Incident direction, local space.
    pub fn pdf(&self, wo: &Vector3f, wi: &Vector3f) -> Float {
        let Some((pd, ps)) = self.lobe_probabilities() else {
            return 0.0;
        };

        let diffuse_pdf = cosine_hemisphere_pdf(wi.z);
        let glossy_pdf = phong_lobe_pdf(reflect_z(wo).dot(wi), self.phong_exponent);

        pd * diffuse_pdf + ps * glossy_pdf
    }

    /// Returns the lobe selection probabilities derived from the
    /// max-component albedo of each lobe, or `None` for a black material.
    fn lobe_probabilities(&self) -> Option<(Float, Float)> {
        let pd = self.diffuse_reflectance.max_component_value();
        let ps = self.phong_reflectance.max_component_value();
        let sum = pd + ps;
        if sum <= 0.0 {
            None
        } else {
            Some((pd / sum, ps / sum))
        }
    }
}

/// Reflects a local-space direction about the surface normal `(0, 0, 1)`.
///
/// * `v` - The direction to reflect.
#[inline]
fn reflect_z(v: &Vector3f) -> Vector3f {
    Vector3f::new(-v.x, -v.y, v.z)
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rng::RNG;

    fn sample_direction(mat: &Material, wo: &Vector3f, rng: &mut RNG) -> Option<BxDFSample> {
        let u = rng.uniform_vec2f();
        let u_lobe = rng.uniform_float();
        mat.sample_f(wo, &u, u_lobe)
    }

    #[test]
    fn diffuse_lobe_is_reciprocal() {
        let mat = Material::diffuse(Spectrum::from_rgb(0.6, 0.4, 0.2));
        let wi = Vector3f::new(0.3, -0.2, 0.9).normalize();
        let wo = Vector3f::new(-0.5, 0.1, 0.85).normalize();
        assert_eq!(mat.f(&wi, &wo), mat.f(&wo, &wi));
    }

    #[test]
    fn black_material_yields_no_sample() {
        let mat = Material::diffuse(Spectrum::ZERO);
        let mut rng = RNG::new(3);
        assert!(sample_direction(&mat, &Vector3f::new(0.0, 0.0, 1.0), &mut rng).is_none());
    }

    #[test]
    fn below_surface_pair_is_black() {
        let mat = Material::glossy(Spectrum::new(0.5), Spectrum::new(0.3), 20.0);
        let down_a = Vector3f::new(0.1, 0.2, -0.9).normalize();
        let down_b = Vector3f::new(-0.4, 0.0, -0.9).normalize();
        assert!(mat.f(&down_a, &down_b).is_black());
    }

    #[test]
    fn hemispherical_reflectance_is_bounded() {
        // Monte-Carlo integral of f·cosθ over the hemisphere must not exceed
        // the combined max-component albedo.
        let mat = Material::glossy(Spectrum::new(0.5), Spectrum::new(0.3), 90.0);
        let wo = Vector3f::new(0.25, 0.0, 0.97).normalize();
        let mut rng = RNG::new(11);

        let n = 200_000;
        let mut sum = 0.0;
        for _ in 0..n {
            let wi = cosine_sample_hemisphere(&rng.uniform_vec2f());
            // f · cosθ / (cosθ/π) = π · f
            sum += (mat.f(&wi, &wo) * PI).max_component_value();
        }
        let estimate = sum / n as Float;

        assert!(estimate <= 0.5 + 0.3 + 0.05, "estimate = {}", estimate);
    }

    #[test]
    fn sampler_and_pdf_agree() {
        // Histogram check: the fraction of sampled directions landing in a
        // spherical bin must match the pdf mass integrated over that bin.
        let mat = Material::glossy(Spectrum::new(0.4), Spectrum::new(0.4), 20.0);
        let wo = Vector3f::new(0.4, 0.1, 0.91).normalize();
        let mut rng = RNG::new(5);

        const NZ: usize = 8;
        const NPHI: usize = 8;
        let bin_of = |d: &Vector3f| {
            let iz = min((((d.z + 1.0) * 0.5) * NZ as Float) as usize, NZ - 1);
            let phi = d.y.atan2(d.x) + PI;
            let ip = min((phi * INV_TWO_PI * NPHI as Float) as usize, NPHI - 1);
            iz * NPHI + ip
        };

        let n = 1_000_000;
        let mut sampled = [0.0 as Float; NZ * NPHI];
        for _ in 0..n {
            if let Some(s) = sample_direction(&mat, &wo, &mut rng) {
                sampled[bin_of(&s.wi)] += 1.0 / n as Float;
            }
        }

        // Estimate each bin's pdf mass with uniform sphere samples.
        let mut mass = [0.0 as Float; NZ * NPHI];
        for _ in 0..n {
            let u = rng.uniform_vec2f();
            let z = 1.0 - 2.0 * u.x;
            let r = max(0.0, 1.0 - z * z).sqrt();
            let phi = TWO_PI * u.y;
            let d = Vector3f::new(phi.cos() * r, phi.sin() * r, z);
            mass[bin_of(&d)] += mat.pdf(&wo, &d) * FOUR_PI / n as Float;
        }

        for (bin, (&s, &m)) in sampled.iter().zip(mass.iter()).enumerate() {
            assert!(
                (s - m).abs() < 0.015 + 0.1 * m,
                "bin {}: sampled {} vs pdf mass {}",
                bin,
                s,
                m
            );
        }
    }
}
