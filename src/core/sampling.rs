//! Common sampling functions.

#![allow(dead_code)]

use crate::core::common::*;
use crate::core::geometry::{Vector2f, Vector3f};

/// Sample a direction on the hemisphere about `(0, 0, 1)` with a
/// cosine-weighted density.
///
/// * `u` - The random sample point.
pub fn cosine_sample_hemisphere(u: &Vector2f) -> Vector3f {
    let phi = TWO_PI * u.x;
    let r = (1.0 - u.y).sqrt();
    Vector3f::new(phi.cos() * r, phi.sin() * r, u.y.sqrt())
}

/// Returns the PDF for cosine-weighted hemisphere sampling.
///
/// * `cos_theta` - Cosine of the angle to the hemisphere axis.
#[inline]
pub fn cosine_hemisphere_pdf(cos_theta: Float) -> Float {
    max(0.0, cos_theta) * INV_PI
}

/// Uniformly sample a direction on the hemisphere about `(0, 0, 1)`.
///
/// * `u` - The random sample point.
pub fn uniform_sample_hemisphere(u: &Vector2f) -> Vector3f {
    let z = u.x;
    let r = max(0.0, 1.0 - z * z).sqrt();
    let phi = TWO_PI * u.y;
    Vector3f::new(phi.cos() * r, phi.sin() * r, z)
}

/// Returns the PDF for uniformly sampling a direction from a hemisphere.
#[inline]
pub fn uniform_hemisphere_pdf() -> Float {
    INV_TWO_PI
}

/// Sample a direction from a Phong lobe of the given exponent about
/// `(0, 0, 1)`, with density `(n+1)/(2π) · cosⁿθ`.
///
/// * `u`        - The random sample point.
/// * `exponent` - The Phong exponent.
pub fn sample_phong_lobe(u: &Vector2f, exponent: Float) -> Vector3f {
    let phi = TWO_PI * u.x;
    let cos_theta = u.y.powf(1.0 / (exponent + 1.0));
    let sin_theta = max(0.0, 1.0 - cos_theta * cos_theta).sqrt();
    Vector3f::new(phi.cos() * sin_theta, phi.sin() * sin_theta, cos_theta)
}

/// Returns the PDF for Phong lobe sampling.
///
/// * `cos_theta` - Cosine of the angle to the lobe axis.
/// * `exponent`  - The Phong exponent.
#[inline]
pub fn phong_lobe_pdf(cos_theta: Float, exponent: Float) -> Float {
    (exponent + 1.0) * INV_TWO_PI * max(0.0, cos_theta).powf(exponent)
}

/// Uniformly sample barycentric coordinates on a triangle by folding the
/// unit square along its diagonal.
///
/// * `u` - The random sample point.
pub fn uniform_sample_triangle(u: &Vector2f) -> Vector2f {
    if u.x + u.y >= 1.0 {
        Vector2f::new(1.0 - u.x, 1.0 - u.y)
    } else {
        *u
    }
}

/// Weight a sample drawn from `f_pdf` against a competing strategy with
/// density `g_pdf` using the balance heuristic. Both densities zero yields a
/// zero weight.
///
/// * `f_pdf` - First sampling distribution.
/// * `g_pdf` - Second sampling distribution.
#[inline]
pub fn balance_heuristic(f_pdf: Float, g_pdf: Float) -> Float {
    if f_pdf == 0.0 && g_pdf == 0.0 {
        0.0
    } else {
        f_pdf / (f_pdf + g_pdf)
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rng::RNG;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn triangle_samples_stay_in_lower_half(x in 0.0..1.0f32, y in 0.0..1.0f32) {
            let b = uniform_sample_triangle(&Vector2f::new(x, y));
            prop_assert!(b.x >= 0.0);
            prop_assert!(b.y >= 0.0);
            prop_assert!(b.x + b.y <= 1.0);
        }

        #[test]
        fn cosine_samples_are_unit_and_upper(x in 0.0..1.0f32, y in 0.0..1.0f32) {
            let d = cosine_sample_hemisphere(&Vector2f::new(x, y));
            prop_assert!(d.z >= 0.0);
            prop_assert!((d.length() - 1.0).abs() < 1e-4);
        }

        #[test]
        fn uniform_hemisphere_samples_are_unit_and_upper(x in 0.0..1.0f32, y in 0.0..1.0f32) {
            let d = uniform_sample_hemisphere(&Vector2f::new(x, y));
            prop_assert!(d.z >= 0.0);
            prop_assert!((d.length() - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn balance_heuristic_edge_cases() {
        assert_eq!(balance_heuristic(0.0, 0.0), 0.0);
        assert_eq!(balance_heuristic(1.0, 0.0), 1.0);
        assert_eq!(balance_heuristic(0.0, 1.0), 0.0);
        assert_eq!(balance_heuristic(2.0, 2.0), 0.5);
        assert_eq!(balance_heuristic(1.0, INFINITY), 0.0);
    }

    #[test]
    fn cosine_sampling_matches_its_pdf() {
        // The z-marginal of cosine-weighted sampling integrates to
        // P(z > c) = 1 - c².
        let mut rng = RNG::new(1);
        let n = 100_000;
        let cutoff = 0.5;
        let above = (0..n)
            .filter(|_| cosine_sample_hemisphere(&rng.uniform_vec2f()).z > cutoff)
            .count();
        let expected = 1.0 - cutoff * cutoff;
        assert!((above as Float / n as Float - expected).abs() < 0.01);
    }

    #[test]
    fn phong_lobe_concentrates_with_exponent() {
        let mut rng = RNG::new(2);
        let n = 10_000;
        let mean_cos = (0..n)
            .map(|_| sample_phong_lobe(&rng.uniform_vec2f(), 90.0).z)
            .sum::<Float>()
            / n as Float;
        // E[cosθ] = (n+1)/(n+2) for this density.
        assert!((mean_cos - 91.0 / 92.0).abs() < 0.01);
    }
}
