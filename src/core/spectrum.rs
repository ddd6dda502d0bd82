//! Spectrum

#![allow(dead_code)]

use crate::core::common::{clamp, Float};
use std::ops::{Add, AddAssign, Div, DivAssign, Index, Mul, MulAssign, Sub};

/// Number of color samples.
const N_SAMPLES: usize = 3;

/// Stores radiometric quantities as linear RGB coefficients.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct RGBSpectrum {
    /// The RGB coefficients.
    c: [Float; N_SAMPLES],
}

/// Default to using `RGBSpectrum` for rendering.
pub type Spectrum = RGBSpectrum;

impl RGBSpectrum {
    /// The zero spectrum.
    pub const ZERO: Self = Self { c: [0.0; N_SAMPLES] };

    /// The unit spectrum.
    pub const ONE: Self = Self { c: [1.0; N_SAMPLES] };

    /// Creates a new spectrum with all coefficients set to a constant value.
    ///
    /// * `v` - The constant value.
    pub fn new(v: Float) -> Self {
        Self { c: [v; N_SAMPLES] }
    }

    /// Creates a new spectrum from RGB coefficients.
    ///
    /// * `r` - Red.
    /// * `g` - Green.
    /// * `b` - Blue.
    pub fn from_rgb(r: Float, g: Float, b: Float) -> Self {
        Self { c: [r, g, b] }
    }

    /// Returns the red coefficient.
    pub fn r(&self) -> Float {
        self.c[0]
    }

    /// Returns the green coefficient.
    pub fn g(&self) -> Float {
        self.c[1]
    }

    /// Returns the blue coefficient.
    pub fn b(&self) -> Float {
        self.c[2]
    }

    /// Returns true if all coefficients are zero.
    pub fn is_black(&self) -> bool {
        self.c.iter().all(|&v| v == 0.0)
    }

    /// Returns true if any coefficient is NaN.
    pub fn has_nans(&self) -> bool {
        self.c.iter().any(|v| v.is_nan())
    }

    /// Returns the largest coefficient.
    pub fn max_component_value(&self) -> Float {
        self.c.iter().copied().fold(Float::NEG_INFINITY, Float::max)
    }

    /// Returns the luminance.
    pub fn y(&self) -> Float {
        0.212671 * self.c[0] + 0.715160 * self.c[1] + 0.072169 * self.c[2]
    }

    /// Returns a spectrum with every coefficient clamped to the given bounds.
    ///
    /// * `low`  - Lower bound.
    /// * `high` - Upper bound.
    pub fn clamp(&self, low: Float, high: Float) -> Self {
        Self {
            c: [
                clamp(self.c[0], low, high),
                clamp(self.c[1], low, high),
                clamp(self.c[2], low, high),
            ],
        }
    }
}

impl Add for RGBSpectrum {
    type Output = Self;

    /// Adds the coefficients of the given spectrum.
    ///
    /// * `other` - The spectrum to add.
    fn add(self, other: Self) -> Self {
        Self {
            c: [
                self.c[0] + other.c[0],
                self.c[1] + other.c[1],
                self.c[2] + other.c[2],
            ],
        }
    }
}

impl AddAssign for RGBSpectrum {
    /// Performs the `+=` operation.
    ///
    /// * `other` - The spectrum to add.
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sub for RGBSpectrum {
    type Output = Self;

    /// Subtracts the coefficients of the given spectrum.
    ///
    /// * `other` - The spectrum to subtract.
    fn sub(self, other: Self) -> Self {
        Self {
            c: [
                self.c[0] - other.c[0],
                self.c[1] - other.c[1],
                self.c[2] - other.c[2],
            ],
        }
    }
}

impl Mul for RGBSpectrum {
    type Output = Self;

    /// Multiplies the spectra coefficient-wise.
    ///
    /// * `other` - The spectrum to multiply by.
    fn mul(self, other: Self) -> Self {
        Self {
            c: [
                self.c[0] * other.c[0],
                self.c[1] * other.c[1],
                self.c[2] * other.c[2],
            ],
        }
    }
}

impl MulAssign for RGBSpectrum {
    /// Performs the `*=` operation.
    ///
    /// * `other` - The spectrum to multiply by.
    fn mul_assign(&mut self, other: Self) {
        *self = *self * other;
    }
}

impl Mul<Float> for RGBSpectrum {
    type Output = Self;

    /// Scales the coefficients.
    ///
    /// * `f` - The scaling factor.
    fn mul(self, f: Float) -> Self {
        Self {
            c: [self.c[0] * f, self.c[1] * f, self.c[2] * f],
        }
    }
}

impl Mul<RGBSpectrum> for Float {
    type Output = RGBSpectrum;

    /// Scales the coefficients.
    ///
    /// * `s` - The spectrum to scale.
    fn mul(self, s: RGBSpectrum) -> RGBSpectrum {
        s * self
    }
}

impl MulAssign<Float> for RGBSpectrum {
    /// Performs the `*=` operation with a scalar.
    ///
    /// * `f` - The scaling factor.
    fn mul_assign(&mut self, f: Float) {
        *self = *self * f;
    }
}

impl Div<Float> for RGBSpectrum {
    type Output = Self;

    /// Scales the coefficients by `1 / f`.
    ///
    /// * `f` - The scaling factor.
    fn div(self, f: Float) -> Self {
        debug_assert!(f != 0.0);
        Self {
            c: [self.c[0] / f, self.c[1] / f, self.c[2] / f],
        }
    }
}

impl DivAssign<Float> for RGBSpectrum {
    /// Performs the `/=` operation with a scalar.
    ///
    /// * `f` - The scaling factor.
    fn div_assign(&mut self, f: Float) {
        *self = *self / f;
    }
}

impl Index<usize> for RGBSpectrum {
    type Output = Float;

    /// Returns the coefficient at the given index.
    ///
    /// * `i` - Coefficient index.
    fn index(&self, i: usize) -> &Self::Output {
        &self.c[i]
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn black_detection() {
        assert!(Spectrum::ZERO.is_black());
        assert!(!Spectrum::from_rgb(0.0, 1e-6, 0.0).is_black());
    }

    #[test]
    fn arithmetic() {
        let a = Spectrum::from_rgb(0.25, 0.5, 1.0);
        let b = Spectrum::new(2.0);
        assert_eq!(a * b, Spectrum::from_rgb(0.5, 1.0, 2.0));
        assert_eq!(a + a, a * 2.0);
        assert_eq!(2.0 * a, a * 2.0);
        assert_eq!((a * 2.0) / 2.0, a);
    }

    #[test]
    fn max_component() {
        assert_eq!(Spectrum::from_rgb(0.2, 0.9, 0.4).max_component_value(), 0.9);
    }

    #[test]
    fn luminance_of_white_is_one() {
        assert!((Spectrum::ONE.y() - 1.0).abs() < 1e-4);
    }
}
