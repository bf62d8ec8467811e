// src/processing/features/spectral.rs
//! Spectral features computed from a block's half spectrum

use rustfft::num_complex::Complex;

/// Spectral flux
///
/// Stub: always returns 0. The feature slot exists in the column layout and
/// the selection flags, but no flux definition has been wired in; keep it a
/// defined constant rather than an error so selections including it stay
/// harmless.
pub fn spectral_flux(_spectrum: &[Complex<f32>]) -> f32 {
    0.0
}

/// Spectral centroid as a power-weighted mean bin index
///
/// `sum(|X_k|^2 * k) / sum(|X_k|^2)` over the half spectrum. A zero-energy
/// spectrum would divide by zero; the centroid is defined as 0 in that case.
pub fn spectral_centroid(spectrum: &[Complex<f32>]) -> f32 {
    let mut weighted = 0.0f32;
    let mut total = 0.0f32;
    for (bin, value) in spectrum.iter().enumerate() {
        let power = value.norm_sqr();
        weighted += power * bin as f32;
        total += power;
    }

    if total > 0.0 {
        weighted / total
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flux_is_stubbed_to_zero() {
        let spectrum = vec![Complex::new(3.0, 4.0); 16];
        assert_eq!(spectral_flux(&spectrum), 0.0);
        assert_eq!(spectral_flux(&[]), 0.0);
    }

    #[test]
    fn test_centroid_of_single_bin() {
        let mut spectrum = vec![Complex::new(0.0, 0.0); 32];
        spectrum[7] = Complex::new(2.0, 0.0);
        assert!((spectral_centroid(&spectrum) - 7.0).abs() < 1e-6);
    }

    #[test]
    fn test_centroid_of_two_equal_bins_is_midpoint() {
        let mut spectrum = vec![Complex::new(0.0, 0.0); 32];
        spectrum[4] = Complex::new(1.0, 0.0);
        spectrum[10] = Complex::new(0.0, 1.0);
        assert!((spectral_centroid(&spectrum) - 7.0).abs() < 1e-6);
    }

    #[test]
    fn test_centroid_of_silence_is_zero() {
        let spectrum = vec![Complex::new(0.0, 0.0); 32];
        assert_eq!(spectral_centroid(&spectrum), 0.0);
        assert_eq!(spectral_centroid(&[]), 0.0);
    }
}
