// src/processing/features/mfcc.rs
//! Mel-frequency cepstral coefficients
//!
//! Twelve triangular filter banks are laid out linearly on the mel scale
//! between the configured frequency edges, applied to the block's power
//! spectrum estimate, log-compressed and decorrelated with a DCT-II.
//!
//! Mel conversion: `mel = 1125 * ln(1 + f/700)`.

use crate::config::constants::MFCC_NUM_COEFFICIENTS;
use rustfft::num_complex::Complex;
use std::f32::consts::PI;

/// Mel-scale triangular filterbank bound to one sample rate and block size
pub struct MelFilterbank {
    block_size: usize,
    /// `num_banks + 2` FFT bin boundaries; bank `i` spans
    /// `bins[i]..bins[i+2]` with its peak at `bins[i+1]`
    bin_boundaries: Vec<usize>,
    /// Center frequency of each bank in Hz, kept for diagnostics and tests
    center_frequencies_hz: Vec<f32>,
}

fn hz_to_mel(hz: f32) -> f32 {
    1125.0 * (1.0 + hz / 700.0).ln()
}

fn mel_to_hz(mel: f32) -> f32 {
    700.0 * ((mel / 1125.0).exp() - 1.0)
}

impl MelFilterbank {
    /// Build the filterbank for a sample rate and FFT size
    ///
    /// The upper edge is clamped to Nyquist so a low sample rate never
    /// produces banks past the representable spectrum.
    pub fn new(sample_rate: u32, block_size: usize, min_freq_hz: f32, max_freq_hz: f32) -> Self {
        let num_banks = MFCC_NUM_COEFFICIENTS;
        let nyquist = sample_rate as f32 / 2.0;
        let max_freq_hz = max_freq_hz.min(nyquist).max(min_freq_hz);

        let mel_min = hz_to_mel(min_freq_hz);
        let mel_max = hz_to_mel(max_freq_hz);

        // num_banks + 2 boundary points, evenly spaced on the mel scale
        let num_points = num_banks + 2;
        let freq_points: Vec<f32> = (0..num_points)
            .map(|i| {
                let t = i as f32 / (num_points - 1) as f32;
                mel_to_hz(mel_min + t * (mel_max - mel_min))
            })
            .collect();

        let num_bins = block_size / 2 + 1;
        let bin_boundaries: Vec<usize> = freq_points
            .iter()
            .map(|&hz| {
                let bin = (hz * block_size as f32 / sample_rate as f32).floor() as usize;
                bin.min(num_bins - 1)
            })
            .collect();

        let center_frequencies_hz = freq_points[1..=num_banks].to_vec();

        Self {
            block_size,
            bin_boundaries,
            center_frequencies_hz,
        }
    }

    /// Number of banks (and output coefficients)
    pub fn num_banks(&self) -> usize {
        MFCC_NUM_COEFFICIENTS
    }

    /// Center frequency of one bank in Hz
    ///
    /// # Panics
    ///
    /// Panics if `bank` is out of range.
    pub fn bank_center_hz(&self, bank: usize) -> f32 {
        self.center_frequencies_hz[bank]
    }

    /// Triangular-weighted power of every bank, before log compression
    ///
    /// Mainly useful for diagnostics: a pure tone centered in one bank
    /// should dominate exactly that bank.
    pub fn bank_energies(&self, spectrum: &[Complex<f32>]) -> Vec<f32> {
        // power spectrum estimate |X|^2 / N
        let periodogram: Vec<f32> = spectrum
            .iter()
            .map(|value| value.norm_sqr() / self.block_size as f32)
            .collect();

        (0..self.num_banks())
            .map(|bank| {
                let start = self.bin_boundaries[bank];
                let end = self.bin_boundaries[bank + 2];
                if end <= start {
                    return 0.0;
                }
                let width = (end - start) as f32;
                let half = width / 2.0;

                let mut energy = 0.0f32;
                for (j, bin) in (start..end).enumerate() {
                    let j = j as f32;
                    let weight = if j < half {
                        j / half
                    } else {
                        (width - j) / half
                    };
                    energy += weight * periodogram.get(bin).copied().unwrap_or(0.0);
                }
                energy
            })
            .collect()
    }

    /// Compute the twelve cepstral coefficients for a half spectrum
    ///
    /// Zero-energy banks are clamped before the log so silent blocks yield
    /// finite coefficients instead of negative infinity.
    pub fn mfcc_from_spectrum(&self, spectrum: &[Complex<f32>]) -> Vec<f32> {
        let log_energies: Vec<f32> = self
            .bank_energies(spectrum)
            .into_iter()
            .map(|energy| energy.max(1e-12).ln())
            .collect();
        dct_ii(&log_energies)
    }
}

/// DCT-II of the log energies
fn dct_ii(values: &[f32]) -> Vec<f32> {
    let n = values.len() as f32;
    (0..values.len())
        .map(|i| {
            values
                .iter()
                .enumerate()
                .map(|(j, &v)| v * (PI * (j as f32 + 0.5) * i as f32 / n).cos())
                .sum()
        })
        .collect()
}
