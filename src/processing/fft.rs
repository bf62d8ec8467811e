// src/processing/fft.rs
//! Forward FFT with a cached plan
//!
//! Blocks are transformed raw, without a window function; the block-wise
//! features downstream compare like against like, so leakage cancels out of
//! the distance metric.

use rustfft::{num_complex::Complex, Fft, FftPlanner};
use std::sync::Arc;

/// FFT processor producing half spectra of fixed-size blocks
pub struct FftProcessor {
    fft: Arc<dyn Fft<f32>>,
    block_size: usize,
}

impl FftProcessor {
    /// Plan a forward FFT of `block_size` points
    pub fn new(block_size: usize) -> Self {
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(block_size);
        Self { fft, block_size }
    }

    /// FFT size in points
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Number of bins in the half spectrum
    pub fn num_bins(&self) -> usize {
        self.block_size / 2 + 1
    }

    /// Transform a block and return the positive-frequency half spectrum
    ///
    /// Input shorter than the block size is zero-padded.
    pub fn half_spectrum(&self, block: &[f32]) -> Vec<Complex<f32>> {
        let mut buffer: Vec<Complex<f32>> = block
            .iter()
            .take(self.block_size)
            .map(|&s| Complex::new(s, 0.0))
            .collect();
        buffer.resize(self.block_size, Complex::new(0.0, 0.0));

        self.fft.process(&mut buffer);

        buffer.truncate(self.num_bins());
        buffer
    }
}
