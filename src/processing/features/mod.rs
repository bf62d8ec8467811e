// src/processing/features/mod.rs
//! Block-wise feature extraction
//!
//! The analyzed portion of a buffer is partitioned into fixed-size blocks
//! and every processed block contributes one row to a feature matrix. The
//! column layout is derived once per selection and stays stable for the
//! whole analysis pass: RMS, zero-cross rate, spectral flux, spectral
//! centroid, then twelve MFCC columns, with columns present only for
//! selected features and packed contiguously in that order.

pub mod mfcc;
pub mod spectral;
pub mod time_domain;

use crate::audio::{Region, SampleBuffer};
use crate::config::constants::MFCC_NUM_COEFFICIENTS;
use crate::config::AnalysisConfig;
use crate::error::AnalysisResult;
use crate::processing::fft::FftProcessor;
use mfcc::MelFilterbank;
use ndarray::Array2;
use rayon::prelude::*;
use rustfft::num_complex::Complex;
use serde::{Deserialize, Serialize};

/// Feature kinds in their fixed column order
pub const FEATURE_ORDER: [FeatureKind; 5] = [
    FeatureKind::Rms,
    FeatureKind::ZeroCrossRate,
    FeatureKind::SpectralFlux,
    FeatureKind::SpectralCentroid,
    FeatureKind::Mfcc,
];

/// A kind of block-wise acoustic feature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeatureKind {
    /// Summed-energy magnitude over all channels of a block
    Rms,
    /// Sign-change rate over all channels of a block
    ZeroCrossRate,
    /// Spectral flux; currently a stub that always yields 0
    SpectralFlux,
    /// Power-weighted mean bin index of the half spectrum
    SpectralCentroid,
    /// Twelve mel-frequency cepstral coefficients
    Mfcc,
}

impl FeatureKind {
    /// Number of matrix columns this feature occupies
    pub fn column_count(self) -> usize {
        match self {
            FeatureKind::Mfcc => MFCC_NUM_COEFFICIENTS,
            _ => 1,
        }
    }

    /// Whether computing this feature requires the block's spectrum
    pub fn needs_fft(self) -> bool {
        matches!(
            self,
            FeatureKind::SpectralFlux | FeatureKind::SpectralCentroid | FeatureKind::Mfcc
        )
    }
}

/// Which features populate the feature matrix
///
/// Immutable for the duration of one analysis pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureSelection {
    /// Summed-energy RMS
    pub rms: bool,
    /// Zero-cross rate
    pub zero_cross_rate: bool,
    /// Spectral flux (stub)
    pub spectral_flux: bool,
    /// Spectral centroid
    pub spectral_centroid: bool,
    /// MFCC, twelve coefficients
    pub mfcc: bool,
}

impl FeatureSelection {
    /// Every feature enabled
    pub fn all() -> Self {
        Self {
            rms: true,
            zero_cross_rate: true,
            spectral_flux: true,
            spectral_centroid: true,
            mfcc: true,
        }
    }

    /// No feature enabled
    pub fn none() -> Self {
        Self {
            rms: false,
            zero_cross_rate: false,
            spectral_flux: false,
            spectral_centroid: false,
            mfcc: false,
        }
    }

    /// Whether a kind is selected
    pub fn is_selected(&self, kind: FeatureKind) -> bool {
        match kind {
            FeatureKind::Rms => self.rms,
            FeatureKind::ZeroCrossRate => self.zero_cross_rate,
            FeatureKind::SpectralFlux => self.spectral_flux,
            FeatureKind::SpectralCentroid => self.spectral_centroid,
            FeatureKind::Mfcc => self.mfcc,
        }
    }

    /// Selected kinds in fixed column order
    pub fn active_kinds(&self) -> impl Iterator<Item = FeatureKind> + '_ {
        FEATURE_ORDER
            .iter()
            .copied()
            .filter(move |&kind| self.is_selected(kind))
    }

    /// Total selected-feature column count; MFCC counts as twelve
    pub fn num_columns(&self) -> usize {
        self.active_kinds().map(FeatureKind::column_count).sum()
    }

    /// Whether any selected feature requires a frequency-domain transform
    pub fn needs_fft(&self) -> bool {
        self.active_kinds().any(FeatureKind::needs_fft)
    }

    /// Whether no feature is selected
    pub fn is_empty(&self) -> bool {
        self.active_kinds().next().is_none()
    }
}

/// Column offsets of the active features, derived once per selection
#[derive(Debug, Clone)]
pub struct ColumnLayout {
    entries: Vec<(FeatureKind, usize)>,
    num_columns: usize,
}

impl ColumnLayout {
    /// Build the layout table for a selection
    pub fn new(selection: &FeatureSelection) -> Self {
        let mut entries = Vec::new();
        let mut offset = 0;
        for kind in selection.active_kinds() {
            entries.push((kind, offset));
            offset += kind.column_count();
        }
        Self {
            entries,
            num_columns: offset,
        }
    }

    /// First column of a feature, if it is active
    pub fn offset_of(&self, kind: FeatureKind) -> Option<usize> {
        self.entries
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|&(_, offset)| offset)
    }

    /// Active features with their column offsets, in order
    pub fn entries(&self) -> &[(FeatureKind, usize)] {
        &self.entries
    }

    /// Total column count
    pub fn num_columns(&self) -> usize {
        self.num_columns
    }
}

/// Turns a sample buffer, region and feature selection into a block-by-column
/// feature matrix
pub struct FeatureExtractor {
    block_size: usize,
    mel_min_hz: f32,
    mel_max_hz: f32,
    fft: FftProcessor,
}

impl FeatureExtractor {
    /// Create an extractor from validated configuration
    pub fn new(config: &AnalysisConfig) -> AnalysisResult<Self> {
        config.validate()?;
        Ok(Self {
            block_size: config.block_size,
            mel_min_hz: config.mel.min_freq_hz,
            mel_max_hz: config.mel.max_freq_hz,
            fft: FftProcessor::new(config.block_size),
        })
    }

    /// Block size in samples
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Total number of blocks covering a sample count, counting a trailing
    /// partial block as one
    pub fn num_total_blocks(&self, num_samples: usize) -> usize {
        num_samples.div_ceil(self.block_size)
    }

    /// Compute the feature matrix for a region of a buffer
    ///
    /// The matrix has one row per block the region resolves to and one
    /// column per selected feature column. The extraction loop walks blocks
    /// `[start, end-1)`: the final resolved block is never processed and its
    /// row stays zero. That half-open range is inherited behavior that
    /// existing thresholds depend on, so it is kept and pinned by tests.
    ///
    /// An empty selection short-circuits to a 0x0 matrix.
    pub fn compute_feature_matrix(
        &self,
        buffer: &SampleBuffer,
        selection: &FeatureSelection,
        region: Region,
    ) -> AnalysisResult<Array2<f32>> {
        if selection.is_empty() {
            return Ok(Array2::zeros((0, 0)));
        }

        let total_blocks = self.num_total_blocks(buffer.num_samples());
        let (start_block, end_block) = region.to_block_range(total_blocks);
        let num_rows = end_block.saturating_sub(start_block);
        let layout = ColumnLayout::new(selection);

        tracing::debug!(
            total_blocks,
            start_block,
            end_block,
            columns = layout.num_columns(),
            "computing feature matrix"
        );

        let mut matrix = Array2::zeros((num_rows, layout.num_columns()));
        let num_processed = num_rows.saturating_sub(1);

        let mel = if selection.mfcc {
            Some(MelFilterbank::new(
                buffer.sample_rate(),
                self.block_size,
                self.mel_min_hz,
                self.mel_max_hz,
            ))
        } else {
            None
        };

        // Blocks are independent; rows are filled in parallel.
        let rows: Vec<Vec<f32>> = (0..num_processed)
            .into_par_iter()
            .map(|row| {
                self.compute_row(buffer, &layout, mel.as_ref(), start_block + row)
            })
            .collect();

        for (row_idx, row) in rows.into_iter().enumerate() {
            for (col_idx, value) in row.into_iter().enumerate() {
                matrix[[row_idx, col_idx]] = value;
            }
        }

        Ok(matrix)
    }

    fn compute_row(
        &self,
        buffer: &SampleBuffer,
        layout: &ColumnLayout,
        mel: Option<&MelFilterbank>,
        block_index: usize,
    ) -> Vec<f32> {
        let block = self.gather_block(buffer, block_index);

        // One transform per block, shared by every spectral feature. Only
        // the first channel feeds the FFT; time-domain features sum over
        // all channels.
        let needs_fft = layout
            .entries()
            .iter()
            .any(|(kind, _)| kind.needs_fft());
        let spectrum: Option<Vec<Complex<f32>>> =
            needs_fft.then(|| self.fft.half_spectrum(&block[0]));

        let mut row = vec![0.0; layout.num_columns()];
        for &(kind, offset) in layout.entries() {
            match kind {
                FeatureKind::Rms => {
                    row[offset] = time_domain::summed_energy_rms(&block);
                }
                FeatureKind::ZeroCrossRate => {
                    row[offset] = time_domain::zero_cross_rate(&block);
                }
                FeatureKind::SpectralFlux => {
                    row[offset] = spectral::spectral_flux(spectrum.as_deref().unwrap_or(&[]));
                }
                FeatureKind::SpectralCentroid => {
                    row[offset] =
                        spectral::spectral_centroid(spectrum.as_deref().unwrap_or(&[]));
                }
                FeatureKind::Mfcc => {
                    if let (Some(mel), Some(spectrum)) = (mel, spectrum.as_deref()) {
                        let coefficients = mel.mfcc_from_spectrum(spectrum);
                        row[offset..offset + coefficients.len()]
                            .copy_from_slice(&coefficients);
                    }
                }
            }
        }
        row
    }

    /// Copy a block's samples into per-channel scratch buffers of block
    /// size, zero-padding a trailing partial block
    fn gather_block(&self, buffer: &SampleBuffer, block_index: usize) -> Vec<Vec<f32>> {
        let block_start = block_index * self.block_size;
        let available = buffer.num_samples().saturating_sub(block_start);
        let to_copy = available.min(self.block_size);

        (0..buffer.num_channels())
            .map(|ch| {
                let mut scratch = vec![0.0f32; self.block_size];
                scratch[..to_copy]
                    .copy_from_slice(&buffer.channel(ch)[block_start..block_start + to_copy]);
                scratch
            })
            .collect()
    }
}
