// src/audio/buffer.rs
//! Multi-channel sample buffer

use crate::error::{AnalysisError, AnalysisResult};

/// Fully materialized multi-channel audio buffer
///
/// All channels hold the same number of f32 samples, nominally normalized to
/// [-1.0, 1.0]. The buffer carries its own sample rate so downstream
/// consumers (mel filterbank construction, export) never have to assume one.
#[derive(Debug, Clone)]
pub struct SampleBuffer {
    channels: Vec<Vec<f32>>,
    sample_rate: u32,
}

impl SampleBuffer {
    /// Create a buffer from per-channel sample vectors
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::InvalidInput` if there are no channels, any
    /// channel is empty, channel lengths differ, or the sample rate is zero.
    pub fn new(channels: Vec<Vec<f32>>, sample_rate: u32) -> AnalysisResult<Self> {
        if channels.is_empty() {
            return Err(AnalysisError::InvalidInput(
                "buffer must have at least one channel".to_string(),
            ));
        }
        if sample_rate == 0 {
            return Err(AnalysisError::InvalidInput(
                "sample rate must be non-zero".to_string(),
            ));
        }
        let len = channels[0].len();
        if len == 0 {
            return Err(AnalysisError::InvalidInput(
                "channels must contain samples".to_string(),
            ));
        }
        if channels.iter().any(|ch| ch.len() != len) {
            return Err(AnalysisError::InvalidInput(format!(
                "all channels must have the same length (expected {})",
                len
            )));
        }
        Ok(Self {
            channels,
            sample_rate,
        })
    }

    /// Create a single-channel buffer
    pub fn from_mono(samples: Vec<f32>, sample_rate: u32) -> AnalysisResult<Self> {
        Self::new(vec![samples], sample_rate)
    }

    /// Number of channels
    pub fn num_channels(&self) -> usize {
        self.channels.len()
    }

    /// Number of samples per channel
    pub fn num_samples(&self) -> usize {
        self.channels[0].len()
    }

    /// Sample rate in Hz
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Samples of one channel
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn channel(&self, index: usize) -> &[f32] {
        &self.channels[index]
    }

    /// Total duration in seconds
    pub fn duration_seconds(&self) -> f32 {
        self.num_samples() as f32 / self.sample_rate as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_buffer() {
        let buffer = SampleBuffer::new(vec![vec![0.0; 100], vec![0.0; 100]], 44100).unwrap();
        assert_eq!(buffer.num_channels(), 2);
        assert_eq!(buffer.num_samples(), 100);
        assert_eq!(buffer.sample_rate(), 44100);
    }

    #[test]
    fn test_mismatched_channel_lengths_rejected() {
        let result = SampleBuffer::new(vec![vec![0.0; 100], vec![0.0; 99]], 44100);
        assert!(matches!(result, Err(AnalysisError::InvalidInput(_))));
    }

    #[test]
    fn test_empty_buffer_rejected() {
        assert!(SampleBuffer::new(vec![], 44100).is_err());
        assert!(SampleBuffer::new(vec![vec![]], 44100).is_err());
        assert!(SampleBuffer::from_mono(vec![0.0; 10], 0).is_err());
    }

    #[test]
    fn test_duration() {
        let buffer = SampleBuffer::from_mono(vec![0.0; 22050], 44100).unwrap();
        assert!((buffer.duration_seconds() - 0.5).abs() < 1e-6);
    }
}
