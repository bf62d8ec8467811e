// Integration tests for block-wise feature extraction

use audiosim_core::processing::features::{FeatureExtractor, FeatureSelection};
use audiosim_core::{AnalysisConfig, Region, SampleBuffer};
use std::f32::consts::PI;

fn sine_buffer(freq_hz: f32, sample_rate: u32, num_samples: usize) -> SampleBuffer {
    let samples: Vec<f32> = (0..num_samples)
        .map(|i| (2.0 * PI * freq_hz * i as f32 / sample_rate as f32).sin() * 0.5)
        .collect();
    SampleBuffer::from_mono(samples, sample_rate).unwrap()
}

fn config_with(block_size: usize, selection: FeatureSelection) -> AnalysisConfig {
    AnalysisConfig {
        block_size,
        features: selection,
        ..AnalysisConfig::default()
    }
}

#[test]
fn test_full_selection_matrix_shape() {
    let config = config_with(256, FeatureSelection::all());
    let extractor = FeatureExtractor::new(&config).unwrap();
    let buffer = sine_buffer(440.0, 44100, 256 * 8);

    let matrix = extractor
        .compute_feature_matrix(&buffer, &config.features, Region::full())
        .unwrap();

    // 4 scalar features plus 12 MFCC columns
    assert_eq!(matrix.shape(), &[8, 16]);
}

#[test]
fn test_region_restricts_rows() {
    let config = config_with(256, FeatureSelection::all());
    let extractor = FeatureExtractor::new(&config).unwrap();
    let buffer = sine_buffer(440.0, 44100, 256 * 8);

    let half = Region::new(0.0, 0.5).unwrap();
    let matrix = extractor
        .compute_feature_matrix(&buffer, &config.features, half)
        .unwrap();
    assert_eq!(matrix.nrows(), 4);
}

#[test]
fn test_spectral_centroid_orders_tones() {
    let selection = FeatureSelection {
        spectral_centroid: true,
        ..FeatureSelection::none()
    };
    let config = config_with(256, selection);
    let extractor = FeatureExtractor::new(&config).unwrap();

    let low = sine_buffer(200.0, 8000, 256 * 4);
    let high = sine_buffer(3000.0, 8000, 256 * 4);

    let m_low = extractor
        .compute_feature_matrix(&low, &selection, Region::full())
        .unwrap();
    let m_high = extractor
        .compute_feature_matrix(&high, &selection, Region::full())
        .unwrap();

    // processed rows only; the last row of each matrix stays zero
    assert!(m_low[[0, 0]] > 0.0);
    assert!(m_low[[0, 0]] < m_high[[0, 0]]);
}

#[test]
fn test_mfcc_distinguishes_tones() {
    let selection = FeatureSelection {
        mfcc: true,
        ..FeatureSelection::none()
    };
    let config = config_with(256, selection);
    let extractor = FeatureExtractor::new(&config).unwrap();

    let low = sine_buffer(300.0, 16000, 256 * 2);
    let high = sine_buffer(5000.0, 16000, 256 * 2);

    let m_low = extractor
        .compute_feature_matrix(&low, &selection, Region::full())
        .unwrap();
    let m_high = extractor
        .compute_feature_matrix(&high, &selection, Region::full())
        .unwrap();
    assert_eq!(m_low.ncols(), 12);

    let diff: f32 = (0..12)
        .map(|c| (m_low[[0, c]] - m_high[[0, c]]).abs())
        .sum();
    assert!(diff > 1e-3, "tones should map to distinct coefficients");
}

#[test]
fn test_zero_signal_features_are_finite() {
    let config = config_with(256, FeatureSelection::all());
    let extractor = FeatureExtractor::new(&config).unwrap();
    let buffer = SampleBuffer::from_mono(vec![0.0; 256 * 3], 44100).unwrap();

    let matrix = extractor
        .compute_feature_matrix(&buffer, &config.features, Region::full())
        .unwrap();
    assert!(matrix.iter().all(|v| v.is_finite()));
}
