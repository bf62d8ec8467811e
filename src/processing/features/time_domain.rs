// src/processing/features/time_domain.rs
//! Time domain features

/// Summed-energy magnitude of a block
///
/// Square root of the sum of squared samples across all channels. Note that
/// the sum is not divided by the sample count before the root, so despite
/// the RMS column name this is a signal energy magnitude; the exact formula
/// is kept for compatibility with thresholds tuned against it.
pub fn summed_energy_rms(block: &[Vec<f32>]) -> f32 {
    let total: f32 = block
        .iter()
        .flat_map(|channel| channel.iter())
        .map(|&sample| sample * sample)
        .sum();
    total.sqrt()
}

/// Zero-cross rate of a block
///
/// Counts sign changes between consecutive samples per channel, then
/// normalizes by twice the block length. A full positive-to-negative flip
/// contributes 2 to the raw count, a touch of exactly zero contributes 1.
pub fn zero_cross_rate(block: &[Vec<f32>]) -> f32 {
    let block_length = block.first().map_or(0, |channel| channel.len());
    if block_length < 2 {
        return 0.0;
    }

    let mut crossings = 0u32;
    for channel in block {
        for pair in channel.windows(2) {
            crossings += (signum(pair[1]) - signum(pair[0])).unsigned_abs();
        }
    }

    crossings as f32 / (2.0 * block_length as f32)
}

fn signum(value: f32) -> i32 {
    if value > 0.0 {
        1
    } else if value < 0.0 {
        -1
    } else {
        0
    }
}
