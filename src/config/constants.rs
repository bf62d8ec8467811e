// src/config/constants.rs
//! Pipeline-wide numeric constants

/// Block size in samples, also used as FFT size
pub const DEFAULT_BLOCK_SIZE: usize = 8192;

/// Number of MFCC coefficients, equal to the number of mel filter banks
pub const MFCC_NUM_COEFFICIENTS: usize = 12;

/// Lower edge of the mel filterbank in Hz
pub const MEL_FILTER_MIN_HZ: f32 = 200.0;

/// Upper edge of the mel filterbank in Hz, clamped to Nyquist at build time
pub const MEL_FILTER_MAX_HZ: f32 = 8000.0;

/// Number of threshold increments swept by grid search
pub const SEARCH_GRID_SIZE: usize = 100;

/// Non-improving iterations tolerated by the halving search before it
/// returns its best effort
pub const SEARCH_STALL_LIMIT: usize = 100;

/// Cost weight on the squared region-count deviation
pub const COST_WEIGHT_REGION_COUNT: f32 = 1.0;

/// Cost weight on the squared coverage deviation
pub const COST_WEIGHT_COVERAGE: f32 = 2.0;

/// Scale applied to the connection-width parameter; a fractional parameter
/// maps to a gap of up to `p * 50 + 1` blocks
pub const CONNECTION_WIDTH_SCALE: f32 = 50.0;
