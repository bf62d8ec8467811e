// src/audio/region.rs
//! Fractional timeline regions

use crate::error::{AnalysisError, AnalysisResult};

/// A span of the overall timeline described by two fractional endpoints
///
/// Both endpoints lie in `[0, 1]` with `start <= end`. A region is resolved
/// to absolute block or sample indices only against a concrete total count,
/// so the same region can address a file at block granularity during
/// analysis and at sample granularity during export.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region {
    start: f32,
    end: f32,
}

impl Region {
    /// Create a region from fractional endpoints
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::InvalidInput` if the endpoints leave `[0, 1]`
    /// or `start > end`.
    pub fn new(start: f32, end: f32) -> AnalysisResult<Self> {
        if !(0.0..=1.0).contains(&start) || !(0.0..=1.0).contains(&end) {
            return Err(AnalysisError::InvalidInput(format!(
                "region endpoints must lie in [0, 1], got [{}, {}]",
                start, end
            )));
        }
        if start > end {
            return Err(AnalysisError::InvalidInput(format!(
                "region start {} exceeds end {}",
                start, end
            )));
        }
        Ok(Self { start, end })
    }

    /// The full timeline `[0, 1]`
    pub fn full() -> Self {
        Self {
            start: 0.0,
            end: 1.0,
        }
    }

    /// Region covering blocks `[start_block, end_block]` out of `total_blocks`
    pub(crate) fn from_blocks(start_block: usize, end_block: usize, total_blocks: usize) -> Self {
        debug_assert!(total_blocks > 0);
        debug_assert!(start_block <= end_block);
        let n = total_blocks as f32;
        Self {
            start: (start_block as f32 / n).min(1.0),
            end: (end_block as f32 / n).min(1.0),
        }
    }

    /// Fractional start
    pub fn start(&self) -> f32 {
        self.start
    }

    /// Fractional end
    pub fn end(&self) -> f32 {
        self.end
    }

    /// Fractional width of the region
    pub fn width(&self) -> f32 {
        self.end - self.start
    }

    /// Resolve to a block index pair, flooring each scaled endpoint
    pub fn to_block_range(&self, total_blocks: usize) -> (usize, usize) {
        let start = (self.start * total_blocks as f32).floor() as usize;
        let end = (self.end * total_blocks as f32).floor() as usize;
        (start, end)
    }

    /// Resolve to a sample index pair, flooring each scaled endpoint
    pub fn to_sample_range(&self, total_samples: usize) -> (usize, usize) {
        let start = (self.start * total_samples as f32).floor() as usize;
        let end = (self.end * total_samples as f32).floor() as usize;
        (start, end)
    }
}
