// src/processing/clustering.rs
//! Threshold-based clustering of a distance curve into regions
//!
//! Blocks whose distance falls under the scaled threshold are accepted,
//! consecutive accepted blocks are merged into runs (smoothing over gaps up
//! to the connection width), runs become candidate regions, and candidates
//! must pass a fractional width filter. The kept set can optionally be
//! inverted into its complement.

use crate::audio::Region;
use crate::config::constants::CONNECTION_WIDTH_SCALE;
use crate::error::{AnalysisError, AnalysisResult};
use crate::processing::distance::DistanceCurve;

/// Parameters controlling how a distance curve is clustered into regions
#[derive(Debug, Clone)]
pub struct ClusterParameters {
    /// Fraction of the curve maximum below which a block is accepted, in [0, 1]
    pub threshold: f32,
    /// Fractional smoothing parameter; gaps up to `value * 50 + 1` blocks
    /// keep two accepted runs connected
    pub region_connection_width: f32,
    /// Lower fractional width bound; divided by 10 before the comparison
    pub min_region_width: f32,
    /// Upper fractional width bound (exclusive)
    pub max_region_width: f32,
    /// Replace the kept regions with their complement within [0, 1]
    pub invert: bool,
}

impl Default for ClusterParameters {
    fn default() -> Self {
        Self {
            threshold: 0.5,
            region_connection_width: 0.0,
            min_region_width: 0.0,
            max_region_width: 1.0,
            invert: false,
        }
    }
}

impl ClusterParameters {
    /// Smoothing gap in blocks derived from the fractional parameter
    pub fn connection_width_blocks(&self) -> f32 {
        self.region_connection_width * CONNECTION_WIDTH_SCALE + 1.0
    }
}

/// Cluster a distance curve into an ascending, non-overlapping region set
///
/// # Errors
///
/// - `AnalysisError::InvalidInput` if the curve is empty.
/// - `AnalysisError::NoAcceptedBlocks` if no block falls under the scaled
///   threshold; callers performing parameter search treat this as a
///   candidate to skip.
///
/// An empty result set is legal: accepted runs may all fail the width
/// filter.
pub fn cluster_regions(
    curve: &DistanceCurve,
    params: &ClusterParameters,
) -> AnalysisResult<Vec<Region>> {
    let num_blocks = curve.len();
    if num_blocks == 0 {
        return Err(AnalysisError::InvalidInput(
            "cannot cluster an empty distance curve".to_string(),
        ));
    }

    let accepted = accepted_blocks(curve, params.threshold);
    if accepted.is_empty() {
        return Err(AnalysisError::NoAcceptedBlocks);
    }

    let connection_width = params.connection_width_blocks();
    let mut kept = Vec::new();

    let mut run_start = accepted[0];
    let mut run_end = accepted[0];
    for &block in &accepted[1..] {
        if (block - run_end) as f32 <= connection_width {
            run_end = block;
        } else {
            push_if_within_width(&mut kept, run_start, run_end, num_blocks, params);
            run_start = block;
            run_end = block;
        }
    }
    push_if_within_width(&mut kept, run_start, run_end, num_blocks, params);

    if params.invert {
        kept = invert_regions(&kept);
    }

    Ok(kept)
}

/// Indices of blocks whose distance falls under `threshold * max`
pub(crate) fn accepted_blocks(curve: &DistanceCurve, threshold: f32) -> Vec<usize> {
    let cutoff = threshold * curve.max_distance();
    curve
        .values()
        .iter()
        .enumerate()
        .filter(|(_, &value)| value < cutoff)
        .map(|(index, _)| index)
        .collect()
}

/// Convert a run of accepted blocks into a region and keep it if its width
/// passes the filter
///
/// A single-block run spans its whole block so every emitted region has a
/// positive width; a multi-block run spans from its first to its last
/// accepted block index.
fn push_if_within_width(
    kept: &mut Vec<Region>,
    run_start: usize,
    run_end: usize,
    num_blocks: usize,
    params: &ClusterParameters,
) {
    let region = Region::from_blocks(run_start, run_end.max(run_start + 1), num_blocks);
    let width = region.width();
    if width > params.min_region_width / 10.0 && width < params.max_region_width {
        kept.push(region);
    }
}

/// Complement of a region set within `[0, 1]`
///
/// Gaps between consecutive regions, plus a leading gap when the first
/// region does not start at 0 and a trailing gap when the last does not end
/// at 1, returned in ascending order.
pub fn invert_regions(regions: &[Region]) -> Vec<Region> {
    let mut inverted = Vec::new();
    let mut cursor = 0.0f32;
    for region in regions {
        if region.start() > cursor {
            inverted.push(Region::new(cursor, region.start()).expect("complement within [0,1]"));
        }
        cursor = region.end();
    }
    if cursor < 1.0 {
        inverted.push(Region::new(cursor, 1.0).expect("complement within [0,1]"));
    }
    inverted
}
