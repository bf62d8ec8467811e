// src/processing/search.rs
//! Automatic threshold search
//!
//! Two interchangeable strategies tune the clustering threshold toward a
//! desired region count and coverage, sharing one cost function. Grid search
//! is the reference strategy. The halving search is a bisection on region
//! count; the behavior it replaces did not consistently shrink its boundary
//! toward the better half and converged unreliably, so it was rebuilt as a
//! true bisection with the same non-improving-iteration budget.
//!
//! Both strategies only ever optimize the threshold; the connection width
//! stays pinned at 0.

use crate::audio::Region;
use crate::config::constants::{
    COST_WEIGHT_COVERAGE, COST_WEIGHT_REGION_COUNT, SEARCH_GRID_SIZE, SEARCH_STALL_LIMIT,
};
use crate::error::{AnalysisError, AnalysisResult};
use crate::processing::clustering::{cluster_regions, ClusterParameters};
use crate::processing::distance::DistanceCurve;

/// Target the search steers toward
#[derive(Debug, Clone)]
pub struct SearchParameters {
    /// Desired number of regions
    pub num_regions: usize,
    /// Desired total fractional coverage of the timeline, in [0, 1]
    pub coverage: f32,
    /// Optional width filter as `(min_region_width, max_region_width)`,
    /// forwarded to the clusterer when present
    pub width_filter: Option<(f32, f32)>,
}

/// Best parameter set a search strategy found
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// Clustering parameters of the best candidate
    pub params: ClusterParameters,
    /// Regions the best candidate produced
    pub regions: Vec<Region>,
    /// Cost of the best candidate
    pub cost: f32,
    /// Whether the desired region count was matched exactly; a false value
    /// means the result is best effort, not a failure
    pub converged: bool,
}

/// Scalar cost of a candidate region set against the search target
///
/// Squared deviation in region count plus squared deviation (offset by one)
/// in coverage, weighted 1:2. Lower is better.
pub fn region_cost(regions: &[Region], search: &SearchParameters) -> f32 {
    let count_delta = search.num_regions as f32 - regions.len() as f32;
    let coverage: f32 = regions.iter().map(Region::width).sum();
    let coverage_delta = (search.coverage - coverage).abs() + 1.0;

    COST_WEIGHT_REGION_COUNT * count_delta * count_delta
        + COST_WEIGHT_COVERAGE * coverage_delta * coverage_delta
}

fn candidate_params(threshold: f32, search: &SearchParameters) -> ClusterParameters {
    let mut params = ClusterParameters {
        threshold,
        region_connection_width: 0.0,
        ..ClusterParameters::default()
    };
    if let Some((min_width, max_width)) = search.width_filter {
        params.min_region_width = min_width;
        params.max_region_width = max_width;
    }
    params
}

/// Sweep the threshold over a fixed grid and keep the cheapest candidate
///
/// Thresholds `i / 100` for `i` in `0..100`; ties keep the earliest
/// candidate. Thresholds that accept no block at all are skipped.
///
/// # Errors
///
/// Returns `AnalysisError::NoAcceptedBlocks` if every grid point fails to
/// accept any block (for example a constant distance curve).
pub fn grid_search(
    curve: &DistanceCurve,
    search: &SearchParameters,
) -> AnalysisResult<SearchOutcome> {
    let mut best: Option<SearchOutcome> = None;

    for step in 0..SEARCH_GRID_SIZE {
        let threshold = step as f32 / SEARCH_GRID_SIZE as f32;
        let params = candidate_params(threshold, search);

        let regions = match cluster_regions(curve, &params) {
            Ok(regions) => regions,
            Err(AnalysisError::NoAcceptedBlocks) => continue,
            Err(err) => return Err(err),
        };

        let cost = region_cost(&regions, search);
        if best.as_ref().map_or(true, |b| cost < b.cost) {
            let converged = regions.len() == search.num_regions;
            best = Some(SearchOutcome {
                params,
                regions,
                cost,
                converged,
            });
        }
    }

    let outcome = best.ok_or(AnalysisError::NoAcceptedBlocks)?;
    tracing::debug!(
        threshold = outcome.params.threshold,
        cost = outcome.cost,
        regions = outcome.regions.len(),
        converged = outcome.converged,
        "grid search finished"
    );
    Ok(outcome)
}

/// Bisect the threshold boundary on region count
///
/// Starts from `[0, 1]` and halves toward the desired region count: a
/// candidate producing too many regions moves the right boundary down,
/// too few moves the left boundary up. Terminates on an exact count match
/// or after 100 iterations without cost improvement, returning the best
/// candidate seen either way.
///
/// # Errors
///
/// Returns `AnalysisError::NoAcceptedBlocks` if no tested threshold ever
/// accepted a block.
pub fn halving_search(
    curve: &DistanceCurve,
    search: &SearchParameters,
) -> AnalysisResult<SearchOutcome> {
    let mut left = 0.0f32;
    let mut right = 1.0f32;
    let mut stalls = 0usize;
    let mut best: Option<SearchOutcome> = None;

    while stalls <= SEARCH_STALL_LIMIT {
        let threshold = (left + right) / 2.0;
        let params = candidate_params(threshold, search);

        match cluster_regions(curve, &params) {
            Ok(regions) => {
                let cost = region_cost(&regions, search);
                let count = regions.len();
                let improved = best.as_ref().map_or(true, |b| cost < b.cost);
                if improved {
                    best = Some(SearchOutcome {
                        params,
                        regions,
                        cost,
                        converged: count == search.num_regions,
                    });
                    stalls = 0;
                } else {
                    stalls += 1;
                }

                if count == search.num_regions {
                    break;
                }
                if count > search.num_regions {
                    right = threshold;
                } else {
                    left = threshold;
                }
            }
            Err(AnalysisError::NoAcceptedBlocks) => {
                // nothing accepted: the threshold is too low
                stalls += 1;
                left = threshold;
            }
            Err(err) => return Err(err),
        }

        if right - left < f32::EPSILON {
            break;
        }
    }

    let outcome = best.ok_or(AnalysisError::NoAcceptedBlocks)?;
    tracing::debug!(
        threshold = outcome.params.threshold,
        cost = outcome.cost,
        converged = outcome.converged,
        "halving search finished"
    );
    Ok(outcome)
}
