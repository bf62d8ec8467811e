// Integration tests for clustering and parameter search

use audiosim_core::processing::clustering::invert_regions;
use audiosim_core::processing::{
    cluster_regions, grid_search, ClusterParameters, DistanceCurve, SearchParameters,
};
use audiosim_core::{AnalysisError, Region};
use proptest::prelude::*;

#[test]
fn test_clustering_full_walkthrough() {
    // six blocks, two clear dips plus a trailing one
    let curve = DistanceCurve::from_values(vec![0.1, 0.9, 0.1, 0.1, 0.9, 0.1]);
    let params = ClusterParameters {
        threshold: 0.5,
        ..ClusterParameters::default()
    };

    let regions = cluster_regions(&curve, &params).unwrap();
    assert_eq!(regions.len(), 3);
    assert!((regions[0].start() - 0.0).abs() < 1e-6);
    assert!((regions[0].end() - 1.0 / 6.0).abs() < 1e-6);
    assert!((regions[1].start() - 2.0 / 6.0).abs() < 1e-6);
    assert!((regions[1].end() - 3.0 / 6.0).abs() < 1e-6);
    assert!((regions[2].start() - 5.0 / 6.0).abs() < 1e-6);
    assert!((regions[2].end() - 1.0).abs() < 1e-6);
}

#[test]
fn test_connection_width_bridges_gaps() {
    let curve = DistanceCurve::from_values(vec![0.1, 0.9, 0.1, 0.1, 0.9, 0.1]);
    let params = ClusterParameters {
        threshold: 0.5,
        region_connection_width: 0.04, // 3 blocks
        ..ClusterParameters::default()
    };

    let regions = cluster_regions(&curve, &params).unwrap();
    assert_eq!(regions.len(), 1);
    assert!((regions[0].start() - 0.0).abs() < 1e-6);
    // the merged run ends at accepted block 5 of 6
    assert!((regions[0].end() - 5.0 / 6.0).abs() < 1e-6);
}

#[test]
fn test_all_blocks_above_threshold_is_an_error() {
    let curve = DistanceCurve::from_values(vec![1.0, 1.0, 1.0, 1.0]);
    let params = ClusterParameters {
        threshold: 0.5,
        ..ClusterParameters::default()
    };
    assert!(matches!(
        cluster_regions(&curve, &params),
        Err(AnalysisError::NoAcceptedBlocks)
    ));
}

#[test]
fn test_grid_search_hits_requested_count() {
    let curve = DistanceCurve::from_values(vec![0.1, 0.9, 0.1, 0.1, 0.9, 0.1]);
    let search = SearchParameters {
        num_regions: 3,
        coverage: 0.5,
        width_filter: None,
    };

    let outcome = grid_search(&curve, &search).unwrap();
    assert_eq!(outcome.regions.len(), 3);
    assert!(outcome.cost.is_finite());
    assert!(outcome.params.threshold > 0.1 / 0.9);
}

proptest! {
    #[test]
    fn prop_cluster_output_is_sorted_and_bounded(
        values in prop::collection::vec(0.0f32..1.0, 2..64),
        threshold in 0.05f32..1.0,
    ) {
        let curve = DistanceCurve::from_values(values);
        let params = ClusterParameters {
            threshold,
            ..ClusterParameters::default()
        };

        if let Ok(regions) = cluster_regions(&curve, &params) {
            let mut cursor = 0.0f32;
            for region in &regions {
                prop_assert!(region.start() >= cursor - 1e-6);
                prop_assert!(region.end() >= region.start());
                prop_assert!(region.end() <= 1.0 + 1e-6);
                cursor = region.end();
            }
        }
    }

    #[test]
    fn prop_inversion_covers_the_complement(
        cuts in prop::collection::vec(0.0f32..1.0, 2..12),
    ) {
        let mut sorted = cuts;
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());

        // pair consecutive cut points into disjoint ascending regions
        let regions: Vec<Region> = sorted
            .chunks_exact(2)
            .map(|pair| Region::new(pair[0], pair[1]).unwrap())
            .collect();

        let inverted = invert_regions(&regions);
        let covered: f32 = regions.iter().map(Region::width).sum();
        let complement: f32 = inverted.iter().map(Region::width).sum();
        prop_assert!((covered + complement - 1.0).abs() < 1e-4);
    }
}
