// src/processing/pipeline.rs
//! End-to-end similarity analysis
//!
//! Ties the stages together: feature matrices for the reference region and
//! the whole target, distance scoring against the reference prototype, and
//! clustering or parameter search over the resulting curve. Runs
//! synchronously on the calling thread; every artifact is returned by value
//! so re-invocation never accumulates state from a previous pass.

use crate::audio::{Region, SampleBuffer};
use crate::config::AnalysisConfig;
use crate::error::AnalysisResult;
use crate::processing::clustering::{cluster_regions, ClusterParameters};
use crate::processing::distance::{compute_distances, DistanceCurve};
use crate::processing::features::FeatureExtractor;
use crate::processing::search::{grid_search, halving_search, SearchOutcome, SearchParameters};
use std::time::Instant;

/// Similarity analysis controller
///
/// Owns the validated configuration and the feature extractor; one instance
/// drives at most one analysis at a time.
pub struct SimilarityAnalyzer {
    config: AnalysisConfig,
    extractor: FeatureExtractor,
}

impl SimilarityAnalyzer {
    /// Create an analyzer from configuration
    ///
    /// # Errors
    ///
    /// Returns a configuration error if validation fails.
    pub fn new(config: AnalysisConfig) -> AnalysisResult<Self> {
        let extractor = FeatureExtractor::new(&config)?;
        Ok(Self { config, extractor })
    }

    /// The analyzer's configuration
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// The underlying feature extractor
    pub fn extractor(&self) -> &FeatureExtractor {
        &self.extractor
    }

    /// Score every target block against the reference region
    ///
    /// Extracts the reference feature matrix from `reference_region` of
    /// `reference`, the target matrix from the whole of `target`, and
    /// returns a freshly built distance curve. An empty feature selection
    /// yields an empty curve.
    pub fn analyze(
        &self,
        reference: &SampleBuffer,
        reference_region: Region,
        target: &SampleBuffer,
    ) -> AnalysisResult<DistanceCurve> {
        let started = Instant::now();
        let selection = &self.config.features;

        let ref_matrix =
            self.extractor
                .compute_feature_matrix(reference, selection, reference_region)?;
        tracing::debug!(
            rows = ref_matrix.nrows(),
            elapsed_ms = started.elapsed().as_secs_f32() * 1000.0,
            "reference features ready"
        );

        let target_matrix =
            self.extractor
                .compute_feature_matrix(target, selection, Region::full())?;
        tracing::debug!(
            rows = target_matrix.nrows(),
            elapsed_ms = started.elapsed().as_secs_f32() * 1000.0,
            "target features ready"
        );

        let curve = compute_distances(&ref_matrix, &target_matrix)?;
        tracing::debug!(
            blocks = curve.len(),
            max_distance = curve.max_distance(),
            elapsed_ms = started.elapsed().as_secs_f32() * 1000.0,
            "analysis finished"
        );
        Ok(curve)
    }

    /// Cluster a distance curve with explicit parameters
    pub fn cluster(
        &self,
        curve: &DistanceCurve,
        params: &ClusterParameters,
    ) -> AnalysisResult<Vec<Region>> {
        cluster_regions(curve, params)
    }

    /// Search the threshold grid for the given target
    pub fn search_grid(
        &self,
        curve: &DistanceCurve,
        search: &SearchParameters,
    ) -> AnalysisResult<SearchOutcome> {
        grid_search(curve, search)
    }

    /// Run the boundary-halving threshold search for the given target
    pub fn search_halving(
        &self,
        curve: &DistanceCurve,
        search: &SearchParameters,
    ) -> AnalysisResult<SearchOutcome> {
        halving_search(curve, search)
    }
}
