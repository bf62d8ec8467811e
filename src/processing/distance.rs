// src/processing/distance.rs
//! Distance scoring of target blocks against a reference prototype
//!
//! The reference feature matrix is reduced to a prototype vector by a
//! column-wise mean, then every target block's row is scored against it.
//! With fewer than two feature columns cosine similarity is undefined, so
//! the squared Euclidean distance is used instead.

use crate::error::{AnalysisError, AnalysisResult};
use ndarray::{Array2, ArrayView1, Axis};

/// Per-block distance values plus the maximum observed
///
/// Rebuilt from scratch on every scoring pass; previous contents are never
/// accumulated into.
#[derive(Debug, Clone, Default)]
pub struct DistanceCurve {
    values: Vec<f32>,
    max_distance: f32,
}

impl DistanceCurve {
    /// Distance values in block order
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Maximum distance across all blocks
    ///
    /// Denormalizes the fractional clustering threshold back to the curve's
    /// original scale.
    pub fn max_distance(&self) -> f32 {
        self.max_distance
    }

    /// Number of scored blocks
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the curve has no blocks
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Build a curve directly from raw values, tracking the maximum
    ///
    /// Intended for driving the clusterer from synthetic or externally
    /// computed curves.
    pub fn from_values(values: Vec<f32>) -> Self {
        let max_distance = values.iter().copied().fold(0.0f32, f32::max);
        Self {
            values,
            max_distance,
        }
    }
}

/// Score every target block against the reference prototype
///
/// Returns the distance curve together with its running maximum. An empty
/// feature selection produces empty matrices upstream; scoring them yields
/// an empty curve rather than an error.
///
/// # Errors
///
/// Returns `AnalysisError::InvalidInput` if the reference matrix has no
/// rows while the target does, or if the column counts differ.
pub fn compute_distances(
    ref_matrix: &Array2<f32>,
    target_matrix: &Array2<f32>,
) -> AnalysisResult<DistanceCurve> {
    if ref_matrix.ncols() == 0 && target_matrix.ncols() == 0 {
        return Ok(DistanceCurve::default());
    }
    if ref_matrix.ncols() != target_matrix.ncols() {
        return Err(AnalysisError::InvalidInput(format!(
            "feature column mismatch: reference has {}, target has {}",
            ref_matrix.ncols(),
            target_matrix.ncols()
        )));
    }

    let prototype = ref_matrix.mean_axis(Axis(0)).ok_or_else(|| {
        AnalysisError::InvalidInput("reference region produced no feature blocks".to_string())
    })?;

    let use_euclidean = target_matrix.ncols() < 2;
    let mut values = Vec::with_capacity(target_matrix.nrows());
    let mut max_distance = 0.0f32;

    for row in target_matrix.rows() {
        let distance = if use_euclidean {
            squared_euclidean(row, prototype.view())
        } else {
            cosine_distance(row, prototype.view())
        };
        if distance > max_distance {
            max_distance = distance;
        }
        values.push(distance);
    }

    tracing::debug!(
        blocks = values.len(),
        max_distance,
        metric = if use_euclidean { "euclidean" } else { "cosine" },
        "computed distance curve"
    );

    Ok(DistanceCurve {
        values,
        max_distance,
    })
}

fn squared_euclidean(row: ArrayView1<'_, f32>, prototype: ArrayView1<'_, f32>) -> f32 {
    row.iter()
        .zip(prototype.iter())
        .map(|(&a, &b)| (a - b) * (a - b))
        .sum()
}

/// `1 - cos(row, prototype)`, clamped non-negative
///
/// A zero-norm row or prototype has no defined angle; the distance falls
/// back to 0, the same sentinel the spectral centroid guard uses.
fn cosine_distance(row: ArrayView1<'_, f32>, prototype: ArrayView1<'_, f32>) -> f32 {
    let dot: f32 = row.iter().zip(prototype.iter()).map(|(&a, &b)| a * b).sum();
    let row_norm: f32 = row.iter().map(|&a| a * a).sum::<f32>().sqrt();
    let proto_norm: f32 = prototype.iter().map(|&b| b * b).sum::<f32>().sqrt();

    if row_norm <= 0.0 || proto_norm <= 0.0 {
        return 0.0;
    }

    (1.0 - dot / (row_norm * proto_norm)).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr2;

    #[test]
    fn test_single_column_uses_squared_euclidean() {
        let reference = arr2(&[[1.0], [3.0]]); // prototype = 2.0
        let target = arr2(&[[2.0], [5.0], [0.0]]);
        let curve = compute_distances(&reference, &target).unwrap();
        assert_eq!(curve.values(), &[0.0, 9.0, 4.0]);
        assert_eq!(curve.max_distance(), 9.0);
    }

    #[test]
    fn test_multi_column_uses_cosine() {
        let reference = arr2(&[[1.0, 0.0]]);
        let target = arr2(&[[1.0, 0.0], [0.0, 1.0], [-1.0, 0.0]]);
        let curve = compute_distances(&reference, &target).unwrap();
        assert!(curve.values()[0].abs() < 1e-6); // same direction
        assert!((curve.values()[1] - 1.0).abs() < 1e-6); // orthogonal
        assert!((curve.values()[2] - 2.0).abs() < 1e-6); // opposite
        assert!((curve.max_distance() - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_zero_norm_rows_guarded() {
        let reference = arr2(&[[0.0, 0.0]]);
        let target = arr2(&[[0.0, 0.0], [1.0, 1.0]]);
        let curve = compute_distances(&reference, &target).unwrap();
        assert_eq!(curve.values(), &[0.0, 0.0]);
    }

    #[test]
    fn test_max_matches_curve_maximum() {
        let reference = arr2(&[[1.0, 1.0]]);
        let target = arr2(&[[1.0, 1.0], [1.0, -1.0], [0.5, 0.7]]);
        let curve = compute_distances(&reference, &target).unwrap();
        let observed_max = curve.values().iter().copied().fold(0.0f32, f32::max);
        assert_eq!(curve.max_distance(), observed_max);
    }

    #[test]
    fn test_recomputation_is_idempotent() {
        let reference = arr2(&[[1.0, 2.0], [3.0, 4.0]]);
        let target = arr2(&[[1.0, 2.0], [2.0, 1.0], [5.0, 5.0]]);
        let first = compute_distances(&reference, &target).unwrap();
        let second = compute_distances(&reference, &target).unwrap();
        assert_eq!(first.values(), second.values());
        assert_eq!(first.max_distance(), second.max_distance());
    }

    #[test]
    fn test_empty_selection_matrices_yield_empty_curve() {
        let empty = Array2::<f32>::zeros((0, 0));
        let curve = compute_distances(&empty, &empty).unwrap();
        assert!(curve.is_empty());
        assert_eq!(curve.max_distance(), 0.0);
    }

    #[test]
    fn test_empty_reference_with_target_rows_is_error() {
        let reference = Array2::<f32>::zeros((0, 2));
        let target = arr2(&[[1.0, 2.0]]);
        assert!(compute_distances(&reference, &target).is_err());
    }

    #[test]
    fn test_column_mismatch_is_error() {
        let reference = arr2(&[[1.0, 2.0]]);
        let target = arr2(&[[1.0, 2.0, 3.0]]);
        assert!(compute_distances(&reference, &target).is_err());
    }

    #[test]
    fn test_from_values_tracks_max() {
        let curve = DistanceCurve::from_values(vec![0.1, 0.9, 0.1]);
        assert_eq!(curve.max_distance(), 0.9);
        assert_eq!(curve.len(), 3);
    }
}
