// src/processing/mod.rs
//! Signal analysis pipeline: feature extraction, distance scoring, region
//! clustering and parameter search

pub mod clustering;
pub mod distance;
pub mod features;
pub mod fft;
pub mod pipeline;
pub mod search;

pub use clustering::{cluster_regions, ClusterParameters};
pub use distance::{compute_distances, DistanceCurve};
pub use features::{FeatureExtractor, FeatureKind, FeatureSelection};
pub use pipeline::SimilarityAnalyzer;
pub use search::{grid_search, halving_search, SearchOutcome, SearchParameters};
