//! AudioSim-Core: Audio similarity region detection library
//!
//! This library finds regions of a target audio file that sound similar to a
//! reference excerpt. It features:
//!
//! - Block-wise feature extraction (RMS, zero-cross rate, spectral features, MFCC)
//! - Distance scoring of target blocks against a reference prototype
//! - Threshold clustering of the distance curve into timeline regions
//! - Automated parameter search for a desired region count and coverage
//! - Region export as WAV audio or a plain text time listing
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use audiosim_core::{AnalysisConfig, Region, SampleBuffer, SimilarityAnalyzer};
//! use audiosim_core::processing::ClusterParameters;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let analyzer = SimilarityAnalyzer::new(AnalysisConfig::default())?;
//!
//!     let reference = SampleBuffer::from_mono(vec![0.0; 44100], 44100)?;
//!     let target = SampleBuffer::from_mono(vec![0.0; 441000], 44100)?;
//!
//!     // Score every target block against the first half of the reference
//!     let curve = analyzer.analyze(&reference, Region::new(0.0, 0.5)?, &target)?;
//!
//!     // Cluster the curve into similar regions
//!     let params = ClusterParameters {
//!         threshold: 0.3,
//!         ..ClusterParameters::default()
//!     };
//!     for region in analyzer.cluster(&curve, &params)? {
//!         println!("similar: [{:.3}, {:.3}]", region.start(), region.end());
//!     }
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod audio;
pub mod config;
pub mod error;
pub mod export;
pub mod processing;

// Re-export commonly used types for convenience
pub use audio::{Region, SampleBuffer};
pub use config::{AnalysisConfig, MelConfig};
pub use error::{AnalysisError, AnalysisResult};
pub use export::{export_regions_audio, export_regions_text, ExportMode};
pub use processing::{
    ClusterParameters, DistanceCurve, FeatureSelection, SearchOutcome, SearchParameters,
    SimilarityAnalyzer,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
