// src/error.rs
//! Unified error handling for the similarity analysis pipeline
//!
//! Only precondition violations surface as errors to the caller. Numeric
//! degeneracies inside the pipeline (zero-norm vectors, zero-energy spectra)
//! are recovered locally with a defined sentinel value and never propagate
//! as errors.

use thiserror::Error;

/// Errors that can occur during similarity analysis
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Invalid input data or parameters
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Clustering was asked to run on a distance curve where no block falls
    /// under the scaled threshold
    #[error("no blocks accepted under threshold; cannot form regions")]
    NoAcceptedBlocks,

    /// Configuration loading or validation error
    #[error("configuration error: {0}")]
    Config(String),

    /// Region export error
    #[error("export error: {0}")]
    Export(String),

    /// I/O error while reading configuration or writing exports
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// WAV encoding error
    #[error("wav error: {0}")]
    Wav(#[from] hound::Error),
}

/// Result type alias for analysis operations
pub type AnalysisResult<T> = Result<T, AnalysisError>;
