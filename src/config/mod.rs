// src/config/mod.rs
//! Configuration management for the analysis pipeline

pub mod analysis;
pub mod constants;

pub use analysis::{AnalysisConfig, MelConfig};
