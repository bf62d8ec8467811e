// src/export/mod.rs
//! Region export
//!
//! Writes detected regions out as 16-bit WAV audio or as a plain text
//! listing of start/end times in seconds.

pub mod audio;
pub mod text;

pub use audio::{export_regions_audio, ExportMode};
pub use text::export_regions_text;
