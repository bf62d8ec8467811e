// src/export/text.rs
//! Region time listing export

use crate::audio::Region;
use crate::error::{AnalysisError, AnalysisResult};
use std::io::Write;
use std::path::Path;

/// Write regions as lines of `start_seconds, end_seconds`
///
/// `duration_seconds` is the length of the audio the fractional regions
/// refer to. One region per line, boundaries in seconds with fractional
/// precision.
///
/// # Errors
///
/// Returns `AnalysisError::Export` when the region list is empty, and I/O
/// errors from writing otherwise.
pub fn export_regions_text(
    regions: &[Region],
    duration_seconds: f32,
    destination: &Path,
) -> AnalysisResult<()> {
    if regions.is_empty() {
        return Err(AnalysisError::Export(
            "no regions to export".to_string(),
        ));
    }

    let mut file = std::fs::File::create(destination)?;
    for region in regions {
        writeln!(
            file,
            "{}, {}",
            region.start() * duration_seconds,
            region.end() * duration_seconds
        )?;
    }

    tracing::debug!(
        num_regions = regions.len(),
        destination = %destination.display(),
        "wrote region listing"
    );
    Ok(())
}
