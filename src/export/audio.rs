// src/export/audio.rs
//! Region audio export as 16-bit PCM WAV

use crate::audio::{Region, SampleBuffer};
use crate::error::{AnalysisError, AnalysisResult};
use std::path::{Path, PathBuf};

/// How detected regions are written to disk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportMode {
    /// All regions spliced back to back into a single file
    Concatenated,
    /// One file per region, named after its start and end seconds
    Separate,
}

/// Write regions of a buffer to WAV files
///
/// `destination` is the output file for [`ExportMode::Concatenated`]. For
/// [`ExportMode::Separate`] it acts as the naming template: each region is
/// written next to it as `{stem}_{start_s}-{end_s}.wav` with the region's
/// boundary times rounded down to whole seconds.
///
/// Returns the paths written, in region order.
///
/// # Errors
///
/// Returns `AnalysisError::Export` when the region list is empty or the
/// destination has no usable file stem, and I/O or encoding errors from
/// the WAV writer otherwise.
pub fn export_regions_audio(
    buffer: &SampleBuffer,
    regions: &[Region],
    destination: &Path,
    mode: ExportMode,
) -> AnalysisResult<Vec<PathBuf>> {
    if regions.is_empty() {
        return Err(AnalysisError::Export(
            "no regions to export".to_string(),
        ));
    }

    tracing::debug!(
        num_regions = regions.len(),
        ?mode,
        destination = %destination.display(),
        "exporting region audio"
    );

    match mode {
        ExportMode::Concatenated => {
            write_regions_to_file(buffer, regions, destination)?;
            Ok(vec![destination.to_path_buf()])
        }
        ExportMode::Separate => {
            let stem = destination
                .file_stem()
                .and_then(|s| s.to_str())
                .ok_or_else(|| {
                    AnalysisError::Export(format!(
                        "destination {} has no file stem",
                        destination.display()
                    ))
                })?;
            let parent = destination.parent().unwrap_or_else(|| Path::new("."));

            let mut written = Vec::with_capacity(regions.len());
            for region in regions {
                let duration = buffer.duration_seconds();
                let start_s = (region.start() * duration) as u64;
                let end_s = (region.end() * duration) as u64;
                let path = parent.join(format!("{}_{}-{}.wav", stem, start_s, end_s));
                write_regions_to_file(buffer, std::slice::from_ref(region), &path)?;
                written.push(path);
            }
            Ok(written)
        }
    }
}

fn write_regions_to_file(
    buffer: &SampleBuffer,
    regions: &[Region],
    path: &Path,
) -> AnalysisResult<()> {
    let spec = hound::WavSpec {
        channels: buffer.num_channels() as u16,
        sample_rate: buffer.sample_rate(),
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec)?;

    for region in regions {
        let (start, end) = region.to_sample_range(buffer.num_samples());
        for frame in start..end {
            for ch in 0..buffer.num_channels() {
                writer.write_sample(to_i16(buffer.channel(ch)[frame]))?;
            }
        }
    }

    writer.finalize()?;
    Ok(())
}

/// Convert a normalized sample to 16-bit PCM, clamping out-of-range input
fn to_i16(sample: f32) -> i16 {
    (sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16
}
