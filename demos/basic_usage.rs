//! Find regions of a noisy target that resemble a pure tone reference.

use audiosim_core::{
    AnalysisConfig, Region, SampleBuffer, SearchParameters, SimilarityAnalyzer,
};
use std::f32::consts::PI;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let sample_rate = 44100u32;
    let config = AnalysisConfig {
        block_size: 4096,
        ..AnalysisConfig::default()
    };
    let analyzer = SimilarityAnalyzer::new(config)?;

    // one second of a 440 Hz tone as the reference excerpt
    let tone = |i: usize| (2.0 * PI * 440.0 * i as f32 / sample_rate as f32).sin() * 0.4;
    let reference = SampleBuffer::from_mono((0..44100).map(tone).collect(), sample_rate)?;

    // target: tone, then noise, then the tone again
    let mut samples: Vec<f32> = (0..88200).map(tone).collect();
    samples.extend((0..88200u64).map(|i| ((i * 2654435761) % 10007) as f32 / 10007.0 - 0.5));
    samples.extend((0..88200).map(tone));
    let target = SampleBuffer::from_mono(samples, sample_rate)?;

    let curve = analyzer.analyze(&reference, Region::full(), &target)?;
    println!("scored {} blocks, max distance {:.4}", curve.len(), curve.max_distance());

    let search = SearchParameters {
        num_regions: 2,
        coverage: 0.66,
        width_filter: None,
    };
    let outcome = analyzer.search_grid(&curve, &search)?;

    println!(
        "threshold {:.2} (cost {:.3}, converged: {})",
        outcome.params.threshold, outcome.cost, outcome.converged
    );
    let duration = target.duration_seconds();
    for region in &outcome.regions {
        println!(
            "similar region: {:.2}s - {:.2}s",
            region.start() * duration,
            region.end() * duration
        );
    }

    Ok(())
}
