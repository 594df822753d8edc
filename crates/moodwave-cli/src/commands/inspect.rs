//! Inspect command implementation
//!
//! Reports format, length, peak level and PCM hash of a WAV file.

use anyhow::{bail, Context, Result};
use colored::Colorize;
use moodwave_synth::wav::compute_pcm_hash;
use std::fs;
use std::io::Cursor;
use std::path::Path;
use std::process::ExitCode;

use super::json_output::InspectOutput;

/// Decodes `bytes` and summarizes them.
pub fn analyze(path: &Path, bytes: &[u8]) -> Result<InspectOutput> {
    let reader = hound::WavReader::new(Cursor::new(bytes))
        .with_context(|| format!("Not a readable WAV file: {}", path.display()))?;
    let spec = reader.spec();
    if spec.channels == 0 {
        bail!("WAV file declares zero channels: {}", path.display());
    }

    let num_samples = reader.duration();
    let peak = match spec.sample_format {
        hound::SampleFormat::Int => {
            let full_scale = ((1i64 << (spec.bits_per_sample - 1)) - 1) as f64;
            let mut peak = 0.0f64;
            for sample in reader.into_samples::<i32>() {
                let s = sample.context("Failed to decode sample")?;
                peak = peak.max((s as f64 / full_scale).abs());
            }
            peak.min(1.0)
        }
        hound::SampleFormat::Float => {
            let mut peak = 0.0f64;
            for sample in reader.into_samples::<f32>() {
                let s = sample.context("Failed to decode sample")?;
                peak = peak.max(f64::from(s.abs()));
            }
            peak
        }
    };

    Ok(InspectOutput {
        path: path.display().to_string(),
        sample_rate: spec.sample_rate,
        channels: spec.channels,
        bits_per_sample: spec.bits_per_sample,
        num_samples,
        duration_seconds: num_samples as f64 / spec.sample_rate as f64,
        peak,
        pcm_hash: compute_pcm_hash(bytes),
    })
}

/// Run the inspect command
pub fn run(input: &Path, json: bool) -> Result<ExitCode> {
    let bytes =
        fs::read(input).with_context(|| format!("Failed to read file: {}", input.display()))?;
    let info = analyze(input, &bytes)?;

    if json {
        let json = serde_json::to_string_pretty(&info).context("Failed to serialize output")?;
        println!("{}", json);
        return Ok(ExitCode::SUCCESS);
    }

    println!("{} {}", "File:".cyan().bold(), info.path);
    println!(
        "{} {} Hz, {} channel(s), {}-bit",
        "Format:".cyan().bold(),
        info.sample_rate,
        info.channels,
        info.bits_per_sample
    );
    println!(
        "{} {} samples ({:.3}s)",
        "Length:".cyan().bold(),
        info.num_samples,
        info.duration_seconds
    );
    println!("{} {:.6}", "Peak:".cyan().bold(), info.peak);
    match &info.pcm_hash {
        Some(hash) => println!("{} {}", "PCM hash:".dimmed(), hash),
        None => println!("  {} no data chunk found", "!".yellow()),
    }

    Ok(ExitCode::SUCCESS)
}
