//! Cleanup command implementation
//!
//! Applies the output directory retention policy on demand.

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, SystemTime};

use super::json_output::CleanupOutput;
use crate::config::MoodwaveConfig;
use crate::storage::OutputStore;

/// Run the cleanup command
///
/// `out_dir` and `max_age_secs` override the configured values.
pub fn run(
    out_dir: Option<PathBuf>,
    max_age_secs: Option<u64>,
    dry_run: bool,
    json: bool,
    config: &MoodwaveConfig,
) -> Result<ExitCode> {
    let store = OutputStore::new(out_dir.unwrap_or_else(|| config.output_dir.clone()));
    let max_age_seconds = max_age_secs.unwrap_or(config.max_file_age_seconds);

    let report = store.cleanup_older_than(
        Duration::from_secs(max_age_seconds),
        SystemTime::now(),
        dry_run,
    )?;

    if json {
        let output = CleanupOutput {
            dir: store.dir().display().to_string(),
            max_age_seconds,
            dry_run,
            removed: report
                .removed
                .iter()
                .map(|p| p.display().to_string())
                .collect(),
            kept: report.kept,
            bytes_freed: report.bytes_freed,
        };
        let json = serde_json::to_string_pretty(&output).context("Failed to serialize output")?;
        println!("{}", json);
        return Ok(ExitCode::SUCCESS);
    }

    println!(
        "{} {} (max age {}s)",
        "Cleaning:".cyan().bold(),
        store.dir().display(),
        max_age_seconds
    );
    let verb = if dry_run { "would remove" } else { "removed" };
    for path in &report.removed {
        println!("  {} {}", "-".red(), path.display());
    }
    println!(
        "{} {} file(s), {} bytes; kept {}",
        verb.green().bold(),
        report.removed.len(),
        report.bytes_freed,
        report.kept
    );

    Ok(ExitCode::SUCCESS)
}
