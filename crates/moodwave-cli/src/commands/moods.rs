//! Moods command implementation

use anyhow::{Context, Result};
use colored::Colorize;
use moodwave_synth::Mood;
use std::process::ExitCode;

use super::json_output::MoodInfo;

/// Describes every mood in table order.
pub fn mood_table() -> Vec<MoodInfo> {
    Mood::ALL
        .iter()
        .map(|mood| {
            let profile = mood.profile();
            MoodInfo {
                mood: mood.as_str().to_string(),
                base_frequency_hz: profile.base_frequency_hz,
                scale_frequencies_hz: profile.scale_frequencies(),
                note_tempo_seconds: profile.note_tempo_seconds,
                fallback: *mood == Mood::FALLBACK,
            }
        })
        .collect()
}

/// Run the moods command
pub fn run(json: bool) -> Result<ExitCode> {
    let table = mood_table();

    if json {
        let json = serde_json::to_string_pretty(&table).context("Failed to serialize output")?;
        println!("{}", json);
        return Ok(ExitCode::SUCCESS);
    }

    for info in &table {
        let marker = if info.fallback {
            " (fallback)".dimmed().to_string()
        } else {
            String::new()
        };
        println!("{}{}", info.mood.cyan().bold(), marker);
        println!(
            "  {} {} Hz, {}s per beat",
            "root:".dimmed(),
            info.base_frequency_hz,
            info.note_tempo_seconds
        );
        let scale: Vec<String> = info
            .scale_frequencies_hz
            .iter()
            .map(|f| format!("{:.2}", f))
            .collect();
        println!("  {} {}", "scale:".dimmed(), scale.join(" "));
    }

    Ok(ExitCode::SUCCESS)
}
