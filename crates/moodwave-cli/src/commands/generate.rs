//! Generate command implementation
//!
//! Validates a `(mood, duration)` request, renders it and writes the WAV to
//! the output directory.

use anyhow::{Context, Result};
use chrono::Local;
use colored::Colorize;
use moodwave_synth::{create_rng, Mood, MoodWaveformSynthesizer, SynthError};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Instant, SystemTime};
use thiserror::Error;
use tracing::{debug, info};

use super::json_output::{error_codes, GenerateOutput, GenerateResult, JsonError};
use crate::config::MoodwaveConfig;
use crate::storage::OutputStore;

/// Arguments of `moodwave generate`.
#[derive(Debug, Clone, Default)]
pub struct GenerateArgs {
    pub mood: String,
    pub duration: i64,
    pub seed: Option<u32>,
    pub out_dir: Option<PathBuf>,
    /// Accept moods outside the table and let the synthesizer fall back.
    pub allow_unknown: bool,
    /// Reject unknown moods even if the config allows them.
    pub strict: bool,
    pub json: bool,
}

/// A request rejected before any audio is rendered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    #[error("Invalid mood. Choose from: {choices}")]
    InvalidMood { mood: String, choices: String },

    #[error("Duration must be between {min} and {max} seconds")]
    InvalidDuration { duration: i64, min: i64, max: i64 },
}

impl RequestError {
    pub fn code(&self) -> &'static str {
        match self {
            RequestError::InvalidMood { .. } => error_codes::INVALID_MOOD,
            RequestError::InvalidDuration { .. } => error_codes::INVALID_DURATION,
        }
    }
}

/// Checks a request against the mood table and the duration bounds.
///
/// The mood is checked first.
pub fn validate_request(
    mood: &str,
    duration: i64,
    config: &MoodwaveConfig,
    accept_unknown: bool,
) -> Result<(), RequestError> {
    if !accept_unknown && mood.parse::<Mood>().is_err() {
        return Err(RequestError::InvalidMood {
            mood: mood.to_string(),
            choices: Mood::ALL
                .iter()
                .map(Mood::as_str)
                .collect::<Vec<_>>()
                .join(", "),
        });
    }
    if duration < config.min_duration_seconds || duration > config.max_duration_seconds {
        return Err(RequestError::InvalidDuration {
            duration,
            min: config.min_duration_seconds,
            max: config.max_duration_seconds,
        });
    }
    Ok(())
}

/// Why a generate request did not produce a file.
#[derive(Debug)]
pub enum GenerateFailure {
    /// The request was rejected before rendering (exit code 1).
    Rejected { code: &'static str, message: String },
    /// Synthesis or I/O failed (exit code 2).
    Failed {
        code: &'static str,
        error: anyhow::Error,
    },
}

impl GenerateFailure {
    fn rejected(code: &'static str, message: impl ToString) -> Self {
        Self::Rejected {
            code,
            message: message.to_string(),
        }
    }

    fn failed(code: &'static str, error: anyhow::Error) -> Self {
        Self::Failed { code, error }
    }
}

/// Validates, renders and writes one piece.
///
/// # Arguments
/// * `args` - Parsed command-line arguments
/// * `config` - Loaded configuration (bounds, output directory, retention)
///
/// # Returns
/// Details of the written file, or the reason nothing was written
pub fn generate(
    args: &GenerateArgs,
    config: &MoodwaveConfig,
) -> Result<GenerateResult, GenerateFailure> {
    let accept_unknown = !args.strict && (args.allow_unknown || config.allow_unknown_moods);

    validate_request(&args.mood, args.duration, config, accept_unknown).map_err(|e| {
        debug!(error = %e, "request rejected");
        GenerateFailure::rejected(e.code(), &e)
    })?;

    let start = Instant::now();
    let store = OutputStore::new(
        args.out_dir
            .clone()
            .unwrap_or_else(|| config.output_dir.clone()),
    );

    let cleaned_files = if config.cleanup_on_generate {
        store
            .cleanup_older_than(config.max_file_age(), SystemTime::now(), false)
            .context("Failed to clean output directory")
            .map_err(|e| GenerateFailure::failed(error_codes::IO, e))?
            .removed
            .len()
    } else {
        0
    };

    let seed = args.seed.unwrap_or_else(rand::random::<u32>);
    let synth = if args.strict {
        MoodWaveformSynthesizer::strict()
    } else {
        MoodWaveformSynthesizer::default()
    };

    let mut rng = create_rng(seed);
    let rendering = synth
        .render(&args.mood, args.duration, &mut rng)
        .map_err(|e| match e {
            SynthError::InvalidDuration { .. } | SynthError::UnknownMood { .. } => {
                GenerateFailure::rejected(e.code(), &e)
            }
            e => GenerateFailure::failed(
                error_codes::SYNTHESIS,
                anyhow::Error::new(e).context("Synthesis failed"),
            ),
        })?;

    // Named after the rendered profile; the raw key may be anything under
    // --allow-unknown.
    let stored = store
        .write_rendering(
            &rendering.buffer,
            rendering.mood,
            args.duration,
            &Local::now(),
        )
        .map_err(|e| GenerateFailure::failed(error_codes::IO, e))?;
    info!(seed, notes = rendering.notes.len(), "generated");

    Ok(GenerateResult {
        mood: args.mood.clone(),
        profile: rendering.mood.as_str().to_string(),
        fell_back: rendering.fell_back,
        duration_seconds: args.duration,
        seed,
        note_count: rendering.notes.len(),
        num_samples: stored.num_samples,
        sample_rate: rendering.buffer.sample_rate,
        path: stored.path.display().to_string(),
        size_bytes: stored.size_bytes,
        pcm_hash: stored.pcm_hash,
        duration_ms: start.elapsed().as_millis() as u64,
        cleaned_files,
    })
}

/// Run the generate command
///
/// # Arguments
/// * `args` - Parsed command-line arguments
/// * `config` - Loaded configuration
///
/// # Returns
/// Exit code: 0 success, 1 rejected request, 2 synthesis or I/O error.
/// With `--json` every failure is reported as a failure document; otherwise
/// synthesis and I/O errors are returned for `main` to print.
pub fn run(args: &GenerateArgs, config: &MoodwaveConfig) -> Result<ExitCode> {
    match generate(args, config) {
        Ok(result) => {
            if args.json {
                let output = GenerateOutput::success(result);
                let json =
                    serde_json::to_string_pretty(&output).context("Failed to serialize output")?;
                println!("{}", json);
            } else {
                print_human(&result);
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(GenerateFailure::Rejected { code, message }) => {
            report_failure(args.json, code, &message)?;
            Ok(ExitCode::from(1))
        }
        Err(GenerateFailure::Failed { error, .. }) if !args.json => Err(error),
        Err(GenerateFailure::Failed { code, error }) => {
            report_failure(true, code, &format!("{:#}", error))?;
            Ok(ExitCode::from(2))
        }
    }
}

fn report_failure(json: bool, code: &str, message: &str) -> Result<()> {
    if json {
        let output = GenerateOutput::failure(vec![JsonError::new(code, message)]);
        let json = serde_json::to_string_pretty(&output).context("Failed to serialize output")?;
        println!("{}", json);
    } else {
        eprintln!("{} [{}] {}", "error:".red().bold(), code, message);
    }
    Ok(())
}

fn print_human(result: &GenerateResult) {
    if result.cleaned_files > 0 {
        println!(
            "{} {} old file(s)",
            "Cleaned:".dimmed(),
            result.cleaned_files
        );
    }
    if result.fell_back {
        println!(
            "  {} unknown mood '{}', using '{}'",
            "!".yellow(),
            result.mood,
            result.profile
        );
    }
    println!("{} {}", "Mood:".cyan().bold(), result.profile);
    println!("{} {}s", "Duration:".cyan().bold(), result.duration_seconds);
    println!("{} {}", "Seed:".cyan().bold(), result.seed);
    println!(
        "{} {} notes, {} samples @ {} Hz",
        "Rendered:".cyan().bold(),
        result.note_count,
        result.num_samples,
        result.sample_rate
    );
    println!("{} {}", "PCM hash:".dimmed(), result.pcm_hash);
    println!(
        "\n{} {} ({} bytes, {}ms)",
        "SUCCESS".green().bold(),
        result.path,
        result.size_bytes,
        result.duration_ms
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use moodwave_synth::wav::compute_pcm_hash;
    use tempfile::TempDir;

    fn config() -> MoodwaveConfig {
        MoodwaveConfig::default()
    }

    #[test]
    fn test_validate_accepts_bounds() {
        assert!(validate_request("happy", 5, &config(), false).is_ok());
        assert!(validate_request("energetic", 60, &config(), false).is_ok());
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        for duration in [4, 61, 0, -1] {
            let err = validate_request("sad", duration, &config(), false).unwrap_err();
            assert_eq!(err.code(), error_codes::INVALID_DURATION);
            assert_eq!(err.to_string(), "Duration must be between 5 and 60 seconds");
        }
    }

    #[test]
    fn test_validate_rejects_unknown_mood() {
        let err = validate_request("angry", 10, &config(), false).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid mood. Choose from: happy, sad, relaxed, energetic"
        );
    }

    #[test]
    fn test_validate_checks_mood_before_duration() {
        let err = validate_request("angry", 1000, &config(), false).unwrap_err();
        assert!(matches!(err, RequestError::InvalidMood { .. }));
    }

    #[test]
    fn test_validate_unknown_mood_when_allowed() {
        assert!(validate_request("angry", 10, &config(), true).is_ok());
    }

    #[test]
    fn test_run_writes_reproducible_file() {
        let tmp = TempDir::new().unwrap();
        let make_args = |dir: &str| GenerateArgs {
            mood: "sad".into(),
            duration: 5,
            seed: Some(7),
            out_dir: Some(tmp.path().join(dir)),
            json: true,
            ..GenerateArgs::default()
        };

        let code = run(&make_args("a"), &config()).unwrap();
        assert_eq!(code, ExitCode::SUCCESS);
        run(&make_args("b"), &config()).unwrap();

        let read_only = |dir: &str| {
            let entry = std::fs::read_dir(tmp.path().join(dir))
                .unwrap()
                .next()
                .unwrap()
                .unwrap();
            assert!(entry.file_name().to_string_lossy().starts_with("sad_5_"));
            std::fs::read(entry.path()).unwrap()
        };
        assert_eq!(
            compute_pcm_hash(&read_only("a")),
            compute_pcm_hash(&read_only("b"))
        );
    }

    #[test]
    fn test_run_rejected_request_writes_nothing() {
        let tmp = TempDir::new().unwrap();
        let args = GenerateArgs {
            mood: "happy".into(),
            duration: 3,
            out_dir: Some(tmp.path().join("out")),
            json: true,
            ..GenerateArgs::default()
        };

        let code = run(&args, &config()).unwrap();
        assert_eq!(code, ExitCode::from(1));
        assert!(!tmp.path().join("out").exists());
    }

    #[test]
    fn test_unknown_mood_stays_in_output_dir() {
        let tmp = TempDir::new().unwrap();
        let out_dir = tmp.path().join("out");
        for mood in ["../escaped", "sub/dir"] {
            let args = GenerateArgs {
                mood: mood.into(),
                duration: 5,
                seed: Some(1),
                out_dir: Some(out_dir.clone()),
                allow_unknown: true,
                ..GenerateArgs::default()
            };
            let result = generate(&args, &config()).unwrap();

            assert!(result.fell_back, "{mood}");
            assert_eq!(result.mood, mood);
            assert_eq!(result.profile, "happy");
            let path = PathBuf::from(&result.path);
            assert_eq!(path.parent(), Some(out_dir.as_path()));
            assert!(path.exists());
        }

        for entry in std::fs::read_dir(&out_dir).unwrap() {
            let name = entry.unwrap().file_name();
            assert!(name.to_string_lossy().starts_with("happy_5_"));
        }
        let siblings: Vec<_> = std::fs::read_dir(tmp.path()).unwrap().collect();
        assert_eq!(siblings.len(), 1);
    }

    #[test]
    fn test_unwritable_output_dir() {
        let tmp = TempDir::new().unwrap();
        let blocker = tmp.path().join("not_a_dir");
        std::fs::write(&blocker, b"").unwrap();
        let args = |json| GenerateArgs {
            mood: "sad".into(),
            duration: 5,
            seed: Some(3),
            out_dir: Some(blocker.clone()),
            json,
            ..GenerateArgs::default()
        };

        match generate(&args(false), &config()) {
            Err(GenerateFailure::Failed { code, error }) => {
                assert_eq!(code, error_codes::IO);
                assert!(format!("{error:#}").contains("Failed to create output directory"));
            }
            other => panic!("expected I/O failure, got {other:?}"),
        }
        assert_eq!(run(&args(true), &config()).unwrap(), ExitCode::from(2));
        assert!(run(&args(false), &config()).is_err());
    }

    #[test]
    fn test_run_strict_overrides_allow_unknown() {
        let tmp = TempDir::new().unwrap();
        let args = GenerateArgs {
            mood: "angry".into(),
            duration: 5,
            out_dir: Some(tmp.path().to_path_buf()),
            allow_unknown: true,
            strict: true,
            json: true,
            ..GenerateArgs::default()
        };
        assert_eq!(run(&args, &config()).unwrap(), ExitCode::from(1));
    }
}
