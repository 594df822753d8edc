//! moodwave CLI - mood-based music generation
//!
//! Renders short pieces for a mood label, manages the output directory and
//! inspects the resulting WAV files.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use moodwave_cli::commands;
use moodwave_cli::commands::generate::GenerateArgs;
use moodwave_cli::config::MoodwaveConfig;
use moodwave_cli::logging;

/// moodwave - Mood-Based Music Generation
#[derive(Parser)]
#[command(name = "moodwave")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to a JSON config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log debug details to stderr (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a WAV file for a mood
    Generate {
        /// Mood label (happy, sad, relaxed, energetic)
        #[arg(short, long)]
        mood: String,

        /// Length in seconds
        #[arg(short, long, allow_hyphen_values = true)]
        duration: i64,

        /// Seed for the note sequence (random when omitted)
        #[arg(long)]
        seed: Option<u32>,

        /// Output directory (default: from config)
        #[arg(short, long)]
        out_dir: Option<PathBuf>,

        /// Accept unknown moods and fall back to the default profile
        #[arg(long)]
        allow_unknown: bool,

        /// Reject unknown moods regardless of configuration
        #[arg(long, conflicts_with = "allow_unknown")]
        strict: bool,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// List the available moods and their profiles
    Moods {
        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Remove generated files older than the retention age
    Cleanup {
        /// Output directory (default: from config)
        #[arg(short, long)]
        out_dir: Option<PathBuf>,

        /// Maximum file age in seconds (default: from config)
        #[arg(long)]
        max_age_secs: Option<u64>,

        /// Report what would be removed without deleting
        #[arg(long)]
        dry_run: bool,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Print format, length, peak and PCM hash of a WAV file
    Inspect {
        /// Path to the WAV file
        #[arg(short, long)]
        input: PathBuf,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config = match MoodwaveConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            return ExitCode::from(1);
        }
    };

    let result = match cli.command {
        Commands::Generate {
            mood,
            duration,
            seed,
            out_dir,
            allow_unknown,
            strict,
            json,
        } => commands::generate::run(
            &GenerateArgs {
                mood,
                duration,
                seed,
                out_dir,
                allow_unknown,
                strict,
                json,
            },
            &config,
        ),
        Commands::Moods { json } => commands::moods::run(json),
        Commands::Cleanup {
            out_dir,
            max_age_secs,
            dry_run,
            json,
        } => commands::cleanup::run(out_dir, max_age_secs, dry_run, json, &config),
        Commands::Inspect { input, json } => commands::inspect::run(&input, json),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(2)
        }
    }
}
