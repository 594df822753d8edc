//! Output directory management: naming, writing and retention cleanup.
//!
//! Generated files are named `{mood}_{duration}_{YYYYmmddHHMMSS}.wav`, where
//! `mood` is the key of the profile actually rendered. Names are built from
//! [`Mood`] rather than caller input, so every file lands directly inside the
//! output directory. Two requests for the same mood and duration within one
//! second share a name; the later one replaces the earlier.

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use moodwave_synth::{AudioBuffer, Mood, WavResult};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tracing::{debug, info};

/// Extension of generated files; cleanup only touches these.
pub const OUTPUT_EXTENSION: &str = "wav";

/// A WAV file written to the output directory.
#[derive(Debug, Clone)]
pub struct StoredFile {
    /// Path of the written file.
    pub path: PathBuf,
    /// File size in bytes.
    pub size_bytes: u64,
    /// BLAKE3 hash of the PCM payload.
    pub pcm_hash: String,
    /// Number of samples.
    pub num_samples: usize,
}

/// Outcome of a cleanup pass.
#[derive(Debug, Clone, Default)]
pub struct CleanupReport {
    /// Files removed (or that would be removed in a dry run).
    pub removed: Vec<PathBuf>,
    /// Generated files young enough to keep.
    pub kept: usize,
    /// Total size of `removed`.
    pub bytes_freed: u64,
}

/// Directory that receives generated audio.
#[derive(Debug, Clone)]
pub struct OutputStore {
    dir: PathBuf,
}

impl OutputStore {
    /// Creates a store rooted at `dir`. Nothing is created until a write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Root directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File name for a rendering requested at `timestamp`.
    pub fn file_name(mood: Mood, duration_seconds: i64, timestamp: &DateTime<Local>) -> String {
        format!(
            "{}_{}_{}.{}",
            mood.as_str(),
            duration_seconds,
            timestamp.format("%Y%m%d%H%M%S"),
            OUTPUT_EXTENSION
        )
    }

    /// Full path for a rendering requested at `timestamp`.
    pub fn path_for(
        &self,
        mood: Mood,
        duration_seconds: i64,
        timestamp: &DateTime<Local>,
    ) -> PathBuf {
        self.dir.join(Self::file_name(mood, duration_seconds, timestamp))
    }

    /// Encodes `buffer` and writes it under the conventional name.
    pub fn write_rendering(
        &self,
        buffer: &AudioBuffer,
        mood: Mood,
        duration_seconds: i64,
        timestamp: &DateTime<Local>,
    ) -> Result<StoredFile> {
        fs::create_dir_all(&self.dir).with_context(|| {
            format!("Failed to create output directory: {}", self.dir.display())
        })?;

        let wav = WavResult::from_buffer(buffer).context("Failed to encode WAV")?;
        let path = self.path_for(mood, duration_seconds, timestamp);
        fs::write(&path, &wav.wav_data)
            .with_context(|| format!("Failed to write audio file: {}", path.display()))?;

        info!(path = %path.display(), bytes = wav.wav_data.len(), "wrote audio file");

        Ok(StoredFile {
            path,
            size_bytes: wav.wav_data.len() as u64,
            pcm_hash: wav.pcm_hash,
            num_samples: wav.num_samples,
        })
    }

    /// Removes generated files last modified more than `max_age` before `now`.
    ///
    /// Only regular `.wav` files directly inside the directory are
    /// considered. A missing directory has nothing to clean. With `dry_run`
    /// the report lists what would be removed and nothing is deleted.
    ///
    /// # Arguments
    /// * `max_age` - Files older than this are removed
    /// * `now` - Reference time for computing ages
    /// * `dry_run` - Report only, delete nothing
    ///
    /// # Returns
    /// The removed (or removable) paths in sorted order, the count kept and
    /// the bytes freed
    pub fn cleanup_older_than(
        &self,
        max_age: Duration,
        now: SystemTime,
        dry_run: bool,
    ) -> Result<CleanupReport> {
        let mut report = CleanupReport::default();
        if !self.dir.is_dir() {
            debug!(dir = %self.dir.display(), "output directory missing, nothing to clean");
            return Ok(report);
        }

        for entry in walkdir::WalkDir::new(&self.dir).min_depth(1).max_depth(1) {
            let entry = entry.context("Failed to read output directory")?;
            let path = entry.path();
            if !entry.file_type().is_file()
                || path.extension().and_then(|e| e.to_str()) != Some(OUTPUT_EXTENSION)
            {
                continue;
            }

            let metadata = entry
                .metadata()
                .with_context(|| format!("Failed to stat: {}", path.display()))?;
            let modified = metadata
                .modified()
                .with_context(|| format!("Failed to read mtime: {}", path.display()))?;
            // Files stamped in the future count as brand new.
            let age = now.duration_since(modified).unwrap_or(Duration::ZERO);

            if age > max_age {
                if !dry_run {
                    fs::remove_file(path)
                        .with_context(|| format!("Failed to remove: {}", path.display()))?;
                    info!(path = %path.display(), age_secs = age.as_secs(), "removed old audio file");
                }
                report.bytes_freed += metadata.len();
                report.removed.push(path.to_path_buf());
            } else {
                report.kept += 1;
            }
        }

        report.removed.sort();
        Ok(report)
    }
}
