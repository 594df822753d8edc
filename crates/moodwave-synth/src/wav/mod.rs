//! Deterministic WAV encoding.
//!
//! Writes 16-bit PCM mono WAV files with a fixed 44-byte header and no
//! timestamps or other variable metadata, so identical buffers always encode
//! to identical bytes. The BLAKE3 hash of the PCM payload identifies a
//! rendering independently of its container.

mod format;
mod pcm;
mod result;
mod writer;


pub use format::WavFormat;
pub use pcm::{compute_pcm_hash, extract_pcm_data};
pub use result::WavResult;
pub use writer::{samples_to_pcm16, write_wav, write_wav_to_vec, WAV_HEADER_LEN};
