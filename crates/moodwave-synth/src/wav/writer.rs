//! RIFF/WAVE writing and PCM conversion.

use std::io::{self, Write};

use super::format::WavFormat;

/// Size of the canonical header emitted by [`write_wav`].
pub const WAV_HEADER_LEN: usize = 44;

/// Writes a complete WAV file: RIFF header, `fmt ` chunk, `data` chunk.
///
/// # Arguments
/// * `writer` - Destination for the encoded bytes
/// * `format` - Channel count, sample rate and bit depth for the header
/// * `pcm_data` - Little-endian PCM payload, written as the `data` chunk
///
/// # Returns
/// An `InvalidInput` error if the payload exceeds 4 GiB, otherwise any
/// error raised by `writer`
pub fn write_wav<W: Write>(
    writer: &mut W,
    format: &WavFormat,
    pcm_data: &[u8],
) -> io::Result<()> {
    let data_size = u32::try_from(pcm_data.len())
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "PCM data exceeds 4 GiB"))?;
    // RIFF size excludes the 8-byte "RIFF" + size prefix.
    let riff_size = (WAV_HEADER_LEN as u32 - 8) + data_size;

    writer.write_all(b"RIFF")?;
    writer.write_all(&riff_size.to_le_bytes())?;
    writer.write_all(b"WAVE")?;

    writer.write_all(b"fmt ")?;
    writer.write_all(&16u32.to_le_bytes())?;
    writer.write_all(&1u16.to_le_bytes())?; // PCM
    writer.write_all(&format.channels.to_le_bytes())?;
    writer.write_all(&format.sample_rate.to_le_bytes())?;
    writer.write_all(&format.byte_rate().to_le_bytes())?;
    writer.write_all(&format.block_align().to_le_bytes())?;
    writer.write_all(&format.bits_per_sample.to_le_bytes())?;

    writer.write_all(b"data")?;
    writer.write_all(&data_size.to_le_bytes())?;
    writer.write_all(pcm_data)?;

    Ok(())
}

/// Encodes a WAV file into memory.
pub fn write_wav_to_vec(format: &WavFormat, pcm_data: &[u8]) -> io::Result<Vec<u8>> {
    let mut buffer = Vec::with_capacity(WAV_HEADER_LEN + pcm_data.len());
    write_wav(&mut buffer, format, pcm_data)?;
    Ok(buffer)
}

/// Converts samples in [-1.0, 1.0] to little-endian 16-bit PCM.
///
/// Out-of-range values are clipped.
pub fn samples_to_pcm16(samples: &[f64]) -> Vec<u8> {
    let mut pcm = Vec::with_capacity(samples.len() * 2);
    for &sample in samples {
        let value = (sample.clamp(-1.0, 1.0) * 32767.0).round() as i16;
        pcm.extend_from_slice(&value.to_le_bytes());
    }
    pcm
}
