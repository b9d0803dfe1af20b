//! WAV persistence: 16-bit PCM mono out, 16-bit or float of any channel count in.

use std::io::{Read, Seek, Write};
use std::path::Path;

use tracing::{debug, info};

use crate::error::Result;
use crate::wave::WaveBuffer;

/// Full-scale multiplier for 16-bit output.
const I16_SCALE: f32 = 32767.0;

/// Headroom divisor applied when a buffer peaks above full scale.
const NORMALISE_HEADROOM: f32 = 1.05;

/// Write `buffer` to `path` as 16-bit mono PCM.
///
/// Buffers peaking above 1.0 are first divided by `peak * 1.05`; quieter
/// buffers are written unscaled.
pub fn save_wav(path: impl AsRef<Path>, buffer: &WaveBuffer) -> Result<()> {
    let path = path.as_ref();
    let writer = hound::WavWriter::create(path, wav_spec(buffer.sample_rate()))?;
    write_samples(writer, buffer)?;
    info!(path = %path.display(), samples = buffer.len(), "wrote WAV");
    Ok(())
}

/// [`save_wav`] into any seekable writer.
pub fn write_wav<W: Write + Seek>(writer: W, buffer: &WaveBuffer) -> Result<()> {
    let writer = hound::WavWriter::new(writer, wav_spec(buffer.sample_rate()))?;
    write_samples(writer, buffer)
}

/// Read a WAV file as mono, averaging channels.
pub fn load_wav(path: impl AsRef<Path>) -> Result<WaveBuffer> {
    let path = path.as_ref();
    let reader = hound::WavReader::open(path)?;
    let buffer = decode(reader)?;
    info!(path = %path.display(), samples = buffer.len(), "read WAV");
    Ok(buffer)
}

/// [`load_wav`] from any reader.
pub fn read_wav<R: Read>(reader: R) -> Result<WaveBuffer> {
    decode(hound::WavReader::new(reader)?)
}

fn wav_spec(sample_rate: u32) -> hound::WavSpec {
    hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    }
}

fn write_samples<W: Write + Seek>(mut writer: hound::WavWriter<W>, buffer: &WaveBuffer) -> Result<()> {
    let peak = buffer.peak();
    let gain = if peak > 1.0 {
        debug!(peak, "normalising before write");
        1.0 / (peak * NORMALISE_HEADROOM)
    } else {
        1.0
    };
    for &sample in buffer.samples() {
        writer.write_sample((sample * gain * I16_SCALE) as i16)?;
    }
    writer.finalize()?;
    Ok(())
}

fn decode<R: Read>(wav: hound::WavReader<R>) -> Result<WaveBuffer> {
    let spec = wav.spec();
    let channels = spec.channels.max(1) as usize;

    let raw: Vec<f32> = match spec.sample_format {
        hound::SampleFormat::Int => {
            let max_val = (1u32 << (spec.bits_per_sample - 1)) as f32;
            wav.into_samples::<i32>()
                .map(|s| s.map(|v| v as f32 / max_val))
                .collect::<std::result::Result<Vec<f32>, _>>()?
        }
        hound::SampleFormat::Float => wav
            .into_samples::<f32>()
            .collect::<std::result::Result<Vec<f32>, _>>()?,
    };

    let mono = raw
        .chunks_exact(channels)
        .map(|frame| frame.iter().sum::<f32>() / channels as f32)
        .collect();
    Ok(WaveBuffer::from_mono(mono, spec.sample_rate))
}
