//! 16-bit PCM WAV helpers

use std::io::{Cursor, Seek, Write};
use std::path::Path;

use hound::{SampleFormat, WavSpec, WavWriter};
use tracing::debug;

use super::interface::AudioError;

fn pcm16_spec(sample_rate: u32) -> WavSpec {
    WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    }
}

/// Clip to [-1, 1] and scale to i16
pub fn to_pcm16(sample: f32) -> i16 {
    (sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16
}

fn write_pcm16<W: Write + Seek>(
    writer: W,
    samples: &[f32],
    sample_rate: u32,
) -> Result<(), AudioError> {
    let mut wav = WavWriter::new(writer, pcm16_spec(sample_rate))?;
    for &sample in samples {
        wav.write_sample(to_pcm16(sample))?;
    }
    wav.finalize()?;
    Ok(())
}

/// Write mono f32 samples as a 16-bit PCM WAV file
pub fn write_pcm16_wav(path: &Path, samples: &[f32], sample_rate: u32) -> Result<(), AudioError> {
    let file = std::io::BufWriter::new(std::fs::File::create(path)?);
    write_pcm16(file, samples, sample_rate)?;
    debug!("Wrote {} samples @ {} Hz to {}", samples.len(), sample_rate, path.display());
    Ok(())
}

/// Encode mono f32 samples as an in-memory 16-bit PCM WAV
pub fn encode_pcm16_wav(samples: &[f32], sample_rate: u32) -> Result<Vec<u8>, AudioError> {
    let mut cursor = Cursor::new(Vec::new());
    write_pcm16(&mut cursor, samples, sample_rate)?;
    Ok(cursor.into_inner())
}

/// Read any WAV file as mono f32 samples, returning them with the sample rate
pub fn read_wav_mono(path: &Path) -> Result<(Vec<f32>, u32), AudioError> {
    let mut reader = hound::WavReader::open(path)?;
    let spec = reader.spec();

    let samples: Vec<f32> = match spec.sample_format {
        SampleFormat::Float => reader.samples::<f32>().collect::<Result<_, _>>()?,
        SampleFormat::Int => {
            let max_val = (1i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .samples::<i32>()
                .map(|s| s.map(|s| s as f32 / max_val))
                .collect::<Result<_, _>>()?
        }
    };

    let mono = if spec.channels > 1 {
        samples
            .chunks(spec.channels as usize)
            .map(|chunk| chunk.iter().sum::<f32>() / chunk.len() as f32)
            .collect()
    } else {
        samples
    };

    Ok((mono, spec.sample_rate))
}
