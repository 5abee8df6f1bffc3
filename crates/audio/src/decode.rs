use std::io::Read;
use std::path::Path;

use hound::{SampleFormat, WavReader};

use crate::buffer::AudioBuffer;
use crate::error::AudioError;
use crate::resample::resample;

/// Decode behavior derived from configuration
#[derive(Debug, Clone, Copy)]
pub struct DecodeOptions {
    /// Rate the decoded buffer must end up at
    pub target_sample_rate: u32,
    /// Resample mismatched input instead of leaving it at the source rate
    pub resample: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            target_sample_rate: 16_000,
            resample: true,
        }
    }
}

/// Decode a WAV byte stream into a mono buffer
///
/// Supports 16/24/32-bit integer PCM and 32-bit float, mono or stereo.
/// Stereo is downmixed by averaging channels. Samples are peak normalized
/// to [-1, 1]; silence is left untouched. When the container rate differs
/// from the target and resampling is enabled, the output is resampled.
pub fn decode_wav(reader: impl Read, options: DecodeOptions) -> Result<AudioBuffer, AudioError> {
    let mut wav = WavReader::new(reader).map_err(|e| AudioError::Decode(format!("invalid WAV header: {e}")))?;
    let spec = wav.spec();

    if spec.channels == 0 {
        return Err(AudioError::Decode("no channels in WAV header".into()));
    }

    let interleaved = read_samples(&mut wav)?;

    let channels = usize::from(spec.channels);
    let mut samples = if channels == 1 {
        interleaved
    } else {
        interleaved
            .chunks(channels)
            .map(|frame| frame.iter().sum::<f32>() / frame.len() as f32)
            .collect()
    };

    if samples.is_empty() {
        return Err(AudioError::Decode("no audio samples decoded".into()));
    }

    normalize(&mut samples);

    let mut sample_rate = spec.sample_rate;
    if sample_rate != options.target_sample_rate && options.resample {
        tracing::debug!(
            source_rate = sample_rate,
            target_rate = options.target_sample_rate,
            "resampling upload"
        );
        samples = resample(&samples, sample_rate, options.target_sample_rate)?;
        sample_rate = options.target_sample_rate;
    }

    AudioBuffer::new(samples, sample_rate).ok_or_else(|| AudioError::Decode("no audio samples decoded".into()))
}

/// Decode a WAV file from disk
pub fn decode_wav_file(path: &Path, options: DecodeOptions) -> Result<AudioBuffer, AudioError> {
    let file = std::fs::File::open(path)
        .map_err(|e| AudioError::Decode(format!("failed to open {}: {e}", path.display())))?;
    decode_wav(std::io::BufReader::new(file), options)
}

/// Read all samples as interleaved f32 in [-1, 1]
fn read_samples<R: Read>(wav: &mut WavReader<R>) -> Result<Vec<f32>, AudioError> {
    let spec = wav.spec();

    match (spec.sample_format, spec.bits_per_sample) {
        (SampleFormat::Float, 32) => wav
            .samples::<f32>()
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| AudioError::Decode(format!("corrupt sample data: {e}"))),
        (SampleFormat::Int, 16) => wav
            .samples::<i16>()
            .map(|s| s.map(|s| f32::from(s) / f32::from(i16::MAX)))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| AudioError::Decode(format!("corrupt sample data: {e}"))),
        (SampleFormat::Int, bits @ (24 | 32)) => {
            let scale = (1_i64 << (bits - 1)) as f32;
            wav.samples::<i32>()
                .map(|s| s.map(|s| s as f32 / scale))
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| AudioError::Decode(format!("corrupt sample data: {e}")))
        }
        (format, bits) => Err(AudioError::Decode(format!(
            "unsupported sample format: {bits}-bit {format:?}"
        ))),
    }
}

/// Scale so the loudest sample sits at full scale
fn normalize(samples: &mut [f32]) {
    let peak = samples.iter().fold(0.0_f32, |acc, s| acc.max(s.abs()));
    if peak > 0.0 {
        for sample in samples.iter_mut() {
            *sample /= peak;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    /// Write an in-memory WAV with the given layout, filled with a 440 Hz tone
    fn tone_wav(sample_rate: u32, channels: u16, frames: u32) -> Vec<u8> {
        let spec = hound::WavSpec {
            channels,
            sample_rate,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        let mut bytes = Cursor::new(Vec::new());
        let mut writer = hound::WavWriter::new(&mut bytes, spec).unwrap();
        for i in 0..frames {
            let t = f64::from(i) / f64::from(sample_rate);
            let value = (0.5 * (2.0 * std::f64::consts::PI * 440.0 * t).sin() * f64::from(i16::MAX)) as i16;
            for _ in 0..channels {
                writer.write_sample(value).unwrap();
            }
        }
        writer.finalize().unwrap();
        bytes.into_inner()
    }

    #[test]
    fn mono_16khz_roundtrip_sample_count() {
        let wav = tone_wav(16_000, 1, 80_000);
        let buffer = decode_wav(Cursor::new(wav), DecodeOptions::default()).unwrap();
        assert_eq!(buffer.len(), 80_000);
        assert_eq!(buffer.sample_rate(), 16_000);
        assert!((buffer.duration_seconds() - 5.0).abs() < 1e-9);
    }

    #[test]
    fn stereo_downmixes_to_mono() {
        let wav = tone_wav(16_000, 2, 16_000);
        let buffer = decode_wav(Cursor::new(wav), DecodeOptions::default()).unwrap();
        // One output sample per frame, not per channel
        assert_eq!(buffer.len(), 16_000);
    }

    #[test]
    fn peak_normalized_to_full_scale() {
        let wav = tone_wav(16_000, 1, 16_000);
        let buffer = decode_wav(Cursor::new(wav), DecodeOptions::default()).unwrap();
        let peak = buffer.samples().iter().fold(0.0_f32, |acc, s| acc.max(s.abs()));
        assert!((peak - 1.0).abs() < 1e-6, "peak: {peak}");
    }

    #[test]
    fn silence_stays_silent() {
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: 16_000,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        let mut bytes = Cursor::new(Vec::new());
        let mut writer = hound::WavWriter::new(&mut bytes, spec).unwrap();
        for _ in 0..1_600 {
            writer.write_sample(0_i16).unwrap();
        }
        writer.finalize().unwrap();

        let buffer = decode_wav(Cursor::new(bytes.into_inner()), DecodeOptions::default()).unwrap();
        assert!(buffer.samples().iter().all(|&s| s == 0.0));
    }

    #[test]
    fn mismatched_rate_resamples_to_target() {
        let wav = tone_wav(44_100, 1, 44_100);
        let buffer = decode_wav(Cursor::new(wav), DecodeOptions::default()).unwrap();
        assert_eq!(buffer.sample_rate(), 16_000);
        // 1s of input stays 1s of output
        assert!((buffer.duration_seconds() - 1.0).abs() < 0.01, "{}", buffer.duration_seconds());
    }

    #[test]
    fn resampling_disabled_keeps_source_rate() {
        let wav = tone_wav(44_100, 1, 4_410);
        let options = DecodeOptions {
            target_sample_rate: 16_000,
            resample: false,
        };
        let buffer = decode_wav(Cursor::new(wav), options).unwrap();
        assert_eq!(buffer.sample_rate(), 44_100);
    }

    #[test]
    fn float_wav_decodes() {
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: 16_000,
            bits_per_sample: 32,
            sample_format: SampleFormat::Float,
        };
        let mut bytes = Cursor::new(Vec::new());
        let mut writer = hound::WavWriter::new(&mut bytes, spec).unwrap();
        for i in 0..1_600_u32 {
            let t = f64::from(i) / 16_000.0;
            writer
                .write_sample((2.0 * std::f64::consts::PI * 440.0 * t).sin() as f32 * 0.25)
                .unwrap();
        }
        writer.finalize().unwrap();

        let buffer = decode_wav(Cursor::new(bytes.into_inner()), DecodeOptions::default()).unwrap();
        assert_eq!(buffer.len(), 1_600);
    }

    #[test]
    fn garbage_bytes_fail_with_decode_error() {
        let err = decode_wav(Cursor::new(b"this is not audio".to_vec()), DecodeOptions::default()).unwrap_err();
        assert!(matches!(err, AudioError::Decode(_)));
    }

    #[test]
    fn empty_data_chunk_fails() {
        let wav = tone_wav(16_000, 1, 0);
        let err = decode_wav(Cursor::new(wav), DecodeOptions::default()).unwrap_err();
        assert!(matches!(err, AudioError::Decode(_)));
    }

    #[test]
    fn missing_file_fails_with_decode_error() {
        let err = decode_wav_file(Path::new("/nonexistent/clip.wav"), DecodeOptions::default()).unwrap_err();
        assert!(matches!(err, AudioError::Decode(_)));
    }
}
