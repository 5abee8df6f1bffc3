//! Synthetic WAV clips for end-to-end tests

/// Render a 440 Hz sine tone as an in-memory 16-bit PCM WAV
pub fn sine_wav(sample_rate: u32, channels: u16, seconds: f64) -> Vec<u8> {
    let spec = hound::WavSpec {
        channels,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut bytes = std::io::Cursor::new(Vec::new());
    let mut writer = hound::WavWriter::new(&mut bytes, spec).unwrap();

    let frames = (seconds * f64::from(sample_rate)).round() as u32;
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
