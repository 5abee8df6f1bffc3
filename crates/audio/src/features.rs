use std::sync::Arc;

use rustfft::{Fft, FftPlanner, num_complex::Complex};
use serde::Serialize;

use crate::buffer::AudioBuffer;
use crate::error::AudioError;

/// Analysis frame length in samples
///
/// Frame size, hop, window, and filterbank shape are part of the output
/// contract: identical input bytes must produce identical features.
pub const FRAME_SIZE: usize = 2048;

/// Hop between successive frames in samples
pub const HOP_SIZE: usize = 512;

/// Number of cepstral coefficients reported
pub const NUM_MFCC: usize = 13;

/// Number of triangular mel filterbank bands
const NUM_MEL_BANDS: usize = 40;

/// One-sided spectrum length for the analysis frame
const NUM_BINS: usize = FRAME_SIZE / 2 + 1;

/// Floor applied to mel energies before taking the log
const LOG_FLOOR: f64 = 1e-10;

/// Scalar audio descriptors for one clip
///
/// Immutable once produced. Values are rounded at production time:
/// MFCCs and centroid to 2 decimal places, zero-crossing rate to 3.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureSet {
    /// Mean of the first 13 MFCCs across frames
    pub mfccs_mean: Vec<f64>,
    /// Mean spectral centroid across frames, in Hz
    pub spectral_centroid_mean: f64,
    /// Mean fraction of sign changes per frame
    pub zero_crossing_rate_mean: f64,
}

/// Framed spectral analysis over a fixed FFT plan
///
/// Holds the planned FFT, the periodic Hann window, the mel filterbank,
/// and the DCT-II basis, so per-frame work is matrix application only.
pub struct FeatureExtractor {
    fft: Arc<dyn Fft<f64>>,
    window: Vec<f64>,
    mel_bank: Vec<Vec<f64>>,
    dct: Vec<Vec<f64>>,
    sample_rate: u32,
}

impl FeatureExtractor {
    pub fn new(sample_rate: u32) -> Self {
        let fft = FftPlanner::<f64>::new().plan_fft_forward(FRAME_SIZE);

        let window = (0..FRAME_SIZE)
            .map(|i| 0.5 * (1.0 - (2.0 * std::f64::consts::PI * i as f64 / FRAME_SIZE as f64).cos()))
            .collect();

        Self {
            fft,
            window,
            mel_bank: mel_filterbank(sample_rate),
            dct: dct_basis(),
            sample_rate,
        }
    }

    /// Compute the feature set for a decoded buffer
    ///
    /// Clips shorter than one frame are zero padded to a single frame;
    /// otherwise only full frames are analyzed and the tail past the last
    /// full frame is dropped.
    pub fn extract(&self, buffer: &AudioBuffer) -> Result<FeatureSet, AudioError> {
        if buffer.sample_rate() != self.sample_rate {
            return Err(AudioError::Extraction(format!(
                "extractor built for {} Hz, buffer is {} Hz",
                self.sample_rate,
                buffer.sample_rate()
            )));
        }

        let samples = buffer.samples();

        let mut padded = Vec::new();
        let frames: Vec<&[f32]> = if samples.len() < FRAME_SIZE {
            padded.extend_from_slice(samples);
            padded.resize(FRAME_SIZE, 0.0);
            vec![&padded[..]]
        } else {
            (0..=samples.len() - FRAME_SIZE)
                .step_by(HOP_SIZE)
                .map(|start| &samples[start..start + FRAME_SIZE])
                .collect()
        };

        if frames.is_empty() {
            return Err(AudioError::Extraction("no analysis frames".into()));
        }

        let mut mfcc_sums = vec![0.0_f64; NUM_MFCC];
        let mut centroid_sum = 0.0_f64;
        let mut zcr_sum = 0.0_f64;

        let mut spectrum = vec![Complex::new(0.0, 0.0); FRAME_SIZE];
        let mut power = vec![0.0_f64; NUM_BINS];

        for frame in &frames {
            for ((slot, sample), weight) in spectrum.iter_mut().zip(frame.iter()).zip(&self.window) {
                *slot = Complex::new(f64::from(*sample) * weight, 0.0);
            }
            self.fft.process(&mut spectrum);

            let mut centroid_num = 0.0;
            let mut centroid_den = 0.0;
            for (k, (bin, slot)) in spectrum.iter().take(NUM_BINS).zip(power.iter_mut()).enumerate() {
                let magnitude = bin.norm();
                let frequency = f64::from(self.sample_rate) * k as f64 / FRAME_SIZE as f64;
                centroid_num += frequency * magnitude;
                centroid_den += magnitude;
                *slot = magnitude * magnitude;
            }
            if centroid_den > 0.0 {
                centroid_sum += centroid_num / centroid_den;
            }

            let log_mel: Vec<f64> = self
                .mel_bank
                .iter()
                .map(|filter| {
                    let energy: f64 = filter.iter().zip(&power).map(|(weight, p)| weight * p).sum();
                    energy.max(LOG_FLOOR).ln()
                })
                .collect();

            for (sum, row) in mfcc_sums.iter_mut().zip(&self.dct) {
                *sum += row.iter().zip(&log_mel).map(|(basis, e)| basis * e).sum::<f64>();
            }

            let crossings = frame
                .windows(2)
                .filter(|pair| (pair[0] >= 0.0) != (pair[1] >= 0.0))
                .count();
            zcr_sum += crossings as f64 / frame.len() as f64;
        }

        let count = frames.len() as f64;

        Ok(FeatureSet {
            mfccs_mean: mfcc_sums.iter().map(|sum| round_to(sum / count, 2)).collect(),
            spectral_centroid_mean: round_to(centroid_sum / count, 2),
            zero_crossing_rate_mean: round_to(zcr_sum / count, 3),
        })
    }
}

/// Compute the feature set with a fresh extractor
pub fn extract(buffer: &AudioBuffer) -> Result<FeatureSet, AudioError> {
    FeatureExtractor::new(buffer.sample_rate()).extract(buffer)
}

fn hz_to_mel(hz: f64) -> f64 {
    2595.0 * (1.0 + hz / 700.0).log10()
}

fn mel_to_hz(mel: f64) -> f64 {
    700.0 * (10.0_f64.powf(mel / 2595.0) - 1.0)
}

/// Triangular filters evenly spaced on the HTK mel scale, 0 Hz to Nyquist
fn mel_filterbank(sample_rate: u32) -> Vec<Vec<f64>> {
    let mel_max = hz_to_mel(f64::from(sample_rate) / 2.0);

    let bin_of = |band: usize| -> usize {
        let hz = mel_to_hz(mel_max * band as f64 / (NUM_MEL_BANDS + 1) as f64);
        ((FRAME_SIZE as f64 + 1.0) * hz / f64::from(sample_rate)).floor() as usize
    };

    let mut bank = vec![vec![0.0; NUM_BINS]; NUM_MEL_BANDS];
    for (m, filter) in bank.iter_mut().enumerate() {
        let lo = bin_of(m);
        let mid = bin_of(m + 1);
        let hi = bin_of(m + 2);

        for k in lo..mid.min(NUM_BINS) {
            filter[k] = (k - lo) as f64 / (mid - lo).max(1) as f64;
        }
        for k in mid..hi.min(NUM_BINS) {
            filter[k] = (hi - k) as f64 / (hi - mid).max(1) as f64;
        }
    }
    bank
}

/// Orthonormal DCT-II rows for the first `NUM_MFCC` coefficients
fn dct_basis() -> Vec<Vec<f64>> {
    let n = NUM_MEL_BANDS as f64;
    (0..NUM_MFCC)
        .map(|k| {
            let scale = if k == 0 { (1.0 / n).sqrt() } else { (2.0 / n).sqrt() };
            (0..NUM_MEL_BANDS)
                .map(|j| scale * (std::f64::consts::PI * k as f64 * (j as f64 + 0.5) / n).cos())
                .collect()
        })
        .collect()
}

fn round_to(value: f64, places: u32) -> f64 {
    let factor = f64::from(10_u32.pow(places));
    (value * factor).round() / factor
}
