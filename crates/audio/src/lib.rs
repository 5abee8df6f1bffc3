#![allow(
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_const_for_fn,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]

//! Audio decoding, validation, and feature extraction
//!
//! The pipeline this crate serves is: decode a WAV upload into a mono
//! [`AudioBuffer`] at the target sample rate, validate it against the
//! configured constraints, then compute a fixed set of spectral features.

mod buffer;
mod decode;
mod error;
mod features;
mod resample;
mod validate;

pub use buffer::AudioBuffer;
pub use decode::{DecodeOptions, decode_wav, decode_wav_file};
pub use error::{AudioError, Result};
pub use features::{FRAME_SIZE, FeatureExtractor, FeatureSet, HOP_SIZE, NUM_MFCC, extract};
pub use validate::{DurationLimits, ValidationError, validate, validate_buffer, validate_format};
