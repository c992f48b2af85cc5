mod loader;

pub use loader::load_wav_clip;

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// One captured audio buffer: mono samples in [-1, 1] at a fixed rate.
///
/// Clips are caller-owned; the engine never retains them across calls.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AudioClip {
    pub sample_rate_hz: u32,
    pub samples: Vec<f32>,
    pub duration: Duration,
}

impl AudioClip {
    pub fn from_samples(sample_rate_hz: u32, samples: Vec<f32>) -> Result<Self, AudioError> {
        if sample_rate_hz == 0 {
            return Err(AudioError::ZeroSampleRate);
        }
        let duration = duration_from_sample_count(sample_rate_hz, samples.len());
        Ok(Self {
            sample_rate_hz,
            samples,
            duration,
        })
    }
}

#[derive(thiserror::Error, Debug)]
pub enum AudioError {
    #[error("sample rate must be > 0")]
    ZeroSampleRate,

    #[error("unreadable audio file: {0}")]
    UnreadableFile(String),

    #[error("invalid pcm data: {0}")]
    InvalidPcm(String),
}

/// Parse raw little-endian f32 PCM, as piped into the CLI.
pub fn parse_f32le(raw: &[u8]) -> Result<Vec<f32>, AudioError> {
    if raw.len() % 4 != 0 {
        return Err(AudioError::InvalidPcm(format!(
            "f32le byte length must be multiple of 4, got {}",
            raw.len()
        )));
    }
    let mut out = Vec::with_capacity(raw.len() / 4);
    for chunk in raw.chunks_exact(4) {
        out.push(f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]));
    }
    Ok(out)
}

/// Clamp-and-scale conversion for the 16-bit upload payload.
pub fn f32_to_i16_pcm(samples: &[f32]) -> Vec<i16> {
    samples
        .iter()
        .map(|&s| (s.clamp(-1.0, 1.0) * 32767.0) as i16)
        .collect()
}

pub fn duration_from_sample_count(sample_rate_hz: u32, samples: usize) -> Duration {
    if sample_rate_hz == 0 {
        return Duration::from_secs(0);
    }
    let micros = (u128::from(samples as u64) * 1_000_000u128) / u128::from(sample_rate_hz);
    Duration::from_micros(micros.min(u128::from(u64::MAX)) as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clip_duration_mono_16k() {
        let clip = AudioClip::from_samples(16_000, vec![0.0; 16_000]).unwrap();
        assert_eq!(clip.duration.as_secs(), 1);
    }

    #[test]
    fn clip_rejects_zero_sample_rate() {
        let err = AudioClip::from_samples(0, vec![0.0]).unwrap_err();
        assert!(matches!(err, AudioError::ZeroSampleRate));
    }

    #[test]
    fn parse_f32le_rejects_non_multiple_of_4() {
        let err = parse_f32le(&[0, 1, 2]).unwrap_err();
        let s = err.to_string();
        assert!(s.contains("multiple of 4"));
    }

    #[test]
    fn parse_f32le_roundtrip() {
        let input = [0.0f32, -0.5f32, 1.0f32];
        let mut raw = Vec::new();
        for f in input {
            raw.extend_from_slice(&f.to_le_bytes());
        }
        let out = parse_f32le(&raw).unwrap();
        assert_eq!(out.len(), 3);
        for (a, b) in out.iter().zip(input.iter()) {
            assert!((a - b).abs() < 1e-6);
        }
    }

    #[test]
    fn f32_to_i16_clamps_out_of_range() {
        let v = f32_to_i16_pcm(&[-2.0, -1.0, 0.0, 1.0, 2.0]);
        assert_eq!(v[0], -32767);
        assert_eq!(v[1], -32767);
        assert_eq!(v[2], 0);
        assert_eq!(v[3], 32767);
        assert_eq!(v[4], 32767);
    }
}
