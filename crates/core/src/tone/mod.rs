use crate::audio::AudioClip;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Gain applied to RMS energy before clamping to [0, 1].
pub const ENERGY_GAIN: f32 = 10.0;

/// Pitch reported until a real detector is plugged in (mid-range).
pub const NEUTRAL_PITCH: f32 = 0.5;

/// Speaking tempo reported until a real estimator is plugged in.
pub const DEFAULT_TEMPO_WPM: f32 = 120.0;

/// Normalized signal measurements for one clip.
///
/// `pitch` and `energy` are in [0, 1]; `tempo` is words per minute.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct ToneFeatures {
    pub pitch: f32,
    pub energy: f32,
    pub tempo: f32,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ToneError {
    #[error("audio clip contains no samples")]
    EmptyBuffer,
}

/// Pitch estimation strategy. The default stub reports a fixed mid-range
/// value; swapping in a real detector must not change downstream contracts.
pub trait PitchDetector: Send + Sync {
    /// Normalized pitch in [0, 1], low to high.
    fn estimate_pitch(&self, clip: &AudioClip) -> f32;
}

/// Speaking-rate estimation strategy, words per minute.
pub trait TempoEstimator: Send + Sync {
    fn estimate_tempo(&self, clip: &AudioClip) -> f32;
}

// TODO: replace with an autocorrelation-based detector once the DSP path
// lands.
#[derive(Clone, Copy, Debug, Default)]
pub struct NeutralPitchDetector;

impl PitchDetector for NeutralPitchDetector {
    fn estimate_pitch(&self, _clip: &AudioClip) -> f32 {
        NEUTRAL_PITCH
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct FixedTempoEstimator;

impl TempoEstimator for FixedTempoEstimator {
    fn estimate_tempo(&self, _clip: &AudioClip) -> f32 {
        DEFAULT_TEMPO_WPM
    }
}

/// Turns a clip into [`ToneFeatures`].
///
/// Energy is fully computed here (RMS of the sample magnitudes, scaled and
/// clamped); pitch and tempo come from the injected strategies.
#[derive(Clone)]
pub struct ToneExtractor {
    pitch: Arc<dyn PitchDetector>,
    tempo: Arc<dyn TempoEstimator>,
}

impl ToneExtractor {
    pub fn new() -> Self {
        Self {
            pitch: Arc::new(NeutralPitchDetector),
            tempo: Arc::new(FixedTempoEstimator),
        }
    }

    pub fn with_strategies(pitch: Arc<dyn PitchDetector>, tempo: Arc<dyn TempoEstimator>) -> Self {
        Self { pitch, tempo }
    }

    pub fn extract(&self, clip: &AudioClip) -> Result<ToneFeatures, ToneError> {
        if clip.samples.is_empty() {
            return Err(ToneError::EmptyBuffer);
        }
        Ok(ToneFeatures {
            pitch: self.pitch.estimate_pitch(clip),
            energy: rms_energy(&clip.samples),
            tempo: self.tempo.estimate_tempo(clip),
        })
    }
}

impl Default for ToneExtractor {
    fn default() -> Self {
        Self::new()
    }
}

// Caller guarantees a non-empty slice.
fn rms_energy(samples: &[f32]) -> f32 {
    let sum_squares: f32 = samples.iter().map(|s| s * s).sum();
    let rms = (sum_squares / samples.len() as f32).sqrt();
    (rms * ENERGY_GAIN).min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clip(samples: Vec<f32>) -> AudioClip {
        AudioClip::from_samples(16_000, samples).unwrap()
    }

    #[test]
    fn silence_has_zero_energy() {
        let tone = ToneExtractor::new().extract(&clip(vec![0.0; 1024])).unwrap();
        assert_eq!(tone.energy, 0.0);
    }

    #[test]
    fn low_amplitude_saturates_after_gain() {
        // RMS of an all-0.1 buffer is 0.1; the x10 gain clamps to 1.
        let tone = ToneExtractor::new().extract(&clip(vec![0.1; 1024])).unwrap();
        assert_eq!(tone.energy, 1.0);
    }

    #[test]
    fn empty_clip_is_invalid_input() {
        let err = ToneExtractor::new().extract(&clip(Vec::new())).unwrap_err();
        assert_eq!(err, ToneError::EmptyBuffer);
    }

    #[test]
    fn default_strategies_report_placeholders() {
        let tone = ToneExtractor::new().extract(&clip(vec![0.0; 64])).unwrap();
        assert_eq!(tone.pitch, NEUTRAL_PITCH);
        assert_eq!(tone.tempo, DEFAULT_TEMPO_WPM);
    }

    #[test]
    fn injected_strategies_replace_placeholders() {
        struct HighPitch;
        impl PitchDetector for HighPitch {
            fn estimate_pitch(&self, _clip: &AudioClip) -> f32 {
                0.9
            }
        }
        struct SlowTempo;
        impl TempoEstimator for SlowTempo {
            fn estimate_tempo(&self, _clip: &AudioClip) -> f32 {
                80.0
            }
        }

        let extractor = ToneExtractor::with_strategies(Arc::new(HighPitch), Arc::new(SlowTempo));
        let tone = extractor.extract(&clip(vec![0.0; 64])).unwrap();
        assert_eq!(tone.pitch, 0.9);
        assert_eq!(tone.tempo, 80.0);
    }
}
