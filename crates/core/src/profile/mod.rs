use crate::analysis::VoiceAnalysis;
use crate::emotion::Emotion;
use crate::tone::{ToneFeatures, DEFAULT_TEMPO_WPM, NEUTRAL_PITCH};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Aggregated summary over a batch of analyses.
///
/// Always rebuilt fresh from the full batch; there is no incremental
/// aggregation state anywhere. The distribution carries an entry for every
/// one of the eight emotions (zero-filled where absent) and its values sum
/// to 1, except via the degenerate [`VoiceProfile::neutral`] default.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct VoiceProfile {
    pub dominant_emotion: Emotion,
    pub average_tone: ToneFeatures,
    pub emotion_distribution: BTreeMap<Emotion, f64>,
}

impl VoiceProfile {
    /// Profile for a user with no recorded analyses: neutral dominates with
    /// the whole distribution mass, tone sits at the placeholder midpoints.
    pub fn neutral() -> Self {
        let mut emotion_distribution = zero_distribution();
        emotion_distribution.insert(Emotion::Neutral, 1.0);
        Self {
            dominant_emotion: Emotion::Neutral,
            average_tone: ToneFeatures {
                pitch: NEUTRAL_PITCH,
                energy: 0.5,
                tempo: DEFAULT_TEMPO_WPM,
            },
            emotion_distribution,
        }
    }
}

fn zero_distribution() -> BTreeMap<Emotion, f64> {
    Emotion::ALL.iter().map(|&e| (e, 0.0)).collect()
}

/// Build a profile from an ordered batch of analyses.
///
/// Ties for the dominant label are broken by scan order: the first label to
/// reach the running maximum keeps it until some count is strictly higher.
pub fn build_profile<'a, I>(analyses: I) -> VoiceProfile
where
    I: IntoIterator<Item = &'a VoiceAnalysis>,
{
    let mut total = 0usize;
    let mut pitch_sum = 0.0f32;
    let mut energy_sum = 0.0f32;
    let mut tempo_sum = 0.0f32;
    // Counts keyed by first appearance, so the later dominance scan sees
    // labels in the order the batch introduced them.
    let mut counts: Vec<(Emotion, usize)> = Vec::new();

    for analysis in analyses {
        total += 1;
        pitch_sum += analysis.tone.pitch;
        energy_sum += analysis.tone.energy;
        tempo_sum += analysis.tone.tempo;
        match counts.iter_mut().find(|(e, _)| *e == analysis.emotion) {
            Some((_, n)) => *n += 1,
            None => counts.push((analysis.emotion, 1)),
        }
    }

    if total == 0 {
        return VoiceProfile::neutral();
    }

    let mut dominant_emotion = Emotion::Neutral;
    let mut max_count = 0usize;
    for &(emotion, n) in &counts {
        if n > max_count {
            max_count = n;
            dominant_emotion = emotion;
        }
    }

    let mut emotion_distribution = zero_distribution();
    for &(emotion, n) in &counts {
        emotion_distribution.insert(emotion, n as f64 / total as f64);
    }

    let denom = total as f32;
    VoiceProfile {
        dominant_emotion,
        average_tone: ToneFeatures {
            pitch: pitch_sum / denom,
            energy: energy_sum / denom,
            tempo: tempo_sum / denom,
        },
        emotion_distribution,
    }
}
