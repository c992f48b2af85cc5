use crate::emotion::Emotion;
use crate::tone::ToneFeatures;

// Ordered decision list over (energy, pitch); the first matching rule wins.
// Several ranges overlap (high energy with pitch in (0.6, 0.7) satisfies
// both the happy and motivational rules), so list position is part of the
// contract. All comparisons are strict.
const RULES: &[(fn(f32, f32) -> bool, Emotion)] = &[
    (|e, p| e > 0.7 && p > 0.6, Emotion::Happy),
    (|e, p| e < 0.4 && p < 0.4, Emotion::Sad),
    (|e, p| e > 0.5 && e < 0.7 && p > 0.5, Emotion::Romantic),
    (|e, p| e > 0.7 && p > 0.4 && p < 0.7, Emotion::Motivational),
    (|e, p| e < 0.5 && p > 0.4 && p < 0.6, Emotion::Peaceful),
    (|e, p| e > 0.7 && p < 0.5, Emotion::Angry),
    (|e, p| e > 0.4 && e < 0.6 && p < 0.5, Emotion::Nostalgic),
];

/// Map tone features to an emotional label.
///
/// Pure and total: same input, same output, never fails. Tempo is carried
/// in [`ToneFeatures`] but does not participate in the current rules.
pub fn classify_tone(tone: ToneFeatures) -> Emotion {
    let (e, p) = (tone.energy, tone.pitch);
    for (rule, emotion) in RULES {
        if rule(e, p) {
            return *emotion;
        }
    }
    Emotion::Neutral
}
