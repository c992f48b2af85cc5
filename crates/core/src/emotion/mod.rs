mod classifier;

pub use classifier::classify_tone;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed set of emotional labels. The presentation layer maps each variant
/// to a visual theme, so classification must never produce anything outside
/// this set.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Happy,
    Sad,
    Romantic,
    Motivational,
    Peaceful,
    Angry,
    Nostalgic,
    Neutral,
}

impl Emotion {
    pub const ALL: [Emotion; 8] = [
        Emotion::Happy,
        Emotion::Sad,
        Emotion::Romantic,
        Emotion::Motivational,
        Emotion::Peaceful,
        Emotion::Angry,
        Emotion::Nostalgic,
        Emotion::Neutral,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Emotion::Happy => "happy",
            Emotion::Sad => "sad",
            Emotion::Romantic => "romantic",
            Emotion::Motivational => "motivational",
            Emotion::Peaceful => "peaceful",
            Emotion::Angry => "angry",
            Emotion::Nostalgic => "nostalgic",
            Emotion::Neutral => "neutral",
        }
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
