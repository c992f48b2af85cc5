mod dummy;
mod remote;

pub use dummy::DummyEmotionScorer;
pub use remote::RemoteEmotionScorer;

use crate::emotion::Emotion;
use crate::tone::ToneFeatures;
use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};

/// Label and confidence from the generative scoring service.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct EmotionScore {
    pub emotion: Emotion,
    pub confidence: f32,
}

#[derive(thiserror::Error, Debug)]
pub enum ScoringError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("scoring api error {0}: {1}")]
    Api(u16, String),

    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// External large-model emotion scoring over transcript plus tone.
/// Failures here are non-fatal; the rule classifier's label stands alone.
pub trait EmotionScorer: Send + Sync {
    fn score(
        &self,
        transcript: String,
        tone: ToneFeatures,
    ) -> BoxFuture<'_, Result<EmotionScore, ScoringError>>;
}
