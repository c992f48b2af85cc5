use crate::analysis::DEFAULT_CONFIDENCE;
use crate::emotion::classify_tone;
use crate::scoring::{EmotionScore, EmotionScorer, ScoringError};
use crate::tone::ToneFeatures;
use futures::future::BoxFuture;
use futures::FutureExt;

/// Offline stand-in: defers to the local rule classifier and reports the
/// placeholder confidence, ignoring the transcript.
#[derive(Clone, Copy, Debug, Default)]
pub struct DummyEmotionScorer;

impl DummyEmotionScorer {
    pub fn new() -> Self {
        Self
    }
}

impl EmotionScorer for DummyEmotionScorer {
    fn score(
        &self,
        _transcript: String,
        tone: ToneFeatures,
    ) -> BoxFuture<'_, Result<EmotionScore, ScoringError>> {
        async move {
            Ok(EmotionScore {
                emotion: classify_tone(tone),
                confidence: DEFAULT_CONFIDENCE,
            })
        }
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emotion::Emotion;

    #[tokio::test]
    async fn mirrors_the_rule_classifier() {
        let tone = ToneFeatures {
            pitch: 0.8,
            energy: 0.8,
            tempo: 120.0,
        };
        let score = DummyEmotionScorer::new()
            .score(String::new(), tone)
            .await
            .unwrap();
        assert_eq!(score.emotion, Emotion::Happy);
        assert_eq!(score.confidence, DEFAULT_CONFIDENCE);
    }
}
