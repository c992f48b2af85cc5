use crate::audio::AudioClip;
use crate::emotion::{classify_tone, Emotion};
use crate::recommend::recommendation_queries;
use crate::scoring::{EmotionScore, EmotionScorer};
use crate::tone::{ToneError, ToneExtractor, ToneFeatures};
use crate::transcribe::{TranscriptSegment, TranscriptionBackend};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Placeholder confidence attached to every analysis until a calibrated
/// score exists upstream.
pub const DEFAULT_CONFIDENCE: f32 = 0.75;

/// The result of analyzing one clip. Immutable once produced and owned by
/// the caller; the engine keeps nothing.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct VoiceAnalysis {
    pub emotion: Emotion,
    pub confidence: f32,
    pub tone: ToneFeatures,
    pub recommendations: Vec<String>,
}

/// One clip's analysis plus whatever the optional collaborators returned.
/// A collaborator failure leaves its field `None`; the analysis itself is
/// always present.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ClipReport {
    pub analysis: VoiceAnalysis,
    pub transcript: Option<TranscriptSegment>,
    pub model_score: Option<EmotionScore>,
}

#[derive(thiserror::Error, Debug)]
pub enum AnalyzeError {
    #[error(transparent)]
    Tone(#[from] ToneError),
}

/// Orchestrates one clip end to end: tone extraction, rule classification,
/// recommendations, and the optional remote collaborators.
pub struct VoiceAnalyzer {
    extractor: ToneExtractor,
    transcriber: Option<Arc<dyn TranscriptionBackend>>,
    scorer: Option<Arc<dyn EmotionScorer>>,
}

impl VoiceAnalyzer {
    pub fn new(extractor: ToneExtractor) -> Self {
        Self {
            extractor,
            transcriber: None,
            scorer: None,
        }
    }

    pub fn with_transcriber(mut self, transcriber: Arc<dyn TranscriptionBackend>) -> Self {
        self.transcriber = Some(transcriber);
        self
    }

    pub fn with_scorer(mut self, scorer: Arc<dyn EmotionScorer>) -> Self {
        self.scorer = Some(scorer);
        self
    }

    /// The pure, synchronous path: no collaborators, no suspension points.
    pub fn analyze_tone(&self, clip: &AudioClip) -> Result<VoiceAnalysis, AnalyzeError> {
        let tone = self.extractor.extract(clip)?;
        Ok(analysis_from_tone(tone))
    }

    /// Full analysis of one clip. The remote collaborators are awaited
    /// after the pure path has already produced its result, so their
    /// failures degrade to `None` fields instead of errors.
    pub async fn analyze_clip(&self, clip: &AudioClip) -> Result<ClipReport, AnalyzeError> {
        let analysis = self.analyze_tone(clip)?;

        let transcript = match &self.transcriber {
            Some(transcriber) => match transcriber.transcribe(clip.clone()).await {
                Ok(segment) => Some(segment),
                Err(e) => {
                    tracing::warn!(error = %e, "transcription failed");
                    None
                }
            },
            None => None,
        };

        let model_score = match &self.scorer {
            Some(scorer) => {
                let text = transcript
                    .as_ref()
                    .map(|t| t.text.clone())
                    .unwrap_or_default();
                match scorer.score(text, analysis.tone).await {
                    Ok(score) => Some(score),
                    Err(e) => {
                        tracing::warn!(error = %e, "emotion scoring failed");
                        None
                    }
                }
            }
            None => None,
        };

        Ok(ClipReport {
            analysis,
            transcript,
            model_score,
        })
    }
}

fn analysis_from_tone(tone: ToneFeatures) -> VoiceAnalysis {
    let emotion = classify_tone(tone);
    VoiceAnalysis {
        emotion,
        confidence: DEFAULT_CONFIDENCE,
        tone,
        recommendations: recommendation_queries(emotion, DEFAULT_CONFIDENCE),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::{DummyEmotionScorer, ScoringError};
    use crate::transcribe::{DummyTranscriber, TranscribeError};
    use futures::future::BoxFuture;
    use futures::FutureExt;

    fn loud_clip() -> AudioClip {
        // RMS 0.1 saturates to energy 1.0 after gain; with the neutral
        // pitch placeholder that lands in the motivational rule.
        AudioClip::from_samples(16_000, vec![0.1; 1024]).unwrap()
    }

    #[test]
    fn pure_path_attaches_placeholder_confidence_and_queries() {
        let analyzer = VoiceAnalyzer::new(ToneExtractor::new());
        let analysis = analyzer.analyze_tone(&loud_clip()).unwrap();
        assert_eq!(analysis.emotion, Emotion::Motivational);
        assert_eq!(analysis.confidence, DEFAULT_CONFIDENCE);
        assert_eq!(
            analysis.recommendations[0],
            "Poems with motivational emotion"
        );
        assert_eq!(analysis.recommendations.len(), 3);
    }

    #[test]
    fn empty_clip_is_rejected() {
        let analyzer = VoiceAnalyzer::new(ToneExtractor::new());
        let clip = AudioClip::from_samples(16_000, Vec::new()).unwrap();
        let err = analyzer.analyze_tone(&clip).unwrap_err();
        assert!(matches!(err, AnalyzeError::Tone(ToneError::EmptyBuffer)));
    }

    #[tokio::test]
    async fn collaborators_fill_the_optional_fields() {
        let analyzer = VoiceAnalyzer::new(ToneExtractor::new())
            .with_transcriber(Arc::new(DummyTranscriber::new()))
            .with_scorer(Arc::new(DummyEmotionScorer::new()));
        let report = analyzer.analyze_clip(&loud_clip()).await.unwrap();
        assert_eq!(report.analysis.emotion, Emotion::Motivational);
        assert!(report.transcript.is_some());
        let score = report.model_score.unwrap();
        assert_eq!(score.emotion, Emotion::Motivational);
    }

    struct FailingTranscriber;

    impl TranscriptionBackend for FailingTranscriber {
        fn transcribe(
            &self,
            _clip: AudioClip,
        ) -> BoxFuture<'_, Result<crate::transcribe::TranscriptSegment, TranscribeError>> {
            async { Err(TranscribeError::Api(503, "overloaded".to_owned())) }.boxed()
        }
    }

    struct FailingScorer;

    impl EmotionScorer for FailingScorer {
        fn score(
            &self,
            _transcript: String,
            _tone: ToneFeatures,
        ) -> BoxFuture<'_, Result<EmotionScore, ScoringError>> {
            async { Err(ScoringError::Api(500, "model unavailable".to_owned())) }.boxed()
        }
    }

    #[tokio::test]
    async fn collaborator_failures_do_not_lose_the_analysis() {
        let analyzer = VoiceAnalyzer::new(ToneExtractor::new())
            .with_transcriber(Arc::new(FailingTranscriber))
            .with_scorer(Arc::new(FailingScorer));
        let report = analyzer.analyze_clip(&loud_clip()).await.unwrap();
        assert_eq!(report.analysis.emotion, Emotion::Motivational);
        assert_eq!(report.analysis.confidence, DEFAULT_CONFIDENCE);
        assert!(report.transcript.is_none());
        assert!(report.model_score.is_none());
    }

    #[tokio::test]
    async fn without_collaborators_the_report_is_analysis_only() {
        let analyzer = VoiceAnalyzer::new(ToneExtractor::new());
        let report = analyzer.analyze_clip(&loud_clip()).await.unwrap();
        assert!(report.transcript.is_none());
        assert!(report.model_score.is_none());
    }
}
