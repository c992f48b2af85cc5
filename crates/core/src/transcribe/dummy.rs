use crate::audio::AudioClip;
use crate::transcribe::{TranscribeError, TranscriptSegment, TranscriptionBackend};
use futures::future::BoxFuture;
use futures::FutureExt;

/// Offline stand-in: reports an empty transcript with the clip's duration.
#[derive(Clone, Copy, Debug, Default)]
pub struct DummyTranscriber;

impl DummyTranscriber {
    pub fn new() -> Self {
        Self
    }
}

impl TranscriptionBackend for DummyTranscriber {
    fn transcribe(
        &self,
        clip: AudioClip,
    ) -> BoxFuture<'_, Result<TranscriptSegment, TranscribeError>> {
        async move {
            Ok(TranscriptSegment {
                text: String::new(),
                audio_duration: clip.duration,
                confidence: None,
            })
        }
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn reports_clip_duration_and_empty_text() {
        let clip = AudioClip::from_samples(16_000, vec![0.0; 16_000]).unwrap();
        let segment = DummyTranscriber::new().transcribe(clip).await.unwrap();
        assert_eq!(segment.text, "");
        assert_eq!(segment.audio_duration.as_secs(), 1);
        assert_eq!(segment.confidence, None);
    }
}
