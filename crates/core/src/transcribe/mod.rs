mod dummy;
mod remote;

pub use dummy::DummyTranscriber;
pub use remote::RemoteTranscriber;

use crate::audio::AudioClip;
use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct TranscriptSegment {
    pub text: String,
    pub audio_duration: Duration,
    pub confidence: Option<f32>,
}

#[derive(thiserror::Error, Debug)]
pub enum TranscribeError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("speech api error {0}: {1}")]
    Api(u16, String),

    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// External speech-to-text collaborator. Failures here are non-fatal to
/// clip analysis; the pure tone path proceeds without a transcript.
pub trait TranscriptionBackend: Send + Sync {
    fn transcribe(
        &self,
        clip: AudioClip,
    ) -> BoxFuture<'_, Result<TranscriptSegment, TranscribeError>>;
}
