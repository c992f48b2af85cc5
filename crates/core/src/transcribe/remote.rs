use crate::audio::{f32_to_i16_pcm, AudioClip};
use crate::transcribe::{TranscribeError, TranscriptSegment, TranscriptionBackend};
use crate::util::retry::{is_http_retryable, retry_with_backoff, RetryConfig};
use bytes::Bytes;
use futures::future::BoxFuture;
use futures::FutureExt;
use reqwest::Client;
use serde::Deserialize;
use url::Url;

/// Client for the hosted speech-to-text service. Uploads the clip as
/// 16-bit little-endian PCM and retries transient failures.
#[derive(Clone)]
pub struct RemoteTranscriber {
    client: Client,
    api_key: String,
    endpoint: Url,
    language: Option<String>,
    retry: RetryConfig,
}

impl RemoteTranscriber {
    pub fn new(api_key: String, endpoint: Url, language: Option<String>) -> Self {
        Self {
            client: Client::new(),
            api_key,
            endpoint,
            language,
            retry: RetryConfig::default(),
        }
    }

    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }
}

#[derive(Deserialize)]
struct SpeechResponse {
    transcript: String,
    confidence: Option<f32>,
}

impl TranscriptionBackend for RemoteTranscriber {
    fn transcribe(
        &self,
        clip: AudioClip,
    ) -> BoxFuture<'_, Result<TranscriptSegment, TranscribeError>> {
        let this = self.clone();
        async move {
            let pcm = f32_to_i16_pcm(&clip.samples);
            let mut raw = Vec::with_capacity(pcm.len() * 2);
            for s in &pcm {
                raw.extend_from_slice(&s.to_le_bytes());
            }
            // Bytes clones are cheap, so each retry attempt can re-send the
            // same payload without copying it.
            let body = Bytes::from(raw);

            let request = || {
                let client = this.client.clone();
                let endpoint = this.endpoint.clone();
                let api_key = this.api_key.clone();
                let language = this.language.clone();
                let body = body.clone();
                let sample_rate_hz = clip.sample_rate_hz;
                async move {
                    let mut builder = client
                        .post(endpoint)
                        .header("Authorization", format!("Bearer {api_key}"))
                        .header("Content-Type", "application/octet-stream")
                        .query(&[("sample_rate_hz", sample_rate_hz.to_string())]);
                    if let Some(lang) = language {
                        builder = builder.query(&[("language", lang)]);
                    }
                    let response = builder.body(body).send().await?;
                    if !response.status().is_success() {
                        let status = response.status().as_u16();
                        let text = response
                            .text()
                            .await
                            .unwrap_or_else(|_| "unknown error".to_owned());
                        return Err(TranscribeError::Api(status, text));
                    }
                    response
                        .json::<SpeechResponse>()
                        .await
                        .map_err(|e| TranscribeError::InvalidResponse(e.to_string()))
                }
            };

            let parsed = retry_with_backoff(&this.retry, request, |e: &TranscribeError| match e {
                TranscribeError::Http(_) => true,
                TranscribeError::Api(status, _) => is_http_retryable(*status),
                TranscribeError::InvalidResponse(_) => false,
            })
            .await?;

            tracing::debug!(chars = parsed.transcript.len(), "transcript received");

            Ok(TranscriptSegment {
                text: parsed.transcript,
                audio_duration: clip.duration,
                confidence: parsed.confidence,
            })
        }
        .boxed()
    }
}
