use crate::scoring::{EmotionScore, EmotionScorer, ScoringError};
use crate::tone::ToneFeatures;
use crate::util::retry::{is_http_retryable, retry_with_backoff, RetryConfig};
use futures::future::BoxFuture;
use futures::FutureExt;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;

/// Client for the generative emotion-scoring service: transcript and tone
/// go out as JSON, a labeled score comes back.
#[derive(Clone)]
pub struct RemoteEmotionScorer {
    client: Client,
    api_key: String,
    endpoint: Url,
    retry: RetryConfig,
}

impl RemoteEmotionScorer {
    pub fn new(api_key: String, endpoint: Url) -> Self {
        Self {
            client: Client::new(),
            api_key,
            endpoint,
            retry: RetryConfig::default(),
        }
    }

    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }
}

#[derive(Clone, Serialize)]
struct ScoreRequest {
    transcript: String,
    pitch: f32,
    energy: f32,
    tempo: f32,
}

#[derive(Deserialize)]
struct ScoreResponse {
    emotion: crate::emotion::Emotion,
    confidence: f32,
}

impl EmotionScorer for RemoteEmotionScorer {
    fn score(
        &self,
        transcript: String,
        tone: ToneFeatures,
    ) -> BoxFuture<'_, Result<EmotionScore, ScoringError>> {
        let this = self.clone();
        async move {
            let payload = ScoreRequest {
                transcript,
                pitch: tone.pitch,
                energy: tone.energy,
                tempo: tone.tempo,
            };

            let request = || {
                let client = this.client.clone();
                let endpoint = this.endpoint.clone();
                let api_key = this.api_key.clone();
                let payload = payload.clone();
                async move {
                    let response = client
                        .post(endpoint)
                        .header("Authorization", format!("Bearer {api_key}"))
                        .json(&payload)
                        .send()
                        .await?;
                    if !response.status().is_success() {
                        let status = response.status().as_u16();
                        let text = response
                            .text()
                            .await
                            .unwrap_or_else(|_| "unknown error".to_owned());
                        return Err(ScoringError::Api(status, text));
                    }
                    // An unknown emotion label is a contract violation, not
                    // a transient fault.
                    response
                        .json::<ScoreResponse>()
                        .await
                        .map_err(|e| ScoringError::InvalidResponse(e.to_string()))
                }
            };

            let parsed = retry_with_backoff(&this.retry, request, |e: &ScoringError| match e {
                ScoringError::Http(_) => true,
                ScoringError::Api(status, _) => is_http_retryable(*status),
                ScoringError::InvalidResponse(_) => false,
            })
            .await?;

            tracing::debug!(emotion = %parsed.emotion, "model score received");

            Ok(EmotionScore {
                emotion: parsed.emotion,
                confidence: parsed.confidence,
            })
        }
        .boxed()
    }
}
