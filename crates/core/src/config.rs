use serde::{Deserialize, Serialize};
use std::{fmt, time::SystemTime};

pub const DEFAULT_SAMPLE_RATE_HZ: u32 = 44_100;
pub const DEFAULT_HISTORY_CAPACITY: usize = 256;
pub const DEFAULT_SPEECH_ENDPOINT: &str = "https://api.verseaura.io/v1/transcribe";
pub const DEFAULT_SCORING_ENDPOINT: &str = "https://api.verseaura.io/v1/emotion-score";
pub const ENV_SPEECH_API_KEY: &str = "VERSEAURA_SPEECH_API_KEY";
pub const ENV_SCORING_API_KEY: &str = "VERSEAURA_SCORING_API_KEY";
pub const ENV_SPEECH_ENDPOINT: &str = "VERSEAURA_SPEECH_ENDPOINT";
pub const ENV_SCORING_ENDPOINT: &str = "VERSEAURA_SCORING_ENDPOINT";
pub const ENV_LANGUAGE: &str = "VERSEAURA_LANGUAGE";

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum InputSource {
    /// One or more WAV clips read from disk.
    WavFiles(Vec<String>),
    /// A single clip of raw little-endian f32 PCM on stdin.
    RawPcm,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SampleRate(u32);

impl SampleRate {
    pub fn new(hz: u32) -> Result<Self, ConfigError> {
        if hz == 0 {
            return Err(ConfigError::ZeroSampleRate);
        }
        Ok(Self(hz))
    }

    pub fn as_hz(&self) -> u32 {
        self.0
    }
}

impl Default for SampleRate {
    fn default() -> Self {
        Self(DEFAULT_SAMPLE_RATE_HZ)
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HistoryCapacity(usize);

impl HistoryCapacity {
    pub fn new(capacity: usize) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::ZeroHistoryCapacity);
        }
        Ok(Self(capacity))
    }

    pub fn get(&self) -> usize {
        self.0
    }
}

impl Default for HistoryCapacity {
    fn default() -> Self {
        Self(DEFAULT_HISTORY_CAPACITY)
    }
}

#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new<S: Into<String>>(value: S) -> Result<Self, ConfigError> {
        let v = value.into();
        if v.trim().is_empty() {
            return Err(ConfigError::EmptyApiKey);
        }
        Ok(Self(v))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(**redacted**)")
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiKeys {
    pub speech: Option<ApiKey>,
    pub scoring: Option<ApiKey>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppConfig {
    pub input: InputSource,
    pub sample_rate: SampleRate,
    pub api_keys: ApiKeys,
    pub speech_endpoint: String,
    pub scoring_endpoint: String,
    pub language: Option<String>,
    pub history: HistoryCapacity,
    pub start_time: SystemTime,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("api key must not be empty")]
    EmptyApiKey,
    #[error("sample rate must be > 0")]
    ZeroSampleRate,
    #[error("history capacity must be > 0")]
    ZeroHistoryCapacity,
}

pub trait Env {
    fn var(&self, key: &str) -> Option<String>;
}

#[derive(Clone, Debug, Default)]
pub struct StdEnv;

impl Env for StdEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

#[derive(Clone, Debug, Default)]
pub struct MapEnv {
    vars: std::collections::BTreeMap<String, String>,
}

impl MapEnv {
    pub fn with_var(mut self, key: &str, value: &str) -> Self {
        self.vars.insert(key.to_owned(), value.to_owned());
        self
    }
}

impl Env for MapEnv {
    fn var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}

pub fn resolve_api_key(
    cli_value: Option<String>,
    env_key: &str,
    env: &impl Env,
) -> Result<Option<ApiKey>, ConfigError> {
    match cli_value {
        Some(v) => Ok(Some(ApiKey::new(v)?)),
        None => match env.var(env_key) {
            Some(v) => Ok(Some(ApiKey::new(v)?)),
            None => Ok(None),
        },
    }
}

pub fn resolve_string_with_default(
    cli_value: Option<String>,
    env_key: &str,
    env: &impl Env,
    default: &str,
) -> String {
    match cli_value {
        Some(v) => v,
        None => env.var(env_key).unwrap_or_else(|| default.to_owned()),
    }
}

pub fn resolve_optional_string(
    cli_value: Option<String>,
    env_key: &str,
    env: &impl Env,
) -> Option<String> {
    match cli_value {
        Some(v) => Some(v),
        None => env.var(env_key),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_key_cli_takes_precedence_over_env() {
        let env = MapEnv::default().with_var(ENV_SPEECH_API_KEY, "env-key");
        let key = resolve_api_key(Some("cli-key".to_owned()), ENV_SPEECH_API_KEY, &env)
            .expect("valid key")
            .expect("present");
        assert_eq!(key.expose(), "cli-key");
    }

    #[test]
    fn api_key_env_used_when_cli_missing() {
        let env = MapEnv::default().with_var(ENV_SPEECH_API_KEY, "env-key");
        let key = resolve_api_key(None, ENV_SPEECH_API_KEY, &env)
            .expect("valid key")
            .expect("present");
        assert_eq!(key.expose(), "env-key");
    }

    #[test]
    fn api_key_absent_when_neither_set() {
        let env = MapEnv::default();
        let key = resolve_api_key(None, ENV_SPEECH_API_KEY, &env).expect("no error");
        assert!(key.is_none());
    }

    #[test]
    fn api_key_debug_is_redacted() {
        let key = ApiKey::new("super-secret").expect("valid key");
        let rendered = format!("{key:?}");
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("redacted"));
    }

    #[test]
    fn zero_sample_rate_is_rejected() {
        assert_eq!(SampleRate::new(0).unwrap_err(), ConfigError::ZeroSampleRate);
        assert_eq!(SampleRate::new(16_000).unwrap().as_hz(), 16_000);
    }

    #[test]
    fn zero_history_capacity_is_rejected() {
        assert_eq!(
            HistoryCapacity::new(0).unwrap_err(),
            ConfigError::ZeroHistoryCapacity
        );
        assert_eq!(HistoryCapacity::default().get(), DEFAULT_HISTORY_CAPACITY);
    }

    #[test]
    fn resolve_string_with_default_cli_takes_precedence() {
        let env = MapEnv::default().with_var(ENV_SPEECH_ENDPOINT, "env");
        let v = resolve_string_with_default(
            Some("cli".to_owned()),
            ENV_SPEECH_ENDPOINT,
            &env,
            DEFAULT_SPEECH_ENDPOINT,
        );
        assert_eq!(v, "cli");
    }

    #[test]
    fn resolve_string_with_default_env_used_when_cli_missing() {
        let env = MapEnv::default().with_var(ENV_SPEECH_ENDPOINT, "env");
        let v = resolve_string_with_default(None, ENV_SPEECH_ENDPOINT, &env, DEFAULT_SPEECH_ENDPOINT);
        assert_eq!(v, "env");
    }

    #[test]
    fn resolve_string_with_default_default_used_when_both_missing() {
        let env = MapEnv::default();
        let v = resolve_string_with_default(None, ENV_SPEECH_ENDPOINT, &env, DEFAULT_SPEECH_ENDPOINT);
        assert_eq!(v, DEFAULT_SPEECH_ENDPOINT);
    }

    #[test]
    fn resolve_optional_string_falls_back_to_env() {
        let env = MapEnv::default().with_var(ENV_LANGUAGE, "en-US");
        assert_eq!(
            resolve_optional_string(None, ENV_LANGUAGE, &env),
            Some("en-US".to_owned())
        );
        assert_eq!(resolve_optional_string(None, ENV_LANGUAGE, &MapEnv::default()), None);
    }
}
