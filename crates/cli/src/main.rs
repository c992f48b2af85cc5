#![deny(warnings)]

use anyhow::Context;
use clap::{ArgGroup, Parser};
use std::sync::Arc;
use std::time::SystemTime;
use tracing_subscriber::EnvFilter;
use url::Url;
use verse_aura_core::analysis::{ClipReport, VoiceAnalyzer};
use verse_aura_core::audio::{load_wav_clip, parse_f32le, AudioClip};
use verse_aura_core::config::{
    resolve_api_key, resolve_optional_string, resolve_string_with_default, ApiKeys, AppConfig,
    Env, HistoryCapacity, InputSource, SampleRate, StdEnv, DEFAULT_HISTORY_CAPACITY,
    DEFAULT_SAMPLE_RATE_HZ, DEFAULT_SCORING_ENDPOINT, DEFAULT_SPEECH_ENDPOINT, ENV_LANGUAGE,
    ENV_SCORING_API_KEY, ENV_SCORING_ENDPOINT, ENV_SPEECH_API_KEY, ENV_SPEECH_ENDPOINT,
};
use verse_aura_core::scoring::{DummyEmotionScorer, RemoteEmotionScorer};
use verse_aura_core::session::Session;
use verse_aura_core::tone::ToneExtractor;
use verse_aura_core::transcribe::{DummyTranscriber, RemoteTranscriber};

#[derive(Parser, Debug)]
#[command(name = "verse-aura")]
#[command(about = "Voice-tone emotion analysis and poem recommendation queries")]
#[command(group(
    ArgGroup::new("input")
        .required(true)
        .multiple(false)
        .args(["wav", "raw_pcm"])
))]
struct Args {
    /// WAV clip to analyze; repeat for a batch.
    #[arg(long)]
    wav: Vec<String>,

    /// Read one clip of raw little-endian f32 PCM from stdin.
    #[arg(long)]
    raw_pcm: bool,

    /// Sample rate of raw PCM input (WAV files carry their own).
    #[arg(long, default_value_t = DEFAULT_SAMPLE_RATE_HZ)]
    sample_rate_hz: u32,

    #[arg(long)]
    speech_api_key: Option<String>,

    #[arg(long)]
    scoring_api_key: Option<String>,

    #[arg(long)]
    speech_endpoint: Option<String>,

    #[arg(long)]
    scoring_endpoint: Option<String>,

    /// Language hint forwarded to the transcription service.
    #[arg(long)]
    language: Option<String>,

    #[arg(long, default_value_t = DEFAULT_HISTORY_CAPACITY)]
    history_capacity: usize,

    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_level)?;

    let env = StdEnv;
    let cfg = build_config(args, &env)?;

    tracing::info!(
        sample_rate_hz = cfg.sample_rate.as_hz(),
        history_capacity = cfg.history.get(),
        "config loaded"
    );

    run(cfg).await
}

async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let clips = load_clips(&cfg).await?;
    let analyzer = build_analyzer(&cfg)?;

    let mut session = Session::with_capacity(cfg.history.get());
    let mut reports: Vec<ClipReport> = Vec::with_capacity(clips.len());
    for clip in &clips {
        let report = analyzer.analyze_clip(clip).await?;
        tracing::info!(
            emotion = %report.analysis.emotion,
            energy = report.analysis.tone.energy,
            "clip analyzed"
        );
        session.record(report.analysis.clone());
        reports.push(report);
    }

    let profile = session.profile();
    let out = serde_json::json!({
        "reports": reports,
        "profile": profile,
    });
    println!("{}", serde_json::to_string_pretty(&out)?);

    Ok(())
}

async fn load_clips(cfg: &AppConfig) -> anyhow::Result<Vec<AudioClip>> {
    match &cfg.input {
        InputSource::WavFiles(paths) => {
            let mut clips = Vec::with_capacity(paths.len());
            for path in paths {
                let clip =
                    load_wav_clip(path).with_context(|| format!("failed to load {path}"))?;
                clips.push(clip);
            }
            Ok(clips)
        }
        InputSource::RawPcm => {
            use tokio::io::AsyncReadExt;
            let mut raw = Vec::new();
            tokio::io::stdin()
                .read_to_end(&mut raw)
                .await
                .context("failed to read stdin")?;
            let samples = parse_f32le(&raw)?;
            Ok(vec![AudioClip::from_samples(
                cfg.sample_rate.as_hz(),
                samples,
            )?])
        }
    }
}

fn build_analyzer(cfg: &AppConfig) -> anyhow::Result<VoiceAnalyzer> {
    let mut analyzer = VoiceAnalyzer::new(ToneExtractor::new());

    analyzer = match &cfg.api_keys.speech {
        Some(key) => {
            let endpoint =
                Url::parse(&cfg.speech_endpoint).context("invalid speech endpoint")?;
            analyzer.with_transcriber(Arc::new(RemoteTranscriber::new(
                key.expose().to_owned(),
                endpoint,
                cfg.language.clone(),
            )))
        }
        None => analyzer.with_transcriber(Arc::new(DummyTranscriber::new())),
    };

    analyzer = match &cfg.api_keys.scoring {
        Some(key) => {
            let endpoint =
                Url::parse(&cfg.scoring_endpoint).context("invalid scoring endpoint")?;
            analyzer.with_scorer(Arc::new(RemoteEmotionScorer::new(
                key.expose().to_owned(),
                endpoint,
            )))
        }
        None => analyzer.with_scorer(Arc::new(DummyEmotionScorer::new())),
    };

    Ok(analyzer)
}

fn init_tracing(level: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::builder()
        .with_default_directive(
            level
                .parse()
                .with_context(|| format!("invalid --log-level: {level}"))?,
        )
        .from_env_lossy();

    tracing_subscriber::fmt().with_env_filter(filter).init();
    Ok(())
}

fn build_config(args: Args, env: &impl Env) -> anyhow::Result<AppConfig> {
    let input = if args.raw_pcm {
        InputSource::RawPcm
    } else if !args.wav.is_empty() {
        InputSource::WavFiles(args.wav)
    } else {
        anyhow::bail!("one of --wav or --raw-pcm must be provided");
    };

    let sample_rate = SampleRate::new(args.sample_rate_hz)?;
    let history = HistoryCapacity::new(args.history_capacity)?;

    let speech = resolve_api_key(args.speech_api_key, ENV_SPEECH_API_KEY, env)?;
    let scoring = resolve_api_key(args.scoring_api_key, ENV_SCORING_API_KEY, env)?;

    let speech_endpoint = resolve_string_with_default(
        args.speech_endpoint,
        ENV_SPEECH_ENDPOINT,
        env,
        DEFAULT_SPEECH_ENDPOINT,
    );
    let scoring_endpoint = resolve_string_with_default(
        args.scoring_endpoint,
        ENV_SCORING_ENDPOINT,
        env,
        DEFAULT_SCORING_ENDPOINT,
    );
    let language = resolve_optional_string(args.language, ENV_LANGUAGE, env);

    Ok(AppConfig {
        input,
        sample_rate,
        api_keys: ApiKeys { speech, scoring },
        speech_endpoint,
        scoring_endpoint,
        language,
        history,
        start_time: SystemTime::now(),
    })
}
