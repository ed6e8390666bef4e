use serde::Deserialize;
use std::env;
use std::num::NonZeroUsize;

pub const DEFAULT_LANGUAGE_CODE: &str = "en-US";
pub const DEFAULT_MAX_CHUNK_CHARS: NonZeroUsize = match NonZeroUsize::new(4500) {
    Some(n) => n,
    None => panic!("chunk size must be positive"),
};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub provider: Provider,
    pub voice: Option<String>,
    pub language_code: String,
    pub max_chunk_chars: NonZeroUsize,
    pub max_concurrency: Option<NonZeroUsize>,
    pub log_format: LogFormat,
    // AWS Polly
    pub aws_region: String,
    pub polly_engine: String,
    // OpenAI
    pub openai_api_key: Option<String>,
    pub openai_tts_model: String,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Polly,
    OpenAi,
}

impl Provider {
    /// Voice used when neither the CLI nor the environment names one
    pub fn default_voice(&self) -> &'static str {
        match self {
            Provider::Polly => "Joanna",
            Provider::OpenAi => "alloy",
        }
    }
}

impl std::str::FromStr for Provider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "polly" => Ok(Provider::Polly),
            "openai" => Ok(Provider::OpenAi),
            other => Err(format!("unknown TTS provider: {other}")),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        let config = Config {
            provider: env::var("TTS_PROVIDER")
                .unwrap_or_else(|_| "polly".to_string())
                .parse()?,
            voice: env::var("TTS_VOICE").ok().filter(|v| !v.is_empty()),
            language_code: env::var("TTS_LANGUAGE_CODE")
                .unwrap_or_else(|_| DEFAULT_LANGUAGE_CODE.to_string()),
            max_chunk_chars: parse_non_zero(
                "TTS_MAX_CHUNK_CHARS",
                env::var("TTS_MAX_CHUNK_CHARS").ok(),
            )?
            .unwrap_or(DEFAULT_MAX_CHUNK_CHARS),
            max_concurrency: parse_non_zero(
                "TTS_MAX_CONCURRENCY",
                env::var("TTS_MAX_CONCURRENCY").ok(),
            )?,
            log_format: env::var("LOG_FORMAT")
                .unwrap_or_else(|_| "pretty".to_string())
                .parse::<String>()
                .map(|s| match s.as_str() {
                    "json" => LogFormat::Json,
                    _ => LogFormat::Pretty,
                })?,
            aws_region: env::var("AWS_REGION").unwrap_or_else(|_| "eu-west-1".to_string()),
            polly_engine: env::var("POLLY_ENGINE").unwrap_or_else(|_| "neural".to_string()),
            openai_api_key: env::var("OPENAI_API_KEY").ok(),
            openai_tts_model: env::var("OPENAI_TTS_MODEL")
                .unwrap_or_else(|_| "tts-1".to_string()),
        };

        Ok(config)
    }

    /// Configured voice, or the provider's default
    pub fn voice_or_default(&self) -> String {
        self.voice
            .clone()
            .unwrap_or_else(|| self.provider.default_voice().to_string())
    }
}

fn parse_non_zero(name: &str, value: Option<String>) -> Result<Option<NonZeroUsize>, String> {
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => raw
            .parse::<NonZeroUsize>()
            .map(Some)
            .map_err(|e| format!("{name} must be a positive integer, got {raw:?}: {e}")),
    }
}
