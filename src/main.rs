use anyhow::Context;
use clap::Parser;
use longform_tts::domain::tts::{assemble, SynthesisOrchestrator, TtsService};
use longform_tts::error::AppError;
use longform_tts::infrastructure::config::{Config, LogFormat, Provider};
use longform_tts::infrastructure::files::{read_text, write_chunks, write_once};
use longform_tts::infrastructure::synthesis::{OpenAiConnector, PollyConnector, SynthesisConnector};
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "longform-tts")]
#[command(about = "Synthesize a long text document into a single audio file")]
struct Cli {
    /// The path of a file of text
    #[arg(short = 't', long = "text")]
    text: PathBuf,

    /// The path of the output file, or `-` for stdout
    #[arg(short = 'o', long = "out")]
    out: PathBuf,

    /// The voice to use
    #[arg(short = 'v', long = "voice")]
    voice: Option<String>,

    /// The language code of the voice
    #[arg(short = 'l', long = "language-code")]
    language_code: Option<String>,

    /// Maximum characters per synthesis request
    #[arg(long = "max-chunk-chars")]
    max_chunk_chars: Option<NonZeroUsize>,

    /// Maximum synthesis requests in flight (default: one per chunk)
    #[arg(long = "concurrency")]
    concurrency: Option<NonZeroUsize>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("An error occurred when loading the configuration: {e}");
            std::process::exit(2);
        }
    };

    init_logging(&config);

    if let Err(e) = run(cli, config).await {
        let code = e
            .downcast_ref::<AppError>()
            .map(AppError::exit_code)
            .unwrap_or(1);
        tracing::error!(error = format!("{e:#}"), "An error occurred when synthesizing the document");
        std::process::exit(code);
    }
}

async fn run(cli: Cli, config: Config) -> anyhow::Result<()> {
    let voice = cli.voice.unwrap_or_else(|| config.voice_or_default());
    let language_code = cli.language_code.unwrap_or_else(|| config.language_code.clone());
    let max_chunk_chars = cli.max_chunk_chars.unwrap_or(config.max_chunk_chars);
    let max_concurrency = cli.concurrency.or(config.max_concurrency);

    let connector = build_connector(&config).await?;
    tracing::info!(
        provider = connector.provider(),
        voice = %voice,
        language_code = %language_code,
        "Synthesis connector initialized"
    );

    let tts_service = TtsService::new(
        SynthesisOrchestrator::new(connector, max_concurrency),
        max_chunk_chars,
    );

    let text = read_text(&cli.text).await?;
    let chunks = tts_service.chunk_document(&text);

    let cancel = CancellationToken::new();
    let ctrl_c_token = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupt received, cancelling synthesis");
            ctrl_c_token.cancel();
        }
    });

    let audio = tts_service
        .synthesize_chunks(&chunks, &voice, &language_code, &cancel)
        .await
        .map_err(AppError::from)?;

    if cli.out.as_os_str() == "-" {
        let mut stdout = tokio::io::stdout();
        write_once(&mut stdout, &assemble(&audio))
            .await
            .map_err(|e| AppError::io("<stdout>", e))?;
        return Ok(());
    }

    let report = write_chunks(&cli.out, &audio).await?;
    tracing::info!(
        path = %cli.out.display(),
        written = report.written,
        failed = report.failed,
        "Audio written"
    );

    Ok(())
}

async fn build_connector(config: &Config) -> anyhow::Result<Arc<dyn SynthesisConnector>> {
    match config.provider {
        Provider::Polly => {
            tracing::info!("Initializing AWS Polly client with region: {}", config.aws_region);

            let aws_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
                .region(aws_config::Region::new(config.aws_region.clone()))
                .load()
                .await;

            let polly_client = aws_sdk_polly::Client::new(&aws_config);
            Ok(Arc::new(PollyConnector::new(polly_client, &config.polly_engine)))
        }
        Provider::OpenAi => {
            let api_key = config
                .openai_api_key
                .clone()
                .ok_or_else(|| AppError::Config("OPENAI_API_KEY is not set".to_string()))
                .context("OpenAI provider selected")?;

            let client = async_openai::Client::with_config(
                async_openai::config::OpenAIConfig::new().with_api_key(api_key),
            );
            Ok(Arc::new(OpenAiConnector::new(
                Arc::new(client),
                config.openai_tts_model.clone(),
            )))
        }
    }
}

fn init_logging(config: &Config) {
    // Logs go to stderr so `--out -` keeps stdout for audio
    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "longform_tts=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "longform_tts=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().pretty().with_writer(std::io::stderr))
            .init();
    }
}
