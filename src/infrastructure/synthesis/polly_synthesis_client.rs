use super::synthesis_client::{ClientError, SynthesisClient, SynthesisConnector};
use crate::domain::tts::dto::preview;
use crate::domain::tts::SynthesisRequest;
use async_trait::async_trait;
use aws_sdk_polly::{
    types::{Engine, LanguageCode, OutputFormat, VoiceId},
    Client as PollyClient,
};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// AWS Polly has a limit of 3000 characters per request
const MAX_REQUEST_CHARS: usize = 3000;

/// AWS Polly implementation of the synthesis connector
pub struct PollyConnector {
    polly_client: PollyClient,
    engine: Engine,
}

impl PollyConnector {
    pub fn new(polly_client: PollyClient, engine: &str) -> Self {
        Self {
            polly_client,
            engine: Engine::from(engine),
        }
    }
}

#[async_trait]
impl SynthesisConnector for PollyConnector {
    fn provider(&self) -> &'static str {
        "polly"
    }

    fn max_request_chars(&self) -> usize {
        MAX_REQUEST_CHARS
    }

    async fn open(&self) -> Result<Arc<dyn SynthesisClient>, String> {
        // SDK clients are cheap handles over a shared connection pool
        Ok(Arc::new(PollySynthesisClient {
            polly_client: self.polly_client.clone(),
            engine: self.engine.clone(),
        }))
    }
}

pub struct PollySynthesisClient {
    polly_client: PollyClient,
    engine: Engine,
}

impl PollySynthesisClient {
    async fn call_polly(&self, request: &SynthesisRequest) -> Result<Vec<u8>, ClientError> {
        let voice_id = VoiceId::from(request.voice.as_str());
        let language_code = LanguageCode::from(request.language_code.as_str());

        tracing::debug!(
            voice_id = ?voice_id,
            language_code = ?language_code,
            engine = ?self.engine,
            output_format = "Mp3",
            text_length = request.text.len(),
            text_preview = preview(&request.text),
            "Calling AWS Polly synthesize_speech"
        );

        let result = self
            .polly_client
            .synthesize_speech()
            .text(&request.text)
            .voice_id(voice_id)
            .language_code(language_code)
            .output_format(OutputFormat::Mp3)
            .engine(self.engine.clone())
            .send()
            .await
            .map_err(|e| {
                tracing::error!(
                    error = ?e,
                    error_display = %e,
                    voice = %request.voice,
                    language_code = %request.language_code,
                    engine = ?self.engine,
                    text_length = request.text.len(),
                    "AWS Polly synthesize_speech failed"
                );
                ClientError::Service(format!("AWS Polly error: {:?}", e))
            })?;

        let audio_stream = result.audio_stream.collect().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to collect audio stream from Polly response");
            ClientError::Service(format!("Failed to read audio stream: {}", e))
        })?;

        let audio_bytes = audio_stream.into_bytes().to_vec();
        tracing::debug!(
            audio_size = audio_bytes.len(),
            "Audio stream collected successfully"
        );

        Ok(audio_bytes)
    }
}

#[async_trait]
impl SynthesisClient for PollySynthesisClient {
    async fn synthesize(
        &self,
        request: &SynthesisRequest,
        cancel: &CancellationToken,
    ) -> Result<Vec<u8>, ClientError> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(ClientError::Cancelled),
            result = self.call_polly(request) => result,
        }
    }

    async fn close(&self) -> Result<(), String> {
        Ok(())
    }
}
