use super::synthesis_client::{ClientError, SynthesisClient, SynthesisConnector};
use crate::domain::tts::dto::preview;
use crate::domain::tts::SynthesisRequest;
use async_openai::{
    config::OpenAIConfig,
    types::{CreateSpeechRequest, SpeechModel, Voice},
    Client,
};
use async_trait::async_trait;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// OpenAI has a limit of 4096 characters per request
const MAX_REQUEST_CHARS: usize = 4096;

/// OpenAI speech implementation of the synthesis connector
pub struct OpenAiConnector {
    client: Arc<Client<OpenAIConfig>>,
    model: String,
}

impl OpenAiConnector {
    pub fn new(client: Arc<Client<OpenAIConfig>>, model: String) -> Self {
        Self { client, model }
    }
}

#[async_trait]
impl SynthesisConnector for OpenAiConnector {
    fn provider(&self) -> &'static str {
        "openai"
    }

    fn max_request_chars(&self) -> usize {
        MAX_REQUEST_CHARS
    }

    async fn open(&self) -> Result<Arc<dyn SynthesisClient>, String> {
        Ok(Arc::new(OpenAiSynthesisClient {
            client: self.client.clone(),
            model: parse_model(&self.model),
            model_name: self.model.clone(),
        }))
    }
}

pub struct OpenAiSynthesisClient {
    client: Arc<Client<OpenAIConfig>>,
    model: SpeechModel,
    model_name: String,
}

fn parse_model(model: &str) -> SpeechModel {
    match model {
        "tts-1" => SpeechModel::Tts1,
        "tts-1-hd" => SpeechModel::Tts1Hd,
        other => SpeechModel::Other(other.to_string()),
    }
}

/// Map a voice name onto the fixed OpenAI voice set
fn parse_voice(voice: &str) -> Option<Voice> {
    match voice.to_lowercase().as_str() {
        "alloy" => Some(Voice::Alloy),
        "echo" => Some(Voice::Echo),
        "fable" => Some(Voice::Fable),
        "onyx" => Some(Voice::Onyx),
        "nova" => Some(Voice::Nova),
        "shimmer" => Some(Voice::Shimmer),
        _ => None,
    }
}

impl OpenAiSynthesisClient {
    async fn call_openai(&self, request: &SynthesisRequest) -> Result<Vec<u8>, ClientError> {
        let voice = parse_voice(&request.voice).ok_or_else(|| {
            ClientError::Service(format!("unsupported OpenAI voice: {}", request.voice))
        })?;

        // The speech endpoint infers language from the input text
        tracing::debug!(
            model = %self.model_name,
            voice = %request.voice,
            language_code = %request.language_code,
            text_length = request.text.len(),
            text_preview = preview(&request.text),
            "Calling OpenAI TTS API"
        );

        let speech_request = CreateSpeechRequest {
            model: self.model.clone(),
            input: request.text.clone(),
            voice,
            response_format: None, // Defaults to MP3
            speed: None,
        };

        let response = self
            .client
            .audio()
            .speech(speech_request)
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    model = %self.model_name,
                    voice = %request.voice,
                    text_length = request.text.len(),
                    "OpenAI TTS API call failed"
                );
                ClientError::Service(format!("OpenAI TTS error: {}", e))
            })?;

        let audio_bytes = response.bytes.to_vec();
        tracing::debug!(
            audio_size = audio_bytes.len(),
            "OpenAI TTS audio received successfully"
        );

        Ok(audio_bytes)
    }
}

#[async_trait]
impl SynthesisClient for OpenAiSynthesisClient {
    async fn synthesize(
        &self,
        request: &SynthesisRequest,
        cancel: &CancellationToken,
    ) -> Result<Vec<u8>, ClientError> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(ClientError::Cancelled),
            result = self.call_openai(request) => result,
        }
    }

    async fn close(&self) -> Result<(), String> {
        Ok(())
    }
}
