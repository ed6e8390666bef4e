use crate::domain::tts::SynthesisRequest;
use async_trait::async_trait;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("request cancelled")]
    Cancelled,
    #[error("{0}")]
    Service(String),
}

/// Opens handles to a remote speech-synthesis provider
/// (AWS Polly, OpenAI, or a test double).
///
/// Implementations report the provider's per-request text limit so callers can
/// size chunks to fit.
#[async_trait]
pub trait SynthesisConnector: Send + Sync {
    /// Provider name used in logs
    fn provider(&self) -> &'static str;

    /// Largest number of characters the provider accepts in one request
    fn max_request_chars(&self) -> usize;

    /// Acquire a client handle. The caller must `close` it once done.
    async fn open(&self) -> Result<Arc<dyn SynthesisClient>, String>;
}

/// Handle to the remote service, safe to call concurrently from many tasks.
#[async_trait]
pub trait SynthesisClient: Send + Sync {
    /// Synthesize one request and return the encoded audio (MP3).
    ///
    /// `cancel` fires when the batch is being torn down. Implementations may
    /// ignore it and finish the call, or return `ClientError::Cancelled` early.
    async fn synthesize(
        &self,
        request: &SynthesisRequest,
        cancel: &CancellationToken,
    ) -> Result<Vec<u8>, ClientError>;

    /// Release the handle
    async fn close(&self) -> Result<(), String>;
}
