use super::assembler::assemble;
use super::chunker::ChunkSequence;
use super::error::SynthesisError;
use super::orchestrator::SynthesisOrchestrator;
use std::num::NonZeroUsize;
use tokio_util::sync::CancellationToken;

/// Text-to-audio pipeline over one synthesis provider
pub struct TtsService {
    orchestrator: SynthesisOrchestrator,
    max_chunk_chars: NonZeroUsize,
}

impl TtsService {
    /// `max_chunk_chars` is lowered to the provider's request limit when it is larger.
    pub fn new(orchestrator: SynthesisOrchestrator, max_chunk_chars: NonZeroUsize) -> Self {
        let provider_limit = orchestrator.connector().max_request_chars();
        let max_chunk_chars = match NonZeroUsize::new(provider_limit) {
            Some(limit) if limit < max_chunk_chars => {
                tracing::info!(
                    provider = orchestrator.connector().provider(),
                    configured = max_chunk_chars.get(),
                    provider_limit = limit.get(),
                    "Chunk size lowered to provider request limit"
                );
                limit
            }
            _ => max_chunk_chars,
        };

        Self {
            orchestrator,
            max_chunk_chars,
        }
    }

    pub fn max_chunk_chars(&self) -> NonZeroUsize {
        self.max_chunk_chars
    }

    pub fn chunk_document(&self, text: &str) -> ChunkSequence {
        let chunks = ChunkSequence::from_text(text, self.max_chunk_chars);
        tracing::info!(
            chunk_count = chunks.len(),
            text_length = text.len(),
            max_chunk_chars = self.max_chunk_chars.get(),
            "Created {} chunks",
            chunks.len()
        );
        chunks
    }

    /// Per-chunk audio in document order
    pub async fn synthesize_chunks(
        &self,
        chunks: &ChunkSequence,
        voice: &str,
        language_code: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<Vec<u8>>, SynthesisError> {
        self.orchestrator
            .synthesize(chunks, voice, language_code, cancel)
            .await
    }

    /// Chunk, synthesize and concatenate a whole document
    pub async fn synthesize_document(
        &self,
        text: &str,
        voice: &str,
        language_code: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<u8>, SynthesisError> {
        let chunks = self.chunk_document(text);
        let audio = self
            .synthesize_chunks(&chunks, voice, language_code, cancel)
            .await?;
        Ok(assemble(&audio))
    }
}
