use super::chunker::ChunkSequence;
use super::dto::{SynthesisRequest, SynthesisResult};
use super::error::SynthesisError;
use super::result_table::ResultTable;
use crate::infrastructure::synthesis::{ClientError, SynthesisClient, SynthesisConnector};
use std::num::NonZeroUsize;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

/// Fans chunks out to the synthesis service and collects their audio in order.
///
/// Every chunk runs in its own task. A semaphore caps how many of them are in
/// flight; without a cap the limit is the chunk count. The first failing task
/// cancels a batch-wide scope so siblings that have not reached the service yet
/// give up instead of calling it.
pub struct SynthesisOrchestrator {
    connector: Arc<dyn SynthesisConnector>,
    max_concurrency: Option<NonZeroUsize>,
}

impl SynthesisOrchestrator {
    pub fn new(
        connector: Arc<dyn SynthesisConnector>,
        max_concurrency: Option<NonZeroUsize>,
    ) -> Self {
        Self {
            connector,
            max_concurrency,
        }
    }

    pub fn connector(&self) -> &Arc<dyn SynthesisConnector> {
        &self.connector
    }

    /// Synthesize every chunk and return the audio in chunk order.
    ///
    /// Argument and cancellation checks happen before the client is opened. Any
    /// task failure fails the whole batch and no partial audio is returned.
    /// When several tasks fail, the first non-cancellation error to be joined
    /// is the one reported.
    pub async fn synthesize(
        &self,
        chunks: &ChunkSequence,
        voice: &str,
        language_code: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<Vec<u8>>, SynthesisError> {
        if cancel.is_cancelled() {
            return Err(SynthesisError::Cancelled);
        }
        if voice.is_empty() {
            return Err(SynthesisError::EmptyVoice);
        }
        if language_code.is_empty() {
            return Err(SynthesisError::EmptyLanguageCode);
        }
        if chunks.is_empty() {
            return Ok(Vec::new());
        }

        let start_time = std::time::Instant::now();
        let provider = self.connector.provider();

        let client = self
            .connector
            .open()
            .await
            .map_err(SynthesisError::ClientOpen)?;

        let outcome = self
            .run_batch(&client, chunks, voice, language_code, cancel)
            .await;

        // Runs after every task has been joined, whatever the outcome
        if let Err(e) = client.close().await {
            tracing::error!(
                provider = provider,
                error = %e,
                "An error occurred when closing the synthesis client"
            );
        }

        let audio = match outcome {
            Ok(audio) => audio,
            Err(e) => {
                tracing::warn!(
                    provider = provider,
                    chunk_count = chunks.len(),
                    error = %e,
                    "Synthesis batch aborted"
                );
                return Err(e);
            }
        };

        let duration = start_time.elapsed();
        let characters_count = chunks.char_count();
        let throughput_chars_per_sec = if duration.as_secs_f64() > 0.0 {
            characters_count as f64 / duration.as_secs_f64()
        } else {
            0.0
        };

        tracing::info!(
            provider = provider,
            latency_ms = duration.as_millis(),
            characters_count = characters_count,
            chunk_count = chunks.len(),
            audio_size_bytes = audio.iter().map(Vec::len).sum::<usize>(),
            throughput_chars_per_sec = format!("{:.2}", throughput_chars_per_sec),
            "TTS synthesis completed"
        );

        Ok(audio)
    }

    async fn run_batch(
        &self,
        client: &Arc<dyn SynthesisClient>,
        chunks: &ChunkSequence,
        voice: &str,
        language_code: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<Vec<u8>>, SynthesisError> {
        let scope = cancel.child_token();
        let permits = self
            .max_concurrency
            .map_or(chunks.len(), NonZeroUsize::get);
        let semaphore = Arc::new(Semaphore::new(permits));

        let mut table = ResultTable::new(chunks.len());
        let mut tasks = JoinSet::new();

        tracing::debug!(
            chunk_count = chunks.len(),
            max_concurrency = permits,
            "Dispatching synthesis tasks"
        );

        for chunk in chunks {
            let permit = tokio::select! {
                biased;
                _ = scope.cancelled() => break,
                permit = semaphore.clone().acquire_owned() => match permit {
                    Ok(permit) => permit,
                    Err(_) => break, // semaphore closed
                },
            };

            let client = Arc::clone(client);
            let scope = scope.clone();
            let index = chunk.index;
            let request = SynthesisRequest {
                text: chunk.content.clone(),
                voice: voice.to_string(),
                language_code: language_code.to_string(),
            };

            tasks.spawn(async move {
                let _permit = permit; // held until this task completes
                synthesize_chunk(client.as_ref(), index, request, &scope).await
            });
        }

        let mut first_error: Option<SynthesisError> = None;

        while let Some(joined) = tasks.join_next().await {
            let outcome = joined.unwrap_or_else(|e| {
                scope.cancel();
                Err(SynthesisError::TaskAborted(e.to_string()))
            });

            match outcome {
                Ok(result) => table.fill(result),
                Err(err) => {
                    // A sibling's Cancelled must not mask the error that caused it
                    let replace = match &first_error {
                        None => true,
                        Some(current) => current.is_cancelled() && !err.is_cancelled(),
                    };
                    if replace {
                        first_error = Some(err);
                    }
                }
            }
        }

        if let Some(err) = first_error {
            tracing::debug!(
                completed = table.filled(),
                chunk_count = chunks.len(),
                "Discarding partial synthesis results"
            );
            return Err(err);
        }

        // Dispatch stopped early on external cancellation
        table.into_ordered().ok_or(SynthesisError::Cancelled)
    }
}

async fn synthesize_chunk(
    client: &dyn SynthesisClient,
    index: usize,
    request: SynthesisRequest,
    scope: &CancellationToken,
) -> Result<SynthesisResult, SynthesisError> {
    if scope.is_cancelled() {
        return Err(SynthesisError::Cancelled);
    }

    match client.synthesize(&request, scope).await {
        Ok(audio) => {
            tracing::info!(
                chunk_index = index,
                audio_size_bytes = audio.len(),
                "Synthesized chunk #{}",
                index
            );
            Ok(SynthesisResult { index, audio })
        }
        Err(ClientError::Cancelled) => Err(SynthesisError::Cancelled),
        Err(ClientError::Service(message)) => {
            scope.cancel();
            Err(SynthesisError::RemoteCall {
                index,
                chunk: request.text,
                voice: request.voice,
                language_code: request.language_code,
                message,
            })
        }
    }
}
