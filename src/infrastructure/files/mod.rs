use crate::error::{AppError, AppResult};
use std::path::Path;
use tokio::io::{AsyncWrite, AsyncWriteExt};

/// Outcome of writing per-chunk audio to a sink
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteReport {
    pub written: usize,
    pub failed: usize,
}

/// Read the whole input document as UTF-8 text
pub async fn read_text(path: &Path) -> AppResult<String> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| AppError::io(path, e))?;

    String::from_utf8(bytes).map_err(|e| {
        AppError::InvalidInput(format!("{} is not valid UTF-8: {}", path.display(), e))
    })
}

/// Create (or truncate) `path` and write each chunk's audio in order.
///
/// Failing to open the file is an error. A chunk that fails to write is logged
/// and counted, and the remaining chunks are still written.
pub async fn write_chunks(path: &Path, chunks: &[Vec<u8>]) -> AppResult<WriteReport> {
    let mut options = tokio::fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    options.mode(0o600);

    let mut file = options
        .open(path)
        .await
        .map_err(|e| AppError::io(path, e))?;

    let report = write_chunks_to(&mut file, chunks).await;

    if let Err(e) = file.flush().await {
        tracing::error!(
            path = %path.display(),
            error = %e,
            "An error occurred when flushing the out file"
        );
    }

    Ok(report)
}

pub async fn write_chunks_to<W>(writer: &mut W, chunks: &[Vec<u8>]) -> WriteReport
where
    W: AsyncWrite + Unpin,
{
    let mut report = WriteReport::default();

    for (index, chunk) in chunks.iter().enumerate() {
        match writer.write_all(chunk).await {
            Ok(()) => report.written += 1,
            Err(e) => {
                tracing::error!(
                    chunk_index = index,
                    chunk_size = chunk.len(),
                    error = %e,
                    "An error occurred when writing a chunk to the out file"
                );
                report.failed += 1;
            }
        }
    }

    report
}

/// Write already-assembled audio in a single call
pub async fn write_once<W>(writer: &mut W, audio: &[u8]) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    writer.write_all(audio).await?;
    writer.flush().await
}
