use crate::domain::tts::dto::preview;

#[derive(Debug, thiserror::Error)]
pub enum SynthesisError {
    #[error("invalid argument: empty voice")]
    EmptyVoice,
    #[error("invalid argument: empty language code")]
    EmptyLanguageCode,
    #[error("synthesis cancelled")]
    Cancelled,
    #[error("failed to open synthesis client: {0}")]
    ClientOpen(String),
    #[error(
        "remote synthesis failed for chunk #{index} (voice={voice}, language_code={language_code}, text=\"{}\"): {message}",
        preview(.chunk)
    )]
    RemoteCall {
        index: usize,
        chunk: String,
        voice: String,
        language_code: String,
        message: String,
    },
    #[error("synthesis task aborted: {0}")]
    TaskAborted(String),
}

impl SynthesisError {
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::EmptyVoice | Self::EmptyLanguageCode)
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// Chunk index the error belongs to, if it came from a single task
    pub fn chunk_index(&self) -> Option<usize> {
        match self {
            Self::RemoteCall { index, .. } => Some(*index),
            _ => None,
        }
    }
}
