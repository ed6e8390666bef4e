use crate::domain::tts::SynthesisError;
use std::path::PathBuf;

/// Main application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Synthesis failed: {0}")]
    Synthesis(#[from] SynthesisError),
}

impl AppError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) => 2,
            Self::Io { .. } | Self::InvalidInput(_) => 3,
            Self::Synthesis(_) => 4,
        }
    }
}

/// Custom result type for the application
pub type AppResult<T> = Result<T, AppError>;
