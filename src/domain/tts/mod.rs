pub mod assembler;
pub mod chunker;
pub mod dto;
pub mod error;
pub mod orchestrator;
pub mod result_table;
pub mod service;

pub use assembler::assemble;
pub use chunker::{chunk_text, ChunkSequence, TextChunk};
pub use dto::{SynthesisRequest, SynthesisResult};
pub use error::SynthesisError;
pub use orchestrator::SynthesisOrchestrator;
pub use service::TtsService;
