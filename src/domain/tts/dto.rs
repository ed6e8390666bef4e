use serde::{Deserialize, Serialize};

/// Characters of chunk text kept in logs and error messages
const PREVIEW_CHARS: usize = 80;

/// One request to the remote speech service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynthesisRequest {
    pub text: String,
    pub voice: String,
    pub language_code: String,
}

/// Audio produced for the chunk at `index`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesisResult {
    pub index: usize,
    pub audio: Vec<u8>,
}

/// Leading characters of `text`, cut on a char boundary
pub fn preview(text: &str) -> &str {
    match text.char_indices().nth(PREVIEW_CHARS) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}
