use std::num::NonZeroUsize;

/// A bounded slice of the source document, trimmed, never empty
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextChunk {
    pub index: usize,
    pub content: String,
}

/// Ordered chunks of one document, indices contiguous from 0
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChunkSequence {
    chunks: Vec<TextChunk>,
}

impl ChunkSequence {
    /// Split `text` into chunks of at most `max_chars` characters
    pub fn from_text(text: &str, max_chars: NonZeroUsize) -> Self {
        Self::from(chunk_text(text, max_chars))
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TextChunk> {
        self.chunks.iter()
    }

    /// Total characters across all chunks
    pub fn char_count(&self) -> usize {
        self.chunks.iter().map(|c| c.content.chars().count()).sum()
    }
}

impl From<Vec<String>> for ChunkSequence {
    fn from(contents: Vec<String>) -> Self {
        let chunks = contents
            .into_iter()
            .enumerate()
            .map(|(index, content)| TextChunk { index, content })
            .collect();
        Self { chunks }
    }
}

impl<'a> IntoIterator for &'a ChunkSequence {
    type Item = &'a TextChunk;
    type IntoIter = std::slice::Iter<'a, TextChunk>;

    fn into_iter(self) -> Self::IntoIter {
        self.chunks.iter()
    }
}

/// Split text into chunks of at most `max_chars` characters.
///
/// Each step looks at the leading `max_chars` characters of what is left and cuts
/// at the last whitespace inside that window. A window without whitespace is cut
/// hard at `max_chars`, even in the middle of a word. Chunks and the remainder are
/// trimmed, so no chunk starts or ends with whitespace and none is empty.
pub fn chunk_text(text: &str, max_chars: NonZeroUsize) -> Vec<String> {
    let max_chars = max_chars.get();
    let mut chunks = Vec::new();
    let mut remaining = text.trim();

    // `nth(max_chars)` is the first char past the window; None means it all fits
    while let Some((window_end, _)) = remaining.char_indices().nth(max_chars) {
        let window = &remaining[..window_end];
        let split = window.rfind(char::is_whitespace).unwrap_or(window_end);

        // `remaining` never starts with whitespace, so split > 0 and head is non-empty
        let head = window[..split].trim_end();
        chunks.push(head.to_string());

        remaining = remaining[split..].trim_start();
    }

    if !remaining.is_empty() {
        chunks.push(remaining.to_string());
    }

    chunks
}
