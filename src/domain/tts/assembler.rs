/// Concatenate per-chunk audio in order, with no separators or re-encoding
pub fn assemble<B: AsRef<[u8]>>(parts: &[B]) -> Vec<u8> {
    let total = parts.iter().map(|p| p.as_ref().len()).sum();
    let mut merged_audio = Vec::with_capacity(total);
    for part in parts {
        merged_audio.extend_from_slice(part.as_ref());
    }
    merged_audio
}
