//! Fixed-size overlapping windows over document text.
//!
//! Windows are measured in characters, not bytes, so multi-byte text never
//! splits inside a code point. Pure function: same input, same output.

#[derive(Debug, Clone, Copy)]
pub struct ChunkingConfig {
    /// Window size in characters.
    pub chunk_size: usize,
    /// Characters shared between consecutive windows.
    pub overlap: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: 500,
            overlap: 50,
        }
    }
}

impl ChunkingConfig {
    pub fn validate(&self) -> crate::Result<()> {
        if self.chunk_size == 0 || self.overlap >= self.chunk_size {
            return Err(crate::Error::InvalidConfig(format!(
                "chunking requires chunk_size > overlap, got chunk_size={} overlap={}",
                self.chunk_size, self.overlap
            )));
        }
        Ok(())
    }
}

/// Split `text` into overlapping windows.
///
/// The window `[start, start + chunk_size)` is clamped to the text length
/// and `start` advances by `max(1, chunk_size - overlap)` until it passes
/// the end. Empty text yields no chunks; any non-empty text yields at least
/// one, and text shorter than `chunk_size` yields exactly the whole text.
pub fn chunk_text(text: &str, config: &ChunkingConfig) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }
    let chars: Vec<char> = text.chars().collect();
    let step = config.chunk_size.saturating_sub(config.overlap).max(1);
    let mut chunks = Vec::new();
    let mut start = 0usize;
    while start < chars.len() {
        let end = (start + config.chunk_size.max(1)).min(chars.len());
        chunks.push(chars[start..end].iter().collect());
        start += step;
    }
    chunks
}
