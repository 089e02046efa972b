//! Domain types shared by the vector and lexical retrieval strategies.

use serde::{Deserialize, Serialize};

/// A source document as read from a tenant's corpus directory.
#[derive(Debug, Clone)]
pub struct Document {
    /// Original filename within the tenant directory.
    pub source: String,
    /// Decoded text content.
    pub content: String,
}

/// A chunk of a source document that is independently indexed.
///
/// `id` is `"{document_ordinal}_{chunk_index}"` and is unique within one
/// tenant's index. Invariant: `content` is never blank after trimming;
/// blank chunks are dropped before they reach the embedder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentChunk {
    pub id: String,
    pub tenant: String,
    pub source: String,
    pub content: String,
    pub chunk_index: usize,
}

/// One nearest-neighbor hit, in the index's native rank order.
///
/// `distance` is a non-negative dissimilarity (0 = identical); results are
/// ordered by ascending distance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievedChunk {
    pub content: String,
    pub source: String,
    pub distance: f32,
}

/// Response of the vector strategy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorAnswer {
    pub answer: String,
    /// Distinct source labels among the retrieved chunks.
    pub sources: Vec<String>,
    /// `1 - nearest_distance`, clamped to `[0, 1]`.
    pub confidence: f32,
}

/// Response of the lexical fallback strategy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LexicalAnswer {
    pub answer: String,
    pub source: Option<String>,
}

/// Unified response over both strategies. Serialized untagged so each
/// variant keeps its original wire shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Answer {
    Vector(VectorAnswer),
    Lexical(LexicalAnswer),
}

/// Which retrieval strategy services a question.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    #[default]
    Vector,
    Lexical,
}

/// Per-file outcome of an indexing run. Skips and failures are recorded
/// here rather than aborting the corpus loop.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileOutcome {
    pub source: String,
    pub status: FileStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileStatus {
    Indexed { chunks: usize },
    SkippedEmpty,
    SkippedUnsupported,
    Failed { reason: String },
}

/// Result of `ensure_indexed` for one tenant.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IndexReport {
    pub tenant: String,
    /// The collection already held rows; nothing was written.
    pub already_indexed: bool,
    pub chunks_written: usize,
    pub files: Vec<FileOutcome>,
}
