//! Collaborator seams. The embedding model and the answer generator are
//! black boxes behind these traits so request handlers can be constructed
//! with test doubles.

use async_trait::async_trait;

/// Text to fixed-length vector. Must be deterministic for identical input
/// within one model version.
pub trait Embedder: Send + Sync {
    fn dim(&self) -> usize;

    fn embed(&self, text: &str) -> anyhow::Result<Vec<f32>>;

    fn embed_batch(&self, texts: &[String]) -> anyhow::Result<Vec<Vec<f32>>> {
        texts.iter().map(|t| self.embed(t)).collect()
    }
}

/// (system prompt, user prompt) to answer text. Calls are blocking and
/// potentially slow; implementations should carry a bounded timeout.
#[async_trait]
pub trait Generator: Send + Sync {
    async fn generate(&self, system_prompt: &str, user_prompt: &str) -> anyhow::Result<String>;
}
