//! Answer assembly over the two retrieval strategies.
//!
//! `RagEngine` owns the tenant index store, the lexical fallback and the
//! generator, all injected at construction. `ask` dispatches on the
//! configured strategy; `answer`/`answer_lexical` expose the strategies
//! directly.

pub mod generate;

use std::collections::BTreeSet;
use std::sync::Arc;

use tenantrag_core::traits::Generator;
use tenantrag_core::types::{Answer, IndexReport, LexicalAnswer, Strategy, VectorAnswer};
use tenantrag_core::Result;
use tenantrag_lexical::LexicalRetriever;
use tenantrag_vector::store::DEFAULT_TOP_K;
use tenantrag_vector::TenantIndexStore;

pub const NO_INFORMATION: &str = "no information available";

const SYSTEM_PROMPT: &str =
    "You are an expert assistant. Answer based only on the provided context.";

#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub strategy: Strategy,
    pub top_k: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::default(),
            top_k: DEFAULT_TOP_K,
        }
    }
}

pub struct RagEngine {
    store: TenantIndexStore,
    lexical: LexicalRetriever,
    generator: Arc<dyn Generator>,
    config: EngineConfig,
}

impl RagEngine {
    pub fn new(
        store: TenantIndexStore,
        lexical: LexicalRetriever,
        generator: Arc<dyn Generator>,
        config: EngineConfig,
    ) -> Self {
        Self {
            store,
            lexical,
            generator,
            config,
        }
    }

    /// Warm a tenant's index without asking a question.
    pub async fn ensure_indexed(&self, tenant: &str) -> Result<IndexReport> {
        self.store.ensure_indexed(tenant).await
    }

    /// Service a question with the configured strategy.
    pub async fn ask(&self, question: &str, tenant: &str) -> Result<Answer> {
        match self.config.strategy {
            Strategy::Vector => Ok(Answer::Vector(self.answer(question, tenant).await?)),
            Strategy::Lexical => Ok(Answer::Lexical(self.answer_lexical(question, tenant)?)),
        }
    }

    /// Vector strategy: index on first question, retrieve nearest chunks,
    /// assemble context, delegate to the generator.
    ///
    /// Generator failures are absorbed into the answer payload so the
    /// request itself still succeeds; only a missing corpus or an
    /// embedding/index failure surfaces as an error.
    pub async fn answer(&self, question: &str, tenant: &str) -> Result<VectorAnswer> {
        let report = self.store.ensure_indexed(tenant).await?;
        if !report.already_indexed {
            tracing::info!(tenant, chunks = report.chunks_written, "first-question indexing");
        }

        let hits = self
            .store
            .retrieve(question, tenant, self.config.top_k)
            .await?;
        if hits.is_empty() {
            return Ok(VectorAnswer {
                answer: NO_INFORMATION.to_string(),
                sources: Vec::new(),
                confidence: 0.0,
            });
        }

        let context = hits
            .iter()
            .map(|h| format!("[Source: {}]\n{}", h.source, h.content))
            .collect::<Vec<_>>()
            .join("\n\n---\n\n");
        let sources: Vec<String> = hits
            .iter()
            .map(|h| h.source.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        // Distance can exceed 1 depending on the index metric; clamp so the
        // published confidence stays in [0, 1].
        let confidence = (1.0 - hits[0].distance).clamp(0.0, 1.0);

        let user_prompt = format!("Context:\n{context}\n\nQuestion: {question}");
        match self.generator.generate(SYSTEM_PROMPT, &user_prompt).await {
            Ok(answer) => Ok(VectorAnswer {
                answer,
                sources,
                confidence,
            }),
            Err(e) => {
                tracing::warn!(tenant, error = %e, "generation failed, returning error text");
                Ok(VectorAnswer {
                    answer: format!("generation error: {e}"),
                    sources: Vec::new(),
                    confidence,
                })
            }
        }
    }

    /// Lexical strategy passthrough: fresh corpus scan, no vectors.
    pub fn answer_lexical(&self, question: &str, tenant: &str) -> Result<LexicalAnswer> {
        self.lexical.answer(question, tenant)
    }
}
