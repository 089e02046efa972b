//! Lexical fallback retriever: no vectors, no index, no caching.
//!
//! Documents are loaded fresh from the tenant's corpus on every call. An
//! exact (case-insensitive) substring hit on the whole question wins
//! outright; otherwise documents are scored by overlap with the distinct
//! question words and the best `(match_count, score)` pair wins, earlier
//! documents keeping ties.

use std::collections::BTreeSet;

use tenantrag_core::corpus::CorpusReader;
use tenantrag_core::types::LexicalAnswer;
use tenantrag_core::Result;

pub const NO_INFORMATION: &str = "no information available for this client";

pub struct LexicalRetriever {
    corpus: CorpusReader,
}

impl LexicalRetriever {
    pub fn new(corpus: CorpusReader) -> Self {
        Self { corpus }
    }

    pub fn answer(&self, question: &str, tenant: &str) -> Result<LexicalAnswer> {
        let docs = self.corpus.documents(tenant)?;
        let question_lower = question.to_lowercase();

        // Exact-match short-circuit: first document in corpus order wins,
        // no scoring.
        for doc in &docs {
            if doc.content.to_lowercase().contains(&question_lower) {
                tracing::debug!(tenant, source = %doc.source, "exact substring match");
                return Ok(LexicalAnswer {
                    answer: doc.content.clone(),
                    source: Some(doc.source.clone()),
                });
            }
        }

        // Overlap scoring: match_count first, summed word length second,
        // earlier document on a full tie. The word set is deduplicated so
        // a repeated question word counts once.
        let words: BTreeSet<String> = question
            .split_whitespace()
            .map(str::to_lowercase)
            .collect();
        let mut best: Option<(usize, usize, usize)> = None; // (match_count, score, doc index)
        for (idx, doc) in docs.iter().enumerate() {
            let content_lower = doc.content.to_lowercase();
            let mut match_count = 0usize;
            let mut score = 0usize;
            for word in &words {
                if content_lower.contains(word.as_str()) {
                    match_count += 1;
                    score += word.chars().count();
                }
            }
            if match_count == 0 {
                continue;
            }
            let beats = match best {
                None => true,
                Some((bc, bs, _)) => (match_count, score) > (bc, bs),
            };
            if beats {
                best = Some((match_count, score, idx));
            }
        }

        match best {
            Some((match_count, score, idx)) => {
                let doc = &docs[idx];
                tracing::debug!(tenant, source = %doc.source, match_count, score, "overlap match");
                Ok(LexicalAnswer {
                    answer: doc.content.clone(),
                    source: Some(doc.source.clone()),
                })
            }
            None => Ok(LexicalAnswer {
                answer: NO_INFORMATION.to_string(),
                source: None,
            }),
        }
    }
}
