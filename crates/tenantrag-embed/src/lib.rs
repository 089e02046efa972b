//! Feature-hashing embedder.
//!
//! The retrieval engine treats the embedding model as a black box behind
//! `tenantrag_core::traits::Embedder`. This crate ships a deterministic,
//! dependency-free implementation: whitespace tokens are hashed into a
//! fixed-dim bucket vector which is then L2-normalized. Model-backed
//! embedders (ONNX, remote APIs, ...) plug in behind the same trait.

use std::hash::{Hash, Hasher};

use tenantrag_core::traits::Embedder;
use twox_hash::XxHash64;

pub const DEFAULT_DIM: usize = 384;

pub struct HashEmbedder {
    dim: usize,
}

impl HashEmbedder {
    pub fn new(dim: usize) -> Self {
        Self { dim }
    }
}

impl Default for HashEmbedder {
    fn default() -> Self {
        Self::new(DEFAULT_DIM)
    }
}

impl Embedder for HashEmbedder {
    fn dim(&self) -> usize {
        self.dim
    }

    fn embed(&self, text: &str) -> anyhow::Result<Vec<f32>> {
        let mut v = vec![0f32; self.dim];
        for (i, token) in text.split_whitespace().enumerate() {
            let token = token.to_lowercase();
            let mut hasher = XxHash64::with_seed(0);
            token.hash(&mut hasher);
            let h = hasher.finish();
            let idx = (h as usize) % self.dim;
            let val = (((h >> 32) as u32) as f32) / (u32::MAX as f32);
            v[idx] += val + (i as f32 % 3.0) * 0.01;
        }
        let norm = (v.iter().map(|x| x * x).sum::<f32>()).sqrt().max(1e-6);
        for x in &mut v {
            *x /= norm;
        }
        Ok(v)
    }
}

pub fn get_default_embedder() -> Box<dyn Embedder> {
    Box::new(HashEmbedder::default())
}
