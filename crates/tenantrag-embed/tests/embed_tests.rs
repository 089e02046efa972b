use tenantrag_core::traits::Embedder;
use tenantrag_embed::{get_default_embedder, HashEmbedder, DEFAULT_DIM};

#[test]
fn embedder_shapes_and_determinism() {
    let embedder = get_default_embedder();
    let texts = vec!["hello world".to_string(), "hello world".to_string()];
    let embs = embedder.embed_batch(&texts).expect("embed_batch");
    let v1 = &embs[0];
    let v2 = &embs[1];

    assert_eq!(v1.len(), DEFAULT_DIM);
    assert_eq!(embedder.dim(), DEFAULT_DIM);

    // Norm approximately 1.0
    let norm: f32 = v1.iter().map(|x| x * x).sum::<f32>().sqrt();
    assert!((norm - 1.0).abs() <= 1e-3, "vector is L2-normalized (norm={norm})");

    // Deterministic for same input
    for (a, b) in v1.iter().zip(v2.iter()) {
        assert!((a - b).abs() <= 1e-6);
    }
}

#[test]
fn distinct_texts_get_distinct_vectors() {
    let embedder = HashEmbedder::new(128);
    let a = embedder.embed("the return policy allows thirty days").expect("embed");
    let b = embedder.embed("shipping takes two business weeks").expect("embed");
    assert_eq!(a.len(), 128);
    let diff: f32 = a.iter().zip(b.iter()).map(|(x, y)| (x - y).abs()).sum();
    assert!(diff > 1e-3, "unrelated texts should not collide (diff={diff})");
}

#[test]
fn empty_text_embeds_to_zero_vector() {
    let embedder = HashEmbedder::new(64);
    let v = embedder.embed("").expect("embed");
    assert_eq!(v.len(), 64);
    assert!(v.iter().all(|x| x.abs() <= 1e-6));
}
