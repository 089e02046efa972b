use std::fs;
use std::path::{Path, PathBuf};

use tenantrag_core::chunker::{chunk_text, ChunkingConfig};
use tenantrag_core::config::{expand_path, resolve_with_base};
use tenantrag_core::corpus::{is_supported, CorpusReader};
use tenantrag_core::Error;

fn cfg(chunk_size: usize, overlap: usize) -> ChunkingConfig {
    ChunkingConfig { chunk_size, overlap }
}

/// Strip the overlapped prefix of every window and re-concatenate; the
/// result must be the original text.
fn reconstruct(chunks: &[String], config: &ChunkingConfig) -> String {
    let step = (config.chunk_size - config.overlap).max(1);
    let mut out: Vec<char> = Vec::new();
    for (i, chunk) in chunks.iter().enumerate() {
        let start = i * step;
        let chars: Vec<char> = chunk.chars().collect();
        let skip = out.len().saturating_sub(start);
        out.extend(chars.into_iter().skip(skip));
    }
    out.into_iter().collect()
}

#[test]
fn empty_text_yields_no_chunks() {
    assert!(chunk_text("", &ChunkingConfig::default()).is_empty());
}

#[test]
fn short_text_yields_one_whole_chunk() {
    let chunks = chunk_text("short", &ChunkingConfig::default());
    assert_eq!(chunks, vec!["short".to_string()]);
}

#[test]
fn windows_reconstruct_original_text() {
    let text = "abcdefghijklmnopqrstuvwxyz0123456789".repeat(7);
    for (size, overlap) in [(10, 3), (500, 50), (7, 0), (36, 35)] {
        let config = cfg(size, overlap);
        let chunks = chunk_text(&text, &config);
        assert_eq!(reconstruct(&chunks, &config), text, "size={size} overlap={overlap}");
    }
}

#[test]
fn window_count_matches_step_arithmetic() {
    let text = "x".repeat(1000);
    let config = cfg(500, 50);
    let chunks = chunk_text(&text, &config);
    // starts advance by 450 while start < 1000
    assert_eq!(chunks.len(), 1000usize.div_ceil(450));
    assert_eq!(chunks[0].len(), 500);
    assert_eq!(chunks.last().map(String::len), Some(100));
}

#[test]
fn chunking_is_deterministic() {
    let text = "déjà vu — многоязычный текст with mixed widths".repeat(30);
    let config = cfg(64, 16);
    assert_eq!(chunk_text(&text, &config), chunk_text(&text, &config));
}

#[test]
fn multibyte_text_splits_on_char_boundaries() {
    let text = "é".repeat(120);
    let chunks = chunk_text(&text, &cfg(50, 10));
    for c in &chunks {
        assert!(c.chars().all(|ch| ch == 'é'));
    }
    assert_eq!(reconstruct(&chunks, &cfg(50, 10)), text);
}

#[test]
fn chunking_config_rejects_degenerate_windows() {
    assert!(cfg(0, 0).validate().is_err());
    assert!(cfg(50, 50).validate().is_err());
    assert!(cfg(50, 60).validate().is_err());
    assert!(cfg(500, 50).validate().is_ok());
}

#[test]
fn configured_paths_expand_env_vars_and_resolve_against_base() {
    std::env::set_var("TENANTRAG_TEST_ROOT", "/srv/corpora");
    assert_eq!(
        expand_path("${TENANTRAG_TEST_ROOT}/data"),
        PathBuf::from("/srv/corpora/data")
    );
    assert_eq!(
        resolve_with_base(Path::new("/base"), "rel/dir"),
        PathBuf::from("/base/rel/dir")
    );
    assert_eq!(
        resolve_with_base(Path::new("/base"), "/abs/dir"),
        PathBuf::from("/abs/dir")
    );
}

#[test]
fn corpus_lists_files_sorted_and_filters_supported() -> anyhow::Result<()> {
    let tmp = tempfile::tempdir()?;
    let dir = tmp.path().join("tenantA");
    fs::create_dir_all(&dir)?;
    fs::write(dir.join("b.txt"), "beta")?;
    fs::write(dir.join("a.md"), "alpha")?;
    fs::write(dir.join("z.bin"), [0u8, 1, 2])?;

    let corpus = CorpusReader::new(tmp.path());
    let files = corpus.list_files("tenantA")?;
    let names: Vec<_> = files
        .iter()
        .map(|p| p.file_name().map(|n| n.to_string_lossy().to_string()))
        .collect();
    assert_eq!(
        names,
        vec![
            Some("a.md".to_string()),
            Some("b.txt".to_string()),
            Some("z.bin".to_string())
        ]
    );
    assert!(is_supported(&dir.join("a.md")));
    assert!(!is_supported(&dir.join("z.bin")));

    let docs = corpus.documents("tenantA")?;
    let sources: Vec<_> = docs.iter().map(|d| d.source.as_str()).collect();
    assert_eq!(sources, vec!["a.md", "b.txt"]);
    Ok(())
}

#[test]
fn missing_tenant_directory_is_corpus_not_found() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let corpus = CorpusReader::new(tmp.path());
    match corpus.documents("ghost") {
        Err(Error::CorpusNotFound { tenant, .. }) => assert_eq!(tenant, "ghost"),
        other => panic!("expected CorpusNotFound, got {other:?}"),
    }
}

#[test]
fn invalid_tenant_id_is_rejected_before_fs_access() {
    let corpus = CorpusReader::new("/nonexistent");
    assert!(matches!(
        corpus.documents("../etc"),
        Err(Error::InvalidTenant(_))
    ));
}

#[test]
fn latin1_fallback_decodes_non_utf8_files() -> anyhow::Result<()> {
    let tmp = tempfile::tempdir()?;
    let dir = tmp.path().join("tenantA");
    fs::create_dir_all(&dir)?;
    // "café" in Latin-1: 0xE9 is not valid UTF-8 on its own
    fs::write(dir.join("legacy.txt"), [b'c', b'a', b'f', 0xE9])?;

    let corpus = CorpusReader::new(tmp.path());
    let docs = corpus.documents("tenantA")?;
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0].content, "café");
    Ok(())
}
