//! Per-tenant document source.
//!
//! A tenant's corpus is the flat directory `root/{tenant}`. Files are
//! visited in sorted filename order so chunk ids and lexical tie-breaks are
//! deterministic across runs. Only `.txt` and `.md` files are read; decoding
//! tries UTF-8 first and falls back to Latin-1 for legacy files.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{validate_tenant, Error, Result};
use crate::types::Document;

#[derive(Debug, Clone)]
pub struct CorpusReader {
    root: PathBuf,
}

impl CorpusReader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn tenant_dir(&self, tenant: &str) -> Result<PathBuf> {
        validate_tenant(tenant)?;
        Ok(self.root.join(tenant))
    }

    /// All regular files in the tenant directory, sorted by filename.
    /// The directory itself must exist; an empty directory is fine.
    pub fn list_files(&self, tenant: &str) -> Result<Vec<PathBuf>> {
        let dir = self.tenant_dir(tenant)?;
        let entries = fs::read_dir(&dir).map_err(|_| Error::CorpusNotFound {
            tenant: tenant.to_string(),
            path: dir.clone(),
        })?;
        let mut files: Vec<PathBuf> = entries
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.is_file())
            .collect();
        files.sort();
        Ok(files)
    }

    /// Fresh load of every supported, readable document for `tenant`.
    /// Unreadable files are skipped with a warning; the corpus directory
    /// being absent is a hard error.
    pub fn documents(&self, tenant: &str) -> Result<Vec<Document>> {
        let mut docs = Vec::new();
        for path in self.list_files(tenant)? {
            if !is_supported(&path) {
                continue;
            }
            match read_document(&path) {
                Ok(doc) => docs.push(doc),
                Err(e) => {
                    tracing::warn!(tenant, path = %path.display(), error = %e, "skipping unreadable file");
                }
            }
        }
        Ok(docs)
    }
}

/// Text file types accepted into the corpus.
pub fn is_supported(path: &Path) -> bool {
    matches!(
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref(),
        Some("txt") | Some("md")
    )
}

/// Read one file, decoding UTF-8 with a Latin-1 fallback.
pub fn read_document(path: &Path) -> anyhow::Result<Document> {
    let source = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let bytes = fs::read(path)?;
    let content = match String::from_utf8(bytes) {
        Ok(s) => s,
        // Latin-1: every byte is the identically numbered code point.
        Err(e) => e.into_bytes().iter().map(|&b| b as char).collect(),
    };
    Ok(Document { source, content })
}
