//! Tenant index store and retriever.
//!
//! One LanceDB table per tenant. Population is monotonic and happens at
//! most once per tenant: a populated table short-circuits `ensure_indexed`.
//! The populated-check plus population runs under a per-tenant mutex so two
//! concurrent cold-tenant requests cannot double-index; retrieval never
//! takes that lock.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use arrow_array::{
    FixedSizeListArray, Float32Array, Int32Array, RecordBatch, RecordBatchIterator, StringArray,
};
use futures::TryStreamExt;
use lancedb::query::{ExecutableQuery, QueryBase};
use lancedb::Connection;
use tokio::sync::Mutex;

use tenantrag_core::chunker::{chunk_text, ChunkingConfig};
use tenantrag_core::corpus::{is_supported, read_document, CorpusReader};
use tenantrag_core::error::{validate_tenant, Error, Result};
use tenantrag_core::traits::Embedder;
use tenantrag_core::types::{
    DocumentChunk, FileOutcome, FileStatus, IndexReport, RetrievedChunk,
};

use crate::schema::build_arrow_schema;
use crate::table::{ensure_table, open_db, table_exists};

pub const DEFAULT_TOP_K: usize = 3;

fn table_name(tenant: &str) -> String {
    format!("tenant_{tenant}")
}

fn index_err(e: impl Into<anyhow::Error>) -> Error {
    Error::Index(e.into())
}

pub struct TenantIndexStore {
    db: Connection,
    corpus: CorpusReader,
    embedder: Arc<dyn Embedder>,
    chunking: ChunkingConfig,
    index_locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl TenantIndexStore {
    pub async fn open(
        db_path: &Path,
        corpus: CorpusReader,
        embedder: Arc<dyn Embedder>,
        chunking: ChunkingConfig,
    ) -> Result<Self> {
        chunking.validate()?;
        let db = open_db(db_path.to_string_lossy().as_ref())
            .await
            .map_err(Error::Index)?;
        Ok(Self {
            db,
            corpus,
            embedder,
            chunking,
            index_locks: Mutex::new(HashMap::new()),
        })
    }

    /// Idempotent: creates the tenant's (empty) collection on first
    /// reference, leaves an existing one untouched.
    pub async fn get_or_create(&self, tenant: &str) -> Result<()> {
        validate_tenant(tenant)?;
        ensure_table(
            &self.db,
            &table_name(tenant),
            build_arrow_schema(self.embedder.dim() as i32),
        )
        .await
        .map_err(Error::Index)
    }

    /// Rows currently held for `tenant`; 0 for a never-referenced tenant.
    pub async fn count(&self, tenant: &str) -> Result<usize> {
        validate_tenant(tenant)?;
        let name = table_name(tenant);
        if !table_exists(&self.db, &name).await.map_err(Error::Index)? {
            return Ok(0);
        }
        let table = self.db.open_table(&name).execute().await.map_err(index_err)?;
        table.count_rows(None).await.map_err(index_err)
    }

    /// Index the tenant's corpus unless its collection already holds rows.
    ///
    /// Per-file read problems are absorbed into the report and logged; the
    /// corpus directory being absent, and any embedding or index-write
    /// failure, abort the run.
    pub async fn ensure_indexed(&self, tenant: &str) -> Result<IndexReport> {
        validate_tenant(tenant)?;
        let lock = self.tenant_lock(tenant).await;
        let _guard = lock.lock().await;

        let mut report = IndexReport {
            tenant: tenant.to_string(),
            ..IndexReport::default()
        };

        self.get_or_create(tenant).await?;
        let name = table_name(tenant);
        let table = self.db.open_table(&name).execute().await.map_err(index_err)?;
        let existing = table.count_rows(None).await.map_err(index_err)?;
        if existing > 0 {
            report.already_indexed = true;
            tracing::debug!(tenant, rows = existing, "collection already populated, skipping");
            return Ok(report);
        }

        let files = self.corpus.list_files(tenant)?;
        for (ordinal, path) in files.iter().enumerate() {
            let source = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();
            if !is_supported(path) {
                report.files.push(FileOutcome {
                    source,
                    status: FileStatus::SkippedUnsupported,
                });
                continue;
            }
            let doc = match read_document(path) {
                Ok(doc) => doc,
                Err(e) => {
                    tracing::warn!(tenant, source, error = %e, "failed to read corpus file");
                    report.files.push(FileOutcome {
                        source,
                        status: FileStatus::Failed {
                            reason: e.to_string(),
                        },
                    });
                    continue;
                }
            };
            if doc.content.trim().is_empty() {
                report.files.push(FileOutcome {
                    source,
                    status: FileStatus::SkippedEmpty,
                });
                continue;
            }

            // chunk_index keeps its pre-filter position so ids stay stable
            // even when blank windows are dropped
            let chunks: Vec<DocumentChunk> = chunk_text(&doc.content, &self.chunking)
                .into_iter()
                .enumerate()
                .filter(|(_, content)| !content.trim().is_empty())
                .map(|(chunk_index, content)| DocumentChunk {
                    id: format!("{ordinal}_{chunk_index}"),
                    tenant: tenant.to_string(),
                    source: source.clone(),
                    content,
                    chunk_index,
                })
                .collect();
            if chunks.is_empty() {
                report.files.push(FileOutcome {
                    source,
                    status: FileStatus::SkippedEmpty,
                });
                continue;
            }

            let texts: Vec<String> = chunks.iter().map(|c| c.content.clone()).collect();
            let embeddings = self
                .embedder
                .embed_batch(&texts)
                .map_err(Error::Embedding)?;
            self.insert_chunks(&name, &chunks, &embeddings).await?;

            report.chunks_written += chunks.len();
            report.files.push(FileOutcome {
                source,
                status: FileStatus::Indexed {
                    chunks: chunks.len(),
                },
            });
        }

        tracing::info!(
            tenant,
            chunks = report.chunks_written,
            files = report.files.len(),
            "indexed tenant corpus"
        );
        Ok(report)
    }

    /// Nearest-k chunks for `question`, in the index's native ascending
    /// `_distance` order. An empty or never-populated collection yields an
    /// empty result, not an error; fewer than `top_k` rows yield what
    /// exists.
    pub async fn retrieve(
        &self,
        question: &str,
        tenant: &str,
        top_k: usize,
    ) -> Result<Vec<RetrievedChunk>> {
        self.get_or_create(tenant).await?;
        let name = table_name(tenant);
        let table = self.db.open_table(&name).execute().await.map_err(index_err)?;
        if table.count_rows(None).await.map_err(index_err)? == 0 {
            return Ok(Vec::new());
        }

        let query_vec = self.embedder.embed(question).map_err(Error::Embedding)?;
        let mut stream = table
            .vector_search(query_vec)
            .map_err(index_err)?
            .limit(top_k)
            .execute()
            .await
            .map_err(index_err)?;

        let mut out = Vec::new();
        while let Some(batch) = stream.try_next().await.map_err(index_err)? {
            let content = string_column(&batch, "content")?;
            let source = string_column(&batch, "source")?;
            let distance = batch
                .column_by_name("_distance")
                .and_then(|c| c.as_any().downcast_ref::<Float32Array>())
                .ok_or_else(|| Error::Index(anyhow::anyhow!("_distance column missing")))?;
            for i in 0..batch.num_rows() {
                out.push(RetrievedChunk {
                    content: content.value(i).to_string(),
                    source: source.value(i).to_string(),
                    distance: distance.value(i),
                });
            }
        }
        Ok(out)
    }

    async fn insert_chunks(
        &self,
        name: &str,
        chunks: &[DocumentChunk],
        embeddings: &[Vec<f32>],
    ) -> Result<()> {
        let batch = self.chunks_to_record_batch(chunks, embeddings)?;
        let schema = batch.schema();
        let reader = Box::new(RecordBatchIterator::new(vec![Ok(batch)].into_iter(), schema));
        let table = self.db.open_table(name).execute().await.map_err(index_err)?;
        table.add(reader).execute().await.map_err(index_err)?;
        Ok(())
    }

    fn chunks_to_record_batch(
        &self,
        chunks: &[DocumentChunk],
        embeddings: &[Vec<f32>],
    ) -> Result<RecordBatch> {
        let dim = self.embedder.dim() as i32;
        let schema = build_arrow_schema(dim);
        let mut ids = Vec::new();
        let mut tenants = Vec::new();
        let mut sources = Vec::new();
        let mut contents = Vec::new();
        let mut chunk_indices = Vec::new();
        let mut vectors: Vec<Option<Vec<Option<f32>>>> = Vec::new();
        for (chunk, embedding) in chunks.iter().zip(embeddings.iter()) {
            ids.push(chunk.id.clone());
            tenants.push(chunk.tenant.clone());
            sources.push(chunk.source.clone());
            contents.push(chunk.content.clone());
            chunk_indices.push(chunk.chunk_index as i32);
            vectors.push(Some(embedding.iter().map(|&x| Some(x)).collect()));
        }
        let batch = RecordBatch::try_new(
            schema,
            vec![
                Arc::new(StringArray::from(ids)),
                Arc::new(StringArray::from(tenants)),
                Arc::new(StringArray::from(sources)),
                Arc::new(StringArray::from(contents)),
                Arc::new(Int32Array::from(chunk_indices)),
                Arc::new(FixedSizeListArray::from_iter_primitive::<
                    arrow_array::types::Float32Type,
                    _,
                    _,
                >(vectors.into_iter(), dim)),
            ],
        )
        .map_err(index_err)?;
        Ok(batch)
    }

    async fn tenant_lock(&self, tenant: &str) -> Arc<Mutex<()>> {
        let mut locks = self.index_locks.lock().await;
        locks
            .entry(tenant.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}

fn string_column<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a StringArray> {
    batch
        .column_by_name(name)
        .and_then(|c| c.as_any().downcast_ref::<StringArray>())
        .ok_or_else(|| Error::Index(anyhow::anyhow!("{name} column missing")))
}
