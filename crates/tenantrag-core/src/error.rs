use std::path::PathBuf;

use thiserror::Error;

/// Request-level failures.
///
/// Per-file problems during indexing never surface here; they are absorbed
/// into `types::FileOutcome` entries. Generation failures are absorbed into
/// the answer payload by the engine.
#[derive(Debug, Error)]
pub enum Error {
    #[error("corpus not found for tenant '{tenant}' at {path}")]
    CorpusNotFound { tenant: String, path: PathBuf },

    #[error("invalid tenant id: {0:?}")]
    InvalidTenant(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("embedding failed: {0}")]
    Embedding(anyhow::Error),

    #[error("index operation failed: {0}")]
    Index(anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Tenant ids name index tables and corpus directories, so anything outside
/// `[A-Za-z0-9_-]` is rejected before it reaches either.
pub fn validate_tenant(tenant: &str) -> Result<()> {
    if tenant.is_empty()
        || !tenant
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(Error::InvalidTenant(tenant.to_string()));
    }
    Ok(())
}
