//! Per-tenant vector indexing and retrieval on LanceDB.
//!
//! Each tenant owns one table (`tenant_{id}`); population happens lazily on
//! the first question and is skipped once the table holds rows. See
//! [`store::TenantIndexStore`].

pub mod schema;
pub mod store;
pub mod table;

pub use store::TenantIndexStore;
