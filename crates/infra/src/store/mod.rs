//! Row storage for table-backed resources.
//!
//! A [`RecordStore`] persists [`Record`]s described by a static
//! [`ResourceSpec`]. Two implementations exist:
//!
//! - [`PostgresStore`]: parameterized SQL over a shared `PgPool`, one explicit
//!   transaction per mutation.
//! - [`InMemoryStore`]: `RwLock`-guarded maps for dev runs and tests.

use async_trait::async_trait;
use thiserror::Error;

use travelhub_core::{Column, FieldSet, FieldValue, Record, ResourceSpec};

pub mod in_memory;
pub mod postgres;
pub mod sql;

pub use in_memory::InMemoryStore;
pub use postgres::PostgresStore;

/// Storage failure.
///
/// These are infrastructure errors; services convert them into classified
/// `ServiceError`s before they leave the service boundary.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A database unique constraint rejected the write.
    #[error("unique violation in {operation}: {message}")]
    UniqueViolation {
        operation: &'static str,
        constraint: Option<String>,
        message: String,
    },

    #[error("database error in {operation}: {message}")]
    Database {
        operation: &'static str,
        message: String,
    },

    #[error("failed to decode row in {operation}: {message}")]
    Decode {
        operation: &'static str,
        message: String,
    },

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Insert a row with the supplied columns; returns the store-assigned id.
    async fn insert(&self, spec: &'static ResourceSpec, fields: &FieldSet) -> Result<i64, StoreError>;

    /// Rows ordered by primary key, optionally windowed by `(limit, offset)`.
    async fn find_all(
        &self,
        spec: &'static ResourceSpec,
        window: Option<(i64, i64)>,
    ) -> Result<Vec<Record>, StoreError>;

    async fn find_one(&self, spec: &'static ResourceSpec, id: i64) -> Result<Option<Record>, StoreError>;

    /// First row (by primary key) whose `column` equals `value`.
    async fn find_by(
        &self,
        spec: &'static ResourceSpec,
        column: &'static Column,
        value: &FieldValue,
    ) -> Result<Option<Record>, StoreError>;

    async fn exists(&self, spec: &'static ResourceSpec, id: i64) -> Result<bool, StoreError>;

    /// Every stored value of one column, in primary key order.
    async fn column_values(
        &self,
        spec: &'static ResourceSpec,
        column: &'static Column,
    ) -> Result<Vec<FieldValue>, StoreError>;

    /// Set only the supplied columns; returns the number of rows touched.
    async fn update(&self, spec: &'static ResourceSpec, id: i64, changes: &FieldSet) -> Result<u64, StoreError>;

    async fn delete(&self, spec: &'static ResourceSpec, id: i64) -> Result<u64, StoreError>;
}
