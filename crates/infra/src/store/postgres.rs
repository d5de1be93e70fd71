//! Postgres-backed record store.
//!
//! ## Error Mapping
//!
//! | SQLx Error | PostgreSQL code | StoreError |
//! |------------|-----------------|------------|
//! | Database (unique violation) | `23505` | `UniqueViolation` |
//! | Database (other) | any other | `Database` |
//! | PoolClosed / PoolTimedOut | N/A | `Unavailable` |
//! | ColumnDecode / ColumnNotFound | N/A | `Decode` |
//! | Other | N/A | `Database` |
//!
//! Mutations run in an explicit transaction: commit on success, rollback on
//! any failure before the error is returned.

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Postgres, Row, Transaction};
use tracing::instrument;

use travelhub_core::{Column, ColumnKind, FieldSet, FieldValue, Record, ResourceSpec};

use super::sql;
use super::{RecordStore, StoreError};

#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: Arc<PgPool>,
}

impl PostgresStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }

    async fn begin(&self) -> Result<Transaction<'static, Postgres>, StoreError> {
        self.pool
            .begin()
            .await
            .map_err(|e| map_sqlx_error("begin_transaction", e))
    }
}

async fn commit(tx: Transaction<'static, Postgres>) -> Result<(), StoreError> {
    tx.commit()
        .await
        .map_err(|e| map_sqlx_error("commit_transaction", e))
}

/// Roll back after a failed statement. The statement error is what the
/// caller reports; a rollback failure is only logged.
async fn rollback(tx: Transaction<'static, Postgres>, operation: &'static str) {
    if let Err(e) = tx.rollback().await {
        tracing::warn!(operation, error = %e, "rollback failed");
    }
}

#[async_trait]
impl RecordStore for PostgresStore {
    #[instrument(skip(self, spec, values), fields(table = spec.table, columns = values.len()), err)]
    async fn insert(&self, spec: &'static ResourceSpec, values: &FieldSet) -> Result<i64, StoreError> {
        let mut tx = self.begin().await?;

        let mut qb = sql::insert(spec, values);
        let id = match qb.build_query_scalar::<i64>().fetch_one(&mut *tx).await {
            Ok(id) => id,
            Err(e) => {
                rollback(tx, "insert").await;
                return Err(map_sqlx_error("insert", e));
            }
        };

        commit(tx).await?;
        Ok(id)
    }

    #[instrument(skip(self, spec), fields(table = spec.table), err)]
    async fn find_all(
        &self,
        spec: &'static ResourceSpec,
        window: Option<(i64, i64)>,
    ) -> Result<Vec<Record>, StoreError> {
        let mut qb = sql::select_all(spec, window);
        let rows = qb
            .build()
            .fetch_all(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("find_all", e))?;

        rows.iter().map(|row| decode_record(spec, row, "find_all")).collect()
    }

    #[instrument(skip(self, spec), fields(table = spec.table), err)]
    async fn find_one(&self, spec: &'static ResourceSpec, id: i64) -> Result<Option<Record>, StoreError> {
        let mut qb = sql::select_one(spec, id);
        let row = qb
            .build()
            .fetch_optional(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("find_one", e))?;

        row.map(|row| decode_record(spec, &row, "find_one")).transpose()
    }

    #[instrument(skip(self, spec, column, value), fields(table = spec.table, column = column.name), err)]
    async fn find_by(
        &self,
        spec: &'static ResourceSpec,
        column: &'static Column,
        value: &FieldValue,
    ) -> Result<Option<Record>, StoreError> {
        let mut qb = sql::select_by(spec, column, value);
        let row = qb
            .build()
            .fetch_optional(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("find_by", e))?;

        row.map(|row| decode_record(spec, &row, "find_by")).transpose()
    }

    #[instrument(skip(self, spec), fields(table = spec.table), err)]
    async fn exists(&self, spec: &'static ResourceSpec, id: i64) -> Result<bool, StoreError> {
        let mut qb = sql::exists(spec, id);
        qb.build_query_scalar::<bool>()
            .fetch_one(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("exists", e))
    }

    #[instrument(skip(self, spec, column), fields(table = spec.table, column = column.name), err)]
    async fn column_values(
        &self,
        spec: &'static ResourceSpec,
        column: &'static Column,
    ) -> Result<Vec<FieldValue>, StoreError> {
        let mut qb = sql::column_values(spec, column);
        let rows = qb
            .build()
            .fetch_all(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("column_values", e))?;

        rows.iter()
            .map(|row| decode_value(row, column).map_err(|e| decode_error("column_values", e)))
            .collect()
    }

    #[instrument(skip(self, spec, changes), fields(table = spec.table, columns = changes.len()), err)]
    async fn update(&self, spec: &'static ResourceSpec, id: i64, changes: &FieldSet) -> Result<u64, StoreError> {
        if changes.is_empty() {
            return Ok(0);
        }

        let mut tx = self.begin().await?;

        let mut qb = sql::update(spec, id, changes);
        let affected = match qb.build().execute(&mut *tx).await {
            Ok(result) => result.rows_affected(),
            Err(e) => {
                rollback(tx, "update").await;
                return Err(map_sqlx_error("update", e));
            }
        };

        commit(tx).await?;
        Ok(affected)
    }

    #[instrument(skip(self, spec), fields(table = spec.table), err)]
    async fn delete(&self, spec: &'static ResourceSpec, id: i64) -> Result<u64, StoreError> {
        let mut tx = self.begin().await?;

        let mut qb = sql::delete(spec, id);
        let affected = match qb.build().execute(&mut *tx).await {
            Ok(result) => result.rows_affected(),
            Err(e) => {
                rollback(tx, "delete").await;
                return Err(map_sqlx_error("delete", e));
            }
        };

        commit(tx).await?;
        Ok(affected)
    }
}

fn decode_record(spec: &ResourceSpec, row: &PgRow, operation: &'static str) -> Result<Record, StoreError> {
    let id: i64 = row
        .try_get(spec.id_column)
        .map_err(|e| decode_error(operation, e))?;

    let mut fields = std::collections::BTreeMap::new();
    for column in spec.columns {
        let value = decode_value(row, column).map_err(|e| decode_error(operation, e))?;
        fields.insert(column.name, value);
    }

    Ok(Record { id, fields })
}

fn decode_value(row: &PgRow, column: &Column) -> Result<FieldValue, sqlx::Error> {
    let value = match column.kind {
        ColumnKind::Integer => row
            .try_get::<Option<i64>, _>(column.name)?
            .map(FieldValue::Integer),
        ColumnKind::Float => row
            .try_get::<Option<f64>, _>(column.name)?
            .map(FieldValue::Float),
        ColumnKind::Boolean => row
            .try_get::<Option<bool>, _>(column.name)?
            .map(FieldValue::Bool),
        ColumnKind::Text | ColumnKind::OneOf(_) => row
            .try_get::<Option<String>, _>(column.name)?
            .map(FieldValue::Text),
    };
    Ok(value.unwrap_or(FieldValue::Null))
}

fn decode_error(operation: &'static str, err: sqlx::Error) -> StoreError {
    StoreError::Decode {
        operation,
        message: err.to_string(),
    }
}

/// Map SQLx errors to StoreError.
pub fn map_sqlx_error(operation: &'static str, err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::Database(db_err) => {
            let message = db_err.message().to_string();
            match db_err.code().as_deref() {
                Some("23505") => StoreError::UniqueViolation {
                    operation,
                    constraint: db_err.constraint().map(str::to_string),
                    message,
                },
                _ => StoreError::Database { operation, message },
            }
        }
        sqlx::Error::PoolClosed => StoreError::Unavailable(format!("connection pool closed in {operation}")),
        sqlx::Error::PoolTimedOut => {
            StoreError::Unavailable(format!("timed out acquiring a connection in {operation}"))
        }
        e @ (sqlx::Error::ColumnDecode { .. } | sqlx::Error::ColumnNotFound(_)) => decode_error(operation, e),
        other => StoreError::Database {
            operation,
            message: other.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_errors_map_to_unavailable() {
        assert!(matches!(
            map_sqlx_error("find_all", sqlx::Error::PoolClosed),
            StoreError::Unavailable(_)
        ));
        assert!(matches!(
            map_sqlx_error("insert", sqlx::Error::PoolTimedOut),
            StoreError::Unavailable(_)
        ));
    }

    #[test]
    fn missing_column_maps_to_decode() {
        let err = map_sqlx_error("find_one", sqlx::Error::ColumnNotFound("title".into()));
        assert!(matches!(err, StoreError::Decode { operation: "find_one", .. }));
    }

    #[test]
    fn other_errors_keep_the_operation() {
        let err = map_sqlx_error("delete", sqlx::Error::RowNotFound);
        assert_eq!(
            err,
            StoreError::Database {
                operation: "delete",
                message: sqlx::Error::RowNotFound.to_string(),
            }
        );
    }
}
